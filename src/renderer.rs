use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke};

use crate::document::Document;
use crate::grid::GridSettings;
use crate::input::{CanvasController, EditorMode};
use crate::path::{DrawingStatus, PolylineType};

/// Radius of a rendered point.
pub const POINT_RADIUS: f32 = 4.0;
/// Radius of a point under the pointer; doubles as the hit-test range.
pub const POINT_RADIUS_HOVER: f32 = 8.0;

/// Draws the document onto the canvas from its read queries.
///
/// The renderer owns no document state; it consults the controller for
/// transient gesture previews (a mid-drag point, a mid-translation path, the
/// pointer position for the live segment while drawing).
#[derive(Debug)]
pub struct Renderer {
    background: Color32,
    grid_stroke: Stroke,
    line_stroke: Stroke,
    active_stroke: Stroke,
    preview_stroke: Stroke,
    point_fill: Color32,
    point_outline: Stroke,
    hover_fill: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: Color32::from_gray(24),
            grid_stroke: Stroke::new(0.5, Color32::from_gray(48)),
            line_stroke: Stroke::new(1.5, Color32::from_gray(180)),
            active_stroke: Stroke::new(2.0, Color32::from_rgb(110, 170, 255)),
            preview_stroke: Stroke::new(1.0, Color32::from_gray(120)),
            point_fill: Color32::WHITE,
            point_outline: Stroke::new(1.0, Color32::from_gray(100)),
            hover_fill: Color32::from_rgb(160, 90, 220),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the current frame.
    pub fn paint(
        &self,
        painter: &Painter,
        canvas: Rect,
        document: &Document,
        controller: &CanvasController,
        grid: &GridSettings,
        mode: EditorMode,
    ) {
        painter.rect_filled(canvas, 0.0, self.background);
        if grid.visible {
            self.paint_grid(painter, canvas, grid);
        }

        let hot_point = controller
            .hovered_point()
            .or_else(|| controller.dragged_point().map(|(id, index, _)| (id, index)));

        for id in document.ids() {
            let offset = controller.path_offset(id);
            let mut points: Vec<Pos2> =
                document.points_of(id).iter().map(|p| *p + offset).collect();
            if let Some((drag_id, index, pos)) = controller.dragged_point() {
                if drag_id == id {
                    if let Some(slot) = points.get_mut(index) {
                        *slot = pos;
                    }
                }
            }

            let is_active = document.active_id() == Some(id);
            let stroke = if is_active {
                self.active_stroke
            } else {
                self.line_stroke
            };

            if points.len() >= 2 {
                let shape = match document.polyline_type_of(id) {
                    PolylineType::Closed => Shape::closed_line(points.clone(), stroke),
                    PolylineType::Open => Shape::line(points.clone(), stroke),
                };
                painter.add(shape);
            }

            // Live segment from the last point to the pointer while drawing
            if is_active
                && mode == EditorMode::Draw
                && document.drawing_status_of(id) == DrawingStatus::Drawing
            {
                if let (Some(last), Some(hover)) = (points.last(), controller.hover_pos()) {
                    painter.extend(Shape::dashed_line(
                        &[*last, hover],
                        self.preview_stroke,
                        4.0,
                        4.0,
                    ));
                }
            }

            // Points are shown on the active path only, and never in Move mode
            if is_active && mode != EditorMode::Move {
                for (index, point) in points.iter().enumerate() {
                    let is_hot = hot_point == Some((id, index));
                    let (radius, fill) = if is_hot {
                        (POINT_RADIUS_HOVER, self.hover_fill)
                    } else {
                        (POINT_RADIUS, self.point_fill)
                    };
                    painter.circle(*point, radius, fill, self.point_outline);
                }
            }
        }
    }

    fn paint_grid(&self, painter: &Painter, canvas: Rect, grid: &GridSettings) {
        if grid.resolution <= 0.0 {
            return;
        }
        let mut x = canvas.min.x + grid.resolution;
        while x < canvas.max.x {
            painter.line_segment(
                [Pos2::new(x, canvas.min.y), Pos2::new(x, canvas.max.y)],
                self.grid_stroke,
            );
            x += grid.resolution;
        }
        let mut y = canvas.min.y + grid.resolution;
        while y < canvas.max.y {
            painter.line_segment(
                [Pos2::new(canvas.min.x, y), Pos2::new(canvas.max.x, y)],
                self.grid_stroke,
            );
            y += grid.resolution;
        }
    }
}
