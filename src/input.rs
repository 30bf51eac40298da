use egui::{Pos2, Rect, Response, Vec2};
use serde::{Deserialize, Serialize};

use crate::command::{Command, CommandHistory};
use crate::document::Document;
use crate::grid::GridSettings;
use crate::path::{DrawingStatus, PathId, PolylineType};
use crate::renderer::{POINT_RADIUS, POINT_RADIUS_HOVER};

/// Padding around a path's bounding box used when grabbing the whole path.
const PATH_GRAB_PADDING: f32 = 10.0;

/// What pointer gestures on the canvas mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorMode {
    /// Clicks place points; clicking the first/last point finishes the path
    #[default]
    Draw,
    /// Drag individual points of the active path
    Edit,
    /// Drag the whole active path
    Move,
}

impl EditorMode {
    pub fn label(&self) -> &'static str {
        match self {
            EditorMode::Draw => "Draw",
            EditorMode::Edit => "Edit",
            EditorMode::Move => "Move",
        }
    }
}

/// An in-flight drag gesture. Previewed locally until the pointer is
/// released, then committed to the history as a single command.
#[derive(Debug, Clone, Copy)]
enum DragState {
    Point {
        id: PathId,
        index: usize,
        current: Pos2,
    },
    Path {
        id: PathId,
        start: Pos2,
        current: Pos2,
    },
}

/// Translates canvas pointer events into commands.
///
/// Holds only transient gesture state (hover and drag); everything durable
/// lives in the document and the history. Coordinates are snapped to the
/// grid and clamped to the canvas before they reach a command.
#[derive(Debug, Default)]
pub struct CanvasController {
    drag: Option<DragState>,
    hover_pos: Option<Pos2>,
    hovered_point: Option<(PathId, usize)>,
}

impl CanvasController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one frame of canvas interaction.
    pub fn handle(
        &mut self,
        response: &Response,
        canvas: Rect,
        mode: EditorMode,
        grid: &GridSettings,
        document: &mut Document,
        history: &mut CommandHistory,
    ) {
        self.hover_pos = response.hover_pos();
        self.hovered_point = self.hover_pos.and_then(|pos| {
            document
                .active_id()
                .and_then(|id| hit_point(document, id, pos).map(|index| (id, index)))
        });

        match mode {
            EditorMode::Draw => self.handle_draw(response, canvas, grid, document, history),
            EditorMode::Edit => self.handle_edit(response, canvas, grid, document, history),
            EditorMode::Move => self.handle_move(response, document, history),
        }
    }

    fn handle_draw(
        &mut self,
        response: &Response,
        canvas: Rect,
        grid: &GridSettings,
        document: &mut Document,
        history: &mut CommandHistory,
    ) {
        if !response.clicked() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };

        let drawing_path = document
            .active_id()
            .filter(|&id| document.drawing_status_of(id) == DrawingStatus::Drawing);

        let command = match drawing_path {
            Some(id) => {
                let len = document.points_of(id).len();
                match hit_point(document, id, pos) {
                    // Clicking the start point closes the loop
                    Some(0) if len >= 3 => Some(Command::FinishPolyline {
                        drawing_status: DrawingStatus::NotDrawing,
                        polyline_type: PolylineType::Closed,
                    }),
                    // Clicking the end point finishes the path open
                    Some(index) if index == len - 1 && len >= 2 => Some(Command::FinishPolyline {
                        drawing_status: DrawingStatus::NotDrawing,
                        polyline_type: PolylineType::Open,
                    }),
                    // Clicks on interior points are ignored
                    Some(_) => None,
                    None => Some(Command::AddPoint {
                        point: place_point(pos, canvas, grid),
                    }),
                }
            }
            None => Some(Command::CreateGroup {
                point: place_point(pos, canvas, grid),
            }),
        };

        if let Some(command) = command {
            issue(history, document, command);
        }
    }

    fn handle_edit(
        &mut self,
        response: &Response,
        canvas: Rect,
        grid: &GridSettings,
        document: &mut Document,
        history: &mut CommandHistory,
    ) {
        self.handle_select_click(response, document, history);

        if response.drag_started() {
            if let (Some(pos), Some(active)) =
                (response.interact_pointer_pos(), document.active_id())
            {
                if let Some(index) = hit_point(document, active, pos) {
                    self.drag = Some(DragState::Point {
                        id: active,
                        index,
                        current: pos,
                    });
                }
            }
        }

        if response.dragged() {
            if let (Some(DragState::Point { current, .. }), Some(pos)) =
                (self.drag.as_mut(), response.interact_pointer_pos())
            {
                *current = canvas.shrink(POINT_RADIUS).clamp(pos);
            }
        }

        if response.drag_stopped() {
            if let Some(DragState::Point { id, index, current }) = self.drag.take() {
                if document.active_id() == Some(id) {
                    issue(
                        history,
                        document,
                        Command::MovePoint {
                            index,
                            point: place_point(current, canvas, grid),
                        },
                    );
                }
            }
        }
    }

    fn handle_move(
        &mut self,
        response: &Response,
        document: &mut Document,
        history: &mut CommandHistory,
    ) {
        self.handle_select_click(response, document, history);

        if response.drag_started() {
            if let (Some(pos), Some(active)) =
                (response.interact_pointer_pos(), document.active_id())
            {
                if grab_rect(document, active).contains(pos) {
                    self.drag = Some(DragState::Path {
                        id: active,
                        start: pos,
                        current: pos,
                    });
                }
            }
        }

        if response.dragged() {
            if let (Some(DragState::Path { current, .. }), Some(pos)) =
                (self.drag.as_mut(), response.interact_pointer_pos())
            {
                *current = pos;
            }
        }

        if response.drag_stopped() {
            if let Some(DragState::Path { id, start, current }) = self.drag.take() {
                let delta = current - start;
                if document.active_id() == Some(id) && delta != Vec2::ZERO {
                    issue(history, document, Command::TranslateGroup { delta });
                }
            }
        }
    }

    /// Clicking a point of an inactive path makes that path active.
    fn handle_select_click(
        &mut self,
        response: &Response,
        document: &mut Document,
        history: &mut CommandHistory,
    ) {
        if !response.clicked() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        if let Some((id, _)) = hit_any_path(document, pos) {
            if Some(id) != document.active_id() {
                issue(history, document, Command::SetActive { id: Some(id) });
            }
        }
    }

    pub fn hover_pos(&self) -> Option<Pos2> {
        self.hover_pos
    }

    pub fn hovered_point(&self) -> Option<(PathId, usize)> {
        self.hovered_point
    }

    /// The point currently being dragged, at its preview position.
    pub fn dragged_point(&self) -> Option<(PathId, usize, Pos2)> {
        match self.drag {
            Some(DragState::Point { id, index, current }) => Some((id, index, current)),
            _ => None,
        }
    }

    /// Preview offset for a path mid-translation; zero otherwise.
    pub fn path_offset(&self, id: PathId) -> Vec2 {
        match self.drag {
            Some(DragState::Path { id: drag_id, start, current }) if drag_id == id => {
                current - start
            }
            _ => Vec2::ZERO,
        }
    }
}

fn issue(history: &mut CommandHistory, document: &mut Document, command: Command) {
    if let Err(err) = history.execute(command, document) {
        log::warn!("command rejected: {err}");
    }
}

/// Snaps a pointer position to the grid (in canvas-local coordinates) and
/// clamps it inside the canvas, inset by the point radius.
fn place_point(pos: Pos2, canvas: Rect, grid: &GridSettings) -> Pos2 {
    let local = (pos - canvas.min).to_pos2();
    let snapped = canvas.min + grid.snap_pos(local).to_vec2();
    canvas.shrink(POINT_RADIUS).clamp(snapped)
}

/// Index of the first point of `id` within hover range of `pos`.
fn hit_point(document: &Document, id: PathId, pos: Pos2) -> Option<usize> {
    document
        .points_of(id)
        .iter()
        .position(|point| point.distance(pos) <= POINT_RADIUS_HOVER)
}

fn hit_any_path(document: &Document, pos: Pos2) -> Option<(PathId, usize)> {
    document
        .ids()
        .find_map(|id| hit_point(document, id, pos).map(|index| (id, index)))
}

/// Padded bounding box of a path's points, used to grab the whole path.
fn grab_rect(document: &Document, id: PathId) -> Rect {
    let points = document.points_of(id);
    let Some(first) = points.first() else {
        return Rect::NOTHING;
    };
    let mut rect = Rect::from_min_max(*first, *first);
    for point in points {
        rect.extend_with(*point);
    }
    rect.expand(PATH_GRAB_PADDING)
}
