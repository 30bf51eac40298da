use egui::Pos2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a path group. Generated randomly at creation and never
/// reused within a session, even after the path is deleted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathId(Uuid);

impl PathId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PathId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PathId({})", self.0)
    }
}

/// Whether a path still accepts appended points.
///
/// While `Drawing`, clicks append points and the renderer shows a preview
/// segment following the pointer. Once `NotDrawing`, only point drags and
/// whole-path transforms apply; undoing the finish command is the only way
/// back to `Drawing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawingStatus {
    Drawing,
    #[default]
    NotDrawing,
}

/// Whether the rendered polyline connects its last point back to the first.
/// Purely a rendering flag; the stored point list is the same either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolylineType {
    #[default]
    Open,
    Closed,
}

/// One drawable polyline: an ordered point list plus its drawing flags.
///
/// The point list is never empty: creation always seeds it with the first
/// clicked point. A point has no identity of its own; its index in the list
/// is its identity within the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathGroup {
    points: Vec<Pos2>,
    drawing_status: DrawingStatus,
    polyline_type: PolylineType,
}

impl PathGroup {
    /// Creates a new path seeded with its first point, in the initial
    /// (Drawing, Open) state.
    pub fn new(first_point: Pos2) -> Self {
        Self {
            points: vec![first_point],
            drawing_status: DrawingStatus::Drawing,
            polyline_type: PolylineType::Open,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn drawing_status(&self) -> DrawingStatus {
        self.drawing_status
    }

    pub fn polyline_type(&self) -> PolylineType {
        self.polyline_type
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing_status == DrawingStatus::Drawing
    }

    pub(crate) fn push_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub(crate) fn set_point(&mut self, index: usize, point: Pos2) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point;
        }
    }

    pub(crate) fn replace_points(&mut self, points: Vec<Pos2>) {
        self.points = points;
    }

    pub(crate) fn set_state(&mut self, status: DrawingStatus, polyline_type: PolylineType) {
        self.drawing_status = status;
        self.polyline_type = polyline_type;
    }

    pub(crate) fn translate(&mut self, delta: egui::Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}
