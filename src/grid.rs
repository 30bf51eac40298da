use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Default grid spacing in points.
pub const DEFAULT_RESOLUTION: f32 = 10.0;

/// Background grid configuration. Persisted across runs with the rest of the
/// UI preferences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub visible: bool,
    pub resolution: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            visible: true,
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl GridSettings {
    /// Snaps a canvas-local position to the grid, if snapping applies.
    pub fn snap_pos(&self, pos: Pos2) -> Pos2 {
        Pos2::new(
            snap_to_grid(pos.x, self.resolution),
            snap_to_grid(pos.y, self.resolution),
        )
    }
}

/// Rounds a coordinate to the nearest multiple of `resolution`.
///
/// Values pass through unchanged when the resolution is not positive, so a
/// disabled grid degrades to free placement.
pub fn snap_to_grid(value: f32, resolution: f32) -> f32 {
    if resolution <= 0.0 {
        return value;
    }
    (value / resolution).round() * resolution
}
