use std::collections::HashMap;

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::path::{DrawingStatus, PathGroup, PathId, PolylineType};

/// The canonical shape collection plus the active-path pointer.
///
/// All read access goes through total queries that return defensive defaults
/// for absent ids, so rendering code never has to guard for path existence.
/// Mutation is deliberately `pub(crate)`: only the command layer writes here,
/// which keeps every state change reversible through the history.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Document {
    active_id: Option<PathId>,
    paths: HashMap<PathId, PathGroup>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self, id: PathId) -> Option<&PathGroup> {
        self.paths.get(&id)
    }

    pub fn active_id(&self) -> Option<PathId> {
        self.active_id
    }

    /// The active path, if one is set and still present.
    pub fn active_path(&self) -> Option<&PathGroup> {
        self.active_id.and_then(|id| self.paths.get(&id))
    }

    /// Points of the given path; empty slice if the id is absent.
    pub fn points_of(&self, id: PathId) -> &[Pos2] {
        self.paths.get(&id).map_or(&[], |path| path.points())
    }

    /// Drawing status of the given path; `NotDrawing` if the id is absent.
    pub fn drawing_status_of(&self, id: PathId) -> DrawingStatus {
        self.paths
            .get(&id)
            .map_or(DrawingStatus::NotDrawing, |path| path.drawing_status())
    }

    /// Polyline type of the given path; `Open` if the id is absent.
    pub fn polyline_type_of(&self, id: PathId) -> PolylineType {
        self.paths
            .get(&id)
            .map_or(PolylineType::Open, |path| path.polyline_type())
    }

    pub fn ids(&self) -> impl Iterator<Item = PathId> + '_ {
        self.paths.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub(crate) fn set_active(&mut self, id: Option<PathId>) {
        self.active_id = id;
    }

    pub(crate) fn insert_path(&mut self, id: PathId, path: PathGroup) {
        self.paths.insert(id, path);
    }

    pub(crate) fn remove_path(&mut self, id: PathId) -> Option<PathGroup> {
        let removed = self.paths.remove(&id);
        if self.active_id == Some(id) {
            self.active_id = None;
        }
        removed
    }

    pub(crate) fn path_mut(&mut self, id: PathId) -> Option<&mut PathGroup> {
        self.paths.get_mut(&id)
    }

    pub(crate) fn paths(&self) -> &HashMap<PathId, PathGroup> {
        &self.paths
    }

    pub(crate) fn take_paths(&mut self) -> HashMap<PathId, PathGroup> {
        std::mem::take(&mut self.paths)
    }

    pub(crate) fn restore_paths(&mut self, paths: HashMap<PathId, PathGroup>) {
        self.paths = paths;
    }
}
