use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::CommandError;
use crate::document::Document;
use crate::path::{DrawingStatus, PathGroup, PathId, PolylineType};

/// Commands that can be executed against the document.
///
/// This is the complete, closed catalogue of reversible operations: every
/// mutation of the document goes through one of these variants, issued via
/// [`CommandHistory::execute`](super::CommandHistory::execute). Each variant
/// carries only its payload; the pre-mutation state needed for undo is
/// captured when the command is bound to the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Start a new path seeded with its first point and make it active
    CreateGroup { point: Pos2 },
    /// Append a point to the active path
    AddPoint { point: Pos2 },
    /// Overwrite one point of the active path
    MovePoint { index: usize, point: Pos2 },
    /// Change which path is active (`None` deselects)
    SetActive { id: Option<PathId> },
    /// Set the drawing status and polyline type of the active path
    FinishPolyline {
        drawing_status: DrawingStatus,
        polyline_type: PolylineType,
    },
    /// Shift every point of the active path by a delta
    TranslateGroup { delta: Vec2 },
    /// Remove a path from the document
    DeletePath { id: PathId },
    /// Remove every path and deselect
    ClearCanvas,
}

/// A command bound to its target, with the pre-mutation state captured.
///
/// Binding happens before any mutation: the target path is resolved, the
/// payload is validated, and whatever snapshot undo needs is cloned out of
/// the document. Undo restores that snapshot wholesale rather than computing
/// an inverse; `TranslateGroup` is the one exception, since a translation is
/// its own exact inverse.
#[derive(Debug, Clone)]
pub(crate) enum AppliedCommand {
    CreateGroup {
        id: PathId,
        point: Pos2,
        previous_active: Option<PathId>,
    },
    AddPoint {
        id: PathId,
        point: Pos2,
        previous_points: Vec<Pos2>,
    },
    MovePoint {
        id: PathId,
        index: usize,
        point: Pos2,
        previous_points: Vec<Pos2>,
    },
    SetActive {
        id: Option<PathId>,
        previous_active: Option<PathId>,
    },
    FinishPolyline {
        id: PathId,
        drawing_status: DrawingStatus,
        polyline_type: PolylineType,
        previous_status: DrawingStatus,
        previous_type: PolylineType,
    },
    TranslateGroup {
        id: PathId,
        delta: Vec2,
    },
    DeletePath {
        id: PathId,
        removed: PathGroup,
        previous_active: Option<PathId>,
    },
    ClearCanvas {
        previous_paths: HashMap<PathId, PathGroup>,
        previous_active: Option<PathId>,
    },
}

fn active_path_id(document: &Document) -> Result<PathId, CommandError> {
    document.active_id().ok_or(CommandError::NoActivePath)
}

impl AppliedCommand {
    /// Resolves the command against the document and captures the snapshots
    /// its undo needs. Fails without side effects if a precondition does not
    /// hold.
    pub(crate) fn bind(command: Command, document: &Document) -> Result<Self, CommandError> {
        match command {
            Command::CreateGroup { point } => Ok(Self::CreateGroup {
                id: PathId::new(),
                point,
                previous_active: document.active_id(),
            }),

            Command::AddPoint { point } => {
                let id = active_path_id(document)?;
                Ok(Self::AddPoint {
                    id,
                    point,
                    previous_points: document.points_of(id).to_vec(),
                })
            }

            Command::MovePoint { index, point } => {
                let id = active_path_id(document)?;
                let points = document.points_of(id);
                if index >= points.len() {
                    return Err(CommandError::PointOutOfBounds {
                        index,
                        len: points.len(),
                    });
                }
                Ok(Self::MovePoint {
                    id,
                    index,
                    point,
                    previous_points: points.to_vec(),
                })
            }

            Command::SetActive { id } => {
                if let Some(id) = id {
                    if document.path(id).is_none() {
                        return Err(CommandError::PathNotFound(id));
                    }
                }
                Ok(Self::SetActive {
                    id,
                    previous_active: document.active_id(),
                })
            }

            Command::FinishPolyline {
                drawing_status,
                polyline_type,
            } => {
                let id = active_path_id(document)?;
                Ok(Self::FinishPolyline {
                    id,
                    drawing_status,
                    polyline_type,
                    previous_status: document.drawing_status_of(id),
                    previous_type: document.polyline_type_of(id),
                })
            }

            Command::TranslateGroup { delta } => {
                let id = active_path_id(document)?;
                Ok(Self::TranslateGroup { id, delta })
            }

            Command::DeletePath { id } => {
                let removed = document
                    .path(id)
                    .cloned()
                    .ok_or(CommandError::PathNotFound(id))?;
                Ok(Self::DeletePath {
                    id,
                    removed,
                    previous_active: document.active_id(),
                })
            }

            Command::ClearCanvas => Ok(Self::ClearCanvas {
                previous_paths: document.paths().clone(),
                previous_active: document.active_id(),
            }),
        }
    }

    /// Applies the command. Also used to replay it on redo; the target id was
    /// resolved at bind time, so replay hits the same path regardless of what
    /// is active by then.
    pub(crate) fn execute(&self, document: &mut Document) {
        match self {
            Self::CreateGroup { id, point, .. } => {
                document.insert_path(*id, PathGroup::new(*point));
                document.set_active(Some(*id));
            }
            Self::AddPoint { id, point, .. } => {
                if let Some(path) = document.path_mut(*id) {
                    path.push_point(*point);
                }
            }
            Self::MovePoint {
                id, index, point, ..
            } => {
                if let Some(path) = document.path_mut(*id) {
                    path.set_point(*index, *point);
                }
            }
            Self::SetActive { id, .. } => {
                document.set_active(*id);
            }
            Self::FinishPolyline {
                id,
                drawing_status,
                polyline_type,
                ..
            } => {
                if let Some(path) = document.path_mut(*id) {
                    path.set_state(*drawing_status, *polyline_type);
                }
            }
            Self::TranslateGroup { id, delta } => {
                if let Some(path) = document.path_mut(*id) {
                    path.translate(*delta);
                }
            }
            Self::DeletePath { id, .. } => {
                document.remove_path(*id);
                document.set_active(None);
            }
            Self::ClearCanvas { .. } => {
                document.take_paths();
                document.set_active(None);
            }
        }
    }

    /// Restores the captured pre-mutation state.
    pub(crate) fn undo(&self, document: &mut Document) {
        match self {
            Self::CreateGroup {
                id, previous_active, ..
            } => {
                document.remove_path(*id);
                document.set_active(*previous_active);
            }
            Self::AddPoint {
                id, previous_points, ..
            }
            | Self::MovePoint {
                id, previous_points, ..
            } => {
                if let Some(path) = document.path_mut(*id) {
                    path.replace_points(previous_points.clone());
                }
            }
            Self::SetActive {
                previous_active, ..
            } => {
                document.set_active(*previous_active);
            }
            Self::FinishPolyline {
                id,
                previous_status,
                previous_type,
                ..
            } => {
                if let Some(path) = document.path_mut(*id) {
                    path.set_state(*previous_status, *previous_type);
                }
            }
            Self::TranslateGroup { id, delta } => {
                if let Some(path) = document.path_mut(*id) {
                    path.translate(-*delta);
                }
            }
            Self::DeletePath {
                id,
                removed,
                previous_active,
            } => {
                document.insert_path(*id, removed.clone());
                document.set_active(*previous_active);
            }
            Self::ClearCanvas {
                previous_paths,
                previous_active,
            } => {
                document.restore_paths(previous_paths.clone());
                document.set_active(*previous_active);
            }
        }
    }

    /// Short name for logs and the history panel.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::CreateGroup { .. } => "Create Group",
            Self::AddPoint { .. } => "Add Point",
            Self::MovePoint { .. } => "Move Point",
            Self::SetActive { .. } => "Set Active",
            Self::FinishPolyline { .. } => "Finish Polyline",
            Self::TranslateGroup { .. } => "Translate Group",
            Self::DeletePath { .. } => "Delete Path",
            Self::ClearCanvas { .. } => "Clear Canvas",
        }
    }
}
