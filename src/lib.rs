#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod document;
pub mod grid;
pub mod input;
pub mod panels;
pub mod path;
pub mod renderer;

pub use app::PolylineApp;
pub use command::{Command, CommandError, CommandHistory, CommandResult, HistoryState};
pub use document::Document;
pub use grid::GridSettings;
pub use input::{CanvasController, EditorMode};
pub use path::{DrawingStatus, PathGroup, PathId, PolylineType};
pub use renderer::Renderer;
