use super::commands::AppliedCommand;
use super::{Command, CommandResult};
use crate::document::Document;
use crate::path::PathId;

/// Linear undo/redo history over the document.
///
/// `position` counts the commands currently applied; entry 0 of the
/// conceptual history is the initial document before any command, which is
/// why [`HistoryState::history_len`] is always one more than the number of
/// recorded commands. Issuing a new command after undos prunes the redo
/// branch: redoing past history is impossible once the timeline forks.
///
/// The document is passed into each call rather than owned here, so the
/// exclusive borrows make nested command execution unrepresentable.
#[derive(Debug, Default)]
pub struct CommandHistory {
    entries: Vec<AppliedCommand>,
    position: usize,
}

/// Read-only snapshot of the history cursor, consumed by UI chrome to
/// enable/disable the undo/redo controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryState {
    /// Index of the last applied command; 0 means nothing applied
    pub position: usize,
    /// Length of the history including the initial-state entry; always >= 1
    pub history_len: usize,
    /// Currently active path, if any
    pub active_id: Option<PathId>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the command to the document, records it, and runs it.
    ///
    /// On a precondition failure nothing is recorded and the document is
    /// untouched. On success any previously undone commands are discarded
    /// first.
    pub fn execute(&mut self, command: Command, document: &mut Document) -> CommandResult {
        let applied = AppliedCommand::bind(command, document)?;

        if self.position < self.entries.len() {
            let pruned = self.entries.len() - self.position;
            self.entries.truncate(self.position);
            log::trace!("pruned {pruned} undone command(s) from history");
        }

        self.entries.push(applied);
        self.position += 1;
        let entry = &self.entries[self.position - 1];
        log::debug!(
            "{} (position {} of {})",
            entry.label(),
            self.position,
            self.entries.len() + 1,
        );
        entry.execute(document);
        Ok(())
    }

    /// Reverts the last applied command. Safe no-op when nothing is applied.
    pub fn undo(&mut self, document: &mut Document) {
        if self.position == 0 {
            return;
        }
        let entry = &self.entries[self.position - 1];
        log::debug!("undo {}", entry.label());
        entry.undo(document);
        self.position -= 1;
    }

    /// Re-applies the next undone command. Safe no-op at the newest state.
    pub fn redo(&mut self, document: &mut Document) {
        if self.position == self.entries.len() {
            return;
        }
        let entry = &self.entries[self.position];
        log::debug!("redo {}", entry.label());
        entry.execute(document);
        self.position += 1;
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    pub fn state(&self, document: &Document) -> HistoryState {
        HistoryState {
            position: self.position,
            history_len: self.entries.len() + 1,
            active_id: document.active_id(),
        }
    }

    /// Names of the recorded commands in apply order, for the history panel.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.label())
    }
}
