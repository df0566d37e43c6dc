//! History management for undo/redo operations
//!
//! `EditHistory` is a bounded linear log of applied commands with a cursor
//! between the applied prefix and the undone suffix. Recording a new command
//! discards the undone suffix, and the oldest entries are evicted once the
//! configured depth is exceeded.

use super::errors::Result;
use crate::commands::EditCommand;
use std::collections::VecDeque;

/// Configuration for history depth
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryConfig {
    /// Maximum number of entries to keep (0 keeps nothing)
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

/// Statistics about the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStats {
    /// Number of commands that can be undone
    pub undo_count: usize,
    /// Number of commands that can be redone
    pub redo_count: usize,
    /// Configured depth limit
    pub max_entries: usize,
}

/// Bounded undo/redo log over commands targeting `T`
pub struct EditHistory<T> {
    config: HistoryConfig,

    /// Oldest first
    entries: VecDeque<Box<dyn EditCommand<T>>>,

    /// Number of applied entries; `entries[cursor..]` are undone
    cursor: usize,
}

impl<T> EditHistory<T> {
    /// Create an empty history with default depth
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    /// Create an empty history with custom configuration
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            config,
            entries: VecDeque::new(),
            cursor: 0,
        }
    }

    /// Record a command that has already been executed
    ///
    /// Any undone commands are dropped; they can no longer be redone.
    pub fn push(&mut self, command: Box<dyn EditCommand<T>>) {
        let discarded = self.entries.len() - self.cursor;
        if discarded > 0 {
            tracing::debug!(discarded, "dropping redo tail");
            self.entries.truncate(self.cursor);
        }

        self.entries.push_back(command);
        self.cursor += 1;

        while self.entries.len() > self.config.max_entries {
            self.entries.pop_front();
            self.cursor -= 1;
        }
    }

    /// Execute `command` against `target` and record it
    ///
    /// # Errors
    ///
    /// Propagates the command's error; a failed command is not recorded.
    pub fn apply(&mut self, mut command: Box<dyn EditCommand<T>>, target: &mut T) -> Result<()> {
        command.execute(target)?;
        tracing::debug!(command = command.description(), "applied command");
        self.push(command);
        Ok(())
    }

    /// Undo the most recently applied command
    ///
    /// Returns the undone command, or `None` when there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Propagates the command's error and leaves the cursor unchanged.
    pub fn undo(&mut self, target: &mut T) -> Result<Option<&dyn EditCommand<T>>> {
        if self.cursor == 0 {
            return Ok(None);
        }

        let index = self.cursor - 1;
        let command = &mut self.entries[index];
        command.undo(target)?;
        tracing::debug!(command = command.description(), "undid command");
        self.cursor = index;
        Ok(Some(self.entries[index].as_ref()))
    }

    /// Re-execute the most recently undone command
    ///
    /// Returns the redone command, or `None` when there is nothing to redo.
    ///
    /// # Errors
    ///
    /// Propagates the command's error and leaves the cursor unchanged.
    pub fn redo(&mut self, target: &mut T) -> Result<Option<&dyn EditCommand<T>>> {
        let index = self.cursor;
        let Some(command) = self.entries.get_mut(index) else {
            return Ok(None);
        };
        command.execute(target)?;
        tracing::debug!(command = command.description(), "redid command");
        self.cursor = index + 1;
        Ok(Some(self.entries[index].as_ref()))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of recorded entries, applied and undone
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get description of the next undo operation
    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .map(|command| command.description())
    }

    /// Get description of the next redo operation
    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.entries
            .get(self.cursor)
            .map(|command| command.description())
    }

    /// Forget every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            undo_count: self.cursor,
            redo_count: self.entries.len() - self.cursor,
            max_entries: self.config.max_entries,
        }
    }
}

impl<T> Default for EditHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for EditHistory<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EditHistory")
            .field("config", &self.config)
            .field("len", &self.entries.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}
