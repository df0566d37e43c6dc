//! Command system for editor operations
//!
//! Provides the `EditCommand` trait consumed by [`EditHistory`] and
//! `StoreCommand`, which turns any `SubtitleStore` mutation into an undoable
//! command. A store command remembers the inverse splice of what it did, so
//! undo and redo never need to re-derive anything from the document.
//!
//! [`EditHistory`]: crate::core::EditHistory

use crate::core::errors::{EditorError, Result};
use crate::core::store::{Splice, SubtitleStore};
use srt_core::Cue;

/// Trait for commands that can be executed and undone against a target
///
/// `execute` is called once to apply the command and again for every redo;
/// `undo` is only called after a successful `execute`.
///
/// # Examples
///
/// ```
/// use srt_editor::{EditCommand, EditHistory, Result};
///
/// #[derive(Debug)]
/// struct Append(&'static str);
///
/// impl EditCommand<String> for Append {
///     fn execute(&mut self, target: &mut String) -> Result<()> {
///         target.push_str(self.0);
///         Ok(())
///     }
///
///     fn undo(&mut self, target: &mut String) -> Result<()> {
///         target.truncate(target.len() - self.0.len());
///         Ok(())
///     }
///
///     fn description(&self) -> &str {
///         "Append"
///     }
/// }
///
/// let mut text = String::from("a");
/// let mut history = EditHistory::new();
/// history.apply(Box::new(Append("b")), &mut text)?;
/// history.undo(&mut text)?;
/// assert_eq!(text, "a");
/// # Ok::<(), srt_editor::EditorError>(())
/// ```
pub trait EditCommand<T>: core::fmt::Debug {
    /// Apply (or re-apply) the command
    fn execute(&mut self, target: &mut T) -> Result<()>;

    /// Reverse the last `execute`
    fn undo(&mut self, target: &mut T) -> Result<()>;

    /// Get a human-readable description of the command
    fn description(&self) -> &str;

    /// Whether the first `execute` changed the target
    ///
    /// Commands reporting `false` are not worth recording in history.
    fn modifies_content(&self) -> bool {
        true
    }
}

/// One `SubtitleStore` mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEdit {
    SetContent(Vec<Cue>),
    Push(Cue),
    Insert { cue: Cue, index: usize },
    Remove { index: usize },
    Update { cue: Cue, index: usize },
    Clear,
    Merge { start: usize, end: usize },
    Split { index: usize, position: usize },
}

impl StoreEdit {
    /// Perform the edit, returning its inverse unless it was a no-op
    pub fn apply_to(&self, store: &mut SubtitleStore) -> Option<Splice> {
        match self {
            Self::SetContent(cues) => Some(store.set_content(cues.clone())),
            Self::Push(cue) => Some(store.push(cue.clone())),
            Self::Insert { cue, index } => Some(store.insert(cue.clone(), *index)),
            Self::Remove { index } => store.remove(*index),
            Self::Update { cue, index } => store.update(cue.clone(), *index),
            Self::Clear => Some(store.clear()),
            Self::Merge { start, end } => store.merge(*start, *end),
            Self::Split { index, position } => store.split(*index, *position),
        }
    }

    /// Default human-readable description, 1-based line numbers
    pub fn describe(&self) -> String {
        match self {
            Self::SetContent(cues) => format!("Load {} lines", cues.len()),
            Self::Push(_) => "Append line".to_string(),
            Self::Insert { index, .. } => format!("Insert line {}", index + 1),
            Self::Remove { index } => format!("Remove line {}", index + 1),
            Self::Update { index, .. } => format!("Edit line {}", index + 1),
            Self::Clear => "Clear all lines".to_string(),
            Self::Merge { start, end } => format!("Merge lines {}-{}", start + 1, end + 1),
            Self::Split { index, .. } => format!("Split line {}", index + 1),
        }
    }
}

/// Undoable wrapper around a [`StoreEdit`]
///
/// The first `execute` performs the edit; later executes replay the recorded
/// redo splice. An edit that turned out to be a no-op undoes and redoes as a
/// no-op.
#[derive(Debug, Clone)]
pub struct StoreCommand {
    edit: StoreEdit,
    description: String,
    executed: bool,
    changed: bool,
    undo: Option<Splice>,
    redo: Option<Splice>,
}

impl StoreCommand {
    /// Create a new command for `edit`
    pub fn new(edit: StoreEdit) -> Self {
        let description = edit.describe();
        Self {
            edit,
            description,
            executed: false,
            changed: false,
            undo: None,
            redo: None,
        }
    }

    /// Set a custom description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn edit(&self) -> &StoreEdit {
        &self.edit
    }

    /// Whether the first execute changed the document
    pub fn changed_document(&self) -> bool {
        self.changed
    }
}

impl From<StoreEdit> for StoreCommand {
    fn from(edit: StoreEdit) -> Self {
        Self::new(edit)
    }
}

/// Apply the splice held in `slot`, leaving it in place if it no longer fits
fn replay(
    store: &mut SubtitleStore,
    slot: &mut Option<Splice>,
    what: &str,
) -> Result<Option<Splice>> {
    match slot.take() {
        None => Ok(None),
        Some(splice) if !splice.fits(store.len()) => {
            let err = EditorError::command_failed(format!(
                "cannot {what}: recorded edit at line {} no longer fits a document of {} lines",
                splice.index() + 1,
                store.len()
            ));
            *slot = Some(splice);
            Err(err)
        }
        Some(splice) => Ok(store.apply(splice)),
    }
}

impl EditCommand<SubtitleStore> for StoreCommand {
    fn execute(&mut self, store: &mut SubtitleStore) -> Result<()> {
        if !self.executed {
            self.undo = self.edit.apply_to(store);
            self.executed = true;
            self.changed = self.undo.is_some();
            if !self.changed {
                tracing::trace!(edit = %self.description, "store command was a no-op");
            }
        } else if self.redo.is_some() {
            self.undo = replay(store, &mut self.redo, "redo")?;
        }
        Ok(())
    }

    fn undo(&mut self, store: &mut SubtitleStore) -> Result<()> {
        if self.undo.is_some() {
            self.redo = replay(store, &mut self.undo, "undo")?;
        }
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn modifies_content(&self) -> bool {
        self.changed
    }
}

/// Several commands executed and undone as one step
///
/// Commands run in order and undo in reverse order. If one fails while
/// executing, the ones before it are undone again before the error is
/// returned.
pub struct BatchCommand<T> {
    commands: Vec<Box<dyn EditCommand<T>>>,
    description: String,
}

impl<T> BatchCommand<T> {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            commands: Vec::new(),
            description: description.into(),
        }
    }

    /// Add a command to the batch
    #[must_use]
    pub fn add_command(mut self, command: Box<dyn EditCommand<T>>) -> Self {
        self.commands.push(command);
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<T> EditCommand<T> for BatchCommand<T> {
    fn execute(&mut self, target: &mut T) -> Result<()> {
        let mut failure = None;
        for (index, command) in self.commands.iter_mut().enumerate() {
            if let Err(err) = command.execute(target) {
                failure = Some((index, err));
                break;
            }
        }

        let Some((failed_at, err)) = failure else {
            return Ok(());
        };
        for done in self.commands[..failed_at].iter_mut().rev() {
            if let Err(rollback) = done.undo(target) {
                tracing::warn!(error = %rollback, "batch rollback failed");
            }
        }
        Err(err)
    }

    fn undo(&mut self, target: &mut T) -> Result<()> {
        for command in self.commands.iter_mut().rev() {
            command.undo(target)?;
        }
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn modifies_content(&self) -> bool {
        self.commands.iter().any(|command| command.modifies_content())
    }
}

impl<T> core::fmt::Debug for BatchCommand<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BatchCommand")
            .field("description", &self.description)
            .field("commands", &self.commands)
            .finish()
    }
}
