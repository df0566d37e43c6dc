//! Main document type for the editor
//!
//! `EditorDocument` ties the store, its edit history and the shared UI state
//! together. Every user-level edit goes through a command, so everything the
//! user can do to the cue list can be undone.

use super::errors::{EditorError, Result};
use super::history::{EditHistory, HistoryConfig};
use super::store::SubtitleStore;
use crate::commands::{BatchCommand, EditCommand, StoreCommand, StoreEdit};
use crate::formats::SrtFormat;
use crate::menu::{find_action, EditorAction, KeyChord, Menu, Platform};
use crate::state::{TimecodeField, UiState};
use crate::translate::{build_prompt, Glossary, Translator};
use srt_core::{serialize, Cue, Timecode};
use std::path::Path;
use std::rc::Rc;

/// Editor configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditorConfig {
    /// Undo depth
    pub history: HistoryConfig,
    /// Fixed translations passed to translators
    pub glossary: Glossary,
}

/// What became of an [`EditorAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The document or UI state changed
    Applied,
    /// Nothing to do, e.g. no selection or nothing to undo
    Ignored,
    /// The host has to run this action (file pickers, translation service)
    Delegated(EditorAction),
}

/// Which end of a cue a timecode edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CueEdge {
    Start,
    End,
}

/// Subtitle document with undo history and UI state
///
/// # Examples
///
/// ```
/// use srt_editor::EditorDocument;
///
/// let mut doc = EditorDocument::from_srt(
///     "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,000 --> 00:00:03,000\nWorld\n\n",
/// )?;
/// doc.select(vec![0, 1]);
/// doc.merge_selection()?;
/// assert_eq!(doc.to_srt(), "1\n00:00:01,000 --> 00:00:03,000\nHelloWorld\n\n");
///
/// doc.undo()?;
/// assert_eq!(doc.store().len(), 2);
/// # Ok::<(), srt_editor::EditorError>(())
/// ```
#[derive(Debug)]
pub struct EditorDocument {
    store: SubtitleStore,
    history: EditHistory<SubtitleStore>,
    ui: UiState,
    config: EditorConfig,
    format: SrtFormat,
}

impl EditorDocument {
    /// Create an empty document with default configuration
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            store: SubtitleStore::new(),
            history: EditHistory::with_config(config.history.clone()),
            ui: UiState::new(),
            config,
            format: SrtFormat::new(),
        }
    }

    /// Create a document from SubRip text
    ///
    /// # Errors
    ///
    /// Returns the codec error when `text` is not valid SubRip.
    pub fn from_srt(text: &str) -> Result<Self> {
        let mut doc = Self::new();
        doc.load_str(text)?;
        Ok(doc)
    }

    /// Replace the document with parsed SubRip text
    ///
    /// Loading starts a fresh document: history is cleared, the selection is
    /// dropped, no file path is attached and the file is clean. On error
    /// nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the codec error when `text` is not valid SubRip.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let cues = self.format.import_from_str(text)?;
        self.load_cues(cues);
        Ok(())
    }

    /// Replace the document with the contents of a `.srt` file
    ///
    /// # Errors
    ///
    /// See [`SrtFormat::import_from_path`]. On error nothing changes.
    pub fn open_path(&mut self, path: &Path) -> Result<()> {
        let cues = self.format.import_from_path(path)?;
        self.load_cues(cues);
        self.ui.subtitle_file.set(Some(path.to_path_buf()));
        Ok(())
    }

    /// Write the document to a `.srt` file and mark it clean
    ///
    /// # Errors
    ///
    /// See [`SrtFormat::export_to_path`]. On error the file stays dirty.
    pub fn save_path(&mut self, path: &Path) -> Result<usize> {
        let bytes = self.format.export_to_path(self.store.as_slice(), path)?;
        self.ui.subtitle_file.set(Some(path.to_path_buf()));
        self.ui.file_dirty.set(false);
        Ok(bytes)
    }

    /// Current document as SubRip text
    pub fn to_srt(&self) -> String {
        serialize(self.store.as_slice())
    }

    fn load_cues(&mut self, cues: Vec<Cue>) {
        self.store.set_content(cues);
        self.history.clear();
        self.ui.selection.set(None);
        self.ui.subtitle_file.set(None);
        self.ui.file_open.set(true);
        self.ui.file_dirty.set(false);
    }

    pub fn store(&self) -> &SubtitleStore {
        &self.store
    }

    /// Snapshot of the cues, see [`SubtitleStore::snapshot`]
    pub fn snapshot(&mut self) -> Rc<[Cue]> {
        self.store.snapshot()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut UiState {
        &mut self.ui
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &EditHistory<SubtitleStore> {
        &self.history
    }

    /// Run a store command and record it for undo
    ///
    /// Returns `false` when the edit was a no-op; no-ops are not recorded.
    ///
    /// # Errors
    ///
    /// Propagates the command's error.
    pub fn execute(&mut self, command: impl Into<StoreCommand>) -> Result<bool> {
        self.record(Box::new(command.into()))
    }

    fn record(&mut self, mut command: Box<dyn EditCommand<SubtitleStore>>) -> Result<bool> {
        command.execute(&mut self.store)?;
        if !command.modifies_content() {
            return Ok(false);
        }
        tracing::debug!(command = command.description(), "executed command");
        self.history.push(command);
        self.mark_dirty();
        Ok(true)
    }

    /// Undo the last edit, `false` when there was nothing to undo
    ///
    /// # Errors
    ///
    /// Propagates the command's error.
    pub fn undo(&mut self) -> Result<bool> {
        let undone = self.history.undo(&mut self.store)?.is_some();
        if undone {
            self.mark_dirty();
        }
        Ok(undone)
    }

    /// Redo the last undone edit, `false` when there was nothing to redo
    ///
    /// # Errors
    ///
    /// Propagates the command's error.
    pub fn redo(&mut self) -> Result<bool> {
        let redone = self.history.redo(&mut self.store)?.is_some();
        if redone {
            self.mark_dirty();
        }
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn mark_dirty(&mut self) {
        if !*self.ui.file_dirty.borrow() {
            self.ui.file_dirty.set(true);
        }
    }

    /// Append an empty line
    ///
    /// # Errors
    ///
    /// Propagates the command's error.
    pub fn new_line(&mut self) -> Result<()> {
        self.execute(StoreEdit::Push(Cue::empty()))?;
        Ok(())
    }

    /// Insert an empty line after the last selected line and select it
    ///
    /// # Errors
    ///
    /// [`EditorError::NothingSelected`] without a selection.
    pub fn insert_line_after_selection(&mut self) -> Result<usize> {
        let anchor = self.ui.last_selected().ok_or(EditorError::NothingSelected)?;
        self.insert_empty_line(anchor + 1)
    }

    /// Insert an empty line before the first selected line and select it
    ///
    /// # Errors
    ///
    /// [`EditorError::NothingSelected`] without a selection.
    pub fn insert_line_before_selection(&mut self) -> Result<usize> {
        let anchor = self.ui.first_selected().ok_or(EditorError::NothingSelected)?;
        self.insert_empty_line(anchor)
    }

    fn insert_empty_line(&mut self, index: usize) -> Result<usize> {
        let index = index.min(self.store.len());
        self.execute(StoreEdit::Insert {
            cue: Cue::empty(),
            index,
        })?;
        self.ui.selection.set(Some(vec![index]));
        Ok(index)
    }

    /// Merge the span from the first to the last selected line into one line
    ///
    /// Returns `false` when the span is a single line.
    ///
    /// # Errors
    ///
    /// [`EditorError::NothingSelected`] without a selection.
    pub fn merge_selection(&mut self) -> Result<bool> {
        let (start, end) = self
            .ui
            .first_selected()
            .zip(self.ui.last_selected())
            .ok_or(EditorError::NothingSelected)?;
        if start == end {
            return Ok(false);
        }
        let merged = self.execute(StoreEdit::Merge { start, end })?;
        if merged {
            self.ui.selection.set(Some(vec![start]));
        }
        Ok(merged)
    }

    /// Merge line `index` into the line before it
    ///
    /// # Errors
    ///
    /// Propagates the command's error.
    pub fn merge_with_previous(&mut self, index: usize) -> Result<bool> {
        match index.checked_sub(1) {
            Some(start) => self.execute(StoreEdit::Merge { start, end: index }),
            None => Ok(false),
        }
    }

    /// Remove every selected line as one undoable step
    ///
    /// # Errors
    ///
    /// [`EditorError::NothingSelected`] without a selection.
    pub fn remove_selection(&mut self) -> Result<usize> {
        let selected = self
            .ui
            .selection
            .get()
            .filter(|lines| !lines.is_empty())
            .ok_or(EditorError::NothingSelected)?;

        // Highest first so earlier removals do not shift later indices
        let mut lines = selected;
        lines.sort_unstable_by(|a, b| b.cmp(a));
        lines.dedup();
        lines.retain(|&index| index < self.store.len());

        let count = lines.len();
        let batch = lines
            .into_iter()
            .fold(BatchCommand::new(format!("Remove {count} lines")), |batch, index| {
                batch.add_command(Box::new(StoreCommand::new(StoreEdit::Remove { index })))
            });
        self.record(Box::new(batch))?;
        self.ui.selection.set(None);
        Ok(count)
    }

    /// Split line `index` at character offset `position`
    ///
    /// # Errors
    ///
    /// Propagates the command's error.
    pub fn split_line(&mut self, index: usize, position: usize) -> Result<bool> {
        self.execute(StoreEdit::Split { index, position })
    }

    /// Replace the text of line `index`
    ///
    /// # Errors
    ///
    /// [`EditorError::IndexOutOfBounds`] when the line does not exist.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let cue = self.cue(index)?.with_text(text);
        self.execute(StoreEdit::Update { cue, index })?;
        Ok(())
    }

    /// Set the start time of line `index` from user input
    ///
    /// # Errors
    ///
    /// [`EditorError::IndexOutOfBounds`] when the line does not exist, or the
    /// parse error when `input` is not a valid timecode; the line is left
    /// untouched in both cases.
    pub fn set_start(&mut self, index: usize, input: &str) -> Result<Timecode> {
        self.set_edge(index, CueEdge::Start, input)
    }

    /// Set the end time of line `index` from user input
    ///
    /// # Errors
    ///
    /// As [`Self::set_start`].
    pub fn set_end(&mut self, index: usize, input: &str) -> Result<Timecode> {
        self.set_edge(index, CueEdge::End, input)
    }

    fn set_edge(&mut self, index: usize, edge: CueEdge, input: &str) -> Result<Timecode> {
        let mut cue = self.cue(index)?.clone();
        let slot = match edge {
            CueEdge::Start => &mut cue.start,
            CueEdge::End => &mut cue.end,
        };

        let mut field = TimecodeField::new(*slot);
        field.set_input(input);
        let value = field.commit()?;
        *slot = value;

        self.execute(StoreEdit::Update { cue, index })?;
        Ok(value)
    }

    fn cue(&self, index: usize) -> Result<&Cue> {
        self.store.get(index).ok_or(EditorError::IndexOutOfBounds {
            index,
            len: self.store.len(),
        })
    }

    /// Select lines; out-of-range indices are dropped
    pub fn select(&mut self, lines: Vec<usize>) {
        let mut lines = lines;
        lines.retain(|&index| index < self.store.len());
        lines.sort_unstable();
        lines.dedup();
        let selection = (!lines.is_empty()).then_some(lines);
        self.ui.selection.set(selection);
    }

    pub fn select_all(&mut self) {
        self.select((0..self.store.len()).collect());
    }

    pub fn clear_selection(&mut self) {
        self.ui.selection.set(None);
    }

    pub fn lock_time(&mut self) {
        self.store.lock_time();
        self.ui.file_locked.set(true);
    }

    pub fn unlock_time(&mut self) {
        self.store.unlock_time();
        self.ui.file_locked.set(false);
    }

    /// Prompt a language model would need to translate line `index`
    pub fn translation_prompt(&self, index: usize) -> Option<String> {
        let cue = self.store.get(index)?;
        Some(build_prompt(
            &cue.text,
            self.ui.source_language.borrow(),
            self.ui.target_language.borrow(),
            &self.config.glossary,
        ))
    }

    /// Replace line `index` with its translation
    ///
    /// Returns `false` and leaves the document alone when the translator has
    /// no answer.
    ///
    /// # Errors
    ///
    /// [`EditorError::IndexOutOfBounds`] when the line does not exist.
    pub fn translate_line(&mut self, index: usize, translator: &dyn Translator) -> Result<bool> {
        let text = &self.cue(index)?.text;
        let from = self.ui.source_language.borrow();
        let to = self.ui.target_language.borrow();

        match translator.translate(text, from, to) {
            Some(translated) => {
                self.set_text(index, translated)?;
                Ok(true)
            }
            None => {
                tracing::debug!(index, "translator returned nothing");
                Ok(false)
            }
        }
    }

    /// Run a menu or shortcut action
    ///
    /// # Errors
    ///
    /// Propagates command errors. A missing selection is not an error here;
    /// it yields [`ActionOutcome::Ignored`].
    pub fn perform(&mut self, action: EditorAction) -> Result<ActionOutcome> {
        let applied = match action {
            EditorAction::Open | EditorAction::Save | EditorAction::Translate => {
                return Ok(ActionOutcome::Delegated(action));
            }
            EditorAction::Undo => self.undo()?,
            EditorAction::Redo => self.redo()?,
            EditorAction::SelectAll => {
                self.select_all();
                true
            }
            EditorAction::NewLine => {
                self.new_line()?;
                true
            }
            EditorAction::InsertLineAfter => {
                ignore_unselected(self.insert_line_after_selection().map(|_| true))?
            }
            EditorAction::InsertLineBefore => {
                ignore_unselected(self.insert_line_before_selection().map(|_| true))?
            }
            EditorAction::MergeSelected => ignore_unselected(self.merge_selection())?,
            EditorAction::RemoveSelected => {
                ignore_unselected(self.remove_selection().map(|count| count > 0))?
            }
            EditorAction::LockTime => {
                self.lock_time();
                true
            }
            EditorAction::UnlockTime => {
                self.unlock_time();
                true
            }
        };

        Ok(if applied {
            ActionOutcome::Applied
        } else {
            ActionOutcome::Ignored
        })
    }

    /// Dispatch a key press through `menus`
    ///
    /// # Errors
    ///
    /// As [`Self::perform`].
    pub fn handle_key(
        &mut self,
        menus: &[Menu],
        chord: &KeyChord,
        platform: Platform,
    ) -> Result<ActionOutcome> {
        match find_action(menus, chord, platform) {
            Some(action) => self.perform(action),
            None => Ok(ActionOutcome::Ignored),
        }
    }
}

fn ignore_unselected(result: Result<bool>) -> Result<bool> {
    match result {
        Err(EditorError::NothingSelected) => Ok(false),
        other => other,
    }
}

impl Default for EditorDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{default_menus, Modifiers};
    use pretty_assertions::assert_eq;

    const TWO_LINES: &str =
        "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,500 --> 00:00:04,000\nWorld\n\n";

    fn texts(doc: &EditorDocument) -> Vec<String> {
        doc.store().iter().map(|cue| cue.text.clone()).collect()
    }

    #[test]
    fn loading_resets_history_and_dirty_flag() {
        let mut doc = EditorDocument::new();
        doc.new_line().unwrap();
        assert!(doc.ui().file_dirty.get());
        assert!(doc.can_undo());

        doc.load_str(TWO_LINES).unwrap();
        assert!(!doc.can_undo());
        assert!(!doc.ui().file_dirty.get());
        assert!(doc.ui().file_open.get());
        assert_eq!(texts(&doc), vec!["Hello", "World"]);
    }

    #[test]
    fn loading_text_detaches_the_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("first.srt");
        std::fs::write(&path, TWO_LINES).unwrap();

        let mut doc = EditorDocument::new();
        doc.open_path(&path).unwrap();
        assert_eq!(doc.ui().subtitle_file.get(), Some(path));

        doc.load_str(TWO_LINES).unwrap();
        assert_eq!(doc.ui().subtitle_file.get(), None);
    }

    #[test]
    fn failed_load_leaves_document_alone() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        assert!(doc.load_str("1\n00:99:00,000 --> 00:00:01,000\nbad").is_err());
        assert_eq!(doc.store().len(), 2);
    }

    #[test]
    fn insert_after_and_before_selection() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        assert_eq!(
            doc.insert_line_after_selection(),
            Err(EditorError::NothingSelected)
        );

        doc.select(vec![0]);
        assert_eq!(doc.insert_line_after_selection().unwrap(), 1);
        assert_eq!(texts(&doc), vec!["Hello", "", "World"]);
        assert_eq!(doc.ui().selection.get(), Some(vec![1]));

        assert_eq!(doc.insert_line_before_selection().unwrap(), 1);
        assert_eq!(texts(&doc), vec!["Hello", "", "", "World"]);
    }

    #[test]
    fn remove_selection_is_one_undo_step() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        doc.new_line().unwrap();
        doc.select(vec![2, 0, 2]);

        assert_eq!(doc.remove_selection().unwrap(), 2);
        assert_eq!(texts(&doc), vec!["World"]);
        assert_eq!(doc.ui().selection.get(), None);

        assert!(doc.undo().unwrap());
        assert_eq!(texts(&doc), vec!["Hello", "World", ""]);
    }

    #[test]
    fn timecode_edits_revert_on_bad_input() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        let before = doc.to_srt();

        let err = doc.set_start(0, "00:00:61,000").unwrap_err();
        assert!(err.is_content_error());
        assert_eq!(doc.to_srt(), before);
        assert!(!doc.can_undo());

        let end = doc.set_end(0, "00:00:02,750").unwrap();
        assert_eq!(doc.store().get(0).unwrap().end, end);

        assert!(doc.undo().unwrap());
        assert_eq!(doc.to_srt(), before);
    }

    #[test]
    fn edits_out_of_range_report_the_index() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        assert_eq!(
            doc.set_text(5, "x"),
            Err(EditorError::IndexOutOfBounds { index: 5, len: 2 })
        );
        assert!(!doc.split_line(5, 0).unwrap());
        assert!(!doc.can_undo());
    }

    #[test]
    fn merge_with_previous_line() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        assert!(!doc.merge_with_previous(0).unwrap());
        assert!(doc.merge_with_previous(1).unwrap());
        assert_eq!(texts(&doc), vec!["HelloWorld"]);
    }

    #[test]
    fn translation_goes_through_history() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        let shout = |text: &str, _: &str, _: &str| Some(text.to_uppercase());
        let silent = |_: &str, _: &str, _: &str| -> Option<String> { None };

        assert!(!doc.translate_line(0, &silent).unwrap());
        assert!(!doc.can_undo());

        assert!(doc.translate_line(0, &shout).unwrap());
        assert_eq!(texts(&doc), vec!["HELLO", "World"]);
        doc.undo().unwrap();
        assert_eq!(texts(&doc), vec!["Hello", "World"]);
    }

    #[test]
    fn translation_prompt_uses_languages_and_glossary() {
        let mut config = EditorConfig::default();
        config.glossary.insert("World", "世界");
        let mut doc = EditorDocument::with_config(config);
        doc.load_str(TWO_LINES).unwrap();

        let prompt = doc.translation_prompt(1).unwrap();
        assert!(prompt.contains("in en and you need to translate it to zh"));
        assert!(prompt.contains("World -> 世界"));
        assert!(doc.translation_prompt(9).is_none());
    }

    #[test]
    fn perform_routes_actions() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        assert_eq!(
            doc.perform(EditorAction::Save).unwrap(),
            ActionOutcome::Delegated(EditorAction::Save)
        );
        assert_eq!(
            doc.perform(EditorAction::MergeSelected).unwrap(),
            ActionOutcome::Ignored
        );
        assert_eq!(doc.perform(EditorAction::Undo).unwrap(), ActionOutcome::Ignored);

        assert_eq!(doc.perform(EditorAction::SelectAll).unwrap(), ActionOutcome::Applied);
        assert_eq!(
            doc.perform(EditorAction::MergeSelected).unwrap(),
            ActionOutcome::Applied
        );
        assert_eq!(texts(&doc), vec!["HelloWorld"]);

        assert_eq!(doc.perform(EditorAction::UnlockTime).unwrap(), ActionOutcome::Applied);
        assert!(!doc.store().is_locked());
        assert!(!doc.ui().file_locked.get());
    }

    #[test]
    fn shortcut_dispatch() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        let menus = default_menus();
        let select_all = KeyChord::new(Modifiers::META, "a");

        assert_eq!(
            doc.handle_key(&menus, &select_all, Platform::Darwin).unwrap(),
            ActionOutcome::Applied
        );
        assert_eq!(doc.ui().selection.get(), Some(vec![0, 1]));

        let unbound = KeyChord::new(Modifiers::CONTROL, "q");
        assert_eq!(
            doc.handle_key(&menus, &unbound, Platform::Other).unwrap(),
            ActionOutcome::Ignored
        );
    }

    #[test]
    fn select_drops_out_of_range_lines() {
        let mut doc = EditorDocument::from_srt(TWO_LINES).unwrap();
        doc.select(vec![1, 7, 1]);
        assert_eq!(doc.ui().selection.get(), Some(vec![1]));
        doc.select(vec![9]);
        assert_eq!(doc.ui().selection.get(), None);
    }
}
