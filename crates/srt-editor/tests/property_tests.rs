//! Property-based tests for srt-editor
//!
//! Uses proptest to check that arbitrary edit sequences are fully reversible
//! through the history and that the store's notification contract holds.

use proptest::prelude::*;
use srt_core::serialize;
use srt_editor::{Cue, EditorDocument, StoreEdit, SubtitleStore, Timecode};
use std::cell::Cell;
use std::rc::Rc;

fn arb_cue() -> impl Strategy<Value = Cue> {
    (0u64..10_000_000, 0u64..10_000, "[a-zA-Zé ]{0,12}").prop_map(|(start, len, text)| {
        Cue::new(
            Timecode::from_milliseconds(start).unwrap(),
            Timecode::from_milliseconds(start + len).unwrap(),
            text,
        )
    })
}

/// Edits with indices that are sometimes out of bounds
fn arb_edit() -> impl Strategy<Value = StoreEdit> {
    prop_oneof![
        3 => arb_cue().prop_map(StoreEdit::Push),
        2 => (arb_cue(), 0usize..12).prop_map(|(cue, index)| StoreEdit::Insert { cue, index }),
        2 => (0usize..12).prop_map(|index| StoreEdit::Remove { index }),
        2 => (arb_cue(), 0usize..12).prop_map(|(cue, index)| StoreEdit::Update { cue, index }),
        1 => Just(StoreEdit::Clear),
        2 => (0usize..12, 0usize..12).prop_map(|(start, end)| StoreEdit::Merge { start, end }),
        2 => (0usize..12, 0usize..16)
            .prop_map(|(index, position)| StoreEdit::Split { index, position }),
        1 => prop::collection::vec(arb_cue(), 0..6).prop_map(StoreEdit::SetContent),
    ]
}

proptest! {
    #[test]
    fn undo_all_then_redo_all(
        initial in prop::collection::vec(arb_cue(), 0..8),
        edits in prop::collection::vec(arb_edit(), 0..40),
    ) {
        let mut doc = EditorDocument::from_srt(&serialize(&initial)).unwrap();
        let start = doc.store().as_slice().to_vec();

        for edit in edits {
            doc.execute(edit).unwrap();
        }
        let end = doc.store().as_slice().to_vec();

        while doc.undo().unwrap() {}
        prop_assert_eq!(doc.store().as_slice(), start.as_slice());
        prop_assert!(!doc.can_undo());

        while doc.redo().unwrap() {}
        prop_assert_eq!(doc.store().as_slice(), end.as_slice());
    }

    #[test]
    fn one_notification_per_applied_edit(
        initial in prop::collection::vec(arb_cue(), 0..8),
        edits in prop::collection::vec(arb_edit(), 0..30),
    ) {
        let mut store = SubtitleStore::with_content(initial);
        let count = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&count);
        let _handle = store.subscribe(move |_| counter.set(counter.get() + 1));

        let mut applied = 0;
        for edit in edits {
            let before = count.get();
            if edit.apply_to(&mut store).is_some() {
                applied += 1;
                prop_assert_eq!(count.get(), before + 1);
            } else {
                prop_assert_eq!(count.get(), before);
            }
        }
        prop_assert_eq!(count.get(), applied);
    }

    #[test]
    fn snapshot_identity_changes_only_with_content(
        initial in prop::collection::vec(arb_cue(), 0..8),
        edit in arb_edit(),
    ) {
        let mut store = SubtitleStore::with_content(initial);
        let before = store.snapshot();
        let changed = edit.apply_to(&mut store).is_some();
        let after = store.snapshot();

        prop_assert_eq!(Rc::ptr_eq(&before, &after), !changed);
        prop_assert!(Rc::ptr_eq(&after, &store.snapshot()));
    }

    #[test]
    fn split_preserves_text_and_times(cue in arb_cue(), position in 0usize..20) {
        let mut store = SubtitleStore::with_content(vec![cue.clone()]);
        store.split(0, position).unwrap();

        let head = store.get(0).unwrap();
        let tail = store.get(1).unwrap();
        prop_assert_eq!(format!("{}{}", head.text, tail.text), cue.text.clone());
        prop_assert_eq!(head.char_len(), position.min(cue.char_len()));
        prop_assert_eq!((head.start, head.end), (cue.start, cue.end));
        prop_assert_eq!((tail.start, tail.end), (cue.start, cue.end));
    }

    #[test]
    fn merge_spans_range(
        cues in prop::collection::vec(arb_cue(), 1..10),
        a in 0usize..10,
        b in 0usize..10,
    ) {
        let (start, end) = (a.min(b), a.max(b));
        let mut store = SubtitleStore::with_content(cues.clone());
        let merged = store.merge(start, end);

        if end >= cues.len() {
            prop_assert!(merged.is_none());
            prop_assert_eq!(store.as_slice(), cues.as_slice());
        } else {
            prop_assert_eq!(store.len(), cues.len() - (end - start));
            let cue = store.get(start).unwrap();
            prop_assert_eq!(cue.start, cues[start].start);
            prop_assert_eq!(cue.end, cues[end].end);
            let joined: String = cues[start..=end].iter().map(|c| c.text.as_str()).collect();
            prop_assert_eq!(&cue.text, &joined);
        }
    }
}
