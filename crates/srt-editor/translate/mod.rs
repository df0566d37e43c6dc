//! Translation collaborator seam
//!
//! The editor never talks to a translation service itself. Hosts implement
//! [`Translator`] (typically by sending [`build_prompt`] output to a language
//! model) and hand it to [`EditorDocument::translate_line`].
//!
//! [`EditorDocument::translate_line`]: crate::EditorDocument::translate_line

use std::collections::BTreeMap;

/// Service that turns text in one language into another
pub trait Translator {
    /// Translate `text` from language `from` to language `to`
    ///
    /// `None` means no translation is available; the caller leaves the
    /// original text in place.
    fn translate(&self, text: &str, from: &str, to: &str) -> Option<String>;
}

impl<F> Translator for F
where
    F: Fn(&str, &str, &str) -> Option<String>,
{
    fn translate(&self, text: &str, from: &str, to: &str) -> Option<String> {
        self(text, from, to)
    }
}

/// Proper nouns with fixed translations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glossary {
    terms: BTreeMap<String, String>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a fixed translation
    pub fn insert(
        &mut self,
        term: impl Into<String>,
        translation: impl Into<String>,
    ) -> Option<String> {
        self.terms.insert(term.into(), translation.into())
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.terms.get(term).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Glossary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            terms: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Instruction text asking a language model to translate one subtitle line
pub fn build_prompt(text: &str, from: &str, to: &str, glossary: &Glossary) -> String {
    let terms = glossary
        .iter()
        .map(|(term, translation)| format!("{term} -> {translation}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful assistant that translates text. \
You will be given a sentence in {from} and you need to translate it to {to}.\n\
Ensure that the translation is accurate, clear, and contextually appropriate. \
Pay special attention to the proper nouns listed below and use their fixed translations. \
Maintain the original tone and style of the text.\n\
Proper nouns and their fixed translations:\n\
<proper-nouns>\n{terms}\n</proper-nouns>\n\
<text>\n{text}\n</text>\n"
    )
}
