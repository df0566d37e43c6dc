//! SubRip file import and export
//!
//! Thin synchronous I/O around the srt-core codec. Readers must yield UTF-8;
//! a leading byte order mark and CRLF line endings are accepted. Output is
//! always UTF-8 with `\n` line endings.

use crate::core::errors::{EditorError, Result};
use srt_core::{parse, serialize, Cue};
use std::io::{Read, Write};
use std::path::Path;

/// Metadata about a subtitle format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Format name
    pub name: &'static str,
    /// File extensions, without the dot
    pub extensions: &'static [&'static str],
    /// MIME type for this format
    pub mime_type: &'static str,
}

/// SubRip (`.srt`) format handler
#[derive(Debug, Clone)]
pub struct SrtFormat {
    info: FormatInfo,
}

impl SrtFormat {
    pub const fn new() -> Self {
        Self {
            info: FormatInfo {
                name: "SubRip",
                extensions: &["srt"],
                mime_type: "application/x-subrip",
            },
        }
    }

    pub const fn format_info(&self) -> &FormatInfo {
        &self.info
    }

    /// Check if this format handles the given file extension, ignoring case
    pub fn can_import(&self, extension: &str) -> bool {
        self.info
            .extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Exporting accepts the same extensions as importing
    pub fn can_export(&self, extension: &str) -> bool {
        self.can_import(extension)
    }

    /// Whether `path` carries an extension this format handles
    pub fn handles_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.can_import(ext))
    }

    /// Read all of `reader` and decode it
    ///
    /// # Errors
    ///
    /// [`EditorError::Io`] when reading fails or the bytes are not UTF-8,
    /// [`EditorError::Core`] when the text is not valid SubRip.
    pub fn import_from_reader(&self, reader: &mut dyn Read) -> Result<Vec<Cue>> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.import_from_str(&content)
    }

    /// Decode SubRip text
    ///
    /// # Errors
    ///
    /// [`EditorError::Core`] when the text is not valid SubRip.
    pub fn import_from_str(&self, content: &str) -> Result<Vec<Cue>> {
        Ok(parse(content)?)
    }

    /// Open and decode a `.srt` file
    ///
    /// # Errors
    ///
    /// [`EditorError::UnsupportedFormat`] for another extension, otherwise as
    /// [`Self::import_from_reader`].
    pub fn import_from_path(&self, path: &Path) -> Result<Vec<Cue>> {
        self.check_path(path)?;
        let mut file = std::fs::File::open(path)
            .map_err(|e| EditorError::io(format!("Failed to open {}: {e}", path.display())))?;
        let cues = self.import_from_reader(&mut file)?;
        tracing::info!(path = %path.display(), cues = cues.len(), "imported subtitle file");
        Ok(cues)
    }

    /// Encode `cues` into `writer`, returning the number of bytes written
    ///
    /// # Errors
    ///
    /// [`EditorError::Io`] when writing fails.
    pub fn export_to_writer(&self, cues: &[Cue], writer: &mut dyn Write) -> Result<usize> {
        let content = serialize(cues);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        Ok(content.len())
    }

    /// Encode `cues` into a new string
    pub fn export_to_string(&self, cues: &[Cue]) -> String {
        serialize(cues)
    }

    /// Create or truncate a `.srt` file and write `cues` into it
    ///
    /// # Errors
    ///
    /// [`EditorError::UnsupportedFormat`] for another extension,
    /// [`EditorError::Io`] when the file cannot be written.
    pub fn export_to_path(&self, cues: &[Cue], path: &Path) -> Result<usize> {
        self.check_path(path)?;
        let mut file = std::fs::File::create(path)
            .map_err(|e| EditorError::io(format!("Failed to create {}: {e}", path.display())))?;
        let bytes = self.export_to_writer(cues, &mut file)?;
        tracing::info!(path = %path.display(), cues = cues.len(), bytes, "exported subtitle file");
        Ok(bytes)
    }

    fn check_path(&self, path: &Path) -> Result<()> {
        if self.handles_path(path) {
            Ok(())
        } else {
            Err(EditorError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

impl Default for SrtFormat {
    fn default() -> Self {
        Self::new()
    }
}
