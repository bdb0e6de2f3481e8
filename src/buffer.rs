use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;

/// The document being beautified.
pub trait Buffer {
    fn text(&self) -> &str;
    /// `None` for documents that were never saved.
    fn file_path(&self) -> Option<&Path>;
    /// Replaces the whole contents and saves them.
    fn replace_and_persist(&mut self, text: String) -> Result<()>;
}

/// A stylesheet on disk, rewritten in place.
#[derive(Debug)]
pub struct FileBuffer {
    path: PathBuf,
    text: String,
}

impl FileBuffer {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        Ok(Self { path, text })
    }
}

impl Buffer for FileBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn file_path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    /// Writes a sibling temp file and renames it over the original, so a
    /// failed save never leaves a truncated stylesheet behind.
    fn replace_and_persist(&mut self, text: String) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let permissions = fs::metadata(&self.path)?.permissions();

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        fs::set_permissions(tmp.path(), permissions)?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        self.text = text;
        Ok(())
    }
}

/// Text read from a pipe. It has no file path, and persisting writes the
/// result to `writer`.
pub struct StdinBuffer<W: Write> {
    text: String,
    writer: W,
}

impl<W: Write> StdinBuffer<W> {
    pub fn read(mut reader: impl Read, writer: W) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self { text, writer })
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> Buffer for StdinBuffer<W> {
    fn text(&self) -> &str {
        &self.text
    }

    fn file_path(&self) -> Option<&Path> {
        None
    }

    fn replace_and_persist(&mut self, text: String) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        self.text = text;
        Ok(())
    }
}
