//! Editor host boundary.
//!
//! A host owns the text buffer being edited. Commands read the whole buffer,
//! transform it, and hand the result back with a single `replace_all` call.

use anyhow::Context;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Operations a summarize command needs from its editing host.
pub trait DocumentHost {
    /// Text of the active buffer, or `None` when there is no editable buffer.
    fn current_text(&mut self) -> anyhow::Result<Option<String>>;

    /// Replace the entire buffer contents.
    fn replace_all(&mut self, text: &str) -> anyhow::Result<()>;

    /// Show an informational notice.
    fn show_info(&mut self, message: &str);

    /// Show an error notice.
    fn show_error(&mut self, message: &str);
}

/// Host backed by an in-memory buffer; records notices for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub text: Option<String>,
    pub infos: Vec<String>,
    pub errors: Vec<String>,
    /// Number of `replace_all` calls
    pub commits: usize,
}

impl MemoryHost {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A host with no active buffer.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl DocumentHost for MemoryHost {
    fn current_text(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.text.clone())
    }

    fn replace_all(&mut self, text: &str) -> anyhow::Result<()> {
        self.text = Some(text.to_string());
        self.commits += 1;
        Ok(())
    }

    fn show_info(&mut self, message: &str) {
        self.infos.push(message.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Host backed by a file on disk.
///
/// In dry-run mode `replace_all` records the change without writing.
#[derive(Debug, Clone)]
pub struct FileHost {
    path: PathBuf,
    dry_run: bool,
    replaced: bool,
}

impl FileHost {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            dry_run: false,
            replaced: false,
        }
    }

    /// Set whether writes are suppressed.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `replace_all` has been called.
    pub fn replaced(&self) -> bool {
        self.replaced
    }
}

impl DocumentHost for FileHost {
    fn current_text(&mut self) -> anyhow::Result<Option<String>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(Some(text))
    }

    fn replace_all(&mut self, text: &str) -> anyhow::Result<()> {
        self.replaced = true;
        if self.dry_run {
            return Ok(());
        }
        std::fs::write(&self.path, text)
            .with_context(|| format!("writing {}", self.path.display()))?;
        info!(path = %self.path.display(), "updated summaries");
        Ok(())
    }

    fn show_info(&mut self, message: &str) {
        info!(path = %self.path.display(), "{}", message);
    }

    fn show_error(&mut self, message: &str) {
        error!(path = %self.path.display(), "{}", message);
    }
}

/// Host that reads the buffer from a reader and writes the result to a writer.
///
/// Used to pipe an editor buffer through the tool. Call [`StdioHost::finish`]
/// once the command has run: when nothing was replaced the original input is
/// echoed so the caller always receives the full buffer.
pub struct StdioHost<R: Read, W: Write> {
    reader: Option<R>,
    writer: W,
    input: Option<String>,
    replaced: bool,
    dry_run: bool,
}

impl<R: Read, W: Write> StdioHost<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Some(reader),
            writer,
            input: None,
            replaced: false,
            dry_run: false,
        }
    }

    /// Set whether output is suppressed entirely.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether `replace_all` has been called.
    pub fn replaced(&self) -> bool {
        self.replaced
    }

    /// Echo the unchanged input if no replacement was written; returns the writer.
    pub fn finish(mut self) -> anyhow::Result<W> {
        if !self.replaced && !self.dry_run {
            if let Some(input) = &self.input {
                self.writer.write_all(input.as_bytes())?;
            }
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<R: Read, W: Write> DocumentHost for StdioHost<R, W> {
    fn current_text(&mut self) -> anyhow::Result<Option<String>> {
        if let Some(mut reader) = self.reader.take() {
            let mut text = String::new();
            reader
                .read_to_string(&mut text)
                .context("reading buffer from input")?;
            self.input = Some(text);
        }
        Ok(self.input.clone())
    }

    fn replace_all(&mut self, text: &str) -> anyhow::Result<()> {
        self.replaced = true;
        if self.dry_run {
            return Ok(());
        }
        self.writer
            .write_all(text.as_bytes())
            .context("writing buffer to output")?;
        Ok(())
    }

    fn show_info(&mut self, message: &str) {
        info!("{}", message);
    }

    fn show_error(&mut self, message: &str) {
        error!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_memory_host() {
        let mut host = MemoryHost::new("abc");
        assert_eq!(host.current_text().unwrap().as_deref(), Some("abc"));
        host.replace_all("xyz").unwrap();
        assert_eq!(host.text.as_deref(), Some("xyz"));
        assert_eq!(host.commits, 1);

        let mut empty = MemoryHost::empty();
        assert!(empty.current_text().unwrap().is_none());
    }

    #[test]
    fn test_file_host_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("System.cs");
        std::fs::write(&path, "old").unwrap();

        let mut host = FileHost::new(&path);
        assert_eq!(host.current_text().unwrap().as_deref(), Some("old"));
        host.replace_all("new").unwrap();
        assert!(host.replaced());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_file_host_dry_run_and_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("System.cs");
        std::fs::write(&path, "old").unwrap();

        let mut host = FileHost::new(&path).dry_run(true);
        host.replace_all("new").unwrap();
        assert!(host.replaced());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old");

        let mut missing = FileHost::new(temp.path().join("Missing.cs"));
        assert!(missing.current_text().unwrap().is_none());

        let mut dir = FileHost::new(temp.path());
        assert!(dir.current_text().unwrap().is_none());
    }

    #[test]
    fn test_stdio_host_echoes_untouched_input() {
        let mut host = StdioHost::new(Cursor::new("unchanged"), Vec::new());
        assert_eq!(host.current_text().unwrap().as_deref(), Some("unchanged"));
        // A second read returns the buffered input.
        assert_eq!(host.current_text().unwrap().as_deref(), Some("unchanged"));
        let out = host.finish().unwrap();
        assert_eq!(out, b"unchanged");
    }

    #[test]
    fn test_stdio_host_writes_replacement_once() {
        let mut host = StdioHost::new(Cursor::new("before"), Vec::new());
        host.current_text().unwrap();
        host.replace_all("after").unwrap();
        let out = host.finish().unwrap();
        assert_eq!(out, b"after");
    }

    #[test]
    fn test_stdio_host_dry_run_writes_nothing() {
        let mut host = StdioHost::new(Cursor::new("before"), Vec::new()).dry_run(true);
        host.current_text().unwrap();
        host.replace_all("after").unwrap();
        assert!(host.replaced());
        assert!(host.finish().unwrap().is_empty());
    }
}
