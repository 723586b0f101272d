//! Output sinks for render passes.
//!
//! A sink has one main stream and a stack of split streams. While a split
//! stream is open every write goes to it; closing it returns to the stream
//! below.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, error};

use crate::error::{Result, ViewError};

/// Destination of rendered text.
pub trait OutputSink {
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Open a split stream at `path`; later writes go there until `close`.
    fn open(&mut self, path: &Path) -> io::Result<()>;

    /// Close the innermost split stream. Closing with nothing open is a
    /// no-op.
    fn close(&mut self) -> io::Result<()>;
}

/// A split stream that closes itself when dropped.
pub struct ScopedSink<'a, S: OutputSink + ?Sized> {
    sink: &'a mut S,
    open: bool,
}

impl<'a, S: OutputSink + ?Sized> ScopedSink<'a, S> {
    pub fn open(sink: &'a mut S, path: &Path) -> Result<Self> {
        if let Err(source) = sink.open(path) {
            error!(path = %path.display(), %source, "unable to open split file");
            return Err(ViewError::SplitOpen {
                path: path.to_path_buf(),
                source,
            });
        }
        debug!(path = %path.display(), "opened split file");
        Ok(Self { sink, open: true })
    }

    pub fn close(mut self) -> Result<()> {
        self.open = false;
        self.sink.close()?;
        Ok(())
    }
}

impl<S: OutputSink + ?Sized> OutputSink for ScopedSink<'_, S> {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.sink.write_str(text)
    }

    fn open(&mut self, path: &Path) -> io::Result<()> {
        self.sink.open(path)
    }

    fn close(&mut self) -> io::Result<()> {
        self.sink.close()
    }
}

impl<S: OutputSink + ?Sized> Drop for ScopedSink<'_, S> {
    fn drop(&mut self) {
        if self.open {
            if let Err(source) = self.sink.close() {
                error!(%source, "closing split file failed");
            }
        }
    }
}

/// Writes the main stream to `W` and split streams to files.
pub struct WriterSink<W: Write> {
    main: W,
    splits: Vec<BufWriter<File>>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(main: W) -> Self {
        Self {
            main,
            splits: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.main
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        match self.splits.last_mut() {
            Some(split) => split.write_all(text.as_bytes()),
            None => self.main.write_all(text.as_bytes()),
        }
    }

    fn open(&mut self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let file = File::create(path)?;
        self.splits.push(BufWriter::new(file));
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        match self.splits.pop() {
            Some(mut split) => split.flush(),
            None => self.main.flush(),
        }
    }
}

/// Collects every stream in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    main: String,
    files: IndexMap<PathBuf, String>,
    open: Vec<PathBuf>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written to the main stream.
    pub fn main(&self) -> &str {
        &self.main
    }

    /// Text written to the split stream at `path`.
    pub fn file(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Split streams in the order they were first opened.
    pub fn files(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files
            .iter()
            .map(|(path, text)| (path.as_path(), text.as_str()))
    }
}

impl OutputSink for MemorySink {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        match self.open.last() {
            Some(path) => self.files.entry(path.clone()).or_default().push_str(text),
            None => self.main.push_str(text),
        }
        Ok(())
    }

    fn open(&mut self, path: &Path) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), String::new());
        self.open.push(path.to_path_buf());
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.open.pop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_sink_routes_writes() {
        let mut sink = MemorySink::new();
        sink.write_str("main ").unwrap();
        {
            let mut split = ScopedSink::open(&mut sink, Path::new("a.txt")).unwrap();
            split.write_str("unit a").unwrap();
        }
        sink.write_str("again").unwrap();

        assert_eq!(sink.main(), "main again");
        assert_eq!(sink.file(Path::new("a.txt")), Some("unit a"));
    }

    #[test]
    fn test_scoped_sink_explicit_close() {
        let mut sink = MemorySink::new();
        let mut split = ScopedSink::open(&mut sink, Path::new("b.txt")).unwrap();
        split.write_str("x").unwrap();
        split.close().unwrap();
        sink.write_str("y").unwrap();

        assert_eq!(sink.main(), "y");
        assert_eq!(sink.files().count(), 1);
    }

    #[test]
    fn test_writer_sink_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("unit.txt");
        let mut sink = WriterSink::new(Vec::new());

        sink.write_str("head\n").unwrap();
        {
            let mut split = ScopedSink::open(&mut sink, &path).unwrap();
            split.write_str("body\n").unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "body\n");
        assert_eq!(sink.into_inner(), b"head\n");
    }

    #[test]
    fn test_writer_sink_open_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let mut sink = WriterSink::new(Vec::new());

        let err = ScopedSink::open(&mut sink, &blocker.join("unit.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, ViewError::SplitOpen { .. }));
        assert_eq!(err.code(), crate::error::codes::SPLIT_UNABLE_TO_OPEN_FILE);
    }
}
