//! Test helpers for streamcopy integration tests
//!
//! Provides temporary source/destination fixtures shared by the
//! integration and property test binaries.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A source file and a destination path inside a private temp directory
///
/// The directory, and everything in it, is removed when the fixture drops.
pub struct FilePair {
    dir: TempDir,
    source: PathBuf,
    destination: PathBuf,
}

impl FilePair {
    /// Create a source with `content` and a pre-existing empty destination
    ///
    /// # Panics
    ///
    /// Panics if the temp directory or files cannot be created.
    pub fn new(content: &[u8]) -> Self {
        let pair = Self::without_destination(content);
        fs::write(&pair.destination, b"").expect("create destination");
        pair
    }

    /// Create a source with `content` and no destination file
    ///
    /// # Panics
    ///
    /// Panics if the temp directory or source file cannot be created.
    pub fn without_destination(content: &[u8]) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let source = dir.path().join("source");
        let destination = dir.path().join("destination");
        fs::write(&source, content).expect("create source");
        Self {
            dir,
            source,
            destination,
        }
    }

    /// Source path
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Destination path
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// A path inside the fixture directory that does not exist
    pub fn missing(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        assert!(!path.exists(), "{} unexpectedly exists", path.display());
        path
    }

    /// Current destination content
    ///
    /// # Panics
    ///
    /// Panics if the destination cannot be read.
    pub fn destination_bytes(&self) -> Vec<u8> {
        fs::read(&self.destination).expect("read destination")
    }

    /// Overwrite the destination with `content`
    ///
    /// # Panics
    ///
    /// Panics if the destination cannot be written.
    pub fn write_destination(&self, content: &[u8]) {
        fs::write(&self.destination, content).expect("write destination");
    }
}

/// Split text on `\n` the way a line reader does, dropping one trailing
/// terminator and any `\r` before each `\n`
pub fn read_back_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_pair_layout() {
        let pair = FilePair::new(b"content");
        assert_eq!(fs::read(pair.source()).unwrap(), b"content");
        assert!(pair.destination_bytes().is_empty());
        assert!(!pair.missing("nothing-here").exists());
    }

    #[test]
    fn test_read_back_lines() {
        assert_eq!(read_back_lines(""), Vec::<String>::new());
        assert_eq!(read_back_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(read_back_lines("a\r\nb\r\n\r\n"), vec!["a", "b", ""]);
        assert_eq!(read_back_lines("a\nb"), vec!["a", "b"]);
    }
}
