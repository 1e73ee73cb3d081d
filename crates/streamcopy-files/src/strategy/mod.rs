//! Copy strategies.
//!
//! Every strategy validates its arguments, opens the files it needs for
//! the duration of the call only, and returns a count of the units it
//! transferred. Strategies fall into two classes:
//!
//! - [`Capability::BinarySafe`]: the destination is byte-identical to the
//!   source for any input ([`byte_copy`], [`block_copy`], [`buffered_copy`]).
//! - [`Capability::TextEncodingDependent`]: content is decoded as UTF-8 and
//!   re-encoded, so bytes that are not valid UTF-8 do not survive
//!   ([`whole_file_copy`], [`memory_block_copy`], [`line_copy`]).

mod block;
mod byte;
mod line;
mod text;

pub use block::{block_copy, block_copy_with, buffered_copy, buffered_copy_with};
pub use byte::{byte_copy, byte_copy_with};
pub use line::{LINE_ENDING, line_copy, line_copy_with};
pub use text::{memory_block_copy, memory_block_copy_with, whole_file_copy, whole_file_copy_with};

use crate::error::Result;
use crate::options::CopyOptions;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::str::FromStr;

/// Whether a strategy preserves arbitrary bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Destination is byte-identical to source for any input
    BinarySafe,
    /// Content goes through a UTF-8 decode/encode round-trip
    TextEncodingDependent,
}

impl Capability {
    /// Whether the class guarantees a byte-exact copy
    #[must_use]
    pub fn is_binary_safe(self) -> bool {
        self == Self::BinarySafe
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BinarySafe => f.write_str("binary-safe"),
            Self::TextEncodingDependent => f.write_str("text-encoding-dependent"),
        }
    }
}

/// Unit counted by a strategy's return value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferUnit {
    /// Bytes written
    Bytes,
    /// Characters (Unicode scalar values) written
    Chars,
    /// Lines written
    Lines,
}

impl fmt::Display for TransferUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes => f.write_str("bytes"),
            Self::Chars => f.write_str("chars"),
            Self::Lines => f.write_str("lines"),
        }
    }
}

/// Copy strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Unbuffered byte-at-a-time transfer
    Byte,
    /// Whole file staged in memory as text, drained byte by byte
    WholeFile,
    /// Whole file staged in memory as text, drained in one block
    MemoryBlock,
    /// Single read into an exactly-sized buffer, single write
    Block,
    /// Bulk read, single write through a buffered writer
    Buffered,
    /// Line-oriented text transfer
    Line,
}

impl Strategy {
    /// All strategies, in declaration order
    pub const ALL: [Strategy; 6] = [
        Self::Byte,
        Self::WholeFile,
        Self::MemoryBlock,
        Self::Block,
        Self::Buffered,
        Self::Line,
    ];

    /// Short name used on the command line and in logs
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::WholeFile => "whole-file",
            Self::MemoryBlock => "memory-block",
            Self::Block => "block",
            Self::Buffered => "buffered",
            Self::Line => "line",
        }
    }

    /// One-line description
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Byte => "unbuffered byte-at-a-time transfer",
            Self::WholeFile => "whole file read as text, staged in memory byte by byte",
            Self::MemoryBlock => "whole file read as text, staged in memory as one block",
            Self::Block => "single read into an exactly-sized buffer, single write",
            Self::Buffered => "bulk read, one write through a buffered writer",
            Self::Line => "line-by-line text transfer",
        }
    }

    /// Capability class
    #[must_use]
    pub fn capability(self) -> Capability {
        match self {
            Self::Byte | Self::Block | Self::Buffered => Capability::BinarySafe,
            Self::WholeFile | Self::MemoryBlock | Self::Line => Capability::TextEncodingDependent,
        }
    }

    /// Unit of the count returned by [`Strategy::run`]
    #[must_use]
    pub fn unit(self) -> TransferUnit {
        match self {
            Self::Byte | Self::Block | Self::Buffered => TransferUnit::Bytes,
            Self::WholeFile | Self::MemoryBlock => TransferUnit::Chars,
            Self::Line => TransferUnit::Lines,
        }
    }

    /// Run this strategy
    ///
    /// # Errors
    ///
    /// Returns the strategy's validation or I/O error.
    pub fn run<S: AsRef<Path>, D: AsRef<Path>>(
        self,
        source: S,
        destination: D,
        options: &CopyOptions,
    ) -> Result<u64> {
        match self {
            Self::Byte => byte_copy_with(source, destination, options),
            Self::WholeFile => whole_file_copy_with(source, destination, options),
            Self::MemoryBlock => memory_block_copy_with(source, destination, options),
            Self::Block => block_copy_with(source, destination, options),
            Self::Buffered => buffered_copy_with(source, destination, options),
            Self::Line => line_copy_with(source, destination, options),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown strategy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Open a destination for writing, truncating existing content
fn create_destination(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_name_roundtrip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!("BLOCK".parse::<Strategy>(), Ok(Strategy::Block));
        assert_eq!(
            "mmap".parse::<Strategy>(),
            Err(UnknownStrategy("mmap".to_string()))
        );
    }

    #[test]
    fn test_capability_classes() {
        let binary_safe: Vec<_> = Strategy::ALL
            .into_iter()
            .filter(|s| s.capability().is_binary_safe())
            .collect();
        assert_eq!(
            binary_safe,
            vec![Strategy::Byte, Strategy::Block, Strategy::Buffered]
        );
        assert_eq!(Strategy::Line.unit(), TransferUnit::Lines);
        assert_eq!(Strategy::WholeFile.unit(), TransferUnit::Chars);
    }

    #[test]
    fn test_run_dispatches_every_strategy() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, "hello\n").unwrap();
        fs::write(&dst, "").unwrap();

        let options = CopyOptions::default();
        for strategy in Strategy::ALL {
            let count = strategy.run(&src, &dst, &options).unwrap();
            let expected = match strategy.unit() {
                TransferUnit::Bytes | TransferUnit::Chars => 6,
                TransferUnit::Lines => 2,
            };
            assert_eq!(count, expected, "strategy {strategy}");
        }
    }

    #[test]
    fn test_create_destination_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dst");
        fs::write(&path, b"previous content").unwrap();

        drop(create_destination(&path).unwrap());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }
}
