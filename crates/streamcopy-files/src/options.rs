//! Copy policies.

use serde::{Deserialize, Serialize};

/// How validation treats a destination path that does not exist yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationPolicy {
    /// Destination must already exist; it is then truncated and rewritten
    #[default]
    MustExist,
    /// Destination is created by the copy when missing
    CreateIfMissing,
}

/// What line copy does with the reader's end-of-input marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineTerminalPolicy {
    /// Write the marker as an empty line (N lines in, N + 1 lines out)
    #[default]
    WriteMarker,
    /// Consume the marker without writing it (N lines in, N lines out)
    SkipMarker,
}

/// Options shared by every copy strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CopyOptions {
    /// Destination existence policy
    #[serde(default)]
    pub destination: DestinationPolicy,
    /// Line copy terminal marker policy
    #[serde(default)]
    pub line_terminal: LineTerminalPolicy,
}

impl CopyOptions {
    /// Options with the default policies
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the destination policy
    #[must_use]
    pub fn with_destination(mut self, policy: DestinationPolicy) -> Self {
        self.destination = policy;
        self
    }

    /// Set the line terminal policy
    #[must_use]
    pub fn with_line_terminal(mut self, policy: LineTerminalPolicy) -> Self {
        self.line_terminal = policy;
        self
    }
}
