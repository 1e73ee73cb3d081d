//! Copy error types.

use std::path::PathBuf;
use thiserror::Error;

/// Copy and comparison errors
#[derive(Debug, Error)]
pub enum CopyError {
    /// A required path argument was not supplied
    #[error("argument `{name}` is required")]
    NullArgument {
        /// Argument name
        name: &'static str,
    },

    /// A supplied path does not name an existing, readable file
    #[error("argument `{name}` does not name an existing file: {}", .path.display())]
    InvalidArgument {
        /// Argument name
        name: &'static str,
        /// Offending path
        path: PathBuf,
    },

    /// Underlying I/O failure during transfer or comparison
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CopyError {
    /// Whether this error was raised by input validation, before any I/O
    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::NullArgument { .. } | Self::InvalidArgument { .. }
        )
    }

    /// Name of the argument that failed validation, if any
    #[must_use]
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            Self::NullArgument { name } | Self::InvalidArgument { name, .. } => Some(*name),
            Self::Io(_) => None,
        }
    }
}

/// Result alias for copy operations
pub type Result<T> = std::result::Result<T, CopyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_classification() {
        let null = CopyError::NullArgument { name: "source" };
        assert!(null.is_argument_error());
        assert_eq!(null.argument(), Some("source"));

        let invalid = CopyError::InvalidArgument {
            name: "destination",
            path: PathBuf::from("/missing"),
        };
        assert!(invalid.is_argument_error());
        assert_eq!(invalid.argument(), Some("destination"));

        let io = CopyError::from(std::io::Error::other("disk full"));
        assert!(!io.is_argument_error());
        assert_eq!(io.argument(), None);
    }

    #[test]
    fn test_display() {
        let err = CopyError::InvalidArgument {
            name: "source",
            path: PathBuf::from("/no/such/file"),
        };
        assert_eq!(
            err.to_string(),
            "argument `source` does not name an existing file: /no/such/file"
        );
    }
}
