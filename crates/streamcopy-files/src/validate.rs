//! Input validation shared by every strategy.
//!
//! Validation runs before any file is opened for writing. It only looks up
//! metadata and opens the source read-only, so a failed validation leaves
//! both paths exactly as they were.

use crate::error::{CopyError, Result};
use crate::options::DestinationPolicy;
use std::fs::{self, File};
use std::path::Path;

/// Argument name reported for the source path
pub const SOURCE: &str = "source";

/// Argument name reported for the destination path
pub const DESTINATION: &str = "destination";

/// Validate a source/destination pair
///
/// Checks run in order: source absent, destination absent, source
/// missing, destination missing. The destination existence check is
/// skipped under [`DestinationPolicy::CreateIfMissing`].
///
/// # Errors
///
/// Returns [`CopyError::NullArgument`] if either path is absent and
/// [`CopyError::InvalidArgument`] if a required file does not exist or the
/// source cannot be opened for reading.
pub fn validate_inputs(
    source: Option<&Path>,
    destination: Option<&Path>,
    policy: DestinationPolicy,
) -> Result<()> {
    let source = source.ok_or(CopyError::NullArgument { name: SOURCE })?;
    let destination = destination.ok_or(CopyError::NullArgument { name: DESTINATION })?;

    if !is_readable_file(source) {
        return Err(CopyError::InvalidArgument {
            name: SOURCE,
            path: source.to_path_buf(),
        });
    }

    if policy == DestinationPolicy::MustExist && !is_existing_file(destination) {
        return Err(CopyError::InvalidArgument {
            name: DESTINATION,
            path: destination.to_path_buf(),
        });
    }

    Ok(())
}

/// Validate a pair of `AsRef<Path>` arguments, treating empty paths as absent
pub(crate) fn validate_paths(
    source: &Path,
    destination: &Path,
    policy: DestinationPolicy,
) -> Result<()> {
    validate_inputs(present(source), present(destination), policy)
}

/// An empty path is how an absent argument reaches the path-based API
fn present(path: &Path) -> Option<&Path> {
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

fn is_existing_file(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file())
}

fn is_readable_file(path: &Path) -> bool {
    is_existing_file(path) && File::open(path).is_ok()
}
