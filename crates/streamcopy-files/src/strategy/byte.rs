//! Unbuffered byte-at-a-time copy.

use super::create_destination;
use crate::error::Result;
use crate::options::CopyOptions;
use crate::validate::validate_paths;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

/// Copy a file one byte at a time
///
/// Neither side is buffered: every byte is a separate read and a separate
/// write. Returns the destination length.
///
/// # Errors
///
/// Returns a validation error before any file is opened, or an I/O error
/// if the transfer fails part way (the destination is left as written).
/// Copying a file onto itself fails with [`io::ErrorKind::InvalidInput`]
/// before anything is truncated.
pub fn byte_copy<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> Result<u64> {
    byte_copy_with(source, destination, &CopyOptions::default())
}

/// [`byte_copy`] with explicit options
///
/// # Errors
///
/// See [`byte_copy`].
pub fn byte_copy_with<S: AsRef<Path>, D: AsRef<Path>>(
    source: S,
    destination: D,
    options: &CopyOptions,
) -> Result<u64> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    validate_paths(source, destination, options.destination)?;

    // Destination is truncated before the source is read
    if is_same_file(source, destination) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is both source and destination", source.display()),
        )
        .into());
    }

    let mut src = File::open(source)?;
    let len = src.metadata()?.len();
    let mut dst = create_destination(destination)?;

    // Source length is fixed at open; a file that shrinks fails with UnexpectedEof
    let mut byte = [0u8; 1];
    for _ in 0..len {
        src.read_exact(&mut byte)?;
        dst.write_all(&byte)?;
    }

    let written = dst.metadata()?.len();
    tracing::debug!(
        "byte copy {} -> {}: {} bytes",
        source.display(),
        destination.display(),
        written
    );
    Ok(written)
}

/// Whether both paths resolve to the same file; a destination that does
/// not exist yet never matches
fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(destination)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
