//! Byte-exact content comparison.

use crate::error::Result;
use crate::options::DestinationPolicy;
use crate::validate::validate_paths;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read buffer size per file during comparison (64 KiB)
pub const COMPARE_BUFFER_SIZE: usize = 64 * 1024;

/// Check whether two existing files have identical content
///
/// Files of different length compare unequal without reading any content.
/// Otherwise bytes are compared in file order through fixed-size read
/// buffers, stopping at the first mismatch.
///
/// # Errors
///
/// Returns a validation error if either path is absent or does not name an
/// existing file, or an I/O error if reading fails.
pub fn content_equals<A: AsRef<Path>, B: AsRef<Path>>(source: A, destination: B) -> Result<bool> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    validate_paths(source, destination, DestinationPolicy::MustExist)?;

    let left = File::open(source)?;
    let right = File::open(destination)?;

    let (left_len, right_len) = (left.metadata()?.len(), right.metadata()?.len());
    if left_len != right_len {
        tracing::debug!(
            "length mismatch {} ({}) vs {} ({})",
            source.display(),
            left_len,
            destination.display(),
            right_len
        );
        return Ok(false);
    }

    let left = BufReader::with_capacity(COMPARE_BUFFER_SIZE, left).bytes();
    let right = BufReader::with_capacity(COMPARE_BUFFER_SIZE, right).bytes();
    for (offset, (a, b)) in left.zip(right).enumerate() {
        if a? != b? {
            tracing::debug!(
                "content mismatch {} vs {} at offset {}",
                source.display(),
                destination.display(),
                offset
            );
            return Ok(false);
        }
    }

    Ok(true)
}
