//! Whole-file block copies.
//!
//! Both strategies hold the entire source in memory and hand it to the
//! destination in a single write. [`block_copy`] reads into a buffer sized
//! to the source length and writes it to the raw file; [`buffered_copy`]
//! uses the bulk read helper and writes through a [`BufWriter`] sized to
//! the data.

use super::create_destination;
use crate::error::Result;
use crate::options::CopyOptions;
use crate::validate::validate_paths;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

/// Copy a file with one read and one write
///
/// Memory use is proportional to the source size. Returns the destination
/// length.
///
/// # Errors
///
/// Returns a validation error before any file is opened, or an I/O error.
pub fn block_copy<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> Result<u64> {
    block_copy_with(source, destination, &CopyOptions::default())
}

/// [`block_copy`] with explicit options
///
/// # Errors
///
/// See [`block_copy`].
pub fn block_copy_with<S: AsRef<Path>, D: AsRef<Path>>(
    source: S,
    destination: D,
    options: &CopyOptions,
) -> Result<u64> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    validate_paths(source, destination, options.destination)?;

    let buffer = {
        let mut src = File::open(source)?;
        let len = usize::try_from(src.metadata()?.len())
            .map_err(|_| io::Error::other("source does not fit in memory"))?;
        let mut buffer = vec![0u8; len];
        src.read_exact(&mut buffer)?;
        buffer
    };

    let mut dst = create_destination(destination)?;
    dst.write_all(&buffer)?;

    let written = dst.metadata()?.len();
    tracing::debug!(
        "block copy {} -> {}: {} bytes",
        source.display(),
        destination.display(),
        written
    );
    Ok(written)
}

/// Copy a file through a buffered writer sized to the data
///
/// Returns the destination length, measured after the writer is flushed.
///
/// # Errors
///
/// Returns a validation error before any file is opened, or an I/O error.
pub fn buffered_copy<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> Result<u64> {
    buffered_copy_with(source, destination, &CopyOptions::default())
}

/// [`buffered_copy`] with explicit options
///
/// # Errors
///
/// See [`buffered_copy`].
pub fn buffered_copy_with<S: AsRef<Path>, D: AsRef<Path>>(
    source: S,
    destination: D,
    options: &CopyOptions,
) -> Result<u64> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    validate_paths(source, destination, options.destination)?;

    let data = fs::read(source)?;

    let mut writer = BufWriter::with_capacity(data.len(), create_destination(destination)?);
    writer.write_all(&data)?;
    let dst = writer.into_inner().map_err(io::IntoInnerError::into_error)?;

    let written = dst.metadata()?.len();
    tracing::debug!(
        "buffered copy {} -> {}: {} bytes (buffer {})",
        source.display(),
        destination.display(),
        written,
        data.len()
    );
    Ok(written)
}
