//! Text copies staged through an in-memory stream.
//!
//! The source is read as UTF-8 text, re-encoded to bytes, pushed through a
//! [`Cursor`], decoded again and written out as text. Invalid UTF-8 in the
//! source is replaced with U+FFFD, so these copies are only exact for text.

use super::create_destination;
use crate::error::Result;
use crate::options::CopyOptions;
use crate::validate::validate_paths;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;

const BOM: char = '\u{feff}';

/// How the staged bytes are drained from the in-memory stream
#[derive(Debug, Clone, Copy)]
enum Drain {
    ByteWise,
    Block,
}

/// Copy a file as text, staging it in memory one byte at a time
///
/// Returns the number of characters written.
///
/// # Errors
///
/// Returns a validation error before any file is opened, or an I/O error.
pub fn whole_file_copy<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> Result<u64> {
    whole_file_copy_with(source, destination, &CopyOptions::default())
}

/// [`whole_file_copy`] with explicit options
///
/// # Errors
///
/// See [`whole_file_copy`].
pub fn whole_file_copy_with<S: AsRef<Path>, D: AsRef<Path>>(
    source: S,
    destination: D,
    options: &CopyOptions,
) -> Result<u64> {
    staged_copy(source.as_ref(), destination.as_ref(), options, Drain::ByteWise)
}

/// Copy a file as text, staging it in memory as a single block
///
/// Returns the number of characters written.
///
/// # Errors
///
/// Returns a validation error before any file is opened, or an I/O error.
pub fn memory_block_copy<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> Result<u64> {
    memory_block_copy_with(source, destination, &CopyOptions::default())
}

/// [`memory_block_copy`] with explicit options
///
/// # Errors
///
/// See [`memory_block_copy`].
pub fn memory_block_copy_with<S: AsRef<Path>, D: AsRef<Path>>(
    source: S,
    destination: D,
    options: &CopyOptions,
) -> Result<u64> {
    staged_copy(source.as_ref(), destination.as_ref(), options, Drain::Block)
}

fn staged_copy(
    source: &Path,
    destination: &Path,
    options: &CopyOptions,
    drain: Drain,
) -> Result<u64> {
    validate_paths(source, destination, options.destination)?;

    let text = read_text(source)?;
    let encoded = text.into_bytes();

    let mut stage = Cursor::new(encoded);
    let mut staged = Vec::with_capacity(stage.get_ref().len());
    match drain {
        Drain::ByteWise => {
            let mut byte = [0u8; 1];
            while stage.read(&mut byte)? == 1 {
                staged.push(byte[0]);
            }
        }
        Drain::Block => {
            stage.read_to_end(&mut staged)?;
        }
    }

    let chars = String::from_utf8(staged)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut writer = BufWriter::new(create_destination(destination)?);
    writer.write_all(chars.as_bytes())?;
    writer.flush()?;

    let written = chars.chars().count() as u64;
    tracing::debug!(
        "{:?} staged text copy {} -> {}: {} chars",
        drain,
        source.display(),
        destination.display(),
        written
    );
    Ok(written)
}

/// Read a whole file as UTF-8 text, dropping a leading byte-order mark
fn read_text(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;

    let mut text = decode_lossy(raw);
    strip_bom(&mut text);
    Ok(text)
}

/// Decode bytes as UTF-8, replacing invalid sequences with U+FFFD
pub(crate) fn decode_lossy(raw: Vec<u8>) -> String {
    match String::from_utf8(raw) {
        Ok(text) => text,
        Err(e) => {
            tracing::trace!("invalid UTF-8 at byte {}", e.utf8_error().valid_up_to());
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

/// Drop a leading byte-order mark
pub(crate) fn strip_bom(text: &mut String) {
    if text.starts_with(BOM) {
        text.replace_range(..BOM.len_utf8(), "");
    }
}
