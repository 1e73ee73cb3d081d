//! Line-oriented text copy.
//!
//! Lines are read until the reader reports end of input. The end marker is
//! kept in the collected sequence, and [`LineTerminalPolicy`] decides whether
//! it is written back as an empty line.

use super::create_destination;
use super::text::{decode_lossy, strip_bom};
use crate::error::Result;
use crate::options::{CopyOptions, LineTerminalPolicy};
use crate::validate::validate_paths;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Line terminator appended after every written line
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Line terminator appended after every written line
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Copy a file line by line
///
/// Returns the number of lines written. With the default
/// [`LineTerminalPolicy::WriteMarker`] that is one more than the number of
/// source lines.
///
/// # Errors
///
/// Returns a validation error before any file is opened, or an I/O error.
pub fn line_copy<S: AsRef<Path>, D: AsRef<Path>>(source: S, destination: D) -> Result<u64> {
    line_copy_with(source, destination, &CopyOptions::default())
}

/// [`line_copy`] with explicit options
///
/// # Errors
///
/// See [`line_copy`].
pub fn line_copy_with<S: AsRef<Path>, D: AsRef<Path>>(
    source: S,
    destination: D,
    options: &CopyOptions,
) -> Result<u64> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    validate_paths(source, destination, options.destination)?;

    let lines = read_lines(BufReader::new(File::open(source)?))?;

    let mut writer = BufWriter::new(create_destination(destination)?);
    let mut count = 0u64;
    for line in &lines {
        if line.is_none() && options.line_terminal == LineTerminalPolicy::SkipMarker {
            continue;
        }
        writer.write_all(line.as_deref().unwrap_or_default().as_bytes())?;
        writer.write_all(LINE_ENDING.as_bytes())?;
        count += 1;
    }
    writer.flush()?;

    tracing::debug!(
        "line copy {} -> {}: {} lines read, {} written ({:?})",
        source.display(),
        destination.display(),
        lines.len() - 1,
        count,
        options.line_terminal
    );
    Ok(count)
}

/// Collect lines up to and including the end-of-input marker (`None`)
fn read_lines<R: BufRead>(mut reader: R) -> io::Result<Vec<Option<String>>> {
    let mut lines = Vec::new();
    loop {
        let line = read_line(&mut reader)?;
        let done = line.is_none();
        lines.push(line);
        if done {
            break;
        }
    }

    if let Some(Some(first)) = lines.first_mut() {
        strip_bom(first);
    }
    Ok(lines)
}

/// Read one line without its terminator
///
/// `\n`, `\r\n` and a bare `\r` each end a line.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut raw = Vec::new();
    let mut started = false;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(started.then(|| decode_lossy(raw)));
        }
        started = true;

        match buf.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                raw.extend_from_slice(&buf[..end]);
                let carriage_return = buf[end] == b'\r';
                reader.consume(end + 1);
                // The `\n` of a `\r\n` pair may start the next buffer
                if carriage_return && reader.fill_buf()?.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return Ok(Some(decode_lossy(raw)));
            }
            None => {
                let len = buf.len();
                raw.extend_from_slice(buf);
                reader.consume(len);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SKIP: CopyOptions = CopyOptions {
        destination: crate::options::DestinationPolicy::MustExist,
        line_terminal: LineTerminalPolicy::SkipMarker,
    };

    fn setup(content: &[u8]) -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, content).unwrap();
        fs::write(&dst, b"").unwrap();
        (dir, src, dst)
    }

    fn expected(lines: &[&str]) -> String {
        lines.iter().map(|l| format!("{l}{LINE_ENDING}")).collect()
    }

    #[test]
    fn test_read_lines_keeps_marker() {
        let lines = read_lines(&b"a\r\nb\n"[..]).unwrap();
        assert_eq!(lines, vec![Some("a".to_string()), Some("b".to_string()), None]);

        let lines = read_lines(&b""[..]).unwrap();
        assert_eq!(lines, vec![None]);
    }

    #[test]
    fn test_read_lines_without_trailing_newline() {
        let lines = read_lines(&b"a\n\nb"[..]).unwrap();
        assert_eq!(
            lines,
            vec![Some("a".to_string()), Some(String::new()), Some("b".to_string()), None]
        );
    }

    #[test]
    fn test_write_marker_adds_blank_line() {
        let (_dir, src, dst) = setup(b"a\nb\n");

        assert_eq!(line_copy(&src, &dst).unwrap(), 3);
        assert_eq!(fs::read_to_string(&dst).unwrap(), expected(&["a", "b", ""]));
    }

    #[test]
    fn test_write_marker_without_trailing_newline() {
        let (_dir, src, dst) = setup(b"a\nb");

        assert_eq!(line_copy(&src, &dst).unwrap(), 3);
        assert_eq!(fs::read_to_string(&dst).unwrap(), expected(&["a", "b", ""]));
    }

    #[test]
    fn test_skip_marker_preserves_line_count() {
        let (_dir, src, dst) = setup(b"a\nb\n");

        assert_eq!(line_copy_with(&src, &dst, &SKIP).unwrap(), 2);
        assert_eq!(fs::read_to_string(&dst).unwrap(), expected(&["a", "b"]));
    }

    #[test]
    fn test_empty_source() {
        let (_dir, src, dst) = setup(b"");
        assert_eq!(line_copy(&src, &dst).unwrap(), 1);
        assert_eq!(fs::read_to_string(&dst).unwrap(), LINE_ENDING);

        assert_eq!(line_copy_with(&src, &dst, &SKIP).unwrap(), 0);
        assert!(fs::read(&dst).unwrap().is_empty());
    }

    #[test]
    fn test_bom_only_stripped_from_first_line() {
        let (_dir, src, dst) = setup("\u{feff}a\n\u{feff}b\n".as_bytes());

        assert_eq!(line_copy_with(&src, &dst, &SKIP).unwrap(), 2);
        assert_eq!(fs::read_to_string(&dst).unwrap(), expected(&["a", "\u{feff}b"]));
    }

    #[test]
    fn test_bare_carriage_return_ends_line() {
        let lines = read_lines(&b"a\rb\r"[..]).unwrap();
        assert_eq!(lines, vec![Some("a".to_string()), Some("b".to_string()), None]);

        let (_dir, src, dst) = setup(b"a\rb\r");
        assert_eq!(line_copy(&src, &dst).unwrap(), 3);
        assert_eq!(fs::read_to_string(&dst).unwrap(), expected(&["a", "b", ""]));
    }

    #[test]
    fn test_mixed_terminators() {
        let lines = read_lines(&b"a\r\rb\n\r\nc"[..]).unwrap();
        assert_eq!(
            lines,
            vec![
                Some("a".to_string()),
                Some(String::new()),
                Some("b".to_string()),
                Some(String::new()),
                Some("c".to_string()),
                None
            ]
        );
    }

    #[test]
    fn test_crlf_split_across_buffer_boundary() {
        for capacity in 1..=4 {
            let reader = BufReader::with_capacity(capacity, &b"ab\r\ncd\r\n"[..]);
            let lines = read_lines(reader).unwrap();
            assert_eq!(
                lines,
                vec![Some("ab".to_string()), Some("cd".to_string()), None],
                "capacity {capacity}"
            );
        }
    }
}
