//! # streamcopy files
//!
//! Interchangeable file copy strategies and a byte-exact content check.
//!
//! This crate provides:
//! - Unbuffered byte-at-a-time copy
//! - Whole-file text copies staged through an in-memory stream
//! - Single-read/single-write block copy, raw or through a buffered writer
//! - Line-oriented text copy
//! - Streaming byte-exact comparison of two files
//!
//! Every operation validates its arguments before opening any file and
//! holds its file handles only for the duration of the call.
//!
//! ```no_run
//! use streamcopy_files::{block_copy, content_equals};
//!
//! let bytes = block_copy("input.bin", "output.bin")?;
//! assert!(content_equals("input.bin", "output.bin")?);
//! println!("copied {bytes} bytes");
//! # Ok::<(), streamcopy_files::CopyError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compare;
pub mod error;
pub mod options;
pub mod strategy;
pub mod validate;

pub use compare::content_equals;
pub use error::{CopyError, Result};
pub use options::{CopyOptions, DestinationPolicy, LineTerminalPolicy};
pub use strategy::{
    Capability, Strategy, TransferUnit, UnknownStrategy, block_copy, block_copy_with,
    buffered_copy, buffered_copy_with, byte_copy, byte_copy_with, line_copy, line_copy_with,
    memory_block_copy, memory_block_copy_with, whole_file_copy, whole_file_copy_with,
};
pub use validate::validate_inputs;
