//! # Error Types
//!
//! This module defines the error type used throughout the inkterm library.
//!
//! FBInk reports failure by returning a negated `errno` value. The first
//! group of variants below is that closed set, translated one-to-one by
//! [`check`]. The remaining variants originate on the Rust side of the
//! boundary.

use std::os::raw::c_int;

use thiserror::Error;

/// Main error type for inkterm operations
#[derive(Debug, Error)]
pub enum InkError {
    /// Generic failure (`-EXIT_FAILURE`)
    #[error("FBInk operation failed")]
    Failure,

    /// No usable framebuffer device (`-ENODEV`)
    #[error("No framebuffer device available")]
    NoDevice,

    /// Operation not supported on this device (`-ENOTSUP`)
    #[error("Operation not supported on this device")]
    NotSupported,

    /// Nothing to act upon (`-ENODATA`)
    #[error("No data")]
    NoData,

    /// Timed out waiting on the device (`-ETIME`)
    #[error("Timed out")]
    TimedOut,

    /// Invalid argument passed to the device (`-EINVAL`)
    #[error("Invalid argument")]
    InvalidArgument,

    /// Malformed input, e.g. broken UTF-8 (`-EILSEQ`)
    #[error("Illegal byte sequence")]
    IllegalSequence,

    /// Content does not fit on the screen (`-ENOSPC`)
    #[error("Out of screen space")]
    OutOfSpace,

    /// A string handed to the C side contained an interior NUL byte
    #[error("String contains an interior NUL byte: {0}")]
    InvalidString(#[from] std::ffi::NulError),

    /// Image decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Settings file could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results carrying an [`InkError`].
pub type Result<T> = std::result::Result<T, InkError>;

/// Translate an FBInk return code.
///
/// Known negated errno values become their [`InkError`] variant. Zero,
/// positive values (row counts) and unknown codes are treated as success and
/// returned unchanged.
pub fn check(code: c_int) -> Result<c_int> {
    let err = match code {
        c if c == -libc::EXIT_FAILURE => InkError::Failure,
        c if c == -libc::ENODEV => InkError::NoDevice,
        c if c == -libc::ENOTSUP => InkError::NotSupported,
        c if c == -libc::ENODATA => InkError::NoData,
        c if c == -libc::ETIME => InkError::TimedOut,
        c if c == -libc::EINVAL => InkError::InvalidArgument,
        c if c == -libc::EILSEQ => InkError::IllegalSequence,
        c if c == -libc::ENOSPC => InkError::OutOfSpace,
        _ => return Ok(code),
    };
    Err(err)
}

// ============================================================================
// TESTS
// ============================================================================
