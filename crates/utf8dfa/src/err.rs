//! Helper module with this crate's error type.
//!
//! The core [`decode`](crate::decode()) signals malformed input only through
//! the position where it stops. The error type here classifies that stop for
//! callers who want more detail. It converts to I/O errors of kind
//! [`InvalidData`](std::io::ErrorKind::InvalidData).

use core::fmt;
use std::io::Write;

use crate::util::nicely_str;

/// The enumeration of error kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A sequence starts with a continuation byte or a byte that never
    /// appears in UTF-8, i.e., 0xC0, 0xC1, or 0xF5–0xFF.
    InvalidLead,
    /// A byte after a valid leading byte falls outside the allowed range. That
    /// includes overlong encodings, surrogates, and code points beyond
    /// U+10FFFF.
    InvalidContinuation,
    /// The input ends in the middle of a sequence.
    Truncated,
    /// The recovering decoder saw more malformed sequences than allowed.
    TooManyErrors,
}

impl ErrorKind {
    /// Turn the error kind to an error message.
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::InvalidLead => "invalid leading byte",
            Self::InvalidContinuation => "invalid continuation byte",
            Self::Truncated => "truncated sequence",
            Self::TooManyErrors => "too many malformed sequences",
        }
    }

    /// Determine whether this kind describes a single malformed sequence.
    pub fn is_malformed(&self) -> bool {
        !matches!(*self, Self::TooManyErrors)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            kind,
            valid_up_to: 0,
            offset: 0,
            bytes: [0; 4],
            len: 0,
        }
    }
}

impl From<ErrorKind> for std::io::Error {
    fn from(value: ErrorKind) -> Self {
        Error::from(value).into()
    }
}

/// A UTF-8 decoding error.
///
/// Besides the kind, an error records two offsets into the input. The
/// [`valid_up_to`](Error::valid_up_to) offset marks the start of the
/// malformed sequence; all code points before it were decoded. The
/// [`offset`](Error::offset) is where the core decoder stopped, just past the
/// byte that revealed the malformed sequence. The bytes between the two are
/// retained for display.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    valid_up_to: usize,
    offset: usize,
    bytes: [u8; 4],
    len: u8,
}

impl Error {
    /// Create a new error for the malformed sequence `input[valid_up_to..offset]`.
    ///
    /// At most four bytes of the sequence are retained.
    pub fn new(kind: ErrorKind, input: &[u8], valid_up_to: usize, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let valid_up_to = valid_up_to.min(offset);
        let sequence = &input[valid_up_to..offset];
        let len = sequence.len().min(4);

        let mut bytes = [0; 4];
        bytes[..len].copy_from_slice(&sequence[..len]);

        Self {
            kind,
            valid_up_to,
            offset,
            bytes,
            len: len as u8,
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the length of the input prefix that decoded without errors.
    pub fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Get the offset where decoding stopped.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get the bytes of the malformed sequence, up to four.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("valid_up_to", &self.valid_up_to)
            .field("offset", &self.offset)
            .field("bytes", &nicely_str(self.bytes()))
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if self.kind.is_malformed() {
            write!(
                f,
                " {} at offset {}",
                nicely_str(self.bytes()),
                self.valid_up_to
            )?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {}

impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        Self::new(std::io::ErrorKind::InvalidData, value)
    }
}

/// Report the error, including any sources, to the given writer.
///
/// # Example
///
/// ```
/// # use utf8dfa::err::{report, ErrorKind};
/// # use utf8dfa::try_decode;
/// let error = try_decode(b"ab\xe2\x82", &mut String::new()).unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::Truncated);
///
/// let mut out = Vec::new();
/// report(&error, &mut out)?;
/// assert_eq!(out, "ERROR: truncated sequence \"‹e2›‹82›\" at offset 2\n".as_bytes());
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn report<E, W>(error: &E, out: &mut W) -> std::io::Result<()>
where
    E: core::error::Error,
    W: Write + ?Sized,
{
    writeln!(out, "ERROR: {}", error)?;

    let mut error: &dyn core::error::Error = error;
    while let Some(inner) = error.source() {
        writeln!(out, "    {}", inner)?;
        error = inner;
    }
    Ok(())
}
