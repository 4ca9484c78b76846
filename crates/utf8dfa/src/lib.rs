//! # UTF-8 DFA
//!
//! This crate decodes UTF-8 into Unicode code points with a **table-driven
//! deterministic finite automaton**. It validates while decoding, in a single
//! forward pass over the input, without lookahead, backtracking, or heap
//! allocation. Overlong encodings, surrogates, and code points beyond
//! U+10FFFF are rejected by the tables themselves, not by range checks after
//! the fact.
//!
//! The core is [`decode()`]. It reads bytes from a [`Source`] and pushes code
//! points into a [`Sink`]. It stops at the first malformed sequence and
//! signals failure solely through the position where it stopped, which keeps
//! the common path free of error handling. Everything else builds on that:
//!
//!   * [`decode_slice`] returns the stop offset for byte slices;
//!   * [`try_decode`], [`validate`], [`decode_to_vec`], and
//!     [`decode_to_string`] classify failures as [`err::Error`]s;
//!   * [`recover::decode_with`] and [`recover::decode_lossy`] replace or skip
//!     malformed sequences as configured by [`opt::Options`];
//!   * [`stream::Utf8Decoder`] decodes one byte at a time, for input arriving
//!     in chunks.
//!
//!
//! # Example
//!
//! ```
//! # use utf8dfa::{decode_slice, err::ErrorKind, validate};
//! let mut output = Vec::<u32>::new();
//!
//! // Well-formed input is decoded in full.
//! assert_eq!(decode_slice("a€".as_bytes(), &mut output), 4);
//! assert_eq!(output, [0x61, 0x20ac]);
//!
//! // The encoding of a surrogate is malformed. Decoding stops right after the
//! // second byte, which falls outside the range allowed after 0xED.
//! output.clear();
//! assert_eq!(decode_slice(b"\xed\xa0\x80", &mut output), 2);
//! assert!(output.is_empty());
//!
//! // The same, but classified.
//! let error = validate(b"\xed\xa0\x80").unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::InvalidContinuation);
//! ```

mod api;
mod decode;
pub mod err;
pub mod opt;
pub mod recover;
pub mod stream;
pub mod table;
pub mod util;

#[cfg(test)]
mod test_util;

pub use api::{Cursor, Discard, Emit, Sink, Source};
pub use decode::{decode, decode_slice, decode_to_string, decode_to_vec, try_decode, validate};
