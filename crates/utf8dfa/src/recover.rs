//! Decoding that recovers from malformed sequences.
//!
//! The core [`decode`](crate::decode()) halts at the first malformed sequence
//! and leaves recovery to its caller. This module is such a caller. It
//! restarts the core after every malformed sequence, replacing or skipping
//! the sequence as configured by [`Options`].
//!
//! When the automaton rejects a byte after a valid leading byte, that byte
//! may well start the next sequence. Hence decoding restarts *at* the
//! offending byte in that case and *after* it otherwise. As a result, each
//! maximal subpart of a malformed sequence counts as one error.

use crate::api::{Cursor, Sink};
use crate::decode::{run, Counted, Malformed};
use crate::err::{Error, ErrorKind};
use crate::opt::{Options, Recovery, Volume};

/// The outcome of recovering decoding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    code_points: usize,
    errors: usize,
    reported: Vec<Error>,
}

impl Outcome {
    /// Get the number of code points pushed into the output, including
    /// replacement characters.
    pub fn code_points(&self) -> usize {
        self.code_points
    }

    /// Get the number of malformed sequences.
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Determine whether the input was well-formed.
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }

    /// Get the errors retained according to the [`Volume`].
    pub fn reported(&self) -> &[Error] {
        &self.reported
    }
}

/// Decode the byte slice while recovering from malformed sequences.
///
/// With [`Recovery::Stop`], this function behaves like
/// [`try_decode`](crate::try_decode) but returns an outcome. With
/// [`Recovery::Replace`] and [`Recovery::Skip`], it only fails if the number
/// of malformed sequences exceeds [`Options::max_errors`]. The output then
/// holds everything decoded up to the malformed sequence exceeding the limit.
///
/// # Example
///
/// ```
/// # use utf8dfa::opt::{Options, Recovery};
/// # use utf8dfa::recover::decode_with;
/// let options = Options::builder().replacement('?').build();
/// let mut output = String::new();
/// let outcome = decode_with(&options, b"caf\xe9 \xf0\x9f\x8d\xb5", &mut output)?;
///
/// assert_eq!(output, "caf? 🍵");
/// assert_eq!(outcome.code_points(), 6);
/// assert_eq!(outcome.errors(), 1);
/// # Ok::<(), utf8dfa::err::Error>(())
/// ```
pub fn decode_with<O: Sink + ?Sized>(
    options: &Options,
    bytes: &[u8],
    output: &mut O,
) -> Result<Outcome, Error> {
    let mut outcome = Outcome::default();
    let mut start = 0;

    loop {
        let mut cursor = Cursor::with_position(bytes, start);
        let mut counted = Counted {
            inner: &mut *output,
            count: 0,
        };

        let result = run(&mut cursor, &mut counted);
        outcome.code_points += counted.count;
        let Err(Malformed { kind, length }) = result else {
            return Ok(outcome);
        };

        let offset = cursor.position();
        let valid_up_to = offset - length;
        let error = Error::new(kind, bytes, valid_up_to, offset);
        if let Recovery::Stop = options.recovery() {
            return Err(error);
        }

        outcome.errors += 1;
        if options.max_errors() < outcome.errors {
            return Err(Error::new(
                ErrorKind::TooManyErrors,
                bytes,
                valid_up_to,
                offset,
            ));
        }

        match options.volume() {
            Volume::Silent => (),
            Volume::Regular if !outcome.reported.is_empty() => (),
            Volume::Regular | Volume::Detailed => outcome.reported.push(error),
        }

        if let Recovery::Replace = options.recovery() {
            output.push(options.replacement() as u32);
            outcome.code_points += 1;
        }

        start = match kind {
            ErrorKind::InvalidContinuation => offset - 1,
            _ => offset,
        };
    }
}

/// Decode the byte slice into a string, replacing malformed sequences with
/// U+FFFD.
///
/// The result is the same as for [`String::from_utf8_lossy`].
///
/// # Example
///
/// ```
/// # use utf8dfa::recover::decode_lossy;
/// assert_eq!(decode_lossy(b"a\xf0\x80b"), "a\u{fffd}\u{fffd}b");
/// ```
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len());
    // The default options neither stop nor limit errors.
    let _ = decode_with(&Options::default(), bytes, &mut output);
    output
}

#[cfg(test)]
mod test {
    use super::{decode_lossy, decode_with};
    use crate::err::ErrorKind;
    use crate::opt::{Options, Recovery, Volume};
    use crate::test_util::random_input;

    #[test]
    fn test_lossy() {
        assert_eq!(decode_lossy(b""), "");
        assert_eq!(decode_lossy(b"plain"), "plain");
        assert_eq!(decode_lossy(b"\xc0\x80"), "\u{fffd}\u{fffd}");
        assert_eq!(decode_lossy(b"\xed\xa0\x80x"), "\u{fffd}\u{fffd}\u{fffd}x");
        assert_eq!(decode_lossy(b"\xe2\x82A"), "\u{fffd}A");
        assert_eq!(decode_lossy(b"\xe2\x82\xe2\x82\xac"), "\u{fffd}€");
        assert_eq!(decode_lossy(b"end\xf4\x8f\xbf"), "end\u{fffd}");
    }

    #[test]
    fn test_lossy_agrees_with_std() {
        let mut rng = rand::rng();

        for _ in 0..20_000 {
            let bytes = random_input(&mut rng);
            assert_eq!(
                decode_lossy(&bytes),
                String::from_utf8_lossy(&bytes),
                "{:?}",
                bytes
            );
        }
    }

    #[test]
    fn test_skip() -> Result<(), crate::err::Error> {
        let options = Options::builder().recovery(Recovery::Skip).build();
        let mut output = String::new();
        let outcome = decode_with(&options, b"a\xffb\xe2\x82", &mut output)?;

        assert_eq!(output, "ab");
        assert_eq!(outcome.code_points(), 2);
        assert_eq!(outcome.errors(), 2);
        assert!(!outcome.is_clean());
        assert!(outcome.reported().is_empty());
        Ok(())
    }

    #[test]
    fn test_stop() {
        let mut output = Vec::<u32>::new();
        let error = decode_with(&Options::strict(), b"ab\xc3(", &mut output).unwrap_err();

        assert_eq!(output, [0x61, 0x62]);
        assert_eq!(error.kind(), ErrorKind::InvalidContinuation);
        assert_eq!(error.valid_up_to(), 2);
        assert_eq!(error.offset(), 4);

        let outcome = decode_with(&Options::strict(), b"fine", &mut output).unwrap();
        assert!(outcome.is_clean());
        assert_eq!(outcome.code_points(), 4);
    }

    #[test]
    fn test_max_errors() {
        let options = Options::builder().max_errors(1).build();
        let mut output = String::new();
        let error = decode_with(&options, b"1\x802\x803", &mut output).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::TooManyErrors);
        assert_eq!(error.valid_up_to(), 3);
        assert_eq!(output, "1\u{fffd}2");
    }

    #[test]
    fn test_volume() {
        let input = b"\xff.\xfe.\xfd";

        let mut output = String::new();
        let outcome = decode_with(&Options::with_log(), input, &mut output).unwrap();
        assert_eq!(outcome.errors(), 3);
        assert_eq!(outcome.reported().len(), 1);
        assert_eq!(outcome.reported()[0].valid_up_to(), 0);

        let options = Options::builder()
            .volume(Volume::Detailed)
            .recovery(Recovery::Skip)
            .build();
        let mut output = String::new();
        let outcome = decode_with(&options, input, &mut output).unwrap();
        assert_eq!(output, "..");
        let offsets: Vec<_> = outcome.reported().iter().map(|e| e.valid_up_to()).collect();
        assert_eq!(offsets, [0, 2, 4]);
    }
}
