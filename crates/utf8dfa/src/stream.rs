//! Incremental decoding for input that arrives in chunks.
//!
//! The core [`decode`](crate::decode()) needs the complete sequence within
//! one invocation and treats a sequence split across two reads as truncated.
//! [`Utf8Decoder`] instead keeps the partial code point and automaton state
//! between bytes. It uses the same tables and hence accepts the same
//! language.

use crate::api::{to_char, Sink};
use crate::err::ErrorKind;
use crate::table::{classify, initial_state, transition, State, FIRST_LEAD};

/// The result of feeding one byte to a [`Utf8Decoder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The byte completed a character.
    Char(char),
    /// The byte started or continued a sequence.
    Pending,
    /// The byte is malformed on its own.
    Malformed,
    /// The byte broke the pending sequence, which is malformed. The byte
    /// itself has not been consumed and should be fed again.
    MalformedRetry,
}

/// A byte-at-a-time UTF-8 decoder.
///
/// # Example
///
/// ```
/// # use utf8dfa::stream::{Step, Utf8Decoder};
/// let mut decoder = Utf8Decoder::new();
/// assert_eq!(decoder.feed(0xe2), Step::Pending);
/// assert_eq!(decoder.feed(0x82), Step::Pending);
/// assert_eq!(decoder.feed(0xac), Step::Char('€'));
///
/// assert_eq!(decoder.feed(0xe2), Step::Pending);
/// assert_eq!(decoder.feed(b'x'), Step::MalformedRetry);
/// assert_eq!(decoder.feed(b'x'), Step::Char('x'));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Utf8Decoder {
    code_point: u32,
    state: State,
}

impl Default for Utf8Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf8Decoder {
    /// Create a new decoder.
    pub const fn new() -> Self {
        Self {
            code_point: 0,
            state: State::Begin,
        }
    }

    /// Determine whether a sequence is in progress.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Abandon any sequence in progress.
    #[inline]
    pub fn reset(&mut self) {
        self.code_point = 0;
        self.state = State::Begin;
    }

    /// Feed the next byte.
    pub fn feed(&mut self, byte: u8) -> Step {
        if self.state.is_pending() {
            self.code_point = (self.code_point << 6) | (byte & 0x3f) as u32;
            self.state = transition(self.state, classify(byte));

            return match self.state {
                State::Begin => Step::Char(to_char(self.code_point)),
                State::Error => {
                    self.reset();
                    Step::MalformedRetry
                }
                _ => Step::Pending,
            };
        }

        if byte < 0x80 {
            return Step::Char(byte as char);
        } else if byte < FIRST_LEAD {
            return Step::Malformed;
        }

        let (bits, state) = initial_state(byte);
        if let State::Error = state {
            return Step::Malformed;
        }

        self.code_point = bits as u32;
        self.state = state;
        Step::Pending
    }

    /// Decode the chunk into the output, replacing malformed sequences with
    /// U+FFFD.
    ///
    /// A sequence at the end of the chunk stays pending for the next chunk.
    /// This method returns the number of malformed sequences.
    pub fn decode_lossy<O: Sink + ?Sized>(&mut self, chunk: &[u8], output: &mut O) -> usize {
        let mut errors = 0;

        for &byte in chunk {
            let mut step = self.feed(byte);
            if let Step::MalformedRetry = step {
                errors += 1;
                output.push(char::REPLACEMENT_CHARACTER as u32);
                step = self.feed(byte);
            }

            match step {
                Step::Char(c) => output.push(c as u32),
                Step::Malformed => {
                    errors += 1;
                    output.push(char::REPLACEMENT_CHARACTER as u32);
                }
                Step::Pending | Step::MalformedRetry => (),
            }
        }

        errors
    }

    /// Finish decoding.
    ///
    /// This method fails with [`ErrorKind::Truncated`] if a sequence is still
    /// pending. Either way, the decoder is ready for new input afterwards.
    pub fn finish(&mut self) -> Result<(), ErrorKind> {
        let pending = self.is_pending();
        self.reset();
        if pending {
            Err(ErrorKind::Truncated)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Step, Utf8Decoder};
    use crate::err::ErrorKind;
    use crate::test_util::random_input;
    use rand::Rng;

    #[test]
    fn test_steps() {
        let mut decoder = Utf8Decoder::new();
        assert_eq!(decoder.feed(b'A'), Step::Char('A'));
        assert_eq!(decoder.feed(0x80), Step::Malformed);
        assert_eq!(decoder.feed(0xc1), Step::Malformed);
        assert_eq!(decoder.feed(0xf5), Step::Malformed);
        assert!(!decoder.is_pending());

        assert_eq!(decoder.feed(0xf4), Step::Pending);
        assert_eq!(decoder.feed(0x8f), Step::Pending);
        assert_eq!(decoder.feed(0xbf), Step::Pending);
        assert!(decoder.is_pending());
        assert_eq!(decoder.feed(0xbf), Step::Char('\u{10ffff}'));

        assert_eq!(decoder.feed(0xed), Step::Pending);
        assert_eq!(decoder.feed(0xa0), Step::MalformedRetry);
        assert_eq!(decoder.feed(0xa0), Step::Malformed);
    }

    #[test]
    fn test_finish() {
        let mut decoder = Utf8Decoder::default();
        assert_eq!(decoder.finish(), Ok(()));

        decoder.feed(0xf0);
        decoder.feed(0x9f);
        assert_eq!(decoder.finish(), Err(ErrorKind::Truncated));
        assert!(!decoder.is_pending());
        assert_eq!(decoder.feed(b'z'), Step::Char('z'));
    }

    #[test]
    fn test_split_sequence() {
        let mut decoder = Utf8Decoder::new();
        let mut output = String::new();

        assert_eq!(decoder.decode_lossy(b"a\xf0\x9f", &mut output), 0);
        assert_eq!(output, "a");
        assert!(decoder.is_pending());

        assert_eq!(decoder.decode_lossy(b"\xa6\x80z", &mut output), 0);
        assert_eq!(output, "a🦀z");
        assert_eq!(decoder.finish(), Ok(()));
    }

    #[test]
    fn test_chunks_agree_with_std() {
        let mut rng = rand::rng();

        for _ in 0..10_000 {
            let bytes = random_input(&mut rng);
            let mut decoder = Utf8Decoder::new();
            let mut output = String::new();

            let mut rest = bytes.as_slice();
            while !rest.is_empty() {
                let (chunk, tail) = rest.split_at(rng.random_range(1..=rest.len()));
                decoder.decode_lossy(chunk, &mut output);
                rest = tail;
            }
            if decoder.finish().is_err() {
                output.push(char::REPLACEMENT_CHARACTER);
            }

            assert_eq!(output, String::from_utf8_lossy(&bytes), "{:?}", bytes);
        }
    }
}
