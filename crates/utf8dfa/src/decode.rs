use crate::api::{Cursor, Discard, Sink, Source};
use crate::err::{Error, ErrorKind};
use crate::table::{classify, initial_state, transition, State, FIRST_LEAD};

/// The malformed sequence that stopped the automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Malformed {
    pub kind: ErrorKind,
    /// The number of bytes read for the sequence, including the offending byte.
    pub length: usize,
}

/// Run the automaton until the input is exhausted or malformed.
///
/// On error, the input has advanced just past the byte that revealed the
/// malformed sequence, or to its end for a truncated sequence.
#[inline(always)]
pub(crate) fn run<I, O>(input: &mut I, output: &mut O) -> Result<(), Malformed>
where
    I: Source + ?Sized,
    O: Sink + ?Sized,
{
    while input.has_next() {
        let byte = input.next_byte();

        if byte < 0x80 {
            output.push(byte as u32);
            continue;
        }

        // Stray continuation bytes as well as 0xC0 and 0xC1, which only ever
        // start overlong encodings.
        if byte < FIRST_LEAD {
            return Err(Malformed {
                kind: ErrorKind::InvalidLead,
                length: 1,
            });
        }

        let (bits, mut state) = initial_state(byte);
        let mut code_point = bits as u32;
        let mut length = 1;

        while state.is_pending() {
            if !input.has_next() {
                return Err(Malformed {
                    kind: ErrorKind::Truncated,
                    length,
                });
            }

            let byte = input.next_byte();
            code_point = (code_point << 6) | (byte & 0x3f) as u32;
            state = transition(state, classify(byte));
            length += 1;
        }

        if let State::Error = state {
            let kind = if length == 1 {
                ErrorKind::InvalidLead
            } else {
                ErrorKind::InvalidContinuation
            };
            return Err(Malformed { kind, length });
        }

        output.push(code_point);
    }

    Ok(())
}

/// Decode UTF-8 from the input into code points for the output.
///
/// This function reads the input one byte at a time, without ever looking
/// ahead or backtracking. It pushes every complete and valid code point into
/// the output in order and returns the input where it stopped:
///
///   * If the input is well-formed, the returned input is exhausted.
///   * If the input contains a malformed sequence, the returned input sits
///     just past the byte that revealed the malformed sequence. Code points
///     before the malformed sequence have been pushed; nothing has been pushed
///     for the malformed sequence itself.
///   * If the input ends in the middle of a sequence, the returned input is
///     exhausted, too. Since nothing has been pushed for the incomplete
///     sequence, callers that need to detect truncation should use
///     [`try_decode`].
///
/// Overlong encodings, surrogates, and code points beyond U+10FFFF are all
/// malformed. The function carries no state between invocations, so it is
/// safe to resume decoding with a fresh call after skipping bytes.
///
/// # Example
///
/// ```
/// # use utf8dfa::{decode, Cursor};
/// let mut output = String::new();
/// let rest = decode(Cursor::new("¡Olé!".as_bytes()), &mut output);
///
/// assert!(rest.is_exhausted());
/// assert_eq!(output, "¡Olé!");
/// ```
pub fn decode<I, O>(mut input: I, output: &mut O) -> I
where
    I: Source,
    O: Sink + ?Sized,
{
    // The stop position is the result.
    let _ = run(&mut input, output);
    input
}

/// Decode the byte slice and return the offset where decoding stopped.
///
/// The offset equals the slice length if the slice is well-formed. See
/// [`decode`] for details.
///
/// # Example
///
/// ```
/// # use utf8dfa::decode_slice;
/// let mut output = Vec::<u32>::new();
/// assert_eq!(decode_slice(b"\xed\xa0\x80", &mut output), 2);
/// assert!(output.is_empty());
/// ```
pub fn decode_slice<O: Sink + ?Sized>(bytes: &[u8], output: &mut O) -> usize {
    decode(Cursor::new(bytes), output).position()
}

// ------------------------------------------------------------------------------------------------

/// A sink that counts the code points passing through.
pub(crate) struct Counted<'a, K: ?Sized> {
    pub inner: &'a mut K,
    pub count: usize,
}

impl<K: Sink + ?Sized> Sink for Counted<'_, K> {
    #[inline]
    fn push(&mut self, code_point: u32) {
        self.count += 1;
        self.inner.push(code_point);
    }
}

/// Decode the byte slice and classify any error.
///
/// Upon success, this function returns the number of code points pushed into
/// the output. Upon failure, the output holds all code points before the
/// malformed sequence and the [`Error`] describes the sequence.
///
/// # Example
///
/// ```
/// # use utf8dfa::{err::ErrorKind, try_decode};
/// let mut output = String::new();
/// let error = try_decode(b"A\xe0\x80\x80", &mut output).unwrap_err();
///
/// assert_eq!(output, "A");
/// assert_eq!(error.kind(), ErrorKind::InvalidContinuation);
/// assert_eq!(error.valid_up_to(), 1);
/// assert_eq!(error.offset(), 3);
/// ```
pub fn try_decode<O: Sink + ?Sized>(bytes: &[u8], output: &mut O) -> Result<usize, Error> {
    let mut cursor = Cursor::new(bytes);
    let mut counted = Counted {
        inner: output,
        count: 0,
    };

    match run(&mut cursor, &mut counted) {
        Ok(()) => Ok(counted.count),
        Err(Malformed { kind, length }) => {
            let offset = cursor.position();
            Err(Error::new(kind, bytes, offset - length, offset))
        }
    }
}

/// Validate the byte slice and return the number of code points.
pub fn validate(bytes: &[u8]) -> Result<usize, Error> {
    try_decode(bytes, &mut Discard)
}

/// Decode the byte slice into a vector of characters.
pub fn decode_to_vec(bytes: &[u8]) -> Result<Vec<char>, Error> {
    let mut output = Vec::with_capacity(bytes.len());
    try_decode(bytes, &mut output)?;
    Ok(output)
}

/// Decode the byte slice into a string.
pub fn decode_to_string(bytes: &[u8]) -> Result<String, Error> {
    let mut output = String::with_capacity(bytes.len());
    try_decode(bytes, &mut output)?;
    Ok(output)
}
