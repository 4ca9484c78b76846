use core::iter::Peekable;
use core::slice::Iter;

/// A source of bytes to decode.
///
/// A source is a forward-only cursor. Its end is the point where
/// [`Source::has_next`] returns `false`. The decoder never looks ahead by more
/// than one byte and never rewinds, which is why the two methods suffice.
///
/// This crate implements the trait for [`Cursor`], byte slice iterators,
/// peekable byte iterators, and mutable references to sources. The latter
/// lets a caller keep ownership of a source across several decode calls.
pub trait Source {
    /// Determine whether the source has another byte.
    fn has_next(&mut self) -> bool;

    /// Read the next byte and advance.
    ///
    /// # Panics
    ///
    /// Implementations may panic if the source is exhausted. The decoder only
    /// invokes this method after [`Source::has_next`] returned `true`.
    fn next_byte(&mut self) -> u8;
}

impl<S: Source + ?Sized> Source for &mut S {
    #[inline]
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    #[inline]
    fn next_byte(&mut self) -> u8 {
        (**self).next_byte()
    }
}

impl Source for Iter<'_, u8> {
    #[inline]
    fn has_next(&mut self) -> bool {
        !self.as_slice().is_empty()
    }

    #[inline]
    fn next_byte(&mut self) -> u8 {
        match self.next() {
            Some(byte) => *byte,
            None => panic!("reading past the end of a byte slice"),
        }
    }
}

impl<I: Iterator<Item = u8>> Source for Peekable<I> {
    #[inline]
    fn has_next(&mut self) -> bool {
        self.peek().is_some()
    }

    #[inline]
    fn next_byte(&mut self) -> u8 {
        match self.next() {
            Some(byte) => byte,
            None => panic!("reading past the end of a byte iterator"),
        }
    }
}

// ------------------------------------------------------------------------------------------------

/// A cursor over a byte slice.
///
/// Unlike a slice iterator, a cursor tracks its position, which is the number
/// of bytes read so far. After decoding stops early, the position is just past
/// the byte that revealed the malformed sequence.
///
/// # Example
///
/// ```
/// # use utf8dfa::{decode, Cursor};
/// let mut output = Vec::<u32>::new();
/// let cursor = decode(Cursor::new(b"ok\xffno"), &mut output);
///
/// assert_eq!(cursor.position(), 3);
/// assert_eq!(cursor.remainder(), b"no");
/// assert_eq!(output, [0x6f, 0x6b]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the given bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Create a new cursor at the given position.
    ///
    /// A position beyond the end is clamped to the end.
    pub const fn with_position(bytes: &'a [u8], position: usize) -> Self {
        let position = if position < bytes.len() {
            position
        } else {
            bytes.len()
        };

        Self { bytes, position }
    }

    /// Get the number of bytes read so far.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the underlying bytes.
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Get the bytes not yet read.
    pub fn remainder(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }

    /// Determine whether all bytes have been read.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.bytes.len() <= self.position
    }
}

impl Source for Cursor<'_> {
    #[inline]
    fn has_next(&mut self) -> bool {
        self.position < self.bytes.len()
    }

    #[inline]
    fn next_byte(&mut self) -> u8 {
        let byte = self.bytes[self.position];
        self.position += 1;
        byte
    }
}

// ================================================================================================

/// A sink for decoded code points.
///
/// Code points arrive in the order they appear in the input. The decoder only
/// ever pushes Unicode scalar values, i.e., values up to U+10FFFF that are not
/// surrogates.
pub trait Sink {
    /// Accept the next code point.
    fn push(&mut self, code_point: u32);
}

impl<K: Sink + ?Sized> Sink for &mut K {
    #[inline]
    fn push(&mut self, code_point: u32) {
        (**self).push(code_point)
    }
}

impl Sink for Vec<u32> {
    #[inline]
    fn push(&mut self, code_point: u32) {
        Vec::push(self, code_point)
    }
}

impl Sink for Vec<char> {
    #[inline]
    fn push(&mut self, code_point: u32) {
        Vec::push(self, to_char(code_point))
    }
}

impl Sink for String {
    #[inline]
    fn push(&mut self, code_point: u32) {
        String::push(self, to_char(code_point))
    }
}

/// A sink that forwards code points to a closure.
///
/// # Example
///
/// ```
/// # use utf8dfa::{decode_slice, Emit};
/// let mut total = 0;
/// let stop = decode_slice("añ€".as_bytes(), &mut Emit(|cp: u32| total += cp));
///
/// assert_eq!(stop, 6);
/// assert_eq!(total, 0x61 + 0xf1 + 0x20ac);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Emit<F>(pub F);

impl<F: FnMut(u32)> Sink for Emit<F> {
    #[inline]
    fn push(&mut self, code_point: u32) {
        (self.0)(code_point)
    }
}

/// A sink that drops all code points, for validating only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Discard;

impl Sink for Discard {
    #[inline]
    fn push(&mut self, _code_point: u32) {}
}

/// Convert a decoded code point to a character.
///
/// The automaton only accepts scalar values, so the replacement character
/// never shows up for decoder output.
#[inline]
pub(crate) fn to_char(code_point: u32) -> char {
    char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod test {
    use super::{Cursor, Discard, Emit, Sink, Source};

    fn drain<S: Source>(mut source: S) -> Vec<u8> {
        let mut bytes = Vec::new();
        while source.has_next() {
            bytes.push(source.next_byte());
        }
        bytes
    }

    #[test]
    fn test_sources() {
        assert_eq!(drain(Cursor::new(b"abc")), b"abc");
        assert_eq!(drain(b"abc".iter()), b"abc");
        assert_eq!(drain(b"abc".iter().copied().peekable()), b"abc");

        let mut cursor = Cursor::new(b"abc");
        assert_eq!(cursor.next_byte(), b'a');
        assert_eq!(drain(&mut cursor), b"bc");
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remainder(), b"");
    }

    #[test]
    fn test_cursor_position() {
        let cursor = Cursor::with_position(b"abc", 7);
        assert_eq!(cursor.position(), 3);
        assert!(cursor.is_exhausted());

        let cursor = Cursor::with_position(b"abc", 1);
        assert_eq!(cursor.remainder(), b"bc");
        assert_eq!(cursor.bytes(), b"abc");
    }

    #[test]
    #[should_panic]
    fn test_reading_past_end() {
        let mut iter = b"".iter();
        iter.next_byte();
    }

    #[test]
    fn test_sinks() {
        let mut numbers = Vec::<u32>::new();
        let mut chars = Vec::<char>::new();
        let mut text = String::new();
        let mut count = 0;

        for code_point in [0x41, 0xe9, 0x1f600] {
            Sink::push(&mut numbers, code_point);
            Sink::push(&mut chars, code_point);
            Sink::push(&mut text, code_point);
            Emit(|_: u32| count += 1).push(code_point);
            Discard.push(code_point);
        }

        assert_eq!(numbers, [0x41, 0xe9, 0x1f600]);
        assert_eq!(chars, ['A', 'é', '😀']);
        assert_eq!(text, "Aé😀");
        assert_eq!(count, 3);
    }
}
