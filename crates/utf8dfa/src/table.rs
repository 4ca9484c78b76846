//! Helper module with the decoder's byte classes, states, and lookup tables.
//!
//! The automaton follows Björn Höhrmann's and Bob Steagall's table-driven
//! designs. Every byte maps to one of twelve [`ByteClass`]es. A state's
//! discriminant is a multiple of twelve, so that `state + class` indexes the
//! flattened transition table directly.
//!
//! Use the UTF-8 syntax from [RFC 3629](https://tools.ietf.org/html/rfc3629):
//!
//! ```text
//! UTF8-1      = %x00-7F
//! UTF8-2      = %xC2-DF UTF8-tail
//! UTF8-3      = %xE0 %xA0-BF UTF8-tail / %xE1-EC 2( UTF8-tail ) /
//!               %xED %x80-9F UTF8-tail / %xEE-EF 2( UTF8-tail )
//! UTF8-4      = %xF0 %x90-BF 2( UTF8-tail ) / %xF1-F3 3( UTF8-tail ) /
//!               %xF4 %x80-8F 2( UTF8-tail )
//! ```

/// The class of a byte.
///
/// Continuation bytes are split into three classes so that the restricted
/// states after 0xE0, 0xED, 0xF0, and 0xF4 can reject overlong encodings,
/// surrogates, and code points beyond U+10FFFF.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ByteClass {
    /// 0xC0, 0xC1, and 0xF5–0xFF, which never appear in UTF-8.
    Illegal = 0,
    /// 0x00–0x7F.
    Ascii = 1,
    /// Continuation bytes 0x80–0x8F.
    Cont1 = 2,
    /// Continuation bytes 0x90–0x9F.
    Cont2 = 3,
    /// Continuation bytes 0xA0–0xBF.
    Cont3 = 4,
    /// Leading bytes 0xC2–0xDF of two-byte sequences.
    Lead2 = 5,
    /// Leading byte 0xE0, which requires 0xA0–0xBF next.
    Lead3A = 6,
    /// Leading bytes 0xE1–0xEC and 0xEE–0xEF.
    Lead3B = 7,
    /// Leading byte 0xED, which requires 0x80–0x9F next.
    Lead3C = 8,
    /// Leading byte 0xF0, which requires 0x90–0xBF next.
    Lead4A = 9,
    /// Leading bytes 0xF1–0xF3.
    Lead4B = 10,
    /// Leading byte 0xF4, which requires 0x80–0x8F next.
    Lead4C = 11,
}

/// The number of byte classes, which is also the row width of the transition
/// table.
pub const CLASS_COUNT: usize = 12;

/// The state of the decoding automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum State {
    /// No sequence in progress. Also the accepting state.
    Begin = 0,
    /// Malformed input. This state is absorbing.
    Error = 12,
    /// One continuation byte pending.
    Pending1 = 24,
    /// Two continuation bytes pending.
    Pending2 = 36,
    /// Three continuation bytes pending.
    Pending3 = 48,
    /// After 0xE0, two pending, the next in 0xA0–0xBF.
    Restrict3A = 60,
    /// After 0xED, two pending, the next in 0x80–0x9F.
    Restrict3B = 72,
    /// After 0xF0, three pending, the next in 0x90–0xBF.
    Restrict4A = 84,
    /// After 0xF4, three pending, the next in 0x80–0x8F.
    Restrict4B = 96,
}

impl State {
    /// The state after completing a sequence, which is the same as
    /// [`State::Begin`].
    pub const END: State = State::Begin;

    /// Determine whether this state is waiting for more continuation bytes.
    #[inline]
    pub const fn is_pending(&self) -> bool {
        (*self as u8) > (State::Error as u8)
    }

    /// Determine whether this state accepts, i.e., no sequence is in progress.
    #[inline]
    pub const fn is_accepting(&self) -> bool {
        matches!(*self, State::Begin)
    }
}

// ------------------------------------------------------------------------------------------------

const fn category(byte: u8) -> ByteClass {
    use self::ByteClass::*;

    match byte {
        0x00..=0x7f => Ascii,
        0x80..=0x8f => Cont1,
        0x90..=0x9f => Cont2,
        0xa0..=0xbf => Cont3,
        0xc2..=0xdf => Lead2,
        0xe0 => Lead3A,
        0xe1..=0xec | 0xee..=0xef => Lead3B,
        0xed => Lead3C,
        0xf0 => Lead4A,
        0xf1..=0xf3 => Lead4B,
        0xf4 => Lead4C,
        0xc0 | 0xc1 | 0xf5..=0xff => Illegal,
    }
}

const fn lead(byte: u8) -> (u8, State) {
    use self::State::*;

    match byte {
        0xc2..=0xdf => (byte & 0x1f, Pending1),
        0xe0 => (0x00, Restrict3A),
        0xed => (0x0d, Restrict3B),
        0xe1..=0xef => (byte & 0x0f, Pending2),
        0xf0 => (0x00, Restrict4A),
        0xf4 => (0x04, Restrict4B),
        0xf1..=0xf3 => (byte & 0x07, Pending3),
        _ => (0x00, Error),
    }
}

/// The first byte with an entry in [`INITIAL_STATE`].
pub(crate) const FIRST_LEAD: u8 = 0xc2;

/// The payload bits and state for leading bytes 0xC2–0xFF.
static INITIAL_STATE: [(u8, State); 62] = {
    let mut table = [(0, State::Error); 62];
    let mut index = 0;
    while index < table.len() {
        table[index] = lead(FIRST_LEAD + index as u8);
        index += 1;
    }
    table
};

/// The byte class for every byte.
static OCTET_CATEGORY: [ByteClass; 256] = {
    let mut table = [ByteClass::Illegal; 256];
    let mut index = 0;
    while index < table.len() {
        table[index] = category(index as u8);
        index += 1;
    }
    table
};

/// The flattened transition table, indexed by `state + class`.
#[rustfmt::skip]
static STATE_TRANSITION: [State; 9 * CLASS_COUNT] = {
    use self::State::{
        Begin as END, Error as ERR, Pending1 as PD1, Pending2 as PD2, Pending3 as PD3,
        Restrict3A as R3A, Restrict3B as R3B, Restrict4A as R4A, Restrict4B as R4B,
    };

    [
    //  ILL  ASC  CR1  CR2  CR3  L2   L3A  L3B  L3C  L4A  L4B  L4C
        ERR, END, ERR, ERR, ERR, PD1, R3A, PD2, R3B, R4A, PD3, R4B, // Begin
        ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // Error
        ERR, ERR, END, END, END, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // Pending1
        ERR, ERR, PD1, PD1, PD1, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // Pending2
        ERR, ERR, PD2, PD2, PD2, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // Pending3
        ERR, ERR, ERR, ERR, PD1, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // Restrict3A
        ERR, ERR, PD1, PD1, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // Restrict3B
        ERR, ERR, ERR, PD2, PD2, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // Restrict4A
        ERR, ERR, PD2, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, ERR, // Restrict4B
    ]
};

// ------------------------------------------------------------------------------------------------

/// Look up the class of the given byte.
#[inline]
pub fn classify(byte: u8) -> ByteClass {
    OCTET_CATEGORY[byte as usize]
}

/// Look up the state following the given state upon a byte of the given class.
#[inline]
pub fn transition(state: State, class: ByteClass) -> State {
    STATE_TRANSITION[state as usize + class as usize]
}

/// Look up the payload bits and state for a leading byte.
///
/// Callers must have ruled out bytes below 0xC2 already.
#[inline]
pub(crate) fn initial_state(byte: u8) -> (u8, State) {
    debug_assert!(byte >= FIRST_LEAD, "byte {:#04x} is not a leading byte", byte);
    INITIAL_STATE[(byte - FIRST_LEAD) as usize]
}
