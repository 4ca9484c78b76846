//! Helper module with utilities for displaying byte strings.

use core::fmt;

/// Nicely format a byte.
///
/// Printable ASCII characters appear as themselves, all other bytes as
/// two-digit hexadecimal numbers in guillemets, e.g., `‹e2›`.
fn format_nicely<W>(byte: u8, output: &mut W) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    match byte {
        b'"' => output.write_str("\\\""),
        0x20..=0x7e => output.write_char(byte as char),
        _ => output.write_fmt(format_args!("‹{:02x}›", byte)),
    }
}

/// A newtype for nicely formatting a byte slice.
struct ByteStringNicely<'a>(&'a [u8]);

impl fmt::Display for ByteStringNicely<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for byte in self.0.iter() {
            format_nicely(*byte, f)?;
        }
        f.write_str("\"")
    }
}

impl fmt::Debug for ByteStringNicely<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Turn the slice into a value that displays nicely.
///
/// # Example
///
/// ```
/// # use utf8dfa::util::nicely_str;
/// assert_eq!(format!("{}", nicely_str(b"a\"\xc3")), "\"a\\\"‹c3›\"");
/// ```
pub fn nicely_str(bytes: &[u8]) -> impl fmt::Debug + fmt::Display + use<'_> {
    ByteStringNicely(bytes)
}

#[cfg(test)]
mod test {
    use super::nicely_str;

    #[test]
    fn test_nicely() {
        assert_eq!(format!("{}", nicely_str(b"")), "\"\"");
        assert_eq!(format!("{}", nicely_str(b"ok")), "\"ok\"");
        assert_eq!(format!("{:?}", nicely_str(b"\x1b[\xed\xa0")), "\"‹1b›[‹ed›‹a0›\"");
        assert_eq!(format!("{}", nicely_str(b"\x7f\x80")), "\"‹7f›‹80›\"");
    }
}
