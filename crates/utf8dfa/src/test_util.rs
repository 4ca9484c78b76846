use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Create a random byte string that is mostly, but not always, UTF-8.
///
/// Pure noise is malformed within a few bytes. Mixing encoded scalar values,
/// ASCII, and the occasional random byte exercises all paths through the
/// automaton.
pub(crate) fn random_input<R: Rng>(rng: &mut R) -> Vec<u8> {
    let scalar = Uniform::new_inclusive(0_u32, 0x10ffff).unwrap();
    let mut bytes = Vec::new();
    let mut buffer = [0; 4];

    for _ in 0..rng.random_range(0..24) {
        match rng.random_range(0..10) {
            0 => bytes.push(rng.random::<u8>()),
            1..=3 => bytes.push(rng.random_range(0..0x80)),
            _ => {
                if let Some(c) = char::from_u32(scalar.sample(rng)) {
                    bytes.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
                }
            }
        }
    }

    if !bytes.is_empty() && rng.random_bool(0.2) {
        bytes.pop();
    }
    bytes
}
