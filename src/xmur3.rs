//! Xmur3 seed hash (from bryc's public domain collection).

/// Hashes a seed's text form into a 32-bit state, then yields as many
/// 32-bit seed words as callers ask for; every [next](Self::next) call
/// runs one more avalanche round, so the output is an infinite hash
/// stream.
pub struct Xmur3 {
    state: u32,
}

impl Xmur3 {
    /// Hashes `text` into the initial state.
    ///
    /// The hash consumes UTF-16 code units so it agrees with
    /// implementations in languages where that is the native string unit.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let units: Vec<u16> = text.encode_utf16().collect();
        #[allow(clippy::cast_possible_truncation)]
        let mut state = 1_779_033_703_u32 ^ units.len() as u32;
        for unit in units {
            state = (state ^ u32::from(unit)).wrapping_mul(3_432_918_353);
            state = state.rotate_left(13);
        }
        Self { state }
    }

    /// The next 32-bit seed word.
    pub fn next(&mut self) -> u32 {
        self.state = (self.state ^ (self.state >> 16)).wrapping_mul(2_246_822_507);
        self.state = (self.state ^ (self.state >> 13)).wrapping_mul(3_266_489_909);
        self.state ^= self.state >> 16;
        self.state
    }
}
