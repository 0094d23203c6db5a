#![forbid(unsafe_code)]

//! The Alea generator and its Mash companion hash (Johannes Baagøe's
//! algorithms).
//!
//! Alea runs entirely in double-precision floats: its state is three
//! fractional accumulators, each an exact multiple of 2^-32 in [0,1),
//! plus a small integer carry. Raw seeds are not directly usable as
//! fractional accumulators, which is why the generator pairs with the
//! Mash-based seeder below.

use crate::seed::Seed;

const TWO_POW_32: f64 = 4_294_967_296.0;

// Truncation modulo 2^32 of a non-negative value, the float-to-uint32
// coercion the reference recurrences are written against.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn trunc_u32(value: f64) -> u32 {
    (value as u64 & 0xFFFF_FFFF) as u32
}

/// Baagøe's Mash hash: accumulates a 32-bit state from successive
/// characters of its input through a scaled multiply, and yields a
/// fraction in [0,1) per call. Earlier calls keep influencing later
/// outputs.
pub struct Mash {
    n: f64,
}

impl Mash {
    #[must_use]
    pub fn new() -> Self {
        Self {
            n: f64::from(0xEFC8_249D_u32),
        }
    }

    /// Feeds `data` into the hash and returns the resulting fraction.
    pub fn next(&mut self, data: &str) -> f64 {
        for unit in data.encode_utf16() {
            self.n += f64::from(unit);
            let mut h = 0.02519603282416938 * self.n;
            self.n = f64::from(trunc_u32(h));
            h -= self.n;
            h *= self.n;
            self.n = f64::from(trunc_u32(h));
            h -= self.n;
            // The integer part of h re-enters the state as up to 32 bits
            // while the fractional part survives into the next round.
            self.n += h * TWO_POW_32;
        }
        f64::from(trunc_u32(self.n)) * 2_f64.powi(-32)
    }
}

impl Default for Mash {
    fn default() -> Self {
        Self::new()
    }
}

/// The Alea generator. Construct it through
/// [SeedSource::AleaMash](crate::SeedSource::AleaMash), which fills the
/// three accumulators from the seed via [Mash].
pub struct Alea {
    s0: f64,
    s1: f64,
    s2: f64,
    c: f64,
}

impl Alea {
    /// Seeds the three accumulators by successive subtraction of Mash
    /// outputs, reducing back into [0,1) whenever an accumulator goes
    /// negative.
    #[must_use]
    pub fn from_seed(seed: &Seed) -> Self {
        let text = seed.canonical_text();
        let mut mash = Mash::new();
        let mut s0 = mash.next(" ");
        let mut s1 = mash.next(" ");
        let mut s2 = mash.next(" ");
        let c = 1.0;
        s0 -= mash.next(&text);
        if s0 < 0.0 {
            s0 += 1.0;
        }
        s1 -= mash.next(&text);
        if s1 < 0.0 {
            s1 += 1.0;
        }
        s2 -= mash.next(&text);
        if s2 < 0.0 {
            s2 += 1.0;
        }
        Self { s0, s1, s2, c }
    }

    /// One step of the recurrence, scaled to an unsigned 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        // The carry re-enters as the low 32 fraction bits of t; the
        // integer part of t becomes the next carry.
        let t = self.s0 * 2_091_639.0 + self.c * 2_f64.powi(-32);
        self.s0 = self.s1;
        self.s1 = self.s2;
        self.c = t.trunc();
        self.s2 = t - self.c;
        trunc_u32(self.s2 * TWO_POW_32)
    }

    // Accumulators are exact multiples of 2^-32, so scaling by 2^32 is
    // lossless; the carry stays far below 2^32.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn state(&self) -> (u32, u32, u32, u32) {
        (
            trunc_u32(self.s0 * TWO_POW_32),
            trunc_u32(self.s1 * TWO_POW_32),
            trunc_u32(self.s2 * TWO_POW_32),
            self.c as u32,
        )
    }

    pub(crate) fn from_state(s0: u32, s1: u32, s2: u32, c: u32) -> Self {
        Self {
            s0: f64::from(s0) * 2_f64.powi(-32),
            s1: f64::from(s1) * 2_f64.powi(-32),
            s2: f64::from(s2) * 2_f64.powi(-32),
            c: f64::from(c),
        }
    }
}
