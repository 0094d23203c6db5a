#![forbid(unsafe_code)]

//! Unsigned 64-bit arithmetic over four 16-bit limbs.
//!
//! [Uint64] keeps every intermediate product of its schoolbook
//! multiplication within 32 bits, so the same algorithm ports unchanged to
//! hosts whose only exact integer type holds 53 bits. It backs
//! [Pcg32Limbs](crate::Pcg32Limbs), which must stay bit-identical to the
//! native-arithmetic strategy.

/// An unsigned 64-bit value held as four 16-bit limbs, most significant
/// first.
///
/// `Uint64` is `Copy`: every operation consumes its operands by value and
/// returns a fresh value, so no call mutates or aliases a receiver. All
/// operations are total over the 64-bit value space and wrap silently,
/// matching unsigned 64-bit semantics.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Uint64 {
    w48: u16,
    w32: u16,
    w16: u16,
    w00: u16,
}

impl Uint64 {
    /// The value 0.
    pub const ZERO: Self = Self {
        w48: 0,
        w32: 0,
        w16: 0,
        w00: 0,
    };

    /// Builds a value from its high and low 32-bit halves.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_halves(high: u32, low: u32) -> Self {
        Self {
            w48: (high >> 16) as u16,
            w32: high as u16,
            w16: (low >> 16) as u16,
            w00: low as u16,
        }
    }

    /// Wrapping addition.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn add(self, other: Self) -> Self {
        let c00 = u32::from(self.w00) + u32::from(other.w00);
        let c16 = u32::from(self.w16) + u32::from(other.w16) + (c00 >> 16);
        let c32 = u32::from(self.w32) + u32::from(other.w32) + (c16 >> 16);
        let c48 = u32::from(self.w48) + u32::from(other.w48) + (c32 >> 16);
        Self {
            w48: c48 as u16,
            w32: c32 as u16,
            w16: c16 as u16,
            w00: c00 as u16,
        }
    }

    /// Wrapping multiplication, by the four-limb schoolbook algorithm.
    /// Each partial product is at most 16x16 bits, and carries propagate
    /// limb by limb, so no intermediate exceeds 32 bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn mul(self, other: Self) -> Self {
        let (a0, a1, a2, a3) = (
            u32::from(self.w00),
            u32::from(self.w16),
            u32::from(self.w32),
            u32::from(self.w48),
        );
        let (b0, b1, b2, b3) = (
            u32::from(other.w00),
            u32::from(other.w16),
            u32::from(other.w32),
            u32::from(other.w48),
        );

        let c00 = a0 * b0;

        let mut c16 = c00 >> 16;
        c16 += a0 * b1;
        let mut c32 = c16 >> 16;
        c16 &= 0xFFFF;
        c16 += a1 * b0;

        c32 += c16 >> 16;
        c32 += a0 * b2;
        let mut c48 = c32 >> 16;
        c32 &= 0xFFFF;
        c32 += a1 * b1;
        c48 += c32 >> 16;
        c32 &= 0xFFFF;
        c32 += a2 * b0;

        c48 += c32 >> 16;
        // The most significant limb needs no carry out; anything past
        // bit 63 wraps away.
        c48 &= 0xFFFF;
        c48 += a0 * b3;
        c48 &= 0xFFFF;
        c48 += a1 * b2;
        c48 &= 0xFFFF;
        c48 += a2 * b1;
        c48 &= 0xFFFF;
        c48 += a3 * b0;

        Self {
            w48: c48 as u16,
            w32: c32 as u16,
            w16: c16 as u16,
            w00: c00 as u16,
        }
    }

    /// Limb-wise exclusive or.
    #[must_use]
    pub fn xor(self, other: Self) -> Self {
        Self {
            w48: self.w48 ^ other.w48,
            w32: self.w32 ^ other.w32,
            w16: self.w16 ^ other.w16,
            w00: self.w00 ^ other.w00,
        }
    }

    /// Limb-wise or.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            w48: self.w48 | other.w48,
            w32: self.w32 | other.w32,
            w16: self.w16 | other.w16,
            w00: self.w00 | other.w00,
        }
    }

    /// Limb-wise and.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self {
            w48: self.w48 & other.w48,
            w32: self.w32 & other.w32,
            w16: self.w16 & other.w16,
            w00: self.w00 & other.w00,
        }
    }

    /// Logical right shift by 0-63 bits. Shifts of 64 or more yield 0.
    /// Shifts at limb boundaries reduce to a limb copy.
    #[must_use]
    pub fn shr(self, bits: u32) -> Self {
        if bits == 0 {
            return self;
        }
        if bits >= 64 {
            return Self::ZERO;
        }
        let limb_shift = (bits / 16) as usize;
        let bit_shift = bits % 16;
        let src = [self.w48, self.w32, self.w16, self.w00];
        let mut out = [0_u16; 4];
        if bit_shift == 0 {
            for slot in limb_shift..4 {
                out[slot] = src[slot - limb_shift];
            }
        } else {
            for slot in limb_shift..4 {
                let from = slot - limb_shift;
                let mut limb = src[from] >> bit_shift;
                if from > 0 {
                    limb |= src[from - 1] << (16 - bit_shift);
                }
                out[slot] = limb;
            }
        }
        Self {
            w48: out[0],
            w32: out[1],
            w16: out[2],
            w00: out[3],
        }
    }

    /// Logical left shift by 0-63 bits. Shifts of 64 or more yield 0.
    /// Shifts at limb boundaries reduce to a limb copy.
    #[must_use]
    pub fn shl(self, bits: u32) -> Self {
        if bits == 0 {
            return self;
        }
        if bits >= 64 {
            return Self::ZERO;
        }
        let limb_shift = (bits / 16) as usize;
        let bit_shift = bits % 16;
        let src = [self.w48, self.w32, self.w16, self.w00];
        let mut out = [0_u16; 4];
        if bit_shift == 0 {
            for slot in 0..4 - limb_shift {
                out[slot] = src[slot + limb_shift];
            }
        } else {
            for slot in 0..4 - limb_shift {
                let from = slot + limb_shift;
                let mut limb = src[from] << bit_shift;
                if from + 1 < 4 {
                    limb |= src[from + 1] >> (16 - bit_shift);
                }
                out[slot] = limb;
            }
        }
        Self {
            w48: out[0],
            w32: out[1],
            w16: out[2],
            w00: out[3],
        }
    }

    /// The low 32 bits.
    #[must_use]
    pub fn low32(self) -> u32 {
        (u32::from(self.w16) << 16) | u32::from(self.w00)
    }

    /// The high 32 bits.
    #[must_use]
    pub fn high32(self) -> u32 {
        (u32::from(self.w48) << 16) | u32::from(self.w32)
    }
}

impl From<u64> for Uint64 {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: u64) -> Self {
        Self {
            w48: (value >> 48) as u16,
            w32: (value >> 32) as u16,
            w16: (value >> 16) as u16,
            w00: value as u16,
        }
    }
}

impl From<Uint64> for u64 {
    fn from(value: Uint64) -> Self {
        (u64::from(value.w48) << 48)
            | (u64::from(value.w32) << 32)
            | (u64::from(value.w16) << 16)
            | u64::from(value.w00)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: u64 = 0x0123_4567_89AB_CDEF;
    const B: u64 = 0xFEDC_BA98_7654_3210;

    #[test]
    fn round_trips_u64() {
        for value in [0, 1, 0xFFFF, A, B, u64::MAX] {
            assert_eq!(u64::from(Uint64::from(value)), value);
        }
    }

    #[test]
    fn from_halves_matches_from_u64() {
        assert_eq!(Uint64::from_halves(0x0123_4567, 0x89AB_CDEF), Uint64::from(A));
    }

    #[test]
    fn add_wraps_like_u64() {
        assert_eq!(
            u64::from(Uint64::from(A).add(Uint64::from(B))),
            0xFFFF_FFFF_FFFF_FFFF
        );
        assert_eq!(
            u64::from(Uint64::from(u64::MAX).add(Uint64::from(2_u64))),
            1
        );
    }

    #[test]
    fn mul_wraps_like_u64() {
        assert_eq!(
            u64::from(Uint64::from(A).mul(Uint64::from(B))),
            0x2236_D88F_E561_8CF0
        );
        assert_eq!(
            u64::from(Uint64::from(u64::MAX).mul(Uint64::from(u64::MAX))),
            u64::MAX.wrapping_mul(u64::MAX)
        );
    }

    #[test]
    fn shifts_match_known_values() {
        assert_eq!(u64::from(Uint64::from(A).shr(13)), 0x0000_091A_2B3C_4D5E);
        assert_eq!(u64::from(Uint64::from(A).shl(13)), 0x68AC_F135_79BD_E000);
    }

    #[test]
    fn every_shift_amount_matches_native() {
        let samples = [A, B, 1, 0x8000_0000_0000_0001, u64::MAX];
        for value in samples {
            let limbs = Uint64::from(value);
            for bits in 0..64 {
                assert_eq!(u64::from(limbs.shr(bits)), value >> bits, "shr {bits}");
                assert_eq!(u64::from(limbs.shl(bits)), value << bits, "shl {bits}");
            }
            assert_eq!(u64::from(limbs.shr(64)), 0);
            assert_eq!(u64::from(limbs.shl(64)), 0);
        }
    }

    #[test]
    fn arithmetic_matches_native_on_sample_grid() {
        let samples = [0, 1, 0xFFFF, 0x1_0000, A, B, u64::MAX - 1, u64::MAX];
        for &x in &samples {
            for &y in &samples {
                let (u, v) = (Uint64::from(x), Uint64::from(y));
                assert_eq!(u64::from(u.add(v)), x.wrapping_add(y));
                assert_eq!(u64::from(u.mul(v)), x.wrapping_mul(y));
                assert_eq!(u64::from(u.xor(v)), x ^ y);
                assert_eq!(u64::from(u.or(v)), x | y);
                assert_eq!(u64::from(u.and(v)), x & y);
            }
        }
    }

    #[test]
    fn narrowing() {
        let value = Uint64::from(A);
        assert_eq!(value.low32(), 0x89AB_CDEF);
        assert_eq!(value.high32(), 0x0123_4567);
    }
}
