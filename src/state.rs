//! Exported generator state snapshots.

use crate::secure::SecureKey;

/// An immutable snapshot of a bit generator's internal state.
///
/// Snapshots are opaque values handed to the caller: export one with
/// [export_state](crate::PluggablePrng::export_state), hold on to it or
/// ship it to another instance of the same variant, and import it to
/// resume the stream bit-for-bit. Import replaces the whole state, never
/// merges.
///
/// The wire shape is a fixed-arity tuple of integers per variant (listed
/// below), so implementations in other languages agree when
/// synchronizing instances across a process boundary. With the `serde`
/// feature the snapshot serializes directly.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneratorState {
    /// Alea: the three fractional accumulators scaled by 2^32 (the
    /// scaling is lossless, accumulators are multiples of 2^-32), plus
    /// the integer carry.
    Alea { s0: u32, s1: u32, s2: u32, c: u32 },
    /// Mulberry32: the single state word.
    Mulberry32 { state: u32 },
    /// IronWellons32: the single state word.
    IronWellons32 { state: u32 },
    /// WellonsTriple32: the single state word.
    WellonsTriple32 { state: u32 },
    /// Sfc32: the three state words and the draw counter.
    Sfc32 { a: u32, b: u32, c: u32, counter: u32 },
    /// Pcg32, any arithmetic strategy: the 64-bit state and the odd
    /// increment. Snapshots move freely between the three strategies.
    Pcg32 { state: u64, increment: u64 },
    /// SecureStream: the opaque key, the 128-bit block counter and the
    /// index of the next word within the buffered block.
    Secure {
        key: SecureKey,
        counter: u128,
        word_index: u32,
    },
}

impl GeneratorState {
    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            GeneratorState::Alea { .. } => "Alea",
            GeneratorState::Mulberry32 { .. } => "Mulberry32",
            GeneratorState::IronWellons32 { .. } => "IronWellons32",
            GeneratorState::WellonsTriple32 { .. } => "WellonsTriple32",
            GeneratorState::Sfc32 { .. } => "Sfc32",
            GeneratorState::Pcg32 { .. } => "Pcg32",
            GeneratorState::Secure { .. } => "SecureStream",
        }
    }
}
