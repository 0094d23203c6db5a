//! The closed variant sets: algorithms, seed derivations, and the
//! dispatch over a constructed generator.

use crate::alea::Alea;
use crate::error::{Error, Result};
use crate::mulberry32::Mulberry32;
use crate::pcg32::{Pcg32, Pcg32Limbs, Pcg32Wide};
use crate::pcg64mix::Pcg64Mix;
use crate::seed::Seed;
use crate::sfc32::Sfc32;
use crate::state::GeneratorState;
use crate::wellons::{IronWellons32, WellonsTriple32};
use crate::xmur3::Xmur3;

/// The closed set of bit-generator algorithms.
///
/// Each variant declares how many seed words it consumes from a
/// derivation through [seeds_needed](Self::seeds_needed).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Algorithm {
    /// Baagøe's Alea. Requires [SeedSource::AleaMash]; raw seeds cannot
    /// fill its fractional accumulators.
    Alea,
    /// Ettinger's Mulberry32; one 32-bit seed word.
    Mulberry32,
    /// Doty-Humphrey's Sfc32; three 32-bit seed words.
    Sfc32,
    /// PCG-XSH-RR 64/32 over native 64-bit arithmetic; two 64-bit seed
    /// words (state, stream variant).
    Pcg32,
    /// The same PCG recurrence over four 16-bit limbs. Output is
    /// bit-identical to [Algorithm::Pcg32].
    Pcg32Limbs,
    /// The same PCG recurrence over masked 128-bit arithmetic. Output is
    /// bit-identical to [Algorithm::Pcg32].
    Pcg32Wide,
    /// The two-round hash-prospector mixer; one 32-bit seed word.
    IronWellons32,
    /// Wellons' triple32 mixer; one 32-bit seed word.
    WellonsTriple32,
}

/// The closed set of seed derivations, turning an arbitrary [Seed] into
/// the word shape an algorithm needs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SeedSource {
    /// Xmur3 text hash; yields 32-bit seed words.
    Xmur3,
    /// Mash-based derivation filling Alea's fractional accumulators.
    AleaMash,
    /// 64-bit PCG fold; yields 64-bit seed words.
    Pcg64Mix,
}

impl Algorithm {
    /// The number of seed words the variant consumes from a derivation.
    #[must_use]
    pub fn seeds_needed(self) -> usize {
        match self {
            Algorithm::Sfc32 => 3,
            Algorithm::Pcg32 | Algorithm::Pcg32Limbs | Algorithm::Pcg32Wide => 2,
            _ => 1,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Algorithm::Alea => "Alea",
            Algorithm::Mulberry32 => "Mulberry32",
            Algorithm::Sfc32 => "Sfc32",
            Algorithm::Pcg32 => "Pcg32",
            Algorithm::Pcg32Limbs => "Pcg32Limbs",
            Algorithm::Pcg32Wide => "Pcg32Wide",
            Algorithm::IronWellons32 => "IronWellons32",
            Algorithm::WellonsTriple32 => "WellonsTriple32",
        }
    }

    /// Builds a generator from the seed, going through `source` when one
    /// is configured.
    pub(crate) fn construct(self, seed: &Seed, source: Option<SeedSource>) -> Result<Generator> {
        match source {
            None => self.construct_raw(seed),
            Some(SeedSource::AleaMash) => {
                if self == Algorithm::Alea {
                    Ok(Generator::Alea(Alea::from_seed(seed)))
                } else {
                    Err(Error::InvalidSeed {
                        reason: format!(
                            "{} cannot use the Mash derivation; its output only fits Alea's fractional accumulators",
                            self.name()
                        ),
                    })
                }
            }
            Some(SeedSource::Xmur3) => {
                let mut hash = Xmur3::new(&seed.canonical_text());
                self.construct_from_u32_words(&mut || hash.next())
            }
            Some(SeedSource::Pcg64Mix) => {
                let mut mix = Pcg64Mix::new(&seed.canonical_text());
                self.construct_from_u64_words(&mut || mix.next())
            }
        }
    }

    // Construction without a derivation: only the one-word 32-bit
    // generators accept a raw integer seed (truncated modulo 2^32, as the
    // reference implementation coerces).
    #[allow(clippy::cast_possible_truncation)]
    fn construct_raw(self, seed: &Seed) -> Result<Generator> {
        let value = match seed {
            Seed::Int(value) => *value,
            _ => {
                return Err(Error::InvalidSeed {
                    reason: format!(
                        "{} requires an integer seed or a seed derivation, got {seed:?}",
                        self.name()
                    ),
                })
            }
        };
        match self {
            Algorithm::Mulberry32 => Ok(Generator::Mulberry32(Mulberry32::new(value as u32))),
            Algorithm::IronWellons32 => Ok(Generator::IronWellons32(IronWellons32::new(value as u32))),
            Algorithm::WellonsTriple32 => {
                Ok(Generator::WellonsTriple32(WellonsTriple32::new(value as u32)))
            }
            Algorithm::Alea => Err(Error::InvalidSeed {
                reason: "Alea requires the Mash seed derivation (SeedSource::AleaMash)".to_string(),
            }),
            Algorithm::Sfc32 | Algorithm::Pcg32 | Algorithm::Pcg32Limbs | Algorithm::Pcg32Wide => {
                Err(Error::InvalidSeed {
                    reason: format!(
                        "{} requires {} seed words; use a seed derivation",
                        self.name(),
                        self.seeds_needed()
                    ),
                })
            }
        }
    }

    fn construct_from_u32_words(self, next: &mut dyn FnMut() -> u32) -> Result<Generator> {
        match self {
            Algorithm::Mulberry32 => Ok(Generator::Mulberry32(Mulberry32::new(next()))),
            Algorithm::IronWellons32 => Ok(Generator::IronWellons32(IronWellons32::new(next()))),
            Algorithm::WellonsTriple32 => {
                Ok(Generator::WellonsTriple32(WellonsTriple32::new(next())))
            }
            Algorithm::Sfc32 => Ok(Generator::Sfc32(Sfc32::new(next(), next(), next()))),
            Algorithm::Pcg32 => Ok(Generator::Pcg32(Pcg32::new(
                u64::from(next()),
                u64::from(next()),
            ))),
            Algorithm::Pcg32Limbs => Ok(Generator::Pcg32Limbs(Pcg32Limbs::new(
                u64::from(next()),
                u64::from(next()),
            ))),
            Algorithm::Pcg32Wide => Ok(Generator::Pcg32Wide(Pcg32Wide::new(
                u64::from(next()),
                u64::from(next()),
            ))),
            Algorithm::Alea => Err(Error::InvalidSeed {
                reason: "Alea requires the Mash seed derivation (SeedSource::AleaMash)".to_string(),
            }),
        }
    }

    fn construct_from_u64_words(self, next: &mut dyn FnMut() -> u64) -> Result<Generator> {
        match self {
            Algorithm::Pcg32 => Ok(Generator::Pcg32(Pcg32::new(next(), next()))),
            Algorithm::Pcg32Limbs => Ok(Generator::Pcg32Limbs(Pcg32Limbs::new(next(), next()))),
            Algorithm::Pcg32Wide => Ok(Generator::Pcg32Wide(Pcg32Wide::new(next(), next()))),
            Algorithm::Alea => Err(Error::InvalidSeed {
                reason: "Alea requires the Mash seed derivation (SeedSource::AleaMash)".to_string(),
            }),
            Algorithm::Mulberry32
            | Algorithm::Sfc32
            | Algorithm::IronWellons32
            | Algorithm::WellonsTriple32 => Err(Error::InvalidSeed {
                reason: format!(
                    "{} requires 32-bit seed words, but the Pcg64Mix derivation yields 64-bit words",
                    self.name()
                ),
            }),
        }
    }
}

// The constructed generator behind a façade. One case per algorithm,
// dispatched through fixed match arms.
pub(crate) enum Generator {
    Alea(Alea),
    Mulberry32(Mulberry32),
    Sfc32(Sfc32),
    Pcg32(Pcg32),
    Pcg32Limbs(Pcg32Limbs),
    Pcg32Wide(Pcg32Wide),
    IronWellons32(IronWellons32),
    WellonsTriple32(WellonsTriple32),
}

impl core::fmt::Debug for Generator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Generator::Alea(_) => "Alea",
            Generator::Mulberry32(_) => "Mulberry32",
            Generator::Sfc32(_) => "Sfc32",
            Generator::Pcg32(_) => "Pcg32",
            Generator::Pcg32Limbs(_) => "Pcg32Limbs",
            Generator::Pcg32Wide(_) => "Pcg32Wide",
            Generator::IronWellons32(_) => "IronWellons32",
            Generator::WellonsTriple32(_) => "WellonsTriple32",
        };
        f.debug_tuple(name).finish()
    }
}

impl Generator {
    pub(crate) fn next_u32(&mut self) -> u32 {
        match self {
            Generator::Alea(rng) => rng.next_u32(),
            Generator::Mulberry32(rng) => rng.next_u32(),
            Generator::Sfc32(rng) => rng.next_u32(),
            Generator::Pcg32(rng) => rng.next_u32(),
            Generator::Pcg32Limbs(rng) => rng.next_u32(),
            Generator::Pcg32Wide(rng) => rng.next_u32(),
            Generator::IronWellons32(rng) => rng.next_u32(),
            Generator::WellonsTriple32(rng) => rng.next_u32(),
        }
    }

    pub(crate) fn export_state(&self) -> GeneratorState {
        match self {
            Generator::Alea(rng) => {
                let (s0, s1, s2, c) = rng.state();
                GeneratorState::Alea { s0, s1, s2, c }
            }
            Generator::Mulberry32(rng) => GeneratorState::Mulberry32 { state: rng.state() },
            Generator::Sfc32(rng) => {
                let (a, b, c, counter) = rng.state();
                GeneratorState::Sfc32 { a, b, c, counter }
            }
            Generator::Pcg32(rng) => {
                let (state, increment) = rng.state();
                GeneratorState::Pcg32 { state, increment }
            }
            Generator::Pcg32Limbs(rng) => {
                let (state, increment) = rng.state();
                GeneratorState::Pcg32 { state, increment }
            }
            Generator::Pcg32Wide(rng) => {
                let (state, increment) = rng.state();
                GeneratorState::Pcg32 { state, increment }
            }
            Generator::IronWellons32(rng) => GeneratorState::IronWellons32 { state: rng.state() },
            Generator::WellonsTriple32(rng) => {
                GeneratorState::WellonsTriple32 { state: rng.state() }
            }
        }
    }

    pub(crate) fn import_state(&mut self, state: &GeneratorState) -> Result<()> {
        match (&mut *self, state) {
            (Generator::Alea(rng), GeneratorState::Alea { s0, s1, s2, c }) => {
                *rng = Alea::from_state(*s0, *s1, *s2, *c);
            }
            (Generator::Mulberry32(rng), GeneratorState::Mulberry32 { state }) => {
                *rng = Mulberry32::from_state(*state);
            }
            (Generator::Sfc32(rng), GeneratorState::Sfc32 { a, b, c, counter }) => {
                *rng = Sfc32::from_state(*a, *b, *c, *counter);
            }
            (Generator::Pcg32(rng), GeneratorState::Pcg32 { state, increment }) => {
                *rng = Pcg32::from_state(*state, *increment);
            }
            (Generator::Pcg32Limbs(rng), GeneratorState::Pcg32 { state, increment }) => {
                *rng = Pcg32Limbs::from_state(*state, *increment);
            }
            (Generator::Pcg32Wide(rng), GeneratorState::Pcg32 { state, increment }) => {
                *rng = Pcg32Wide::from_state(*state, *increment);
            }
            (Generator::IronWellons32(rng), GeneratorState::IronWellons32 { state }) => {
                *rng = IronWellons32::from_state(*state);
            }
            (Generator::WellonsTriple32(rng), GeneratorState::WellonsTriple32 { state }) => {
                *rng = WellonsTriple32::from_state(*state);
            }
            (generator, state) => {
                return Err(Error::InvalidState {
                    expected: generator.variant_name(),
                    got: state.variant_name(),
                })
            }
        }
        Ok(())
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Generator::Alea(_) => "Alea",
            Generator::Mulberry32(_) => "Mulberry32",
            Generator::Sfc32(_) => "Sfc32",
            Generator::Pcg32(_) | Generator::Pcg32Limbs(_) | Generator::Pcg32Wide(_) => "Pcg32",
            Generator::IronWellons32(_) => "IronWellons32",
            Generator::WellonsTriple32(_) => "WellonsTriple32",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_needed_per_variant() {
        assert_eq!(Algorithm::Alea.seeds_needed(), 1);
        assert_eq!(Algorithm::Mulberry32.seeds_needed(), 1);
        assert_eq!(Algorithm::Sfc32.seeds_needed(), 3);
        assert_eq!(Algorithm::Pcg32.seeds_needed(), 2);
        assert_eq!(Algorithm::Pcg32Limbs.seeds_needed(), 2);
        assert_eq!(Algorithm::Pcg32Wide.seeds_needed(), 2);
    }

    #[test]
    fn raw_integer_seeds_truncate_for_one_word_generators() {
        let seed = Seed::Int(0x1_0000_002A);
        let mut wide = Algorithm::Mulberry32.construct(&seed, None).unwrap();
        let mut narrow = Algorithm::Mulberry32
            .construct(&Seed::Int(0x2A), None)
            .unwrap();
        assert_eq!(wide.next_u32(), narrow.next_u32());
    }

    #[test]
    fn raw_seeds_reject_wrong_arity() {
        let seed = Seed::Int(42);
        for algorithm in [Algorithm::Sfc32, Algorithm::Pcg32, Algorithm::Alea] {
            let err = algorithm.construct(&seed, None).unwrap_err();
            assert!(matches!(err, Error::InvalidSeed { .. }), "{algorithm:?}");
        }
    }

    #[test]
    fn raw_text_seeds_are_rejected() {
        let err = Algorithm::Mulberry32
            .construct(&Seed::from("test"), None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSeed { .. }));
    }

    #[test]
    fn mash_derivation_only_fits_alea() {
        let seed = Seed::from("test");
        assert!(Algorithm::Alea
            .construct(&seed, Some(SeedSource::AleaMash))
            .is_ok());
        let err = Algorithm::Sfc32
            .construct(&seed, Some(SeedSource::AleaMash))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSeed { .. }));
    }

    #[test]
    fn wide_seed_words_do_not_fit_narrow_generators() {
        let err = Algorithm::Mulberry32
            .construct(&Seed::from("test"), Some(SeedSource::Pcg64Mix))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSeed { .. }));
    }

    #[test]
    fn narrow_seed_words_widen_for_pcg32() {
        assert!(Algorithm::Pcg32
            .construct(&Seed::from("test"), Some(SeedSource::Xmur3))
            .is_ok());
    }

    #[test]
    fn pcg32_snapshots_move_between_strategies() {
        let seed = Seed::from("test");
        let mut native = Algorithm::Pcg32
            .construct(&seed, Some(SeedSource::Pcg64Mix))
            .unwrap();
        let mut limbs = Algorithm::Pcg32Limbs
            .construct(&seed, Some(SeedSource::Pcg64Mix))
            .unwrap();
        native.next_u32();
        limbs.import_state(&native.export_state()).unwrap();
        for _ in 0..100 {
            assert_eq!(native.next_u32(), limbs.next_u32());
        }
    }

    #[test]
    fn mismatched_snapshots_are_rejected() {
        let seed = Seed::Int(42);
        let mut mulberry = Algorithm::Mulberry32.construct(&seed, None).unwrap();
        let snapshot = Algorithm::IronWellons32
            .construct(&seed, None)
            .unwrap()
            .export_state();
        let err = mulberry.import_state(&snapshot).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidState {
                expected: "Mulberry32",
                got: "IronWellons32",
            }
        );
    }
}
