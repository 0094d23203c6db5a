#![forbid(unsafe_code)]

//! The blocking composition façade.

use crate::entropy::{DefaultEntropy, EntropySource};
use crate::error::{Error, Result};
use crate::generator::{Algorithm, Generator, SeedSource};
use crate::ranges::{self, FloatSpan, IntegerPlan, IntegerSpan};
use crate::seed::Seed;
use crate::state::GeneratorState;

/// Construction options for [PluggablePrng], the analogue of plugging a
/// generator and a seed derivation into one instance.
///
/// `algorithm` is mandatory; `seed` falls back to [DefaultEntropy] when
/// omitted, and `seed_source` is only needed by algorithms whose seed
/// shape a raw value cannot fill.
#[derive(Clone, Debug, Default)]
pub struct PrngOptions {
    /// Seed for the generator; drawn from [DefaultEntropy] when omitted.
    pub seed: Option<Seed>,
    /// The bit-generator algorithm.
    pub algorithm: Option<Algorithm>,
    /// Optional seed derivation between the seed and the generator.
    pub seed_source: Option<SeedSource>,
}

/// A pluggable pseudo-random number generator: one bit-generator
/// algorithm, optionally seeded through a derivation, behind a uniform
/// numeric API.
///
/// Every operation here returns immediately; the suspension-capable
/// counterpart with the same surface is
/// [PluggablePrngAsync](crate::PluggablePrngAsync). A `PluggablePrng` is
/// a single logical stream: draws take `&mut self` and observe strict
/// program order. Wrap it in a lock if several threads must share one
/// instance; two instances sharing no state need no coordination.
///
/// ```
/// use plugrand::{Algorithm, PluggablePrng, SeedSource};
///
/// let mut prng =
///     PluggablePrng::with_seed_source(Algorithm::Mulberry32, "test", SeedSource::Xmur3)?;
/// assert_eq!(prng.random_u32(), 3288299439);
/// # Ok::<(), plugrand::Error>(())
/// ```
pub struct PluggablePrng {
    generator: Generator,
    algorithm: Algorithm,
    seed_source: Option<SeedSource>,
    initial_state: GeneratorState,
}

impl core::fmt::Debug for PluggablePrng {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PluggablePrng")
            .field("algorithm", &self.algorithm)
            .field("seed_source", &self.seed_source)
            .field("initial_state", &self.initial_state)
            .finish_non_exhaustive()
    }
}

impl PluggablePrng {
    /// Creates a generator from a raw seed, without a seed derivation.
    ///
    /// # Errors
    ///
    /// [Error::InvalidSeed] if the algorithm cannot be seeded from a raw
    /// value (wrong arity or type).
    pub fn new(algorithm: Algorithm, seed: impl Into<Seed>) -> Result<Self> {
        Self::with_options(PrngOptions {
            seed: Some(seed.into()),
            algorithm: Some(algorithm),
            seed_source: None,
        })
    }

    /// Creates a generator whose seed goes through a derivation first.
    ///
    /// # Errors
    ///
    /// [Error::InvalidSeed] if the derivation's word shape does not fit
    /// the algorithm.
    pub fn with_seed_source(
        algorithm: Algorithm,
        seed: impl Into<Seed>,
        seed_source: SeedSource,
    ) -> Result<Self> {
        Self::with_options(PrngOptions {
            seed: Some(seed.into()),
            algorithm: Some(algorithm),
            seed_source: Some(seed_source),
        })
    }

    /// Creates a generator from an options struct.
    ///
    /// # Errors
    ///
    /// [Error::MissingArgument] if no algorithm was chosen, or
    /// [Error::InvalidSeed] if the seed does not fit it.
    pub fn with_options(options: PrngOptions) -> Result<Self> {
        let algorithm = options
            .algorithm
            .ok_or(Error::MissingArgument("algorithm"))?;
        let seed = match options.seed {
            Some(seed) => seed,
            None => Seed::Int(DefaultEntropy::new().seed()),
        };
        let generator = algorithm.construct(&seed, options.seed_source)?;
        let initial_state = generator.export_state();
        Ok(Self {
            generator,
            algorithm,
            seed_source: options.seed_source,
            initial_state,
        })
    }

    /// One raw 32-bit draw, the source of randomness for every other
    /// operation.
    pub fn random_u32(&mut self) -> u32 {
        self.generator.next_u32()
    }

    /// A uniform integer in the span: `()` for the full unsigned 32-bit
    /// range, `max` for 0..=max, `(min, max)` (swapped when inverted) or
    /// `a..b` / `a..=b` sugar.
    ///
    /// Costs one raw draw, plus a second one when the span is wider than
    /// 2^32-1. The reduction is taken modulo the span size, so spans
    /// that do not evenly divide the draw space are slightly biased
    /// towards their low end; this is the documented behavior of the
    /// generator family, accepted here rather than silently replaced by
    /// rejection sampling.
    ///
    /// # Errors
    ///
    /// [Error::RangeTooLarge] when `max - min` exceeds 2^53-1. No draw
    /// is consumed in that case.
    pub fn random_integer(&mut self, span: impl Into<IntegerSpan>) -> Result<i64> {
        match ranges::plan_integer(span.into())? {
            IntegerPlan::Passthrough => Ok(i64::from(self.random_u32())),
            IntegerPlan::Reduce { min, range } => {
                let low = self.random_u32();
                let high = ranges::needs_wide_draw(range).then(|| self.random_u32());
                Ok(ranges::reduce_integer(min, range, low, high))
            }
        }
    }

    /// A double-precision float from two raw draws, every mantissa bit
    /// random: in [0, 1) for `()`, scaled by `max`, or in
    /// [min(a, b), max(a, b)) for a pair or `a..b`.
    pub fn random_float64(&mut self, span: impl Into<FloatSpan>) -> f64 {
        let low = self.random_u32();
        let high = self.random_u32();
        ranges::scale_float(span.into(), ranges::unit_from_draws(low, high))
    }

    /// A single-precision float. The plain `()` form costs one raw draw
    /// scaled by 2^-32; any other span goes through
    /// [random_float64](Self::random_float64) (two draws) and rounds, so
    /// scaling stays consistent across the whole parameter range.
    #[allow(clippy::cast_possible_truncation)]
    pub fn random_float32(&mut self, span: impl Into<FloatSpan>) -> f32 {
        match span.into() {
            FloatSpan::Unit => (f64::from(self.random_u32()) * 2_f64.powi(-32)) as f32,
            span => self.random_float64(span) as f32,
        }
    }

    /// `count` random bytes, from ⌈count/4⌉ raw draws laid out in the
    /// platform's native byte order.
    pub fn random_bytes(&mut self, count: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(count.div_ceil(4) * 4);
        while bytes.len() < count {
            bytes.extend_from_slice(&self.random_u32().to_ne_bytes());
        }
        bytes.truncate(count);
        bytes
    }

    /// A snapshot of the generator state. Seed-derivation state is not
    /// part of it; once seeding is done the stream's determinism lives
    /// in the generator alone.
    #[must_use]
    pub fn export_state(&self) -> GeneratorState {
        self.generator.export_state()
    }

    /// Replaces the generator state with a snapshot.
    ///
    /// # Errors
    ///
    /// [Error::InvalidState] if the snapshot came from a different
    /// variant; the current state is left untouched.
    pub fn import_state(&mut self, state: &GeneratorState) -> Result<()> {
        self.generator.import_state(state)
    }

    /// Rewinds to the state captured when construction completed, so the
    /// instance reproduces its stream from the start. Note that
    /// [change_seed](Self::change_seed) does not move this snapshot.
    pub fn reset(&mut self) {
        let state = self.initial_state.clone();
        self.generator
            .import_state(&state)
            .expect("the construction snapshot matches the generator variant");
    }

    /// Discards `draws` raw draws, in order. Useful to keep two
    /// instances in lockstep.
    pub fn skip_ahead(&mut self, draws: u64) {
        for _ in 0..draws {
            self.random_u32();
        }
    }

    /// Re-seeds in place: builds a fresh generator (through the same
    /// seed derivation, when one is configured) and replaces this
    /// instance's state with it.
    ///
    /// # Errors
    ///
    /// [Error::InvalidSeed] if the new seed does not fit; the current
    /// state is left untouched.
    pub fn change_seed(&mut self, seed: impl Into<Seed>) -> Result<()> {
        self.generator = self.algorithm.construct(&seed.into(), self.seed_source)?;
        Ok(())
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Generator, Algorithm, Option<SeedSource>, GeneratorState) {
        (
            self.generator,
            self.algorithm,
            self.seed_source,
            self.initial_state,
        )
    }
}
