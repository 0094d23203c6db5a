#![forbid(unsafe_code)]

//! The suspension-capable composition façade.
//!
//! Same operation surface as [PluggablePrng](crate::PluggablePrng), with
//! draws that may suspend on the injected crypto provider. Which façade
//! a backend needs is decided at construction, not sniffed at run time:
//! awaiting a constructor here *is* the readiness signal, so every
//! returned instance is ready to draw. Arithmetic backends can also run
//! behind this façade when callers want one shape for both; their draws
//! simply never suspend.

use crate::error::{Error, Result};
use crate::generator::{Algorithm, Generator, SeedSource};
use crate::prng::PluggablePrng;
use crate::ranges::{self, FloatSpan, IntegerPlan, IntegerSpan};
use crate::secure::{CryptoProvider, SecureKeyDerivation, SecureOptions, SecureStream};
use crate::seed::Seed;
use crate::state::GeneratorState;
use std::sync::Arc;

/// Seed argument for [PluggablePrngAsync::change_seed]: either a plain
/// seed value, or the secure seed-plus-salt form.
#[derive(Clone, Debug)]
pub enum NewSeed {
    /// A plain seed. On a secure backend this is treated as secure seed
    /// material without a salt, so the entropy rule applies to it.
    Plain(Seed),
    /// Secure seed material with an optional salt. Only valid on a
    /// secure backend.
    Secure(SecureOptions),
}

impl From<Seed> for NewSeed {
    fn from(seed: Seed) -> Self {
        NewSeed::Plain(seed)
    }
}

impl From<&str> for NewSeed {
    fn from(text: &str) -> Self {
        NewSeed::Plain(Seed::from(text))
    }
}

impl From<String> for NewSeed {
    fn from(text: String) -> Self {
        NewSeed::Plain(Seed::from(text))
    }
}

impl From<u64> for NewSeed {
    fn from(value: u64) -> Self {
        NewSeed::Plain(Seed::from(value))
    }
}

impl From<Vec<u8>> for NewSeed {
    fn from(bytes: Vec<u8>) -> Self {
        NewSeed::Plain(Seed::from(bytes))
    }
}

impl From<SecureOptions> for NewSeed {
    fn from(options: SecureOptions) -> Self {
        NewSeed::Secure(options)
    }
}

enum AsyncBackend {
    Arithmetic {
        generator: Generator,
        algorithm: Algorithm,
        seed_source: Option<SeedSource>,
    },
    Secure(SecureStream),
}

/// The suspension-capable pluggable generator.
///
/// Exposes the same operations as [PluggablePrng](crate::PluggablePrng);
/// draws are `async` because the secure backend must wait on the
/// external crypto service, and they return `Result` because that
/// service can fail. Draws from one instance observe strict program
/// order; suspension never reorders or interleaves them.
pub struct PluggablePrngAsync {
    backend: AsyncBackend,
    initial_state: GeneratorState,
}

impl core::fmt::Debug for PluggablePrngAsync {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PluggablePrngAsync")
            .field("initial_state", &self.initial_state)
            .finish_non_exhaustive()
    }
}

impl PluggablePrngAsync {
    /// Builds the secure generator: derives a key from the seed material
    /// (validating the entropy rule) through the injected provider, then
    /// wraps it in a counter-mode stream.
    ///
    /// # Errors
    ///
    /// [Error::InsufficientEntropy] for a weak seed/salt pair, or any
    /// provider failure.
    pub async fn new_secure(
        provider: Arc<dyn CryptoProvider>,
        options: SecureOptions,
    ) -> Result<Self> {
        let key = SecureKeyDerivation::new(options)
            .derive(provider.as_ref())
            .await?;
        let stream = SecureStream::new(provider, key);
        let initial_state = stream.export_state();
        Ok(Self {
            backend: AsyncBackend::Secure(stream),
            initial_state,
        })
    }

    /// Hosts a blocking generator behind the suspension-capable surface,
    /// for callers that want one shape regardless of backend.
    #[must_use]
    pub fn from_sync(prng: PluggablePrng) -> Self {
        let (generator, algorithm, seed_source, initial_state) = prng.into_parts();
        Self {
            backend: AsyncBackend::Arithmetic {
                generator,
                algorithm,
                seed_source,
            },
            initial_state,
        }
    }

    /// One raw 32-bit draw.
    ///
    /// # Errors
    ///
    /// Provider failures on the secure backend; arithmetic backends
    /// never fail. A failed draw does not advance the stream.
    pub async fn random_u32(&mut self) -> Result<u32> {
        match &mut self.backend {
            AsyncBackend::Arithmetic { generator, .. } => Ok(generator.next_u32()),
            AsyncBackend::Secure(stream) => stream.next_u32().await,
        }
    }

    /// A uniform integer in the span; same contract (and documented
    /// modulo bias) as the blocking façade.
    ///
    /// # Errors
    ///
    /// [Error::RangeTooLarge] before any draw, or a provider failure.
    pub async fn random_integer(&mut self, span: impl Into<IntegerSpan>) -> Result<i64> {
        match ranges::plan_integer(span.into())? {
            IntegerPlan::Passthrough => Ok(i64::from(self.random_u32().await?)),
            IntegerPlan::Reduce { min, range } => {
                let low = self.random_u32().await?;
                let high = if ranges::needs_wide_draw(range) {
                    Some(self.random_u32().await?)
                } else {
                    None
                };
                Ok(ranges::reduce_integer(min, range, low, high))
            }
        }
    }

    /// A double-precision float from two raw draws.
    ///
    /// # Errors
    ///
    /// Provider failures on the secure backend.
    pub async fn random_float64(&mut self, span: impl Into<FloatSpan>) -> Result<f64> {
        let low = self.random_u32().await?;
        let high = self.random_u32().await?;
        Ok(ranges::scale_float(
            span.into(),
            ranges::unit_from_draws(low, high),
        ))
    }

    /// A single-precision float; one draw for the plain form, two for
    /// any other span (via the f64 path), as in the blocking façade.
    ///
    /// # Errors
    ///
    /// Provider failures on the secure backend.
    #[allow(clippy::cast_possible_truncation)]
    pub async fn random_float32(&mut self, span: impl Into<FloatSpan>) -> Result<f32> {
        match span.into() {
            FloatSpan::Unit => Ok((f64::from(self.random_u32().await?) * 2_f64.powi(-32)) as f32),
            span => Ok(self.random_float64(span).await? as f32),
        }
    }

    /// `count` random bytes in the platform's native byte order.
    ///
    /// # Errors
    ///
    /// Provider failures on the secure backend.
    pub async fn random_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(count.div_ceil(4) * 4);
        while bytes.len() < count {
            let word = self.random_u32().await?;
            bytes.extend_from_slice(&word.to_ne_bytes());
        }
        bytes.truncate(count);
        Ok(bytes)
    }

    /// A snapshot of the backend state.
    #[must_use]
    pub fn export_state(&self) -> GeneratorState {
        match &self.backend {
            AsyncBackend::Arithmetic { generator, .. } => generator.export_state(),
            AsyncBackend::Secure(stream) => stream.export_state(),
        }
    }

    /// Replaces the backend state with a snapshot.
    ///
    /// # Errors
    ///
    /// [Error::InvalidState] for a snapshot from a different variant.
    pub fn import_state(&mut self, state: &GeneratorState) -> Result<()> {
        match &mut self.backend {
            AsyncBackend::Arithmetic { generator, .. } => generator.import_state(state),
            AsyncBackend::Secure(stream) => stream.import_state(state),
        }
    }

    /// Rewinds to the state captured when construction completed.
    pub fn reset(&mut self) {
        let state = self.initial_state.clone();
        self.import_state(&state)
            .expect("the construction snapshot matches the backend variant");
    }

    /// Discards `draws` raw draws, in order.
    ///
    /// # Errors
    ///
    /// Provider failures on the secure backend.
    pub async fn skip_ahead(&mut self, draws: u64) -> Result<()> {
        for _ in 0..draws {
            self.random_u32().await?;
        }
        Ok(())
    }

    /// Re-seeds in place. A secure backend re-derives its key (the
    /// whole operation suspends); an arithmetic backend rebuilds its
    /// generator through its configured derivation.
    ///
    /// # Errors
    ///
    /// [Error::InvalidSeed] / [Error::InsufficientEntropy] if the new
    /// seed does not fit the backend; the current state is left
    /// untouched.
    pub async fn change_seed(&mut self, seed: impl Into<NewSeed>) -> Result<()> {
        match (&mut self.backend, seed.into()) {
            (
                AsyncBackend::Arithmetic {
                    generator,
                    algorithm,
                    seed_source,
                },
                NewSeed::Plain(seed),
            ) => {
                *generator = algorithm.construct(&seed, *seed_source)?;
                Ok(())
            }
            (AsyncBackend::Arithmetic { .. }, NewSeed::Secure(_)) => Err(Error::InvalidSeed {
                reason: "the secure seed form only applies to the secure generator".to_string(),
            }),
            (AsyncBackend::Secure(stream), seed) => {
                let options = match seed {
                    NewSeed::Plain(seed) => SecureOptions {
                        seed: Some(seed),
                        salt: None,
                    },
                    NewSeed::Secure(options) => options,
                };
                let provider = stream.provider();
                let key = SecureKeyDerivation::new(options)
                    .derive(provider.as_ref())
                    .await?;
                *stream = SecureStream::new(provider, key);
                Ok(())
            }
        }
    }
}
