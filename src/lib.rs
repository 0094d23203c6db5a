#![forbid(unsafe_code)]

//! Pluggable pseudo-random number generation: interchangeable generator
//! backends behind one uniform numeric API.
//!
//! Pick an [Algorithm] (speed-optimized, statistically strong, or the
//! crypto-backed [SecureStream]) and, when the algorithm cannot eat a
//! raw seed directly, a [SeedSource] derivation; the façade exposes the
//! same operations regardless: raw 32-bit draws, bounded integers,
//! single/double floats, byte buffers, state snapshots, reset,
//! skip-ahead and re-seeding.
//!
//! ```
//! use plugrand::{Algorithm, PluggablePrng, SeedSource};
//!
//! let mut prng =
//!     PluggablePrng::with_seed_source(Algorithm::Sfc32, "any seed", SeedSource::Xmur3)?;
//! let byte_count = prng.random_integer((16, 64))?;
//! let bytes = prng.random_bytes(byte_count as usize);
//! assert_eq!(bytes.len() as i64, byte_count);
//! # Ok::<(), plugrand::Error>(())
//! ```
//!
//! Two façades share the surface: [PluggablePrng] never suspends, while
//! [PluggablePrngAsync] hosts the secure backend (and, if wanted, any
//! arithmetic one) behind `async` draws. Identically configured
//! instances produce identical streams, and a state snapshot moved
//! between instances resumes the stream bit-for-bit — including across
//! the three [Pcg32] arithmetic strategies.
//!
//! Apart from [SecureStream], none of the bundled algorithms is
//! cryptographically secure: an observer can reconstruct their state
//! from output. Treat them as statistical tools, not as key material.

mod alea;
mod entropy;
mod error;
mod generator;
mod mulberry32;
mod pcg32;
mod pcg64mix;
mod prng;
mod prng_async;
mod ranges;
mod secure;
mod seed;
mod sfc32;
mod state;
mod uint64;
mod wellons;
mod xmur3;

pub use alea::{Alea, Mash};
#[cfg(unix)]
pub use entropy::DevUrandom;
#[cfg(all(not(unix), feature = "allow-getrandom"))]
pub use entropy::GetRandom;
pub use entropy::{DefaultEntropy, EntropySource, FromRaw, HashMapEntropy};
pub use error::{Error, Result};
pub use generator::{Algorithm, SeedSource};
pub use mulberry32::Mulberry32;
pub use pcg32::{Pcg32, Pcg32Limbs, Pcg32Wide};
pub use pcg64mix::Pcg64Mix;
pub use prng::{PluggablePrng, PrngOptions};
pub use prng_async::{NewSeed, PluggablePrngAsync};
pub use ranges::{FloatSpan, IntegerSpan};
pub use secure::{
    CryptoProvider, SecureKey, SecureKeyDerivation, SecureOptions, SecureStream,
};
pub use seed::Seed;
pub use sfc32::Sfc32;
pub use state::GeneratorState;
pub use uint64::Uint64;
pub use wellons::{IronWellons32, WellonsTriple32};
pub use xmur3::Xmur3;
