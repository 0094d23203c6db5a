#![allow(clippy::module_name_repetitions)]

//! Entropy sources used to seed a façade when the caller supplies no
//! seed of their own.

#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::io::Read;

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

/// This is a trait for entropy sources, used to produce seeds.
pub trait EntropySource {
    /// Fills an array with random data.
    ///
    /// # Arguments
    ///
    /// * `destination`: The buffer to fill with random data
    ///
    /// # Panics
    ///
    /// May panic if the entropy source is unavailable or broken.
    ///
    fn fill(&mut self, destination: &mut [u8]);

    /// Generates an integer seed value.
    ///
    /// returns: Integer seed
    fn seed<T: FromRaw>(&mut self) -> T
    where
        Self: Sized,
    {
        T::from_raw(self)
    }
}

pub trait FromRaw {
    fn from_raw<T: EntropySource>(entropy_source: &mut T) -> Self;
}

impl FromRaw for u32 {
    fn from_raw<T: EntropySource>(entropy_source: &mut T) -> Self {
        let mut raw = [0; 4];
        entropy_source.fill(&mut raw);
        u32::from_be_bytes(raw)
    }
}

impl FromRaw for u64 {
    fn from_raw<T: EntropySource>(entropy_source: &mut T) -> Self {
        let mut raw = [0; 8];
        entropy_source.fill(&mut raw);
        u64::from_be_bytes(raw)
    }
}

/// This is an alias that maps to `DevUrandom`, `GetRandom` or
/// `HashMapEntropy`, depending on the platform.
#[cfg(unix)]
pub type DefaultEntropy = DevUrandom;
#[cfg(all(not(unix), feature = "allow-getrandom"))]
pub type DefaultEntropy = GetRandom;
#[cfg(all(not(unix), not(feature = "allow-getrandom")))]
pub type DefaultEntropy = HashMapEntropy;

/// This is an entropy source that generates seeds by reading from /dev/urandom
#[cfg(unix)]
pub struct DevUrandom {
    dev_random: File,
}

#[cfg(unix)]
impl DevUrandom {
    /// Creates a new [DevUrandom] entropy source.
    ///
    /// # Panics
    ///
    /// Panics if /dev/urandom cannot be opened.
    ///
    #[must_use]
    pub fn new() -> Self {
        Self {
            dev_random: File::open("/dev/urandom").expect("Failed to open /dev/urandom"),
        }
    }
}

#[cfg(unix)]
impl Default for DevUrandom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
impl EntropySource for DevUrandom {
    fn fill(&mut self, destination: &mut [u8]) {
        self.dev_random
            .read_exact(destination)
            .expect("Failed to read from /dev/urandom");
        assert!(
            destination.iter().any(|v| *v != 0),
            "Entropy source generated all zeros!"
        );
    }
}

/// This is an entropy source that generates seeds using the getrandom crate.
#[cfg(all(not(unix), feature = "allow-getrandom"))]
pub struct GetRandom;

#[cfg(all(not(unix), feature = "allow-getrandom"))]
impl GetRandom {
    /// Creates a new `GetRandom` entropy source
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

#[cfg(all(not(unix), feature = "allow-getrandom"))]
impl Default for GetRandom {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(not(unix), feature = "allow-getrandom"))]
impl EntropySource for GetRandom {
    fn fill(&mut self, destination: &mut [u8]) {
        getrandom::fill(destination).expect("getrandom::fill failed");
        assert!(
            destination.iter().any(|v| *v != 0),
            "getrandom generated all zeros!"
        );
    }
}

/// This is an entropy source that generates seeds using std::collections::hash_map::RandomState.
/// This is likely to be equivalent to ´getrandom´ on most platforms.
#[derive(Default)]
pub struct HashMapEntropy;

impl HashMapEntropy {
    /// Creates a new `HashMapEntropy` entropy source
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl EntropySource for HashMapEntropy {
    fn fill(&mut self, destination: &mut [u8]) {
        let mut chunks = destination.chunks_exact_mut(core::mem::size_of::<u64>());
        for chunk in chunks.by_ref() {
            let value = RandomState::new().build_hasher().finish();
            chunk.copy_from_slice(&value.to_be_bytes());
        }
        let bytes_remaining = chunks.into_remainder();
        if !bytes_remaining.is_empty() {
            let value = RandomState::new().build_hasher().finish();
            bytes_remaining.copy_from_slice(&value.to_be_bytes()[..bytes_remaining.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn generate_64_bit_seed_with_dev_random() {
        let seed1: u64 = DevUrandom::new().seed();
        let seed2: u64 = DevUrandom::new().seed();
        assert_ne!(seed1, seed2);
    }

    #[cfg(unix)]
    #[test]
    fn generate_32_bit_seed_with_dev_random() {
        let mut dev = DevUrandom::new();
        let seed1: u32 = dev.seed();
        let seed2: u32 = dev.seed();
        assert_ne!(seed1, seed2);
    }

    #[cfg(all(not(unix), feature = "allow-getrandom"))]
    #[test]
    fn generate_64_bit_seed_with_get_random() {
        let seed1: u64 = GetRandom::new().seed();
        let seed2: u64 = GetRandom::new().seed();
        assert_ne!(seed1, seed2);
    }

    #[test]
    fn test_hash_map_entropy_smoke_test() {
        let mut dev = HashMapEntropy::new();
        assert_ne!(dev.seed::<u64>(), dev.seed::<u64>());
    }
}
