//! The crypto-backed generator: an injected provider interface, key
//! derivation with entropy validation, and the counter-mode stream.
//!
//! The cryptographic primitives themselves live behind
//! [CryptoProvider]; this module only sequences them. Every provider
//! call is a suspension point, which is why [SecureStream] is consumed
//! through the suspension-capable façade
//! ([PluggablePrngAsync](crate::PluggablePrngAsync)).

use crate::error::{Error, Result};
use crate::seed::Seed;
use crate::state::GeneratorState;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// An opaque symmetric key, produced by a provider's key derivation and
/// consumed only by [SecureStream].
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecureKey {
    bytes: [u8; 32],
}

impl SecureKey {
    /// Wraps 256 bits of derived key material.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// The key material, for the provider that consumes the key.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }
}

// Key material stays out of Debug output.
impl fmt::Debug for SecureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureKey(..)")
    }
}

/// The externally supplied cryptographic service. The crate treats its
/// operations purely as suspension points with fixed input/output
/// shapes; their cryptographic properties are assumed, not implemented
/// here.
///
/// Inject an implementation into [SecureStream] /
/// [SecureKeyDerivation]; there is no process-wide default.
#[async_trait]
pub trait CryptoProvider: Send + Sync {
    /// Counter-mode encryption of `plaintext` under `key`, starting at
    /// the 128-bit little-endian `counter` block. Must be deterministic
    /// for a given (counter, key, plaintext) triple, or state snapshots
    /// cannot reproduce the stream.
    async fn encrypt(
        &self,
        counter: [u8; 16],
        key: &SecureKey,
        plaintext: &[u8],
    ) -> Result<Vec<u8>>;

    /// `count` bytes from the platform's secure random source.
    async fn random_bytes(&self, count: usize) -> Result<Vec<u8>>;

    /// Extract-and-expand key derivation from secret material and a
    /// salt.
    async fn derive_key(&self, secret: &[u8], salt: &[u8]) -> Result<SecureKey>;
}

/// Seed material for the secure generator.
#[derive(Clone, Debug, Default)]
pub struct SecureOptions {
    /// Secret seed material; 256 random bits are drawn from the
    /// provider when omitted.
    pub seed: Option<Seed>,
    /// Salt that lets a weak seed reach the entropy requirement.
    pub salt: Option<Vec<u8>>,
}

const MIN_ENTROPY_BYTES: usize = 32;

/// Turns a seed (and optional salt) into an opaque [SecureKey], after
/// checking the pair carries at least 256 bits of entropy.
pub struct SecureKeyDerivation {
    options: SecureOptions,
}

impl SecureKeyDerivation {
    #[must_use]
    pub fn new(options: SecureOptions) -> Self {
        Self { options }
    }

    /// Validates the entropy rule and runs the provider's key
    /// derivation.
    ///
    /// A seed shorter than 256 bits (integer seeds are 64) passes only
    /// when paired with a salt, and a supplied salt must itself hold
    /// 256 bits. A seed that meets the requirement on its own may salt
    /// itself. With neither seed nor salt, 256 random bits are drawn
    /// from the provider.
    ///
    /// # Errors
    ///
    /// [Error::InsufficientEntropy] naming the offending bit count, or
    /// any provider failure.
    pub async fn derive(&self, provider: &dyn CryptoProvider) -> Result<SecureKey> {
        let secret: Vec<u8> = match &self.options.seed {
            None => provider.random_bytes(MIN_ENTROPY_BYTES).await?,
            Some(Seed::Text(text)) => text.as_bytes().to_vec(),
            Some(Seed::Bytes(bytes)) => bytes.clone(),
            Some(Seed::Int(value)) => value.to_le_bytes().to_vec(),
        };
        if secret.len() < MIN_ENTROPY_BYTES && self.options.salt.is_none() {
            return Err(Error::InsufficientEntropy {
                bits_given: secret.len() * 8,
            });
        }
        let salt: &[u8] = match &self.options.salt {
            Some(salt) if salt.len() < MIN_ENTROPY_BYTES => {
                return Err(Error::InsufficientEntropy {
                    bits_given: salt.len() * 8,
                });
            }
            Some(salt) => salt,
            None => &secret,
        };
        provider.derive_key(&secret, salt).await
    }
}

// One refill encrypts a 64-byte zero block: 16 output words, four
// cipher blocks of counter space.
const BLOCK_BYTES: usize = 64;
const BLOCK_WORDS: usize = BLOCK_BYTES / 4;
const COUNTER_STEP: u128 = (BLOCK_BYTES / 16) as u128;

/// A cryptographically secure stream: counter-mode encryption of zeroed
/// blocks under an opaque key, sliced into 32-bit words.
///
/// Words are buffered a block at a time; the internal 128-bit counter
/// advances only when the buffer is exhausted, so a draw suspends on the
/// provider once per 16 outputs. Far slower than the arithmetic
/// generators; the price of unpredictability.
pub struct SecureStream {
    provider: Arc<dyn CryptoProvider>,
    key: SecureKey,
    counter: u128,
    word_index: usize,
    buffer: Option<[u32; BLOCK_WORDS]>,
}

impl SecureStream {
    /// Wraps a derived key and its provider. The stream starts at
    /// counter zero; no provider call happens until the first draw.
    #[must_use]
    pub fn new(provider: Arc<dyn CryptoProvider>, key: SecureKey) -> Self {
        Self {
            provider,
            key,
            counter: 0,
            word_index: 0,
            buffer: None,
        }
    }

    /// One raw 32-bit draw; suspends on the provider when the buffered
    /// block is exhausted. State advances only after the provider call
    /// succeeds, so a failed draw leaves the stream untouched.
    pub async fn next_u32(&mut self) -> Result<u32> {
        let (counter, word_index) = if self.word_index == BLOCK_WORDS {
            (self.counter.wrapping_add(COUNTER_STEP), 0)
        } else {
            (self.counter, self.word_index)
        };
        if self.buffer.is_none() || counter != self.counter {
            let block = self.encrypt_block(counter).await?;
            self.buffer = Some(block);
            self.counter = counter;
            self.word_index = word_index;
        }
        let block = self.buffer.as_ref().expect("buffer was just filled");
        let word = block[self.word_index];
        self.word_index += 1;
        Ok(word)
    }

    async fn encrypt_block(&self, counter: u128) -> Result<[u32; BLOCK_WORDS]> {
        let ciphertext = self
            .provider
            .encrypt(counter.to_le_bytes(), &self.key, &[0; BLOCK_BYTES])
            .await?;
        if ciphertext.len() < BLOCK_BYTES {
            return Err(Error::Provider(format!(
                "short ciphertext: {} bytes for a {BLOCK_BYTES}-byte block",
                ciphertext.len()
            )));
        }
        let mut block = [0_u32; BLOCK_WORDS];
        for (word, chunk) in block.iter_mut().zip(ciphertext.chunks_exact(4)) {
            *word = u32::from_ne_bytes(chunk.try_into().expect("chunk is 4 bytes"));
        }
        Ok(block)
    }

    /// The stream's state: key, block counter, and position within the
    /// block. The buffered words themselves are not part of it; an
    /// import re-derives them from the provider, which is what makes
    /// the snapshot portable.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn export_state(&self) -> GeneratorState {
        GeneratorState::Secure {
            key: self.key.clone(),
            counter: self.counter,
            word_index: self.word_index as u32,
        }
    }

    /// Replaces key, counter and position from a snapshot.
    ///
    /// # Errors
    ///
    /// [Error::InvalidState] if the snapshot came from a different
    /// variant.
    pub fn import_state(&mut self, state: &GeneratorState) -> Result<()> {
        match state {
            GeneratorState::Secure {
                key,
                counter,
                word_index,
            } => {
                self.key = key.clone();
                self.counter = *counter;
                self.word_index = *word_index as usize;
                self.buffer = None;
                Ok(())
            }
            other => Err(Error::InvalidState {
                expected: "SecureStream",
                got: other.variant_name(),
            }),
        }
    }

    pub(crate) fn provider(&self) -> Arc<dyn CryptoProvider> {
        Arc::clone(&self.provider)
    }
}
