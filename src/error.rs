//! Error types for plugrand.

use thiserror::Error;

/// Result type alias using plugrand's [Error].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by generator construction and the façade operations.
///
/// Failures are all-or-nothing: a draw either advances the generator and
/// returns a value, or it fails and leaves the state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A seed of the wrong arity or type was offered to a generator.
    #[error("invalid seed: {reason}")]
    InvalidSeed {
        /// What the generator expected, and what it got instead.
        reason: String,
    },

    /// The seed/salt pair carries too little entropy for secure key
    /// derivation.
    #[error("insufficient entropy: {bits_given} bits given, at least 256 required (or pair the seed with a 256-bit salt)")]
    InsufficientEntropy {
        /// Number of bits in the offending seed or salt.
        bits_given: usize,
    },

    /// The requested integer span is wider than 2^53-1 and cannot be
    /// drawn exactly.
    #[error("the difference between min and max must not exceed 2^53-1")]
    RangeTooLarge,

    /// A mandatory option was not supplied.
    #[error("`{0}` is a mandatory option")]
    MissingArgument(&'static str),

    /// A state snapshot from one generator variant was imported into
    /// another.
    #[error("state mismatch: expected a {expected} state, got a {got} state")]
    InvalidState {
        /// Variant of the importing generator.
        expected: &'static str,
        /// Variant the snapshot was exported from.
        got: &'static str,
    },

    /// The injected crypto provider failed.
    #[error("crypto provider: {0}")]
    Provider(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_expected_seed_shape() {
        let err = Error::InvalidSeed {
            reason: "Sfc32 requires 3 seed words".to_string(),
        };
        assert_eq!(format!("{err}"), "invalid seed: Sfc32 requires 3 seed words");
    }

    #[test]
    fn display_names_the_bit_count() {
        let err = Error::InsufficientEntropy { bits_given: 32 };
        assert!(format!("{err}").contains("32 bits given"));
    }
}
