use std::borrow::Cow;

/// A caller-supplied seed value.
///
/// Text and integer seeds are what the text-hash derivations
/// ([Xmur3](crate::Xmur3), [Pcg64Mix](crate::Pcg64Mix) and Alea's Mash
/// seeder) expect; byte buffers are primarily seed material for
/// [SecureKeyDerivation](crate::SecureKeyDerivation).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    /// A text seed, hashed by the seed derivations.
    Text(String),
    /// An unsigned integer seed.
    Int(u64),
    /// Raw seed bytes.
    Bytes(Vec<u8>),
}

impl Seed {
    /// The text form consumed by the text-hash derivations: integers
    /// render in decimal, byte buffers as comma-joined decimal values.
    /// This matches the form used by other implementations of the same
    /// derivations, so seeds agree across language boundaries.
    pub(crate) fn canonical_text(&self) -> Cow<'_, str> {
        match self {
            Seed::Text(text) => Cow::Borrowed(text),
            Seed::Int(value) => Cow::Owned(value.to_string()),
            Seed::Bytes(bytes) => {
                let parts: Vec<String> = bytes.iter().map(u8::to_string).collect();
                Cow::Owned(parts.join(","))
            }
        }
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed::Int(value)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Seed::Int(u64::from(value))
    }
}

impl From<Vec<u8>> for Seed {
    fn from(bytes: Vec<u8>) -> Self {
        Seed::Bytes(bytes)
    }
}

impl From<&[u8]> for Seed {
    fn from(bytes: &[u8]) -> Self {
        Seed::Bytes(bytes.to_vec())
    }
}
