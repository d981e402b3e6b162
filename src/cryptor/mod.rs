use crate::constant::{AlgorithmSpec, ALGORITHMS};

pub use stream::StreamCipher;

mod engine;
mod stream;

/// The direction a [`StreamCipher`] is driven in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl Operation {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        }
    }
}

/// The block cipher algorithms supported by a [`StreamCipher`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Algorithm {
    /// Advanced Encryption Standard. Equivalent to [`Algorithm::Aes128`].
    Aes,
    Aes128,
    Aes192,
    Aes256,

    /// Data Encryption Standard.
    Des,

    /// Triple DES (EDE, three independent keys).
    TripleDes,

    /// CAST-128.
    Cast,

    Rc2,

    Blowfish,
}

impl Algorithm {
    fn spec(self) -> &'static AlgorithmSpec {
        &ALGORITHMS[&self]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Aes => "AES",
            Algorithm::Aes128 => "AES-128",
            Algorithm::Aes192 => "AES-192",
            Algorithm::Aes256 => "AES-256",
            Algorithm::Des => "DES",
            Algorithm::TripleDes => "3DES",
            Algorithm::Cast => "CAST",
            Algorithm::Rc2 => "RC2",
            Algorithm::Blowfish => "Blowfish",
        }
    }

    /// Block size of the algorithm, in bytes.
    #[must_use]
    pub fn block_size(self) -> usize {
        self.spec().block_size
    }

    /// The key size, in bytes, used when no better choice is known.
    ///
    /// For variable key size algorithms this is the minimum key size.
    #[must_use]
    pub fn default_key_size(self) -> usize {
        self.spec().default_key_size
    }

    /// The rule keys for this algorithm must satisfy.
    #[must_use]
    pub fn valid_key_size(self) -> &'static ValidKeySize {
        &self.spec().valid_key_size
    }

    #[must_use]
    pub fn is_valid_key_size(self, key_size: usize) -> bool {
        self.valid_key_size().is_valid_key_size(key_size)
    }

    /// The smallest valid key size which is greater than or equal to `key_size`.
    ///
    /// Returns `None` if `key_size` exceeds the largest valid key size.
    #[must_use]
    pub fn padded_key_size(self, key_size: usize) -> Option<usize> {
        self.valid_key_size().padded_key_size(key_size)
    }
}

/// The key sizes (in bytes) an algorithm accepts.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ValidKeySize {
    /// Exactly one key size.
    Fixed(usize),

    /// A set of distinct key sizes.
    Discrete(Vec<usize>),

    /// Any key size in the closed range `min..=max`.
    Range(usize, usize),
}

impl ValidKeySize {
    #[must_use]
    pub fn is_valid_key_size(&self, key_size: usize) -> bool {
        match self {
            ValidKeySize::Fixed(fixed) => *fixed == key_size,
            ValidKeySize::Discrete(sizes) => sizes.contains(&key_size),
            ValidKeySize::Range(min, max) => (*min..=*max).contains(&key_size),
        }
    }

    /// The first valid key size which is at least `key_size`.
    #[must_use]
    pub fn padded_key_size(&self, key_size: usize) -> Option<usize> {
        match self {
            ValidKeySize::Fixed(fixed) => (key_size <= *fixed).then_some(*fixed),
            ValidKeySize::Discrete(sizes) => sizes
                .iter()
                .copied()
                .filter(|size| *size >= key_size)
                .min(),
            ValidKeySize::Range(min, max) => (key_size <= *max).then(|| key_size.max(*min)),
        }
    }
}

/// Options controlling how a [`StreamCipher`] treats its input.
///
/// Without `ecb_mode` the cipher runs in CBC mode and requires an initialization vector
/// of exactly one block.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Options {
    /// Apply PKCS#7 padding when encrypting, and strip it when decrypting. Needed unless
    /// the input is a whole number of blocks.
    pub pkcs7_padding: bool,

    /// Electronic Code Book mode. Each block is processed independently and the
    /// initialization vector is ignored.
    pub ecb_mode: bool,
}

impl Options {
    pub const NONE: Options = Options {
        pkcs7_padding: false,
        ecb_mode: false,
    };

    pub const PKCS7_PADDING: Options = Options {
        pkcs7_padding: true,
        ecb_mode: false,
    };

    pub const ECB_MODE: Options = Options {
        pkcs7_padding: false,
        ecb_mode: true,
    };

    #[must_use]
    pub fn with_pkcs7_padding(mut self) -> Self {
        self.pkcs7_padding = true;
        self
    }

    #[must_use]
    pub fn with_ecb_mode(mut self) -> Self {
        self.ecb_mode = true;
        self
    }
}
