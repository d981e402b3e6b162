use std::collections::HashMap;

use crate::cryptor::{Algorithm, ValidKeySize};

pub const BLOCK_SIZE_AES: usize = 16;
pub const BLOCK_SIZE_DES: usize = 8;
pub const BLOCK_SIZE_3DES: usize = 8;
pub const BLOCK_SIZE_CAST: usize = 8;
pub const BLOCK_SIZE_RC2: usize = 8;
pub const BLOCK_SIZE_BLOWFISH: usize = 8;

pub const KEY_SIZE_AES128: usize = 16;
pub const KEY_SIZE_AES192: usize = 24;
pub const KEY_SIZE_AES256: usize = 32;
pub const KEY_SIZE_DES: usize = 8;
pub const KEY_SIZE_3DES: usize = 24;
pub const KEY_SIZE_MIN_CAST: usize = 5;
pub const KEY_SIZE_MAX_CAST: usize = 16;
pub const KEY_SIZE_MIN_RC2: usize = 1;
pub const KEY_SIZE_MAX_RC2: usize = 128;
pub const KEY_SIZE_MIN_BLOWFISH: usize = 8;
pub const KEY_SIZE_MAX_BLOWFISH: usize = 56;

/// The fixed properties of a cipher algorithm.
#[derive(Debug)]
pub struct AlgorithmSpec {
    pub block_size: usize,
    pub default_key_size: usize,
    pub valid_key_size: ValidKeySize,
}

impl AlgorithmSpec {
    fn new(block_size: usize, default_key_size: usize, valid_key_size: ValidKeySize) -> Self {
        Self {
            block_size,
            default_key_size,
            valid_key_size,
        }
    }
}

lazy_static! {
    /// Every AES variant accepts all three AES key sizes; the key length picks the
    /// number of rounds.
    static ref AES_KEY_SIZES: ValidKeySize =
        ValidKeySize::Discrete(vec![KEY_SIZE_AES128, KEY_SIZE_AES192, KEY_SIZE_AES256]);

    pub static ref ALGORITHMS: HashMap<Algorithm, AlgorithmSpec> = {
        let mut algorithms = HashMap::new();

        for (algorithm, default_key_size) in [
            (Algorithm::Aes, KEY_SIZE_AES128),
            (Algorithm::Aes128, KEY_SIZE_AES128),
            (Algorithm::Aes192, KEY_SIZE_AES192),
            (Algorithm::Aes256, KEY_SIZE_AES256),
        ] {
            algorithms.insert(
                algorithm,
                AlgorithmSpec::new(BLOCK_SIZE_AES, default_key_size, AES_KEY_SIZES.clone()),
            );
        }

        algorithms.insert(
            Algorithm::Des,
            AlgorithmSpec::new(BLOCK_SIZE_DES, KEY_SIZE_DES, ValidKeySize::Fixed(KEY_SIZE_DES)),
        );
        algorithms.insert(
            Algorithm::TripleDes,
            AlgorithmSpec::new(BLOCK_SIZE_3DES, KEY_SIZE_3DES, ValidKeySize::Fixed(KEY_SIZE_3DES)),
        );
        algorithms.insert(
            Algorithm::Cast,
            AlgorithmSpec::new(
                BLOCK_SIZE_CAST,
                KEY_SIZE_MIN_CAST,
                ValidKeySize::Range(KEY_SIZE_MIN_CAST, KEY_SIZE_MAX_CAST),
            ),
        );
        algorithms.insert(
            Algorithm::Rc2,
            AlgorithmSpec::new(
                BLOCK_SIZE_RC2,
                KEY_SIZE_MIN_RC2,
                ValidKeySize::Range(KEY_SIZE_MIN_RC2, KEY_SIZE_MAX_RC2),
            ),
        );
        algorithms.insert(
            Algorithm::Blowfish,
            AlgorithmSpec::new(
                BLOCK_SIZE_BLOWFISH,
                KEY_SIZE_MIN_BLOWFISH,
                ValidKeySize::Range(KEY_SIZE_MIN_BLOWFISH, KEY_SIZE_MAX_BLOWFISH),
            ),
        );

        algorithms
    };
}
