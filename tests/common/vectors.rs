use aws_cognito_cryptor::Algorithm;

/// Every algorithm, paired with the boundary key sizes it accepts.
pub const KEYED_ALGORITHMS: [(Algorithm, usize); 13] = [
    (Algorithm::Aes, 16),
    (Algorithm::Aes128, 16),
    (Algorithm::Aes192, 24),
    (Algorithm::Aes256, 32),
    (Algorithm::Aes128, 32),
    (Algorithm::Des, 8),
    (Algorithm::TripleDes, 24),
    (Algorithm::Cast, 5),
    (Algorithm::Cast, 16),
    (Algorithm::Rc2, 1),
    (Algorithm::Rc2, 128),
    (Algorithm::Blowfish, 8),
    (Algorithm::Blowfish, 56),
];

pub const PLAINTEXT_LENGTHS: [usize; 9] = [0, 1, 7, 8, 15, 16, 17, 33, 100];

/// A deterministic, non-repeating byte pattern of length `length`.
pub fn pattern(length: usize, seed: u8) -> Vec<u8> {
    (0..length)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}
