use digest::{Digest, Key, KeyInit};
use hmac::{Hmac, Mac};
use log::debug;
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

/// The digest algorithms which can key an HMAC, or act as the pseudo-random function of
/// PBKDF2.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum DigestAlgorithm {
    /// Message Digest 5
    Md5,

    /// Secure Hash Algorithm 1
    Sha1,

    /// Secure Hash Algorithm 2, 224-bit
    Sha224,

    /// Secure Hash Algorithm 2, 256-bit
    Sha256,

    /// Secure Hash Algorithm 2, 384-bit
    Sha384,

    /// Secure Hash Algorithm 2, 512-bit
    Sha512,
}

impl DigestAlgorithm {
    /// The length of the digest produced by this algorithm, in bytes.
    #[must_use]
    pub fn digest_length(self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha224 => 28,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha224 => "SHA-224",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }
}

#[derive(Clone)]
enum HmacContext {
    Md5(Hmac<Md5>),
    Sha1(Hmac<Sha1>),
    Sha224(Hmac<Sha224>),
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
}

/// Key an HMAC with a key of any length.
///
/// The key is first brought to the digest's block size the way HMAC defines it: keys
/// longer than a block are replaced by their digest, and the result is right-padded with
/// zeroes.
fn keyed<M, D>(key: &[u8]) -> M
where
    M: Mac + KeyInit,
    D: Digest,
{
    let mut block = Key::<M>::default();

    if key.len() > block.len() {
        let digest = D::digest(key);
        block[..digest.len()].copy_from_slice(&digest);
    } else {
        block[..key.len()].copy_from_slice(key);
    }

    <M as KeyInit>::new(&block)
}

/// Calculates a Hash-based Message Authentication Code (HMAC) over a message which may
/// be supplied in any number of pieces.
///
/// ```
/// use aws_cognito_cryptor::{DigestAlgorithm, MessageAuthenticator};
///
/// let mut authenticator = MessageAuthenticator::new(DigestAlgorithm::Sha256, "key");
/// authenticator.update("The quick brown fox ").update("jumps over the lazy dog");
///
/// assert_eq!(authenticator.finalize().len(), 32);
/// ```
#[derive(Clone)]
pub struct MessageAuthenticator {
    algorithm: DigestAlgorithm,
    context: HmacContext,
}

impl MessageAuthenticator {
    /// Create an authenticator for `algorithm`, keyed with `key`.
    ///
    /// The key may be raw bytes or a string (used as its UTF-8 bytes).
    #[must_use]
    pub fn new(algorithm: DigestAlgorithm, key: impl AsRef<[u8]>) -> Self {
        let key = key.as_ref();

        let context = match algorithm {
            DigestAlgorithm::Md5 => HmacContext::Md5(keyed::<_, Md5>(key)),
            DigestAlgorithm::Sha1 => HmacContext::Sha1(keyed::<_, Sha1>(key)),
            DigestAlgorithm::Sha224 => HmacContext::Sha224(keyed::<_, Sha224>(key)),
            DigestAlgorithm::Sha256 => HmacContext::Sha256(keyed::<_, Sha256>(key)),
            DigestAlgorithm::Sha384 => HmacContext::Sha384(keyed::<_, Sha384>(key)),
            DigestAlgorithm::Sha512 => HmacContext::Sha512(keyed::<_, Sha512>(key)),
        };

        debug!(algorithm = algorithm.name(); "Created message authenticator");

        Self { algorithm, context }
    }

    /// Calculate the HMAC of a complete message in one call.
    #[must_use]
    pub fn authenticate(
        algorithm: DigestAlgorithm,
        key: impl AsRef<[u8]>,
        message: impl AsRef<[u8]>,
    ) -> Vec<u8> {
        let mut authenticator = Self::new(algorithm, key);
        authenticator.update(message);
        authenticator.finalize()
    }

    #[must_use]
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Add the next piece of the message.
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        let data = data.as_ref();

        match &mut self.context {
            HmacContext::Md5(mac) => mac.update(data),
            HmacContext::Sha1(mac) => mac.update(data),
            HmacContext::Sha224(mac) => mac.update(data),
            HmacContext::Sha256(mac) => mac.update(data),
            HmacContext::Sha384(mac) => mac.update(data),
            HmacContext::Sha512(mac) => mac.update(data),
        }

        self
    }

    /// Complete the calculation, returning [`DigestAlgorithm::digest_length`] bytes.
    #[must_use]
    pub fn finalize(self) -> Vec<u8> {
        match self.context {
            HmacContext::Md5(mac) => mac.finalize().into_bytes().to_vec(),
            HmacContext::Sha1(mac) => mac.finalize().into_bytes().to_vec(),
            HmacContext::Sha224(mac) => mac.finalize().into_bytes().to_vec(),
            HmacContext::Sha256(mac) => mac.finalize().into_bytes().to_vec(),
            HmacContext::Sha384(mac) => mac.finalize().into_bytes().to_vec(),
            HmacContext::Sha512(mac) => mac.finalize().into_bytes().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use hmac::{Hmac, Mac};
    use proptest::prelude::*;
    use sha2::{Sha256, Sha512};

    use super::{DigestAlgorithm, MessageAuthenticator};

    const ALGORITHMS: [DigestAlgorithm; 6] = [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    const JEFE_MESSAGE: &str = "what do ya want for nothing?";

    #[test]
    fn test_output_length_matches_digest_length() {
        for (algorithm, expected) in ALGORITHMS.into_iter().zip([16, 20, 28, 32, 48, 64]) {
            assert_eq!(algorithm.digest_length(), expected);
            assert_eq!(
                MessageAuthenticator::authenticate(algorithm, "key", "message").len(),
                expected
            );
        }
    }

    #[test]
    fn test_known_answers() {
        assert_eq!(
            MessageAuthenticator::authenticate(DigestAlgorithm::Md5, "Jefe", JEFE_MESSAGE),
            hex!("750c783e6ab0b503eaa86e310a5db738")
        );
        assert_eq!(
            MessageAuthenticator::authenticate(DigestAlgorithm::Sha1, "Jefe", JEFE_MESSAGE),
            hex!("effcdf6ae5eb2fa2d27416d5f184df9c259a7c79")
        );
        assert_eq!(
            MessageAuthenticator::authenticate(DigestAlgorithm::Sha224, "Jefe", JEFE_MESSAGE),
            hex!("a30e01098bc6dbbf45690f3a7e9e6d0f8bbea2a39e6148008fd05e44")
        );
        assert_eq!(
            MessageAuthenticator::authenticate(DigestAlgorithm::Sha256, "Jefe", JEFE_MESSAGE),
            hex!("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
        assert_eq!(
            MessageAuthenticator::authenticate(DigestAlgorithm::Sha384, "Jefe", JEFE_MESSAGE),
            hex!(
                "af45d2e376484031617f78d2b58a6b1b9c7ef464f5a01b47e42ec3736322445e"
                "8e2240ca5e69e2c78b3239ecfab21649"
            )
        );
        assert_eq!(
            MessageAuthenticator::authenticate(DigestAlgorithm::Sha512, "Jefe", JEFE_MESSAGE),
            hex!(
                "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554"
                "9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
            )
        );
    }

    #[test]
    fn test_string_and_byte_keys_are_equivalent() {
        let from_str = MessageAuthenticator::authenticate(DigestAlgorithm::Sha256, "Jefe", "m");
        let from_bytes =
            MessageAuthenticator::authenticate(DigestAlgorithm::Sha256, b"Jefe".to_vec(), b"m");

        assert_eq!(from_str, from_bytes);
    }

    #[test]
    fn test_keys_longer_than_the_block_are_accepted() {
        let key = [0xaa; 131];

        assert_eq!(
            MessageAuthenticator::authenticate(
                DigestAlgorithm::Sha256,
                key,
                "Test Using Larger Than Block-Size Key - Hash Key First"
            ),
            hex!("60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54")
        );
    }

    #[test]
    fn test_keys_around_the_block_size_match_hmac() {
        for length in [0, 1, 63, 64, 65, 127, 128, 129, 200] {
            let key: Vec<u8> = (0..length).map(|i| i as u8).collect();

            let mut sha256 = Hmac::<Sha256>::new_from_slice(&key).unwrap();
            sha256.update(b"message");
            assert_eq!(
                MessageAuthenticator::authenticate(DigestAlgorithm::Sha256, &key, "message"),
                sha256.finalize().into_bytes().to_vec(),
                "SHA-256 with a {length} byte key"
            );

            let mut sha512 = Hmac::<Sha512>::new_from_slice(&key).unwrap();
            sha512.update(b"message");
            assert_eq!(
                MessageAuthenticator::authenticate(DigestAlgorithm::Sha512, &key, "message"),
                sha512.finalize().into_bytes().to_vec(),
                "SHA-512 with a {length} byte key"
            );
        }
    }

    proptest! {
        #[test]
        fn test_split_updates_match_a_single_update(
            key in proptest::collection::vec(any::<u8>(), 0..80),
            message in proptest::collection::vec(any::<u8>(), 0..300),
            split in any::<prop::sample::Index>(),
            algorithm in prop::sample::select(ALGORITHMS.to_vec()),
        ) {
            let at = split.index(message.len() + 1);

            let whole = MessageAuthenticator::authenticate(algorithm, &key, &message);

            let mut pieces = MessageAuthenticator::new(algorithm, &key);
            pieces.update(&message[..at]).update(&message[at..]);

            prop_assert_eq!(pieces.finalize(), whole);
        }
    }
}
