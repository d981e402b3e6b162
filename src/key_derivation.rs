use std::time::{Duration, Instant};

use hmac::Hmac;
use log::info;
use md5::Md5;
use pbkdf2::pbkdf2;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

use crate::{CryptorError, DigestAlgorithm, Status};

/// Rounds used for the first calibration sample.
const CALIBRATION_INITIAL_ROUNDS: u32 = 1_000;

/// Samples shorter than this are too noisy to extrapolate from, so the round count is
/// doubled until a sample takes at least this long.
const CALIBRATION_MINIMUM_SAMPLE: Duration = Duration::from_millis(10);

/// Derives key material from a password (or passphrase) and a salt, using PBKDF2 with an
/// HMAC as the pseudo-random function.
///
/// ```
/// use aws_cognito_cryptor::{DigestAlgorithm, KeyDerivation};
///
/// let key = KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha256, 1, 32)?;
///
/// assert_eq!(
///     hex::encode(key),
///     "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
/// );
/// # Ok::<(), aws_cognito_cryptor::CryptorError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDerivation;

impl KeyDerivation {
    /// Derive `derived_key_length` bytes of key material.
    ///
    /// The password and salt may be strings (used as their UTF-8 bytes) or raw bytes. The
    /// result depends only on the inputs.
    ///
    /// ## Errors
    ///
    /// Returns [`CryptorError::Fail`] with [`Status::ParamError`] if `rounds` is zero or
    /// `derived_key_length` is zero.
    pub fn derive_key(
        password: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
        prf: DigestAlgorithm,
        rounds: u32,
        derived_key_length: usize,
    ) -> Result<Vec<u8>, CryptorError> {
        let mut derived_key = vec![0; derived_key_length];

        Self::derive_key_into(password, salt, prf, rounds, &mut derived_key)?;

        Ok(derived_key)
    }

    /// Derive key material directly into `derived_key`, filling the whole buffer.
    ///
    /// ## Errors
    ///
    /// Returns [`CryptorError::Fail`] with [`Status::ParamError`] if `rounds` is zero or
    /// `derived_key` is empty.
    pub fn derive_key_into(
        password: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
        prf: DigestAlgorithm,
        rounds: u32,
        derived_key: &mut [u8],
    ) -> Result<(), CryptorError> {
        if rounds == 0 {
            return Err(CryptorError::Fail {
                status: Status::ParamError,
                message: "PBKDF2 requires at least one round".into(),
            });
        }

        if derived_key.is_empty() {
            return Err(CryptorError::Fail {
                status: Status::ParamError,
                message: "PBKDF2 derived key length must be greater than zero".into(),
            });
        }

        let password = password.as_ref();
        let salt = salt.as_ref();

        let result = match prf {
            DigestAlgorithm::Md5 => pbkdf2::<Hmac<Md5>>(password, salt, rounds, derived_key),
            DigestAlgorithm::Sha1 => pbkdf2::<Hmac<Sha1>>(password, salt, rounds, derived_key),
            DigestAlgorithm::Sha224 => {
                pbkdf2::<Hmac<Sha224>>(password, salt, rounds, derived_key)
            }
            DigestAlgorithm::Sha256 => {
                pbkdf2::<Hmac<Sha256>>(password, salt, rounds, derived_key)
            }
            DigestAlgorithm::Sha384 => {
                pbkdf2::<Hmac<Sha384>>(password, salt, rounds, derived_key)
            }
            DigestAlgorithm::Sha512 => {
                pbkdf2::<Hmac<Sha512>>(password, salt, rounds, derived_key)
            }
        };

        result.map_err(|err| CryptorError::Fail {
            status: Status::ParamError,
            message: format!("PBKDF2 with {} failed: {err}", prf.name()),
        })
    }

    /// Determine (approximately) how many rounds of PBKDF2 take `target_milliseconds` on
    /// this machine, for a password and salt of the given lengths.
    ///
    /// This benchmarks real derivations over random inputs, so it takes at least a few
    /// milliseconds and the result depends on the hardware and on how busy it is. Run
    /// it away from latency sensitive code, and treat the result as an estimate.
    ///
    /// The result is always at least 1.
    ///
    /// ## Errors
    ///
    /// Returns [`CryptorError::Status`] with [`Status::RngFailure`] if random inputs could
    /// not be generated.
    pub fn calibrate(
        password_length: usize,
        salt_length: usize,
        algorithm: DigestAlgorithm,
        derived_key_length: usize,
        target_milliseconds: u32,
    ) -> Result<u32, CryptorError> {
        let mut password = vec![0; password_length];
        let mut salt = vec![0; salt_length];

        OsRng
            .try_fill_bytes(&mut password)
            .and_then(|()| OsRng.try_fill_bytes(&mut salt))
            .map_err(|_| CryptorError::Status(Status::RngFailure))?;

        let mut derived_key = vec![0; derived_key_length.max(1)];
        let mut rounds = CALIBRATION_INITIAL_ROUNDS;

        let elapsed = loop {
            let started = Instant::now();
            Self::derive_key_into(&password, &salt, algorithm, rounds, &mut derived_key)?;
            let elapsed = started.elapsed();

            if elapsed >= CALIBRATION_MINIMUM_SAMPLE || rounds > u32::MAX / 2 {
                break elapsed;
            }

            rounds *= 2;
        };

        let nanos_per_round = elapsed.as_nanos().max(1) as f64 / f64::from(rounds);
        let target_nanos = f64::from(target_milliseconds) * 1_000_000.0;

        // Float to integer casts saturate, so the estimate is clamped to `1..=u32::MAX`.
        let calibrated = (target_nanos / nanos_per_round).round().max(1.0) as u32;

        info!(
            algorithm = algorithm.name(),
            target_milliseconds,
            rounds = calibrated;
            "Calibrated PBKDF2 round count"
        );

        Ok(calibrated)
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::KeyDerivation;
    use crate::{CryptorError, DigestAlgorithm, Status};

    #[test]
    fn test_sha256_known_answers() {
        assert_eq!(
            KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha256, 1, 32),
            Ok(hex!("120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b").to_vec())
        );
        assert_eq!(
            KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha256, 2, 32),
            Ok(hex!("ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43").to_vec())
        );
        assert_eq!(
            KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha256, 4096, 32),
            Ok(hex!("c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a").to_vec())
        );
    }

    #[test]
    fn test_sha1_known_answers() {
        assert_eq!(
            KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha1, 1, 20),
            Ok(hex!("0c60c80f961f0e71f3a9b524af6012062fe037a6").to_vec())
        );
        assert_eq!(
            KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha1, 4096, 20),
            Ok(hex!("4b007901b765489abead49d926f721d065a429c1").to_vec())
        );
    }

    #[test]
    fn test_string_and_byte_inputs_are_equivalent() {
        let from_str =
            KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha512, 3, 64);
        let from_bytes = KeyDerivation::derive_key(
            b"password".to_vec(),
            [b's', b'a', b'l', b't'],
            DigestAlgorithm::Sha512,
            3,
            64,
        );

        assert_eq!(from_str, from_bytes);
    }

    #[test]
    fn test_derive_key_into_fills_the_buffer() {
        let mut derived_key = [0; 20];

        KeyDerivation::derive_key_into(
            "password",
            "salt",
            DigestAlgorithm::Sha1,
            2,
            &mut derived_key,
        )
        .unwrap();

        assert_eq!(derived_key, hex!("ea6c014dc72d6f8ccd1ed92ace1d41f0d8de8957"));
    }

    #[test]
    fn test_zero_rounds_is_rejected() {
        let err = KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha256, 0, 32)
            .unwrap_err();

        assert_eq!(err.status(), Some(Status::ParamError));
        assert!(matches!(err, CryptorError::Fail { .. }));
    }

    #[test]
    fn test_empty_derived_key_is_rejected() {
        let err = KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha256, 1, 0)
            .unwrap_err();

        assert_eq!(err.status(), Some(Status::ParamError));
    }

    #[test]
    fn test_calibrate_returns_at_least_one_round() {
        assert!(KeyDerivation::calibrate(8, 8, DigestAlgorithm::Sha256, 32, 0).unwrap() >= 1);
        assert!(KeyDerivation::calibrate(0, 0, DigestAlgorithm::Md5, 0, 1).unwrap() >= 1);
    }
}
