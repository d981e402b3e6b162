#![crate_name = "aws_cognito_cryptor"]

//! # AWS Cognito Cryptor
//!
//! The symmetric cryptography used by AWS Cognito and Pinpoint mobile clients: keyed
//! hashes (HMAC), password based key derivation (PBKDF2), and a streaming block cipher
//! driver.
//!
//! Each primitive is independent, synchronous and owns its own state. None of them
//! perform I/O, and none of them are internally synchronised, so an instance should only
//! be driven by one thread at a time.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! aws-cognito-cryptor = "0.1.0"
//! ```
//!
//! ### Message authentication
//!
//! A [`MessageAuthenticator`] calculates an HMAC over a message which may be supplied in
//! any number of pieces. Keys and message pieces may be strings or raw bytes.
//!
//! ```
//! use aws_cognito_cryptor::{DigestAlgorithm, MessageAuthenticator};
//!
//! let mut authenticator = MessageAuthenticator::new(DigestAlgorithm::Sha256, "Jefe");
//! authenticator
//!     .update("what do ya want ")
//!     .update("for nothing?");
//!
//! assert_eq!(
//!     hex::encode(authenticator.finalize()),
//!     "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
//! );
//! ```
//!
//! ### Key derivation
//!
//! [`KeyDerivation::derive_key`] stretches a password and salt into a key of any length
//! using PBKDF2. [`KeyDerivation::calibrate`] benchmarks the current machine to choose a
//! round count which takes roughly a given amount of time.
//!
//! ```
//! use aws_cognito_cryptor::{CryptorError, DigestAlgorithm, KeyDerivation};
//!
//! // Pick a round count which takes ~1ms to run on this machine.
//! let rounds = KeyDerivation::calibrate(8, 16, DigestAlgorithm::Sha256, 32, 1)?;
//!
//! let key = KeyDerivation::derive_key("password", "salt", DigestAlgorithm::Sha256, rounds, 32)?;
//!
//! assert_eq!(key.len(), 32);
//! # Ok::<(), CryptorError>(())
//! ```
//!
//! ### Stream encryption
//!
//! A [`StreamCipher`] encrypts or decrypts a stream with AES, DES, Triple DES, CAST, RC2
//! or Blowfish, in CBC (with an initialization vector) or ECB mode, and optionally with
//! PKCS#7 padding.
//!
//! Output is written into caller supplied buffers, which should be sized with
//! [`StreamCipher::output_length`].
//!
//! ```
//! use aws_cognito_cryptor::{Algorithm, CryptorError, Operation, Options, StreamCipher};
//!
//! let key = [0u8; 16];
//! let iv = [0u8; 16];
//! let plaintext = [0x41u8; 16];
//!
//! let mut encryptor = StreamCipher::new(
//!     Operation::Encrypt,
//!     Algorithm::Aes128,
//!     Options::PKCS7_PADDING,
//!     &key,
//!     &iv,
//! )?;
//!
//! let mut ciphertext = vec![0; encryptor.output_length(plaintext.len(), true)];
//! let mut written = encryptor.update(plaintext, &mut ciphertext)?;
//! written += encryptor.finalize(&mut ciphertext[written..])?;
//! ciphertext.truncate(written);
//!
//! // A whole block of plaintext gains a whole block of padding.
//! assert_eq!(ciphertext.len(), 32);
//!
//! let mut decryptor = StreamCipher::new(
//!     Operation::Decrypt,
//!     Algorithm::Aes128,
//!     Options::PKCS7_PADDING,
//!     &key,
//!     &iv,
//! )?;
//!
//! let mut decrypted = vec![0; decryptor.output_length(ciphertext.len(), true)];
//! let mut written = decryptor.update(&ciphertext, &mut decrypted)?;
//! written += decryptor.finalize(&mut decrypted[written..])?;
//! decrypted.truncate(written);
//!
//! assert_eq!(decrypted, plaintext);
//! # Ok::<(), CryptorError>(())
//! ```
//!
//! ## Errors
//!
//! Construction errors (an invalid key or initialization vector size) are returned from
//! the constructor, and no instance is created.
//!
//! Errors from [`StreamCipher::update`] and [`StreamCipher::finalize`] are **sticky**: the
//! failing [`Status`] is recorded on the instance, and every later call returns it
//! without running the cipher again. Nothing is retried automatically. Create a new
//! instance to start over.
//!
//! ## Running tests
//!
//! The tests can be run with:
//! ```sh
//! cargo test
//! ```
//!
//! Log output from the tests can be enabled with `RUST_LOG`:
//! ```sh
//! RUST_LOG=debug cargo test
//! ```

#[macro_use]
extern crate lazy_static;

pub use crate::authenticator::{DigestAlgorithm, MessageAuthenticator};
pub use crate::cryptor::{Algorithm, Operation, Options, StreamCipher, ValidKeySize};
pub use crate::error::CryptorError;
pub use crate::key_derivation::KeyDerivation;
pub use crate::status::Status;

mod authenticator;
mod constant;
mod cryptor;
mod error;
mod key_derivation;
mod status;
pub mod utils;
