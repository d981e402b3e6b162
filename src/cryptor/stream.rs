use log::{debug, warn};
use zeroize::Zeroizing;

use crate::cryptor::engine::CipherContext;
use crate::cryptor::{Algorithm, Operation, Options};
use crate::utils::zero_pad;
use crate::{CryptorError, Status};

/// Encrypts or decrypts a stream, returning results as they become available.
///
/// Block ciphers buffer partial blocks internally, so a call to [`StreamCipher::update`]
/// may produce fewer bytes than it was given. The remaining bytes are produced by
/// [`StreamCipher::finalize`], which also adds or removes PKCS#7 padding when
/// [`Options::pkcs7_padding`] is set.
///
/// Once any call fails, the failing [`Status`] is recorded and every later call returns
/// it again without touching the cipher. After a successful `finalize` the cipher is
/// exhausted and a new instance is needed.
///
/// A `StreamCipher` is not internally synchronised. Drive each instance from a single
/// thread at a time.
pub struct StreamCipher {
    operation: Operation,
    algorithm: Algorithm,
    options: Options,
    context: CipherContext,
    status: Status,
    finalized: bool,
}

impl StreamCipher {
    /// Create a cipher from a key and initialization vector which are already the
    /// correct size.
    ///
    /// ## Errors
    ///
    /// - [`CryptorError::InvalidKeySize`] if the key length is not valid for `algorithm`.
    /// - [`CryptorError::InvalidIvSizeOrLength`] if ECB mode is not requested and the
    ///   initialization vector is not exactly one block long.
    pub fn new(
        operation: Operation,
        algorithm: Algorithm,
        options: Options,
        key: &[u8],
        iv: &[u8],
    ) -> Result<Self, CryptorError> {
        if !algorithm.is_valid_key_size(key.len()) {
            return Err(CryptorError::InvalidKeySize);
        }

        if !options.ecb_mode && iv.len() != algorithm.block_size() {
            return Err(CryptorError::InvalidIvSizeOrLength);
        }

        let context = CipherContext::new(algorithm, key, iv, options.ecb_mode)?;

        debug!(
            algorithm = algorithm.name(),
            operation = operation.name(),
            padding = options.pkcs7_padding,
            ecb = options.ecb_mode;
            "Created stream cipher"
        );

        Ok(Self {
            operation,
            algorithm,
            options,
            context,
            status: Status::Success,
            finalized: false,
        })
    }

    /// Create a cipher from a key and initialization vector which may be shorter than
    /// the algorithm requires.
    ///
    /// The key is right-padded with zero bytes up to the next valid key size for the
    /// algorithm (a 10 byte AES key becomes a 16 byte key), and a short initialization
    /// vector is right-padded with zero bytes up to the block size. Strings are used as
    /// their UTF-8 bytes.
    ///
    /// **Note:** Padding a key with zeroes does not add any strength to it. This exists
    /// for compatibility with data produced by clients which relied on it.
    ///
    /// ## Errors
    ///
    /// - [`CryptorError::InvalidKeySize`] if the key is longer than the largest valid key
    ///   size for `algorithm`.
    /// - [`CryptorError::InvalidIvSizeOrLength`] if ECB mode is not requested and the
    ///   initialization vector is longer than one block.
    pub fn with_padded_key(
        operation: Operation,
        algorithm: Algorithm,
        options: Options,
        key: impl AsRef<[u8]>,
        iv: impl AsRef<[u8]>,
    ) -> Result<Self, CryptorError> {
        let key = key.as_ref();
        let padded_key_size = algorithm
            .padded_key_size(key.len())
            .ok_or(CryptorError::InvalidKeySize)?;
        let padded_key = Zeroizing::new(zero_pad(key, padded_key_size));

        let iv = iv.as_ref();
        let padded_iv = if options.ecb_mode {
            Zeroizing::new(Vec::new())
        } else {
            Zeroizing::new(zero_pad(iv, algorithm.block_size()))
        };

        Self::new(operation, algorithm, options, &padded_key, &padded_iv)
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn options(&self) -> Options {
        self.options
    }

    /// The status resulting from the most recent call.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Add `input` to the stream, writing any completed output to `output`.
    ///
    /// Returns the number of bytes written. Size `output` with
    /// [`StreamCipher::output_length`].
    ///
    /// ## Errors
    ///
    /// - [`CryptorError::Status`] with [`Status::BufferTooSmall`] if `output` cannot hold
    ///   the result. The cipher refuses all further work afterwards.
    /// - The recorded status if an earlier call failed.
    /// - [`CryptorError::Finalized`] if the cipher has been finalized.
    pub fn update(
        &mut self,
        input: impl AsRef<[u8]>,
        output: &mut [u8],
    ) -> Result<usize, CryptorError> {
        self.ensure_ready()?;

        let input = input.as_ref();
        let produced = self.output_length(input.len(), false);

        if output.len() < produced {
            return Err(self.fail(Status::BufferTooSmall));
        }

        let mut staged = Zeroizing::new(Vec::with_capacity(
            self.context.pending().len() + input.len(),
        ));
        staged.extend_from_slice(self.context.pending());
        staged.extend_from_slice(input);

        let (ready, remainder) = staged.split_at(produced);
        let out = &mut output[..produced];
        out.copy_from_slice(ready);
        self.context.set_pending(remainder);
        self.context.crypt_blocks(self.operation, out);

        Ok(produced)
    }

    /// Flush any buffered input to `output`, adding padding when encrypting or removing
    /// it when decrypting (if [`Options::pkcs7_padding`] is set).
    ///
    /// Returns the number of bytes written. The cipher is exhausted afterwards.
    ///
    /// ## Errors
    ///
    /// - [`Status::AlignmentError`] if padding is not used and the total input was not a
    ///   whole number of blocks.
    /// - [`Status::DecodeError`] if the padding of decrypted data is malformed.
    /// - [`Status::BufferTooSmall`] if `output` cannot hold the result.
    pub fn finalize(&mut self, output: &mut [u8]) -> Result<usize, CryptorError> {
        self.ensure_ready()?;

        let block_size = self.context.block_size();
        let mut last = Zeroizing::new(self.context.pending().to_vec());

        match (self.operation, self.options.pkcs7_padding) {
            (Operation::Encrypt, true) => {
                let padding = block_size - last.len();
                // Block sizes never exceed 16 bytes, so the padding length fits in a byte.
                last.resize(block_size, padding as u8);
                self.context.crypt_blocks(self.operation, &mut last);
            }
            (Operation::Decrypt, true) => {
                if last.len() != block_size {
                    return Err(self.fail(Status::AlignmentError));
                }

                self.context.crypt_blocks(self.operation, &mut last);

                let Some(unpadded) = unpadded_length(&last) else {
                    return Err(self.fail(Status::DecodeError));
                };
                last.truncate(unpadded);
            }
            (_, false) => {
                if !last.is_empty() {
                    return Err(self.fail(Status::AlignmentError));
                }
            }
        }

        if output.len() < last.len() {
            return Err(self.fail(Status::BufferTooSmall));
        }

        output[..last.len()].copy_from_slice(&last);
        self.context.set_pending(&[]);
        self.finalized = true;

        debug!(
            algorithm = self.algorithm.name(),
            operation = self.operation.name();
            "Finalized stream cipher"
        );

        Ok(last.len())
    }

    /// The maximum number of bytes that will be output if `input_length` more bytes are
    /// given to [`StreamCipher::update`].
    ///
    /// When `is_final` is set, this also covers the bytes produced by the following call
    /// to [`StreamCipher::finalize`], including any padding block.
    #[must_use]
    pub fn output_length(&self, input_length: usize, is_final: bool) -> usize {
        let block_size = self.context.block_size();
        let total = self.context.pending().len().saturating_add(input_length);
        let whole_blocks = total - total % block_size;

        match (is_final, self.operation, self.options.pkcs7_padding) {
            (true, Operation::Encrypt, true) => whole_blocks.saturating_add(block_size),
            (true, _, _) => whole_blocks,
            // The last whole block of padded ciphertext is held back until `finalize`, as
            // it carries the padding which must be stripped.
            (false, Operation::Decrypt, true) if total % block_size == 0 => {
                total.saturating_sub(block_size)
            }
            (false, _, _) => whole_blocks,
        }
    }

    fn ensure_ready(&self) -> Result<(), CryptorError> {
        if !self.status.is_success() {
            return Err(CryptorError::Status(self.status));
        }

        if self.finalized {
            return Err(CryptorError::Finalized);
        }

        Ok(())
    }

    /// Record a failure. Every later call reports `status` without running the cipher.
    fn fail(&mut self, status: Status) -> CryptorError {
        warn!(
            algorithm = self.algorithm.name(),
            operation = self.operation.name(),
            status = status.code();
            "Stream cipher failed"
        );

        self.status = status;

        CryptorError::Status(status)
    }
}

/// Length of a decrypted final block once its PKCS#7 padding is removed, or `None` if
/// the padding is malformed.
fn unpadded_length(block: &[u8]) -> Option<usize> {
    let padding = usize::from(*block.last()?);

    if padding == 0 || padding > block.len() {
        return None;
    }

    let (data, pad) = block.split_at(block.len() - padding);

    pad.iter()
        .all(|byte| usize::from(*byte) == padding)
        .then_some(data.len())
}
