use aes::{Aes128, Aes192, Aes256};
use blowfish::Blowfish;
use cast5::Cast5;
use cipher::{Block, BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit};
use des::{Des, TdesEde3};
use rc2::Rc2;
use zeroize::Zeroizing;

use crate::constant::{KEY_SIZE_AES128, KEY_SIZE_AES192, KEY_SIZE_AES256};
use crate::cryptor::{Algorithm, Operation};
use crate::CryptorError;

/// A keyed block cipher, erased over the concrete algorithm.
trait BlockPrimitive: Send + Sync {
    fn block_size(&self) -> usize;
    fn encrypt_in_place(&self, block: &mut [u8]);
    fn decrypt_in_place(&self, block: &mut [u8]);
}

impl<C> BlockPrimitive for C
where
    C: BlockEncrypt + BlockDecrypt + Send + Sync,
{
    fn block_size(&self) -> usize {
        <C as BlockSizeUser>::block_size()
    }

    fn encrypt_in_place(&self, block: &mut [u8]) {
        self.encrypt_block(Block::<C>::from_mut_slice(block));
    }

    fn decrypt_in_place(&self, block: &mut [u8]) {
        self.decrypt_block(Block::<C>::from_mut_slice(block));
    }
}

fn keyed<C>(key: &[u8]) -> Result<Box<dyn BlockPrimitive>, CryptorError>
where
    C: BlockPrimitive + KeyInit + 'static,
{
    let cipher = C::new_from_slice(key).map_err(|_| CryptorError::InvalidKeySize)?;

    Ok(Box::new(cipher))
}

/// The mutable state of a single encryption or decryption stream.
///
/// Owns the keyed cipher, the chaining block (CBC) and any input which has not yet
/// filled a whole block.
pub(crate) struct CipherContext {
    cipher: Box<dyn BlockPrimitive>,
    chain: Option<Zeroizing<Vec<u8>>>,
    pending: Zeroizing<Vec<u8>>,
}

impl CipherContext {
    /// Key the cipher. `key` must already be a valid size for `algorithm`, and `iv` must be
    /// one block long unless `ecb_mode` is set.
    pub(crate) fn new(
        algorithm: Algorithm,
        key: &[u8],
        iv: &[u8],
        ecb_mode: bool,
    ) -> Result<Self, CryptorError> {
        let cipher: Box<dyn BlockPrimitive> = match algorithm {
            Algorithm::Aes | Algorithm::Aes128 | Algorithm::Aes192 | Algorithm::Aes256 => {
                match key.len() {
                    KEY_SIZE_AES128 => keyed::<Aes128>(key)?,
                    KEY_SIZE_AES192 => keyed::<Aes192>(key)?,
                    KEY_SIZE_AES256 => keyed::<Aes256>(key)?,
                    _ => return Err(CryptorError::InvalidKeySize),
                }
            }
            Algorithm::Des => keyed::<Des>(key)?,
            Algorithm::TripleDes => keyed::<TdesEde3>(key)?,
            Algorithm::Cast => keyed::<Cast5>(key)?,
            // The effective key length is the full key length, in bits.
            Algorithm::Rc2 => Box::new(Rc2::new_with_eff_key_len(key, key.len() * 8)),
            Algorithm::Blowfish => keyed::<Blowfish>(key)?,
        };

        let chain = if ecb_mode {
            None
        } else {
            if iv.len() != cipher.block_size() {
                return Err(CryptorError::InvalidIvSizeOrLength);
            }
            Some(Zeroizing::new(iv.to_vec()))
        };

        Ok(Self {
            cipher,
            chain,
            pending: Zeroizing::new(Vec::new()),
        })
    }

    pub(crate) fn block_size(&self) -> usize {
        self.cipher.block_size()
    }

    pub(crate) fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Replace the buffered partial input.
    pub(crate) fn set_pending(&mut self, pending: &[u8]) {
        self.pending.clear();
        self.pending.extend_from_slice(pending);
    }

    /// Encrypt or decrypt `data` in place. `data` must be a whole number of blocks.
    pub(crate) fn crypt_blocks(&mut self, operation: Operation, data: &mut [u8]) {
        let block_size = self.block_size();

        for block in data.chunks_exact_mut(block_size) {
            match (operation, self.chain.as_mut()) {
                (Operation::Encrypt, Some(chain)) => {
                    xor_in_place(block, chain);
                    self.cipher.encrypt_in_place(block);
                    chain.copy_from_slice(block);
                }
                (Operation::Decrypt, Some(chain)) => {
                    let ciphertext = Zeroizing::new(block.to_vec());
                    self.cipher.decrypt_in_place(block);
                    xor_in_place(block, chain);
                    chain.copy_from_slice(&ciphertext);
                }
                (Operation::Encrypt, None) => self.cipher.encrypt_in_place(block),
                (Operation::Decrypt, None) => self.cipher.decrypt_in_place(block),
            }
        }
    }
}

fn xor_in_place(block: &mut [u8], other: &[u8]) {
    for (byte, mask) in block.iter_mut().zip(other) {
        *byte ^= mask;
    }
}
