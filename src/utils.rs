use crate::CryptorError;

/// Right-pad `bytes` with zeroes to `size` bytes.
///
/// Input which is already at least `size` bytes long is returned unchanged (it is never
/// truncated).
#[must_use]
pub fn zero_pad(bytes: impl AsRef<[u8]>, size: usize) -> Vec<u8> {
    let mut padded = bytes.as_ref().to_vec();

    if padded.len() < size {
        padded.resize(size, 0);
    }

    padded
}

/// Encode bytes as a lowercase hex string.
#[must_use]
pub fn hex_string(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Decode a hex string into bytes.
///
/// Strings with an odd number of digits are treated as if they had a leading `0`.
///
/// ## Errors
///
/// Returns an error if the string contains anything other than hex digits.
pub fn bytes_from_hex(value: &str) -> Result<Vec<u8>, CryptorError> {
    let even = if value.len() % 2 == 0 {
        value.to_string()
    } else {
        format!("0{value}")
    };

    hex::decode(even).map_err(|err| {
        CryptorError::InvalidArgument(format!("Invalid hex string. Received '{err}'"))
    })
}
