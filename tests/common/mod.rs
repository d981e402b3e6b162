use aws_cognito_cryptor::{Algorithm, CryptorError, Operation, Options, StreamCipher};

pub mod vectors;

pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn get_stream_cipher(
    operation: Operation,
    algorithm: Algorithm,
    options: Options,
    key: &[u8],
    iv: &[u8],
) -> StreamCipher {
    StreamCipher::new(operation, algorithm, options, key, iv)
        .expect("Stream cipher should be created with a valid key and IV")
}

/// Feed `input` through the cipher `chunk_size` bytes at a time, then finalize it.
///
/// Every output buffer is sized exactly with `output_length`, so this also fails if the
/// cipher ever produces more output than it reported.
pub fn run_in_chunks(
    cipher: &mut StreamCipher,
    input: &[u8],
    chunk_size: usize,
) -> Result<Vec<u8>, CryptorError> {
    let mut output = Vec::new();

    for chunk in input.chunks(chunk_size.max(1)) {
        let mut buffer = vec![0; cipher.output_length(chunk.len(), false)];
        let written = cipher.update(chunk, &mut buffer)?;

        assert_eq!(written, buffer.len());
        output.extend_from_slice(&buffer[..written]);
    }

    let mut buffer = vec![0; cipher.output_length(0, true)];
    let written = cipher.finalize(&mut buffer)?;
    output.extend_from_slice(&buffer[..written]);

    Ok(output)
}
