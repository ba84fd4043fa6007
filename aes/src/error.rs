use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported key size {0} (expected 16, 24 or 32 bytes)")]
    UnsupportedKeySize(usize),
    #[error("secret is {actual} bytes but the key size requires {expected}")]
    InvalidSecretLength { expected: usize, actual: usize },
    #[error("invalid initialization vector length {0} (expected 16 bytes)")]
    InvalidIvLength(usize),
    #[error("block cipher engine rejected the encryption input")]
    EncryptFailed,
    #[error("block cipher engine rejected the decryption input")]
    DecryptFailed,
}
