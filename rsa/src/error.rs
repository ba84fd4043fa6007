use base64::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("base64 decode: {0}")]
    Base64Decode(DecodeError),
    #[error("key material is not valid DER: {0}")]
    Asn1(#[source] angou_der::Error),
    #[error("key material root node is not a sequence")]
    InvalidRootNode,
    #[error("unrecognized key material structure")]
    InvalidStructure,
    #[error("secure key import rejected the key material: {0}")]
    KeyCreateFailed(#[source] rsa::pkcs1::Error),
    #[error("operation requires a {0} key")]
    WrongKeyClass(&'static str),
    #[error("failed to encrypt chunk {index}: {source}")]
    ChunkEncryptFailed {
        index: usize,
        #[source]
        source: rsa::Error,
    },
    #[error("failed to decrypt chunk {index}: {source}")]
    ChunkDecryptFailed {
        index: usize,
        #[source]
        source: rsa::Error,
    },
}
