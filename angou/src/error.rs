//! Error types shared by the message value types.

use std::path::PathBuf;

use base64::DecodeError;
use thiserror::Error;

use crate::message::TextEncoding;

/// Errors that can occur while constructing or converting message values.
#[derive(Debug, Error)]
pub enum Error {
    /// The string cannot be represented in the declared text encoding.
    #[error("string is not representable as {0}")]
    StringToBytesConversion(TextEncoding),

    /// The byte buffer is not a valid string in the declared text encoding.
    #[error("bytes are not a valid {0} string")]
    BytesToStringConversion(TextEncoding),

    /// Failed to decode a Base64 text representation.
    #[error("base64 decode: {0}")]
    Base64Decode(DecodeError),

    /// Failed to load message bytes from an external file.
    #[error("failed to load data from {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
