//! Cipher capability traits.
//!
//! The two traits below are the seam between message values and concrete
//! algorithms. They are deliberately independent: an algorithm may be able
//! to encrypt only (a public asymmetric key), decrypt only (a private key),
//! or both (a symmetric key, or a composite holding one key per role).
//!
//! # Implementation Guide
//!
//! A concrete algorithm implements the trait for the roles its key material
//! supports:
//!
//! ```no_run
//! use angou::{DecryptedValue, Encryptor};
//!
//! struct Rot13;
//!
//! impl Encryptor for Rot13 {
//!     type Error = std::convert::Infallible;
//!
//!     fn encrypt(&self, message: &DecryptedValue) -> Result<Vec<u8>, Self::Error> {
//!         Ok(message
//!             .as_bytes()
//!             .iter()
//!             .map(|b| match b {
//!                 b'a'..=b'z' => (b - b'a' + 13) % 26 + b'a',
//!                 b'A'..=b'Z' => (b - b'A' + 13) % 26 + b'A',
//!                 _ => *b,
//!             })
//!             .collect())
//!     }
//! }
//! ```
//!
//! Callers normally go through [`DecryptedValue::encrypted`] and
//! [`EncryptedValue::decrypted`] rather than invoking these traits directly.
//!
//! [`DecryptedValue::encrypted`]: crate::message::DecryptedValue::encrypted
//! [`EncryptedValue::decrypted`]: crate::message::EncryptedValue::decrypted

use crate::message::{DecryptedValue, EncryptedValue};

/// Capability to transform a plaintext message into ciphertext bytes.
///
/// Implementations must not mutate the message or retain references to it;
/// every call is a complete, self-contained transform of the whole buffer.
pub trait Encryptor {
    /// The error type returned when encryption fails.
    type Error;

    /// Encrypts the message, returning the raw ciphertext bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying engine rejects the operation.
    /// No partial ciphertext is ever returned.
    fn encrypt(&self, message: &DecryptedValue) -> Result<Vec<u8>, Self::Error>;
}

/// Capability to transform a ciphertext message back into plaintext bytes.
pub trait Decryptor {
    /// The error type returned when decryption fails.
    type Error;

    /// Decrypts the message, returning the raw plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying engine rejects the operation.
    /// No partial plaintext is ever returned.
    fn decrypt(&self, message: &EncryptedValue) -> Result<Vec<u8>, Self::Error>;
}
