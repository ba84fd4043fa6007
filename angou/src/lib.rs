//! # angou
//!
//! Core types for the angou encryption toolkit.
//!
//! This crate defines the two message value types and the cipher capability
//! traits that concrete algorithm crates implement.
//!
//! ## Overview
//!
//! Data flows through the toolkit like this:
//! ```text
//! DecryptedValue → Encryptor → EncryptedValue → Decryptor → DecryptedValue
//! ```
//!
//! A [`DecryptedValue`] pairs a byte buffer with the text encoding it was
//! produced from. Passing it to an [`Encryptor`] yields ciphertext bytes,
//! which are wrapped back into an [`EncryptedValue`] carrying the same
//! encoding tag so the eventual decryption can restore the original string.
//!
//! Algorithm crates (`angou-aes`, `angou-rsa`) provide the concrete
//! [`Encryptor`]/[`Decryptor`] implementations; this crate holds no
//! algorithm logic.
//!
//! ## Example
//!
//! ```ignore
//! use angou::DecryptedValue;
//! use angou_aes::{Aes, AesKey};
//!
//! let aes = Aes::new(AesKey::from_strings("t6w9z$C&F)J@NcRf", "6CF105AB-4D16-44"));
//! let message = DecryptedValue::from_string("Hello World!")?;
//! let encrypted = message.encrypted(&aes)?;
//! println!("{}", encrypted.to_base64());
//! ```

#![forbid(unsafe_code)]

pub mod cipher;
pub mod error;
pub mod message;

pub use cipher::{Decryptor, Encryptor};
pub use error::Error;
pub use message::{DecryptedValue, EncryptedValue, TextEncoding};
