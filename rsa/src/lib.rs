//! Chunked RSA cipher adapters.
//!
//! The engine operates on fixed-size blocks only, so [`RsaEncryption`] and
//! [`RsaDecryption`] split their input into block-size chunks, feed each
//! chunk through the engine in order and reassemble the outputs. The first
//! failing chunk aborts the whole operation; output from earlier chunks is
//! discarded.
//!
//! Encryption and decryption are commonly performed with two different
//! keys, so the two roles are independent types; [`Rsa`] composes one of
//! each for callers holding both keys.

use rand::thread_rng;
use rsa::{Oaep, Pkcs1v15Encrypt};
use sha1::Sha1;

use angou::{DecryptedValue, Decryptor, EncryptedValue, Encryptor};

pub mod error;
pub mod key;

pub use error::Error;
pub use key::{RsaKey, strip_encoding_header};

/// Padding scheme applied by the engine to every block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    #[default]
    Pkcs1v15,
    /// OAEP with SHA-1.
    Oaep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Encryption,
    Decryption,
}

/// Encrypt-only RSA cipher over a public key.
#[derive(Debug, Clone)]
pub struct RsaEncryption {
    key: RsaKey,
    padding: Padding,
}

impl RsaEncryption {
    pub fn new(public_key: RsaKey, padding: Padding) -> Self {
        RsaEncryption {
            key: public_key,
            padding,
        }
    }
}

impl Encryptor for RsaEncryption {
    type Error = Error;

    fn encrypt(&self, message: &DecryptedValue) -> Result<Vec<u8>, Self::Error> {
        let key = self.key.public()?;
        let mut rng = thread_rng();
        convert_chunks(
            message.as_bytes(),
            self.key.block_size(),
            Action::Encryption,
            |chunk| match self.padding {
                Padding::Pkcs1v15 => key.encrypt(&mut rng, Pkcs1v15Encrypt, chunk),
                Padding::Oaep => key.encrypt(&mut rng, Oaep::new::<Sha1>(), chunk),
            },
        )
    }
}

/// Decrypt-only RSA cipher over a private key.
#[derive(Debug, Clone)]
pub struct RsaDecryption {
    key: RsaKey,
    padding: Padding,
}

impl RsaDecryption {
    pub fn new(private_key: RsaKey, padding: Padding) -> Self {
        RsaDecryption {
            key: private_key,
            padding,
        }
    }
}

impl Decryptor for RsaDecryption {
    type Error = Error;

    fn decrypt(&self, message: &EncryptedValue) -> Result<Vec<u8>, Self::Error> {
        let key = self.key.private()?;
        convert_chunks(
            message.as_bytes(),
            self.key.block_size(),
            Action::Decryption,
            |chunk| match self.padding {
                Padding::Pkcs1v15 => key.decrypt(Pkcs1v15Encrypt, chunk),
                Padding::Oaep => key.decrypt(Oaep::new::<Sha1>(), chunk),
            },
        )
    }
}

/// RSA cipher composed of one key per role.
#[derive(Debug, Clone)]
pub struct Rsa {
    encryption: RsaEncryption,
    decryption: RsaDecryption,
}

impl Rsa {
    pub fn new(public_key: RsaKey, private_key: RsaKey, padding: Padding) -> Self {
        Rsa {
            encryption: RsaEncryption::new(public_key, padding),
            decryption: RsaDecryption::new(private_key, padding),
        }
    }
}

impl Encryptor for Rsa {
    type Error = Error;

    fn encrypt(&self, message: &DecryptedValue) -> Result<Vec<u8>, Self::Error> {
        self.encryption.encrypt(message)
    }
}

impl Decryptor for Rsa {
    type Error = Error;

    fn decrypt(&self, message: &EncryptedValue) -> Result<Vec<u8>, Self::Error> {
        self.decryption.decrypt(message)
    }
}

/// Runs `op` over consecutive `block_size` chunks of `data` (the final
/// chunk may be shorter), appending each output in input order. The first
/// failing chunk aborts with its index; nothing is returned for partially
/// converted input.
fn convert_chunks<F>(
    data: &[u8],
    block_size: usize,
    action: Action,
    mut op: F,
) -> Result<Vec<u8>, Error>
where
    F: FnMut(&[u8]) -> rsa::Result<Vec<u8>>,
{
    let mut converted = Vec::new();
    for (index, chunk) in data.chunks(block_size).enumerate() {
        let output = op(chunk).map_err(|source| match action {
            Action::Encryption => Error::ChunkEncryptFailed { index, source },
            Action::Decryption => Error::ChunkDecryptFailed { index, source },
        })?;
        converted.extend_from_slice(&output);
    }
    Ok(converted)
}
