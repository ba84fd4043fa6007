//! AES-CBC cipher adapter.
//!
//! [`Aes`] adapts the CBC block cipher engine to the [`Encryptor`] and
//! [`Decryptor`] capabilities: a single whole-buffer call per operation,
//! with the engine selected by the key size (AES-128/192/256).

use aes::cipher::block_padding::{NoPadding, Pkcs7};
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use angou::{DecryptedValue, Decryptor, EncryptedValue, Encryptor};

pub mod error;

pub use error::Error;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

pub const KEY_SIZE_AES128: usize = 16;
pub const KEY_SIZE_AES192: usize = 24;
pub const KEY_SIZE_AES256: usize = 32;

/// Block padding applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    #[default]
    Pkcs7,
    /// Input must already be a multiple of the 16-byte block size.
    NoPadding,
}

/// Symmetric key material: a secret, an initialization vector and the key
/// size selecting the AES variant.
///
/// The secret must hold at least `size` bytes; only the first `size` are
/// fed to the engine. Length mismatches surface when the key is used, not
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AesKey {
    size: usize,
    secret: Vec<u8>,
    iv: Vec<u8>,
}

impl AesKey {
    pub fn new(size: usize, secret: Vec<u8>, iv: Vec<u8>) -> Self {
        AesKey { size, secret, iv }
    }

    /// AES-128 key from raw bytes.
    pub fn aes128(secret: Vec<u8>, iv: Vec<u8>) -> Self {
        Self::new(KEY_SIZE_AES128, secret, iv)
    }

    /// AES-128 key from string secrets, the common case for passphrase-style
    /// key material.
    pub fn from_strings(secret: &str, iv: &str) -> Self {
        Self::aes128(secret.as_bytes().to_vec(), iv.as_bytes().to_vec())
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// AES-CBC cipher over an [`AesKey`].
#[derive(Debug, Clone)]
pub struct Aes {
    key: AesKey,
    padding: Padding,
}

impl Aes {
    /// Creates a cipher with PKCS7 padding.
    pub fn new(key: AesKey) -> Self {
        Self::with_padding(key, Padding::default())
    }

    pub fn with_padding(key: AesKey, padding: Padding) -> Self {
        Aes { key, padding }
    }

    fn secret(&self) -> Result<&[u8], Error> {
        self.key
            .secret
            .get(..self.key.size)
            .ok_or(Error::InvalidSecretLength {
                expected: self.key.size,
                actual: self.key.secret.len(),
            })
    }
}

impl Encryptor for Aes {
    type Error = Error;

    fn encrypt(&self, message: &DecryptedValue) -> Result<Vec<u8>, Self::Error> {
        let secret = self.secret()?;
        let data = message.as_bytes();
        match self.key.size {
            KEY_SIZE_AES128 => {
                encrypt_buffer::<Aes128CbcEnc>(secret, &self.key.iv, data, self.padding)
            }
            KEY_SIZE_AES192 => {
                encrypt_buffer::<Aes192CbcEnc>(secret, &self.key.iv, data, self.padding)
            }
            KEY_SIZE_AES256 => {
                encrypt_buffer::<Aes256CbcEnc>(secret, &self.key.iv, data, self.padding)
            }
            size => Err(Error::UnsupportedKeySize(size)),
        }
    }
}

impl Decryptor for Aes {
    type Error = Error;

    fn decrypt(&self, message: &EncryptedValue) -> Result<Vec<u8>, Self::Error> {
        let secret = self.secret()?;
        let data = message.as_bytes();
        match self.key.size {
            KEY_SIZE_AES128 => {
                decrypt_buffer::<Aes128CbcDec>(secret, &self.key.iv, data, self.padding)
            }
            KEY_SIZE_AES192 => {
                decrypt_buffer::<Aes192CbcDec>(secret, &self.key.iv, data, self.padding)
            }
            KEY_SIZE_AES256 => {
                decrypt_buffer::<Aes256CbcDec>(secret, &self.key.iv, data, self.padding)
            }
            size => Err(Error::UnsupportedKeySize(size)),
        }
    }
}

fn encrypt_buffer<C>(
    secret: &[u8],
    iv: &[u8],
    data: &[u8],
    padding: Padding,
) -> Result<Vec<u8>, Error>
where
    C: BlockEncryptMut + KeyIvInit,
{
    let engine = C::new_from_slices(secret, iv).map_err(|_| Error::InvalidIvLength(iv.len()))?;
    // Scratch holds the input plus one key size worth of headroom for
    // padding expansion; the engine reports the actual output length.
    let mut buffer = vec![0u8; data.len() + secret.len()];
    buffer[..data.len()].copy_from_slice(data);
    let converted = match padding {
        Padding::Pkcs7 => engine.encrypt_padded_mut::<Pkcs7>(&mut buffer, data.len()),
        Padding::NoPadding => engine.encrypt_padded_mut::<NoPadding>(&mut buffer, data.len()),
    }
    .map_err(|_| Error::EncryptFailed)?;
    Ok(converted.to_vec())
}

fn decrypt_buffer<C>(
    secret: &[u8],
    iv: &[u8],
    data: &[u8],
    padding: Padding,
) -> Result<Vec<u8>, Error>
where
    C: BlockDecryptMut + KeyIvInit,
{
    let engine = C::new_from_slices(secret, iv).map_err(|_| Error::InvalidIvLength(iv.len()))?;
    let mut buffer = data.to_vec();
    let converted = match padding {
        Padding::Pkcs7 => engine.decrypt_padded_mut::<Pkcs7>(&mut buffer),
        Padding::NoPadding => engine.decrypt_padded_mut::<NoPadding>(&mut buffer),
    }
    .map_err(|_| Error::DecryptFailed)?;
    Ok(converted.to_vec())
}

#[cfg(test)]
mod tests {
    use angou::{DecryptedValue, EncryptedValue};
    use rstest::rstest;

    use super::{Aes, AesKey, Error, Padding};

    fn test_cipher() -> Aes {
        Aes::new(AesKey::from_strings("t6w9z$C&F)J@NcRf", "6CF105AB-4D16-44"))
    }

    #[test]
    fn test_encryption_known_answer() {
        let message = DecryptedValue::from_string("Hello World!").unwrap();
        let encrypted = message.encrypted(&test_cipher()).unwrap();
        assert_eq!("aE0Pq1ddC6a1agsa0RI2NQ==", encrypted.to_base64());
    }

    #[test]
    fn test_decryption_known_answer() {
        let encrypted = EncryptedValue::from_base64("aE0Pq1ddC6a1agsa0RI2NQ==").unwrap();
        let decrypted = encrypted.decrypted(&test_cipher()).unwrap();
        assert_eq!("Hello World!", decrypted.string().unwrap());
    }

    #[test]
    fn test_encryption_is_deterministic() {
        let message = DecryptedValue::from_string("same key, same iv").unwrap();
        let cipher = test_cipher();
        assert_eq!(
            message.encrypt(&cipher).unwrap(),
            message.encrypt(&cipher).unwrap()
        );
    }

    #[rstest(size, secret,
        case(16, "t6w9z$C&F)J@NcRf"),
        case(24, "t6w9z$C&F)J@NcRfUjXn2r5u"),
        case(32, "t6w9z$C&F)J@NcRfUjXn2r5u8x/A?D(G"),
    )]
    fn test_roundtrip_all_key_sizes(size: usize, secret: &str) {
        let key = AesKey::new(size, secret.as_bytes().to_vec(), b"6CF105AB-4D16-44".to_vec());
        let cipher = Aes::new(key);
        let message = DecryptedValue::from_string("Hello World!").unwrap();
        let decrypted = message
            .encrypted(&cipher)
            .unwrap()
            .decrypted(&cipher)
            .unwrap();
        assert_eq!("Hello World!", decrypted.string().unwrap());
    }

    #[rstest(length, case(0), case(1), case(15), case(16), case(17), case(64))]
    fn test_roundtrip_across_block_boundaries(length: usize) {
        let cipher = test_cipher();
        let message = DecryptedValue::new(vec![0xa5; length]);
        let decrypted = message
            .encrypted(&cipher)
            .unwrap()
            .decrypted(&cipher)
            .unwrap();
        assert_eq!(message.as_bytes(), decrypted.as_bytes());
    }

    #[test]
    fn test_no_padding_requires_block_multiple() {
        let cipher = Aes::with_padding(
            AesKey::from_strings("t6w9z$C&F)J@NcRf", "6CF105AB-4D16-44"),
            Padding::NoPadding,
        );
        let aligned = DecryptedValue::new(vec![0x42; 32]);
        let roundtrip = aligned
            .encrypted(&cipher)
            .unwrap()
            .decrypted(&cipher)
            .unwrap();
        assert_eq!(aligned.as_bytes(), roundtrip.as_bytes());

        let unaligned = DecryptedValue::new(vec![0x42; 17]);
        assert_eq!(Err(Error::EncryptFailed), unaligned.encrypt(&cipher));
    }

    #[test]
    fn test_unsupported_key_size() {
        let cipher = Aes::new(AesKey::new(20, vec![0u8; 20], vec![0u8; 16]));
        let message = DecryptedValue::from_string("x").unwrap();
        assert_eq!(Err(Error::UnsupportedKeySize(20)), message.encrypt(&cipher));
    }

    #[test]
    fn test_secret_shorter_than_key_size() {
        let cipher = Aes::new(AesKey::new(16, vec![0u8; 8], vec![0u8; 16]));
        let message = DecryptedValue::from_string("x").unwrap();
        assert_eq!(
            Err(Error::InvalidSecretLength {
                expected: 16,
                actual: 8
            }),
            message.encrypt(&cipher)
        );
    }

    #[test]
    fn test_invalid_iv_length() {
        let cipher = Aes::new(AesKey::new(16, vec![0u8; 16], vec![0u8; 8]));
        let message = DecryptedValue::from_string("x").unwrap();
        assert_eq!(Err(Error::InvalidIvLength(8)), message.encrypt(&cipher));
    }

    #[test]
    fn test_wrong_key_fails_or_corrupts() {
        let encrypted = DecryptedValue::from_string("Hello World!")
            .unwrap()
            .encrypted(&test_cipher())
            .unwrap();
        let other = Aes::new(AesKey::from_strings("0000000000000000", "6CF105AB-4D16-44"));
        // PKCS7 unpadding almost always rejects a wrong-key decryption; if it
        // happens to pass, the plaintext must still differ.
        match encrypted.decrypt(&other) {
            Err(Error::DecryptFailed) => {}
            Ok(plaintext) => assert_ne!(b"Hello World!".to_vec(), plaintext),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
}
