//! Message value types.
//!
//! [`DecryptedValue`] and [`EncryptedValue`] have the same shape (bytes plus
//! a text-encoding tag) but opposite semantics: the former may be
//! interpreted as text directly, the latter only after decryption. Both are
//! immutable after construction.

use std::fmt::{Display, Formatter};
use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::cipher::{Decryptor, Encryptor};
use crate::error::Error;

/// Text encoding a message's bytes were produced from.
///
/// The tag only matters when the bytes are later interpreted as text; it is
/// carried through encryption and decryption untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Ascii,
}

impl Display for TextEncoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Ascii => write!(f, "ASCII"),
        }
    }
}

fn encode_string(s: &str, encoding: TextEncoding) -> Result<Vec<u8>, Error> {
    match encoding {
        TextEncoding::Utf8 => Ok(s.as_bytes().to_vec()),
        TextEncoding::Ascii => {
            if s.is_ascii() {
                Ok(s.as_bytes().to_vec())
            } else {
                Err(Error::StringToBytesConversion(encoding))
            }
        }
    }
}

fn decode_string(data: &[u8], encoding: TextEncoding) -> Result<String, Error> {
    match encoding {
        TextEncoding::Utf8 => String::from_utf8(data.to_vec())
            .map_err(|_| Error::BytesToStringConversion(encoding)),
        TextEncoding::Ascii => {
            if data.is_ascii() {
                // ASCII is a UTF-8 subset, so this cannot fail after the check.
                String::from_utf8(data.to_vec())
                    .map_err(|_| Error::BytesToStringConversion(encoding))
            } else {
                Err(Error::BytesToStringConversion(encoding))
            }
        }
    }
}

fn load_file(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// A message in decrypted form.
///
/// Created directly from a string, raw bytes or a file, or produced by
/// [`EncryptedValue::decrypted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedValue {
    data: Vec<u8>,
    encoding: TextEncoding,
}

impl DecryptedValue {
    /// Creates a value from a string, converting it with the default UTF-8
    /// encoding.
    pub fn from_string(s: &str) -> Result<Self, Error> {
        Self::from_string_with_encoding(s, TextEncoding::default())
    }

    /// Creates a value from a string converted with the given encoding.
    ///
    /// Fails with a conversion error if the string cannot be represented in
    /// that encoding.
    pub fn from_string_with_encoding(s: &str, encoding: TextEncoding) -> Result<Self, Error> {
        Ok(DecryptedValue {
            data: encode_string(s, encoding)?,
            encoding,
        })
    }

    /// Creates a value from raw plaintext bytes with the default encoding tag.
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_encoding(data, TextEncoding::default())
    }

    pub fn with_encoding(data: Vec<u8>, encoding: TextEncoding) -> Self {
        DecryptedValue { data, encoding }
    }

    /// Loads plaintext bytes from a file.
    ///
    /// Fails with a resource-load error if the file is missing or unreadable.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::new(load_file(path.as_ref())?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Interprets the plaintext bytes as a string in the declared encoding.
    pub fn string(&self) -> Result<String, Error> {
        decode_string(&self.data, self.encoding)
    }

    /// Encrypts this value, wrapping the ciphertext into an
    /// [`EncryptedValue`] that carries the same encoding tag.
    pub fn encrypted<E: Encryptor>(&self, cipher: &E) -> Result<EncryptedValue, E::Error> {
        let data = self.encrypt(cipher)?;
        Ok(EncryptedValue::with_encoding(data, self.encoding))
    }

    /// Encrypts this value, returning the raw ciphertext bytes.
    pub fn encrypt<E: Encryptor>(&self, cipher: &E) -> Result<Vec<u8>, E::Error> {
        cipher.encrypt(self)
    }

    /// Encrypts this value, returning the ciphertext as a Base64 string.
    pub fn encrypt_to_base64<E: Encryptor>(&self, cipher: &E) -> Result<String, E::Error> {
        Ok(STANDARD.encode(self.encrypt(cipher)?))
    }
}

/// A message in encrypted form.
///
/// The bytes are opaque; they are never interpreted as text without being
/// decrypted first. The canonical text representation for transport and
/// storage is Base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedValue {
    data: Vec<u8>,
    encoding: TextEncoding,
}

impl EncryptedValue {
    /// Creates a value from the Base64 representation of ciphertext.
    pub fn from_base64(s: &str) -> Result<Self, Error> {
        Self::from_base64_with_encoding(s, TextEncoding::default())
    }

    /// Creates a value from Base64 ciphertext, tagging it with the encoding
    /// the eventual plaintext should be interpreted in.
    pub fn from_base64_with_encoding(s: &str, encoding: TextEncoding) -> Result<Self, Error> {
        let data = STANDARD.decode(s).map_err(Error::Base64Decode)?;
        Ok(EncryptedValue { data, encoding })
    }

    /// Creates a value from raw ciphertext bytes with the default encoding tag.
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_encoding(data, TextEncoding::default())
    }

    pub fn with_encoding(data: Vec<u8>, encoding: TextEncoding) -> Self {
        EncryptedValue { data, encoding }
    }

    /// Loads ciphertext bytes from a file, for example an encrypted secret
    /// shipped alongside the application.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::new(load_file(path.as_ref())?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Returns the canonical Base64 representation of the ciphertext.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Decrypts this value, wrapping the plaintext into a [`DecryptedValue`]
    /// that carries the same encoding tag.
    pub fn decrypted<D: Decryptor>(&self, cipher: &D) -> Result<DecryptedValue, D::Error> {
        let data = self.decrypt(cipher)?;
        Ok(DecryptedValue::with_encoding(data, self.encoding))
    }

    /// Decrypts this value, returning the raw plaintext bytes.
    pub fn decrypt<D: Decryptor>(&self, cipher: &D) -> Result<Vec<u8>, D::Error> {
        cipher.decrypt(self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DecryptedValue, EncryptedValue, TextEncoding};
    use crate::cipher::{Decryptor, Encryptor};
    use crate::error::Error;

    /// Reverses the buffer, just enough of a "cipher" to exercise the
    /// capability seam.
    struct Reverse;

    impl Encryptor for Reverse {
        type Error = std::convert::Infallible;

        fn encrypt(&self, message: &DecryptedValue) -> Result<Vec<u8>, Self::Error> {
            Ok(message.as_bytes().iter().rev().copied().collect())
        }
    }

    impl Decryptor for Reverse {
        type Error = std::convert::Infallible;

        fn decrypt(&self, message: &EncryptedValue) -> Result<Vec<u8>, Self::Error> {
            Ok(message.as_bytes().iter().rev().copied().collect())
        }
    }

    #[rstest(input, case("Hello World!"), case(""), case("こんにちは"))]
    fn test_decrypted_value_string_roundtrip(input: &str) {
        let value = DecryptedValue::from_string(input).unwrap();
        assert_eq!(input, value.string().unwrap());
        assert_eq!(TextEncoding::Utf8, value.encoding());
    }

    #[test]
    fn test_ascii_conversion_rejects_non_ascii() {
        let result = DecryptedValue::from_string_with_encoding("こんにちは", TextEncoding::Ascii);
        assert!(matches!(
            result,
            Err(Error::StringToBytesConversion(TextEncoding::Ascii))
        ));
    }

    #[test]
    fn test_ascii_decoding_rejects_non_ascii_bytes() {
        let value = DecryptedValue::with_encoding(vec![0x48, 0xff], TextEncoding::Ascii);
        assert!(matches!(
            value.string(),
            Err(Error::BytesToStringConversion(TextEncoding::Ascii))
        ));
    }

    #[rstest(input, expected,
        case(vec![], ""),
        case(vec![0x01, 0x02, 0x03], "AQID"),
        case(b"Hello World!".to_vec(), "SGVsbG8gV29ybGQh"),
    )]
    fn test_encrypted_value_base64(input: Vec<u8>, expected: &str) {
        let value = EncryptedValue::new(input.clone());
        assert_eq!(expected, value.to_base64());
        assert_eq!(input, EncryptedValue::from_base64(expected).unwrap().as_bytes());
    }

    #[rstest(input, case("not base64!!"), case("====="), case("AQ"))]
    fn test_encrypted_value_invalid_base64(input: &str) {
        assert!(matches!(
            EncryptedValue::from_base64(input),
            Err(Error::Base64Decode(_))
        ));
    }

    #[test]
    fn test_capability_roundtrip_preserves_encoding() {
        let message = DecryptedValue::from_string("Hello World!").unwrap();
        let encrypted = message.encrypted(&Reverse).unwrap();
        assert_eq!(b"!dlroW olleH".to_vec(), encrypted.as_bytes());
        assert_eq!(TextEncoding::Utf8, encrypted.encoding());

        let decrypted = encrypted.decrypted(&Reverse).unwrap();
        assert_eq!("Hello World!", decrypted.string().unwrap());
    }

    #[test]
    fn test_from_file_missing_path() {
        let result = DecryptedValue::from_file("/nonexistent/angou-test-file");
        assert!(matches!(result, Err(Error::Load { .. })));
    }

    #[test]
    fn test_encrypt_to_base64() {
        let message = DecryptedValue::from_string("abc").unwrap();
        // "cba" in Base64.
        assert_eq!("Y2Jh", message.encrypt_to_base64(&Reverse).unwrap());
    }
}
