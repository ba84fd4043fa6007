//! RSA key material.
//!
//! [`RsaKey`] owns the original encoded key bytes and the opaque engine
//! handle derived from them. Deriving the handle is the expensive, fallible
//! step; it happens exactly once at construction and the value is immutable
//! afterwards, so a key can be reused across many encrypt/decrypt calls.

use base64::{Engine, engine::general_purpose::STANDARD};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};

use angou_der::Node;

use crate::error::Error;

/// Opaque secure key handle, exclusively owned by its [`RsaKey`].
#[derive(Debug, Clone)]
pub(crate) enum SecureKey {
    Public(RsaPublicKey),
    Private(RsaPrivateKey),
}

/// Public or private RSA key material.
#[derive(Debug, Clone)]
pub struct RsaKey {
    data: Vec<u8>,
    is_public: bool,
    key: SecureKey,
}

impl RsaKey {
    /// Creates a public key from its Base64 encoding.
    ///
    /// Keys commonly travel with embedded line breaks; whitespace is
    /// ignored before decoding.
    pub fn from_public_base64(s: &str) -> Result<Self, Error> {
        Self::from_base64(s, true)
    }

    /// Creates a private key from its Base64 encoding.
    pub fn from_private_base64(s: &str) -> Result<Self, Error> {
        Self::from_base64(s, false)
    }

    /// Creates a public key from raw DER bytes.
    pub fn from_public_der(data: Vec<u8>) -> Result<Self, Error> {
        Self::from_der(data, true)
    }

    /// Creates a private key from raw DER bytes.
    pub fn from_private_der(data: Vec<u8>) -> Result<Self, Error> {
        Self::from_der(data, false)
    }

    fn from_base64(s: &str, is_public: bool) -> Result<Self, Error> {
        let filtered: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let data = STANDARD.decode(filtered).map_err(Error::Base64Decode)?;
        Self::from_der(data, is_public)
    }

    fn from_der(data: Vec<u8>, is_public: bool) -> Result<Self, Error> {
        let key = import_key(&data, is_public)?;
        Ok(RsaKey {
            data,
            is_public,
            key,
        })
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    /// The original encoded form the key was constructed from.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The engine's fixed per-operation block size for this key, in bytes.
    pub fn block_size(&self) -> usize {
        match &self.key {
            SecureKey::Public(key) => key.size(),
            SecureKey::Private(key) => key.size(),
        }
    }

    pub(crate) fn public(&self) -> Result<&RsaPublicKey, Error> {
        match &self.key {
            SecureKey::Public(key) => Ok(key),
            SecureKey::Private(_) => Err(Error::WrongKeyClass("public")),
        }
    }

    pub(crate) fn private(&self) -> Result<&RsaPrivateKey, Error> {
        match &self.key {
            SecureKey::Private(key) => Ok(key),
            SecureKey::Public(_) => Err(Error::WrongKeyClass("private")),
        }
    }
}

fn import_key(data: &[u8], is_public: bool) -> Result<SecureKey, Error> {
    let payload = strip_encoding_header(data)?;
    if is_public {
        RsaPublicKey::from_pkcs1_der(&payload)
            .map(SecureKey::Public)
            .map_err(Error::KeyCreateFailed)
    } else {
        RsaPrivateKey::from_pkcs1_der(&payload)
            .map(SecureKey::Private)
            .map_err(Error::KeyCreateFailed)
    }
}

/// Detects whether encoded key material carries an ASN.1 wrapper and
/// extracts the raw key payload.
///
/// A headerless key is itself a flat sequence of integers (modulus,
/// exponents, ...) and is returned unchanged. Anything else is treated as
/// an envelope whose last child holds the real key as a BIT STRING or
/// OCTET STRING. Only the outermost sequence is inspected; multi-layer
/// wrappers are not unwrapped recursively.
pub fn strip_encoding_header(data: &[u8]) -> Result<Vec<u8>, Error> {
    let node = Node::parse(data).map_err(Error::Asn1)?;
    let Node::Sequence(nodes) = node else {
        return Err(Error::InvalidRootNode);
    };

    if nodes.iter().all(|node| matches!(node, Node::Integer(_))) {
        return Ok(data.to_vec());
    }

    match nodes.last() {
        Some(Node::BitString(payload)) | Some(Node::OctetString(payload)) => Ok(payload.clone()),
        _ => Err(Error::InvalidStructure),
    }
}
