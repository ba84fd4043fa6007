//! Restricted DER decoder.
//!
//! Decodes the small node grammar found in encoded key material (NULL,
//! INTEGER, BIT STRING, OCTET STRING, OBJECT IDENTIFIER, SEQUENCE) into a
//! [`Node`] tree. A single forward pass, no backtracking; every nested
//! construct is parsed inside its own declared content region, so a
//! malformed inner length cannot overrun into sibling data.

use nom::Parser;

pub mod error;

pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    Integer = 0x02,
    BitString = 0x03,
    OctetString = 0x04,
    Null = 0x05,
    ObjectIdentifier = 0x06,
    Sequence = 0x30,
}

impl TryFrom<u8> for Tag {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x02 => Ok(Self::Integer),
            0x03 => Ok(Self::BitString),
            0x04 => Ok(Self::OctetString),
            0x05 => Ok(Self::Null),
            0x06 => Ok(Self::ObjectIdentifier),
            0x30 => Ok(Self::Sequence),
            _ => Err(Error::InvalidTag(value)),
        }
    }
}

/// A decoded node.
///
/// BIT STRING payloads have their leading unused-bits count byte already
/// stripped; all other payloads are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Null,
    Sequence(Vec<Node>),
    Integer(Vec<u8>),
    ObjectIdentifier(Vec<u8>),
    BitString(Vec<u8>),
    OctetString(Vec<u8>),
}

impl Node {
    /// Decodes the first node in `input`. Trailing bytes after the root
    /// node are ignored.
    pub fn parse(input: &[u8]) -> Result<Node, Error> {
        let (_, node) = parse_node(input)?;
        Ok(node)
    }
}

fn consume_byte(input: &[u8]) -> Result<(&[u8], u8), Error> {
    nom::number::be_u8()
        .parse(input)
        .map_err(|_: nom::Err<nom::error::Error<&[u8]>>| Error::OutOfBounds)
}

fn consume(input: &[u8], length: usize) -> Result<(&[u8], &[u8]), Error> {
    nom::bytes::complete::take(length)
        .parse(input)
        .map_err(|_: nom::Err<nom::error::Error<&[u8]>>| Error::OutOfBounds)
}

fn parse_length(input: &[u8]) -> Result<(&[u8], usize), Error> {
    let (input, n) = consume_byte(input)?;
    if n & 0x80 == 0x80 {
        // Long form: the low 7 bits give the byte count of a big-endian
        // unsigned length that follows.
        let (input, bytes) = consume(input, (n & 0x7f) as usize)?;
        let length = bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
        let length = usize::try_from(length).map_err(|_| Error::InvalidLength)?;
        return Ok((input, length));
    }
    // Short form: 0-127.
    Ok((input, n as usize))
}

fn parse_node(input: &[u8]) -> Result<(&[u8], Node), Error> {
    let (input, byte) = consume_byte(input)?;
    match Tag::try_from(byte)? {
        Tag::Integer => {
            let (input, length) = parse_length(input)?;
            let (input, data) = consume(input, length)?;
            Ok((input, Node::Integer(data.to_vec())))
        }
        Tag::BitString => {
            let (input, length) = parse_length(input)?;
            // The first content byte counts the unused bits in the final
            // byte; the payload is the remaining length - 1 bytes.
            let payload_length = length.checked_sub(1).ok_or(Error::InvalidLength)?;
            let (input, _) = consume(input, 1)?;
            let (input, data) = consume(input, payload_length)?;
            Ok((input, Node::BitString(data.to_vec())))
        }
        Tag::OctetString => {
            let (input, length) = parse_length(input)?;
            let (input, data) = consume(input, length)?;
            Ok((input, Node::OctetString(data.to_vec())))
        }
        Tag::Null => {
            // NULL carries no content; discard its single length byte.
            let (input, _) = consume(input, 1)?;
            Ok((input, Node::Null))
        }
        Tag::ObjectIdentifier => {
            let (input, length) = parse_length(input)?;
            let (input, data) = consume(input, length)?;
            Ok((input, Node::ObjectIdentifier(data.to_vec())))
        }
        Tag::Sequence => {
            let (input, length) = parse_length(input)?;
            let (input, region) = consume(input, length)?;
            Ok((input, Node::Sequence(parse_sequence(region)?)))
        }
    }
}

fn parse_sequence(mut input: &[u8]) -> Result<Vec<Node>, Error> {
    let mut nodes = Vec::new();
    while !input.is_empty() {
        let (rest, node) = parse_node(input)?;
        input = rest;
        nodes.push(node);
    }
    Ok(nodes)
}
