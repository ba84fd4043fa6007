use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("read out of bounds")]
    OutOfBounds,
    #[error("unrecognized tag 0x{0:02x}")]
    InvalidTag(u8),
    #[error("invalid length field")]
    InvalidLength,
}
