//! Errors raised while reading text bytes supplied from outside the engine.

/// Why a byte sequence was rejected. Offsets are byte offsets into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("invalid lead byte {byte:#04x} at offset {offset}")]
    InvalidLead { offset: usize, byte: u8 },
    #[error("invalid continuation byte at offset {offset}")]
    InvalidContinuation { offset: usize },
    #[error("truncated sequence at offset {offset}")]
    Truncated { offset: usize },
    #[error("overlong sequence at offset {offset}")]
    Overlong { offset: usize },
    #[error("four byte sequence at offset {offset} is not allowed in compact text")]
    FourByteSequence { offset: usize },
    #[error("code point above U+10FFFF at offset {offset}")]
    OutOfRange { offset: usize },
}
