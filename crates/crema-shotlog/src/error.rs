use thiserror::Error;

/// A binary file that cannot be one of ours.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("file too small: {actual} bytes, need at least {expected}")]
    TooSmall { expected: usize, actual: usize },

    #[error("bad magic: expected 0x{expected:08x}, got 0x{found:08x}")]
    BadMagic { expected: u32, found: u32 },

    #[error("unexpected header size {found} (expected {expected})")]
    HeaderSize { expected: usize, found: usize },

    #[error("unsupported record size {found} (expected {expected})")]
    RecordSize { expected: usize, found: usize },

    #[error("file truncated: {actual} bytes, expected {expected}")]
    Truncated { expected: usize, actual: usize },
}
