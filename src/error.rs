//! Errors raised while decoding a class file.

use thiserror::Error;

/// Everything that can go wrong while decoding a single class file.
///
/// None of these are recoverable for the class being parsed: the caller either
/// gets a complete [`crate::model::ClassDescriptor`] or one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassFileError {
    #[error("not a class file (magic 0x{magic:08X}, expected 0xCAFEBABE)")]
    NotAClassFile { magic: u32 },

    #[error("truncated input at offset {offset}: needed {requested} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        requested: usize,
        available: usize,
    },

    #[error("unsupported constant pool tag {tag} at index #{index}")]
    UnsupportedConstantTag { tag: u8, index: u16 },

    #[error("invalid constant pool reference #{index}: expected {expected}, found {found}")]
    InvalidConstantPoolReference {
        index: u16,
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ClassFileError>;
