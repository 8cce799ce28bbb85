use alloc::string::String;
use enough::StopReason;

/// Errors from PNM parsing, encoding and buffer operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("point ({x}, {y}) outside {width}x{height} image")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("invalid pixel data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u64, height: u64 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    /// File or stream failure from the `std`-only helpers in [`crate::io`].
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for PnmError {
    fn from(e: std::io::Error) -> Self {
        PnmError::Io(alloc::format!("{e}"))
    }
}
