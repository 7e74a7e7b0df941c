/// An error when decoding a row of a CCITT encoded bi-level image
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FaxError {
    /// The input window ended in the middle of a code
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A bit pattern that is not a valid run-length code
    #[error("invalid {color:?} run-length code {bits:#b} ({len} bits)")]
    InvalidRunCode {
        /// Color of the run that was being decoded
        color: crate::Color,
        /// The bits read so far
        bits: u16,
        /// How many bits were read
        len: u8,
    },
    /// A changing element or run ended beyond the end of the row
    #[error("row overrun: position {pos} exceeds width {width}")]
    RowOverrun {
        /// The position that was reached
        pos: usize,
        /// The row width
        width: usize,
    },
    /// A vertical mode code moved a1 to the left of a0
    #[error("vertical mode moved to {a1} before a0 = {a0}")]
    NegativeRun {
        /// Current changing element
        a0: usize,
        /// Requested next changing element
        a1: usize,
    },
    /// An extension code (e.g. uncompressed mode) was found
    #[error("unsupported extension code {0:#05b}")]
    UnsupportedExtension(u8),
    /// An EOL or EOFB was found where a mode code was expected
    #[error("end of facsimile block")]
    EndOfBlock,
    /// No codec for that compression scheme
    #[error("unsupported compression scheme {0}")]
    UnsupportedCompression(u16),
    /// The engine is not configured for decoding
    #[error("encoding is not supported")]
    WriteNotSupported,
    /// Group 3 uncompressed mode was requested
    #[error("uncompressed mode is not supported")]
    UncompressedModeNotSupported,
    /// The image width is not usable
    #[error("invalid image width {0}")]
    InvalidWidth(u32),
    /// A row was requested before the codec was set up
    #[error("codec is not set up for decoding")]
    NotSetup,
    /// The scratch buffer can not hold a scanline
    #[error("scanline buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall {
        /// The scanline size
        needed: usize,
        /// The buffer size
        actual: usize,
    },
}

impl FaxError {
    /// Whether the error may go away when more input is supplied
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEof)
    }
}

/// Type alias for convenience
pub type FaxResult<T> = Result<T, FaxError>;
