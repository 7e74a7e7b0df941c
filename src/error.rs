use ccitt_engine::FaxError;
use thiserror::Error;

/// Failure of a [`StripDecoder`](crate::StripDecoder) call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A bounded call was given fewer bytes than promised
    #[error("insufficient input: {available} bytes given, {needed} expected")]
    InsufficientInput {
        /// The byte budget of the stream
        needed: usize,
        /// The length of the supplied buffer
        available: usize,
    },
    /// The engine failed on a row and can not continue
    #[error("decoding broke at row {row}")]
    DecodeBroken {
        /// The raster row that was being decoded
        row: u32,
        /// What the engine reported
        #[source]
        source: FaxError,
    },
    /// No codec is registered for the compression scheme
    #[error("unsupported compression scheme {0}")]
    UnsupportedCompression(u16),
    /// The `init` hook of the codec failed
    #[error("failed to initialize the {name} codec")]
    InitFailed {
        /// Name of the codec
        name: &'static str,
        /// What the codec reported
        #[source]
        source: FaxError,
    },
    /// The target raster can not hold the strip at its offset
    #[error("raster of {width}x{height} can not hold {xsize}x{ysize} at ({xoff}, {yoff})")]
    RasterTooSmall {
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
        /// Strip width
        xsize: u32,
        /// Strip height
        ysize: u32,
        /// Horizontal offset
        xoff: u32,
        /// Vertical offset
        yoff: u32,
    },
    /// The input ended before the last row of the strip
    #[error("input ended after {rows} of {height} rows ({buffered} bytes left over)")]
    Incomplete {
        /// Rows that were written
        rows: u32,
        /// Rows in the strip
        height: u32,
        /// Bytes that could not be decoded
        buffered: usize,
    },
}

/// Coarse classification of a [`DecodeError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`DecodeError::InsufficientInput`]
    InsufficientInput,
    /// See [`DecodeError::DecodeBroken`]
    DecodeBroken,
    /// See [`DecodeError::UnsupportedCompression`]
    UnsupportedCompression,
    /// See [`DecodeError::InitFailed`]
    InitFailed,
    /// See [`DecodeError::RasterTooSmall`]
    RasterTooSmall,
    /// See [`DecodeError::Incomplete`]
    Incomplete,
}

impl DecodeError {
    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientInput { .. } => ErrorKind::InsufficientInput,
            Self::DecodeBroken { .. } => ErrorKind::DecodeBroken,
            Self::UnsupportedCompression(_) => ErrorKind::UnsupportedCompression,
            Self::InitFailed { .. } => ErrorKind::InitFailed,
            Self::RasterTooSmall { .. } => ErrorKind::RasterTooSmall,
            Self::Incomplete { .. } => ErrorKind::Incomplete,
        }
    }
}
