//! Engine configuration and flags

use bitflags::bitflags;

use crate::bits::FillOrder;

bitflags! {
    /// Options of the `T4Options` / `Group3Options` TIFF tag
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Group3Options: u32 {
        /// Rows may be 2-dimensionally coded, signalled by a tag bit after each EOL
        const TWO_D_ENCODING = 0b001;
        /// Uncompressed mode may be used
        const UNCOMPRESSED = 0b010;
        /// Fill bits were added before EOL codes so that they end on a byte boundary
        const FILL_BITS = 0b100;
    }
}

bitflags! {
    /// State of the engine itself (not the decoder)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EngineFlags: u32 {
        /// A codec was bound by its `init` hook
        const INITIALIZED = 0b01;
        /// The row geometry was set up and the decoder was prepared
        const CODER_SETUP = 0b10;
    }
}

/// Whether the engine reads or writes compressed data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Decoding
    #[default]
    Read,
    /// Encoding
    Write,
}

/// The settings that stay fixed once decoding starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Decoding or encoding
    pub mode: Mode,
    /// Order of the bits within a byte
    pub fill_order: FillOrder,
    /// TIFF compression scheme
    pub compression: u16,
    /// Pixels per row
    pub image_width: u32,
    /// Bits per sample (1 for bi-level images)
    pub bits_per_sample: u16,
    /// Samples per pixel
    pub samples_per_pixel: u16,
    /// Group 3 coding options
    pub group3_options: Group3Options,
    /// Bytes in a decoded scanline
    pub scanline_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Read,
            fill_order: FillOrder::MsbToLsb,
            compression: 1,
            image_width: 0,
            bits_per_sample: 1,
            samples_per_pixel: 1,
            group3_options: Group3Options::empty(),
            scanline_size: 0,
        }
    }
}

impl EngineConfig {
    /// Compute the size of a decoded scanline in bytes
    pub fn compute_scanline_size(&self) -> usize {
        let bits = self.image_width as usize
            * usize::from(self.bits_per_sample)
            * usize::from(self.samples_per_pixel);
        bits.div_ceil(8)
    }
}
