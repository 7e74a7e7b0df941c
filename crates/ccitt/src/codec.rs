//! # The codec capability
//!
//! A codec is selected from the [registry](crate::find_codec) by compression
//! scheme and bound to an [`Engine`](crate::Engine). Everything a codec
//! changes while decoding a row lives in [`DecodeState`]; the rest of the
//! codec (e.g. the scratch line) may only be written in a way that is
//! invisible once the `DecodeState` is put back.

use crate::{
    bits::{BitReader, FillOrder, RawInput},
    runs, Color, Diagnostics, EngineConfig, FaxResult,
};

/// The mutable part of the engine
///
/// This is small, fixed size and [`Copy`], so capturing it costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeState {
    pub(crate) reader: BitReader,
    /// EOL codes seen since `pre_decode`
    pub(crate) eols: u32,
    /// Index of the reference line in the codec's run lines
    pub(crate) reference: usize,
    /// Rows decoded since `pre_decode`
    pub(crate) rows: u32,
}

impl DecodeState {
    /// Bytes pulled from the input since the start of the strip
    pub fn offset(&self) -> u64 {
        self.reader.offset()
    }

    /// Number of EOL codes seen since the start of the strip
    pub fn eols(&self) -> u32 {
        self.eols
    }

    /// Number of rows decoded since the start of the strip
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Make the other line the reference line
    pub(crate) fn swap_lines(&mut self) {
        self.reference ^= 1;
    }
}

/// A tag that is known to a codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// TIFF tag number
    pub tag: u16,
    /// Name of the tag
    pub name: &'static str,
}

/// Everything a codec can touch while decoding a row
pub struct RowContext<'a, 'b> {
    /// The (fixed) configuration
    pub config: &'a EngineConfig,
    /// The restartable state
    pub state: &'a mut DecodeState,
    /// The input window
    pub raw: &'a mut RawInput<'b>,
    /// Where to report problems
    pub diagnostics: &'a dyn Diagnostics,
    /// Index of the row in the image
    pub row: u32,
}

impl RowContext<'_, '_> {
    fn order(&self) -> FillOrder {
        self.config.fill_order
    }

    /// Read one bit
    pub fn bit(&mut self) -> FaxResult<bool> {
        let order = self.order();
        self.state.reader.next_bit(self.raw, order)
    }

    /// Read a run of `color`
    pub fn run(&mut self, color: Color) -> FaxResult<usize> {
        let order = self.order();
        runs::read_run(&mut self.state.reader, self.raw, order, color)
    }

    /// Skip to the next byte
    pub fn align_byte(&mut self) {
        self.state.reader.align_byte();
    }

    /// Skip to the next 16-bit word
    pub fn align_word(&mut self) -> FaxResult<()> {
        self.state.reader.align_word(self.raw)
    }
}

/// The hooks of a decompression engine
pub trait FaxCodec: Send {
    /// Human-readable name of the scheme
    fn name(&self) -> &'static str;

    /// Tags that this codec understands
    fn fields(&self) -> &'static [FieldInfo] {
        &[]
    }

    /// Prepare for decoding rows of the configured geometry
    fn setup_decode(&mut self, config: &EngineConfig) -> FaxResult<()>;

    /// Reset before the first row of a strip
    fn pre_decode(&mut self, state: &mut DecodeState) -> FaxResult<()>;

    /// Decode exactly one row into `dst` (packed, 1 = black)
    fn decode_row(&mut self, cx: &mut RowContext<'_, '_>, dst: &mut [u8]) -> FaxResult<()>;

    /// Normalize a decoded row in place
    fn post_decode(&self, _buf: &mut [u8]) {}

    /// Release resources
    fn cleanup(&mut self) {}
}
