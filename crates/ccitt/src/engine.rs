//! # The decode engine
//!
//! An [`Engine`] is one codec bound to one stream. Its configuration is
//! set once; what changes while decoding is the [`DecodeState`], which can
//! be captured with [`Engine::checkpoint`] and put back with
//! [`Engine::restore`] to retry a row once more input has arrived.

use crate::{
    bits::{FillOrder, RawInput},
    codec::{DecodeState, FaxCodec, FieldInfo, RowContext},
    config::{EngineConfig, EngineFlags, Group3Options, Mode},
    registry::CodecInfo,
    Diagnostics, FaxError, FaxResult, Silent,
};

/// A copy of the decode state, plus the number of input bytes left when it was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    state: DecodeState,
    remaining: usize,
}

impl Checkpoint {
    /// Bytes that were left in the input window
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// The captured decode state
    pub fn state(&self) -> &DecodeState {
        &self.state
    }
}

/// A decompression engine instance
pub struct Engine {
    config: EngineConfig,
    flags: EngineFlags,
    row: u32,
    state: DecodeState,
    codec: Option<Box<dyn FaxCodec>>,
    fields: Vec<FieldInfo>,
    diagnostics: Box<dyn Diagnostics>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Box::new(Silent))
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("flags", &self.flags)
            .field("row", &self.row)
            .field("state", &self.state)
            .field("codec", &self.codec.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl Engine {
    /// Create an engine with the default configuration and no codec
    pub fn new(diagnostics: Box<dyn Diagnostics>) -> Self {
        Self {
            config: EngineConfig::default(),
            flags: EngineFlags::empty(),
            row: 0,
            state: DecodeState::default(),
            codec: None,
            fields: Vec::new(),
            diagnostics,
        }
    }

    /// The configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The engine flags
    pub fn flags(&self) -> EngineFlags {
        self.flags
    }

    /// Set the read/write mode
    pub fn set_mode(&mut self, mode: Mode) {
        self.config.mode = mode;
    }

    /// Set the bit order
    pub fn set_fill_order(&mut self, fill_order: FillOrder) {
        self.config.fill_order = fill_order;
    }

    /// Set the compression scheme
    pub fn set_compression(&mut self, compression: u16) {
        self.config.compression = compression;
    }

    /// Set the Group 3 options
    pub fn set_group3_options(&mut self, options: Group3Options) {
        self.config.group3_options = options;
    }

    /// Set the number of bits per sample
    pub fn set_bits_per_sample(&mut self, bits: u16) {
        self.config.bits_per_sample = bits;
    }

    /// Set the row width in pixels
    pub fn set_image_width(&mut self, width: u32) {
        self.config.image_width = width;
    }

    /// Compute and store the size of a decoded scanline
    pub fn update_scanline_size(&mut self) -> usize {
        self.config.scanline_size = self.config.compute_scanline_size();
        self.config.scanline_size
    }

    /// The size of a decoded scanline in bytes
    pub fn scanline_size(&self) -> usize {
        self.config.scanline_size
    }

    /// Run the `init` hook of `codec` and bind the result
    pub fn init(&mut self, codec: &CodecInfo) -> FaxResult<()> {
        let codec = (codec.init)(&self.config)?;
        self.fields.extend_from_slice(codec.fields());
        self.codec = Some(codec);
        self.flags.insert(EngineFlags::INITIALIZED);
        Ok(())
    }

    /// Name of the bound codec
    pub fn codec_name(&self) -> Option<&'static str> {
        self.codec.as_ref().map(|codec| codec.name())
    }

    /// Tags known to the bound codec
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Whether [`Engine::mark_setup`] was called
    pub fn is_setup(&self) -> bool {
        self.flags.contains(EngineFlags::CODER_SETUP)
    }

    /// Mark the row geometry as set up
    pub fn mark_setup(&mut self) {
        self.flags.insert(EngineFlags::CODER_SETUP);
    }

    fn codec_mut(&mut self) -> FaxResult<&mut Box<dyn FaxCodec>> {
        self.codec.as_mut().ok_or(FaxError::NotSetup)
    }

    /// Run the `setupdecode` hook
    pub fn setup_decode(&mut self) -> FaxResult<()> {
        let config = self.config.clone();
        let result = self.codec_mut()?.setup_decode(&config);
        if let Err(e) = &result {
            self.diagnostics
                .error("setup_decode", format_args!("{}", e));
        }
        result
    }

    /// Run the `predecode` hook
    pub fn pre_decode(&mut self) -> FaxResult<()> {
        let codec = self.codec.as_mut().ok_or(FaxError::NotSetup)?;
        codec.pre_decode(&mut self.state)
    }

    /// The row that is decoded next
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Set the row that is decoded next
    pub fn set_row(&mut self, row: u32) {
        self.row = row;
    }

    /// Move on to the next row
    pub fn advance_row(&mut self) {
        self.row += 1;
    }

    /// The current decode state
    pub fn state(&self) -> &DecodeState {
        &self.state
    }

    /// Capture the decode state
    pub fn checkpoint(&self, raw: &RawInput<'_>) -> Checkpoint {
        Checkpoint {
            state: self.state,
            remaining: raw.remaining(),
        }
    }

    /// Put back a captured decode state
    pub fn restore(&mut self, checkpoint: &Checkpoint) {
        self.state = checkpoint.state;
    }

    /// Run the `decoderow` hook: decode one row from `raw` into `dst`
    pub fn decode_row(&mut self, raw: &mut RawInput<'_>, dst: &mut [u8]) -> FaxResult<()> {
        if !self.is_setup() {
            return Err(FaxError::NotSetup);
        }
        let needed = self.config.scanline_size;
        if dst.len() < needed {
            return Err(FaxError::BufferTooSmall {
                needed,
                actual: dst.len(),
            });
        }
        let codec = self.codec.as_mut().ok_or(FaxError::NotSetup)?;
        let mut cx = RowContext {
            config: &self.config,
            state: &mut self.state,
            raw,
            diagnostics: self.diagnostics.as_ref(),
            row: self.row,
        };
        codec.decode_row(&mut cx, &mut dst[..needed])
    }

    /// Run the `postdecode` hook
    pub fn post_decode(&self, buf: &mut [u8]) {
        if let Some(codec) = &self.codec {
            codec.post_decode(buf);
        }
    }

    /// Run the `cleanup` hook (if a codec is bound) and drop the field table
    ///
    /// Calling this more than once is harmless.
    pub fn cleanup(&mut self) {
        if let Some(mut codec) = self.codec.take() {
            codec.cleanup();
        }
        self.fields = Vec::new();
        self.flags = EngineFlags::empty();
    }
}
