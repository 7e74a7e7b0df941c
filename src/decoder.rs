//! # Incremental strip decoder
//!
//! A [`StripDecoder`] owns one [`Engine`] and resolves as many whole rows as
//! it can from every byte window it is handed. In [`ByteBudgetMode::Streaming`]
//! the engine state is captured before each row and put back when the row can
//! not be confirmed, so the caller can re-feed the unconsumed tail together
//! with the next chunk.

use ccitt_engine::{
    bits::RawInput, find_codec, Diagnostics, Engine, FaxError, Mode, Silent,
};
use log::{debug, trace};

use crate::{
    config::{ByteBudgetMode, StreamConfig},
    error::{DecodeError, ErrorKind},
    raster::{Raster, RowPlacement},
};

/// Successful result of [`StripDecoder::decode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// All rows of the strip are in the raster
    Done,
    /// The first `consumed` bytes were used, supply the rest plus more data
    NeedMoreInput(usize),
}

#[derive(Debug)]
struct CodecState {
    y: u32,
    xoff: u32,
    yoff: u32,
    xsize: u32,
    ysize: u32,
    scanline: Vec<u8>,
    failure: Option<FaxError>,
}

/// Decodes one CCITT strip into a caller supplied raster
pub struct StripDecoder<P> {
    engine: Engine,
    budget: ByteBudgetMode,
    state: CodecState,
    placement: P,
}

impl<P> std::fmt::Debug for StripDecoder<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripDecoder")
            .field("engine", &self.engine)
            .field("budget", &self.budget)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<P: RowPlacement> StripDecoder<P> {
    /// Set up a decoder that does not report diagnostics
    pub fn new(config: &StreamConfig, placement: P) -> Result<Self, DecodeError> {
        Self::with_diagnostics(config, placement, Box::new(Silent))
    }

    /// Set up a decoder that reports engine diagnostics to `diagnostics`
    pub fn with_diagnostics(
        config: &StreamConfig,
        placement: P,
        diagnostics: Box<dyn Diagnostics>,
    ) -> Result<Self, DecodeError> {
        let codec = find_codec(config.compression)
            .ok_or(DecodeError::UnsupportedCompression(config.compression))?;

        let mut engine = Engine::new(diagnostics);
        engine.set_fill_order(config.fill_order);
        engine.set_compression(config.compression);
        engine.set_group3_options(config.group3_options);
        engine.set_mode(Mode::Read);
        if let Err(source) = engine.init(codec) {
            engine.cleanup();
            return Err(DecodeError::InitFailed {
                name: codec.name,
                source,
            });
        }
        debug!(
            "{} decoder for {}x{} at ({}, {}), {:?}",
            codec.name, config.width, config.height, config.xoff, config.yoff, config.budget
        );

        Ok(Self {
            engine,
            budget: config.budget,
            state: CodecState {
                y: 0,
                xoff: config.xoff,
                yoff: config.yoff,
                xsize: config.width,
                ysize: config.height,
                scanline: Vec::new(),
                failure: None,
            },
            placement,
        })
    }

    /// Decode as many rows from `buffer` as possible into `raster`
    ///
    /// In streaming mode, `Ok(Outcome::NeedMoreInput(consumed))` means that the
    /// next call must start with `buffer[consumed..]`.
    pub fn decode(&mut self, buffer: &[u8], raster: &mut Raster) -> Result<Outcome, DecodeError> {
        if let Some(source) = &self.state.failure {
            return Err(DecodeError::DecodeBroken {
                row: self.state.y + self.state.yoff,
                source: source.clone(),
            });
        }
        if self.is_done() {
            return Ok(Outcome::Done);
        }
        if let ByteBudgetMode::Bounded(needed) = self.budget {
            if buffer.len() < needed {
                return Err(DecodeError::InsufficientInput {
                    needed,
                    available: buffer.len(),
                });
            }
        }
        self.check_raster(raster)?;
        if !self.engine.is_setup() {
            if let Err(e) = self.setup() {
                return Err(self.fail(e));
            }
        }

        let streaming = self.budget.is_streaming();
        let pixel_size = raster.pixel_size();
        let start = self.state.xoff as usize * pixel_size;
        let end = start + self.state.xsize as usize * pixel_size;
        let mut raw = RawInput::new(buffer);

        let saved = loop {
            self.engine.set_row(self.state.y + self.state.yoff);
            let saved = streaming.then(|| self.engine.checkpoint(&raw));

            if let Err(e) = self.engine.decode_row(&mut raw, &mut self.state.scanline) {
                match saved {
                    Some(saved) => {
                        trace!("row {}: {}, rolling back", self.state.y, e);
                        break saved;
                    }
                    None => return Err(self.fail(e)),
                }
            }
            if let Some(saved) = saved {
                if raw.remaining() == 0 {
                    trace!("row {}: ends at the end of input, rolling back", self.state.y);
                    break saved;
                }
            }

            self.engine.post_decode(&mut self.state.scanline);
            let row = raster.row_mut(self.state.y + self.state.yoff);
            self.placement.place_row(
                &mut row[start..end],
                &self.state.scanline,
                self.state.xsize as usize,
            );
            self.engine.advance_row();
            self.state.y += 1;
            trace!("row {} done, {} bytes left", self.state.y - 1, raw.remaining());

            if self.is_done() {
                debug!("strip done after {} bytes", raw.consumed());
                return Ok(Outcome::Done);
            }
        };

        self.engine.restore(&saved);
        let consumed = buffer.len() - saved.remaining();
        debug!(
            "{} of {} bytes consumed, {} rows so far",
            consumed,
            buffer.len(),
            self.state.y
        );
        Ok(Outcome::NeedMoreInput(consumed))
    }

    fn setup(&mut self) -> Result<(), FaxError> {
        self.engine.set_bits_per_sample(1);
        self.engine.set_image_width(self.state.xsize);
        let size = self.engine.update_scanline_size();
        self.state.scanline = vec![0; size];
        self.engine.setup_decode()?;
        self.engine.pre_decode()?;
        self.engine.mark_setup();
        trace!("scanline size {}", size);
        Ok(())
    }

    fn check_raster(&self, raster: &Raster) -> Result<(), DecodeError> {
        let s = &self.state;
        let fits_x = u64::from(s.xoff) + u64::from(s.xsize) <= u64::from(raster.width());
        let fits_y = u64::from(s.yoff) + u64::from(s.ysize) <= u64::from(raster.height());
        if fits_x && fits_y {
            Ok(())
        } else {
            Err(DecodeError::RasterTooSmall {
                width: raster.width(),
                height: raster.height(),
                xsize: s.xsize,
                ysize: s.ysize,
                xoff: s.xoff,
                yoff: s.yoff,
            })
        }
    }

    fn fail(&mut self, source: FaxError) -> DecodeError {
        let row = self.state.y + self.state.yoff;
        debug!("row {}: {}", row, source);
        self.state.failure = Some(source.clone());
        DecodeError::DecodeBroken { row, source }
    }
}

impl<P> StripDecoder<P> {
    /// Rows written so far
    pub fn rows(&self) -> u32 {
        self.state.y
    }

    /// Rows in the strip
    pub fn height(&self) -> u32 {
        self.state.ysize
    }

    /// Whether every row was written
    pub fn is_done(&self) -> bool {
        self.state.y >= self.state.ysize
    }

    /// The byte budget mode
    pub fn budget(&self) -> ByteBudgetMode {
        self.budget
    }

    /// The kind of the error that broke the decoder, if any
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.state.failure.as_ref().map(|_| ErrorKind::DecodeBroken)
    }

    /// The underlying engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The row placement
    pub fn placement(&self) -> &P {
        &self.placement
    }

    /// The row placement, mutably
    pub fn placement_mut(&mut self) -> &mut P {
        &mut self.placement
    }

    /// Release the codec. Also happens on drop.
    pub fn cleanup(&mut self) {
        self.engine.cleanup();
    }
}

impl<P> Drop for StripDecoder<P> {
    fn drop(&mut self) {
        self.engine.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::{Outcome, StripDecoder};
    use crate::{
        config::{ByteBudgetMode, StreamConfig},
        error::{DecodeError, ErrorKind},
        raster::{Bilevel, Raster},
    };
    use ccitt_engine::{compression, FaxError, Group3Options};

    #[test]
    fn unsupported_compression() {
        let config = StreamConfig::new(5, 8, 1);
        let err = StripDecoder::new(&config, Bilevel::default()).unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedCompression(5));
    }

    #[test]
    fn init_failure() {
        let config = StreamConfig::new(compression::CCITT_FAX3, 8, 1)
            .with_group3_options(Group3Options::UNCOMPRESSED);
        let err = StripDecoder::new(&config, Bilevel::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InitFailed {
                source: FaxError::UncompressedModeNotSupported,
                ..
            }
        ));
    }

    #[test]
    fn rle_bounded() {
        // W4 B4 | W2 B6
        let input = [0b1011_0110, 0b0111_0010];
        let config = StreamConfig::new(compression::CCITT_RLE, 8, 2)
            .with_budget(ByteBudgetMode::Bounded(2));
        let mut decoder = StripDecoder::new(&config, Bilevel::default()).unwrap();
        let mut raster = Raster::new(8, 2, 1, 0x55);
        assert_eq!(decoder.decode(&input, &mut raster), Ok(Outcome::Done));
        assert_eq!(raster.row(0), &[255, 255, 255, 255, 0, 0, 0, 0]);
        assert_eq!(raster.row(1), &[255, 255, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decoder.decode(&[], &mut raster), Ok(Outcome::Done));
    }

    #[test]
    fn bounded_failure_is_latched() {
        // W4, then an invalid black code
        let input = [0b1011_0000, 0b0000_0000];
        let config = StreamConfig::new(compression::CCITT_RLE, 8, 1)
            .with_budget(ByteBudgetMode::Bounded(2));
        let mut decoder = StripDecoder::new(&config, Bilevel::default()).unwrap();
        let mut raster = Raster::new(8, 1, 1, 0x55);
        let first = decoder.decode(&input, &mut raster).unwrap_err();
        assert_eq!(first.kind(), ErrorKind::DecodeBroken);
        assert_eq!(decoder.last_error(), Some(ErrorKind::DecodeBroken));
        let second = decoder.decode(&[0xFF, 0xFF], &mut raster).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(raster.row(0), &[0x55; 8]);
    }

    #[test]
    fn invalid_width_breaks_setup() {
        let config = StreamConfig::new(compression::CCITT_FAX4, 0, 1);
        let mut decoder = StripDecoder::new(&config, Bilevel::default()).unwrap();
        let mut raster = Raster::new(8, 1, 1, 0);
        let err = decoder.decode(&[0xFF], &mut raster).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::DecodeBroken {
                row: 0,
                source: FaxError::InvalidWidth(0)
            }
        ));
    }

    #[test]
    fn raster_too_small() {
        let config = StreamConfig::new(compression::CCITT_RLE, 8, 2).with_offset(1, 0);
        let mut decoder = StripDecoder::new(&config, Bilevel::default()).unwrap();
        let mut raster = Raster::new(8, 2, 1, 0);
        let err = decoder.decode(&[0xFF], &mut raster).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RasterTooSmall);
        assert!(!decoder.engine().is_setup());
    }

    #[test]
    fn offset_placement() {
        // W4 B4, then padding
        let input = [0b1011_0110, 0x00];
        let config = StreamConfig::new(compression::CCITT_RLE, 8, 1).with_offset(2, 1);
        let mut decoder = StripDecoder::new(&config, Bilevel::default()).unwrap();
        let mut raster = Raster::new(12, 3, 1, 0x55);
        assert_eq!(decoder.decode(&input, &mut raster), Ok(Outcome::Done));
        assert_eq!(raster.row(0), &[0x55; 12]);
        assert_eq!(
            raster.row(1),
            &[0x55, 0x55, 255, 255, 255, 255, 0, 0, 0, 0, 0x55, 0x55]
        );
        assert_eq!(raster.row(2), &[0x55; 12]);
    }

    #[test]
    fn cleanup_twice() {
        let config = StreamConfig::new(compression::CCITT_FAX4, 8, 1);
        let mut decoder = StripDecoder::new(&config, Bilevel::default()).unwrap();
        assert_eq!(decoder.engine().codec_name(), Some("CCITT Group 4"));
        decoder.cleanup();
        decoder.cleanup();
        assert_eq!(decoder.engine().codec_name(), None);
    }
}
