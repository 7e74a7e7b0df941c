#![warn(missing_docs)]
//! # CCITT fax decode engine
//!
//! Decodes Modified Huffman, T.4 (Group 3) and T.6 (Group 4) compressed
//! bi-level images one row at a time. The engine keeps everything it
//! changes while decoding a row in a small [`DecodeState`] that can be
//! captured and restored, so a row that could not be completed with the
//! bytes at hand can be retried once more bytes are available.
//!
//! ```
//! use ccitt_engine::{bits::RawInput, find_codec, compression, Engine};
//!
//! let mut engine = Engine::default();
//! engine.set_compression(compression::CCITT_RLE);
//! engine.init(find_codec(compression::CCITT_RLE).unwrap()).unwrap();
//! engine.set_image_width(8);
//! engine.update_scanline_size();
//! engine.setup_decode().unwrap();
//! engine.pre_decode().unwrap();
//! engine.mark_setup();
//!
//! // W4 B4
//! let mut raw = RawInput::new(&[0b1011_0110]);
//! let mut row = [0u8; 1];
//! engine.decode_row(&mut raw, &mut row).unwrap();
//! assert_eq!(row, [0x0F]);
//! ```

pub mod bits;
mod codec;
mod color;
mod config;
mod diagnostics;
mod engine;
mod error;
mod g3;
mod g42d;
mod line;
mod registry;
mod runs;

pub use codec::{DecodeState, FaxCodec, FieldInfo, RowContext};
pub use color::Color;
pub use config::{EngineConfig, EngineFlags, Group3Options, Mode};
pub use diagnostics::{Diagnostics, LogDiagnostics, Silent};
pub use engine::{Checkpoint, Engine};
pub use error::{FaxError, FaxResult};
pub use line::{ColorLine, Line};
pub use registry::{codecs, compression, find_codec, CodecInfo, InitFn};
