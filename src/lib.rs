#![warn(missing_docs)]
//! # Incremental CCITT strip decoding
//!
//! Feed a CCITT Group 3 or Group 4 compressed strip to a [`StripDecoder`] in
//! chunks of any size. Every row that is fully resolved is copied into the
//! target [`Raster`]; the bytes that belong to an unfinished row are handed
//! back to the caller, who supplies them again with the next chunk.
//!
//! ```
//! use fax_strip::{Bilevel, ChunkFeeder, FeedStatus, Raster, StreamConfig, StripDecoder};
//! use ccitt_engine::compression;
//!
//! // W4 B4, byte aligned, then one byte of padding
//! let input = [0b1011_0110, 0x00];
//! let config = StreamConfig::new(compression::CCITT_RLE, 8, 1);
//! let mut decoder = StripDecoder::new(&config, Bilevel::default()).unwrap();
//! let mut raster = Raster::new(8, 1, 1, 0x00);
//! let mut feeder = ChunkFeeder::new();
//!
//! assert_eq!(
//!     feeder.feed(&mut decoder, &mut raster, &input[..1]).unwrap(),
//!     FeedStatus::Pending { buffered: 1 }
//! );
//! assert_eq!(feeder.feed(&mut decoder, &mut raster, &input[1..]).unwrap(), FeedStatus::Done);
//! assert_eq!(raster.row(0), &[255, 255, 255, 255, 0, 0, 0, 0]);
//! ```

pub mod ascii_art;
mod config;
mod decoder;
mod error;
mod feed;
mod raster;

pub use config::{BitOrder, BitOrderError, ByteBudgetMode, Scheme, SchemeError, StreamConfig};
pub use decoder::{Outcome, StripDecoder};
pub use error::{DecodeError, ErrorKind};
pub use feed::{ChunkFeeder, FeedStatus};
pub use raster::{Bilevel, Raster, RowPlacement};
