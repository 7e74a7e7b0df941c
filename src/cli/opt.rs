use std::{io, path::PathBuf};

use ccitt_engine::Group3Options;
use clap::Parser;
use fax_strip::{BitOrder, ByteBudgetMode, Scheme, StreamConfig};
use thiserror::*;

#[derive(Parser)]
/// Decode a raw CCITT fax strip into an image
pub struct Options {
    /// The file with the compressed strip
    pub file: PathBuf,
    /// Where to store the decoded image (PNG)
    #[clap(long, short)]
    pub out: Option<PathBuf>,

    /// Stream parameters passed as command line args
    #[clap(flatten)]
    pub cl_stream: StreamArgs,

    /// Stream parameters as a RON file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Feed the file to the decoder in chunks of this many bytes
    #[clap(long, default_value_t = 4096)]
    pub chunk: usize,
    /// Pass the whole file in a single bounded call
    #[clap(long)]
    pub bounded: bool,

    /// Draw the decoded image to stdout
    #[clap(long)]
    pub print: bool,
    /// Print a table of all decode calls
    #[clap(long)]
    pub stats: bool,
    /// Black is 1 in the output instead of 0
    #[clap(long)]
    pub invert: bool,
}

/// Stream parameters, each overrides the config file
#[derive(Debug, Default, Clone, Parser)]
pub struct StreamArgs {
    /// Compression scheme: "rle", "g3", "g4", "rlew" or a TIFF number
    #[clap(long, short = 'c')]
    pub compression: Option<Scheme>,
    /// Bit order in each byte: "msb" or "lsb"
    #[clap(long)]
    pub fill_order: Option<BitOrder>,
    /// Pixels per row
    #[clap(long, short = 'W')]
    pub width: Option<u32>,
    /// Rows in the strip
    #[clap(long, short = 'H')]
    pub height: Option<u32>,
    /// Horizontal offset into the output
    #[clap(long)]
    pub xoff: Option<u32>,
    /// Vertical offset into the output
    #[clap(long)]
    pub yoff: Option<u32>,
    /// Group 3: rows may be 2D coded
    #[clap(long = "g3-2d")]
    pub g3_2d: bool,
    /// Group 3: EOLs are padded to end on a byte boundary
    #[clap(long = "g3-fill-bits")]
    pub g3_fill_bits: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO Error")]
    Io(#[from] io::Error),
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
    #[error("Missing --{0} (or --config)")]
    Missing(&'static str),
}

impl StreamArgs {
    fn apply(&self, config: &mut StreamConfig) {
        if let Some(scheme) = self.compression {
            config.compression = scheme.0;
        }
        if let Some(order) = self.fill_order {
            config.fill_order = order.0;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(xoff) = self.xoff {
            config.xoff = xoff;
        }
        if let Some(yoff) = self.yoff {
            config.yoff = yoff;
        }
        if self.g3_2d {
            config.group3_options |= Group3Options::TWO_D_ENCODING;
        }
        if self.g3_fill_bits {
            config.group3_options |= Group3Options::FILL_BITS;
        }
    }
}

impl Options {
    /// The stream config from `--config`, overridden by the command line
    pub fn stream_config(&self, file_len: usize) -> Result<StreamConfig, ConfigError> {
        let mut config = if let Some(path) = &self.config {
            let text = std::fs::read_to_string(path)?;
            ron::from_str(&text)?
        } else {
            let args = &self.cl_stream;
            let scheme = args.compression.ok_or(ConfigError::Missing("compression"))?;
            let width = args.width.ok_or(ConfigError::Missing("width"))?;
            let height = args.height.ok_or(ConfigError::Missing("height"))?;
            StreamConfig::new(scheme.0, width, height)
        };
        self.cl_stream.apply(&mut config);
        if self.bounded {
            config.budget = ByteBudgetMode::Bounded(file_len);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Options};
    use ccitt_engine::{bits::FillOrder, compression, Group3Options};
    use clap::Parser;
    use fax_strip::ByteBudgetMode;

    #[test]
    fn from_flags() {
        let opt = Options::parse_from([
            "fax-strip", "in.bin", "-c", "g3", "-W", "1728", "-H", "20", "--fill-order", "lsb",
            "--g3-2d", "--bounded",
        ]);
        let config = opt.stream_config(300).unwrap();
        assert_eq!(config.compression, compression::CCITT_FAX3);
        assert_eq!(config.fill_order, FillOrder::LsbToMsb);
        assert_eq!((config.width, config.height), (1728, 20));
        assert_eq!(config.group3_options, Group3Options::TWO_D_ENCODING);
        assert_eq!(config.budget, ByteBudgetMode::Bounded(300));
    }

    #[test]
    fn missing_height() {
        let opt = Options::parse_from(["fax-strip", "in.bin", "-c", "4", "-W", "8"]);
        assert!(matches!(
            opt.stream_config(1),
            Err(ConfigError::Missing("height"))
        ));
    }
}
