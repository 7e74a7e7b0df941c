//! Lookup of codecs by TIFF compression scheme

use crate::{
    codec::FaxCodec,
    config::{EngineConfig, Group3Options, Mode},
    g3::{Alignment, Group3, ModifiedHuffman},
    g42d::Group4,
    FaxError, FaxResult,
};

/// Values of the TIFF `Compression` tag that have a codec
pub mod compression {
    /// CCITT modified Huffman RLE
    pub const CCITT_RLE: u16 = 2;
    /// CCITT Group 3 fax encoding (T.4)
    pub const CCITT_FAX3: u16 = 3;
    /// CCITT Group 4 fax encoding (T.6)
    pub const CCITT_FAX4: u16 = 4;
    /// CCITT modified Huffman RLE with word alignment
    pub const CCITT_RLEW: u16 = 32771;
}

/// The `init` hook: create a codec for the given configuration
pub type InitFn = fn(&EngineConfig) -> FaxResult<Box<dyn FaxCodec>>;

/// A registered codec
#[derive(Debug, Clone, Copy)]
pub struct CodecInfo {
    /// Name of the scheme
    pub name: &'static str,
    /// TIFF compression scheme
    pub scheme: u16,
    /// Create the codec
    pub init: InitFn,
}

fn check_mode(config: &EngineConfig) -> FaxResult<()> {
    match config.mode {
        Mode::Read => Ok(()),
        Mode::Write => Err(FaxError::WriteNotSupported),
    }
}

fn init_rle(config: &EngineConfig) -> FaxResult<Box<dyn FaxCodec>> {
    check_mode(config)?;
    Ok(Box::new(ModifiedHuffman::new("CCITT RLE", Alignment::Byte)))
}

fn init_rlew(config: &EngineConfig) -> FaxResult<Box<dyn FaxCodec>> {
    check_mode(config)?;
    Ok(Box::new(ModifiedHuffman::new("CCITT RLEW", Alignment::Word)))
}

fn init_fax3(config: &EngineConfig) -> FaxResult<Box<dyn FaxCodec>> {
    check_mode(config)?;
    if config.group3_options.contains(Group3Options::UNCOMPRESSED) {
        return Err(FaxError::UncompressedModeNotSupported);
    }
    Ok(Box::new(Group3::new(config.group3_options)))
}

fn init_fax4(config: &EngineConfig) -> FaxResult<Box<dyn FaxCodec>> {
    check_mode(config)?;
    Ok(Box::new(Group4::new()))
}

static CODECS: &[CodecInfo] = &[
    CodecInfo {
        name: "CCITT RLE",
        scheme: compression::CCITT_RLE,
        init: init_rle,
    },
    CodecInfo {
        name: "CCITT Group 3",
        scheme: compression::CCITT_FAX3,
        init: init_fax3,
    },
    CodecInfo {
        name: "CCITT Group 4",
        scheme: compression::CCITT_FAX4,
        init: init_fax4,
    },
    CodecInfo {
        name: "CCITT RLEW",
        scheme: compression::CCITT_RLEW,
        init: init_rlew,
    },
];

/// Find the codec for a compression scheme
pub fn find_codec(scheme: u16) -> Option<&'static CodecInfo> {
    CODECS.iter().find(|codec| codec.scheme == scheme)
}

/// All registered codecs
pub fn codecs() -> &'static [CodecInfo] {
    CODECS
}

#[cfg(test)]
mod tests {
    use super::{compression, find_codec};
    use crate::{EngineConfig, FaxError, Group3Options, Mode};

    #[test]
    fn test_find_codec() {
        assert_eq!(find_codec(compression::CCITT_FAX4).unwrap().name, "CCITT Group 4");
        assert_eq!(find_codec(32771).unwrap().name, "CCITT RLEW");
        assert!(find_codec(1).is_none());
        assert!(find_codec(5).is_none());
    }

    #[test]
    fn test_init_rejects_write_mode() {
        let config = EngineConfig {
            mode: Mode::Write,
            ..Default::default()
        };
        let codec = find_codec(compression::CCITT_RLE).unwrap();
        assert_eq!((codec.init)(&config).err(), Some(FaxError::WriteNotSupported));
    }

    #[test]
    fn test_init_rejects_uncompressed_mode() {
        let config = EngineConfig {
            group3_options: Group3Options::UNCOMPRESSED,
            ..Default::default()
        };
        let codec = find_codec(compression::CCITT_FAX3).unwrap();
        assert_eq!(
            (codec.init)(&config).err(),
            Some(FaxError::UncompressedModeNotSupported)
        );
    }
}
