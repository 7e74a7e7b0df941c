//! Stream configuration

use std::{fmt, str::FromStr};

use ccitt_engine::{bits::FillOrder, compression, find_codec, Group3Options};
use serde::Deserialize;

/// How many bytes a call to [`StripDecoder::decode`](crate::StripDecoder::decode) supplies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ByteBudgetMode {
    /// Every call supplies at least this many bytes, and every row is in there
    Bounded(usize),
    /// Calls may supply partial data
    Streaming,
}

impl Default for ByteBudgetMode {
    fn default() -> Self {
        Self::Streaming
    }
}

impl ByteBudgetMode {
    /// Whether partial data is allowed
    pub fn is_streaming(&self) -> bool {
        matches!(self, Self::Streaming)
    }
}

impl From<i32> for ByteBudgetMode {
    /// Negative values mean streaming
    fn from(value: i32) -> Self {
        match usize::try_from(value) {
            Ok(n) => Self::Bounded(n),
            Err(_) => Self::Streaming,
        }
    }
}

/// Everything a [`StripDecoder`](crate::StripDecoder) needs to know about a strip
///
/// ```
/// use fax_strip::{ByteBudgetMode, StreamConfig};
///
/// let config: StreamConfig = ron::from_str("(compression: 4, width: 1728, height: 2)").unwrap();
/// assert_eq!(config.budget, ByteBudgetMode::Streaming);
/// assert_eq!(config.xoff, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamConfig {
    /// TIFF compression scheme
    pub compression: u16,
    /// Bit order within each byte
    #[serde(default)]
    pub fill_order: FillOrder,
    /// Pixels per row
    pub width: u32,
    /// Rows in the strip
    pub height: u32,
    /// Horizontal offset into the raster
    #[serde(default)]
    pub xoff: u32,
    /// Vertical offset into the raster
    #[serde(default)]
    pub yoff: u32,
    /// How the input is supplied
    #[serde(default)]
    pub budget: ByteBudgetMode,
    /// `T4Options` for Group 3 streams
    #[serde(default = "Group3Options::empty")]
    pub group3_options: Group3Options,
}

impl StreamConfig {
    /// A streaming config for a strip at the origin
    pub fn new(compression: u16, width: u32, height: u32) -> Self {
        Self {
            compression,
            fill_order: FillOrder::default(),
            width,
            height,
            xoff: 0,
            yoff: 0,
            budget: ByteBudgetMode::Streaming,
            group3_options: Group3Options::empty(),
        }
    }

    /// Set the byte budget mode
    pub fn with_budget(mut self, budget: ByteBudgetMode) -> Self {
        self.budget = budget;
        self
    }

    /// Set the bit order
    pub fn with_fill_order(mut self, fill_order: FillOrder) -> Self {
        self.fill_order = fill_order;
        self
    }

    /// Set the raster offset
    pub fn with_offset(mut self, xoff: u32, yoff: u32) -> Self {
        self.xoff = xoff;
        self.yoff = yoff;
        self
    }

    /// Set the Group 3 options
    pub fn with_group3_options(mut self, options: Group3Options) -> Self {
        self.group3_options = options;
        self
    }
}

/// A compression scheme given by name or number
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Scheme(pub u16);

#[derive(Debug)]
/// Failed to parse a compression scheme
pub struct SchemeError {}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `rle`, `g3`, `g4`, `rlew` or a TIFF compression number")
    }
}

impl std::error::Error for SchemeError {}

impl FromStr for Scheme {
    type Err = SchemeError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "rle" | "mh" => Ok(Self(compression::CCITT_RLE)),
            "g3" | "fax3" | "t4" => Ok(Self(compression::CCITT_FAX3)),
            "g4" | "fax4" | "t6" => Ok(Self(compression::CCITT_FAX4)),
            "rlew" => Ok(Self(compression::CCITT_RLEW)),
            _ => val.parse().map(Self).map_err(|_| SchemeError {}),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match find_codec(self.0) {
            Some(info) => f.write_str(info.name),
            None => write!(f, "{}", self.0),
        }
    }
}

/// A fill order given by name or TIFF value
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct BitOrder(pub FillOrder);

#[derive(Debug)]
/// Failed to parse a fill order
pub struct BitOrderError {}

impl fmt::Display for BitOrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `msb`, `lsb`, `1` or `2`")
    }
}

impl std::error::Error for BitOrderError {}

impl FromStr for BitOrder {
    type Err = BitOrderError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "msb" | "1" => Ok(Self(FillOrder::MsbToLsb)),
            "lsb" | "2" => Ok(Self(FillOrder::LsbToMsb)),
            _ => Err(BitOrderError {}),
        }
    }
}

impl fmt::Display for BitOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            FillOrder::MsbToLsb => f.write_str("msb"),
            FillOrder::LsbToMsb => f.write_str("lsb"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BitOrder, ByteBudgetMode, Scheme, StreamConfig};
    use ccitt_engine::{bits::FillOrder, compression, Group3Options};

    #[test]
    fn budget_from_legacy_sentinel() {
        assert_eq!(ByteBudgetMode::from(-1), ByteBudgetMode::Streaming);
        assert_eq!(ByteBudgetMode::from(i32::MIN), ByteBudgetMode::Streaming);
        assert_eq!(ByteBudgetMode::from(0), ByteBudgetMode::Bounded(0));
        assert_eq!(ByteBudgetMode::from(5), ByteBudgetMode::Bounded(5));
    }

    #[test]
    fn scheme_names() {
        assert_eq!("g4".parse::<Scheme>().unwrap(), Scheme(compression::CCITT_FAX4));
        assert_eq!("rle".parse::<Scheme>().unwrap(), Scheme(compression::CCITT_RLE));
        assert_eq!("rlew".parse::<Scheme>().unwrap(), Scheme(compression::CCITT_RLEW));
        assert_eq!("3".parse::<Scheme>().unwrap(), Scheme(3));
        assert_eq!("5".parse::<Scheme>().unwrap(), Scheme(5));
        assert!("lzw".parse::<Scheme>().is_err());
        assert_eq!(Scheme(5).to_string(), "5");
    }

    #[test]
    fn bit_order_names() {
        assert_eq!("lsb".parse::<BitOrder>().unwrap().0, FillOrder::LsbToMsb);
        assert_eq!("1".parse::<BitOrder>().unwrap().0, FillOrder::MsbToLsb);
        assert!("3".parse::<BitOrder>().is_err());
    }

    #[test]
    fn read_ron() {
        let text = "(
            compression: 3,
            fill_order: LsbToMsb,
            width: 1728,
            height: 10,
            yoff: 20,
            budget: Bounded(512),
            group3_options: \"TWO_D_ENCODING | FILL_BITS\",
        )";
        let config: StreamConfig = ron::from_str(text).unwrap();
        let expected = StreamConfig::new(compression::CCITT_FAX3, 1728, 10)
            .with_fill_order(FillOrder::LsbToMsb)
            .with_offset(0, 20)
            .with_budget(ByteBudgetMode::Bounded(512))
            .with_group3_options(Group3Options::TWO_D_ENCODING | Group3Options::FILL_BITS);
        assert_eq!(config, expected);
    }
}
