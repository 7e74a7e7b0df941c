//! # Bit input
//!
//! The engine never owns its input. Every call to decode a row gets a
//! [`RawInput`] that borrows the current window of compressed bytes, and
//! the [`BitReader`] (which lives in the restartable decode state) pulls
//! single bytes from it only when its own buffer runs dry.

use crate::{FaxError, FaxResult};

/// Order of writing/reading bits to/from a byte (TIFF `FillOrder` tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillOrder {
    /// A byte is iterated from most- to least-significant bit
    #[default]
    MsbToLsb = 1,
    /// A byte is iterated from lest- to most-significant bit
    LsbToMsb = 2,
}

impl FillOrder {
    /// Get the fill order from the value of the TIFF `FillOrder` tag
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::MsbToLsb),
            2 => Some(Self::LsbToMsb),
            _ => None,
        }
    }

    fn next(&self, buffer: u8) -> (u8, bool) {
        match self {
            FillOrder::MsbToLsb => buffer.overflowing_mul(2),
            FillOrder::LsbToMsb => (buffer >> 1, buffer & 0b1 > 0),
        }
    }
}

/// The window of compressed bytes bound to the engine for one call
#[derive(Debug)]
pub struct RawInput<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> RawInput<'a> {
    /// Bind a byte window
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Number of bytes that have not been pulled yet
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Number of bytes that were pulled from this window
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// The bytes that have not been pulled yet
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }
}

/// Bit cursor into the compressed stream
///
/// This is plain data, so a copy of it is a complete checkpoint of the
/// read position (together with the number of bytes left in the window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitReader {
    buffer: u8,
    avail: u8,
    offset: u64,
}

impl BitReader {
    /// Read a single bit, pulling a new byte from `raw` if necessary
    pub fn next_bit(&mut self, raw: &mut RawInput<'_>, order: FillOrder) -> FaxResult<bool> {
        if self.avail == 0 {
            self.buffer = raw.next_byte().ok_or(FaxError::UnexpectedEof)?;
            self.avail = 8;
            self.offset += 1;
        }
        let (next_buffer, bit) = order.next(self.buffer);
        self.buffer = next_buffer;
        self.avail -= 1;
        Ok(bit)
    }

    /// Read `count` bits (at most 16) into the low bits of a number, first bit highest
    pub fn read_bits(
        &mut self,
        raw: &mut RawInput<'_>,
        order: FillOrder,
        count: u8,
    ) -> FaxResult<u16> {
        debug_assert!(count <= 16);
        let mut value = 0;
        for _ in 0..count {
            value = (value << 1) | u16::from(self.next_bit(raw, order)?);
        }
        Ok(value)
    }

    /// Drop the rest of the current byte
    pub fn align_byte(&mut self) {
        self.buffer = 0;
        self.avail = 0;
    }

    /// Drop the rest of the current byte and skip to an even offset from the strip start
    pub fn align_word(&mut self, raw: &mut RawInput<'_>) -> FaxResult<()> {
        self.align_byte();
        if self.offset % 2 == 1 {
            raw.next_byte().ok_or(FaxError::UnexpectedEof)?;
            self.offset += 1;
        }
        Ok(())
    }

    /// Number of bytes pulled since the start of the strip
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of bits still buffered from the last byte
    pub fn buffered(&self) -> u8 {
        self.avail
    }
}

#[cfg(test)]
mod tests {
    use super::{BitReader, FillOrder, RawInput};
    use crate::FaxError;

    #[test]
    fn test_fill_order_msb_to_lsb() {
        let msbf = FillOrder::MsbToLsb;
        assert_eq!(msbf.next(0b10000000), (0b00000000, true));
        assert_eq!(msbf.next(0b01000000), (0b10000000, false));
        assert_eq!(msbf.next(0b10100000), (0b01000000, true));
    }

    #[test]
    fn test_fill_order_lsb_to_msb() {
        let msbf = FillOrder::LsbToMsb;
        assert_eq!(msbf.next(0b00000001), (0b00000000, true));
        assert_eq!(msbf.next(0b00000010), (0b00000001, false));
        assert_eq!(msbf.next(0b00000101), (0b00000010, true));
    }

    #[test]
    fn test_fill_order_from_tag() {
        assert_eq!(FillOrder::from_u16(1), Some(FillOrder::MsbToLsb));
        assert_eq!(FillOrder::from_u16(2), Some(FillOrder::LsbToMsb));
        assert_eq!(FillOrder::from_u16(0), None);
    }

    #[test]
    fn test_reader_pulls_bytes_lazily() {
        let bytes = [0b1010_0000, 0xFF];
        let mut raw = RawInput::new(&bytes);
        let mut reader = BitReader::default();
        assert_eq!(raw.remaining(), 2);
        assert!(reader.next_bit(&mut raw, FillOrder::MsbToLsb).unwrap());
        assert_eq!(raw.remaining(), 1);
        assert_eq!(reader.buffered(), 7);
        let v = reader.read_bits(&mut raw, FillOrder::MsbToLsb, 7).unwrap();
        assert_eq!(v, 0b010_0000);
        assert_eq!(raw.remaining(), 1);
        assert_eq!(reader.offset(), 1);
    }

    #[test]
    fn test_reader_lsb_first() {
        let bytes = [0b0000_0101];
        let mut raw = RawInput::new(&bytes);
        let mut reader = BitReader::default();
        let v = reader.read_bits(&mut raw, FillOrder::LsbToMsb, 3).unwrap();
        assert_eq!(v, 0b101);
    }

    #[test]
    fn test_reader_eof() {
        let bytes = [0u8];
        let mut raw = RawInput::new(&bytes);
        let mut reader = BitReader::default();
        let result = reader.read_bits(&mut raw, FillOrder::MsbToLsb, 9);
        assert_eq!(result, Err(FaxError::UnexpectedEof));
    }

    #[test]
    fn test_align_word() {
        let bytes = [0xFF, 0x00, 0x80];
        let mut raw = RawInput::new(&bytes);
        let mut reader = BitReader::default();
        reader.next_bit(&mut raw, FillOrder::MsbToLsb).unwrap();
        reader.align_word(&mut raw).unwrap();
        assert_eq!(reader.offset(), 2);
        assert_eq!(raw.rest(), &[0x80]);
        reader.next_bit(&mut raw, FillOrder::MsbToLsb).unwrap();
        assert_eq!(reader.offset(), 3);
        assert_eq!(
            reader.align_word(&mut raw),
            Err(crate::FaxError::UnexpectedEof)
        );
    }
}
