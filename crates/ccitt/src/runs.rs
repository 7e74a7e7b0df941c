//! # Run-length codes (ITU-T T.4, Tables 2 and 3)
//!
//! Every run is a (possibly empty) sequence of make-up codes followed by
//! exactly one terminating code. The tables are sorted by code length and
//! then by code, so a prefix can be looked up after every bit.

use crate::{
    bits::{BitReader, FillOrder, RawInput},
    Color, FaxError, FaxResult,
};

/// Longest code in either table
const MAX_CODE_LEN: u8 = 13;

#[derive(Debug, Copy, Clone)]
pub(crate) struct RunCode {
    len: u8,
    code: u16,
    run: u16,
}

impl RunCode {
    const fn new(len: u8, code: u16, run: u16) -> Self {
        Self { len, code, run }
    }
}

fn lookup(table: &[RunCode], len: u8, code: u16) -> Option<u16> {
    table
        .binary_search_by(|c| (c.len, c.code).cmp(&(len, code)))
        .ok()
        .map(|index| table[index].run)
}

/// Read a single make-up or terminating code
pub(crate) fn read_code(
    reader: &mut BitReader,
    raw: &mut RawInput<'_>,
    order: FillOrder,
    color: Color,
) -> FaxResult<u16> {
    let table: &[RunCode] = match color {
        Color::White => &WHITE_CODES,
        Color::Black => &BLACK_CODES,
    };
    let mut code = 0;
    for len in 1..=MAX_CODE_LEN {
        code = (code << 1) | u16::from(reader.next_bit(raw, order)?);
        if let Some(run) = lookup(table, len, code) {
            return Ok(run);
        }
    }
    Err(FaxError::InvalidRunCode {
        color,
        bits: code,
        len: MAX_CODE_LEN,
    })
}

/// Read a complete run: make-up codes until the terminating code
pub(crate) fn read_run(
    reader: &mut BitReader,
    raw: &mut RawInput<'_>,
    order: FillOrder,
    color: Color,
) -> FaxResult<usize> {
    let mut sum = 0;
    loop {
        let v = read_code(reader, raw, order, color)?;
        sum += usize::from(v);
        if v < 64 {
            break Ok(sum);
        }
    }
}

#[rustfmt::skip]
pub(crate) const WHITE_CODES: [RunCode; 104] = [
    RunCode::new(4, 0b0111, 2),
    RunCode::new(4, 0b1000, 3),
    RunCode::new(4, 0b1011, 4),
    RunCode::new(4, 0b1100, 5),
    RunCode::new(4, 0b1110, 6),
    RunCode::new(4, 0b1111, 7),
    RunCode::new(5, 0b00111, 10),
    RunCode::new(5, 0b01000, 11),
    RunCode::new(5, 0b10010, 128),
    RunCode::new(5, 0b10011, 8),
    RunCode::new(5, 0b10100, 9),
    RunCode::new(5, 0b11011, 64),
    RunCode::new(6, 0b000011, 13),
    RunCode::new(6, 0b000111, 1),
    RunCode::new(6, 0b001000, 12),
    RunCode::new(6, 0b010111, 192),
    RunCode::new(6, 0b011000, 1664),
    RunCode::new(6, 0b101010, 16),
    RunCode::new(6, 0b101011, 17),
    RunCode::new(6, 0b110100, 14),
    RunCode::new(6, 0b110101, 15),
    RunCode::new(7, 0b0000011, 22),
    RunCode::new(7, 0b0000100, 23),
    RunCode::new(7, 0b0001000, 20),
    RunCode::new(7, 0b0001100, 19),
    RunCode::new(7, 0b0010011, 26),
    RunCode::new(7, 0b0010111, 21),
    RunCode::new(7, 0b0011000, 28),
    RunCode::new(7, 0b0100100, 27),
    RunCode::new(7, 0b0100111, 18),
    RunCode::new(7, 0b0101000, 24),
    RunCode::new(7, 0b0101011, 25),
    RunCode::new(7, 0b0110111, 256),
    RunCode::new(8, 0b00000010, 29),
    RunCode::new(8, 0b00000011, 30),
    RunCode::new(8, 0b00000100, 45),
    RunCode::new(8, 0b00000101, 46),
    RunCode::new(8, 0b00001010, 47),
    RunCode::new(8, 0b00001011, 48),
    RunCode::new(8, 0b00010010, 33),
    RunCode::new(8, 0b00010011, 34),
    RunCode::new(8, 0b00010100, 35),
    RunCode::new(8, 0b00010101, 36),
    RunCode::new(8, 0b00010110, 37),
    RunCode::new(8, 0b00010111, 38),
    RunCode::new(8, 0b00011010, 31),
    RunCode::new(8, 0b00011011, 32),
    RunCode::new(8, 0b00100100, 53),
    RunCode::new(8, 0b00100101, 54),
    RunCode::new(8, 0b00101000, 39),
    RunCode::new(8, 0b00101001, 40),
    RunCode::new(8, 0b00101010, 41),
    RunCode::new(8, 0b00101011, 42),
    RunCode::new(8, 0b00101100, 43),
    RunCode::new(8, 0b00101101, 44),
    RunCode::new(8, 0b00110010, 61),
    RunCode::new(8, 0b00110011, 62),
    RunCode::new(8, 0b00110100, 63),
    RunCode::new(8, 0b00110101, 0),
    RunCode::new(8, 0b00110110, 320),
    RunCode::new(8, 0b00110111, 384),
    RunCode::new(8, 0b01001010, 59),
    RunCode::new(8, 0b01001011, 60),
    RunCode::new(8, 0b01010010, 49),
    RunCode::new(8, 0b01010011, 50),
    RunCode::new(8, 0b01010100, 51),
    RunCode::new(8, 0b01010101, 52),
    RunCode::new(8, 0b01011000, 55),
    RunCode::new(8, 0b01011001, 56),
    RunCode::new(8, 0b01011010, 57),
    RunCode::new(8, 0b01011011, 58),
    RunCode::new(8, 0b01100100, 448),
    RunCode::new(8, 0b01100101, 512),
    RunCode::new(8, 0b01100111, 640),
    RunCode::new(8, 0b01101000, 576),
    RunCode::new(9, 0b010011000, 1472),
    RunCode::new(9, 0b010011001, 1536),
    RunCode::new(9, 0b010011010, 1600),
    RunCode::new(9, 0b010011011, 1728),
    RunCode::new(9, 0b011001100, 704),
    RunCode::new(9, 0b011001101, 768),
    RunCode::new(9, 0b011010010, 832),
    RunCode::new(9, 0b011010011, 896),
    RunCode::new(9, 0b011010100, 960),
    RunCode::new(9, 0b011010101, 1024),
    RunCode::new(9, 0b011010110, 1088),
    RunCode::new(9, 0b011010111, 1152),
    RunCode::new(9, 0b011011000, 1216),
    RunCode::new(9, 0b011011001, 1280),
    RunCode::new(9, 0b011011010, 1344),
    RunCode::new(9, 0b011011011, 1408),
    RunCode::new(11, 0b00000001000, 1792),
    RunCode::new(11, 0b00000001100, 1856),
    RunCode::new(11, 0b00000001101, 1920),
    RunCode::new(12, 0b000000010010, 1984),
    RunCode::new(12, 0b000000010011, 2048),
    RunCode::new(12, 0b000000010100, 2112),
    RunCode::new(12, 0b000000010101, 2176),
    RunCode::new(12, 0b000000010110, 2240),
    RunCode::new(12, 0b000000010111, 2304),
    RunCode::new(12, 0b000000011100, 2368),
    RunCode::new(12, 0b000000011101, 2432),
    RunCode::new(12, 0b000000011110, 2496),
    RunCode::new(12, 0b000000011111, 2560),
];

#[rustfmt::skip]
pub(crate) const BLACK_CODES: [RunCode; 104] = [
    RunCode::new(2, 0b10, 3),
    RunCode::new(2, 0b11, 2),
    RunCode::new(3, 0b010, 1),
    RunCode::new(3, 0b011, 4),
    RunCode::new(4, 0b0010, 6),
    RunCode::new(4, 0b0011, 5),
    RunCode::new(5, 0b00011, 7),
    RunCode::new(6, 0b000100, 9),
    RunCode::new(6, 0b000101, 8),
    RunCode::new(7, 0b0000100, 10),
    RunCode::new(7, 0b0000101, 11),
    RunCode::new(7, 0b0000111, 12),
    RunCode::new(8, 0b00000100, 13),
    RunCode::new(8, 0b00000111, 14),
    RunCode::new(9, 0b000011000, 15),
    RunCode::new(10, 0b0000001000, 18),
    RunCode::new(10, 0b0000001111, 64),
    RunCode::new(10, 0b0000010111, 16),
    RunCode::new(10, 0b0000011000, 17),
    RunCode::new(10, 0b0000110111, 0),
    RunCode::new(11, 0b00000001000, 1792),
    RunCode::new(11, 0b00000001100, 1856),
    RunCode::new(11, 0b00000001101, 1920),
    RunCode::new(11, 0b00000010111, 24),
    RunCode::new(11, 0b00000011000, 25),
    RunCode::new(11, 0b00000101000, 23),
    RunCode::new(11, 0b00000110111, 22),
    RunCode::new(11, 0b00001100111, 19),
    RunCode::new(11, 0b00001101000, 20),
    RunCode::new(11, 0b00001101100, 21),
    RunCode::new(12, 0b000000010010, 1984),
    RunCode::new(12, 0b000000010011, 2048),
    RunCode::new(12, 0b000000010100, 2112),
    RunCode::new(12, 0b000000010101, 2176),
    RunCode::new(12, 0b000000010110, 2240),
    RunCode::new(12, 0b000000010111, 2304),
    RunCode::new(12, 0b000000011100, 2368),
    RunCode::new(12, 0b000000011101, 2432),
    RunCode::new(12, 0b000000011110, 2496),
    RunCode::new(12, 0b000000011111, 2560),
    RunCode::new(12, 0b000000100100, 52),
    RunCode::new(12, 0b000000100111, 55),
    RunCode::new(12, 0b000000101000, 56),
    RunCode::new(12, 0b000000101011, 59),
    RunCode::new(12, 0b000000101100, 60),
    RunCode::new(12, 0b000000110011, 320),
    RunCode::new(12, 0b000000110100, 384),
    RunCode::new(12, 0b000000110101, 448),
    RunCode::new(12, 0b000000110111, 53),
    RunCode::new(12, 0b000000111000, 54),
    RunCode::new(12, 0b000001010010, 50),
    RunCode::new(12, 0b000001010011, 51),
    RunCode::new(12, 0b000001010100, 44),
    RunCode::new(12, 0b000001010101, 45),
    RunCode::new(12, 0b000001010110, 46),
    RunCode::new(12, 0b000001010111, 47),
    RunCode::new(12, 0b000001011000, 57),
    RunCode::new(12, 0b000001011001, 58),
    RunCode::new(12, 0b000001011010, 61),
    RunCode::new(12, 0b000001011011, 256),
    RunCode::new(12, 0b000001100100, 48),
    RunCode::new(12, 0b000001100101, 49),
    RunCode::new(12, 0b000001100110, 62),
    RunCode::new(12, 0b000001100111, 63),
    RunCode::new(12, 0b000001101000, 30),
    RunCode::new(12, 0b000001101001, 31),
    RunCode::new(12, 0b000001101010, 32),
    RunCode::new(12, 0b000001101011, 33),
    RunCode::new(12, 0b000001101100, 40),
    RunCode::new(12, 0b000001101101, 41),
    RunCode::new(12, 0b000011001000, 128),
    RunCode::new(12, 0b000011001001, 192),
    RunCode::new(12, 0b000011001010, 26),
    RunCode::new(12, 0b000011001011, 27),
    RunCode::new(12, 0b000011001100, 28),
    RunCode::new(12, 0b000011001101, 29),
    RunCode::new(12, 0b000011010010, 34),
    RunCode::new(12, 0b000011010011, 35),
    RunCode::new(12, 0b000011010100, 36),
    RunCode::new(12, 0b000011010101, 37),
    RunCode::new(12, 0b000011010110, 38),
    RunCode::new(12, 0b000011010111, 39),
    RunCode::new(12, 0b000011011010, 42),
    RunCode::new(12, 0b000011011011, 43),
    RunCode::new(13, 0b0000001001010, 640),
    RunCode::new(13, 0b0000001001011, 704),
    RunCode::new(13, 0b0000001001100, 768),
    RunCode::new(13, 0b0000001001101, 832),
    RunCode::new(13, 0b0000001010010, 1280),
    RunCode::new(13, 0b0000001010011, 1344),
    RunCode::new(13, 0b0000001010100, 1408),
    RunCode::new(13, 0b0000001010101, 1472),
    RunCode::new(13, 0b0000001011010, 1536),
    RunCode::new(13, 0b0000001011011, 1600),
    RunCode::new(13, 0b0000001100100, 1664),
    RunCode::new(13, 0b0000001100101, 1728),
    RunCode::new(13, 0b0000001101100, 512),
    RunCode::new(13, 0b0000001101101, 576),
    RunCode::new(13, 0b0000001110010, 896),
    RunCode::new(13, 0b0000001110011, 960),
    RunCode::new(13, 0b0000001110100, 1024),
    RunCode::new(13, 0b0000001110101, 1088),
    RunCode::new(13, 0b0000001110110, 1152),
    RunCode::new(13, 0b0000001110111, 1216),
];
