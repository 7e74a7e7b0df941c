//! # Draw a raster as block art
use std::fmt;

use crate::raster::Raster;

/// Characters of a horizontal border
#[allow(missing_docs)]
pub struct BorderDrawing {
    pub left: char,
    pub middle: char,
    pub right: char,
}

/// Characters for the frame and the pixels
#[allow(missing_docs)]
pub struct BoxDrawing {
    pub top: BorderDrawing,
    pub left: char,
    pub right: char,
    pub bottom: BorderDrawing,
    pub ink: char,
    pub no_ink: char,
}

const ASCII_BORDER: BorderDrawing = BorderDrawing {
    left: '+',
    middle: '-',
    right: '+',
};

/// Plain ASCII characters
pub const ASCII: &BoxDrawing = &BoxDrawing {
    top: ASCII_BORDER,
    left: '|',
    right: '|',
    bottom: ASCII_BORDER,
    ink: '#',
    no_ink: ' ',
};

/// Double lines and full blocks
pub const UNICODE: &BoxDrawing = &BoxDrawing {
    top: BorderDrawing {
        left: '╔',
        middle: '═',
        right: '╗',
    },
    left: '║',
    right: '║',
    bottom: BorderDrawing {
        left: '╚',
        middle: '═',
        right: '╝',
    },
    ink: '█',
    no_ink: ' ',
};

fn border<W: fmt::Write>(w: &mut W, b: &BorderDrawing, width: u32) -> fmt::Result {
    w.write_char(b.left)?;
    for _ in 0..width {
        w.write_char(b.middle)?;
    }
    w.write_char(b.right)?;
    w.write_char('\n')
}

/// Draw a gray raster using characters, dark pixels are ink
pub fn ascii_art<W: fmt::Write>(w: &mut W, raster: &Raster, b: &BoxDrawing) -> fmt::Result {
    let ps = raster.pixel_size();
    border(w, &b.top, raster.width())?;
    for y in 0..raster.height() {
        w.write_char(b.left)?;
        for px in raster.row(y).chunks(ps) {
            w.write_char(if px[0] < 0x80 { b.ink } else { b.no_ink })?;
        }
        w.write_char(b.right)?;
        w.write_char('\n')?;
    }
    border(w, &b.bottom, raster.width())
}
