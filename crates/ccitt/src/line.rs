use crate::Color;

/// This struct can represents a scanline
///
/// Positions are 1-based: position `i` is pixel `i - 1` and position 0 is
/// the imaginary white pixel in front of the row.
pub trait ColorLine {
    /// Get the color at index i
    fn color_at(&self, i: usize) -> Color;
    /// Set the color at index i
    fn set_color(&mut self, i: usize, color: Color);
}

/// One row of pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line(Vec<Color>);

impl ColorLine for Line {
    fn color_at(&self, i: usize) -> Color {
        if i == 0 {
            Color::White
        } else {
            self.0[i - 1]
        }
    }

    fn set_color(&mut self, i: usize, color: Color) {
        if i > 0 {
            self.0[i - 1] = color;
        }
    }
}

impl Line {
    /// Create an all-white row
    pub fn new(width: usize) -> Self {
        Self(vec![Color::White; width])
    }

    /// Number of pixels
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// The pixels of this row
    pub fn pixels(&self) -> &[Color] {
        &self.0
    }

    /// Paint the pixels `start..end` (0-based)
    pub fn fill_pixels(&mut self, start: usize, end: usize, color: Color) {
        self.0[start..end].fill(color);
    }

    /// Paint the positions `from..to` (1-based, position 0 is skipped)
    pub fn fill(&mut self, from: usize, to: usize, color: Color) {
        let from = from.max(1);
        if to > from {
            self.fill_pixels(from - 1, to - 1, color);
        }
    }

    /// Make the whole row white
    pub fn clear(&mut self) {
        self.0.fill(Color::White);
    }

    /// Write the row as packed bits, most significant bit first, black = 1
    pub fn pack(&self, dst: &mut [u8]) {
        let len = self.0.len().div_ceil(8);
        dst[..len].fill(0);
        for (i, color) in self.0.iter().enumerate() {
            dst[i / 8] |= color.bit() << (7 - i % 8);
        }
    }
}

/// The reference line and the line that is being decoded
#[derive(Debug, Clone)]
pub(crate) struct RunLines {
    lines: [Line; 2],
}

impl RunLines {
    pub fn new(width: usize) -> Self {
        Self {
            lines: [Line::new(width), Line::new(width)],
        }
    }

    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }

    /// Split into (reference, current) where `reference` is the index of the reference line
    pub fn split(&mut self, reference: usize) -> (&Line, &mut Line) {
        let [a, b] = &mut self.lines;
        if reference == 0 {
            (&*a, b)
        } else {
            (&*b, a)
        }
    }
}
