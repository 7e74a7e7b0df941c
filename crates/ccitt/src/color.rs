//! Pixel colors of a bi-level row

/// Black or White Color
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// No-Ink, the color of the imaginary element in front of each row
    #[default]
    White,
    /// Ink
    Black,
}

impl Color {
    /// Flip to the other color, as after each changing element
    pub fn invert(&mut self) {
        *self = !*self;
    }

    /// The value of this color in a packed scanline
    pub fn bit(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn invert() {
        let mut c = Color::default();
        c.invert();
        assert_eq!(c, Color::Black);
        assert_eq!(!c, Color::White);
        assert_eq!(c.bit(), 1);
    }
}
