//! Target raster and row placement

use image::GrayImage;

/// A row-major raster of `pixel_size` bytes per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixel_size: usize,
    data: Vec<u8>,
}

impl Raster {
    /// A raster with every byte set to `fill`
    pub fn new(width: u32, height: u32, pixel_size: usize, fill: u8) -> Self {
        let len = width as usize * height as usize * pixel_size;
        Self {
            width,
            height,
            pixel_size,
            data: vec![fill; len],
        }
    }

    /// Pixels per row
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per pixel
    pub fn pixel_size(&self) -> usize {
        self.pixel_size
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width as usize * self.pixel_size
    }

    /// The bytes of row `y`
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// The bytes of row `y`, mutably
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// All bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Convert an 8-bit gray raster into an [`image`] buffer
    pub fn into_gray_image(self) -> Option<GrayImage> {
        if self.pixel_size != 1 {
            return None;
        }
        GrayImage::from_raw(self.width, self.height, self.data)
    }
}

/// Turns a packed scanline into raster pixels
pub trait RowPlacement {
    /// Unpack `pixels` pixels of the packed scanline `src` into `dst`
    ///
    /// `dst` is exactly [`Raster::pixel_size`] times `pixels` bytes long.
    fn place_row(&mut self, dst: &mut [u8], src: &[u8], pixels: usize);
}

impl<P: RowPlacement + ?Sized> RowPlacement for &mut P {
    fn place_row(&mut self, dst: &mut [u8], src: &[u8], pixels: usize) {
        (**self).place_row(dst, src, pixels)
    }
}

/// One gray byte per pixel, black is `0x00` and white `0xFF`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Bilevel {
    /// Black is `0xFF` and white `0x00` instead
    pub invert: bool,
}

impl Bilevel {
    /// A placement with the given polarity
    pub fn new(invert: bool) -> Self {
        Self { invert }
    }
}

/// For rasters with a pixel size of 1
impl RowPlacement for Bilevel {
    fn place_row(&mut self, dst: &mut [u8], src: &[u8], pixels: usize) {
        let (ink, paper) = if self.invert { (0xFF, 0x00) } else { (0x00, 0xFF) };
        for (x, out) in dst.iter_mut().take(pixels).enumerate() {
            let bit = src[x / 8] & (0x80 >> (x % 8));
            *out = if bit != 0 { ink } else { paper };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bilevel, Raster, RowPlacement};

    #[test]
    fn bilevel() {
        let mut dst = [0x55; 10];
        Bilevel::new(false).place_row(&mut dst, &[0b1010_0000, 0b0100_0000], 10);
        assert_eq!(dst, [0, 255, 0, 255, 255, 255, 255, 255, 255, 0]);

        Bilevel::new(true).place_row(&mut dst[..3], &[0b1010_0000], 3);
        assert_eq!(dst[..3], [255, 0, 255]);
    }

    #[test]
    fn rows() {
        let mut raster = Raster::new(3, 2, 2, 7);
        assert_eq!(raster.stride(), 6);
        raster.row_mut(1)[0] = 1;
        assert_eq!(raster.row(0), &[7; 6]);
        assert_eq!(raster.row(1), &[1, 7, 7, 7, 7, 7]);
        assert!(raster.clone().into_gray_image().is_none());

        let gray = Raster::new(3, 2, 1, 0xFF).into_gray_image().unwrap();
        assert_eq!(gray.dimensions(), (3, 2));
    }
}
