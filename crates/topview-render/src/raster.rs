use topview_blocks::Rgb;

/// Row-major RGB pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// New raster filled with the sentinel color.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 3
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: Rgb) {
        let idx = self.idx(x, y);
        self.data[idx..idx + 3].copy_from_slice(&rgb.0);
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let idx = self.idx(x, y);
        Rgb([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Paints a `w`×`h` rectangle with its top-left corner at `(x0, y0)`.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, rgb: Rgb) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self.put_pixel(x, y, rgb);
            }
        }
    }

    /// Copies `src` into this raster with its top-left corner at `(x0, y0)`.
    pub fn blit(&mut self, src: &Raster, x0: usize, y0: usize) {
        let row_bytes = src.width * 3;
        for y in 0..src.height {
            let dst = self.idx(x0, y0 + y);
            let from = y * row_bytes;
            self.data[dst..dst + row_bytes].copy_from_slice(&src.data[from..from + row_bytes]);
        }
    }
}
