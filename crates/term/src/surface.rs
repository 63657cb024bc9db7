//! Off-screen pixel surface and sprite blitting.

/// One byte per pixel, RGB332 layout. Monochrome targets read bit 0.
pub type Pixel = u8;

pub const BLACK: Pixel = 0x00;
pub const WHITE: Pixel = 0xFF;

/// Whether a pixel lights up on a monochrome target.
#[inline(always)]
pub fn is_lit(p: Pixel) -> bool {
    p & 1 == 1
}

/// A small bitmap with per-pixel transparency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u16,
    height: u16,
    pixels: Vec<Option<Pixel>>,
}

impl Sprite {
    /// Build a sprite from ASCII art.
    ///
    /// `#` is a white pixel, `-` an opaque black pixel, anything else is
    /// transparent. Short rows are padded with transparency.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u16;
        let height = rows.len() as u16;
        let mut pixels = vec![None; width as usize * height as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                pixels[y * width as usize + x] = match ch {
                    '#' => Some(WHITE),
                    '-' => Some(BLACK),
                    _ => None,
                };
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// Fixed-size off-screen pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u16,
    height: u16,
    pixels: Vec<Pixel>,
}

impl Surface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![BLACK; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Pixel> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: i32, y: i32, p: Pixel) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = p;
        }
    }

    pub fn clear(&mut self, p: Pixel) {
        self.pixels.fill(p);
    }

    /// Copy the opaque pixels of `sprite` with its top-left corner at (x, y).
    ///
    /// Pixels falling outside the surface are clipped.
    pub fn blit(&mut self, sprite: &Sprite, x: i32, y: i32) {
        for sy in 0..sprite.height() {
            for sx in 0..sprite.width() {
                if let Some(p) = sprite.get(sx, sy) {
                    self.set(x + sx as i32, y + sy as i32, p);
                }
            }
        }
    }

    /// Number of lit pixels, handy for cheap frame comparisons.
    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| is_lit(p)).count()
    }
}
