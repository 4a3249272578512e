// Core types shared by the surface, the ink model and the renderer.

/// A position on the surface in pixels (origin top-left, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// False for NaN / infinite coordinates; such points never become geometry.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// A modeled stroke point: where the pen was and how wide its line is there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkPoint {
    pub pos: Point,
    pub width: f32, // full line width in pixels
}

impl InkPoint {
    pub const fn new(pos: Point, width: f32) -> Self {
        Self { pos, width }
    }
}

/// The bitmap type: what the renderer draws into and what callers get back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the surface is (pixels)
    pub height: usize,    // how tall the surface is (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer of `width * height` pixels, all set to `color`.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Pixel at (x,y), or None outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// True when every pixel equals `background` (a zero-sized buffer counts as blank).
    pub fn is_blank(&self, background: u32) -> bool {
        self.pixels.iter().all(|&p| p == background)
    }

    /// Number of pixels that differ from `background`.
    pub fn ink_pixel_count(&self, background: u32) -> usize {
        self.pixels.iter().filter(|&&p| p != background).count()
    }
}

/// Split 0x00RRGGBB into its channels.
#[inline]
pub fn unpack_rgb(px: u32) -> (u8, u8, u8) {
    (((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8)
}
