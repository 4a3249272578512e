// Rendering: the collaborator that turns ink segments into pixels.
// The surface only talks to the `Renderer` trait; `SoftwareRenderer` is the
// built-in CPU implementation drawing into an owned `FrameBuffer`.

use crate::types::{FrameBuffer, InkPoint};
use tracing::debug;

/// Smallest disc radius we stamp, so even a zero-width tap leaves a dot.
const MIN_RADIUS: f32 = 0.5;

/// Something that can rasterize ink and hand out the resulting bitmap.
pub trait Renderer {
    /// Draw a line from `from` to `to`, width interpolated between the two ends.
    /// A zero-length segment draws a dot. Parts outside the surface are clipped.
    fn draw_line_segment(&mut self, from: InkPoint, to: InkPoint);

    /// Reset the whole surface to the background (a blank bitmap).
    fn clear(&mut self);

    /// An owned copy of the current bitmap.
    fn snapshot(&self) -> FrameBuffer;

    /// Reallocate for a new surface size. The contents afterwards are blank.
    fn resize(&mut self, width: usize, height: usize);

    /// Current surface size in pixels (width, height).
    fn size(&self) -> (usize, usize);
}

/// CPU renderer: stamps filled discs along each segment.
pub struct SoftwareRenderer {
    frame: FrameBuffer,
    ink: u32,        // 0x00RRGGBB
    background: u32, // 0x00RRGGBB
}

impl SoftwareRenderer {
    /// A blank surface of the given size.
    pub fn new(width: usize, height: usize, ink: u32, background: u32) -> Self {
        Self {
            frame: FrameBuffer::filled(width, height, background),
            ink,
            background,
        }
    }

    /// Borrow the live bitmap (for presenting to a window without copying).
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn background_color(&self) -> u32 {
        self.background
    }
}

impl Renderer for SoftwareRenderer {
    fn draw_line_segment(&mut self, from: InkPoint, to: InkPoint) {
        stamp_segment(&mut self.frame, from, to, self.ink);
    }

    fn clear(&mut self) {
        self.frame.fill(self.background);
    }

    fn snapshot(&self) -> FrameBuffer {
        self.frame.clone()
    }

    fn resize(&mut self, width: usize, height: usize) {
        debug!(width, height, "renderer resized");
        self.frame = FrameBuffer::filled(width, height, self.background);
    }

    fn size(&self) -> (usize, usize) {
        (self.frame.width, self.frame.height)
    }
}

/* ---------- Software drawing: pixels, discs, thick segments ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Fill a disc centered at (cx,cy). A pixel is covered when its center lies
/// within `radius + 0.5` of the disc center.
/// Visual: a round dab of ink.
pub fn fill_disc(fb: &mut FrameBuffer, cx: f32, cy: f32, radius: f32, color: u32) {
    if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) {
        return;
    }
    let reach = radius.max(MIN_RADIUS) + 0.5;
    let reach2 = reach * reach;

    // Scan just the bounding box, clipped to the buffer
    let x0 = (cx - reach).floor().max(0.0) as i32;
    let y0 = (cy - reach).floor().max(0.0) as i32;
    let x1 = (cx + reach).ceil().min(fb.width as f32) as i32;
    let y1 = (cy + reach).ceil().min(fb.height as f32) as i32;

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= reach2 {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/// Parameter range `[t0, t1]` of the segment `(x0,y0) + t*(dx,dy)` that lies
/// inside the rectangle `[xmin,xmax] x [ymin,ymax]` (Liang-Barsky).
fn clip_range(x0: f64, y0: f64, dx: f64, dy: f64, rect: [f64; 4]) -> Option<(f64, f64)> {
    let [xmin, ymin, xmax, ymax] = rect;
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, x0 - xmin), (dx, xmax - x0), (-dy, y0 - ymin), (dy, ymax - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((t0, t1))
}

/// Thick line from `from` to `to`: discs every pixel of length, radius lerped.
/// Only the part that can touch the frame is stepped, so the cost is bounded
/// by the frame size no matter how far off-surface the ends are.
/// Visual: a smooth ink line whose thickness follows the pen width.
pub fn stamp_segment(fb: &mut FrameBuffer, from: InkPoint, to: InkPoint, color: u32) {
    // Clip in f64: far-off ends would otherwise lose the on-frame part to rounding.
    let (fx, fy) = (from.pos.x as f64, from.pos.y as f64);
    let dx = to.pos.x as f64 - fx;
    let dy = to.pos.y as f64 - fy;
    let length = (dx * dx + dy * dy).sqrt();
    if !length.is_finite() {
        return;
    }
    let (r0, r1) = (from.width * 0.5, to.width * 0.5);
    if !(r0.is_finite() && r1.is_finite()) {
        return;
    }

    // Grow the frame by the widest disc so clipped ends still paint their edge pixels.
    let pad = (r0.max(r1).max(MIN_RADIUS) + 1.0) as f64;
    let rect = [-pad, -pad, fb.width as f64 + pad, fb.height as f64 + pad];
    let Some((t0, t1)) = clip_range(fx, fy, dx, dy, rect) else {
        return;
    };

    let steps = ((t1 - t0) * length).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = t0 + (t1 - t0) * (i as f64 / steps as f64);
        let radius = r0 + (r1 - r0) * t as f32;
        fill_disc(fb, (fx + dx * t) as f32, (fy + dy * t) as f32, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    const INK: u32 = 0x00_00_00_00;
    const PAPER: u32 = 0x00_FF_FF_FF;

    fn ink(x: f32, y: f32, width: f32) -> InkPoint {
        InkPoint::new(Point::new(x, y), width)
    }

    #[test]
    fn new_renderer_is_blank() {
        let r = SoftwareRenderer::new(32, 16, INK, PAPER);
        assert_eq!(r.size(), (32, 16));
        assert!(r.snapshot().is_blank(PAPER));
    }

    #[test]
    fn zero_length_segment_draws_a_dot() {
        let mut r = SoftwareRenderer::new(32, 32, INK, PAPER);
        r.draw_line_segment(ink(10.0, 10.0, 0.0), ink(10.0, 10.0, 0.0));
        let snap = r.snapshot();
        assert!(!snap.is_blank(PAPER));
        assert_eq!(snap.get(10, 10), Some(INK));
    }

    #[test]
    fn segment_covers_its_path() {
        let mut r = SoftwareRenderer::new(64, 32, INK, PAPER);
        r.draw_line_segment(ink(5.0, 10.0, 2.0), ink(50.0, 10.0, 2.0));
        let snap = r.snapshot();
        for x in 5..50 {
            assert_eq!(snap.get(x, 10), Some(INK), "gap at x={x}");
        }
        assert_eq!(snap.get(30, 25), Some(PAPER));
    }

    #[test]
    fn thicker_segments_cover_more_pixels() {
        let mut thin = SoftwareRenderer::new(64, 64, INK, PAPER);
        let mut thick = SoftwareRenderer::new(64, 64, INK, PAPER);
        thin.draw_line_segment(ink(10.0, 32.0, 1.0), ink(54.0, 32.0, 1.0));
        thick.draw_line_segment(ink(10.0, 32.0, 8.0), ink(54.0, 32.0, 8.0));
        assert!(
            thick.snapshot().ink_pixel_count(PAPER) > 2 * thin.snapshot().ink_pixel_count(PAPER)
        );
    }

    #[test]
    fn out_of_surface_is_clipped() {
        let mut r = SoftwareRenderer::new(16, 16, INK, PAPER);
        r.draw_line_segment(ink(-50.0, -50.0, 4.0), ink(100.0, 100.0, 4.0));
        r.draw_line_segment(ink(-500.0, 8.0, 4.0), ink(-400.0, 8.0, 4.0));
        r.draw_line_segment(ink(f32::NAN, 8.0, 4.0), ink(8.0, 8.0, 4.0));
        // Only the diagonal crossing the surface left ink.
        assert_eq!(r.snapshot().get(8, 8), Some(INK));
        assert_eq!(r.snapshot().get(0, 15), Some(PAPER));
    }

    #[test]
    fn far_off_segment_is_clipped_before_stepping() {
        let mut r = SoftwareRenderer::new(16, 16, INK, PAPER);
        // Without clipping this would step 1e13 discs.
        r.draw_line_segment(ink(8.0, 8.0, 2.0), ink(1e13, 8.0, 2.0));
        let snap = r.snapshot();
        assert_eq!(snap.get(8, 8), Some(INK));
        assert_eq!(snap.get(15, 8), Some(INK));
        assert_eq!(snap.get(7, 12), Some(PAPER));

        let mut r = SoftwareRenderer::new(16, 16, INK, PAPER);
        r.draw_line_segment(ink(-1e13, -1e13, 2.0), ink(1e13, 1e13, 2.0));
        let snap = r.snapshot();
        assert_eq!(snap.get(0, 0), Some(INK));
        assert_eq!(snap.get(8, 8), Some(INK));
        assert_eq!(snap.get(15, 15), Some(INK));
        assert_eq!(snap.get(15, 0), Some(PAPER));
    }

    #[test]
    fn clip_range_cases() {
        let rect = [0.0, 0.0, 10.0, 10.0];
        assert_eq!(clip_range(2.0, 2.0, 4.0, 0.0, rect), Some((0.0, 1.0)));
        assert_eq!(clip_range(-10.0, 5.0, 40.0, 0.0, rect), Some((0.25, 0.5)));
        assert_eq!(clip_range(-10.0, 20.0, 40.0, 0.0, rect), None);
        assert_eq!(clip_range(5.0, 5.0, 0.0, 0.0, rect), Some((0.0, 1.0)));
        assert_eq!(clip_range(50.0, 5.0, 0.0, 0.0, rect), None);
    }

    #[test]
    fn clear_and_resize_blank_the_surface() {
        let mut r = SoftwareRenderer::new(16, 16, INK, PAPER);
        r.draw_line_segment(ink(2.0, 2.0, 3.0), ink(12.0, 12.0, 3.0));
        r.clear();
        assert!(r.snapshot().is_blank(PAPER));

        r.draw_line_segment(ink(2.0, 2.0, 3.0), ink(12.0, 12.0, 3.0));
        r.resize(8, 4);
        assert_eq!(r.size(), (8, 4));
        assert_eq!(r.snapshot().pixels.len(), 32);
        assert!(r.snapshot().is_blank(PAPER));
    }
}
