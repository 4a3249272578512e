// Overlay drawing for the demo window: signing guide line, pen cursor and a
// tiny 5x7 bitmap font. All of it goes onto the *screen* copy, never onto the
// surface bitmap, so the exported signature stays clean.

use crate::render::put_pixel;
use crate::types::FrameBuffer;

/// Draw a 1-pixel line from (x0,y0) to (x1,y1), one pixel per step along
/// the longer axis.
pub fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs());
    if steps == 0 {
        put_pixel(fb, x0, y0, color);
        return;
    }
    let sx = (x1 - x0) as f32 / steps as f32;
    let sy = (y1 - y0) as f32 / steps as f32;
    for i in 0..=steps {
        let x = x0 as f32 + sx * i as f32;
        let y = y0 as f32 + sy * i as f32;
        put_pixel(fb, x.round() as i32, y.round() as i32, color);
    }
}

/// The "sign here" guide: an x mark and a baseline at 3/4 of the height.
pub fn draw_signing_guide(fb: &mut FrameBuffer, color: u32) {
    let w = fb.width as i32;
    let y = (fb.height as i32 * 3) / 4;
    let margin = (w / 12).max(8);
    // x mark left of the baseline
    draw_line(fb, margin, y - 10, margin + 6, y - 4, color);
    draw_line(fb, margin, y - 4, margin + 6, y - 10, color);
    draw_line(fb, margin, y, w - margin, y, color);
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) follows the pen.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
}

/* ---------- 5x7 bitmap font: the letters the status line uses ---------- */

/// Rows top to bottom; the low 5 bits are the pixels (bit 4 = leftmost).
const FONT_5X7: &[(char, [u8; 7])] = &[
    ('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    ('D', [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C]),
    ('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    ('G', [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F]),
    ('H', [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('I', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    ('N', [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11]),
    ('Q', [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D]),
    ('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A]),
    ('|', [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    (':', [0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00]),
];

fn glyph5x7(ch: char) -> Option<&'static [u8; 7]> {
    let ch = ch.to_ascii_uppercase();
    FONT_5X7.iter().find(|(c, _)| *c == ch).map(|(_, rows)| rows)
}

/// Draw a single 5x7 character at (x,y).
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, bits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if bits & (0x10 >> rx) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs. Spaces and unknown characters leave a gap.
/// Visual: a compact HUD line; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAPER: u32 = 0x00_FF_FF_FF;

    #[test]
    fn line_hits_both_ends() {
        let mut fb = FrameBuffer::filled(10, 10, PAPER);
        draw_line(&mut fb, 1, 1, 8, 5, 0);
        assert_eq!(fb.get(1, 1), Some(0));
        assert_eq!(fb.get(8, 5), Some(0));
        // One pixel per column along the longer axis.
        assert_eq!(fb.ink_pixel_count(PAPER), 8);

        let mut dot = FrameBuffer::filled(4, 4, PAPER);
        draw_line(&mut dot, 2, 2, 2, 2, 0);
        assert_eq!(dot.ink_pixel_count(PAPER), 1);
    }

    #[test]
    fn every_status_line_glyph_exists() {
        for text in ["SIGN HERE", "DRAWING", "SIGNED", "C: CLEAR  S: SAVE  ESC: QUIT"] {
            for ch in text.chars().filter(|c| *c != ' ') {
                assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
            }
        }
    }

    #[test]
    fn text_is_case_insensitive() {
        let mut upper = FrameBuffer::filled(40, 10, PAPER);
        let mut lower = FrameBuffer::filled(40, 10, PAPER);
        draw_text_5x7(&mut upper, 1, 1, "SIGNED", 0);
        draw_text_5x7(&mut lower, 1, 1, "signed", 0);
        assert_eq!(upper, lower);
        assert!(!upper.is_blank(PAPER));
    }

    #[test]
    fn unknown_glyphs_draw_nothing() {
        let mut fb = FrameBuffer::filled(20, 10, PAPER);
        draw_text_5x7(&mut fb, 0, 0, "#@! 7.", 0);
        assert!(fb.is_blank(PAPER));
    }

    #[test]
    fn guide_and_cursor_clip_at_edges() {
        let mut fb = FrameBuffer::filled(16, 8, PAPER);
        draw_signing_guide(&mut fb, 0);
        draw_crosshair(&mut fb, 0, 0, 12, 0);
        assert!(!fb.is_blank(PAPER));
    }
}
