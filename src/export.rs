// Export: turn a signature bitmap into an `image` buffer or a PNG file.
// Visual: the saved file looks exactly like the pad, optionally with the
// paper made transparent so the ink can be laid over a document.

use crate::error::Error;
use crate::types::{unpack_rgb, FrameBuffer};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;
use tracing::info;

/// Opaque RGBA copy of the bitmap.
pub fn to_rgba_image(fb: &FrameBuffer) -> RgbaImage {
    RgbaImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        let (r, g, b) = unpack_rgb(px);
        Rgba([r, g, b, 255])
    })
}

/// RGBA copy where every `background` pixel becomes fully transparent.
pub fn to_rgba_image_transparent(fb: &FrameBuffer, background: u32) -> RgbaImage {
    RgbaImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        let (r, g, b) = unpack_rgb(px);
        let a = if px == background { 0 } else { 255 };
        Rgba([r, g, b, a])
    })
}

/// Write the bitmap as a PNG. With `transparent_background`, that color is keyed out.
pub fn save_png(
    fb: &FrameBuffer,
    path: impl AsRef<Path>,
    transparent_background: Option<u32>,
) -> Result<(), Error> {
    let path = path.as_ref();
    let img = match transparent_background {
        Some(bg) => to_rgba_image_transparent(fb, bg),
        None => to_rgba_image(fb),
    };
    img.save_with_format(path, ImageFormat::Png)?;
    info!(path = %path.display(), width = fb.width, height = fb.height, "signature saved");
    Ok(())
}
