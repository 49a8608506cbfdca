// Final touches and persistence: scanline overlay, PNG encode, file write.
// Visual expectation: very faint dark lines every few rows (CRT feel), then the
// image lands on disk exactly as it sits in memory.

use std::fs;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::composite::alpha_composite;
use crate::config::Scanlines;
use crate::draw::draw_line;
use crate::error::{Error, Result};
use crate::types::Canvas;

/// Transparent layer with one full-width line every `stride` rows, starting at row 0.
pub fn scanline_layer(width: u32, height: u32, lines: &Scanlines) -> Canvas {
    let mut layer = Canvas::transparent(width, height);
    if width == 0 || lines.stride == 0 {
        return layer;
    }
    let right = width as i32 - 1;
    for y in (0..height).step_by(lines.stride as usize) {
        draw_line(&mut layer, 0, y as i32, right, y as i32, lines.color);
    }
    layer
}

/// Lay the scanline overlay over `canvas` in place.
pub fn apply_scanlines(canvas: &mut Canvas, lines: &Scanlines) -> Result<()> {
    let (w, h) = canvas.dimensions();
    let overlay = scanline_layer(w, h, lines);
    alpha_composite(canvas, &overlay)
}

/// Encode the whole canvas as an 8-bit RGBA PNG in memory.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let (w, h) = canvas.dimensions();
    let mut buf = Vec::with_capacity((w as usize) * (h as usize));
    PngEncoder::new(&mut buf).write_image(canvas.as_raw(), w, h, ExtendedColorType::Rgba8)?;
    Ok(buf)
}

/// Encode, then write the PNG to `path` in one go.
/// A missing directory or permission problem comes back as [`Error::Write`].
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let bytes = encode_png(canvas)?;
    fs::write(path, &bytes).map_err(|source| Error::Write { path: path.to_path_buf(), source })?;
    log::info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn lines_only_on_the_stride() {
        let lines = Scanlines::default();
        let layer = scanline_layer(6, 9, &lines);
        for y in 0..9 {
            let expect = if y % 4 == 0 { lines.color } else { Color::TRANSPARENT };
            for x in 0..6 {
                assert_eq!(layer.get(x, y), Some(expect), "({x},{y})");
            }
        }
    }

    #[test]
    fn scanlines_darken_stride_rows_only() {
        let mut canvas = Canvas::new(8, 8, Color::rgb(120, 200, 33));
        canvas.set(3, 5, Color::rgb(7, 8, 9));
        let before = canvas.clone();
        apply_scanlines(&mut canvas, &Scanlines::default()).unwrap();

        for y in 0..8 {
            for x in 0..8 {
                let (b, a) = (before.get(x, y).unwrap(), canvas.get(x, y).unwrap());
                if y % 4 == 0 {
                    assert!(a.r <= b.r && a.g <= b.g && a.b <= b.b);
                    assert!(a.r < b.r, "row {y} should darken");
                } else {
                    assert_eq!(a, b);
                }
                assert_eq!(a.a, 255);
            }
        }
    }

    #[test]
    fn encoded_bytes_are_a_png() {
        let canvas = Canvas::new(3, 2, Color::rgb(1, 2, 3));
        let bytes = encode_png(&canvas).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
