// Software drawing primitives on the canvas.
// Visual effects provided here:
// 1) Coarse pixel-art "blocks" (one grid cell = a square of canvas pixels).
// 2) Single-pixel alpha blending for translucent details.
// 3) 1-pixel lines and the dark radial background the sprite sits on.

use crate::config::RadialBackground;
use crate::types::{Canvas, Color};

/// Alpha-composite `color` over the pixel at (x,y) ("over", floored per channel).
/// Visual: the pixel takes on `color` in proportion to its alpha; alpha stays opaque.
pub fn blend_pixel(canvas: &mut Canvas, x: i32, y: i32, color: Color) {
    let Some(bg) = canvas.get(x, y) else { return };
    let a = u32::from(color.a);
    let mix = |b: u8, f: u8| ((u32::from(b) * (255 - a) + u32::from(f) * a) / 255) as u8;
    canvas.set(
        x,
        y,
        Color::rgb(mix(bg.r, color.r), mix(bg.g, color.g), mix(bg.b, color.b)),
    );
}

/// Fill the inclusive rectangle (x1,y1)-(x2,y2), clipped to the canvas.
/// Opaque colors overwrite; translucent ones are blended pixel by pixel.
pub fn fill_rect(canvas: &mut Canvas, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    if x1 >= w || y1 >= h || x2 < 0 || y2 < 0 || x1 > x2 || y1 > y2 {
        return;
    }
    let (x1, y1) = (x1.max(0), y1.max(0));
    let (x2, y2) = (x2.min(w - 1), y2.min(h - 1));

    for y in y1..=y2 {
        for x in x1..=x2 {
            if color.is_opaque() {
                canvas.set(x, y, color);
            } else {
                blend_pixel(canvas, x, y, color);
            }
        }
    }
}

/// Paint one grid cell of `cell` x `cell` canvas pixels.
/// Visual: a chunky "pixel" of the pixel-art sprite appears at (gx,gy).
/// Cells hanging off the edge are clipped; cells fully outside do nothing.
pub fn set_block(canvas: &mut Canvas, cell: u32, gx: i32, gy: i32, color: Color) {
    let p = cell as i32;
    if p <= 0 {
        return;
    }
    let x1 = gx.saturating_mul(p);
    let y1 = gy.saturating_mul(p);
    fill_rect(canvas, x1, y1, x1.saturating_add(p - 1), y1.saturating_add(p - 1), color);
}

/// Draw a 1-pixel line between (x0,y0) and (x1,y1) using Bresenham.
/// Pixels are written raw (no blending): used on transparent overlay layers.
pub fn draw_line(canvas: &mut Canvas, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        canvas.set(x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Fill the whole canvas with the radial background.
/// Visual: dark navy in the middle, fading to an even deeper tone at the corners.
pub fn fill_radial_background(canvas: &mut Canvas, bg: &RadialBackground) {
    let (w, h) = canvas.dimensions();
    let (cx, cy) = ((w / 2) as f64, (h / 2) as f64);
    let reach = f64::from(w) * bg.reach;

    for y in 0..h {
        for x in 0..w {
            let dx = f64::from(x) - cx;
            let dy = f64::from(y) - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let t = if reach > 0.0 { (dist / reach).min(1.0) } else { 1.0 };
            let ch = |i: usize| (bg.inner[i] * (1.0 - t * bg.fade[i]) + bg.outer[i] * t) as u8;
            canvas.set(x as i32, y as i32, Color::rgb(ch(0), ch(1), ch(2)));
        }
    }
}
