// Gaussian blur for RGBA layers, built from repeated box blurs.
// Visual expectation: the glow layer's hard disc edges melt into a smooth haze.

use crate::error::{Error, Result};
use crate::types::Canvas;

/// Number of box passes used to approximate one Gaussian.
pub const GAUSS_PASSES: usize = 3;

/// Fixed-point scale of the box weights.
const ONE: u64 = 1 << 24;

/// Fractional box radius that, applied `passes` times, approximates a
/// Gaussian with standard deviation `sigma` (extended box filter of
/// Gwosdek et al., the same radius Pillow's `GaussianBlur` uses).
pub fn box_radius_for_gauss(sigma: f32, passes: usize) -> f32 {
    if sigma <= 0.0 || passes == 0 {
        return 0.0;
    }
    let sigma2 = sigma * sigma / passes as f32;
    let big_l = (12.0 * sigma2 + 1.0).sqrt();
    let l = ((big_l - 1.0) / 2.0).floor();
    let a = (2.0 * l + 1.0) * (l * (l + 1.0) - 3.0 * sigma2) / (6.0 * (sigma2 - (l + 1.0) * (l + 1.0)));
    l + a
}

/// Weights for a box of fractional `radius`: `(r, ww, fw)` where the
/// `2r+1` inner pixels weigh `ww` each and the two rim pixels `fw` each.
fn box_weights(radius: f32) -> (usize, u64, u64) {
    let r = radius.max(0.0) as usize;
    let ww = (ONE as f32 / (radius.max(0.0) * 2.0 + 1.0)) as u64;
    let fw = (ONE - (2 * r as u64 + 1) * ww) / 2;
    (r, ww, fw)
}

#[inline]
fn px_at(raw: &[u8], idx: usize) -> [u64; 4] {
    let p = &raw[idx * 4..idx * 4 + 4];
    [u64::from(p[0]), u64::from(p[1]), u64::from(p[2]), u64::from(p[3])]
}

/// Blur one line of `len` pixels (first pixel at `start`, `step` apart) from `src` into `dst`.
/// Edges are extended (clamped) so borders don't darken.
fn blur_line(src: &[u8], dst: &mut [u8], start: usize, step: usize, len: usize, radius: f32) {
    let (r, ww, fw) = box_weights(radius);
    let at = |i: isize| px_at(src, start + (i.clamp(0, len as isize - 1) as usize) * step);
    let r = r as isize;

    // Inner window [x-r, x+r] for x = 0
    let mut sum = [0u64; 4];
    for i in -r..=r {
        let p = at(i);
        for c in 0..4 {
            sum[c] += p[c];
        }
    }

    for x in 0..len as isize {
        let (lo, hi) = (at(x - r - 1), at(x + r + 1));
        let out = start + x as usize * step;
        for c in 0..4 {
            let v = (sum[c] * ww + (lo[c] + hi[c]) * fw + ONE / 2) >> 24;
            dst[out * 4 + c] = v.min(255) as u8;
        }

        // Slide: drop x-r, take x+r+1
        let p_sub = at(x - r);
        for c in 0..4 {
            sum[c] = sum[c] + hi[c] - p_sub[c];
        }
    }
}

/// One separable box blur pass: horizontal into `tmp`, vertical into `dst`.
pub fn box_blur_rgba(
    src: &Canvas,      // input layer
    tmp: &mut Canvas,  // horizontal pass result (scratch)
    dst: &mut Canvas,  // final blurred output
    radius: f32,       // blur amount, may be fractional; bigger = softer
) -> Result<()> {
    Error::check_dims("box_blur", src.dimensions(), dst.dimensions())?;
    Error::check_dims("box_blur (tmp)", src.dimensions(), tmp.dimensions())?;

    let (w, h) = (src.width() as usize, src.height() as usize);
    if w == 0 || h == 0 {
        return Ok(());
    }

    /* ---- Pass 1: Horizontal (store averaged rows in tmp) ---- */
    {
        let s = src.as_raw();
        let t = tmp.as_raw_mut();
        for y in 0..h {
            blur_line(s, t, y * w, 1, w, radius);
        }
    }

    /* ---- Pass 2: Vertical (read tmp, write dst) ---- */
    let t = tmp.as_raw();
    let d = dst.as_raw_mut();
    for x in 0..w {
        blur_line(t, d, x, w, h, radius);
    }

    Ok(())
}

/// Gaussian-blur `layer` in place with standard deviation `sigma` (in pixels).
/// All four channels are blurred independently (straight alpha).
pub fn gaussian_blur(layer: &mut Canvas, sigma: f32) -> Result<()> {
    let radius = box_radius_for_gauss(sigma, GAUSS_PASSES);
    if radius <= 0.0 {
        return Ok(());
    }
    log::debug!("gaussian blur sigma={sigma} via {GAUSS_PASSES} box passes of radius {radius:.3}");

    let (w, h) = layer.dimensions();
    let mut tmp = Canvas::transparent(w, h);
    let mut out = Canvas::transparent(w, h);
    for _ in 0..GAUSS_PASSES {
        box_blur_rgba(layer, &mut tmp, &mut out, radius)?;
        std::mem::swap(&mut *layer, &mut out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn radius_for_large_sigma_is_fractional() {
        // l = 29, a = 59 * (870 - 900) / (6 * (300 - 900)) = 0.4916..
        let r = box_radius_for_gauss(30.0, 3);
        assert!((r - 29.4917).abs() < 1e-3, "{r}");
    }

    #[test]
    fn radius_for_zero_sigma_does_nothing() {
        assert_eq!(box_radius_for_gauss(0.0, 3), 0.0);
        let mut layer = Canvas::transparent(5, 5);
        layer.set(2, 2, Color::rgba(9, 9, 9, 9));
        let before = layer.clone();
        gaussian_blur(&mut layer, 0.0).unwrap();
        assert_eq!(layer, before);
    }

    #[test]
    fn weights_sum_to_one() {
        for radius in [0.0f32, 1.0, 2.5, 29.4917] {
            let (r, ww, fw) = box_weights(radius);
            let total = (2 * r as u64 + 1) * ww + 2 * fw;
            assert!(ONE - total <= 1, "radius {radius}: {total}");
        }
    }

    #[test]
    fn uniform_layer_stays_uniform() {
        let fill = Color::rgba(40, 80, 120, 200);
        let mut layer = Canvas::new(17, 9, fill);
        gaussian_blur(&mut layer, 4.0).unwrap();
        assert!(layer.as_image().pixels().all(|p| Color::from(*p) == fill));
    }

    #[test]
    fn single_pixel_spreads_out() {
        let mut layer = Canvas::transparent(21, 21);
        layer.set(10, 10, Color::rgba(255, 255, 255, 255));
        let mut tmp = Canvas::transparent(21, 21);
        let mut out = Canvas::transparent(21, 21);
        box_blur_rgba(&layer, &mut tmp, &mut out, 1.0).unwrap();
        // 3x3 window, rounded per pass: 255 / 3 = 85, then 85 / 3 = 28.3 -> 28
        assert_eq!(out.get(10, 10), Some(Color::rgba(28, 28, 28, 28)));
        assert_eq!(out.get(11, 11), Some(Color::rgba(28, 28, 28, 28)));
        assert_eq!(out.get(12, 10), Some(Color::TRANSPARENT));
    }

    #[test]
    fn fractional_radius_reaches_the_rim() {
        let mut layer = Canvas::transparent(21, 1);
        layer.set(10, 0, Color::rgba(255, 255, 255, 255));
        let mut tmp = Canvas::transparent(21, 1);
        let mut out = Canvas::transparent(21, 1);
        box_blur_rgba(&layer, &mut tmp, &mut out, 1.5).unwrap();
        // window of 4 pixels: inner 3 at 255/4, rim 2 at 255/8
        assert_eq!(out.get(10, 0).map(|c| c.a), Some(64));
        assert_eq!(out.get(12, 0).map(|c| c.a), Some(32));
        assert_eq!(out.get(13, 0).map(|c| c.a), Some(0));
    }

    #[test]
    fn blur_preserves_dimensions() {
        let mut layer = Canvas::transparent(33, 7);
        layer.set(3, 3, Color::rgba(0, 255, 0, 255));
        gaussian_blur(&mut layer, 5.0).unwrap();
        assert_eq!(layer.dimensions(), (33, 7));
        assert!(layer.get(3, 3).unwrap().a < 255);
    }

    #[test]
    fn mismatched_buffers_are_rejected() {
        let src = Canvas::transparent(4, 4);
        let mut tmp = Canvas::transparent(4, 4);
        let mut dst = Canvas::transparent(5, 4);
        let err = box_blur_rgba(&src, &mut tmp, &mut dst, 1.0).unwrap_err();
        assert!(matches!(err, Error::Dimensions { .. }));
    }
}
