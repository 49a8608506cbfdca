// Whole-buffer "over" compositing: lay a translucent layer on top of a canvas.
// Visual: glow haze and scanlines appear on top of the sprite without hiding it.

use crate::error::{Error, Result};
use crate::types::{Canvas, Color};

/// Porter-Duff "over" for one pixel, straight alpha, in integer math.
/// Channels are the exact floor of `(s*sa + d*da*(1-sa)) / oa`.
/// A fully transparent `src` returns `dst` untouched.
#[inline]
pub fn over(dst: Color, src: Color) -> Color {
    if src.a == 0 {
        return dst;
    }
    if src.a == 255 || dst.a == 0 {
        return src;
    }
    let sa = u32::from(src.a);
    let blend = u32::from(dst.a) * (255 - sa);
    let outa255 = sa * 255 + blend;

    let mix = |s: u8, d: u8| ((u32::from(s) * sa * 255 + u32::from(d) * blend) / outa255) as u8;
    Color::rgba(
        mix(src.r, dst.r),
        mix(src.g, dst.g),
        mix(src.b, dst.b),
        ((outa255 + 127) / 255) as u8,
    )
}

/// Composite `src` over `dst` pixel by pixel; both must share dimensions.
pub fn alpha_composite(dst: &mut Canvas, src: &Canvas) -> Result<()> {
    Error::check_dims("alpha_composite", dst.dimensions(), src.dimensions())?;

    for (d, s) in dst.as_image_mut().pixels_mut().zip(src.as_image().pixels()) {
        if s.0[3] == 0 {
            continue; // nothing on top here
        }
        *d = over(Color::from(*d), Color::from(*s)).into();
    }
    Ok(())
}
