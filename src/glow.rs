// Glow: soft radial light discs accumulated on a transparent layer.
// Visual outcomes:
// - Each source is a fuzzy disc of colored light, brightest in the middle.
// - Overlapping sources combine (alpha adds up, colors mix) instead of hiding each other.

use crate::types::{Canvas, Color};

/// One soft light source in canvas pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowSource {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub color: Color,
}

impl GlowSource {
    pub const fn new(x: i32, y: i32, radius: i32, color: Color) -> Self {
        Self { x, y, radius, color }
    }
}

/// Merge a contribution into an existing layer pixel.
///
/// Alpha adds up (saturating at 255); each color channel is the
/// alpha-weighted average of the two, truncated and capped at 255.
#[inline]
pub fn accumulate(existing: Color, contrib: Color) -> Color {
    let ea = u32::from(existing.a);
    let ca = u32::from(contrib.a);
    let na = (ea + ca).min(255);
    let denom = f64::from(na.max(1));
    let mix = |e: u8, c: u8| {
        let v = f64::from(u32::from(e) * ea + u32::from(c) * ca) / denom;
        (v as u32).min(255) as u8
    };
    Color::rgba(
        mix(existing.r, contrib.r),
        mix(existing.g, contrib.g),
        mix(existing.b, contrib.b),
        na as u8,
    )
}

/// Alpha a disc of `radius` and peak alpha `peak` contributes at squared distance `d2`.
/// Quadratic falloff: `peak` at the center, 0 at (and beyond) the rim.
#[inline]
pub fn falloff_alpha(peak: u8, d2: i64, radius: i32) -> u8 {
    if radius <= 0 || d2 >= i64::from(radius) * i64::from(radius) {
        return 0;
    }
    let t = 1.0 - (d2 as f64).sqrt() / f64::from(radius);
    (f64::from(peak) * t * t) as u8
}

/// Draw a soft glowing disc onto `layer`.
/// Visual: a round patch of light, bright core and soft edge.
/// A radius of zero or less draws nothing.
pub fn draw_soft_disc(layer: &mut Canvas, cx: i32, cy: i32, radius: i32, color: Color) {
    if radius <= 0 {
        return;
    }
    let (w, h) = (layer.width() as i32, layer.height() as i32);

    // Scan just the bounding box, clipped to the layer
    let y0 = (cy - radius).max(0);
    let y1 = (cy + radius + 1).min(h);
    let x0 = (cx - radius).max(0);
    let x1 = (cx + radius + 1).min(w);

    for y in y0..y1 {
        for x in x0..x1 {
            let dx = i64::from(x - cx);
            let dy = i64::from(y - cy);
            let a = falloff_alpha(color.a, dx * dx + dy * dy, radius);
            if a == 0 {
                continue;
            }
            if let Some(existing) = layer.get(x, y) {
                layer.set(x, y, accumulate(existing, color.with_alpha(a)));
            }
        }
    }
}

/// Build a fresh transparent layer holding every glow source.
pub fn render_glow_layer(width: u32, height: u32, sources: &[GlowSource]) -> Canvas {
    let mut layer = Canvas::transparent(width, height);
    for s in sources {
        log::debug!("glow disc at ({}, {}) r={} {:?}", s.x, s.y, s.radius, s.color);
        draw_soft_disc(&mut layer, s.x, s.y, s.radius, s.color);
    }
    layer
}
