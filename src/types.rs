// Core types shared by every stage: a color value and the RGBA canvas it lands on.

use image::{Rgba, RgbaImage};

/// Straight (non-premultiplied) RGBA color, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same RGB, different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl From<Rgba<u8>> for Color {
    fn from(p: Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Self { r, g, b, a }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

/// Owned RGBA raster, mutated in place by the drawing stages.
/// Visual: this is the image that ends up in the PNG.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    /// New canvas with every pixel set to `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self { img: RgbaImage::from_pixel(width, height, fill.into()) }
    }

    /// New canvas with alpha 0 everywhere (glow / overlay layers start like this).
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::new(width, height, Color::TRANSPARENT)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.img.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.img.dimensions()
    }

    /// True when (x,y) lands inside the canvas.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Read a pixel; `None` when outside the canvas.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if !self.contains(x, y) {
            return None;
        }
        Some((*self.img.get_pixel(x as u32, y as u32)).into())
    }

    /// Overwrite a pixel. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if !self.contains(x, y) {
            return;
        }
        self.img.put_pixel(x as u32, y as u32, color.into());
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn as_image_mut(&mut self) -> &mut RgbaImage {
        &mut self.img
    }

    /// Raw interleaved RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.img.as_raw()
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.img
    }

    /// True when no pixel carries any transparency.
    pub fn is_opaque(&self) -> bool {
        self.img.pixels().all(|p| p.0[3] == 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_set_is_dropped() {
        let mut c = Canvas::new(4, 4, Color::BLACK);
        let before = c.clone();
        c.set(-1, 0, Color::rgb(255, 0, 0));
        c.set(0, 4, Color::rgb(255, 0, 0));
        c.set(4, 4, Color::rgb(255, 0, 0));
        assert_eq!(c, before);
        assert_eq!(c.get(-1, 0), None);
        assert_eq!(c.get(3, 3), Some(Color::BLACK));
    }

    #[test]
    fn transparent_layer_starts_with_zero_alpha() {
        let layer = Canvas::transparent(3, 2);
        assert_eq!(layer.dimensions(), (3, 2));
        assert!(layer.as_raw().iter().all(|&v| v == 0));
        assert!(!layer.is_opaque());
    }

    #[test]
    fn color_round_trips_through_rgba() {
        let c = Color::rgba(1, 2, 3, 4);
        let p: Rgba<u8> = c.into();
        assert_eq!(Color::from(p), c);
        assert_eq!(c.with_alpha(255), Color::rgb(1, 2, 3));
    }
}
