// The render pipeline, stage by stage:
//   background -> sprite blocks -> glow layer (discs, blur) -> composite -> scanlines -> PNG.
// Each buffer has exactly one owner at a time; layers are handed forward, never shared.

use std::path::PathBuf;

use crate::blur::gaussian_blur;
use crate::composite::alpha_composite;
use crate::config::IconConfig;
use crate::draw::fill_radial_background;
use crate::error::Result;
use crate::glow::render_glow_layer;
use crate::output::{apply_scanlines, save_png};
use crate::sprite::draw_sprite;
use crate::types::{Canvas, Color};

/// What got written, for the console report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderReport {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Background plus every sprite block, before any post-processing.
pub fn render_base(cfg: &IconConfig) -> Result<Canvas> {
    cfg.validate()?;
    let mut canvas = Canvas::new(cfg.size, cfg.size, Color::BLACK);
    fill_radial_background(&mut canvas, &cfg.background);
    log::debug!("background filled ({}x{})", cfg.size, cfg.size);

    draw_sprite(&mut canvas, cfg);
    log::debug!("sprite drawn on a {0}x{0} grid of {1}px cells", cfg.grid(), cfg.cell);
    Ok(canvas)
}

/// Add the blurred glow and the scanline overlay on top of a base canvas.
pub fn post_process(mut canvas: Canvas, cfg: &IconConfig) -> Result<Canvas> {
    let (w, h) = canvas.dimensions();

    let mut glow = render_glow_layer(w, h, &cfg.glows);
    gaussian_blur(&mut glow, cfg.glow_blur)?;
    alpha_composite(&mut canvas, &glow)?;
    log::debug!("{} glow sources composited", cfg.glows.len());

    apply_scanlines(&mut canvas, &cfg.scanlines)?;
    log::debug!("scanlines every {} rows", cfg.scanlines.stride);
    Ok(canvas)
}

/// Full in-memory render of the icon.
pub fn render(cfg: &IconConfig) -> Result<Canvas> {
    let base = render_base(cfg)?;
    post_process(base, cfg)
}

/// Render and write the icon to `cfg.output`.
pub fn render_to_file(cfg: &IconConfig) -> Result<RenderReport> {
    let canvas = render(cfg)?;
    save_png(&canvas, &cfg.output)?;
    let (width, height) = canvas.dimensions();
    Ok(RenderReport { path: cfg.output.clone(), width, height })
}
