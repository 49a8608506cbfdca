//! Procedural renderer for the Rewind Survivor app icon.
//!
//! A pixel-art space marine is drawn block by block on a 1024x1024 canvas,
//! soft glows are accumulated on a separate layer, blurred and composited on
//! top, a faint scanline overlay is added, and the result is saved as PNG.

pub mod blur;
pub mod composite;
pub mod config;
pub mod draw;
pub mod error;
pub mod glow;
pub mod output;
pub mod pipeline;
pub mod sprite;
pub mod types;

pub use config::IconConfig;
pub use error::{Error, Result};
pub use pipeline::{RenderReport, render, render_to_file};
pub use types::{Canvas, Color};
