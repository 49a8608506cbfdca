// The one icon recipe, as plain immutable data.
// Every stage reads from an `&IconConfig`; nothing here is global.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::glow::GlowSource;
use crate::types::Color;

/// Dark radial background. Per channel `i`, at normalized distance `t`
/// from the center: `inner[i] * (1 - t * fade[i]) + outer[i] * t`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialBackground {
    pub inner: [f64; 3],
    pub fade: [f64; 3],
    pub outer: [f64; 3],
    /// Distance (as a fraction of canvas width) at which `t` reaches 1.
    pub reach: f64,
}

impl Default for RadialBackground {
    fn default() -> Self {
        Self {
            inner: [12.0, 10.0, 28.0],
            fade: [0.5, 0.5, 0.3],
            outer: [4.0, 3.0, 10.0],
            reach: 0.7,
        }
    }
}

/// Colors used by the sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub cyan: Color,
    pub blue: Color,
    pub dark_blue: Color,
    pub visor: Color,
    pub visor_low: Color,
    pub visor_band: Color,
    pub white: Color,
    pub highlight: Color,
    pub armor: Color,
    pub armor_dark: Color,
    pub gem_edge: Color,
    pub boot: Color,
    pub belt: Color,
    pub buckle: Color,
    pub outline: Color,
    /// RGB only; each ghost block picks its own alpha.
    pub ghost: Color,
    pub arrow: Color,
    pub bullet_bright: Color,
    pub bullet_dim: Color,
    pub enemy_eye: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            cyan: Color::rgb(0, 245, 255),
            blue: Color::rgb(0, 130, 200),
            dark_blue: Color::rgb(0, 50, 100),
            visor: Color::rgb(75, 255, 215),
            visor_low: Color::rgb(40, 200, 170),
            visor_band: Color::rgb(0, 30, 60),
            white: Color::rgb(255, 255, 255),
            highlight: Color::rgb(140, 240, 255),
            armor: Color::rgb(12, 140, 218),
            armor_dark: Color::rgb(8, 95, 160),
            gem_edge: Color::rgb(0, 180, 170),
            boot: Color::rgb(0, 65, 140),
            belt: Color::rgb(0, 40, 90),
            buckle: Color::rgb(220, 195, 60),
            outline: Color::rgb(0, 20, 50),
            ghost: Color::rgb(80, 200, 255),
            arrow: Color::rgba(255, 0, 255, 130),
            bullet_bright: Color::rgba(0, 255, 136, 230),
            bullet_dim: Color::rgba(0, 255, 136, 100),
            enemy_eye: Color::rgb(255, 60, 60),
        }
    }
}

/// Where the character sits on the block grid, plus the ghost echo offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Grid column of the character's center line.
    pub cx: i32,
    /// Grid row where the helmet starts.
    pub top: i32,
    /// Ghost echo offset in grid cells.
    pub ghost_offset: (i32, i32),
    /// Base alpha of the ghost echo.
    pub ghost_alpha: u8,
}

impl Layout {
    pub const fn visor_y(&self) -> i32 {
        self.top + 5
    }

    pub const fn torso_top(&self) -> i32 {
        self.top + 9
    }

    pub const fn legs_top(&self) -> i32 {
        self.torso_top() + 10
    }

    pub const fn arrow_y(&self) -> i32 {
        self.top + 12
    }
}

/// Faint horizontal lines laid over the finished image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scanlines {
    /// Distance in pixels between lines; rows `0, stride, 2*stride, ..` get one.
    pub stride: u32,
    pub color: Color,
}

impl Default for Scanlines {
    fn default() -> Self {
        Self { stride: 4, color: Color::rgba(0, 0, 0, 15) }
    }
}

/// Everything needed to render and save the icon.
#[derive(Clone, Debug, PartialEq)]
pub struct IconConfig {
    /// Canvas width and height in pixels (the icon is square).
    pub size: u32,
    /// Canvas pixels per grid cell.
    pub cell: u32,
    pub background: RadialBackground,
    pub palette: Palette,
    pub layout: Layout,
    pub glows: Vec<GlowSource>,
    /// Standard deviation of the blur applied to the glow layer.
    pub glow_blur: f32,
    pub scanlines: Scanlines,
    pub output: PathBuf,
}

pub const ICON_SIZE: u32 = 1024;
pub const CELL_SIZE: u32 = 28;

impl IconConfig {
    /// The Rewind Survivor app icon: 1024x1024, 28px blocks.
    pub fn rewind_survivor() -> Self {
        let size = ICON_SIZE;
        let cell = CELL_SIZE;
        let grid = (size / cell) as i32;
        let layout = Layout {
            cx: grid / 2,
            top: 5,
            ghost_offset: (-3, -1),
            ghost_alpha: 55,
        };
        let glows = glow_sources(&layout, cell as i32);

        Self {
            size,
            cell,
            background: RadialBackground::default(),
            palette: Palette::default(),
            layout,
            glows,
            glow_blur: 30.0,
            scanlines: Scanlines::default(),
            output: PathBuf::from("AppIcon.png"),
        }
    }

    /// Same recipe, different destination.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Number of grid cells along one edge.
    pub const fn grid(&self) -> i32 {
        if self.cell == 0 { 0 } else { (self.size / self.cell) as i32 }
    }

    /// Reject recipes the pipeline can't render.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::Config("canvas size must be non-zero".into()));
        }
        if self.cell == 0 {
            return Err(Error::Config("cell size must be non-zero".into()));
        }
        if self.scanlines.stride == 0 {
            return Err(Error::Config("scanline stride must be non-zero".into()));
        }
        if !self.glow_blur.is_finite() || self.glow_blur < 0.0 {
            return Err(Error::Config(format!("invalid glow blur {}", self.glow_blur)));
        }
        Ok(())
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self::rewind_survivor()
    }
}

/// Glow sources anchored to the sprite, in canvas pixels.
fn glow_sources(l: &Layout, p: i32) -> Vec<GlowSource> {
    let (gox, goy) = l.ghost_offset;
    let half = p / 2;
    vec![
        // visor (most prominent)
        GlowSource::new(l.cx * p + half, l.visor_y() * p + half, 140, Color::rgba(75, 255, 215, 60)),
        // ghost
        GlowSource::new((l.cx + gox) * p, (l.top + 5 + goy) * p, 180, Color::rgba(80, 200, 255, 35)),
        // chest emblem
        GlowSource::new(l.cx * p + half, (l.torso_top() + 3) * p + half, 100, Color::rgba(0, 245, 255, 45)),
        // bullet trails
        GlowSource::new((l.cx + 14) * p, (l.torso_top() + 2) * p, 80, Color::rgba(0, 255, 136, 30)),
        GlowSource::new((l.cx + 14) * p, (l.torso_top() + 6) * p, 80, Color::rgba(0, 255, 136, 25)),
        // rewind arrows
        GlowSource::new(5 * p, l.arrow_y() * p, 100, Color::rgba(255, 0, 255, 25)),
    ]
}
