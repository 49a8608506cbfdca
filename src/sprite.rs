// The pixel-art scene: ghost echo, space marine, rewind arrows, bullet trails, enemy eyes.
// Visual expectation: a chunky neon character in the middle of the icon, a faint
// cyan "echo" of it up and to the left, and small details scattered around.
//
// Everything here is one fixed sequence of block writes; the order matters
// (later blocks paint over earlier ones).

use crate::config::{IconConfig, Layout, Palette};
use crate::draw::set_block;
use crate::types::{Canvas, Color};

/// Block painter bound to one canvas and cell size.
struct Blocks<'a> {
    canvas: &'a mut Canvas,
    cell: u32,
}

impl Blocks<'_> {
    #[inline]
    fn px(&mut self, gx: i32, gy: i32, color: Color) {
        set_block(self.canvas, self.cell, gx, gy, color);
    }

    /// Horizontal run of blocks from `x0` to `x1` inclusive.
    fn row(&mut self, x0: i32, x1: i32, gy: i32, color: Color) {
        for x in x0..=x1 {
            self.px(x, gy, color);
        }
    }
}

/// Draw the whole scene onto `canvas`.
pub fn draw_sprite(canvas: &mut Canvas, cfg: &IconConfig) {
    let mut b = Blocks { canvas, cell: cfg.cell };
    let (l, pal) = (&cfg.layout, &cfg.palette);

    draw_ghost(&mut b, l, pal);
    draw_helmet(&mut b, l, pal);
    draw_torso(&mut b, l, pal);
    draw_limbs(&mut b, l, pal);
    draw_rewind_arrows(&mut b, l, pal);
    draw_bullet_trails(&mut b, l, pal, cfg.grid());
    draw_enemy_eyes(&mut b, l, pal, cfg.grid());
}

/* ---------- Ghost echo: translucent copy of the silhouette, offset up-left ---------- */

fn draw_ghost(b: &mut Blocks<'_>, l: &Layout, pal: &Palette) {
    let (gox, goy) = l.ghost_offset;
    let gx = l.cx + gox;
    let ga = i32::from(l.ghost_alpha);
    let ghost = |a: i32| pal.ghost.with_alpha(a.clamp(0, 255) as u8);

    // helmet
    for y in (l.top + 1)..(l.top + 9) {
        let hw = (y - l.top).min(6);
        b.row(gx - hw, gx + hw, y + goy, ghost(ga));
    }

    // visor
    b.row(gx - 5, gx + 5, l.visor_y() + goy, ghost(ga + 30));

    // torso narrows and fades downward
    for y in l.torso_top()..(l.top + 18) {
        let dy = y - l.torso_top();
        let hw = (6 - dy / 2).max(2);
        let fade = (ga - dy * 5).max(10);
        b.row(gx - hw, gx + hw, y + goy, ghost(fade));
    }

    // wispy trails
    for y in (l.top + 18)..(l.top + 25) {
        let fade = (40 - (y - l.top - 18) * 5).max(5);
        let w = if y.rem_euclid(3) == 0 { 1 } else { 0 };
        b.px(gx - 2 - w, y + goy, ghost(fade));
        b.px(gx, y + goy, ghost(fade));
        b.px(gx + 2 + w, y + goy, ghost(fade));
    }
}

/* ---------- Helmet + visor ---------- */

fn draw_helmet(b: &mut Blocks<'_>, l: &Layout, pal: &Palette) {
    let (cx, top) = (l.cx, l.top);

    // crest (antenna)
    b.px(cx, top - 1, pal.cyan);
    b.px(cx - 1, top, pal.cyan);
    b.px(cx, top, pal.highlight);
    b.px(cx + 1, top, pal.cyan);

    // shell: highlight on the left, shadow on the right
    for y in (top + 1)..(top + 9) {
        let hw = (y - top).min(6);
        for x in (cx - hw)..=(cx + hw) {
            let c = if x < cx - hw + 2 {
                pal.highlight
            } else if x > cx + hw - 2 {
                pal.dark_blue
            } else {
                pal.blue
            };
            b.px(x, y, c);
        }
        b.px(cx - hw - 1, y, pal.outline);
        b.px(cx + hw + 1, y, pal.outline);
    }

    // top edge
    b.row(cx - 1, cx + 1, top, pal.cyan);
    b.px(cx - 2, top + 1, pal.outline);
    b.px(cx + 2, top + 1, pal.outline);

    // bottom edge
    b.row(cx - 7, cx + 7, top + 8, pal.outline);

    // visor band with two glowing eyes
    let vy = l.visor_y();
    for x in (cx - 5)..=(cx + 5) {
        b.px(x, vy, pal.outline);
        b.px(x, vy + 1, pal.visor_band);
    }
    for x in [cx - 4, cx - 3, cx - 2, cx + 2, cx + 3, cx + 4] {
        b.px(x, vy, pal.visor);
        b.px(x, vy + 1, pal.visor_low);
    }
}

/* ---------- Torso: armor, chest plate, gem emblem, belt ---------- */

fn draw_torso(b: &mut Blocks<'_>, l: &Layout, pal: &Palette) {
    let cx = l.cx;
    let tt = l.torso_top();

    for y in tt..(tt + 10) {
        let hw = match y - tt {
            0..=2 => 7,
            3..=5 => 6,
            _ => 5,
        };
        for x in (cx - hw)..=(cx + hw) {
            let c = if x > cx + hw - 2 { pal.armor_dark } else { pal.armor };
            b.px(x, y, c);
        }
        b.px(cx - hw - 1, y, pal.outline);
        b.px(cx + hw + 1, y, pal.outline);
    }

    // chest plate
    for y in tt..(tt + 5) {
        b.row(cx - 3, cx + 3, y, pal.cyan);
    }

    // gem emblem
    b.px(cx, tt + 1, pal.white);
    b.px(cx - 1, tt + 2, pal.visor);
    b.px(cx, tt + 2, pal.white);
    b.px(cx + 1, tt + 2, pal.visor);
    b.px(cx - 2, tt + 3, pal.gem_edge);
    b.row(cx - 1, cx + 1, tt + 3, pal.visor);
    b.px(cx + 2, tt + 3, pal.gem_edge);
    b.px(cx - 1, tt + 4, pal.visor);
    b.px(cx, tt + 4, pal.white);
    b.px(cx + 1, tt + 4, pal.visor);

    // belt + buckle
    let belt_y = tt + 8;
    b.row(cx - 5, cx + 5, belt_y, pal.belt);
    b.row(cx - 1, cx + 1, belt_y, pal.buckle);
}

/* ---------- Shoulders, arms, hands, legs, boots ---------- */

fn draw_limbs(b: &mut Blocks<'_>, l: &Layout, pal: &Palette) {
    let cx = l.cx;
    let tt = l.torso_top();

    // shoulder pads
    for y in tt..(tt + 4) {
        for x in [cx - 9, cx - 8, cx + 8, cx + 9] {
            b.px(x, y, pal.blue);
        }
    }
    b.px(cx - 9, tt, pal.highlight);
    b.px(cx + 9, tt, pal.highlight);
    b.px(cx - 10, tt + 2, pal.outline);
    b.px(cx + 10, tt + 2, pal.outline);

    // arms
    for y in (tt + 4)..(tt + 9) {
        b.px(cx - 8, y, pal.armor);
        b.px(cx - 9, y, pal.armor_dark);
        b.px(cx + 8, y, pal.armor);
        b.px(cx + 9, y, pal.armor_dark);
    }

    // hands
    for x in [cx - 9, cx - 8, cx + 8, cx + 9] {
        b.px(x, tt + 9, pal.cyan);
    }

    // legs, with a one-block gap in the middle
    let lt = l.legs_top();
    for y in lt..(lt + 8) {
        b.px(cx - 3, y, pal.blue);
        b.px(cx - 2, y, pal.armor);
        b.px(cx - 1, y, pal.armor_dark);
        b.px(cx + 1, y, pal.armor_dark);
        b.px(cx + 2, y, pal.armor);
        b.px(cx + 3, y, pal.blue);
        b.px(cx - 4, y, pal.outline);
        b.px(cx + 4, y, pal.outline);
    }

    // boots
    let boot_y = lt + 8;
    for y in [boot_y, boot_y + 1] {
        b.row(cx - 4, cx - 1, y, pal.boot);
        b.row(cx + 1, cx + 4, y, pal.boot);
    }
    b.px(cx - 4, boot_y, pal.armor);
    b.px(cx + 1, boot_y, pal.armor);
}

/* ---------- Background details ---------- */

/// Two translucent magenta chevrons ("<<") on the left.
fn draw_rewind_arrows(b: &mut Blocks<'_>, l: &Layout, pal: &Palette) {
    let ay = l.arrow_y();
    for a in 0..2 {
        let ax = 3 + a * 5;
        for i in 0..4 {
            b.px(ax + i, ay - i, pal.arrow);
            b.px(ax + i, ay + i, pal.arrow);
        }
    }
}

/// Two trails of bright/dim bullet pairs fanning out to the right.
fn draw_bullet_trails(b: &mut Blocks<'_>, l: &Layout, pal: &Palette, grid: i32) {
    let tt = l.torso_top();

    // upper-right
    for i in 0..6 {
        let bx = l.cx + 10 + i * 2;
        let by = tt + 2 - i;
        if bx < grid && by >= 0 {
            b.px(bx, by, pal.bullet_bright);
            b.px(bx + 1, by, pal.bullet_dim);
        }
    }

    // lower-right
    for i in 0..5 {
        let bx = l.cx + 10 + i * 2;
        let by = tt + 4 + i;
        if bx < grid {
            b.px(bx, by, pal.bullet_bright);
            b.px(bx + 1, by, pal.bullet_dim);
        }
    }
}

/// Grid positions of the lurking enemies (left eye; the right eye is one cell over).
pub fn enemy_positions(l: &Layout, grid: i32) -> [(i32, i32); 8] {
    [
        (4, 6),
        (grid - 5, 7),
        (3, grid - 8),
        (grid - 4, grid - 7),
        (5, l.top + 20),
        (grid - 6, l.top + 18),
        (grid - 5, l.top + 2),
        (6, l.top + 3),
    ]
}

/// Alpha of an enemy's eyes: dimmer the farther from the character,
/// `None` when it sits too close to draw at all.
pub fn enemy_eye_alpha(l: &Layout, ex: i32, ey: i32) -> Option<u8> {
    let dx = f64::from(ex - l.cx);
    let dy = f64::from(ey - (l.top + 12));
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= 12.0 {
        return None;
    }
    Some(((150.0 - dist * 3.0) as i32).clamp(50, 255) as u8)
}

fn draw_enemy_eyes(b: &mut Blocks<'_>, l: &Layout, pal: &Palette, grid: i32) {
    for (ex, ey) in enemy_positions(l, grid) {
        if let Some(alpha) = enemy_eye_alpha(l, ex, ey) {
            let eye = pal.enemy_eye.with_alpha(alpha);
            b.px(ex, ey, eye);
            b.px(ex + 1, ey, eye);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered() -> (Canvas, IconConfig) {
        let cfg = IconConfig::rewind_survivor();
        let mut canvas = Canvas::new(cfg.size, cfg.size, Color::BLACK);
        draw_sprite(&mut canvas, &cfg);
        (canvas, cfg)
    }

    /// Color at the middle of grid cell (gx,gy).
    fn cell(canvas: &Canvas, cfg: &IconConfig, gx: i32, gy: i32) -> Color {
        let p = cfg.cell as i32;
        canvas.get(gx * p + p / 2, gy * p + p / 2).unwrap()
    }

    #[test]
    fn visor_eyes_glow() {
        let (canvas, cfg) = rendered();
        let (cx, vy) = (cfg.layout.cx, cfg.layout.visor_y());
        assert_eq!(cell(&canvas, &cfg, cx - 3, vy), cfg.palette.visor);
        assert_eq!(cell(&canvas, &cfg, cx + 3, vy), cfg.palette.visor);
        assert_eq!(cell(&canvas, &cfg, cx, vy), cfg.palette.outline);
        assert_eq!(cell(&canvas, &cfg, cx, vy + 1), cfg.palette.visor_band);
    }

    #[test]
    fn chest_gem_and_buckle() {
        let (canvas, cfg) = rendered();
        let (cx, tt) = (cfg.layout.cx, cfg.layout.torso_top());
        assert_eq!(cell(&canvas, &cfg, cx, tt + 1), cfg.palette.white);
        assert_eq!(cell(&canvas, &cfg, cx - 2, tt + 3), cfg.palette.gem_edge);
        assert_eq!(cell(&canvas, &cfg, cx, tt + 8), cfg.palette.buckle);
        assert_eq!(cell(&canvas, &cfg, cx - 4, tt + 8), cfg.palette.belt);
    }

    #[test]
    fn legs_leave_a_gap() {
        let (canvas, cfg) = rendered();
        let (cx, lt) = (cfg.layout.cx, cfg.layout.legs_top());
        assert_eq!(cell(&canvas, &cfg, cx, lt + 3), Color::BLACK);
        assert_eq!(cell(&canvas, &cfg, cx - 3, lt + 2), cfg.palette.blue);
        assert_eq!(cell(&canvas, &cfg, cx + 1, lt + 8), cfg.palette.armor);
    }

    #[test]
    fn ghost_is_translucent_over_background() {
        let (canvas, cfg) = rendered();
        let (gox, goy) = cfg.layout.ghost_offset;
        // Far-left column of the ghost's torso, not covered by the marine.
        let c = cell(&canvas, &cfg, cfg.layout.cx + gox - 6, cfg.layout.torso_top() + goy);
        assert!(c.is_opaque());
        assert!(c.b > 0 && c.b < cfg.palette.ghost.b, "{c:?}");
    }

    #[test]
    fn enemies_near_the_character_are_skipped() {
        let cfg = IconConfig::rewind_survivor();
        let l = &cfg.layout;
        // (6, top+3) is dist 15 from center: drawn; alpha = 150 - 45
        assert_eq!(enemy_eye_alpha(l, 6, l.top + 3), Some(105));
        assert_eq!(enemy_eye_alpha(l, l.cx, l.top + 12), None);
        // far corner clamps to the floor of 50
        assert_eq!(enemy_eye_alpha(l, 100, 100), Some(50));
    }

    #[test]
    fn everything_stays_opaque() {
        let (canvas, _) = rendered();
        assert!(canvas.is_opaque());
    }
}
