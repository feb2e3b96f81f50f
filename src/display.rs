//! Terminal renderer for a `Session`.
//!
//! Draw functions take a writer and a read-only session and queue crossterm
//! commands.  World units are scaled onto the terminal grid; the HUD owns the
//! top row and hints the bottom one.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use eco_duck::config::GlyphStyle;
use eco_duck::entities::{Behavior, DecorationKind, Entity, PlantState, TrashCategory};
use eco_duck::geometry::{Point, HUD_BAND};
use eco_duck::levels::{Accent, LevelId};
use eco_duck::particles::{Particle, Tint};
use eco_duck::player::{Facing, ItemKind};
use eco_duck::session::{Screen, Session};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkGreen;
const C_HUD: Color = Color::White;
const C_HUD_LIVES: Color = Color::Red;
const C_TIMER_LOW: Color = Color::Red;
const C_PLAYER: Color = Color::Yellow;
const C_HINT: Color = Color::White;
const C_TIP: Color = Color::DarkGrey;
const C_WATER: Color = Color::Blue;
const C_HAZARD: Color = Color::DarkRed;
const C_SCENERY: Color = Color::DarkGrey;
const C_PLANT: Color = Color::Green;

/// Remaining-life fraction below which a particle is drawn dimmed.
const PARTICLE_DIM_BELOW: f32 = 0.4;

const CONFETTI_PALETTE: [Color; 7] = [
    Color::Blue,
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
    Color::White,
];

fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Blue => Color::Blue,
        Accent::Water => Color::Cyan,
        Accent::Green => Color::Green,
    }
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Success => Color::Green,
        Tint::Failure => Color::Red,
        Tint::Water => Color::Cyan,
        Tint::Growth => Color::DarkGreen,
        Tint::Hurt => Color::Red,
    }
}

/// Particles darken over the last part of their life.
fn particle_color(p: &Particle) -> Color {
    if p.fade() > PARTICLE_DIM_BELOW {
        return tint_color(p.tint);
    }
    match p.tint {
        Tint::Success | Tint::Growth => Color::DarkGreen,
        Tint::Failure | Tint::Hurt => Color::DarkRed,
        Tint::Water => Color::DarkCyan,
    }
}

fn category_color(category: TrashCategory) -> Color {
    match category {
        TrashCategory::Recyclable => Color::Blue,
        TrashCategory::Kitchen => Color::Green,
        TrashCategory::Hazardous => Color::Red,
        TrashCategory::Other => Color::Grey,
    }
}

// ── Glyph cache ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphKey {
    Duck(Facing),
    Trash(TrashCategory),
    Bin(TrashCategory),
    FaucetOpen,
    FaucetClosed,
    Droplet,
    Puddle,
    SeedlingPile,
    PlantEmpty,
    /// Growth stage 0..=2.
    Sapling(u8),
    Hazard,
    Decoration(DecorationKind),
    Particle,
    Confetti,
    Heart,
}

/// Memoised glyphs for one glyph style.  Emoji output silently degrades to
/// ASCII when the style says so.
pub struct GlyphCache {
    style: GlyphStyle,
    glyphs: HashMap<GlyphKey, &'static str>,
}

impl GlyphCache {
    pub fn new(style: GlyphStyle) -> Self {
        Self {
            style,
            glyphs: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: GlyphKey) -> &'static str {
        let style = self.style;
        *self.glyphs.entry(key).or_insert_with(|| match style {
            GlyphStyle::Emoji => emoji_glyph(key),
            GlyphStyle::Ascii => ascii_glyph(key),
        })
    }
}

fn emoji_glyph(key: GlyphKey) -> &'static str {
    match key {
        GlyphKey::Duck(_) => "🦆",
        GlyphKey::Trash(TrashCategory::Recyclable) => "🧴",
        GlyphKey::Trash(TrashCategory::Kitchen) => "🍌",
        GlyphKey::Trash(TrashCategory::Hazardous) => "🔋",
        GlyphKey::Trash(TrashCategory::Other) => "🧦",
        GlyphKey::Bin(_) => "🗑",
        GlyphKey::FaucetOpen => "🚰",
        GlyphKey::FaucetClosed => "🔒",
        GlyphKey::Droplet => "·",
        GlyphKey::Puddle => "💧",
        GlyphKey::SeedlingPile => "🪴",
        GlyphKey::PlantEmpty => "🟫",
        GlyphKey::Sapling(0) => "🌱",
        GlyphKey::Sapling(1) => "🌿",
        GlyphKey::Sapling(_) => "🌳",
        GlyphKey::Hazard => "🪓",
        GlyphKey::Decoration(kind) => match kind {
            DecorationKind::Slide => "🛝",
            DecorationKind::Swing => "🎠",
            DecorationKind::TrackCone => "🔺",
            DecorationKind::Bench => "🪑",
            DecorationKind::Grass => "🌾",
            DecorationKind::Flower => "🌼",
            DecorationKind::Desk => "▭",
            DecorationKind::Chair => "🪑",
            DecorationKind::Sink => "🚿",
            DecorationKind::Bush => "🌳",
            DecorationKind::Tree => "🌲",
            DecorationKind::Fence => "🚧",
        },
        GlyphKey::Particle => "•",
        GlyphKey::Confetti => "▪",
        GlyphKey::Heart => "♥",
    }
}

fn ascii_glyph(key: GlyphKey) -> &'static str {
    match key {
        GlyphKey::Duck(Facing::Left) => "<D",
        GlyphKey::Duck(Facing::Right) => "D>",
        GlyphKey::Trash(_) => "*",
        GlyphKey::Bin(TrashCategory::Recyclable) => "[R]",
        GlyphKey::Bin(TrashCategory::Kitchen) => "[K]",
        GlyphKey::Bin(TrashCategory::Hazardous) => "[H]",
        GlyphKey::Bin(TrashCategory::Other) => "[O]",
        GlyphKey::FaucetOpen => "F~",
        GlyphKey::FaucetClosed => "F",
        GlyphKey::Droplet => ".",
        GlyphKey::Puddle => "~~",
        GlyphKey::SeedlingPile => "&&",
        GlyphKey::PlantEmpty => "o",
        GlyphKey::Sapling(0) => ",",
        GlyphKey::Sapling(1) => "t",
        GlyphKey::Sapling(_) => "T",
        GlyphKey::Hazard => "X",
        GlyphKey::Decoration(kind) => match kind {
            DecorationKind::Slide => "/",
            DecorationKind::Swing => "H",
            DecorationKind::TrackCone => "^",
            DecorationKind::Bench | DecorationKind::Chair => "h",
            DecorationKind::Grass => "\"",
            DecorationKind::Flower => "@",
            DecorationKind::Desk => "=",
            DecorationKind::Sink => "U",
            DecorationKind::Bush => "%",
            DecorationKind::Tree => "Y",
            DecorationKind::Fence => "#",
        },
        GlyphKey::Particle => "*",
        GlyphKey::Confetti => "'",
        GlyphKey::Heart => "<3",
    }
}

// ── World → terminal mapping ─────────────────────────────────────────────────

/// Maps world coordinates onto the play rows between the borders.
struct Viewport {
    cols: u16,
    rows: u16,
    world_w: f32,
    world_h: f32,
    shake: (i32, i32),
}

impl Viewport {
    fn play_top(&self) -> u16 {
        2
    }

    fn play_bottom(&self) -> u16 {
        self.rows.saturating_sub(3)
    }

    fn cell(&self, p: Point) -> Option<(u16, u16)> {
        let inner_w = self.cols.saturating_sub(2).max(1) as f32;
        let inner_h = (self.play_bottom().saturating_sub(self.play_top()) + 1) as f32;
        let fx = (p.x / self.world_w).clamp(0.0, 1.0);
        let fy = ((p.y - HUD_BAND) / (self.world_h - HUD_BAND)).clamp(0.0, 1.0);
        let col = 1 + (fx * (inner_w - 1.0)).round() as i32 + self.shake.0.signum();
        let row = self.play_top() as i32 + (fy * (inner_h - 1.0)).round() as i32
            + self.shake.1.signum();
        if col < 1
            || col >= self.cols as i32 - 1
            || row < self.play_top() as i32
            || row > self.play_bottom() as i32
        {
            return None;
        }
        Some((col as u16, row as u16))
    }
}

fn put<W: Write>(
    out: &mut W,
    view: &Viewport,
    p: Point,
    color: Color,
    text: &str,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(p) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    glyphs: &mut GlyphCache,
    shake: (i32, i32),
    frame: u64,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let (cols, rows) = terminal::size()?;
    let view = Viewport {
        cols,
        rows,
        world_w: session.bounds.width,
        world_h: session.bounds.height,
        shake,
    };

    match session.screen {
        Screen::Menu => draw_menu(out, &view)?,
        Screen::Help => draw_help(out, &view)?,
        Screen::Playing => draw_playing(out, &view, session, glyphs, frame)?,
        Screen::LevelUp => {
            draw_playing(out, &view, session, glyphs, frame)?;
            draw_confetti(out, &view, session, glyphs)?;
            draw_level_up(out, &view, session)?;
        }
        Screen::Win | Screen::GameOver => {
            draw_confetti(out, &view, session, glyphs)?;
            draw_result(out, &view, session)?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_playing<W: Write>(
    out: &mut W,
    view: &Viewport,
    session: &Session,
    glyphs: &mut GlyphCache,
    frame: u64,
) -> std::io::Result<()> {
    draw_border(out, view, accent_color(session.level.config().accent))?;
    draw_hud(out, view, session, glyphs)?;

    for entity in session.world.drawables() {
        draw_entity(out, view, entity, glyphs)?;
    }
    let glyph = glyphs.get(GlyphKey::Particle);
    for p in &session.particles.particles {
        put(out, view, p.pos, particle_color(p), glyph)?;
    }

    draw_player(out, view, session, glyphs, frame)?;
    draw_status_line(out, view, session)?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport, accent: Color) -> std::io::Result<()> {
    let w = view.cols as usize;
    let bottom = view.play_bottom() + 1;

    out.queue(style::SetForegroundColor(accent))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    for row in view.play_top()..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    view: &Viewport,
    session: &Session,
    glyphs: &mut GlyphCache,
) -> std::io::Result<()> {
    let config = session.level.config();
    let world = &session.world;

    // Level name and progress — left
    let verb = match session.level {
        LevelId::Sorting => "Sorted",
        LevelId::Water => "Closed",
        LevelId::Trees => "Planted",
    };
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(accent_color(config.accent)))?;
    out.queue(Print(config.name))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "  {} {}/{}",
        verb, world.score, config.target_score
    )))?;
    if world.count_remaining() > 0 {
        out.queue(Print(format!("  left:{}", world.count_remaining())))?;
    }

    // Timer — centre
    if let Some(secs) = world.seconds_left() {
        let timer = format!("[ {:>2}s ]", secs);
        let tx = (view.cols / 2).saturating_sub(timer.len() as u16 / 2);
        out.queue(cursor::MoveTo(tx, 0))?;
        out.queue(style::SetForegroundColor(if secs < 15 { C_TIMER_LOW } else { C_HUD }))?;
        out.queue(Print(timer))?;
    }

    // Carried item + lives — right
    let carried = match session.player.carrying() {
        Some(item) => match item.kind {
            ItemKind::Trash(c) => format!("Carrying: {} ({})  ", item.name, c.bin_label()),
            ItemKind::Seedling => "Carrying: seedling  ".to_string(),
        },
        None => String::new(),
    };
    let hearts = glyphs.get(GlyphKey::Heart).repeat(session.player.lives as usize);
    let right = format!("{}{}", carried, hearts);
    let rx = view
        .cols
        .saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&carried))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&hearts))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<W: Write>(
    out: &mut W,
    view: &Viewport,
    entity: &Entity,
    glyphs: &mut GlyphCache,
) -> std::io::Result<()> {
    let (key, color) = match &entity.behavior {
        Behavior::Trash { category, .. } => (GlyphKey::Trash(*category), category_color(*category)),
        Behavior::Bin { category } => (GlyphKey::Bin(*category), category_color(*category)),
        Behavior::Faucet(f) => {
            let glyph = glyphs.get(GlyphKey::Droplet);
            for d in &f.droplets {
                put(out, view, Point::new(d.x, d.y), C_WATER, glyph)?;
            }
            if f.is_open() {
                (GlyphKey::FaucetOpen, C_WATER)
            } else {
                (GlyphKey::FaucetClosed, C_SCENERY)
            }
        }
        Behavior::Puddle => (GlyphKey::Puddle, C_WATER),
        Behavior::SeedlingPile => (GlyphKey::SeedlingPile, C_PLANT),
        Behavior::PlantSpot(PlantState::Empty) => (GlyphKey::PlantEmpty, Color::DarkYellow),
        Behavior::PlantSpot(PlantState::Planted { .. }) => {
            let stage = (entity.growth_fraction().unwrap_or(0.0) * 2.0).round() as u8;
            (GlyphKey::Sapling(stage), C_PLANT)
        }
        Behavior::Hazard(_) => (GlyphKey::Hazard, C_HAZARD),
        Behavior::Decoration(kind) => (GlyphKey::Decoration(*kind), C_SCENERY),
    };
    let pos = Point::new(entity.pos.x, entity.pos.y + entity.bob_offset());
    put(out, view, pos, color, glyphs.get(key))
}

fn draw_player<W: Write>(
    out: &mut W,
    view: &Viewport,
    session: &Session,
    glyphs: &mut GlyphCache,
    frame: u64,
) -> std::io::Result<()> {
    let player = &session.player;
    // Blink while invincible
    if player.is_invincible() && player.invincible_frames() % 6 < 3 {
        return Ok(());
    }
    let color = if player.is_slowed() { Color::DarkYellow } else { C_PLAYER };
    let glyph = glyphs.get(GlyphKey::Duck(player.facing));
    // Waddle one cell up every few walking frames
    let mut pos = player.pos;
    if player.walk_frame > 0 && (frame / 8) % 2 == 0 {
        pos.y -= 4.0;
    }
    put(out, view, pos, color, glyph)
}

fn draw_confetti<W: Write>(
    out: &mut W,
    view: &Viewport,
    session: &Session,
    glyphs: &mut GlyphCache,
) -> std::io::Result<()> {
    let glyph = glyphs.get(GlyphKey::Confetti);
    for piece in &session.confetti.pieces {
        let color = CONFETTI_PALETTE[piece.hue as usize % CONFETTI_PALETTE.len()];
        put(out, view, piece.pos, color, glyph)?;
    }
    Ok(())
}

// ── Hint / tip line (last row) ────────────────────────────────────────────────

fn draw_status_line<W: Write>(
    out: &mut W,
    view: &Viewport,
    session: &Session,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    if let Some(hint) = session.player.hint() {
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(&hint.text))?;
    } else if let Some(tip) = session.tip() {
        out.queue(style::SetForegroundColor(C_TIP))?;
        out.queue(Print(tip))?;
    } else {
        out.queue(style::SetForegroundColor(C_TIP))?;
        out.queue(Print("Arrows / WASD : Move   SPACE : Interact   ESC : Menu   Q : Quit"))?;
    }
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    start_row: u16,
    lines: &[(String, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    for (i, (line, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let mut lines = vec![
        ("★  ECO DUCK ADVENTURE  ★".to_string(), Color::Yellow),
        ("Protect the planet, one chore at a time".to_string(), Color::DarkGrey),
        (String::new(), Color::White),
    ];
    for level in LevelId::ALL {
        let config = level.config();
        lines.push((config.name.to_string(), accent_color(config.accent)));
    }
    lines.push((String::new(), Color::White));
    lines.push(("[ENTER] Start   [H] Help   [Q] Quit".to_string(), Color::White));
    let start = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    draw_centered(out, view, start, &lines)
}

fn draw_help<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let mut lines = vec![("HOW TO PLAY".to_string(), Color::Yellow), (String::new(), Color::White)];
    for level in LevelId::ALL {
        let config = level.config();
        lines.push((config.name.to_string(), accent_color(config.accent)));
        lines.push((config.description.to_string(), Color::White));
        lines.push((config.tip.to_string(), Color::DarkGrey));
        lines.push((String::new(), Color::White));
    }
    lines.push(("Arrows / WASD move the duck, SPACE interacts".to_string(), Color::White));
    lines.push(("[ESC] Back".to_string(), Color::DarkGrey));
    let start = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    draw_centered(out, view, start, &lines)
}

fn draw_level_up<W: Write>(out: &mut W, view: &Viewport, session: &Session) -> std::io::Result<()> {
    let mut lines = vec![
        ("╔════════════════════╗".to_string(), Color::Green),
        ("║   LEVEL COMPLETE   ║".to_string(), Color::Green),
        ("╚════════════════════╝".to_string(), Color::Green),
        (format!("Tasks done: {}", session.world.score), Color::White),
    ];
    if let Some(next) = session.level.next() {
        let config = next.config();
        lines.push((format!("Next: {}", config.name), accent_color(config.accent)));
        lines.push((config.description.to_string(), Color::DarkGrey));
    }
    lines.push(("[ENTER] Continue".to_string(), Color::White));
    let start = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    draw_centered(out, view, start, &lines)
}

fn draw_result<W: Write>(out: &mut W, view: &Viewport, session: &Session) -> std::io::Result<()> {
    let lines = if session.screen == Screen::Win {
        vec![
            ("╔════════════════════╗".to_string(), Color::Green),
            ("║   YOU WIN!  ★★★    ║".to_string(), Color::Green),
            ("╚════════════════════╝".to_string(), Color::Green),
            (format!("Total tasks: {}", session.total_score), Color::Yellow),
            ("You're a little eco guardian!".to_string(), Color::White),
            ("[R] Play Again   [ESC] Menu   [Q] Quit".to_string(), Color::White),
        ]
    } else {
        vec![
            ("╔════════════════════╗".to_string(), Color::Red),
            ("║     GAME  OVER     ║".to_string(), Color::Red),
            ("╚════════════════════╝".to_string(), Color::Red),
            (format!("Tasks done: {}", session.world.score), Color::Yellow),
            ("Don't give up, try again!".to_string(), Color::White),
            ("[R] Play Again   [ESC] Menu   [Q] Quit".to_string(), Color::White),
        ]
    };
    let start = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);
    draw_centered(out, view, start, &lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(life: u32, max_life: u32) -> Particle {
        Particle {
            pos: Point::new(0.0, 0.0),
            vx: 0.0,
            vy: 0.0,
            life,
            max_life,
            size: 3.0,
            tint: Tint::Water,
        }
    }

    #[test]
    fn glyph_cache_follows_style_and_memoises() {
        let mut ascii = GlyphCache::new(GlyphStyle::Ascii);
        assert_eq!(ascii.get(GlyphKey::Duck(Facing::Left)), "<D");
        assert_eq!(ascii.get(GlyphKey::Bin(TrashCategory::Kitchen)), "[K]");
        assert_eq!(ascii.glyphs.len(), 2);
        ascii.get(GlyphKey::Duck(Facing::Left));
        assert_eq!(ascii.glyphs.len(), 2, "repeat lookups hit the cache");

        let mut emoji = GlyphCache::new(GlyphStyle::Emoji);
        assert_eq!(emoji.get(GlyphKey::Puddle), "💧");
    }

    #[test]
    fn particles_dim_as_they_fade() {
        assert_eq!(particle_color(&particle(30, 30)), Color::Cyan);
        assert_eq!(particle_color(&particle(5, 30)), Color::DarkCyan);
    }
}
