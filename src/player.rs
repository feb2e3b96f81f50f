//! The duck: movement, timed statuses and the single-slot carry.

use crate::entities::TrashCategory;
use crate::geometry::{Bounds, Point, Size};

pub const PLAYER_SIZE: Size = Size::new(80.0, 80.0);
pub const BASE_SPEED: f32 = 7.0;
/// Effective speed multiplier while slowed.
pub const SLOW_FACTOR: f32 = 0.4;
pub const START_LIVES: u32 = 3;
/// Frames of invincibility after a hit (1.5 s at 60 Hz).
pub const INVINCIBILITY_FRAMES: u32 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

/// Four-way directional flags for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    pub fn is_moving(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Trash(TrashCategory),
    Seedling,
}

/// Whatever is in the duck's beak.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarriedItem {
    pub name: String,
    pub kind: ItemKind,
}

impl CarriedItem {
    pub fn trash(name: impl Into<String>, category: TrashCategory) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Trash(category),
        }
    }

    pub fn seedling() -> Self {
        Self {
            name: "seedling".to_string(),
            kind: ItemKind::Seedling,
        }
    }

    pub fn category(&self) -> Option<TrashCategory> {
        match self.kind {
            ItemKind::Trash(c) => Some(c),
            ItemKind::Seedling => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    pub text: String,
    pub frames_left: u32,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Point,
    pub size: Size,
    pub facing: Facing,
    pub base_speed: f32,
    pub lives: u32,
    pub bounds: Bounds,
    carrying: Option<CarriedItem>,
    invincible_timer: u32,
    slow_timer: u32,
    hint: Option<Hint>,
    /// Frames spent walking without stopping; 0 when idle.
    pub walk_frame: u32,
}

impl Player {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            pos: bounds.center(),
            size: PLAYER_SIZE,
            facing: Facing::Right,
            base_speed: BASE_SPEED,
            lives: START_LIVES,
            bounds,
            carrying: None,
            invincible_timer: 0,
            slow_timer: 0,
            hint: None,
            walk_frame: 0,
        }
    }

    // ── Movement ────────────────────────────────────────────────────────────

    pub fn effective_speed(&self) -> f32 {
        if self.is_slowed() {
            self.base_speed * SLOW_FACTOR
        } else {
            self.base_speed
        }
    }

    /// Apply one frame of directional input.  Axes are handled independently,
    /// so diagonals cover more ground than a single axis.  The slow countdown
    /// ticks here, after the slowed speed has been used for this frame.
    pub fn handle_movement(&mut self, input: &MoveInput) {
        let speed = self.effective_speed();
        self.slow_timer = self.slow_timer.saturating_sub(1);

        if input.left {
            self.pos.x -= speed;
            self.facing = Facing::Left;
        }
        if input.right {
            self.pos.x += speed;
            self.facing = Facing::Right;
        }
        if input.up {
            self.pos.y -= speed;
        }
        if input.down {
            self.pos.y += speed;
        }

        self.pos = self.bounds.clamp(self.pos, self.size);

        if input.is_moving() {
            self.walk_frame += 1;
        } else {
            self.walk_frame = 0;
        }
    }

    /// Per-frame countdown of invincibility and the hint.
    pub fn update(&mut self) {
        self.invincible_timer = self.invincible_timer.saturating_sub(1);
        if let Some(hint) = &mut self.hint {
            hint.frames_left = hint.frames_left.saturating_sub(1);
            if hint.frames_left == 0 {
                self.hint = None;
            }
        }
    }

    // ── Carry slot ──────────────────────────────────────────────────────────

    pub fn carrying(&self) -> Option<&CarriedItem> {
        self.carrying.as_ref()
    }

    pub fn is_carrying(&self) -> bool {
        self.carrying.is_some()
    }

    /// Fill the carry slot.  A no-op returning false if it is already full.
    pub fn pick_up(&mut self, item: CarriedItem) -> bool {
        if self.carrying.is_some() {
            return false;
        }
        self.carrying = Some(item);
        true
    }

    pub fn drop_carried(&mut self) -> Option<CarriedItem> {
        self.carrying.take()
    }

    // ── Statuses ────────────────────────────────────────────────────────────

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0
    }

    pub fn invincible_frames(&self) -> u32 {
        self.invincible_timer
    }

    /// Lose a life unless invincible.  Returns whether the hit landed.
    pub fn take_damage(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invincible_timer = INVINCIBILITY_FRAMES;
        true
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_timer > 0
    }

    /// Slow the duck for `frames`.  Reapplying refreshes the countdown.
    pub fn apply_slow(&mut self, frames: u32) {
        self.slow_timer = frames;
    }

    pub fn show_hint(&mut self, text: impl Into<String>, frames: u32) {
        self.hint = Some(Hint {
            text: text.into(),
            frames_left: frames,
        });
    }

    pub fn hint(&self) -> Option<&Hint> {
        self.hint.as_ref()
    }

    // ── Resets ──────────────────────────────────────────────────────────────

    /// Between levels: back to spawn with empty beak and no statuses.
    pub fn soft_reset(&mut self) {
        self.pos = self.bounds.center();
        self.facing = Facing::Right;
        self.carrying = None;
        self.invincible_timer = 0;
        self.slow_timer = 0;
        self.hint = None;
        self.walk_frame = 0;
    }

    /// New game: soft reset plus full lives.
    pub fn hard_reset(&mut self) {
        self.soft_reset();
        self.lives = START_LIVES;
    }
}
