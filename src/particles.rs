//! Short-lived cosmetic effects.
//!
//! Particles carry no gameplay meaning; the simulation spawns them on events
//! and the renderer draws whatever is alive.  Colour is expressed as a
//! `Tint` so this module stays free of any drawing library.

use std::f32::consts::TAU;

use rand::Rng;

use crate::geometry::{Bounds, Point};

/// What a particle burst signals.  The renderer maps this to a colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tint {
    /// Correct action / pickup.
    Success,
    /// Wrong bin.
    Failure,
    /// Faucet closed.
    Water,
    /// Tree planted.
    Growth,
    /// Player hit by a hazard.
    Hurt,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Point,
    pub vx: f32,
    pub vy: f32,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub tint: Tint,
}

impl Particle {
    /// Remaining life as a fraction, for fading.
    pub fn fade(&self) -> f32 {
        self.life as f32 / self.max_life.max(1) as f32
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spray `count` particles outward from `origin` in random directions.
    pub fn emit(&mut self, origin: Point, tint: Tint, count: usize, rng: &mut impl Rng) {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(1.5..4.5);
            let life = rng.gen_range(18..=35);
            self.particles.push(Particle {
                pos: origin,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                life,
                max_life: life,
                size: rng.gen_range(2.5..6.0),
                tint,
            });
        }
    }

    pub fn update(&mut self) {
        self.particles.retain(|p| p.life > 0);
        for p in self.particles.iter_mut() {
            p.pos.x += p.vx;
            p.pos.y += p.vy;
            p.vy += 0.08;
            p.vx *= 0.98;
            p.life -= 1;
            p.size = (p.size - 0.12).max(0.5);
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

// ── Confetti ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub pos: Point,
    pub vx: f32,
    pub vy: f32,
    pub rot: f32,
    pub rot_speed: f32,
    pub life: u32,
    /// Index into the renderer's confetti palette.
    pub hue: u8,
}

/// Celebration shower dropped from above the screen on level-up and win.
#[derive(Clone, Debug, Default)]
pub struct Confetti {
    pub pieces: Vec<ConfettiPiece>,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn burst(&mut self, count: usize, bounds: Bounds, rng: &mut impl Rng) {
        for _ in 0..count {
            self.pieces.push(ConfettiPiece {
                pos: Point::new(rng.gen_range(0.0..=bounds.width), rng.gen_range(-80.0..=-10.0)),
                vx: rng.gen_range(-2.0..=2.0),
                vy: rng.gen_range(1.5..=5.0),
                rot: rng.gen_range(0.0..TAU),
                rot_speed: rng.gen_range(-0.1..=0.1),
                life: rng.gen_range(160..=320),
                hue: rng.gen_range(0..7),
            });
        }
    }

    pub fn update(&mut self, bounds: Bounds) {
        for p in self.pieces.iter_mut() {
            p.pos.x += p.vx + p.rot.sin() * 0.5;
            p.pos.y += p.vy;
            p.rot += p.rot_speed;
            p.life = p.life.saturating_sub(1);
        }
        self.pieces
            .retain(|p| p.life > 0 && p.pos.y <= bounds.height + 30.0);
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}
