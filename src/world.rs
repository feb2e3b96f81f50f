//! One attempt at one level: the entities, the score, the clock and the
//! replenishment rules.
//!
//! A `World` is built fresh from the level catalog for every attempt and
//! thrown away on retry or level change.  Its `update` is the only thing that
//! advances entity state between interactions.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::entities::{Behavior, DecorationKind, Entity, EntityTag, TrashCategory};
use crate::geometry::{Bounds, Point};
use crate::levels::{self, LevelId};

/// Simulation ticks per second; timers are expressed in frames of this rate.
pub const TICKS_PER_SECOND: u32 = 60;
/// How far the duck can reach to interact.
pub const INTERACT_RADIUS: f32 = 80.0;
/// How close the duck must be to a puddle or hazard to be affected.
pub const CONTACT_RADIUS: f32 = 50.0;
/// Frames between two faucet reopenings on the water level.
pub const FAUCET_REOPEN_INTERVAL: u32 = 300;
/// Fewer active trash items than this triggers a new batch.
pub const TRASH_LOW_WATER: usize = 5;
pub const TRASH_RESPAWN_BATCH: usize = 8;

// ── Re-seed policies ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReseedPolicy {
    /// Nothing is ever replenished.
    None,
    /// Keep at least `low_water` pieces of trash around by spawning `batch`
    /// new ones whenever the count drops below it.
    TrashSupply { low_water: usize, batch: usize },
    /// Every `interval` frames, reopen one random closed faucet.
    FaucetReopen { interval: u32 },
}

impl ReseedPolicy {
    pub fn for_level(level: LevelId) -> Self {
        match level {
            LevelId::Sorting => ReseedPolicy::TrashSupply {
                low_water: TRASH_LOW_WATER,
                batch: TRASH_RESPAWN_BATCH,
            },
            LevelId::Water => ReseedPolicy::FaucetReopen {
                interval: FAUCET_REOPEN_INTERVAL,
            },
            LevelId::Trees => ReseedPolicy::None,
        }
    }
}

// ── World ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct World {
    pub level: LevelId,
    pub bounds: Bounds,
    /// Gameplay entities, in insertion order.
    pub entities: Vec<Entity>,
    /// Scenery; never interactable and never queried.
    pub decorations: Vec<Entity>,
    pub score: u32,
    /// Frames left on the clock; `None` for untimed levels.
    pub time_left: Option<u32>,
    pub reseed: ReseedPolicy,
    /// Frames since the last periodic re-seed.
    pub reseed_timer: u32,
}

impl World {
    /// Build the layout of `level` from the catalog.
    pub fn new(level: LevelId, bounds: Bounds, rng: &mut impl Rng) -> Self {
        let mut world = World::empty(level, bounds);
        match level {
            LevelId::Sorting => world.build_sorting(rng),
            LevelId::Water => world.build_water(rng),
            LevelId::Trees => world.build_trees(rng),
        }

        info!(
            level = level.number(),
            entities = world.entities.len(),
            decorations = world.decorations.len(),
            "level built"
        );
        world
    }

    /// A world for `level` with the catalog's clock and policy but no layout.
    pub fn empty(level: LevelId, bounds: Bounds) -> Self {
        World {
            level,
            bounds,
            entities: Vec::new(),
            decorations: Vec::new(),
            score: 0,
            time_left: level
                .config()
                .time_limit_secs
                .map(|secs| secs * TICKS_PER_SECOND),
            reseed: ReseedPolicy::for_level(level),
            reseed_timer: 0,
        }
    }

    fn build_sorting(&mut self, rng: &mut impl Rng) {
        for (category, x) in levels::BIN_LAYOUT {
            self.entities
                .push(Entity::bin(Point::new(x, levels::BIN_ROW_Y), category));
        }
        self.spawn_trash(levels::INITIAL_TRASH, rng);
        for (x, y, kind) in levels::SORTING_DECORATIONS {
            self.decorations.push(Entity::decoration(Point::new(x, y), kind));
        }
    }

    fn build_water(&mut self, rng: &mut impl Rng) {
        for (x, y) in levels::FAUCET_LAYOUT {
            self.entities.push(Entity::faucet(Point::new(x, y)));
        }
        for (x, y) in levels::PUDDLE_LAYOUT {
            self.entities.push(Entity::puddle(Point::new(x, y), rng));
        }
        for (x, y) in levels::DESK_LAYOUT {
            self.decorations
                .push(Entity::decoration(Point::new(x, y), DecorationKind::Desk));
            self.decorations
                .push(Entity::decoration(Point::new(x, y + 48.0), DecorationKind::Chair));
        }
        for (x, y) in levels::SINK_LAYOUT {
            self.decorations
                .push(Entity::decoration(Point::new(x, y), DecorationKind::Sink));
        }
    }

    fn build_trees(&mut self, rng: &mut impl Rng) {
        for (x, y) in levels::SEEDLING_PILE_LAYOUT {
            self.entities.push(Entity::seedling_pile(Point::new(x, y)));
        }
        for (x, y) in levels::PLANT_SPOT_LAYOUT {
            self.entities.push(Entity::plant_spot(Point::new(x, y)));
        }
        let (x_min, x_max) = levels::HAZARD_PATROL_X;
        for (x, y) in levels::HAZARD_LAYOUT {
            self.entities
                .push(Entity::hazard(Point::new(x, y), x_min, x_max, rng));
        }
        for (x, y, kind) in levels::TREES_DECORATIONS {
            self.decorations.push(Entity::decoration(Point::new(x, y), kind));
        }
    }

    /// Scatter `count` random pieces of trash over the playground.
    pub fn spawn_trash(&mut self, count: usize, rng: &mut impl Rng) {
        let x_max = (self.bounds.width - 120.0).max(120.0);
        let y_max = (self.bounds.height - 100.0).max(235.0);
        for _ in 0..count {
            let x = rng.gen_range(120.0..=x_max).floor();
            let y = rng.gen_range(235.0..=y_max).floor();
            let category = TrashCategory::random(rng);
            self.entities.push(Entity::trash(Point::new(x, y), category, rng));
        }
    }

    // ── Per-frame ───────────────────────────────────────────────────────────

    /// Advance every active entity, tick the clock and run the re-seed policy.
    pub fn update(&mut self, rng: &mut impl Rng) {
        for entity in self.entities.iter_mut().filter(|e| e.active) {
            entity.update(rng);
        }

        if let Some(t) = &mut self.time_left {
            *t = t.saturating_sub(1);
        }

        match self.reseed {
            ReseedPolicy::None => {}
            ReseedPolicy::TrashSupply { low_water, batch } => {
                let remaining = self.count_active(EntityTag::CollectibleTrash);
                if remaining < low_water {
                    debug!(remaining, batch, "replenishing trash");
                    self.spawn_trash(batch, rng);
                }
            }
            ReseedPolicy::FaucetReopen { interval } => {
                self.reseed_timer += 1;
                if self.reseed_timer >= interval {
                    self.reseed_timer = 0;
                    self.reopen_random_faucet(rng);
                }
            }
        }
    }

    /// Reopen one closed faucet chosen at random.  Returns its index.
    pub fn reopen_random_faucet(&mut self, rng: &mut impl Rng) -> Option<usize> {
        let closed: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.active && e.is_closed_faucet())
            .map(|(i, _)| i)
            .collect();
        let &idx = closed.choose(rng)?;
        self.entities[idx].reopen_faucet();
        debug!(index = idx, "faucet reopened");
        Some(idx)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Index of the closest active, interactable entity strictly within
    /// `max_distance`.  Ties go to the earlier entity.
    pub fn nearest_interactable(&self, p: Point, max_distance: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, e) in self.entities.iter().enumerate() {
            if !e.is_interactable() {
                continue;
            }
            let d = e.distance_to(p);
            let limit = best.map_or(max_distance, |(_, bd)| bd);
            if d < limit {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    fn first_in_contact(&self, p: Point, tag: EntityTag) -> Option<usize> {
        self.entities
            .iter()
            .position(|e| e.active && e.tag() == tag && e.distance_to(p) < CONTACT_RADIUS)
    }

    pub fn is_colliding_with_puddle(&self, p: Point) -> bool {
        self.first_in_contact(p, EntityTag::Puddle).is_some()
    }

    pub fn is_colliding_with_hazard(&self, p: Point) -> bool {
        self.first_in_contact(p, EntityTag::Hazard).is_some()
    }

    /// The hazard touching `p`, if any.
    pub fn colliding_hazard(&self, p: Point) -> Option<&Entity> {
        self.first_in_contact(p, EntityTag::Hazard)
            .map(|i| &self.entities[i])
    }

    pub fn target_score(&self) -> u32 {
        self.level.config().target_score
    }

    pub fn is_level_complete(&self) -> bool {
        self.score >= self.target_score()
    }

    pub fn is_time_up(&self) -> bool {
        self.time_left == Some(0)
    }

    /// Whole seconds left on the clock, for the HUD.
    pub fn seconds_left(&self) -> Option<u32> {
        self.time_left.map(|t| t / TICKS_PER_SECOND)
    }

    pub fn count_active(&self, tag: EntityTag) -> usize {
        self.entities
            .iter()
            .filter(|e| e.active && e.tag() == tag)
            .count()
    }

    /// Unfinished objectives on this level; informational only.
    pub fn count_remaining(&self) -> usize {
        match self.level {
            LevelId::Sorting => self.count_active(EntityTag::CollectibleTrash),
            LevelId::Trees => self
                .entities
                .iter()
                .filter(|e| e.active && e.is_empty_plant_spot())
                .count(),
            LevelId::Water => 0,
        }
    }

    /// Add `delta` to the score, never going below zero.
    pub fn adjust_score(&mut self, delta: i32) {
        self.score = if delta >= 0 {
            self.score.saturating_add(delta as u32)
        } else {
            self.score.saturating_sub(delta.unsigned_abs())
        };
    }

    /// Active entities the renderer should draw, scenery first.
    pub fn drawables(&self) -> impl Iterator<Item = &Entity> {
        self.decorations
            .iter()
            .chain(self.entities.iter())
            .filter(|e| e.active)
    }

    pub fn entity_behavior(&self, idx: usize) -> Option<&Behavior> {
        self.entities.get(idx).map(|e| &e.behavior)
    }
}
