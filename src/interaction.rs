//! What happens when the duck presses the interact key.
//!
//! `resolve` is a pure rule table over (level, nearest target, carry slot).
//! It never fails: anything that cannot be done turns into a hint.  `apply`
//! then commits the outcome to the world, the player and the particles.

use rand::Rng;
use tracing::debug;

use crate::entities::{Behavior, Entity};
use crate::levels::LevelId;
use crate::particles::{ParticleSystem, Tint};
use crate::player::{CarriedItem, ItemKind, Player};
use crate::world::{World, INTERACT_RADIUS};

/// How long interaction messages stay on screen.
pub const HINT_FRAMES: u32 = 60;

pub const MSG_NOTHING_NEARBY: &str = "Nothing to interact with nearby";
pub const MSG_NOTHING_TO_DO: &str = "Nothing to do here";
pub const MSG_HANDS_FULL: &str = "Your hands are already full";
pub const MSG_NEED_TRASH: &str = "Pick up some trash first";
pub const MSG_SORTED: &str = "Sorted correctly! +1";
pub const MSG_WRONG_BIN: &str = "Wrong bin! -1";
pub const MSG_FAUCET_CLOSED: &str = "Faucet turned off! +1";
pub const MSG_FAUCET_ALREADY_OFF: &str = "This faucet is already off";
pub const MSG_SEEDLING: &str = "Picked up a seedling";
pub const MSG_PLANTED: &str = "Planted a tree! +1";
pub const MSG_NEED_SEEDLING: &str = "Get a seedling from the pile first";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityAction {
    None,
    /// Deactivate a piece of trash.
    Collect,
    CloseFaucet,
    Plant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CarryAction {
    Keep,
    PickUp(CarriedItem),
    Drop,
}

/// Tone of the message shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    /// Neutral guidance; nothing changed.
    Hint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeKind {
    Nothing,
    PickedUpTrash,
    Sorted { correct: bool },
    FaucetClosed,
    TookSeedling,
    Planted,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub entity: EntityAction,
    pub carry: CarryAction,
    pub score_delta: i32,
    pub tone: Tone,
    pub message: String,
    /// Particle burst at the target: tint and count.
    pub effect: Option<(Tint, usize)>,
}

impl Outcome {
    fn hint(message: &str) -> Self {
        Self {
            kind: OutcomeKind::Nothing,
            entity: EntityAction::None,
            carry: CarryAction::Keep,
            score_delta: 0,
            tone: Tone::Hint,
            message: message.to_string(),
            effect: None,
        }
    }

    pub fn changed_anything(&self) -> bool {
        self.kind != OutcomeKind::Nothing
    }
}

// ── Rule table ────────────────────────────────────────────────────────────────

pub fn resolve(level: LevelId, target: Option<&Entity>, carrying: Option<&CarriedItem>) -> Outcome {
    let Some(target) = target else {
        return Outcome::hint(MSG_NOTHING_NEARBY);
    };
    match level {
        LevelId::Sorting => resolve_sorting(target, carrying),
        LevelId::Water => resolve_water(target),
        LevelId::Trees => resolve_trees(target, carrying),
    }
}

fn resolve_sorting(target: &Entity, carrying: Option<&CarriedItem>) -> Outcome {
    match (&target.behavior, carrying) {
        (Behavior::Trash { category, item_name }, None) => Outcome {
            kind: OutcomeKind::PickedUpTrash,
            entity: EntityAction::Collect,
            carry: CarryAction::PickUp(CarriedItem::trash(*item_name, *category)),
            score_delta: 0,
            tone: Tone::Positive,
            message: format!("Picked up {item_name}"),
            effect: Some((Tint::Success, 10)),
        },
        (Behavior::Trash { .. }, Some(_)) => Outcome::hint(MSG_HANDS_FULL),
        (Behavior::Bin { category }, Some(item)) if matches!(item.kind, ItemKind::Trash(_)) => {
            let correct = item.category() == Some(*category);
            Outcome {
                kind: OutcomeKind::Sorted { correct },
                entity: EntityAction::None,
                carry: CarryAction::Drop,
                score_delta: if correct { 1 } else { -1 },
                tone: if correct { Tone::Positive } else { Tone::Negative },
                message: if correct { MSG_SORTED } else { MSG_WRONG_BIN }.to_string(),
                effect: Some(if correct {
                    (Tint::Success, 15)
                } else {
                    (Tint::Failure, 15)
                }),
            }
        }
        (Behavior::Bin { .. }, None) => Outcome::hint(MSG_NEED_TRASH),
        _ => Outcome::hint(MSG_NOTHING_TO_DO),
    }
}

fn resolve_water(target: &Entity) -> Outcome {
    match &target.behavior {
        Behavior::Faucet(f) if f.is_open() => Outcome {
            kind: OutcomeKind::FaucetClosed,
            entity: EntityAction::CloseFaucet,
            carry: CarryAction::Keep,
            score_delta: 1,
            tone: Tone::Positive,
            message: MSG_FAUCET_CLOSED.to_string(),
            effect: Some((Tint::Water, 12)),
        },
        Behavior::Faucet(_) => Outcome::hint(MSG_FAUCET_ALREADY_OFF),
        _ => Outcome::hint(MSG_NOTHING_TO_DO),
    }
}

fn resolve_trees(target: &Entity, carrying: Option<&CarriedItem>) -> Outcome {
    match (&target.behavior, carrying) {
        (Behavior::SeedlingPile, None) => Outcome {
            kind: OutcomeKind::TookSeedling,
            entity: EntityAction::None,
            carry: CarryAction::PickUp(CarriedItem::seedling()),
            score_delta: 0,
            tone: Tone::Positive,
            message: MSG_SEEDLING.to_string(),
            effect: Some((Tint::Success, 10)),
        },
        (Behavior::SeedlingPile, Some(_)) => Outcome::hint(MSG_HANDS_FULL),
        (Behavior::PlantSpot(_), carrying) if target.is_empty_plant_spot() => {
            match carrying.map(|c| c.kind) {
                Some(ItemKind::Seedling) => Outcome {
                    kind: OutcomeKind::Planted,
                    entity: EntityAction::Plant,
                    carry: CarryAction::Drop,
                    score_delta: 1,
                    tone: Tone::Positive,
                    message: MSG_PLANTED.to_string(),
                    effect: Some((Tint::Growth, 15)),
                },
                _ => Outcome::hint(MSG_NEED_SEEDLING),
            }
        }
        _ => Outcome::hint(MSG_NOTHING_TO_DO),
    }
}

// ── Commit ────────────────────────────────────────────────────────────────────

/// Apply `outcome` to the target entity (index into `world.entities`), the
/// player, the score and the particles.
pub fn apply(
    outcome: &Outcome,
    target: Option<usize>,
    world: &mut World,
    player: &mut Player,
    particles: &mut ParticleSystem,
    rng: &mut impl Rng,
) {
    if let Some(entity) = target.and_then(|i| world.entities.get_mut(i)) {
        match outcome.entity {
            EntityAction::None => {}
            EntityAction::Collect => entity.collect(),
            EntityAction::CloseFaucet => {
                entity.close_faucet();
            }
            EntityAction::Plant => {
                entity.plant();
            }
        }
        if let Some((tint, count)) = outcome.effect {
            particles.emit(entity.pos, tint, count, rng);
        }
    }

    match &outcome.carry {
        CarryAction::Keep => {}
        CarryAction::PickUp(item) => {
            player.pick_up(item.clone());
        }
        CarryAction::Drop => {
            player.drop_carried();
        }
    }

    world.adjust_score(outcome.score_delta);
    player.show_hint(outcome.message.clone(), HINT_FRAMES);
}

/// Find what the player is reaching for, resolve the rules and commit them.
pub fn interact(
    world: &mut World,
    player: &mut Player,
    particles: &mut ParticleSystem,
    rng: &mut impl Rng,
) -> Outcome {
    let target = world.nearest_interactable(player.pos, INTERACT_RADIUS);
    let outcome = resolve(
        world.level,
        target.map(|i| &world.entities[i]),
        player.carrying(),
    );
    apply(&outcome, target, world, player, particles, rng);
    debug!(
        level = world.level.number(),
        kind = ?outcome.kind,
        score = world.score,
        message = %outcome.message,
        "interaction"
    );
    outcome
}
