//! The top-level game: screens, level progression and the per-frame driver.
//!
//! A `Session` owns everything that lives longer than one frame.  Front-ends
//! feed it one `FrameInput` per tick through `step` and draw whatever it
//! exposes afterwards.

use rand::Rng;
use tracing::info;

use crate::geometry::Bounds;
use crate::interaction::{self, OutcomeKind};
use crate::levels::LevelId;
use crate::particles::{Confetti, ParticleSystem, Tint};
use crate::player::{MoveInput, Player};
use crate::world::World;

/// Frames the duck stays slowed after touching a puddle.
pub const PUDDLE_SLOW_FRAMES: u32 = 30;
/// Frames the interact key is ignored after an interaction.
pub const INTERACT_COOLDOWN: u32 = 10;
/// Frames the level tip banner is shown.
pub const TIP_FRAMES: u32 = 180;
pub const SHAKE_FRAMES: u32 = 10;
pub const SHAKE_INTENSITY: i32 = 7;
/// Result screens ignore input for this many frames.
pub const RESULT_INPUT_DELAY: u32 = 30;
pub const LEVEL_UP_CONFETTI: usize = 70;
pub const WIN_CONFETTI: usize = 100;
pub const HURT_PARTICLES: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Help,
    Playing,
    LevelUp,
    Win,
    GameOver,
}

/// Everything the simulation reads from the outside world in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub movement: MoveInput,
    /// Edge-triggered: set only on the frame the key went down.
    pub interact: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ItemPickedUp(String),
    Sorted { correct: bool },
    FaucetClosed,
    SeedlingTaken,
    TreePlanted,
    Hint(String),
    PlayerHurt { lives_left: u32 },
    LevelComplete { level: LevelId, score: u32 },
    GameOver,
    Won { total_score: u32 },
}

#[derive(Clone, Debug)]
pub struct Session {
    pub screen: Screen,
    pub bounds: Bounds,
    pub level: LevelId,
    pub player: Player,
    pub world: World,
    pub particles: ParticleSystem,
    pub confetti: Confetti,
    /// Sum of completed levels' scores in this game.
    pub total_score: u32,
    pub tip_timer: u32,
    pub shake_timer: u32,
    pub interact_cooldown: u32,
    /// Frames spent on the current result screen.
    pub result_timer: u32,
}

impl Session {
    /// A session parked on the main menu.
    pub fn new(bounds: Bounds, rng: &mut impl Rng) -> Self {
        Self {
            screen: Screen::Menu,
            bounds,
            level: LevelId::Sorting,
            player: Player::new(bounds),
            world: World::new(LevelId::Sorting, bounds, rng),
            particles: ParticleSystem::new(),
            confetti: Confetti::new(),
            total_score: 0,
            tip_timer: 0,
            shake_timer: 0,
            interact_cooldown: 0,
            result_timer: 0,
        }
    }

    pub fn tip(&self) -> Option<&'static str> {
        (self.tip_timer > 0).then(|| self.level.config().tip)
    }

    /// Random screen offset while shaking, `(0, 0)` otherwise.
    pub fn shake_offset(&self, rng: &mut impl Rng) -> (i32, i32) {
        if self.shake_timer == 0 {
            return (0, 0);
        }
        (
            rng.gen_range(-SHAKE_INTENSITY..=SHAKE_INTENSITY),
            rng.gen_range(-SHAKE_INTENSITY..=SHAKE_INTENSITY),
        )
    }

    // ── Screen transitions ──────────────────────────────────────────────────

    pub fn start_new_game(&mut self, rng: &mut impl Rng) {
        self.player.hard_reset();
        self.total_score = 0;
        self.particles.clear();
        self.confetti.clear();
        self.enter_level(LevelId::Sorting, rng);
        info!("new game");
    }

    fn enter_level(&mut self, level: LevelId, rng: &mut impl Rng) {
        self.level = level;
        self.world = World::new(level, self.bounds, rng);
        self.tip_timer = TIP_FRAMES;
        self.shake_timer = 0;
        self.interact_cooldown = 0;
        self.result_timer = 0;
        self.screen = Screen::Playing;
    }

    fn results_accept_input(&self) -> bool {
        self.result_timer > RESULT_INPUT_DELAY
    }

    /// LevelUp → next level.  Returns false when not allowed yet.
    pub fn advance_level(&mut self, rng: &mut impl Rng) -> bool {
        if self.screen != Screen::LevelUp || !self.results_accept_input() {
            return false;
        }
        let Some(next) = self.level.next() else {
            return false;
        };
        self.player.soft_reset();
        self.particles.clear();
        self.enter_level(next, rng);
        info!(level = next.number(), "advanced to next level");
        true
    }

    /// Win/GameOver → fresh game from level 1.
    pub fn retry(&mut self, rng: &mut impl Rng) -> bool {
        if !matches!(self.screen, Screen::Win | Screen::GameOver) || !self.results_accept_input()
        {
            return false;
        }
        self.start_new_game(rng);
        true
    }

    pub fn open_help(&mut self) {
        if self.screen == Screen::Menu {
            self.screen = Screen::Help;
        }
    }

    pub fn return_to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.confetti.clear();
    }

    // ── Frame driver ────────────────────────────────────────────────────────

    /// Advance one frame.
    pub fn step(&mut self, input: &FrameInput, rng: &mut impl Rng) -> Vec<GameEvent> {
        let interact_pressed = input.interact && self.interact_cooldown == 0;
        self.interact_cooldown = self.interact_cooldown.saturating_sub(1);

        match self.screen {
            Screen::Playing => self.step_playing(input, interact_pressed, rng),
            Screen::LevelUp | Screen::Win | Screen::GameOver => {
                self.result_timer += 1;
                self.confetti.update(self.bounds);
                Vec::new()
            }
            Screen::Menu | Screen::Help => Vec::new(),
        }
    }

    fn step_playing(
        &mut self,
        input: &FrameInput,
        interact_pressed: bool,
        rng: &mut impl Rng,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        self.player.handle_movement(&input.movement);
        self.player.update();
        self.world.update(rng);
        self.particles.update();
        self.confetti.update(self.bounds);
        self.shake_timer = self.shake_timer.saturating_sub(1);
        self.tip_timer = self.tip_timer.saturating_sub(1);

        let pos = self.player.pos;
        match self.level {
            LevelId::Water => {
                if self.world.is_colliding_with_puddle(pos) {
                    self.player.apply_slow(PUDDLE_SLOW_FRAMES);
                }
            }
            LevelId::Trees => {
                if self.world.is_colliding_with_hazard(pos) && self.player.take_damage() {
                    self.particles.emit(pos, Tint::Hurt, HURT_PARTICLES, rng);
                    self.shake_timer = SHAKE_FRAMES;
                    events.push(GameEvent::PlayerHurt {
                        lives_left: self.player.lives,
                    });
                }
            }
            LevelId::Sorting => {}
        }

        if interact_pressed {
            let outcome =
                interaction::interact(&mut self.world, &mut self.player, &mut self.particles, rng);
            self.interact_cooldown = INTERACT_COOLDOWN;
            events.push(match outcome.kind {
                OutcomeKind::Nothing => GameEvent::Hint(outcome.message),
                OutcomeKind::PickedUpTrash => GameEvent::ItemPickedUp(
                    self.player
                        .carrying()
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                ),
                OutcomeKind::Sorted { correct } => GameEvent::Sorted { correct },
                OutcomeKind::FaucetClosed => GameEvent::FaucetClosed,
                OutcomeKind::TookSeedling => GameEvent::SeedlingTaken,
                OutcomeKind::Planted => GameEvent::TreePlanted,
            });
        }

        if self.player.lives == 0 {
            self.finish(Screen::GameOver);
            events.push(GameEvent::GameOver);
            return events;
        }

        if self.world.is_time_up() && !self.world.is_level_complete() {
            self.finish(Screen::GameOver);
            events.push(GameEvent::GameOver);
            return events;
        }

        if self.world.is_level_complete() {
            self.total_score += self.world.score;
            self.confetti.burst(LEVEL_UP_CONFETTI, self.bounds, rng);
            events.push(GameEvent::LevelComplete {
                level: self.level,
                score: self.world.score,
            });
            if self.level.is_last() {
                self.confetti.burst(WIN_CONFETTI, self.bounds, rng);
                self.finish(Screen::Win);
                events.push(GameEvent::Won {
                    total_score: self.total_score,
                });
            } else {
                self.finish(Screen::LevelUp);
            }
        }

        events
    }

    fn finish(&mut self, screen: Screen) {
        self.screen = screen;
        self.result_timer = 0;
        info!(
            level = self.level.number(),
            score = self.world.score,
            total = self.total_score,
            screen = ?screen,
            "level finished"
        );
    }
}
