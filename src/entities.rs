//! Level entities: every positioned object the duck can meet.
//!
//! An entity is a position, a footprint and a `Behavior`.  Behaviour is a
//! closed sum type; queries and the interaction rules match on it directly.
//! Entities are never removed from a world, only deactivated.

use rand::Rng;

use crate::geometry::{Point, Size};

// ── Tunables ──────────────────────────────────────────────────────────────────

/// Frames between two droplets of an open faucet.
pub const DRIP_INTERVAL: u32 = 7;
/// Frames a droplet lives.
pub const DROPLET_LIFE: u32 = 35;
/// A planted spot stops growing at this many frames.
pub const GROWTH_CAP: u32 = 60;
/// Amplitude of the idle bob, in world units.
pub const TRASH_BOB: f32 = 6.0;
pub const PUDDLE_BOB: f32 = 2.0;

pub const TRASH_SIZE: Size = Size::new(26.0, 26.0);
pub const BIN_SIZE: Size = Size::new(52.0, 60.0);
pub const FAUCET_SIZE: Size = Size::new(36.0, 36.0);
pub const PUDDLE_SIZE: Size = Size::new(44.0, 22.0);
pub const SEEDLING_PILE_SIZE: Size = Size::new(52.0, 52.0);
pub const PLANT_SPOT_SIZE: Size = Size::new(34.0, 34.0);
pub const HAZARD_SIZE: Size = Size::new(30.0, 44.0);
pub const DECORATION_SIZE: Size = Size::new(44.0, 44.0);

// ── Trash categories ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrashCategory {
    Recyclable,
    Kitchen,
    Hazardous,
    Other,
}

impl TrashCategory {
    pub const ALL: [TrashCategory; 4] = [
        TrashCategory::Recyclable,
        TrashCategory::Kitchen,
        TrashCategory::Hazardous,
        TrashCategory::Other,
    ];

    /// Item names a piece of trash of this category may carry.
    pub fn item_names(self) -> &'static [&'static str; 4] {
        match self {
            TrashCategory::Recyclable => &["plastic bottle", "soda can", "waste paper", "glass jar"],
            TrashCategory::Kitchen => &["fruit peel", "leftovers", "cabbage leaf", "bone"],
            TrashCategory::Hazardous => &["old battery", "light bulb", "expired pills", "paint can"],
            TrashCategory::Other => &["old towel", "cigarette butt", "dust", "broken tile"],
        }
    }

    pub fn bin_label(self) -> &'static str {
        match self {
            TrashCategory::Recyclable => "Recyclable",
            TrashCategory::Kitchen => "Kitchen",
            TrashCategory::Hazardous => "Hazardous",
            TrashCategory::Other => "Other",
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    Slide,
    Swing,
    TrackCone,
    Bench,
    Grass,
    Flower,
    Desk,
    Chair,
    Sink,
    Bush,
    Tree,
    Fence,
}

// ── Per-behaviour sub-state ──────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaucetState {
    Open,
    Closed,
}

/// One falling drop under an open faucet.
#[derive(Clone, Debug, PartialEq)]
pub struct Droplet {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub size: f32,
    pub life: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Faucet {
    pub state: FaucetState,
    pub drip_timer: u32,
    pub droplets: Vec<Droplet>,
}

impl Faucet {
    pub fn open() -> Self {
        Self {
            state: FaucetState::Open,
            drip_timer: 0,
            droplets: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == FaucetState::Open
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlantState {
    Empty,
    /// Frames since planting, capped at `GROWTH_CAP`.
    Planted { growth: u32 },
}

/// Horizontal back-and-forth walk of a hazard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Patrol {
    pub speed: f32,
    /// +1.0 walking right, -1.0 walking left.
    pub direction: f32,
    pub x_min: f32,
    pub x_max: f32,
    pub walk_frame: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Behavior {
    Trash {
        category: TrashCategory,
        item_name: &'static str,
    },
    Bin {
        category: TrashCategory,
    },
    Faucet(Faucet),
    Puddle,
    SeedlingPile,
    PlantSpot(PlantState),
    Hazard(Patrol),
    Decoration(DecorationKind),
}

/// Payload-free discriminant of `Behavior`, handy for filters and tallies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityTag {
    CollectibleTrash,
    SortingBin,
    Faucet,
    Puddle,
    SeedlingPile,
    PlantSpot,
    Hazard,
    Decoration,
}

impl Behavior {
    pub fn tag(&self) -> EntityTag {
        match self {
            Behavior::Trash { .. } => EntityTag::CollectibleTrash,
            Behavior::Bin { .. } => EntityTag::SortingBin,
            Behavior::Faucet(_) => EntityTag::Faucet,
            Behavior::Puddle => EntityTag::Puddle,
            Behavior::SeedlingPile => EntityTag::SeedlingPile,
            Behavior::PlantSpot(_) => EntityTag::PlantSpot,
            Behavior::Hazard(_) => EntityTag::Hazard,
            Behavior::Decoration(_) => EntityTag::Decoration,
        }
    }

    fn default_size(&self) -> Size {
        match self.tag() {
            EntityTag::CollectibleTrash => TRASH_SIZE,
            EntityTag::SortingBin => BIN_SIZE,
            EntityTag::Faucet => FAUCET_SIZE,
            EntityTag::Puddle => PUDDLE_SIZE,
            EntityTag::SeedlingPile => SEEDLING_PILE_SIZE,
            EntityTag::PlantSpot => PLANT_SPOT_SIZE,
            EntityTag::Hazard => HAZARD_SIZE,
            EntityTag::Decoration => DECORATION_SIZE,
        }
    }

    /// Whether a freshly built entity of this behaviour accepts interactions.
    fn starts_interactable(&self) -> bool {
        match self {
            Behavior::Trash { .. } | Behavior::Bin { .. } | Behavior::SeedlingPile => true,
            Behavior::Faucet(f) => f.is_open(),
            Behavior::PlantSpot(state) => *state == PlantState::Empty,
            Behavior::Puddle | Behavior::Hazard(_) | Behavior::Decoration(_) => false,
        }
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub pos: Point,
    pub size: Size,
    pub behavior: Behavior,
    pub active: bool,
    interactable: bool,
    /// Free-running phase of the idle bob of trash and puddles.
    pub anim_phase: f32,
}

impl Entity {
    pub fn new(pos: Point, behavior: Behavior) -> Self {
        let size = behavior.default_size();
        let interactable = behavior.starts_interactable();
        Self {
            pos,
            size,
            behavior,
            active: true,
            interactable,
            anim_phase: 0.0,
        }
    }

    pub fn trash(pos: Point, category: TrashCategory, rng: &mut impl Rng) -> Self {
        let names = category.item_names();
        let item_name = names[rng.gen_range(0..names.len())];
        let mut e = Self::new(pos, Behavior::Trash { category, item_name });
        e.anim_phase = rng.gen_range(0.0..std::f32::consts::TAU);
        e
    }

    pub fn bin(pos: Point, category: TrashCategory) -> Self {
        Self::new(pos, Behavior::Bin { category })
    }

    pub fn faucet(pos: Point) -> Self {
        Self::new(pos, Behavior::Faucet(Faucet::open()))
    }

    pub fn puddle(pos: Point, rng: &mut impl Rng) -> Self {
        let mut e = Self::new(pos, Behavior::Puddle);
        e.anim_phase = rng.gen_range(0.0..std::f32::consts::TAU);
        e
    }

    pub fn seedling_pile(pos: Point) -> Self {
        Self::new(pos, Behavior::SeedlingPile)
    }

    pub fn plant_spot(pos: Point) -> Self {
        Self::new(pos, Behavior::PlantSpot(PlantState::Empty))
    }

    /// A hazard with a random pace in [1, 2) and a random starting direction.
    pub fn hazard(pos: Point, x_min: f32, x_max: f32, rng: &mut impl Rng) -> Self {
        let patrol = Patrol {
            speed: rng.gen_range(1.0..2.0),
            direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            x_min,
            x_max,
            walk_frame: 0,
        };
        Self::new(pos, Behavior::Hazard(patrol))
    }

    pub fn decoration(pos: Point, kind: DecorationKind) -> Self {
        Self::new(pos, Behavior::Decoration(kind))
    }

    pub fn tag(&self) -> EntityTag {
        self.behavior.tag()
    }

    pub fn distance_to(&self, p: Point) -> f32 {
        self.pos.distance_to(p)
    }

    /// Active and eligible as an interaction target.  Decorations never are.
    pub fn is_interactable(&self) -> bool {
        self.active && self.interactable && self.tag() != EntityTag::Decoration
    }

    // ── State transitions ───────────────────────────────────────────────────

    /// Take a piece of trash out of the level.
    pub fn collect(&mut self) {
        if self.tag() == EntityTag::CollectibleTrash {
            self.active = false;
            self.interactable = false;
        }
    }

    /// Open → Closed.  Returns false if this is not an open faucet.
    pub fn close_faucet(&mut self) -> bool {
        match &mut self.behavior {
            Behavior::Faucet(f) if f.is_open() => {
                f.state = FaucetState::Closed;
                f.droplets.clear();
                self.interactable = false;
                true
            }
            _ => false,
        }
    }

    /// Closed → Open.  Returns false if this is not a closed faucet.
    pub fn reopen_faucet(&mut self) -> bool {
        match &mut self.behavior {
            Behavior::Faucet(f) if !f.is_open() => {
                f.state = FaucetState::Open;
                f.drip_timer = 0;
                self.interactable = true;
                true
            }
            _ => false,
        }
    }

    /// Empty → Planted.  Returns false if the spot is already planted or
    /// this is not a plant spot.
    pub fn plant(&mut self) -> bool {
        match &mut self.behavior {
            Behavior::PlantSpot(state) if *state == PlantState::Empty => {
                *state = PlantState::Planted { growth: 0 };
                self.interactable = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_open_faucet(&self) -> bool {
        matches!(&self.behavior, Behavior::Faucet(f) if f.is_open())
    }

    pub fn is_closed_faucet(&self) -> bool {
        matches!(&self.behavior, Behavior::Faucet(f) if !f.is_open())
    }

    pub fn is_empty_plant_spot(&self) -> bool {
        matches!(self.behavior, Behavior::PlantSpot(PlantState::Empty))
    }

    /// Vertical idle-bob offset in world units; zero for entities that
    /// don't bob.
    pub fn bob_offset(&self) -> f32 {
        match self.behavior {
            Behavior::Trash { .. } => self.anim_phase.sin() * TRASH_BOB,
            Behavior::Puddle => self.anim_phase.sin() * PUDDLE_BOB,
            _ => 0.0,
        }
    }

    /// Growth of a planted spot in 0.0..=1.0; `None` for anything else.
    pub fn growth_fraction(&self) -> Option<f32> {
        match self.behavior {
            Behavior::PlantSpot(PlantState::Planted { growth }) => {
                Some(growth as f32 / GROWTH_CAP as f32)
            }
            _ => None,
        }
    }

    // ── Per-frame advance ───────────────────────────────────────────────────

    /// Advance intrinsic animation by one frame.  Randomness (droplet jitter)
    /// comes through `rng`.
    pub fn update(&mut self, rng: &mut impl Rng) {
        let pos = self.pos;
        match &mut self.behavior {
            Behavior::Trash { .. } => self.anim_phase += 0.06,
            Behavior::Puddle => self.anim_phase += 0.04,
            Behavior::Faucet(faucet) => update_faucet(faucet, pos, rng),
            Behavior::PlantSpot(PlantState::Planted { growth }) => {
                *growth = (*growth + 1).min(GROWTH_CAP);
            }
            Behavior::Hazard(patrol) => {
                self.pos.x += patrol.speed * patrol.direction;
                patrol.walk_frame += 1;
                if self.pos.x < patrol.x_min || self.pos.x > patrol.x_max {
                    patrol.direction = -patrol.direction;
                }
            }
            Behavior::Bin { .. }
            | Behavior::SeedlingPile
            | Behavior::PlantSpot(PlantState::Empty)
            | Behavior::Decoration(_) => {}
        }
    }
}

fn update_faucet(faucet: &mut Faucet, pos: Point, rng: &mut impl Rng) {
    if faucet.is_open() {
        faucet.drip_timer += 1;
        if faucet.drip_timer % DRIP_INTERVAL == 0 {
            faucet.droplets.push(Droplet {
                x: pos.x + rng.gen_range(-2.0..=2.0),
                y: pos.y + 20.0,
                vy: 0.8,
                size: rng.gen_range(2.5..=4.0),
                life: DROPLET_LIFE,
            });
        }
    }
    for d in faucet.droplets.iter_mut() {
        d.y += d.vy;
        d.vy += 0.12;
        d.life = d.life.saturating_sub(1);
        d.size = (d.size - 0.05).max(0.5);
    }
    faucet.droplets.retain(|d| d.life > 0);
}
