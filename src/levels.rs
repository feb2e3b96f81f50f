//! Static level catalog: goals, limits and hand-placed layouts.

use crate::entities::{DecorationKind, TrashCategory};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LevelId {
    /// Pick up litter and drop it in the matching bin.
    Sorting,
    /// Close leaking faucets before the clock runs out.
    Water,
    /// Plant seedlings while dodging lumberjacks.
    Trees,
}

impl LevelId {
    pub const ALL: [LevelId; 3] = [LevelId::Sorting, LevelId::Water, LevelId::Trees];

    /// 1-based number shown to the player.
    pub fn number(self) -> u8 {
        match self {
            LevelId::Sorting => 1,
            LevelId::Water => 2,
            LevelId::Trees => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(LevelId::Sorting),
            2 => Some(LevelId::Water),
            3 => Some(LevelId::Trees),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    pub fn config(self) -> &'static LevelConfig {
        match self {
            LevelId::Sorting => &SORTING,
            LevelId::Water => &WATER,
            LevelId::Trees => &TREES,
        }
    }
}

/// HUD accent colour family for a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Water,
    Green,
}

#[derive(Debug, PartialEq)]
pub struct LevelConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub target_score: u32,
    pub time_limit_secs: Option<u32>,
    pub tip: &'static str,
    pub accent: Accent,
}

static SORTING: LevelConfig = LevelConfig {
    name: "Level 1: Sort the Trash",
    description: "Pick up litter on the playground and drop it in the right bin!",
    target_score: 15,
    time_limit_secs: None,
    tip: "SPACE picks up and drops trash. Match the bin to the item!",
    accent: Accent::Blue,
};

static WATER: LevelConfig = LevelConfig {
    name: "Level 2: Save Water",
    description: "Turn off the leaking faucets in the classroom and canteen!",
    target_score: 20,
    time_limit_secs: Some(60),
    tip: "SPACE closes a faucet. Puddles are slippery and slow you down!",
    accent: Accent::Water,
};

static TREES: LevelConfig = LevelConfig {
    name: "Level 3: Plant Trees",
    description: "Plant trees on the wasteland, but watch out for lumberjacks!",
    target_score: 12,
    time_limit_secs: None,
    tip: "Grab a seedling from a pile, then press SPACE on an empty plot!",
    accent: Accent::Green,
};

// ── Layouts ───────────────────────────────────────────────────────────────────

pub const BIN_ROW_Y: f32 = 128.0;
pub const BIN_LAYOUT: [(TrashCategory, f32); 4] = [
    (TrashCategory::Recyclable, 252.0),
    (TrashCategory::Kitchen, 576.0),
    (TrashCategory::Hazardous, 900.0),
    (TrashCategory::Other, 1224.0),
];
pub const INITIAL_TRASH: usize = 20;

pub const SORTING_DECORATIONS: [(f32, f32, DecorationKind); 14] = [
    (100.0, 315.0, DecorationKind::Slide),
    (1340.0, 315.0, DecorationKind::Swing),
    (180.0, 780.0, DecorationKind::TrackCone),
    (1260.0, 780.0, DecorationKind::TrackCone),
    (100.0, 600.0, DecorationKind::Bench),
    (1340.0, 600.0, DecorationKind::Bench),
    (260.0, 845.0, DecorationKind::Grass),
    (520.0, 845.0, DecorationKind::Grass),
    (900.0, 845.0, DecorationKind::Grass),
    (1160.0, 845.0, DecorationKind::Grass),
    (130.0, 830.0, DecorationKind::Flower),
    (420.0, 830.0, DecorationKind::Flower),
    (1000.0, 830.0, DecorationKind::Flower),
    (1310.0, 830.0, DecorationKind::Flower),
];

pub const FAUCET_LAYOUT: [(f32, f32); 8] = [
    (200.0, 128.0),
    (480.0, 128.0),
    (760.0, 128.0),
    (1040.0, 128.0),
    (1320.0, 128.0),
    (200.0, 428.0),
    (680.0, 428.0),
    (1160.0, 428.0),
];

pub const PUDDLE_LAYOUT: [(f32, f32); 5] = [
    (340.0, 300.0),
    (860.0, 540.0),
    (510.0, 690.0),
    (1120.0, 300.0),
    (250.0, 620.0),
];

/// Each desk gets a chair 48 units below it.
pub const DESK_LAYOUT: [(f32, f32); 8] = [
    (300.0, 620.0),
    (580.0, 620.0),
    (860.0, 620.0),
    (1140.0, 620.0),
    (300.0, 770.0),
    (580.0, 770.0),
    (860.0, 770.0),
    (1140.0, 770.0),
];
pub const SINK_LAYOUT: [(f32, f32); 2] = [(130.0, 280.0), (1310.0, 280.0)];

pub const SEEDLING_PILE_LAYOUT: [(f32, f32); 2] = [(100.0, 450.0), (1340.0, 450.0)];

pub const PLANT_SPOT_LAYOUT: [(f32, f32); 12] = [
    (250.0, 180.0),
    (510.0, 150.0),
    (860.0, 180.0),
    (1120.0, 150.0),
    (340.0, 375.0),
    (680.0, 345.0),
    (1040.0, 375.0),
    (250.0, 600.0),
    (600.0, 570.0),
    (950.0, 600.0),
    (420.0, 750.0),
    (770.0, 780.0),
];

pub const HAZARD_PATROL_X: (f32, f32) = (170.0, 1270.0);
pub const HAZARD_LAYOUT: [(f32, f32); 3] = [(510.0, 255.0), (860.0, 495.0), (340.0, 690.0)];

pub const TREES_DECORATIONS: [(f32, f32, DecorationKind); 9] = [
    (80.0, 120.0, DecorationKind::Bush),
    (1360.0, 120.0, DecorationKind::Bush),
    (80.0, 840.0, DecorationKind::Tree),
    (1360.0, 840.0, DecorationKind::Tree),
    (340.0, 855.0, DecorationKind::Fence),
    (680.0, 855.0, DecorationKind::Fence),
    (1040.0, 855.0, DecorationKind::Fence),
    (250.0, 840.0, DecorationKind::Grass),
    (1170.0, 840.0, DecorationKind::Grass),
];
