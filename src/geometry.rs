//! World-space primitives shared by every simulation module.
//!
//! All positions are center-anchored and measured in world units
//! (the playfield is `WORLD_WIDTH` × `WORLD_HEIGHT`).

pub const WORLD_WIDTH: f32 = 1440.0;
pub const WORLD_HEIGHT: f32 = 900.0;

/// Rows at the top of the world reserved for the HUD; nothing walks there.
pub const HUD_BAND: f32 = 75.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The rectangle a level is played in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new((self.width / 2.0).floor(), (self.height / 2.0).floor())
    }

    /// Clamp a center point so a body of `footprint` stays inside the
    /// playable area (the world minus the HUD band).
    pub fn clamp(&self, p: Point, footprint: Size) -> Point {
        let half_w = (footprint.width / 2.0).floor();
        let half_h = (footprint.height / 2.0).floor();
        Point {
            x: p.x.max(half_w).min(self.width - half_w),
            y: p.y.max(half_h + HUD_BAND).min(self.height - half_h),
        }
    }
}
