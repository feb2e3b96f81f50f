//! Eco Duck: a top-down environmental arcade game.
//!
//! The library is the simulation: entities, the duck, per-level worlds, the
//! interaction rules and the session state machine.  It has no I/O; the
//! terminal front-end in `main.rs` feeds it input snapshots and draws it.

pub mod config;
pub mod entities;
pub mod geometry;
pub mod interaction;
pub mod levels;
pub mod particles;
pub mod player;
pub mod session;
pub mod world;
