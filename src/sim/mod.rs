//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (entities live in `Vec`s, never reordered)
//! - Entities reference platforms by index, never by pointer
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod generate;
pub mod geometry;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{clamp_to_world, patrol, resolve_platforms};
pub use generate::{GenerateError, conflicts_with, generate};
pub use geometry::Rect;
pub use rng::LevelRng;
pub use state::{
    Elephant, GameEvent, Level, Person, Platform, PlatformId, Player, PowerUp, PowerUpKind, Tree,
    World, well_rect,
};
pub use tick::{TickInput, jump, request_splash, tick};
