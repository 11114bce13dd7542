//! Lion Splash - A single-screen platformer about soaking people
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, collisions)
//! - `config`: Data-driven level generation parameters
//! - `settings`: Persisted player preferences
//! - `platform`: Browser/native platform abstraction (clock, storage)
//! - `stats`: Persistent run statistics
//! - `game`: Frame driver tying the simulation to its collaborators

pub mod config;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod stats;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{LevelConfig, LevelPreset};
pub use game::{FrameInput, Game};
pub use settings::Settings;
pub use stats::{Counter, RunStats, StatsStore};

/// Game configuration constants
///
/// Physics values are per-frame, not per-second: gravity and speeds are
/// applied once per `tick` regardless of the elapsed time.
pub mod consts {
    /// Player box (square)
    pub const PLAYER_SIZE: f32 = 60.0;
    /// Player spawn position (top-left corner)
    pub const PLAYER_START_X: f32 = 50.0;
    pub const PLAYER_START_Y: f32 = 50.0;
    /// Added to vertical velocity every frame
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity set by a jump (negative is up)
    pub const JUMP_FORCE: f32 = -10.0;
    /// Horizontal speed while a direction is held
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Both power-ups double their stat
    pub const POWER_UP_MULTIPLIER: f32 = 2.0;

    /// Water gauge
    pub const MAX_WATER: f32 = 100.0;
    /// Water spent per soaked person
    pub const SPLASH_COST: f32 = 20.0;
    /// Seconds between splashes
    pub const SPLASH_COOLDOWN: f32 = 1.0;
    /// Horizontal reach of a splash past the player's box, on both sides
    pub const SPLASH_MARGIN: f32 = 50.0;

    /// Person (roaming character) box
    pub const PERSON_SIZE: f32 = 60.0;
    pub const PERSON_SPEED: f32 = 0.5;

    /// Elephant (hazard) box
    pub const ELEPHANT_WIDTH: f32 = 90.0;
    pub const ELEPHANT_HEIGHT: f32 = 60.0;
    pub const ELEPHANT_MIN_SPEED: f32 = 0.5;
    pub const ELEPHANT_MAX_SPEED: f32 = 1.0;

    /// Ground strip at the bottom of the world
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Floating platform geometry
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_MIN_WIDTH: f32 = 50.0;
    pub const PLATFORM_WIDTH_RANGE: f32 = 150.0;
    /// Number of horizontal ground zones used to seed the first platform
    pub const GROUND_ZONES: u32 = 8;
    /// Random part of the rise between a platform and its base
    pub const PLATFORM_RISE_RANGE: f32 = 100.0;
    /// Horizontal offset from the base platform is `OFFSET_MIN + U * OFFSET_RANGE`
    pub const PLATFORM_OFFSET_MIN: f32 = 50.0;
    pub const PLATFORM_OFFSET_RANGE: f32 = 100.0;
    /// Platforms never spawn above this y (room for the player to stand on top)
    pub const PLATFORM_MIN_Y: f32 = PLAYER_SIZE;
    /// Horizontally overlapping platforms must differ in y by at least this much
    pub const PLATFORM_VERTICAL_TOLERANCE: f32 = PERSON_SIZE * 1.5;

    /// Decoration (tree) box
    pub const TREE_WIDTH: f32 = 50.0;
    pub const TREE_HEIGHT: f32 = 100.0;
    /// Trees are drawn sunk into their platform by this much
    pub const TREE_PLATFORM_OFFSET: f32 = 65.0;
    pub const TREE_VARIANTS: u32 = 3;

    /// Refill zone (well) box, anchored to the bottom-right corner
    pub const WELL_SIZE: f32 = 100.0;
    pub const WELL_BOTTOM_OFFSET: f32 = 125.0;

    /// Power-up box
    pub const POWER_UP_SIZE: f32 = 40.0;

    /// Largest elapsed time fed to a tick (tab switches, debugger pauses)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
