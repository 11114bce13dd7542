//! World state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here and is
//! serializable, so a `World` doubles as the read-only snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;

/// Index of a platform in `Level::platforms`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlatformId(pub usize);

impl PlatformId {
    /// The ground is always the first platform
    pub const GROUND: PlatformId = PlatformId(0);

    pub fn is_ground(self) -> bool {
        self == Self::GROUND
    }
}

/// A static platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

/// The player-controlled lion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub gravity: f32,
    /// Vertical velocity applied by a jump (negative is up)
    pub jump_force: f32,
    /// Water gauge, 0..=100
    pub water_level: f32,
    pub has_bucket: bool,
    /// A splash was requested and has not fired yet
    pub splash_pending: bool,
    /// Seconds until the next splash may fire
    pub splash_cooldown: f32,
    pub on_ground: bool,
    pub can_double_jump: bool,
    pub speed_boost: bool,
    pub jump_boost: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_SIZE, PLAYER_SIZE),
            vel: Vec2::ZERO,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            water_level: MAX_WATER,
            has_bucket: true,
            splash_pending: false,
            splash_cooldown: 0.0,
            on_ground: true,
            can_double_jump: true,
            speed_boost: false,
            jump_boost: false,
        }
    }
}

impl Player {
    /// Horizontal speed for a held direction key
    pub fn move_speed(&self) -> f32 {
        if self.speed_boost {
            PLAYER_SPEED * POWER_UP_MULTIPLIER
        } else {
            PLAYER_SPEED
        }
    }

    /// Vertical velocity a jump sets
    pub fn jump_impulse(&self) -> f32 {
        if self.jump_boost {
            self.jump_force * POWER_UP_MULTIPLIER
        } else {
            self.jump_force
        }
    }

    /// Mark the player as standing on something at `top`
    pub fn land_on(&mut self, top: f32) {
        self.rect.y = top - self.rect.height;
        self.vel.y = 0.0;
        self.on_ground = true;
        self.can_double_jump = true;
    }

    /// Back to the spawn point with a full bucket and no power-ups
    pub fn reset(&mut self) {
        self.rect.x = PLAYER_START_X;
        self.rect.y = PLAYER_START_Y;
        self.water_level = MAX_WATER;
        self.speed_boost = false;
        self.jump_boost = false;
    }
}

/// A wandering person (roaming character)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub rect: Rect,
    pub vx: f32,
    /// Platform this person patrols
    pub platform: PlatformId,
    /// Soaked people stop moving and no longer count toward the win
    pub wet: bool,
}

/// An elephant patrolling the ground (hazard)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elephant {
    pub rect: Rect,
    pub vx: f32,
    pub platform: PlatformId,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Doubles horizontal speed
    Speed,
    /// Doubles jump impulse
    Jump,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Speed, PowerUpKind::Jump];
}

/// A one-time pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    /// Cleared on pickup
    pub active: bool,
}

/// Decorative tree, no gameplay interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub rect: Rect,
    /// Sprite index, 0..TREE_VARIANTS
    pub variant: u8,
}

/// Everything the generator produces for one level
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Level {
    /// Seed the level was generated from
    pub seed: u64,
    /// `platforms[0]` is the ground
    pub platforms: Vec<Platform>,
    pub people: Vec<Person>,
    pub elephants: Vec<Elephant>,
    pub power_ups: Vec<PowerUp>,
    pub trees: Vec<Tree>,
    /// Every person is wet. Once set it stays set for this level.
    pub won: bool,
}

impl Level {
    pub fn ground(&self) -> Option<&Platform> {
        self.platforms.first()
    }

    pub fn platform(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(id.0)
    }

    /// Platforms above the ground
    pub fn floating_platforms(&self) -> impl Iterator<Item = (PlatformId, &Platform)> {
        self.platforms
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, p)| (PlatformId(i), p))
    }

    pub fn all_people_wet(&self) -> bool {
        self.people.iter().all(|p| p.wet)
    }

    pub fn dry_people(&self) -> usize {
        self.people.iter().filter(|p| !p.wet).count()
    }
}

/// Something noteworthy that happened during a tick
///
/// The simulation never touches storage or audio; the driver drains these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A person was soaked (index into `Level::people`)
    Soaked { person: usize },
    /// Bucket went from partially full to full at the well
    Refilled,
    /// An elephant emptied a non-empty bucket
    Trampled,
    PowerUpCollected(PowerUpKind),
    /// Last dry person was soaked
    Won,
}

/// Refill zone box for the given world size
pub fn well_rect(width: f32, height: f32) -> Rect {
    Rect::new(
        width - WELL_SIZE,
        height - WELL_BOTTOM_OFFSET,
        WELL_SIZE,
        WELL_SIZE,
    )
}

/// Complete world state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub level: Level,
    pub player: Player,
    /// Refill zone, re-anchored on resize, kept across levels
    pub well: Rect,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl World {
    /// Wrap a freshly generated level
    pub fn new(width: f32, height: f32, level: Level) -> Self {
        Self {
            width,
            height,
            level,
            player: Player::default(),
            well: well_rect(width, height),
            events: Vec::new(),
        }
    }

    /// Change the world bounds and re-anchor the well
    pub fn set_bounds(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.well = well_rect(width, height);
    }

    pub fn is_won(&self) -> bool {
        self.level.won
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
