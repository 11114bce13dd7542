//! Frame driver
//!
//! `Game` owns the world and its collaborators (clock, settings, stats)
//! and is what input wiring and renderers talk to. One `frame` call per
//! display refresh: consume one-shot input, tick, drain events into stats.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::LevelConfig;
use crate::consts::*;
use crate::platform::FrameClock;
use crate::settings::Settings;
use crate::sim::{self, GenerateError, Level, LevelRng, TickInput, World};
use crate::stats::StatsStore;

/// Input snapshot for one frame
///
/// `jump`, `splash` and `restart` are edge-triggered: set them for the one
/// frame the key went down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub splash: bool,
    pub restart: bool,
}

impl FrameInput {
    fn tick_input(&self) -> TickInput {
        TickInput {
            move_left: self.move_left,
            move_right: self.move_right,
        }
    }
}

/// Game instance holding all state
pub struct Game {
    world: World,
    config: LevelConfig,
    settings: Settings,
    /// Hands out level seeds for restarts without an explicit seed
    seeds: Pcg32,
    stats: Box<dyn StatsStore>,
    clock: FrameClock,
}

impl Game {
    /// Create a game and generate its first level
    ///
    /// The first level uses `settings.seed` if set, otherwise a seed drawn
    /// from `session_seed`.
    pub fn new(
        width: f32,
        height: f32,
        settings: Settings,
        stats: Box<dyn StatsStore>,
        session_seed: u64,
    ) -> Result<Self, GenerateError> {
        let mut seeds = Pcg32::seed_from_u64(session_seed);
        let level_seed = settings.seed.unwrap_or_else(|| draw_seed(&mut seeds));
        let config = settings.level_config(width, height);
        let level = sim::generate(width, height, &config, &mut LevelRng::new(level_seed))?;

        log::info!(
            "New game {}x{} (session seed {}, level seed {})",
            width,
            height,
            session_seed,
            level_seed
        );

        Ok(Self {
            world: World::new(width, height, level),
            config,
            settings,
            seeds,
            stats,
            clock: FrameClock::new(),
        })
    }

    /// Read-only view for renderers
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn stats(&self) -> &dyn StatsStore {
        self.stats.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn level_seed(&self) -> u64 {
        self.world.level.seed
    }

    /// Serialized snapshot of the whole world
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.world)
    }

    /// Run one display frame at monotonic time `now_ms`
    pub fn frame(&mut self, now_ms: f64, input: &FrameInput) {
        let dt = self.clock.elapsed(now_ms);
        self.step(input, dt);
    }

    /// Run one frame with an explicit elapsed time in seconds
    pub fn step(&mut self, input: &FrameInput, dt: f32) {
        if input.restart {
            if let Err(e) = self.restart(None) {
                log::error!("Restart failed, keeping current level: {}", e);
            }
        }
        if input.jump {
            self.jump();
        }
        if input.splash {
            self.request_splash();
        }

        sim::tick(&mut self.world, &input.tick_input(), dt);

        for event in self.world.drain_events() {
            log::debug!("Event: {:?}", event);
            self.stats.record(&event);
        }
    }

    pub fn jump(&mut self) {
        sim::jump(&mut self.world);
    }

    pub fn request_splash(&mut self) {
        sim::request_splash(&mut self.world);
    }

    /// Replace the level, keeping the player where it is (minus power-ups)
    ///
    /// With no seed, the pinned `Settings::seed` is replayed if there is
    /// one, otherwise the next seed of this session is used.
    pub fn regenerate(&mut self, seed: Option<u64>) -> Result<(), GenerateError> {
        let seed = seed
            .or(self.settings.seed)
            .unwrap_or_else(|| draw_seed(&mut self.seeds));
        self.regenerate_with(seed)
    }

    /// New level plus a fresh player; run statistics are kept
    pub fn restart(&mut self, seed: Option<u64>) -> Result<(), GenerateError> {
        self.regenerate(seed)?;
        self.world.player.reset();
        log::info!("Restarted on level seed {}", self.world.level.seed);
        Ok(())
    }

    /// React to a viewport change
    ///
    /// The well always follows the bottom-right corner. A large enough
    /// change rebuilds the level from the same seed so it stays the same
    /// level, laid out for the new size. Returns true if it was rebuilt.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<bool, GenerateError> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(GenerateError::InvalidBounds { width, height });
        }

        let old = (self.world.width, self.world.height);
        let regenerate = self
            .settings
            .resize_needs_regeneration(old, (width, height));

        if regenerate {
            let config = self.settings.level_config(width, height);
            let seed = self.world.level.seed;
            let level = sim::generate(width, height, &config, &mut LevelRng::new(seed))?;
            self.config = config;
            self.install_level(level);
            log::info!(
                "Resized {}x{} -> {}x{}, regenerated seed {}",
                old.0,
                old.1,
                width,
                height,
                seed
            );
        }

        self.world.set_bounds(width, height);
        sim::clamp_to_world(&mut self.world.player, width, height);
        Ok(regenerate)
    }

    fn regenerate_with(&mut self, seed: u64) -> Result<(), GenerateError> {
        let level = sim::generate(
            self.world.width,
            self.world.height,
            &self.config,
            &mut LevelRng::new(seed),
        )?;
        self.install_level(level);
        Ok(())
    }

    /// Swap in a whole level so a tick never sees a half-built one.
    /// Power-ups only last for the level they were picked up in.
    fn install_level(&mut self, level: Level) {
        self.world.level = level;
        self.world.events.clear();
        self.world.player.speed_boost = false;
        self.world.player.jump_boost = false;
    }
}

/// Largest seed handed out by a session, so seeds survive a trip through
/// a JavaScript number (2^53 - 1)
pub const MAX_DRAWN_SEED: u64 = (1 << 53) - 1;

fn draw_seed(seeds: &mut Pcg32) -> u64 {
    seeds.next_u64() >> 11
}

/// Demo-mode input: walk to the nearest dry person and soak them, refill
/// at the well when the bucket runs low
pub fn autopilot(world: &World) -> FrameInput {
    let player = &world.player;
    let me = player.rect.center();
    let mut input = FrameInput::default();

    let steer = |input: &mut FrameInput, target_x: f32| {
        if target_x < me.x - PLAYER_SPEED {
            input.move_left = true;
        } else if target_x > me.x + PLAYER_SPEED {
            input.move_right = true;
        }
    };

    if player.water_level < SPLASH_COST {
        steer(&mut input, world.well.center().x);
        return input;
    }

    let target = world
        .level
        .people
        .iter()
        .filter(|p| !p.wet)
        .min_by(|a, b| {
            a.rect
                .center()
                .distance_squared(me)
                .total_cmp(&b.rect.center().distance_squared(me))
        });

    let Some(target) = target else {
        return input;
    };

    if target.rect.widened(SPLASH_MARGIN).touches(&player.rect) {
        input.splash = player.splash_cooldown <= 0.0;
        return input;
    }

    steer(&mut input, target.rect.center().x);

    // Target stands higher: jump from the ground, double jump on the way down
    let above = target.rect.bottom() < player.rect.bottom() - 1.0;
    if above && (player.on_ground || (player.vel.y > 0.0 && player.can_double_jump)) {
        input.jump = true;
    }
    input
}
