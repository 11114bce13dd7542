//! Procedural level generation
//!
//! Builds the ground, the elephants patrolling it, a stack of floating
//! platforms grown out of one another, trees, people and power-ups. All
//! randomness comes from the `LevelRng` passed in, so a seed reproduces a
//! level exactly.

use thiserror::Error;

use super::geometry::Rect;
use super::rng::LevelRng;
use super::state::{Elephant, Level, Person, Platform, PlatformId, PowerUp, PowerUpKind, Tree};
use crate::config::LevelConfig;
use crate::consts::*;

/// Why a level could not be generated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("world bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
    #[error("invalid level config: {0}")]
    InvalidConfig(&'static str),
}

/// Generate a complete level for a `width` x `height` world
pub fn generate(
    width: f32,
    height: f32,
    config: &LevelConfig,
    rng: &mut LevelRng,
) -> Result<Level, GenerateError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if !valid(width) || !valid(height) {
        return Err(GenerateError::InvalidBounds { width, height });
    }
    config.validate()?;

    let ground = Rect::new(0.0, height - GROUND_HEIGHT, width, GROUND_HEIGHT);
    let mut level = Level {
        seed: rng.seed(),
        platforms: vec![Platform { rect: ground }],
        ..Level::default()
    };

    if config.elephants_enabled {
        place_elephants(&mut level, config, rng);
    }

    let target = rng.range_u32(config.platforms.to_range());
    for _ in 0..target {
        match place_platform(&level.platforms, width, config.max_placement_attempts, rng) {
            Some(rect) => level.platforms.push(Platform { rect }),
            None => log::warn!(
                "No room for platform {} of {} in {}x{} world, skipping",
                level.platforms.len(),
                target,
                width,
                height
            ),
        }
    }

    place_trees(&mut level, width, height, rng);
    place_people(&mut level, width, config, rng);
    if config.power_ups_enabled {
        place_power_ups(&mut level, config, rng);
    }

    // No people means nothing left to soak
    level.won = level.all_people_wet();

    log::info!(
        "Generated level (seed {}): {} platforms, {} people, {} elephants, {} power-ups, {} trees",
        level.seed,
        level.platforms.len() - 1,
        level.people.len(),
        level.elephants.len(),
        level.power_ups.len(),
        level.trees.len()
    );

    Ok(level)
}

/// True if `candidate` would sit too close above or below an existing
/// platform it overlaps horizontally to be a separate jump target
pub fn conflicts_with(candidate: &Rect, platforms: &[Platform]) -> bool {
    platforms.iter().any(|p| {
        p.rect.overlaps_horizontally(candidate)
            && (p.rect.y - candidate.y).abs() < PLATFORM_VERTICAL_TOLERANCE
    })
}

fn place_elephants(level: &mut Level, config: &LevelConfig, rng: &mut LevelRng) {
    let ground = level.platforms[0].rect;
    let count = rng.range_u32(config.elephants.to_range());
    for _ in 0..count {
        let x = ground.x + rng.next_f32() * (ground.width - ELEPHANT_WIDTH).max(0.0);
        let speed = rng.range_f32(ELEPHANT_MIN_SPEED, ELEPHANT_MAX_SPEED);
        level.elephants.push(Elephant {
            rect: Rect::new(x, ground.y - ELEPHANT_HEIGHT, ELEPHANT_WIDTH, ELEPHANT_HEIGHT),
            vx: rng.sign() * speed,
            platform: PlatformId::GROUND,
        });
    }
}

/// Find a spot for the next floating platform
///
/// Tries random candidates grown from existing platforms first. If none of
/// them fits within `max_attempts`, sweeps a fixed grid of positions and
/// takes the first free one. Returns `None` only if the world has no room.
fn place_platform(
    platforms: &[Platform],
    world_width: f32,
    max_attempts: u32,
    rng: &mut LevelRng,
) -> Option<Rect> {
    let mut last = None;
    for _ in 0..max_attempts {
        let candidate = random_candidate(platforms, world_width, rng);
        if !conflicts_with(&candidate, platforms) {
            return Some(candidate);
        }
        last = Some(candidate);
    }

    let width = last.map_or(PERSON_SIZE * 2.0, |r| r.width);
    let forced = sweep_for_platform(platforms, world_width, width);
    if let Some(rect) = forced {
        log::warn!(
            "Random placement exhausted after {} attempts, forced platform at ({}, {})",
            max_attempts,
            rect.x,
            rect.y
        );
    }
    forced
}

fn random_candidate(platforms: &[Platform], world_width: f32, rng: &mut LevelRng) -> Rect {
    let width = (PLATFORM_MIN_WIDTH + (rng.next_f32() * PLATFORM_WIDTH_RANGE).floor())
        .max(PERSON_SIZE * 2.0);
    let ground = platforms[0].rect;

    let (x, base_y) = if platforms.len() == 1 {
        // Even zones only, so the first platform is reachable from the start
        let zone_width = world_width / GROUND_ZONES as f32;
        let zone = rng.range_u32(0..=GROUND_ZONES / 2 - 1) * 2;
        (zone as f32 * zone_width + rng.next_f32() * zone_width, ground.y)
    } else {
        let base = platforms[rng.index(platforms.len())].rect;
        let offset = rng.next_f32() * PLATFORM_OFFSET_RANGE + PLATFORM_OFFSET_MIN;
        (base.x + rng.sign() * offset, base.y)
    };
    let rise = (rng.next_f32() * PLATFORM_RISE_RANGE + PLAYER_SIZE * 1.5).floor();

    clamp_platform(x, base_y - rise, width, world_width)
}

fn clamp_platform(x: f32, y: f32, width: f32, world_width: f32) -> Rect {
    let width = width.min(world_width);
    let x = x.clamp(0.0, world_width - width);
    let y = y.max(PLATFORM_MIN_Y);
    Rect::new(x, y, width, PLATFORM_HEIGHT)
}

/// Rows one tolerance band apart going up from the ground, left to right
fn sweep_for_platform(platforms: &[Platform], world_width: f32, width: f32) -> Option<Rect> {
    let ground_y = platforms[0].rect.y;
    let mut y = ground_y - PLATFORM_VERTICAL_TOLERANCE;
    while y >= PLATFORM_MIN_Y {
        let mut x = 0.0;
        while x + width.min(world_width) <= world_width {
            let candidate = clamp_platform(x, y, width, world_width);
            if !conflicts_with(&candidate, platforms) {
                return Some(candidate);
            }
            x += PLATFORM_OFFSET_MIN;
        }
        y -= PLATFORM_VERTICAL_TOLERANCE;
    }
    None
}

fn place_trees(level: &mut Level, world_width: f32, world_height: f32, rng: &mut LevelRng) {
    let mut trees = Vec::new();
    for (_, platform) in level.floating_platforms() {
        let p = platform.rect;
        for _ in 0..rng.range_u32(1..=2) {
            let x = rng.next_f32() * (p.width - TREE_WIDTH).max(0.0) + p.x;
            trees.push(random_tree(x, p.y - TREE_PLATFORM_OFFSET, rng));
        }
    }
    for _ in 0..rng.range_u32(2..=4) {
        let x = rng.next_f32() * (world_width - TREE_WIDTH).max(0.0);
        trees.push(random_tree(x, world_height - TREE_HEIGHT, rng));
    }
    level.trees = trees;
}

fn random_tree(x: f32, y: f32, rng: &mut LevelRng) -> Tree {
    Tree {
        rect: Rect::new(x, y, TREE_WIDTH, TREE_HEIGHT),
        variant: rng.range_u32(0..=TREE_VARIANTS - 1) as u8,
    }
}

/// Greedily put people on free platforms until the target or the platforms
/// run out
fn place_people(level: &mut Level, world_width: f32, config: &LevelConfig, rng: &mut LevelRng) {
    let ground = level.platforms[0].rect;
    let target = rng.range_u32(config.people.to_range());
    let mut occupied = vec![false; level.platforms.len()];
    let mut on_ground = 0;

    for _ in 0..target {
        let (x, platform) =
            if on_ground < config.max_ground_people && rng.chance(config.ground_person_chance) {
                on_ground += 1;
                let x = (rng.next_f32() * (world_width - PERSON_SIZE).max(0.0)).floor();
                (x, PlatformId::GROUND)
            } else {
                let Some(id) = (1..level.platforms.len()).find(|&i| !occupied[i]) else {
                    log::debug!(
                        "Out of free platforms after {} of {} people",
                        level.people.len(),
                        target
                    );
                    break;
                };
                occupied[id] = true;
                let p = level.platforms[id].rect;
                let x = (rng.next_f32() * (p.width - PERSON_SIZE).max(0.0)).floor() + p.x;
                (x, PlatformId(id))
            };

        let top = if platform.is_ground() {
            ground.y
        } else {
            level.platforms[platform.0].rect.y
        };
        level.people.push(Person {
            rect: Rect::new(x, top - PERSON_SIZE, PERSON_SIZE, PERSON_SIZE),
            vx: rng.sign() * PERSON_SPEED,
            platform,
            wet: false,
        });
    }
}

fn place_power_ups(level: &mut Level, config: &LevelConfig, rng: &mut LevelRng) {
    let floating = level.platforms.len() - 1;
    if floating == 0 {
        return;
    }
    for kind in PowerUpKind::ALL {
        if !rng.chance(config.power_up_chance) {
            continue;
        }
        let p = level.platforms[1 + rng.index(floating)].rect;
        let x = p.x + rng.next_f32() * (p.width - POWER_UP_SIZE).max(0.0);
        log::debug!("Placed {:?} power-up at ({}, {})", kind, x, p.y - POWER_UP_SIZE);
        level.power_ups.push(PowerUp {
            rect: Rect::new(x, p.y - POWER_UP_SIZE, POWER_UP_SIZE, POWER_UP_SIZE),
            kind,
            active: true,
        });
    }
}
