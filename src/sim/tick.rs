//! Per-frame simulation step
//!
//! Advances the world by one frame. Gravity and speeds are per-frame
//! constants: `dt` only drives the splash cooldown, so movement speed
//! follows the display refresh rate.

use super::collision::{clamp_to_world, patrol, resolve_platforms};
use super::state::{GameEvent, Level, PowerUpKind, World};
use crate::consts::*;

/// Held-direction intent for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// Advance the world by one frame
///
/// Does nothing once the level is won.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if world.level.won {
        return;
    }

    move_player(world, input);
    refill_at_well(world);

    if world.player.splash_cooldown > 0.0 {
        world.player.splash_cooldown -= dt;
    }
    splash(world);

    clamp_to_world(&mut world.player, world.width, world.height);

    move_people(&mut world.level);
    move_elephants(world);
    collect_power_ups(world);
    check_win(world);
}

/// Jump if standing on something, or spend the double jump mid-air
pub fn jump(world: &mut World) {
    let player = &mut world.player;
    if player.on_ground || player.can_double_jump {
        player.vel.y = player.jump_impulse();
        if !player.on_ground {
            player.can_double_jump = false;
        }
    }
}

/// Queue a splash; it fires on the next tick the cooldown allows
pub fn request_splash(world: &mut World) {
    world.player.splash_pending = true;
}

fn move_player(world: &mut World, input: &TickInput) {
    let player = &mut world.player;

    // Intent sets velocity outright, no momentum
    player.vel.x = 0.0;
    if input.move_left {
        player.vel.x = -player.move_speed();
    }
    if input.move_right {
        player.vel.x = player.move_speed();
    }

    player.vel.y += player.gravity;
    player.rect.x += player.vel.x;
    player.rect.y += player.vel.y;

    player.on_ground = false;
    resolve_platforms(player, &world.level.platforms);
}

fn refill_at_well(world: &mut World) {
    let player = &mut world.player;
    if !player.rect.intersects(&world.well) {
        return;
    }
    if player.water_level < MAX_WATER {
        world.events.push(GameEvent::Refilled);
    }
    player.water_level = MAX_WATER;
    player.has_bucket = true;
}

fn splash(world: &mut World) {
    let World {
        level,
        player,
        events,
        ..
    } = world;

    if !player.splash_pending || player.splash_cooldown > 0.0 || player.water_level <= 0.0 {
        return;
    }

    for (i, person) in level.people.iter_mut().enumerate() {
        if person.wet {
            continue;
        }
        if person.rect.widened(SPLASH_MARGIN).touches(&player.rect) {
            person.wet = true;
            person.vx = 0.0;
            player.water_level = (player.water_level - SPLASH_COST).max(0.0);
            events.push(GameEvent::Soaked { person: i });
        }
    }

    // Spent even if nobody was in reach
    player.splash_pending = false;
    player.splash_cooldown = SPLASH_COOLDOWN;
}

fn move_people(level: &mut Level) {
    let Level {
        platforms, people, ..
    } = level;

    for person in people.iter_mut().filter(|p| !p.wet) {
        if let Some(platform) = platforms.get(person.platform.0) {
            patrol(&mut person.rect, &mut person.vx, &platform.rect);
        }
    }
}

fn move_elephants(world: &mut World) {
    let World {
        level,
        player,
        events,
        ..
    } = world;

    for elephant in level.elephants.iter_mut() {
        if let Some(platform) = level.platforms.get(elephant.platform.0) {
            patrol(&mut elephant.rect, &mut elephant.vx, &platform.rect);
        }
        if elephant.rect.intersects(&player.rect) {
            if player.water_level > 0.0 {
                events.push(GameEvent::Trampled);
            }
            player.water_level = 0.0;
        }
    }
}

fn collect_power_ups(world: &mut World) {
    let World {
        level,
        player,
        events,
        ..
    } = world;

    for power_up in level.power_ups.iter_mut() {
        if !power_up.active || !power_up.rect.intersects(&player.rect) {
            continue;
        }
        power_up.active = false;
        match power_up.kind {
            PowerUpKind::Speed => player.speed_boost = true,
            PowerUpKind::Jump => player.jump_boost = true,
        }
        log::debug!("Collected {:?} power-up", power_up.kind);
        events.push(GameEvent::PowerUpCollected(power_up.kind));
    }
}

fn check_win(world: &mut World) {
    if !world.level.won && world.level.all_people_wet() {
        world.level.won = true;
        log::info!("Level won: all {} people soaked", world.level.people.len());
        world.events.push(GameEvent::Won);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfig;
    use crate::sim::generate;
    use crate::sim::geometry::Rect;
    use crate::sim::rng::LevelRng;
    use crate::sim::state::{Elephant, Person, Platform, PlatformId, PowerUp};
    use proptest::prelude::*;

    const W: f32 = 800.0;
    const H: f32 = 600.0;
    /// Top of the test ground
    const GROUND_Y: f32 = H - GROUND_HEIGHT;

    /// Ground-only world with the player standing at x = 300 and one dry
    /// bystander (people[0]) far out of splash reach, so the level stays open
    fn world() -> World {
        let level = Level {
            platforms: vec![Platform {
                rect: Rect::new(0.0, GROUND_Y, W, GROUND_HEIGHT),
            }],
            people: vec![person_at(650.0)],
            ..Level::default()
        };
        let mut world = World::new(W, H, level);
        world.player.rect.x = 300.0;
        world.player.rect.y = GROUND_Y - PLAYER_SIZE;
        world
    }

    fn person_at(x: f32) -> Person {
        Person {
            rect: Rect::new(x, GROUND_Y - PERSON_SIZE, PERSON_SIZE, PERSON_SIZE),
            vx: PERSON_SPEED,
            platform: PlatformId::GROUND,
            wet: false,
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn holding_left() -> TickInput {
        TickInput {
            move_left: true,
            ..Default::default()
        }
    }

    fn holding_right() -> TickInput {
        TickInput {
            move_right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_intent_sets_velocity_directly() {
        let mut w = world();
        tick(&mut w, &holding_left(), 0.016);
        assert_eq!(w.player.vel.x, -PLAYER_SPEED);
        assert_eq!(w.player.rect.x, 295.0);

        tick(&mut w, &idle(), 0.016);
        assert_eq!(w.player.vel.x, 0.0);
        assert_eq!(w.player.rect.x, 295.0);
    }

    #[test]
    fn test_speed_boost_doubles_speed() {
        let mut w = world();
        w.player.speed_boost = true;
        tick(&mut w, &holding_right(), 0.016);
        assert_eq!(w.player.rect.x, 310.0);
    }

    #[test]
    fn test_physics_ignores_elapsed_time() {
        let mut fast = world();
        let mut slow = world();
        fast.player.rect.y = 100.0;
        slow.player.rect.y = 100.0;

        for _ in 0..5 {
            tick(&mut fast, &idle(), 1.0 / 144.0);
            tick(&mut slow, &idle(), 1.0 / 30.0);
        }
        assert_eq!(fast.player.rect, slow.player.rect);
        assert_eq!(fast.player.vel, slow.player.vel);
        // 0.5 + 1.0 + 1.5 + 2.0 + 2.5
        assert_eq!(fast.player.rect.y, 107.5);
    }

    #[test]
    fn test_standing_on_ground_is_stable() {
        let mut w = world();
        for _ in 0..10 {
            tick(&mut w, &idle(), 0.016);
        }
        assert_eq!(w.player.rect.bottom(), GROUND_Y);
        assert!(w.player.on_ground);
        assert_eq!(w.player.vel.y, 0.0);
    }

    #[test]
    fn test_airborne_player_not_grounded() {
        let mut w = world();
        w.player.rect.y = 100.0;
        tick(&mut w, &idle(), 0.016);
        assert!(!w.player.on_ground);
    }

    #[test]
    fn test_grounded_restores_double_jump() {
        let mut w = world();
        w.player.can_double_jump = false;
        tick(&mut w, &idle(), 0.016);
        assert!(w.player.on_ground);
        assert!(w.player.can_double_jump);
    }

    #[test]
    fn test_world_floor_catches_player_without_ground() {
        let mut w = world();
        w.level.platforms.clear();
        w.player.rect.y = H - PLAYER_SIZE;
        w.player.can_double_jump = false;
        tick(&mut w, &idle(), 0.016);
        assert_eq!(w.player.rect.bottom(), H);
        assert!(w.player.on_ground);
        assert!(w.player.can_double_jump);
    }

    #[test]
    fn test_player_clamped_horizontally() {
        let mut w = world();
        w.player.rect.x = 2.0;
        tick(&mut w, &holding_left(), 0.016);
        assert_eq!(w.player.rect.x, 0.0);

        w.player.rect.x = W - PLAYER_SIZE - 1.0;
        tick(&mut w, &holding_right(), 0.016);
        assert_eq!(w.player.rect.x, W - PLAYER_SIZE);
    }

    #[test]
    fn test_refill_at_well_counts_once() {
        let mut w = world();
        w.level.platforms.clear();
        w.player.rect.x = w.well.x + 20.0;
        w.player.rect.y = w.well.y + 10.0;
        w.player.water_level = 40.0;

        tick(&mut w, &idle(), 0.016);
        assert_eq!(w.player.water_level, 100.0);
        assert!(w.player.has_bucket);
        assert_eq!(w.drain_events(), vec![GameEvent::Refilled]);

        tick(&mut w, &idle(), 0.016);
        assert_eq!(w.player.water_level, 100.0);
        assert!(w.drain_events().is_empty());
    }

    #[test]
    fn test_splash_reaches_exactly_touching_person() {
        let mut w = world();
        // Widened right edge lands exactly on the player's left edge
        w.level.people.push(person_at(300.0 - SPLASH_MARGIN - PERSON_SIZE));
        request_splash(&mut w);

        tick(&mut w, &idle(), 0.016);

        assert!(w.level.people[1].wet);
        assert_eq!(w.level.people[1].vx, 0.0);
        assert!(!w.level.people[0].wet);
        assert_eq!(w.player.water_level, 80.0);
        assert_eq!(w.drain_events(), vec![GameEvent::Soaked { person: 1 }]);
        assert!(!w.player.splash_pending);
        assert_eq!(w.player.splash_cooldown, SPLASH_COOLDOWN);
    }

    #[test]
    fn test_splash_misses_person_out_of_reach() {
        let mut w = world();
        w.level
            .people
            .push(person_at(300.0 - SPLASH_MARGIN - PERSON_SIZE - 1.0));
        request_splash(&mut w);

        tick(&mut w, &idle(), 0.016);

        assert!(!w.level.people[1].wet);
        assert_eq!(w.player.water_level, 100.0);
        // Still spent
        assert!(!w.player.splash_pending);
        assert_eq!(w.player.splash_cooldown, SPLASH_COOLDOWN);
    }

    #[test]
    fn test_splash_cost_floors_at_zero() {
        let mut w = world();
        w.player.water_level = 10.0;
        w.level.people.push(person_at(320.0));
        w.level.people.push(person_at(280.0));
        request_splash(&mut w);

        tick(&mut w, &idle(), 0.016);

        assert!(w.level.people[1].wet && w.level.people[2].wet);
        assert_eq!(w.player.water_level, 0.0);
    }

    #[test]
    fn test_splash_waits_for_cooldown() {
        let mut w = world();
        w.level.people.push(person_at(320.0));
        w.player.splash_cooldown = 0.5;
        request_splash(&mut w);

        tick(&mut w, &idle(), 0.25);
        assert!(!w.level.people[1].wet);
        assert!(w.player.splash_pending);

        tick(&mut w, &idle(), 0.25);
        assert!(w.level.people[1].wet);
        assert!(!w.player.splash_pending);
    }

    #[test]
    fn test_empty_bucket_cannot_splash() {
        let mut w = world();
        w.player.water_level = 0.0;
        w.level.people.push(person_at(320.0));
        request_splash(&mut w);

        tick(&mut w, &idle(), 0.016);
        assert!(!w.level.people[1].wet);
        assert!(w.player.splash_pending);
    }

    #[test]
    fn test_wet_people_stop_patrolling() {
        let mut w = world();
        let mut soaked = person_at(100.0);
        soaked.wet = true;
        soaked.vx = 0.0;
        w.level.people.push(soaked);

        tick(&mut w, &idle(), 0.016);
        assert_eq!(w.level.people[0].rect.x, 650.5);
        assert_eq!(w.level.people[1].rect.x, 100.0);
    }

    #[test]
    fn test_elephant_empties_bucket_every_tick() {
        let mut w = world();
        w.level.elephants.push(Elephant {
            rect: Rect::new(
                320.0,
                GROUND_Y - ELEPHANT_HEIGHT,
                ELEPHANT_WIDTH,
                ELEPHANT_HEIGHT,
            ),
            vx: 0.5,
            platform: PlatformId::GROUND,
        });
        w.player.water_level = 60.0;

        tick(&mut w, &idle(), 0.016);
        assert_eq!(w.player.water_level, 0.0);
        assert_eq!(w.drain_events(), vec![GameEvent::Trampled]);

        // Refilled by some other means, still standing in the elephant
        w.player.water_level = 100.0;
        tick(&mut w, &idle(), 0.016);
        assert_eq!(w.player.water_level, 0.0);
    }

    #[test]
    fn test_power_up_pickup_is_one_time() {
        let mut w = world();
        w.level.power_ups.push(PowerUp {
            rect: Rect::new(310.0, GROUND_Y - POWER_UP_SIZE, POWER_UP_SIZE, POWER_UP_SIZE),
            kind: PowerUpKind::Jump,
            active: true,
        });

        tick(&mut w, &idle(), 0.016);
        assert!(w.player.jump_boost);
        assert!(!w.player.speed_boost);
        assert!(!w.level.power_ups[0].active);
        assert_eq!(
            w.drain_events(),
            vec![GameEvent::PowerUpCollected(PowerUpKind::Jump)]
        );

        tick(&mut w, &idle(), 0.016);
        assert!(w.drain_events().is_empty());
    }

    #[test]
    fn test_win_is_reported_once_and_sticks() {
        let mut w = world();
        w.level.people[0] = person_at(320.0);
        request_splash(&mut w);

        tick(&mut w, &idle(), 0.016);
        assert!(w.is_won());
        let events = w.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Won).count(), 1);

        // Frozen from here on
        let frozen = w.player.clone();
        for _ in 0..10 {
            tick(&mut w, &holding_right(), 0.016);
            assert!(w.is_won());
        }
        assert_eq!(w.player, frozen);
        assert!(w.drain_events().is_empty());
    }

    #[test]
    fn test_empty_level_is_won_without_event() {
        let mut w = world();
        w.level.people.clear();
        w.level.won = w.level.all_people_wet();
        tick(&mut w, &idle(), 0.016);
        assert!(w.is_won());
        assert!(w.drain_events().is_empty());
    }

    #[test]
    fn test_jump_from_ground_keeps_double_jump() {
        let mut w = world();
        w.player.on_ground = true;
        jump(&mut w);
        assert_eq!(w.player.vel.y, JUMP_FORCE);
        assert!(w.player.can_double_jump);
    }

    #[test]
    fn test_double_jump_is_single_use() {
        let mut w = world();
        w.player.on_ground = false;
        w.player.can_double_jump = true;
        w.player.vel.y = 3.0;

        jump(&mut w);
        assert_eq!(w.player.vel.y, JUMP_FORCE);
        assert!(!w.player.can_double_jump);

        w.player.vel.y = 3.0;
        jump(&mut w);
        assert_eq!(w.player.vel.y, 3.0);
    }

    #[test]
    fn test_jump_boost_doubles_impulse() {
        let mut w = world();
        w.player.jump_boost = true;
        jump(&mut w);
        assert_eq!(w.player.vel.y, JUMP_FORCE * 2.0);
    }

    #[test]
    fn test_jump_then_tick_leaves_ground() {
        let mut w = world();
        jump(&mut w);
        tick(&mut w, &idle(), 0.016);
        assert!(!w.player.on_ground);
        assert_eq!(w.player.vel.y, JUMP_FORCE + GRAVITY);
        assert_eq!(w.player.rect.y, GROUND_Y - PLAYER_SIZE + JUMP_FORCE + GRAVITY);
    }

    proptest! {
        #[test]
        fn prop_patrols_stay_on_their_platforms(seed in any::<u64>(), steps in 1usize..600) {
            let level = generate(1280.0, 720.0, &LevelConfig::default(), &mut LevelRng::new(seed)).unwrap();
            let mut w = World::new(1280.0, 720.0, level);

            for _ in 0..steps {
                tick(&mut w, &TickInput::default(), 1.0 / 60.0);
                for person in w.level.people.iter().filter(|p| !p.wet) {
                    let p = w.level.platforms[person.platform.0].rect;
                    prop_assert!(person.rect.x >= p.x);
                    prop_assert!(person.rect.x <= p.right() - person.rect.width);
                }
                for elephant in &w.level.elephants {
                    let p = w.level.platforms[elephant.platform.0].rect;
                    prop_assert!(elephant.rect.x >= p.x);
                    prop_assert!(elephant.rect.x <= p.right() - elephant.rect.width);
                }
            }
        }

        #[test]
        fn prop_grounded_implies_double_jump(seed in any::<u64>(), moves in proptest::collection::vec(0u8..4, 1..200)) {
            let level = generate(1024.0, 768.0, &LevelConfig::default(), &mut LevelRng::new(seed)).unwrap();
            let mut w = World::new(1024.0, 768.0, level);

            for m in moves {
                match m {
                    0 => jump(&mut w),
                    1 => request_splash(&mut w),
                    _ => {}
                }
                let input = TickInput { move_left: m == 2, move_right: m == 3 };
                tick(&mut w, &input, 1.0 / 60.0);
                if w.player.on_ground {
                    prop_assert!(w.player.can_double_jump);
                }
                prop_assert!(w.player.water_level >= 0.0);
            }
        }

        #[test]
        fn prop_water_never_negative(start in 0f32..=100.0, people in 0usize..6) {
            let mut w = world();
            w.player.water_level = start;
            for i in 0..people {
                w.level.people.push(person_at(260.0 + i as f32 * 10.0));
            }
            request_splash(&mut w);
            tick(&mut w, &TickInput::default(), 0.016);

            let soaked = w.level.people.iter().filter(|p| p.wet).count() as f32;
            prop_assert!(w.player.water_level >= 0.0);
            if start > 0.0 {
                let expected = (start - soaked * SPLASH_COST).max(0.0);
                prop_assert!((w.player.water_level - expected).abs() < 1e-3);
            }
        }
    }
}
