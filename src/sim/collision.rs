//! Collision detection and response for boxes
//!
//! Deliberately simple: any overlap with a platform snaps the player on top
//! of it, whatever direction the player came from.

use super::geometry::Rect;
use super::state::{Platform, PlatformId, Player};

/// Snap the player onto every platform it overlaps
///
/// Platforms resolve independently in order, so when several overlap the
/// last one wins. Returns the platform the player ended up on, if any.
pub fn resolve_platforms(player: &mut Player, platforms: &[Platform]) -> Option<PlatformId> {
    let mut landed = None;
    for (i, platform) in platforms.iter().enumerate() {
        if player.rect.intersects(&platform.rect) {
            player.land_on(platform.rect.y);
            landed = Some(PlatformId(i));
        }
    }
    landed
}

/// Keep the player inside the world horizontally and above its floor
///
/// Returns true if the player hit the floor.
pub fn clamp_to_world(player: &mut Player, width: f32, height: f32) -> bool {
    let max_x = (width - player.rect.width).max(0.0);
    player.rect.x = player.rect.x.clamp(0.0, max_x);

    if player.rect.bottom() > height {
        player.land_on(height);
        return true;
    }
    false
}

/// Advance a patrolling box along its platform, bouncing at the edges
///
/// The box never leaves `[platform.x, platform.right() - width]`: a step
/// that would cross an edge is clamped to it and the velocity flips.
/// Returns true if the box bounced.
pub fn patrol(rect: &mut Rect, vx: &mut f32, platform: &Rect) -> bool {
    rect.x += *vx;

    let min_x = platform.x;
    let max_x = (platform.right() - rect.width).max(min_x);
    if rect.x < min_x || rect.x > max_x {
        rect.x = rect.x.clamp(min_x, max_x);
        *vx = -*vx;
        return true;
    }
    false
}
