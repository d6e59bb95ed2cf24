//! Spawn selection for the rocket and the cheese.
//!
//! Positions are rolled once per level and kept across retries; see
//! [`crate::session::GameSession::restart`].

use crate::config::GameConfig;
use crate::constants::PLANET_CENTER;
use crate::error::{GameError, GameResult};
use crate::geometry::{distance, farthest_corner, random_point_in_rect};
use bevy::log::warn;
use bevy::math::{Rect, Vec2};
use rand::Rng;

/// Rocket and cheese positions for one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnConfig {
    pub rocket: Vec2,
    pub cheese: Vec2,
}

/// Rejection-sample a rocket position in `rect` at least `exclusion` away
/// from `center`.
///
/// After `max_attempts` misses the rectangle corner farthest from `center`
/// is used if it is far enough; otherwise sampling is reported exhausted.
pub fn pick_rocket_spawn<R: Rng + ?Sized>(
    rng: &mut R,
    rect: Rect,
    center: Vec2,
    exclusion: f32,
    max_attempts: u32,
) -> GameResult<Vec2> {
    for _ in 0..max_attempts {
        let candidate = random_point_in_rect(rng, rect);
        if distance(candidate, center) >= exclusion {
            return Ok(candidate);
        }
    }

    let corner = farthest_corner(rect, center);
    if distance(corner, center) >= exclusion {
        warn!(
            "Rocket spawn sampling missed {} times; using corner {:?}",
            max_attempts, corner
        );
        return Ok(corner);
    }
    Err(GameError::SpawnExhausted {
        attempts: max_attempts,
    })
}

/// Cheese position derived from the rocket spawn:
/// `(offset + cos(y / x)·r, offset + sin(x / y)·r)` with `r ∈ [0, max_radius)`.
///
/// A rocket on either axis makes one of the ratios undefined and is
/// rejected as degenerate.
pub fn pick_cheese_spawn<R: Rng + ?Sized>(
    rng: &mut R,
    rocket: Vec2,
    max_radius: f32,
    offset: f32,
) -> GameResult<Vec2> {
    if rocket.x == 0.0 || rocket.y == 0.0 {
        return Err(GameError::DegenerateRocketSpawn { position: rocket });
    }
    let r = rng.gen_range(0.0..max_radius);
    let cheese = Vec2::new(
        offset + (rocket.y / rocket.x).cos() * r,
        offset + (rocket.x / rocket.y).sin() * r,
    );
    if !cheese.is_finite() {
        return Err(GameError::DegenerateRocketSpawn { position: rocket });
    }
    Ok(cheese)
}

/// Roll a full level layout, re-rolling the rocket while it is degenerate.
pub fn pick_spawn_config<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
) -> GameResult<SpawnConfig> {
    let mut last_err = GameError::SpawnExhausted {
        attempts: config.max_spawn_attempts,
    };
    for _ in 0..config.max_spawn_attempts {
        let rocket = pick_rocket_spawn(
            rng,
            config.spawn_rect(),
            PLANET_CENTER,
            config.spawn_exclusion_radius,
            config.max_spawn_attempts,
        )?;
        match pick_cheese_spawn(
            rng,
            rocket,
            config.cheese_spawn_max_radius,
            config.cheese_spawn_offset,
        ) {
            Ok(cheese) => return Ok(SpawnConfig { rocket, cheese }),
            Err(e) => {
                warn!("{e}; re-rolling rocket spawn");
                last_err = e;
            }
        }
    }
    Err(last_err)
}
