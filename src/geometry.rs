//! Vector helpers shared by the flight model, the aim controller and spawn
//! selection.

use bevy::math::{Rect, Vec2};
use rand::Rng;
use std::f32::consts::FRAC_PI_2;

/// Uniform random point in the half-open rectangle `[min.x, max.x) × [min.y, max.y)`.
///
/// The rectangle must be non-empty on both axes (see
/// [`crate::config::GameConfig::validate`]).
pub fn random_point_in_rect<R: Rng + ?Sized>(rng: &mut R, rect: Rect) -> Vec2 {
    Vec2::new(
        rng.gen_range(rect.min.x..rect.max.x),
        rng.gen_range(rect.min.y..rect.max.y),
    )
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Corner of `rect` farthest from `from`.
pub fn farthest_corner(rect: Rect, from: Vec2) -> Vec2 {
    let corners = [
        rect.min,
        Vec2::new(rect.max.x, rect.min.y),
        rect.max,
        Vec2::new(rect.min.x, rect.max.y),
    ];
    let mut best = corners[0];
    for &corner in &corners[1..] {
        if distance(corner, from) > distance(best, from) {
            best = corner;
        }
    }
    best
}

/// Sprite rotation for a body moving with `velocity`.
///
/// Textures point along +Y, so the heading angle is shifted by −90°.
/// Returns `None` for a body at rest, whose rotation must be left alone.
pub fn heading_rotation(velocity: Vec2) -> Option<f32> {
    if velocity == Vec2::ZERO {
        return None;
    }
    Some(velocity.y.atan2(velocity.x) - FRAC_PI_2)
}

/// Aim angle (radians) for an accumulated drag delta in screen orientation
/// (+Y pointing down): `atan2(−dy, dx) + 90°`.
pub fn aim_angle(delta: Vec2) -> f32 {
    (-delta.y).atan2(delta.x) + FRAC_PI_2
}

/// Round to `decimals` places for display.
pub fn round_to(value: f32, decimals: i32) -> f32 {
    let scale = 10f32.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_points_stay_inside_half_open_rect() {
        let mut rng = StdRng::seed_from_u64(7);
        let rect = Rect::new(-480.0, -320.0, 0.0, 0.0);
        for _ in 0..500 {
            let p = random_point_in_rect(&mut rng, rect);
            assert!(p.x >= -480.0 && p.x < 0.0, "x={} out of range", p.x);
            assert!(p.y >= -320.0 && p.y < 0.0, "y={} out of range", p.y);
        }
    }

    #[test]
    fn farthest_corner_of_spawn_rect_from_origin() {
        let rect = Rect::new(-480.0, -320.0, 0.0, 0.0);
        assert_eq!(farthest_corner(rect, Vec2::ZERO), Vec2::new(-480.0, -320.0));
    }

    #[test]
    fn heading_points_sprite_along_velocity() {
        // Moving straight up: sprite already faces +Y, no rotation.
        let up = heading_rotation(Vec2::new(0.0, 5.0)).unwrap();
        assert!(up.abs() < 1e-6);
        // Moving right: rotate clockwise by 90°.
        let right = heading_rotation(Vec2::new(3.0, 0.0)).unwrap();
        assert!((right + FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn resting_body_has_no_heading() {
        assert!(heading_rotation(Vec2::ZERO).is_none());
    }

    #[test]
    fn aim_angle_for_horizontal_drag() {
        // A rightward drag yields a 90° aim angle.
        let angle = aim_angle(Vec2::new(10.0, 0.0));
        assert!((angle - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn round_to_two_decimals() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(2.675, 1), 2.7);
    }
}
