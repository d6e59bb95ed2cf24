//! Radial gravity field.

use bevy::math::Vec2;

/// Radial pull toward `center` with magnitude
/// `strength / max(distance, min_distance)^falloff`.
///
/// Created disabled; the first launch impulse switches it on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub center: Vec2,
    pub strength: f32,
    pub falloff: f32,
    pub min_distance: f32,
    pub enabled: bool,
}

impl GravityField {
    pub fn radial(center: Vec2, strength: f32, falloff: f32, min_distance: f32) -> Self {
        Self {
            center,
            strength,
            falloff,
            min_distance,
            enabled: false,
        }
    }

    /// Acceleration felt by a body at `position`.  Zero while disabled and
    /// exactly at the centre, where the direction is undefined.
    pub fn acceleration_at(&self, position: Vec2) -> Vec2 {
        if !self.enabled {
            return Vec2::ZERO;
        }
        let delta = self.center - position;
        let dist = delta.length();
        if dist == 0.0 {
            return Vec2::ZERO;
        }
        let magnitude = self.strength / dist.max(self.min_distance).powf(self.falloff);
        delta / dist * magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> GravityField {
        GravityField::radial(Vec2::ZERO, 1000.0, 2.0, 5.0)
    }

    #[test]
    fn disabled_field_exerts_nothing() {
        assert_eq!(field().acceleration_at(Vec2::new(10.0, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn pull_points_at_center_with_inverse_square_magnitude() {
        let mut f = field();
        f.enabled = true;
        let a = f.acceleration_at(Vec2::new(10.0, 0.0));
        assert!((a - Vec2::new(-10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn close_range_is_clamped() {
        let mut f = field();
        f.enabled = true;
        let near = f.acceleration_at(Vec2::new(1.0, 0.0)).length();
        // Clamped to min_distance = 5 → 1000 / 25.
        assert!((near - 40.0).abs() < 1e-3);
        assert_eq!(f.acceleration_at(Vec2::ZERO), Vec2::ZERO);
    }
}
