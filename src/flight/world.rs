//! The physics world: one dynamic rocket, one static planet, one radial field.

use super::body::Body;
use super::field::GravityField;
use super::shape::intersect;
use crate::geometry::heading_rotation;
use bevy::math::Vec2;

/// Rocket/planet overlap reported by [`PhysicsWorld::detect_contact`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    /// World-space contact point.
    pub point: Vec2,
}

/// Owns the two bodies and the gravity field.
///
/// The world performs no game-rule guarding of its own: callers decide when
/// an impulse is allowed (see [`crate::aim::AimController::on_release`]).
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    rocket: Body,
    planet: Body,
    field: GravityField,
}

impl PhysicsWorld {
    pub fn new(rocket: Body, planet: Body, field: GravityField) -> Self {
        Self {
            rocket,
            planet,
            field,
        }
    }

    /// Advance the rocket by `dt` seconds (semi-implicit Euler).
    ///
    /// Gravity changes the velocity first, then the position moves by the new
    /// velocity.  A moving rocket is turned to face its direction of travel.
    pub fn step(&mut self, dt: f32) {
        if !self.rocket.alive {
            return;
        }
        let accel = self.field.acceleration_at(self.rocket.position);
        self.rocket.velocity += accel * dt;
        self.rocket.integrate(dt);
        if let Some(rotation) = heading_rotation(self.rocket.velocity) {
            self.rocket.rotation = rotation;
        }
    }

    /// Add `impulse / mass` to the rocket velocity and switch the field on.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.rocket.alive {
            self.rocket.velocity += impulse / self.rocket.mass;
        }
        self.field.enabled = true;
    }

    /// Overlap test between rocket and planet colliders.
    pub fn detect_contact(&self) -> Option<ContactEvent> {
        if !self.rocket.alive {
            return None;
        }
        intersect(self.rocket.placed(), self.planet.placed()).map(|point| ContactEvent { point })
    }

    /// Take the rocket out of the simulation.
    pub fn remove_rocket(&mut self) {
        self.rocket.alive = false;
        self.rocket.velocity = Vec2::ZERO;
    }

    pub fn set_rocket_rotation(&mut self, rotation: f32) {
        if self.rocket.alive {
            self.rocket.rotation = rotation;
        }
    }

    /// The rocket while it is alive.
    pub fn rocket(&self) -> Option<&Body> {
        self.rocket.alive.then_some(&self.rocket)
    }

    pub fn rocket_position(&self) -> Option<Vec2> {
        self.rocket().map(|r| r.position)
    }

    pub fn planet(&self) -> &Body {
        &self.planet
    }

    pub fn field(&self) -> &GravityField {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::shape::Shape;

    fn world_at(rocket_pos: Vec2) -> PhysicsWorld {
        PhysicsWorld::new(
            Body::dynamic(rocket_pos, Shape::circle(10.0), 1.0),
            Body::fixed(Vec2::ZERO, Shape::circle(100.0)),
            GravityField::radial(Vec2::ZERO, 1.0e6, 2.0, 20.0),
        )
    }

    #[test]
    fn gravity_stays_off_until_impulse() {
        let mut world = world_at(Vec2::new(-300.0, 0.0));
        world.step(0.5);
        assert_eq!(world.rocket_position(), Some(Vec2::new(-300.0, 0.0)));
        assert!(!world.field().enabled);
    }

    #[test]
    fn impulse_adds_velocity_and_enables_field() {
        let mut world = world_at(Vec2::new(-300.0, 0.0));
        world.apply_impulse(Vec2::new(0.0, 50.0));
        assert!(world.field().enabled);
        assert_eq!(world.rocket().unwrap().velocity, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn impulse_is_divided_by_mass() {
        let mut world = PhysicsWorld::new(
            Body::dynamic(Vec2::new(-300.0, 0.0), Shape::circle(10.0), 0.5),
            Body::fixed(Vec2::ZERO, Shape::circle(100.0)),
            GravityField::radial(Vec2::ZERO, 1.0e6, 2.0, 20.0),
        );
        world.apply_impulse(Vec2::new(3.0, 0.0));
        assert_eq!(world.rocket().unwrap().velocity, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn step_applies_gravity_before_moving() {
        let mut world = world_at(Vec2::new(-1000.0, 0.0));
        world.apply_impulse(Vec2::ZERO);
        world.step(1.0);
        // a = 1e6 / 1000² = 1 toward +x; v = 1, x moves by 1.
        let rocket = world.rocket().unwrap();
        assert!((rocket.velocity.x - 1.0).abs() < 1e-4);
        assert!((rocket.position.x + 999.0).abs() < 1e-3);
    }

    #[test]
    fn moving_rocket_faces_velocity() {
        let mut world = world_at(Vec2::new(-300.0, 0.0));
        world.apply_impulse(Vec2::new(0.0, 1.0e4));
        world.step(0.001);
        let rotation = world.rocket().unwrap().rotation;
        // Mostly +Y travel, small pull toward +x: rotation just below zero.
        assert!(rotation < 0.0 && rotation > -0.1, "rotation = {rotation}");
    }

    #[test]
    fn contact_reported_when_overlapping() {
        let world = world_at(Vec2::new(-105.0, 0.0));
        let contact = world.detect_contact().expect("overlap");
        assert!((contact.point - Vec2::new(-97.5, 0.0)).length() < 1e-4);
    }

    #[test]
    fn removed_rocket_is_inert() {
        let mut world = world_at(Vec2::new(-105.0, 0.0));
        world.remove_rocket();
        assert!(world.detect_contact().is_none());
        assert!(world.rocket().is_none());
        world.step(1.0);
        assert!(world.rocket_position().is_none());
    }
}
