//! Simulated bodies.

use super::shape::{PlacedShape, Shape};
use bevy::math::Vec2;

/// Whether a body is moved by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    /// Never moves; velocity is ignored.
    Static,
}

/// A rigid body with a single collider.
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Sprite rotation (radians, counter-clockwise).
    pub rotation: f32,
    pub shape: Shape,
    pub mass: f32,
    pub kind: BodyKind,
    /// Cleared when the body is removed from the simulation.
    pub alive: bool,
}

impl Body {
    pub fn dynamic(position: Vec2, shape: Shape, mass: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            shape,
            mass,
            kind: BodyKind::Dynamic,
            alive: true,
        }
    }

    pub fn fixed(position: Vec2, shape: Shape) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            shape,
            mass: f32::INFINITY,
            kind: BodyKind::Static,
            alive: true,
        }
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    /// Collider placed at the body's current pose.
    pub fn placed(&self) -> PlacedShape<'_> {
        PlacedShape::new(&self.shape, self.position, self.rotation)
    }

    /// Advance position by `velocity · dt`.  Static and dead bodies stay put.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_dynamic() && self.alive {
            self.position += self.velocity * dt;
        }
    }
}
