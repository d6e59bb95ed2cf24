//! Collider shapes and the overlap test between two placed shapes.
//!
//! Shapes wrap a rapier [`Collider`]: a ball, or the convex hull of texture
//! outline points.  Overlaps are resolved by parry's contact query, so the
//! contact point does not depend on which shape is passed first.

use crate::error::{GameError, GameResult};
use bevy::math::{Quat, Vec2};
use bevy::transform::components::Transform;
use bevy_rapier2d::parry::query;
use bevy_rapier2d::prelude::Collider;
use bevy_rapier2d::rapier::math::{Isometry, Real};
use std::fmt;

/// Collider geometry in body-local space.
#[derive(Clone)]
pub struct Shape {
    collider: Collider,
    bounding_radius: f32,
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        Self {
            collider: Collider::ball(radius),
            bounding_radius: radius,
        }
    }

    /// Build a convex outline from arbitrary local-space points.
    pub fn outline(points: &[Vec2]) -> GameResult<Self> {
        let invalid = GameError::InvalidOutline {
            points: points.len(),
        };
        if !spans_area(points) {
            return Err(invalid);
        }
        let collider = Collider::convex_hull(points).ok_or(invalid)?;
        Ok(Self {
            collider,
            bounding_radius: points.iter().map(|p| p.length()).fold(0.0, f32::max),
        })
    }

    /// Radius of the smallest origin-centred circle containing the shape.
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("kind", &self.collider.raw.shape_type())
            .field("bounding_radius", &self.bounding_radius)
            .finish()
    }
}

/// Three or more points that are not all on one line.
fn spans_area(points: &[Vec2]) -> bool {
    let Some(&origin) = points.first() else {
        return false;
    };
    let Some(axis) = points.iter().map(|&p| p - origin).find(|d| *d != Vec2::ZERO) else {
        return false;
    };
    points
        .iter()
        .any(|&p| axis.perp_dot(p - origin).abs() > f32::EPSILON)
}

/// A shape placed in the world.
#[derive(Debug, Clone, Copy)]
pub struct PlacedShape<'a> {
    pub shape: &'a Shape,
    pub position: Vec2,
    pub rotation: f32,
}

impl<'a> PlacedShape<'a> {
    pub fn new(shape: &'a Shape, position: Vec2, rotation: f32) -> Self {
        Self {
            shape,
            position,
            rotation,
        }
    }

    fn transform(&self) -> Transform {
        Transform::from_translation(self.position.extend(0.0))
            .with_rotation(Quat::from_rotation_z(self.rotation))
    }
}

/// Converts a Bevy transform to a Rapier isometry.
///
/// Same conversion as `bevy_rapier2d::utils::transform_to_iso`, which is
/// `pub(crate)` upstream.
fn transform_to_iso(transform: &Transform) -> Isometry<Real> {
    use bevy::math::Vec3Swizzles;
    Isometry::new(
        transform.translation.xy().into(),
        transform.rotation.to_scaled_axis().z,
    )
}

/// Overlap test between two placed shapes.
///
/// Returns the midpoint of the two deepest surface points when the shapes
/// penetrate.  Touching without overlap is not a contact.
pub fn intersect(a: PlacedShape<'_>, b: PlacedShape<'_>) -> Option<Vec2> {
    let pose_a = transform_to_iso(&a.transform());
    let pose_b = transform_to_iso(&b.transform());
    let contact = query::contact(
        &pose_a,
        &*a.shape.collider.raw,
        &pose_b,
        &*b.shape.collider.raw,
        0.0,
    )
    .ok()
    .flatten()?;
    if contact.dist >= 0.0 {
        return None;
    }
    let on_a = Vec2::new(contact.point1.x, contact.point1.y);
    let on_b = Vec2::new(contact.point2.x, contact.point2.y);
    Some((on_a + on_b) * 0.5)
}
