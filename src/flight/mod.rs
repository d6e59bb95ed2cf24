//! Rocket flight model: bodies, colliders, the radial gravity field and the
//! world that steps them.

pub mod body;
pub mod field;
pub mod shape;
pub mod world;

pub use body::{Body, BodyKind};
pub use field::GravityField;
pub use shape::{intersect, PlacedShape, Shape};
pub use world::{ContactEvent, PhysicsWorld};
