//! Gravity Rocket library
//!
//! Sling a rocket around a planet's gravity well to reach the cheese.  The
//! game rules live in [`session::GameSession`] and run without a window; the
//! Bevy plugins feed it input and time and render what it reports.

pub mod aim;
pub mod assets;
pub mod config;
pub mod constants;
pub mod director;
pub mod effects;
pub mod error;
pub mod flight;
pub mod geometry;
pub mod graphics;
pub mod hud;
pub mod input;
pub mod level;
pub mod particles;
pub mod scene;
pub mod session;
pub mod simulation;
