//! Centralised physics and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//!
//! ## Tuning guidance
//!
//! Every constant is mirrored by a field of [`crate::config::GameConfig`], so
//! `assets/gravity.toml` can override any of them without recompiling.  The
//! values here are the compiled defaults.

use bevy::math::Vec2;

// ── Window / View ─────────────────────────────────────────────────────────────

/// Logical window width in pixels.  With the default camera one pixel is one
/// world unit, so this is also the width of the visible world rectangle.
pub const WINDOW_WIDTH: u32 = 1024;

/// Logical window height in pixels.
pub const WINDOW_HEIGHT: u32 = 768;

// ── Simulation stepping ───────────────────────────────────────────────────────

/// Fixed integration substep (seconds).  A frame's `dt` is split into pieces no
/// longer than this so a fast rocket cannot skip over the planet collider.
pub const SIM_SUBSTEP: f32 = 1.0 / 120.0;

/// Maximum substeps per frame to prevent a spiral of death after a long stall.
pub const MAX_SUBSTEPS: u32 = 8;

// ── Planet ────────────────────────────────────────────────────────────────────

/// The planet sits at the world origin and never moves.
pub const PLANET_CENTER: Vec2 = Vec2::ZERO;

/// Collider radius of the planet (half of the 200 px planet sprite).
pub const PLANET_RADIUS: f32 = 100.0;

/// Rendered planet sprite edge length (px).
pub const PLANET_SPRITE_SIZE: f32 = 200.0;

// ── Gravity field ─────────────────────────────────────────────────────────────

/// Radial field strength (world units³/s² at the default falloff of 2).
///
/// At 4.0e6 the pull is ~44 u/s² at 300 u from the planet centre and ~178 u/s²
/// at 150 u, enough to bend a medium-power shot by a visible amount.
pub const GRAVITY_STRENGTH: f32 = 4.0e6;

/// Distance exponent of the field: acceleration = strength / distance^falloff.
pub const GRAVITY_FALLOFF: f32 = 2.0;

/// Distances below this are clamped before the falloff is applied so the pull
/// stays finite near the field centre.
pub const MIN_GRAVITY_DIST: f32 = 20.0;

// ── Rocket ────────────────────────────────────────────────────────────────────

/// Rendered rocket sprite edge length (px).  The texture points along +Y.
pub const ROCKET_SPRITE_SIZE: f32 = 100.0;

/// Rocket mass.  An impulse `J` changes the rocket velocity by `J / mass`.
pub const ROCKET_MASS: f32 = 0.2;

/// Circle collider radius used when no rocket outline is configured.
pub const ROCKET_COLLIDER_RADIUS: f32 = 22.0;

/// Local-space outline of the rocket texture (sprite faces +Y).  The collider
/// is the convex hull of these points and stays inside the sprite's half-size,
/// so a rocket outside [`SPAWN_EXCLUSION_RADIUS`] clears the planet at any
/// rotation.
pub const ROCKET_OUTLINE: [[f32; 2]; 7] = [
    [0.0, 46.0],
    [12.0, 22.0],
    [14.0, -28.0],
    [20.0, -42.0],
    [-20.0, -42.0],
    [-14.0, -28.0],
    [-12.0, 22.0],
];

// ── Aiming ────────────────────────────────────────────────────────────────────

/// Accumulated drag deltas are divided by this to obtain the launch impulse.
pub const IMPULSE_DIVISOR: f32 = 5.0;

// ── Spawn selection ───────────────────────────────────────────────────────────

/// Rocket spawn rectangle: x ∈ [SPAWN_MIN_X, SPAWN_MAX_X).
pub const SPAWN_MIN_X: f32 = -480.0;
pub const SPAWN_MAX_X: f32 = 0.0;

/// Rocket spawn rectangle: y ∈ [SPAWN_MIN_Y, SPAWN_MAX_Y).
pub const SPAWN_MIN_Y: f32 = -320.0;
pub const SPAWN_MAX_Y: f32 = 0.0;

/// Rocket spawns are rejected when closer than this to the planet centre.
pub const SPAWN_EXCLUSION_RADIUS: f32 = 150.0;

/// Rejection-sampling budget before the deterministic corner fallback is used.
///
/// With the default rectangle roughly 11.5 % of samples fall inside the
/// exclusion circle, so 64 consecutive rejections never happen in practice.
pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// The cheese is placed at `CHEESE_SPAWN_OFFSET` on both axes plus a random
/// radius below `CHEESE_SPAWN_MAX_RADIUS`.
pub const CHEESE_SPAWN_OFFSET: f32 = 150.0;
pub const CHEESE_SPAWN_MAX_RADIUS: f32 = 250.0;

// ── Goal / bounds ─────────────────────────────────────────────────────────────

/// The cheese counts as grabbed when the rocket centre is closer than this.
pub const GOAL_RADIUS: f32 = 40.0;

/// Seconds the rocket may stay outside the visible rectangle before the
/// retry prompts are shown.
pub const OUT_OF_BOUNDS_GRACE_SECS: f64 = 2.0;

// ── Cheese animation ──────────────────────────────────────────────────────────

pub const CHEESE_SIZE: f32 = 60.0;
pub const CHEESE_PULSE_SIZE: f32 = 80.0;

/// Duration of one half of the pulse (grow or shrink).
pub const CHEESE_PULSE_SECS: f32 = 0.5;

// ── Explosion ─────────────────────────────────────────────────────────────────

/// Explosion sprite: 1 px → `EXPLOSION_BURST_SIZE` in `EXPLOSION_BURST_SECS`,
/// then → `EXPLOSION_FINAL_SIZE` over `EXPLOSION_GROW_SECS`, then fades out
/// over `EXPLOSION_FADE_SECS` and is removed.
pub const EXPLOSION_START_SIZE: f32 = 1.0;
pub const EXPLOSION_BURST_SIZE: f32 = 90.0;
pub const EXPLOSION_FINAL_SIZE: f32 = 100.0;
pub const EXPLOSION_BURST_SECS: f32 = 0.05;
pub const EXPLOSION_GROW_SECS: f32 = 1.5;
pub const EXPLOSION_FADE_SECS: f32 = 0.5;

/// Number of debris particles thrown out by an explosion.
pub const EXPLOSION_PARTICLE_COUNT: u32 = 18;

// ── Labels ────────────────────────────────────────────────────────────────────

pub const RETRY_TEXT: &str = "Press 'space' to retry";
pub const RETRY_FONT_SIZE: f32 = 50.0;
pub const RETRY_POSITION: Vec2 = Vec2::new(0.0, 250.0);

pub const CHANGE_LEVEL_TEXT: &str = "Press 'enter' to try an other level";
pub const CHANGE_LEVEL_FONT_SIZE: f32 = 30.0;
pub const CHANGE_LEVEL_POSITION: Vec2 = Vec2::new(0.0, 200.0);

pub const VICTORY_TEXT: &str = "Toutou Youtou";
pub const VICTORY_FONT_SIZE: f32 = 120.0;

/// Victory label spin rate (radians per second).
pub const VICTORY_SPIN_RATE: f32 = std::f32::consts::PI;

pub const HUD_FONT_SIZE: f32 = 30.0;
pub const ANGLE_LABEL_POSITION: Vec2 = Vec2::new(250.0, -200.0);
pub const POWER_LABEL_POSITION: Vec2 = Vec2::new(250.0, -240.0);

// ── Assets ────────────────────────────────────────────────────────────────────

pub const ROCKET_TEXTURE: &str = "textures/rocket.png";
pub const PLANET_TEXTURE: &str = "textures/planet.png";
pub const CHEESE_TEXTURE: &str = "textures/cheese.png";
pub const EXPLOSION_TEXTURE: &str = "textures/explosion.png";
pub const BACKGROUND_MUSIC: &str = "audio/interstellar.ogg";
pub const VICTORY_MUSIC: &str = "audio/mariachi.ogg";
