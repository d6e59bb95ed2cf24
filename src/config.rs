//! Runtime game configuration loaded from `assets/gravity.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  `main` calls [`load_game_config`] before the app is
//! built and overwrites the defaults with any values present in the file.
//! Missing keys fall back to the compile-time defaults, so a minimal TOML can
//! override just the constants you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.goal_radius`, `config.gravity_strength`, etc.  The pure game
//! session keeps its own copy, handed over at construction.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/gravity.toml`.
//! 2. Restart the game; no recompilation required.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_non_negative, validate_positive, validate_range, GameError, GameResult,
};
use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;
use serde::Deserialize;
use std::path::Path;

/// Default location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/gravity.toml";

/// Runtime-tunable physics and gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Positions are `[x, y]` pairs so the TOML stays flat.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Window ────────────────────────────────────────────────────────────────
    pub window_width: u32,
    pub window_height: u32,

    // ── Stepping ──────────────────────────────────────────────────────────────
    pub sim_substep: f32,
    pub max_substeps: u32,

    // ── Planet & gravity ──────────────────────────────────────────────────────
    pub planet_radius: f32,
    pub planet_sprite_size: f32,
    pub gravity_strength: f32,
    pub gravity_falloff: f32,
    pub min_gravity_dist: f32,

    // ── Rocket ────────────────────────────────────────────────────────────────
    pub rocket_sprite_size: f32,
    pub rocket_mass: f32,
    pub rocket_collider_radius: f32,
    /// Convex outline points; empty means "use the circle collider".
    pub rocket_outline: Vec<[f32; 2]>,
    pub impulse_divisor: f32,

    // ── Spawn selection ───────────────────────────────────────────────────────
    pub spawn_min_x: f32,
    pub spawn_max_x: f32,
    pub spawn_min_y: f32,
    pub spawn_max_y: f32,
    pub spawn_exclusion_radius: f32,
    pub max_spawn_attempts: u32,
    pub cheese_spawn_offset: f32,
    pub cheese_spawn_max_radius: f32,

    // ── Goal / bounds ─────────────────────────────────────────────────────────
    pub goal_radius: f32,
    pub out_of_bounds_grace_secs: f64,

    // ── Animations ────────────────────────────────────────────────────────────
    pub cheese_size: f32,
    pub cheese_pulse_size: f32,
    pub cheese_pulse_secs: f32,
    pub explosion_particle_count: u32,
    pub victory_spin_rate: f32,

    // ── Labels ────────────────────────────────────────────────────────────────
    pub retry_text: String,
    pub retry_font_size: f32,
    pub retry_position: [f32; 2],
    pub change_level_text: String,
    pub change_level_font_size: f32,
    pub change_level_position: [f32; 2],
    pub victory_text: String,
    pub victory_font_size: f32,
    pub hud_font_size: f32,
    pub angle_label_position: [f32; 2],
    pub power_label_position: [f32; 2],

    // ── Assets (relative to the asset root) ───────────────────────────────────
    pub rocket_texture: String,
    pub planet_texture: String,
    pub cheese_texture: String,
    pub explosion_texture: String,
    pub background_music: String,
    pub victory_music: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Window
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            // Stepping
            sim_substep: SIM_SUBSTEP,
            max_substeps: MAX_SUBSTEPS,
            // Planet & gravity
            planet_radius: PLANET_RADIUS,
            planet_sprite_size: PLANET_SPRITE_SIZE,
            gravity_strength: GRAVITY_STRENGTH,
            gravity_falloff: GRAVITY_FALLOFF,
            min_gravity_dist: MIN_GRAVITY_DIST,
            // Rocket
            rocket_sprite_size: ROCKET_SPRITE_SIZE,
            rocket_mass: ROCKET_MASS,
            rocket_collider_radius: ROCKET_COLLIDER_RADIUS,
            rocket_outline: ROCKET_OUTLINE.to_vec(),
            impulse_divisor: IMPULSE_DIVISOR,
            // Spawn selection
            spawn_min_x: SPAWN_MIN_X,
            spawn_max_x: SPAWN_MAX_X,
            spawn_min_y: SPAWN_MIN_Y,
            spawn_max_y: SPAWN_MAX_Y,
            spawn_exclusion_radius: SPAWN_EXCLUSION_RADIUS,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            cheese_spawn_offset: CHEESE_SPAWN_OFFSET,
            cheese_spawn_max_radius: CHEESE_SPAWN_MAX_RADIUS,
            // Goal / bounds
            goal_radius: GOAL_RADIUS,
            out_of_bounds_grace_secs: OUT_OF_BOUNDS_GRACE_SECS,
            // Animations
            cheese_size: CHEESE_SIZE,
            cheese_pulse_size: CHEESE_PULSE_SIZE,
            cheese_pulse_secs: CHEESE_PULSE_SECS,
            explosion_particle_count: EXPLOSION_PARTICLE_COUNT,
            victory_spin_rate: VICTORY_SPIN_RATE,
            // Labels
            retry_text: RETRY_TEXT.to_owned(),
            retry_font_size: RETRY_FONT_SIZE,
            retry_position: RETRY_POSITION.to_array(),
            change_level_text: CHANGE_LEVEL_TEXT.to_owned(),
            change_level_font_size: CHANGE_LEVEL_FONT_SIZE,
            change_level_position: CHANGE_LEVEL_POSITION.to_array(),
            victory_text: VICTORY_TEXT.to_owned(),
            victory_font_size: VICTORY_FONT_SIZE,
            hud_font_size: HUD_FONT_SIZE,
            angle_label_position: ANGLE_LABEL_POSITION.to_array(),
            power_label_position: POWER_LABEL_POSITION.to_array(),
            // Assets
            rocket_texture: ROCKET_TEXTURE.to_owned(),
            planet_texture: PLANET_TEXTURE.to_owned(),
            cheese_texture: CHEESE_TEXTURE.to_owned(),
            explosion_texture: EXPLOSION_TEXTURE.to_owned(),
            background_music: BACKGROUND_MUSIC.to_owned(),
            victory_music: VICTORY_MUSIC.to_owned(),
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; keys that are absent keep their defaults.
    pub fn from_toml_str(contents: &str, path: &Path) -> GameResult<Self> {
        toml::from_str::<GameConfig>(contents).map_err(|e| GameError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Reject values that would make the simulation panic or misbehave.
    pub fn validate(&self) -> GameResult<()> {
        validate_positive("sim_substep", self.sim_substep)?;
        if self.max_substeps == 0 {
            return Err(GameError::UnsafeConstant {
                name: "max_substeps",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        validate_positive("planet_radius", self.planet_radius)?;
        validate_positive("gravity_strength", self.gravity_strength)?;
        validate_non_negative("gravity_falloff", self.gravity_falloff)?;
        validate_positive("min_gravity_dist", self.min_gravity_dist)?;
        validate_positive("rocket_mass", self.rocket_mass)?;
        validate_positive("rocket_collider_radius", self.rocket_collider_radius)?;
        validate_positive("impulse_divisor", self.impulse_divisor)?;
        validate_range("spawn_x", self.spawn_min_x, self.spawn_max_x)?;
        validate_range("spawn_y", self.spawn_min_y, self.spawn_max_y)?;
        validate_non_negative("spawn_exclusion_radius", self.spawn_exclusion_radius)?;
        // Aiming rotates the collider in place, so every spawn must clear the
        // planet at any rotation.
        if self.spawn_exclusion_radius < self.planet_radius + self.rocket_bounding_radius() {
            return Err(GameError::UnsafeConstant {
                name: "spawn_exclusion_radius",
                value: self.spawn_exclusion_radius,
                safe_range: "[planet_radius + rocket bounding radius, ∞)",
            });
        }
        if self.max_spawn_attempts == 0 {
            return Err(GameError::UnsafeConstant {
                name: "max_spawn_attempts",
                value: 0.0,
                safe_range: "[1, ∞)",
            });
        }
        validate_positive("cheese_spawn_max_radius", self.cheese_spawn_max_radius)?;
        validate_positive("goal_radius", self.goal_radius)?;
        validate_non_negative(
            "out_of_bounds_grace_secs",
            self.out_of_bounds_grace_secs as f32,
        )?;
        validate_positive("cheese_pulse_secs", self.cheese_pulse_secs)?;
        Ok(())
    }

    /// Rocket spawn rectangle.
    pub fn spawn_rect(&self) -> Rect {
        Rect::new(
            self.spawn_min_x,
            self.spawn_min_y,
            self.spawn_max_x,
            self.spawn_max_y,
        )
    }

    /// Rocket outline as vectors (local space).
    pub fn rocket_outline_points(&self) -> Vec<Vec2> {
        self.rocket_outline.iter().map(|&p| Vec2::from_array(p)).collect()
    }

    /// Farthest reach of the rocket collider from its centre.
    pub fn rocket_bounding_radius(&self) -> f32 {
        if self.rocket_outline.is_empty() {
            return self.rocket_collider_radius;
        }
        self.rocket_outline
            .iter()
            .map(|&p| Vec2::from_array(p).length())
            .fold(0.0, f32::max)
    }

    pub fn retry_position(&self) -> Vec2 {
        Vec2::from_array(self.retry_position)
    }

    pub fn change_level_position(&self) -> Vec2 {
        Vec2::from_array(self.change_level_position)
    }

    pub fn angle_label_position(&self) -> Vec2 {
        Vec2::from_array(self.angle_label_position)
    }

    pub fn power_label_position(&self) -> Vec2 {
        Vec2::from_array(self.power_label_position)
    }

    /// Every asset path the game needs, in load order.
    pub fn asset_paths(&self) -> [&str; 6] {
        [
            self.rocket_texture.as_str(),
            self.planet_texture.as_str(),
            self.cheese_texture.as_str(),
            self.explosion_texture.as_str(),
            self.background_music.as_str(),
            self.victory_music.as_str(),
        ]
    }
}

/// Read `path` and overwrite the defaults with any values present in the file.
///
/// A missing file is not an error: the compiled defaults are returned.  A file
/// that exists but cannot be read or parsed is reported to the caller, which
/// logs it and keeps the defaults.
pub fn load_game_config(path: &Path) -> GameResult<GameConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let config = GameConfig::from_toml_str(&contents, path)?;
            println!("✓ Loaded game config from {}", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // File not present: defaults are the intended fallback.
            println!("ℹ No {} found; using compiled defaults", path.display());
            Ok(GameConfig::default())
        }
        Err(e) => Err(GameError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}
