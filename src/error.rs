//! Game-specific error types.
//!
//! Setup code propagates these through [`GameResult`]; `main` turns them into
//! a failing exit code instead of letting the game run with missing visuals.
//! Per-frame code never produces them except for spawn re-rolls, which the
//! caller logs and recovers from.
//!
//! ## Usage
//!
//! ```rust
//! use gravity_rocket::error::{GameError, GameResult};
//!
//! fn require_attempts(attempts: u32) -> GameResult<()> {
//!     if attempts == 0 {
//!         return Err(GameError::SpawnExhausted { attempts });
//!     }
//!     Ok(())
//! }
//! # assert!(require_attempts(1).is_ok());
//! ```

use bevy::math::Vec2;
use std::fmt;
use std::path::PathBuf;

/// Top-level error enum for the game.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// An asset file required at startup does not exist on disk.
    AssetMissing {
        /// Full path that was checked.
        path: PathBuf,
    },

    /// The asset server reported a load failure for a file that exists.
    AssetLoadFailed {
        /// Asset path relative to the asset root.
        path: String,
        /// Loader error message.
        reason: String,
    },

    /// The config file exists but could not be read.
    ConfigRead { path: PathBuf, reason: String },

    /// The config file is not valid TOML for [`crate::config::GameConfig`].
    ConfigParse { path: PathBuf, reason: String },

    /// Config value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the config field (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// Rejection sampling ran out of attempts and the fallback corner is also
    /// inside the exclusion radius.
    SpawnExhausted { attempts: u32 },

    /// The cheese formula divides rocket coordinates; a zero coordinate makes
    /// it undefined.
    DegenerateRocketSpawn { position: Vec2 },

    /// A collider outline needs at least three non-collinear points.
    InvalidOutline { points: usize },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AssetMissing { path } => {
                write!(f, "required asset '{}' does not exist", path.display())
            }
            GameError::AssetLoadFailed { path, reason } => {
                write!(f, "failed to load asset '{}': {}", path, reason)
            }
            GameError::ConfigRead { path, reason } => {
                write!(f, "cannot read config '{}': {}", path.display(), reason)
            }
            GameError::ConfigParse { path, reason } => {
                write!(f, "cannot parse config '{}': {}", path.display(), reason)
            }
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            GameError::SpawnExhausted { attempts } => write!(
                f,
                "no rocket spawn outside the exclusion radius after {} attempts",
                attempts
            ),
            GameError::DegenerateRocketSpawn { position } => write!(
                f,
                "rocket spawn ({}, {}) has a zero coordinate; cheese placement is undefined",
                position.x, position.y
            ),
            GameError::InvalidOutline { points } => write!(
                f,
                "collider outline needs at least 3 non-collinear points, got {}",
                points
            ),
        }
    }
}

impl std::error::Error for GameError {}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is finite and strictly positive.
pub fn validate_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and not negative.
pub fn validate_non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error unless `min < max`, so `gen_range(min..max)` cannot panic.
pub fn validate_range(name: &'static str, min: f32, max: f32) -> GameResult<()> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value: max - min,
            safe_range: "min < max",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(validate_positive("x", 1.0).is_ok());
        assert!(validate_positive("x", 0.0).is_err());
        assert!(validate_positive("x", f32::NAN).is_err());
    }

    #[test]
    fn range_requires_strict_order() {
        assert!(validate_range("r", -1.0, 0.0).is_ok());
        assert!(validate_range("r", 0.0, 0.0).is_err());
        assert!(validate_range("r", 1.0, 0.0).is_err());
    }

    #[test]
    fn display_names_the_constant() {
        let err = validate_non_negative("goal_radius", -3.0).unwrap_err();
        assert!(err.to_string().contains("goal_radius"));
    }
}
