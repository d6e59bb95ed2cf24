//! Drag-to-aim input model.
//!
//! Mouse motion while the button is held accumulates into [`AimState`]; the
//! release turns the accumulated delta into a single launch impulse.  The HUD
//! reads [`AimReadout`] after every drag event.

use crate::flight::PhysicsWorld;
use crate::geometry::{aim_angle, round_to};
use bevy::math::Vec2;

/// HUD text shown before the first drag of an attempt.
pub const ANGLE_PLACEHOLDER: &str = "Angle: - ";
pub const POWER_PLACEHOLDER: &str = "Power: - ";

/// Accumulated drag for the current attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AimState {
    pub delta_x: f32,
    pub delta_y: f32,
    /// Set by the first release; blocks further impulses until reset.
    pub has_fired: bool,
}

impl AimState {
    pub fn delta(&self) -> Vec2 {
        Vec2::new(self.delta_x, self.delta_y)
    }
}

/// Aim angle (radians) and launch power derived from the accumulated drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimReadout {
    pub angle: f32,
    pub power: f32,
}

impl AimReadout {
    /// Pure function of the accumulated deltas.
    pub fn from_state(state: &AimState) -> Self {
        Self {
            angle: aim_angle(state.delta()),
            power: (state.delta_x.abs() + state.delta_y.abs()).round(),
        }
    }

    pub fn angle_label(&self) -> String {
        angle_label(self.angle)
    }

    pub fn power_label(&self) -> String {
        power_label(self.power)
    }
}

/// At most two decimals; whole numbers keep one (`"Angle: 3.0"`).
pub fn angle_label(angle: f32) -> String {
    let rounded = round_to(angle, 2);
    if rounded.fract() == 0.0 {
        format!("Angle: {rounded:.1}")
    } else {
        format!("Angle: {rounded}")
    }
}

pub fn power_label(power: f32) -> String {
    format!("Power: {}", power.round() as i64)
}

/// Converts drag deltas into aim and a one-shot impulse.
#[derive(Debug, Clone, PartialEq)]
pub struct AimController {
    state: AimState,
    impulse_divisor: f32,
}

impl AimController {
    pub fn new(impulse_divisor: f32) -> Self {
        Self {
            state: AimState::default(),
            impulse_divisor,
        }
    }

    pub fn state(&self) -> &AimState {
        &self.state
    }

    /// Accumulate a drag delta (screen orientation, +Y down).
    pub fn on_drag_delta(&mut self, dx: f32, dy: f32) -> AimReadout {
        self.state.delta_x += dx;
        self.state.delta_y += dy;
        AimReadout::from_state(&self.state)
    }

    /// Launch impulse for the current accumulation: the rocket flies away
    /// from the drag horizontally and with it vertically (screen +Y is world −Y).
    pub fn impulse(&self) -> Vec2 {
        Vec2::new(
            -self.state.delta_x / self.impulse_divisor,
            self.state.delta_y / self.impulse_divisor,
        )
    }

    /// Apply the launch impulse once per attempt.  Returns `true` if it fired.
    pub fn on_release(&mut self, world: &mut PhysicsWorld) -> bool {
        if self.state.has_fired {
            return false;
        }
        world.apply_impulse(self.impulse());
        self.state.has_fired = true;
        true
    }

    pub fn reset(&mut self) {
        self.state = AimState::default();
    }
}
