//! Mouse and keyboard input.
//!
//! 1. [`drag_input_system`]: mouse motion while the left button is held is
//!    fed to the session as drag deltas; releasing the button launches.
//! 2. [`keyboard_command_system`]: Space retries, Enter rolls a new level,
//!    any other key is logged by the session and ignored.

use crate::level::LevelCommand;
use crate::session::GameSession;
use crate::simulation::GameSet;
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (drag_input_system, keyboard_command_system)
                .chain()
                .in_set(GameSet::Input),
        );
    }
}

/// Map a pressed key to a level command.
pub fn command_for_key(key: KeyCode) -> LevelCommand {
    match key {
        KeyCode::Space => LevelCommand::Retry,
        KeyCode::Enter | KeyCode::NumpadEnter => LevelCommand::NewLevel,
        other => LevelCommand::Unknown(format!("{other:?}")),
    }
}

pub fn drag_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: MessageReader<MouseMotion>,
    mut session: ResMut<GameSession>,
) {
    if buttons.pressed(MouseButton::Left) {
        for event in motion.read() {
            // Raw device delta, screen orientation (+Y down).
            session.on_drag_delta(event.delta.x, event.delta.y);
        }
    } else {
        motion.clear();
    }

    if buttons.just_released(MouseButton::Left) && session.on_release() {
        info!("Rocket launched with impulse {:?}", session.aim().impulse());
    }
}

pub fn keyboard_command_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<GameSession>,
) {
    for &key in keys.get_just_pressed() {
        if let Err(e) = session.handle_command(command_for_key(key)) {
            error!("{e}");
        }
    }
}
