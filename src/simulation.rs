//! Simulation plugin: drives [`GameSession`] from the Bevy frame loop.
//!
//! Every `Update` runs the three [`GameSet`]s in order: input is fed to the
//! session, the session ticks and publishes its effects, then the scene
//! applies them.  Only the tick half lives here so the loop runs headless.

use crate::effects::SceneEffect;
use crate::graphics::ViewBounds;
use crate::level::LevelState;
use crate::session::GameSession;
use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Tick,
    Present,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SceneEffect>()
            .init_state::<LevelState>()
            .init_resource::<ViewBounds>()
            .configure_sets(
                Update,
                (GameSet::Input, GameSet::Tick, GameSet::Present).chain(),
            )
            .add_systems(
                Update,
                (
                    simulation_tick_system,
                    publish_effects_system,
                    sync_level_state_system,
                )
                    .chain()
                    .in_set(GameSet::Tick),
            );
    }
}

/// Advance the session by the frame time.
pub fn simulation_tick_system(
    time: Res<Time>,
    bounds: Res<ViewBounds>,
    mut session: ResMut<GameSession>,
) {
    session.tick(time.delta_secs(), time.elapsed_secs_f64(), bounds.0);
}

/// Forward queued scene effects as messages.
pub fn publish_effects_system(
    mut session: ResMut<GameSession>,
    mut writer: MessageWriter<SceneEffect>,
) {
    let effects = session.drain_effects();
    if !effects.is_empty() {
        writer.write_batch(effects);
    }
}

/// Keep `State<LevelState>` equal to the session's level state.
pub fn sync_level_state_system(
    session: Res<GameSession>,
    state: Res<State<LevelState>>,
    mut next: ResMut<NextState<LevelState>>,
) {
    let current = session.level_state();
    if *state.get() != current {
        info!("Level state {:?} -> {:?}", state.get(), current);
        next.set(current);
    }
}
