use bevy::prelude::*;
use bevy::window::WindowResolution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use gravity_rocket::assets::{self, ASSET_ROOT};
use gravity_rocket::config::{load_game_config, GameConfig, CONFIG_PATH};
use gravity_rocket::graphics;
use gravity_rocket::input::ControlsPlugin;
use gravity_rocket::particles::ParticlesPlugin;
use gravity_rocket::scene::ScenePlugin;
use gravity_rocket::session::GameSession;
use gravity_rocket::simulation::SimulationPlugin;

fn main() -> AppExit {
    // Config is read before the app exists so window size and spawn rules
    // are final when plugins build.
    let config = match load_game_config(Path::new(CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠ {e}; using compiled defaults");
            GameConfig::default()
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("✗ Invalid config: {e}");
        return AppExit::error();
    }
    if let Err(e) = assets::verify_asset_files(&config, Path::new(ASSET_ROOT)) {
        eprintln!("✗ {e}");
        return AppExit::error();
    }
    let session = match GameSession::new(config.clone(), StdRng::from_entropy()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("✗ Cannot start level: {e}");
            return AppExit::error();
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Gravity Rocket".into(),
                resolution: WindowResolution::new(config.window_width, config.window_height),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(config)
        .insert_resource(session)
        .add_plugins((SimulationPlugin, ControlsPlugin, ScenePlugin, ParticlesPlugin))
        .add_systems(
            Startup,
            (graphics::setup_camera, assets::load_game_assets),
        )
        .run()
}
