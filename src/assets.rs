//! Texture and music handles.
//!
//! Files are checked on disk by [`verify_asset_files`] before the app is
//! built, then loaded once at startup.  A load failure reported later by the
//! asset server ends the app with a failing exit code.

use crate::config::GameConfig;
use crate::effects::MusicTrack;
use crate::error::{GameError, GameResult};
use bevy::asset::AssetLoadFailedEvent;
use bevy::audio::AudioSource;
use bevy::prelude::*;
use std::path::Path;

/// Default asset root, relative to the working directory.
pub const ASSET_ROOT: &str = "assets";

/// Handles for every texture and track the scene uses.
#[derive(Resource, Debug, Clone)]
pub struct GameAssets {
    pub rocket: Handle<Image>,
    pub planet: Handle<Image>,
    pub cheese: Handle<Image>,
    pub explosion: Handle<Image>,
    pub background_music: Handle<AudioSource>,
    pub victory_music: Handle<AudioSource>,
}

impl GameAssets {
    pub fn music(&self, track: MusicTrack) -> Handle<AudioSource> {
        match track {
            MusicTrack::Background => self.background_music.clone(),
            MusicTrack::Victory => self.victory_music.clone(),
        }
    }
}

/// Every configured asset must exist under `root`.
pub fn verify_asset_files(config: &GameConfig, root: &Path) -> GameResult<()> {
    for relative in config.asset_paths() {
        let path = root.join(relative);
        if !path.is_file() {
            return Err(GameError::AssetMissing { path });
        }
    }
    Ok(())
}

/// Startup system: queue every asset load and store the handles.
pub fn load_game_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    commands.insert_resource(GameAssets {
        rocket: asset_server.load(config.rocket_texture.clone()),
        planet: asset_server.load(config.planet_texture.clone()),
        cheese: asset_server.load(config.cheese_texture.clone()),
        explosion: asset_server.load(config.explosion_texture.clone()),
        background_music: asset_server.load(config.background_music.clone()),
        victory_music: asset_server.load(config.victory_music.clone()),
    });
    eprintln!("[SETUP] Game assets queued");
}

/// Log asset server failures and exit with an error code.
pub fn asset_failure_system(
    mut image_failures: MessageReader<AssetLoadFailedEvent<Image>>,
    mut audio_failures: MessageReader<AssetLoadFailedEvent<AudioSource>>,
    mut exit: MessageWriter<AppExit>,
) {
    let failures = image_failures
        .read()
        .map(|e| (e.path.to_string(), e.error.to_string()))
        .chain(
            audio_failures
                .read()
                .map(|e| (e.path.to_string(), e.error.to_string())),
        );
    let mut failed = false;
    for (path, reason) in failures {
        error!("{}", GameError::AssetLoadFailed { path, reason });
        failed = true;
    }
    if failed {
        exit.write(AppExit::error());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_root_reports_first_asset() {
        let config = GameConfig::default();
        let err = verify_asset_files(&config, Path::new("no/such/dir")).unwrap_err();
        assert_eq!(
            err,
            GameError::AssetMissing {
                path: PathBuf::from("no/such/dir").join(&config.rocket_texture),
            }
        );
    }
}
