//! Presentation layer: turns [`SceneEffect`] messages into sprites, text and
//! audio, mirrors the rocket pose, and runs the cosmetic animations.
//!
//! ## Animations
//!
//! | Component      | Effect                                              |
//! |----------------|-----------------------------------------------------|
//! | `CheesePulse`  | cheese grows 60→80 px and back, 0.5 s each way      |
//! | `VictorySpin`  | victory label turns at a fixed angular rate         |
//! | `ExplosionFx`  | 1→90 px burst, slow 90→100 px growth, then fade out |

use crate::assets::{asset_failure_system, GameAssets};
use crate::config::GameConfig;
use crate::constants::{
    EXPLOSION_BURST_SECS, EXPLOSION_BURST_SIZE, EXPLOSION_FADE_SECS, EXPLOSION_FINAL_SIZE,
    EXPLOSION_GROW_SECS, EXPLOSION_START_SIZE,
};
use crate::effects::{MusicTrack, SceneEffect, SceneEntity};
use crate::graphics::update_view_bounds_system;
use crate::hud::{hud_text_system, AimHud};
use crate::particles::{spawn_explosion_particles, Particle};
use crate::session::GameSession;
use crate::simulation::GameSet;
use bevy::prelude::*;
use bevy::sprite::Anchor;

// ── Components ───────────────────────────────────────────────────────────────

/// Links a spawned entity to its registry slot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneTag(pub SceneEntity);

/// Marks the audio entity playing `track`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicTag(pub MusicTrack);

#[derive(Component, Debug, Default)]
pub struct CheesePulse {
    pub elapsed: f32,
}

#[derive(Component, Debug)]
pub struct VictorySpin {
    /// Radians per second.
    pub rate: f32,
}

#[derive(Component, Debug, Default)]
pub struct ExplosionFx {
    pub age: f32,
}

// ── Plugin ───────────────────────────────────────────────────────────────────

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AimHud>()
            .add_systems(
                Update,
                (update_view_bounds_system, asset_failure_system).in_set(GameSet::Input),
            )
            .add_systems(
                Update,
                (
                    apply_scene_effects_system,
                    hud_text_system,
                    sync_rocket_transform_system,
                )
                    .chain()
                    .in_set(GameSet::Present),
            )
            .add_systems(
                Update,
                (cheese_pulse_system, victory_spin_system, explosion_system)
                    .after(apply_scene_effects_system),
            );
    }
}

// ── Pure animation curves ────────────────────────────────────────────────────

/// Cheese sprite size at `t` seconds into a pulse that swings between
/// `min` and `max` every `half_period`.
pub fn cheese_size(t: f32, min: f32, max: f32, half_period: f32) -> f32 {
    let phase = (t / half_period).rem_euclid(2.0);
    let k = if phase < 1.0 { phase } else { 2.0 - phase };
    min + (max - min) * k
}

/// Explosion sprite `(size, alpha)` at `age` seconds, `None` once finished.
pub fn explosion_frame(age: f32) -> Option<(f32, f32)> {
    if age < EXPLOSION_BURST_SECS {
        let k = age / EXPLOSION_BURST_SECS;
        return Some((
            EXPLOSION_START_SIZE + (EXPLOSION_BURST_SIZE - EXPLOSION_START_SIZE) * k,
            1.0,
        ));
    }
    let age = age - EXPLOSION_BURST_SECS;
    if age < EXPLOSION_GROW_SECS {
        let k = age / EXPLOSION_GROW_SECS;
        return Some((
            EXPLOSION_BURST_SIZE + (EXPLOSION_FINAL_SIZE - EXPLOSION_BURST_SIZE) * k,
            1.0,
        ));
    }
    let age = age - EXPLOSION_GROW_SECS;
    if age < EXPLOSION_FADE_SECS {
        return Some((EXPLOSION_FINAL_SIZE, 1.0 - age / EXPLOSION_FADE_SECS));
    }
    None
}

/// HUD readouts grow rightward from their position; other text is centred.
pub fn text_anchor(entity: SceneEntity) -> Anchor {
    match entity {
        SceneEntity::AngleLabel | SceneEntity::PowerLabel => Anchor::CENTER_LEFT,
        _ => Anchor::CENTER,
    }
}

// ── Systems ──────────────────────────────────────────────────────────────────

/// Apply every queued [`SceneEffect`] in order.
#[allow(clippy::too_many_arguments)]
pub fn apply_scene_effects_system(
    mut commands: Commands,
    mut effects: MessageReader<SceneEffect>,
    assets: Res<GameAssets>,
    config: Res<GameConfig>,
    mut hud: ResMut<AimHud>,
    tagged: Query<(Entity, &SceneTag)>,
    music: Query<(Entity, &MusicTag)>,
    transient: Query<Entity, Or<(With<ExplosionFx>, With<Particle>)>>,
) {
    for effect in effects.read() {
        match effect {
            SceneEffect::Attach { entity, position } => {
                spawn_scene_entity(&mut commands, &assets, &config, &hud, *entity, *position);
            }
            SceneEffect::Detach(entity) => {
                for (e, tag) in tagged.iter() {
                    if tag.0 == *entity {
                        commands.entity(e).despawn();
                    }
                }
            }
            SceneEffect::Explosion { at } => {
                commands.spawn((
                    Sprite {
                        image: assets.explosion.clone(),
                        custom_size: Some(Vec2::splat(EXPLOSION_START_SIZE)),
                        ..default()
                    },
                    Transform::from_translation(at.extend(3.0)),
                    ExplosionFx::default(),
                ));
                spawn_explosion_particles(&mut commands, *at, config.explosion_particle_count);
            }
            SceneEffect::AimReadout { angle, power } => {
                hud.angle.clone_from(angle);
                hud.power.clone_from(power);
            }
            SceneEffect::PlayMusic(track) => {
                commands.spawn((
                    AudioPlayer::new(assets.music(*track)),
                    PlaybackSettings::LOOP,
                    MusicTag(*track),
                ));
            }
            SceneEffect::StopMusic(track) => {
                for (e, tag) in music.iter() {
                    if tag.0 == *track {
                        commands.entity(e).despawn();
                    }
                }
            }
            SceneEffect::ClearEffects => {
                for e in transient.iter() {
                    commands.entity(e).despawn();
                }
            }
        }
    }
}

fn spawn_scene_entity(
    commands: &mut Commands,
    assets: &GameAssets,
    config: &GameConfig,
    hud: &AimHud,
    entity: SceneEntity,
    position: Vec2,
) {
    let tag = SceneTag(entity);
    let sprite = |image: &Handle<Image>, size: f32| Sprite {
        image: image.clone(),
        custom_size: Some(Vec2::splat(size)),
        ..default()
    };
    let text = |value: &str, font_size: f32| {
        (
            Text2d::new(value),
            TextFont {
                font_size,
                ..default()
            },
            text_anchor(entity),
            Transform::from_translation(position.extend(10.0)),
        )
    };

    match entity {
        SceneEntity::Rocket => {
            commands.spawn((
                tag,
                sprite(&assets.rocket, config.rocket_sprite_size),
                Transform::from_translation(position.extend(1.0)),
            ));
        }
        SceneEntity::Planet => {
            commands.spawn((
                tag,
                sprite(&assets.planet, config.planet_sprite_size),
                Transform::from_translation(position.extend(0.0)),
            ));
        }
        SceneEntity::Cheese => {
            commands.spawn((
                tag,
                sprite(&assets.cheese, config.cheese_size),
                Transform::from_translation(position.extend(0.5)),
                CheesePulse::default(),
            ));
        }
        SceneEntity::GravityField => {
            commands.spawn((tag, Transform::from_translation(position.extend(0.0))));
        }
        SceneEntity::AngleLabel | SceneEntity::PowerLabel => {
            let value = hud.text_for(entity).unwrap_or_default();
            commands.spawn((tag, text(value, config.hud_font_size)));
        }
        SceneEntity::RetryPrompt => {
            commands.spawn((tag, text(&config.retry_text, config.retry_font_size)));
        }
        SceneEntity::ChangeLevelPrompt => {
            commands.spawn((
                tag,
                text(&config.change_level_text, config.change_level_font_size),
            ));
        }
        SceneEntity::VictoryLabel => {
            commands.spawn((
                tag,
                text(&config.victory_text, config.victory_font_size),
                VictorySpin {
                    rate: config.victory_spin_rate,
                },
            ));
        }
    }
}

/// Copy the simulated rocket pose onto its sprite.
pub fn sync_rocket_transform_system(
    session: Res<GameSession>,
    mut sprites: Query<(&SceneTag, &mut Transform)>,
) {
    let Some(rocket) = session.world().rocket() else {
        return;
    };
    for (tag, mut transform) in sprites.iter_mut() {
        if tag.0 == SceneEntity::Rocket {
            transform.translation.x = rocket.position.x;
            transform.translation.y = rocket.position.y;
            transform.rotation = Quat::from_rotation_z(rocket.rotation);
        }
    }
}

pub fn cheese_pulse_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut query: Query<(&mut Sprite, &mut CheesePulse)>,
) {
    for (mut sprite, mut pulse) in query.iter_mut() {
        pulse.elapsed += time.delta_secs();
        let size = cheese_size(
            pulse.elapsed,
            config.cheese_size,
            config.cheese_pulse_size,
            config.cheese_pulse_secs,
        );
        sprite.custom_size = Some(Vec2::splat(size));
    }
}

pub fn victory_spin_system(time: Res<Time>, mut query: Query<(&mut Transform, &VictorySpin)>) {
    for (mut transform, spin) in query.iter_mut() {
        transform.rotate_z(spin.rate * time.delta_secs());
    }
}

pub fn explosion_system(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Sprite, &mut ExplosionFx)>,
) {
    for (entity, mut sprite, mut fx) in query.iter_mut() {
        fx.age += time.delta_secs();
        match explosion_frame(fx.age) {
            Some((size, alpha)) => {
                sprite.custom_size = Some(Vec2::splat(size));
                sprite.color = Color::srgba(1.0, 1.0, 1.0, alpha);
            }
            None => {
                commands.entity(entity).despawn();
            }
        }
    }
}
