//! One game of Gravity Rocket.
//!
//! [`GameSession`] owns the physics world, the level machine, the aim
//! controller, the spawn layout and the scene registry.  Every game rule is a
//! method here, so the whole loop runs without a window: Bevy systems only
//! feed input and time in and apply the queued [`SceneEffect`]s.
//!
//! ## Tick order
//!
//! 1. The frame's `dt` is split into fixed substeps.  Each substep integrates
//!    the rocket, then checks the goal, then checks planet contact.
//! 2. After stepping, one out-of-bounds sample against the visible rect.

use crate::aim::{AimController, AimReadout, ANGLE_PLACEHOLDER, POWER_PLACEHOLDER};
use crate::config::GameConfig;
use crate::constants::PLANET_CENTER;
use crate::director::{pick_spawn_config, SpawnConfig};
use crate::effects::{MusicTrack, SceneEffect, SceneEntity, SceneRegistry};
use crate::error::GameResult;
use crate::flight::{Body, GravityField, PhysicsWorld, Shape};
use crate::geometry::distance;
use crate::level::{LevelCommand, LevelMachine, LevelState};
use bevy::log::info;
use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;
use rand::rngs::StdRng;

/// Longest frame fed to the integrator; longer frames are clamped.
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Resource, Debug)]
pub struct GameSession {
    config: GameConfig,
    rng: StdRng,
    spawn: SpawnConfig,
    rocket_shape: Shape,
    world: PhysicsWorld,
    aim: AimController,
    level: LevelMachine,
    registry: SceneRegistry,
    /// Cheese position while it is still up for grabs.
    goal: Option<Vec2>,
    effects: Vec<SceneEffect>,
    accumulator: f32,
}

impl GameSession {
    /// Roll a fresh level layout and start playing.
    pub fn new(config: GameConfig, mut rng: StdRng) -> GameResult<Self> {
        let spawn = pick_spawn_config(&mut rng, &config)?;
        Self::with_spawn(config, rng, spawn)
    }

    /// Start playing a known layout.
    pub fn with_spawn(config: GameConfig, rng: StdRng, spawn: SpawnConfig) -> GameResult<Self> {
        let rocket_shape = if config.rocket_outline.is_empty() {
            Shape::circle(config.rocket_collider_radius)
        } else {
            Shape::outline(&config.rocket_outline_points())?
        };
        let world = build_world(&config, spawn.rocket, &rocket_shape);
        let mut session = Self {
            aim: AimController::new(config.impulse_divisor),
            level: LevelMachine::new(config.out_of_bounds_grace_secs),
            config,
            rng,
            spawn,
            rocket_shape,
            world,
            registry: SceneRegistry::default(),
            goal: None,
            effects: Vec::new(),
            accumulator: 0.0,
        };
        session.restart();
        Ok(session)
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Replay the current layout: every entity is re-attached at its spawn
    /// position, aim and level state are reset.
    pub fn restart(&mut self) {
        for entity in self.registry.attached() {
            self.detach(entity);
        }
        self.effects.push(SceneEffect::ClearEffects);

        self.world = build_world(&self.config, self.spawn.rocket, &self.rocket_shape);
        self.aim.reset();
        self.level.reset();
        self.goal = Some(self.spawn.cheese);
        self.accumulator = 0.0;

        self.attach(SceneEntity::Rocket, self.spawn.rocket);
        self.attach(SceneEntity::Planet, PLANET_CENTER);
        self.attach(SceneEntity::GravityField, PLANET_CENTER);
        self.attach(SceneEntity::Cheese, self.spawn.cheese);
        self.attach(SceneEntity::AngleLabel, self.config.angle_label_position());
        self.attach(SceneEntity::PowerLabel, self.config.power_label_position());
        self.effects.push(SceneEffect::AimReadout {
            angle: ANGLE_PLACEHOLDER.to_owned(),
            power: POWER_PLACEHOLDER.to_owned(),
        });

        match self.registry.music {
            Some(MusicTrack::Background) => {}
            Some(MusicTrack::Victory) => {
                self.effects.push(SceneEffect::StopMusic(MusicTrack::Victory));
                self.play_music(MusicTrack::Background);
            }
            None => self.play_music(MusicTrack::Background),
        }
    }

    /// Roll a new layout and restart on it.  The old layout is kept if
    /// spawn selection fails.
    pub fn new_level(&mut self) -> GameResult<()> {
        self.spawn = pick_spawn_config(&mut self.rng, &self.config)?;
        info!(
            "New level: rocket at {:?}, cheese at {:?}",
            self.spawn.rocket, self.spawn.cheese
        );
        self.restart();
        Ok(())
    }

    pub fn handle_command(&mut self, command: LevelCommand) -> GameResult<()> {
        match command {
            LevelCommand::Retry => {
                self.restart();
                Ok(())
            }
            LevelCommand::NewLevel => self.new_level(),
            LevelCommand::Unknown(key) => {
                info!("Ignoring key {key}");
                Ok(())
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Accumulate a drag delta, publish the readout and turn the rocket to
    /// the aim angle while it is still on the pad.
    pub fn on_drag_delta(&mut self, dx: f32, dy: f32) -> AimReadout {
        let readout = self.aim.on_drag_delta(dx, dy);
        if !self.aim.state().has_fired {
            self.world.set_rocket_rotation(readout.angle);
        }
        self.effects.push(SceneEffect::AimReadout {
            angle: readout.angle_label(),
            power: readout.power_label(),
        });
        readout
    }

    /// Launch on mouse release.  Returns `true` if an impulse was applied.
    pub fn on_release(&mut self) -> bool {
        self.aim.on_release(&mut self.world)
    }

    // ── Simulation ────────────────────────────────────────────────────────────

    /// Advance the game by `dt` seconds at session time `now`.  `viewport` is
    /// the visible world rectangle used for the out-of-bounds check.
    pub fn tick(&mut self, dt: f32, now: f64, viewport: Rect) {
        if self.world.rocket().is_none() {
            return;
        }

        let substep = self.config.sim_substep;
        self.accumulator += dt.min(MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= substep && substeps < self.config.max_substeps {
            self.accumulator -= substep;
            substeps += 1;

            self.world.step(substep);
            self.check_goal();
            if self.check_contact() {
                self.accumulator = 0.0;
                return;
            }
        }
        if self.accumulator >= substep {
            // Backlog left after MAX_SUBSTEPS is dropped.
            self.accumulator = 0.0;
        }

        if let Some(position) = self.world.rocket_position() {
            if self.level.on_bounds_check(now, viewport.contains(position)) {
                info!("Rocket lost in space");
                self.show_prompts();
            }
        }
    }

    fn check_goal(&mut self) {
        let (Some(goal), Some(rocket)) = (self.goal, self.world.rocket_position()) else {
            return;
        };
        if distance(rocket, goal) >= self.config.goal_radius || !self.level.on_goal_reached() {
            return;
        }
        info!("Cheese reached");
        self.goal = None;
        self.detach(SceneEntity::Cheese);
        self.attach(SceneEntity::VictoryLabel, Vec2::ZERO);
        if self.registry.music == Some(MusicTrack::Background) {
            self.effects.push(SceneEffect::StopMusic(MusicTrack::Background));
        }
        self.play_music(MusicTrack::Victory);
    }

    /// Returns `true` if the rocket hit the planet this substep.
    fn check_contact(&mut self) -> bool {
        let Some(contact) = self.world.detect_contact() else {
            return false;
        };
        info!("Rocket destroyed at {:?}", contact.point);
        self.effects.push(SceneEffect::Explosion { at: contact.point });
        self.world.remove_rocket();
        self.detach(SceneEntity::Rocket);
        if self.level.on_planet_contact() {
            self.show_prompts();
        }
        true
    }

    // ── Effects ───────────────────────────────────────────────────────────────

    /// Hand queued effects to the presentation layer.
    pub fn drain_effects(&mut self) -> Vec<SceneEffect> {
        std::mem::take(&mut self.effects)
    }

    fn attach(&mut self, entity: SceneEntity, position: Vec2) {
        if self.registry.attach(entity) {
            self.effects.push(SceneEffect::Attach { entity, position });
        }
    }

    fn detach(&mut self, entity: SceneEntity) {
        if self.registry.detach(entity) {
            self.effects.push(SceneEffect::Detach(entity));
        }
    }

    fn show_prompts(&mut self) {
        self.attach(SceneEntity::RetryPrompt, self.config.retry_position());
        self.attach(
            SceneEntity::ChangeLevelPrompt,
            self.config.change_level_position(),
        );
    }

    fn play_music(&mut self, track: MusicTrack) {
        self.registry.music = Some(track);
        self.effects.push(SceneEffect::PlayMusic(track));
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn spawn(&self) -> SpawnConfig {
        self.spawn
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn aim(&self) -> &AimController {
        &self.aim
    }

    pub fn level_state(&self) -> LevelState {
        self.level.state()
    }

    pub fn level(&self) -> &LevelMachine {
        &self.level
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn goal(&self) -> Option<Vec2> {
        self.goal
    }

    pub fn prompts_visible(&self) -> bool {
        self.level.prompts_visible()
    }
}

fn build_world(config: &GameConfig, rocket_at: Vec2, rocket_shape: &Shape) -> PhysicsWorld {
    PhysicsWorld::new(
        Body::dynamic(rocket_at, rocket_shape.clone(), config.rocket_mass),
        Body::fixed(PLANET_CENTER, Shape::circle(config.planet_radius)),
        GravityField::radial(
            PLANET_CENTER,
            config.gravity_strength,
            config.gravity_falloff,
            config.min_gravity_dist,
        ),
    )
}
