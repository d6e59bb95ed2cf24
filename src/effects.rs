//! Scene effects emitted by the session and the registry of what is on screen.
//!
//! The session never touches entities directly.  It records what should be
//! attached in a [`SceneRegistry`] and queues [`SceneEffect`]s, which
//! `scene::apply_scene_effects_system` turns into sprites, text and audio.

use bevy::math::Vec2;
use bevy::prelude::Message;

/// Every entity the scene can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneEntity {
    Rocket,
    Planet,
    Cheese,
    /// Invisible marker for the radial field.
    GravityField,
    AngleLabel,
    PowerLabel,
    RetryPrompt,
    ChangeLevelPrompt,
    VictoryLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTrack {
    Background,
    Victory,
}

/// Instruction for the presentation layer.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum SceneEffect {
    Attach { entity: SceneEntity, position: Vec2 },
    Detach(SceneEntity),
    Explosion { at: Vec2 },
    AimReadout { angle: String, power: String },
    PlayMusic(MusicTrack),
    StopMusic(MusicTrack),
    /// Remove explosions and debris left from the previous attempt.
    ClearEffects,
}

/// Which scene entities are attached and which track is playing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneRegistry {
    pub rocket: bool,
    pub planet: bool,
    pub cheese: bool,
    pub gravity_field: bool,
    pub angle_label: bool,
    pub power_label: bool,
    pub retry_prompt: bool,
    pub change_level_prompt: bool,
    pub victory_label: bool,
    pub music: Option<MusicTrack>,
}

impl SceneRegistry {
    fn slot(&mut self, entity: SceneEntity) -> &mut bool {
        match entity {
            SceneEntity::Rocket => &mut self.rocket,
            SceneEntity::Planet => &mut self.planet,
            SceneEntity::Cheese => &mut self.cheese,
            SceneEntity::GravityField => &mut self.gravity_field,
            SceneEntity::AngleLabel => &mut self.angle_label,
            SceneEntity::PowerLabel => &mut self.power_label,
            SceneEntity::RetryPrompt => &mut self.retry_prompt,
            SceneEntity::ChangeLevelPrompt => &mut self.change_level_prompt,
            SceneEntity::VictoryLabel => &mut self.victory_label,
        }
    }

    pub fn is_attached(&self, entity: SceneEntity) -> bool {
        match entity {
            SceneEntity::Rocket => self.rocket,
            SceneEntity::Planet => self.planet,
            SceneEntity::Cheese => self.cheese,
            SceneEntity::GravityField => self.gravity_field,
            SceneEntity::AngleLabel => self.angle_label,
            SceneEntity::PowerLabel => self.power_label,
            SceneEntity::RetryPrompt => self.retry_prompt,
            SceneEntity::ChangeLevelPrompt => self.change_level_prompt,
            SceneEntity::VictoryLabel => self.victory_label,
        }
    }

    /// Mark `entity` attached.  Returns `false` if it already was.
    pub fn attach(&mut self, entity: SceneEntity) -> bool {
        !std::mem::replace(self.slot(entity), true)
    }

    /// Mark `entity` detached.  Returns `false` if it was not attached.
    pub fn detach(&mut self, entity: SceneEntity) -> bool {
        std::mem::replace(self.slot(entity), false)
    }

    /// Every currently attached entity.
    pub fn attached(&self) -> Vec<SceneEntity> {
        ALL_ENTITIES
            .iter()
            .copied()
            .filter(|&e| self.is_attached(e))
            .collect()
    }

    pub fn prompts_visible(&self) -> bool {
        self.retry_prompt && self.change_level_prompt
    }
}

pub const ALL_ENTITIES: [SceneEntity; 9] = [
    SceneEntity::Rocket,
    SceneEntity::Planet,
    SceneEntity::Cheese,
    SceneEntity::GravityField,
    SceneEntity::AngleLabel,
    SceneEntity::PowerLabel,
    SceneEntity::RetryPrompt,
    SceneEntity::ChangeLevelPrompt,
    SceneEntity::VictoryLabel,
];
