//! Angle and power readout.

use crate::aim::{ANGLE_PLACEHOLDER, POWER_PLACEHOLDER};
use crate::effects::SceneEntity;
use crate::scene::SceneTag;
use bevy::prelude::*;

/// Latest readout texts; written by the scene applier, shown by
/// [`hud_text_system`].
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct AimHud {
    pub angle: String,
    pub power: String,
}

impl Default for AimHud {
    fn default() -> Self {
        Self {
            angle: ANGLE_PLACEHOLDER.to_owned(),
            power: POWER_PLACEHOLDER.to_owned(),
        }
    }
}

impl AimHud {
    /// Text for a HUD label entity, `None` for anything else.
    pub fn text_for(&self, entity: SceneEntity) -> Option<&str> {
        match entity {
            SceneEntity::AngleLabel => Some(&self.angle),
            SceneEntity::PowerLabel => Some(&self.power),
            _ => None,
        }
    }
}

/// Copy [`AimHud`] into the label texts whenever it changes.
pub fn hud_text_system(hud: Res<AimHud>, mut labels: Query<(&SceneTag, &mut Text2d)>) {
    if !hud.is_changed() {
        return;
    }
    for (tag, mut text) in labels.iter_mut() {
        if let Some(value) = hud.text_for(tag.0) {
            if text.0 != value {
                text.0 = value.to_owned();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_hud_resource() {
        let mut app = App::new();
        app.init_resource::<AimHud>()
            .add_systems(Update, hud_text_system);
        let angle = app
            .world_mut()
            .spawn((SceneTag(SceneEntity::AngleLabel), Text2d::new("")))
            .id();
        let prompt = app
            .world_mut()
            .spawn((SceneTag(SceneEntity::RetryPrompt), Text2d::new("retry")))
            .id();
        app.update();
        assert_eq!(app.world().get::<Text2d>(angle).unwrap().0, "Angle: - ");

        app.world_mut().resource_mut::<AimHud>().angle = "Angle: 1.57".into();
        app.update();
        assert_eq!(app.world().get::<Text2d>(angle).unwrap().0, "Angle: 1.57");
        assert_eq!(app.world().get::<Text2d>(prompt).unwrap().0, "retry");
    }
}
