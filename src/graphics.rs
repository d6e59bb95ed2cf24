use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Visible world rectangle, refreshed every frame before the simulation tick.
///
/// The out-of-bounds timer samples the rocket against this rect.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds(pub Rect);

impl Default for ViewBounds {
    fn default() -> Self {
        Self(visible_world_rect(
            Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
            Vec2::ZERO,
        ))
    }
}

/// World rect seen by an unscaled 2D camera at `camera_pos`.
pub fn visible_world_rect(window_size: Vec2, camera_pos: Vec2) -> Rect {
    Rect::from_center_size(camera_pos, window_size)
}

/// Setup camera for 2D rendering
pub fn setup_camera(mut commands: Commands) {
    // Default Camera2d maps one world unit to one logical pixel
    commands.spawn(Camera2d);
    eprintln!("[SETUP] Camera spawned");
}

/// Track window resizes and camera moves.
pub fn update_view_bounds_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<&Transform, With<Camera2d>>,
    mut bounds: ResMut<ViewBounds>,
) {
    let (Ok(window), Ok(camera)) = (windows.single(), camera.single()) else {
        return;
    };
    let rect = visible_world_rect(
        Vec2::new(window.width(), window.height()),
        camera.translation.truncate(),
    );
    if bounds.0 != rect {
        bounds.0 = rect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_match_window() {
        let bounds = ViewBounds::default().0;
        assert_eq!(bounds.min, Vec2::new(-512.0, -384.0));
        assert_eq!(bounds.max, Vec2::new(512.0, 384.0));
    }

    #[test]
    fn bounds_follow_camera() {
        let rect = visible_world_rect(Vec2::new(100.0, 50.0), Vec2::new(10.0, 0.0));
        assert!(rect.contains(Vec2::new(59.0, 24.0)));
        assert!(!rect.contains(Vec2::new(61.0, 0.0)));
    }
}
