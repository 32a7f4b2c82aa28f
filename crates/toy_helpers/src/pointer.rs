use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// Unified mouse + touch access in world coordinates.
///
/// Mouse and single-finger touch are treated as the same pointer: the first
/// active touch wins, the left mouse button is the fallback.
#[derive(SystemParam)]
pub struct Pointer<'w, 's> {
    mouse: Res<'w, ButtonInput<MouseButton>>,
    touches: Res<'w, Touches>,
    windows: Query<'w, 's, &'static Window>,
    camera: Query<'w, 's, (&'static Camera, &'static GlobalTransform)>,
}

impl Pointer<'_, '_> {
    /// World position of a press that started this frame, if any.
    pub fn just_pressed_world(&self) -> Option<Vec2> {
        let screen = if self.mouse.just_pressed(MouseButton::Left) {
            self.windows.get_single().ok()?.cursor_position()?
        } else {
            self.touches.iter_just_pressed().next()?.position()
        };
        self.screen_to_world(screen)
    }

    /// World position of a pointer that is currently held down, if any.
    pub fn held_world(&self) -> Option<Vec2> {
        let screen = if let Some(touch) = self.touches.iter().next() {
            touch.position()
        } else if self.mouse.pressed(MouseButton::Left) {
            self.windows.get_single().ok()?.cursor_position()?
        } else {
            return None;
        };
        self.screen_to_world(screen)
    }

    /// World position of a release that happened this frame, if any.
    pub fn just_released_world(&self) -> Option<Vec2> {
        let screen = if self.mouse.just_released(MouseButton::Left) {
            self.windows.get_single().ok()?.cursor_position()?
        } else {
            self.touches.iter_just_released().next()?.position()
        };
        self.screen_to_world(screen)
    }

    fn screen_to_world(&self, position: Vec2) -> Option<Vec2> {
        let (camera, camera_transform) = self.camera.get_single().ok()?;
        camera
            .viewport_to_world(camera_transform, position)
            .map(|ray| ray.origin.truncate())
            .ok()
    }
}
