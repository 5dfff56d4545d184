//! Shared utility functions for the designer

use bevy::prelude::*;
use bevy_egui::EguiContexts;

/// Check if keyboard input should be processed by designer systems.
///
/// Returns `false` (block input) while egui wants keyboard input,
/// e.g. when a text field or drag value is focused.
pub fn should_process_input(contexts: &mut EguiContexts) -> bool {
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return false;
        }
    }

    true
}

/// True while the pointer is over, or captured by, an egui area
pub fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// World-space ray from the camera through the cursor, if the cursor is in the window
pub fn cursor_ray(camera: &Camera, camera_transform: &GlobalTransform, window: &Window) -> Option<Ray3d> {
    let cursor_position = window.cursor_position()?;
    camera.viewport_to_world(camera_transform, cursor_position).ok()
}
