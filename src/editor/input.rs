use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::state::{DesignerMode, TogglePhysicsDebugEvent};
use crate::utils::should_process_input;

pub struct EditorInputPlugin;

impl Plugin for EditorInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, handle_mode_input);
    }
}

/// `I` enters Designer mode, Escape returns to View mode, F2 toggles collider debug
fn handle_mode_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_mode: Res<State<DesignerMode>>,
    mut next_mode: ResMut<NextState<DesignerMode>>,
    mut physics_debug: MessageWriter<TogglePhysicsDebugEvent>,
    mut contexts: EguiContexts,
) {
    if !should_process_input(&mut contexts) {
        return;
    }

    if keyboard.just_pressed(KeyCode::F2) {
        physics_debug.write(TogglePhysicsDebugEvent);
    }

    match current_mode.get() {
        DesignerMode::View if keyboard.just_pressed(KeyCode::KeyI) => {
            next_mode.set(DesignerMode::Designer);
        }
        DesignerMode::Designer if keyboard.just_pressed(KeyCode::Escape) => {
            next_mode.set(DesignerMode::View);
        }
        _ => {}
    }
}
