use avian3d::debug_render::PhysicsGizmos;
use bevy::gizmos::config::GizmoConfigStore;
use bevy::prelude::*;

use super::spawn_tool::DraftHandle;
use crate::placement::SpawnTool;

/// The current editor mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, States)]
pub enum DesignerMode {
    /// View mode: camera navigation only
    #[default]
    View,
    /// Designer mode: holding Ctrl arms the spawn tool
    Designer,
}

impl DesignerMode {
    pub fn label(&self) -> &'static str {
        match self {
            DesignerMode::View => "VIEW",
            DesignerMode::Designer => "DESIGN",
        }
    }
}

/// Spawn tool owned by the app, plus whether Ctrl currently arms it
#[derive(Resource)]
pub struct SpawnToolState {
    pub tool: SpawnTool<DraftHandle>,
    /// True while the modifier is held in Designer mode
    pub armed: bool,
}

impl Default for SpawnToolState {
    fn default() -> Self {
        Self {
            tool: SpawnTool::new(),
            armed: false,
        }
    }
}

/// Anchor under the cursor while the armed tool is idle, in world space
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct HoverAnchor(pub Option<Transform>);

/// Event to toggle physics debug rendering
#[derive(Message)]
pub struct TogglePhysicsDebugEvent;

pub struct EditorStatePlugin;

impl Plugin for EditorStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<DesignerMode>()
            .init_resource::<SpawnToolState>()
            .init_resource::<HoverAnchor>()
            .add_message::<TogglePhysicsDebugEvent>()
            .add_systems(Startup, hide_physics_debug)
            .add_systems(Update, handle_toggle_physics_debug)
            .add_systems(OnEnter(DesignerMode::Designer), log_mode_enter)
            .add_systems(OnEnter(DesignerMode::View), log_mode_enter);
    }
}

fn log_mode_enter(mode: Res<State<DesignerMode>>) {
    info!("Mode: {}", mode.get().label());
}

fn hide_physics_debug(mut gizmo_config: ResMut<GizmoConfigStore>) {
    gizmo_config.config_mut::<PhysicsGizmos>().0.enabled = false;
}

/// Handle toggling physics debug rendering
fn handle_toggle_physics_debug(
    mut events: MessageReader<TogglePhysicsDebugEvent>,
    mut gizmo_config: ResMut<GizmoConfigStore>,
) {
    for _ in events.read() {
        let config = gizmo_config.config_mut::<PhysicsGizmos>().0;
        config.enabled = !config.enabled;
        info!("Physics debug: {}", if config.enabled { "ON" } else { "OFF" });
    }
}
