use avian3d::debug_render::PhysicsDebugPlugin;
use avian3d::prelude::PhysicsPlugins;
use bevy::gizmos::config::{DefaultGizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_infinite_grid::{InfiniteGridBundle, InfiniteGridPlugin, InfiniteGridSettings};

use super::camera::EditorCameraPlugin;
use super::input::EditorInputPlugin;
use super::spawn_tool::SpawnToolPlugin;
use super::state::EditorStatePlugin;
use super::visualizer::SpawnVisualizerPlugin;
use crate::scene::ScenePlugin;
use crate::ui::UiPlugin;

/// Main plugin that bundles the spawn designer
pub struct DesignerPlugin;

impl Plugin for DesignerPlugin {
    fn build(&self, app: &mut App) {
        app
            // Third-party plugins
            .add_plugins(EguiPlugin::default())
            .add_plugins(PhysicsPlugins::default())
            .add_plugins(PhysicsDebugPlugin)
            .add_plugins(InfiniteGridPlugin)
            // Designer core
            .add_plugins(EditorStatePlugin)
            .add_plugins(EditorInputPlugin)
            .add_plugins(EditorCameraPlugin)
            .add_plugins(ScenePlugin)
            .add_plugins(SpawnToolPlugin)
            .add_plugins(SpawnVisualizerPlugin)
            // UI
            .add_plugins(UiPlugin)
            // Setup
            .add_systems(Startup, (setup_editor_scene, configure_gizmos, spawn_grid));
    }
}

/// Setup initial editor scene with lighting
fn setup_editor_scene(mut commands: Commands) {
    commands.spawn(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        affects_lightmapped_meshes: true,
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Configure gizmo appearance
fn configure_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = 3.0;
}

/// Spawn the infinite grid
fn spawn_grid(mut commands: Commands) {
    commands.spawn(InfiniteGridBundle {
        settings: InfiniteGridSettings {
            x_axis_color: Color::srgb(0.8, 0.2, 0.2),
            z_axis_color: Color::srgb(0.2, 0.2, 0.8),
            minor_line_color: Color::srgba(0.3, 0.3, 0.3, 0.5),
            major_line_color: Color::srgba(0.5, 0.5, 0.5, 0.7),
            fadeout_distance: 200.0,
            dot_fadeout_strength: 0.1,
            scale: 1.0,
        },
        ..default()
    });
}
