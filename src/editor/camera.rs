use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::state::SpawnToolState;
use crate::ui::DesignerSettings;
use crate::utils::{pointer_over_ui, should_process_input};

/// Minimum FOV (in degrees)
const MIN_FOV_DEGREES: f32 = 15.0;
/// Maximum FOV (in degrees)
const MAX_FOV_DEGREES: f32 = 120.0;
/// FOV change per scroll unit
const FOV_SCROLL_SPEED: f32 = 5.0;
/// Pitch stays this far away from straight up or down
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.1;

pub struct EditorCameraPlugin;

impl Plugin for EditorCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_editor_camera)
            .add_systems(Update, (camera_look, camera_movement, camera_zoom));
    }
}

/// Marker component for the editor camera
#[derive(Component)]
pub struct EditorCamera;

/// Fly camera state
#[derive(Component)]
pub struct FlyCamera {
    pub yaw: f32,
    pub pitch: f32,
    /// Current FOV in degrees
    pub fov_degrees: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: -std::f32::consts::FRAC_PI_6, // Look slightly down
            fov_degrees: 60.0,
        }
    }
}

impl FlyCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Apply a mouse delta, keeping the pitch away from the poles
    pub fn look(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

fn spawn_editor_camera(mut commands: Commands) {
    let fly_cam = FlyCamera::default();
    let rotation = fly_cam.rotation();

    commands.spawn((
        EditorCamera,
        fly_cam,
        Camera3d::default(),
        Transform::from_translation(Vec3::new(0.0, 6.0, 12.0)).with_rotation(rotation),
    ));
}

/// Look around with right mouse button drag
fn camera_look(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    settings: Res<DesignerSettings>,
    tool_state: Res<SpawnToolState>,
    mut query: Query<(&mut FlyCamera, &mut Transform), With<EditorCamera>>,
    mut contexts: EguiContexts,
) {
    // Must hold right mouse button for freelook
    if !mouse_button.pressed(MouseButton::Right) {
        return;
    }

    // The right button regenerates random values while a spawn drag is active
    if tool_state.armed {
        return;
    }

    if pointer_over_ui(&mut contexts) {
        return;
    }

    let delta = mouse_motion.delta;
    if delta == Vec2::ZERO {
        return;
    }

    for (mut fly_cam, mut transform) in &mut query {
        fly_cam.look(delta, settings.camera_sensitivity);
        transform.rotation = fly_cam.rotation();
    }
}

/// WASD movement for fly camera
fn camera_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    settings: Res<DesignerSettings>,
    mut query: Query<&mut Transform, With<EditorCamera>>,
    mut contexts: EguiContexts,
) {
    if !should_process_input(&mut contexts) {
        return;
    }

    for mut transform in &mut query {
        let mut velocity = Vec3::ZERO;

        let forward = transform.forward().as_vec3();
        let right = transform.right().as_vec3();
        let up = transform.up().as_vec3();

        if keyboard.pressed(KeyCode::KeyW) {
            velocity += forward;
        }
        if keyboard.pressed(KeyCode::KeyS) {
            velocity -= forward;
        }
        if keyboard.pressed(KeyCode::KeyA) {
            velocity -= right;
        }
        if keyboard.pressed(KeyCode::KeyD) {
            velocity += right;
        }

        // Vertical movement with Space/Q; Ctrl is reserved for the spawn tool
        if keyboard.pressed(KeyCode::Space) {
            velocity += up;
        }
        if keyboard.pressed(KeyCode::KeyQ) {
            velocity -= up;
        }

        if velocity != Vec3::ZERO {
            velocity = velocity.normalize();

            // Speed multiplier with Shift (faster)
            let speed_mult = if keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight) {
                3.0
            } else {
                1.0
            };

            transform.translation += velocity * settings.camera_speed * speed_mult * time.delta_secs();
        }
    }
}

/// Handle scroll wheel to adjust FOV
fn camera_zoom(
    scroll: Res<AccumulatedMouseScroll>,
    mut query: Query<(&mut FlyCamera, &mut Projection), With<EditorCamera>>,
    mut contexts: EguiContexts,
) {
    if pointer_over_ui(&mut contexts) {
        return;
    }

    let scroll_y = scroll.delta.y;
    if scroll_y == 0.0 {
        return;
    }

    for (mut fly_cam, mut projection) in &mut query {
        // Scroll up = zoom in (decrease FOV), scroll down = zoom out (increase FOV)
        fly_cam.fov_degrees =
            (fly_cam.fov_degrees - scroll_y * FOV_SCROLL_SPEED).clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
        *projection = Projection::Perspective(PerspectiveProjection {
            fov: fly_cam.fov_degrees.to_radians(),
            ..default()
        });
    }
}
