//! Bevy side of the spawn tool: pointer input, physics raycasts and draft entities.

use avian3d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowFocused};
use bevy_egui::EguiContexts;

use super::camera::EditorCamera;
use super::state::{DesignerMode, HoverAnchor, SpawnToolState};
use crate::constants::sizes;
use crate::placement::frame;
use crate::placement::{Draft, DraftSpawner, RotationGridSnap, SpawnOutcome, SurfaceHit, SurfaceRaycast};
use crate::scene::{generate_unique_name, DraftPreview, PlacedAsset, PrimitiveAssets, PrimitiveShape, SpawnPalette};
use crate::ui::DesignerSettings;
use crate::utils::{cursor_ray, pointer_over_ui};

pub struct SpawnToolPlugin;

impl Plugin for SpawnToolPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, drive_spawn_tool.run_if(in_state(DesignerMode::Designer)))
            .add_systems(OnExit(DesignerMode::Designer), release_on_mode_exit);
    }
}

/// A draft entity and the shape it was spawned from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftHandle {
    pub entity: Entity,
    pub shape: PrimitiveShape,
}

/// Scene access the spawn tool needs, bundled as its host.
///
/// Values arrive and leave in the placement frame and are converted here.
#[derive(SystemParam)]
pub struct SceneHost<'w, 's> {
    spatial_query: SpatialQuery<'w, 's>,
    commands: Commands<'w, 's>,
    assets: Res<'w, PrimitiveAssets>,
    palette: Res<'w, SpawnPalette>,
    settings: Res<'w, DesignerSettings>,
    drafts: Query<'w, 's, Entity, With<DraftPreview>>,
    placed_names: Query<'w, 's, &'static Name, With<PlacedAsset>>,
    rng: Local<'s, fastrand::Rng>,
}

impl SurfaceRaycast for SceneHost<'_, '_> {
    fn raycast(&mut self, ray: Ray3d) -> Option<SurfaceHit> {
        let ray = frame::ray_to_world(ray);
        let filter = SpatialQueryFilter::default().with_excluded_entities(self.drafts.iter());

        let hit = self.spatial_query.cast_ray(
            ray.origin,
            ray.direction,
            sizes::RAYCAST_MAX_DISTANCE,
            true,
            &filter,
        )?;

        let point = ray.origin + ray.direction * hit.distance;
        Some(frame::hit_to_placement(point, hit.normal))
    }
}

impl RotationGridSnap for SceneHost<'_, '_> {
    fn snap_component(&self, degrees: f32) -> f32 {
        self.settings.rotation_grid().snap_component(degrees)
    }
}

impl DraftSpawner for SceneHost<'_, '_> {
    type Handle = DraftHandle;

    fn materialize_draft(&mut self, pose: &Transform) -> Option<Draft<DraftHandle>> {
        let shape = self.palette.pick(&mut self.rng)?;

        let entity = self
            .commands
            .spawn((
                DraftPreview { shape },
                Mesh3d(self.assets.mesh(shape)),
                MeshMaterial3d(self.assets.draft_material(shape)),
                frame::transform_to_world(pose),
            ))
            .id();

        debug!("Spawn tool: drafting {}", shape.display_name());
        Some(Draft {
            handle: DraftHandle { entity, shape },
            extent: frame::extent_to_placement(shape.half_extents()),
        })
    }

    fn update_draft(&mut self, handle: DraftHandle, pose: &Transform) {
        if let Ok(mut entity) = self.commands.get_entity(handle.entity) {
            entity.insert(frame::transform_to_world(pose));
        }
    }

    fn commit_draft(&mut self, handle: DraftHandle) {
        let shape = handle.shape;
        let name = generate_unique_name(shape.display_name(), |candidate| {
            self.placed_names.iter().any(|name| name.as_str() == candidate)
        });

        let Ok(mut entity) = self.commands.get_entity(handle.entity) else {
            warn!("Spawn tool: draft {:?} vanished before commit", handle.entity);
            return;
        };

        entity.remove::<DraftPreview>().insert((
            Name::new(name.clone()),
            PlacedAsset { shape },
            MeshMaterial3d(self.assets.material(shape)),
            RigidBody::Static,
            shape.create_collider(),
        ));
        info!("Placed {}", name);
    }

    fn discard_draft(&mut self, handle: DraftHandle) {
        if let Ok(mut entity) = self.commands.get_entity(handle.entity) {
            entity.despawn();
        }
    }
}

/// Route pointer input to the spawn tool while Ctrl is held
fn drive_spawn_tool(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut focus_events: MessageReader<WindowFocused>,
    settings: Res<DesignerSettings>,
    mut tool_state: ResMut<SpawnToolState>,
    mut hover: ResMut<HoverAnchor>,
    camera_query: Query<(&Camera, &GlobalTransform), With<EditorCamera>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut host: SceneHost,
    mut contexts: EguiContexts,
) {
    let focus_lost = focus_events.read().any(|event| !event.focused);
    let modifier_held = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    let state = &mut *tool_state;
    hover.0 = None;

    if focus_lost || !modifier_held {
        if state.armed {
            state.armed = false;
            if let Some(outcome) = state.tool.deactivate(&mut host) {
                info!("Spawn tool released mid-drag: {:?}", outcome);
            }
        }
        return;
    }
    state.armed = true;

    let ray = camera_query
        .single()
        .ok()
        .zip(window_query.single().ok())
        .and_then(|((camera, camera_transform), window)| cursor_ray(camera, camera_transform, window))
        .map(frame::ray_to_placement);
    let config = &settings.alignment;

    if mouse.just_pressed(MouseButton::Left) && !pointer_over_ui(&mut contexts) {
        if let Some(ray) = ray {
            if let Err(err) = state.tool.pointer_down(ray, config, &mut host) {
                debug!("Spawn tool: {}", err);
            }
        }
    }

    if !state.tool.is_dragging() {
        if let Some(ray) = ray {
            hover.0 = state
                .tool
                .hover(ray, config, &mut host)
                .ok()
                .map(|anchor| frame::transform_to_world(&anchor));
        }
        return;
    }

    if let Some(ray) = ray {
        state.tool.pointer_move(ray, config, &mut host);
    }

    if mouse.just_pressed(MouseButton::Right) {
        state.tool.secondary_pressed(config, &mut host);
    }

    if mouse.just_released(MouseButton::Left) {
        if let Some(SpawnOutcome::Discarded) = state.tool.pointer_up(&mut host) {
            info!("Spawn discarded: draft had no size");
        }
    }
}

fn release_on_mode_exit(
    mut tool_state: ResMut<SpawnToolState>,
    mut hover: ResMut<HoverAnchor>,
    mut host: SceneHost,
) {
    tool_state.armed = false;
    hover.0 = None;
    if let Some(outcome) = tool_state.tool.deactivate(&mut host) {
        info!("Spawn tool released on mode exit: {:?}", outcome);
    }
}
