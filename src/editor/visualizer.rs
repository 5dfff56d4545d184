use bevy::prelude::*;

use super::state::{DesignerMode, HoverAnchor, SpawnToolState};
use crate::constants::{sizes, visualizer_colors};
use crate::placement::{bounds_along, frame, AxisType};
use crate::ui::DesignerSettings;

pub struct SpawnVisualizerPlugin;

impl Plugin for SpawnVisualizerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (draw_hover_marker, draw_drag_gizmos).run_if(in_state(DesignerMode::Designer)),
        );
    }
}

/// Gizmo color for the family of `axis`
pub fn axis_color(axis: AxisType) -> Color {
    match axis.positive() {
        AxisType::Right => visualizer_colors::RIGHT,
        AxisType::Up => visualizer_colors::UP,
        _ => visualizer_colors::FORWARD,
    }
}

/// Sphere and normal line where the next drag would anchor
fn draw_hover_marker(mut gizmos: Gizmos, hover: Res<HoverAnchor>) {
    let Some(anchor) = hover.0 else {
        return;
    };

    let position = anchor.translation;
    let normal = anchor.up().as_vec3();
    gizmos.sphere(
        Isometry3d::from_translation(position),
        sizes::HOVER_RADIUS,
        visualizer_colors::HOVER,
    );
    gizmos.line(
        position,
        position + normal * sizes::NORMAL_LENGTH,
        visualizer_colors::HOVER,
    );
}

/// Drag plane ring through the cursor, the drag line and the cursor-aligned axis
fn draw_drag_gizmos(
    mut gizmos: Gizmos,
    tool_state: Res<SpawnToolState>,
    settings: Res<DesignerSettings>,
) {
    let Some(session) = tool_state.tool.session() else {
        return;
    };

    let anchor = frame::transform_to_world(&session.anchor);
    let cursor = frame::vec_to_world(session.cursor_point);
    let plane_normal = anchor.up().as_vec3();

    let radius = session.drag_distance().max(sizes::MIN_RING_RADIUS);
    gizmos.circle(
        Isometry3d::new(anchor.translation, Quat::from_rotation_arc(Vec3::Z, plane_normal)),
        radius,
        visualizer_colors::DRAG,
    );
    gizmos.line(anchor.translation, cursor, visualizer_colors::DRAG);

    let cursor_axis = settings.alignment.positive_cursor_axis();
    let local_axis = match cursor_axis {
        AxisType::None => AxisType::Forward.local_vector(),
        axis => axis.local_vector(),
    };
    let pose = session.last_pose;
    let direction = frame::vec_to_world(pose.rotation * local_axis);
    let length = bounds_along(session.anchor_extent * pose.scale, cursor_axis);
    if length.is_finite() && length > 0.0 {
        let start = frame::vec_to_world(pose.translation);
        gizmos.arrow(start, start + direction * length, axis_color(cursor_axis));
    }
}
