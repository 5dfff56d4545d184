//! Pose computation for a spawned object.
//!
//! Every function here is pure: the same anchor, cursor point, samples and
//! config always give the same pose. Recovered problems are pushed onto the
//! caller's warning list instead of failing.

use bevy::prelude::*;

use super::axis::AxisType;
use super::basis::{from_z_x, CursorFrame, SwizzledBasis};
use super::config::AlignmentConfig;
use super::error::PlacementWarning;
use super::host::{RotationGridSnap, SurfaceHit};
use super::random::RandomSamples;
use super::rotator::snap_rotation;
use crate::constants::tolerances;

/// Anchor pose for a surface hit: positioned on the hit, local Z along the
/// surface normal (world up when the normal is ignored), local X leaning
/// toward world forward.
pub fn resolve_anchor(
    hit: &SurfaceHit,
    config: &AlignmentConfig,
    grid: &impl RotationGridSnap,
) -> Transform {
    let z_axis = if config.normal_axis == AxisType::None {
        Vec3::Z
    } else {
        hit.normal
    };
    let rotation = from_z_x(z_axis, Vec3::X);
    let rotation = snap_rotation(rotation, config.snap_flags(), grid);

    Transform::from_translation(hit.point).with_rotation(rotation)
}

/// Plane through the anchor, perpendicular to its up vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPlane {
    pub origin: Vec3,
    pub normal: Vec3,
}

impl DragPlane {
    pub fn from_anchor(anchor: &Transform) -> Self {
        Self {
            origin: anchor.translation,
            normal: anchor.rotation * Vec3::Z,
        }
    }

    /// Where the line through `ray` meets the plane. The line is unbounded in
    /// both directions, so the point may lie behind the ray origin.
    pub fn project(&self, ray: Ray3d, warnings: &mut Vec<PlacementWarning>) -> Vec3 {
        let denominator = ray.direction.dot(self.normal);
        if denominator.abs() <= tolerances::PLANE_PARALLEL {
            warnings.push(PlacementWarning::UndefinedPlaneIntersection);
            return self.origin;
        }
        let distance = (self.origin - ray.origin).dot(self.normal) / denominator;
        ray.origin + *ray.direction * distance
    }
}

/// Orthonormal frame pointing from the anchor toward the cursor.
pub fn cursor_frame(
    anchor: &Transform,
    cursor_point: Vec3,
    config: &AlignmentConfig,
    warnings: &mut Vec<PlacementWarning>,
) -> CursorFrame {
    let anchor_forward = anchor.rotation * Vec3::X;

    // The cursor sits exactly on the anchor right after pointer-down.
    let offset = cursor_point - anchor.translation;
    let cursor_direction = if offset.length() > tolerances::DIRECTION {
        offset.normalize()
    } else {
        anchor_forward
    };

    let forward = if config.cursor_axis == AxisType::None {
        anchor_forward
    } else {
        cursor_direction
    };

    let mut up = anchor.rotation * Vec3::Z;
    if (forward.dot(up).abs() - 1.0).abs() <= tolerances::PARALLEL {
        warnings.push(PlacementWarning::DegenerateBasis);
        up = if forward.z.abs() < 1.0 - tolerances::PARALLEL {
            Vec3::Z
        } else {
            Vec3::X
        };
    }

    let right = up.cross(forward).normalize();
    let up = forward.cross(right);
    CursorFrame { forward, right, up }
}

/// Final rotation: cursor frame, axis swizzle, random offset, grid snap.
pub fn resolve_rotation(
    anchor: &Transform,
    cursor_point: Vec3,
    config: &AlignmentConfig,
    samples: &RandomSamples,
    grid: &impl RotationGridSnap,
    warnings: &mut Vec<PlacementWarning>,
) -> Quat {
    let frame = cursor_frame(anchor, cursor_point, config, warnings);
    let basis = SwizzledBasis::new(&frame, config.normal_axis, config.cursor_axis);
    if basis.is_conflicting() {
        warnings.push(PlacementWarning::ConflictingAxisConfig);
    }

    let mut rotation = basis.rotation(&frame);
    if config.apply_random_rotation {
        rotation = (rotation * samples.rotation_offset().to_quat()).normalize();
    }

    snap_rotation(rotation, config.snap_flags(), grid)
}

/// Extent component that has to reach the cursor when scaling toward it.
pub fn bounds_along(extent: Vec3, axis: AxisType) -> f32 {
    match axis.positive() {
        AxisType::Forward => extent.x,
        AxisType::Right => extent.y,
        AxisType::Up => extent.z,
        _ => extent.x.max(extent.y),
    }
}

pub fn resolve_scale(
    anchor: &Transform,
    extent: Vec3,
    cursor_point: Vec3,
    config: &AlignmentConfig,
    samples: &RandomSamples,
    warnings: &mut Vec<PlacementWarning>,
) -> Vec3 {
    let mut scale = Vec3::ONE;

    if config.apply_random_scale {
        scale = samples.scale();
        // Distance drives the magnitude, the random triple only the ratio.
        if config.scale_toward_cursor {
            scale /= scale.max_element();
        }
    }

    if config.scale_toward_cursor {
        let bounds = bounds_along(extent, config.positive_cursor_axis());
        let distance = cursor_point.distance(anchor.translation);
        scale *= distance / bounds;
    }

    if !scale.is_finite() {
        warnings.push(PlacementWarning::NonFiniteScale { extent });
        scale = Vec3::ONE;
    }

    scale
}

/// Complete pose for the draft, offsets included.
pub fn solve_pose(
    anchor: &Transform,
    extent: Vec3,
    cursor_point: Vec3,
    config: &AlignmentConfig,
    samples: &RandomSamples,
    grid: &impl RotationGridSnap,
    warnings: &mut Vec<PlacementWarning>,
) -> Transform {
    let rotation = resolve_rotation(anchor, cursor_point, config, samples, grid, warnings);
    let scale = resolve_scale(anchor, extent, cursor_point, config, samples, warnings);
    let translation = anchor.translation + config.world_offset + rotation * config.relative_offset;

    Transform {
        translation,
        rotation,
        scale,
    }
}

/// Pose produced by one solve, with whatever the solver had to recover from.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSolution {
    pub pose: Transform,
    pub warnings: Vec<PlacementWarning>,
}

impl PlacementSolution {
    /// Project `ray` onto the drag plane of `anchor`, then solve the pose for
    /// the resulting cursor point.
    pub fn drag(
        anchor: &Transform,
        extent: Vec3,
        ray: Ray3d,
        config: &AlignmentConfig,
        samples: &RandomSamples,
        grid: &impl RotationGridSnap,
    ) -> (Vec3, Self) {
        let mut warnings = Vec::new();
        let cursor_point = DragPlane::from_anchor(anchor).project(ray, &mut warnings);
        let pose = solve_pose(anchor, extent, cursor_point, config, samples, grid, &mut warnings);
        (cursor_point, Self { pose, warnings })
    }

    /// Solve for a known cursor point.
    pub fn at(
        anchor: &Transform,
        extent: Vec3,
        cursor_point: Vec3,
        config: &AlignmentConfig,
        samples: &RandomSamples,
        grid: &impl RotationGridSnap,
    ) -> Self {
        let mut warnings = Vec::new();
        let pose = solve_pose(anchor, extent, cursor_point, config, samples, grid, &mut warnings);
        Self { pose, warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::random::{RandomRange, RandomSample};
    use crate::placement::rotator::{RotationGrid, Rotator};

    const EPS: f32 = 1e-4;
    const NO_SNAP: RotationGrid = RotationGrid::new(0.0);

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a - b).length() < EPS, "{a} != {b}");
    }

    fn fixed_samples(rotation: [f32; 3], scale: [f32; 3]) -> RandomSamples {
        let fixed = |value: f32| RandomSample::initial(RandomRange::new(value, value, false));
        RandomSamples {
            rotation: rotation.map(fixed),
            scale: scale.map(fixed),
        }
    }

    fn hit(point: Vec3, normal: Vec3) -> SurfaceHit {
        SurfaceHit {
            point,
            normal: normal.normalize(),
        }
    }

    fn rotation_for(config: &AlignmentConfig, cursor_point: Vec3) -> (Quat, Vec<PlacementWarning>) {
        let mut warnings = Vec::new();
        let rotation = resolve_rotation(
            &Transform::IDENTITY,
            cursor_point,
            config,
            &RandomSamples::default(),
            &NO_SNAP,
            &mut warnings,
        );
        (rotation, warnings)
    }

    #[test]
    fn anchor_z_follows_surface_normal() {
        let config = AlignmentConfig::default();
        let normals = [
            Vec3::Z,
            Vec3::NEG_Z,
            Vec3::X,
            Vec3::new(0.2, -0.5, 0.8),
            Vec3::new(-1.0, 1.0, 0.1),
        ];
        for normal in normals {
            let surface = hit(Vec3::new(1.0, 2.0, 3.0), normal);
            let anchor = resolve_anchor(&surface, &config, &NO_SNAP);
            assert_vec_eq(anchor.rotation * Vec3::Z, surface.normal);
            assert_vec_eq(anchor.translation, surface.point);
            assert_eq!(anchor.scale, Vec3::ONE);
        }
    }

    #[test]
    fn anchor_ignores_normal_when_axis_is_none() {
        let config = AlignmentConfig {
            normal_axis: AxisType::None,
            ..default()
        };
        let anchor = resolve_anchor(&hit(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0)), &config, &NO_SNAP);
        assert!(anchor.rotation.angle_between(Quat::IDENTITY) < EPS);
    }

    #[test]
    fn anchor_snaps_flagged_components() {
        // Normal tilted ~36.87 degrees about Y.
        let surface = hit(Vec3::ZERO, Vec3::new(0.6, 0.0, 0.8));
        let grid = RotationGrid::new(15.0);

        let unsnapped = resolve_anchor(&surface, &AlignmentConfig::default(), &grid);
        assert_vec_eq(unsnapped.rotation * Vec3::Z, surface.normal);

        let config = AlignmentConfig {
            snap_rotation_y: true,
            ..default()
        };
        let snapped = resolve_anchor(&surface, &config, &grid);
        let expected = Vec3::new(30f32.to_radians().sin(), 0.0, 30f32.to_radians().cos());
        assert_vec_eq(snapped.rotation * Vec3::Z, expected);

        // Snapping yaw only leaves this pitch alone.
        let config = AlignmentConfig {
            snap_rotation_z: true,
            ..default()
        };
        let yaw_only = resolve_anchor(&surface, &config, &grid);
        assert_vec_eq(yaw_only.rotation * Vec3::Z, surface.normal);
    }

    #[test]
    fn drag_plane_uses_the_current_anchor_up() {
        let anchor = Transform::from_translation(Vec3::new(0.0, 0.0, 1.0))
            .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let plane = DragPlane::from_anchor(&anchor);
        assert_vec_eq(plane.normal, Vec3::X);

        let ray = Ray3d {
            origin: Vec3::new(5.0, 2.0, 1.0),
            direction: Dir3::NEG_X,
        };
        let mut warnings = Vec::new();
        let point = plane.project(ray, &mut warnings);
        assert_vec_eq(point, Vec3::new(0.0, 2.0, 1.0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn drag_plane_intersects_behind_the_viewer() {
        let plane = DragPlane::from_anchor(&Transform::IDENTITY);
        let ray = Ray3d {
            origin: Vec3::new(1.0, 1.0, -4.0),
            direction: Dir3::NEG_Z,
        };
        let mut warnings = Vec::new();
        assert_vec_eq(plane.project(ray, &mut warnings), Vec3::new(1.0, 1.0, 0.0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn parallel_ray_falls_back_to_anchor() {
        let anchor = Transform::from_xyz(3.0, 4.0, 5.0);
        let plane = DragPlane::from_anchor(&anchor);
        let ray = Ray3d {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Dir3::X,
        };
        let mut warnings = Vec::new();
        assert_vec_eq(plane.project(ray, &mut warnings), anchor.translation);
        assert_eq!(warnings, vec![PlacementWarning::UndefinedPlaneIntersection]);
    }

    #[test]
    fn up_and_forward_reproduce_the_anchor_basis() {
        let config = AlignmentConfig {
            normal_axis: AxisType::Up,
            cursor_axis: AxisType::Forward,
            ..default()
        };
        let (rotation, warnings) = rotation_for(&config, Vec3::new(5.0, 0.0, 0.0));
        assert!(rotation.angle_between(Quat::IDENTITY) < EPS);
        assert!(warnings.is_empty());
    }

    #[test]
    fn forward_axis_turns_toward_the_cursor() {
        let (rotation, _) = rotation_for(&AlignmentConfig::default(), Vec3::new(0.0, 3.0, 0.0));
        assert_vec_eq(rotation * Vec3::X, Vec3::Y);
        assert_vec_eq(rotation * Vec3::Z, Vec3::Z);

        let config = AlignmentConfig {
            cursor_axis: AxisType::Backward,
            ..default()
        };
        let (rotation, _) = rotation_for(&config, Vec3::new(0.0, 3.0, 0.0));
        assert_vec_eq(rotation * Vec3::X, Vec3::NEG_Y);
        assert_vec_eq(rotation * Vec3::Z, Vec3::Z);
    }

    #[test]
    fn cursor_axis_none_keeps_anchor_forward() {
        let config = AlignmentConfig {
            cursor_axis: AxisType::None,
            ..default()
        };
        let (rotation, _) = rotation_for(&config, Vec3::new(0.0, -7.0, 0.0));
        assert!(rotation.angle_between(Quat::IDENTITY) < EPS);
    }

    #[test]
    fn cursor_on_anchor_uses_anchor_forward() {
        let (rotation, warnings) = rotation_for(&AlignmentConfig::default(), Vec3::ZERO);
        assert!(rotation.angle_between(Quat::IDENTITY) < EPS);
        assert!(warnings.is_empty());
    }

    #[test]
    fn parallel_forward_and_up_recover_with_world_axis() {
        // Cursor straight above the anchor: forward == up.
        let (rotation, warnings) = rotation_for(&AlignmentConfig::default(), Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(warnings, vec![PlacementWarning::DegenerateBasis]);
        assert!(rotation.is_finite());
        assert_vec_eq(rotation * Vec3::X, Vec3::Z);
        assert_vec_eq(rotation * Vec3::Z, Vec3::X);
    }

    #[test]
    fn conflicting_axes_fall_back_to_raw_basis() {
        let config = AlignmentConfig {
            normal_axis: AxisType::Up,
            cursor_axis: AxisType::Down,
            ..default()
        };
        let (rotation, warnings) = rotation_for(&config, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(warnings, vec![PlacementWarning::ConflictingAxisConfig]);
        assert_vec_eq(rotation * Vec3::X, Vec3::Y);
        assert_vec_eq(rotation * Vec3::Y, Vec3::NEG_X);
        assert_vec_eq(rotation * Vec3::Z, Vec3::Z);
    }

    #[test]
    fn normal_on_forward_axis_points_x_at_the_surface_normal() {
        let config = AlignmentConfig {
            normal_axis: AxisType::Forward,
            cursor_axis: AxisType::Up,
            ..default()
        };
        let (rotation, warnings) = rotation_for(&config, Vec3::new(0.0, 4.0, 0.0));
        assert!(warnings.is_empty());
        assert_vec_eq(rotation * Vec3::X, Vec3::Z);
        assert_vec_eq(rotation * Vec3::Z, Vec3::Y);
    }

    #[test]
    fn random_rotation_maps_xyz_samples_to_roll_pitch_yaw() {
        let config = AlignmentConfig {
            apply_random_rotation: true,
            ..default()
        };
        let cursor = Vec3::new(1.0, 0.0, 0.0);
        let mut warnings = Vec::new();

        // Z sample is yaw: local X swings toward +Y.
        let samples = fixed_samples([0.0, 0.0, 90.0], [1.0; 3]);
        let rotation = resolve_rotation(&Transform::IDENTITY, cursor, &config, &samples, &NO_SNAP, &mut warnings);
        assert_vec_eq(rotation * Vec3::X, Vec3::Y);

        // X sample is roll: local Y swings toward +Z.
        let samples = fixed_samples([90.0, 0.0, 0.0], [1.0; 3]);
        let rotation = resolve_rotation(&Transform::IDENTITY, cursor, &config, &samples, &NO_SNAP, &mut warnings);
        assert_vec_eq(rotation * Vec3::Y, Vec3::Z);
        assert_vec_eq(rotation * Vec3::X, Vec3::X);

        // Y sample is pitch: local Z swings toward +X.
        let samples = fixed_samples([0.0, 90.0, 0.0], [1.0; 3]);
        let rotation = resolve_rotation(&Transform::IDENTITY, cursor, &config, &samples, &NO_SNAP, &mut warnings);
        assert_vec_eq(rotation * Vec3::Z, Vec3::X);
        assert!(warnings.is_empty());
    }

    #[test]
    fn random_rotation_is_ignored_when_disabled() {
        let samples = fixed_samples([10.0, 20.0, 30.0], [1.0; 3]);
        let mut warnings = Vec::new();
        let rotation = resolve_rotation(
            &Transform::IDENTITY,
            Vec3::X,
            &AlignmentConfig::default(),
            &samples,
            &NO_SNAP,
            &mut warnings,
        );
        assert!(rotation.angle_between(Quat::IDENTITY) < EPS);
    }

    #[test]
    fn snap_applies_after_random_rotation() {
        let config = AlignmentConfig {
            apply_random_rotation: true,
            snap_rotation_z: true,
            ..default()
        };
        let samples = fixed_samples([0.0, 0.0, 50.0], [1.0; 3]);
        let mut warnings = Vec::new();
        let rotation = resolve_rotation(
            &Transform::IDENTITY,
            Vec3::X,
            &config,
            &samples,
            &RotationGrid::new(45.0),
            &mut warnings,
        );
        let rotator = Rotator::from_quat(rotation);
        assert!((rotator.yaw - 45.0).abs() < 1e-3);
        assert!(rotator.roll.abs() < 1e-3 && rotator.pitch.abs() < 1e-3);
    }

    #[test]
    fn default_scale_is_one() {
        let mut warnings = Vec::new();
        let scale = resolve_scale(
            &Transform::IDENTITY,
            Vec3::splat(50.0),
            Vec3::new(100.0, 0.0, 0.0),
            &AlignmentConfig::default(),
            &RandomSamples::default(),
            &mut warnings,
        );
        assert_eq!(scale, Vec3::ONE);
    }

    #[test]
    fn scale_toward_cursor_fits_bounds_to_drag_distance() {
        let config = AlignmentConfig {
            scale_toward_cursor: true,
            cursor_axis: AxisType::Backward,
            ..default()
        };
        let mut warnings = Vec::new();
        let scale = resolve_scale(
            &Transform::IDENTITY,
            Vec3::new(50.0, 10.0, 5.0),
            Vec3::new(0.0, 100.0, 0.0),
            &config,
            &RandomSamples::default(),
            &mut warnings,
        );
        assert_vec_eq(scale, Vec3::splat(2.0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn bounds_follow_the_positive_cursor_axis() {
        let extent = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(bounds_along(extent, AxisType::Forward), 1.0);
        assert_eq!(bounds_along(extent, AxisType::Left), 2.0);
        assert_eq!(bounds_along(extent, AxisType::Down), 3.0);
        assert_eq!(bounds_along(extent, AxisType::None), 2.0);
    }

    #[test]
    fn random_scale_becomes_a_ratio_when_scaling_toward_cursor() {
        let samples = fixed_samples([0.0; 3], [0.5, 1.0, 2.0]);
        let mut warnings = Vec::new();

        let config = AlignmentConfig {
            apply_random_scale: true,
            ..default()
        };
        let scale = resolve_scale(&Transform::IDENTITY, Vec3::ONE, Vec3::ZERO, &config, &samples, &mut warnings);
        assert_vec_eq(scale, Vec3::new(0.5, 1.0, 2.0));

        let config = AlignmentConfig {
            apply_random_scale: true,
            scale_toward_cursor: true,
            ..default()
        };
        let scale = resolve_scale(
            &Transform::IDENTITY,
            Vec3::splat(2.0),
            Vec3::new(8.0, 0.0, 0.0),
            &config,
            &samples,
            &mut warnings,
        );
        assert_vec_eq(scale, Vec3::new(1.0, 2.0, 4.0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn zero_bounds_reset_scale_to_one() {
        let config = AlignmentConfig {
            scale_toward_cursor: true,
            ..default()
        };
        let mut warnings = Vec::new();

        for cursor in [Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO] {
            let scale = resolve_scale(
                &Transform::IDENTITY,
                Vec3::ZERO,
                cursor,
                &config,
                &RandomSamples::default(),
                &mut warnings,
            );
            assert_eq!(scale, Vec3::ONE);
        }
        assert_eq!(
            warnings,
            vec![
                PlacementWarning::NonFiniteScale { extent: Vec3::ZERO },
                PlacementWarning::NonFiniteScale { extent: Vec3::ZERO },
            ]
        );
    }

    #[test]
    fn solve_pose_applies_world_and_relative_offsets() {
        let config = AlignmentConfig {
            world_offset: Vec3::new(0.0, 0.0, 1.0),
            relative_offset: Vec3::new(2.0, 0.0, 0.0),
            ..default()
        };
        let anchor = Transform::from_xyz(10.0, 0.0, 0.0);
        let mut warnings = Vec::new();
        let pose = solve_pose(
            &anchor,
            Vec3::ONE,
            Vec3::new(10.0, 5.0, 0.0),
            &config,
            &RandomSamples::default(),
            &NO_SNAP,
            &mut warnings,
        );
        // Local X points at the cursor (+Y), so the relative offset moves along +Y.
        assert_vec_eq(pose.translation, Vec3::new(10.0, 2.0, 1.0));
        assert_eq!(pose.scale, Vec3::ONE);
        assert!(warnings.is_empty());
    }

    #[test]
    fn drag_collects_projection_and_solve_warnings() {
        let config = AlignmentConfig {
            scale_toward_cursor: true,
            ..default()
        };
        let parallel = Ray3d {
            origin: Vec3::new(0.0, 0.0, 3.0),
            direction: Dir3::Y,
        };
        let (cursor, solution) = PlacementSolution::drag(
            &Transform::IDENTITY,
            Vec3::ZERO,
            parallel,
            &config,
            &RandomSamples::default(),
            &NO_SNAP,
        );
        assert_eq!(cursor, Vec3::ZERO);
        assert_eq!(
            solution.warnings,
            vec![
                PlacementWarning::UndefinedPlaneIntersection,
                PlacementWarning::NonFiniteScale { extent: Vec3::ZERO },
            ]
        );
        assert_eq!(solution.pose.scale, Vec3::ONE);
    }
}
