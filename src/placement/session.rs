//! The click-drag state machine.
//!
//! `SpawnTool` is either idle or dragging exactly one draft. Pointer events
//! drive the transitions; the host collaborators are borrowed per call so the
//! tool itself holds no references into the scene.

use std::mem::{discriminant, Discriminant};

use bevy::prelude::*;

use super::config::AlignmentConfig;
use super::error::{PlacementError, PlacementWarning};
use super::host::{DraftSpawner, PlacementHost, RotationGridSnap, SurfaceRaycast};
use super::random::RandomSamples;
use super::solver::{resolve_anchor, PlacementSolution};
use crate::constants::tolerances;

/// State of a single drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSession {
    /// Pose at the initial hit, scale one
    pub anchor: Transform,
    /// Local half-extent of the draft at unit scale
    pub anchor_extent: Vec3,
    /// Latest drag-plane intersection
    pub cursor_point: Vec3,
    /// Pose most recently applied to the draft
    pub last_pose: Transform,
}

impl PlacementSession {
    pub fn drag_distance(&self) -> f32 {
        self.cursor_point.distance(self.anchor.translation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSpawn<H> {
    pub draft: H,
    pub session: PlacementSession,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnState<H> {
    Idle,
    Dragging(ActiveSpawn<H>),
}

/// How a gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Committed,
    Discarded,
}

pub struct SpawnTool<H> {
    state: SpawnState<H>,
    samples: RandomSamples,
    rng: fastrand::Rng,
    last_warnings: Vec<PlacementWarning>,
    /// Warning kinds already logged during the current gesture
    reported: Vec<Discriminant<PlacementWarning>>,
}

impl<H: Copy + PartialEq + std::fmt::Debug> Default for SpawnTool<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy + PartialEq + std::fmt::Debug> SpawnTool<H> {
    pub fn new() -> Self {
        Self::from_rng(fastrand::Rng::new())
    }

    /// Tool with a deterministic random stream.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(fastrand::Rng::with_seed(seed))
    }

    fn from_rng(rng: fastrand::Rng) -> Self {
        Self {
            state: SpawnState::Idle,
            samples: RandomSamples::default(),
            rng,
            last_warnings: Vec::new(),
            reported: Vec::new(),
        }
    }

    pub fn state(&self) -> &SpawnState<H> {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SpawnState::Dragging(_))
    }

    pub fn session(&self) -> Option<&PlacementSession> {
        match &self.state {
            SpawnState::Dragging(active) => Some(&active.session),
            SpawnState::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<H> {
        match &self.state {
            SpawnState::Dragging(active) => Some(active.draft),
            SpawnState::Idle => None,
        }
    }

    pub fn samples(&self) -> &RandomSamples {
        &self.samples
    }

    /// Warnings from the most recent solve.
    pub fn last_warnings(&self) -> &[PlacementWarning] {
        &self.last_warnings
    }

    /// Anchor pose under the cursor, for the idle hover indicator.
    pub fn hover<P: SurfaceRaycast + RotationGridSnap>(
        &self,
        ray: Ray3d,
        config: &AlignmentConfig,
        host: &mut P,
    ) -> Result<Transform, PlacementError> {
        let hit = host.raycast(ray).ok_or(PlacementError::NoHit)?;
        Ok(resolve_anchor(&hit, config, &*host))
    }

    /// Start a gesture at the surface under `ray`. Ignored while dragging.
    pub fn pointer_down<P: PlacementHost<Handle = H>>(
        &mut self,
        ray: Ray3d,
        config: &AlignmentConfig,
        host: &mut P,
    ) -> Result<(), PlacementError> {
        if self.is_dragging() {
            return Ok(());
        }

        let hit = host.raycast(ray).ok_or(PlacementError::NoHit)?;
        let anchor = resolve_anchor(&hit, config, &*host);

        self.samples.regenerate(config, &mut self.rng);
        let draft = host
            .materialize_draft(&anchor)
            .ok_or(PlacementError::NoDraft)?;

        let cursor_point = anchor.translation;
        let solution = PlacementSolution::at(
            &anchor,
            draft.extent,
            cursor_point,
            config,
            &self.samples,
            &*host,
        );
        host.update_draft(draft.handle, &solution.pose);

        self.state = SpawnState::Dragging(ActiveSpawn {
            draft: draft.handle,
            session: PlacementSession {
                anchor,
                anchor_extent: draft.extent,
                cursor_point,
                last_pose: solution.pose,
            },
        });
        self.reported.clear();
        self.record_warnings(solution.warnings);
        Ok(())
    }

    /// Follow the cursor across the drag plane.
    pub fn pointer_move<P: PlacementHost<Handle = H>>(
        &mut self,
        ray: Ray3d,
        config: &AlignmentConfig,
        host: &mut P,
    ) {
        let SpawnState::Dragging(active) = &mut self.state else {
            return;
        };

        let session = &mut active.session;
        let (cursor_point, solution) = PlacementSolution::drag(
            &session.anchor,
            session.anchor_extent,
            ray,
            config,
            &self.samples,
            &*host,
        );
        session.cursor_point = cursor_point;
        session.last_pose = solution.pose;
        host.update_draft(active.draft, &solution.pose);

        self.record_warnings(solution.warnings);
    }

    /// Draw new random values for the current draft.
    pub fn secondary_pressed<P: PlacementHost<Handle = H>>(
        &mut self,
        config: &AlignmentConfig,
        host: &mut P,
    ) {
        let SpawnState::Dragging(active) = &mut self.state else {
            return;
        };

        self.samples.regenerate(config, &mut self.rng);
        let session = &mut active.session;
        let solution = PlacementSolution::at(
            &session.anchor,
            session.anchor_extent,
            session.cursor_point,
            config,
            &self.samples,
            &*host,
        );
        session.last_pose = solution.pose;
        host.update_draft(active.draft, &solution.pose);

        self.record_warnings(solution.warnings);
    }

    /// Finish the gesture. A draft scaled down to nothing is discarded.
    pub fn pointer_up<P: DraftSpawner<Handle = H>>(&mut self, host: &mut P) -> Option<SpawnOutcome> {
        let SpawnState::Dragging(active) = std::mem::replace(&mut self.state, SpawnState::Idle)
        else {
            return None;
        };

        if active.session.last_pose.scale.length() <= tolerances::SCALE {
            host.discard_draft(active.draft);
            return Some(SpawnOutcome::Discarded);
        }

        host.commit_draft(active.draft);
        Some(SpawnOutcome::Committed)
    }

    /// Abandon any gesture in progress. Safe to call repeatedly.
    pub fn deactivate<P: DraftSpawner<Handle = H>>(&mut self, host: &mut P) -> Option<SpawnOutcome> {
        let SpawnState::Dragging(active) = std::mem::replace(&mut self.state, SpawnState::Idle)
        else {
            return None;
        };

        host.discard_draft(active.draft);
        Some(SpawnOutcome::Discarded)
    }

    fn record_warnings(&mut self, warnings: Vec<PlacementWarning>) {
        for warning in &warnings {
            let kind = discriminant(warning);
            if !self.reported.contains(&kind) {
                warn!("Spawn placement: {}", warning);
                self.reported.push(kind);
            }
        }
        self.last_warnings = warnings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::axis::AxisType;
    use crate::placement::host::{Draft, SurfaceHit};

    /// Floor at z = 0 under every ray, drafts numbered from zero.
    struct MockHost {
        hit: Option<SurfaceHit>,
        extent: Vec3,
        can_spawn: bool,
        materialized: Vec<u32>,
        updates: Vec<(u32, Transform)>,
        committed: Vec<u32>,
        discarded: Vec<u32>,
    }

    impl MockHost {
        fn floor() -> Self {
            Self {
                hit: Some(SurfaceHit {
                    point: Vec3::ZERO,
                    normal: Vec3::Z,
                }),
                extent: Vec3::ONE,
                can_spawn: true,
                materialized: Vec::new(),
                updates: Vec::new(),
                committed: Vec::new(),
                discarded: Vec::new(),
            }
        }

        fn void() -> Self {
            Self {
                hit: None,
                ..Self::floor()
            }
        }
    }

    impl SurfaceRaycast for MockHost {
        fn raycast(&mut self, _ray: Ray3d) -> Option<SurfaceHit> {
            self.hit
        }
    }

    impl RotationGridSnap for MockHost {
        fn snap_component(&self, degrees: f32) -> f32 {
            degrees
        }
    }

    impl DraftSpawner for MockHost {
        type Handle = u32;

        fn materialize_draft(&mut self, _pose: &Transform) -> Option<Draft<u32>> {
            if !self.can_spawn {
                return None;
            }
            let handle = self.materialized.len() as u32;
            self.materialized.push(handle);
            Some(Draft {
                handle,
                extent: self.extent,
            })
        }

        fn update_draft(&mut self, handle: u32, pose: &Transform) {
            self.updates.push((handle, *pose));
        }

        fn commit_draft(&mut self, handle: u32) {
            self.committed.push(handle);
        }

        fn discard_draft(&mut self, handle: u32) {
            self.discarded.push(handle);
        }
    }

    fn down_ray() -> Ray3d {
        Ray3d {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Dir3::NEG_Z,
        }
    }

    fn ray_at(x: f32, y: f32) -> Ray3d {
        Ray3d {
            origin: Vec3::new(x, y, 10.0),
            direction: Dir3::NEG_Z,
        }
    }

    #[test]
    fn miss_stays_idle_without_a_draft() {
        let mut host = MockHost::void();
        let mut tool = SpawnTool::<u32>::with_seed(1);

        let result = tool.pointer_down(down_ray(), &AlignmentConfig::default(), &mut host);
        assert_eq!(result, Err(PlacementError::NoHit));
        assert_eq!(tool.state(), &SpawnState::Idle);
        assert!(host.materialized.is_empty());
        assert!(host.updates.is_empty());
    }

    #[test]
    fn nothing_to_spawn_stays_idle() {
        let mut host = MockHost {
            can_spawn: false,
            ..MockHost::floor()
        };
        let mut tool = SpawnTool::<u32>::with_seed(1);

        let result = tool.pointer_down(down_ray(), &AlignmentConfig::default(), &mut host);
        assert_eq!(result, Err(PlacementError::NoDraft));
        assert!(!tool.is_dragging());
    }

    #[test]
    fn drag_then_release_commits_once() {
        let mut host = MockHost::floor();
        let mut tool = SpawnTool::<u32>::with_seed(2);
        let config = AlignmentConfig::default();

        tool.pointer_down(down_ray(), &config, &mut host).unwrap();
        assert!(tool.is_dragging());
        assert_eq!(tool.draft(), Some(0));
        assert_eq!(host.updates.len(), 1);

        tool.pointer_move(ray_at(0.0, 4.0), &config, &mut host);
        let session = tool.session().unwrap();
        assert!((session.cursor_point - Vec3::new(0.0, 4.0, 0.0)).length() < 1e-4);
        assert!((session.drag_distance() - 4.0).abs() < 1e-4);
        assert!((session.last_pose.rotation * Vec3::X - Vec3::Y).length() < 1e-4);
        assert_eq!(host.updates.last().map(|(_, pose)| *pose), Some(session.last_pose));

        assert_eq!(tool.pointer_up(&mut host), Some(SpawnOutcome::Committed));
        assert_eq!(host.committed, vec![0]);
        assert!(host.discarded.is_empty());
        assert_eq!(tool.state(), &SpawnState::Idle);

        // Releasing again has nothing to finish.
        assert_eq!(tool.pointer_up(&mut host), None);
        assert_eq!(host.committed, vec![0]);
    }

    #[test]
    fn release_without_drag_distance_discards_when_scaling_to_cursor() {
        let mut host = MockHost::floor();
        let mut tool = SpawnTool::<u32>::with_seed(3);
        let config = AlignmentConfig {
            scale_toward_cursor: true,
            ..default()
        };

        tool.pointer_down(down_ray(), &config, &mut host).unwrap();
        assert_eq!(tool.session().unwrap().last_pose.scale, Vec3::ZERO);

        assert_eq!(tool.pointer_up(&mut host), Some(SpawnOutcome::Discarded));
        assert_eq!(host.discarded, vec![0]);
        assert!(host.committed.is_empty());
    }

    #[test]
    fn scale_toward_cursor_grows_with_drag() {
        let mut host = MockHost {
            extent: Vec3::new(2.0, 1.0, 1.0),
            ..MockHost::floor()
        };
        let mut tool = SpawnTool::<u32>::with_seed(4);
        let config = AlignmentConfig {
            scale_toward_cursor: true,
            ..default()
        };

        tool.pointer_down(down_ray(), &config, &mut host).unwrap();
        tool.pointer_move(ray_at(6.0, 0.0), &config, &mut host);
        let scale = tool.session().unwrap().last_pose.scale;
        assert!((scale - Vec3::splat(3.0)).length() < 1e-4);
        assert_eq!(tool.pointer_up(&mut host), Some(SpawnOutcome::Committed));
    }

    #[test]
    fn discarding_twice_discards_once() {
        let mut host = MockHost::floor();
        let mut tool = SpawnTool::<u32>::with_seed(5);

        tool.pointer_down(down_ray(), &AlignmentConfig::default(), &mut host).unwrap();
        assert_eq!(tool.deactivate(&mut host), Some(SpawnOutcome::Discarded));
        assert_eq!(tool.deactivate(&mut host), None);
        assert_eq!(tool.pointer_up(&mut host), None);

        assert_eq!(host.discarded, vec![0]);
        assert!(host.committed.is_empty());
    }

    #[test]
    fn second_press_while_dragging_is_ignored() {
        let mut host = MockHost::floor();
        let mut tool = SpawnTool::<u32>::with_seed(6);
        let config = AlignmentConfig::default();

        tool.pointer_down(down_ray(), &config, &mut host).unwrap();
        tool.pointer_down(down_ray(), &config, &mut host).unwrap();
        assert_eq!(host.materialized, vec![0]);
    }

    #[test]
    fn secondary_button_regenerates_samples() {
        let mut host = MockHost::floor();
        let mut tool = SpawnTool::<u32>::with_seed(7);
        let config = AlignmentConfig {
            apply_random_rotation: true,
            ..default()
        };

        tool.secondary_pressed(&config, &mut host);
        assert_eq!(tool.samples(), &RandomSamples::default());
        assert!(host.updates.is_empty());

        tool.pointer_down(down_ray(), &config, &mut host).unwrap();
        let first = *tool.samples();
        assert_ne!(first, RandomSamples::default());
        let first_pose = tool.session().unwrap().last_pose;

        tool.secondary_pressed(&config, &mut host);
        assert_ne!(*tool.samples(), first);
        assert_eq!(host.updates.len(), 2);
        assert_ne!(tool.session().unwrap().last_pose.rotation, first_pose.rotation);
    }

    #[test]
    fn recovered_problems_are_reported() {
        let mut host = MockHost {
            extent: Vec3::ZERO,
            ..MockHost::floor()
        };
        let mut tool = SpawnTool::<u32>::with_seed(8);
        let config = AlignmentConfig {
            scale_toward_cursor: true,
            ..default()
        };

        tool.pointer_down(down_ray(), &config, &mut host).unwrap();
        assert_eq!(
            tool.last_warnings(),
            &[PlacementWarning::NonFiniteScale { extent: Vec3::ZERO }]
        );
        assert_eq!(tool.session().unwrap().last_pose.scale, Vec3::ONE);

        let conflicting = AlignmentConfig {
            cursor_axis: AxisType::Down,
            ..default()
        };
        tool.pointer_move(ray_at(1.0, 0.0), &conflicting, &mut host);
        assert_eq!(tool.last_warnings(), &[PlacementWarning::ConflictingAxisConfig]);
    }

    #[test]
    fn hover_resolves_the_anchor_without_side_effects() {
        let mut host = MockHost {
            hit: Some(SurfaceHit {
                point: Vec3::new(1.0, 2.0, 0.5),
                normal: Vec3::X,
            }),
            ..MockHost::floor()
        };
        let tool = SpawnTool::<u32>::with_seed(9);

        let anchor = tool
            .hover(down_ray(), &AlignmentConfig::default(), &mut host)
            .unwrap();
        assert_eq!(anchor.translation, Vec3::new(1.0, 2.0, 0.5));
        assert!((anchor.rotation * Vec3::Z - Vec3::X).length() < 1e-4);
        assert!(host.materialized.is_empty());

        let mut void = MockHost::void();
        assert_eq!(
            tool.hover(down_ray(), &AlignmentConfig::default(), &mut void),
            Err(PlacementError::NoHit)
        );
    }
}
