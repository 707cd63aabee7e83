//! The snake as one unit: a kinematic head, the path it leaves behind and
//! the segments laid along that path.

use super::config::SessionConfig;
use super::geometry::{Point, Rect};
use super::kinematics::{KinematicBody, MotionParams};
use super::path::PathTracker;
use super::segments::SegmentChain;

/// Extra segment spacings of path history kept beyond the body length
const PATH_SLACK_SEGMENTS: usize = 4;

/// The snake aggregate: head body, trajectory and trailing segments
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: KinematicBody,
    path: PathTracker,
    chain: SegmentChain,
    spacing: f64,
    collision_radius: f64,
    spawn: Point,
    spawn_heading_deg: f64,
    motion: MotionParams,
}

impl Snake {
    pub fn new(config: &SessionConfig) -> Self {
        let motion = MotionParams {
            speed: config.move_speed,
            turn_speed: config.turn_speed,
            snap_threshold_deg: config.snap_threshold_deg,
            boost_multiplier: config.boost_multiplier,
        };
        let spawn = config.spawn_position;
        let heading = config.initial_heading_deg;

        let body = KinematicBody::new(spawn, heading, motion);
        let mut path = PathTracker::new(config.min_sample_distance);
        seed_path(
            &mut path,
            spawn,
            body.heading_deg(),
            config.segment_distance,
            config.initial_segment_count,
        );
        let chain = SegmentChain::new(
            config.initial_segment_count,
            spawn,
            body.heading_deg(),
            config.segment_distance,
        );

        Self {
            body,
            path,
            chain,
            spacing: config.segment_distance,
            collision_radius: config.collision_radius,
            spawn,
            spawn_heading_deg: heading,
            motion,
        }
    }

    /// Back to the spawn point, at rest, with the initial segment count
    pub fn reset(&mut self) {
        self.body = KinematicBody::new(self.spawn, self.spawn_heading_deg, self.motion);
        seed_path(
            &mut self.path,
            self.spawn,
            self.body.heading_deg(),
            self.spacing,
            self.chain.initial_count(),
        );
        self.chain
            .reset(self.spawn, self.body.heading_deg(), self.spacing);
    }

    /// Steer toward a heading in degrees
    pub fn steer(&mut self, heading_deg: f64) {
        self.body.set_target_heading(heading_deg);
    }

    /// Boost stays on until the next call
    pub fn set_boost(&mut self, boosted: bool) {
        self.body.set_boost(boosted);
    }

    /// Move the head, extend the path and rebuild the body
    pub fn advance(&mut self, dt_seconds: f64) {
        if !self.body.is_moving() {
            return;
        }

        self.body.advance(dt_seconds);
        let head = self.body.position();
        self.path.record(head);

        let retained = (self.chain.count() + PATH_SLACK_SEGMENTS) as f64 * self.spacing;
        self.path.prune(retained);

        self.chain
            .resolve(&self.path, head, self.body.heading_deg(), self.spacing);
    }

    /// Add one segment at the tail
    pub fn grow(&mut self) {
        self.chain.grow(self.body.position());
    }

    /// Current head position
    pub fn head(&self) -> Point {
        self.body.position()
    }

    pub fn heading_deg(&self) -> f64 {
        self.body.heading_deg()
    }

    /// Body segments, nearest to the head first
    pub fn segments(&self) -> &[Point] {
        self.chain.segments()
    }

    pub fn collision_radius(&self) -> f64 {
        self.collision_radius
    }

    /// Bounding box of the head's collision circle
    pub fn head_rect(&self) -> Rect {
        Rect::centered(self.head(), self.collision_radius)
    }

    /// False until the first directional input
    pub fn is_moving(&self) -> bool {
        self.body.is_moving()
    }

    /// Pixels per second, boost included
    pub fn current_speed(&self) -> f64 {
        self.body.current_speed()
    }

    pub fn is_boosted(&self) -> bool {
        self.body.is_boosted()
    }

    /// Length including the head
    pub fn length(&self) -> usize {
        self.chain.length()
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn path(&self) -> &PathTracker {
        &self.path
    }

    /// Distance between neighbouring segments along the path
    pub fn spacing(&self) -> f64 {
        self.spacing
    }
}

/// Replace the path with the straight line the body spawns on, tail first.
///
/// Early segments then resolve from the path instead of the fallback line.
fn seed_path(path: &mut PathTracker, spawn: Point, heading_deg: f64, spacing: f64, count: usize) {
    path.clear();
    for i in (1..=count).rev() {
        path.record(spawn.moved_along(heading_deg + 180.0, spacing * i as f64));
    }
    path.record(spawn);
}
