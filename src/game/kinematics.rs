//! Head motion: continuous position, smooth heading changes and boost.

use super::geometry::{Point, normalize_angle, unit_vector};

/// Turn rate multiplier grows with the angular gap but never exceeds this
const MAX_TURN_RATE_FACTOR: f64 = 2.0;

/// Motion parameters copied out of the session configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub speed: f64,
    pub turn_speed: f64,
    pub snap_threshold_deg: f64,
    pub boost_multiplier: f64,
}

/// The snake head as a moving body
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    position: Point,
    heading_deg: f64,
    target_heading_deg: f64,
    velocity: (f64, f64),
    boosted: bool,
    is_moving: bool,
    params: MotionParams,
}

impl KinematicBody {
    /// A body at rest; it stays inert until the first directional input
    pub fn new(position: Point, heading_deg: f64, params: MotionParams) -> Self {
        let heading = normalize_angle(heading_deg);
        Self {
            position,
            heading_deg: heading,
            target_heading_deg: heading,
            velocity: (0.0, 0.0),
            boosted: false,
            is_moving: false,
            params,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Heading in degrees, normalized to `(-180, 180]`
    pub fn heading_deg(&self) -> f64 {
        self.heading_deg
    }

    /// Heading the body is turning toward
    pub fn target_heading_deg(&self) -> f64 {
        self.target_heading_deg
    }

    /// Velocity from the last `advance`, in pixels per second
    pub fn velocity(&self) -> (f64, f64) {
        self.velocity
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn is_boosted(&self) -> bool {
        self.boosted
    }

    /// Speed the body travels at right now, boost included
    pub fn current_speed(&self) -> f64 {
        if self.boosted {
            self.params.speed * self.params.boost_multiplier
        } else {
            self.params.speed
        }
    }

    /// Record the desired heading and start moving. Nothing moves until `advance`.
    ///
    /// Non-finite angles are ignored.
    pub fn set_target_heading(&mut self, angle_deg: f64) {
        if !angle_deg.is_finite() {
            return;
        }
        self.target_heading_deg = normalize_angle(angle_deg);
        self.is_moving = true;
    }

    pub fn set_boost(&mut self, boosted: bool) {
        self.boosted = boosted;
    }

    /// Integrate heading and position over `dt_seconds`
    pub fn advance(&mut self, dt_seconds: f64) {
        if !self.is_moving {
            return;
        }

        self.heading_deg = turn_toward(
            self.heading_deg,
            self.target_heading_deg,
            self.params.turn_speed,
            self.params.snap_threshold_deg,
            dt_seconds,
        );

        let (ux, uy) = unit_vector(self.heading_deg);
        let speed = self.current_speed();
        self.velocity = (ux * speed, uy * speed);

        self.position = self
            .position
            .moved_by(self.velocity.0 * dt_seconds, self.velocity.1 * dt_seconds);
    }
}

/// One bounded turning step from `current` toward `target`.
///
/// Gaps within `snap_threshold_deg` close instantly. Larger gaps rotate at
/// `turn_speed * min(2, 1 + |gap| / 90)` degrees per second without
/// overshooting the target.
pub fn turn_toward(
    current: f64,
    target: f64,
    turn_speed: f64,
    snap_threshold_deg: f64,
    dt_seconds: f64,
) -> f64 {
    let delta = normalize_angle(target - current);
    let gap = delta.abs();

    if gap <= snap_threshold_deg {
        return normalize_angle(target);
    }

    let effective_rate = turn_speed * MAX_TURN_RATE_FACTOR.min(1.0 + gap / 90.0);
    let step = effective_rate * dt_seconds.max(0.0);
    if step >= gap {
        return normalize_angle(target);
    }
    normalize_angle(current + step.copysign(delta))
}
