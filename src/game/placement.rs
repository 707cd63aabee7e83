//! Rejection-sampling placement of food and obstacles.

use rand::Rng;
use std::f64::consts::TAU;

use super::config::PlacementConfig;
use super::geometry::{Point, Rect};

/// Something a new item must keep clear of
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occupant {
    pub position: Point,
    pub radius: f64,
}

impl Occupant {
    pub fn new(position: Point, radius: f64) -> Self {
        Self { position, radius }
    }
}

/// How a placement was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStrategy {
    /// A random sample was accepted after this many attempts
    Sampled { attempts: usize },
    /// Sampling failed; the arena centre was clear
    Center,
    /// Sampling failed; the clear point nearest the centre was used
    NearCenter,
    /// Nothing clear was found; the centre is returned regardless
    Forced,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point,
    pub strategy: PlacementStrategy,
}

impl Placement {
    /// True when random sampling exhausted its attempt budget
    pub fn is_fallback(&self) -> bool {
        !matches!(self.strategy, PlacementStrategy::Sampled { .. })
    }

    /// True when the position honours the clearance to every occupant
    pub fn is_clear(&self) -> bool {
        self.strategy != PlacementStrategy::Forced
    }
}

/// Pick a position for an item of radius `own_radius`.
///
/// Samples uniformly inside `arena` shrunk by `margin + own_radius` and
/// accepts the first point that keeps `own_radius + other.radius + buffer`
/// away from every occupant. After `max_attempts` rejections it falls back
/// to the centre, then to the clear point nearest the centre, and finally
/// to the centre even if it overlaps. It always returns a position.
pub fn place<R: Rng + ?Sized>(
    rng: &mut R,
    avoid: &[Occupant],
    arena: Rect,
    own_radius: f64,
    params: &PlacementConfig,
) -> Placement {
    let bounds = arena.shrunk(params.margin + own_radius);
    let is_clear = |p: Point| {
        avoid.iter().all(|o| {
            let min = own_radius + o.radius + params.buffer;
            p.distance_squared(o.position) >= min * min
        })
    };

    if !bounds.is_empty() {
        for attempt in 1..=params.max_attempts {
            let candidate = Point::new(
                rng.gen_range(bounds.left..=bounds.right),
                rng.gen_range(bounds.top..=bounds.bottom),
            );
            if is_clear(candidate) {
                return Placement {
                    position: candidate,
                    strategy: PlacementStrategy::Sampled { attempts: attempt },
                };
            }
        }
    }

    let center = arena.center();
    let placement = if bounds.is_empty() {
        Placement {
            position: center,
            strategy: PlacementStrategy::Forced,
        }
    } else if is_clear(center) {
        Placement {
            position: center,
            strategy: PlacementStrategy::Center,
        }
    } else {
        match nearest_clear_to_center(bounds, own_radius, is_clear) {
            Some(position) => Placement {
                position,
                strategy: PlacementStrategy::NearCenter,
            },
            None => Placement {
                position: center.clamped(bounds),
                strategy: PlacementStrategy::Forced,
            },
        }
    };

    tracing::warn!(
        "Placement fell back to {:?} at ({:.1}, {:.1}) after {} attempts",
        placement.strategy,
        placement.position.x,
        placement.position.y,
        params.max_attempts
    );
    placement
}

/// Walk outward from the centre of `bounds` in rings one radius apart
fn nearest_clear_to_center(
    bounds: Rect,
    own_radius: f64,
    is_clear: impl Fn(Point) -> bool,
) -> Option<Point> {
    let center = bounds.center();
    let step = own_radius.max(1.0);
    let reach = (bounds.right - center.x)
        .hypot(bounds.bottom - center.y);
    let rings = (reach / step).ceil() as usize;

    for ring in 1..=rings {
        let radius = ring as f64 * step;
        let points = ((TAU * ring as f64).ceil() as usize).max(8);
        for k in 0..points {
            let angle = TAU * k as f64 / points as f64;
            let candidate = center.moved_by(radius * angle.cos(), radius * angle.sin());
            if bounds.contains(candidate) && is_clear(candidate) {
                return Some(candidate);
            }
        }
    }
    None
}
