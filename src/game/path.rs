//! Trajectory history used to lay the body out behind the head.

use std::collections::VecDeque;

use super::geometry::Point;

/// A recorded head position stamped with the distance travelled so far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    pub position: Point,
    pub arc_length: f64,
}

/// The head's recent trajectory as an arc-length stamped polyline.
///
/// Samples are ordered oldest first. `arc_length` is strictly increasing
/// from one sample to the next because a sample is only recorded once the
/// head has moved more than `min_sample_distance` away from the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTracker {
    samples: VecDeque<PathSample>,
    min_sample_distance: f64,
}

impl PathTracker {
    pub fn new(min_sample_distance: f64) -> Self {
        Self {
            samples: VecDeque::new(),
            min_sample_distance,
        }
    }

    /// Append `position` if it is far enough from the last sample
    ///
    /// Returns true when a sample was recorded.
    pub fn record(&mut self, position: Point) -> bool {
        let Some(last) = self.samples.back() else {
            self.samples.push_back(PathSample {
                position,
                arc_length: 0.0,
            });
            return true;
        };

        let step = last.position.distance(position);
        if step <= self.min_sample_distance {
            return false;
        }

        let arc_length = last.arc_length + step;
        self.samples.push_back(PathSample {
            position,
            arc_length,
        });
        true
    }

    /// Drop old samples so the retained window stays close to `max_retained_length`.
    ///
    /// The front sample is dropped only while the sample after it still lies
    /// at least `max_retained_length` behind the newest one, so every
    /// distance up to the bound stays answerable. At least two samples are
    /// always kept.
    pub fn prune(&mut self, max_retained_length: f64) {
        let total = self.total_length();
        while self.samples.len() > 2 {
            let next_back = self.samples[1].arc_length;
            if total - next_back >= max_retained_length {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// The point `distance` along the path behind the newest sample.
    ///
    /// Returns `None` when fewer than two samples exist, or when `distance`
    /// reaches further back than the retained window.
    pub fn position_at_distance_behind_head(&self, distance: f64) -> Option<Point> {
        if self.samples.len() < 2 || distance < 0.0 || distance > self.retained_length() {
            return None;
        }

        let target = self.total_length() - distance;
        // first sample at or beyond the target arc length
        let upper = self
            .samples
            .partition_point(|s| s.arc_length < target)
            .max(1);
        let b = self.samples.get(upper)?;
        let a = self.samples[upper - 1];

        let span = b.arc_length - a.arc_length;
        let t = ((target - a.arc_length) / span).clamp(0.0, 1.0);
        Some(a.position.lerp(b.position, t))
    }

    /// Cumulative arc length of the newest sample
    pub fn total_length(&self) -> f64 {
        self.samples.back().map(|s| s.arc_length).unwrap_or(0.0)
    }

    /// Arc length covered by the retained window
    pub fn retained_length(&self) -> f64 {
        match (self.samples.front(), self.samples.back()) {
            (Some(front), Some(back)) => back.arc_length - front.arc_length,
            _ => 0.0,
        }
    }

    pub fn samples(&self) -> impl Iterator<Item = &PathSample> {
        self.samples.iter()
    }

    /// Number of retained samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_path(points: usize, step: f64) -> PathTracker {
        let mut path = PathTracker::new(0.5);
        for i in 0..points {
            path.record(Point::new(i as f64 * step, 0.0));
        }
        path
    }

    #[test]
    fn test_skips_samples_below_min_distance() {
        let mut path = PathTracker::new(0.5);
        assert!(path.record(Point::new(0.0, 0.0)));
        assert!(!path.record(Point::new(0.3, 0.0)));
        assert!(!path.record(Point::new(0.5, 0.0)));
        assert!(path.record(Point::new(0.6, 0.0)));
        assert_eq!(path.len(), 2);
        assert!((path.total_length() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_arc_length_is_sum_of_steps() {
        let mut path = PathTracker::new(0.5);
        let points = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 8.0),
            Point::new(6.0, 18.0),
            Point::new(1.0, 18.0),
        ];
        for p in points {
            path.record(p);
        }

        let samples: Vec<_> = path.samples().copied().collect();
        let mut expected = 0.0;
        for pair in samples.windows(2) {
            assert!(pair[1].arc_length > pair[0].arc_length);
            expected += pair[0].position.distance(pair[1].position);
            assert!((pair[1].arc_length - expected).abs() < 1e-9);
        }
        assert!((path.total_length() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolates_between_samples() {
        let path = straight_path(11, 10.0); // 0..=100 along x
        let p = path.position_at_distance_behind_head(25.0).unwrap();
        assert!((p.x - 75.0).abs() < 1e-9);
        assert_eq!(p.y, 0.0);

        let head = path.position_at_distance_behind_head(0.0).unwrap();
        assert!((head.x - 100.0).abs() < 1e-9);

        let oldest = path.position_at_distance_behind_head(100.0).unwrap();
        assert!(oldest.x.abs() < 1e-9);
    }

    #[test]
    fn test_interpolates_around_corner() {
        let mut path = PathTracker::new(0.5);
        path.record(Point::new(0.0, 0.0));
        path.record(Point::new(10.0, 0.0));
        path.record(Point::new(10.0, 10.0));
        let p = path.position_at_distance_behind_head(15.0).unwrap();
        assert!((p.x - 5.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_too_short_path_returns_none() {
        let mut path = PathTracker::new(0.5);
        assert_eq!(path.position_at_distance_behind_head(0.0), None);
        path.record(Point::new(0.0, 0.0));
        assert_eq!(path.position_at_distance_behind_head(0.0), None);
        path.record(Point::new(10.0, 0.0));
        assert_eq!(path.position_at_distance_behind_head(10.5), None);
        assert!(path.position_at_distance_behind_head(10.0).is_some());
    }

    #[test]
    fn test_prune_bounds_window_but_keeps_coverage() {
        let mut path = straight_path(101, 1.0); // 100 units
        path.prune(30.0);
        assert!(path.retained_length() >= 30.0);
        assert!(path.retained_length() < 32.0);
        assert!(path.position_at_distance_behind_head(30.0).is_some());
        assert!(path.position_at_distance_behind_head(40.0).is_none());
        assert!((path.total_length() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_prune_keeps_two_samples() {
        let mut path = straight_path(5, 10.0);
        path.prune(0.0);
        assert_eq!(path.len(), 2);
        assert!(path.position_at_distance_behind_head(5.0).is_some());
    }
}
