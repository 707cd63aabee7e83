use super::geometry::Point;
use super::path::PathTracker;

/// Trailing body segments, index 0 nearest the head.
///
/// The chain only grows (one segment per `grow`) or returns to its initial
/// count on `reset`. Positions are rebuilt from the path on every `resolve`.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentChain {
    segments: Vec<Point>,
    initial_count: usize,
}

impl SegmentChain {
    /// A chain laid out in a straight line behind `head`
    pub fn new(count: usize, head: Point, heading_deg: f64, spacing: f64) -> Self {
        let segments = (0..count)
            .map(|i| straight_behind(head, heading_deg, spacing, i))
            .collect();
        Self {
            segments,
            initial_count: count,
        }
    }

    /// Recompute every segment from the path.
    ///
    /// Segment `i` sits `(i + 1) * spacing` behind the head along the path.
    /// Where the path is too short the segment is placed on the straight
    /// line behind the head instead.
    pub fn resolve(&mut self, path: &PathTracker, head: Point, heading_deg: f64, spacing: f64) {
        let resolved: Vec<Point> = (0..self.segments.len())
            .map(|i| {
                path.position_at_distance_behind_head((i + 1) as f64 * spacing)
                    .unwrap_or_else(|| straight_behind(head, heading_deg, spacing, i))
            })
            .collect();
        self.segments = resolved;
    }

    /// Append a segment on top of the current tail; later resolves pull it into place
    pub fn grow(&mut self, head: Point) {
        let tail = self.segments.last().copied().unwrap_or(head);
        self.segments.push(tail);
    }

    /// Back to the initial count, straight behind `head`
    pub fn reset(&mut self, head: Point, heading_deg: f64, spacing: f64) {
        *self = Self::new(self.initial_count, head, heading_deg, spacing);
    }

    pub fn segments(&self) -> &[Point] {
        &self.segments
    }

    pub fn tail(&self) -> Option<Point> {
        self.segments.last().copied()
    }

    pub fn count(&self) -> usize {
        self.segments.len()
    }

    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    /// Length of the snake, head included
    pub fn length(&self) -> usize {
        self.segments.len() + 1
    }
}

fn straight_behind(head: Point, heading_deg: f64, spacing: f64, index: usize) -> Point {
    head.moved_along(heading_deg + 180.0, spacing * (index + 1) as f64)
}
