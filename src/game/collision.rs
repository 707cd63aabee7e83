//! Collision primitives.
//!
//! Every collision kind reduces to the same circle-circle test; the kinds
//! differ only in what the caller does with the answer.

use super::geometry::{Point, Rect};

/// True iff the two circles overlap (centre distance strictly below the sum of radii)
pub fn circle_overlap(pos_a: Point, radius_a: f64, pos_b: Point, radius_b: f64) -> bool {
    let reach = radius_a + radius_b;
    pos_a.distance_squared(pos_b) < reach * reach
}

/// Head against its own body.
///
/// The `skip` segments nearest the head are ignored because they overlap it
/// naturally on spawn and in turns. Bodies with fewer than `min_segments`
/// segments never collide.
pub fn self_collision(
    head: Point,
    head_radius: f64,
    segments: &[Point],
    segment_radius: f64,
    skip: usize,
    min_segments: usize,
) -> bool {
    if segments.len() < min_segments {
        return false;
    }
    segments
        .iter()
        .skip(skip)
        .any(|&seg| circle_overlap(head, head_radius, seg, segment_radius))
}

/// True if any edge of `head_rect` lies outside `[0, width] x [0, height]`
pub fn boundary_collision(head_rect: Rect, arena_width: f64, arena_height: f64) -> bool {
    head_rect.left < 0.0
        || head_rect.top < 0.0
        || head_rect.right > arena_width
        || head_rect.bottom > arena_height
}

pub fn wall_collision(head: Point, head_radius: f64, walls: &[Point], wall_radius: f64) -> bool {
    walls
        .iter()
        .any(|&wall| circle_overlap(head, head_radius, wall, wall_radius))
}

pub fn food_collision(head: Point, head_radius: f64, food: Point, food_radius: f64) -> bool {
    circle_overlap(head, head_radius, food, food_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_circle_overlap_is_strict() {
        let a = Point::new(0.0, 0.0);
        assert!(circle_overlap(a, 5.0, Point::new(9.9, 0.0), 5.0));
        assert!(!circle_overlap(a, 5.0, Point::new(10.0, 0.0), 5.0));
        assert!(circle_overlap(a, 5.0, a, 5.0));
    }

    #[test]
    fn test_circle_overlap_is_symmetric() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let a = Point::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            let b = Point::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
            let ra = rng.gen_range(0.1..30.0);
            let rb = rng.gen_range(0.1..30.0);
            assert_eq!(circle_overlap(a, ra, b, rb), circle_overlap(b, rb, a, ra));
        }
    }

    #[test]
    fn test_self_collision_skips_near_segments() {
        let head = Point::new(0.0, 0.0);
        let mut segments = vec![head; 3];
        segments.push(Point::new(100.0, 0.0));
        segments.push(Point::new(100.0, 100.0));
        assert!(!self_collision(head, 10.0, &segments, 4.0, 3, 4));

        segments.push(Point::new(5.0, 0.0));
        assert!(self_collision(head, 10.0, &segments, 4.0, 3, 4));
    }

    #[test]
    fn test_short_body_never_self_collides() {
        let head = Point::new(0.0, 0.0);
        let segments = vec![head; 3];
        assert!(!self_collision(head, 10.0, &segments, 4.0, 0, 4));
    }

    #[test]
    fn test_boundary_collision() {
        assert!(!boundary_collision(Rect::centered(Point::new(400.0, 300.0), 12.0), 800.0, 600.0));
        assert!(boundary_collision(Rect::centered(Point::new(5.0, 300.0), 12.0), 800.0, 600.0));
        assert!(boundary_collision(Rect::centered(Point::new(400.0, 595.0), 12.0), 800.0, 600.0));
        assert!(!boundary_collision(Rect::centered(Point::new(12.0, 12.0), 12.0), 800.0, 600.0));
    }

    #[test]
    fn test_wall_and_food_collision() {
        let head = Point::new(100.0, 100.0);
        assert!(wall_collision(head, 10.0, &[Point::new(100.0, 100.0)], 10.0));
        assert!(!wall_collision(head, 10.0, &[Point::new(200.0, 100.0)], 10.0));
        assert!(!wall_collision(head, 10.0, &[], 10.0));

        assert!(food_collision(head, 5.0, Point::new(105.0, 100.0), 5.0));
        assert!(!food_collision(head, 5.0, Point::new(111.0, 100.0), 5.0));
    }
}
