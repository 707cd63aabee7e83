use crate::game::{GameSession, Point, TickInput};

/// Simple steering used by the drivers in place of a player.
///
/// Heads for the nearest uneaten food and turns back toward the arena centre
/// whenever the head gets within `edge_margin` of an edge.
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub edge_margin: f64,
}

impl Autopilot {
    pub fn new(edge_margin: f64) -> Self {
        Self { edge_margin }
    }

    pub fn steer(&self, session: &GameSession) -> TickInput {
        let head = session.snake().head();
        let arena = session.config().arena();

        let near_edge = head.x - arena.left < self.edge_margin
            || arena.right - head.x < self.edge_margin
            || head.y - arena.top < self.edge_margin
            || arena.bottom - head.y < self.edge_margin;

        let target = if near_edge {
            Some(arena.center())
        } else {
            nearest_food(session, head)
        };

        match target {
            Some(target) => TickInput::towards(target.x - head.x, target.y - head.y),
            None => Self::cruise(session),
        }
    }

    /// Keep going in the current heading
    pub fn cruise(session: &GameSession) -> TickInput {
        let heading = session.snake().heading_deg();
        let (dx, dy) = crate::game::geometry::unit_vector(heading);
        TickInput::towards(dx, dy)
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(60.0)
    }
}

fn nearest_food(session: &GameSession, head: Point) -> Option<Point> {
    session
        .foods()
        .iter()
        .filter(|food| !food.consumed)
        .map(|food| food.position)
        .min_by(|a, b| head.distance_squared(*a).total_cmp(&head.distance_squared(*b)))
}
