use super::geometry::heading_from_vector;

/// Keyboard-style direction the player can press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the unit vector (dx, dy) for this direction; y grows downward
    pub fn vector(&self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    /// Returns the heading in degrees for this direction
    pub fn heading_deg(&self) -> f64 {
        match self {
            Direction::Up => -90.0,
            Direction::Down => 90.0,
            Direction::Left => 180.0,
            Direction::Right => 0.0,
        }
    }
}

/// Input sampled for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInput {
    /// Desired direction of travel, `None` when nothing is pressed
    pub direction: Option<(f64, f64)>,
    /// Boost held this tick
    pub boost: bool,
}

impl TickInput {
    /// No direction pressed, no boost
    pub fn idle() -> Self {
        Self::default()
    }

    /// Steer along an arbitrary (not necessarily normalized) vector
    pub fn towards(dx: f64, dy: f64) -> Self {
        Self {
            direction: Some((dx, dy)),
            boost: false,
        }
    }

    pub fn from_direction(direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self::towards(dx, dy)
    }

    pub fn with_boost(mut self) -> Self {
        self.boost = true;
        self
    }

    /// Requested heading in degrees; zero and non-finite vectors count as no input
    pub fn heading(&self) -> Option<f64> {
        self.direction
            .and_then(|(dx, dy)| heading_from_vector(dx, dy))
    }
}

impl From<Direction> for TickInput {
    fn from(direction: Direction) -> Self {
        TickInput::from_direction(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_vectors_match_headings() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let input = TickInput::from(dir);
            let heading = input.heading().unwrap();
            assert!((heading - dir.heading_deg()).abs() < 1e-9, "{:?}", dir);
        }
    }

    #[test]
    fn test_zero_vector_is_no_input() {
        assert_eq!(TickInput::towards(0.0, 0.0).heading(), None);
        assert_eq!(TickInput::idle().heading(), None);
    }

    #[test]
    fn test_non_finite_vector_is_no_input() {
        // a released analog stick normalized as 0/0
        assert_eq!(TickInput::towards(f64::NAN, f64::NAN).heading(), None);
        assert_eq!(TickInput::towards(f64::INFINITY, 0.0).heading(), None);
        assert_eq!(TickInput::towards(1.0, f64::NEG_INFINITY).heading(), None);
    }

    #[test]
    fn test_boost_flag() {
        let input = TickInput::from(Direction::Right).with_boost();
        assert!(input.boost);
        assert_eq!(input.heading(), Some(0.0));
    }
}
