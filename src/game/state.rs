use serde::Serialize;

use super::geometry::Point;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameOverCause {
    /// Snake hit itself
    SelfCollision,
    /// Snake hit a wall block
    Wall,
    /// Snake left the arena
    Boundary,
}

impl GameOverCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameOverCause::SelfCollision => "self",
            GameOverCause::Wall => "wall",
            GameOverCause::Boundary => "boundary",
        }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// Waiting for the first directional input
    Idle,
    Running,
    Paused,
    GameOver(GameOverCause),
    /// The level's target score was reached
    Completed,
}

impl SessionState {
    /// True for states that only a restart can leave
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::GameOver(_) | SessionState::Completed)
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// First directional input moved the session out of `Idle`
    Started,
    FoodConsumed { food: String, value: i64 },
    GameOver { cause: GameOverCause, score: i64 },
    LevelCompleted { score: i64 },
}

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Score gained this tick
    pub score_delta: i64,
    pub events: Vec<GameEvent>,
    /// State after the tick
    pub state: SessionState,
}

impl TickResult {
    pub fn idle(state: SessionState) -> Self {
        Self {
            score_delta: 0,
            events: Vec::new(),
            state,
        }
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.events.iter().find_map(|event| match event {
            GameEvent::GameOver { cause, .. } => Some(*cause),
            _ => None,
        })
    }

    pub fn ate_food(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::FoodConsumed { .. }))
    }
}

/// Read-only view of one food item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodView {
    pub kind: String,
    pub position: Point,
    pub radius: f64,
    pub consumed: bool,
}

/// Everything a renderer or UI needs after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub head: Point,
    pub heading_deg: f64,
    pub segments: Vec<Point>,
    pub foods: Vec<FoodView>,
    pub walls: Vec<Point>,
    pub score: i64,
    pub score_delta: i64,
    pub high_score: i64,
    pub state: SessionState,
}
