use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::TickInput,
    clock::Pausable,
    collision::{boundary_collision, food_collision, self_collision},
    config::SessionConfig,
    food::{Food, FoodManager},
    geometry::Point,
    placement::{Occupant, place},
    snake::Snake,
    state::{FoodView, GameEvent, GameOverCause, SessionState, Snapshot, TickResult},
    walls::WallSet,
};

/// Spawn corridor kept clear of random obstacles, in segment spacings ahead of the head
const SPAWN_CORRIDOR_SPACINGS: usize = 8;

/// A single game: snake, walls, food, score and lifecycle
pub struct GameSession {
    config: SessionConfig,
    snake: Snake,
    walls: WallSet,
    foods: FoodManager,
    rng: StdRng,
    state: SessionState,
    score: i64,
    high_score: i64,
    last_score_delta: i64,
}

impl GameSession {
    /// Create a session with an entropy-seeded RNG.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a session whose food and obstacle placement is reproducible
    pub fn with_seed(config: SessionConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SessionConfig, rng: StdRng) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid session configuration: {}", e))?;

        let snake = Snake::new(&config);
        let walls = WallSet::from_positions(config.wall_positions.clone(), config.wall_radius);
        let foods = FoodManager::new(config.food_types.clone(), config.max_food_count)?;

        let mut session = Self {
            config,
            snake,
            walls,
            foods,
            rng,
            state: SessionState::Idle,
            score: 0,
            high_score: 0,
            last_score_delta: 0,
        };
        session.start_round();

        tracing::info!(
            "Session created: {}x{} arena, {} walls, {} food item(s)",
            session.config.arena_width,
            session.config.arena_height,
            session.walls.len(),
            session.foods.foods().len()
        );
        Ok(session)
    }

    /// Back to `Idle` with a fresh snake, obstacles and food. The high score survives.
    pub fn restart(&mut self) {
        self.start_round();
        tracing::info!("Session restarted (high score {})", self.high_score);
    }

    fn start_round(&mut self) {
        self.snake.reset();
        self.walls =
            WallSet::from_positions(self.config.wall_positions.clone(), self.config.wall_radius);
        self.scatter_obstacles();

        let avoid = self.occupants();
        let arena = self.config.arena();
        self.foods
            .respawn_all(&mut self.rng, &avoid, arena, &self.config.placement);

        self.state = SessionState::Idle;
        self.score = 0;
        self.last_score_delta = 0;
    }

    fn scatter_obstacles(&mut self) {
        if self.config.random_obstacle_count == 0 {
            return;
        }

        let mut avoid = self.occupants();
        let spawn = self.snake.head();
        let heading = self.snake.heading_deg();
        avoid.extend((1..=SPAWN_CORRIDOR_SPACINGS).map(|i| {
            Occupant::new(
                spawn.moved_along(heading, i as f64 * self.config.segment_distance),
                self.config.collision_radius,
            )
        }));

        let arena = self.config.arena();
        for _ in 0..self.config.random_obstacle_count {
            let placement = place(
                &mut self.rng,
                &avoid,
                arena,
                self.config.wall_radius,
                &self.config.placement,
            );
            avoid.push(Occupant::new(placement.position, self.config.wall_radius));
            self.walls.add_wall(placement.position);
        }
    }

    /// Head, every segment and every wall; other food is added by the manager
    fn occupants(&self) -> Vec<Occupant> {
        let mut occupants =
            Vec::with_capacity(1 + self.snake.segments().len() + self.walls.len());
        occupants.push(Occupant::new(self.snake.head(), self.snake.collision_radius()));
        occupants.extend(
            self.snake
                .segments()
                .iter()
                .map(|&seg| Occupant::new(seg, self.config.segment_radius)),
        );
        occupants.extend(
            self.walls
                .positions()
                .iter()
                .map(|&wall| Occupant::new(wall, self.walls.radius())),
        );
        occupants
    }

    /// Run one tick: input, motion, food, then death checks.
    ///
    /// `dt_seconds` is capped at `max_frame_dt`. Paused and finished sessions
    /// do not change.
    pub fn tick(&mut self, input: &TickInput, dt_seconds: f64) -> TickResult {
        self.last_score_delta = 0;
        if self.state == SessionState::Paused || self.state.is_terminal() {
            return TickResult::idle(self.state);
        }

        let dt = if dt_seconds.is_finite() {
            dt_seconds.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        };
        let mut events = Vec::new();

        // Apply input; the first heading starts the game
        self.snake.set_boost(input.boost);
        if let Some(heading) = input.heading() {
            self.snake.steer(heading);
            if self.state == SessionState::Idle {
                self.state = SessionState::Running;
                events.push(GameEvent::Started);
                tracing::debug!("Session started, heading {:.1}", heading);
            }
        }

        if self.state == SessionState::Idle {
            return TickResult::idle(self.state);
        }

        // Move
        self.snake.advance(dt);

        // Eat before dying, so a lethal tick still scores
        let score_delta = self.consume_food(&mut events);
        self.last_score_delta = score_delta;

        // Check for collisions, then the target score
        if let Some(cause) = self.detect_collision() {
            self.state = SessionState::GameOver(cause);
            events.push(GameEvent::GameOver {
                cause,
                score: self.score,
            });
            tracing::info!(
                "Game over ({}): score {}, length {}",
                cause.as_str(),
                self.score,
                self.snake.length()
            );
        } else if let Some(target) = self.config.rules.target_score
            && self.score >= target
        {
            self.state = SessionState::Completed;
            events.push(GameEvent::LevelCompleted { score: self.score });
            tracing::info!("Level completed with score {}", self.score);
        }

        TickResult {
            score_delta,
            events,
            state: self.state,
        }
    }

    /// Eat every food under the head, grow once per item and re-place it
    fn consume_food(&mut self, events: &mut Vec<GameEvent>) -> i64 {
        let head = self.snake.head();
        let head_radius = self.snake.collision_radius();
        let eaten: Vec<usize> = self
            .foods
            .foods()
            .iter()
            .enumerate()
            .filter(|(_, food)| {
                !food.consumed && food_collision(head, head_radius, food.position, food.radius)
            })
            .map(|(i, _)| i)
            .collect();

        let mut gained = 0;
        for index in eaten {
            let food = &mut self.foods.foods_mut()[index];
            let value = food.on_consumed();
            let kind = food.kind.clone();
            let awarded = (value as f64 * self.config.rules.score_multiplier) as i64;

            self.snake.grow();
            self.score += awarded;
            self.high_score = self.high_score.max(self.score);
            gained += awarded;

            tracing::debug!(
                "Ate {} for {} points (score {}, length {})",
                kind,
                awarded,
                self.score,
                self.snake.length()
            );
            events.push(GameEvent::FoodConsumed {
                food: kind,
                value: awarded,
            });

            let avoid = self.occupants();
            let arena = self.config.arena();
            self.foods
                .relocate(index, &mut self.rng, &avoid, arena, &self.config.placement);
        }
        gained
    }

    /// First active failure cause, by priority self > wall > boundary
    fn detect_collision(&self) -> Option<GameOverCause> {
        let head = self.snake.head();
        let radius = self.snake.collision_radius();
        let rules = &self.config.rules;

        if rules.self_collision
            && self.snake.is_moving()
            && self_collision(
                head,
                radius,
                self.snake.segments(),
                self.config.segment_radius,
                self.config.self_collision_skip,
                self.config.min_self_collision_segments,
            )
        {
            return Some(GameOverCause::SelfCollision);
        }

        if rules.walls_kill && self.walls.collides(head, radius) {
            return Some(GameOverCause::Wall);
        }

        let boundary_active = !rules.walls_kill || self.walls.is_empty();
        if boundary_active
            && boundary_collision(
                self.snake.head_rect(),
                self.config.arena_width,
                self.config.arena_height,
            )
        {
            return Some(GameOverCause::Boundary);
        }

        None
    }

    /// Move one food item, for scripted scenarios and tutorials
    pub fn set_food_position(&mut self, index: usize, position: Point) -> bool {
        match self.foods.foods_mut().get_mut(index) {
            Some(food) => {
                food.position = position;
                true
            }
            None => false,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            head: self.snake.head(),
            heading_deg: self.snake.heading_deg(),
            segments: self.snake.segments().to_vec(),
            foods: self
                .foods
                .foods()
                .iter()
                .map(|food| FoodView {
                    kind: food.kind.clone(),
                    position: food.position,
                    radius: food.radius,
                    consumed: food.consumed,
                })
                .collect(),
            walls: self.walls.positions().to_vec(),
            score: self.score,
            score_delta: self.last_score_delta,
            high_score: self.high_score,
            state: self.state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn high_score(&self) -> i64 {
        self.high_score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    pub fn foods(&self) -> &[Food] {
        self.foods.foods()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Pausable for GameSession {
    /// Only a running session can pause
    fn pause(&mut self) {
        if self.state == SessionState::Running {
            self.state = SessionState::Paused;
            tracing::debug!("Session paused");
        }
    }

    fn resume(&mut self) {
        if self.state == SessionState::Paused {
            self.state = SessionState::Running;
            tracing::debug!("Session resumed");
        }
    }

    fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::config::FoodType;

    const DT: f64 = 1.0 / 60.0;

    fn session(config: SessionConfig) -> GameSession {
        GameSession::with_seed(config, 42).unwrap()
    }

    fn run(session: &mut GameSession, input: TickInput, ticks: usize) -> Vec<TickResult> {
        (0..ticks).map(|_| session.tick(&input, DT)).collect()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session(SessionConfig::default());
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.foods().len(), 1);
        assert_eq!(session.snake().length(), 4);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SessionConfig {
            collision_radius: 0.0,
            ..Default::default()
        };
        let err = GameSession::new(config).err().unwrap();
        assert!(err.to_string().contains("collision_radius"));
    }

    #[test]
    fn test_idle_without_input() {
        let mut session = session(SessionConfig::default());
        let head = session.snake().head();
        for result in run(&mut session, TickInput::idle(), 120) {
            assert_eq!(result.state, SessionState::Idle);
            assert!(result.events.is_empty());
        }
        assert_eq!(session.snake().head(), head);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_boost_alone_does_not_start() {
        let mut session = session(SessionConfig::default());
        let result = session.tick(&TickInput::idle().with_boost(), DT);
        assert_eq!(result.state, SessionState::Idle);
    }

    #[test]
    fn test_non_finite_direction_stays_idle() {
        let mut session = session(SessionConfig::default());
        let head = session.snake().head();
        for result in run(&mut session, TickInput::towards(f64::NAN, f64::NAN), 60) {
            assert_eq!(result.state, SessionState::Idle);
            assert!(result.events.is_empty());
        }
        assert_eq!(session.snake().head(), head);
        assert_eq!(session.snake().heading_deg(), 0.0);
    }

    #[test]
    fn test_boost_input_doubles_speed() {
        let mut plain = session(SessionConfig::default());
        let mut boosted = session(SessionConfig::default());
        plain.tick(&Direction::Right.into(), 0.1);
        boosted.tick(&TickInput::from_direction(Direction::Right).with_boost(), 0.1);

        let plain_travel = plain.snake().head().x - 400.0;
        let boosted_travel = boosted.snake().head().x - 400.0;
        assert!((plain_travel - 12.0).abs() < 1e-9);
        assert!((boosted_travel - 2.0 * plain_travel).abs() < 1e-9);
        assert!(boosted.snake().is_boosted());
    }

    #[test]
    fn test_first_input_starts_running() {
        let mut session = session(SessionConfig::default());
        let result = session.tick(&Direction::Right.into(), DT);
        assert_eq!(result.state, SessionState::Running);
        assert_eq!(result.events, vec![GameEvent::Started]);
        assert!(session.snake().head().x > 400.0);

        let result = session.tick(&Direction::Right.into(), DT);
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_quarter_turn_trace() {
        let config = SessionConfig {
            max_frame_dt: 0.5,
            ..Default::default()
        };
        let mut session = session(config);
        // 90 deg gap: rate 360 * min(2, 1 + 90/90) = 720 deg/s, so 0.25 s reaches it
        session.tick(&Direction::Down.into(), 90.0 / 360.0);
        assert_eq!(session.snake().heading_deg(), 90.0);
        let head = session.snake().head();
        assert!((head.x - 400.0).abs() < 1e-9);
        assert!((head.y - 330.0).abs() < 1e-9);
    }

    #[test]
    fn test_dt_is_capped() {
        let mut session = session(SessionConfig::default());
        session.tick(&Direction::Right.into(), 5.0);
        let moved = session.snake().head().x - 400.0;
        assert!((moved - 120.0 * 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let config = SessionConfig {
            spawn_position: Point::new(100.0, 100.0),
            collision_radius: 10.0,
            wall_radius: 10.0,
            wall_positions: vec![Point::new(100.0, 100.0)],
            ..Default::default()
        };
        let mut session = session(config);
        let result = session.tick(&Direction::Right.into(), DT);
        assert_eq!(result.state, SessionState::GameOver(GameOverCause::Wall));
        assert_eq!(result.game_over_cause(), Some(GameOverCause::Wall));

        // terminal until restart
        let result = session.tick(&Direction::Up.into(), DT);
        assert_eq!(result.state, SessionState::GameOver(GameOverCause::Wall));
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_harmless_walls_when_walls_do_not_kill() {
        let mut config = SessionConfig {
            spawn_position: Point::new(100.0, 100.0),
            wall_positions: vec![Point::new(100.0, 100.0)],
            ..Default::default()
        };
        config.rules.walls_kill = false;
        let mut session = session(config);
        let result = session.tick(&Direction::Right.into(), DT);
        assert_eq!(result.state, SessionState::Running);
    }

    fn food_scenario_config() -> SessionConfig {
        SessionConfig {
            collision_radius: 5.0,
            food_types: vec![FoodType::new("apple", 10, 5.0, 1.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_food_consumption_grows_and_relocates() {
        let config = food_scenario_config();
        let buffer = config.placement.buffer;
        let mut session = session(config);
        session.tick(&Direction::Right.into(), DT);

        let head = session.snake().head();
        assert!(session.set_food_position(0, head.moved_by(5.0, 0.0)));
        let length = session.snake().length();

        let result = session.tick(&Direction::Right.into(), DT);
        assert_eq!(result.score_delta, 10);
        assert!(result.ate_food());
        assert_eq!(session.score(), 10);
        assert_eq!(session.snake().length(), length + 1);

        let food = &session.foods()[0];
        assert!(!food.consumed);
        let head = session.snake().head();
        assert!(food.position.distance(head) >= food.radius + 5.0 + buffer);
        for seg in session.snake().segments() {
            assert!(food.position.distance(*seg) >= food.radius + 4.0 + buffer);
        }
        assert_eq!(session.snapshot().score_delta, 10);
    }

    #[test]
    fn test_score_multiplier_truncates() {
        let mut config = food_scenario_config();
        config.rules.score_multiplier = 1.55;
        let mut session = session(config);
        session.tick(&Direction::Right.into(), DT);
        let head = session.snake().head();
        session.set_food_position(0, head.moved_by(5.0, 0.0));
        let result = session.tick(&Direction::Right.into(), DT);
        assert_eq!(result.score_delta, 15);
    }

    #[test]
    fn test_reaching_target_completes_level() {
        let mut config = food_scenario_config();
        config.rules.target_score = Some(10);
        let mut session = session(config);
        session.tick(&Direction::Right.into(), DT);
        let head = session.snake().head();
        session.set_food_position(0, head.moved_by(5.0, 0.0));

        let result = session.tick(&Direction::Right.into(), DT);
        assert_eq!(result.state, SessionState::Completed);
        assert!(result
            .events
            .contains(&GameEvent::LevelCompleted { score: 10 }));
    }

    #[test]
    fn test_short_snake_never_self_collides() {
        let config = SessionConfig {
            initial_segment_count: 3,
            segment_radius: 20.0,
            self_collision_skip: 0,
            ..Default::default()
        };
        let mut session = session(config);
        for result in run(&mut session, Direction::Right.into(), 30) {
            assert_eq!(result.state, SessionState::Running);
        }
    }

    #[test]
    fn test_long_snake_self_collides_without_skip() {
        let config = SessionConfig {
            initial_segment_count: 4,
            segment_radius: 20.0,
            self_collision_skip: 0,
            ..Default::default()
        };
        let mut session = session(config);
        let result = session.tick(&Direction::Right.into(), DT);
        assert_eq!(
            result.state,
            SessionState::GameOver(GameOverCause::SelfCollision)
        );
    }

    #[test]
    fn test_self_collision_outranks_wall() {
        let config = SessionConfig {
            initial_segment_count: 4,
            segment_radius: 20.0,
            self_collision_skip: 0,
            spawn_position: Point::new(100.0, 100.0),
            wall_positions: vec![Point::new(100.0, 100.0)],
            ..Default::default()
        };
        let mut session = session(config);
        let result = session.tick(&Direction::Right.into(), DT);
        assert_eq!(result.game_over_cause(), Some(GameOverCause::SelfCollision));
        let causes = result
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(causes, 1);
    }

    #[test]
    fn test_leaving_open_arena_hits_boundary() {
        let mut session = session(SessionConfig::default());
        let mut last = TickResult::idle(SessionState::Idle);
        for _ in 0..600 {
            last = session.tick(&Direction::Right.into(), 0.1);
            if last.state.is_terminal() {
                break;
            }
        }
        assert_eq!(last.state, SessionState::GameOver(GameOverCause::Boundary));
        assert!(session.snake().head().x + 12.0 > 800.0);
    }

    #[test]
    fn test_pause_freezes_and_resume_continues() {
        let mut session = session(SessionConfig::default());
        session.pause();
        assert!(!session.is_paused(), "idle sessions cannot pause");

        session.tick(&Direction::Right.into(), DT);
        session.pause();
        assert!(session.is_paused());
        let head = session.snake().head();
        let result = session.tick(&Direction::Down.into(), 0.1);
        assert_eq!(result.state, SessionState::Paused);
        assert_eq!(session.snake().head(), head);

        session.resume();
        assert_eq!(session.state(), SessionState::Running);
        session.tick(&Direction::Right.into(), DT);
        assert!(session.snake().head().x > head.x);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut session = session(food_scenario_config());
        session.tick(&Direction::Right.into(), DT);
        let head = session.snake().head();
        session.set_food_position(0, head.moved_by(5.0, 0.0));
        session.tick(&Direction::Right.into(), DT);
        assert_eq!(session.high_score(), 10);

        session.restart();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 10);
        assert_eq!(session.snake().head(), Point::new(400.0, 300.0));
        assert_eq!(session.snake().length(), 4);
    }

    #[test]
    fn test_random_obstacles_avoid_snake() {
        let config = SessionConfig {
            random_obstacle_count: 6,
            ..SessionConfig::bordered()
        };
        let border = config.wall_positions.len();
        let mut session = session(config);
        assert_eq!(session.walls().len(), border + 6);
        assert!(!session.walls().collides(session.snake().head(), 12.0));

        session.restart();
        assert_eq!(session.walls().len(), border + 6);
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let a = GameSession::with_seed(SessionConfig::default(), 7).unwrap();
        let b = GameSession::with_seed(SessionConfig::default(), 7).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = session(SessionConfig::maze());
        session.tick(&Direction::Right.into(), DT);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.head, session.snake().head());
        assert_eq!(snapshot.segments.len(), 3);
        assert_eq!(snapshot.walls.len(), session.walls().len());
        assert_eq!(snapshot.foods.len(), 1);
        assert_eq!(snapshot.state, SessionState::Running);
    }

    #[test]
    fn test_multiple_food_items() {
        let config = SessionConfig {
            max_food_count: 4,
            ..Default::default()
        };
        let session = session(config);
        assert_eq!(session.foods().len(), 4);
        assert!(session.foods().iter().all(|f| !f.consumed));
    }
}
