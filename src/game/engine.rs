use rand::Rng;
use rand::rngs::ThreadRng;

use super::{
    action::Direction,
    config::{FoodPlacement, GameConfig},
    speed::next_delay,
    state::{CollisionType, GameState, Position, Snake},
};

/// Outcome of moving the snake one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// Whether the new head landed on the food
    pub ate_food: bool,
    /// Whether the tick period was shortened by the speed ramp
    pub delay_changed: bool,
}

/// Summary of a game that just ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub final_score: u32,
    pub new_high_score: bool,
}

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the tick period changed this step
    pub delay_changed: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the game ended this step (the state has already been reset)
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
    /// Set when the step ended the game
    pub game_over: Option<GameOver>,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                ate_food: false,
                delay_changed: false,
                collision_type: None,
            },
            game_over: None,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Starting cell of every game
    pub fn center(&self) -> Position {
        let center = self.config.grid_size.div_ceil(2) as i32;
        Position::new(center, center)
    }

    /// Build the idle state a session starts with
    pub fn initial_state(&mut self) -> GameState {
        let snake = Snake::new(self.center(), Direction::Right);
        let food = self.place_food(&snake);

        GameState::new(
            snake,
            food,
            self.config.grid_size,
            self.config.initial_delay_ms,
        )
    }

    /// Pick a cell for the next food.
    ///
    /// With [`FoodPlacement::Uniform`] any cell may come up, including one
    /// under the snake. With [`FoodPlacement::AvoidSnake`] occupied cells are
    /// re-rolled, unless the snake already covers the whole grid.
    pub fn place_food(&mut self, snake: &Snake) -> Position {
        let size = self.config.grid_size;
        let avoid = self.config.food_placement == FoodPlacement::AvoidSnake
            && snake.len() < size * size;

        loop {
            let pos = self.random_cell();
            if !avoid || !snake.body.contains(&pos) {
                return pos;
            }
        }
    }

    fn random_cell(&mut self) -> Position {
        let size = self.config.grid_size as i32;
        let x = self.rng.gen_range(1..=size);
        let y = self.rng.gen_range(1..=size);
        Position::new(x, y)
    }

    /// Move the snake one cell in its current direction.
    ///
    /// On food the tail is kept, the food moves and the speed ramp is
    /// applied. Otherwise the tail is dropped.
    pub fn advance(&mut self, state: &mut GameState) -> Advance {
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        state.snake.body.insert(0, new_head);

        if new_head != state.food {
            state.snake.body.pop();
            return Advance {
                ate_food: false,
                delay_changed: false,
            };
        }

        state.food = self.place_food(&state.snake);

        let previous = state.delay_ms;
        state.delay_ms = next_delay(previous, self.config.delay_floor_ms);

        Advance {
            ate_food: true,
            delay_changed: state.delay_ms != previous,
        }
    }

    /// Check whether the current head ends the game
    pub fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        // Check wall collision
        if !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        // Check self-collision
        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// End the current game: record its score and put everything except the
    /// scoreboard back to start-of-game values.
    pub fn reset(&mut self, state: &mut GameState) -> GameOver {
        let final_score = state.score();
        let new_high_score = state.scoreboard.record(final_score);

        state.running = false;
        state.snake = Snake::new(self.center(), Direction::Right);
        state.delay_ms = self.config.initial_delay_ms;
        state.food = self.place_food(&state.snake);

        GameOver {
            final_score,
            new_high_score,
        }
    }

    /// Steer the snake. Reversing into the body is allowed.
    /// Returns false when the game is idle and the input was ignored.
    pub fn set_direction(&self, state: &mut GameState, direction: Direction) -> bool {
        if !state.running {
            return false;
        }
        state.snake.direction = direction;
        true
    }

    /// Idle -> Running. Returns false if the game was already running.
    pub fn start(&self, state: &mut GameState) -> bool {
        if state.running {
            return false;
        }
        state.running = true;
        true
    }

    /// Execute one tick: advance, check collision, reset on a terminal one
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.running {
            return StepResult::idle();
        }

        let advance = self.advance(state);
        let collision_type = self.check_collision(state);
        let game_over = collision_type.map(|_| self.reset(state));

        StepResult {
            terminated: game_over.is_some(),
            info: StepInfo {
                ate_food: advance.ate_food,
                delay_changed: advance.delay_changed,
                collision_type,
            },
            game_over,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn engine(config: GameConfig) -> GameEngine<StdRng> {
        GameEngine::with_rng(config, StdRng::seed_from_u64(7))
    }

    fn running_state(engine: &mut GameEngine<StdRng>) -> GameState {
        let mut state = engine.initial_state();
        state.running = true;
        state
    }

    #[test]
    fn test_initial_state() {
        let mut engine = engine(GameConfig::default());
        let state = engine.initial_state();

        assert!(!state.running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.delay_ms, 200);
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_center_for_odd_and_tiny_grids() {
        assert_eq!(engine(GameConfig::new(21)).center(), Position::new(11, 11));
        assert_eq!(engine(GameConfig::new(1)).center(), Position::new(1, 1));
    }

    #[test]
    fn test_place_food_in_bounds() {
        for placement in [FoodPlacement::Uniform, FoodPlacement::AvoidSnake] {
            for size in 1..=25 {
                let mut engine = engine(GameConfig {
                    food_placement: placement,
                    ..GameConfig::new(size)
                });
                let snake = Snake::new(engine.center(), Direction::Right);
                for _ in 0..50 {
                    let food = engine.place_food(&snake);
                    assert!((1..=size as i32).contains(&food.x));
                    assert!((1..=size as i32).contains(&food.y));
                }
            }
        }
    }

    #[test]
    fn test_place_food_avoids_snake() {
        // 2x2 grid with three cells taken leaves exactly one free cell
        let mut engine = engine(GameConfig::new(2));
        let snake = Snake::from_segments(
            vec![
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
            ],
            Direction::Left,
        );
        for _ in 0..20 {
            assert_eq!(engine.place_food(&snake), Position::new(1, 2));
        }
    }

    #[test]
    fn test_place_food_full_grid_terminates() {
        let mut engine = engine(GameConfig::new(1));
        let snake = Snake::new(Position::new(1, 1), Direction::Right);
        assert_eq!(engine.place_food(&snake), Position::new(1, 1));
    }

    #[test]
    fn test_advance_in_each_direction() {
        let cases = [
            (Direction::Right, Position::new(11, 10)),
            (Direction::Left, Position::new(9, 10)),
            (Direction::Up, Position::new(10, 9)),
            (Direction::Down, Position::new(10, 11)),
        ];

        for (direction, expected) in cases {
            let mut engine = engine(GameConfig::default());
            let mut state = running_state(&mut engine);
            state.food = Position::new(1, 1);
            state.snake.direction = direction;

            let advance = engine.advance(&mut state);

            assert!(!advance.ate_food);
            assert_eq!(state.snake.head(), expected);
            assert_eq!(state.snake.len(), 1);
        }
    }

    #[test]
    fn test_non_eating_advance_keeps_length() {
        let mut engine = engine(GameConfig::default());
        let mut state = running_state(&mut engine);
        state.snake = Snake::with_length(Position::new(10, 10), Direction::Right, 4);
        state.food = Position::new(1, 1);

        engine.advance(&mut state);

        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), Position::new(11, 10));
        assert_eq!(*state.snake.body.last().unwrap(), Position::new(8, 10));
        assert_eq!(state.delay_ms, 200);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine(GameConfig::default());
        let mut state = running_state(&mut engine);
        state.food = Position::new(11, 10);

        let advance = engine.advance(&mut state);

        assert!(advance.ate_food);
        assert!(advance.delay_changed);
        assert_eq!(state.snake.body, vec![Position::new(11, 10), Position::new(10, 10)]);
        assert_eq!(state.score(), 1);
        assert!(!state.snake.body.contains(&state.food));
        assert!(state.is_in_bounds(state.food));
        assert_eq!(state.delay_ms, 195);
    }

    #[test]
    fn test_eating_at_floor_keeps_delay() {
        let mut engine = engine(GameConfig::default());
        let mut state = running_state(&mut engine);
        state.delay_ms = 25;
        state.food = Position::new(11, 10);

        let advance = engine.advance(&mut state);

        assert!(advance.ate_food);
        assert!(!advance.delay_changed);
        assert_eq!(state.delay_ms, 25);
    }

    #[test]
    fn test_wall_collision_on_every_side() {
        let mut engine = engine(GameConfig::default());
        let mut state = running_state(&mut engine);

        for head in [
            Position::new(0, 5),
            Position::new(21, 5),
            Position::new(5, 0),
            Position::new(5, 21),
        ] {
            state.snake = Snake::new(head, Direction::Right);
            assert_eq!(engine.check_collision(&state), Some(CollisionType::Wall));
        }

        for head in [Position::new(1, 1), Position::new(20, 20), Position::new(1, 20)] {
            state.snake = Snake::new(head, Direction::Right);
            assert_eq!(engine.check_collision(&state), None);
        }
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine(GameConfig::default());
        let mut state = running_state(&mut engine);
        state.snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
                Position::new(5, 5),
            ],
            Direction::Up,
        );

        assert_eq!(
            engine.check_collision(&state),
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_reversal_allowed_and_fatal() {
        let mut engine = engine(GameConfig::default());
        let mut state = running_state(&mut engine);
        state.snake = Snake::with_length(Position::new(10, 10), Direction::Right, 3);
        state.food = Position::new(1, 1);

        assert!(engine.set_direction(&mut state, Direction::Left));
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(
            result.game_over,
            Some(GameOver {
                final_score: 2,
                new_high_score: true
            })
        );
    }

    #[test]
    fn test_set_direction_ignored_while_idle() {
        let mut engine = engine(GameConfig::default());
        let mut state = engine.initial_state();

        assert!(!engine.set_direction(&mut state, Direction::Up));
        assert_eq!(state.snake.direction, Direction::Right);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut engine = engine(GameConfig::default());
        let mut state = engine.initial_state();

        assert!(engine.start(&mut state));
        assert!(state.running);
        assert!(!engine.start(&mut state));
        assert!(state.running);
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(GameConfig::default());
        let mut state = running_state(&mut engine);
        state.scoreboard.high_score = 3;
        state.snake = Snake::with_length(Position::new(4, 4), Direction::Up, 6);
        state.delay_ms = 120;

        let over = engine.reset(&mut state);

        assert_eq!(
            over,
            GameOver {
                final_score: 5,
                new_high_score: true
            }
        );
        assert!(!state.running);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.delay_ms, 200);
        assert_eq!(state.scoreboard.high_score, 5);
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_reset_keeps_higher_high_score() {
        let mut engine = engine(GameConfig::default());
        let mut state = running_state(&mut engine);
        state.scoreboard.high_score = 9;
        state.snake = Snake::with_length(Position::new(4, 4), Direction::Up, 3);

        let over = engine.reset(&mut state);

        assert!(!over.new_high_score);
        assert_eq!(state.scoreboard.high_score, 9);
        assert_eq!(state.scoreboard.games_finished, 1);
    }

    #[test]
    fn test_step_into_wall_resets() {
        let mut engine = engine(GameConfig::new(10));
        let mut state = running_state(&mut engine);
        state.snake = Snake::new(Position::new(10, 3), Direction::Right);
        state.food = Position::new(1, 1);

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert!(!state.running);
        assert_eq!(state.snake.head(), Position::new(5, 5));
    }

    #[test]
    fn test_idle_step_is_noop() {
        let mut engine = engine(GameConfig::default());
        let mut state = engine.initial_state();
        let before = state.clone();

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert_eq!(state, before);
    }
}
