use std::time::Duration;

use super::action::Direction;

/// A cell on the game grid. Coordinates are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A single-cell snake heading in `direction`
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
impl Snake {
    /// Snake of `length` cells with the body trailing behind the head
    pub fn with_length(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..length.max(1) as i32)
            .map(|i| head.moved_by(-dx * i, -dy * i))
            .collect();
        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake has at least a head");
        Self { body, direction }
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Session-wide score keeping. Survives every reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub high_score: u32,
    pub games_finished: u32,
}

impl Scoreboard {
    /// Record a finished game. Returns true when it set a new high score.
    pub fn record(&mut self, final_score: u32) -> bool {
        self.games_finished += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
            true
        } else {
            false
        }
    }

    /// The high score is only shown once a game has ended.
    pub fn high_score_visible(&self) -> bool {
        self.games_finished > 0
    }
}

/// Zero-padded three digit score, e.g. `7` -> `"007"`.
pub fn format_score(score: u32) -> String {
    format!("{:03}", score)
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_size: usize,
    /// Current tick period in milliseconds
    pub delay_ms: u64,
    pub running: bool,
    pub scoreboard: Scoreboard,
}

impl GameState {
    /// Create a new, idle game state
    pub fn new(snake: Snake, food: Position, grid_size: usize, delay_ms: u64) -> Self {
        Self {
            snake,
            food,
            grid_size,
            delay_ms,
            running: false,
            scoreboard: Scoreboard::default(),
        }
    }

    /// Current score, derived from the snake length
    pub fn score(&self) -> u32 {
        if self.snake.is_empty() {
            return 0;
        }
        (self.snake.len() - 1) as u32
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        (1..=size).contains(&pos.x) && (1..=size).contains(&pos.y)
    }
}
