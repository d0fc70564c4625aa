use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    food::Food,
    rules::GameRules,
    speed::TickSpeed,
    state::{Position, Snake},
};
use crate::input::InputSource;
use crate::score::ScoreStore;

/// Lifecycle of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Round prepared, waiting for `start`
    Idle,
    Running,
    /// Terminal until `reset`
    GameOver,
}

/// Type of collision that ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// What the renderer gets after every live tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Body segments, head first
    pub segments: Vec<Position>,
    pub food: Position,
    pub score: u32,
}

/// Emitted once, on the tick that ends the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverEvent {
    pub score: u32,
    /// Best score after this round was offered to the store
    pub high_score: u32,
    pub is_new_high_score: bool,
    pub cause: CollisionType,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The loop was not running; nothing changed
    Skipped,
    /// The round goes on; schedule the next tick after `tick_interval`
    Update(Snapshot),
    /// The round ended; no further ticks until `reset` and `start`
    GameOver(GameOverEvent),
}

/// Tick-driven snake simulation
///
/// Owns the snake, food, rules and speed for the current round, pulls the
/// player's turn from an [`InputSource`] and reports the final score to a
/// [`ScoreStore`]. Scheduling is left to the caller: call [`GameLoop::tick`],
/// then wait [`GameLoop::tick_interval`] before the next one.
pub struct GameLoop {
    config: GameConfig,
    snake: Snake,
    food: Food,
    rules: GameRules,
    speed: TickSpeed,
    state: LoopState,
    rng: StdRng,
    input: Arc<dyn InputSource>,
    scores: Box<dyn ScoreStore>,
}

impl GameLoop {
    /// Create a loop with a prepared round, in the `Idle` state
    pub fn new(
        config: GameConfig,
        input: Arc<dyn InputSource>,
        scores: Box<dyn ScoreStore>,
    ) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let snake = Snake::new(Self::spawn_point(&config));
        let food = Self::place_food(&config, &snake, &mut rng);

        Self {
            rules: GameRules::new(config.grid_width, config.grid_height),
            speed: TickSpeed::from_config(&config),
            state: LoopState::Idle,
            config,
            snake,
            food,
            rng,
            input,
            scores,
        }
    }

    fn spawn_point(config: &GameConfig) -> Position {
        Position::new((config.grid_width / 2) as i32, (config.grid_height / 2) as i32)
    }

    fn place_food(config: &GameConfig, snake: &Snake, rng: &mut StdRng) -> Food {
        let mut food = Food::at(
            Position::new(0, 0),
            config.grid_width,
            config.grid_height,
            config.food_placement_attempts,
        );
        food.respawn(snake.segments(), rng);
        food
    }

    /// Fresh snake at the centre facing right, fresh food, zero score, base speed
    fn new_round(&mut self) {
        self.snake = Snake::new(Self::spawn_point(&self.config));
        self.food = Self::place_food(&self.config, &self.snake, &mut self.rng);
        self.rules.reset();
        self.speed.reset();
    }

    /// Begin a round from `Idle`
    ///
    /// Returns false when already running, or after game over (only `reset`
    /// leaves `GameOver`).
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            debug!("Ignoring start in state {:?}", self.state);
            return false;
        }

        self.new_round();
        // Keys pressed before the round began should not steer it
        let _ = self.input.take_buffered();
        self.state = LoopState::Running;

        info!(
            width = self.config.grid_width,
            height = self.config.grid_height,
            tick_ms = self.speed.current_ms(),
            "Round started"
        );
        true
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> TickOutcome {
        // Checked at entry: a reset between ticks stops the next one
        if self.state != LoopState::Running {
            return TickOutcome::Skipped;
        }

        // At most one turn per tick
        if let Some(direction) = self.input.take_buffered() {
            self.snake.change_direction(direction);
        }

        self.snake.move_forward();

        // Death takes priority over eating
        if let Some(cause) = self.check_collision() {
            return TickOutcome::GameOver(self.game_over(cause));
        }

        if self.snake.collides_with(self.food.position) {
            self.snake.grow();
            self.rules.increment_score();
            let food = self.food.respawn(self.snake.segments(), &mut self.rng);
            self.speed.speed_up();

            debug!(
                score = self.rules.score(),
                tick_ms = self.speed.current_ms(),
                "Food eaten, next food at ({}, {})",
                food.x,
                food.y
            );
        }

        TickOutcome::Update(self.snapshot())
    }

    fn check_collision(&self) -> Option<CollisionType> {
        if self.rules.check_wall_collision(self.snake.head()) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_self() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    fn game_over(&mut self, cause: CollisionType) -> GameOverEvent {
        self.state = LoopState::GameOver;

        let score = self.rules.score();
        let is_new_high_score = self.scores.save(score);
        let high_score = self.scores.get();

        info!(
            score,
            high_score,
            is_new_high_score,
            ?cause,
            length = self.snake.len(),
            "Game over"
        );

        GameOverEvent {
            score,
            high_score,
            is_new_high_score,
            cause,
        }
    }

    /// Turn the snake directly, bypassing the input buffer
    pub fn change_direction(&mut self, direction: Direction) {
        self.snake.change_direction(direction);
    }

    /// Prepare a new round and stop ticking
    ///
    /// The loop is left `Idle`; call `start` to resume.
    pub fn reset(&mut self) {
        self.new_round();
        self.state = LoopState::Idle;
        info!("Game reset");
    }

    /// Current state for the renderer, by value
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.segments().iter().copied().collect(),
            food: self.food.position,
            score: self.rules.score(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Delay before the next tick
    pub fn tick_interval(&self) -> Duration {
        self.speed.interval()
    }

    pub fn score(&self) -> u32 {
        self.rules.score()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.get()
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food_position(&self) -> Position {
        self.food.position
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
