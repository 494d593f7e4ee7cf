use super::{
    config::GameConfig,
    direction::Direction,
    food::FoodSpawner,
    grid::Grid,
    snapshot::Snapshot,
    state::{Position, Snake},
};
use anyhow::{Result, ensure};
use log::{debug, info};
use std::time::Duration;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    /// The head ran into the body
    SelfCollision,
    /// The snake covers every cell, so no food can be placed
    BoardFilled,
}

/// Session state machine: `Running` moves to `GameOver` and stays there
/// until the session is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    GameOver(EndCause),
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the session is over after this tick
    pub terminated: bool,
    /// Set on the tick that ended the session
    pub end_cause: Option<EndCause>,
}

/// One game: the snake, the food, and the rules tying them together
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Option<Position>,
    status: SessionStatus,
    debug: bool,
    ticks: u64,
    spawner: FoodSpawner,
}

impl GameSession {
    /// Start a session with food placement seeded from OS entropy
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_spawner(config, FoodSpawner::from_entropy())
    }

    /// Start a session with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_spawner(config, FoodSpawner::seeded(seed))
    }

    /// Start from an explicit snake and food, e.g. to replay a situation
    pub fn with_state(
        config: GameConfig,
        snake: Snake,
        food: Option<Position>,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        let grid = Grid::from_config(&config);
        ensure!(!snake.is_empty(), "snake has no segments");
        ensure!(
            snake.segments().all(|&p| grid.contains(p)),
            "snake leaves the playable area"
        );
        if let Some(food) = food {
            ensure!(
                grid.contains(food) && !snake.contains_segment(food),
                "food at ({}, {}) is off the grid or on the snake",
                food.x,
                food.y
            );
        }

        Ok(Self {
            config,
            grid,
            snake,
            food,
            status: SessionStatus::Running,
            debug: false,
            ticks: 0,
            spawner: FoodSpawner::seeded(seed),
        })
    }

    fn with_spawner(config: GameConfig, spawner: FoodSpawner) -> Result<Self> {
        config.validate()?;
        let grid = Grid::from_config(&config);
        let snake = Self::initial_snake(&config);

        let mut session = Self {
            config,
            grid,
            snake,
            food: None,
            status: SessionStatus::Running,
            debug: false,
            ticks: 0,
            spawner,
        };
        session.place_food();
        info!(
            "New session on a {}x{} grid, snake length {}",
            grid.columns(),
            grid.rows(),
            session.snake.len()
        );
        Ok(session)
    }

    /// Snake starting at the top-left cell, stretching right
    fn initial_snake(config: &GameConfig) -> Snake {
        let cell = config.cell_size;
        Snake::new(
            Position::new(cell, cell),
            Direction::Right,
            config.initial_length,
            cell,
        )
    }

    /// Restore the starting snake and fresh food; the debug flag is kept
    pub fn reset(&mut self) {
        self.snake = Self::initial_snake(&self.config);
        self.status = SessionStatus::Running;
        self.ticks = 0;
        self.place_food();
        info!("Session reset");
    }

    /// Advance the game by one tick
    pub fn tick(&mut self, requested: Option<Direction>) -> TickResult {
        if self.is_game_over() {
            return TickResult {
                ate_food: false,
                terminated: true,
                end_cause: None,
            };
        }

        if let Some(direction) = requested {
            self.snake.pending_direction(direction);
        }

        // The candidate head may sit just past an edge; collisions are
        // evaluated on the cell it wraps to.
        let target = self.grid.wrap(self.snake.next_head_position());
        let ate_food = self.food == Some(target);

        // The tail moves out of the way on a regular move, so only the rest
        // of the body counts. Eating is checked first.
        if !ate_food && self.snake.collides_after_move(target) {
            self.ticks += 1;
            return self.end(EndCause::SelfCollision);
        }

        if ate_food {
            self.snake.grow(target);
            debug!("Ate food at ({}, {}), score {}", target.x, target.y, self.snake.score());
        } else {
            self.snake.advance();
        }

        let head = self.grid.wrap(self.snake.head());
        self.snake.set_head(head);
        self.ticks += 1;

        debug_assert_eq!(self.snake.occupied_cells().len(), self.snake.len());

        if ate_food && !self.place_food() {
            let mut result = self.end(EndCause::BoardFilled);
            result.ate_food = true;
            return result;
        }

        TickResult {
            ate_food,
            terminated: false,
            end_cause: None,
        }
    }

    fn end(&mut self, cause: EndCause) -> TickResult {
        self.status = SessionStatus::GameOver(cause);
        info!(
            "Game over ({:?}) after {} ticks, score {}, length {}",
            cause,
            self.ticks,
            self.snake.score(),
            self.snake.len()
        );
        TickResult {
            ate_food: false,
            terminated: true,
            end_cause: Some(cause),
        }
    }

    /// Spawn food away from the snake. Returns false if the board is full.
    fn place_food(&mut self) -> bool {
        self.food = self.spawner.spawn(&self.snake.occupied_cells(), &self.grid);
        self.food.is_some()
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        let next_head = (self.debug && !self.is_game_over())
            .then(|| self.grid.wrap(self.snake.next_head_position()));

        Snapshot {
            segments: self.snake.segments().copied().collect(),
            food: self.food,
            next_head,
            game_over: self.is_game_over(),
            score: self.snake.score(),
            ticks: self.ticks,
            cell_size: self.config.cell_size,
            bounds: self.grid.bounds(),
            canvas_width: self.config.canvas_width,
            canvas_height: self.config.canvas_height,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, SessionStatus::GameOver(_))
    }

    pub fn score(&self) -> u32 {
        self.snake.score()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn toggle_debug(&mut self) {
        self.debug = !self.debug;
    }

    /// Interval between ticks; debug mode runs slower
    pub fn tick_interval(&self) -> Duration {
        if self.debug {
            self.config.debug_tick_interval()
        } else {
            self.config.tick_interval()
        }
    }
}
