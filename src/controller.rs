use std::time::Duration;

use log::{debug, info};
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::game::{Action, GameConfig, GameEngine, GameState, StepResult};
use crate::scheduler::TickScheduler;

/// Sole owner of the game state and of the tick timer.
///
/// Every mutation goes through [`GameController::apply`] or
/// [`GameController::on_tick`], and every change of tick period is a
/// cancel-and-restart of the scheduler performed inside `on_tick`.
pub struct GameController<R: Rng = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    scheduler: TickScheduler,
}

impl GameController<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }
}

impl<R: Rng> GameController<R> {
    pub fn with_engine(mut engine: GameEngine<R>) -> Self {
        let state = engine.initial_state();
        let scheduler = TickScheduler::new(state.delay());

        Self {
            engine,
            state,
            scheduler,
        }
    }

    /// Read-only view for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_active()
    }

    pub fn tick_period(&self) -> Duration {
        self.scheduler.period()
    }

    /// Apply a player command. Returns whether it changed anything.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Start => {
                if !self.engine.start(&mut self.state) {
                    return false;
                }
                self.scheduler.start(self.state.delay());
                info!(
                    "Game started on a {0}x{0} grid at {1} ms per tick",
                    self.state.grid_size, self.state.delay_ms
                );
                true
            }
            Action::Turn(direction) => self.engine.set_direction(&mut self.state, direction),
        }
    }

    /// Run one tick of the game
    pub fn on_tick(&mut self) -> StepResult {
        let result = self.engine.step(&mut self.state);

        if let Some(over) = result.game_over {
            self.scheduler.stop();
            // Keep the stored period in step with the reset delay
            self.scheduler.reschedule(self.state.delay());
            info!(
                "Game over ({:?}), score {}",
                result.info.collision_type, over.final_score
            );
            if over.new_high_score {
                info!("New high score: {}", over.final_score);
            }
            return result;
        }

        if result.info.ate_food {
            debug!(
                "Food eaten, score {}, next food at ({}, {})",
                self.state.score(),
                self.state.food.x,
                self.state.food.y
            );
        }
        if result.info.delay_changed {
            self.scheduler.reschedule(self.state.delay());
            debug!("Tick period now {} ms", self.state.delay_ms);
        }

        result
    }

    /// Resolves when the next tick is due; never resolves while idle
    pub async fn next_tick(&mut self) {
        self.scheduler.tick().await;
    }
}
