//! Shell-facing facade over the simulation
//!
//! The input/render shell reports input through the `on_*` callbacks, calls
//! [`Session::tick`] once per rendered frame, then drains events for
//! effects and sound.

use glam::Vec2;

use crate::consts::MAX_FRAME_DT;
use crate::sim::{GameEvent, GamePhase, GameState, Hitboxes, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// One running game: simulation state plus input pending for the next frame
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    input: TickInput,
}

impl Session {
    /// New session in the menu with default tuning
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(seed),
            input: TickInput::default(),
        }
    }

    /// New session with custom balance. Invalid tuning is rejected up front.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        Ok(Self {
            state: GameState::with_config(seed, tuning, Hitboxes::shared_default())?,
            input: TickInput::default(),
        })
    }

    /// Start or restart (ignored while playing)
    pub fn on_confirm_input(&mut self) {
        self.input.confirm = true;
    }

    /// Movement direction; persists until the next call (send zero on release)
    pub fn on_move_input(&mut self, direction: Vec2) {
        self.input.move_dir = direction;
    }

    /// Shoot is held this frame; call again every frame the button stays down
    pub fn on_shoot_input(&mut self) {
        self.input.fire = true;
    }

    /// Advance one frame. Long frames are clamped so a stall can't tunnel entities.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt > MAX_FRAME_DT { MAX_FRAME_DT } else { dt };
        tick(&mut self.state, &self.input, dt);

        // Clear one-shot inputs after processing
        self.input.confirm = false;
        self.input.fire = false;
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Score at the last game over (0 until one happens this session)
    pub fn final_score(&self) -> u64 {
        self.state.final_score
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Read-only view for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }
}
