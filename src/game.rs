//! Frame driver
//!
//! [`GameLoop`] owns everything one running game needs and performs one
//! sample → advance → render cycle per display frame. It knows nothing about
//! the browser; hosts feed it key codes and hand its frames to a surface.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::input::{Control, InputSampler};
use crate::renderer::{Frame, Renderer};
use crate::settings::Settings;
use crate::sim::{GameState, advance};
use crate::tuning::Tuning;

pub struct GameLoop<R: Rng = Pcg32> {
    state: GameState,
    sampler: InputSampler,
    rng: R,
    tuning: Tuning,
    settings: Settings,
    renderer: Renderer,
}

impl GameLoop<Pcg32> {
    /// New game with a seeded generator
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        log::info!("Game seeded with {}", seed);
        Self::with_rng(Pcg32::seed_from_u64(seed), tuning, settings)
    }
}

impl<R: Rng> GameLoop<R> {
    pub fn with_rng(mut rng: R, tuning: Tuning, settings: Settings) -> Self {
        let state = GameState::new(&tuning, &mut rng);
        let renderer = Renderer::new(&settings, &tuning);
        Self {
            state,
            sampler: InputSampler::new(),
            rng,
            tuning,
            settings,
            renderer,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Key pressed; returns whether the key is bound to a control
    pub fn key_down(&mut self, code: &str) -> bool {
        match self.settings.bindings.control_for(code) {
            Some(control) => {
                self.sampler.press(control);
                true
            }
            None => false,
        }
    }

    /// Key released; returns whether the key is bound to a control
    pub fn key_up(&mut self, code: &str) -> bool {
        match self.settings.bindings.control_for(code) {
            Some(control) => {
                self.sampler.release(control);
                true
            }
            None => false,
        }
    }

    /// Press a control directly, bypassing key bindings
    pub fn press(&mut self, control: Control) {
        self.sampler.press(control);
    }

    pub fn release(&mut self, control: Control) {
        self.sampler.release(control);
    }

    /// Drop every held control (focus lost)
    pub fn release_all(&mut self) {
        self.sampler.release_all();
    }

    /// Throw the current run away and start over
    pub fn restart(&mut self) {
        self.state = GameState::new(&self.tuning, &mut self.rng);
        log::info!("Restarted");
    }

    /// Run one frame and return what to draw
    pub fn frame(&mut self) -> Frame {
        let input = self.sampler.snapshot();

        // The fresh run is shown as-is; other input this frame is dropped
        if self.state.terminal && input.restart {
            self.restart();
            return self.renderer.render(&self.state);
        }

        let state = std::mem::replace(&mut self.state, GameState::empty(&self.tuning));
        self.state = advance(state, &input, &self.tuning, &mut self.rng);

        self.renderer.render(&self.state)
    }
}
