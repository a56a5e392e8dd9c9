//! Input sampling
//!
//! Platform key events are mapped onto logical [`Control`]s and recorded in an
//! [`InputSampler`]. Once per tick the driver takes a [`TickInput`] snapshot,
//! which is the only thing the simulation ever sees.

use serde::{Deserialize, Serialize};

/// Logical game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    RotateLeft,
    RotateRight,
    Thrust,
    Fire,
    Restart,
}

impl Control {
    pub const COUNT: usize = 5;

    pub const ALL: [Control; Self::COUNT] = [
        Control::RotateLeft,
        Control::RotateRight,
        Control::Thrust,
        Control::Fire,
        Control::Restart,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    /// Fire was pressed this tick and not the tick before
    pub fire: bool,
    /// Restart was pressed this tick and not the tick before
    pub restart: bool,
}

/// Rising-edge detector over a sampled boolean
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    was_held: bool,
}

impl EdgeDetector {
    /// Feed the current level; true only on a low → high transition
    pub fn update(&mut self, held: bool) -> bool {
        let rising = held && !self.was_held;
        self.was_held = held;
        rising
    }
}

/// Tracks which controls are currently held
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    held: [bool; Control::COUNT],
    fire_edge: EdgeDetector,
    restart_edge: EdgeDetector,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns false when the control was already held
    /// (key auto-repeat), so repeats never look like fresh presses.
    pub fn press(&mut self, control: Control) -> bool {
        let slot = &mut self.held[control.index()];
        let fresh = !*slot;
        *slot = true;
        fresh
    }

    pub fn release(&mut self, control: Control) {
        self.held[control.index()] = false;
    }

    /// Drop every held control (focus lost, keyup events will never arrive)
    pub fn release_all(&mut self) {
        self.held = [false; Control::COUNT];
    }

    #[inline]
    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    /// Sample the held state for one tick, advancing the edge detectors
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            rotate_left: self.is_held(Control::RotateLeft),
            rotate_right: self.is_held(Control::RotateRight),
            thrust: self.is_held(Control::Thrust),
            fire: self.fire_edge.update(self.is_held(Control::Fire)),
            restart: self.restart_edge.update(self.is_held(Control::Restart)),
        }
    }
}
