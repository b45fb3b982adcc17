//! Expand/contract toggle.
//!
//! A two-state machine that decides the scale the field eases toward.
//! Both a pinch rising edge and a manual trigger flip the state; a reset
//! always returns to [`ExpandState::Normal`]. The eased scale itself lives
//! with the motion state, not here.
//!
//! | state \ event | `PinchStart` | `Manual`  | `Reset` |
//! |---------------|--------------|-----------|---------|
//! | `Normal`      | `Expanded`   | `Expanded`| `Normal`|
//! | `Expanded`    | `Normal`     | `Normal`  | `Normal`|

use crate::config::Config;

/// Whether the field is contracted or expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandState {
    #[default]
    Normal,
    Expanded,
}

/// Inputs that drive the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    /// The hand started pinching this frame.
    PinchStart,
    /// An explicit toggle request (keyboard or similar).
    Manual,
    /// Return to normal regardless of the current state.
    Reset,
}

impl ExpandState {
    /// The transition table.
    pub fn next(self, event: ToggleEvent) -> ExpandState {
        match (self, event) {
            (_, ToggleEvent::Reset) => ExpandState::Normal,
            (ExpandState::Normal, ToggleEvent::PinchStart | ToggleEvent::Manual) => {
                ExpandState::Expanded
            }
            (ExpandState::Expanded, ToggleEvent::PinchStart | ToggleEvent::Manual) => {
                ExpandState::Normal
            }
        }
    }
}

/// Tracks the toggle state and maps it to a target scale.
#[derive(Debug, Clone)]
pub struct ToggleMachine {
    state: ExpandState,
    normal_scale: f32,
    expanded_scale: f32,
}

impl ToggleMachine {
    pub fn new(normal_scale: f32, expanded_scale: f32) -> Self {
        Self {
            state: ExpandState::Normal,
            normal_scale,
            expanded_scale,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.normal_scale, config.expanded_scale)
    }

    pub fn state(&self) -> ExpandState {
        self.state
    }

    /// Scale the field should ease toward in the current state.
    pub fn target(&self) -> f32 {
        match self.state {
            ExpandState::Normal => self.normal_scale,
            ExpandState::Expanded => self.expanded_scale,
        }
    }

    /// Apply an event and return the resulting state.
    pub fn handle(&mut self, event: ToggleEvent) -> ExpandState {
        self.state = self.state.next(event);
        self.state
    }

    pub fn reset(&mut self) {
        self.handle(ToggleEvent::Reset);
    }
}

impl Default for ToggleMachine {
    fn default() -> Self {
        Self::new(1.0, 2.0)
    }
}
