//! Top-level interaction controller.
//!
//! [`Controller`] owns every piece of mutable state: the particle field, the
//! hand signal processor and its mailbox, the toggle and the motion state.
//! The host calls into it from two kinds of callbacks that never overlap:
//!
//! - [`on_detection`](Controller::on_detection) whenever the hand tracker
//!   produces a result,
//! - [`tick`](Controller::tick) once per display frame,
//!
//! plus [`toggle`](Controller::toggle) and [`reset`](Controller::reset) for
//! manual input. User-facing messages are queued as [`Notice`]s for the host
//! to show however it likes.

use std::fmt;

use crate::config::Config;
use crate::hand::{Detection, HandSignal, HandSignalProcessor};
use crate::mailbox::SignalSlot;
use crate::motion::{FrameOutput, MotionIntegrator, MotionState};
use crate::spiral::{self, ParticleField};
use crate::toggle::{ExpandState, ToggleEvent, ToggleMachine};

/// Short advisory message for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Expanding,
    Contracting,
    ViewReset,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Expanding => write!(f, "Expanding!"),
            Notice::Contracting => write!(f, "Contracting!"),
            Notice::ViewReset => write!(f, "View reset!"),
        }
    }
}

/// Owns the field and all interaction state.
pub struct Controller {
    field: ParticleField,
    processor: HandSignalProcessor,
    slot: SignalSlot<HandSignal>,
    toggle: ToggleMachine,
    motion: MotionState,
    integrator: MotionIntegrator,
    notices: Vec<Notice>,
}

impl Controller {
    /// Generate a field from `config` and start in the normal, unrotated pose.
    pub fn new(config: &Config) -> Self {
        Self::with_field(config, spiral::generate(config))
    }

    /// Start with an already generated field.
    pub fn with_field(config: &Config, field: ParticleField) -> Self {
        let toggle = ToggleMachine::from_config(config);
        let motion = MotionState::new(toggle.target());
        Self {
            field,
            processor: HandSignalProcessor::new(config.pinch_threshold),
            slot: SignalSlot::new(),
            toggle,
            motion,
            integrator: MotionIntegrator::from_config(config),
            notices: Vec::new(),
        }
    }

    // ========== Inputs ==========

    /// Feed one hand tracking result.
    ///
    /// A result without a usable hand changes nothing.
    pub fn on_detection(&mut self, detection: &Detection) {
        if let Some(signal) = self.processor.process(detection) {
            self.slot.post(signal);
        }
    }

    /// Manual toggle between normal and expanded.
    pub fn toggle(&mut self) {
        self.apply(ToggleEvent::Manual);
    }

    /// Return to the normal scale target and stop all rotation.
    pub fn reset(&mut self) {
        self.toggle.reset();
        self.motion.stop_rotation();
        log::info!("{}", Notice::ViewReset);
        self.notices.push(Notice::ViewReset);
    }

    /// Advance one display frame. `time_secs` is the wall clock driving the
    /// rainbow sweep.
    pub fn tick(&mut self, time_secs: f64) -> FrameOutput {
        let fresh = self.slot.take_fresh();
        let pinching = self.slot.latest().map_or(false, |s| s.pinching);

        if self.motion.pinch_rising(pinching) {
            log::debug!("pinch started");
            self.apply(ToggleEvent::PinchStart);
        }

        self.integrator.step(
            &mut self.motion,
            self.toggle.target(),
            fresh,
            pinching,
            &mut self.field,
            time_secs,
        )
    }

    fn apply(&mut self, event: ToggleEvent) {
        let notice = match self.toggle.handle(event) {
            ExpandState::Expanded => Notice::Expanding,
            ExpandState::Normal => Notice::Contracting,
        };
        log::info!("{}", notice);
        self.notices.push(notice);
    }

    // ========== Queries ==========

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn expand_state(&self) -> ExpandState {
        self.toggle.state()
    }

    /// Scale the field is currently easing toward.
    pub fn target_scale(&self) -> f32 {
        self.toggle.target()
    }

    /// The latest hand signal, if a hand has ever been seen.
    pub fn hand_signal(&self) -> Option<HandSignal> {
        self.slot.latest()
    }

    /// Take all notices queued since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
