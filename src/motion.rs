//! Per-frame motion integration.
//!
//! Runs once per display frame. Each step:
//!
//! 1. eases the scale toward the toggle target: `scale += (target - scale) * ease_rate`,
//! 2. replaces the spin rate with `palm * gain` when a fresh hand signal arrived,
//! 3. integrates the rotation angles: `angles += spin`,
//! 4. damps the spin: `spin *= damping`,
//! 5. while pinching, rewrites every particle color with the rainbow sweep.
//!
//! Damping is applied after the spin is used, so a flick keeps the field
//! turning and slowing down smoothly once the hand stops reporting.
//!
//! Rates are per frame, not per second: the frame rate is owned by the
//! display, and the field is tuned for a ~60 Hz refresh.

use glam::Vec2;

use crate::color::{hsl_to_rgb, sweep_hue};
use crate::config::Config;
use crate::hand::HandSignal;
use crate::spiral::ParticleField;

/// Mutable motion state carried between frames.
///
/// Both `spin` and `angles` store the yaw component (turning about the
/// vertical axis, driven by horizontal palm offset) in `x` and the pitch
/// component (driven by vertical palm offset) in `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Eased scale factor.
    pub scale: f32,
    /// Spin rate in radians per frame.
    pub spin: Vec2,
    /// Accumulated rotation in radians.
    pub angles: Vec2,
    /// Whether the previous frame saw a pinch.
    pub was_pinching: bool,
}

impl MotionState {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            spin: Vec2::ZERO,
            angles: Vec2::ZERO,
            was_pinching: false,
        }
    }

    /// Record this frame's pinch flag; true only on the frame a pinch begins.
    pub fn pinch_rising(&mut self, pinching: bool) -> bool {
        let rising = pinching && !self.was_pinching;
        self.was_pinching = pinching;
        rising
    }

    /// Stop all rotation and return to the unrotated pose.
    pub fn stop_rotation(&mut self) {
        self.spin = Vec2::ZERO;
        self.angles = Vec2::ZERO;
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// What the renderer needs after a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// Uniform scale of the field.
    pub scale: f32,
    /// Rotation about the horizontal (x) axis, in radians.
    pub pitch: f32,
    /// Rotation about the vertical (y) axis, in radians.
    pub yaw: f32,
    /// The color buffer was rewritten and must be re-uploaded.
    pub colors_changed: bool,
}

/// Step function parameters, copied out of [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct MotionIntegrator {
    ease_rate: f32,
    damping: f32,
    gain: f32,
    cycle_rate: f32,
    saturation: f32,
    lightness: f32,
}

impl MotionIntegrator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ease_rate: config.expand_ease_rate,
            damping: config.rotation_damping,
            gain: config.rotation_gain,
            cycle_rate: config.color_cycle_rate,
            saturation: config.saturation,
            lightness: config.lightness,
        }
    }

    /// Move the scale a fixed fraction of the way to `target`.
    #[inline]
    pub fn ease(&self, state: &mut MotionState, target: f32) {
        state.scale += (target - state.scale) * self.ease_rate;
    }

    /// Set the spin rate proportional to the palm's offset from center.
    #[inline]
    pub fn steer(&self, state: &mut MotionState, palm: Vec2) {
        state.spin = palm * self.gain;
    }

    /// Integrate the rotation angles, then damp the spin rate.
    #[inline]
    pub fn advance(&self, state: &mut MotionState) {
        state.angles += state.spin;
        state.spin *= self.damping;
    }

    /// Rewrite every color with the rainbow sweep at `time_secs`.
    pub fn recolor(&self, field: &mut ParticleField, time_secs: f64) {
        let count = field.len();
        let (saturation, lightness, rate) = (self.saturation, self.lightness, self.cycle_rate);
        for (i, color) in field.colors_mut().iter_mut().enumerate() {
            *color = hsl_to_rgb(sweep_hue(i, count, time_secs, rate), saturation, lightness);
        }
    }

    /// Run one frame.
    ///
    /// `fresh` is the hand signal that arrived since the previous frame, if
    /// any; `pinching` is the pinch flag of the latest signal, fresh or not.
    pub fn step(
        &self,
        state: &mut MotionState,
        target: f32,
        fresh: Option<HandSignal>,
        pinching: bool,
        field: &mut ParticleField,
        time_secs: f64,
    ) -> FrameOutput {
        self.ease(state, target);

        if let Some(signal) = fresh {
            self.steer(state, signal.palm);
        }
        self.advance(state);

        if pinching {
            self.recolor(field, time_secs);
        }

        FrameOutput {
            scale: state.scale,
            pitch: state.angles.y,
            yaw: state.angles.x,
            colors_changed: pinching,
        }
    }
}
