//! Hand landmark input and the per-result hand signal.
//!
//! An external tracker reports at most one hand per inference result, as 21
//! keypoints in normalized image coordinates (`x` right, `y` down, both in
//! `0..1`). Only three keypoints matter here:
//!
//! - [`PALM_CENTER`] gives the hand position,
//! - [`THUMB_TIP`] and [`INDEX_TIP`] give the pinch distance.
//!
//! [`HandSignalProcessor`] reduces each result to a [`HandSignal`]. A result
//! with no hand leaves the previous signal untouched, so motion driven by it
//! carries on through short tracking dropouts.

use glam::Vec2;

use crate::error::LandmarkError;

// ============================================================================
// Keypoint indices
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// The knuckle of the middle finger sits closest to the middle of the palm.
pub const PALM_CENTER: usize = MIDDLE_MCP;

/// Keypoints per hand.
pub const LANDMARK_COUNT: usize = 21;

// ============================================================================
// Landmarks
// ============================================================================

/// One tracked hand: 21 keypoints in normalized image coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkSet {
    points: [Vec2; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Vec2; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build a set from a slice, as delivered by most tracker bindings.
    pub fn from_slice(points: &[Vec2]) -> Result<Self, LandmarkError> {
        let points: [Vec2; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                found: points.len(),
            })?;
        Ok(Self { points })
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec2 {
        self.points[index]
    }

    pub fn points(&self) -> &[Vec2; LANDMARK_COUNT] {
        &self.points
    }

    pub fn palm_center(&self) -> Vec2 {
        self.points[PALM_CENTER]
    }

    /// Distance between the thumb and index finger tips, in normalized units.
    pub fn pinch_distance(&self) -> f32 {
        self.points[THUMB_TIP].distance(self.points[INDEX_TIP])
    }
}

/// Outcome of one inference pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Detection {
    Hand(LandmarkSet),
    NoHand,
}

impl From<Option<LandmarkSet>> for Detection {
    fn from(hand: Option<LandmarkSet>) -> Self {
        match hand {
            Some(set) => Detection::Hand(set),
            None => Detection::NoHand,
        }
    }
}

/// Anything that produces hand tracking results on its own cadence.
///
/// `poll` is called once per display frame and returns `Some` only when a
/// new result has arrived since the last call.
pub trait LandmarkSource {
    fn poll(&mut self) -> Option<Detection>;
}

// ============================================================================
// Hand signal
// ============================================================================

/// Compact per-result summary of the hand.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandSignal {
    /// Palm position, centered on the image with `+y` up, both axes in `-1..=1`.
    pub palm: Vec2,
    /// Thumb and index tips are closer than the pinch threshold.
    pub pinching: bool,
}

/// Map normalized image coordinates to centered coordinates with `+y` up.
#[inline]
pub fn centered(image_point: Vec2) -> Vec2 {
    let c = Vec2::new(image_point.x * 2.0 - 1.0, -(image_point.y * 2.0 - 1.0));
    c.clamp(Vec2::NEG_ONE, Vec2::ONE)
}

/// Turns landmark sets into [`HandSignal`]s.
#[derive(Debug, Clone)]
pub struct HandSignalProcessor {
    pinch_threshold: f32,
    signal: HandSignal,
}

impl HandSignalProcessor {
    pub fn new(pinch_threshold: f32) -> Self {
        Self {
            pinch_threshold,
            signal: HandSignal::default(),
        }
    }

    /// The latest signal (default until the first hand is seen).
    pub fn signal(&self) -> HandSignal {
        self.signal
    }

    /// Fold one inference result into the signal.
    ///
    /// Returns the new signal when it was overwritten and `None` when the
    /// result carried no usable hand. A set whose palm keypoint is not a
    /// finite number is dropped. A non-finite or zero pinch distance never
    /// counts as a pinch.
    pub fn process(&mut self, detection: &Detection) -> Option<HandSignal> {
        let hand = match detection {
            Detection::Hand(hand) => hand,
            Detection::NoHand => return None,
        };

        let palm = hand.palm_center();
        if !palm.is_finite() {
            log::debug!("dropping landmark set with non-finite palm {:?}", palm);
            return None;
        }

        let distance = hand.pinch_distance();
        let pinching = distance.is_finite() && distance > 0.0 && distance < self.pinch_threshold;

        self.signal = HandSignal {
            palm: centered(palm),
            pinching,
        };
        Some(self.signal)
    }
}
