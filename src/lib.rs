//! # pinchfield
//!
//! A spiral galaxy of particles steered by a tracked hand.
//!
//! The field is generated once: particles are laid out along Archimedean
//! spiral arms in a thin disk and colored by their distance from the center.
//! From then on, hand tracking results drive it:
//!
//! - the palm position spins the field (left/right turns it about the vertical
//!   axis, up/down tilts it), and the spin decays once the hand stops steering,
//! - closing thumb and index finger (a pinch) toggles the field between its
//!   normal and expanded size, easing toward the new scale,
//! - while the pinch is held, colors sweep through a rainbow.
//!
//! ## Quick Start
//!
//! The interaction core runs without a window. Feed it tracking results as
//! they arrive and tick it once per frame:
//!
//! ```
//! use pinchfield::hand::{self, Detection, LandmarkSet, LANDMARK_COUNT};
//! use pinchfield::{Config, Controller, Vec2};
//!
//! let config = Config { particle_count: 1_000, ..Config::default() };
//! let mut controller = Controller::new(&config);
//!
//! // A hand right of center, thumb and index tips touching
//! let mut points = [Vec2::new(0.75, 0.5); LANDMARK_COUNT];
//! points[hand::THUMB_TIP] = Vec2::new(0.70, 0.40);
//! points[hand::INDEX_TIP] = Vec2::new(0.71, 0.40);
//! controller.on_detection(&Detection::Hand(LandmarkSet::new(points)));
//!
//! let frame = controller.tick(0.0);
//! assert!(frame.yaw > 0.0);
//! assert_eq!(controller.target_scale(), 2.0);
//! ```
//!
//! To open a window and drive it with the mouse as a stand-in hand, call
//! [`run`](app::run).
//!
//! ## Frame order
//!
//! Tracking results and display frames arrive independently. Results go
//! through a single-slot mailbox ([`mailbox::SignalSlot`]): the newest one
//! wins and each is consumed by at most one frame. Every [`Controller::tick`]
//! then:
//!
//! 1. toggles the scale target on a pinch start,
//! 2. eases the scale toward the target,
//! 3. sets the spin from the palm if a fresh result arrived,
//! 4. adds the spin to the rotation and damps it,
//! 5. recolors the field while pinching.

pub mod app;
pub mod color;
pub mod config;
pub mod controller;
pub mod error;
mod gpu;
pub mod hand;
pub mod input;
pub mod mailbox;
pub mod motion;
pub mod spiral;
pub mod time;
pub mod toggle;

pub use config::Config;
pub use controller::{Controller, Notice};
pub use error::{AppError, ConfigError, GpuError, LandmarkError};
pub use glam::{Vec2, Vec3};
pub use hand::{Detection, HandSignal, LandmarkSet, LandmarkSource};
pub use motion::FrameOutput;
pub use spiral::ParticleField;
pub use toggle::ExpandState;

/// Convenient re-exports for common usage.
///
/// ```
/// use pinchfield::prelude::*;
///
/// let controller = Controller::new(&Config { particle_count: 10, ..Config::default() });
/// assert_eq!(controller.expand_state(), ExpandState::Normal);
/// ```
pub mod prelude {
    pub use crate::app::run;
    pub use crate::config::Config;
    pub use crate::controller::{Controller, Notice};
    pub use crate::hand::{Detection, HandSignal, LandmarkSet, LandmarkSource};
    pub use crate::input::SimulatedHand;
    pub use crate::motion::FrameOutput;
    pub use crate::spiral::ParticleField;
    pub use crate::toggle::ExpandState;
    pub use crate::{Vec2, Vec3};
}
