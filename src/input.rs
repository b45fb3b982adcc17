//! Keyboard and mouse input, and the mouse-driven stand-in for a hand tracker.
//!
//! [`Input`] folds raw window events into per-frame state: which keys went
//! down this frame (no auto-repeat), whether the left button is held, and
//! where the cursor is in normalized image coordinates.
//!
//! [`SimulatedHand`] turns that state into hand tracking results at a fixed
//! rate, so the whole interaction path can be driven without a camera:
//! the cursor is the palm, and holding the left button closes thumb and
//! index finger into a pinch. Moving the cursor out of the window reports
//! no hand.

use glam::Vec2;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::hand::{self, Detection, LandmarkSet, LandmarkSource, LANDMARK_COUNT};

/// Keys the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Space,
    R,
    Escape,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::Escape => KeyCode::Escape,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle,
    Reset,
    Quit,
}

impl KeyCode {
    /// Key bindings: Space toggles, R resets the view, Escape quits.
    pub fn command(self) -> Option<Command> {
        match self {
            KeyCode::Space => Some(Command::Toggle),
            KeyCode::R => Some(Command::Reset),
            KeyCode::Escape => Some(Command::Quit),
            KeyCode::Other(_) => None,
        }
    }
}

/// Per-frame input state.
#[derive(Debug)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: Vec<KeyCode>,
    left_held: bool,
    /// Cursor in normalized image coordinates, `None` while outside the window.
    cursor: Option<Vec2>,
    window_size: (u32, u32),
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            keys_pressed: Vec::new(),
            left_held: false,
            cursor: None,
            window_size: (800, 600),
        }
    }

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Commands for the keys pressed this frame, in press order.
    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.keys_pressed.iter().filter_map(|k| k.command())
    }

    pub fn left_held(&self) -> bool {
        self.left_held
    }

    /// Cursor position with `(0, 0)` at the top-left and `(1, 1)` at the
    /// bottom-right of the window.
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Clear per-frame state. Call after the frame has consumed it.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.key(KeyCode::from(code), event.state);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    self.left_held = *state == ElementState::Pressed;
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }
            WindowEvent::Focused(false) => {
                self.keys_held.clear();
                self.left_held = false;
            }
            _ => {}
        }
    }

    fn key(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                // Only fire pressed event if not already held (no repeat)
                if self.keys_held.insert(key) {
                    self.keys_pressed.push(key);
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
            }
        }
    }

    fn cursor_moved(&mut self, x: f32, y: f32) {
        let (w, h) = self.window_size;
        if w > 0 && h > 0 {
            self.cursor = Some(Vec2::new(x / w as f32, y / h as f32));
        }
    }
}

// ============================================================================
// Simulated hand
// ============================================================================

/// Fingertip gap of a relaxed open hand, in normalized image units.
const OPEN_GAP: f32 = 0.12;
/// Fingertip gap while the button is held; well under the default pinch threshold.
const PINCH_GAP: f32 = 0.01;

/// Mouse-driven [`LandmarkSource`] reporting at a fixed rate.
#[derive(Debug)]
pub struct SimulatedHand {
    interval: Duration,
    next_due: Instant,
    cursor: Option<Vec2>,
    pinching: bool,
}

impl SimulatedHand {
    /// A hand reporting `rate_hz` results per second.
    pub fn new(rate_hz: f32) -> Self {
        Self {
            interval: Duration::from_secs_f32(1.0 / rate_hz.max(1.0)),
            next_due: Instant::now(),
            cursor: None,
            pinching: false,
        }
    }

    /// Sample the current cursor and button state.
    pub fn observe(&mut self, input: &Input) {
        self.cursor = input.cursor();
        self.pinching = input.left_held();
    }

    /// Produce a result if one is due at `now`.
    pub fn poll_at(&mut self, now: Instant) -> Option<Detection> {
        if now < self.next_due {
            return None;
        }
        self.next_due = now + self.interval;

        Some(match self.cursor {
            Some(palm) => Detection::Hand(synthesize(palm, self.pinching)),
            None => Detection::NoHand,
        })
    }
}

impl LandmarkSource for SimulatedHand {
    fn poll(&mut self) -> Option<Detection> {
        self.poll_at(Instant::now())
    }
}

/// Lay out a plausible upright right hand around `palm`.
fn synthesize(palm: Vec2, pinching: bool) -> LandmarkSet {
    let mut points = [palm; LANDMARK_COUNT];
    let at = |dx: f32, dy: f32| palm + Vec2::new(dx, dy);

    points[hand::WRIST] = at(0.0, 0.12);
    points[hand::THUMB_CMC] = at(-0.04, 0.09);
    points[hand::THUMB_MCP] = at(-0.07, 0.06);
    points[hand::THUMB_IP] = at(-0.09, 0.03);

    // Finger bases fan out across the top of the palm
    let fingers = [
        (hand::INDEX_MCP, -0.03),
        (hand::MIDDLE_MCP, 0.0),
        (hand::RING_MCP, 0.025),
        (hand::PINKY_MCP, 0.05),
    ];
    for (mcp, dx) in fingers {
        let base_y = if mcp == hand::MIDDLE_MCP { 0.0 } else { 0.005 };
        points[mcp] = at(dx, base_y);
        points[mcp + 1] = at(dx, base_y - 0.05);
        points[mcp + 2] = at(dx, base_y - 0.08);
        points[mcp + 3] = at(dx, base_y - 0.10);
    }

    // Thumb and index tips meet above the palm when pinching
    let gap = if pinching { PINCH_GAP } else { OPEN_GAP };
    let meet = at(-0.05, -0.08);
    points[hand::THUMB_TIP] = meet + Vec2::new(-gap / 2.0, 0.0);
    points[hand::INDEX_TIP] = meet + Vec2::new(gap / 2.0, 0.0);

    LandmarkSet::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::HandSignalProcessor;

    #[test]
    fn test_key_press_fires_once_while_held() {
        let mut input = Input::new();
        input.key(KeyCode::Space, ElementState::Pressed);
        assert!(input.key_pressed(KeyCode::Space));
        assert!(input.key_held(KeyCode::Space));

        input.end_frame();
        // Auto-repeat delivers another press while held
        input.key(KeyCode::Space, ElementState::Pressed);
        assert!(!input.key_pressed(KeyCode::Space));

        input.key(KeyCode::Space, ElementState::Released);
        input.key(KeyCode::Space, ElementState::Pressed);
        assert!(input.key_pressed(KeyCode::Space));
    }

    #[test]
    fn test_key_bindings() {
        let mut input = Input::new();
        input.key(KeyCode::R, ElementState::Pressed);
        input.key(KeyCode::Space, ElementState::Pressed);
        input.key(KeyCode::Other(7), ElementState::Pressed);
        let commands: Vec<_> = input.commands().collect();
        assert_eq!(commands, vec![Command::Reset, Command::Toggle]);
    }

    #[test]
    fn test_cursor_normalized() {
        let mut input = Input::new();
        input.set_window_size(800, 600);
        input.cursor_moved(400.0, 150.0);
        assert_eq!(input.cursor(), Some(Vec2::new(0.5, 0.25)));
    }

    #[test]
    fn test_simulated_hand_cadence() {
        let mut hand = SimulatedHand::new(30.0);
        let t0 = Instant::now();
        assert!(hand.poll_at(t0).is_some());
        assert!(hand.poll_at(t0 + Duration::from_millis(10)).is_none());
        assert!(hand.poll_at(t0 + Duration::from_millis(40)).is_some());
    }

    #[test]
    fn test_simulated_hand_without_cursor_reports_no_hand() {
        let mut hand = SimulatedHand::new(30.0);
        assert_eq!(hand.poll_at(Instant::now()), Some(Detection::NoHand));
    }

    #[test]
    fn test_simulated_pinch_crosses_threshold() {
        let mut proc = HandSignalProcessor::new(0.05);
        let palm = Vec2::new(0.75, 0.65);

        let open = proc.process(&Detection::Hand(synthesize(palm, false))).unwrap();
        assert!(!open.pinching);
        assert!((open.palm - Vec2::new(0.5, -0.3)).length() < 1e-5);

        let closed = proc.process(&Detection::Hand(synthesize(palm, true))).unwrap();
        assert!(closed.pinching);
    }
}
