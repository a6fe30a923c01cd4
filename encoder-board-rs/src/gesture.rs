//! Push-encoder gesture decoding.
//!
//! [`GestureDecoder`] turns successive (position, pressed) readings of one
//! encoder into [`Gesture`]s. It does no I/O and keeps time through the
//! caller's millisecond timestamps, so it runs the same on the host.

use heapless::Vec;

/// Default hold time separating a click from a long press.
pub const DEFAULT_LONG_PRESS_MS: u64 = 600;

/// What the user did with one push encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Rotated with the knob released, by `delta` detents.
    Turn(i32),
    /// Rotated with the knob pushed in, by `delta` detents.
    PressedTurn(i32),
    /// Pushed and released within the long-press time, without turning.
    Click,
    /// Pushed for at least the long-press time, without turning.
    LongPress,
}

/// Gestures produced by one reading.
pub type Gestures = Vec<Gesture, 2>;

#[derive(Debug, Clone, Copy)]
struct Press {
    since_ms: u64,
    turned: bool,
}

/// Gesture state of one push encoder.
///
/// ```
/// use encoder_driver::{Gesture, GestureDecoder};
///
/// let mut knob = GestureDecoder::new(0);
/// assert!(knob.update(0, true, 1000).is_empty());
/// assert_eq!(knob.update(0, false, 1100).as_slice(), &[Gesture::Click]);
/// ```
#[derive(Debug, Clone)]
pub struct GestureDecoder {
    position: i32,
    press: Option<Press>,
    long_press_ms: u64,
}

impl GestureDecoder {
    /// Start from the encoder's current `position`, knob released.
    pub fn new(position: i32) -> Self {
        Self::with_long_press(position, DEFAULT_LONG_PRESS_MS)
    }

    /// Like [`new()`](Self::new) with a custom long-press time.
    pub fn with_long_press(position: i32, long_press_ms: u64) -> Self {
        Self {
            position,
            press: None,
            long_press_ms,
        }
    }

    /// Feed one reading taken at `now_ms`.
    ///
    /// A rotation while pushed makes the whole press a pressed turn: its
    /// release yields neither a click nor a long press. A press that
    /// started in this reading counts as pushed for any rotation in it.
    pub fn update(&mut self, position: i32, pressed: bool, now_ms: u64) -> Gestures {
        let mut gestures = Gestures::new();
        let delta = position.wrapping_sub(self.position);
        self.position = position;

        if pressed && self.press.is_none() {
            self.press = Some(Press {
                since_ms: now_ms,
                turned: false,
            });
        }

        if delta != 0 {
            let gesture = match self.press.as_mut() {
                Some(press) => {
                    press.turned = true;
                    Gesture::PressedTurn(delta)
                }
                None => Gesture::Turn(delta),
            };
            // At most two gestures per reading: one rotation, one release.
            let _ = gestures.push(gesture);
        }

        if !pressed {
            if let Some(press) = self.press.take() {
                if !press.turned {
                    let held = now_ms.saturating_sub(press.since_ms);
                    let gesture = if held >= self.long_press_ms {
                        Gesture::LongPress
                    } else {
                        Gesture::Click
                    };
                    let _ = gestures.push(gesture);
                }
            }
        }

        gestures
    }

    /// Returns `true` while the knob is pushed in.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_reading_yields_nothing() {
        let mut knob = GestureDecoder::new(5);
        assert!(knob.update(5, false, 0).is_empty());
    }

    #[test]
    fn released_rotation_is_turn() {
        let mut knob = GestureDecoder::new(0);
        assert_eq!(knob.update(2, false, 0).as_slice(), &[Gesture::Turn(2)]);
        assert_eq!(knob.update(1, false, 10).as_slice(), &[Gesture::Turn(-1)]);
    }

    #[test]
    fn short_press_is_click() {
        let mut knob = GestureDecoder::new(0);
        assert!(knob.update(0, true, 100).is_empty());
        assert!(knob.is_pressed());
        assert_eq!(knob.update(0, false, 250).as_slice(), &[Gesture::Click]);
        assert!(!knob.is_pressed());
    }

    #[test]
    fn long_hold_is_long_press() {
        let mut knob = GestureDecoder::new(0);
        knob.update(0, true, 100);
        assert_eq!(knob.update(0, false, 700).as_slice(), &[Gesture::LongPress]);
    }

    #[test]
    fn hold_just_under_threshold_is_click() {
        let mut knob = GestureDecoder::new(0);
        knob.update(0, true, 100);
        assert_eq!(knob.update(0, false, 699).as_slice(), &[Gesture::Click]);
    }

    #[test]
    fn custom_long_press_time() {
        let mut knob = GestureDecoder::with_long_press(0, 200);
        knob.update(0, true, 0);
        assert_eq!(knob.update(0, false, 200).as_slice(), &[Gesture::LongPress]);
    }

    #[test]
    fn pushed_rotation_is_pressed_turn_without_click() {
        let mut knob = GestureDecoder::new(0);
        knob.update(0, true, 0);
        assert_eq!(knob.update(1, true, 50).as_slice(), &[Gesture::PressedTurn(1)]);
        assert_eq!(knob.update(3, true, 80).as_slice(), &[Gesture::PressedTurn(2)]);
        assert!(knob.update(3, false, 1000).is_empty());
    }

    #[test]
    fn press_and_rotation_in_one_reading_is_pressed_turn() {
        let mut knob = GestureDecoder::new(0);
        assert_eq!(knob.update(-1, true, 0).as_slice(), &[Gesture::PressedTurn(-1)]);
        assert!(knob.update(-1, false, 100).is_empty());
    }

    #[test]
    fn rotation_then_release_in_one_reading() {
        let mut knob = GestureDecoder::new(0);
        knob.update(0, true, 0);
        // Rotated and released between two readings: the rotation counts
        // as pushed, so no click follows.
        assert_eq!(knob.update(1, false, 100).as_slice(), &[Gesture::PressedTurn(1)]);
    }

    #[test]
    fn next_press_starts_fresh() {
        let mut knob = GestureDecoder::new(0);
        knob.update(0, true, 0);
        knob.update(1, true, 10);
        knob.update(1, false, 20);

        knob.update(1, true, 1000);
        assert_eq!(knob.update(1, false, 1100).as_slice(), &[Gesture::Click]);
    }

    #[test]
    fn position_wraps_without_overflow() {
        let mut knob = GestureDecoder::new(i32::MAX);
        assert_eq!(knob.update(i32::MIN, false, 0).as_slice(), &[Gesture::Turn(1)]);
    }
}
