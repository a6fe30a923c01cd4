//! Encoder gestures to menu events.
//!
//! Encoder 0 is the menu knob: turn steps, turn while pushed is
//! press-and-step, click selects, long press changes screen. Encoder 1 is
//! the master-volume knob. The other two encoders are unused.

use encoder_driver::Gesture;
use fm_panel::menu::MenuEvent;
use heapless::Vec;

/// Encoder driving the menu.
pub const MENU_ENCODER: usize = 0;
/// Encoder driving master volume.
pub const VOLUME_ENCODER: usize = 1;

/// Detents turned into events per reading; a faster spin is cut short.
const MAX_DETENTS: usize = 8;

/// Events produced by one gesture.
pub type MenuEvents = Vec<MenuEvent, MAX_DETENTS>;

/// Translate one gesture of `encoder`.
pub fn menu_events(encoder: usize, gesture: Gesture) -> MenuEvents {
    let (event, count) = match (encoder, gesture) {
        (MENU_ENCODER, Gesture::Turn(delta)) => (step(delta, MenuEvent::StepDown, MenuEvent::StepUp), delta),
        (MENU_ENCODER, Gesture::PressedTurn(delta)) => (
            step(delta, MenuEvent::PressAndStepDown, MenuEvent::PressAndStepUp),
            delta,
        ),
        (MENU_ENCODER, Gesture::Click) => (MenuEvent::Select, 1),
        (MENU_ENCODER, Gesture::LongPress) => (MenuEvent::NextScreen, 1),
        (VOLUME_ENCODER, Gesture::Turn(delta) | Gesture::PressedTurn(delta)) => {
            (step(delta, MenuEvent::VolumeDown, MenuEvent::VolumeUp), delta)
        }
        _ => return MenuEvents::new(),
    };

    let mut events = MenuEvents::new();
    for _ in 0..(count.unsigned_abs() as usize).min(MAX_DETENTS) {
        // Capacity is MAX_DETENTS, so this never fails.
        let _ = events.push(event);
    }
    events
}

fn step(delta: i32, down: MenuEvent, up: MenuEvent) -> MenuEvent {
    if delta < 0 {
        down
    } else {
        up
    }
}
