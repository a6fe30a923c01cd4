/// A handler that can be bound to an item slot.
///
/// The set is closed: every handler the menu knows is a variant here and
/// is implemented by the controller (see `handlers.rs`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Move the selection to the next item on the page, wrapping to 0.
    NextField,
    /// Move the edited tone generator of the voice page.
    ChangeToneGenerator,
    /// Step the bank of the edited tone generator (and its group).
    ChangeBank,
    /// Step the voice of the edited tone generator (and its group),
    /// rolling into the neighbouring bank at either end.
    ChangeVoice,
    /// Step the master volume and show the volume overlay.
    ChangeMasterVolume,
    /// Load the selected performance in select-then-confirm mode.
    LoadPerformance,
    /// Step the selected performance slot.
    SelectPerformance,
    /// Mute or unmute the tone generator under the group-page cursor.
    ToggleMute,
    /// Move the group-page cursor.
    SelectToneGenerator,
    /// Step the group id of the tone generator under the group-page cursor.
    EditGroup,
}

/// What the dispatcher does after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Re-render the current page.
    Render,
    /// Leave the display alone; the handler drew its own screen.
    Suppress,
}

/// One selectable item of a page.
///
/// Each slot maps one input gesture to an optional [`Action`]. An empty
/// slot makes that gesture a no-op on this item (the page still
/// re-renders).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Item {
    /// Action for a short button press.
    pub short_press: Option<Action>,
    /// Action for an encoder turn.
    pub encoder: Option<Action>,
    /// Action for an encoder turn while the button is held.
    pub press_and_turn: Option<Action>,
}

impl Item {
    /// Build an item with all three slots bound.
    pub const fn new(short_press: Action, encoder: Action, press_and_turn: Action) -> Self {
        Self {
            short_press: Some(short_press),
            encoder: Some(encoder),
            press_and_turn: Some(press_and_turn),
        }
    }
}
