/// Input events understood by the menu controller.
///
/// Every event except [`Update`](MenuEvent::Update) comes from a physical
/// control. `Update` is synthetic: it is delivered when the overlay
/// deadline expires and only re-renders the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    /// Re-render the current page. No item handler responds to it.
    Update,
    /// Advance to the next page, wrapping after the last one.
    NextScreen,
    /// Short press of the encoder button.
    Select,
    /// One encoder detent counter-clockwise.
    StepDown,
    /// One encoder detent clockwise.
    StepUp,
    /// One detent counter-clockwise while the button is held.
    PressAndStepDown,
    /// One detent clockwise while the button is held.
    PressAndStepUp,
    /// Dedicated volume encoder, one detent down.
    VolumeDown,
    /// Dedicated volume encoder, one detent up.
    VolumeUp,
}

impl MenuEvent {
    /// Direction of a step event: `-1` for the "down" events, `1` for the
    /// "up" events, `0` for everything else.
    pub fn direction(self) -> i32 {
        match self {
            MenuEvent::StepDown | MenuEvent::PressAndStepDown | MenuEvent::VolumeDown => -1,
            MenuEvent::StepUp | MenuEvent::PressAndStepUp | MenuEvent::VolumeUp => 1,
            MenuEvent::Update | MenuEvent::NextScreen | MenuEvent::Select => 0,
        }
    }
}
