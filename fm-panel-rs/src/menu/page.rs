use super::item::{Action, Item};

/// Renderer bound to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Bank and voice of the edited tone generator.
    BankVoice,
    /// Selected performance slot and its name.
    Performance,
    /// Group and mute state of every tone generator.
    GroupMute,
}

/// A menu page: one renderer plus its selectable items.
///
/// `items` is never empty; the dispatcher indexes it with the current
/// selection, which always stays below `items.len()`.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Page {
    /// Renderer for this page.
    pub screen: Screen,
    /// Selectable items, in selection order.
    pub items: &'static [Item],
}

const BANK_VOICE_ITEMS: [Item; 3] = [
    Item::new(Action::NextField, Action::ChangeToneGenerator, Action::ChangeMasterVolume),
    Item::new(Action::NextField, Action::ChangeBank, Action::ChangeMasterVolume),
    Item::new(Action::NextField, Action::ChangeVoice, Action::ChangeMasterVolume),
];

const PERFORMANCE_ITEMS: [Item; 1] = [Item::new(
    Action::LoadPerformance,
    Action::SelectPerformance,
    Action::ChangeMasterVolume,
)];

const GROUP_MUTE_ITEMS: [Item; 1] = [Item::new(
    Action::ToggleMute,
    Action::SelectToneGenerator,
    Action::EditGroup,
)];

/// The page table, in `NextScreen` order.
pub static PAGES: [Page; 3] = [
    Page {
        screen: Screen::BankVoice,
        items: &BANK_VOICE_ITEMS,
    },
    Page {
        screen: Screen::Performance,
        items: &PERFORMANCE_ITEMS,
    },
    Page {
        screen: Screen::GroupMute,
        items: &GROUP_MUTE_ITEMS,
    },
];
