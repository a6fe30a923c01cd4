//! Event-dispatch state machine for the front-panel menu.
//!
//! This module provides [`MenuController`], which owns the only mutable menu
//! state and routes every physical input event to the handler selected by
//! the current page and the current item on that page.
//!
//! # Architecture
//!
//! Pages are a fixed table ([`PAGES`]). Each page pairs a [`Screen`]
//! renderer with an ordered list of [`Item`]s, and each item holds up to
//! three [`Action`]s, one per input gesture:
//!
//! ```text
//!                    short press        encoder turn          press + turn
//! Page 0 (Voice):  [NextField]        [ChangeToneGenerator] [ChangeMasterVolume]
//!                  [NextField]        [ChangeBank]          [ChangeMasterVolume]
//!                  [NextField]        [ChangeVoice]         [ChangeMasterVolume]
//! Page 1 (Perf):   [LoadPerformance]  [SelectPerformance]   [ChangeMasterVolume]
//! Page 2 (Groups): [ToggleMute]       [SelectToneGenerator] [EditGroup]
//! ```
//!
//! After a handler runs, the controller re-renders the current page unless
//! the handler returned [`Outcome::Suppress`]. The master-volume handler
//! does that: it draws its own overlay and arms a revert deadline through
//! [`Overlay`]. When the deadline expires the host calls
//! [`MenuController::on_deadline()`], which re-renders the normal page.
//!
//! # Collaborators
//!
//! The sound engine, the bank catalog, the display and the timer facility
//! are reached only through the traits in [`interfaces`]. The controller
//! holds them generically, so borrowed `&mut` collaborators work as well as
//! owned ones.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. Display fields are [`heapless::String`]s of
//! [`FIELD_CAPACITY`] bytes and the tone-generator count is bounded by
//! [`MAX_TONE_GENERATORS`].

mod config;
mod controller;
mod error;
mod event;
pub mod format;
mod handlers;
pub mod interfaces;
mod item;
mod overlay;
mod page;
mod screens;
#[cfg(feature = "task")]
mod task;

#[cfg(test)]
pub(crate) mod testing;

pub use config::MenuConfig;
pub use controller::MenuController;
pub use error::MenuError;
pub use event::MenuEvent;
pub use interfaces::{BankCatalog, DeadlineTimer, DisplaySink, SynthEngine, ToneGeneratorParameter};
pub use item::{Action, Item, Outcome};
pub use overlay::Overlay;
pub use page::{Page, Screen, PAGES};
pub use screens::{Field, Frame};
#[cfg(feature = "task")]
pub use task::{overlay_timer_task, SignalTimer, TimerCommand, TimerHandle, TimerSignal};

/// Upper bound for [`MenuConfig::tone_generators`].
pub const MAX_TONE_GENERATORS: usize = 16;

/// Capacity in bytes of one display field.
pub const FIELD_CAPACITY: usize = 40;

/// Highest group id a tone generator can belong to. Group 0 is "ungrouped".
pub const MAX_GROUPS: usize = 4;

/// One glyph per group id, `GROUP_GLYPHS[0]` marking ungrouped generators.
pub const GROUP_GLYPHS: [char; MAX_GROUPS + 1] = ['.', 'A', 'B', 'C', 'D'];

/// Glyph shown in place of the tone-generator number when it is muted.
pub const MUTE_GLYPH: char = '-';
