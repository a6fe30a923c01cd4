//! Front-panel menu controller for an FM tone-generator instrument.
//!
//! The panel is a rotary encoder with a push button and a small character
//! display. This crate turns the physical events into page navigation and
//! parameter changes on the sound engine, then re-renders the active screen.
//!
//! See [`menu`] for the event dispatcher, the page/item tables and the
//! screen renderers.
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`].
//! - **`task`**: Embassy-backed overlay timer ([`menu::SignalTimer`] and
//!   [`menu::overlay_timer_task`]).

#![no_std]

pub mod menu;
