//! Front-panel OLED for the FM menu: an SSD1306 (128×64) driven with Embassy.
//!
//! The menu writes four text fields per frame. This crate turns them into a
//! [`DisplayState`] (control sequences stripped, cursor parsed), lays them
//! out as two text rows with [`render_display`], and drives the panel
//! through [`PanelDisplay`]. With the `task` feature, [`FrameSink`] and
//! [`display_update_task`] move rendering out of the menu's lock.
//!
//! # Quick Start
//!
//! ```ignore
//! use panel_display_rs::{display_update_task, DisplayConfig, FrameSignal, FrameSink, PanelDisplay};
//!
//! static FRAMES: FrameSignal = Signal::new();
//!
//! // In your Embassy main:
//! let oled = PanelDisplay::new(i2c_oled, 0x3C);
//! spawner.spawn(unwrap!(oled_task(oled, &FRAMES, DisplayConfig::default())));
//! let sink = FrameSink::new(&FRAMES); // give this to the MenuController
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn oled_task(
//!     driver: PanelDisplay<MyI2cType>,
//!     frames: &'static FrameSignal,
//!     config: DisplayConfig,
//! ) {
//!     display_update_task(driver, frames, config).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging via [`defmt`].
//! - **`task`**: [`FrameSink`] and [`display_update_task`] (Embassy).

#![no_std]

#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod layout;

// ── Re-exports for convenience ───────────────────────────────────────────

#[cfg(feature = "task")]
pub use display_task::{display_update_task, FrameSignal, FrameSink};
pub use driver::PanelDisplay;
pub use error::PanelDisplayError;
pub use layout::{render_display, Cursor, DisplayChanges, DisplayConfig, DisplayState};
