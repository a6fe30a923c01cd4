//! Async driver for the Adafruit Quad Rotary Encoder Breakout, plus
//! push-encoder gesture decoding.
//!
//! # Architecture
//!
//! - **`driver`** (crate-private): Seesaw protocol primitives (timing,
//!   endianness, register addressing).
//! - **[`QuadEncoderBoard`]**: validated access to positions, push
//!   switches and interrupts.
//! - **[`GestureDecoder`]**: pure state machine turning readings into
//!   turn, pressed-turn, click and long-press [`Gesture`]s.
//!
//! # Quick start
//!
//! ```ignore
//! use encoder_driver::{GestureDecoder, QuadEncoderBoard, DEFAULT_ADDRESS};
//!
//! let mut board = QuadEncoderBoard::new(i2c, DEFAULT_ADDRESS);
//! board.configure_buttons().await?;
//! let state = board.read_state().await?;
//! let mut knob = GestureDecoder::new(state.positions[0]);
//!
//! // On every INT edge:
//! let state = board.read_state().await?;
//! for gesture in knob.update(state.positions[0], state.pressed[0], now_ms) {
//!     // ...
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`**: [`defmt::Format`] for the error, state and gesture types.

#![no_std]

pub use encoder_board::{BoardState, QuadEncoderBoard};
pub use error::EncoderError;
pub use gesture::{Gesture, GestureDecoder, Gestures, DEFAULT_LONG_PRESS_MS};
pub use registers::{DEFAULT_ADDRESS, ENCODER_COUNT};

mod driver;
mod encoder_board;
mod error;
mod gesture;
mod registers;
