//! Display layout types and rendering logic.
//!
//! This module defines the [`DisplayState`] snapshot built from the four
//! menu fields, the [`DisplayChanges`] diff, and the [`render_display`]
//! function that draws a frame using `embedded-graphics`.

use core::iter::Peekable;
use core::str::Chars;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{Alignment, Text},
};
use fm_panel::menu::{Field, Frame};
use heapless::String;

const ESC: char = '\x1b';

// ── DisplayConfig ────────────────────────────────────────────────────────

/// Configuration for the display layout and update task.
///
/// All layout geometry lives here. Callers can tune every dimension at
/// construction time without modifying library source.
///
/// [`DisplayConfig::default()`] fits a 16-column menu onto a 128×64
/// panel with the 6×10 font, refreshed at most 30 times per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Maximum refresh rate in Hz. Default: 30. Max: 60.
    pub update_frequency_hz: u32,

    // ── Layout geometry ──────────────────────────────────────────────
    /// Total display width in pixels. Default: 128.
    pub display_width: u32,
    /// Total display height in pixels. Default: 64.
    pub display_height: u32,
    /// Advance of one character cell in pixels. Default: 6.
    pub char_width: u32,
    /// Text baseline (pixels from top) of each text row. Default: 24, 48.
    pub row_baselines: [i32; 2],
    /// Distance from a row's baseline down to the cursor underline. Default: 2.
    pub cursor_underline_offset: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_frequency_hz: 30,
            display_width: 128,
            display_height: 64,
            char_width: 6,
            row_baselines: [24, 48],
            cursor_underline_offset: 2,
        }
    }
}

impl DisplayConfig {
    /// Convert the configured frequency to a minimum frame period in
    /// milliseconds.
    ///
    /// Formula: `1000 / update_frequency_hz`.
    pub fn update_period_ms(&self) -> u64 {
        1000 / u64::from(self.update_frequency_hz.max(1))
    }
}

// ── DisplayState ─────────────────────────────────────────────────────────

/// Character cell under the cursor, 1-based like the ANSI sequence that
/// placed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    pub row: u8,
    pub column: u8,
}

/// Snapshot of everything the display needs to render one frame.
///
/// Holds the four menu fields with their control sequences removed, plus
/// the cursor cell if the frame placed one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    /// Printable text of the four fields.
    pub text: Frame,
    /// Cursor cell, `None` when no cursor is shown.
    pub cursor: Option<Cursor>,
}

/// Cursor control collected while stripping a frame.
#[derive(Default)]
struct CursorControl {
    visible: Option<bool>,
    position: Option<Cursor>,
}

impl DisplayState {
    /// Build a snapshot from the four fields the menu writes.
    ///
    /// ANSI sequences are removed from the text. `ESC[row;colH` places
    /// the cursor and `ESC[?25l` hides it; `ESC[?25h` is accepted and
    /// every other sequence is dropped. Text beyond the field capacity
    /// is silently truncated.
    pub fn from_fields(
        top_left: &str,
        top_right: &str,
        bottom_left: &str,
        bottom_right: &str,
    ) -> Self {
        let mut control = CursorControl::default();
        let text = Frame {
            top_left: strip_ansi(top_left, &mut control),
            top_right: strip_ansi(top_right, &mut control),
            bottom_left: strip_ansi(bottom_left, &mut control),
            bottom_right: strip_ansi(bottom_right, &mut control),
        };

        let cursor = match control.visible {
            Some(false) => None,
            _ => control.position,
        };
        Self { text, cursor }
    }

    /// Left and right field of text row `row` (0 = top).
    pub fn row(&self, row: usize) -> (&str, &str) {
        if row == 0 {
            (self.text.top_left.as_str(), self.text.top_right.as_str())
        } else {
            (self.text.bottom_left.as_str(), self.text.bottom_right.as_str())
        }
    }
}

/// Copy `input` without its control sequences, recording cursor control.
fn strip_ansi(input: &str, control: &mut CursorControl) -> Field {
    let mut out = Field::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESC {
            if out.push(c).is_err() {
                break;
            }
            continue;
        }
        if chars.peek() != Some(&'[') {
            // Lone ESC, or a sequence type we do not handle.
            continue;
        }
        chars.next();
        let (params, command) = control_sequence(&mut chars);

        match (command, params.as_str()) {
            (Some('h'), "?25") => control.visible = Some(true),
            (Some('l'), "?25") => control.visible = Some(false),
            (Some('H'), params) => {
                if let Some(cursor) = parse_position(params) {
                    control.position = Some(cursor);
                }
            }
            _ => {}
        }
    }
    out
}

/// Read the parameters and final letter of a sequence after `ESC[`.
fn control_sequence(chars: &mut Peekable<Chars<'_>>) -> (String<16>, Option<char>) {
    let mut params = String::new();
    for c in chars.by_ref() {
        if c.is_ascii_alphabetic() {
            return (params, Some(c));
        }
        let _ = params.push(c);
    }
    (params, None)
}

/// Parse `row;col`. Missing numbers default to 1.
fn parse_position(params: &str) -> Option<Cursor> {
    fn number(s: &str) -> Option<u8> {
        if s.is_empty() {
            Some(1)
        } else {
            s.parse().ok()
        }
    }

    let (row, column) = params.split_once(';').unwrap_or((params, ""));
    Some(Cursor {
        row: number(row)?,
        column: number(column)?,
    })
}

// ── DisplayChanges ───────────────────────────────────────────────────────

/// Identifies which parts of the display changed between two
/// [`DisplayState`] snapshots.
///
/// Used to skip redundant flushes. Row granularity leaves room for
/// partial page updates later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayChanges {
    /// Per text row: `true` if either of its fields differs.
    pub row_changed: [bool; 2],
    /// `true` if the cursor moved, appeared or disappeared.
    pub cursor_changed: bool,
}

impl DisplayChanges {
    /// Diff two states row by row.
    pub fn detect(old: &DisplayState, new: &DisplayState) -> Self {
        let mut row_changed = [false; 2];
        for (row, changed) in row_changed.iter_mut().enumerate() {
            *changed = old.row(row) != new.row(row);
        }
        Self {
            row_changed,
            cursor_changed: old.cursor != new.cursor,
        }
    }

    /// Returns `true` if anything changed.
    pub fn any_changed(&self) -> bool {
        self.cursor_changed || self.row_changed.iter().any(|&c| c)
    }
}

// ── Rendering ────────────────────────────────────────────────────────────

/// Render a [`DisplayState`] to a display buffer using `embedded-graphics`.
///
/// All layout geometry is read from `config`.
///
/// # Layout
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ 001[ROM1A     ]                                1 │  ← row_baselines[0]
/// │                                                  │
/// │  01 E.PIANO 1                                    │  ← row_baselines[1]
/// │     ‾                                            │  ← cursor underline
/// └──────────────────────────────────────────────────┘
///   left field left-aligned        right field right-aligned
/// ```
///
/// A cursor on a row other than 1 or 2 is not drawn.
///
/// # Example
///
/// ```no_run
/// # use panel_display_rs::layout::{DisplayState, render_display};
/// # use panel_display_rs::DisplayConfig;
/// # fn example(display: &mut impl embedded_graphics::draw_target::DrawTarget<Color = embedded_graphics::pixelcolor::BinaryColor>) {
/// let state = DisplayState::from_fields("PERF 0001", "(L)", "Split EP", "");
/// let config = DisplayConfig::default();
/// render_display(display, &state, &config).ok();
/// # }
/// ```
pub fn render_display<D>(
    display: &mut D,
    state: &DisplayState,
    config: &DisplayConfig,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let text_style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let right_x = config.display_width as i32 - 1;

    for (row, &baseline) in config.row_baselines.iter().enumerate() {
        let (left, right) = state.row(row);
        if !left.is_empty() {
            Text::with_alignment(left, Point::new(0, baseline), text_style, Alignment::Left)
                .draw(display)?;
        }
        if !right.is_empty() {
            Text::with_alignment(right, Point::new(right_x, baseline), text_style, Alignment::Right)
                .draw(display)?;
        }
    }

    if let Some(cursor) = state.cursor {
        let row = usize::from(cursor.row.max(1) - 1);
        if let Some(&baseline) = config.row_baselines.get(row) {
            let width = config.char_width as i32;
            let x = (i32::from(cursor.column.max(1)) - 1) * width;
            let y = baseline + config.cursor_underline_offset;
            Line::new(Point::new(x, y), Point::new(x + width - 1, y))
                .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(display)?;
        }
    }

    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────────
