//! Screen renderers.
//!
//! Each renderer reads the controller state and the engine and produces a
//! [`Frame`]; the controller passes it on to the display sink. Renderers
//! never mutate anything.

use core::fmt::Write;

use heapless::String;

use super::controller::MenuController;
use super::format::{pad_number, pad_right, push_truncated, volume_bar, volume_percent};
use super::interfaces::{BankCatalog, DeadlineTimer, DisplaySink, SynthEngine, ToneGeneratorParameter};
use super::item::Action;
use super::page::Screen;
use super::{FIELD_CAPACITY, GROUP_GLYPHS, MAX_GROUPS, MUTE_GLYPH};

/// One display field.
pub type Field = String<FIELD_CAPACITY>;

/// The four fields of one display frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub top_left: Field,
    pub top_right: Field,
    pub bottom_left: Field,
    pub bottom_right: Field,
}

/// Render `screen` for the current controller state.
pub(crate) fn render<S, B, D, T>(screen: Screen, menu: &MenuController<S, B, D, T>) -> Frame
where
    S: SynthEngine,
    B: BankCatalog,
    D: DisplaySink,
    T: DeadlineTimer,
{
    match screen {
        Screen::BankVoice => bank_voice(menu),
        Screen::Performance => performance(menu),
        Screen::GroupMute => group_mute(menu),
    }
}

/// Open and close bracket around a field, `[` `]` when selected.
fn brackets(selected: bool) -> (char, char) {
    if selected {
        ('[', ']')
    } else {
        (' ', ' ')
    }
}

fn push_char(field: &mut Field, c: char) {
    let _ = field.push(c);
}

/// Single-character label of tone generator `tg`: `1`..`9`, then `A`..`G`.
fn tone_generator_glyph(tg: usize) -> char {
    char::from_digit((tg + 1) as u32, 36)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}

/// Bank on the top row, voice on the bottom row, tone generator number
/// top right. The field under the encoder is bracketed.
fn bank_voice<S, B, D, T>(menu: &MenuController<S, B, D, T>) -> Frame
where
    S: SynthEngine,
    B: BankCatalog,
    D: DisplaySink,
    T: DeadlineTimer,
{
    let config = &menu.config;
    let tg = menu.current_tg;
    let encoder = menu.current_item().encoder;
    let mut frame = Frame::default();

    let bank = menu.synth.tg_parameter(ToneGeneratorParameter::VoiceBank, tg);
    let (open, close) = brackets(encoder == Some(Action::ChangeBank));
    frame.top_left = pad_number(i64::from(bank) + 1, config.bank_digits, '0');
    push_char(&mut frame.top_left, open);
    let name: Field = pad_right(menu.catalog.bank_name(bank), config.name_width, ' ');
    push_truncated(&mut frame.top_left, &name);
    push_char(&mut frame.top_left, close);

    let voice = menu.synth.tg_parameter(ToneGeneratorParameter::Program, tg);
    let (open, close) = brackets(encoder == Some(Action::ChangeVoice));
    push_char(&mut frame.bottom_left, ' ');
    let number: Field = pad_number(i64::from(voice) + 1, config.voice_digits, '0');
    push_truncated(&mut frame.bottom_left, &number);
    push_char(&mut frame.bottom_left, open);
    let name: Field = pad_right(menu.synth.voice_name(tg), config.name_width, ' ');
    push_truncated(&mut frame.bottom_left, &name);
    push_char(&mut frame.bottom_left, close);

    frame.top_right = pad_number(tg as i64 + 1, 0, ' ');
    // MIDI channel column, not shown yet.
    push_char(&mut frame.bottom_right, ' ');
    frame
}

/// Selected slot and its name, `(L)` when it is the loaded one.
fn performance<S, B, D, T>(menu: &MenuController<S, B, D, T>) -> Frame
where
    S: SynthEngine,
    B: BankCatalog,
    D: DisplaySink,
    T: DeadlineTimer,
{
    let slot = menu.selected_performance;
    let mut frame = Frame::default();

    push_truncated(&mut frame.top_left, "PERF ");
    let number: Field = pad_number(slot as i64, menu.config.performance_digits, '0');
    push_truncated(&mut frame.top_left, &number);

    if slot == menu.synth.active_performance() {
        push_truncated(&mut frame.top_right, "(L)");
    }
    push_truncated(&mut frame.bottom_left, menu.synth.performance_name(slot));
    frame
}

/// One column per tone generator: group glyph on top, number or mute
/// glyph below, cursor under the selected one.
fn group_mute<S, B, D, T>(menu: &MenuController<S, B, D, T>) -> Frame
where
    S: SynthEngine,
    B: BankCatalog,
    D: DisplaySink,
    T: DeadlineTimer,
{
    let mut frame = Frame::default();
    push_truncated(&mut frame.top_left, "Group ");
    push_truncated(&mut frame.bottom_left, "TG    ");

    for tg in 0..menu.config.tone_generators {
        let group = menu.synth.tg_parameter(ToneGeneratorParameter::Grouping, tg);
        let glyph = GROUP_GLYPHS[(group.max(0) as usize).min(MAX_GROUPS)];
        push_char(&mut frame.top_left, glyph);

        if menu.synth.tg_parameter(ToneGeneratorParameter::Enable, tg) != 0 {
            push_char(&mut frame.bottom_left, tone_generator_glyph(tg));
        } else {
            push_char(&mut frame.bottom_left, MUTE_GLYPH);
        }
    }

    // Show the cursor on row 2, column 7 being the first tone generator.
    let _ = write!(frame.bottom_right, "\x1b[?25h\x1b[2;{}H", menu.selected_tg + 7);
    frame
}

/// The master-volume overlay: caption on top, bar and percentage below.
pub(crate) fn master_volume<S, B, D, T>(menu: &MenuController<S, B, D, T>) -> Frame
where
    S: SynthEngine,
    B: BankCatalog,
    D: DisplaySink,
    T: DeadlineTimer,
{
    let config = &menu.config;
    let percent = volume_percent(menu.synth.master_volume());
    let mut frame = Frame::default();

    push_truncated(&mut frame.top_left, "Master Volume");
    push_char(&mut frame.bottom_left, '[');
    let bar: Field = volume_bar(percent, config.volume_bar_width(), config.bar_glyph);
    push_truncated(&mut frame.bottom_left, &bar);
    push_char(&mut frame.bottom_left, ']');
    let _ = write!(frame.bottom_right, "{}", percent);
    frame
}

// ── Unit Tests ───────────────────────────────────────────────────────
