//! Contracts for the collaborators the menu drives but does not own.
//!
//! The controller calls these synchronously from inside
//! [`MenuController::handle_event()`](super::MenuController::handle_event);
//! implementations must not block. Clamping values into range is the
//! controller's job, so implementations may assume sane arguments.
//!
//! Each trait is also implemented for `&mut T` (and [`BankCatalog`] for
//! `&T`), so a controller can borrow its collaborators instead of owning
//! them.

/// Per-tone-generator parameters the menu reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ToneGeneratorParameter {
    /// Index of the voice bank loaded into the tone generator.
    VoiceBank,
    /// Voice index (0-based) within the bank.
    Program,
    /// Non-zero when the tone generator is audible, `0` when muted.
    Enable,
    /// Group id, `0` for ungrouped.
    Grouping,
}

/// The sound-generation subsystem.
pub trait SynthEngine {
    /// Read a parameter of tone generator `tg`.
    fn tg_parameter(&self, parameter: ToneGeneratorParameter, tg: usize) -> i32;
    /// Write a parameter of tone generator `tg`.
    fn set_tg_parameter(&mut self, parameter: ToneGeneratorParameter, value: i32, tg: usize);

    /// Master volume in `[0.0, 1.0]`.
    fn master_volume(&self) -> f32;
    /// Set the master volume, `volume` in `[0.0, 1.0]`.
    fn set_master_volume(&mut self, volume: f32);

    /// Slot of the performance currently loaded.
    fn active_performance(&self) -> usize;
    /// Load the performance stored in `slot`.
    fn set_active_performance(&mut self, slot: usize);
    /// Display name of the performance stored in `slot`.
    fn performance_name(&self, slot: usize) -> &str;
    /// Number of performance slots. Selectable slots are `0..last_performance()`.
    fn last_performance(&self) -> usize;
    /// `true` when a selected performance only loads after a confirming
    /// short press, `false` when it loads as soon as it is selected.
    fn select_to_load(&self) -> bool;

    /// Display name of the voice loaded into tone generator `tg`.
    fn voice_name(&self, tg: usize) -> &str;
}

/// The voice-bank catalog.
///
/// Ordering and wrap-around of banks belong to the catalog; the menu only
/// asks for the neighbour in either direction.
pub trait BankCatalog {
    /// Bank preceding `bank`.
    fn previous_bank(&self, bank: i32) -> i32;
    /// Bank following `bank`.
    fn next_bank(&self, bank: i32) -> i32;
    /// Display name of `bank`.
    fn bank_name(&self, bank: i32) -> &str;
    /// Number of voices in every bank.
    fn voices_per_bank(&self) -> i32 {
        32
    }
}

/// The character display.
///
/// A frame is four text fields with fixed roles: the left and right part of
/// the top row, then the left and right part of the bottom row. Fields may
/// carry ANSI cursor-control sequences.
pub trait DisplaySink {
    /// Replace the displayed frame.
    fn write(&mut self, top_left: &str, top_right: &str, bottom_left: &str, bottom_right: &str);
}

/// A one-shot, cancelable timer facility.
///
/// The facility does not call back into the menu by itself: when a timer
/// started with [`start_one_shot()`](Self::start_one_shot) expires, the
/// host delivers its handle to
/// [`MenuController::on_deadline()`](super::MenuController::on_deadline).
pub trait DeadlineTimer {
    /// Identifies one started timer.
    type Handle: Copy + PartialEq;

    /// Start a timer expiring `delay_ms` milliseconds from now.
    fn start_one_shot(&mut self, delay_ms: u32) -> Self::Handle;
    /// Cancel a timer that has not expired yet.
    fn cancel(&mut self, handle: Self::Handle);
}

impl<T: SynthEngine + ?Sized> SynthEngine for &mut T {
    fn tg_parameter(&self, parameter: ToneGeneratorParameter, tg: usize) -> i32 {
        (**self).tg_parameter(parameter, tg)
    }

    fn set_tg_parameter(&mut self, parameter: ToneGeneratorParameter, value: i32, tg: usize) {
        (**self).set_tg_parameter(parameter, value, tg)
    }

    fn master_volume(&self) -> f32 {
        (**self).master_volume()
    }

    fn set_master_volume(&mut self, volume: f32) {
        (**self).set_master_volume(volume)
    }

    fn active_performance(&self) -> usize {
        (**self).active_performance()
    }

    fn set_active_performance(&mut self, slot: usize) {
        (**self).set_active_performance(slot)
    }

    fn performance_name(&self, slot: usize) -> &str {
        (**self).performance_name(slot)
    }

    fn last_performance(&self) -> usize {
        (**self).last_performance()
    }

    fn select_to_load(&self) -> bool {
        (**self).select_to_load()
    }

    fn voice_name(&self, tg: usize) -> &str {
        (**self).voice_name(tg)
    }
}

impl<T: BankCatalog + ?Sized> BankCatalog for &mut T {
    fn previous_bank(&self, bank: i32) -> i32 {
        (**self).previous_bank(bank)
    }

    fn next_bank(&self, bank: i32) -> i32 {
        (**self).next_bank(bank)
    }

    fn bank_name(&self, bank: i32) -> &str {
        (**self).bank_name(bank)
    }

    fn voices_per_bank(&self) -> i32 {
        (**self).voices_per_bank()
    }
}

impl<T: BankCatalog + ?Sized> BankCatalog for &T {
    fn previous_bank(&self, bank: i32) -> i32 {
        (**self).previous_bank(bank)
    }

    fn next_bank(&self, bank: i32) -> i32 {
        (**self).next_bank(bank)
    }

    fn bank_name(&self, bank: i32) -> &str {
        (**self).bank_name(bank)
    }

    fn voices_per_bank(&self) -> i32 {
        (**self).voices_per_bank()
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn write(&mut self, top_left: &str, top_right: &str, bottom_left: &str, bottom_right: &str) {
        (**self).write(top_left, top_right, bottom_left, bottom_right)
    }
}

impl<T: DeadlineTimer + ?Sized> DeadlineTimer for &mut T {
    type Handle = T::Handle;

    fn start_one_shot(&mut self, delay_ms: u32) -> Self::Handle {
        (**self).start_one_shot(delay_ms)
    }

    fn cancel(&mut self, handle: Self::Handle) {
        (**self).cancel(handle)
    }
}
