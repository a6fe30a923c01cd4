//! Fake collaborators shared by the unit tests.

extern crate std;

use std::string::String;
use std::vec::Vec;

use super::interfaces::{BankCatalog, DeadlineTimer, DisplaySink, SynthEngine, ToneGeneratorParameter};
use super::{MenuController, MAX_TONE_GENERATORS};

pub(crate) type TestController = MenuController<FakeSynth, FakeCatalog, RecordingDisplay, FakeTimer>;

pub(crate) fn controller() -> TestController {
    MenuController::new(FakeSynth::new(), FakeCatalog::new(4), RecordingDisplay::default(), FakeTimer::new())
}

const VOICE_NAMES: [&str; 4] = ["E.PIANO 1", "BRASS   1", "STRINGS 2", "MARIMBA"];
const BANK_NAMES: [&str; 4] = ["ROM1A", "ROM1B", "ROM2A", "A VERY LONG BANK"];
const PERFORMANCE_NAMES: [&str; 3] = ["Init", "Split EP", "Pad Stack"];

// ── FakeSynth ────────────────────────────────────────────────────────────

pub(crate) struct FakeSynth {
    pub banks: [i32; MAX_TONE_GENERATORS],
    pub programs: [i32; MAX_TONE_GENERATORS],
    pub enabled: [i32; MAX_TONE_GENERATORS],
    pub groups: [i32; MAX_TONE_GENERATORS],
    pub volume: f32,
    pub active_performance: usize,
    pub last_performance: usize,
    pub select_to_load: bool,
    /// Every slot passed to `set_active_performance`, in order.
    pub loads: Vec<usize>,
}

impl FakeSynth {
    pub fn new() -> Self {
        Self {
            banks: [0; MAX_TONE_GENERATORS],
            programs: [0; MAX_TONE_GENERATORS],
            enabled: [1; MAX_TONE_GENERATORS],
            groups: [0; MAX_TONE_GENERATORS],
            volume: 0.5,
            active_performance: 0,
            last_performance: 3,
            select_to_load: false,
            loads: Vec::new(),
        }
    }
}

impl SynthEngine for FakeSynth {
    fn tg_parameter(&self, parameter: ToneGeneratorParameter, tg: usize) -> i32 {
        match parameter {
            ToneGeneratorParameter::VoiceBank => self.banks[tg],
            ToneGeneratorParameter::Program => self.programs[tg],
            ToneGeneratorParameter::Enable => self.enabled[tg],
            ToneGeneratorParameter::Grouping => self.groups[tg],
        }
    }

    fn set_tg_parameter(&mut self, parameter: ToneGeneratorParameter, value: i32, tg: usize) {
        match parameter {
            ToneGeneratorParameter::VoiceBank => self.banks[tg] = value,
            ToneGeneratorParameter::Program => self.programs[tg] = value,
            ToneGeneratorParameter::Enable => self.enabled[tg] = value,
            ToneGeneratorParameter::Grouping => self.groups[tg] = value,
        }
    }

    fn master_volume(&self) -> f32 {
        self.volume
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn active_performance(&self) -> usize {
        self.active_performance
    }

    fn set_active_performance(&mut self, slot: usize) {
        self.active_performance = slot;
        self.loads.push(slot);
    }

    fn performance_name(&self, slot: usize) -> &str {
        PERFORMANCE_NAMES.get(slot).copied().unwrap_or("")
    }

    fn last_performance(&self) -> usize {
        self.last_performance
    }

    fn select_to_load(&self) -> bool {
        self.select_to_load
    }

    fn voice_name(&self, tg: usize) -> &str {
        VOICE_NAMES[self.programs[tg] as usize % VOICE_NAMES.len()]
    }
}

// ── FakeCatalog ──────────────────────────────────────────────────────────

/// Banks `0..bank_count`, wrapping at both ends.
pub(crate) struct FakeCatalog {
    pub bank_count: i32,
}

impl FakeCatalog {
    pub fn new(bank_count: i32) -> Self {
        Self { bank_count }
    }
}

impl BankCatalog for FakeCatalog {
    fn previous_bank(&self, bank: i32) -> i32 {
        (bank - 1).rem_euclid(self.bank_count)
    }

    fn next_bank(&self, bank: i32) -> i32 {
        (bank + 1).rem_euclid(self.bank_count)
    }

    fn bank_name(&self, bank: i32) -> &str {
        BANK_NAMES[bank as usize % BANK_NAMES.len()]
    }
}

// ── RecordingDisplay ─────────────────────────────────────────────────────

#[derive(Default)]
pub(crate) struct RecordingDisplay {
    pub frames: Vec<[String; 4]>,
}

impl RecordingDisplay {
    pub fn last(&self) -> &[String; 4] {
        self.frames.last().expect("nothing rendered yet")
    }
}

impl DisplaySink for RecordingDisplay {
    fn write(&mut self, top_left: &str, top_right: &str, bottom_left: &str, bottom_right: &str) {
        self.frames.push([
            String::from(top_left),
            String::from(top_right),
            String::from(bottom_left),
            String::from(bottom_right),
        ]);
    }
}

// ── FakeTimer ────────────────────────────────────────────────────────────

/// Timer facility driven by a manual millisecond clock.
pub(crate) struct FakeTimer {
    pub now_ms: u64,
    next_handle: u32,
    /// Number of timers started so far.
    pub started: usize,
    /// Handles passed to `cancel`, in order.
    pub cancelled: Vec<u32>,
    /// Outstanding timers as `(handle, deadline_ms)`.
    armed: Vec<(u32, u64)>,
}

impl FakeTimer {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_handle: 1,
            started: 0,
            cancelled: Vec::new(),
            armed: Vec::new(),
        }
    }

    pub fn outstanding(&self) -> usize {
        self.armed.len()
    }

    pub fn deadline_of(&self, handle: u32) -> Option<u64> {
        self.armed.iter().find(|(h, _)| *h == handle).map(|(_, d)| *d)
    }

    /// Move the clock forward and return the handles that expired.
    pub fn advance(&mut self, ms: u64) -> Vec<u32> {
        self.now_ms += ms;
        let now = self.now_ms;
        let (expired, pending): (Vec<_>, Vec<_>) = core::mem::take(&mut self.armed)
            .into_iter()
            .partition(|(_, d)| *d <= now);
        self.armed = pending;
        expired.into_iter().map(|(h, _)| h).collect()
    }
}

impl DeadlineTimer for FakeTimer {
    type Handle = u32;

    fn start_one_shot(&mut self, delay_ms: u32) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.started += 1;
        self.armed.push((handle, self.now_ms + u64::from(delay_ms)));
        handle
    }

    fn cancel(&mut self, handle: u32) {
        self.cancelled.push(handle);
        self.armed.retain(|(h, _)| *h != handle);
    }
}
