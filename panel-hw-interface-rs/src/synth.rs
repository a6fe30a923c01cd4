//! In-memory stand-ins for the sound engine and the voice-bank catalog.
//!
//! They hold the state the menu edits so the panel can be exercised before
//! the link to the tone generators exists.

use fm_panel::menu::{BankCatalog, SynthEngine, ToneGeneratorParameter, MAX_TONE_GENERATORS};

const BANK_NAMES: [&str; 8] = [
    "ROM1A", "ROM1B", "ROM2A", "ROM2B", "ROM3A", "ROM3B", "ROM4A", "ROM4B",
];

const VOICE_NAMES: [&str; 32] = [
    "BRASS   1", "BRASS   2", "BRASS   3", "STRINGS 1", "STRINGS 2", "STRINGS 3", "ORCHESTRA",
    "PIANO   1", "PIANO   2", "PIANO   3", "E.PIANO 1", "GUITAR  1", "GUITAR  2", "SYN-LEAD 1",
    "BASS    1", "BASS    2", "E.ORGAN 1", "PIPES   1", "HARPSICH 1", "CLAV    1", "VIBE    1",
    "MARIMBA", "KOTO", "FLUTE   1", "ORCH-CHIME", "TUB BELLS", "STEEL DRUM", "TIMPANI",
    "REFS WHISL", "VOICE   1", "TRAIN", "TAKE OFF",
];

const PERFORMANCE_NAMES: [&str; 4] = ["Init", "Split EP/Bass", "Pad Stack", "Organ Layer"];

/// Tone-generator state kept in RAM.
pub struct LocalSynth {
    banks: [i32; MAX_TONE_GENERATORS],
    programs: [i32; MAX_TONE_GENERATORS],
    enabled: [i32; MAX_TONE_GENERATORS],
    groups: [i32; MAX_TONE_GENERATORS],
    master_volume: f32,
    active_performance: usize,
    select_to_load: bool,
}

impl LocalSynth {
    /// All tone generators on voice 1 of bank 1, audible and ungrouped.
    pub const fn new(select_to_load: bool) -> Self {
        Self {
            banks: [0; MAX_TONE_GENERATORS],
            programs: [0; MAX_TONE_GENERATORS],
            enabled: [1; MAX_TONE_GENERATORS],
            groups: [0; MAX_TONE_GENERATORS],
            master_volume: 0.5,
            active_performance: 0,
            select_to_load,
        }
    }

    fn slot(&mut self, parameter: ToneGeneratorParameter) -> &mut [i32; MAX_TONE_GENERATORS] {
        match parameter {
            ToneGeneratorParameter::VoiceBank => &mut self.banks,
            ToneGeneratorParameter::Program => &mut self.programs,
            ToneGeneratorParameter::Enable => &mut self.enabled,
            ToneGeneratorParameter::Grouping => &mut self.groups,
        }
    }
}

impl SynthEngine for LocalSynth {
    fn tg_parameter(&self, parameter: ToneGeneratorParameter, tg: usize) -> i32 {
        let values = match parameter {
            ToneGeneratorParameter::VoiceBank => &self.banks,
            ToneGeneratorParameter::Program => &self.programs,
            ToneGeneratorParameter::Enable => &self.enabled,
            ToneGeneratorParameter::Grouping => &self.groups,
        };
        values.get(tg).copied().unwrap_or(0)
    }

    fn set_tg_parameter(&mut self, parameter: ToneGeneratorParameter, value: i32, tg: usize) {
        if let Some(slot) = self.slot(parameter).get_mut(tg) {
            *slot = value;
        }
    }

    fn master_volume(&self) -> f32 {
        self.master_volume
    }

    fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume;
    }

    fn active_performance(&self) -> usize {
        self.active_performance
    }

    fn set_active_performance(&mut self, slot: usize) {
        defmt::info!("loading performance {}", slot);
        self.active_performance = slot;
    }

    fn performance_name(&self, slot: usize) -> &str {
        PERFORMANCE_NAMES.get(slot).copied().unwrap_or("")
    }

    fn last_performance(&self) -> usize {
        PERFORMANCE_NAMES.len()
    }

    fn select_to_load(&self) -> bool {
        self.select_to_load
    }

    fn voice_name(&self, tg: usize) -> &str {
        let program = self.tg_parameter(ToneGeneratorParameter::Program, tg);
        VOICE_NAMES
            .get(program as usize % VOICE_NAMES.len())
            .copied()
            .unwrap_or("")
    }
}

/// The eight ROM banks, wrapping at both ends.
pub struct RomBankCatalog;

impl BankCatalog for RomBankCatalog {
    fn previous_bank(&self, bank: i32) -> i32 {
        (bank - 1).rem_euclid(BANK_NAMES.len() as i32)
    }

    fn next_bank(&self, bank: i32) -> i32 {
        (bank + 1).rem_euclid(BANK_NAMES.len() as i32)
    }

    fn bank_name(&self, bank: i32) -> &str {
        BANK_NAMES
            .get(bank.rem_euclid(BANK_NAMES.len() as i32) as usize)
            .copied()
            .unwrap_or("")
    }

    fn voices_per_bank(&self) -> i32 {
        VOICE_NAMES.len() as i32
    }
}
