use super::error::MenuError;
use super::{FIELD_CAPACITY, MAX_GROUPS, MAX_TONE_GENERATORS};

// ── MenuConfig ───────────────────────────────────────────────────────────

/// Configuration for the menu controller and its screens.
///
/// All display geometry and tunables live here; the handlers and
/// renderers hold no literals of their own. Callers can adapt the menu to
/// another display or engine at construction time without modifying
/// library source.
///
/// [`MenuConfig::default()`] reproduces the stock front panel (8 tone
/// generators, 16-column display, 1.5 s volume overlay).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuConfig {
    /// Number of tone generators. Default: 8. Max: [`MAX_TONE_GENERATORS`].
    pub tone_generators: usize,
    /// Highest group id a tone generator can join. Default: 4. Max: [`MAX_GROUPS`].
    pub group_count: usize,

    // ── Display geometry ─────────────────────────────────────────────
    /// Display width in characters. Default: 16.
    pub lcd_columns: usize,
    /// Width bank and voice names are padded to. Default: 10.
    pub name_width: usize,
    /// Digits of the 1-based bank number. Default: 3.
    pub bank_digits: usize,
    /// Digits of the 1-based voice number. Default: 2.
    pub voice_digits: usize,
    /// Digits of the performance slot number. Default: 4.
    pub performance_digits: usize,
    /// Glyph filling the volume bar. Default: `'#'`.
    pub bar_glyph: char,

    // ── Master volume overlay ────────────────────────────────────────
    /// Volume change per detent, in percent. Default: 5.
    pub volume_step: i32,
    /// Quiet period after the last volume change before the overlay
    /// reverts to the normal screen. Default: 1500 ms.
    pub overlay_timeout_ms: u32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            tone_generators: 8,
            group_count: MAX_GROUPS,
            lcd_columns: 16,
            name_width: 10,
            bank_digits: 3,
            voice_digits: 2,
            performance_digits: 4,
            bar_glyph: '#',
            volume_step: 5,
            overlay_timeout_ms: 1500,
        }
    }
}

impl MenuConfig {
    /// Width of the volume bar in characters, excluding its brackets.
    ///
    /// Formula: `lcd_columns - 6`.
    pub fn volume_bar_width(&self) -> usize {
        self.lcd_columns.saturating_sub(6)
    }

    /// Check that every value is within the range the menu can render.
    ///
    /// # Errors
    ///
    /// Returns the first [`MenuError`] found.
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.tone_generators == 0 || self.tone_generators > MAX_TONE_GENERATORS {
            return Err(MenuError::InvalidToneGeneratorCount);
        }
        if self.group_count > MAX_GROUPS {
            return Err(MenuError::InvalidGroupCount);
        }
        if self.volume_bar_width() == 0 {
            return Err(MenuError::DisplayTooNarrow);
        }
        // Widest field is the bank line: digits, two brackets and the name.
        // The volume bar may use a multi-byte glyph.
        let bank_line = self.bank_digits + self.name_width + 2;
        let bar_line = self.volume_bar_width() * self.bar_glyph.len_utf8() + 2;
        if bank_line > FIELD_CAPACITY || bar_line > FIELD_CAPACITY {
            return Err(MenuError::FieldTooWide);
        }
        if self.volume_step <= 0 || self.volume_step > 100 {
            return Err(MenuError::InvalidVolumeStep);
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
