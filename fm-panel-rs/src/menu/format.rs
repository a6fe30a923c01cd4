//! Fixed-width text helpers for the character display.
//!
//! Output that does not fit the target [`heapless::String`] capacity is
//! silently truncated.

use core::fmt::Write;

use heapless::String;

/// Left-pad `text` with `fill` to `width` characters.
///
/// Text already `width` characters or longer is copied unchanged.
///
/// ```
/// use fm_panel::menu::format::pad_left;
///
/// let s = pad_left::<8>("7", 3, '0');
/// assert_eq!(s.as_str(), "007");
/// ```
pub fn pad_left<const N: usize>(text: &str, width: usize, fill: char) -> String<N> {
    let mut out = String::new();
    for _ in text.chars().count()..width {
        if out.push(fill).is_err() {
            break;
        }
    }
    push_truncated(&mut out, text);
    out
}

/// Right-pad `text` with `fill` to exactly `width` characters.
///
/// Longer text is cut to `width` characters so columns stay aligned.
pub fn pad_right<const N: usize>(text: &str, width: usize, fill: char) -> String<N> {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars().take(width) {
        if out.push(c).is_err() {
            return out;
        }
        used += 1;
    }
    for _ in used..width {
        if out.push(fill).is_err() {
            break;
        }
    }
    out
}

/// Format `value` in decimal, left-padded with `fill` to `width` digits.
pub fn pad_number<const N: usize>(value: i64, width: usize, fill: char) -> String<N> {
    let mut digits: String<24> = String::new();
    // i64 always fits in 24 bytes.
    let _ = write!(digits, "{}", value);
    pad_left(&digits, width, fill)
}

/// Render a proportional bar of `width` characters for `percent` in `[0, 100]`.
///
/// The filled part uses `glyph`, the rest is spaces. Out-of-range
/// percentages are clamped.
pub fn volume_bar<const N: usize>(percent: i32, width: usize, glyph: char) -> String<N> {
    let filled = percent.clamp(0, 100) as usize * width / 100;
    let mut out = String::new();
    for i in 0..width {
        let c = if i < filled { glyph } else { ' ' };
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Convert a `[0.0, 1.0]` volume to whole percent, rounding to nearest.
pub fn volume_percent(volume: f32) -> i32 {
    let scaled = volume * 100.0 + 0.5;
    if scaled <= 0.0 {
        0
    } else {
        (scaled as i32).min(100)
    }
}

/// Append as much of `text` as fits, never splitting a character.
pub(crate) fn push_truncated<const N: usize>(out: &mut String<N>, text: &str) {
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
