/// Errors that can occur when building a [`MenuController`](super::MenuController).
///
/// Dispatching events never fails; these only guard the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// Tone-generator count is zero or above [`MAX_TONE_GENERATORS`](super::MAX_TONE_GENERATORS).
    InvalidToneGeneratorCount,
    /// Group count is above [`MAX_GROUPS`](super::MAX_GROUPS).
    InvalidGroupCount,
    /// Display is too narrow to fit the volume bar and its brackets.
    DisplayTooNarrow,
    /// A field width does not fit in [`FIELD_CAPACITY`](super::FIELD_CAPACITY).
    FieldTooWide,
    /// Volume step is zero or above 100 percent.
    InvalidVolumeStep,
}
