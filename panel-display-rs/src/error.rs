//! Error types for the panel display.

use display_interface::DisplayError;

/// Errors from the OLED panel.
///
/// The `ssd1306` crate reports every I2C failure as a [`DisplayError`],
/// so this enum is not generic over the bus.
#[derive(Debug)]
pub enum PanelDisplayError {
    /// Bus-level failure while drawing or flushing.
    Bus(DisplayError),
    /// The controller did not accept the initialisation sequence.
    InitializationFailed,
    /// Drawing or flushing before [`PanelDisplay::init()`](crate::PanelDisplay::init).
    NotInitialized,
}

impl From<DisplayError> for PanelDisplayError {
    fn from(e: DisplayError) -> Self {
        PanelDisplayError::Bus(e)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PanelDisplayError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            PanelDisplayError::Bus(_e) => defmt::write!(f, "display bus error"),
            PanelDisplayError::InitializationFailed => defmt::write!(f, "initialization failed"),
            PanelDisplayError::NotInitialized => defmt::write!(f, "not initialized"),
        }
    }
}
