//! Failures while talking to the encoder board.
//!
//! Gesture decoding cannot fail; only the bus transfers behind
//! positions, push switches and interrupt flags can.

use core::fmt;

/// Error from a [`QuadEncoderBoard`](crate::QuadEncoderBoard) call.
///
/// Generic over the bus error so callers keep the HAL's own diagnosis.
#[derive(Debug)]
pub enum EncoderError<E> {
    /// A position, switch or interrupt-flag transfer failed on the bus.
    I2c(E),
    /// Knob index past the last of the board's four encoders.
    InvalidEncoder,
}

impl<E> From<E> for EncoderError<E> {
    fn from(error: E) -> Self {
        Self::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for EncoderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "knob board transfer failed: {:?}", e),
            Self::InvalidEncoder => write!(f, "no knob at that index, the board has {}", crate::ENCODER_COUNT),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for EncoderError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::I2c(e) => defmt::write!(f, "knob board transfer failed: {}", e),
            Self::InvalidEncoder => {
                defmt::write!(f, "no knob at that index, the board has {}", crate::ENCODER_COUNT)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn bus_error_converts_with_question_mark() {
        fn transfer() -> Result<(), EncoderError<u8>> {
            Err::<(), u8>(7)?;
            Ok(())
        }
        assert!(matches!(transfer(), Err(EncoderError::I2c(7))));
    }

    #[test]
    fn invalid_encoder_names_knob_count() {
        let error: EncoderError<()> = EncoderError::InvalidEncoder;
        assert_eq!(error.to_string(), "no knob at that index, the board has 4");
    }
}
