//! High-level interface for the Adafruit Quad Rotary Encoder Breakout.
//!
//! [`QuadEncoderBoard`] validates encoder indices, addresses the per-encoder
//! registers and reads the push switches as a group.

use embedded_hal_async::i2c::I2c;

use crate::driver::SeesawDriver;
use crate::error::EncoderError;
use crate::registers::{
    BUTTON_MASK, BUTTON_PINS, ENCODER_COUNT, ENCODER_INT_SET, ENCODER_POSITION, GPIO_BULK,
    GPIO_BULK_SET, GPIO_DIRCLR_BULK, GPIO_INTENSET, GPIO_INTFLAG, GPIO_PULLENSET, MODULE_ENCODER,
    MODULE_GPIO,
};

/// Positions and push-switch states read in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardState {
    /// Absolute position per encoder.
    pub positions: [i32; ENCODER_COUNT],
    /// `true` while the encoder's knob is pushed in.
    pub pressed: [bool; ENCODER_COUNT],
}

/// The four encoders and their push switches, over I2C.
///
/// # Example
///
/// ```no_run
/// use encoder_driver::{QuadEncoderBoard, DEFAULT_ADDRESS};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut board = QuadEncoderBoard::new(i2c, DEFAULT_ADDRESS);
/// board.configure_buttons().await.ok();
/// board.enable_all_interrupts().await.ok();
///
/// let state = board.read_state().await.ok();
/// # }
/// ```
pub struct QuadEncoderBoard<I2C> {
    driver: SeesawDriver<I2C>,
}

impl<I2C> QuadEncoderBoard<I2C>
where
    I2C: I2c,
{
    /// Create the board interface. No bus traffic.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access)
    /// * `address`: 7-bit I2C device address, see [`DEFAULT_ADDRESS`](crate::DEFAULT_ADDRESS)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            driver: SeesawDriver::new(i2c, address),
        }
    }

    fn check(encoder: u8) -> Result<(), EncoderError<I2C::Error>> {
        if usize::from(encoder) < ENCODER_COUNT {
            Ok(())
        } else {
            Err(EncoderError::InvalidEncoder)
        }
    }

    // -----------------------------------------------------------------------
    // Positions
    // -----------------------------------------------------------------------

    /// Read the absolute position of `encoder` (0–3).
    ///
    /// The firmware accumulates detents in a signed 32-bit counter.
    ///
    /// # Errors
    /// * [`EncoderError::InvalidEncoder`] if `encoder >= 4`
    /// * [`EncoderError::I2c`] on communication failure
    pub async fn read_position(&mut self, encoder: u8) -> Result<i32, EncoderError<I2C::Error>> {
        Self::check(encoder)?;
        self.driver.read_i32([MODULE_ENCODER, ENCODER_POSITION | encoder]).await
    }

    /// Read all four positions, one transaction each.
    ///
    /// # Errors
    /// Returns the first I2C error; no partial result.
    pub async fn read_all_positions(
        &mut self,
    ) -> Result<[i32; ENCODER_COUNT], EncoderError<I2C::Error>> {
        let mut positions = [0i32; ENCODER_COUNT];
        for (encoder, position) in positions.iter_mut().enumerate() {
            *position = self.read_position(encoder as u8).await?;
        }
        Ok(positions)
    }

    /// Overwrite the position counter of `encoder`.
    ///
    /// # Errors
    /// * [`EncoderError::InvalidEncoder`] if `encoder >= 4`
    /// * [`EncoderError::I2c`] on communication failure
    pub async fn set_position(
        &mut self,
        encoder: u8,
        value: i32,
    ) -> Result<(), EncoderError<I2C::Error>> {
        Self::check(encoder)?;
        self.driver
            .write_i32([MODULE_ENCODER, ENCODER_POSITION | encoder], value)
            .await
    }

    // -----------------------------------------------------------------------
    // Push switches
    // -----------------------------------------------------------------------

    /// Make every push switch an input with pull-up and let it raise INT.
    ///
    /// Call once at start-up, before relying on
    /// [`read_buttons()`](Self::read_buttons).
    pub async fn configure_buttons(&mut self) -> Result<(), EncoderError<I2C::Error>> {
        self.driver.write_u32([MODULE_GPIO, GPIO_DIRCLR_BULK], BUTTON_MASK).await?;
        self.driver.write_u32([MODULE_GPIO, GPIO_PULLENSET], BUTTON_MASK).await?;
        self.driver.write_u32([MODULE_GPIO, GPIO_BULK_SET], BUTTON_MASK).await?;
        self.driver.write_u32([MODULE_GPIO, GPIO_INTENSET], BUTTON_MASK).await
    }

    /// Read which knobs are pushed in. Switches are active-low.
    pub async fn read_buttons(&mut self) -> Result<[bool; ENCODER_COUNT], EncoderError<I2C::Error>> {
        let levels = self.driver.read_u32([MODULE_GPIO, GPIO_BULK]).await?;
        Ok(buttons_from_levels(levels))
    }

    /// Read positions and switches together.
    pub async fn read_state(&mut self) -> Result<BoardState, EncoderError<I2C::Error>> {
        let positions = self.read_all_positions().await?;
        let pressed = self.read_buttons().await?;
        Ok(BoardState { positions, pressed })
    }

    // -----------------------------------------------------------------------
    // Interrupts
    // -----------------------------------------------------------------------

    /// Let `encoder`'s position changes pull the shared, active-low INT pin.
    ///
    /// Disabled after power-on.
    pub async fn enable_interrupt(&mut self, encoder: u8) -> Result<(), EncoderError<I2C::Error>> {
        Self::check(encoder)?;
        self.driver.write_u8([MODULE_ENCODER, ENCODER_INT_SET | encoder], 1).await
    }

    /// [`enable_interrupt()`](Self::enable_interrupt) for all four encoders.
    pub async fn enable_all_interrupts(&mut self) -> Result<(), EncoderError<I2C::Error>> {
        for encoder in 0..ENCODER_COUNT as u8 {
            self.enable_interrupt(encoder).await?;
        }
        Ok(())
    }

    /// Clear pending GPIO interrupt flags, releasing INT.
    ///
    /// Call after reading, so a movement during the read raises a new edge.
    pub async fn clear_interrupt_flags(&mut self) -> Result<(), EncoderError<I2C::Error>> {
        let _ = self.driver.read_u32([MODULE_GPIO, GPIO_INTFLAG]).await?;
        Ok(())
    }
}

/// Map bulk pin levels to per-encoder pressed flags.
fn buttons_from_levels(levels: u32) -> [bool; ENCODER_COUNT] {
    core::array::from_fn(|encoder| levels & (1 << BUTTON_PINS[encoder]) == 0)
}
