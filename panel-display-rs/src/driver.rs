//! SSD1306 panel driver in async buffered-graphics mode.
//!
//! [`PanelDisplay`] owns the display: construction without bus traffic,
//! explicit async initialisation, and [`present()`](PanelDisplay::present)
//! which draws a [`DisplayState`] and flushes it in one step.

use display_interface_i2c::I2CInterface;
use embedded_hal_async::i2c::I2c;
use ssd1306::{mode::BufferedGraphicsModeAsync, prelude::*, I2CDisplayInterface, Ssd1306Async};

use crate::error::PanelDisplayError;
use crate::layout::{render_display, DisplayConfig, DisplayState};

type Display<I2C> =
    Ssd1306Async<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsModeAsync<DisplaySize128x64>>;

/// The front-panel OLED: an SSD1306 128×64 on I2C.
///
/// # Lifecycle
///
/// 1. [`PanelDisplay::new()`] builds the driver, no bus traffic.
/// 2. [`PanelDisplay::init()`] sends the SSD1306 initialisation sequence.
/// 3. [`PanelDisplay::present()`] draws a frame and transfers it.
///
/// ```no_run
/// use panel_display_rs::{DisplayConfig, DisplayState, PanelDisplay};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut oled = PanelDisplay::new(i2c, 0x3C);
/// oled.init().await.unwrap();
/// let state = DisplayState::from_fields("Master Volume", "", "[#####     ]", "50");
/// oled.present(&state, &DisplayConfig::default()).await.unwrap();
/// # }
/// ```
pub struct PanelDisplay<I2C> {
    display: Display<I2C>,
    initialized: bool,
}

impl<I2C> PanelDisplay<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised driver.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access).
    /// * `address`: 7-bit device address (typically `0x3C` or `0x3D`).
    pub fn new(i2c: I2C, address: u8) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, address);
        let display = Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self {
            display,
            initialized: false,
        }
    }

    /// Initialise the SSD1306 hardware. Call once before presenting.
    ///
    /// # Errors
    ///
    /// Returns [`PanelDisplayError::InitializationFailed`] if the display
    /// does not respond.
    pub async fn init(&mut self) -> Result<(), PanelDisplayError> {
        self.display
            .init()
            .await
            .map_err(|_| PanelDisplayError::InitializationFailed)?;
        self.initialized = true;
        Ok(())
    }

    /// Replace the screen contents with `state`.
    ///
    /// Clears the frame buffer, renders `state` with the `config` layout
    /// and flushes the buffer (about 20 ms at 400 kHz).
    ///
    /// # Errors
    ///
    /// Returns [`PanelDisplayError::NotInitialized`] before
    /// [`init()`](Self::init), or [`PanelDisplayError::Bus`] on a bus
    /// failure.
    pub async fn present(
        &mut self,
        state: &DisplayState,
        config: &DisplayConfig,
    ) -> Result<(), PanelDisplayError> {
        if !self.initialized {
            return Err(PanelDisplayError::NotInitialized);
        }
        self.display.clear_buffer();
        render_display(&mut self.display, state, config)?;
        self.display.flush().await?;
        Ok(())
    }

    /// Check whether the display has been successfully initialised.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
