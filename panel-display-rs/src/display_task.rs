//! Display update task.
//!
//! [`FrameSink`] is the menu's [`DisplaySink`] on target: it turns each
//! written frame into a [`DisplayState`] and hands it over a [`Signal`] to
//! [`display_update_task`], which owns the bus. Rendering and the slow
//! flush therefore never run while the menu is locked.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};
use embedded_hal_async::i2c::I2c;
use fm_panel::menu::DisplaySink;

use crate::driver::PanelDisplay;
use crate::layout::{DisplayChanges, DisplayConfig, DisplayState};

/// Latest frame waiting to be shown. Older unshown frames are dropped.
pub type FrameSignal = Signal<CriticalSectionRawMutex, DisplayState>;

/// [`DisplaySink`] feeding [`display_update_task`].
pub struct FrameSink {
    frames: &'static FrameSignal,
}

impl FrameSink {
    /// Publish frames on `frames`; hand the same signal to the task.
    pub const fn new(frames: &'static FrameSignal) -> Self {
        Self { frames }
    }
}

impl DisplaySink for FrameSink {
    fn write(&mut self, top_left: &str, top_right: &str, bottom_left: &str, bottom_right: &str) {
        self.frames.signal(DisplayState::from_fields(
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        ));
    }
}

// ── Display update task ──────────────────────────────────────────────────

/// Frame presentation loop.
///
/// This is a regular `async fn`, **not** an Embassy `#[task]`. Callers
/// create a thin, concrete task wrapper, since Embassy tasks cannot be
/// generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn oled_task(
///     driver: PanelDisplay<MyConcreteI2cType>,
///     frames: &'static FrameSignal,
///     config: DisplayConfig,
/// ) {
///     display_update_task(driver, frames, config).await;
/// }
/// ```
///
/// # Control flow
///
/// 1. Initialise the display hardware.
/// 2. Loop:
///    - **Step 1**: wait for a frame from [`FrameSink`].
///    - **Step 2**: skip it if it matches what is on screen.
///    - **Step 3**: wait out the rest of the frame period, so the panel
///      is flushed at most `config.update_frequency_hz` times a second.
///    - **Step 4**: take any newer frame that arrived meanwhile.
///    - **Step 5**: render and flush (~20 ms I2C).
///
/// # Errors
///
/// * Initialisation failure: logs the error and **returns** (task exits).
/// * Present failure: logs the error and waits for the next frame. The
///   failed frame is retried when it is sent again.
pub async fn display_update_task<I2C>(
    mut driver: PanelDisplay<I2C>,
    frames: &'static FrameSignal,
    config: DisplayConfig,
) where
    I2C: I2c,
{
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    #[cfg(feature = "defmt")]
    defmt::info!("OLED initialised");

    let period = Duration::from_millis(config.update_period_ms());
    let mut shown = DisplayState::default();
    let mut next_flush = Instant::now();

    loop {
        let state = frames.wait().await;
        if !DisplayChanges::detect(&shown, &state).any_changed() {
            continue;
        }

        Timer::at(next_flush).await;
        let state = frames.try_take().unwrap_or(state);

        if let Err(_e) = driver.present(&state, &config).await {
            #[cfg(feature = "defmt")]
            defmt::error!("OLED present failed: {}", _e);
            continue;
        }

        next_flush = Instant::now() + period;
        shown = state;
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
