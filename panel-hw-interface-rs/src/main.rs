//! panel-hw-interface
//!
//! Front-panel firmware for the Raspberry Pi Pico 2. Wires the encoder
//! board, the menu controller and the OLED into a live loop:
//!
//! 1. A knob is turned or pushed.
//! 2. The encoder board pulls the INT pin low.
//! 3. The encoder task reads positions and switches, decodes gestures and
//!    feeds the resulting menu events to the controller under its mutex.
//! 4. The controller renders into a [`FrameSink`]; the OLED task picks up
//!    the newest frame and flushes it, at most 30 times a second.
//! 5. A volume change arms the overlay deadline; the overlay task waits it
//!    out and hands the expiry back to the controller.
//!
//! The sound engine is the in-memory [`LocalSynth`] for now.

#![no_std]
#![no_main]

mod input;
mod synth;

use defmt::*;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use encoder_driver::{GestureDecoder, QuadEncoderBoard, DEFAULT_ADDRESS};
use fm_panel::menu::{overlay_timer_task, MenuController, SignalTimer, TimerSignal};
use panel_display_rs::{display_update_task, DisplayConfig, FrameSignal, FrameSink, PanelDisplay};

use crate::input::{menu_events, MENU_ENCODER, VOLUME_ENCODER};
use crate::synth::{LocalSynth, RomBankCatalog};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Types and static storage
// ---------------------------------------------------------------------------

type Bus = I2c<'static, I2C0, i2c::Async>;

/// Encoder board and OLED share I2C0 through `I2cDevice` wrappers.
type SharedI2c = I2cDevice<'static, CriticalSectionRawMutex, Bus>;

type Menu = MenuController<LocalSynth, RomBankCatalog, FrameSink, SignalTimer>;
type SharedMenu = Mutex<CriticalSectionRawMutex, Menu>;

static I2C_BUS: StaticCell<Mutex<CriticalSectionRawMutex, Bus>> = StaticCell::new();

/// The menu controller. The encoder task and the overlay task are its two
/// entry points; both lock it.
static MENU: StaticCell<SharedMenu> = StaticCell::new();

/// Newest frame for the OLED task.
static FRAMES: FrameSignal = Signal::new();

/// Overlay deadline commands for the overlay task.
static TIMER_COMMANDS: TimerSignal = Signal::new();

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[embassy_executor::task]
async fn oled_task(driver: PanelDisplay<SharedI2c>, frames: &'static FrameSignal, config: DisplayConfig) {
    display_update_task(driver, frames, config).await;
}

#[embassy_executor::task]
async fn overlay_task(commands: &'static TimerSignal, menu: &'static SharedMenu) {
    overlay_timer_task(commands, menu).await
}

/// Interrupt-driven knob monitoring.
///
/// Waits for INT, reads positions and switches, clears the flags, then
/// decodes gestures for the menu and volume knobs. The menu mutex is held
/// only while events are dispatched, never during I2C.
#[embassy_executor::task]
async fn encoder_task(
    mut int_pin: Input<'static>,
    mut board: QuadEncoderBoard<SharedI2c>,
    menu: &'static SharedMenu,
) {
    info!("Encoder task started");

    let initial = match board.read_state().await {
        Ok(state) => state,
        Err(_) => {
            warn!("Could not read initial encoder state; starting from zero");
            Default::default()
        }
    };
    let mut knobs = [
        GestureDecoder::new(initial.positions[MENU_ENCODER]),
        GestureDecoder::new(initial.positions[VOLUME_ENCODER]),
    ];

    loop {
        int_pin.wait_for_low().await;

        let state = match board.read_state().await {
            Ok(state) => state,
            Err(_) => {
                error!("Encoder read failed");
                // Release INT anyway so a failed read does not spin.
                let _ = board.clear_interrupt_flags().await;
                continue;
            }
        };

        // Clear after reading so a movement during the read raises INT again.
        if board.clear_interrupt_flags().await.is_err() {
            warn!("Failed to clear interrupt flags");
        }

        let now_ms = Instant::now().as_millis();
        for (encoder, knob) in [MENU_ENCODER, VOLUME_ENCODER].into_iter().zip(knobs.iter_mut()) {
            let gestures = knob.update(state.positions[encoder], state.pressed[encoder], now_ms);
            if gestures.is_empty() {
                continue;
            }

            let mut menu = menu.lock().await;
            for gesture in gestures {
                debug!("Encoder {}: {}", encoder, gesture);
                for event in menu_events(encoder, gesture) {
                    menu.handle_event(event);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("panel-hw-interface starting");

    // Pin assignments
    // I2C_SDA → GP20  (p.PIN_20)
    // I2C_SCL → GP21  (p.PIN_21)
    // ENC_INT → GP19  (p.PIN_19)  active-low, pull-up enabled

    let i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c::Config::default());
    let i2c_bus = I2C_BUS.init(Mutex::new(i2c));

    let mut board = QuadEncoderBoard::new(I2cDevice::new(i2c_bus), DEFAULT_ADDRESS);
    let oled = PanelDisplay::new(I2cDevice::new(i2c_bus), 0x3C);
    let int_pin = Input::new(p.PIN_19, Pull::Up);

    // Encoder board
    if board.configure_buttons().await.is_err() {
        error!("Failed to configure encoder switches");
    }
    // Without these the INT pin never fires and the encoder task sleeps
    // forever; the panel simply stays static.
    if board.enable_all_interrupts().await.is_err() {
        error!("Failed to enable encoder interrupts");
    }
    // Drop flags raised at power-on so INT starts high.
    if board.clear_interrupt_flags().await.is_err() {
        warn!("Failed to clear initial interrupt flags");
    }

    // Menu
    let mut menu = MenuController::new(
        LocalSynth::new(false),
        RomBankCatalog,
        FrameSink::new(&FRAMES),
        SignalTimer::new(&TIMER_COMMANDS),
    );
    menu.render();
    let menu: &'static SharedMenu = MENU.init(Mutex::new(menu));

    // Spawn tasks
    spawner.spawn(unwrap!(oled_task(oled, &FRAMES, DisplayConfig::default())));
    spawner.spawn(unwrap!(overlay_task(&TIMER_COMMANDS, menu)));
    spawner.spawn(unwrap!(encoder_task(int_pin, board, menu)));

    info!("All tasks spawned");
}
