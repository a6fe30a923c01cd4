//! Seesaw register map for the Adafruit Quad Rotary Encoder Breakout.
//!
//! Registers are addressed with two bytes, `[MODULE_ID, REGISTER]`. Encoder
//! registers take the encoder index OR'd into the register byte:
//! `[MODULE_ENCODER, ENCODER_POSITION | encoder_index]`. GPIO "bulk"
//! registers take a 32-bit pin mask, one bit per Seesaw pin.

// ---------------------------------------------------------------------------
// Module IDs
// ---------------------------------------------------------------------------

/// Seesaw GPIO module.
pub const MODULE_GPIO: u8 = 0x01;

/// Seesaw encoder module.
pub const MODULE_ENCODER: u8 = 0x11;

// ---------------------------------------------------------------------------
// GPIO module registers
// ---------------------------------------------------------------------------

/// Make the pins in the mask inputs.
pub const GPIO_DIRCLR_BULK: u8 = 0x03;

/// Pin levels, one bit per pin (32-bit, read).
pub const GPIO_BULK: u8 = 0x04;

/// Drive the pins in the mask high; on pull-enabled inputs this selects
/// pull-up.
pub const GPIO_BULK_SET: u8 = 0x05;

/// Enable pin-change interrupts for the pins in the mask.
pub const GPIO_INTENSET: u8 = 0x08;

/// Interrupt flag register (32-bit, read-only).
/// Reading it clears the flags and releases the INT pin.
pub const GPIO_INTFLAG: u8 = 0x0A;

/// Enable the pull resistor on the pins in the mask.
pub const GPIO_PULLENSET: u8 = 0x0B;

// ---------------------------------------------------------------------------
// Encoder module registers
// ---------------------------------------------------------------------------

/// Absolute encoder position (32-bit signed), per encoder.
pub const ENCODER_POSITION: u8 = 0x30;

/// Enable the position-change interrupt, per encoder.
pub const ENCODER_INT_SET: u8 = 0x10;

// ---------------------------------------------------------------------------
// Board layout
// ---------------------------------------------------------------------------

/// Seesaw delay between the register write and the read, in microseconds.
pub const SEESAW_DELAY_US: u64 = 125;

/// Default I2C address of the breakout.
pub const DEFAULT_ADDRESS: u8 = 0x49;

/// Number of rotary encoders on the board.
pub const ENCODER_COUNT: usize = 4;

/// Seesaw pin of each encoder's push switch, by encoder index.
pub const BUTTON_PINS: [u8; ENCODER_COUNT] = [12, 14, 17, 9];

/// Bulk mask covering every push switch.
pub const BUTTON_MASK: u32 = button_mask();

const fn button_mask() -> u32 {
    let mut mask = 0;
    let mut i = 0;
    while i < ENCODER_COUNT {
        mask |= 1 << BUTTON_PINS[i];
        i += 1;
    }
    mask
}
