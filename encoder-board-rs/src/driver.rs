//! Low-level Seesaw protocol driver.
//!
//! I2C primitives for the Seesaw firmware, including the mandatory 125µs
//! pause between addressing a register and reading it back. Values on
//! the wire are big-endian.
//!
//! Crate-private; consumers use [`QuadEncoderBoard`](crate::QuadEncoderBoard).

use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;

use crate::error::EncoderError;
use crate::registers::SEESAW_DELAY_US;

/// Seesaw register: `[module, register]`.
pub(crate) type Register = [u8; 2];

/// Owns the I2C peripheral and the device address.
pub(crate) struct SeesawDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> SeesawDriver<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Address `register`, wait for the firmware, then read `buffer.len()` bytes.
    ///
    /// Separate `write()` and `read()` rather than `write_read()`: a
    /// repeated start leaves the firmware no time to prepare the data.
    async fn read_register(
        &mut self,
        register: Register,
        buffer: &mut [u8],
    ) -> Result<(), EncoderError<I2C::Error>> {
        self.i2c.write(self.address, &register).await?;
        Timer::after(Duration::from_micros(SEESAW_DELAY_US)).await;
        self.i2c.read(self.address, buffer).await?;
        Ok(())
    }

    /// Write `N` payload bytes to `register` in one transaction.
    async fn write_register<const N: usize>(
        &mut self,
        register: Register,
        payload: [u8; N],
    ) -> Result<(), EncoderError<I2C::Error>> {
        // Two address bytes plus at most a 32-bit payload.
        let mut buf = [0u8; 6];
        let len = 2 + N.min(4);
        buf[..2].copy_from_slice(&register);
        buf[2..len].copy_from_slice(&payload[..len - 2]);
        self.i2c.write(self.address, &buf[..len]).await?;
        Ok(())
    }

    pub async fn read_i32(&mut self, register: Register) -> Result<i32, EncoderError<I2C::Error>> {
        let mut buf = [0u8; 4];
        self.read_register(register, &mut buf).await?;
        Ok(i32::from_be_bytes(buf))
    }

    pub async fn read_u32(&mut self, register: Register) -> Result<u32, EncoderError<I2C::Error>> {
        let mut buf = [0u8; 4];
        self.read_register(register, &mut buf).await?;
        Ok(u32::from_be_bytes(buf))
    }

    pub async fn write_i32(
        &mut self,
        register: Register,
        value: i32,
    ) -> Result<(), EncoderError<I2C::Error>> {
        self.write_register(register, value.to_be_bytes()).await
    }

    pub async fn write_u32(
        &mut self,
        register: Register,
        value: u32,
    ) -> Result<(), EncoderError<I2C::Error>> {
        self.write_register(register, value.to_be_bytes()).await
    }

    pub async fn write_u8(
        &mut self,
        register: Register,
        value: u8,
    ) -> Result<(), EncoderError<I2C::Error>> {
        self.write_register(register, [value]).await
    }
}
