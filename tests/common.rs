#![allow(dead_code)]

use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use max1704x_async_rs::{GaugeVariant, Max1704x};

/// Fixed bus address of the MAX1704x family.
pub const ADDR: u8 = 0x36;

/// Creates a driver over an I2C mock programmed with the given
/// transactions. Finish a test with `gauge.release().done()`.
pub fn new_gauge(transactions: &[I2cTransaction], variant: GaugeVariant) -> Max1704x<I2cMock> {
    Max1704x::new(I2cMock::new(transactions), variant)
}
