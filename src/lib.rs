//! Driver for the MAXIM MAX17043/MAX17044 Li+ fuel gauges.
//!
//! The two chips are pin compatible and share one register map; they differ
//! only in voltage range (0-5 V vs. 0-10 V), selected at construction via
//! [`GaugeVariant`]. The driver exposes the battery measurements (cell
//! voltage, state of charge, IC version), the CONFIG register fields
//! (compensation byte, low-charge alert threshold) and the power-mode
//! commands (sleep, wake, quick-start, reset).
//!
//! The CONFIG register packs three independent fields into one byte pair,
//! so every field update is a read-modify-write sequence that preserves the
//! unrelated bits. All such updates funnel through one internal helper.
//!
//! # Alert handling
//!
//! The chip pulls its ALERT line low when the state of charge drops below
//! the configured threshold. Wiring that line to a falling-edge interrupt
//! belongs to the host HAL; the driver is only a registration point. Call
//! [`Max1704x::on_alert`] when the interrupt fires to run the registered
//! callback and clear the alert flag on the chip.
//!
//! Note that if `on_alert` (or any other CONFIG-modifying operation) runs
//! in interrupt context while the main context is mid-way through its own
//! CONFIG read-modify-write, the last write wins and silently discards the
//! other context's change. This is a race at the chip level, not in memory,
//! so the borrow checker cannot catch it. Hosts that service alerts from an
//! ISR must guard composite register operations with a critical section,
//! e.g. by masking the alert interrupt around them.

#![no_std]

#[macro_use]
extern crate uom;

#[cfg(feature = "defmt")]
extern crate defmt;

use core::ops::Deref;

#[cfg(not(feature = "async"))]
use embedded_hal::i2c::I2c;
#[cfg(feature = "async")]
use embedded_hal_async::i2c::I2c;

pub mod registers;
use registers::*; // Import bit masks and command payloads

mod config;
mod data_types;
mod errors;
pub mod units; // Make the units module public

pub use config::ConfigRegister;
pub use data_types::GaugeVariant;
pub use errors::Error;

use crate::units::{ElectricPotential, Ratio};
use uom::si::electric_potential::volt;

/// Signature of the callback invoked from [`Max1704x::on_alert`].
pub type AlertCallback = fn();

/// MAX17043/MAX17044 driver
pub struct Max1704x<I2C>
where
    I2C: I2c,
{
    address: u8,
    i2c: I2C,
    variant: GaugeVariant,
    alert_callback: Option<AlertCallback>,
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "RegisterAccess",),
    async(feature = "async", keep_self)
)]
#[allow(async_fn_in_trait)]
/// Trait for abstracting register access.
pub trait RegisterAccess<E>
where
    Self: Sized,
{
    /// The buffer type used for reading multiple registers.
    type ReadBuffer: Deref<Target = [u8]>;

    /// Reads a single byte from the specified register.
    async fn read_register(&mut self, reg: Register) -> Result<u8, Error<E>>;

    /// Reads multiple bytes starting from the specified register, in bus
    /// order (most significant byte first).
    async fn read_registers(
        &mut self,
        reg: Register,
        len: usize,
    ) -> Result<Self::ReadBuffer, Error<E>>;

    /// Writes a single byte to the specified register.
    async fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<E>>;

    /// Writes multiple bytes starting from the specified register.
    async fn write_registers(&mut self, reg: Register, values: &[u8]) -> Result<(), Error<E>>;
}

impl<I2C> Max1704x<I2C>
where
    I2C: I2c,
{
    /// Creates a new instance of the MAX1704x driver.
    ///
    /// # Arguments
    ///
    /// * `i2c` - The I2C peripheral.
    /// * `variant` - The gauge variant, which selects the voltage scale.
    pub fn new(i2c: I2C, variant: GaugeVariant) -> Self {
        Self {
            address: MAX1704X_ADDR,
            i2c,
            variant,
            alert_callback: None,
        }
    }

    /// Creates a new instance with an alert callback already registered.
    ///
    /// The caller is responsible for arming a falling-edge interrupt on the
    /// pin wired to the chip's ALERT line and calling [`Self::on_alert`]
    /// from its handler.
    pub fn with_alert_callback(i2c: I2C, variant: GaugeVariant, callback: AlertCallback) -> Self {
        Self {
            address: MAX1704X_ADDR,
            i2c,
            variant,
            alert_callback: Some(callback),
        }
    }

    /// Registers the callback invoked from [`Self::on_alert`], replacing
    /// any previous one.
    ///
    /// See the crate-level documentation for the re-entrancy hazard when
    /// the callback's interrupt context shares the CONFIG register with the
    /// main context.
    pub fn set_alert_callback(&mut self, callback: AlertCallback) {
        self.alert_callback = Some(callback);
    }

    /// Cancels the alert subscription.
    pub fn clear_alert_callback(&mut self) {
        self.alert_callback = None;
    }

    /// The gauge variant this handle was constructed for.
    pub fn variant(&self) -> GaugeVariant {
        self.variant
    }

    /// Consumes the driver and releases the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Max1704x",),
    async(feature = "async", keep_self)
)]
impl<I2C, E> RegisterAccess<E> for Max1704x<I2C>
where
    I2C: I2c<Error = E>,
{
    type ReadBuffer = heapless::Vec<u8, 4>;

    async fn read_register(&mut self, reg: Register) -> Result<u8, Error<E>> {
        let mut data = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg as u8], &mut data)
            .await
            .map_err(Error::I2c)?;
        Ok(data[0])
    }

    async fn read_registers(
        &mut self,
        reg: Register,
        len: usize,
    ) -> Result<Self::ReadBuffer, Error<E>> {
        let mut data: heapless::Vec<u8, 4> = heapless::Vec::new();
        data.resize(len, 0).map_err(|_| Error::InvalidData)?;
        self.i2c
            .write_read(self.address, &[reg as u8], &mut data)
            .await
            .map_err(Error::I2c)?;
        Ok(data)
    }

    async fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[reg as u8, value])
            .await
            .map_err(Error::I2c)
    }

    async fn write_registers(&mut self, reg: Register, values: &[u8]) -> Result<(), Error<E>> {
        let mut data: heapless::Vec<u8, 4> = heapless::Vec::new();
        data.push(reg as u8).map_err(|_| Error::InvalidData)?;
        data.extend_from_slice(values)
            .map_err(|_| Error::InvalidData)?;
        self.i2c
            .write(self.address, &data)
            .await
            .map_err(Error::I2c)
    }
}

#[maybe_async_cfg::maybe(
    sync(cfg(not(feature = "async")), self = "Max1704x",),
    async(feature = "async", keep_self)
)]
impl<I2C, E> Max1704x<I2C>
where
    I2C: I2c<Error = E>,
    Self: RegisterAccess<E>,
{
    /// Reads the cell voltage from the VCELL register.
    ///
    /// The 12-bit ADC value is left-justified in the byte pair; the LSB is
    /// 1.25 mV on the MAX17043 and 2.5 mV on the MAX17044.
    pub async fn read_cell_voltage(&mut self) -> Result<ElectricPotential, Error<E>> {
        let raw = self.read_registers(Register::VCell, 2).await?;
        let adc = ((raw[0] as u16) << 4) | ((raw[1] as u16) >> 4);
        let volts = adc as f32 * 0.00125 * self.variant.cell_scale();
        #[cfg(feature = "defmt")]
        defmt::debug!("VCELL: raw={}, volts={}", adc, volts);
        Ok(ElectricPotential::new::<volt>(volts))
    }

    /// Reads the relative state of charge from the SOC register, with a
    /// resolution of 1/256 %.
    ///
    /// The value is passed through unclamped; an out-of-spec chip state can
    /// yield readings outside 0-100 %.
    pub async fn read_soc(&mut self) -> Result<Ratio, Error<E>> {
        let raw = self.read_registers(Register::Soc, 2).await?;
        let pct = raw[0] as f32 + raw[1] as f32 / 256.0;
        Ok(Ratio::new::<uom::si::ratio::percent>(pct))
    }

    /// Reads the production version of the IC. Opaque to the driver.
    pub async fn read_version(&mut self) -> Result<u16, Error<E>> {
        let raw = self.read_registers(Register::Version, 2).await?;
        Ok(((raw[0] as u16) << 8) | raw[1] as u16)
    }

    /// Reads the CONFIG register into its in-memory model.
    pub async fn read_config(&mut self) -> Result<ConfigRegister, Error<E>> {
        let raw = self.read_registers(Register::Config, 2).await?;
        Ok(ConfigRegister::from_bytes([raw[0], raw[1]]))
    }

    /// Reads the current RCOMP compensation byte.
    ///
    /// The compensation byte is the high byte of CONFIG, so a single-byte
    /// read at the CONFIG address returns it directly.
    pub async fn compensation(&mut self) -> Result<u8, Error<E>> {
        self.read_register(Register::Config).await
    }

    /// Reads the raw status (CONFIG low) byte.
    pub async fn status_byte(&mut self) -> Result<u8, Error<E>> {
        self.read_register(Register::Status).await
    }

    /// Reads the alert threshold as a percentage in 1..=32.
    pub async fn alert_threshold(&mut self) -> Result<u8, Error<E>> {
        let status = self.status_byte().await?;
        Ok(ConfigRegister::from_bytes([0, status]).alert_threshold())
    }

    /// Sets the alert threshold below which the chip asserts ALERT.
    ///
    /// The acceptable range is 1-32 %; out-of-range values are clamped.
    /// The chip's power-on default is 4 %.
    pub async fn set_alert_threshold(&mut self, percent: u8) -> Result<(), Error<E>> {
        self.modify_config(|cfg| cfg.set_alert_threshold(percent))
            .await
    }

    /// Sets the RCOMP compensation byte used to tune the SOC estimation to
    /// the operating conditions.
    pub async fn set_compensation(&mut self, value: u8) -> Result<(), Error<E>> {
        self.modify_config(|cfg| cfg.set_compensation(value)).await
    }

    /// Clears the alert flag after an alert interrupt has been serviced.
    /// Sleep bit and threshold bits are left untouched.
    pub async fn clear_alert_interrupt(&mut self) -> Result<(), Error<E>> {
        self.modify_config(|cfg| cfg.clear_alert()).await
    }

    /// Invokes the registered alert callback, if any, then clears the alert
    /// flag on the chip.
    pub async fn on_alert(&mut self) -> Result<(), Error<E>> {
        if let Some(callback) = self.alert_callback {
            callback();
        }
        self.modify_config(|cfg| cfg.clear_alert()).await
    }

    /// Puts the chip to sleep, halting all fuel-gauge computation.
    /// Threshold and compensation settings are preserved.
    pub async fn sleep(&mut self) -> Result<(), Error<E>> {
        self.modify_config(|cfg| cfg.set_sleep(true)).await
    }

    /// Wakes the chip from sleep mode.
    pub async fn wake(&mut self) -> Result<(), Error<E>> {
        self.modify_config(|cfg| cfg.set_sleep(false)).await
    }

    /// Whether the chip is currently in sleep mode. Re-read from the chip
    /// on every call; no mode is cached in the handle.
    pub async fn sleeping(&mut self) -> Result<bool, Error<E>> {
        let status = self.status_byte().await?;
        Ok(status & CONFIG_SLEEP != 0)
    }

    /// Forces the chip to restart its SOC estimation algorithm.
    ///
    /// Pure command write; MODE has no readable fields to preserve.
    pub async fn quick_start(&mut self) -> Result<(), Error<E>> {
        self.write_registers(Register::Mode, &MODE_QUICK_START).await
    }

    /// Forces a complete power-on reset of the chip. All configuration
    /// reverts to the chip defaults.
    pub async fn reset(&mut self) -> Result<(), Error<E>> {
        self.write_registers(Register::Command, &COMMAND_POR).await
    }

    /// Read-modify-write helper for the CONFIG register.
    ///
    /// Every CONFIG mutation goes through here: the current byte pair is
    /// read back first and only the bits the closure touches change in the
    /// written value. Writing CONFIG without the preceding read would zero
    /// the unrelated fields.
    async fn modify_config<F>(&mut self, f: F) -> Result<(), Error<E>>
    where
        F: FnOnce(&mut ConfigRegister),
    {
        let mut cfg = self.read_config().await?;
        f(&mut cfg);
        let bytes = cfg.to_bytes();
        #[cfg(feature = "defmt")]
        defmt::trace!("CONFIG write: {:02x} {:02x}", bytes[0], bytes[1]);
        self.write_registers(Register::Config, &bytes).await
    }
}
