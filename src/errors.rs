#[cfg(feature = "defmt")]
use defmt::Format;

/// Represents potential errors when interacting with the MAX1704x chip.
///
/// Read operations report transport failures through `I2c` instead of
/// handing back a zero measurement, so a dead bus is distinguishable from a
/// flat battery.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(Format))]
pub enum Error<E> {
    /// An error occurred during I2C communication.
    I2c(E),
    /// Invalid data received from the chip, or an internal buffer overflow.
    InvalidData,
}
