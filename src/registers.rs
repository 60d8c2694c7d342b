/// Fixed 7-bit bus address. Both gauge variants respond only here.
pub const MAX1704X_ADDR: u8 = 0x36;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Cell Voltage Register, 12-bit value left-justified in two bytes
    VCell = 0x02,
    /// State of Charge Register, integer percent high byte, 1/256 % low byte
    Soc = 0x04,
    /// Mode Register, write-only command semantics (quick-start)
    Mode = 0x06,
    /// Production Version Register
    Version = 0x08,
    /// Config Register, compensation high byte / status low byte
    Config = 0x0C,
    /// Alias of the CONFIG status (low) byte
    Status = 0x0D,
    /// Command Register, write-only command semantics (power-on reset)
    Command = 0xFE,
}

// CONFIG status (low) byte bit masks
pub const CONFIG_SLEEP: u8 = 1 << 7;
pub const CONFIG_ALERT: u8 = 1 << 5;
pub const CONFIG_ATHD_MASK: u8 = 0x1F;

/// MODE register payload that restarts the SOC estimation algorithm.
pub const MODE_QUICK_START: [u8; 2] = [0x40, 0x00];

/// COMMAND register payload that forces a power-on reset.
pub const COMMAND_POR: [u8; 2] = [0x54, 0x00];
