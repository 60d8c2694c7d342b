use crate::registers::{CONFIG_ALERT, CONFIG_ATHD_MASK, CONFIG_SLEEP};

/// In-memory model of the 16-bit CONFIG register.
///
/// The register packs three independent fields: the compensation byte
/// (bits 15:8), the sleep bit (bit 7) and the 5-bit alert threshold
/// (bits 4:0), plus the read-mostly alert flag (bit 5). Each mutator
/// touches only its own bit range, so a value read from the chip can be
/// edited and written back without disturbing the other fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigRegister {
    compensation: u8,
    status: u8,
}

impl ConfigRegister {
    /// Builds the model from the two CONFIG bytes, compensation byte first.
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            compensation: bytes[0],
            status: bytes[1],
        }
    }

    /// Returns the two CONFIG bytes in bus order, compensation byte first.
    pub fn to_bytes(self) -> [u8; 2] {
        [self.compensation, self.status]
    }

    /// The RCOMP tuning byte. Opaque to the driver; meaningful only to the
    /// chip's internal compensation algorithm. Chip default is 0x97.
    pub fn compensation(self) -> u8 {
        self.compensation
    }

    pub fn set_compensation(&mut self, value: u8) {
        self.compensation = value;
    }

    /// Whether the sleep bit is set (all fuel-gauge computation halted).
    pub fn sleeping(self) -> bool {
        self.status & CONFIG_SLEEP != 0
    }

    pub fn set_sleep(&mut self, sleep: bool) {
        if sleep {
            self.status |= CONFIG_SLEEP;
        } else {
            self.status &= !CONFIG_SLEEP;
        }
    }

    /// Whether the chip has asserted the ALERT condition.
    pub fn alert_pending(self) -> bool {
        self.status & CONFIG_ALERT != 0
    }

    /// Clears the alert flag. Sleep bit and threshold bits are untouched.
    pub fn clear_alert(&mut self) {
        self.status &= !CONFIG_ALERT;
    }

    /// Decodes the alert threshold as a percentage in 1..=32.
    ///
    /// The field stores `32 - percent` as 5-bit two's complement: a raw 0
    /// means 32 %, a raw 31 means 1 %.
    pub fn alert_threshold(self) -> u8 {
        (!self.status & CONFIG_ATHD_MASK) + 1
    }

    /// Encodes and stores an alert threshold percentage.
    ///
    /// Out-of-range inputs are clamped to 1..=32 silently. Only the
    /// threshold bits 4:0 are replaced.
    pub fn set_alert_threshold(&mut self, percent: u8) {
        let percent = percent.clamp(1, 32);
        let field = percent.wrapping_neg() & CONFIG_ATHD_MASK;
        self.status = (self.status & !CONFIG_ATHD_MASK) | field;
    }

    /// The raw status (low) byte as last read from or written to the chip.
    pub fn status_byte(self) -> u8 {
        self.status
    }
}
