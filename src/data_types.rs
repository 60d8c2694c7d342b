/// Names of the two supported gauge variants.
///
/// The MAX17043 measures 0-5 V with a 1.25 mV LSB, the MAX17044 0-10 V with
/// a 2.5 mV LSB. The variant only selects the voltage scale; the register
/// map and bus address are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GaugeVariant {
    Max17043,
    Max17044,
}

impl GaugeVariant {
    /// VCELL scale factor relative to the MAX17043's 1.25 mV LSB.
    ///
    /// Kept as an explicit lookup so renumbering the enum can never
    /// silently change the measurement scale.
    pub fn cell_scale(self) -> f32 {
        match self {
            GaugeVariant::Max17043 => 1.0,
            GaugeVariant::Max17044 => 2.0,
        }
    }
}
