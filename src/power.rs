//! Power and operating mode types
//!
//! The accelerometer and magnetometer are powered independently:
//!
//! - Accelerometer: [`PowerMode`] selects normal or low-power operation. The
//!   choice restricts which output data rates are valid, so set the power mode
//!   before the rate. Power-down is an output data rate, not a power mode.
//! - Magnetometer: [`MagnetometerMode`] switches between continuous conversion
//!   and sleep. [`TemperatureSensorMode`] powers the temperature sensor that
//!   sits next to the magnetometer.

/// Accelerometer power mode (`LPen` bit of `CTRL_REG1_A`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Normal mode, 10-bit or 12-bit (high resolution) output
    #[default]
    Normal,
    /// Low-power mode, 8-bit output, extended rate table
    LowPower,
}

impl PowerMode {
    /// Bit in the output data rate code that marks a rate as valid for this mode
    pub(crate) const fn rate_flag(self) -> u8 {
        match self {
            Self::Normal => 0x01,
            Self::LowPower => 0x02,
        }
    }

    /// Decode the `LPen` bit
    pub(crate) const fn from_lpen(lpen: bool) -> Self {
        if lpen {
            Self::LowPower
        } else {
            Self::Normal
        }
    }
}

/// Magnetometer operating mode (`MD` field of `MR_REG_M`)
///
/// The encoding is inverted: `MD = 00` is continuous conversion, any value
/// with `MD1` set is sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagnetometerMode {
    /// Continuous conversion
    Enabled,
    /// Sleep
    Disabled,
}

impl MagnetometerMode {
    /// Value written to the `MD` field
    pub(crate) const fn md(self) -> u8 {
        match self {
            Self::Enabled => 0b00,
            Self::Disabled => 0b11,
        }
    }

    /// Decode the `MD` field; only `MD1` is significant
    pub(crate) const fn from_md(md: u8) -> Self {
        if md & 0b10 != 0 {
            Self::Disabled
        } else {
            Self::Enabled
        }
    }
}

/// Magnetometer temperature sensor mode (`TEMP_EN` bit of `CRA_REG_M`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureSensorMode {
    /// Temperature sensor powered
    Enabled,
    /// Temperature sensor off
    Disabled,
}
