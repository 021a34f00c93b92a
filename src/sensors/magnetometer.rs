//! Magnetometer sensor types and unit conversion tables
//!
//! Provides enums with the device encodings, sample types and the conversion
//! helpers used by [`MagnetometerDriver`](crate::MagnetometerDriver).

use crate::power::TemperatureSensorMode;

/// Temperature sensitivity in °C/LSB
pub const TEMPERATURE_SENSITIVITY: f32 = 1.0 / 16.0;

/// Temperature reported for a raw reading of zero, in °C
///
/// The sensor is not factory calibrated; the absolute value is approximate.
pub const TEMPERATURE_ZERO_OFFSET: f32 = 21.0;

/// Magnetometer output data rate (`DO` field of `CRA_REG_M`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MagOutputDataRate {
    /// 0.75 Hz
    Hz0_75 = 0,
    /// 1.5 Hz
    Hz1_5 = 1,
    /// 3.0 Hz
    Hz3 = 2,
    /// 7.5 Hz
    Hz7_5 = 3,
    /// 15 Hz
    #[default]
    Hz15 = 4,
    /// 30 Hz
    Hz30 = 5,
    /// 75 Hz
    Hz75 = 6,
    /// 220 Hz
    Hz220 = 7,
}

impl MagOutputDataRate {
    /// Decode the data rate field
    ///
    /// The field also covers a reserved bit, so values above 7 are possible
    /// and decode to `None`.
    #[must_use]
    pub const fn from_data_rate(data_rate: u8) -> Option<Self> {
        match data_rate {
            0 => Some(Self::Hz0_75),
            1 => Some(Self::Hz1_5),
            2 => Some(Self::Hz3),
            3 => Some(Self::Hz7_5),
            4 => Some(Self::Hz15),
            5 => Some(Self::Hz30),
            6 => Some(Self::Hz75),
            7 => Some(Self::Hz220),
            _ => None,
        }
    }

    /// Output data rate in Hz
    #[must_use]
    pub const fn hz(self) -> f32 {
        match self {
            Self::Hz0_75 => 0.75,
            Self::Hz1_5 => 1.5,
            Self::Hz3 => 3.0,
            Self::Hz7_5 => 7.5,
            Self::Hz15 => 15.0,
            Self::Hz30 => 30.0,
            Self::Hz75 => 75.0,
            Self::Hz220 => 220.0,
        }
    }
}

/// Magnetometer full-scale range (`GN` field of `CRB_REG_M`)
///
/// The X and Y axes share one gain; Z has its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MagFullScale {
    /// ±1.3 gauss
    #[default]
    Gauss1_3 = 1,
    /// ±1.9 gauss
    Gauss1_9 = 2,
    /// ±2.5 gauss
    Gauss2_5 = 3,
    /// ±4.0 gauss
    Gauss4_0 = 4,
    /// ±4.7 gauss
    Gauss4_7 = 5,
    /// ±5.6 gauss
    Gauss5_6 = 6,
    /// ±8.1 gauss
    Gauss8_1 = 7,
}

impl MagFullScale {
    /// Decode the `GN` field; `GN = 000` is not a valid range
    #[must_use]
    pub const fn from_gain(gain: u8) -> Option<Self> {
        match gain {
            1 => Some(Self::Gauss1_3),
            2 => Some(Self::Gauss1_9),
            3 => Some(Self::Gauss2_5),
            4 => Some(Self::Gauss4_0),
            5 => Some(Self::Gauss4_7),
            6 => Some(Self::Gauss5_6),
            7 => Some(Self::Gauss8_1),
            _ => None,
        }
    }

    /// X/Y and Z gains in LSB/gauss
    #[must_use]
    pub const fn gain(self) -> (u16, u16) {
        match self {
            Self::Gauss1_3 => (1100, 980),
            Self::Gauss1_9 => (885, 760),
            Self::Gauss2_5 => (670, 600),
            Self::Gauss4_0 => (450, 400),
            Self::Gauss4_7 => (400, 355),
            Self::Gauss5_6 => (330, 295),
            Self::Gauss8_1 => (230, 205),
        }
    }

    /// X/Y and Z sensitivities in gauss/LSB
    #[must_use]
    pub fn sensitivity(self) -> (f32, f32) {
        let (xy, z) = self.gain();
        (1.0 / f32::from(xy), 1.0 / f32::from(z))
    }

    /// Get the maximum value in gauss
    #[must_use]
    pub const fn max_value(self) -> f32 {
        match self {
            Self::Gauss1_3 => 1.3,
            Self::Gauss1_9 => 1.9,
            Self::Gauss2_5 => 2.5,
            Self::Gauss4_0 => 4.0,
            Self::Gauss4_7 => 4.7,
            Self::Gauss5_6 => 5.6,
            Self::Gauss8_1 => 8.1,
        }
    }
}

/// Magnetometer sample (signed counts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagData {
    /// X-axis field (raw)
    pub x: i16,
    /// Y-axis field (raw)
    pub y: i16,
    /// Z-axis field (raw)
    pub z: i16,
}

impl MagData {
    /// Decode the six output bytes starting at `OUT_X_H_M`
    ///
    /// Registers are ordered X, Z, Y and each axis is big-endian.
    #[must_use]
    pub const fn from_bytes(buffer: &[u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([buffer[0], buffer[1]]),
            z: i16::from_be_bytes([buffer[2], buffer[3]]),
            y: i16::from_be_bytes([buffer[4], buffer[5]]),
        }
    }
}

/// Magnetometer data in gauss
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagDataGauss {
    /// X-axis field in gauss
    pub x: f32,
    /// Y-axis field in gauss
    pub y: f32,
    /// Z-axis field in gauss
    pub z: f32,
}

impl MagDataGauss {
    /// Scale a raw sample by the X/Y and Z sensitivities in gauss/LSB
    #[must_use]
    pub fn from_raw(raw: MagData, xy_sensitivity: f32, z_sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw.x) * xy_sensitivity,
            y: f32::from(raw.y) * xy_sensitivity,
            z: f32::from(raw.z) * z_sensitivity,
        }
    }

    /// Get the magnitude of the magnetic field vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Convert a raw temperature reading to °C
///
/// `raw` is the 12-bit value after the right shift.
#[must_use]
pub fn temperature_celsius(raw: i16) -> f32 {
    f32::from(raw) * TEMPERATURE_SENSITIVITY + TEMPERATURE_ZERO_OFFSET
}

/// Magnetometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagConfig {
    /// Output data rate
    pub output_data_rate: MagOutputDataRate,
    /// Full-scale range
    pub full_scale: MagFullScale,
    /// Temperature sensor
    pub temperature_sensor: TemperatureSensorMode,
}

impl Default for MagConfig {
    fn default() -> Self {
        Self {
            output_data_rate: MagOutputDataRate::Hz15,
            full_scale: MagFullScale::Gauss1_3,
            temperature_sensor: TemperatureSensorMode::Enabled,
        }
    }
}
