//! Accelerometer sensor types and unit conversion tables
//!
//! Provides enums with the device encodings, sample types and the conversion
//! helpers used by [`AccelerometerDriver`](crate::AccelerometerDriver).

use crate::power::PowerMode;

/// Standard gravity in m/s²
pub const GRAVITY_OF_EARTH: f32 = 9.806_65;

/// Accelerometer output data rate
///
/// The rate field of `CTRL_REG1_A` is shared by two tables: one for normal
/// mode and one for low-power mode. Most codes exist in both; three do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelOutputDataRate {
    /// Power-down
    PowerDown,
    /// 1 Hz
    Hz1,
    /// 10 Hz
    Hz10,
    /// 25 Hz
    #[default]
    Hz25,
    /// 50 Hz
    Hz50,
    /// 100 Hz
    Hz100,
    /// 200 Hz
    Hz200,
    /// 400 Hz
    Hz400,
    /// 1.620 kHz (low-power mode only)
    LowPowerHz1620,
    /// 1.344 kHz (normal mode only)
    NormalHz1344,
    /// 5.376 kHz (low-power mode only)
    LowPowerHz5376,
}

impl AccelOutputDataRate {
    /// Device code: the upper nibble is the `ODR` field value, bit 0 marks the
    /// rate as valid in normal mode and bit 1 as valid in low-power mode
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::PowerDown => 0x03,
            Self::Hz1 => 0x13,
            Self::Hz10 => 0x23,
            Self::Hz25 => 0x33,
            Self::Hz50 => 0x43,
            Self::Hz100 => 0x53,
            Self::Hz200 => 0x63,
            Self::Hz400 => 0x73,
            Self::LowPowerHz1620 => 0x82,
            Self::NormalHz1344 => 0x91,
            Self::LowPowerHz5376 => 0x92,
        }
    }

    /// Value of the `ODR` field of `CTRL_REG1_A`
    #[must_use]
    pub const fn odr(self) -> u8 {
        self.code() >> 4
    }

    /// Whether the rate can be selected in `power_mode`
    #[must_use]
    pub const fn is_valid_for(self, power_mode: PowerMode) -> bool {
        self.code() & power_mode.rate_flag() != 0
    }

    /// Decode the `ODR` field
    ///
    /// `ODR = 9` means 1.344 kHz in normal mode and 5.376 kHz in low-power
    /// mode. Returns `None` for the unused values 10..=15.
    #[must_use]
    pub const fn from_odr(odr: u8, power_mode: PowerMode) -> Option<Self> {
        match odr {
            0 => Some(Self::PowerDown),
            1 => Some(Self::Hz1),
            2 => Some(Self::Hz10),
            3 => Some(Self::Hz25),
            4 => Some(Self::Hz50),
            5 => Some(Self::Hz100),
            6 => Some(Self::Hz200),
            7 => Some(Self::Hz400),
            8 => Some(Self::LowPowerHz1620),
            9 => match power_mode {
                PowerMode::Normal => Some(Self::NormalHz1344),
                PowerMode::LowPower => Some(Self::LowPowerHz5376),
            },
            _ => None,
        }
    }

    /// Output data rate in Hz (0 for power-down)
    #[must_use]
    pub const fn hz(self) -> f32 {
        match self {
            Self::PowerDown => 0.0,
            Self::Hz1 => 1.0,
            Self::Hz10 => 10.0,
            Self::Hz25 => 25.0,
            Self::Hz50 => 50.0,
            Self::Hz100 => 100.0,
            Self::Hz200 => 200.0,
            Self::Hz400 => 400.0,
            Self::LowPowerHz1620 => 1620.0,
            Self::NormalHz1344 => 1344.0,
            Self::LowPowerHz5376 => 5376.0,
        }
    }
}

/// Accelerometer full-scale range (`FS` field of `CTRL_REG4_A`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AccelFullScale {
    /// ±2g range (most sensitive, least range)
    #[default]
    G2 = 0,
    /// ±4g range
    G4 = 1,
    /// ±8g range
    G8 = 2,
    /// ±16g range (least sensitive, most range)
    G16 = 3,
}

impl AccelFullScale {
    /// Decode the two-bit `FS` field
    #[must_use]
    pub const fn from_fs(fs: u8) -> Self {
        match fs & 0b11 {
            0 => Self::G2,
            1 => Self::G4,
            2 => Self::G8,
            _ => Self::G16,
        }
    }

    /// Sensitivity in g/LSB for a 12-bit right-justified sample
    ///
    /// The ±16g step is 12 mg, not 8 mg: the range is calibrated differently.
    #[must_use]
    pub const fn g_per_lsb(self) -> f32 {
        match self {
            Self::G2 => 0.001,
            Self::G4 => 0.002,
            Self::G8 => 0.004,
            Self::G16 => 0.012,
        }
    }

    /// Sensitivity in (m/s²)/LSB
    #[must_use]
    pub fn sensitivity(self) -> f32 {
        self.g_per_lsb() * GRAVITY_OF_EARTH
    }

    /// Get the maximum value in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }
}

/// High-pass filter mode
///
/// The four presets select the `HPCF` cutoff coefficient; the resulting
/// frequency scales with the output data rate (see [`high_pass_cutoff_hz`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HighPassFilterMode {
    /// Filter bypassed
    #[default]
    Off,
    /// Cutoff preset 0 (highest cutoff, about ODR/50)
    Cutoff0,
    /// Cutoff preset 1 (about ODR/100)
    Cutoff1,
    /// Cutoff preset 2 (about ODR/200)
    Cutoff2,
    /// Cutoff preset 3 (lowest cutoff, about ODR/400)
    Cutoff3,
}

impl HighPassFilterMode {
    /// Cutoff preset index (`HPCF` field value), `None` when off
    #[must_use]
    pub const fn preset_index(self) -> Option<u8> {
        match self {
            Self::Off => None,
            Self::Cutoff0 => Some(0),
            Self::Cutoff1 => Some(1),
            Self::Cutoff2 => Some(2),
            Self::Cutoff3 => Some(3),
        }
    }

    /// Decode the `FDS` and `HPCF` fields of `CTRL_REG2_A`
    #[must_use]
    pub const fn from_fields(fds: bool, hpcf: u8) -> Self {
        if !fds {
            return Self::Off;
        }
        match hpcf {
            0 => Self::Cutoff0,
            1 => Self::Cutoff1,
            2 => Self::Cutoff2,
            _ => Self::Cutoff3,
        }
    }
}

/// Cutoff frequency in Hz of the high-pass filter
///
/// `f_cut = -ln(1 - 3 / (25 * 2^c)) * f_odr / (2π)`, which is close to
/// `f_odr / (50 * 2^c)`.
#[must_use]
pub fn high_pass_cutoff_hz(odr_hz: f32, preset_index: u8) -> f32 {
    let scale = 25.0 * libm::powf(2.0, f32::from(preset_index));
    -libm::logf(1.0 - 3.0 / scale) * odr_hz / (2.0 * core::f32::consts::PI)
}

/// High resolution output mode (`HR` bit of `CTRL_REG4_A`)
///
/// With high resolution off the sample keeps its 12-bit layout, the two
/// lowest bits just read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HighResolutionMode {
    /// 12-bit output
    #[default]
    Enabled,
    /// 10-bit output (normal mode) or 8-bit output (low-power mode)
    Disabled,
}

/// Accelerometer sample (12-bit signed counts, right-justified)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelData {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl AccelData {
    /// Decode the six output bytes starting at `OUT_X_L_A`
    ///
    /// Each axis is little-endian (the default byte order of `CTRL_REG4_A`)
    /// and left-justified; the arithmetic shift keeps the sign.
    #[must_use]
    pub const fn from_bytes(buffer: &[u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([buffer[0], buffer[1]]) >> 4,
            y: i16::from_le_bytes([buffer[2], buffer[3]]) >> 4,
            z: i16::from_le_bytes([buffer[4], buffer[5]]) >> 4,
        }
    }
}

/// Accelerometer data in m/s²
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataMs2 {
    /// X-axis acceleration in m/s²
    pub x: f32,
    /// Y-axis acceleration in m/s²
    pub y: f32,
    /// Z-axis acceleration in m/s²
    pub z: f32,
}

impl AccelDataMs2 {
    /// Scale a raw sample by `sensitivity` in (m/s²)/LSB
    #[must_use]
    pub fn from_raw(raw: AccelData, sensitivity: f32) -> Self {
        Self {
            x: f32::from(raw.x) * sensitivity,
            y: f32::from(raw.y) * sensitivity,
            z: f32::from(raw.z) * sensitivity,
        }
    }

    /// Get the magnitude of the acceleration vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

/// Accelerometer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelConfig {
    /// Power mode (applied before the output data rate)
    pub power_mode: PowerMode,
    /// Output data rate
    pub output_data_rate: AccelOutputDataRate,
    /// Full-scale range
    pub full_scale: AccelFullScale,
    /// High resolution output
    pub high_resolution: HighResolutionMode,
    /// High-pass filter
    pub high_pass_filter: HighPassFilterMode,
}

impl AccelConfig {
    /// Whether the output data rate exists in the selected power mode
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self.output_data_rate, AccelOutputDataRate::PowerDown)
            || self.output_data_rate.is_valid_for(self.power_mode)
    }
}
