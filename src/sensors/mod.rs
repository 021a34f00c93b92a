//! Sensor modules for the LSM303DLHC
//!
//! This module provides types, enums, and configuration structures for each sensor
//! in the LSM303DLHC:
//! - Accelerometer (3-axis, device address 0x19)
//! - Magnetometer (3-axis, device address 0x1E) with its temperature sensor
//!
//! Operations are performed through [`AccelerometerDriver`](crate::AccelerometerDriver)
//! and [`MagnetometerDriver`](crate::MagnetometerDriver).

pub mod accelerometer;
pub mod magnetometer;

// Re-export main types
pub use accelerometer::{
    high_pass_cutoff_hz, AccelConfig, AccelData, AccelDataMs2, AccelFullScale,
    AccelOutputDataRate, HighPassFilterMode, HighResolutionMode, GRAVITY_OF_EARTH,
};
pub use magnetometer::{
    temperature_celsius, MagConfig, MagData, MagDataGauss, MagFullScale, MagOutputDataRate,
    TEMPERATURE_SENSITIVITY, TEMPERATURE_ZERO_OFFSET,
};

/// Sensor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}
