#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod accelerometer;
pub mod device;
pub mod interface;
pub mod magnetometer;
pub mod registers;
pub mod sensors;

pub mod fifo;
pub mod interrupt;
pub mod power;

// Re-export main types
pub use accelerometer::AccelerometerDriver;
pub use device::RegisterDevice;
pub use interface::I2cInterface;
pub use magnetometer::MagnetometerDriver;
pub use sensors::{
    AccelConfig, AccelData, AccelDataMs2, AccelFullScale, AccelOutputDataRate, Axis,
    HighPassFilterMode, HighResolutionMode, MagConfig, MagData, MagDataGauss, MagFullScale,
    MagOutputDataRate, GRAVITY_OF_EARTH,
};

pub use fifo::{FifoMode, FifoStatus, FifoWatermark, FIFO_DEPTH};
pub use interrupt::{AccelStatus, DataReadyInterruptMode, InterruptSource, MagStatus};
pub use power::{MagnetometerMode, PowerMode, TemperatureSensorMode};

/// Accelerometer 7-bit I2C address (0x32 in 8-bit write form)
pub const ACCELEROMETER_ADDRESS: u8 = 0x19;

/// Magnetometer 7-bit I2C address (0x3C in 8-bit write form)
pub const MAGNETOMETER_ADDRESS: u8 = 0x1E;

/// Expected value of the accelerometer `WHO_AM_I_A` register
pub const ACCELEROMETER_DEVICE_ID: u8 = 0x33;

/// Expected values of the magnetometer `IRA_REG_M`, `IRB_REG_M` and `IRC_REG_M` registers
pub const MAGNETOMETER_IDENTIFICATION: [u8; 3] = [0x48, 0x34, 0x33];

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Identification register mismatch (contains the actual value read)
    InvalidDevice(u8),
    /// Initialization sequence did not leave the device in the expected state
    InitializationFailed,
    /// Invalid configuration parameter (e.g. output data rate not available
    /// in the current power mode, or FIFO watermark above 31)
    InvalidConfig,
    /// A register field holds a bit pattern the driver cannot decode
    UnexpectedRegisterValue {
        /// Register address
        address: u8,
        /// Field value that could not be decoded
        value: u8,
    },
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
