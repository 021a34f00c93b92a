//! Bus interface implementation for the LSM303DLHC
//!
//! This module implements the `device-driver` [`RegisterInterface`] trait over
//! an `embedded-hal` I2C bus. The LSM303DLHC has no SPI port.
//!
//! # Bus ownership
//!
//! [`I2cInterface`] owns whatever it is given. Pass `&mut i2c` to lend a bus
//! that the caller keeps using afterwards (`embedded-hal` implements `I2c` for
//! `&mut T`), pass the bus by value to hand it over, or pass an
//! `embedded-hal-bus` device to share one bus between the accelerometer and
//! the magnetometer. [`I2cInterface::release`] gives the bus back.

use crate::{ACCELEROMETER_ADDRESS, MAGNETOMETER_ADDRESS};

use device_driver::RegisterInterface;
use embedded_hal::i2c::Operation;

/// Longest payload sent as a single buffered `write` (sub-address excluded)
///
/// Every configuration register on the chip is one byte wide; longer payloads
/// go out as a two-part transaction instead.
const BUFFERED_WRITE_LEN: usize = 8;

/// I2C interface for one of the two LSM303DLHC devices
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create an I2C interface for the accelerometer (0x19)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::accelerometer(i2c);
    /// let mut accel = AccelerometerDriver::new(interface);
    /// ```
    pub const fn accelerometer(i2c: I2C) -> Self {
        Self {
            i2c,
            address: ACCELEROMETER_ADDRESS,
        }
    }

    /// Create an I2C interface for the magnetometer (0x1E)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::magnetometer(i2c);
    /// let mut mag = MagnetometerDriver::new(interface);
    /// ```
    pub const fn magnetometer(i2c: I2C) -> Self {
        Self {
            i2c,
            address: MAGNETOMETER_ADDRESS,
        }
    }

    /// Create a new I2C interface with a custom 7-bit device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit device address used for every transaction
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    /// Sub-address write, repeated start, then `read_data.len()` bytes
    ///
    /// The accelerometer only advances its register pointer when the
    /// sub-address carries the auto-increment flag. The flag is part of
    /// `address` here; [`RegisterDevice::read_burst`] sets it, this transport
    /// never does.
    ///
    /// [`RegisterDevice::read_burst`]: crate::RegisterDevice::read_burst
    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(self.address, &[address], read_data)
    }

    /// Sub-address followed by the whole payload in one write
    ///
    /// Short payloads are copied behind the sub-address and sent with a
    /// single `write`. Longer ones are sent as two write operations of one
    /// transaction, which `embedded-hal` merges on the wire, so nothing is
    /// ever cut off.
    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        if write_data.len() > BUFFERED_WRITE_LEN {
            return self.i2c.transaction(
                self.address,
                &mut [Operation::Write(&[address]), Operation::Write(write_data)],
            );
        }

        let mut buffer = [0u8; BUFFERED_WRITE_LEN + 1];
        buffer[0] = address;
        buffer[1..=write_data.len()].copy_from_slice(write_data);
        self.i2c.write(self.address, &buffer[..=write_data.len()])
    }
}
