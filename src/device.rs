//! Raw register access shared by both sensor drivers
//!
//! Configuration registers go through the typed fields generated in
//! [`registers`](crate::registers). [`RegisterDevice`] covers what those do
//! not: plain byte access by address, masked reads, read-modify-write updates
//! and multi-byte burst reads of the output registers.
//!
//! # Concurrency
//!
//! [`update_register_masked`](RegisterDevice::update_register_masked) is a read
//! followed by a write. It is not atomic on the bus: two callers updating the
//! same register through different handles can lose an update. Callers sharing
//! a device must serialise access themselves.

use crate::Error;
use device_driver::RegisterInterface;

/// Register access helper borrowing the interface of one device
pub struct RegisterDevice<'a, I> {
    interface: &'a mut I,
    auto_increment: u8,
}

impl<'a, I> RegisterDevice<'a, I> {
    /// Create a helper over `interface`
    ///
    /// `auto_increment` is OR-ed into the start address of every burst read.
    /// The accelerometer needs [`AUTO_INCREMENT`](crate::registers::accelerometer::AUTO_INCREMENT)
    /// (0x80); the magnetometer increments on its own and takes 0.
    pub fn new(interface: &'a mut I, auto_increment: u8) -> Self {
        Self {
            interface,
            auto_increment,
        }
    }
}

impl<I> RegisterDevice<'_, I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Read a single register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register(&mut self, address: u8) -> Result<u8, Error<I::Error>> {
        let mut value = [0u8; 1];
        self.interface.read_register(address, 8, &mut value)?;
        Ok(value[0])
    }

    /// Write a single register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.interface.write_register(address, 8, &[value])?;
        Ok(())
    }

    /// Read a register and keep only the bits selected by `mask`
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register_masked(&mut self, address: u8, mask: u8) -> Result<u8, Error<I::Error>> {
        Ok(self.read_register(address)? & mask)
    }

    /// Update the bits selected by `mask` to the corresponding bits of `value`
    ///
    /// Bits outside `mask` keep their current value. Bits of `value` outside
    /// `mask` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. If the read
    /// succeeds and the write fails, the register is left unchanged.
    pub fn update_register_masked(
        &mut self,
        address: u8,
        value: u8,
        mask: u8,
    ) -> Result<(), Error<I::Error>> {
        let current = self.read_register(address)?;
        let updated = (current & !mask) | (value & mask);
        self.write_register(address, updated)
    }

    /// Read `buffer.len()` consecutive registers starting at `address` in one transaction
    ///
    /// A single transaction is what keeps a multi-axis sample coherent: the
    /// device does not update output registers in the middle of a burst.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_burst(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Error<I::Error>> {
        // Bursts are at most a handful of bytes
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (buffer.len() * 8) as u32;
        self.interface
            .read_register(address | self.auto_increment, size_bits, buffer)?;
        Ok(())
    }
}
