//! LSM303DLHC magnetometer and temperature sensor driver
//!
//! [`MagnetometerDriver`] covers the second device on the package
//! (address 0x1E): a 3-axis magnetometer with separate X/Y and Z gains, and
//! an uncalibrated temperature sensor.
//!
//! # Continuous mode erratum
//!
//! After the first read in continuous mode the magnetometer can stop
//! updating its output registers: every later read returns the same sample.
//! Writing continuous mode again restarts it. Use
//! [`retrigger_continuous_mode`](MagnetometerDriver::retrigger_continuous_mode)
//! periodically, or enable
//! [`set_retrigger_before_read`](MagnetometerDriver::set_retrigger_before_read)
//! to issue it before every sample read.

use crate::device::RegisterDevice;
use crate::interrupt::MagStatus;
use crate::power::{MagnetometerMode, TemperatureSensorMode};
use crate::registers::magnetometer::{
    MagnetometerRegisters, CRA_REG_M, CRB_REG_M, IRA_REG_M, IRB_REG_M, IRC_REG_M, OUT_X_H_M,
    TEMP_OUT_H_M,
};
use crate::sensors::magnetometer::{
    temperature_celsius, MagConfig, MagData, MagDataGauss, MagFullScale, MagOutputDataRate,
    TEMPERATURE_SENSITIVITY, TEMPERATURE_ZERO_OFFSET,
};
use crate::sensors::Axis;
use crate::{Error, MAGNETOMETER_IDENTIFICATION};

use device_driver::RegisterInterface;

/// Magnetometer driver
pub struct MagnetometerDriver<I> {
    device: MagnetometerRegisters<I>,
    /// gauss/LSB for X and Y
    xy_sensitivity: f32,
    /// gauss/LSB for Z
    z_sensitivity: f32,
    retrigger_before_read: bool,
}

impl<I> MagnetometerDriver<I> {
    /// Create a new magnetometer driver
    ///
    /// No bus traffic happens here. Call [`init`](Self::init) before use;
    /// until then the cached sensitivities assume ±1.3 gauss.
    pub fn new(interface: I) -> Self {
        let (xy_sensitivity, z_sensitivity) = MagFullScale::Gauss1_3.sensitivity();
        Self {
            device: MagnetometerRegisters::new(interface),
            xy_sensitivity,
            z_sensitivity,
            retrigger_before_read: false,
        }
    }

    /// Release the interface, consuming the driver
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Get the cached sensitivity of `axis` in gauss/LSB
    pub const fn get_sensitivity(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X | Axis::Y => self.xy_sensitivity,
            Axis::Z => self.z_sensitivity,
        }
    }

    /// Get the cached X/Y and Z sensitivities in gauss/LSB
    pub const fn sensitivity(&self) -> (f32, f32) {
        (self.xy_sensitivity, self.z_sensitivity)
    }

    /// Get the temperature sensitivity in °C/LSB
    pub const fn get_temperature_sensor_sensitivity(&self) -> f32 {
        TEMPERATURE_SENSITIVITY
    }

    /// Get the temperature reported for a zero reading, in °C
    pub const fn get_temperature_sensor_zero_offset(&self) -> f32 {
        TEMPERATURE_ZERO_OFFSET
    }

    /// Re-enter continuous mode before every call to
    /// [`read_data_16`](Self::read_data_16) and [`read_data`](Self::read_data)
    ///
    /// Off by default. Costs one extra register write per sample.
    pub fn set_retrigger_before_read(&mut self, enabled: bool) {
        self.retrigger_before_read = enabled;
    }

    /// Raw access to the magnetometer register space
    ///
    /// The magnetometer increments the register pointer on its own, so no
    /// sub-address flag is set for bursts.
    fn raw(&mut self) -> RegisterDevice<'_, I> {
        RegisterDevice::new(&mut self.device.interface, 0)
    }
}

impl<I> MagnetometerDriver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Initialize the magnetometer with default settings
    ///
    /// Checks the three identification registers, then enables the
    /// temperature sensor and selects 15 Hz and ±1.3 gauss. The magnetometer
    /// is left in continuous mode when `start` is true, asleep otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - An identification register holds an unexpected value (`InvalidDevice`)
    pub fn init(&mut self, start: bool) -> Result<(), Error<I::Error>> {
        let [expected_a, expected_b, expected_c] = MAGNETOMETER_IDENTIFICATION;
        check_identification(IRA_REG_M, self.device.ident_a().read()?.id(), expected_a)?;
        check_identification(IRB_REG_M, self.device.ident_b().read()?.id(), expected_b)?;
        check_identification(IRC_REG_M, self.device.ident_c().read()?.id(), expected_c)?;

        self.configure(&MagConfig::default())?;
        self.set_magnetometer_mode(if start {
            MagnetometerMode::Enabled
        } else {
            MagnetometerMode::Disabled
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Magnetometer initialized (start = {})", start);

        Ok(())
    }

    /// Apply a complete configuration
    ///
    /// The operating mode is not part of the configuration and is left as is.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure(&mut self, config: &MagConfig) -> Result<(), Error<I::Error>> {
        self.set_temperature_sensor_mode(config.temperature_sensor)?;
        self.set_output_data_rate(config.output_data_rate)?;
        self.set_full_scale(config.full_scale)
    }

    /// Read a raw register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register(&mut self, address: u8) -> Result<u8, Error<I::Error>> {
        self.raw().read_register(address)
    }

    /// Write a raw register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.raw().write_register(address, value)
    }

    /// Enable or disable the temperature sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_temperature_sensor_mode(
        &mut self,
        mode: TemperatureSensorMode,
    ) -> Result<(), Error<I::Error>> {
        self.device.cra_reg().modify(|w| {
            w.set_temp_en(mode == TemperatureSensorMode::Enabled);
        })?;
        Ok(())
    }

    /// Get the temperature sensor mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_temperature_sensor_mode(
        &mut self,
    ) -> Result<TemperatureSensorMode, Error<I::Error>> {
        let enabled = self.device.cra_reg().read()?.temp_en();
        Ok(if enabled {
            TemperatureSensorMode::Enabled
        } else {
            TemperatureSensorMode::Disabled
        })
    }

    /// Set the output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_output_data_rate(&mut self, odr: MagOutputDataRate) -> Result<(), Error<I::Error>> {
        self.device.cra_reg().modify(|w| {
            w.set_data_rate(odr as u8);
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Magnetometer ODR: {}", odr);

        Ok(())
    }

    /// Get the output data rate
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedRegisterValue` if the reserved bit of the rate field
    /// is set, or an error if communication with the device fails.
    pub fn get_output_data_rate(&mut self) -> Result<MagOutputDataRate, Error<I::Error>> {
        let data_rate = self.device.cra_reg().read()?.data_rate();
        MagOutputDataRate::from_data_rate(data_rate).ok_or(Error::UnexpectedRegisterValue {
            address: CRA_REG_M,
            value: data_rate,
        })
    }

    /// Get the output data rate in Hz
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_output_data_rate_hz(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(self.get_output_data_rate()?.hz())
    }

    /// Set the full-scale range and update the cached sensitivities
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The cached
    /// sensitivities are only updated once the write succeeded.
    pub fn set_full_scale(&mut self, full_scale: MagFullScale) -> Result<(), Error<I::Error>> {
        self.device.crb_reg().modify(|w| {
            w.set_gain(full_scale as u8);
        })?;
        (self.xy_sensitivity, self.z_sensitivity) = full_scale.sensitivity();

        #[cfg(feature = "defmt")]
        defmt::debug!("Magnetometer full scale: {}", full_scale);

        Ok(())
    }

    /// Get the full-scale range
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedRegisterValue` if the gain field is zero, or an
    /// error if communication with the device fails.
    pub fn get_full_scale(&mut self) -> Result<MagFullScale, Error<I::Error>> {
        let gain = self.device.crb_reg().read()?.gain();
        MagFullScale::from_gain(gain).ok_or(Error::UnexpectedRegisterValue {
            address: CRB_REG_M,
            value: gain,
        })
    }

    /// Set the operating mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_magnetometer_mode(&mut self, mode: MagnetometerMode) -> Result<(), Error<I::Error>> {
        self.device.mode_reg().modify(|w| {
            w.set_md(mode.md());
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Magnetometer mode: {}", mode);

        Ok(())
    }

    /// Get the operating mode
    ///
    /// Single-conversion mode reads as enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_magnetometer_mode(&mut self) -> Result<MagnetometerMode, Error<I::Error>> {
        let md = self.device.mode_reg().read()?.md();
        Ok(MagnetometerMode::from_md(md))
    }

    /// Write continuous mode again to restart a stalled magnetometer
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn retrigger_continuous_mode(&mut self) -> Result<(), Error<I::Error>> {
        self.device.mode_reg().modify(|w| {
            w.set_md(MagnetometerMode::Enabled.md());
        })?;
        Ok(())
    }

    /// Read the status register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_status(&mut self) -> Result<MagStatus, Error<I::Error>> {
        let status = self.device.status_reg().read()?;
        Ok(MagStatus {
            data_ready: status.drdy(),
            locked: status.lock(),
        })
    }

    /// Check whether a new sample is available
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn data_ready(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.read_status()?.data_ready)
    }

    /// Read a raw sample
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_data_16(&mut self) -> Result<MagData, Error<I::Error>> {
        if self.retrigger_before_read {
            self.retrigger_continuous_mode()?;
        }

        let mut buffer = [0u8; 6];
        self.raw().read_burst(OUT_X_H_M, &mut buffer)?;
        Ok(MagData::from_bytes(&buffer))
    }

    /// Read a sample in gauss
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_data(&mut self) -> Result<MagDataGauss, Error<I::Error>> {
        let raw = self.read_data_16()?;
        Ok(MagDataGauss::from_raw(
            raw,
            self.xy_sensitivity,
            self.z_sensitivity,
        ))
    }

    /// Read the raw temperature (12-bit signed)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature_16(&mut self) -> Result<i16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.raw().read_burst(TEMP_OUT_H_M, &mut buffer)?;
        Ok(i16::from_be_bytes(buffer) >> 4)
    }

    /// Read the temperature in °C
    ///
    /// The sensor is uncalibrated: expect an offset of a few degrees, use it
    /// for relative changes.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(temperature_celsius(self.read_temperature_16()?))
    }
}

/// Compare one identification register against its expected value
fn check_identification<E>(address: u8, value: u8, expected: u8) -> Result<(), Error<E>> {
    if value == expected {
        return Ok(());
    }

    #[cfg(feature = "defmt")]
    defmt::warn!(
        "Unexpected magnetometer identification at {=u8:#x}: {=u8:#x}",
        address,
        value
    );
    #[cfg(not(feature = "defmt"))]
    let _ = address;

    Err(Error::InvalidDevice(value))
}
