//! LSM303DLHC accelerometer driver
//!
//! [`AccelerometerDriver`] maps each configuration setting onto the typed
//! fields of the `CTRL_REGx_A` and `FIFO_CTRL_REG_A` registers and converts
//! raw samples to m/s². The device registers are the single source of truth:
//! every getter reads the hardware. The only cached value is the sensitivity
//! derived from the full scale.
//!
//! # Example
//!
//! ```ignore
//! use lsm303dlhc::{AccelerometerDriver, AccelFullScale, I2cInterface};
//!
//! let mut accel = AccelerometerDriver::new(I2cInterface::accelerometer(&mut i2c));
//! accel.init(true)?;
//! accel.set_full_scale(AccelFullScale::G4)?;
//! let data = accel.read_data()?;
//! ```

use crate::device::RegisterDevice;
use crate::fifo::{FifoMode, FifoStatus, FifoWatermark};
use crate::interrupt::{AccelStatus, DataReadyInterruptMode, InterruptSource, RoutingAction};
use crate::power::PowerMode;
use crate::registers::accelerometer::{
    AccelerometerRegisters, ALL_AXES, AUTO_INCREMENT, CTRL_REG1_A, FIFO_MODE_BYPASS,
    FIFO_MODE_STREAM, OUT_X_L_A,
};
use crate::sensors::accelerometer::{
    high_pass_cutoff_hz, AccelConfig, AccelData, AccelDataMs2, AccelFullScale,
    AccelOutputDataRate, HighPassFilterMode, HighResolutionMode,
};
use crate::{Error, ACCELEROMETER_DEVICE_ID};

use device_driver::RegisterInterface;

/// Rate selected by `init(true)`
const DEFAULT_OUTPUT_DATA_RATE: AccelOutputDataRate = AccelOutputDataRate::Hz25;

/// Accelerometer driver
pub struct AccelerometerDriver<I> {
    device: AccelerometerRegisters<I>,
    /// (m/s²)/LSB for the current full scale
    sensitivity: f32,
}

impl<I> AccelerometerDriver<I> {
    /// Create a new accelerometer driver
    ///
    /// No bus traffic happens here. Call [`init`](Self::init) before use;
    /// until then the cached sensitivity assumes ±2g.
    pub fn new(interface: I) -> Self {
        Self {
            device: AccelerometerRegisters::new(interface),
            sensitivity: AccelFullScale::G2.sensitivity(),
        }
    }

    /// Release the interface, consuming the driver
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Get the cached sensitivity in (m/s²)/LSB
    pub const fn get_sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Raw access to the accelerometer register space
    fn raw(&mut self) -> RegisterDevice<'_, I> {
        RegisterDevice::new(&mut self.device.interface, AUTO_INCREMENT)
    }
}

impl<I> AccelerometerDriver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Initialize the accelerometer with default settings
    ///
    /// Checks `WHO_AM_I_A`, reboots the memory content, then configures:
    /// interrupt routing off, FIFO off with a zero watermark, ±2g, high-pass
    /// filter off, high resolution on, normal power mode. Any latched sample
    /// is discarded. The output data rate is set to 25 Hz when `start` is
    /// true, power-down otherwise.
    ///
    /// Calling `init` again brings the device back to the same state.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - `WHO_AM_I_A` does not read 0x33 (`InvalidDevice`)
    /// - The output data rate does not read back as set (`InitializationFailed`)
    pub fn init(&mut self, start: bool) -> Result<(), Error<I::Error>> {
        let who_am_i = self.device.who_am_i().read()?.who_am_i();
        if who_am_i != ACCELEROMETER_DEVICE_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("Unexpected accelerometer WHO_AM_I: {=u8:#x}", who_am_i);

            return Err(Error::InvalidDevice(who_am_i));
        }

        self.reboot_memory_content()?;
        self.set_data_ready_interrupt_mode(DataReadyInterruptMode::Disabled)?;
        self.set_fifo_mode(FifoMode::Disabled)?;
        self.set_fifo_watermark(0)?;
        self.set_full_scale(AccelFullScale::G2)?;
        self.set_high_pass_filter_mode(HighPassFilterMode::Off)?;
        self.set_high_resolution_output_mode(HighResolutionMode::Enabled)?;
        self.set_power_mode(PowerMode::Normal)?;
        self.clear_data()?;

        let expected = if start {
            DEFAULT_OUTPUT_DATA_RATE
        } else {
            AccelOutputDataRate::PowerDown
        };
        self.set_output_data_rate(expected)?;

        let actual = self.get_output_data_rate()?;
        if actual != expected {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Accelerometer ODR read back as {} (expected {})",
                actual,
                expected
            );

            return Err(Error::InitializationFailed);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Accelerometer initialized (ODR = {})", expected);

        Ok(())
    }

    /// Apply a complete configuration
    ///
    /// Fields are applied in this order: power mode, full scale, resolution,
    /// high-pass filter, output data rate. The configuration is checked
    /// before any register is touched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the output data rate is not available in the
    /// requested power mode, or an error if communication with the device fails.
    pub fn configure(&mut self, config: &AccelConfig) -> Result<(), Error<I::Error>> {
        if !config.is_valid() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Rejected accelerometer configuration: {}", config);

            return Err(Error::InvalidConfig);
        }

        self.set_power_mode(config.power_mode)?;
        self.set_full_scale(config.full_scale)?;
        self.set_high_resolution_output_mode(config.high_resolution)?;
        self.set_high_pass_filter_mode(config.high_pass_filter)?;
        self.set_output_data_rate(config.output_data_rate)
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
    /// Bypasses the driver's bookkeeping; the cached sensitivity is not
    /// updated if `CTRL_REG4_A` is written this way.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.raw().write_register(address, value)
    }

    /// Set the power mode
    ///
    /// The output data rate is not re-validated; set the power mode before
    /// choosing a rate that only exists in that mode.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_power_mode(&mut self, power_mode: PowerMode) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_1().modify(|w| {
            w.set_lpen(power_mode == PowerMode::LowPower);
        })?;
        Ok(())
    }

    /// Get the power mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_power_mode(&mut self) -> Result<PowerMode, Error<I::Error>> {
        let lpen = self.device.ctrl_reg_1().read()?.lpen();
        Ok(PowerMode::from_lpen(lpen))
    }

    /// Set the output data rate
    ///
    /// Does nothing if the rate is already selected. Any rate other than
    /// power-down also enables all three axes. Leaving power-down discards
    /// the stale latched sample.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `odr` is not available in the current power
    /// mode (the register is left untouched), or an error if communication
    /// with the device fails.
    pub fn set_output_data_rate(
        &mut self,
        odr: AccelOutputDataRate,
    ) -> Result<(), Error<I::Error>> {
        let ctrl_reg_1 = self.device.ctrl_reg_1().read()?;
        let power_mode = PowerMode::from_lpen(ctrl_reg_1.lpen());
        let previous = decode_output_data_rate(ctrl_reg_1.odr(), power_mode)?;
        if previous == odr {
            return Ok(());
        }

        if odr == AccelOutputDataRate::PowerDown {
            self.device.ctrl_reg_1().modify(|w| {
                w.set_odr(AccelOutputDataRate::PowerDown.odr());
            })?;
        } else {
            if !odr.is_valid_for(power_mode) {
                #[cfg(feature = "defmt")]
                defmt::warn!("ODR {} is not available in {} mode", odr, power_mode);

                return Err(Error::InvalidConfig);
            }

            if previous == AccelOutputDataRate::PowerDown {
                self.clear_data()?;
            }

            self.device.ctrl_reg_1().modify(|w| {
                w.set_odr(odr.odr());
                w.set_xyz_en(ALL_AXES);
            })?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Accelerometer ODR: {} -> {}", previous, odr);

        Ok(())
    }

    /// Get the output data rate
    ///
    /// `ODR = 9` is shared by two rates; `LPen`, in the same register, tells
    /// them apart.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedRegisterValue` for the unused field values, or an
    /// error if communication with the device fails.
    pub fn get_output_data_rate(&mut self) -> Result<AccelOutputDataRate, Error<I::Error>> {
        let ctrl_reg_1 = self.device.ctrl_reg_1().read()?;
        decode_output_data_rate(ctrl_reg_1.odr(), PowerMode::from_lpen(ctrl_reg_1.lpen()))
    }

    /// Get the output data rate in Hz (0 in power-down)
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the rate
    /// field holds an unused value.
    pub fn get_output_data_rate_hz(&mut self) -> Result<f32, Error<I::Error>> {
        Ok(self.get_output_data_rate()?.hz())
    }

    /// Set the full-scale range and update the cached sensitivity
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The cached
    /// sensitivity is only updated once the write succeeded.
    pub fn set_full_scale(&mut self, full_scale: AccelFullScale) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_4().modify(|w| {
            w.set_fs(full_scale as u8);
        })?;
        self.sensitivity = full_scale.sensitivity();

        #[cfg(feature = "defmt")]
        defmt::debug!("Accelerometer full scale: {}g", full_scale.max_value());

        Ok(())
    }

    /// Get the full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_full_scale(&mut self) -> Result<AccelFullScale, Error<I::Error>> {
        let fs = self.device.ctrl_reg_4().read()?.fs();
        Ok(AccelFullScale::from_fs(fs))
    }

    /// Enable or disable high resolution (12-bit) output
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_high_resolution_output_mode(
        &mut self,
        mode: HighResolutionMode,
    ) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_4().modify(|w| {
            w.set_hr(mode == HighResolutionMode::Enabled);
        })?;
        Ok(())
    }

    /// Get the high resolution output mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_high_resolution_output_mode(
        &mut self,
    ) -> Result<HighResolutionMode, Error<I::Error>> {
        let hr = self.device.ctrl_reg_4().read()?.hr();
        Ok(if hr {
            HighResolutionMode::Enabled
        } else {
            HighResolutionMode::Disabled
        })
    }

    /// Set the high-pass filter mode
    ///
    /// Turning the filter off only clears `FDS`; the cutoff preset stays in
    /// the register.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_high_pass_filter_mode(
        &mut self,
        mode: HighPassFilterMode,
    ) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_2().modify(|w| match mode.preset_index() {
            None => w.set_fds(false),
            Some(index) => {
                w.set_hpcf(index);
                w.set_fds(true);
            }
        })?;
        Ok(())
    }

    /// Get the high-pass filter mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_high_pass_filter_mode(&mut self) -> Result<HighPassFilterMode, Error<I::Error>> {
        let ctrl_reg_2 = self.device.ctrl_reg_2().read()?;
        Ok(HighPassFilterMode::from_fields(
            ctrl_reg_2.fds(),
            ctrl_reg_2.hpcf(),
        ))
    }

    /// Get the high-pass filter cutoff frequency in Hz
    ///
    /// Computed from the current output data rate and the cutoff preset in
    /// `CTRL_REG2_A`, whether or not the filter is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_high_pass_filter_cutoff_frequency(&mut self) -> Result<f32, Error<I::Error>> {
        let preset = self.device.ctrl_reg_2().read()?.hpcf();
        let odr_hz = self.get_output_data_rate_hz()?;
        Ok(high_pass_cutoff_hz(odr_hz, preset))
    }

    /// Enable or disable the FIFO
    ///
    /// Enabling selects stream mode. An enabled interrupt is re-routed to
    /// the matching source afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), Error<I::Error>> {
        match mode {
            FifoMode::Enabled => {
                self.device.fifo_ctrl_reg().modify(|w| {
                    w.set_fm(FIFO_MODE_STREAM);
                })?;
                self.device.ctrl_reg_5().modify(|w| {
                    w.set_fifo_en(true);
                })?;
            }
            FifoMode::Disabled => {
                self.device.ctrl_reg_5().modify(|w| {
                    w.set_fifo_en(false);
                })?;
                self.device.fifo_ctrl_reg().modify(|w| {
                    w.set_fm(FIFO_MODE_BYPASS);
                })?;
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Accelerometer FIFO: {}", mode);

        self.route_interrupt(RoutingAction::Refresh)?;
        Ok(())
    }

    /// Get the FIFO mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_fifo_mode(&mut self) -> Result<FifoMode, Error<I::Error>> {
        let enabled = self.device.ctrl_reg_5().read()?.fifo_en();
        Ok(if enabled {
            FifoMode::Enabled
        } else {
            FifoMode::Disabled
        })
    }

    /// Set the FIFO watermark (0-31 samples)
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `watermark` is above 31 (the register is
    /// left untouched), or an error if communication with the device fails.
    pub fn set_fifo_watermark(&mut self, watermark: u8) -> Result<(), Error<I::Error>> {
        let Ok(watermark) = FifoWatermark::new(watermark) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("Rejected FIFO watermark {=u8}", watermark);

            return Err(Error::InvalidConfig);
        };
        self.device.fifo_ctrl_reg().modify(|w| {
            w.set_fth(watermark.threshold);
        })?;
        Ok(())
    }

    /// Get the FIFO watermark
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_fifo_watermark(&mut self) -> Result<u8, Error<I::Error>> {
        Ok(self.device.fifo_ctrl_reg().read()?.fth())
    }

    /// Discard all samples stored in the FIFO
    ///
    /// The FIFO is flushed by switching to bypass mode and back. Does nothing
    /// if the FIFO is already in bypass mode.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn clear_fifo(&mut self) -> Result<(), Error<I::Error>> {
        let fifo_mode = self.device.fifo_ctrl_reg().read()?.fm();
        if fifo_mode != FIFO_MODE_BYPASS {
            self.device.fifo_ctrl_reg().modify(|w| {
                w.set_fm(FIFO_MODE_BYPASS);
            })?;
            self.device.fifo_ctrl_reg().modify(|w| {
                w.set_fm(fifo_mode);
            })?;
        }
        Ok(())
    }

    /// Read the FIFO fill level and flags
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_fifo_status(&mut self) -> Result<FifoStatus, Error<I::Error>> {
        let fifo_src = self.device.fifo_src_reg().read()?;
        Ok(FifoStatus::from_fields(
            fifo_src.wtm(),
            fifo_src.ovrn(),
            fifo_src.empty(),
            fifo_src.fss(),
        ))
    }

    /// Read up to `buffer.len()` samples from the FIFO
    ///
    /// Reads `min(unread samples, buffer.len())` samples, oldest first, and
    /// returns how many were stored.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. Samples read
    /// before the failure are lost from the FIFO.
    pub fn read_fifo_batch(
        &mut self,
        buffer: &mut [AccelDataMs2],
    ) -> Result<usize, Error<I::Error>> {
        let status = self.read_fifo_status()?;
        let count = usize::from(status.unread_samples).min(buffer.len());

        for slot in &mut buffer[..count] {
            *slot = self.read_data()?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Read {} samples from FIFO", count);

        Ok(count)
    }

    /// Enable or disable the interrupt on INT1
    ///
    /// When enabled, the interrupt fires on new data with the FIFO disabled
    /// and on the FIFO watermark with the FIFO enabled. Enabling discards the
    /// stale latched sample.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_data_ready_interrupt_mode(
        &mut self,
        mode: DataReadyInterruptMode,
    ) -> Result<(), Error<I::Error>> {
        let action = match mode {
            DataReadyInterruptMode::Enabled => RoutingAction::Enable,
            DataReadyInterruptMode::Disabled => RoutingAction::Disable,
        };
        self.route_interrupt(action)?;
        Ok(())
    }

    /// Get the interrupt mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn get_data_ready_interrupt_mode(
        &mut self,
    ) -> Result<DataReadyInterruptMode, Error<I::Error>> {
        self.route_interrupt(RoutingAction::Query)
    }

    /// Get the source currently routed to INT1
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn interrupt_source(&mut self) -> Result<InterruptSource, Error<I::Error>> {
        let ctrl_reg_3 = self.device.ctrl_reg_3().read()?;
        Ok(InterruptSource::from_routing(
            ctrl_reg_3.drdy_first(),
            ctrl_reg_3.drdy_second(),
            ctrl_reg_3.fifo_watermark(),
            ctrl_reg_3.fifo_overrun(),
        ))
    }

    /// Read the status register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_status(&mut self) -> Result<AccelStatus, Error<I::Error>> {
        let status = self.device.status_reg().read()?;
        Ok(AccelStatus {
            data_ready: status.zyxda(),
            overrun: status.zyxor(),
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
    /// All three axes are read in one burst so the sample is coherent.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_data_16(&mut self) -> Result<AccelData, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.raw().read_burst(OUT_X_L_A, &mut buffer)?;
        Ok(AccelData::from_bytes(&buffer))
    }

    /// Read a sample in m/s²
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_data(&mut self) -> Result<AccelDataMs2, Error<I::Error>> {
        let raw = self.read_data_16()?;
        Ok(AccelDataMs2::from_raw(raw, self.sensitivity))
    }

    /// Pulse `BOOT` to reload the trimming parameters
    fn reboot_memory_content(&mut self) -> Result<(), Error<I::Error>> {
        self.device.ctrl_reg_5().modify(|w| {
            w.set_boot(true);
        })?;
        Ok(())
    }

    /// Discard a latched sample, if any
    ///
    /// Output registers keep the last sample across configuration changes;
    /// reading it clears the status flags so the next read returns fresh data.
    fn clear_data(&mut self) -> Result<(), Error<I::Error>> {
        let status = self.device.status_reg().read()?;
        if status.zyxda() || status.axis_data_available() != 0 {
            let mut discard = [0u8; 6];
            self.raw().read_burst(OUT_X_L_A, &mut discard)?;
        }
        Ok(())
    }

    /// Apply `action` to the INT1 routing bits and report the resulting mode
    fn route_interrupt(
        &mut self,
        action: RoutingAction,
    ) -> Result<DataReadyInterruptMode, Error<I::Error>> {
        match action {
            RoutingAction::Disable => {
                self.device.ctrl_reg_3().modify(|w| {
                    w.set_drdy_first(false);
                    w.set_drdy_second(false);
                    w.set_fifo_watermark(false);
                    w.set_fifo_overrun(false);
                })?;
                Ok(DataReadyInterruptMode::Disabled)
            }
            RoutingAction::Enable => {
                let fifo_enabled = self.get_fifo_mode()? == FifoMode::Enabled;
                self.device.ctrl_reg_3().modify(|w| {
                    w.set_drdy_first(!fifo_enabled);
                    w.set_drdy_second(false);
                    w.set_fifo_watermark(fifo_enabled);
                    w.set_fifo_overrun(false);
                })?;
                self.clear_data()?;
                Ok(DataReadyInterruptMode::Enabled)
            }
            RoutingAction::Refresh => match self.route_interrupt(RoutingAction::Query)? {
                DataReadyInterruptMode::Enabled => self.route_interrupt(RoutingAction::Enable),
                DataReadyInterruptMode::Disabled => self.route_interrupt(RoutingAction::Disable),
            },
            RoutingAction::Query => {
                let routed = self.interrupt_source()?;
                Ok(if routed == InterruptSource::None {
                    DataReadyInterruptMode::Disabled
                } else {
                    DataReadyInterruptMode::Enabled
                })
            }
        }
    }
}

/// Decode the `ODR` field for the given power mode
fn decode_output_data_rate<E>(
    odr: u8,
    power_mode: PowerMode,
) -> Result<AccelOutputDataRate, Error<E>> {
    AccelOutputDataRate::from_odr(odr, power_mode).ok_or(Error::UnexpectedRegisterValue {
        address: CTRL_REG1_A,
        value: odr,
    })
}
