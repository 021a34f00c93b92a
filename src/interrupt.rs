//! Interrupt routing and status flags
//!
//! The accelerometer drives INT1 from one of two sources, chosen from the
//! FIFO state rather than by the caller:
//! - FIFO disabled: new data ready (`I1_DRDY1`)
//! - FIFO enabled: FIFO watermark reached (`I1_WTM`)
//!
//! Changing the FIFO mode re-routes an enabled interrupt automatically.
//!
//! Reading samples from an interrupt handler is not supported: burst reads
//! are not safe in that context on most I2C implementations. Signal a task
//! or event queue from the handler and read from there.
//!
//! # Example
//!
//! ```ignore
//! # use lsm303dlhc::{AccelerometerDriver, DataReadyInterruptMode, InterruptSource};
//! # let mut accel: AccelerometerDriver<_> = todo!();
//! accel.set_data_ready_interrupt_mode(DataReadyInterruptMode::Enabled)?;
//! assert_eq!(accel.interrupt_source()?, InterruptSource::DataReady);
//! # Ok::<(), lsm303dlhc::Error<()>>(())
//! ```

/// Data-ready interrupt mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataReadyInterruptMode {
    /// INT1 routed to data ready or FIFO watermark
    Enabled,
    /// No INT1 source routed
    #[default]
    Disabled,
}

/// Source currently routed to INT1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptSource {
    /// Nothing routed
    None,
    /// New sample available
    DataReady,
    /// FIFO fill level reached the watermark
    FifoWatermark,
    /// A combination of routing bits this driver never sets on its own
    Other,
}

impl InterruptSource {
    /// Decode the `I1_DRDY1`, `I1_DRDY2`, `I1_WTM` and `I1_OVERRUN` fields
    #[must_use]
    pub const fn from_routing(
        drdy_first: bool,
        drdy_second: bool,
        watermark: bool,
        overrun: bool,
    ) -> Self {
        match (drdy_first, drdy_second, watermark, overrun) {
            (false, false, false, false) => Self::None,
            (true, false, false, false) => Self::DataReady,
            (false, false, true, false) => Self::FifoWatermark,
            _ => Self::Other,
        }
    }
}

/// Operation on the INT1 routing shared by the interrupt mode accessors
/// and the FIFO mode setter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoutingAction {
    /// Clear all routing bits
    Disable,
    /// Route data ready or watermark depending on the FIFO mode
    Enable,
    /// Re-derive the routing after a FIFO mode change
    Refresh,
    /// Report whether anything is routed
    Query,
}

/// Accelerometer status (`STATUS_REG_A`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelStatus {
    /// New X, Y and Z sample available
    pub data_ready: bool,
    /// A sample was overwritten before being read
    pub overrun: bool,
}

/// Magnetometer status (`SR_REG_M`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagStatus {
    /// New sample available
    pub data_ready: bool,
    /// Output registers locked while a read is in progress
    pub locked: bool,
}
