//! Accelerometer FIFO buffer management
//!
//! The accelerometer has a 32-sample FIFO. The driver runs it in stream
//! mode: once full, the oldest sample is overwritten. Combined with the
//! watermark interrupt this lets the host read samples in batches instead of
//! one at a time.
//!
//! # Example
//!
//! ```ignore
//! # use lsm303dlhc::{AccelerometerDriver, AccelOutputDataRate, DataReadyInterruptMode, FifoMode};
//! # let mut accel: AccelerometerDriver<_> = todo!();
//! accel.set_output_data_rate(AccelOutputDataRate::Hz10)?;
//! accel.set_fifo_mode(FifoMode::Enabled)?;
//! accel.set_fifo_watermark(10)?;
//! // INT1 now fires on the watermark instead of on every sample
//! accel.set_data_ready_interrupt_mode(DataReadyInterruptMode::Enabled)?;
//!
//! // Later, outside interrupt context
//! let mut batch = [Default::default(); 10];
//! let count = accel.read_fifo_batch(&mut batch)?;
//! # Ok::<(), lsm303dlhc::Error<()>>(())
//! ```

use crate::Error;

/// FIFO capacity in samples
pub const FIFO_DEPTH: u8 = 32;

/// FIFO mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
    /// FIFO bypassed, output registers hold the latest sample
    #[default]
    Disabled,
    /// Stream mode - oldest sample is dropped when the FIFO is full
    Enabled,
}

/// Watermark level for the FIFO interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoWatermark {
    /// Watermark threshold in samples (0-31)
    pub threshold: u8,
}

impl FifoWatermark {
    /// Create a new watermark configuration
    ///
    /// # Arguments
    /// * `threshold` - Number of samples that trigger the watermark interrupt (0-31)
    ///
    /// # Errors
    /// Returns `InvalidConfig` if threshold does not fit the 5-bit `FTH` field
    pub const fn new(threshold: u8) -> Result<Self, Error<()>> {
        if threshold >= FIFO_DEPTH {
            return Err(Error::InvalidConfig);
        }
        Ok(Self { threshold })
    }
}

/// FIFO fill level and flags (`FIFO_SRC_REG_A`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoStatus {
    /// Fill level reached the watermark
    pub watermark_reached: bool,
    /// FIFO completely filled, next sample overwrites the oldest one
    pub overrun: bool,
    /// No unread samples
    pub empty: bool,
    /// Number of unread samples (0-32)
    pub unread_samples: u8,
}

impl FifoStatus {
    /// Build the status from the `WTM`, `OVRN_FIFO`, `EMPTY` and `FSS` fields
    ///
    /// `FSS` only counts to 31; a full FIFO is flagged by the overrun bit.
    #[must_use]
    pub const fn from_fields(wtm: bool, ovrn: bool, empty: bool, fss: u8) -> Self {
        Self {
            watermark_reached: wtm,
            overrun: ovrn,
            empty,
            unread_samples: if ovrn { FIFO_DEPTH } else { fss },
        }
    }
}
