//! Register definitions for the LSM303DLHC
//!
//! The LSM303DLHC answers on two I2C addresses. Each address has its own
//! register space, so the map is split into an [`accelerometer`] and a
//! [`magnetometer`] device, each generated by `device-driver`.
//!
//! Configuration registers are accessed through the generated typed fields.
//! Output registers are only ever read as bursts and are listed as plain
//! addresses for [`RegisterDevice`](crate::device::RegisterDevice).

/// Accelerometer register map (device address 0x19)
pub mod accelerometer {
    device_driver::create_device!(
        device_name: AccelerometerRegisters,
        dsl: {
            config {
                type RegisterAddressType = u8;
                type DefaultByteOrder = LE;
            }

            /// WHO_AM_I_A - Device ID (0x0F)
            /// Expected value: 0x33
            register WhoAmI {
                const ADDRESS = 0x0F;
                const SIZE_BITS = 8;

                /// Device ID (should read 0x33)
                who_am_i: uint = 0..8,
            },

            /// CTRL_REG1_A - Data rate, power mode and axis enables (0x20)
            register CtrlReg1 {
                const ADDRESS = 0x20;
                const SIZE_BITS = 8;

                /// Zen | Yen | Xen
                xyz_en: uint = 0..3,
                /// LPen - low-power mode
                lpen: bool = 3,
                /// ODR3..ODR0 - output data rate selection
                odr: uint = 4..8,
            },

            /// CTRL_REG2_A - High-pass filter (0x21)
            register CtrlReg2 {
                const ADDRESS = 0x21;
                const SIZE_BITS = 8;

                /// HPIS1 - filter on the AOI function of INT1
                hpis_first: bool = 0,
                /// HPIS2 - filter on the AOI function of INT2
                hpis_second: bool = 1,
                /// HPCLICK - filter on the click function
                hpclick: bool = 2,
                /// FDS - filtered data to the output registers and FIFO
                fds: bool = 3,
                /// HPCF2..HPCF1 - cutoff preset
                hpcf: uint = 4..6,
                /// HPM1..HPM0 - filter mode
                hpm: uint = 6..8,
            },

            /// CTRL_REG3_A - INT1 routing (0x22)
            register CtrlReg3 {
                const ADDRESS = 0x22;
                const SIZE_BITS = 8;

                reserved_0: uint = 0..1,
                /// I1_OVERRUN - FIFO overrun on INT1
                fifo_overrun: bool = 1,
                /// I1_WTM - FIFO watermark on INT1
                fifo_watermark: bool = 2,
                /// I1_DRDY2 - second data ready source on INT1
                drdy_second: bool = 3,
                /// I1_DRDY1 - new data ready on INT1
                drdy_first: bool = 4,
                /// I1_AOI2
                aoi_second: bool = 5,
                /// I1_AOI1
                aoi_first: bool = 6,
                /// I1_CLICK
                click: bool = 7,
            },

            /// CTRL_REG4_A - Full scale, resolution and byte order (0x23)
            register CtrlReg4 {
                const ADDRESS = 0x23;
                const SIZE_BITS = 8;

                /// SIM - SPI mode (unused on this package)
                sim: bool = 0,
                reserved_2_1: uint = 1..3,
                /// HR - high resolution output
                hr: bool = 3,
                /// FS1..FS0 - full scale
                fs: uint = 4..6,
                /// BLE - big-endian output
                ble: bool = 6,
                /// BDU - block data update
                bdu: bool = 7,
            },

            /// CTRL_REG5_A - Reboot, FIFO enable and interrupt latching (0x24)
            register CtrlReg5 {
                const ADDRESS = 0x24;
                const SIZE_BITS = 8;

                /// D4D_INT2
                d4d_int_second: bool = 0,
                /// LIR_INT2
                lir_int_second: bool = 1,
                /// D4D_INT1
                d4d_int_first: bool = 2,
                /// LIR_INT1
                lir_int_first: bool = 3,
                reserved_5_4: uint = 4..6,
                /// FIFO_EN
                fifo_en: bool = 6,
                /// BOOT - reboot memory content (self-clearing)
                boot: bool = 7,
            },

            /// STATUS_REG_A - Data available and overrun flags (0x27)
            register StatusReg {
                const ADDRESS = 0x27;
                const SIZE_BITS = 8;

                /// XDA, YDA, ZDA - per-axis new data
                axis_data_available: uint = 0..3,
                /// ZYXDA - new X, Y and Z data available
                zyxda: bool = 3,
                /// XOR, YOR, ZOR - per-axis overrun
                axis_overrun: uint = 4..7,
                /// ZYXOR - X, Y or Z data overrun
                zyxor: bool = 7,
            },

            /// FIFO_CTRL_REG_A - FIFO mode and watermark (0x2E)
            register FifoCtrlReg {
                const ADDRESS = 0x2E;
                const SIZE_BITS = 8;

                /// FTH4..FTH0 - watermark threshold
                fth: uint = 0..5,
                /// TR - trigger selection
                tr: bool = 5,
                /// FM1..FM0 - FIFO mode (0 = bypass, 1 = FIFO, 2 = stream, 3 = trigger)
                fm: uint = 6..8,
            },

            /// FIFO_SRC_REG_A - FIFO fill level and flags (0x2F)
            register FifoSrcReg {
                const ADDRESS = 0x2F;
                const SIZE_BITS = 8;

                /// FSS4..FSS0 - number of unread samples (saturates at 31)
                fss: uint = 0..5,
                /// EMPTY
                empty: bool = 5,
                /// OVRN_FIFO - FIFO completely filled
                ovrn: bool = 6,
                /// WTM - fill level reached the watermark
                wtm: bool = 7,
            }
        }
    );

    /// WHO_AM_I_A
    pub const WHO_AM_I_A: u8 = 0x0F;
    /// CTRL_REG1_A
    pub const CTRL_REG1_A: u8 = 0x20;
    /// CTRL_REG2_A
    pub const CTRL_REG2_A: u8 = 0x21;
    /// CTRL_REG3_A
    pub const CTRL_REG3_A: u8 = 0x22;
    /// CTRL_REG4_A
    pub const CTRL_REG4_A: u8 = 0x23;
    /// CTRL_REG5_A
    pub const CTRL_REG5_A: u8 = 0x24;
    /// STATUS_REG_A
    pub const STATUS_REG_A: u8 = 0x27;
    /// OUT_X_L_A - First of six output bytes (X, Y, Z; low byte first)
    pub const OUT_X_L_A: u8 = 0x28;
    /// FIFO_CTRL_REG_A
    pub const FIFO_CTRL_REG_A: u8 = 0x2E;
    /// FIFO_SRC_REG_A
    pub const FIFO_SRC_REG_A: u8 = 0x2F;

    /// Sub-address bit requesting register auto-increment on multi-byte reads
    pub const AUTO_INCREMENT: u8 = 0x80;

    /// `FM` value for stream mode
    pub const FIFO_MODE_STREAM: u8 = 0b10;
    /// `FM` value for bypass mode
    pub const FIFO_MODE_BYPASS: u8 = 0b00;
    /// `Zen | Yen | Xen` with every axis enabled
    pub const ALL_AXES: u8 = 0b111;
}

/// Magnetometer register map (device address 0x1E)
///
/// The magnetometer increments the register pointer on its own during
/// multi-byte reads; no sub-address flag is used.
pub mod magnetometer {
    device_driver::create_device!(
        device_name: MagnetometerRegisters,
        dsl: {
            config {
                type RegisterAddressType = u8;
                type DefaultByteOrder = BE;
            }

            /// CRA_REG_M - Temperature sensor enable and data rate (0x00)
            register CraReg {
                const ADDRESS = 0x00;
                const SIZE_BITS = 8;

                reserved_1_0: uint = 0..2,
                /// DO2..DO0 - output data rate, plus bit 5 which must read zero
                data_rate: uint = 2..6,
                reserved_6: uint = 6..7,
                /// TEMP_EN
                temp_en: bool = 7,
            },

            /// CRB_REG_M - Gain (0x01)
            register CrbReg {
                const ADDRESS = 0x01;
                const SIZE_BITS = 8;

                reserved_4_0: uint = 0..5,
                /// GN2..GN0 - gain (000 is not a valid setting)
                gain: uint = 5..8,
            },

            /// MR_REG_M - Operating mode (0x02)
            register ModeReg {
                const ADDRESS = 0x02;
                const SIZE_BITS = 8;

                /// MD1..MD0 - 00 = continuous, 01 = single, 1x = sleep
                md: uint = 0..2,
                reserved_7_2: uint = 2..8,
            },

            /// SR_REG_M - Status (0x09)
            register StatusReg {
                const ADDRESS = 0x09;
                const SIZE_BITS = 8;

                /// DRDY - new data available
                drdy: bool = 0,
                /// LOCK - output registers locked while being read
                lock: bool = 1,
                reserved_7_2: uint = 2..8,
            },

            /// IRA_REG_M - Identification A (0x0A)
            /// Expected value: 0x48
            register IdentA {
                const ADDRESS = 0x0A;
                const SIZE_BITS = 8;

                id: uint = 0..8,
            },

            /// IRB_REG_M - Identification B (0x0B)
            /// Expected value: 0x34
            register IdentB {
                const ADDRESS = 0x0B;
                const SIZE_BITS = 8;

                id: uint = 0..8,
            },

            /// IRC_REG_M - Identification C (0x0C)
            /// Expected value: 0x33
            register IdentC {
                const ADDRESS = 0x0C;
                const SIZE_BITS = 8;

                id: uint = 0..8,
            }
        }
    );

    /// CRA_REG_M
    pub const CRA_REG_M: u8 = 0x00;
    /// CRB_REG_M
    pub const CRB_REG_M: u8 = 0x01;
    /// MR_REG_M
    pub const MR_REG_M: u8 = 0x02;
    /// OUT_X_H_M - First of six output bytes (X, Z, Y; high byte first)
    pub const OUT_X_H_M: u8 = 0x03;
    /// SR_REG_M
    pub const SR_REG_M: u8 = 0x09;
    /// IRA_REG_M
    pub const IRA_REG_M: u8 = 0x0A;
    /// IRB_REG_M
    pub const IRB_REG_M: u8 = 0x0B;
    /// IRC_REG_M
    pub const IRC_REG_M: u8 = 0x0C;
    /// TEMP_OUT_H_M - Temperature high byte, followed by the low byte
    pub const TEMP_OUT_H_M: u8 = 0x31;
}
