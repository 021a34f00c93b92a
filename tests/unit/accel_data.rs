//! Unit tests for accelerometer sample decoding and conversion

use crate::common::{assert_float_eq, create_mock_accelerometer};
use lsm303dlhc::registers::accelerometer::{OUT_X_L_A, STATUS_REG_A};
use lsm303dlhc::{AccelData, AccelFullScale, HighResolutionMode, GRAVITY_OF_EARTH};

#[test]
fn test_read_data_16_decodes_axes() {
    let (mut accel, interface) = create_mock_accelerometer();
    interface.set_accel_data(100, -200, 1000);

    let data = accel.read_data_16().unwrap();
    assert_eq!(data, AccelData { x: 100, y: -200, z: 1000 });
}

#[test]
fn test_read_data_16_range_limits() {
    let (mut accel, interface) = create_mock_accelerometer();
    interface.set_accel_data(2047, -2048, -1);

    let data = accel.read_data_16().unwrap();
    assert_eq!(data.x, 2047);
    assert_eq!(data.y, -2048);
    assert_eq!(data.z, -1);
}

#[test]
fn test_read_data_uses_single_burst() {
    let (mut accel, interface) = create_mock_accelerometer();
    interface.set_accel_data(1, 2, 3);

    accel.read_data().unwrap();
    assert_eq!(interface.burst_read_count(), 1);
    assert_eq!(interface.operations().len(), 1);
}

#[test]
fn test_gravity_magnitude_across_full_scales() {
    let (mut accel, interface) = create_mock_accelerometer();

    // Raw counts of a device lying flat at each range
    for (fs, raw_z) in [
        (AccelFullScale::G2, 1000),
        (AccelFullScale::G4, 500),
        (AccelFullScale::G8, 250),
        (AccelFullScale::G16, 83),
    ] {
        accel.set_full_scale(fs).unwrap();
        assert_eq!(accel.get_full_scale().unwrap(), fs);

        interface.set_accel_data(0, 0, raw_z);
        let data = accel.read_data().unwrap();
        assert_float_eq(data.magnitude(), GRAVITY_OF_EARTH, 0.05);
    }
}

#[test]
fn test_gravity_magnitude_tilted() {
    let (mut accel, interface) = create_mock_accelerometer();

    // 1 g split across all three axes: 577 mg each
    interface.set_accel_data(577, -577, 577);
    let data = accel.read_data().unwrap();
    assert_float_eq(data.magnitude(), GRAVITY_OF_EARTH, 0.02);
    assert!(data.x > 0.0 && data.y < 0.0 && data.z > 0.0);
}

#[test]
fn test_low_resolution_samples_keep_scale() {
    let (mut accel, interface) = create_mock_accelerometer();
    accel
        .set_high_resolution_output_mode(HighResolutionMode::Disabled)
        .unwrap();

    // 10-bit output: bits 5:4 of the low byte read as zero
    interface.set_register(OUT_X_L_A, 0xC0);
    interface.set_register(OUT_X_L_A + 1, 0x3E);
    let data = accel.read_data_16().unwrap();
    assert_eq!(data.x, 0x3EC);
    assert_eq!(data.x & 0x03, 0);
}

#[test]
fn test_sample_sequence() {
    let (mut accel, interface) = create_mock_accelerometer();
    interface.set_sample_sequence(vec![[10, 20, 30], [-10, -20, -30]]);

    assert_eq!(accel.read_data_16().unwrap(), AccelData { x: 10, y: 20, z: 30 });
    assert_eq!(
        accel.read_data_16().unwrap(),
        AccelData { x: -10, y: -20, z: -30 }
    );
    assert_eq!(accel.read_data_16().unwrap(), AccelData { x: 10, y: 20, z: 30 });
}

#[test]
fn test_status_flags() {
    let (mut accel, interface) = create_mock_accelerometer();

    interface.set_register(STATUS_REG_A, 0x00);
    assert!(!accel.data_ready().unwrap());

    interface.set_register(STATUS_REG_A, 0x88);
    let status = accel.read_status().unwrap();
    assert!(status.data_ready);
    assert!(status.overrun);

    // Reading the sample clears the flags
    accel.read_data().unwrap();
    assert!(!accel.data_ready().unwrap());
}
