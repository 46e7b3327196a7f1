//! Tests for the default implementations of the [`DaqDriver`] trait.

use rstest::*;

use mccdaq::{DaqDriver, DaqError, DigitalPortType, UlRange};

/// A driver that only knows raw analog calls and a fixed calibration.
struct RawOnlyDriver {
    counts: u32,
    written: Option<(usize, u16)>,
}

impl DaqDriver for RawOnlyDriver {
    fn board_num(&self) -> usize {
        3
    }

    fn a_in_32(&mut self, _channel: usize, _range: UlRange) -> Result<u32, DaqError> {
        Ok(self.counts)
    }

    fn to_eng_units_32(&mut self, range: UlRange, counts: u32) -> Result<f64, DaqError> {
        Ok(range.counts_to_volts(counts, 24))
    }

    fn from_eng_units(&mut self, range: UlRange, volts: f64) -> Result<u16, DaqError> {
        Ok(range.volts_to_counts(volts, 16) as u16)
    }

    fn a_out(&mut self, channel: usize, _range: UlRange, counts: u16) -> Result<(), DaqError> {
        self.written = Some((channel, counts));
        Ok(())
    }
}

#[fixture]
fn drv() -> RawOnlyDriver {
    RawOnlyDriver {
        counts: 1 << 23,
        written: None,
    }
}

#[rstest]
fn test_default_v_in_32(mut drv: RawOnlyDriver) {
    // mid scale of a bipolar range is zero volts
    assert_eq!(drv.v_in_32(0, UlRange::Bip20Volts).unwrap(), 0.0);
}

#[rstest]
fn test_default_v_out(mut drv: RawOnlyDriver) {
    drv.v_out(1, UlRange::Bip10Volts, 0.0).unwrap();
    assert_eq!(drv.written, Some((1, 32768)));
}

#[rstest]
fn test_default_release(mut drv: RawOnlyDriver) {
    assert!(drv.release().is_ok());
    assert_eq!(drv.board_num(), 3);
}

#[rstest]
fn test_default_not_supported(mut drv: RawOnlyDriver) {
    assert!(matches!(drv.board_name(), Err(DaqError::NotSupported)));
    assert!(matches!(drv.flash_led(), Err(DaqError::NotSupported)));
    assert!(matches!(
        drv.d_in(DigitalPortType::FirstPortA),
        Err(DaqError::NotSupported)
    ));
    assert!(matches!(drv.c_in_32(0), Err(DaqError::NotSupported)));
    assert!(matches!(
        drv.a_in_scan(0, 1, 2, 10, UlRange::Bip10Volts),
        Err(DaqError::NotSupported)
    ));
}
