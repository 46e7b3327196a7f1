//! Defaults that the accessor operations use for ranges, modes, and rates.

use mccdaq::{AnalogInputMode, DaqError, TcType, TempScale, UlRange};
use measurements::Frequency;

/// Highest data rate of the USB-2400 series in Hz.
pub(crate) const MAX_DATA_RATE: u32 = 3750;

/// Configuration of the accessor operations of a [`crate::Usb2416`].
///
/// The defaults are the settings that work well for slow, low-noise acquisition: The ±20 V input
/// range, differential inputs at 60 Hz, the ±10 V output range, and type K thermocouples read in
/// degrees Celsius.
///
/// ```
/// use mccdaq::{TcType, UlRange};
/// use usb_2416::AcquisitionConfig;
///
/// let config = AcquisitionConfig::default()
///     .with_input_range(UlRange::Bip10Volts)
///     .with_tc_type(TcType::J);
/// assert_eq!(config.input_range, UlRange::Bip10Volts);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcquisitionConfig {
    /// Range for analog input reads.
    pub input_range: UlRange,
    /// Range for analog output writes.
    pub output_range: UlRange,
    /// Input mode that analog inputs are configured with.
    pub input_mode: AnalogInputMode,
    /// Data rate that inputs are configured with.
    pub data_rate: Frequency,
    /// Thermocouple type that thermocouple inputs are configured with.
    pub tc_type: TcType,
    /// Temperature scale that thermocouples are configured with and read in.
    pub temp_scale: TempScale,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        AcquisitionConfig {
            input_range: UlRange::Bip20Volts,
            output_range: UlRange::Bip10Volts,
            input_mode: AnalogInputMode::Differential,
            data_rate: Frequency::from_hertz(60.0),
            tc_type: TcType::K,
            temp_scale: TempScale::Celsius,
        }
    }
}

impl AcquisitionConfig {
    /// Set the range for analog input reads.
    pub fn with_input_range(mut self, range: UlRange) -> Self {
        self.input_range = range;
        self
    }

    /// Set the range for analog output writes.
    pub fn with_output_range(mut self, range: UlRange) -> Self {
        self.output_range = range;
        self
    }

    /// Set the input mode for analog inputs.
    pub fn with_input_mode(mut self, mode: AnalogInputMode) -> Self {
        self.input_mode = mode;
        self
    }

    /// Set the data rate for inputs.
    pub fn with_data_rate(mut self, rate: Frequency) -> Self {
        self.data_rate = rate;
        self
    }

    /// Set the thermocouple type.
    pub fn with_tc_type(mut self, tc_type: TcType) -> Self {
        self.tc_type = tc_type;
        self
    }

    /// Set the temperature scale for thermocouples.
    pub fn with_temp_scale(mut self, scale: TempScale) -> Self {
        self.temp_scale = scale;
        self
    }
}

/// Convert a data rate into the integer Hz value the driver takes.
///
/// The rate is rounded to the nearest Hz and must be between 1 Hz and the maximum data rate.
pub(crate) fn data_rate_hz(rate: Frequency) -> Result<u32, DaqError> {
    let hz = rate.as_hertz().round();
    if !(1.0..=f64::from(MAX_DATA_RATE)).contains(&hz) {
        return Err(DaqError::IntValueOutOfRange {
            // saturating cast, NaN ends up as 0
            value: hz as i64,
            min: 1,
            max: i64::from(MAX_DATA_RATE),
        });
    }
    Ok(hz as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use measurements::test_utils::almost_eq;
    use rstest::*;

    #[rstest]
    #[case(60.0, 60)]
    #[case(1000.4, 1000)]
    #[case(3750.0, 3750)]
    #[case(0.6, 1)]
    fn test_data_rate_hz(#[case] hz: f64, #[case] exp: u32) {
        assert_eq!(data_rate_hz(Frequency::from_hertz(hz)).unwrap(), exp);
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.4)]
    #[case(3751.0)]
    #[case(-60.0)]
    #[case(f64::NAN)]
    fn test_data_rate_hz_out_of_range(#[case] hz: f64) {
        assert!(matches!(
            data_rate_hz(Frequency::from_hertz(hz)),
            Err(DaqError::IntValueOutOfRange { min: 1, max: 3750, .. })
        ));
    }

    #[rstest]
    fn test_default_config() {
        let config = AcquisitionConfig::default();
        assert_eq!(config.input_range, UlRange::Bip20Volts);
        assert_eq!(config.output_range, UlRange::Bip10Volts);
        assert_eq!(config.input_mode, AnalogInputMode::Differential);
        assert!(almost_eq(config.data_rate.as_hertz(), 60.0));
        assert_eq!(config.tc_type, TcType::K);
        assert_eq!(config.temp_scale, TempScale::Celsius);
    }
}
