//! The `DaqDriver` trait that every board backend implements.

use crate::{
    AnalogInputMode, ChannelSetting, DaqError, DigitalPortType, TInOptions, TempScale, UlRange,
};

/// The `DaqDriver` trait defines the calls a board backend provides.
///
/// One driver value talks to exactly one board, the board number it was assigned to is returned
/// by [`DaqDriver::board_num`]. All calls block until the driver returns.
///
/// Only the board number is required. All other calls default to returning
/// [`DaqError::NotSupported`], such that a backend for a board without, e.g., analog outputs
/// does not have to implement them. [`DaqDriver::v_in_32`] and [`DaqDriver::v_out`] have default
/// implementations that are composed of the raw calls and the conversion functions.
pub trait DaqDriver {
    /// The board number this driver talks to.
    fn board_num(&self) -> usize;

    /// Get the name of the board, e.g., `"USB-2416"`.
    fn board_name(&mut self) -> Result<String, DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Flash the LED of the board to identify it.
    fn flash_led(&mut self) -> Result<(), DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Apply a configuration item to an analog input channel.
    ///
    /// # Arguments
    /// * `_channel` - The analog input channel.
    /// * `_setting` - The setting to apply.
    fn set_config(&mut self, _channel: usize, _setting: ChannelSetting) -> Result<(), DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Set the input mode of an analog input channel.
    fn a_chan_input_mode(
        &mut self,
        _channel: usize,
        _mode: AnalogInputMode,
    ) -> Result<(), DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Read one raw sample of an analog input channel.
    fn a_in_32(&mut self, _channel: usize, _range: UlRange) -> Result<u32, DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Convert raw analog input counts into volts with the board's calibration.
    fn to_eng_units_32(&mut self, _range: UlRange, _counts: u32) -> Result<f64, DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Read one sample of an analog input channel in volts.
    ///
    /// By default, this reads the raw counts and converts them using the board's calibration.
    fn v_in_32(&mut self, channel: usize, range: UlRange) -> Result<f64, DaqError> {
        let counts = self.a_in_32(channel, range)?;
        self.to_eng_units_32(range, counts)
    }

    /// Read a thermocouple channel.
    ///
    /// # Arguments
    /// * `_channel` - The thermocouple channel.
    /// * `_scale` - The scale to report the temperature in.
    /// * `_options` - Filtering options.
    fn t_in(
        &mut self,
        _channel: usize,
        _scale: TempScale,
        _options: TInOptions,
    ) -> Result<f64, DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Convert volts into raw analog output counts with the board's calibration.
    fn from_eng_units(&mut self, _range: UlRange, _volts: f64) -> Result<u16, DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Convert raw analog output counts into volts with the board's calibration.
    fn to_eng_units(&mut self, _range: UlRange, _counts: u16) -> Result<f64, DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Write raw counts to an analog output channel.
    fn a_out(&mut self, _channel: usize, _range: UlRange, _counts: u16) -> Result<(), DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Write a voltage to an analog output channel.
    ///
    /// By default, this converts the voltage into counts and writes them.
    fn v_out(&mut self, channel: usize, range: UlRange, volts: f64) -> Result<(), DaqError> {
        let counts = self.from_eng_units(range, volts)?;
        self.a_out(channel, range, counts)
    }

    /// Read the value of a digital port.
    fn d_in(&mut self, _port: DigitalPortType) -> Result<u16, DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Write a value to a digital port.
    fn d_out(&mut self, _port: DigitalPortType, _value: u16) -> Result<(), DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Write a single bit of a digital port.
    fn d_bit_out(
        &mut self,
        _port: DigitalPortType,
        _bit: usize,
        _value: bool,
    ) -> Result<(), DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Reset a counter to zero.
    fn c_clear(&mut self, _counter: usize) -> Result<(), DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Read the value of a counter.
    fn c_in_32(&mut self, _counter: usize) -> Result<u32, DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Run a blocking scan over consecutive analog input channels and return scaled data.
    ///
    /// Data is returned interleaved, i.e., first one sample of every channel, then the next one,
    /// and so on. Voltage channels are scaled to volts, thermocouple channels to their configured
    /// temperature scale.
    ///
    /// # Arguments
    /// * `_low_chan` - First channel of the scan.
    /// * `_high_chan` - Last channel of the scan (inclusive).
    /// * `_count` - Total number of samples, must be a multiple of the number of channels.
    /// * `_rate` - Per-channel scan rate in Hz.
    /// * `_range` - Range of the voltage channels.
    fn a_in_scan(
        &mut self,
        _low_chan: usize,
        _high_chan: usize,
        _count: usize,
        _rate: u32,
        _range: UlRange,
    ) -> Result<Vec<f64>, DaqError> {
        Err(DaqError::NotSupported)
    }

    /// Hand the board back to the driver.
    fn release(&mut self) -> Result<(), DaqError> {
        Ok(())
    }
}
