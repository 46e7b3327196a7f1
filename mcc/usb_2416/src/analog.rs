//! Analog input and output channels.

use std::sync::{Arc, Mutex};

use log::debug;
use mccdaq::{AiChanType, AnalogInputMode, ChannelSetting, DaqDriver, DaqError, UlRange};
use measurements::{Frequency, Voltage};

use crate::{config::data_rate_hz, lock};

/// Number of samples that are averaged for one averaged reading.
pub const SAMPLES_PER_READ: usize = 5;

/// Analog input channel of a USB-2400 series board.
///
/// **This structure can only be created through the [`crate::Usb2416`] struct.**
pub struct AnalogInput<T: DaqDriver> {
    idx: usize,
    range: UlRange,
    interface: Arc<Mutex<T>>,
}

impl<T: DaqDriver> AnalogInput<T> {
    /// Get a new analog input for the given driver.
    pub(crate) fn new(idx: usize, range: UlRange, interface: Arc<Mutex<T>>) -> Self {
        AnalogInput {
            idx,
            range,
            interface,
        }
    }

    /// Index of this channel.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Configure this channel as a voltage input.
    ///
    /// This sets the channel type to voltage, the input mode, and the data rate, in that order.
    ///
    /// # Arguments
    /// * `rate` - Data rate, rounded to full Hz. Must be between 1 Hz and 3750 Hz.
    /// * `mode` - Single-ended or differential input.
    pub fn configure(&mut self, rate: Frequency, mode: AnalogInputMode) -> Result<(), DaqError> {
        let hz = data_rate_hz(rate)?;
        debug!(
            "Configuring AIn{} as {mode:?} voltage input at {hz} Hz",
            self.idx
        );
        let mut intf = lock(&self.interface);
        intf.set_config(self.idx, ChannelSetting::ChanType(AiChanType::Voltage))?;
        intf.a_chan_input_mode(self.idx, mode)?;
        intf.set_config(self.idx, ChannelSetting::DataRate(hz))
    }

    /// Read one raw sample of this channel in counts.
    pub fn read_counts(&mut self) -> Result<u32, DaqError> {
        lock(&self.interface).a_in_32(self.idx, self.range)
    }

    /// Read one sample of this channel as a voltage.
    pub fn read_voltage(&mut self) -> Result<Voltage, DaqError> {
        let volts = lock(&self.interface).v_in_32(self.idx, self.range)?;
        Ok(Voltage::from_volts(volts))
    }

    /// Read the average voltage of this channel.
    ///
    /// Takes [`SAMPLES_PER_READ`] raw samples, converts each of them to volts with the board's
    /// calibration, and returns their arithmetic mean.
    pub fn read_averaged(&mut self) -> Result<Voltage, DaqError> {
        let mut intf = lock(&self.interface);
        let mut sum = 0.0;
        for _ in 0..SAMPLES_PER_READ {
            let counts = intf.a_in_32(self.idx, self.range)?;
            sum += intf.to_eng_units_32(self.range, counts)?;
        }
        let mean = sum / SAMPLES_PER_READ as f64;
        debug!("AIn{} averaged {mean} V", self.idx);
        Ok(Voltage::from_volts(mean))
    }
}

impl<T: DaqDriver> Clone for AnalogInput<T> {
    fn clone(&self) -> Self {
        Self {
            idx: self.idx,
            range: self.range,
            interface: Arc::clone(&self.interface),
        }
    }
}

/// Analog output channel of a USB-2400 series board with analog outputs.
///
/// **This structure can only be created through the [`crate::Usb2416`] struct.**
pub struct AnalogOutput<T: DaqDriver> {
    idx: usize,
    range: UlRange,
    interface: Arc<Mutex<T>>,
}

impl<T: DaqDriver> AnalogOutput<T> {
    /// Get a new analog output for the given driver.
    pub(crate) fn new(idx: usize, range: UlRange, interface: Arc<Mutex<T>>) -> Self {
        AnalogOutput {
            idx,
            range,
            interface,
        }
    }

    /// Index of this channel.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Set the output to a voltage.
    ///
    /// The voltage is converted to counts with the board's calibration and the counts are
    /// written to the channel. There is no read-back. Returns the counts that were written.
    ///
    /// Finite values outside the range are clipped to the range. A value that is not finite is
    /// rejected with [`DaqError::FloatValueOutOfRange`] and nothing is written.
    pub fn set_voltage(&mut self, value: Voltage) -> Result<u16, DaqError> {
        let volts = value.as_volts();
        if !volts.is_finite() {
            return Err(DaqError::FloatValueOutOfRange {
                value: volts,
                min: self.range.low(),
                max: self.range.high(),
            });
        }
        let mut intf = lock(&self.interface);
        let counts = intf.from_eng_units(self.range, volts)?;
        debug!("Setting AOut{} to {value} as {counts} counts", self.idx);
        intf.a_out(self.idx, self.range, counts)?;
        Ok(counts)
    }

    /// Write raw counts to the output.
    pub fn set_counts(&mut self, counts: u16) -> Result<(), DaqError> {
        lock(&self.interface).a_out(self.idx, self.range, counts)
    }

    /// Set the output to zero volts.
    pub fn set_zero(&mut self) -> Result<(), DaqError> {
        debug!("Setting AOut{} to 0 V", self.idx);
        lock(&self.interface).v_out(self.idx, self.range, 0.0)
    }
}

impl<T: DaqDriver> Clone for AnalogOutput<T> {
    fn clone(&self) -> Self {
        Self {
            idx: self.idx,
            range: self.range,
            interface: Arc::clone(&self.interface),
        }
    }
}
