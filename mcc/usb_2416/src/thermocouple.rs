//! Thermocouple inputs.

use std::sync::{Arc, Mutex};

use log::debug;
use mccdaq::{AiChanType, ChannelSetting, DaqDriver, DaqError, TInOptions, TcType, TempScale};
use measurements::{Frequency, Temperature};

use crate::{config::data_rate_hz, lock};

/// An analog input of a USB-2400 series board that is used with a thermocouple.
///
/// **This structure can only be created through the [`crate::Usb2416`] struct.**
pub struct ThermocoupleInput<T: DaqDriver> {
    idx: usize,
    scale: TempScale,
    interface: Arc<Mutex<T>>,
}

impl<T: DaqDriver> ThermocoupleInput<T> {
    /// Get a new thermocouple input for the given driver.
    pub(crate) fn new(idx: usize, scale: TempScale, interface: Arc<Mutex<T>>) -> Self {
        ThermocoupleInput {
            idx,
            scale,
            interface,
        }
    }

    /// Index of this channel.
    pub fn index(&self) -> usize {
        self.idx
    }

    /// Configure this channel as a thermocouple input.
    ///
    /// This sets the channel type to thermocouple, the thermocouple type, the temperature scale,
    /// and the data rate, in that order. Thermocouples are usually read at 60 Hz or slower to
    /// suppress line noise.
    ///
    /// # Arguments
    /// * `rate` - Data rate, rounded to full Hz. Must be between 1 Hz and 3750 Hz.
    /// * `tc_type` - Type of the attached thermocouple.
    pub fn configure(&mut self, rate: Frequency, tc_type: TcType) -> Result<(), DaqError> {
        let hz = data_rate_hz(rate)?;
        debug!(
            "Configuring AIn{} as type {tc_type:?} thermocouple at {hz} Hz",
            self.idx
        );
        let mut intf = lock(&self.interface);
        intf.set_config(self.idx, ChannelSetting::ChanType(AiChanType::Thermocouple))?;
        intf.set_config(self.idx, ChannelSetting::TcType(tc_type))?;
        intf.set_config(self.idx, ChannelSetting::TempScale(self.scale))?;
        intf.set_config(self.idx, ChannelSetting::DataRate(hz))
    }

    /// Get the current, unfiltered temperature reading of this channel.
    pub fn get_temperature(&mut self) -> Result<Temperature, DaqError> {
        let value = lock(&self.interface).t_in(self.idx, self.scale, TInOptions::NoFilter)?;
        Ok(self.scale.to_temperature(value))
    }
}

impl<T: DaqDriver> Clone for ThermocoupleInput<T> {
    fn clone(&self) -> Self {
        Self {
            idx: self.idx,
            scale: self.scale,
            interface: Arc::clone(&self.interface),
        }
    }
}
