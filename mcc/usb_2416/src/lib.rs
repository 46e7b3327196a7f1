//! A rust driver for the Measurement Computing USB-2408 / USB-2416 series.
//!
//! This driver provides the analog inputs (voltage and thermocouple), analog outputs, the digital
//! port, and the counters of the USB-2400 series boards on top of any driver that implements the
//! [`mccdaq::DaqDriver`] trait. Next to single-channel handles, it provides accessor operations
//! that act on one channel or a list of channels at once and return readings in the same shape.
//!
//! # Example
//!
//! This example uses the simulated board of `mccdaq`, a hardware backend is used the same way.
//! ```
//! use measurements::{Frequency, Voltage};
//! use mccdaq::{AnalogInputMode, SimulatedBoard};
//! use usb_2416::Usb2416;
//!
//! // Board 0 is a USB-2416-4AO with 1.2 V on channel 2 and 3.4 V on channel 3
//! let board = SimulatedBoard::new(0, "USB-2416-4AO")
//!     .with_voltage(2, 1.2)
//!     .with_voltage(3, 3.4);
//! let mut inst = Usb2416::try_new(board).unwrap();
//!
//! // Configure channels 2 and 3 and read their averaged voltages
//! inst.configure_analog_inputs(vec![2, 3], Frequency::from_hertz(60.0), AnalogInputMode::Differential)
//!     .unwrap();
//! let voltages = inst.read_averaged(vec![2, 3]).unwrap();
//! assert_eq!(voltages.len(), 2);
//!
//! // A single channel gives a single reading
//! let voltage = inst.read_averaged(2).unwrap().single().unwrap();
//! println!("Channel 2: {voltage}");
//!
//! // Set analog output 1 to 9.6 V
//! inst.write_scaled(1, Voltage::from_volts(9.6)).unwrap();
//! ```

#![warn(missing_docs)]

mod analog;
mod config;
mod digital;
mod model;
mod scan;
mod selection;
mod thermocouple;

pub use analog::{AnalogInput, AnalogOutput, SAMPLES_PER_READ};
pub use config::AcquisitionConfig;
pub use digital::{Counter, DigitalPort};
pub use model::Model;
pub use scan::ScanData;
pub use selection::{Channels, Readings};
pub use thermocouple::ThermocoupleInput;

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::{debug, info, warn};
use mccdaq::{AnalogInputMode, DaqDriver, DaqError, DigitalPortType, TcType};
use measurements::{Frequency, Temperature, Voltage};

/// Lock the shared driver.
///
/// The driver keeps no state between calls that a panic could leave half updated, so a poisoned
/// lock is used as is.
pub(crate) fn lock<T: DaqDriver>(interface: &Arc<Mutex<T>>) -> MutexGuard<'_, T> {
    interface.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A rust driver for the USB-2400 series.
///
/// Creating the driver verifies that a board of the series is installed at the driver's board
/// number. See the top-level documentation for an example on how to use this driver.
pub struct Usb2416<T: DaqDriver> {
    interface: Arc<Mutex<T>>,
    board_num: usize,
    model: Model,
    config: AcquisitionConfig,
}

impl<T: DaqDriver> Usb2416<T> {
    /// Create a new driver with the default [`AcquisitionConfig`].
    ///
    /// This queries the name of the board and fails with [`DaqError::BoardNotFound`] if no board
    /// is installed at the driver's board number, or with [`DaqError::BoardMismatch`] if the
    /// board is not part of the USB-2400 series.
    ///
    /// # Arguments
    /// * `interface` - A driver that implements the [`DaqDriver`] trait.
    pub fn try_new(interface: T) -> Result<Self, DaqError> {
        Self::try_with_config(interface, AcquisitionConfig::default())
    }

    /// Create a new driver with the given [`AcquisitionConfig`].
    ///
    /// See [`Usb2416::try_new`] for the board verification.
    pub fn try_with_config(mut interface: T, config: AcquisitionConfig) -> Result<Self, DaqError> {
        let board_num = interface.board_num();
        let name = interface.board_name().map_err(|err| {
            if err.is_board_not_found() {
                warn!("No board found at board number {board_num}: {err}");
                DaqError::BoardNotFound { board_num }
            } else {
                err
            }
        })?;

        let Some(model) = Model::from_board_name(&name) else {
            warn!("Board {board_num} is a {name}, not a {}", Model::SERIES);
            return Err(DaqError::BoardMismatch {
                board_num,
                expected: Model::SERIES.to_string(),
                found: name,
            });
        };
        info!("{name} found as board number {board_num}");

        Ok(Usb2416 {
            interface: Arc::new(Mutex::new(interface)),
            board_num,
            model,
            config,
        })
    }

    /// The board number of this board.
    pub fn board_num(&self) -> usize {
        self.board_num
    }

    /// The model of this board.
    pub fn model(&self) -> Model {
        self.model
    }

    /// The configuration of the accessor operations.
    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Replace the configuration of the accessor operations.
    ///
    /// Channel handles that were created before keep the ranges and scales they were created
    /// with.
    pub fn set_config(&mut self, config: AcquisitionConfig) {
        self.config = config;
    }

    /// Query the name of the board, e.g., `"USB-2416-4AO"`.
    pub fn get_name(&mut self) -> Result<String, DaqError> {
        lock(&self.interface).board_name()
    }

    /// Flash the LED of the board to identify it.
    pub fn identify(&mut self) -> Result<(), DaqError> {
        lock(&self.interface).flash_led()
    }

    /// Get an analog input with a given index.
    ///
    /// Please note that channels are zero-indexed and counted as single-ended channels.
    pub fn get_analog_input(&mut self, idx: usize) -> Result<AnalogInput<T>, DaqError> {
        check_index(idx, self.model.num_analog_inputs())?;
        Ok(AnalogInput::new(
            idx,
            self.config.input_range,
            Arc::clone(&self.interface),
        ))
    }

    /// Get an analog input with a given index to be used with a thermocouple.
    pub fn get_thermocouple(&mut self, idx: usize) -> Result<ThermocoupleInput<T>, DaqError> {
        check_index(idx, self.model.num_analog_inputs())?;
        Ok(ThermocoupleInput::new(
            idx,
            self.config.temp_scale,
            Arc::clone(&self.interface),
        ))
    }

    /// Get an analog output with a given index.
    ///
    /// Boards without analog outputs return a [`DaqError::ChannelIndexOutOfRange`] error for
    /// every index.
    pub fn get_analog_output(&mut self, idx: usize) -> Result<AnalogOutput<T>, DaqError> {
        check_index(idx, self.model.num_analog_outputs())?;
        Ok(AnalogOutput::new(
            idx,
            self.config.output_range,
            Arc::clone(&self.interface),
        ))
    }

    /// Get the digital port of the board.
    pub fn get_digital_port(&mut self) -> DigitalPort<T> {
        DigitalPort::new(DigitalPortType::FirstPortA, Arc::clone(&self.interface))
    }

    /// Get a counter with a given index.
    pub fn get_counter(&mut self, idx: usize) -> Result<Counter<T>, DaqError> {
        check_index(idx, self.model.num_counters())?;
        Ok(Counter::new(idx, Arc::clone(&self.interface)))
    }

    /// Configure one or many channels as voltage inputs.
    ///
    /// All indices are checked before the first channel is configured. Channels are then
    /// configured in order, see [`AnalogInput::configure`].
    ///
    /// # Arguments
    /// * `channels` - A channel or a list of channels.
    /// * `rate` - Data rate, rounded to full Hz. Must be between 1 Hz and 3750 Hz.
    /// * `mode` - Single-ended or differential input.
    pub fn configure_analog_inputs(
        &mut self,
        channels: impl Into<Channels>,
        rate: Frequency,
        mode: AnalogInputMode,
    ) -> Result<(), DaqError> {
        let channels: Channels = channels.into();
        let inputs = channels.try_map(|idx| self.get_analog_input(idx))?;
        for mut input in inputs.into_vec() {
            input.configure(rate, mode)?;
        }
        Ok(())
    }

    /// Configure one or many channels as thermocouple inputs.
    ///
    /// The temperature scale is taken from the [`AcquisitionConfig`]. All indices are checked
    /// before the first channel is configured.
    ///
    /// # Arguments
    /// * `channels` - A channel or a list of channels.
    /// * `rate` - Data rate, rounded to full Hz. Must be between 1 Hz and 3750 Hz.
    /// * `tc_type` - Type of the attached thermocouples.
    pub fn configure_thermocouples(
        &mut self,
        channels: impl Into<Channels>,
        rate: Frequency,
        tc_type: TcType,
    ) -> Result<(), DaqError> {
        let channels: Channels = channels.into();
        let inputs = channels.try_map(|idx| self.get_thermocouple(idx))?;
        for mut input in inputs.into_vec() {
            input.configure(rate, tc_type)?;
        }
        Ok(())
    }

    /// Configure one or many channels as voltage inputs with the data rate and input mode of the
    /// [`AcquisitionConfig`].
    pub fn setup_analog_inputs(&mut self, channels: impl Into<Channels>) -> Result<(), DaqError> {
        let AcquisitionConfig {
            data_rate,
            input_mode,
            ..
        } = self.config;
        self.configure_analog_inputs(channels, data_rate, input_mode)
    }

    /// Configure one or many channels as thermocouple inputs with the data rate and
    /// thermocouple type of the [`AcquisitionConfig`].
    pub fn setup_thermocouples(&mut self, channels: impl Into<Channels>) -> Result<(), DaqError> {
        let AcquisitionConfig {
            data_rate, tc_type, ..
        } = self.config;
        self.configure_thermocouples(channels, data_rate, tc_type)
    }

    /// Read the averaged voltage of one or many channels.
    ///
    /// Every channel is sampled [`SAMPLES_PER_READ`] times, see [`AnalogInput::read_averaged`].
    /// A single channel returns a single reading, a list of channels returns one reading per
    /// channel in the same order.
    pub fn read_averaged(
        &mut self,
        channels: impl Into<Channels>,
    ) -> Result<Readings<Voltage>, DaqError> {
        let channels: Channels = channels.into();
        channels
            .try_map(|idx| self.get_analog_input(idx))?
            .try_map(|mut input| input.read_averaged())
    }

    /// Read the temperature of one or many thermocouple channels.
    ///
    /// A single channel returns a single reading, a list of channels returns one reading per
    /// channel in the same order.
    pub fn read_temperatures(
        &mut self,
        channels: impl Into<Channels>,
    ) -> Result<Readings<Temperature>, DaqError> {
        let channels: Channels = channels.into();
        channels
            .try_map(|idx| self.get_thermocouple(idx))?
            .try_map(|mut input| input.get_temperature())
    }

    /// Set one or many analog outputs to a voltage.
    ///
    /// For every channel, the value is converted to counts with the board's calibration and the
    /// counts are written. All indices are checked before the first channel is written.
    pub fn write_scaled(
        &mut self,
        channels: impl Into<Channels>,
        value: Voltage,
    ) -> Result<(), DaqError> {
        let channels: Channels = channels.into();
        let outputs = channels.try_map(|idx| self.get_analog_output(idx))?;
        for mut output in outputs.into_vec() {
            output.set_voltage(value)?;
        }
        Ok(())
    }

    /// Run a blocking scan over consecutive analog inputs.
    ///
    /// Channels must be configured before the scan. Voltage channels are read with the input
    /// range of the [`AcquisitionConfig`].
    ///
    /// # Arguments
    /// * `channels` - The consecutive channels to scan, e.g., `0..=3`.
    /// * `points_per_channel` - Number of samples to take per channel.
    /// * `rate` - Per-channel scan rate, rounded to full Hz.
    pub fn scan(
        &mut self,
        channels: RangeInclusive<usize>,
        points_per_channel: usize,
        rate: Frequency,
    ) -> Result<ScanData, DaqError> {
        let (low_chan, high_chan) = channels.into_inner();
        if low_chan > high_chan {
            return Err(DaqError::InvalidArgument(format!(
                "Scan channels {low_chan}..={high_chan} are empty."
            )));
        }
        check_index(high_chan, self.model.num_analog_inputs())?;
        if points_per_channel == 0 {
            return Err(DaqError::IntValueOutOfRange {
                value: 0,
                min: 1,
                max: i64::MAX,
            });
        }
        let hz = config::data_rate_hz(rate)?;

        let num_chans = high_chan - low_chan + 1;
        let count = points_per_channel
            .checked_mul(num_chans)
            .ok_or(DaqError::IntValueOutOfRange {
                value: i64::try_from(points_per_channel).unwrap_or(i64::MAX),
                min: 1,
                max: i64::try_from(usize::MAX / num_chans).unwrap_or(i64::MAX),
            })?;
        debug!("Scanning channels {low_chan} to {high_chan}, {count} samples at {hz} Hz");
        let data = lock(&self.interface).a_in_scan(
            low_chan,
            high_chan,
            count,
            hz,
            self.config.input_range,
        )?;
        Ok(ScanData::new(low_chan, num_chans, data))
    }

    /// Hand the board back to the driver.
    pub fn release(&mut self) -> Result<(), DaqError> {
        info!("Releasing board {}", self.board_num);
        lock(&self.interface).release()
    }
}

impl<T: DaqDriver> Clone for Usb2416<T> {
    fn clone(&self) -> Self {
        Self {
            interface: Arc::clone(&self.interface),
            board_num: self.board_num,
            model: self.model,
            config: self.config,
        }
    }
}

/// Check a zero-indexed channel index against the number of available channels.
fn check_index(idx: usize, nof_channels: usize) -> Result<(), DaqError> {
    if idx >= nof_channels {
        return Err(DaqError::ChannelIndexOutOfRange { idx, nof_channels });
    }
    Ok(())
}
