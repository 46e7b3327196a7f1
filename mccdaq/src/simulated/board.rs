//! A simulated board that implements every call of the [`DaqDriver`] trait in memory.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::trace;
use measurements::Temperature;

use super::{AnalogSignal, DriverCall};
use crate::{
    AiChanType, AnalogInputMode, ChannelSetting, DaqDriver, DaqError, DigitalPortType, ErrorCode,
    TInOptions, TcType, TempScale, UlRange,
};

/// Value that a scan reports for a thermocouple channel without a sensor.
const OPEN_TC_VALUE: f64 = -9999.0;

/// The configuration of one simulated analog input channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Kind of the input.
    pub chan_type: AiChanType,
    /// Input mode.
    pub input_mode: AnalogInputMode,
    /// Thermocouple type.
    pub tc_type: TcType,
    /// Scale for thermocouple readings.
    pub temp_scale: TempScale,
    /// Conversion rate in Hz, zero if it was never set.
    pub data_rate: u32,
}

impl ChannelConfig {
    fn apply(&mut self, setting: ChannelSetting) {
        match setting {
            ChannelSetting::ChanType(chan_type) => self.chan_type = chan_type,
            ChannelSetting::TcType(tc_type) => self.tc_type = tc_type,
            ChannelSetting::TempScale(temp_scale) => self.temp_scale = temp_scale,
            ChannelSetting::DataRate(rate) => self.data_rate = rate,
        }
    }
}

#[derive(Debug)]
struct BoardState {
    board_num: usize,
    name: String,
    present: bool,
    num_ai: usize,
    num_ao: usize,
    num_counters: usize,
    ad_bits: u32,
    da_bits: u32,
    channels: BTreeMap<usize, ChannelConfig>,
    signals: BTreeMap<usize, AnalogSignal>,
    temperatures: BTreeMap<usize, Temperature>,
    samples_taken: BTreeMap<usize, usize>,
    outputs: BTreeMap<usize, (UlRange, u16)>,
    ports: BTreeMap<DigitalPortType, u16>,
    counters: Vec<u32>,
    calls: Vec<DriverCall>,
    released: bool,
}

impl BoardState {
    fn check_present(&self) -> Result<(), DaqError> {
        if self.present {
            Ok(())
        } else {
            Err(DaqError::driver(ErrorCode::BAD_BOARD, "Invalid board number."))
        }
    }

    fn check_index(idx: usize, nof_channels: usize) -> Result<(), DaqError> {
        if idx >= nof_channels {
            return Err(DaqError::ChannelIndexOutOfRange { idx, nof_channels });
        }
        Ok(())
    }

    fn check_ai(&self, channel: usize) -> Result<(), DaqError> {
        self.check_present()?;
        Self::check_index(channel, self.num_ai)
    }

    fn check_ao(&self, channel: usize) -> Result<(), DaqError> {
        self.check_present()?;
        Self::check_index(channel, self.num_ao)
    }

    fn check_counter(&self, counter: usize) -> Result<(), DaqError> {
        self.check_present()?;
        Self::check_index(counter, self.num_counters)
    }

    fn config(&self, channel: usize) -> ChannelConfig {
        self.channels.get(&channel).copied().unwrap_or_default()
    }

    /// Take the next voltage sample of a channel, quantized by the A/D converter.
    fn sample_counts(&mut self, channel: usize, range: UlRange) -> u32 {
        let volts = self
            .signals
            .get_mut(&channel)
            .map(AnalogSignal::next_value)
            .unwrap_or(0.0);
        *self.samples_taken.entry(channel).or_default() += 1;
        range.volts_to_counts(volts, self.ad_bits)
    }

    fn temperature(&self, channel: usize, scale: TempScale) -> Option<f64> {
        self.temperatures
            .get(&channel)
            .map(|temp| scale.from_temperature(temp))
    }

    /// Write a new port value. A rising edge on DIO0 increments counter 0.
    fn write_port(&mut self, port: DigitalPortType, value: u16) {
        let old = self.ports.insert(port, value).unwrap_or(0);
        let rising = old & 1 == 0 && value & 1 == 1;
        if port == DigitalPortType::FirstPortA && rising {
            if let Some(counter) = self.counters.first_mut() {
                *counter = counter.wrapping_add(1);
            }
        }
    }
}

/// A simulated board that implements all calls of the [`DaqDriver`] trait.
///
/// Cloning a [`SimulatedBoard`] gives a second handle to the same simulated hardware. This allows
/// you to hand one handle to the driver under test and keep another one to set up signals and
/// inspect what has been written to the board.
///
/// # Example
///
/// ```
/// use mccdaq::{DaqDriver, SimulatedBoard, UlRange};
///
/// let board = SimulatedBoard::new(0, "USB-2416-4AO").with_voltage(2, 1.5);
/// let mut driver = board.clone();
///
/// let volts = driver.v_in_32(2, UlRange::Bip20Volts).unwrap();
/// assert!((volts - 1.5).abs() <= UlRange::Bip20Volts.resolution(24));
///
/// driver.v_out(0, UlRange::Bip10Volts, 2.0).unwrap();
/// let written = board.analog_output_volts(0).unwrap();
/// assert!((written - 2.0).abs() <= UlRange::Bip10Volts.resolution(16));
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedBoard {
    state: Arc<Mutex<BoardState>>,
}

impl SimulatedBoard {
    /// Create a new simulated board that is present at the given board number.
    ///
    /// The board has 32 analog inputs with a 24 bit A/D converter, 4 analog outputs with a 16 bit
    /// D/A converter, 2 counters and one digital port, i.e., a USB-2416-4AO. Use
    /// [`SimulatedBoard::with_channel_counts`] and [`SimulatedBoard::with_resolution`] to model
    /// other boards.
    ///
    /// # Arguments
    /// * `board_num` - The board number.
    /// * `name` - The name the board reports.
    pub fn new(board_num: usize, name: &str) -> Self {
        let state = BoardState {
            board_num,
            name: name.to_string(),
            present: true,
            num_ai: 32,
            num_ao: 4,
            num_counters: 2,
            ad_bits: 24,
            da_bits: 16,
            channels: BTreeMap::new(),
            signals: BTreeMap::new(),
            temperatures: BTreeMap::new(),
            samples_taken: BTreeMap::new(),
            outputs: BTreeMap::new(),
            ports: BTreeMap::new(),
            counters: vec![0; 2],
            calls: Vec::new(),
            released: false,
        };
        SimulatedBoard {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Create a simulated board number at which no board is installed.
    ///
    /// Every call to this board fails with [`ErrorCode::BAD_BOARD`].
    pub fn absent(board_num: usize) -> Self {
        let board = SimulatedBoard::new(board_num, "");
        board.state().present = false;
        board
    }

    /// Set the number of analog inputs, analog outputs, and counters.
    pub fn with_channel_counts(self, num_ai: usize, num_ao: usize, num_counters: usize) -> Self {
        {
            let mut state = self.state();
            state.num_ai = num_ai;
            state.num_ao = num_ao;
            state.num_counters = num_counters;
            state.counters = vec![0; num_counters];
        }
        self
    }

    /// Set the resolution of the A/D and D/A converters in bits.
    ///
    /// The D/A resolution is limited to 16 bits, as analog outputs are written as 16 bit counts.
    pub fn with_resolution(self, ad_bits: u32, da_bits: u32) -> Self {
        {
            let mut state = self.state();
            state.ad_bits = ad_bits.min(32);
            state.da_bits = da_bits.min(16);
        }
        self
    }

    /// Apply a constant voltage to an analog input.
    pub fn with_voltage(self, channel: usize, volts: f64) -> Self {
        self.set_voltage(channel, volts);
        self
    }

    /// Apply a sequence of voltages to an analog input. Each sample consumes one value, the last
    /// value is held once the sequence is exhausted.
    pub fn with_sequence(self, channel: usize, volts: Vec<f64>) -> Self {
        self.set_sequence(channel, volts);
        self
    }

    /// Attach a thermocouple at the given temperature to an analog input.
    pub fn with_temperature(self, channel: usize, temperature: Temperature) -> Self {
        self.set_temperature(channel, temperature);
        self
    }

    /// Apply a constant voltage to an analog input.
    pub fn set_voltage(&self, channel: usize, volts: f64) {
        self.state()
            .signals
            .insert(channel, AnalogSignal::constant(volts));
    }

    /// Apply a sequence of voltages to an analog input.
    pub fn set_sequence(&self, channel: usize, volts: Vec<f64>) {
        self.state()
            .signals
            .insert(channel, AnalogSignal::sequence(volts));
    }

    /// Attach a thermocouple at the given temperature to an analog input.
    pub fn set_temperature(&self, channel: usize, temperature: Temperature) {
        self.state().temperatures.insert(channel, temperature);
    }

    /// Drive the lines of a digital port from the outside.
    pub fn set_digital_port(&self, port: DigitalPortType, value: u16) {
        self.state().ports.insert(port, value);
    }

    /// Get the configuration of an analog input, `None` if it was never configured.
    pub fn channel_config(&self, channel: usize) -> Option<ChannelConfig> {
        self.state().channels.get(&channel).copied()
    }

    /// Get the number of samples that were taken from an analog input.
    pub fn samples_taken(&self, channel: usize) -> usize {
        self.state()
            .samples_taken
            .get(&channel)
            .copied()
            .unwrap_or(0)
    }

    /// Get the counts that were last written to an analog output.
    pub fn analog_output(&self, channel: usize) -> Option<u16> {
        self.state().outputs.get(&channel).map(|(_, counts)| *counts)
    }

    /// Read back the voltage an analog output is currently set to.
    pub fn analog_output_volts(&self, channel: usize) -> Option<f64> {
        let state = self.state();
        state
            .outputs
            .get(&channel)
            .map(|(range, counts)| range.counts_to_volts(u32::from(*counts), state.da_bits))
    }

    /// Get the current value of a digital port.
    pub fn digital_port(&self, port: DigitalPortType) -> u16 {
        self.state().ports.get(&port).copied().unwrap_or(0)
    }

    /// Get the current value of a counter.
    pub fn counter(&self, counter: usize) -> Option<u32> {
        self.state().counters.get(counter).copied()
    }

    /// Get all calls the board received so far.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.state().calls.clone()
    }

    /// Get the number of times the LED was flashed.
    pub fn led_flashes(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| **call == DriverCall::FlashLed)
            .count()
    }

    /// Check if the board was released.
    pub fn is_released(&self) -> bool {
        self.state().released
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DaqDriver for SimulatedBoard {
    fn board_num(&self) -> usize {
        self.state().board_num
    }

    fn board_name(&mut self) -> Result<String, DaqError> {
        let state = self.state();
        state.check_present()?;
        Ok(state.name.clone())
    }

    fn flash_led(&mut self) -> Result<(), DaqError> {
        let mut state = self.state();
        state.check_present()?;
        state.calls.push(DriverCall::FlashLed);
        Ok(())
    }

    fn set_config(&mut self, channel: usize, setting: ChannelSetting) -> Result<(), DaqError> {
        let mut state = self.state();
        state.check_ai(channel)?;
        trace!("Simulated board: channel {channel} set to {setting:?}");
        state.channels.entry(channel).or_default().apply(setting);
        state.calls.push(DriverCall::SetConfig { channel, setting });
        Ok(())
    }

    fn a_chan_input_mode(
        &mut self,
        channel: usize,
        mode: AnalogInputMode,
    ) -> Result<(), DaqError> {
        let mut state = self.state();
        state.check_ai(channel)?;
        state.channels.entry(channel).or_default().input_mode = mode;
        state.calls.push(DriverCall::InputMode { channel, mode });
        Ok(())
    }

    fn a_in_32(&mut self, channel: usize, range: UlRange) -> Result<u32, DaqError> {
        let mut state = self.state();
        state.check_ai(channel)?;
        state.calls.push(DriverCall::AIn { channel, range });
        Ok(state.sample_counts(channel, range))
    }

    fn to_eng_units_32(&mut self, range: UlRange, counts: u32) -> Result<f64, DaqError> {
        let state = self.state();
        state.check_present()?;
        Ok(range.counts_to_volts(counts, state.ad_bits))
    }

    fn t_in(
        &mut self,
        channel: usize,
        scale: TempScale,
        _options: TInOptions,
    ) -> Result<f64, DaqError> {
        let mut state = self.state();
        state.check_ai(channel)?;
        let chan_type = state.config(channel).chan_type;
        if chan_type != AiChanType::Thermocouple {
            return Err(DaqError::ChannelMisconfigured {
                channel,
                expected: AiChanType::Thermocouple,
                actual: chan_type,
            });
        }
        state.calls.push(DriverCall::TIn { channel });
        state
            .temperature(channel, scale)
            .ok_or(DaqError::OpenThermocouple { channel })
    }

    fn from_eng_units(&mut self, range: UlRange, volts: f64) -> Result<u16, DaqError> {
        let state = self.state();
        state.check_present()?;
        let counts = range.volts_to_counts(volts, state.da_bits);
        Ok(u16::try_from(counts).unwrap_or(u16::MAX))
    }

    fn to_eng_units(&mut self, range: UlRange, counts: u16) -> Result<f64, DaqError> {
        let state = self.state();
        state.check_present()?;
        Ok(range.counts_to_volts(u32::from(counts), state.da_bits))
    }

    fn a_out(&mut self, channel: usize, range: UlRange, counts: u16) -> Result<(), DaqError> {
        let mut state = self.state();
        state.check_ao(channel)?;
        state.outputs.insert(channel, (range, counts));
        state.calls.push(DriverCall::AOut {
            channel,
            range,
            counts,
        });
        Ok(())
    }

    fn d_in(&mut self, port: DigitalPortType) -> Result<u16, DaqError> {
        let mut state = self.state();
        state.check_present()?;
        state.calls.push(DriverCall::DIn { port });
        Ok(state.ports.get(&port).copied().unwrap_or(0))
    }

    fn d_out(&mut self, port: DigitalPortType, value: u16) -> Result<(), DaqError> {
        let mut state = self.state();
        state.check_present()?;
        let max = (1u32 << port.num_bits()) - 1;
        if u32::from(value) > max {
            return Err(DaqError::IntValueOutOfRange {
                value: i64::from(value),
                min: 0,
                max: i64::from(max),
            });
        }
        state.write_port(port, value);
        state.calls.push(DriverCall::DOut { port, value });
        Ok(())
    }

    fn d_bit_out(
        &mut self,
        port: DigitalPortType,
        bit: usize,
        value: bool,
    ) -> Result<(), DaqError> {
        let mut state = self.state();
        state.check_present()?;
        BoardState::check_index(bit, port.num_bits())?;
        let old = state.ports.get(&port).copied().unwrap_or(0);
        let new = if value {
            old | (1 << bit)
        } else {
            old & !(1 << bit)
        };
        state.write_port(port, new);
        state.calls.push(DriverCall::DBitOut { port, bit, value });
        Ok(())
    }

    fn c_clear(&mut self, counter: usize) -> Result<(), DaqError> {
        let mut state = self.state();
        state.check_counter(counter)?;
        state.counters[counter] = 0;
        state.calls.push(DriverCall::CClear { counter });
        Ok(())
    }

    fn c_in_32(&mut self, counter: usize) -> Result<u32, DaqError> {
        let mut state = self.state();
        state.check_counter(counter)?;
        state.calls.push(DriverCall::CIn { counter });
        Ok(state.counters[counter])
    }

    fn a_in_scan(
        &mut self,
        low_chan: usize,
        high_chan: usize,
        count: usize,
        rate: u32,
        range: UlRange,
    ) -> Result<Vec<f64>, DaqError> {
        let mut state = self.state();
        state.check_ai(high_chan)?;
        if low_chan > high_chan {
            return Err(DaqError::InvalidArgument(format!(
                "Low channel {low_chan} must not be larger than high channel {high_chan}."
            )));
        }
        let num_chans = high_chan - low_chan + 1;
        if count == 0 || count % num_chans != 0 {
            return Err(DaqError::InvalidArgument(format!(
                "Sample count {count} is not a non-zero multiple of {num_chans} channels."
            )));
        }
        if rate == 0 {
            return Err(DaqError::IntValueOutOfRange {
                value: 0,
                min: 1,
                max: i64::from(u32::MAX),
            });
        }

        let mut data = Vec::with_capacity(count);
        for _ in 0..count / num_chans {
            for channel in low_chan..=high_chan {
                let config = state.config(channel);
                let value = match config.chan_type {
                    AiChanType::Thermocouple => state
                        .temperature(channel, config.temp_scale)
                        .unwrap_or(OPEN_TC_VALUE),
                    AiChanType::Voltage => {
                        let counts = state.sample_counts(channel, range);
                        range.counts_to_volts(counts, state.ad_bits)
                    }
                };
                data.push(value);
            }
        }
        state.calls.push(DriverCall::Scan {
            low_chan,
            high_chan,
            count,
            rate,
        });
        Ok(data)
    }

    fn release(&mut self) -> Result<(), DaqError> {
        let mut state = self.state();
        state.released = true;
        state.calls.push(DriverCall::Release);
        Ok(())
    }
}
