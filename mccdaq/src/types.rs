//! The vocabulary of the driver: ranges, channel types, modes, and settings.

use std::fmt::Display;

use measurements::Temperature;

/// Voltage ranges the analog converters can be set to.
///
/// All ranges of the USB-2400 series are bipolar. Conversions between raw counts and volts are
/// offset-binary, i.e., zero counts corresponds to the lower end of the range.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UlRange {
    /// -20 V to +20 V
    #[default]
    Bip20Volts,
    /// -10 V to +10 V
    Bip10Volts,
    /// -5 V to +5 V
    Bip5Volts,
    /// -2.5 V to +2.5 V
    Bip2Pt5Volts,
    /// -1.25 V to +1.25 V
    Bip1Pt25Volts,
    /// -0.625 V to +0.625 V
    Bip0Pt625Volts,
    /// -0.3125 V to +0.3125 V
    Bip0Pt312Volts,
    /// -0.15625 V to +0.15625 V
    Bip0Pt156Volts,
    /// -0.078125 V to +0.078125 V
    Bip0Pt078Volts,
}

impl UlRange {
    /// Upper end of the range in volts.
    pub fn high(&self) -> f64 {
        match self {
            UlRange::Bip20Volts => 20.0,
            UlRange::Bip10Volts => 10.0,
            UlRange::Bip5Volts => 5.0,
            UlRange::Bip2Pt5Volts => 2.5,
            UlRange::Bip1Pt25Volts => 1.25,
            UlRange::Bip0Pt625Volts => 0.625,
            UlRange::Bip0Pt312Volts => 0.3125,
            UlRange::Bip0Pt156Volts => 0.15625,
            UlRange::Bip0Pt078Volts => 0.078125,
        }
    }

    /// Lower end of the range in volts.
    pub fn low(&self) -> f64 {
        -self.high()
    }

    /// Full span of the range in volts.
    pub fn span(&self) -> f64 {
        self.high() - self.low()
    }

    /// Voltage of one count for a converter with the given resolution.
    ///
    /// # Arguments
    /// * `bits` - Resolution of the converter in bits.
    pub fn resolution(&self, bits: u32) -> f64 {
        self.span() / full_scale(bits)
    }

    /// Convert raw counts into volts.
    ///
    /// # Arguments
    /// * `counts` - Raw converter counts.
    /// * `bits` - Resolution of the converter in bits.
    pub fn counts_to_volts(&self, counts: u32, bits: u32) -> f64 {
        self.low() + f64::from(counts) * self.resolution(bits)
    }

    /// Convert volts into raw counts.
    ///
    /// Values are rounded to the nearest count and clamped to the range of the converter.
    ///
    /// # Arguments
    /// * `volts` - The voltage to convert.
    /// * `bits` - Resolution of the converter in bits.
    pub fn volts_to_counts(&self, volts: f64, bits: u32) -> u32 {
        let max = full_scale(bits) - 1.0;
        let counts = ((volts - self.low()) / self.resolution(bits)).round();
        // the clamp keeps the cast in range, NaN casts to zero
        counts.clamp(0.0, max) as u32
    }
}

impl Display for UlRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "±{} V", self.high())
    }
}

/// Number of distinct counts of a converter with the given resolution.
fn full_scale(bits: u32) -> f64 {
    2f64.powi(bits.min(32) as i32)
}

/// The kind of signal an analog input channel acquires.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiChanType {
    /// Voltage input.
    #[default]
    Voltage,
    /// Thermocouple input.
    Thermocouple,
}

impl Display for AiChanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiChanType::Voltage => write!(f, "voltage input"),
            AiChanType::Thermocouple => write!(f, "thermocouple input"),
        }
    }
}

/// Input mode of an analog input channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalogInputMode {
    /// Measure against ground.
    SingleEnded,
    /// Measure between a channel pair.
    #[default]
    Differential,
}

/// Thermocouple types that can be linearized by the board.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TcType {
    J,
    #[default]
    K,
    T,
    E,
    R,
    S,
    B,
    N,
}

/// Temperature scale that thermocouple readings are reported in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempScale {
    /// Degrees Celsius
    #[default]
    Celsius,
    /// Degrees Fahrenheit
    Fahrenheit,
    /// Kelvin
    Kelvin,
}

impl TempScale {
    /// Interpret a value reported in this scale as a temperature.
    pub fn to_temperature(&self, value: f64) -> Temperature {
        match self {
            TempScale::Celsius => Temperature::from_celsius(value),
            TempScale::Fahrenheit => Temperature::from_fahrenheit(value),
            TempScale::Kelvin => Temperature::from_kelvin(value),
        }
    }

    /// Express a temperature as a value in this scale.
    pub fn from_temperature(&self, temperature: &Temperature) -> f64 {
        match self {
            TempScale::Celsius => temperature.as_celsius(),
            TempScale::Fahrenheit => temperature.as_fahrenheit(),
            TempScale::Kelvin => temperature.as_kelvin(),
        }
    }
}

/// Options for thermocouple reads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TInOptions {
    /// Apply the board's smoothing filter.
    Filter,
    /// Return the instantaneous reading.
    #[default]
    NoFilter,
}

/// Digital ports of a board.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigitalPortType {
    /// The first 8-bit port, DIO0 to DIO7.
    #[default]
    FirstPortA,
}

impl DigitalPortType {
    /// Number of bits on this port.
    pub fn num_bits(&self) -> usize {
        match self {
            DigitalPortType::FirstPortA => 8,
        }
    }
}

/// A single per-channel configuration item of an analog input.
///
/// Input mode is not part of these settings as the driver sets it with a dedicated call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSetting {
    /// Kind of the input.
    ChanType(AiChanType),
    /// Thermocouple type, only relevant for thermocouple inputs.
    TcType(TcType),
    /// Scale of thermocouple readings.
    TempScale(TempScale),
    /// Conversion rate in Hz.
    DataRate(u32),
}
