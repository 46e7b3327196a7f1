//! Record of the calls a simulated board received.

use crate::{AnalogInputMode, ChannelSetting, DigitalPortType, UlRange};

/// A driver call as it was received by a [`crate::SimulatedBoard`].
///
/// Only calls that reached the simulated hardware are recorded, calls that failed validation
/// are not.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DriverCall {
    FlashLed,
    SetConfig {
        channel: usize,
        setting: ChannelSetting,
    },
    InputMode {
        channel: usize,
        mode: AnalogInputMode,
    },
    AIn {
        channel: usize,
        range: UlRange,
    },
    TIn {
        channel: usize,
    },
    AOut {
        channel: usize,
        range: UlRange,
        counts: u16,
    },
    DIn {
        port: DigitalPortType,
    },
    DOut {
        port: DigitalPortType,
        value: u16,
    },
    DBitOut {
        port: DigitalPortType,
        bit: usize,
        value: bool,
    },
    CClear {
        counter: usize,
    },
    CIn {
        counter: usize,
    },
    Scan {
        low_chan: usize,
        high_chan: usize,
        count: usize,
        rate: u32,
    },
    Release,
}

impl DriverCall {
    /// Check if this call changed the configuration of an analog input channel.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DriverCall::SetConfig { .. } | DriverCall::InputMode { .. }
        )
    }
}
