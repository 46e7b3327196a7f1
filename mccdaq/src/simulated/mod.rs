//! The simulated module provides a board simulator for testing purposes.
//!
//! The [`SimulatedBoard`] implements the full [`crate::DaqDriver`] trait in memory. Analog inputs
//! are fed from voltages or voltage sequences that you provide, thermocouples from temperatures,
//! and everything that is written to the board can be inspected afterwards. Conversions between
//! counts and volts use the same offset-binary calibration as the hardware, such that
//! quantization shows up in the simulated values just like on a real board.
//!
//! Check out the [`SimulatedBoard`] for more details and examples on how to use it.

mod board;
mod calls;

pub use board::{ChannelConfig, SimulatedBoard};
pub use calls::DriverCall;

/// A self-incrementing index structure that by default starts at 0 and increments whenever `next`
/// is called.
#[derive(Debug, Default, Clone)]
struct IncrIndex {
    index: usize,
}

impl IncrIndex {
    fn next(&mut self) -> usize {
        let current = self.index;
        self.index += 1;
        current
    }
}

/// The signal that is applied to a simulated analog input.
///
/// Values are handed out in order. Once the sequence is exhausted, the last value is held.
#[derive(Debug, Clone)]
struct AnalogSignal {
    values: Vec<f64>,
    index: IncrIndex,
}

impl AnalogSignal {
    fn constant(volts: f64) -> Self {
        Self::sequence(vec![volts])
    }

    fn sequence(values: Vec<f64>) -> Self {
        AnalogSignal {
            values,
            index: IncrIndex::default(),
        }
    }

    fn next_value(&mut self) -> f64 {
        let idx = self.index.next();
        self.values
            .get(idx)
            .or_else(|| self.values.last())
            .copied()
            .unwrap_or(0.0)
    }
}

// Tests of internal functionality
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incrementing_index() {
        let mut idx = IncrIndex::default();
        assert_eq!(0, idx.next());
        assert_eq!(1, idx.next());
        assert_eq!(2, idx.next());
    }

    #[test]
    fn test_signal_holds_last_value() {
        let mut signal = AnalogSignal::sequence(vec![1.0, 2.0]);
        assert_eq!(signal.next_value(), 1.0);
        assert_eq!(signal.next_value(), 2.0);
        assert_eq!(signal.next_value(), 2.0);
    }

    #[test]
    fn test_signal_constant_and_empty() {
        let mut constant = AnalogSignal::constant(-3.5);
        assert_eq!(constant.next_value(), -3.5);
        assert_eq!(constant.next_value(), -3.5);

        let mut empty = AnalogSignal::sequence(vec![]);
        assert_eq!(empty.next_value(), 0.0);
    }
}
