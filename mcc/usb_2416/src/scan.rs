//! Data of a multi-channel scan.

use std::ops::RangeInclusive;

/// Scaled data of a scan over consecutive analog inputs.
///
/// The data is stored interleaved as it comes from the board: one row per point in time with one
/// value per channel. Voltage channels are in volts, thermocouple channels in the temperature
/// scale they were configured with.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanData {
    low_chan: usize,
    num_chans: usize,
    data: Vec<f64>,
}

impl ScanData {
    /// Create new scan data, `num_chans` must not be zero.
    pub(crate) fn new(low_chan: usize, num_chans: usize, data: Vec<f64>) -> Self {
        ScanData {
            low_chan,
            num_chans: num_chans.max(1),
            data,
        }
    }

    /// The channels that were scanned.
    pub fn channels(&self) -> RangeInclusive<usize> {
        self.low_chan..=self.low_chan + self.num_chans - 1
    }

    /// Number of points that were taken per channel.
    pub fn num_points(&self) -> usize {
        self.data.len() / self.num_chans
    }

    /// Iterate over the rows, each row holds one value per channel.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks(self.num_chans)
    }

    /// Get all values of one channel, `None` if the channel was not part of the scan.
    pub fn channel(&self, idx: usize) -> Option<Vec<f64>> {
        if !self.channels().contains(&idx) {
            return None;
        }
        Some(
            self.data
                .iter()
                .skip(idx - self.low_chan)
                .step_by(self.num_chans)
                .copied()
                .collect(),
        )
    }

    /// The interleaved data as it was returned by the board.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
