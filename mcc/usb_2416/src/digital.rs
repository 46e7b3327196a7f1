//! Digital port and counters.

use std::sync::{Arc, Mutex};

use log::debug;
use mccdaq::{DaqDriver, DaqError, DigitalPortType};

use crate::lock;

/// The digital port of a USB-2400 series board, DIO0 to DIO7.
///
/// The outputs of the USB-2400 series are open-drain: Writing a 1 to a bit pulls the line to
/// 0 V, writing a 0 releases it to +5 V.
///
/// **This structure can only be created through the [`crate::Usb2416`] struct.**
pub struct DigitalPort<T: DaqDriver> {
    port: DigitalPortType,
    interface: Arc<Mutex<T>>,
}

impl<T: DaqDriver> DigitalPort<T> {
    pub(crate) fn new(port: DigitalPortType, interface: Arc<Mutex<T>>) -> Self {
        DigitalPort { port, interface }
    }

    /// Read the value of the whole port.
    pub fn read(&mut self) -> Result<u16, DaqError> {
        lock(&self.interface).d_in(self.port)
    }

    /// Read the port and decode it into its bits, starting with DIO0.
    pub fn read_bits(&mut self) -> Result<Vec<bool>, DaqError> {
        let value = self.read()?;
        Ok((0..self.port.num_bits())
            .map(|bit| value & (1 << bit) != 0)
            .collect())
    }

    /// Write a value to the whole port.
    pub fn write(&mut self, value: u16) -> Result<(), DaqError> {
        debug!("Writing {value:#010b} to {:?}", self.port);
        lock(&self.interface).d_out(self.port, value)
    }

    /// Write a single bit of the port.
    ///
    /// # Arguments
    /// * `bit` - The bit to write, 0 to 7.
    /// * `value` - The value to write.
    pub fn set_bit(&mut self, bit: usize, value: bool) -> Result<(), DaqError> {
        let nof_channels = self.port.num_bits();
        if bit >= nof_channels {
            return Err(DaqError::ChannelIndexOutOfRange {
                idx: bit,
                nof_channels,
            });
        }
        lock(&self.interface).d_bit_out(self.port, bit, value)
    }
}

impl<T: DaqDriver> Clone for DigitalPort<T> {
    fn clone(&self) -> Self {
        Self {
            port: self.port,
            interface: Arc::clone(&self.interface),
        }
    }
}

/// A counter input of a USB-2400 series board.
///
/// **This structure can only be created through the [`crate::Usb2416`] struct.**
pub struct Counter<T: DaqDriver> {
    idx: usize,
    interface: Arc<Mutex<T>>,
}

impl<T: DaqDriver> Counter<T> {
    pub(crate) fn new(idx: usize, interface: Arc<Mutex<T>>) -> Self {
        Counter { idx, interface }
    }

    /// Reset the counter to zero.
    pub fn clear(&mut self) -> Result<(), DaqError> {
        debug!("Clearing Ctr{}", self.idx);
        lock(&self.interface).c_clear(self.idx)
    }

    /// Read the current count.
    pub fn read(&mut self) -> Result<u32, DaqError> {
        lock(&self.interface).c_in_32(self.idx)
    }
}

impl<T: DaqDriver> Clone for Counter<T> {
    fn clone(&self) -> Self {
        Self {
            idx: self.idx,
            interface: Arc::clone(&self.interface),
        }
    }
}
