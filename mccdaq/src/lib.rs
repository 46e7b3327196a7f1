//! mccdaq: Talk to your Measurement Computing DAQ boards from Rust
//!
//! The mccdaq library provides the seam between board drivers and the vendor's native driver. To
//! do so, it provides a [`DaqDriver`] trait that covers the calls of the driver, the typed
//! vocabulary of these calls (ranges, channel types, input modes, thermocouple types, temperature
//! scales, and digital ports), and a [`DaqError`] error type that board drivers should return.
//!
//! # Simulation
//!
//! The [`SimulatedBoard`] implements the whole [`DaqDriver`] trait in memory. It is used to test
//! the board drivers in this repository and to run their demos without hardware attached. See
//! the [`SimulatedBoard`] documentation for an example.
//!
//! # Board numbers
//!
//! Boards are addressed by a small integer that is assigned to them outside of this library with
//! the vendor's configuration utility. Board numbers are never discovered at runtime: A driver
//! value is always bound to one board number, see [`DaqDriver::board_num`].
//!
//! # License
//!
//! Licensed under either of
//!
//! - Apache License, Version 2.0 ([LICENSE-APACHE](http://www.apache.org/licenses/LICENSE-2.0))
//! - MIT license ([LICENSE-MIT](http://opensource.org/licenses/MIT))
//!
//! at your option.
//!
//! # Contribution
//!
//! Unless you explicitly state otherwise, any contribution intentionally submitted
//! for inclusion in the work by you, as defined in the Apache-2.0 license, shall be
//! dual licensed as above, without any additional terms or conditions.

#![warn(missing_docs)]

mod driver;
mod error;
mod simulated;
mod types;

pub use driver::DaqDriver;
pub use error::{DaqError, ErrorCode};
pub use simulated::{ChannelConfig, DriverCall, SimulatedBoard};
pub use types::{
    AiChanType, AnalogInputMode, ChannelSetting, DigitalPortType, TInOptions, TcType, TempScale,
    UlRange,
};
