//! Error handling for DAQ drivers.

use std::fmt::Display;

use thiserror::Error;

use crate::AiChanType;

/// An error code as reported by the vendor driver.
///
/// The driver reports failures as plain integers together with a human-readable message. Only the
/// codes that callers actually branch on are named here, all others are carried as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    /// There is no board installed at the requested board number.
    pub const BAD_BOARD: ErrorCode = ErrorCode(1);

    /// Get the raw integer code.
    pub fn code(&self) -> i32 {
        self.0
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The error enum for all DAQ drivers and boards.
///
/// Every driver call and every accessor operation returns either its value or this error, such
/// that failures propagate with the `?` operator. Errors reported by the driver itself end up in
/// [`DaqError::Driver`], errors that are detected before the driver is called have their own
/// variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DaqError {
    /// The driver reported an error. The error contains the driver's code and its message, which
    /// is intended to be displayed to the user as is.
    #[error("{message} (error code {code})")]
    Driver {
        /// The driver's error code.
        code: ErrorCode,
        /// The message the driver provided for this error.
        message: String,
    },
    /// No board is available at the given board number.
    #[error("No board found at board number {board_num}.")]
    BoardNotFound {
        /// The board number that was requested.
        board_num: usize,
    },
    /// A board was found at the given board number, but it is not the expected device.
    #[error("Board {board_num} is a {found}, expected a {expected} device.")]
    BoardMismatch {
        /// The board number that was requested.
        board_num: usize,
        /// Description of the expected device(s).
        expected: String,
        /// The name the board reported.
        found: String,
    },
    /// The channel index requested is out of range. The error contains the index requested and
    /// the number of channels that are available.
    #[error(
        "Channel with index {idx} is out of range. Number of channels available: {nof_channels}"
    )]
    ChannelIndexOutOfRange {
        /// Index of the channel that is out of range.
        idx: usize,
        /// Total number of channels.
        nof_channels: usize,
    },
    /// The channel is not configured for the requested kind of acquisition.
    #[error("Channel {channel} is configured as {actual}, but {expected} is required.")]
    ChannelMisconfigured {
        /// The channel in question.
        channel: usize,
        /// The channel type the operation requires.
        expected: AiChanType,
        /// The channel type that is currently configured.
        actual: AiChanType,
    },
    /// A given float value is out of the specified range.
    #[error("Float value {value} is out of range. Allowed range is [{min}, {max}]")]
    FloatValueOutOfRange {
        /// The value that is out of range.
        value: f64,
        /// The minimum value that is allowed.
        min: f64,
        /// The maximum value that is allowed.
        max: f64,
    },
    /// A given integer value is out of the specified range.
    #[error("Integer value {value} is out of range. Allowed range is [{min}, {max}]")]
    IntValueOutOfRange {
        /// The value that is out of range.
        value: i64,
        /// The minimum value that is allowed.
        min: i64,
        /// The maximum value that is allowed.
        max: i64,
    },
    /// Error when an invalid argument is passed to a function. The message is intended for the
    /// user.
    #[error("{0}")]
    InvalidArgument(String),
    /// The called function is not supported by this driver.
    #[error("This function is not supported by the driver.")]
    NotSupported,
    /// A thermocouple read found no sensor connected to the channel.
    #[error("Open thermocouple detected on channel {channel}.")]
    OpenThermocouple {
        /// The channel without a sensor.
        channel: usize,
    },
}

impl DaqError {
    /// Check if this error means that there is no board at the requested board number.
    ///
    /// This checks the actual code reported by the driver.
    pub fn is_board_not_found(&self) -> bool {
        match self {
            DaqError::BoardNotFound { .. } => true,
            DaqError::Driver { code, .. } => *code == ErrorCode::BAD_BOARD,
            _ => false,
        }
    }

    /// Create a new driver error from a code and a message.
    pub fn driver(code: ErrorCode, message: &str) -> Self {
        DaqError::Driver {
            code,
            message: message.to_string(),
        }
    }
}
