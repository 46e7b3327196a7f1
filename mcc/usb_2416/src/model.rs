//! Models of the USB-2400 series and their channel counts.

use std::fmt::Display;

/// The boards of the USB-2408/USB-2416 series that this driver supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// USB-2408, 16 single-ended / 8 differential inputs.
    Usb2408,
    /// USB-2408-2AO, like the USB-2408 with two analog outputs.
    Usb2408_2Ao,
    /// USB-2416, 32 single-ended / 16 differential inputs.
    Usb2416,
    /// USB-2416-4AO, like the USB-2416 with four analog outputs.
    Usb2416_4Ao,
}

impl Model {
    /// Description of the supported devices, used in error messages.
    pub const SERIES: &'static str = "USB-2408/USB-2416 series";

    /// Determine the model from the name the board reports.
    ///
    /// The check is made on the product name that is contained in the board name, the longer
    /// product names are checked first.
    pub fn from_board_name(name: &str) -> Option<Self> {
        [
            Model::Usb2416_4Ao,
            Model::Usb2416,
            Model::Usb2408_2Ao,
            Model::Usb2408,
        ]
        .into_iter()
        .find(|model| name.contains(model.product_name()))
    }

    /// The product name as reported by the board.
    pub fn product_name(&self) -> &'static str {
        match self {
            Model::Usb2408 => "USB-2408",
            Model::Usb2408_2Ao => "USB-2408-2AO",
            Model::Usb2416 => "USB-2416",
            Model::Usb2416_4Ao => "USB-2416-4AO",
        }
    }

    /// USB product id of the model.
    pub fn product_id(&self) -> u16 {
        match self {
            Model::Usb2408 => 253,
            Model::Usb2408_2Ao => 254,
            Model::Usb2416 => 208,
            Model::Usb2416_4Ao => 209,
        }
    }

    /// Number of analog inputs, counted as single-ended channels.
    pub fn num_analog_inputs(&self) -> usize {
        match self {
            Model::Usb2408 | Model::Usb2408_2Ao => 16,
            Model::Usb2416 | Model::Usb2416_4Ao => 32,
        }
    }

    /// Number of analog outputs.
    pub fn num_analog_outputs(&self) -> usize {
        match self {
            Model::Usb2408 | Model::Usb2416 => 0,
            Model::Usb2408_2Ao => 2,
            Model::Usb2416_4Ao => 4,
        }
    }

    /// Number of counter inputs.
    pub fn num_counters(&self) -> usize {
        2
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.product_name())
    }
}
