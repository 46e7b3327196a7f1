//! Read thermocouple temperatures from a simulated USB-2416.

use log::error;
use measurements::{Frequency, Temperature};

use mccdaq::{SimulatedBoard, TcType, TempScale};
use usb_2416::{AcquisitionConfig, Usb2416};

fn main() {
    env_logger::init();

    // Type K thermocouples on channels 0 and 1, channel 2 is left open
    let board = SimulatedBoard::new(0, "USB-2416")
        .with_temperature(0, Temperature::from_celsius(22.4))
        .with_temperature(1, Temperature::from_celsius(80.1));

    let config = AcquisitionConfig::default()
        .with_tc_type(TcType::K)
        .with_temp_scale(TempScale::Fahrenheit)
        .with_data_rate(Frequency::from_hertz(10.0));
    let mut inst = match Usb2416::try_with_config(board, config) {
        Ok(inst) => inst,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    let channels = vec![0, 1, 2];
    if let Err(err) = inst.setup_thermocouples(channels.clone()) {
        error!("Configuration failed: {err}");
        return;
    }

    for idx in channels {
        match inst.read_temperatures(idx) {
            Ok(temp) => {
                if let Some(temp) = temp.single() {
                    println!("Channel {idx}: {:.2} °F", temp.as_fahrenheit());
                }
            }
            Err(err) => println!("Channel {idx}: {err}"),
        }
    }
}
