//! Run a scan over four channels of a simulated USB-2416 and print the data as a table.

use log::error;
use measurements::{Frequency, Temperature};

use mccdaq::{AnalogInputMode, SimulatedBoard, TcType};
use usb_2416::Usb2416;

fn main() {
    env_logger::init();

    // Channels 0 to 2 measure voltages, channel 3 a thermocouple
    let board = SimulatedBoard::new(0, "USB-2408")
        .with_voltage(0, 0.25)
        .with_sequence(1, vec![1.0, 1.1, 1.2, 1.3, 1.4])
        .with_voltage(2, -7.5)
        .with_temperature(3, Temperature::from_celsius(31.0));
    let mut inst = match Usb2416::try_new(board) {
        Ok(inst) => inst,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    let rate = Frequency::from_hertz(100.0);
    let configured = inst
        .configure_analog_inputs(vec![0, 1, 2], rate, AnalogInputMode::Differential)
        .and_then(|_| inst.configure_thermocouples(3, rate, TcType::K));
    if let Err(err) = configured {
        error!("Configuration failed: {err}");
        return;
    }

    match inst.scan(0..=3, 5, rate) {
        Ok(data) => {
            println!("{:>10}{:>10}{:>10}{:>10}", "AIn0", "AIn1", "AIn2", "AIn3");
            for row in data.rows() {
                let line: String = row.iter().map(|value| format!("{value:>10.3}")).collect();
                println!("{line}");
            }
        }
        Err(err) => error!("Scan failed: {err}"),
    }
}
