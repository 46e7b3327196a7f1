//! Read averaged voltages from a simulated USB-2416.
//!
//! Run with `RUST_LOG=debug` to see the individual driver calls.

use log::error;
use measurements::Frequency;

use mccdaq::{AnalogInputMode, DaqError, SimulatedBoard};
use usb_2416::Usb2416;

fn main() {
    env_logger::init();

    // Board 0 with a slowly rising signal on channel 0 and a constant one on channel 1
    let board = SimulatedBoard::new(0, "USB-2416")
        .with_sequence(0, (0..50).map(|i| f64::from(i) * 0.1).collect())
        .with_voltage(1, -2.5);

    println!("Looking for board 0 to be a USB-2416 series board...");
    let mut inst = match Usb2416::try_new(board) {
        Ok(inst) => inst,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    println!("{} found as board number {}.", inst.model(), inst.board_num());

    if let Err(err) = run(&mut inst) {
        error!("Reading failed: {err}");
    }
}

fn run(inst: &mut Usb2416<SimulatedBoard>) -> Result<(), DaqError> {
    inst.identify()?;
    inst.configure_analog_inputs(
        vec![0, 1],
        Frequency::from_hertz(60.0),
        AnalogInputMode::Differential,
    )?;

    // a single channel gives a single value
    for _ in 0..5 {
        if let Some(voltage) = inst.read_averaged(0)?.single() {
            println!("AIn0: {:.6} V", voltage.as_volts());
        }
    }

    // a list of channels gives a list of values
    let voltages = inst.read_averaged([0, 1])?.into_vec();
    for (idx, voltage) in [0, 1].iter().zip(voltages) {
        println!("AIn{idx}: {:.6} V", voltage.as_volts());
    }
    Ok(())
}
