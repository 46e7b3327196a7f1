//! Sweep an analog output of a simulated USB-2416-4AO from -10 V to +10 V.
//!
//! The output is set back to 0 V at the end, also if the sweep fails.

use log::error;
use measurements::Voltage;

use mccdaq::{DaqError, SimulatedBoard};
use usb_2416::{AnalogOutput, Usb2416};

fn main() {
    env_logger::init();

    let board = SimulatedBoard::new(0, "USB-2416-4AO");
    let mut inst = match Usb2416::try_new(board) {
        Ok(inst) => inst,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    println!("{} found as board number {}.", inst.model(), inst.board_num());

    let mut ao = match inst.get_analog_output(0) {
        Ok(ao) => ao,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    if let Err(err) = sweep(&mut ao) {
        error!("Sweep failed: {err}");
    }

    println!("Setting AOut{} to 0 V.", ao.index());
    if let Err(err) = ao.set_zero() {
        error!("Could not zero the output: {err}");
    }

    // the accessor sets many outputs at once
    if let Err(err) = inst.write_scaled([1, 2, 3], Voltage::from_volts(1.5)) {
        error!("{err}");
    }
}

fn sweep(ao: &mut AnalogOutput<SimulatedBoard>) -> Result<(), DaqError> {
    for step in -100..=100 {
        let volts = f64::from(step) * 0.1;
        let counts = ao.set_voltage(Voltage::from_volts(volts))?;
        println!("Setting AOut{} to {volts:.1} V as {counts} counts.", ao.index());
    }
    Ok(())
}
