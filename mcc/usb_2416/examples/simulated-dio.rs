//! Write and read the digital port of a simulated USB-2416.
//!
//! The outputs are open-drain: Writing a 1 pulls a line low. All lines are released at the end.

use log::error;

use mccdaq::{DaqError, SimulatedBoard};
use usb_2416::{DigitalPort, Usb2416};

fn main() {
    env_logger::init();

    let board = SimulatedBoard::new(0, "USB-2416");
    let mut inst = match Usb2416::try_new(board) {
        Ok(inst) => inst,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    let mut port = inst.get_digital_port();

    if let Err(err) = run(&mut port) {
        error!("{err}");
    }

    println!("Releasing all lines.");
    if let Err(err) = port.write(0) {
        error!("Could not release the lines: {err}");
    }
}

fn run(port: &mut DigitalPort<SimulatedBoard>) -> Result<(), DaqError> {
    // walk a single low line across the port
    for bit in 0..8 {
        port.write(1 << bit)?;
        let bits: Vec<u8> = port.read_bits()?.into_iter().map(u8::from).collect();
        println!("DIO0..7: {bits:?}, port value {}", port.read()?);
    }
    Ok(())
}
