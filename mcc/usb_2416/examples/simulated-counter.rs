//! Count pulses on counter 0 of a simulated USB-2416.
//!
//! DIO0 is wired to the input of counter 0, toggling DIO0 increments the counter.

use log::error;

use mccdaq::{DaqError, SimulatedBoard};
use usb_2416::{Counter, DigitalPort, Usb2416};

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
    let mut ctr = match inst.get_counter(0) {
        Ok(ctr) => ctr,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    if let Err(err) = run(&mut port, &mut ctr) {
        error!("{err}");
    }
    match ctr.read() {
        Ok(value) => println!("Final reading Ctr0: {value} counts."),
        Err(err) => error!("{err}"),
    }
}

fn run(
    port: &mut DigitalPort<SimulatedBoard>,
    ctr: &mut Counter<SimulatedBoard>,
) -> Result<(), DaqError> {
    ctr.clear()?;
    let mut value = ctr.read()?;
    while value < 100 {
        println!("Reading Ctr0: {value} counts.");
        for _ in 0..10 {
            port.set_bit(0, true)?;
            port.set_bit(0, false)?;
        }
        value = ctr.read()?;
    }
    Ok(())
}
