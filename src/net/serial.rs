//! src/net/serial.rs
//!
//! Serial frame source: reads fixed-size binary frames from a serial port
//! (e.g., /dev/ttyACM0) and pushes them into the shared plot.

use std::io;
use std::thread;
use std::time::Duration;

use crate::net::frames::read_frame;
use crate::phase::SharedPhase;

/// Spawn a thread that reads N-float frames from the given serial port.
pub fn start_serial_reader(port_name: &str, baud_rate: u32, shared: SharedPhase) {
    let port_name = port_name.to_string();
    thread::spawn(move || {
        println!("Opening serial port {} @ {} baud", port_name, baud_rate);
        let mut port = match serialport::new(&port_name, baud_rate)
            .timeout(Duration::from_secs(10))
            .open()
        {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Failed to open serial port {}: {:?}", port_name, e);
                return;
            }
        };
        let dims = match shared.read() {
            Ok(g) => g.store.dims(),
            Err(_) => return,
        };
        println!("Serial reader started on {}", port_name);
        loop {
            match read_frame(&mut port, dims) {
                Ok(Some(values)) => {
                    if let Ok(mut g) = shared.write() {
                        g.ingest(&values);
                    }
                }
                Ok(None) => break,
                // read timeouts just mean the simulation is quiet
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {}
                Err(e) => {
                    eprintln!("Error reading serial data: {:?}", e);
                    break;
                }
            }
        }
        println!("Serial reader exiting");
    });
}
