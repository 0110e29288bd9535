//! src/net/listen.rs
//!
//! TCP frame source: accepts simulation clients and feeds their binary frames
//! into the shared plot, one reader thread per client.

use std::io;
use std::net::{TcpListener, TcpStream};
use std::thread;

use crate::net::frames::read_frame;
use crate::phase::SharedPhase;

/// Bind the frame listener and serve clients until the process exits.
pub fn frame_server(addr: &str, shared: SharedPhase) {
    let listener = match TcpListener::bind(addr) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("frame_server: bind error {} on {}", e, addr);
            return;
        }
    };

    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                let g = shared.clone();
                thread::spawn(move || handle_frame_client(s, g));
            }
            Err(e) => {
                eprintln!("frame_server: accept error: {}", e);
            }
        }
    }
}

/// Read fixed-size frames from one client until EOF or an I/O error.
fn handle_frame_client(mut s: TcpStream, shared: SharedPhase) {
    let dims = match shared.read() {
        Ok(g) => g.store.dims(),
        Err(_) => return,
    };
    loop {
        match read_frame(&mut s, dims) {
            Ok(Some(values)) => {
                if let Ok(mut g) = shared.write() {
                    g.ingest(&values);
                }
            }
            Ok(None) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                eprintln!("frame client dropped: {}", e);
                break;
            }
        }
    }
}
