//! src/net/control.rs
//!
//! Tiny line-based TCP control server: the host-notification and
//! reconfiguration surface for remote bindings.

use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::thread;

use crate::phase::{PhaseGuard, SharedPhase};

/// Start the control server and spawn a handler thread per client.
pub fn control_server(addr: &str, shared: SharedPhase) {
    let listener = match TcpListener::bind(addr) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("control_server: bind error {} on {}", e, addr);
            return;
        }
    };

    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                let g = shared.clone();
                thread::spawn(move || handle_control_client(s, g));
            }
            Err(e) => {
                eprintln!("control_server: accept error: {}", e);
            }
        }
    }
}

/// Handle a single client; simple whitespace-split ASCII commands.
///
/// Commands:
/// - `range <min> <max>`
/// - `indices <i> <j>`
/// - `reset`
/// - `time <t>`
/// - `quit`
pub fn handle_control_client(mut s: TcpStream, shared: SharedPhase) {
    let reader = match s.try_clone() {
        Ok(clone) => clone,
        Err(_) => return,
    };
    let mut rdr = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        if rdr.read_line(&mut line).is_err() {
            break;
        }
        if line.is_empty() {
            break;
        }
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        let parts: Vec<_> = raw.split_whitespace().collect();

        let reply = match parts[0].to_lowercase().as_str() {
            "range" if parts.len() == 3 => {
                match (parts[1].parse::<f64>(), parts[2].parse::<f64>()) {
                    (Ok(min), Ok(max)) => {
                        let mut g: PhaseGuard<'_> = match shared.write() {
                            Ok(g) => g,
                            Err(_) => break,
                        };
                        match g.set_range(min, max) {
                            Ok(()) => "OK\n".to_string(),
                            Err(e) => format!("ERR {}\n", e),
                        }
                    }
                    _ => "ERR expected two numbers\n".to_string(),
                }
            }

            "indices" if parts.len() == 3 => {
                match (parts[1].parse::<i64>(), parts[2].parse::<i64>()) {
                    (Ok(i), Ok(j)) => {
                        let mut g: PhaseGuard<'_> = match shared.write() {
                            Ok(g) => g,
                            Err(_) => break,
                        };
                        match g.set_indices(i, j) {
                            Ok(()) => "OK\n".to_string(),
                            Err(e) => format!("ERR {}\n", e),
                        }
                    }
                    _ => "ERR expected two integers\n".to_string(),
                }
            }

            "reset" if parts.len() == 1 => match shared.write() {
                Ok(mut g) => {
                    g.reset();
                    "OK\n".to_string()
                }
                Err(_) => break,
            },

            "time" if parts.len() == 2 => match parts[1].parse::<f64>() {
                Ok(t) if t.is_finite() => match shared.write() {
                    Ok(mut g) => {
                        g.adjust_time(t);
                        "OK\n".to_string()
                    }
                    Err(_) => break,
                },
                _ => "ERR time\n".to_string(),
            },

            "quit" => {
                let _ = s.write_all(b"OK bye\n");
                break;
            }

            _ => format!("ERR unknown {}\n", parts.join(" ")),
        };
        let _ = s.write_all(reply.as_bytes());
    }

    let _ = s.shutdown(Shutdown::Both);
}
