//! src/app.rs
//!
//! Live phase-plot monitor for a streamed N-dimensional simulation.
//! Receives binary sample frames (TCP, serial, or a built-in demo source),
//! projects two selected dimensions onto a 2D phase plot, and tracks the
//! most recent sample with a marker.
//!
//! # Top-Level Application (`app.rs`)
//!
//! Constructs the shared plot, starts the frame-source and control threads,
//! and runs the UI main loop for the terminal-based phase plot.
//!
//! ## Overview
//! The application:
//! - Renders a live phase plot of two dimensions of the inbound stream.
//! - Provides keyboard controls and modal dialogs for reconfiguration.
//! - Spawns a TCP control server that accepts line-based ASCII commands.
//!
//! # Building and Running
//!
//! ```text
//! cargo run --release -- --dims 3 --demo
//! ```
//!
//! ## Options
//! - `--dims <n>` — dimension count N of the stream (default 2).
//! - `--listen <addr>` — TCP frame source bind address (default `127.0.0.1:9900`).
//! - `--serial <port>` — also read frames from a serial port (e.g. `/dev/ttyACM0`).
//! - `--baud <rate>` — serial baud rate (default 115200).
//! - `--control <addr>` — control server bind address (default `127.0.0.1:4000`).
//! - `--window <secs>` — display window length in simulation seconds (default 10).
//! - `--rate <hz>` — nominal sample rate used to stamp frames (default 60).
//! - `--layout <path>` — layout persistence file (default `phase_layout.json`).
//! - `--demo` — synthesize frames internally (no external source needed).
//!
//! # Keyboard Controls (Interactive)
//!
//! - **r** — Open the range dialog (`<min>,<max>`; must be ordered and contain
//!   zero, since both axes cross there).
//! - **i** — Open the indices dialog (`<i>,<j>`; integers in `[0, N)`).
//! - **c** — Reset: clear the sample stream, keep the configuration.
//! - **q** — Quit and restore terminal state.
//!
//! Inside a dialog, typing edits the field, **Enter** applies (validation
//! errors show in place and nothing is mutated), **Esc** cancels.
//!
//! # Inbound Frame Format
//!
//! One frame is exactly N little-endian 32-bit floats, no header. Frames with
//! any other length are dropped silently.
//!
//! # Remote TCP Protocol (ASCII, Line-Based)
//!
//! Each received line is a whitespace-separated command; the server replies
//! with one line per command (`OK` or `ERR <msg>`).
//!
//! - `range <min> <max>` — reconfigure the shared axis range.
//! - `indices <i> <j>` — reconfigure the plotted dimensions.
//! - `reset` — simulation reset (data cleared, configuration kept).
//! - `time <t>` — move the simulation clock; the window follows.
//! - `quit` — replies `OK bye` and closes the connection.
//!
//! ## Example Session
//!
//! ```text
//! $ nc 127.0.0.1 4000
//! range -5 10
//! OK
//! indices 0 2
//! OK
//! range 2 10
//! ERR range must contain zero (got 2, 10)
//! ```
//!
//! # Redraw Coalescing
//!
//! Inbound frames only mark the plot dirty; the UI loop performs at most one
//! rebuild per frame tick, so bursty streaming never multiplies render work.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use rand::Rng;
use ratatui::style::Color;

use crate::net::control::control_server;
use crate::net::listen::frame_server;
use crate::net::serial::start_serial_reader;
use crate::panels::{DialogPanel, HistoryPanel, InfoPanel, ParagraphPanel, PhasePanel, TitlePanel};
use crate::phase::{ConfigError, PhaseShared, Range, SharedPhase};
use crate::series::SeriesConfig;
use crate::ui::{Panel, group, leaf};

/// Runtime options, filled from `std::env::args`.
#[derive(Clone, Debug)]
pub struct Options {
    pub dims: usize,
    pub listen: String,
    pub serial: Option<String>,
    pub baud: u32,
    pub control: String,
    pub window_secs: f64,
    pub rate_hz: f64,
    pub layout: PathBuf,
    pub demo: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dims: 2,
            listen: "127.0.0.1:9900".to_string(),
            serial: None,
            baud: 115_200,
            control: "127.0.0.1:4000".to_string(),
            window_secs: 10.0,
            rate_hz: 60.0,
            layout: PathBuf::from("phase_layout.json"),
            demo: false,
        }
    }
}

impl Options {
    /// Parse command-line flags; unknown flags or missing values error out
    /// with a usage hint.
    pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut opts = Self::default();
        while let Some(flag) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .ok_or_else(|| format!("{name} requires a value"))
            };
            match flag.as_str() {
                "--dims" => {
                    opts.dims = value("--dims")?
                        .parse()
                        .map_err(|_| "--dims expects a positive integer".to_string())?;
                    if opts.dims == 0 {
                        return Err("--dims must be at least 1".to_string());
                    }
                }
                "--listen" => opts.listen = value("--listen")?,
                "--serial" => opts.serial = Some(value("--serial")?),
                "--baud" => {
                    opts.baud = value("--baud")?
                        .parse()
                        .map_err(|_| "--baud expects an integer".to_string())?;
                }
                "--control" => opts.control = value("--control")?,
                "--window" => {
                    opts.window_secs = value("--window")?
                        .parse()
                        .map_err(|_| "--window expects seconds".to_string())?;
                }
                "--rate" => {
                    opts.rate_hz = value("--rate")?
                        .parse()
                        .map_err(|_| "--rate expects hz".to_string())?;
                }
                "--layout" => opts.layout = PathBuf::from(value("--layout")?),
                "--demo" => opts.demo = true,
                other => {
                    return Err(format!(
                        "unknown flag {other}\nusage: phase_scope [--dims N] [--listen ADDR] \
                         [--serial PORT] [--baud RATE] [--control ADDR] [--window SECS] \
                         [--rate HZ] [--layout PATH] [--demo]"
                    ));
                }
            }
        }
        Ok(opts)
    }
}

/// Modal dialog state owned by the UI loop.
enum Dialog {
    None,
    Range { input: String, error: Option<String> },
    Indices { input: String, error: Option<String> },
}

/// Parse the `"<i>,<j>"` form of the indices dialog. Integer parsing doubles
/// as the integrality check: `"1.5"` is rejected, not truncated.
fn parse_index_pair(input: &str) -> Result<(i64, i64), ConfigError> {
    let mut parts = input.split(',');
    let (a, b) = match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => (a.trim(), b.trim()),
        _ => return Err(ConfigError::Malformed(input.to_string())),
    };
    let i: i64 = a
        .parse()
        .map_err(|_| ConfigError::BadNumber(a.to_string()))?;
    let j: i64 = b
        .parse()
        .map_err(|_| ConfigError::BadNumber(b.to_string()))?;
    Ok((i, j))
}

/// Spawn a thread that synthesizes noisy harmonic frames, so the plot runs
/// without any external simulation attached.
fn start_demo_feeder(shared: SharedPhase, dims: usize, rate_hz: f64) {
    thread::spawn(move || {
        let dt = 1.0 / rate_hz.max(1.0);
        let mut rng = rand::rng();
        let mut t = 0.0_f64;
        loop {
            let values: Vec<f64> = (0..dims)
                .map(|k| {
                    let freq = 1.0 + 0.5 * k as f64;
                    let phase = std::f64::consts::FRAC_PI_2 * k as f64;
                    let noise: f64 = rng.random_range(-0.03..0.03);
                    0.8 * (t * freq + phase).sin() + noise
                })
                .collect();
            if let Ok(mut g) = shared.write() {
                g.ingest(&values);
            }
            t += dt;
            thread::sleep(Duration::from_secs_f64(dt));
        }
    });
}

pub fn run() -> color_eyre::Result<()> {
    let opts = Options::parse(std::env::args().skip(1)).map_err(|e| color_eyre::eyre::eyre!(e))?;

    // Shared plot
    let cfg = SeriesConfig::new(opts.dims, opts.window_secs, 1.0 / opts.rate_hz.max(1.0), 100_000);
    let mut plot = PhaseShared::new(cfg, "Phase", Color::Cyan);
    plot.import_layout(opts.layout.clone());
    let shared: SharedPhase = std::sync::Arc::new(std::sync::RwLock::new(plot));

    // Control thread
    {
        let shared_for_thread = shared.clone();
        let addr = opts.control.clone();
        thread::spawn(move || control_server(&addr, shared_for_thread));
    }

    // Frame sources
    {
        let shared_for_thread = shared.clone();
        let addr = opts.listen.clone();
        thread::spawn(move || frame_server(&addr, shared_for_thread));
    }
    if let Some(port) = &opts.serial {
        start_serial_reader(port, opts.baud, shared.clone());
    }
    if opts.demo {
        start_demo_feeder(shared.clone(), opts.dims, opts.rate_hz);
    }

    let subtitle = format!(
        "N={}  frames={}  ctrl={}{}",
        opts.dims,
        opts.listen,
        opts.control,
        if opts.demo { "  (demo)" } else { "" },
    );

    // UI setup
    let mut terminal = ratatui::init();
    let frame_time = Duration::from_millis(100);
    let mut dialog = Dialog::None;
    let mut running = true;

    while running {
        let frame_start = std::time::Instant::now();

        // Left: phase plot; right: history + info stacked.
        let plot_region = leaf(Box::new(PhasePanel::new(shared.clone())) as Box<dyn Panel>);
        let side = group(
            ratatui::layout::Direction::Vertical,
            vec![
                ratatui::layout::Constraint::Percentage(55),
                ratatui::layout::Constraint::Percentage(25),
                ratatui::layout::Constraint::Min(3),
            ],
            vec![
                leaf(Box::new(HistoryPanel::new(shared.clone())) as Box<dyn Panel>),
                leaf(Box::new(InfoPanel::new(shared.clone())) as Box<dyn Panel>),
                leaf(Box::new(ParagraphPanel::new(
                    "R=Range  I=Indices  C=Reset  Q=Quit",
                    "Controls",
                )) as Box<dyn Panel>),
            ],
        );

        let root = group(
            ratatui::layout::Direction::Vertical,
            vec![
                ratatui::layout::Constraint::Length(3),
                ratatui::layout::Constraint::Min(10),
                ratatui::layout::Constraint::Length(1),
            ],
            vec![
                leaf(Box::new(TitlePanel::new("Phase Scope", &subtitle)) as Box<dyn Panel>),
                group(
                    ratatui::layout::Direction::Horizontal,
                    vec![
                        ratatui::layout::Constraint::Percentage(70),
                        ratatui::layout::Constraint::Percentage(30),
                    ],
                    vec![plot_region, side],
                ),
                leaf(Box::new(ParagraphPanel::dimmed("Press Q to quit.", "")) as Box<dyn Panel>),
            ],
        );

        let modal: Option<DialogPanel> = match &dialog {
            Dialog::None => None,
            Dialog::Range { input, error } => Some(DialogPanel::new(
                "Set range",
                "Axis range as <min>,<max> (must contain zero):",
                input,
                error.as_deref(),
            )),
            Dialog::Indices { input, error } => Some(DialogPanel::new(
                "Set indices",
                "Plotted dimensions as <i>,<j>:",
                input,
                error.as_deref(),
            )),
        };

        terminal.draw(|f| {
            root.draw(f, f.area());
            if let Some(m) = &modal {
                m.draw(f, f.area());
            }
        })?;

        // Keyboard + resize events
        while crossterm::event::poll(Duration::from_millis(0))? {
            match crossterm::event::read()? {
                crossterm::event::Event::Resize(_, _) => {
                    if let Ok(mut g) = shared.write() {
                        g.mark_dirty();
                    }
                }
                crossterm::event::Event::Key(key)
                    if key.kind == crossterm::event::KeyEventKind::Press =>
                {
                    dialog = match dialog {
                        Dialog::None => match key.code {
                            crossterm::event::KeyCode::Char('q') => {
                                running = false;
                                Dialog::None
                            }
                            crossterm::event::KeyCode::Char('c') => {
                                if let Ok(mut g) = shared.write() {
                                    g.reset();
                                }
                                Dialog::None
                            }
                            crossterm::event::KeyCode::Char('r') => {
                                let current = shared
                                    .read()
                                    .map(|g| g.view.range().to_string())
                                    .unwrap_or_default();
                                Dialog::Range {
                                    input: current,
                                    error: None,
                                }
                            }
                            crossterm::event::KeyCode::Char('i') => {
                                let current = shared
                                    .read()
                                    .map(|g| format!("{},{}", g.view.index_x(), g.view.index_y()))
                                    .unwrap_or_default();
                                Dialog::Indices {
                                    input: current,
                                    error: None,
                                }
                            }
                            _ => Dialog::None,
                        },
                        Dialog::Range { mut input, error } => match key.code {
                            crossterm::event::KeyCode::Esc => Dialog::None,
                            crossterm::event::KeyCode::Enter => {
                                let applied = Range::parse(&input).and_then(|r| {
                                    shared
                                        .write()
                                        .map_err(|_| ConfigError::Malformed(input.clone()))?
                                        .set_range(r.min(), r.max())
                                });
                                match applied {
                                    Ok(()) => Dialog::None,
                                    Err(e) => Dialog::Range {
                                        input,
                                        error: Some(e.to_string()),
                                    },
                                }
                            }
                            crossterm::event::KeyCode::Backspace => {
                                input.pop();
                                Dialog::Range { input, error }
                            }
                            crossterm::event::KeyCode::Char(c) => {
                                input.push(c);
                                Dialog::Range { input, error }
                            }
                            _ => Dialog::Range { input, error },
                        },
                        Dialog::Indices { mut input, error } => match key.code {
                            crossterm::event::KeyCode::Esc => Dialog::None,
                            crossterm::event::KeyCode::Enter => {
                                let applied = parse_index_pair(&input).and_then(|(i, j)| {
                                    shared
                                        .write()
                                        .map_err(|_| ConfigError::Malformed(input.clone()))?
                                        .set_indices(i, j)
                                });
                                match applied {
                                    Ok(()) => Dialog::None,
                                    Err(e) => Dialog::Indices {
                                        input,
                                        error: Some(e.to_string()),
                                    },
                                }
                            }
                            crossterm::event::KeyCode::Backspace => {
                                input.pop();
                                Dialog::Indices { input, error }
                            }
                            crossterm::event::KeyCode::Char(c) => {
                                input.push(c);
                                Dialog::Indices { input, error }
                            }
                            _ => Dialog::Indices { input, error },
                        },
                    };
                }
                _ => {}
            }
        }

        if !running {
            break;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }

    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, String> {
        Options::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_flags() {
        let opts = parse(&[]).unwrap();
        assert_eq!(opts.dims, 2);
        assert!(!opts.demo);
        assert_eq!(opts.control, "127.0.0.1:4000");
    }

    #[test]
    fn flags_override_defaults() {
        let opts = parse(&["--dims", "5", "--demo", "--window", "2.5"]).unwrap();
        assert_eq!(opts.dims, 5);
        assert!(opts.demo);
        assert_eq!(opts.window_secs, 2.5);
    }

    #[test]
    fn zero_dims_rejected() {
        assert!(parse(&["--dims", "0"]).is_err());
        assert!(parse(&["--dims"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn index_pair_requires_two_integers() {
        assert_eq!(parse_index_pair("1, 3"), Ok((1, 3)));
        assert_eq!(parse_index_pair("0,0"), Ok((0, 0)));
        assert!(parse_index_pair("1").is_err());
        assert!(parse_index_pair("1,2,3").is_err());
        // non-integral input is rejected, not truncated
        assert!(parse_index_pair("1.5,2").is_err());
        assert!(parse_index_pair("a,2").is_err());
    }
}
