//! src/main.rs
//!
//! Entrypoint: installs color-eyre reporting and delegates to `app::run()`.

mod app;
mod net;
mod panels;
mod phase;
mod series;
mod ui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    app::run()
}
