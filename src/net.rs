//! src/net.rs
//!
//! Top-level network module: inbound frame sources and the control server.

pub mod control;
pub mod frames;
pub mod listen;
pub mod serial;
