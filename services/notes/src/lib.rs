//! Notes service library crate
//!
//! Configuration, command-line definitions and command execution for the
//! `notes` binary. `main.rs` only wires these together.

pub mod cli;
pub mod commands;
pub mod config;
