//! Command line front end
//!
//! A thin shell over the scanner library: argument parsing, the TOML
//! configuration file, terminal output and the interactive scan session.

pub mod args;
pub mod config;
pub mod display;
pub mod session;

#[cfg(test)]
mod tests;
