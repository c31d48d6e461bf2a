//! Tests for the CLI module

mod config_tests;
mod display_tests;
mod session_tests;
