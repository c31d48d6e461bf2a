//! Scan persistence
//!
//! The [`traits::ScanRepository`] seam is what the rest of the crate depends
//! on. [`memory::InMemoryScanRepository`] is a complete in-process
//! implementation and [`cached::CachedScanRepository`] adds a per-business
//! TTL cache in front of any implementation.

pub mod api;
pub mod cache;
pub mod cached;
pub mod error;
pub mod ids;
pub mod memory;
pub mod statistics;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;
