//! Repository API
//!
//! Consolidated exports for the persistence layer.

pub use crate::repository::cache::{CacheKey, CacheResource, QueryCache};
pub use crate::repository::cached::CachedScanRepository;
pub use crate::repository::error::{RepositoryError, RepositoryErrorCode, RepositoryResult};
pub use crate::repository::memory::InMemoryScanRepository;
pub use crate::repository::statistics::aggregate;
pub use crate::repository::traits::ScanRepository;
pub use crate::repository::types::{
    DuplicateMatch, NewScan, ScanFilters, ScanQuality, ScanStatistics, ScanUpdate, VehicleScan,
};
