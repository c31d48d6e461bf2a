//! Persistence seam for scan records
//!
//! Implementations talk to the hosted store. Every operation takes the
//! business id and must only ever see that business's records; a scan id that
//! belongs to another business is reported as not found.

use async_trait::async_trait;

use super::error::RepositoryResult;
use super::types::{NewScan, ScanFilters, ScanStatistics, ScanUpdate, VehicleScan};

#[async_trait]
pub trait ScanRepository: Send + Sync {
    /// Persist a new scan and return it with its assigned id
    async fn create_scan(&self, data: NewScan, business_id: &str)
        -> RepositoryResult<VehicleScan>;

    /// Scans matching `filters`, newest first
    async fn get_scans(
        &self,
        business_id: &str,
        filters: &ScanFilters,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<Vec<VehicleScan>>;

    async fn get_scan(&self, business_id: &str, scan_id: &str)
        -> RepositoryResult<Option<VehicleScan>>;

    /// All scans with this exact (trimmed) license number
    async fn find_by_license_number(
        &self,
        business_id: &str,
        license_number: &str,
    ) -> RepositoryResult<Vec<VehicleScan>>;

    async fn update_scan(
        &self,
        business_id: &str,
        scan_id: &str,
        update: ScanUpdate,
    ) -> RepositoryResult<VehicleScan>;

    async fn get_scan_statistics(&self, business_id: &str) -> RepositoryResult<ScanStatistics>;

    /// Mark a scan verified. Verifying an already verified scan changes nothing.
    async fn verify_scan(
        &self,
        business_id: &str,
        scan_id: &str,
        verified_by: &str,
    ) -> RepositoryResult<VehicleScan>;

    /// Permanently remove a scan
    async fn delete_scan(&self, business_id: &str, scan_id: &str) -> RepositoryResult<()>;
}
