//! Duplicate license detection
//!
//! Reports earlier scans of a license number within one business. The
//! detector only states facts; whether to save anyway is decided by the
//! operator through the controller.

use std::sync::Arc;

use crate::core::validation::validate_business_id;
use crate::repository::error::RepositoryResult;
use crate::repository::traits::ScanRepository;
use crate::repository::types::DuplicateMatch;

#[derive(Clone)]
pub struct DuplicateDetector {
    repository: Arc<dyn ScanRepository>,
}

impl DuplicateDetector {
    pub fn new(repository: Arc<dyn ScanRepository>) -> Self {
        Self { repository }
    }

    /// Earlier scans of `license_number` under `business_id`, most recent first.
    ///
    /// Matching is exact on the trimmed license number. `exclude_scan_id`
    /// removes the scan being edited from the result.
    pub async fn check_duplicate_license(
        &self,
        license_number: &str,
        business_id: &str,
        exclude_scan_id: Option<&str>,
    ) -> RepositoryResult<Vec<DuplicateMatch>> {
        let license_number = license_number.trim();
        if license_number.is_empty() {
            return Ok(Vec::new());
        }
        let business_id = validate_business_id(business_id)?;

        let mut scans = self
            .repository
            .find_by_license_number(business_id, license_number)
            .await?;

        // Results never cross tenants, whatever the backend returns
        scans.retain(|scan| {
            scan.business_id == business_id
                && scan.license_number.trim() == license_number
                && exclude_scan_id.is_none_or(|excluded| scan.id != excluded)
        });
        scans.sort_by(|a, b| b.scanned_at.cmp(&a.scanned_at));

        log::debug!(
            "Duplicate check for {} in {}: {} match(es)",
            license_number,
            business_id,
            scans.len()
        );
        Ok(scans.iter().map(DuplicateMatch::from).collect())
    }
}
