//! Saved scan management for one business
//!
//! Listing, verification, edits and deletion of records that already exist.
//! Every call is scoped to the business the service was created for.

use std::sync::Arc;

use crate::core::validation::validate_business_id;
use crate::notifications::api::{shared_manager, ScanEvent, SharedNotificationManager};
use crate::repository::traits::ScanRepository;
use crate::repository::types::{
    DuplicateMatch, ScanFilters, ScanStatistics, ScanUpdate, VehicleScan,
};
use crate::scanner::duplicate::DuplicateDetector;
use crate::scanner::error::ScanResult;

/// An edited scan together with any other scans now sharing its license
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedScan {
    pub scan: VehicleScan,
    pub duplicates: Vec<DuplicateMatch>,
}

pub struct ScanRecords {
    business_id: String,
    repository: Arc<dyn ScanRepository>,
    detector: DuplicateDetector,
    notifications: SharedNotificationManager,
}

impl ScanRecords {
    pub fn new(repository: Arc<dyn ScanRepository>, business_id: &str) -> ScanResult<Self> {
        let business_id = validate_business_id(business_id)
            .map_err(crate::repository::error::RepositoryError::from)?
            .to_string();
        Ok(Self {
            business_id,
            detector: DuplicateDetector::new(Arc::clone(&repository)),
            repository,
            notifications: shared_manager(),
        })
    }

    /// Publish into an existing manager, typically the scan controller's
    pub fn with_notifications(mut self, notifications: SharedNotificationManager) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn business_id(&self) -> &str {
        &self.business_id
    }

    pub async fn list(
        &self,
        filters: &ScanFilters,
        limit: usize,
        offset: usize,
    ) -> ScanResult<Vec<VehicleScan>> {
        Ok(self
            .repository
            .get_scans(&self.business_id, filters, limit, offset)
            .await?)
    }

    pub async fn get(&self, scan_id: &str) -> ScanResult<Option<VehicleScan>> {
        Ok(self.repository.get_scan(&self.business_id, scan_id).await?)
    }

    pub async fn statistics(&self) -> ScanResult<ScanStatistics> {
        Ok(self
            .repository
            .get_scan_statistics(&self.business_id)
            .await?)
    }

    /// Mark a scan verified. Verification cannot be undone.
    pub async fn verify(&self, scan_id: &str, verified_by: &str) -> ScanResult<VehicleScan> {
        let scan = self
            .repository
            .verify_scan(&self.business_id, scan_id, verified_by)
            .await?;
        log::info!("Scan {} verified by {:?}", scan.id, scan.verified_by);
        self.publish(ScanEvent::ScanVerified { scan: scan.clone() })
            .await;
        Ok(scan)
    }

    pub async fn delete(&self, scan_id: &str) -> ScanResult<()> {
        self.repository
            .delete_scan(&self.business_id, scan_id)
            .await?;
        log::info!("Scan {} deleted", scan_id);
        self.publish(ScanEvent::ScanDeleted {
            business_id: self.business_id.clone(),
            scan_id: scan_id.to_string(),
        })
        .await;
        Ok(())
    }

    /// Apply an edit. A changed license number is checked against the other
    /// scans of the business and any matches are reported, not rejected.
    pub async fn update(&self, scan_id: &str, update: ScanUpdate) -> ScanResult<UpdatedScan> {
        let duplicates = match &update.license_number {
            Some(license) => self
                .detector
                .check_duplicate_license(license, &self.business_id, Some(scan_id))
                .await
                .unwrap_or_else(|err| {
                    log::warn!("Duplicate check during edit of {} failed: {}", scan_id, err);
                    Vec::new()
                }),
            None => Vec::new(),
        };

        let scan = self
            .repository
            .update_scan(&self.business_id, scan_id, update)
            .await?;
        if !duplicates.is_empty() {
            log::info!(
                "Edited scan {} shares license {} with {} other scan(s)",
                scan.id,
                scan.license_number,
                duplicates.len()
            );
        }
        self.publish(ScanEvent::ScanUpdated { scan: scan.clone() })
            .await;
        Ok(UpdatedScan { scan, duplicates })
    }

    async fn publish(&self, event: ScanEvent) {
        if let Err(err) = self.notifications.lock().await.publish(event) {
            log::warn!("{}", err);
        }
    }
}
