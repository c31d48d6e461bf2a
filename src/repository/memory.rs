//! In-memory scan repository
//!
//! Backs the demo front end and the test suite. Records of every business
//! live in one list; each operation filters by business id first.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryResult};
use super::ids::ScanIdGenerator;
use super::statistics::aggregate;
use super::traits::ScanRepository;
use super::types::{NewScan, ScanFilters, ScanStatistics, ScanUpdate, VehicleScan};
use crate::core::time::{system_clock, Clock};
use crate::core::validation::{
    validate_business_id, validate_license_number, validate_page_size, validate_scan_id,
    validate_verifier,
};

pub struct InMemoryScanRepository {
    scans: RwLock<Vec<VehicleScan>>,
    ids: ScanIdGenerator,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryScanRepository {
    fn default() -> Self {
        Self::new(system_clock())
    }
}

impl InMemoryScanRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            scans: RwLock::new(Vec::new()),
            ids: ScanIdGenerator::new(),
            clock,
        }
    }

    /// Number of stored scans across all businesses
    pub async fn len(&self) -> usize {
        self.scans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.scans.read().await.is_empty()
    }

    /// Business scans, newest first. Equal timestamps keep the most recently
    /// created scan first.
    async fn scoped(&self, business_id: &str) -> Vec<VehicleScan> {
        let scans = self.scans.read().await;
        let mut scoped: Vec<VehicleScan> = scans
            .iter()
            .rev()
            .filter(|s| s.business_id == business_id)
            .cloned()
            .collect();
        scoped.sort_by(|a, b| b.scanned_at.cmp(&a.scanned_at));
        scoped
    }
}

#[async_trait]
impl ScanRepository for InMemoryScanRepository {
    async fn create_scan(
        &self,
        data: NewScan,
        business_id: &str,
    ) -> RepositoryResult<VehicleScan> {
        let business_id = validate_business_id(business_id)?;
        let license_number = validate_license_number(&data.license_number)?.to_string();

        let scan = VehicleScan {
            id: self
                .ids
                .next_id(business_id, &license_number, data.scanned_at),
            business_id: business_id.to_string(),
            scanned_by: data.scanned_by,
            scanned_by_email: data.scanned_by_email,
            license_number,
            province: data.province,
            expiry_date: data.expiry_date,
            vehicle_type: data.vehicle_type,
            raw_payload: data.raw_payload,
            scanned_at: data.scanned_at,
            make: data.make,
            model: data.model,
            year: data.year,
            vin: data.vin,
            owner_name: data.owner_name,
            owner_id_number: data.owner_id_number,
            scan_quality: data.scan_quality,
            verified: false,
            verified_by: None,
            verified_at: None,
            notes: data.notes,
        };

        self.scans.write().await.push(scan.clone());
        log::debug!("Stored scan {} for business {}", scan.id, scan.business_id);
        Ok(scan)
    }

    async fn get_scans(
        &self,
        business_id: &str,
        filters: &ScanFilters,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<Vec<VehicleScan>> {
        let business_id = validate_business_id(business_id)?;
        let limit = validate_page_size(limit)?;

        Ok(self
            .scoped(business_id)
            .await
            .into_iter()
            .filter(|s| filters.matches(s))
            .skip(offset)
            .take(limit)
            .collect())
    }

    async fn get_scan(
        &self,
        business_id: &str,
        scan_id: &str,
    ) -> RepositoryResult<Option<VehicleScan>> {
        let business_id = validate_business_id(business_id)?;
        let scan_id = validate_scan_id(scan_id)?;

        let scans = self.scans.read().await;
        Ok(scans
            .iter()
            .find(|s| s.business_id == business_id && s.id == scan_id)
            .cloned())
    }

    async fn find_by_license_number(
        &self,
        business_id: &str,
        license_number: &str,
    ) -> RepositoryResult<Vec<VehicleScan>> {
        let business_id = validate_business_id(business_id)?;
        let license_number = license_number.trim();

        Ok(self
            .scoped(business_id)
            .await
            .into_iter()
            .filter(|s| s.license_number == license_number)
            .collect())
    }

    async fn update_scan(
        &self,
        business_id: &str,
        scan_id: &str,
        update: ScanUpdate,
    ) -> RepositoryResult<VehicleScan> {
        let business_id = validate_business_id(business_id)?;
        let scan_id = validate_scan_id(scan_id)?;
        if let Some(license) = &update.license_number {
            validate_license_number(license)?;
        }

        let mut scans = self.scans.write().await;
        let scan = scans
            .iter_mut()
            .find(|s| s.business_id == business_id && s.id == scan_id)
            .ok_or_else(|| RepositoryError::not_found(scan_id))?;
        update.apply_to(scan);
        Ok(scan.clone())
    }

    async fn get_scan_statistics(&self, business_id: &str) -> RepositoryResult<ScanStatistics> {
        let business_id = validate_business_id(business_id)?;
        let scans = self.scans.read().await;
        Ok(aggregate(
            scans.iter().filter(|s| s.business_id == business_id),
            self.clock.now_utc(),
        ))
    }

    async fn verify_scan(
        &self,
        business_id: &str,
        scan_id: &str,
        verified_by: &str,
    ) -> RepositoryResult<VehicleScan> {
        let business_id = validate_business_id(business_id)?;
        let scan_id = validate_scan_id(scan_id)?;
        let verified_by = validate_verifier(verified_by)?;

        let mut scans = self.scans.write().await;
        let scan = scans
            .iter_mut()
            .find(|s| s.business_id == business_id && s.id == scan_id)
            .ok_or_else(|| RepositoryError::not_found(scan_id))?;

        if !scan.verified {
            scan.verified = true;
            scan.verified_by = Some(verified_by.to_string());
            scan.verified_at = Some(self.clock.now_utc());
        }
        Ok(scan.clone())
    }

    async fn delete_scan(&self, business_id: &str, scan_id: &str) -> RepositoryResult<()> {
        let business_id = validate_business_id(business_id)?;
        let scan_id = validate_scan_id(scan_id)?;

        let mut scans = self.scans.write().await;
        let before = scans.len();
        scans.retain(|s| !(s.business_id == business_id && s.id == scan_id));
        if scans.len() == before {
            return Err(RepositoryError::not_found(scan_id));
        }
        Ok(())
    }
}
