//! Common test utilities and helpers
//!
//! Repositories that fail or stall on purpose, plus fixture payloads and a
//! pinned clock.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use diskscan::core::time::MockClock;
use diskscan::repository::api::*;
use diskscan::scanner::api::{ScanContext, ScanLifecycleController};

pub const SCENARIO_A: &str = "GP|ABC123GP|2024-12|MOTOR VEHICLE|JOHN DOE|7901010001088";
pub const SCENARIO_B: &str = "random text\nXYZ456WC\nsome other line";
pub const SCENARIO_C: &str = "no license pattern here at all 12345";

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
}

pub fn mock_clock() -> MockClock {
    MockClock::at(base_time())
}

pub fn memory_repository(clock: &MockClock) -> Arc<InMemoryScanRepository> {
    Arc::new(InMemoryScanRepository::new(Arc::new(clock.clone())))
}

pub fn controller_for(
    repository: Arc<dyn ScanRepository>,
    business_id: &str,
    clock: &MockClock,
) -> ScanLifecycleController {
    ScanLifecycleController::with_clock(
        repository,
        ScanContext::new(business_id, "operator").with_email("operator@shop.example"),
        Arc::new(clock.clone()),
    )
}

/// Fails or stalls selected operations, delegating to an in-memory store
pub struct FaultyRepository {
    pub inner: InMemoryScanRepository,
    fail_create: Option<RepositoryError>,
    fail_lookup: Option<RepositoryError>,
    lookup_delay: Option<Duration>,
    creates: AtomicUsize,
}

impl FaultyRepository {
    pub fn new(clock: &MockClock) -> Self {
        Self {
            inner: InMemoryScanRepository::new(Arc::new(clock.clone())),
            fail_create: None,
            fail_lookup: None,
            lookup_delay: None,
            creates: AtomicUsize::new(0),
        }
    }

    pub fn failing_create(mut self, error: RepositoryError) -> Self {
        self.fail_create = Some(error);
        self
    }

    pub fn failing_lookup(mut self, error: RepositoryError) -> Self {
        self.fail_lookup = Some(error);
        self
    }

    pub fn slow_lookup(mut self, delay: Duration) -> Self {
        self.lookup_delay = Some(delay);
        self
    }

    pub fn create_attempts(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScanRepository for FaultyRepository {
    async fn create_scan(
        &self,
        data: NewScan,
        business_id: &str,
    ) -> RepositoryResult<VehicleScan> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        match &self.fail_create {
            Some(err) => Err(err.clone()),
            None => self.inner.create_scan(data, business_id).await,
        }
    }

    async fn get_scans(
        &self,
        business_id: &str,
        filters: &ScanFilters,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<Vec<VehicleScan>> {
        self.inner
            .get_scans(business_id, filters, limit, offset)
            .await
    }

    async fn get_scan(
        &self,
        business_id: &str,
        scan_id: &str,
    ) -> RepositoryResult<Option<VehicleScan>> {
        self.inner.get_scan(business_id, scan_id).await
    }

    async fn find_by_license_number(
        &self,
        business_id: &str,
        license_number: &str,
    ) -> RepositoryResult<Vec<VehicleScan>> {
        if let Some(delay) = self.lookup_delay {
            tokio::time::sleep(delay).await;
        }
        match &self.fail_lookup {
            Some(err) => Err(err.clone()),
            None => {
                self.inner
                    .find_by_license_number(business_id, license_number)
                    .await
            }
        }
    }

    async fn update_scan(
        &self,
        business_id: &str,
        scan_id: &str,
        update: ScanUpdate,
    ) -> RepositoryResult<VehicleScan> {
        self.inner.update_scan(business_id, scan_id, update).await
    }

    async fn get_scan_statistics(&self, business_id: &str) -> RepositoryResult<ScanStatistics> {
        self.inner.get_scan_statistics(business_id).await
    }

    async fn verify_scan(
        &self,
        business_id: &str,
        scan_id: &str,
        verified_by: &str,
    ) -> RepositoryResult<VehicleScan> {
        self.inner
            .verify_scan(business_id, scan_id, verified_by)
            .await
    }

    async fn delete_scan(&self, business_id: &str, scan_id: &str) -> RepositoryResult<()> {
        self.inner.delete_scan(business_id, scan_id).await
    }
}
