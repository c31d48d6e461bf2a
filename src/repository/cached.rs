//! Caching decorator for any [`ScanRepository`]
//!
//! Listings and statistics are served from a [`QueryCache`]; duplicate
//! lookups and single-scan reads always go to the inner repository. Any
//! successful write invalidates the cache of the written business only.
//!
//! Business ids are trimmed before keying so every spelling the inner
//! repository accepts lands on the same entries. A read that overlaps a write
//! of its business is returned to the caller but never cached.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::cache::{CacheKey, CacheResource, QueryCache};
use super::error::RepositoryResult;
use super::traits::ScanRepository;
use super::types::{NewScan, ScanFilters, ScanStatistics, ScanUpdate, VehicleScan};
use crate::core::time::Clock;
use crate::core::validation::validate_business_id;

pub struct CachedScanRepository<R> {
    inner: R,
    scans: QueryCache<Vec<VehicleScan>>,
    statistics: QueryCache<ScanStatistics>,
}

impl<R: ScanRepository> CachedScanRepository<R> {
    pub fn new(inner: R, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner,
            scans: QueryCache::new(ttl, clock.clone()),
            statistics: QueryCache::new(ttl, clock),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    fn invalidate(&self, business_id: &str) {
        let removed = self
            .scans
            .invalidate_business(business_id)
            .and_then(|a| self.statistics.invalidate_business(business_id).map(|b| a + b));
        match removed {
            Ok(count) => log::trace!("Invalidated {} cache entries for {}", count, business_id),
            Err(e) => log::warn!("Cache invalidation failed for {}: {}", business_id, e),
        }
    }
}

#[async_trait]
impl<R: ScanRepository> ScanRepository for CachedScanRepository<R> {
    async fn create_scan(
        &self,
        data: NewScan,
        business_id: &str,
    ) -> RepositoryResult<VehicleScan> {
        let business_id = validate_business_id(business_id)?;
        let scan = self.inner.create_scan(data, business_id).await?;
        self.invalidate(business_id);
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
        let key = CacheKey::new(
            CacheResource::Scans,
            business_id,
            format!("{}|{}|{}", filters.shape(), limit, offset),
        );
        if let Some(hit) = self.scans.get(&key)? {
            log::trace!("Scan listing cache hit for {}", business_id);
            return Ok(hit);
        }

        let generation = self.scans.generation(business_id)?;
        let scans = self
            .inner
            .get_scans(business_id, filters, limit, offset)
            .await?;
        if !self.scans.insert_if_current(key, scans.clone(), generation)? {
            log::trace!("Scan listing for {} changed while reading; not cached", business_id);
        }
        Ok(scans)
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
        self.inner
            .find_by_license_number(business_id, license_number)
            .await
    }

    async fn update_scan(
        &self,
        business_id: &str,
        scan_id: &str,
        update: ScanUpdate,
    ) -> RepositoryResult<VehicleScan> {
        let business_id = validate_business_id(business_id)?;
        let scan = self.inner.update_scan(business_id, scan_id, update).await?;
        self.invalidate(business_id);
        Ok(scan)
    }

    async fn get_scan_statistics(&self, business_id: &str) -> RepositoryResult<ScanStatistics> {
        let business_id = validate_business_id(business_id)?;
        let key = CacheKey::new(CacheResource::Statistics, business_id, "");
        if let Some(hit) = self.statistics.get(&key)? {
            return Ok(hit);
        }

        let generation = self.statistics.generation(business_id)?;
        let stats = self.inner.get_scan_statistics(business_id).await?;
        if !self.statistics.insert_if_current(key, stats.clone(), generation)? {
            log::trace!("Statistics for {} changed while reading; not cached", business_id);
        }
        Ok(stats)
    }

    async fn verify_scan(
        &self,
        business_id: &str,
        scan_id: &str,
        verified_by: &str,
    ) -> RepositoryResult<VehicleScan> {
        let business_id = validate_business_id(business_id)?;
        let scan = self
            .inner
            .verify_scan(business_id, scan_id, verified_by)
            .await?;
        self.invalidate(business_id);
        Ok(scan)
    }

    async fn delete_scan(&self, business_id: &str, scan_id: &str) -> RepositoryResult<()> {
        let business_id = validate_business_id(business_id)?;
        self.inner.delete_scan(business_id, scan_id).await?;
        self.invalidate(business_id);
        Ok(())
    }
}
