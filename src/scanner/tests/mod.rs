//! Scanner tests

mod duplicate;

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use crate::core::time::MockClock;
use crate::repository::api::InMemoryScanRepository;
use crate::scanner::api::{ScanContext, ScanLifecycleController};

pub(super) const SCENARIO_A: &str = "GP|ABC123GP|2024-12|MOTOR VEHICLE|JOHN DOE|7901010001088";

pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
}

pub(super) struct Harness {
    pub repository: Arc<InMemoryScanRepository>,
    pub clock: MockClock,
}

impl Harness {
    pub fn new() -> Self {
        let clock = MockClock::at(base_time());
        Self {
            repository: Arc::new(InMemoryScanRepository::new(Arc::new(clock.clone()))),
            clock,
        }
    }

    pub fn controller(&self, business_id: &str) -> ScanLifecycleController {
        ScanLifecycleController::with_clock(
            self.repository.clone(),
            ScanContext::new(business_id, "operator-1").with_email("op@shop.example"),
            Arc::new(self.clock.clone()),
        )
    }
}
