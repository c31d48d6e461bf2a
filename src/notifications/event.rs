//! Event types for the notification system

use std::time::SystemTime;
use strum_macros::{Display, EnumDiscriminants};

use crate::repository::error::RepositoryError;
use crate::repository::types::{DuplicateMatch, ScanStatistics, VehicleScan};

/// Lifecycle events of scans within one business
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(ScanEventType), derive(Display, Hash))]
pub enum ScanEvent {
    CaptureActivated {
        business_id: String,
    },
    CaptureClosed {
        business_id: String,
    },
    ParseFailed {
        business_id: String,
        message: String,
    },
    DuplicatesFound {
        business_id: String,
        license_number: String,
        matches: Vec<DuplicateMatch>,
    },
    DuplicateDeclined {
        business_id: String,
        license_number: String,
    },
    ScanSaved {
        scan: VehicleScan,
    },
    PersistFailed {
        business_id: String,
        error: RepositoryError,
    },
    StatisticsRefreshed {
        business_id: String,
        statistics: ScanStatistics,
    },
    ScanVerified {
        scan: VehicleScan,
    },
    ScanUpdated {
        scan: VehicleScan,
    },
    ScanDeleted {
        business_id: String,
        scan_id: String,
    },
}

impl ScanEvent {
    pub fn event_type(&self) -> ScanEventType {
        ScanEventType::from(self)
    }

    pub fn business_id(&self) -> &str {
        match self {
            ScanEvent::CaptureActivated { business_id }
            | ScanEvent::CaptureClosed { business_id }
            | ScanEvent::ParseFailed { business_id, .. }
            | ScanEvent::DuplicatesFound { business_id, .. }
            | ScanEvent::DuplicateDeclined { business_id, .. }
            | ScanEvent::PersistFailed { business_id, .. }
            | ScanEvent::StatisticsRefreshed { business_id, .. }
            | ScanEvent::ScanDeleted { business_id, .. } => business_id,
            ScanEvent::ScanSaved { scan }
            | ScanEvent::ScanVerified { scan }
            | ScanEvent::ScanUpdated { scan } => &scan.business_id,
        }
    }

    /// One of the three outcomes the operator must be told about
    pub fn is_failure(&self) -> bool {
        matches!(
            self.event_type(),
            ScanEventType::ParseFailed | ScanEventType::DuplicateDeclined | ScanEventType::PersistFailed
        )
    }
}

/// A published event with its publication time
#[derive(Clone, Debug)]
pub struct Event {
    pub timestamp: SystemTime,
    pub payload: ScanEvent,
}

impl Event {
    pub fn new(payload: ScanEvent) -> Self {
        Self {
            timestamp: SystemTime::now(),
            payload,
        }
    }

    pub fn event_type(&self) -> ScanEventType {
        self.payload.event_type()
    }
}

/// Which events a subscriber receives
#[derive(Clone, Debug, PartialEq)]
pub enum EventFilter {
    All,
    Types(Vec<ScanEventType>),
    FailuresOnly,
}

impl EventFilter {
    pub fn accepts(&self, event: &Event) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Types(types) => types.contains(&event.event_type()),
            EventFilter::FailuresOnly => event.payload.is_failure(),
        }
    }
}
