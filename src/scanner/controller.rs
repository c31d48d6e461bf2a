//! Scan lifecycle controller
//!
//! Drives one scan attempt at a time through capture, parsing, the duplicate
//! decision and persistence:
//!
//! ```text
//! Idle -> Capturing -> Parsing -> AwaitingDuplicateDecision -> Persisting -> Done
//!              ^          |                 |                      |
//!              +----------+ (parse failed)  +- declined            +-> Failed
//! ```
//!
//! Captures are only accepted while `Idle` or `Capturing`; anything arriving
//! in another state is ignored so a disk scanned twice in quick succession
//! produces one record. Cancellation is honoured until persistence starts.

use std::sync::{Arc, Mutex, MutexGuard};
use strum_macros::Display;

use crate::core::sync::handle_mutex_poison;
use crate::core::time::{system_clock, Clock};
use crate::notifications::api::{
    shared_manager, EventFilter, EventReceiver, ScanEvent, SharedNotificationManager,
};
use crate::parser::{try_parse, CaptureMethod, RawScanInput};
use crate::repository::error::RepositoryResult;
use crate::repository::traits::ScanRepository;
use crate::repository::types::{DuplicateMatch, NewScan, ScanStatistics, VehicleScan};
use crate::scanner::duplicate::DuplicateDetector;
use crate::scanner::error::{ScanError, ScanResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ScanState {
    Idle,
    Capturing,
    Parsing,
    AwaitingDuplicateDecision,
    Persisting,
    Done,
    Failed,
}

impl ScanState {
    /// States in which a capture from the camera is acted on
    pub fn accepts_capture(self) -> bool {
        matches!(self, ScanState::Idle | ScanState::Capturing)
    }

    /// States from which the operator may close the scanner
    pub fn is_cancellable(self) -> bool {
        self != ScanState::Persisting
    }
}

/// Who is scanning, and for which business
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanContext {
    pub business_id: String,
    pub scanned_by: String,
    pub scanned_by_email: Option<String>,
}

impl ScanContext {
    pub fn new(business_id: impl Into<String>, scanned_by: impl Into<String>) -> Self {
        Self {
            business_id: business_id.into(),
            scanned_by: scanned_by.into(),
            scanned_by_email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.scanned_by_email = Some(email.into());
        self
    }
}

/// Result of handing a capture to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// Arrived while another attempt was in flight
    Ignored { state: ScanState },
    /// Earlier scans exist; call `resolve_duplicate` to continue
    AwaitingDecision {
        license_number: String,
        matches: Vec<DuplicateMatch>,
    },
    Saved(VehicleScan),
    /// The scanner was closed before persistence started
    Cancelled,
}

struct PendingScan {
    data: NewScan,
    matches: Vec<DuplicateMatch>,
}

struct ControllerState {
    state: ScanState,
    /// Bumped for every accepted capture and every cancellation so a
    /// duplicate check that finishes late can tell it was abandoned
    attempt: u64,
    pending: Option<PendingScan>,
}

pub struct ScanLifecycleController {
    repository: Arc<dyn ScanRepository>,
    detector: DuplicateDetector,
    context: ScanContext,
    clock: Arc<dyn Clock>,
    notifications: SharedNotificationManager,
    inner: Mutex<ControllerState>,
}

impl ScanLifecycleController {
    pub fn new(repository: Arc<dyn ScanRepository>, context: ScanContext) -> Self {
        Self::with_clock(repository, context, system_clock())
    }

    pub fn with_clock(
        repository: Arc<dyn ScanRepository>,
        context: ScanContext,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            detector: DuplicateDetector::new(Arc::clone(&repository)),
            repository,
            context,
            clock,
            notifications: shared_manager(),
            inner: Mutex::new(ControllerState {
                state: ScanState::Idle,
                attempt: 0,
                pending: None,
            }),
        }
    }

    pub fn context(&self) -> &ScanContext {
        &self.context
    }

    pub fn notifications(&self) -> SharedNotificationManager {
        Arc::clone(&self.notifications)
    }

    pub async fn subscribe(
        &self,
        subscriber_id: impl Into<String>,
        filter: EventFilter,
    ) -> EventReceiver {
        self.notifications
            .lock()
            .await
            .subscribe(subscriber_id, filter, "scanner:controller")
    }

    pub fn state(&self) -> ScanResult<ScanState> {
        Ok(self.lock()?.state)
    }

    /// Matches awaiting the operator's decision, if any
    pub fn pending_matches(&self) -> ScanResult<Vec<DuplicateMatch>> {
        Ok(self
            .lock()?
            .pending
            .as_ref()
            .map(|p| p.matches.clone())
            .unwrap_or_default())
    }

    /// Open the scanner for a new capture
    pub async fn activate(&self) -> ScanResult<()> {
        {
            let mut inner = self.lock()?;
            let current = inner.state;
            match current {
                ScanState::Idle | ScanState::Capturing | ScanState::Done | ScanState::Failed => {
                    self.transition(&mut inner, ScanState::Capturing);
                }
                state => {
                    return Err(ScanError::InvalidState {
                        operation: "activate the scanner",
                        state,
                    })
                }
            }
        }
        self.publish(ScanEvent::CaptureActivated {
            business_id: self.context.business_id.clone(),
        })
        .await;
        Ok(())
    }

    /// Close the scanner. Any pending duplicate decision is dropped and
    /// nothing is saved. Not possible once persistence has started.
    pub async fn cancel(&self) -> ScanResult<()> {
        {
            let mut inner = self.lock()?;
            if !inner.state.is_cancellable() {
                return Err(ScanError::InvalidState {
                    operation: "cancel the scan",
                    state: inner.state,
                });
            }
            inner.attempt += 1;
            inner.pending = None;
            self.transition(&mut inner, ScanState::Idle);
        }
        self.publish(ScanEvent::CaptureClosed {
            business_id: self.context.business_id.clone(),
        })
        .await;
        Ok(())
    }

    /// Stamp a payload with the current time and submit it
    pub async fn submit_payload(
        &self,
        payload: &str,
        capture_method: CaptureMethod,
    ) -> ScanResult<CaptureOutcome> {
        let input = RawScanInput::new(payload, capture_method, self.clock.now_utc());
        self.submit_capture(input).await
    }

    /// Handle one capture from the camera.
    ///
    /// Parses the payload, checks for earlier scans of the license and saves
    /// the scan when there are none. When duplicates exist the controller
    /// waits in `AwaitingDuplicateDecision` for [`Self::resolve_duplicate`].
    pub async fn submit_capture(&self, input: RawScanInput) -> ScanResult<CaptureOutcome> {
        let attempt = {
            let mut inner = self.lock()?;
            if !inner.state.accepts_capture() {
                log::debug!(
                    "Ignoring {} capture while {}",
                    input.capture_method,
                    inner.state
                );
                return Ok(CaptureOutcome::Ignored { state: inner.state });
            }
            inner.attempt += 1;
            self.transition(&mut inner, ScanState::Parsing);
            inner.attempt
        };

        let record = match try_parse(&input.payload, input.captured_at) {
            Ok(record) => record,
            Err(reason) => {
                self.settle(attempt, ScanState::Capturing)?;
                log::warn!("Capture could not be parsed: {}", reason);
                self.publish(ScanEvent::ParseFailed {
                    business_id: self.context.business_id.clone(),
                    message: reason.to_string(),
                })
                .await;
                return Err(ScanError::ParseFailure { reason });
            }
        };

        if !self.advance(attempt, ScanState::Parsing, ScanState::AwaitingDuplicateDecision)? {
            return Ok(CaptureOutcome::Cancelled);
        }

        let matches = match self
            .detector
            .check_duplicate_license(&record.license_number, &self.context.business_id, None)
            .await
        {
            Ok(matches) => matches,
            Err(err) => {
                log::warn!(
                    "Duplicate check for {} failed, saving anyway: {}",
                    record.license_number,
                    err
                );
                Vec::new()
            }
        };

        let data = NewScan::from_record(
            record,
            self.context.scanned_by.clone(),
            self.context.scanned_by_email.clone(),
        );

        if matches.is_empty() {
            if !self.advance(attempt, ScanState::AwaitingDuplicateDecision, ScanState::Persisting)? {
                return Ok(CaptureOutcome::Cancelled);
            }
            return self.persist(data).await.map(CaptureOutcome::Saved);
        }

        let license_number = data.license_number.clone();
        {
            let mut inner = self.lock()?;
            if inner.attempt != attempt || inner.state != ScanState::AwaitingDuplicateDecision {
                return Ok(CaptureOutcome::Cancelled);
            }
            inner.pending = Some(PendingScan {
                data,
                matches: matches.clone(),
            });
        }
        log::info!(
            "License {} already scanned {} time(s); awaiting decision",
            license_number,
            matches.len()
        );
        self.publish(ScanEvent::DuplicatesFound {
            business_id: self.context.business_id.clone(),
            license_number: license_number.clone(),
            matches: matches.clone(),
        })
        .await;

        Ok(CaptureOutcome::AwaitingDecision {
            license_number,
            matches,
        })
    }

    /// Answer the duplicate prompt. `proceed = true` saves the scan anyway;
    /// `false` discards it and returns to capturing.
    pub async fn resolve_duplicate(&self, proceed: bool) -> ScanResult<VehicleScan> {
        let pending = {
            let mut inner = self.lock()?;
            let pending = match (inner.state, inner.pending.take()) {
                (ScanState::AwaitingDuplicateDecision, Some(pending)) => pending,
                (state, other) => {
                    inner.pending = other;
                    return Err(ScanError::InvalidState {
                        operation: "resolve a duplicate",
                        state,
                    });
                }
            };
            let next = if proceed {
                ScanState::Persisting
            } else {
                ScanState::Capturing
            };
            self.transition(&mut inner, next);
            pending
        };

        if proceed {
            return self.persist(pending.data).await;
        }

        let license_number = pending.data.license_number;
        log::info!("Scan of {} declined by operator", license_number);
        self.publish(ScanEvent::DuplicateDeclined {
            business_id: self.context.business_id.clone(),
            license_number: license_number.clone(),
        })
        .await;
        Err(ScanError::DuplicateDeclined {
            license_number,
            matches: pending.matches.len(),
        })
    }

    /// Fetch fresh statistics for the business and announce them
    pub async fn refresh_statistics(&self) -> RepositoryResult<ScanStatistics> {
        let statistics = self
            .repository
            .get_scan_statistics(&self.context.business_id)
            .await?;
        self.publish(ScanEvent::StatisticsRefreshed {
            business_id: self.context.business_id.clone(),
            statistics: statistics.clone(),
        })
        .await;
        Ok(statistics)
    }

    /// Runs to completion once started. Failure abandons the attempt; the
    /// parsed data is not kept for a retry.
    async fn persist(&self, data: NewScan) -> ScanResult<VehicleScan> {
        match self
            .repository
            .create_scan(data, &self.context.business_id)
            .await
        {
            Ok(scan) => {
                // The scan exists now; a state failure must not report it lost
                if let Err(err) = self.finish(ScanState::Done) {
                    log::error!("Scan {} saved but scanner state was not updated: {}", scan.id, err);
                }
                log::info!(
                    "Saved scan {} for license {} ({} quality)",
                    scan.id,
                    scan.license_number,
                    scan.scan_quality
                );
                self.publish(ScanEvent::ScanSaved { scan: scan.clone() })
                    .await;
                if let Err(err) = self.refresh_statistics().await {
                    log::warn!("Statistics refresh after save failed: {}", err);
                }
                Ok(scan)
            }
            Err(source) => {
                self.finish(ScanState::Failed)?;
                log::warn!("Failed to save scan: {}", source);
                self.publish(ScanEvent::PersistFailed {
                    business_id: self.context.business_id.clone(),
                    error: source.clone(),
                })
                .await;
                Err(ScanError::Persistence { source })
            }
        }
    }

    fn lock(&self) -> ScanResult<MutexGuard<'_, ControllerState>> {
        handle_mutex_poison(self.inner.lock(), ScanError::internal)
    }

    fn transition(&self, inner: &mut ControllerState, next: ScanState) {
        if inner.state != next {
            log::debug!("Scanner {} -> {}", inner.state, next);
        }
        inner.state = next;
    }

    /// Move from `from` to `to` if the attempt is still current.
    /// Returns false when the attempt was cancelled in the meantime.
    fn advance(&self, attempt: u64, from: ScanState, to: ScanState) -> ScanResult<bool> {
        let mut inner = self.lock()?;
        if inner.attempt != attempt || inner.state != from {
            return Ok(false);
        }
        self.transition(&mut inner, to);
        Ok(true)
    }

    fn settle(&self, attempt: u64, to: ScanState) -> ScanResult<()> {
        let mut inner = self.lock()?;
        if inner.attempt == attempt {
            self.transition(&mut inner, to);
        }
        Ok(())
    }

    fn finish(&self, to: ScanState) -> ScanResult<()> {
        let mut inner = self.lock()?;
        inner.pending = None;
        self.transition(&mut inner, to);
        Ok(())
    }

    async fn publish(&self, event: ScanEvent) {
        if let Err(err) = self.notifications.lock().await.publish(event) {
            log::warn!("{}", err);
        }
    }
}
