//! Scan id generation
//!
//! Ids are `scan-<16 hex chars>` taken from a SHA256 digest over the business,
//! license number, capture time and a per-generator sequence number.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct ScanIdGenerator {
    sequence: AtomicU64,
}

impl ScanIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(
        &self,
        business_id: &str,
        license_number: &str,
        scanned_at: DateTime<Utc>,
    ) -> String {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);

        let mut hasher = Sha256::new();
        hasher.update(business_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(license_number.as_bytes());
        hasher.update([0u8]);
        hasher.update(scanned_at.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
        hasher.update(sequence.to_le_bytes());
        let digest = hasher.finalize();

        let hex: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
        format!("scan-{}", hex)
    }
}
