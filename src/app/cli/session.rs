//! Interactive scan session
//!
//! Reads one raw payload per input line and feeds it to the controller. When
//! a duplicate is found the next line is read as the operator's answer.

use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::args::unescape_payload;
use super::display::{format_duplicate_prompt, format_error, format_saved};
use crate::core::error_handling::ContextualError;
use crate::parser::CaptureMethod;
use crate::scanner::api::{
    CaptureOutcome, ScanError, ScanLifecycleController, ScanResult, ScanState,
};

/// Counts of what happened to each input line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub saved: usize,
    pub unreadable: usize,
    pub declined: usize,
    pub failed: usize,
    pub ignored: usize,
}

pub struct SessionOptions {
    pub capture_method: CaptureMethod,
    pub auto_accept_duplicates: bool,
    pub use_color: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            capture_method: CaptureMethod::Barcode,
            auto_accept_duplicates: false,
            use_color: false,
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Scan until the input ends. Output write failures end the session early.
pub async fn run_session<R, W>(
    controller: &ScanLifecycleController,
    input: R,
    out: &mut W,
    options: &SessionOptions,
) -> ScanResult<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();

    controller.activate().await?;

    while let Some(line) = next_line(&mut lines).await? {
        if line.trim().is_empty() {
            continue;
        }
        if matches!(controller.state()?, ScanState::Done | ScanState::Failed) {
            controller.activate().await?;
        }

        let payload = unescape_payload(&line);
        let outcome = controller
            .submit_payload(&payload, options.capture_method)
            .await;

        let result = match outcome {
            Ok(CaptureOutcome::AwaitingDecision {
                license_number,
                matches,
            }) => {
                let proceed = if options.auto_accept_duplicates {
                    log::info!("Saving duplicate of {} without asking", license_number);
                    true
                } else {
                    emit(
                        out,
                        &format_duplicate_prompt(&license_number, &matches, options.use_color),
                    )?;
                    next_line(&mut lines).await?.is_some_and(|answer| is_yes(&answer))
                };
                controller.resolve_duplicate(proceed).await.map(CaptureOutcome::Saved)
            }
            other => other,
        };

        match result {
            Ok(CaptureOutcome::Saved(scan)) => {
                summary.saved += 1;
                emit(out, &format_saved(&scan, options.use_color))?;
            }
            Ok(CaptureOutcome::Ignored { state }) => {
                summary.ignored += 1;
                log::debug!("Line ignored while scanner was {}", state);
            }
            Ok(CaptureOutcome::Cancelled) => summary.ignored += 1,
            Ok(CaptureOutcome::AwaitingDecision { .. }) => {}
            Err(err) => {
                match &err {
                    ScanError::ParseFailure { .. } => summary.unreadable += 1,
                    ScanError::DuplicateDeclined { .. } => summary.declined += 1,
                    ScanError::Persistence { .. } => summary.failed += 1,
                    _ => return Err(err),
                }
                let message = match (&err, err.user_message()) {
                    (ScanError::Persistence { .. }, _) | (_, None) => err.to_string(),
                    (_, Some(message)) => message.to_string(),
                };
                emit(out, &format_error(&message, options.use_color))?;
            }
        }
    }

    Ok(summary)
}

async fn next_line<R: AsyncBufRead + Unpin>(
    lines: &mut tokio::io::Lines<R>,
) -> ScanResult<Option<String>> {
    lines
        .next_line()
        .await
        .map_err(|e| ScanError::internal(format!("Failed to read input: {}", e)))
}

fn emit<W: Write>(out: &mut W, text: &str) -> ScanResult<()> {
    writeln!(out, "{}", text)
        .map_err(|e| ScanError::internal(format!("Failed to write output: {}", e)))
}
