//! Deadline release workflow.
//!
//! Flips every active wish to released. All updates are issued at once and
//! awaited together; there is no transaction across records and no retry.
//! If any update fails the run reports failure with a count of zero, even
//! though the updates that did succeed stay applied.

use futures::future::join_all;
use serde::Serialize;

use crate::infrastructure::{RepositoryError, WishRepository};

/// Outcome of one release run, printed by the release job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseReport {
    pub success: bool,
    pub released_count: usize,
    pub message: String,
}

impl ReleaseReport {
    #[must_use]
    pub fn released(count: usize) -> Self {
        let message = if count == 0 {
            "No active wishes to release".to_string()
        } else if count == 1 {
            "Released 1 wish".to_string()
        } else {
            format!("Released {count} wishes")
        };
        Self {
            success: true,
            released_count: count,
            message,
        }
    }

    #[must_use]
    pub fn failed(reason: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            released_count: 0,
            message: format!("Release failed: {reason}"),
        }
    }
}

/// Summarises the per-record update results.
fn summarize(results: Vec<Result<(), RepositoryError>>) -> ReleaseReport {
    let attempted = results.len();
    let mut failures = results.into_iter().filter_map(Result::err);

    match failures.next() {
        None => ReleaseReport::released(attempted),
        Some(first) => {
            let failed = 1 + failures.count();
            ReleaseReport::failed(format!(
                "{failed} of {attempted} updates failed, first error: {first}"
            ))
        }
    }
}

/// Releases every active wish.
///
/// Never returns an error; failures are reported in the [`ReleaseReport`].
pub async fn release_all_wishes(repository: &dyn WishRepository) -> ReleaseReport {
    tracing::info!("Starting wish release");

    let active = match repository.scan_active().await {
        Ok(active) => active,
        Err(error) => {
            tracing::error!(%error, "Failed to scan active wishes");
            return ReleaseReport::failed(error);
        }
    };

    tracing::info!(count = active.len(), "Found active wishes");

    if active.is_empty() {
        return ReleaseReport::released(0);
    }

    let updates = active
        .iter()
        .map(|wish| repository.mark_released(&wish.wish_id));
    let report = summarize(join_all(updates).await);

    if report.success {
        tracing::info!(released = report.released_count, "Wish release completed");
    } else {
        tracing::error!(message = %report.message, "Wish release failed");
    }
    report
}
