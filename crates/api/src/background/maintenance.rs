//! Daily maintenance sweep: session cleanup and milestone due reminders.
//!
//! Spawns a background task that purges expired refresh sessions and
//! publishes a `milestone.due_soon` event for every unfinished milestone
//! falling due inside the reminder window. The fan-out turns those into
//! notifications for the assigned designer (or the whole staff). Runs on a
//! fixed interval using `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use verdant_db::repositories::{MilestoneRepo, SessionRepo};
use verdant_events::{DomainEvent, EventBus, MILESTONE_DUE_SOON};

/// Default reminder window: milestones due within the next 3 days.
const DEFAULT_REMINDER_WINDOW_DAYS: i64 = 3;

/// How often the sweep runs. Daily, so an unfinished milestone inside the
/// window is re-reminded each day until it is completed.
const SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 3600);

/// Run the maintenance loop.
///
/// The window defaults to 3 days and can be overridden with
/// `REMINDER_WINDOW_DAYS`. Runs until `cancel` is triggered.
pub async fn run(pool: PgPool, bus: Arc<EventBus>, cancel: CancellationToken) {
    let window_days: i64 = std::env::var("REMINDER_WINDOW_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REMINDER_WINDOW_DAYS);

    tracing::info!(
        window_days,
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Maintenance job started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Maintenance job stopping");
                break;
            }
            _ = interval.tick() => {
                match SessionRepo::cleanup_expired(&pool).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Maintenance: purged expired sessions");
                    }
                    Ok(_) => {
                        tracing::debug!("Maintenance: no expired sessions");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Maintenance: session cleanup failed");
                    }
                }

                match MilestoneRepo::due_within(&pool, window_days).await {
                    Ok(due) => {
                        let count = due.len();
                        for milestone in due {
                            bus.publish(
                                DomainEvent::new(MILESTONE_DUE_SOON)
                                    .with_source("milestone", milestone.id)
                                    .with_payload(serde_json::json!({
                                        "project_id": milestone.project_id,
                                        "project_name": milestone.project_name,
                                        "milestone_name": milestone.name,
                                        "due_date": milestone.due_date.to_string(),
                                        "designer_id": milestone.designer_id,
                                    })),
                            );
                        }
                        if count > 0 {
                            tracing::info!(count, "Maintenance: due-soon reminders published");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Maintenance: due milestone query failed");
                    }
                }
            }
        }
    }
}
