//! Event-to-notification fan-out.
//!
//! [`NotificationFanout`] turns a persisted [`DomainEvent`] into notification
//! rows for the users it concerns. Lead and billing events go to the staff;
//! project events go to the owning client's portal user, using the
//! `client_user_id` hint publishers place in the payload. Critical event
//! types are additionally delivered by email when SMTP is configured.

use verdant_core::roles::{ROLE_ADMIN_ID, ROLE_TEAM_ID};
use verdant_core::types::{Cents, DbId};
use verdant_db::models::user::User;
use verdant_db::repositories::{EventRepo, NotificationRepo, UserRepo};
use verdant_db::DbPool;

use crate::bus::{self, DomainEvent};
use crate::delivery::email::EmailDelivery;

/// Routes persisted events to per-user notifications.
pub struct NotificationFanout {
    email: Option<EmailDelivery>,
}

impl NotificationFanout {
    /// Create a fan-out service. Pass `None` to disable email delivery.
    pub fn new(email: Option<EmailDelivery>) -> Self {
        Self { email }
    }

    /// Write notification rows for everyone the event concerns.
    ///
    /// Email failures are logged and do not fail the fan-out; the in-app
    /// notification row is the source of truth.
    pub async fn fan_out(
        &self,
        pool: &DbPool,
        event_id: DbId,
        event: &DomainEvent,
    ) -> Result<(), sqlx::Error> {
        let recipients = Self::recipients(pool, event).await?;
        if recipients.is_empty() {
            return Ok(());
        }

        let (title, body) = headline(event);
        let critical = EventRepo::is_critical(pool, &event.event_type).await?;

        for user in &recipients {
            let notification_id =
                NotificationRepo::create(pool, event_id, user.id, &title, &body).await?;

            if critical {
                if let Some(mailer) = &self.email {
                    match mailer.deliver(&user.email, &title, &body).await {
                        Ok(()) => NotificationRepo::mark_emailed(pool, notification_id).await?,
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                user_id = user.id,
                                event_type = %event.event_type,
                                "Email delivery failed"
                            );
                        }
                    }
                }
            }
        }

        tracing::debug!(
            event_type = %event.event_type,
            count = recipients.len(),
            "Notifications fanned out"
        );
        Ok(())
    }

    /// Resolve who should hear about an event.
    async fn recipients(pool: &DbPool, event: &DomainEvent) -> Result<Vec<User>, sqlx::Error> {
        match event.event_type.as_str() {
            bus::LEAD_CREATED | bus::LEAD_QUALIFIED | bus::LEAD_CONVERTED
            | bus::PAYMENT_SUCCEEDED => staff(pool).await,

            bus::PROJECT_CREATED | bus::MILESTONE_COMPLETED | bus::DELIVERABLE_UPLOADED => {
                client_user(pool, event).await
            }

            bus::MESSAGE_SENT => {
                let from_client = event
                    .payload
                    .get("sender_is_client")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                if from_client {
                    staff(pool).await
                } else {
                    client_user(pool, event).await
                }
            }

            bus::MILESTONE_DUE_SOON => {
                // Prefer the assigned designer; fall back to the whole staff.
                match event.payload_id("designer_id") {
                    Some(designer_id) => active_user(pool, designer_id).await,
                    None => staff(pool).await,
                }
            }

            _ => Ok(Vec::new()),
        }
    }
}

/// All active admin and team users.
async fn staff(pool: &DbPool) -> Result<Vec<User>, sqlx::Error> {
    let mut users = UserRepo::list_active_by_role(pool, ROLE_ADMIN_ID).await?;
    users.extend(UserRepo::list_active_by_role(pool, ROLE_TEAM_ID).await?);
    Ok(users)
}

/// The portal user named by the event's `client_user_id` hint, if active.
async fn client_user(pool: &DbPool, event: &DomainEvent) -> Result<Vec<User>, sqlx::Error> {
    match event.payload_id("client_user_id") {
        Some(user_id) => active_user(pool, user_id).await,
        None => Ok(Vec::new()),
    }
}

async fn active_user(pool: &DbPool, user_id: DbId) -> Result<Vec<User>, sqlx::Error> {
    Ok(UserRepo::find_by_id(pool, user_id)
        .await?
        .into_iter()
        .filter(|u| u.is_active)
        .collect())
}

/// Render the notification title and body for an event.
fn headline(event: &DomainEvent) -> (String, String) {
    let title;
    let body;
    match event.event_type.as_str() {
        bus::LEAD_CREATED => {
            title = "New lead received".to_string();
            body = format!(
                "{} submitted an intake request; tier {} recommended.",
                event.payload_str("full_name"),
                event.payload_id("recommended_tier").unwrap_or(0)
            );
        }
        bus::LEAD_QUALIFIED => {
            title = "Lead qualified".to_string();
            body = format!("{} was marked qualified.", event.payload_str("full_name"));
        }
        bus::LEAD_CONVERTED => {
            title = "Lead converted".to_string();
            body = format!(
                "{} completed checkout and is now a client.",
                event.payload_str("full_name")
            );
        }
        bus::PROJECT_CREATED => {
            title = "Your project is under way".to_string();
            body = format!(
                "Project '{}' was created. Track milestones and deliverables in your portal.",
                event.payload_str("name")
            );
        }
        bus::MILESTONE_COMPLETED => {
            title = "Milestone completed".to_string();
            body = format!(
                "'{}' is complete on project '{}'.",
                event.payload_str("milestone_name"),
                event.payload_str("project_name")
            );
        }
        bus::MILESTONE_DUE_SOON => {
            title = "Milestone due soon".to_string();
            body = format!(
                "'{}' on project '{}' is due {}.",
                event.payload_str("milestone_name"),
                event.payload_str("project_name"),
                event.payload_str("due_date")
            );
        }
        bus::DELIVERABLE_UPLOADED => {
            title = "New deliverable".to_string();
            body = format!(
                "'{}' was added to project '{}'.",
                event.payload_str("file_name"),
                event.payload_str("project_name")
            );
        }
        bus::MESSAGE_SENT => {
            title = "New message".to_string();
            body = format!(
                "New message on project '{}'.",
                event.payload_str("project_name")
            );
        }
        bus::PAYMENT_SUCCEEDED => {
            title = "Payment received".to_string();
            body = format!(
                "{} payment received for tier {}.",
                format_dollars(event.payload_id("amount_cents").unwrap_or(0)),
                event.payload_id("tier").unwrap_or(0)
            );
        }
        other => {
            title = other.to_string();
            body = event.payload.to_string();
        }
    }
    (title, body)
}

fn format_dollars(cents: Cents) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_created_headline_names_the_lead() {
        let event = DomainEvent::new(bus::LEAD_CREATED)
            .with_payload(serde_json::json!({"full_name": "Dana Rivera", "recommended_tier": 2}));
        let (title, body) = headline(&event);
        assert_eq!(title, "New lead received");
        assert!(body.contains("Dana Rivera"));
        assert!(body.contains("tier 2"));
    }

    #[test]
    fn payment_headline_formats_cents_as_dollars() {
        let event = DomainEvent::new(bus::PAYMENT_SUCCEEDED)
            .with_payload(serde_json::json!({"amount_cents": 299_500, "tier": 2}));
        let (_, body) = headline(&event);
        assert!(body.contains("$2995.00"));
    }

    #[test]
    fn unknown_event_falls_back_to_raw_payload() {
        let event =
            DomainEvent::new("totally.unknown").with_payload(serde_json::json!({"k": "v"}));
        let (title, body) = headline(&event);
        assert_eq!(title, "totally.unknown");
        assert!(body.contains("\"k\""));
    }

    #[test]
    fn dollar_formatting_pads_cents() {
        assert_eq!(format_dollars(149_500), "$1495.00");
        assert_eq!(format_dollars(105), "$1.05");
        assert_eq!(format_dollars(0), "$0.00");
    }
}
