pub mod admin;
pub mod auth;
pub mod checkout;
pub mod clients;
pub mod health;
pub mod leads;
pub mod notifications;
pub mod portfolio;
pub mod projects;
pub mod referrals;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         own profile (requires auth)
/// /auth/password                                   change own password (POST)
///
/// /leads                                           intake submission (public, POST)
/// /leads/preview                                   tier preview (public, POST)
///
/// /checkout/session                                open checkout for a lead (POST)
/// /checkout/webhook                                provider callback, HMAC-signed (POST)
///
/// /clients/me                                      own client record + care plans
/// /clients/me/subscriptions/{id}/cancel            cancel own care plan (POST)
///
/// /projects                                        own (client) or all (team)
/// /projects/{id}                                   detail with progress + current step
/// /projects/{id}/milestones                        milestone sequence
/// /projects/{id}/milestones/{mid}/status           advance milestone (team, POST)
/// /projects/{id}/deliverables                      list, upload metadata (team)
/// /projects/{id}/deliverables/{did}/download       count a download (POST)
/// /projects/{id}/messages                          thread: list (marks read), post
///
/// /notifications                                   list (?unread_only, limit, offset)
/// /notifications/read-all                          mark all read (POST)
/// /notifications/unread-count                      unread count (GET)
/// /notifications/{id}/read                         mark read (POST)
///
/// /portfolio                                       published gallery (public)
/// /portfolio/{id}                                  published item (public)
///
/// /referrals/mine                                  own referral code + credit
///
/// /admin/users                                     list, create (admin only)
/// /admin/users/{id}                                update, deactivate
/// /admin/users/{id}/password                       credential reset (POST)
/// /admin/leads                                     lead queue (team, ?status=)
/// /admin/leads/{id}                                lead detail
/// /admin/leads/{id}/status                         queue transition (POST)
/// /admin/leads/{id}/tier-override                  manual tier override (POST)
/// /admin/analytics                                 funnel + revenue summary
/// /admin/clients                                   client list
/// /admin/clients/{id}/status                       pause / reactivate / churn (POST)
/// /admin/projects                                  project list
/// /admin/projects/{id}                             rename, status, designer (PUT)
/// /admin/portfolio                                 gallery incl. drafts (admin only)
/// /admin/portfolio/{id}                            update, delete (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication (login, refresh, logout, me, password).
        .nest("/auth", auth::router())
        // Public intake funnel.
        .nest("/leads", leads::router())
        // Checkout handshake with the payment provider.
        .nest("/checkout", checkout::router())
        // Client portal surfaces.
        .nest("/clients", clients::router())
        .nest("/projects", projects::router())
        .nest("/referrals", referrals::router())
        // Notifications produced by the event fan-out.
        .nest("/notifications", notifications::router())
        // Public marketing gallery.
        .nest("/portfolio", portfolio::router())
        // Back office (user management, lead queue, dashboards, curation).
        .nest("/admin", admin::router())
}
