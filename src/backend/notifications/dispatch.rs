//! Notification dispatch.
//!
//! Persists a notification row and pushes it to the recipient's registered
//! live connection if they are online. Used by post creation (per
//! follower), foreign-post reactions and comments, and follows.

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::notifications::db;
use crate::backend::server::state::AppState;
use crate::shared::RealtimeEvent;

/// Persist a notification and push it to the recipient if connected.
///
/// The database row is the source of truth; the live push is best-effort
/// and silently skipped for offline recipients.
pub async fn notify(
    state: &AppState,
    recipient: Uuid,
    kind: &str,
    message: &str,
    data: serde_json::Value,
) -> Result<(), BackendError> {
    let notification =
        db::create_notification(&state.db_pool, recipient, kind, message, &data).await?;

    let payload = serde_json::to_value(&notification)?;
    let delivered = state
        .connections
        .send_to(recipient, RealtimeEvent::notification(payload));

    tracing::debug!(
        "Notification '{}' for {} (live delivery: {})",
        kind,
        recipient,
        delivered
    );

    Ok(())
}
