//! Outbound side-channel services and their fire-and-forget launchers.

pub mod generate;
pub mod notify;

pub use generate::HttpCommentGenerator;
pub use notify::HttpNotifier;

use domain::models::comment::{Comment, NewComment, AI_COMMENTER};
use domain::models::update::Update;
use domain::services::BoardEvent;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::app::AppState;

/// Launches the two background operations that follow a successful update
/// insert: notification dispatch and automated comment generation.
///
/// Called only after the user-visible outcome is decided. Each task owns its
/// error boundary: nothing here can block, roll back, or flag the primary
/// creation.
pub fn spawn_update_side_effects(state: &AppState, update: &Update) {
    if let Some(notifier) = state.notifier.clone() {
        let event = BoardEvent::update_created(update.group_id, update.id, update.name.clone());
        tokio::spawn(async move {
            match notifier.notify(&event).await {
                Ok(outcome) => info!(
                    update_id = %event.update_id,
                    sent = outcome.sent,
                    "update notification dispatched"
                ),
                Err(err) => warn!(
                    update_id = %event.update_id,
                    error = %err,
                    "update notification failed"
                ),
            }
        });
    }

    if let Some(generator) = state.generator.clone() {
        let comments = state.comments.clone();
        let update = update.clone();
        tokio::spawn(async move {
            let block = update.content_block();
            if block.is_empty() {
                debug!(update_id = %update.id, "no content to generate a comment from");
                return;
            }
            let text = match generator.generate(&block).await {
                Ok(Some(text)) => text,
                Ok(None) => {
                    debug!(update_id = %update.id, "comment generation returned nothing");
                    return;
                }
                Err(err) => {
                    warn!(update_id = %update.id, error = %err, "comment generation failed");
                    return;
                }
            };
            let comment = NewComment {
                commenter_name: AI_COMMENTER.to_string(),
                content: text,
            };
            match comments.create(update.id, &comment).await {
                Ok(_) => info!(update_id = %update.id, "generated comment persisted"),
                Err(err) => warn!(
                    update_id = %update.id,
                    error = %err,
                    "failed to persist generated comment"
                ),
            }
        });
    }
}

/// Fire-and-forget notification for a newly created (human) comment.
pub fn spawn_comment_notification(state: &AppState, group_id: Uuid, comment: &Comment) {
    if let Some(notifier) = state.notifier.clone() {
        let event = BoardEvent::comment_created(
            group_id,
            comment.update_id,
            comment.id,
            comment.commenter_name.clone(),
        );
        tokio::spawn(async move {
            match notifier.notify(&event).await {
                Ok(outcome) => info!(
                    comment_id = ?event.comment_id,
                    sent = outcome.sent,
                    "comment notification dispatched"
                ),
                Err(err) => warn!(
                    comment_id = ?event.comment_id,
                    error = %err,
                    "comment notification failed"
                ),
            }
        });
    }
}
