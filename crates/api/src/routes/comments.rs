//! Comment mutations.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use tracing::{error, info};
use uuid::Uuid;

use domain::models::comment::CommentDraft;

use crate::app::AppState;
use crate::error::ApiError;
use crate::render::board::BoardDraft;
use crate::routes::board::render_board_with;
use crate::routes::{redirect, redirect_with_flash, require_group};
use crate::services;
use crate::session::Flash;

/// POST /board/updates/:update_id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(update_id): Path<Uuid>,
    headers: HeaderMap,
    Form(draft): Form<CommentDraft>,
) -> Result<Response, ApiError> {
    let selected = match require_group(&headers) {
        Ok(selected) => selected,
        Err(response) => return Ok(response),
    };

    let new_comment = match draft.validate() {
        Ok(new_comment) => new_comment,
        Err(message) => {
            return Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::NewComment {
                    update_id,
                    draft: &draft,
                },
                &message,
            )
            .await);
        }
    };

    match state.comments.create(update_id, &new_comment).await {
        Ok(comment) => {
            info!(comment_id = %comment.id, update_id = %update_id, "comment created");
            services::spawn_comment_notification(&state, selected.id, &comment);
            Ok(redirect("/board"))
        }
        Err(err) => {
            error!(error = %err, update_id = %update_id, "comment creation failed");
            let message = format!("댓글 작성 중 오류가 발생했습니다: {err}");
            Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::NewComment {
                    update_id,
                    draft: &draft,
                },
                &message,
            )
            .await)
        }
    }
}

/// POST /board/comments/:comment_id
pub async fn save_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    headers: HeaderMap,
    Form(draft): Form<CommentDraft>,
) -> Result<Response, ApiError> {
    let selected = match require_group(&headers) {
        Ok(selected) => selected,
        Err(response) => return Ok(response),
    };

    let new_comment = match draft.validate() {
        Ok(new_comment) => new_comment,
        Err(message) => {
            return Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::EditComment {
                    id: comment_id,
                    draft: &draft,
                },
                &message,
            )
            .await);
        }
    };

    match state.comments.save(comment_id, &new_comment).await {
        Ok(()) => {
            info!(comment_id = %comment_id, "comment saved");
            Ok(redirect("/board"))
        }
        Err(err) => {
            error!(error = %err, comment_id = %comment_id, "comment save failed");
            let message = format!("댓글 수정 중 오류가 발생했습니다: {err}");
            Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::EditComment {
                    id: comment_id,
                    draft: &draft,
                },
                &message,
            )
            .await)
        }
    }
}

/// POST /board/comments/:comment_id/delete
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_group(&headers) {
        return response;
    }
    match state.comments.delete(comment_id).await {
        Ok(()) => {
            info!(comment_id = %comment_id, "comment deleted");
            redirect("/board")
        }
        Err(err) => {
            error!(error = %err, comment_id = %comment_id, "comment delete failed");
            redirect_with_flash(
                "/board",
                Flash::error(format!("댓글 삭제 중 오류가 발생했습니다: {err}")),
            )
        }
    }
}
