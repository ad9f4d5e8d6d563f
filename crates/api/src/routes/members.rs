//! Member mutations: add, remove, in-place email edit.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use domain::models::member::{validate_email_edit, MemberDraft};

use crate::app::AppState;
use crate::error::ApiError;
use crate::render::board::BoardDraft;
use crate::routes::board::render_board_with;
use crate::routes::{redirect, redirect_with_flash, require_group};
use crate::session::Flash;

#[derive(Debug, Deserialize)]
pub struct EmailForm {
    #[serde(default)]
    pub email: String,
}

/// POST /board/members
pub async fn create_member(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(draft): Form<MemberDraft>,
) -> Result<Response, ApiError> {
    let selected = match require_group(&headers) {
        Ok(selected) => selected,
        Err(response) => return Ok(response),
    };

    let new_member = match draft.validate() {
        Ok(new_member) => new_member,
        Err(message) => {
            return Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::NewMember(&draft),
                &message,
            )
            .await);
        }
    };

    match state.members.create(selected.id, &new_member).await {
        Ok(member) => {
            info!(member_id = %member.id, group_id = %selected.id, "member added");
            Ok(redirect("/board"))
        }
        Err(err) if err.is_unique_violation() => {
            debug!(group_id = %selected.id, name = %new_member.name, "duplicate member name");
            Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::NewMember(&draft),
                "이미 등록된 이름입니다.",
            )
            .await)
        }
        Err(err) => {
            error!(error = %err, "member creation failed");
            let message = format!("멤버 추가 중 오류가 발생했습니다: {err}");
            Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::NewMember(&draft),
                &message,
            )
            .await)
        }
    }
}

/// POST /board/members/:member_id/delete
pub async fn delete_member(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_group(&headers) {
        return response;
    }
    match state.members.delete(member_id).await {
        Ok(()) => {
            info!(member_id = %member_id, "member deleted");
            redirect("/board")
        }
        Err(err) => {
            error!(error = %err, member_id = %member_id, "member delete failed");
            redirect_with_flash(
                "/board",
                Flash::error(format!("멤버 삭제 중 오류가 발생했습니다: {err}")),
            )
        }
    }
}

/// POST /board/members/:member_id/email
pub async fn save_email(
    State(state): State<AppState>,
    Path(member_id): Path<Uuid>,
    headers: HeaderMap,
    Form(form): Form<EmailForm>,
) -> Result<Response, ApiError> {
    let selected = match require_group(&headers) {
        Ok(selected) => selected,
        Err(response) => return Ok(response),
    };

    let email = match validate_email_edit(&form.email) {
        Ok(email) => email,
        Err(message) => {
            return Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::EditEmail {
                    id: member_id,
                    email: &form.email,
                },
                &message,
            )
            .await);
        }
    };

    match state.members.set_email(member_id, email.as_deref()).await {
        Ok(()) => {
            info!(member_id = %member_id, "member email saved");
            Ok(redirect("/board"))
        }
        Err(err) => {
            error!(error = %err, member_id = %member_id, "member email save failed");
            let message = format!("이메일 저장 중 오류가 발생했습니다: {err}");
            Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::EditEmail {
                    id: member_id,
                    email: &form.email,
                },
                &message,
            )
            .await)
        }
    }
}
