//! Board page: the full re-fetch-and-render of one group's updates.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use futures::future::try_join_all;
use serde::Deserialize;
use uuid::Uuid;

use domain::models::group::Group;
use domain::models::member::Member;
use domain::models::update::UpdateWithComments;
use gateway::GatewayError;

use crate::app::AppState;
use crate::error::ApiError;
use crate::render::board::{self as board_render, BoardDraft, BoardPage};
use crate::routes::{page_response, redirect, with_cookies};
use crate::session::{self, SelectedGroup};

/// Which single item, if any, the page renders in edit mode.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BoardQuery {
    pub edit: Option<Uuid>,
    pub edit_comment: Option<Uuid>,
    pub edit_member: Option<Uuid>,
}

/// One full server read of the board.
pub(crate) struct BoardData {
    pub group: Group,
    pub members: Vec<Member>,
    pub updates: Vec<UpdateWithComments>,
}

/// Fetches the group, its membership, its updates, and every update's
/// comments. The per-update comment fetches are issued together and joined;
/// a single failure fails the whole load.
pub(crate) async fn load_board(
    state: &AppState,
    group_id: Uuid,
) -> Result<Option<BoardData>, GatewayError> {
    let Some(group) = state.groups.find(group_id).await? else {
        return Ok(None);
    };
    let members = state.members.list_for_group(group_id).await?;
    let updates = state.updates.list_for_group(group_id).await?;
    let comment_lists = try_join_all(
        updates
            .iter()
            .map(|update| state.comments.list_for_update(update.id)),
    )
    .await?;
    let updates = updates
        .into_iter()
        .zip(comment_lists)
        .map(|(update, comments)| UpdateWithComments { update, comments })
        .collect();
    Ok(Some(BoardData {
        group,
        members,
        updates,
    }))
}

/// GET /: straight to the remembered board, or to the group list.
pub async fn index(headers: HeaderMap) -> Response {
    match session::selected_group(&headers) {
        Some(_) => redirect("/board"),
        None => redirect("/groups"),
    }
}

/// GET /board
pub async fn board_page(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Some(selected) = session::selected_group(&headers) else {
        return Ok(redirect("/groups"));
    };
    let Some(data) = load_board(&state, selected.id).await? else {
        // The remembered group no longer exists; drop the stale selection.
        return Ok(with_cookies(redirect("/groups"), session::leave_cookies()));
    };

    let flash = session::take_flash(&headers);
    let html = board_render::render(&BoardPage {
        group: &data.group,
        members: &data.members,
        updates: &data.updates,
        editing_update: query.edit,
        editing_comment: query.edit_comment,
        editing_member: query.edit_member,
        draft: BoardDraft::None,
        error: None,
        flash: flash.as_ref(),
        now: Utc::now(),
    });
    Ok(page_response(html, flash.is_some()))
}

/// POST /board/leave, the explicit "change group" action.
pub async fn leave_group() -> Response {
    with_cookies(redirect("/groups"), session::leave_cookies())
}

/// Re-renders the board with one in-progress form and an inline error, so a
/// failed submit keeps the user's values on screen.
pub(crate) async fn render_board_with(
    state: &AppState,
    selected: &SelectedGroup,
    draft: BoardDraft<'_>,
    error: &str,
) -> Response {
    match load_board(state, selected.id).await {
        Ok(Some(data)) => {
            let html = board_render::render(&BoardPage {
                group: &data.group,
                members: &data.members,
                updates: &data.updates,
                editing_update: None,
                editing_comment: None,
                editing_member: None,
                draft,
                error: Some(error),
                flash: None,
                now: Utc::now(),
            });
            page_response(html, false)
        }
        Ok(None) => with_cookies(redirect("/groups"), session::leave_cookies()),
        Err(err) => ApiError::Gateway(err).into_response(),
    }
}
