//! Group list, creation, entry gate, and gated info editing.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Form;
use serde::Deserialize;
use tracing::{debug, error, info};
use uuid::Uuid;

use domain::models::group::{GroupDraft, GroupInfoDraft};
use domain::services::gate::{AccessGate, LeaderNameGate, StaffIdGate};

use crate::app::AppState;
use crate::error::ApiError;
use crate::render::gate as gate_render;
use crate::render::groups::{self as groups_render, GroupsPage, UnlockModal};
use crate::routes::{page_response, redirect, redirect_with_flash, with_cookies};
use crate::session::{self, Flash, SelectedGroup};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GroupsQuery {
    /// Card unlocked into edit mode (set by a passed staff gate).
    pub edit: Option<Uuid>,
    /// Card whose staff-id prompt is open.
    pub unlock: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct EnterForm {
    #[serde(default)]
    pub leader_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UnlockForm {
    #[serde(default)]
    pub staff_id: String,
}

async fn render_groups(
    state: &AppState,
    editing: Option<Uuid>,
    unlock_modal: Option<UnlockModal>,
    info_draft: Option<&GroupInfoDraft>,
    create_draft: Option<&str>,
    error: Option<&str>,
    flash: Option<&Flash>,
) -> Result<String, ApiError> {
    let groups = state.groups.list().await?;
    // The leader dropdown is seeded from the latest membership every time
    // the edit form renders; options never go stale across renders.
    let members_of_editing = match editing {
        Some(group_id) => state.members.list_for_group(group_id).await?,
        None => Vec::new(),
    };
    Ok(groups_render::render(&GroupsPage {
        groups: &groups,
        editing,
        members_of_editing: &members_of_editing,
        info_draft,
        create_draft,
        unlock_modal,
        error,
        flash,
    }))
}

/// GET /groups
pub async fn groups_page(
    State(state): State<AppState>,
    Query(query): Query<GroupsQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let flash = session::take_flash(&headers);
    let unlock_modal = query.unlock.map(|group_id| UnlockModal {
        group_id,
        retry: false,
    });
    let html = render_groups(
        &state,
        query.edit,
        unlock_modal,
        None,
        None,
        None,
        flash.as_ref(),
    )
    .await?;
    Ok(page_response(html, flash.is_some()))
}

/// POST /groups
pub async fn create_group(
    State(state): State<AppState>,
    Form(draft): Form<GroupDraft>,
) -> Result<Response, ApiError> {
    let name = match draft.validate() {
        Ok(name) => name,
        Err(message) => {
            let html =
                render_groups(&state, None, None, None, Some(&draft.name), Some(&message), None)
                    .await?;
            return Ok(page_response(html, false));
        }
    };

    match state.groups.create(&name).await {
        Ok(group) => {
            info!(group_id = %group.id, group_name = %group.name, "group created");
            Ok(redirect_with_flash(
                "/groups",
                Flash::success("모임이 생성되었습니다!"),
            ))
        }
        Err(err) if err.is_unique_violation() => {
            debug!(group_name = %name, "duplicate group name");
            let html = render_groups(
                &state,
                None,
                None,
                None,
                Some(&draft.name),
                Some("이미 존재하는 모임 이름입니다."),
                None,
            )
            .await?;
            Ok(page_response(html, false))
        }
        Err(err) => {
            error!(error = %err, "group creation failed");
            let message = format!("모임 생성 중 오류가 발생했습니다: {err}");
            let html =
                render_groups(&state, None, None, None, Some(&draft.name), Some(&message), None)
                    .await?;
            Ok(page_response(html, false))
        }
    }
}

/// GET /groups/:group_id/enter
///
/// A group without a leader is open: entry proceeds directly. Otherwise the
/// leader-name prompt renders.
pub async fn enter_page(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Some(group) = state.groups.find(group_id).await? else {
        return Err(ApiError::NotFound(format!("group {group_id}")));
    };
    if !group.has_leader() {
        return Ok(enter(&state, group.id, group.name.clone()));
    }
    let flash = session::take_flash(&headers);
    let html = gate_render::entry_page(&group, false, flash.as_ref());
    Ok(page_response(html, flash.is_some()))
}

/// POST /groups/:group_id/enter
///
/// The leader name is re-fetched on every attempt; a gateway failure aborts
/// the action instead of being treated as "no leader". A mismatch re-renders
/// the prompt: an expected input state, retried without limit.
pub async fn enter_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Form(form): Form<EnterForm>,
) -> Result<Response, ApiError> {
    let Some(group) = state.groups.find(group_id).await? else {
        return Err(ApiError::NotFound(format!("group {group_id}")));
    };
    if group.has_leader() {
        let leader = group.leader_name.clone().unwrap_or_default();
        if !LeaderNameGate::new(leader).verify(&form.leader_name) {
            debug!(group_id = %group.id, "entry gate mismatch");
            return Ok(page_response(gate_render::entry_page(&group, true, None), false));
        }
    }
    Ok(enter(&state, group.id, group.name.clone()))
}

fn enter(_state: &AppState, id: Uuid, name: String) -> Response {
    info!(group_id = %id, "group entered");
    let selected = SelectedGroup { id, name };
    with_cookies(redirect("/board"), session::enter_cookies(&selected))
}

/// POST /groups/:group_id/unlock
pub async fn unlock_info(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Form(form): Form<UnlockForm>,
) -> Result<Response, ApiError> {
    let gate = StaffIdGate::new(state.config.gate.staff_id.clone());
    if gate.verify(&form.staff_id) {
        info!(group_id = %group_id, "info editor unlocked");
        return Ok(redirect(&format!("/groups?edit={group_id}")));
    }
    debug!(group_id = %group_id, "staff gate mismatch");
    let html = render_groups(
        &state,
        None,
        Some(UnlockModal {
            group_id,
            retry: true,
        }),
        None,
        None,
        None,
        None,
    )
    .await?;
    Ok(page_response(html, false))
}

/// POST /groups/:group_id/info
pub async fn save_info(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Form(draft): Form<GroupInfoDraft>,
) -> Result<Response, ApiError> {
    let members = state.members.list_for_group(group_id).await?;
    let names: Vec<String> = members.iter().map(|m| m.name.clone()).collect();

    let info = match draft.validate(&names) {
        Ok(info) => info,
        Err(message) => {
            let html = render_groups(
                &state,
                Some(group_id),
                None,
                Some(&draft),
                None,
                Some(&message),
                None,
            )
            .await?;
            return Ok(page_response(html, false));
        }
    };

    match state.groups.save_info(group_id, &info).await {
        Ok(()) => {
            info!(group_id = %group_id, "group info saved");
            Ok(redirect_with_flash(
                "/groups",
                Flash::success("모임 정보가 수정되었습니다!"),
            ))
        }
        Err(err) => {
            error!(error = %err, "group info save failed");
            let message = format!("모임 정보 수정 중 오류가 발생했습니다: {err}");
            let html = render_groups(
                &state,
                Some(group_id),
                None,
                Some(&draft),
                None,
                Some(&message),
                None,
            )
            .await?;
            Ok(page_response(html, false))
        }
    }
}
