//! Update mutations: create with image upload, edit with image merge, delete.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use chrono::Utc;
use futures::future::try_join_all;
use tracing::{error, info, warn};
use uuid::Uuid;

use domain::images;
use domain::models::update::UpdateDraft;
use gateway::storage::object_key;
use gateway::GatewayError;

use crate::app::AppState;
use crate::error::ApiError;
use crate::render::board::BoardDraft;
use crate::routes::board::render_board_with;
use crate::routes::{redirect_with_flash, require_group};
use crate::services;
use crate::session::Flash;

struct UploadFile {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

struct UpdateForm {
    draft: UpdateDraft,
    removed: Vec<String>,
    files: Vec<UploadFile>,
}

fn bad_multipart(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("multipart: {err}"))
}

async fn read_update_form(mut multipart: Multipart) -> Result<UpdateForm, ApiError> {
    let mut form = UpdateForm {
        draft: UpdateDraft::default(),
        removed: Vec::new(),
        files: Vec::new(),
    };
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "images" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(bad_multipart)?;
            // Browsers submit an empty file part when nothing was picked.
            if filename.is_empty() || bytes.is_empty() {
                continue;
            }
            form.files.push(UploadFile {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            match name.as_str() {
                "name" => form.draft.name = value,
                "date" => form.draft.date = value,
                "work_life" => form.draft.work_life = value,
                "hobby_life" => form.draft.hobby_life = value,
                "health_care" => form.draft.health_care = value,
                "family_news" => form.draft.family_news = value,
                "recent_interests" => form.draft.recent_interests = value,
                "remove_image" => form.removed.push(value),
                _ => {}
            }
        }
    }
    Ok(form)
}

/// Uploads every selected file in parallel and collects public URLs. One
/// failed upload fails the batch, so no record is ever written with a
/// partial image set.
async fn upload_images(
    state: &AppState,
    group_id: Uuid,
    files: &[UploadFile],
) -> Result<Vec<String>, GatewayError> {
    if files.is_empty() {
        return Ok(Vec::new());
    }
    let timestamp = Utc::now().timestamp_millis();
    let uploads = files.iter().enumerate().map(|(index, file)| {
        let storage = state.storage.clone();
        async move {
            let key = object_key(group_id, timestamp, index, &file.filename);
            let path = storage
                .upload(&key, file.bytes.clone(), &file.content_type)
                .await?;
            Ok::<String, GatewayError>(storage.public_url(&path))
        }
    });
    try_join_all(uploads).await
}

fn storage_error_message(err: &GatewayError, bucket: &str) -> String {
    if err.is_missing_bucket() {
        format!(
            "이미지 저장소가 준비되지 않았습니다. 백엔드 스토리지에 \"{bucket}\" 버킷을 만든 뒤 다시 시도해주세요."
        )
    } else {
        format!("이미지 업로드 중 오류가 발생했습니다: {err}")
    }
}

/// POST /board/updates
pub async fn create_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let selected = match require_group(&headers) {
        Ok(selected) => selected,
        Err(response) => return Ok(response),
    };
    let form = read_update_form(multipart).await?;

    let new_update = match form.draft.validate() {
        Ok(new_update) => new_update,
        Err(message) => {
            return Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::NewUpdate(&form.draft),
                &message,
            )
            .await);
        }
    };

    let image_urls = match upload_images(&state, selected.id, &form.files).await {
        Ok(urls) => urls,
        Err(err) => {
            warn!(error = %err, group_id = %selected.id, "image upload failed");
            let message = storage_error_message(&err, &state.config.storage.bucket);
            return Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::NewUpdate(&form.draft),
                &message,
            )
            .await);
        }
    };

    match state
        .updates
        .create(selected.id, &new_update, &image_urls)
        .await
    {
        Ok(update) => {
            info!(update_id = %update.id, group_id = %selected.id, "update created");
            // The user-visible outcome is decided; the side effects start
            // after it and cannot change it.
            services::spawn_update_side_effects(&state, &update);
            Ok(redirect_with_flash(
                "/board",
                Flash::success("근황이 성공적으로 공유되었습니다!"),
            ))
        }
        Err(err) => {
            error!(error = %err, "update creation failed");
            let message = format!("근황 공유 중 오류가 발생했습니다: {err}");
            Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::NewUpdate(&form.draft),
                &message,
            )
            .await)
        }
    }
}

/// POST /board/updates/:update_id
pub async fn save_update(
    State(state): State<AppState>,
    Path(update_id): Path<Uuid>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let selected = match require_group(&headers) {
        Ok(selected) => selected,
        Err(response) => return Ok(response),
    };
    let form = read_update_form(multipart).await?;

    let Some(existing) = state.updates.find(update_id).await? else {
        return Ok(redirect_with_flash(
            "/board",
            Flash::error("수정하려는 근황을 찾을 수 없습니다."),
        ));
    };
    // Existing images minus this edit session's removals, order preserved.
    let kept = images::apply_removals(&existing.images(), &form.removed);

    let new_update = match form.draft.validate() {
        Ok(new_update) => new_update,
        Err(message) => {
            return Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::EditUpdate {
                    id: update_id,
                    draft: &form.draft,
                    kept_images: &kept,
                },
                &message,
            )
            .await);
        }
    };

    let uploaded = match upload_images(&state, selected.id, &form.files).await {
        Ok(urls) => urls,
        Err(err) => {
            warn!(error = %err, update_id = %update_id, "image upload failed");
            let message = storage_error_message(&err, &state.config.storage.bucket);
            return Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::EditUpdate {
                    id: update_id,
                    draft: &form.draft,
                    kept_images: &kept,
                },
                &message,
            )
            .await);
        }
    };
    let merged = images::merge(kept.clone(), uploaded);

    match state.updates.save(update_id, &new_update, &merged).await {
        Ok(()) => {
            info!(update_id = %update_id, "update saved");
            Ok(redirect_with_flash(
                "/board",
                Flash::success("근황이 수정되었습니다!"),
            ))
        }
        Err(err) => {
            error!(error = %err, update_id = %update_id, "update save failed");
            let message = format!("근황 수정 중 오류가 발생했습니다: {err}");
            Ok(render_board_with(
                &state,
                &selected,
                BoardDraft::EditUpdate {
                    id: update_id,
                    draft: &form.draft,
                    kept_images: &kept,
                },
                &message,
            )
            .await)
        }
    }
}

/// POST /board/updates/:update_id/delete
pub async fn delete_update(
    State(state): State<AppState>,
    Path(update_id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = require_group(&headers) {
        return response;
    }
    match state.updates.delete(update_id).await {
        Ok(()) => {
            info!(update_id = %update_id, "update deleted");
            redirect_with_flash("/board", Flash::success("근황이 삭제되었습니다!"))
        }
        Err(err) => {
            error!(error = %err, update_id = %update_id, "update delete failed");
            redirect_with_flash(
                "/board",
                Flash::error(format!("근황 삭제 중 오류가 발생했습니다: {err}")),
            )
        }
    }
}
