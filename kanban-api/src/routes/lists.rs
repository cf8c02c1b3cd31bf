/// List (column) endpoints

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use kanban_shared::{
    auth::context::AuthContext,
    models::list::{List, UpdateList},
    services::lists::DEFAULT_ACCENT,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateListRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: String,

    pub accent: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateListRequest {
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,

    pub accent: Option<String>,
    pub position: Option<i32>,
}

impl From<UpdateListRequest> for UpdateList {
    fn from(req: UpdateListRequest) -> Self {
        Self {
            title: req.title,
            accent: req.accent,
            position: req.position,
        }
    }
}

pub async fn list_lists(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<i64>,
) -> ApiResult<Json<Vec<List>>> {
    Ok(Json(state.lists.list_by_board(board_id, auth.user_id).await?))
}

/// `POST /api/boards/:id/lists` - appended after the existing columns
pub async fn create_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<i64>,
    Json(req): Json<CreateListRequest>,
) -> ApiResult<(StatusCode, Json<List>)> {
    req.validate()?;

    let accent = req.accent.as_deref().unwrap_or(DEFAULT_ACCENT);
    let list = state
        .lists
        .create_list(board_id, auth.user_id, &req.title, accent)
        .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn get_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<i64>,
) -> ApiResult<Json<List>> {
    Ok(Json(state.lists.get_list(list_id, auth.user_id).await?))
}

pub async fn update_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<i64>,
    Json(req): Json<UpdateListRequest>,
) -> ApiResult<Json<List>> {
    req.validate()?;

    let list = state
        .lists
        .update_list(list_id, auth.user_id, req.into())
        .await?;

    Ok(Json(list))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.lists.delete_list(list_id, auth.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
