/// Board and membership endpoints
///
/// Reads require owner or member access; rename, delete and membership
/// changes require the owner.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use kanban_shared::{
    auth::context::AuthContext,
    models::{board::Board, membership::BoardMember},
    services::boards::BoardDetail,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Default, Deserialize)]
pub struct CreateBoardRequest {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameBoardRequest {
    pub title: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(length(max = 320, message = "Email is too long"))]
    pub email: String,
}

/// `GET /api/boards` - boards the caller owns or belongs to, newest first
pub async fn list_boards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Board>>> {
    Ok(Json(state.boards.list_visible_to(auth.user_id).await?))
}

/// `POST /api/boards` - blank title falls back to the default
pub async fn create_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateBoardRequest>,
) -> ApiResult<(StatusCode, Json<Board>)> {
    let board = state.boards.create_board(auth.user_id, &req.title).await?;

    Ok((StatusCode::CREATED, Json(board)))
}

/// `GET /api/boards/:id` - nested board with lists, cards and tags
pub async fn get_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<i64>,
) -> ApiResult<Json<BoardDetail>> {
    Ok(Json(state.boards.get_board_detail(board_id, auth.user_id).await?))
}

pub async fn rename_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<i64>,
    Json(req): Json<RenameBoardRequest>,
) -> ApiResult<Json<Board>> {
    let board = state
        .boards
        .rename_board(board_id, auth.user_id, &req.title)
        .await?;

    Ok(Json(board))
}

pub async fn delete_board(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.boards.delete_board(board_id, auth.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<i64>,
) -> ApiResult<Json<Vec<BoardMember>>> {
    Ok(Json(state.boards.list_members(board_id, auth.user_id).await?))
}

/// `POST /api/boards/:id/members` - invite by email (owner only)
pub async fn invite_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(board_id): Path<i64>,
    Json(req): Json<InviteRequest>,
) -> ApiResult<(StatusCode, Json<BoardMember>)> {
    req.validate()?;

    let member = state
        .boards
        .invite_member(board_id, auth.user_id, &req.email)
        .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// `DELETE /api/boards/:id/members/:user_id` - owner only, owner can't be removed
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((board_id, user_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .boards
        .remove_member(board_id, auth.user_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
