/// Card endpoints and card satellites (tags, comments, assignees, activity)
///
/// Every route requires access to the board that owns the card.

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use kanban_shared::{
    auth::context::AuthContext,
    models::{
        activity::Activity,
        card::{Card, CardPatch},
        card_comment::CardComment,
        card_member::CardMember,
        card_tag::CardTag,
    },
    services::cards::CardDetail,
};
use serde::{Deserialize, Deserializer};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCardRequest {
    #[validate(length(max = 500, message = "Title must be at most 500 characters"))]
    pub title: String,

    #[serde(default)]
    pub badge: String,

    #[serde(default)]
    pub color: String,
}

/// Partial card update
///
/// A missing field is left alone. For `due_date`, an explicit `null` clears
/// the date while a missing key keeps it.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCardRequest {
    #[validate(length(max = 500, message = "Title must be at most 500 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,
    pub badge: Option<String>,
    pub color: Option<String>,

    #[serde(alias = "listId")]
    pub list_id: Option<i64>,

    pub position: Option<i32>,

    #[serde(default, deserialize_with = "present_or_null")]
    #[allow(clippy::option_option)]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Distinguishes `"key": null` (`Some(None)`) from a missing key (`None`)
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateCardRequest> for CardPatch {
    fn from(req: UpdateCardRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            badge: req.badge,
            color: req.color,
            list_id: req.list_id,
            position: req.position,
            due_date: req.due_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddTagRequest {
    #[validate(length(max = 100, message = "Tag name must be at most 100 characters"))]
    pub name: String,

    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(max = 10000, message = "Comment must be at most 10000 characters"))]
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignMemberRequest {
    pub user_id: i64,
}

pub async fn list_cards(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<i64>,
) -> ApiResult<Json<Vec<Card>>> {
    Ok(Json(state.cards.list_cards(list_id, auth.user_id).await?))
}

/// `POST /api/lists/:id/cards` - appended to the end of the list
pub async fn create_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(list_id): Path<i64>,
    Json(req): Json<CreateCardRequest>,
) -> ApiResult<(StatusCode, Json<Card>)> {
    req.validate()?;

    let card = state
        .cards
        .create_card(list_id, auth.user_id, &req.title, &req.badge, &req.color)
        .await?;

    Ok((StatusCode::CREATED, Json(card)))
}

/// `GET /api/cards/:id` - card with tags, assignees and comments
pub async fn get_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
) -> ApiResult<Json<CardDetail>> {
    Ok(Json(state.cards.get_card_detail(card_id, auth.user_id).await?))
}

/// `PATCH /api/cards/:id` - edit or move
pub async fn update_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
    Json(req): Json<UpdateCardRequest>,
) -> ApiResult<Json<Card>> {
    req.validate()?;

    let card = state
        .cards
        .update_card(card_id, auth.user_id, req.into())
        .await?;

    Ok(Json(card))
}

pub async fn delete_card(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.cards.delete_card(card_id, auth.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_tags(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
) -> ApiResult<Json<Vec<CardTag>>> {
    Ok(Json(state.cards.list_tags(card_id, auth.user_id).await?))
}

/// `POST /api/cards/:id/tags` - re-adding a name updates its color, blank color means primary
pub async fn add_tag(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
    Json(req): Json<AddTagRequest>,
) -> ApiResult<(StatusCode, Json<CardTag>)> {
    req.validate()?;

    let tag = state
        .cards
        .add_tag(card_id, auth.user_id, &req.name, &req.color)
        .await?;

    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn remove_tag(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((card_id, tag_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state.cards.remove_tag(card_id, auth.user_id, tag_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
) -> ApiResult<Json<Vec<CardComment>>> {
    Ok(Json(state.cards.list_comments(card_id, auth.user_id).await?))
}

pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
    Json(req): Json<AddCommentRequest>,
) -> ApiResult<(StatusCode, Json<CardComment>)> {
    req.validate()?;

    let comment = state
        .cards
        .add_comment(card_id, auth.user_id, &req.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
) -> ApiResult<Json<Vec<CardMember>>> {
    Ok(Json(state.cards.list_members(card_id, auth.user_id).await?))
}

/// `POST /api/cards/:id/members` - returns the full assignee list
pub async fn assign_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
    Json(req): Json<AssignMemberRequest>,
) -> ApiResult<Json<Vec<CardMember>>> {
    let members = state
        .cards
        .assign_member(card_id, auth.user_id, req.user_id)
        .await?;

    Ok(Json(members))
}

pub async fn unassign_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((card_id, user_id)): Path<(i64, i64)>,
) -> ApiResult<StatusCode> {
    state
        .cards
        .unassign_member(card_id, auth.user_id, user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/cards/:id/activity` - newest first
pub async fn list_activity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(card_id): Path<i64>,
) -> ApiResult<Json<Vec<Activity>>> {
    Ok(Json(state.cards.list_activity(card_id, auth.user_id).await?))
}
