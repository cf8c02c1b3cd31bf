/// User directory endpoints

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use kanban_shared::{auth::context::AuthContext, models::user::User};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /api/users/search?q=` - email substring search, caller excluded
pub async fn search(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.search(&query.q, auth.user_id).await?;

    Ok(Json(users))
}
