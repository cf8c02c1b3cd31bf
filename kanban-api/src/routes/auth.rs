/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/register` - Register a new user and get a token
/// - `POST /api/login` - Exchange credentials for a token
/// - `GET /api/me` - Current user (bearer token required)

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::StatusCode, Extension, Json};
use kanban_shared::{
    auth::{
        context::AuthContext,
        jwt::{self, Claims},
    },
    models::user::User,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token plus the authenticated user
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

fn issue_token(state: &AppState, user: User) -> ApiResult<AuthResponse> {
    let claims = Claims::new(user.id, user.email.clone(), state.config.jwt.ttl());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(AuthResponse { token, user })
}

/// Register a new user
///
/// ```text
/// POST /api/register
/// { "email": "alice@example.com", "password": "secret1" }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: malformed email or short password
/// - `409 Conflict`: email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let user = state.users.register(&req.email, &req.password).await?;

    Ok((StatusCode::CREATED, Json(issue_token(&state, user)?)))
}

/// Login
///
/// Unknown email and wrong password both return the same `401`.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let user = state.users.authenticate(&req.email, &req.password).await?;

    Ok(Json(issue_token(&state, user)?))
}

/// Current user
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<User>> {
    let user = state.users.find_by_id(auth.user_id).await?;

    Ok(Json(user))
}
