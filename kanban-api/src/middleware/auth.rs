/// Bearer token authentication
///
/// Validates the `Authorization: Bearer <jwt>` header and injects the
/// resulting [`AuthContext`] into request extensions. Handlers read it with
/// `Extension<AuthContext>` and pass `auth.user_id` to the services.

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use kanban_shared::auth::context::{authenticate_bearer, AuthContext};

/// JWT authentication middleware
pub async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default());

    let auth: AuthContext = authenticate_bearer(header_value, state.jwt_secret()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
