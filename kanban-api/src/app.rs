/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use kanban_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = kanban_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    middleware::{auth::jwt_auth_layer, security::SecurityHeadersLayer},
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use kanban_shared::services::{BoardService, CardService, ListService, UserDirectory};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The
/// services only hold a pool handle, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    pub users: UserDirectory,
    pub boards: BoardService,
    pub lists: ListService,
    pub cards: CardService,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            users: UserDirectory::new(db.clone()),
            boards: BoardService::new(db.clone()),
            lists: ListService::new(db.clone()),
            cards: CardService::new(db.clone()),
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /health                           # Health check (public)
/// └── /api/
///     ├── POST /register, POST /login       # Public
///     └── (bearer token required)
///         ├── GET  /me
///         ├── GET  /users/search?q=
///         ├── GET|POST          /boards
///         ├── GET|PATCH|DELETE  /boards/:id
///         ├── GET|POST          /boards/:id/members
///         ├── DELETE            /boards/:id/members/:user_id
///         ├── GET|POST          /boards/:id/lists
///         ├── GET|PATCH|DELETE  /lists/:id
///         ├── GET|POST          /lists/:id/cards
///         ├── GET|PATCH|DELETE  /cards/:id
///         ├── GET|POST          /cards/:id/tags
///         ├── DELETE            /cards/:id/tags/:tag_id
///         ├── GET|POST          /cards/:id/comments
///         ├── GET|POST          /cards/:id/members
///         ├── DELETE            /cards/:id/members/:user_id
///         └── GET               /cards/:id/activity
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{auth, boards, cards, health, lists, users};

    let public_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/me", get(auth::me))
        .route("/users/search", get(users::search))
        .route("/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/boards/:id",
            get(boards::get_board)
                .patch(boards::rename_board)
                .delete(boards::delete_board),
        )
        .route(
            "/boards/:id/members",
            get(boards::list_members).post(boards::invite_member),
        )
        .route("/boards/:id/members/:user_id", delete(boards::remove_member))
        .route(
            "/boards/:id/lists",
            get(lists::list_lists).post(lists::create_list),
        )
        .route(
            "/lists/:id",
            get(lists::get_list)
                .patch(lists::update_list)
                .delete(lists::delete_list),
        )
        .route(
            "/lists/:id/cards",
            get(cards::list_cards).post(cards::create_card),
        )
        .route(
            "/cards/:id",
            get(cards::get_card)
                .patch(cards::update_card)
                .delete(cards::delete_card),
        )
        .route("/cards/:id/tags", get(cards::list_tags).post(cards::add_tag))
        .route("/cards/:id/tags/:tag_id", delete(cards::remove_tag))
        .route(
            "/cards/:id/comments",
            get(cards::list_comments).post(cards::add_comment),
        )
        .route(
            "/cards/:id/members",
            get(cards::list_members).post(cards::assign_member),
        )
        .route("/cards/:id/members/:user_id", delete(cards::unassign_member))
        .route("/cards/:id/activity", get(cards::list_activity))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new().merge(public_routes).merge(protected_routes);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// CORS policy from configuration
///
/// `*` in the origin list allows any origin without credentials.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
