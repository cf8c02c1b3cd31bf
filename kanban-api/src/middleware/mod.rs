/// Middleware modules for the API server
///
/// - `auth`: bearer token authentication for `/api` routes
/// - `security`: response security headers

pub mod auth;
pub mod security;
