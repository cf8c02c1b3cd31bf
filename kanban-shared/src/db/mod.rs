/// Database layer
///
/// - `pool`: PostgreSQL connection pool with health check
/// - `migrations`: embedded schema migrations
///
/// Table access lives in [`crate::models`].

pub mod migrations;
pub mod pool;
