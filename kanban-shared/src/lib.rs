//! # Kanban Shared Library
//!
//! Domain core of the kanban backend: storage, authorization and the
//! operations built on them. The HTTP server in `kanban-api` is a thin layer
//! over [`services`].
//!
//! ## Module Organization
//!
//! - `models`: tables and their queries
//! - `services`: user directory, board, list and card operations
//! - `auth`: password hashing, JWT, bearer resolution, board access checks
//! - `policy`: pure rules such as card color normalization
//! - `db`: connection pool and migrations
//! - `error`: the error taxonomy shared by every operation

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod policy;
pub mod services;

pub use error::{KanbanError, KanbanResult};

/// Current version of the kanban shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
