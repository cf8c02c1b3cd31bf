//! # Kanban API Server Library
//!
//! HTTP surface of the kanban backend: configuration, shared state, the axum
//! router and the mapping from service errors to HTTP responses. All domain
//! behavior lives in `kanban-shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Bearer authentication and security headers
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
