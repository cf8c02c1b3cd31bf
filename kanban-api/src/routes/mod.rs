/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration, login and the current user
/// - `users`: User search
/// - `boards`: Boards and board membership
/// - `lists`: Lists within a board
/// - `cards`: Cards, tags, comments, assignees and activity

pub mod auth;
pub mod boards;
pub mod cards;
pub mod health;
pub mod lists;
pub mod users;
