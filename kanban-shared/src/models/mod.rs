/// Database models for the kanban backend
///
/// Each model owns its table and exposes async CRUD functions taking a
/// `&PgPool`. Models perform no authorization; that is the job of the
/// services in [`crate::services`].
///
/// # Models
///
/// - `user`: accounts and credential storage
/// - `board`: boards and their owner
/// - `membership`: board membership with `owner`/`member` roles
/// - `list`: ordered columns of a board
/// - `card`: ordered items of a list, plus patch resolution
/// - `card_tag`: per-card tags, unique by name
/// - `card_comment`: write-once comments
/// - `card_member`: users assigned to a card
/// - `activity`: append-only audit log
///
/// # Example
///
/// ```no_run
/// use kanban_shared::models::user::{User, CreateUser};
/// use kanban_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod activity;
pub mod board;
pub mod card;
pub mod card_comment;
pub mod card_member;
pub mod card_tag;
pub mod list;
pub mod membership;
pub mod user;
