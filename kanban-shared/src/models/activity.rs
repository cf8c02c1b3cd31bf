/// Activity log model and database operations
///
/// Append-only audit trail of actions taken on cards. Rows are never updated;
/// they disappear only when their card is deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE activities (
///     id BIGSERIAL PRIMARY KEY,
///     card_id BIGINT REFERENCES cards(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     action_type TEXT NOT NULL,
///     details TEXT NOT NULL DEFAULT '',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Kinds of recorded actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    CardCreated,
    CardUpdated,
    CommentAdded,
    TagAdded,
    TagRemoved,
    MemberAssigned,
    MemberUnassigned,
}

impl ActivityAction {
    /// Value stored in `activities.action_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::CardCreated => "card_created",
            ActivityAction::CardUpdated => "card_updated",
            ActivityAction::CommentAdded => "comment_added",
            ActivityAction::TagAdded => "tag_added",
            ActivityAction::TagRemoved => "tag_removed",
            ActivityAction::MemberAssigned => "member_assigned",
            ActivityAction::MemberUnassigned => "member_unassigned",
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity entry joined with the actor's email
///
/// `action_type` stays a string so rows written by older builds still load.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Activity {
    pub id: i64,
    pub card_id: Option<i64>,
    pub user_id: i64,
    pub user_email: String,
    pub action_type: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Appends an entry to the log
    pub async fn log(
        pool: &PgPool,
        card_id: Option<i64>,
        user_id: i64,
        action: ActivityAction,
        details: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO activities (card_id, user_id, action_type, details)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .bind(action.as_str())
        .bind(details)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Lists a card's activity, newest first
    pub async fn list_by_card(pool: &PgPool, card_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let activities = sqlx::query_as::<_, Activity>(
            r#"
            SELECT a.id, a.card_id, a.user_id, u.email AS user_email,
                   a.action_type, a.details, a.created_at
            FROM activities a
            JOIN users u ON u.id = a.user_id
            WHERE a.card_id = $1
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .bind(card_id)
        .fetch_all(pool)
        .await?;

        Ok(activities)
    }
}
