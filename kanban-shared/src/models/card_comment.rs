/// Card comment model and database operations
///
/// Comments are write-once. Every read joins the author's email.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE card_comments (
///     id BIGSERIAL PRIMARY KEY,
///     card_id BIGINT NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     content TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Comment joined with its author's email
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CardComment {
    pub id: i64,
    pub card_id: i64,

    /// Author
    pub user_id: i64,
    pub user_email: String,

    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CardComment {
    /// Inserts a comment and returns it with the author's email
    pub async fn create(
        pool: &PgPool,
        card_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, CardComment>(
            r#"
            WITH inserted AS (
                INSERT INTO card_comments (card_id, user_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, card_id, user_id, content, created_at
            )
            SELECT i.id, i.card_id, i.user_id, u.email AS user_email, i.content, i.created_at
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Lists the comments of a card, oldest first
    pub async fn list_by_card(pool: &PgPool, card_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let comments = sqlx::query_as::<_, CardComment>(
            r#"
            SELECT cc.id, cc.card_id, cc.user_id, u.email AS user_email, cc.content, cc.created_at
            FROM card_comments cc
            JOIN users u ON u.id = cc.user_id
            WHERE cc.card_id = $1
            ORDER BY cc.created_at ASC, cc.id ASC
            "#,
        )
        .bind(card_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }
}
