/// Card assignment model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE card_members (
///     id BIGSERIAL PRIMARY KEY,
///     card_id BIGINT NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (card_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// User assigned to a card, joined with their email
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CardMember {
    pub id: i64,
    pub card_id: i64,
    pub user_id: i64,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

impl CardMember {
    /// Assigns a user to a card
    ///
    /// Assigning someone already on the card is a no-op.
    ///
    /// # Returns
    ///
    /// True if a new assignment was created
    pub async fn add(pool: &PgPool, card_id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO card_members (card_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (card_id, user_id) DO NOTHING
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes an assignment
    ///
    /// # Returns
    ///
    /// True if the user was assigned
    pub async fn remove(pool: &PgPool, card_id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM card_members WHERE card_id = $1 AND user_id = $2")
            .bind(card_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists the users assigned to a card in assignment order
    pub async fn list_by_card(pool: &PgPool, card_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let members = sqlx::query_as::<_, CardMember>(
            r#"
            SELECT cm.id, cm.card_id, cm.user_id, u.email AS user_email, cm.created_at
            FROM card_members cm
            JOIN users u ON u.id = cm.user_id
            WHERE cm.card_id = $1
            ORDER BY cm.created_at ASC, cm.id ASC
            "#,
        )
        .bind(card_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }
}
