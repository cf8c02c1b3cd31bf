/// Card tag model and database operations
///
/// Tags are unique per card by name. Adding a tag whose name already exists on
/// the card updates its color instead of inserting a duplicate.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE card_tags (
///     id BIGSERIAL PRIMARY KEY,
///     card_id BIGINT NOT NULL REFERENCES cards(id) ON DELETE CASCADE,
///     name TEXT NOT NULL,
///     color TEXT NOT NULL DEFAULT 'primary',
///     CONSTRAINT card_tags_card_name_key UNIQUE (card_id, name)
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Card tag model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CardTag {
    pub id: i64,
    pub card_id: i64,
    pub name: String,
    pub color: String,
}

impl CardTag {
    /// Inserts a tag or updates the color of the existing tag with that name
    pub async fn upsert(
        pool: &PgPool,
        card_id: i64,
        name: &str,
        color: &str,
    ) -> Result<Self, sqlx::Error> {
        let tag = sqlx::query_as::<_, CardTag>(
            r#"
            INSERT INTO card_tags (card_id, name, color)
            VALUES ($1, $2, $3)
            ON CONFLICT (card_id, name) DO UPDATE SET color = EXCLUDED.color
            RETURNING id, card_id, name, color
            "#,
        )
        .bind(card_id)
        .bind(name)
        .bind(color)
        .fetch_one(pool)
        .await?;

        Ok(tag)
    }

    /// Finds a tag by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let tag = sqlx::query_as::<_, CardTag>(
            "SELECT id, card_id, name, color FROM card_tags WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(tag)
    }

    /// Lists the tags of a card in insertion order
    pub async fn list_by_card(pool: &PgPool, card_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tags = sqlx::query_as::<_, CardTag>(
            "SELECT id, card_id, name, color FROM card_tags WHERE card_id = $1 ORDER BY id",
        )
        .bind(card_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Lists the tags of many cards at once, ordered by card then insertion
    pub async fn list_by_cards(pool: &PgPool, card_ids: &[i64]) -> Result<Vec<Self>, sqlx::Error> {
        if card_ids.is_empty() {
            return Ok(Vec::new());
        }

        let tags = sqlx::query_as::<_, CardTag>(
            r#"
            SELECT id, card_id, name, color
            FROM card_tags
            WHERE card_id = ANY($1)
            ORDER BY card_id, id
            "#,
        )
        .bind(card_ids.to_vec())
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Deletes a tag
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM card_tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
