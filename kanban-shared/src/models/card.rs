/// Card model and database operations
///
/// Cards are ordered within a list by `position`, then `id`. Updates arrive as
/// a [`CardPatch`] that is resolved against the stored card into a complete
/// [`CardChanges`] before anything is written, so the patch rules live in one
/// pure function.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE cards (
///     id BIGSERIAL PRIMARY KEY,
///     list_id BIGINT NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     description TEXT NOT NULL DEFAULT '',
///     badge TEXT NOT NULL DEFAULT '',
///     color TEXT NOT NULL DEFAULT '',
///     position INTEGER NOT NULL DEFAULT 0,
///     due_date TIMESTAMPTZ
/// );
/// ```
///
/// # Patch rules
///
/// - blank or whitespace-only title keeps the stored title; others are trimmed
/// - description is written verbatim
/// - badge is trimmed
/// - blank color keeps the stored color
/// - a non-positive `list_id` is ignored
/// - a negative position keeps the stored position
/// - `due_date: Some(None)` clears the due date

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Card model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Card {
    pub id: i64,
    pub list_id: i64,
    pub title: String,
    pub description: String,
    pub badge: String,

    /// Stored color; may be a legacy alias or free text
    pub color: String,

    pub position: i32,
    pub due_date: Option<DateTime<Utc>>,
}

/// Input for creating a new card
#[derive(Debug, Clone)]
pub struct CreateCard {
    pub list_id: i64,
    pub title: String,
    pub badge: String,
    pub color: String,

    /// Computed by the caller, normally the current card count of the list
    pub position: i32,
}

/// Partial card update as supplied by a client
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub badge: Option<String>,
    pub color: Option<String>,
    pub list_id: Option<i64>,
    pub position: Option<i32>,

    /// Outer `None` leaves the due date alone, `Some(None)` clears it
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Fully resolved column values for an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardChanges {
    pub title: String,
    pub description: String,
    pub badge: String,
    pub color: String,
    pub list_id: i64,
    pub position: i32,
    pub due_date: Option<DateTime<Utc>>,
}

impl CardPatch {
    /// The list the card should move to, if the patch asks for a move
    pub fn target_list_id(&self) -> Option<i64> {
        self.list_id.filter(|id| *id > 0)
    }

    /// Applies the patch rules to `existing`
    pub fn resolve(&self, existing: &Card) -> CardChanges {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| existing.title.clone());

        let description = self
            .description
            .clone()
            .unwrap_or_else(|| existing.description.clone());

        let badge = self
            .badge
            .as_deref()
            .map(|b| b.trim().to_string())
            .unwrap_or_else(|| existing.badge.clone());

        let color = self
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| existing.color.clone());

        let position = self
            .position
            .filter(|p| *p >= 0)
            .unwrap_or(existing.position);

        let due_date = match self.due_date {
            Some(due) => due,
            None => existing.due_date,
        };

        CardChanges {
            title,
            description,
            badge,
            color,
            list_id: self.target_list_id().unwrap_or(existing.list_id),
            position,
            due_date,
        }
    }
}

impl Card {
    /// Creates a new card
    ///
    /// # Errors
    ///
    /// Returns a foreign key violation if the list does not exist
    pub async fn create(pool: &PgPool, data: CreateCard) -> Result<Self, sqlx::Error> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (list_id, title, badge, color, position)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, list_id, title, description, badge, color, position, due_date
            "#,
        )
        .bind(data.list_id)
        .bind(data.title)
        .bind(data.badge)
        .bind(data.color)
        .bind(data.position)
        .fetch_one(pool)
        .await?;

        Ok(card)
    }

    /// Finds a card by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, list_id, title, description, badge, color, position, due_date
            FROM cards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(card)
    }

    /// Lists the cards of a list in display order
    pub async fn list_by_list(pool: &PgPool, list_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT id, list_id, title, description, badge, color, position, due_date
            FROM cards
            WHERE list_id = $1
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(pool)
        .await?;

        Ok(cards)
    }

    /// Lists every card on a board, ordered by position within each list
    pub async fn list_by_board(pool: &PgPool, board_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let cards = sqlx::query_as::<_, Card>(
            r#"
            SELECT c.id, c.list_id, c.title, c.description, c.badge, c.color, c.position, c.due_date
            FROM cards c
            JOIN lists l ON l.id = c.list_id
            WHERE l.board_id = $1
            ORDER BY c.list_id, c.position ASC, c.id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(cards)
    }

    /// Counts the cards in a list
    pub async fn count_by_list(pool: &PgPool, list_id: i64) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards WHERE list_id = $1")
            .bind(list_id)
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }

    /// Writes resolved changes to a card
    pub async fn update(
        pool: &PgPool,
        id: i64,
        changes: CardChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards
            SET title = $2, description = $3, badge = $4, color = $5,
                list_id = $6, position = $7, due_date = $8
            WHERE id = $1
            RETURNING id, list_id, title, description, badge, color, position, due_date
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.badge)
        .bind(changes.color)
        .bind(changes.list_id)
        .bind(changes.position)
        .bind(changes.due_date)
        .fetch_optional(pool)
        .await?;

        Ok(card)
    }

    /// Deletes a card with its tags, comments, assignments and activity
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
