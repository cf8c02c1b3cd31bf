/// Board model and database operations
///
/// A board is the top-level container, owned by exactly one user (`user_id`).
/// Lists, cards and their satellites all hang off a board and are removed with
/// it through `ON DELETE CASCADE`.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE boards (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Board model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Board {
    /// Unique board ID
    pub id: i64,

    /// Owner (creator) of the board
    pub user_id: i64,

    /// Display title
    pub title: String,

    /// When the board was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new board
#[derive(Debug, Clone)]
pub struct CreateBoard {
    pub user_id: i64,
    pub title: String,
}

impl Board {
    /// Creates a new board
    ///
    /// Only the board row is written. Membership and default lists are
    /// provisioned by `BoardService::create_board`.
    pub async fn create(pool: &PgPool, data: CreateBoard) -> Result<Self, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (user_id, title)
            VALUES ($1, $2)
            RETURNING id, user_id, title, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.title)
        .fetch_one(pool)
        .await?;

        Ok(board)
    }

    /// Finds a board by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT id, user_id, title, created_at
            FROM boards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Finds the board that contains a list
    pub async fn find_by_list(pool: &PgPool, list_id: i64) -> Result<Option<Self>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT b.id, b.user_id, b.title, b.created_at
            FROM boards b
            JOIN lists l ON l.board_id = b.id
            WHERE l.id = $1
            "#,
        )
        .bind(list_id)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Finds the board that contains a card
    pub async fn find_by_card(pool: &PgPool, card_id: i64) -> Result<Option<Self>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            SELECT b.id, b.user_id, b.title, b.created_at
            FROM boards b
            JOIN lists l ON l.board_id = b.id
            JOIN cards c ON c.list_id = l.id
            WHERE c.id = $1
            "#,
        )
        .bind(card_id)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Lists every board the user owns or is a member of
    ///
    /// Each board appears once, newest first.
    pub async fn list_visible_to(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let boards = sqlx::query_as::<_, Board>(
            r#"
            SELECT DISTINCT b.id, b.user_id, b.title, b.created_at
            FROM boards b
            LEFT JOIN board_members bm ON bm.board_id = b.id AND bm.user_id = $1
            WHERE b.user_id = $1 OR bm.user_id IS NOT NULL
            ORDER BY b.created_at DESC, b.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(boards)
    }

    /// Updates a board's title
    ///
    /// # Returns
    ///
    /// The updated board, or None if it doesn't exist
    pub async fn update_title(
        pool: &PgPool,
        id: i64,
        title: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            UPDATE boards
            SET title = $2
            WHERE id = $1
            RETURNING id, user_id, title, created_at
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_optional(pool)
        .await?;

        Ok(board)
    }

    /// Deletes a board and, by cascade, everything on it
    ///
    /// # Returns
    ///
    /// True if the board was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM boards WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
