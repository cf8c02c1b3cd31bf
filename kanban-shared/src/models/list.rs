/// List model and database operations
///
/// Lists are the ordered columns of a board. Order is `position` then `id`, so
/// lists sharing a position keep their insertion order.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE lists (
///     id BIGSERIAL PRIMARY KEY,
///     board_id BIGINT NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     title TEXT NOT NULL,
///     accent TEXT NOT NULL DEFAULT 'primary',
///     position INTEGER NOT NULL DEFAULT 0
/// );
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// List model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    pub id: i64,
    pub board_id: i64,
    pub title: String,

    /// Palette token used for the column header
    pub accent: String,

    pub position: i32,
}

/// Input for creating a new list
#[derive(Debug, Clone)]
pub struct CreateList {
    pub board_id: i64,
    pub title: String,
    pub accent: String,
    pub position: i32,
}

/// Partial update for a list
///
/// `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateList {
    pub title: Option<String>,
    pub accent: Option<String>,
    pub position: Option<i32>,
}

impl List {
    /// Creates a new list
    pub async fn create(pool: &PgPool, data: CreateList) -> Result<Self, sqlx::Error> {
        let list = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (board_id, title, accent, position)
            VALUES ($1, $2, $3, $4)
            RETURNING id, board_id, title, accent, position
            "#,
        )
        .bind(data.board_id)
        .bind(data.title)
        .bind(data.accent)
        .bind(data.position)
        .fetch_one(pool)
        .await?;

        Ok(list)
    }

    /// Finds a list by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let list = sqlx::query_as::<_, List>(
            r#"
            SELECT id, board_id, title, accent, position
            FROM lists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(list)
    }

    /// Lists the columns of a board in display order
    pub async fn list_by_board(pool: &PgPool, board_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let lists = sqlx::query_as::<_, List>(
            r#"
            SELECT id, board_id, title, accent, position
            FROM lists
            WHERE board_id = $1
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(lists)
    }

    /// Counts the lists on a board
    pub async fn count_by_board(pool: &PgPool, board_id: i64) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lists WHERE board_id = $1")
            .bind(board_id)
            .fetch_one(pool)
            .await?;

        Ok(count.0)
    }

    /// Updates a list
    ///
    /// Only the fields present in `data` are written.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateList,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query = String::from("UPDATE lists SET ");
        let mut updates = Vec::new();
        let mut param_count = 1;

        if data.title.is_some() {
            updates.push(format!("title = ${}", param_count));
            param_count += 1;
        }
        if data.accent.is_some() {
            updates.push(format!("accent = ${}", param_count));
            param_count += 1;
        }
        if data.position.is_some() {
            updates.push(format!("position = ${}", param_count));
            param_count += 1;
        }

        if updates.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        query.push_str(&updates.join(", "));
        query.push_str(&format!(
            " WHERE id = ${} RETURNING id, board_id, title, accent, position",
            param_count
        ));

        let mut q = sqlx::query_as::<_, List>(&query);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(accent) = data.accent {
            q = q.bind(accent);
        }
        if let Some(position) = data.position {
            q = q.bind(position);
        }
        q = q.bind(id);

        let list = q.fetch_optional(pool).await?;

        Ok(list)
    }

    /// Deletes a list and its cards
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
