/// Board membership model and database operations
///
/// Memberships form the many-to-many relation between boards and users. The
/// creator of a board gets an `owner` row; invited collaborators get `member`
/// rows. Members may read a board and work on its cards, but only the owner
/// administers it.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE board_role AS ENUM ('owner', 'member');
///
/// CREATE TABLE board_members (
///     id BIGSERIAL PRIMARY KEY,
///     board_id BIGINT NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role board_role NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT board_members_board_user_key UNIQUE (board_id, user_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use kanban_shared::models::membership::{BoardMember, BoardRole};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, board_id: i64, user_id: i64) -> Result<(), sqlx::Error> {
/// BoardMember::add(&pool, board_id, user_id, BoardRole::Member).await?;
/// assert!(BoardMember::is_member(&pool, board_id, user_id).await?);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Roles a user can hold on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "board_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BoardRole {
    /// Creator of the board; never removable
    Owner,

    /// Invited collaborator
    Member,
}

impl BoardRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardRole::Owner => "owner",
            BoardRole::Member => "member",
        }
    }
}

/// Membership row joined with the member's email
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardMember {
    pub id: i64,
    pub board_id: i64,
    pub user_id: i64,
    pub role: BoardRole,
    pub created_at: DateTime<Utc>,

    /// Email of the member, joined from `users`
    pub email: String,
}

impl BoardMember {
    /// Adds a user to a board with the given role
    ///
    /// # Errors
    ///
    /// Returns a unique violation if the user already has a row on this board
    pub async fn add(
        pool: &PgPool,
        board_id: i64,
        user_id: i64,
        role: BoardRole,
    ) -> Result<Self, sqlx::Error> {
        let member = sqlx::query_as::<_, BoardMember>(
            r#"
            WITH inserted AS (
                INSERT INTO board_members (board_id, user_id, role)
                VALUES ($1, $2, $3)
                RETURNING id, board_id, user_id, role, created_at
            )
            SELECT i.id, i.board_id, i.user_id, i.role, i.created_at, u.email
            FROM inserted i
            JOIN users u ON u.id = i.user_id
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(pool)
        .await?;

        Ok(member)
    }

    /// Checks whether a membership row exists for (board, user)
    pub async fn is_member(
        pool: &PgPool,
        board_id: i64,
        user_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM board_members
                WHERE board_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(exists.0)
    }

    /// Lists all memberships on a board, oldest first
    pub async fn list_by_board(pool: &PgPool, board_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let members = sqlx::query_as::<_, BoardMember>(
            r#"
            SELECT bm.id, bm.board_id, bm.user_id, bm.role, bm.created_at, u.email
            FROM board_members bm
            JOIN users u ON u.id = bm.user_id
            WHERE bm.board_id = $1
            ORDER BY bm.created_at ASC, bm.id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    /// Removes a non-owner membership
    ///
    /// Rows with role `owner` are never deleted, whatever the caller asks.
    ///
    /// # Returns
    ///
    /// True if a row was removed
    pub async fn remove_non_owner(
        pool: &PgPool,
        board_id: i64,
        user_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM board_members
            WHERE board_id = $1 AND user_id = $2 AND role <> 'owner'
            "#,
        )
        .bind(board_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
