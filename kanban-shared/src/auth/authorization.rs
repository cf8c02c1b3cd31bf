/// Board authorization checks
///
/// Every protected operation resolves the board that owns the target entity and
/// checks the caller against it.
///
/// # Permission Model
///
/// 1. **Read/write**: the board owner, or any user with a membership row
/// 2. **Administer** (invite, remove members, rename, delete): the owner only
///
/// Lists, cards and card satellites inherit the permissions of their board.
///
/// # Example
///
/// ```no_run
/// use kanban_shared::auth::authorization::{require_board_access, require_board_owner};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool, board_id: i64, user_id: i64) -> Result<(), Box<dyn std::error::Error>> {
/// // Readers and members
/// let (board, access) = require_board_access(&pool, board_id, user_id).await?;
///
/// // Owner only
/// require_board_owner(&pool, board_id, user_id).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;

use crate::error::KanbanError;
use crate::models::board::Board;
use crate::models::membership::BoardMember;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Board (or the list/card used to find it) does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// User is neither owner nor member
    #[error("Access denied")]
    AccessDenied,

    /// User is a member but the operation needs the owner
    #[error("Only the board owner can do this")]
    OwnerRequired,

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<AuthzError> for KanbanError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::NotFound(_) => KanbanError::NotFound(err.to_string()),
            AuthzError::AccessDenied | AuthzError::OwnerRequired => {
                KanbanError::Forbidden(err.to_string())
            }
            AuthzError::DatabaseError(e) => KanbanError::Database(e),
        }
    }
}

/// How a user relates to a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardAccess {
    /// Created the board
    Owner,

    /// Holds a membership row
    Member,
}

impl BoardAccess {
    /// True if this access level may administer the board
    pub fn can_administer(&self) -> bool {
        matches!(self, BoardAccess::Owner)
    }
}

/// Decides a user's access to a board
///
/// `is_member` is whether a membership row exists for (board, user). Ownership
/// is decided by `board.user_id` alone.
///
/// ```
/// use chrono::Utc;
/// use kanban_shared::auth::authorization::{resolve_access, BoardAccess};
/// use kanban_shared::models::board::Board;
///
/// let board = Board { id: 1, user_id: 7, title: "Sprint".into(), created_at: Utc::now() };
///
/// assert_eq!(resolve_access(&board, 7, false), Some(BoardAccess::Owner));
/// assert_eq!(resolve_access(&board, 8, true), Some(BoardAccess::Member));
/// assert_eq!(resolve_access(&board, 9, false), None);
/// ```
pub fn resolve_access(board: &Board, user_id: i64, is_member: bool) -> Option<BoardAccess> {
    if board.user_id == user_id {
        Some(BoardAccess::Owner)
    } else if is_member {
        Some(BoardAccess::Member)
    } else {
        None
    }
}

/// Checks whether a user may read and work on a board
pub async fn can_access(pool: &PgPool, board: &Board, user_id: i64) -> Result<bool, sqlx::Error> {
    if board.user_id == user_id {
        return Ok(true);
    }

    BoardMember::is_member(pool, board.id, user_id).await
}

/// Checks a user against an already loaded board
///
/// # Errors
///
/// Returns `AuthzError::AccessDenied` if the user is neither owner nor member
pub async fn check_board(
    pool: &PgPool,
    board: &Board,
    user_id: i64,
) -> Result<BoardAccess, AuthzError> {
    let is_member =
        board.user_id != user_id && BoardMember::is_member(pool, board.id, user_id).await?;

    resolve_access(board, user_id, is_member).ok_or(AuthzError::AccessDenied)
}

/// Loads a board and checks the user may access it
///
/// # Errors
///
/// - `AuthzError::NotFound` if the board doesn't exist
/// - `AuthzError::AccessDenied` if the user is neither owner nor member
pub async fn require_board_access(
    pool: &PgPool,
    board_id: i64,
    user_id: i64,
) -> Result<(Board, BoardAccess), AuthzError> {
    let board = Board::find_by_id(pool, board_id)
        .await?
        .ok_or(AuthzError::NotFound("Board"))?;

    let access = check_board(pool, &board, user_id).await?;

    Ok((board, access))
}

/// Loads a board and checks the user owns it
///
/// Members get `AuthzError::OwnerRequired`; strangers get
/// `AuthzError::AccessDenied`.
pub async fn require_board_owner(
    pool: &PgPool,
    board_id: i64,
    user_id: i64,
) -> Result<Board, AuthzError> {
    let (board, access) = require_board_access(pool, board_id, user_id).await?;

    if !access.can_administer() {
        return Err(AuthzError::OwnerRequired);
    }

    Ok(board)
}

/// Resolves the board of a list and checks access
pub async fn require_list_access(
    pool: &PgPool,
    list_id: i64,
    user_id: i64,
) -> Result<(Board, BoardAccess), AuthzError> {
    let board = Board::find_by_list(pool, list_id)
        .await?
        .ok_or(AuthzError::NotFound("List"))?;

    let access = check_board(pool, &board, user_id).await?;

    Ok((board, access))
}

/// Resolves the board of a card and checks access
pub async fn require_card_access(
    pool: &PgPool,
    card_id: i64,
    user_id: i64,
) -> Result<(Board, BoardAccess), AuthzError> {
    let board = Board::find_by_card(pool, card_id)
        .await?
        .ok_or(AuthzError::NotFound("Card"))?;

    let access = check_board(pool, &board, user_id).await?;

    Ok((board, access))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn board(owner: i64) -> Board {
        Board {
            id: 1,
            user_id: owner,
            title: "Sprint".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_access_ignores_membership_flag() {
        assert_eq!(resolve_access(&board(1), 1, false), Some(BoardAccess::Owner));
        assert_eq!(resolve_access(&board(1), 1, true), Some(BoardAccess::Owner));
    }

    #[test]
    fn test_member_and_stranger() {
        assert_eq!(resolve_access(&board(1), 2, true), Some(BoardAccess::Member));
        assert_eq!(resolve_access(&board(1), 2, false), None);
    }

    #[test]
    fn test_only_owner_administers() {
        assert!(BoardAccess::Owner.can_administer());
        assert!(!BoardAccess::Member.can_administer());
    }

    #[test]
    fn test_error_mapping() {
        let err: KanbanError = AuthzError::NotFound("Board").into();
        assert!(matches!(err, KanbanError::NotFound(ref m) if m == "Board not found"));

        let err: KanbanError = AuthzError::AccessDenied.into();
        assert!(matches!(err, KanbanError::Forbidden(ref m) if m == "Access denied"));

        let err: KanbanError = AuthzError::OwnerRequired.into();
        assert!(matches!(err, KanbanError::Forbidden(_)));

        let err: KanbanError = AuthzError::DatabaseError(sqlx::Error::RowNotFound).into();
        assert!(err.is_internal());
    }
}
