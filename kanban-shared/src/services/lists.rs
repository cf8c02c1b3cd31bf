/// List operations guarded by board access

use sqlx::PgPool;
use tracing::info;

use crate::auth::authorization::{require_board_access, require_list_access};
use crate::error::{KanbanError, KanbanResult};
use crate::models::list::{CreateList, List, UpdateList};

/// Accent used when a list is created without one
pub const DEFAULT_ACCENT: &str = "primary";

#[derive(Debug, Clone)]
pub struct ListService {
    pool: PgPool,
}

impl ListService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Appends a list to a board
    ///
    /// The position is the current list count, so concurrent creates may
    /// share a position. Display order then falls back to id.
    pub async fn create_list(
        &self,
        board_id: i64,
        user_id: i64,
        title: &str,
        accent: &str,
    ) -> KanbanResult<List> {
        require_board_access(&self.pool, board_id, user_id).await?;

        let title = title.trim();
        if title.is_empty() {
            return Err(KanbanError::validation("Title is required"));
        }

        let accent = match accent.trim() {
            "" => DEFAULT_ACCENT,
            a => a,
        };

        let position = List::count_by_board(&self.pool, board_id).await?;

        let list = List::create(
            &self.pool,
            CreateList {
                board_id,
                title: title.to_string(),
                accent: accent.to_string(),
                position: position as i32,
            },
        )
        .await?;

        info!(list_id = list.id, board_id, user_id, "List created");

        Ok(list)
    }

    pub async fn get_list(&self, list_id: i64, user_id: i64) -> KanbanResult<List> {
        require_list_access(&self.pool, list_id, user_id).await?;

        List::find_by_id(&self.pool, list_id)
            .await?
            .ok_or_else(|| KanbanError::not_found("List not found"))
    }

    /// Lists the columns of a board in display order
    pub async fn list_by_board(&self, board_id: i64, user_id: i64) -> KanbanResult<Vec<List>> {
        require_board_access(&self.pool, board_id, user_id).await?;

        Ok(List::list_by_board(&self.pool, board_id).await?)
    }

    /// Applies a partial update
    ///
    /// Blank title or accent and negative positions are ignored.
    pub async fn update_list(
        &self,
        list_id: i64,
        user_id: i64,
        patch: UpdateList,
    ) -> KanbanResult<List> {
        require_list_access(&self.pool, list_id, user_id).await?;

        let changes = UpdateList {
            title: non_blank(patch.title),
            accent: non_blank(patch.accent),
            position: patch.position.filter(|p| *p >= 0),
        };

        let list = List::update(&self.pool, list_id, changes)
            .await?
            .ok_or_else(|| KanbanError::not_found("List not found"))?;

        info!(list_id, user_id, "List updated");

        Ok(list)
    }

    /// Deletes a list and its cards
    pub async fn delete_list(&self, list_id: i64, user_id: i64) -> KanbanResult<()> {
        require_list_access(&self.pool, list_id, user_id).await?;

        if !List::delete(&self.pool, list_id).await? {
            return Err(KanbanError::not_found("List not found"));
        }

        info!(list_id, user_id, "List deleted");

        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some(" Backlog ".to_string())), Some("Backlog".to_string()));
    }
}
