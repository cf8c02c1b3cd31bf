/// Board operations: creation, the nested board view, and membership
///
/// All operations take the authenticated user id explicitly and check it
/// against the board before touching anything.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::authorization::{require_board_access, require_board_owner};
use crate::error::{is_unique_violation, KanbanError, KanbanResult};
use crate::models::board::{Board, CreateBoard};
use crate::models::card::Card;
use crate::models::card_tag::CardTag;
use crate::models::list::{CreateList, List};
use crate::models::membership::{BoardMember, BoardRole};
use crate::models::user::User;
use crate::policy::color::normalize_color;

/// Title used when a board is created with a blank title
pub const DEFAULT_BOARD_TITLE: &str = "My Board";

/// Lists provisioned on every new board, as (title, accent), in position order
pub const DEFAULT_LISTS: [(&str, &str); 4] = [
    ("Ideas", "accent"),
    ("In Progress", "primary"),
    ("Review", "warning"),
    ("Done", "success"),
];

/// Card with its tags, as shown on the board view
#[derive(Debug, Clone, Serialize)]
pub struct CardWithTags {
    #[serde(flatten)]
    pub card: Card,
    pub tags: Vec<CardTag>,
}

/// List with its cards, as shown on the board view
#[derive(Debug, Clone, Serialize)]
pub struct ListWithCards {
    #[serde(flatten)]
    pub list: List,
    pub cards: Vec<CardWithTags>,
}

/// Board with every list, card and tag on it
///
/// Card colors in this view are normalized palette tokens.
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    pub lists: Vec<ListWithCards>,
}

/// Assembles the nested view from flat rows
///
/// `cards` must already be ordered by position within each list and `tags` by
/// id. Card colors are replaced by their normalized token.
pub fn assemble_board_detail(
    board: Board,
    lists: Vec<List>,
    cards: Vec<Card>,
    tags: Vec<CardTag>,
) -> BoardDetail {
    let mut tags_by_card: HashMap<i64, Vec<CardTag>> = HashMap::new();
    for tag in tags {
        tags_by_card.entry(tag.card_id).or_default().push(tag);
    }

    let mut cards_by_list: HashMap<i64, Vec<Card>> = HashMap::new();
    for card in cards {
        cards_by_list.entry(card.list_id).or_default().push(card);
    }

    let lists = lists
        .into_iter()
        .map(|list| {
            let cards = cards_by_list
                .remove(&list.id)
                .unwrap_or_default()
                .into_iter()
                .map(|mut card| {
                    card.color = normalize_color(&card.color, &list.title, &list.accent)
                        .as_str()
                        .to_string();
                    let tags = tags_by_card.remove(&card.id).unwrap_or_default();
                    CardWithTags { card, tags }
                })
                .collect();

            ListWithCards { list, cards }
        })
        .collect();

    BoardDetail { board, lists }
}

#[derive(Debug, Clone)]
pub struct BoardService {
    pool: PgPool,
}

impl BoardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a board owned by `owner_id`
    ///
    /// Also inserts the owner membership row and the four default lists.
    pub async fn create_board(&self, owner_id: i64, title: &str) -> KanbanResult<Board> {
        let title = match title.trim() {
            "" => DEFAULT_BOARD_TITLE.to_string(),
            t => t.to_string(),
        };

        let board = Board::create(
            &self.pool,
            CreateBoard {
                user_id: owner_id,
                title,
            },
        )
        .await?;

        BoardMember::add(&self.pool, board.id, owner_id, BoardRole::Owner).await?;

        for (position, (title, accent)) in DEFAULT_LISTS.iter().enumerate() {
            List::create(
                &self.pool,
                CreateList {
                    board_id: board.id,
                    title: title.to_string(),
                    accent: accent.to_string(),
                    position: position as i32,
                },
            )
            .await?;
        }

        info!(board_id = board.id, user_id = owner_id, "Board created");

        Ok(board)
    }

    /// Boards the user owns or is a member of, newest first
    pub async fn list_visible_to(&self, user_id: i64) -> KanbanResult<Vec<Board>> {
        Ok(Board::list_visible_to(&self.pool, user_id).await?)
    }

    /// Loads the nested board view
    ///
    /// # Errors
    ///
    /// - `NotFound` if the board doesn't exist
    /// - `Forbidden` if the user is neither owner nor member
    pub async fn get_board_detail(&self, board_id: i64, user_id: i64) -> KanbanResult<BoardDetail> {
        let (board, _) = require_board_access(&self.pool, board_id, user_id).await?;

        let lists = List::list_by_board(&self.pool, board.id).await?;
        let cards = Card::list_by_board(&self.pool, board.id).await?;
        let card_ids: Vec<i64> = cards.iter().map(|c| c.id).collect();
        let tags = CardTag::list_by_cards(&self.pool, &card_ids).await?;

        Ok(assemble_board_detail(board, lists, cards, tags))
    }

    /// Renames a board (owner only)
    pub async fn rename_board(
        &self,
        board_id: i64,
        user_id: i64,
        title: &str,
    ) -> KanbanResult<Board> {
        let title = title.trim();
        if title.is_empty() {
            return Err(KanbanError::validation("Title is required"));
        }

        require_board_owner(&self.pool, board_id, user_id).await?;

        let board = Board::update_title(&self.pool, board_id, title)
            .await?
            .ok_or_else(|| KanbanError::not_found("Board not found"))?;

        info!(board_id, user_id, "Board renamed");

        Ok(board)
    }

    /// Deletes a board and everything on it (owner only)
    pub async fn delete_board(&self, board_id: i64, user_id: i64) -> KanbanResult<()> {
        require_board_owner(&self.pool, board_id, user_id).await?;

        if !Board::delete(&self.pool, board_id).await? {
            return Err(KanbanError::not_found("Board not found"));
        }

        info!(board_id, user_id, "Board deleted");

        Ok(())
    }

    /// Memberships of a board, oldest first
    pub async fn list_members(
        &self,
        board_id: i64,
        user_id: i64,
    ) -> KanbanResult<Vec<BoardMember>> {
        require_board_access(&self.pool, board_id, user_id).await?;

        Ok(BoardMember::list_by_board(&self.pool, board_id).await?)
    }

    /// Invites a registered user to a board by email (owner only)
    ///
    /// # Errors
    ///
    /// - `Forbidden` unless `by_user_id` owns the board
    /// - `Validation` for a blank email or a self-invite
    /// - `NotFound` if no user has that email
    /// - `Conflict` if the user is already a member
    pub async fn invite_member(
        &self,
        board_id: i64,
        by_user_id: i64,
        email: &str,
    ) -> KanbanResult<BoardMember> {
        require_board_owner(&self.pool, board_id, by_user_id).await?;

        let email = email.trim();
        if email.is_empty() {
            return Err(KanbanError::validation("Email is required"));
        }

        let invitee = User::find_by_email(&self.pool, email)
            .await?
            .ok_or_else(|| KanbanError::not_found("User not found"))?;

        if invitee.id == by_user_id {
            return Err(KanbanError::validation("You cannot invite yourself"));
        }

        if BoardMember::is_member(&self.pool, board_id, invitee.id).await? {
            return Err(KanbanError::conflict("User is already a member of this board"));
        }

        let member = BoardMember::add(&self.pool, board_id, invitee.id, BoardRole::Member)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    KanbanError::conflict("User is already a member of this board")
                } else {
                    KanbanError::from(e)
                }
            })?;

        info!(board_id, by_user_id, member_id = invitee.id, "Member invited");

        Ok(member)
    }

    /// Removes a member from a board (owner only)
    ///
    /// # Errors
    ///
    /// - `Forbidden` unless `by_user_id` owns the board
    /// - `Validation` if the target is the owner
    /// - `NotFound` if the target holds no removable membership
    pub async fn remove_member(
        &self,
        board_id: i64,
        by_user_id: i64,
        target_user_id: i64,
    ) -> KanbanResult<()> {
        let board = require_board_owner(&self.pool, board_id, by_user_id).await?;

        if target_user_id == board.user_id {
            return Err(KanbanError::validation("Cannot remove the board owner"));
        }

        if !BoardMember::remove_non_owner(&self.pool, board_id, target_user_id).await? {
            warn!(board_id, target_user_id, "Remove requested for non-member");
            return Err(KanbanError::not_found("Member not found"));
        }

        info!(board_id, by_user_id, member_id = target_user_id, "Member removed");

        Ok(())
    }
}
