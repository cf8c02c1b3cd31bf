/// Card operations and card satellites (tags, comments, assignments, activity)
///
/// Every operation resolves the card's board and checks the caller against it.
/// Mutations append to the activity log; a failed log write is reported with
/// `warn!` and never fails the mutation itself.

use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::authorization::{
    can_access, require_card_access, require_list_access, AuthzError,
};
use crate::error::{KanbanError, KanbanResult};
use crate::models::activity::{Activity, ActivityAction};
use crate::models::card::{Card, CardPatch, CreateCard};
use crate::models::card_comment::CardComment;
use crate::models::card_member::CardMember;
use crate::models::card_tag::CardTag;
use crate::models::user::User;

/// Tag color used when none is given
pub const DEFAULT_TAG_COLOR: &str = "primary";

/// Card with tags, assigned members and comments
#[derive(Debug, Clone, Serialize)]
pub struct CardDetail {
    #[serde(flatten)]
    pub card: Card,
    pub tags: Vec<CardTag>,
    pub members: Vec<CardMember>,
    pub comments: Vec<CardComment>,
}

#[derive(Debug, Clone)]
pub struct CardService {
    pool: PgPool,
}

impl CardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn record(&self, card_id: i64, user_id: i64, action: ActivityAction, details: &str) {
        if let Err(e) = Activity::log(&self.pool, Some(card_id), user_id, action, details).await {
            warn!(card_id, user_id, action = %action, error = %e, "Failed to record activity");
        }
    }

    /// Appends a card to a list
    ///
    /// The position is the current card count of the list. Two concurrent
    /// creates can both read the same count; they then share a position and
    /// are ordered by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the list doesn't exist
    /// - `Forbidden` without access to the list's board
    /// - `Validation` for a blank title
    pub async fn create_card(
        &self,
        list_id: i64,
        user_id: i64,
        title: &str,
        badge: &str,
        color: &str,
    ) -> KanbanResult<Card> {
        require_list_access(&self.pool, list_id, user_id).await?;

        let title = title.trim();
        if title.is_empty() {
            return Err(KanbanError::validation("Title is required"));
        }

        let position = Card::count_by_list(&self.pool, list_id).await?;

        let card = Card::create(
            &self.pool,
            CreateCard {
                list_id,
                title: title.to_string(),
                badge: badge.trim().to_string(),
                color: color.trim().to_string(),
                position: position as i32,
            },
        )
        .await?;

        info!(card_id = card.id, list_id, user_id, "Card created");
        self.record(card.id, user_id, ActivityAction::CardCreated, &card.title)
            .await;

        Ok(card)
    }

    /// Cards of a list in display order
    pub async fn list_cards(&self, list_id: i64, user_id: i64) -> KanbanResult<Vec<Card>> {
        require_list_access(&self.pool, list_id, user_id).await?;

        Ok(Card::list_by_list(&self.pool, list_id).await?)
    }

    pub async fn get_card(&self, card_id: i64, user_id: i64) -> KanbanResult<Card> {
        require_card_access(&self.pool, card_id, user_id).await?;

        Card::find_by_id(&self.pool, card_id)
            .await?
            .ok_or_else(|| KanbanError::not_found("Card not found"))
    }

    /// Loads a card with its tags, members and comments
    pub async fn get_card_detail(&self, card_id: i64, user_id: i64) -> KanbanResult<CardDetail> {
        let card = self.get_card(card_id, user_id).await?;

        let tags = CardTag::list_by_card(&self.pool, card_id).await?;
        let members = CardMember::list_by_card(&self.pool, card_id).await?;
        let comments = CardComment::list_by_card(&self.pool, card_id).await?;

        Ok(CardDetail {
            card,
            tags,
            members,
            comments,
        })
    }

    /// Applies a partial update
    ///
    /// See [`CardPatch`] for the field rules. A move targets a list by id; the
    /// list must exist and the caller must be able to access its board.
    ///
    /// # Errors
    ///
    /// - `Validation` if the target list doesn't exist
    /// - `Forbidden` without access to the card's or the target's board
    pub async fn update_card(
        &self,
        card_id: i64,
        user_id: i64,
        patch: CardPatch,
    ) -> KanbanResult<Card> {
        let existing = self.get_card(card_id, user_id).await?;

        if let Some(target) = patch.target_list_id() {
            if target != existing.list_id {
                match require_list_access(&self.pool, target, user_id).await {
                    Ok(_) => {}
                    Err(AuthzError::NotFound(_)) => {
                        return Err(KanbanError::validation("Target list not found"));
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        let changes = patch.resolve(&existing);
        let moved = changes.list_id != existing.list_id;

        let card = Card::update(&self.pool, card_id, changes)
            .await?
            .ok_or_else(|| KanbanError::not_found("Card not found"))?;

        info!(card_id, user_id, moved, "Card updated");
        let details = if moved {
            format!("moved to list {}", card.list_id)
        } else {
            String::new()
        };
        self.record(card_id, user_id, ActivityAction::CardUpdated, &details)
            .await;

        Ok(card)
    }

    /// Deletes a card with all of its satellites
    pub async fn delete_card(&self, card_id: i64, user_id: i64) -> KanbanResult<()> {
        require_card_access(&self.pool, card_id, user_id).await?;

        if !Card::delete(&self.pool, card_id).await? {
            return Err(KanbanError::not_found("Card not found"));
        }

        info!(card_id, user_id, "Card deleted");

        Ok(())
    }

    /// Adds a tag, or recolors the card's existing tag of the same name
    pub async fn add_tag(
        &self,
        card_id: i64,
        user_id: i64,
        name: &str,
        color: &str,
    ) -> KanbanResult<CardTag> {
        require_card_access(&self.pool, card_id, user_id).await?;

        let name = name.trim();
        if name.is_empty() {
            return Err(KanbanError::validation("Tag name is required"));
        }

        let color = match color.trim() {
            "" => DEFAULT_TAG_COLOR,
            c => c,
        };

        let tag = CardTag::upsert(&self.pool, card_id, name, color).await?;

        self.record(card_id, user_id, ActivityAction::TagAdded, &tag.name)
            .await;

        Ok(tag)
    }

    /// Removes a tag from a card
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the tag doesn't exist or belongs to another card
    pub async fn remove_tag(&self, card_id: i64, user_id: i64, tag_id: i64) -> KanbanResult<()> {
        require_card_access(&self.pool, card_id, user_id).await?;

        let tag = CardTag::find_by_id(&self.pool, tag_id)
            .await?
            .filter(|t| t.card_id == card_id)
            .ok_or_else(|| KanbanError::not_found("Tag not found"))?;

        CardTag::delete(&self.pool, tag.id).await?;

        self.record(card_id, user_id, ActivityAction::TagRemoved, &tag.name)
            .await;

        Ok(())
    }

    pub async fn list_tags(&self, card_id: i64, user_id: i64) -> KanbanResult<Vec<CardTag>> {
        require_card_access(&self.pool, card_id, user_id).await?;

        Ok(CardTag::list_by_card(&self.pool, card_id).await?)
    }

    /// Adds a comment authored by `user_id`
    pub async fn add_comment(
        &self,
        card_id: i64,
        user_id: i64,
        content: &str,
    ) -> KanbanResult<CardComment> {
        require_card_access(&self.pool, card_id, user_id).await?;

        let content = content.trim();
        if content.is_empty() {
            return Err(KanbanError::validation("Comment content is required"));
        }

        let comment = CardComment::create(&self.pool, card_id, user_id, content).await?;

        info!(comment_id = comment.id, card_id, user_id, "Comment added");
        self.record(card_id, user_id, ActivityAction::CommentAdded, "")
            .await;

        Ok(comment)
    }

    /// Comments on a card, oldest first
    pub async fn list_comments(
        &self,
        card_id: i64,
        user_id: i64,
    ) -> KanbanResult<Vec<CardComment>> {
        require_card_access(&self.pool, card_id, user_id).await?;

        Ok(CardComment::list_by_card(&self.pool, card_id).await?)
    }

    /// Assigns a user to a card
    ///
    /// Assigning an already assigned user changes nothing.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the assignee doesn't exist
    /// - `Validation` if the assignee cannot access the card's board
    pub async fn assign_member(
        &self,
        card_id: i64,
        by_user_id: i64,
        assignee_id: i64,
    ) -> KanbanResult<Vec<CardMember>> {
        let (board, _) = require_card_access(&self.pool, card_id, by_user_id).await?;

        let assignee = User::find_by_id(&self.pool, assignee_id)
            .await?
            .ok_or_else(|| KanbanError::not_found("User not found"))?;

        if !can_access(&self.pool, &board, assignee.id).await? {
            return Err(KanbanError::validation("User is not a member of this board"));
        }

        if CardMember::add(&self.pool, card_id, assignee.id).await? {
            self.record(card_id, by_user_id, ActivityAction::MemberAssigned, &assignee.email)
                .await;
        }

        Ok(CardMember::list_by_card(&self.pool, card_id).await?)
    }

    /// Removes a user from a card
    pub async fn unassign_member(
        &self,
        card_id: i64,
        by_user_id: i64,
        assignee_id: i64,
    ) -> KanbanResult<()> {
        require_card_access(&self.pool, card_id, by_user_id).await?;

        if !CardMember::remove(&self.pool, card_id, assignee_id).await? {
            return Err(KanbanError::not_found("User is not assigned to this card"));
        }

        self.record(
            card_id,
            by_user_id,
            ActivityAction::MemberUnassigned,
            &assignee_id.to_string(),
        )
        .await;

        Ok(())
    }

    pub async fn list_members(&self, card_id: i64, user_id: i64) -> KanbanResult<Vec<CardMember>> {
        require_card_access(&self.pool, card_id, user_id).await?;

        Ok(CardMember::list_by_card(&self.pool, card_id).await?)
    }

    /// Activity on a card, newest first
    pub async fn list_activity(&self, card_id: i64, user_id: i64) -> KanbanResult<Vec<Activity>> {
        require_card_access(&self.pool, card_id, user_id).await?;

        Ok(Activity::list_by_card(&self.pool, card_id).await?)
    }
}
