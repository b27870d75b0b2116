//! Follow / unfollow workflow
//!
//! Public profiles are followed immediately and get their one-on-one chat in
//! the same transaction. Private profiles receive a follow request that the
//! relationship engine resolves later.

use social_core::entities::{FollowStatus, NewNotification, User};
use social_core::value_objects::{ChatId, UserId};
use social_core::DomainError;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;
use super::relationship::ensure_direct_chat;

/// Result of an unfollow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unfollow {
    /// The one-on-one chat that was deleted, if any
    pub removed_chat: Option<ChatId>,
}

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow `following`, returning the resulting status
    #[instrument(skip(self))]
    pub async fn follow(&self, follower: UserId, following: UserId) -> ServiceResult<FollowStatus> {
        if follower == following {
            return Err(DomainError::CannotFollowSelf.into());
        }

        let target = self.find_user(following).await?;

        if target.requires_follow_approval() {
            let requester = self.find_user(follower).await?;
            self.ctx
                .follow_repo()
                .upsert_status(follower, following, FollowStatus::Pending)
                .await?;
            NotificationService::new(self.ctx)
                .notify(NewNotification::follow_request(
                    following,
                    follower,
                    &requester.full_name(),
                ))
                .await?;

            info!(follower = %follower, following = %following, "Follow request sent");
            return Ok(FollowStatus::Pending);
        }

        let mut tx = self.ctx.relationship_store().begin().await?;
        tx.upsert_follow(follower, following, FollowStatus::Accepted).await?;
        let chat_id = ensure_direct_chat(tx.as_mut(), follower, following).await?;
        tx.commit().await?;

        info!(follower = %follower, following = %following, chat_id = %chat_id, "User followed");
        Ok(FollowStatus::Accepted)
    }

    /// Stop following. The shared chat survives only while the reverse
    /// follow is still accepted.
    #[instrument(skip(self))]
    pub async fn unfollow(&self, follower: UserId, following: UserId) -> ServiceResult<Unfollow> {
        self.ctx
            .follow_repo()
            .update_status(follower, following, FollowStatus::Rejected)
            .await?;

        let reverse_accepted = self
            .ctx
            .follow_repo()
            .find(following, follower)
            .await?
            .is_some_and(|reverse| reverse.status.is_accepted());

        let removed_chat = if reverse_accepted {
            None
        } else {
            self.ctx.chat_repo().delete_direct(follower, following).await?
        };

        info!(
            follower = %follower,
            following = %following,
            removed_chat = ?removed_chat,
            "User unfollowed"
        );
        Ok(Unfollow { removed_chat })
    }

    /// Stored status of the ordered pair; no row reads as rejected
    #[instrument(skip(self))]
    pub async fn status(&self, follower: UserId, following: UserId) -> ServiceResult<FollowStatus> {
        Ok(self
            .ctx
            .follow_repo()
            .find(follower, following)
            .await?
            .map_or(FollowStatus::Rejected, |follow| follow.status))
    }

    #[instrument(skip(self))]
    pub async fn followers(&self, user_id: UserId) -> ServiceResult<Vec<User>> {
        Ok(self.ctx.follow_repo().followers(user_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn following(&self, user_id: UserId) -> ServiceResult<Vec<User>> {
        Ok(self.ctx.follow_repo().following(user_id).await?)
    }

    async fn find_user(&self, user_id: UserId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}
