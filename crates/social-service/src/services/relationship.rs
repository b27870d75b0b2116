//! Relationship resolution
//!
//! Answers a notification and cascades the decision into follow or group
//! membership state and chat participation. Everything from the status
//! update to the last cascade step runs in one store transaction: returning
//! early with an error drops the transaction and rolls every change back.

use social_core::entities::{FollowStatus, MemberStatus, NotificationKind, NotificationStatus};
use social_core::traits::{RelationshipTx, RepoResult};
use social_core::value_objects::{ChatId, GroupId, NotificationId, UserId};
use social_core::DomainError;
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// What a committed response changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub notification_id: NotificationId,
    pub status: NotificationStatus,
    /// `None` when the stored type carries no cascade
    pub kind: Option<NotificationKind>,
    /// Chat the accepted decision created or joined
    pub chat_id: Option<ChatId>,
}

/// Relationship transaction engine
pub struct RelationshipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RelationshipService<'a> {
    /// Create a new RelationshipService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve a notification owned by `acting_user`.
    ///
    /// A notification that does not exist or belongs to another user is
    /// reported as not found. Concurrent responses to the same notification
    /// are not serialized: the last commit wins.
    #[instrument(skip(self))]
    pub async fn respond(
        &self,
        acting_user: UserId,
        notification_id: NotificationId,
        accepted: bool,
    ) -> ServiceResult<Resolution> {
        let status = NotificationStatus::from_decision(accepted);
        let mut tx = self.ctx.relationship_store().begin().await?;

        if !tx
            .set_notification_status(acting_user, notification_id, status)
            .await?
        {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        }

        let kind = tx
            .notification_reference(notification_id)
            .await?
            .and_then(|reference| {
                let kind = reference.kind();
                if kind.is_none() {
                    debug!(type_name = %reference.type_name, "Notification type has no cascade");
                }
                kind
            });

        let chat_id = match kind {
            Some(kind) => cascade(tx.as_mut(), acting_user, kind, accepted).await?,
            None => None,
        };

        tx.commit().await?;

        info!(
            notification_id = %notification_id,
            user_id = %acting_user,
            status = %status,
            kind = kind.map(|k| k.type_name()),
            "Notification resolved"
        );

        Ok(Resolution {
            notification_id,
            status,
            kind,
            chat_id,
        })
    }
}

async fn cascade(
    tx: &mut dyn RelationshipTx,
    responder: UserId,
    kind: NotificationKind,
    accepted: bool,
) -> RepoResult<Option<ChatId>> {
    match kind {
        NotificationKind::FollowRequest { follower } => {
            tx.set_follow_status(follower, responder, FollowStatus::from_decision(accepted))
                .await?;
            if !accepted {
                return Ok(None);
            }
            ensure_direct_chat(tx, follower, responder).await.map(Some)
        }
        NotificationKind::GroupInvitation { group } => {
            admit_member(tx, group, responder, accepted).await
        }
        // The responder is the owner; the requester is who joins
        NotificationKind::JoinGroupRequest { group, requester } => {
            admit_member(tx, group, requester, accepted).await
        }
        NotificationKind::Event { .. } => Ok(None),
    }
}

async fn admit_member(
    tx: &mut dyn RelationshipTx,
    group: GroupId,
    member: UserId,
    accepted: bool,
) -> RepoResult<Option<ChatId>> {
    tx.set_member_status(group, member, MemberStatus::from_decision(accepted))
        .await?;
    if !accepted {
        return Ok(None);
    }

    let chat_id = tx
        .group_chat_id(group)
        .await?
        .ok_or(DomainError::GroupChatNotFound(group))?;
    tx.add_participant(chat_id, member).await?;

    Ok(Some(chat_id))
}

/// Return the pair's one-on-one chat, creating it when absent
pub(crate) async fn ensure_direct_chat(
    tx: &mut dyn RelationshipTx,
    user_a: UserId,
    user_b: UserId,
) -> RepoResult<ChatId> {
    if let Some(chat_id) = tx.find_direct_chat(user_a, user_b).await? {
        return Ok(chat_id);
    }
    tx.create_direct_chat(user_a, user_b).await
}
