//! Group workflow
//!
//! Creation, invitations, join requests, leaving and event announcements.
//! Decisions on invitations and join requests go through the relationship
//! engine; this service only opens them.

use std::collections::BTreeSet;

use social_core::entities::{Group, MemberStatus, NewGroup, NewNotification, User};
use social_core::value_objects::{GroupId, UserId};
use social_core::DomainError;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// Input for creating a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGroup {
    pub title: String,
    pub description: String,
    pub invited_members: Vec<UserId>,
}

/// Group service
pub struct GroupService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> GroupService<'a> {
    /// Create a new GroupService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a group with its chat, then invite the listed members
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create(&self, owner_id: UserId, input: CreateGroup) -> ServiceResult<Group> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(ServiceError::validation("Group title is required"));
        }

        let owner = self.find_user(owner_id).await?;
        let invitees = self.resolve_invitees(owner_id, &input.invited_members).await?;
        let group = self
            .ctx
            .group_repo()
            .create_with_chat(&NewGroup {
                owner_id,
                title: title.to_string(),
                description: input.description.trim().to_string(),
            })
            .await?;

        info!(group_id = %group.id, owner_id = %owner_id, "Group created");

        self.send_invitations(&group, &owner, invitees).await?;
        Ok(group)
    }

    /// Invite users on behalf of an accepted member; returns who was invited
    #[instrument(skip(self))]
    pub async fn invite(&self, inviter_id: UserId, group_id: GroupId, members: &[UserId]) -> ServiceResult<Vec<UserId>> {
        let group = self.find_group(group_id).await?;
        self.ensure_accepted(group_id, inviter_id).await?;
        let inviter = self.find_user(inviter_id).await?;
        let invitees = self.resolve_invitees(inviter_id, members).await?;

        self.send_invitations(&group, &inviter, invitees).await
    }

    /// Ask the owner to be let in
    #[instrument(skip(self))]
    pub async fn join(&self, user_id: UserId, group_id: GroupId) -> ServiceResult<()> {
        let group = self.find_group(group_id).await?;
        let status = self.ctx.group_repo().member_status(group_id, user_id).await?;
        if status.is_some_and(|s| s.is_accepted()) {
            return Err(DomainError::AlreadyMember.into());
        }

        let requester = self.find_user(user_id).await?;
        self.ctx
            .group_repo()
            .upsert_member(group_id, user_id, MemberStatus::Request)
            .await?;
        NotificationService::new(self.ctx)
            .notify(NewNotification::join_group_request(
                group.owner_id,
                group_id,
                user_id,
                &requester.full_name(),
                &group.title,
            ))
            .await?;

        info!(group_id = %group_id, user_id = %user_id, "Join request sent");
        Ok(())
    }

    /// Leave the group and its chat. The chat itself is kept even when it
    /// ends up without participants.
    #[instrument(skip(self))]
    pub async fn leave(&self, user_id: UserId, group_id: GroupId) -> ServiceResult<()> {
        self.find_group(group_id).await?;
        self.ctx.group_repo().leave(group_id, user_id).await?;

        info!(group_id = %group_id, user_id = %user_id, "User left group");
        Ok(())
    }

    /// Tell every accepted member about a new event; returns how many were notified
    #[instrument(skip(self))]
    pub async fn announce_event(&self, actor_id: UserId, group_id: GroupId) -> ServiceResult<usize> {
        let group = self.find_group(group_id).await?;
        self.ensure_accepted(group_id, actor_id).await?;

        let members = self.ctx.group_repo().accepted_member_ids(group_id).await?;
        let notifications = NotificationService::new(self.ctx);
        for member in &members {
            notifications
                .notify(NewNotification::new_event(*member, group_id, &group.title))
                .await?;
        }

        Ok(members.len())
    }

    /// Stored membership status, `None` when the user never interacted
    #[instrument(skip(self))]
    pub async fn membership(&self, user_id: UserId, group_id: GroupId) -> ServiceResult<Option<MemberStatus>> {
        Ok(self.ctx.group_repo().member_status(group_id, user_id).await?)
    }

    /// Deduplicate invitees and check that every one of them exists, before
    /// anything is written
    async fn resolve_invitees(&self, inviter_id: UserId, members: &[UserId]) -> ServiceResult<BTreeSet<UserId>> {
        let unique: BTreeSet<UserId> = members
            .iter()
            .copied()
            .filter(|id| *id != inviter_id && !id.is_unset())
            .collect();

        for member in &unique {
            self.find_user(*member).await?;
        }
        Ok(unique)
    }

    async fn send_invitations(
        &self,
        group: &Group,
        inviter: &User,
        invitees: BTreeSet<UserId>,
    ) -> ServiceResult<Vec<UserId>> {
        let inviter_name = inviter.full_name();
        let notifications = NotificationService::new(self.ctx);
        let mut invited = Vec::new();

        for member in invitees {
            let status = self.ctx.group_repo().member_status(group.id, member).await?;
            if status.is_some_and(|s| s.is_accepted()) {
                continue;
            }

            self.ctx
                .group_repo()
                .upsert_member(group.id, member, MemberStatus::Invited)
                .await?;
            notifications
                .notify(NewNotification::group_invitation(member, group.id, &inviter_name, &group.title))
                .await?;
            invited.push(member);
        }

        if !invited.is_empty() {
            info!(group_id = %group.id, count = invited.len(), "Group invitations sent");
        }
        Ok(invited)
    }

    async fn ensure_accepted(&self, group_id: GroupId, user_id: UserId) -> ServiceResult<()> {
        match self.ctx.group_repo().member_status(group_id, user_id).await? {
            Some(status) if status.is_accepted() => Ok(()),
            _ => Err(DomainError::NotGroupMember.into()),
        }
    }

    async fn find_group(&self, group_id: GroupId) -> ServiceResult<Group> {
        Ok(self
            .ctx
            .group_repo()
            .find_by_id(group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(group_id))?)
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
