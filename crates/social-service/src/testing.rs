//! In-memory implementations of the repository traits for service tests
//!
//! All repositories share one [`State`]. A relationship transaction works on
//! a cloned snapshot and swaps it back on commit, so dropping an open
//! transaction discards its changes the same way a database rollback does.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use social_core::entities::{
    Chat, ChatSummary, Follow, FollowStatus, Group, MemberStatus, Message, NewGroup, NewMessage,
    NewNotification, Notification, NotificationStatus, User,
};
use social_core::traits::{
    ChatRepository, FollowRepository, GroupRepository, MessageRepository, NotificationReference,
    NotificationRepository, RelationshipStore, RelationshipTx, RepoResult, SessionRepository,
    UnreadRepository, UserRepository,
};
use social_core::value_objects::{ChatId, GroupId, MessageId, NotificationId, UserId};
use social_core::DomainError;

use crate::services::{NotificationHub, ServiceContext};

#[derive(Debug, Clone)]
struct ChatRow {
    group_id: Option<GroupId>,
    pair: Option<(UserId, UserId)>,
    participants: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct NotificationRow {
    user_id: UserId,
    reference: NotificationReference,
    message: String,
    status: NotificationStatus,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
struct State {
    next_id: i64,
    ticks: i64,
    users: BTreeMap<UserId, User>,
    sessions: HashMap<String, UserId>,
    follows: BTreeMap<(UserId, UserId), FollowStatus>,
    groups: BTreeMap<GroupId, Group>,
    members: BTreeMap<(GroupId, UserId), MemberStatus>,
    chats: BTreeMap<ChatId, ChatRow>,
    messages: Vec<Message>,
    unread: BTreeSet<(UserId, ChatId)>,
    notifications: BTreeMap<NotificationId, NotificationRow>,
}

fn ordered(a: UserId, b: UserId) -> (UserId, UserId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Strictly increasing timestamps
    fn now(&mut self) -> DateTime<Utc> {
        self.ticks += 1;
        DateTime::from_timestamp(1_704_067_200 + self.ticks, 0).unwrap()
    }

    fn direct_chat(&self, a: UserId, b: UserId) -> Option<ChatId> {
        let pair = ordered(a, b);
        self.chats
            .iter()
            .find(|(_, row)| row.group_id.is_none() && row.pair == Some(pair))
            .map(|(id, _)| *id)
    }

    fn create_direct_chat(&mut self, a: UserId, b: UserId) -> ChatId {
        if let Some(id) = self.direct_chat(a, b) {
            return id;
        }
        let id = ChatId::new(self.next_id());
        let created_at = self.now();
        self.chats.insert(
            id,
            ChatRow {
                group_id: None,
                pair: Some(ordered(a, b)),
                participants: [a, b].into_iter().collect(),
                created_at,
            },
        );
        id
    }

    fn group_chat(&self, group_id: GroupId) -> Option<ChatId> {
        self.chats
            .iter()
            .find(|(_, row)| row.group_id == Some(group_id))
            .map(|(id, _)| *id)
    }

    fn user_name(&self, id: UserId) -> String {
        self.users.get(&id).map(User::full_name).unwrap_or_default()
    }

    fn notification(&self, id: NotificationId) -> Option<Notification> {
        let row = self.notifications.get(&id)?;
        Some(Notification {
            id,
            user_id: row.user_id,
            kind: row.reference.kind()?,
            message: row.message.clone(),
            status: row.status,
            created_at: row.created_at,
        })
    }
}

/// Shared in-memory store
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Service context wired to this store and a fresh hub
    pub fn context(&self) -> ServiceContext {
        let store = Arc::new(self.clone());
        ServiceContext::builder()
            .user_repo(store.clone())
            .session_repo(store.clone())
            .follow_repo(store.clone())
            .chat_repo(store.clone())
            .message_repo(store.clone())
            .unread_repo(store.clone())
            .group_repo(store.clone())
            .notification_repo(store.clone())
            .relationship_store(store)
            .notification_hub(Arc::new(NotificationHub::new()))
            .build()
            .unwrap()
    }

    // === Seeding ===

    pub fn add_user(&self, first: &str, last: &str, profile_public: bool) -> UserId {
        let mut state = self.lock();
        let id = UserId::new(state.next_id());
        let mut user = User::new(id, first, last);
        user.profile_public = profile_public;
        state.users.insert(id, user);
        id
    }

    pub fn add_session(&self, token: &str, user_id: UserId) {
        self.lock().sessions.insert(token.to_string(), user_id);
    }

    pub fn set_follow(&self, follower: UserId, following: UserId, status: FollowStatus) {
        self.lock().follows.insert((follower, following), status);
    }

    pub fn add_direct_chat(&self, a: UserId, b: UserId) -> ChatId {
        self.lock().create_direct_chat(a, b)
    }

    /// Group plus its chat with the owner as accepted member and participant
    pub fn add_group(&self, owner: UserId, title: &str) -> (GroupId, ChatId) {
        let group_id = self.add_group_without_chat(owner, title);
        let mut state = self.lock();
        let chat_id = ChatId::new(state.next_id());
        let created_at = state.now();
        state.chats.insert(
            chat_id,
            ChatRow {
                group_id: Some(group_id),
                pair: None,
                participants: [owner].into_iter().collect(),
                created_at,
            },
        );
        (group_id, chat_id)
    }

    pub fn add_group_without_chat(&self, owner: UserId, title: &str) -> GroupId {
        let mut state = self.lock();
        let id = GroupId::new(state.next_id());
        let created_at = state.now();
        state.groups.insert(
            id,
            Group {
                id,
                owner_id: owner,
                title: title.to_string(),
                description: String::new(),
                created_at,
            },
        );
        state.members.insert((id, owner), MemberStatus::Accepted);
        id
    }

    pub fn set_member(&self, group_id: GroupId, user_id: UserId, status: MemberStatus) {
        self.lock().members.insert((group_id, user_id), status);
    }

    pub fn add_participant(&self, chat_id: ChatId, user_id: UserId) {
        if let Some(row) = self.lock().chats.get_mut(&chat_id) {
            row.participants.insert(user_id);
        }
    }

    pub fn add_message(&self, chat_id: ChatId, sender: UserId, content: &str) {
        let mut state = self.lock();
        let id = MessageId::new(state.next_id());
        let created_at = state.now();
        state.messages.push(Message {
            id,
            chat_id,
            sender_id: sender,
            content: content.to_string(),
            emoji: None,
            created_at,
        });
    }

    pub fn mark_unread(&self, user_id: UserId, chat_id: ChatId) {
        self.lock().unread.insert((user_id, chat_id));
    }

    pub fn add_notification(&self, notification: NewNotification) -> NotificationId {
        self.add_raw_notification(
            notification.user_id,
            notification.kind.type_name(),
            notification.kind.reference_id(),
            notification.kind.second_reference_id(),
        )
    }

    /// Store a row as-is, including types the domain cannot decode
    pub fn add_raw_notification(
        &self,
        user_id: UserId,
        type_name: &str,
        reference_id: i64,
        second_reference_id: Option<i64>,
    ) -> NotificationId {
        let mut state = self.lock();
        let id = NotificationId::new(state.next_id());
        let created_at = state.now();
        state.notifications.insert(
            id,
            NotificationRow {
                user_id,
                reference: NotificationReference {
                    type_name: type_name.to_string(),
                    reference_id,
                    second_reference_id,
                },
                message: String::new(),
                status: NotificationStatus::Unread,
                created_at,
            },
        );
        id
    }

    // === Inspection ===

    pub fn follow_status(&self, follower: UserId, following: UserId) -> Option<FollowStatus> {
        self.lock().follows.get(&(follower, following)).copied()
    }

    pub fn follow_count(&self) -> usize {
        self.lock().follows.len()
    }

    pub fn direct_chat(&self, a: UserId, b: UserId) -> Option<ChatId> {
        self.lock().direct_chat(a, b)
    }

    pub fn group_chat(&self, group_id: GroupId) -> Option<ChatId> {
        self.lock().group_chat(group_id)
    }

    pub fn chat_group(&self, chat_id: ChatId) -> Option<GroupId> {
        self.lock().chats.get(&chat_id).and_then(|row| row.group_id)
    }

    pub fn chat_count(&self) -> usize {
        self.lock().chats.len()
    }

    pub fn group_count(&self) -> usize {
        self.lock().groups.len()
    }

    /// Participants in ascending id order; empty for unknown chats
    pub fn participants(&self, chat_id: ChatId) -> Vec<UserId> {
        self.lock()
            .chats
            .get(&chat_id)
            .map(|row| row.participants.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn member_status(&self, group_id: GroupId, user_id: UserId) -> Option<MemberStatus> {
        self.lock().members.get(&(group_id, user_id)).copied()
    }

    pub fn message_count(&self, chat_id: ChatId) -> usize {
        self.lock().messages.iter().filter(|m| m.chat_id == chat_id).count()
    }

    pub fn is_unread(&self, user_id: UserId, chat_id: ChatId) -> bool {
        self.lock().unread.contains(&(user_id, chat_id))
    }

    pub fn notification_status(&self, id: NotificationId) -> Option<NotificationStatus> {
        self.lock().notifications.get(&id).map(|row| row.status)
    }

    /// Decodable notifications of a user in creation order, any status
    pub fn notifications_for(&self, user_id: UserId) -> Vec<Notification> {
        let state = self.lock();
        state
            .notifications
            .iter()
            .filter(|(_, row)| row.user_id == user_id)
            .filter_map(|(id, _)| state.notification(*id))
            .collect()
    }
}

// ============================================================================
// Repository implementations
// ============================================================================

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn find_user_by_token(&self, token: &str) -> RepoResult<Option<UserId>> {
        Ok(self.lock().sessions.get(token).copied())
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn find(&self, follower: UserId, following: UserId) -> RepoResult<Option<Follow>> {
        Ok(self
            .lock()
            .follows
            .get(&(follower, following))
            .map(|status| Follow::new(follower, following, *status)))
    }

    async fn upsert_status(&self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<()> {
        self.lock().follows.insert((follower, following), status);
        Ok(())
    }

    async fn update_status(&self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<bool> {
        Ok(match self.lock().follows.get_mut(&(follower, following)) {
            Some(current) => {
                *current = status;
                true
            }
            None => false,
        })
    }

    async fn followers(&self, user: UserId) -> RepoResult<Vec<User>> {
        let state = self.lock();
        Ok(state
            .follows
            .iter()
            .filter(|((_, following), status)| *following == user && status.is_accepted())
            .filter_map(|((follower, _), _)| state.users.get(follower).cloned())
            .collect())
    }

    async fn following(&self, user: UserId) -> RepoResult<Vec<User>> {
        let state = self.lock();
        Ok(state
            .follows
            .iter()
            .filter(|((follower, _), status)| *follower == user && status.is_accepted())
            .filter_map(|((_, following), _)| state.users.get(following).cloned())
            .collect())
    }
}

#[async_trait]
impl ChatRepository for InMemoryStore {
    async fn find_by_id(&self, id: ChatId) -> RepoResult<Option<Chat>> {
        Ok(self.lock().chats.get(&id).map(|row| Chat {
            id,
            group_id: row.group_id,
            created_at: row.created_at,
        }))
    }

    async fn find_direct(&self, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>> {
        Ok(self.lock().direct_chat(user_a, user_b))
    }

    async fn delete_direct(&self, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>> {
        let mut state = self.lock();
        let Some(chat_id) = state.direct_chat(user_a, user_b) else {
            return Ok(None);
        };
        state.chats.remove(&chat_id);
        state.messages.retain(|m| m.chat_id != chat_id);
        state.unread.retain(|(_, chat)| *chat != chat_id);
        Ok(Some(chat_id))
    }

    async fn find_by_group(&self, group_id: GroupId) -> RepoResult<Option<Chat>> {
        let state = self.lock();
        Ok(state.group_chat(group_id).and_then(|id| {
            state.chats.get(&id).map(|row| Chat {
                id,
                group_id: row.group_id,
                created_at: row.created_at,
            })
        }))
    }

    async fn participant_ids(&self, chat_id: ChatId) -> RepoResult<Vec<UserId>> {
        Ok(self.participants(chat_id))
    }

    async fn is_participant(&self, chat_id: ChatId, user_id: UserId) -> RepoResult<bool> {
        Ok(self
            .lock()
            .chats
            .get(&chat_id)
            .is_some_and(|row| row.participants.contains(&user_id)))
    }

    async fn summaries_for_user(&self, user_id: UserId) -> RepoResult<Vec<ChatSummary>> {
        let state = self.lock();
        Ok(state
            .chats
            .iter()
            .filter(|(_, row)| row.participants.contains(&user_id))
            .map(|(id, row)| {
                let display_name = match (row.group_id, row.pair) {
                    (Some(group_id), _) => state
                        .groups
                        .get(&group_id)
                        .map(|g| g.title.clone())
                        .unwrap_or_default(),
                    (None, Some((low, high))) => {
                        state.user_name(if low == user_id { high } else { low })
                    }
                    (None, None) => String::new(),
                };
                ChatSummary {
                    chat_id: *id,
                    display_name,
                }
            })
            .collect())
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn create(&self, message: &NewMessage) -> RepoResult<Message> {
        let mut state = self.lock();
        if !state.chats.contains_key(&message.chat_id) {
            return Err(DomainError::ChatNotFound(message.chat_id));
        }
        let id = MessageId::new(state.next_id());
        let created_at = state.now();
        let stored = Message {
            id,
            chat_id: message.chat_id,
            sender_id: message.sender_id,
            content: message.content.clone(),
            emoji: message.emoji.clone(),
            created_at,
        };
        state.messages.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_chat(&self, chat_id: ChatId) -> RepoResult<Vec<Message>> {
        Ok(self
            .lock()
            .messages
            .iter()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UnreadRepository for InMemoryStore {
    async fn mark_all_unread(&self, chat_id: ChatId, excluded: UserId) -> RepoResult<()> {
        let mut state = self.lock();
        state.unread.retain(|(_, chat)| *chat != chat_id);
        let participants: Vec<UserId> = state
            .chats
            .get(&chat_id)
            .map(|row| row.participants.iter().copied().collect())
            .unwrap_or_default();
        for user in participants.into_iter().filter(|u| *u != excluded) {
            state.unread.insert((user, chat_id));
        }
        Ok(())
    }

    async fn clear(&self, user_id: UserId, chat_id: ChatId) -> RepoResult<()> {
        self.lock().unread.remove(&(user_id, chat_id));
        Ok(())
    }

    async fn unread_chat_ids(&self, user_id: UserId) -> RepoResult<Vec<ChatId>> {
        Ok(self
            .lock()
            .unread
            .iter()
            .filter(|(user, _)| *user == user_id)
            .map(|(_, chat)| *chat)
            .collect())
    }
}

#[async_trait]
impl GroupRepository for InMemoryStore {
    async fn find_by_id(&self, id: GroupId) -> RepoResult<Option<Group>> {
        Ok(self.lock().groups.get(&id).cloned())
    }

    async fn create_with_chat(&self, group: &NewGroup) -> RepoResult<Group> {
        let (group_id, _) = self.add_group(group.owner_id, &group.title);
        let mut state = self.lock();
        let stored = state
            .groups
            .get_mut(&group_id)
            .ok_or(DomainError::GroupNotFound(group_id))?;
        stored.description.clone_from(&group.description);
        Ok(stored.clone())
    }

    async fn member_status(&self, group_id: GroupId, user_id: UserId) -> RepoResult<Option<MemberStatus>> {
        Ok(self.member_status(group_id, user_id))
    }

    async fn upsert_member(&self, group_id: GroupId, user_id: UserId, status: MemberStatus) -> RepoResult<()> {
        self.set_member(group_id, user_id, status);
        Ok(())
    }

    async fn accepted_member_ids(&self, group_id: GroupId) -> RepoResult<Vec<UserId>> {
        Ok(self
            .lock()
            .members
            .iter()
            .filter(|((group, _), status)| *group == group_id && status.is_accepted())
            .map(|((_, user), _)| *user)
            .collect())
    }

    async fn leave(&self, group_id: GroupId, user_id: UserId) -> RepoResult<()> {
        let mut state = self.lock();
        if let Some(status) = state.members.get_mut(&(group_id, user_id)) {
            *status = MemberStatus::Rejected;
        }
        if let Some(chat_id) = state.group_chat(group_id) {
            if let Some(row) = state.chats.get_mut(&chat_id) {
                row.participants.remove(&user_id);
            }
            state.unread.remove(&(user_id, chat_id));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification> {
        let id = self.add_notification(notification.clone());
        let mut state = self.lock();
        if let Some(row) = state.notifications.get_mut(&id) {
            row.message.clone_from(&notification.message);
        }
        state
            .notification(id)
            .ok_or_else(|| DomainError::InternalError("notification vanished".to_string()))
    }

    async fn find_unread_since(
        &self,
        user_id: UserId,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<Notification>> {
        let state = self.lock();
        Ok(state
            .notifications
            .iter()
            .filter(|(_, row)| {
                row.user_id == user_id
                    && row.status == NotificationStatus::Unread
                    && since.map_or(true, |since| row.created_at > since)
            })
            .filter_map(|(id, _)| state.notification(*id))
            .collect())
    }
}

// ============================================================================
// Relationship transactions
// ============================================================================

#[async_trait]
impl RelationshipStore for InMemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn RelationshipTx>> {
        let snapshot = self.lock().clone();
        Ok(Box::new(InMemoryTx {
            shared: self.state.clone(),
            working: snapshot,
        }))
    }
}

struct InMemoryTx {
    shared: Arc<Mutex<State>>,
    working: State,
}

#[async_trait]
impl RelationshipTx for InMemoryTx {
    async fn set_notification_status(
        &mut self,
        owner: UserId,
        id: NotificationId,
        status: NotificationStatus,
    ) -> RepoResult<bool> {
        Ok(match self.working.notifications.get_mut(&id) {
            Some(row) if row.user_id == owner => {
                row.status = status;
                true
            }
            _ => false,
        })
    }

    async fn notification_reference(&mut self, id: NotificationId) -> RepoResult<Option<NotificationReference>> {
        Ok(self.working.notifications.get(&id).map(|row| row.reference.clone()))
    }

    async fn set_follow_status(&mut self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<()> {
        if let Some(current) = self.working.follows.get_mut(&(follower, following)) {
            *current = status;
        }
        Ok(())
    }

    async fn upsert_follow(&mut self, follower: UserId, following: UserId, status: FollowStatus) -> RepoResult<()> {
        self.working.follows.insert((follower, following), status);
        Ok(())
    }

    async fn find_direct_chat(&mut self, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>> {
        Ok(self.working.direct_chat(user_a, user_b))
    }

    async fn create_direct_chat(&mut self, user_a: UserId, user_b: UserId) -> RepoResult<ChatId> {
        Ok(self.working.create_direct_chat(user_a, user_b))
    }

    async fn set_member_status(&mut self, group_id: GroupId, user_id: UserId, status: MemberStatus) -> RepoResult<()> {
        if let Some(current) = self.working.members.get_mut(&(group_id, user_id)) {
            *current = status;
        }
        Ok(())
    }

    async fn group_chat_id(&mut self, group_id: GroupId) -> RepoResult<Option<ChatId>> {
        Ok(self.working.group_chat(group_id))
    }

    async fn add_participant(&mut self, chat_id: ChatId, user_id: UserId) -> RepoResult<()> {
        let row = self
            .working
            .chats
            .get_mut(&chat_id)
            .ok_or(DomainError::ChatNotFound(chat_id))?;
        row.participants.insert(user_id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let this = *self;
        *this.shared.lock().unwrap() = this.working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dropped_transaction_discards_changes() {
        let store = InMemoryStore::new();
        let a = store.add_user("Alan", "Turing", true);
        let b = store.add_user("Grace", "Hopper", true);

        {
            let mut tx = store.begin().await.unwrap();
            tx.upsert_follow(a, b, FollowStatus::Accepted).await.unwrap();
            tx.create_direct_chat(a, b).await.unwrap();
        }

        assert_eq!(store.follow_status(a, b), None);
        assert_eq!(store.chat_count(), 0);
    }

    #[tokio::test]
    async fn test_session_lookup() {
        let store = InMemoryStore::new();
        let a = store.add_user("Alan", "Turing", true);
        store.add_session("token-a", a);

        assert_eq!(store.find_user_by_token("token-a").await.unwrap(), Some(a));
        assert_eq!(store.find_user_by_token("other").await.unwrap(), None);
    }
}
