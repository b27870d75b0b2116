//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use social_core::entities::{Group, Message, Notification, User};

use super::realtime::NotificationPayload;
use super::responses::{GroupResponse, MessageResponse, NotificationResolvedResponse, UserResponse};
use crate::services::Resolution;

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            group_id: group.id,
            owner_id: group.owner_id,
            title: group.title,
            description: group.description,
            created_at: group.created_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            message_id: message.id,
            chat_id: message.chat_id,
            sender_id: message.sender_id,
            content: message.content,
            emoji: message.emoji,
            created_at: message.created_at,
        }
    }
}

impl From<&Notification> for NotificationPayload {
    fn from(notification: &Notification) -> Self {
        Self {
            notification_id: notification.id,
            user_id: notification.user_id,
            notification_type: notification.kind.type_name().to_string(),
            message: notification.message.clone(),
            status: notification.status,
            reference_id: notification.kind.reference_id(),
            created_at: notification.created_at,
        }
    }
}

impl From<Notification> for NotificationPayload {
    fn from(notification: Notification) -> Self {
        Self::from(&notification)
    }
}

impl From<Resolution> for NotificationResolvedResponse {
    fn from(resolution: Resolution) -> Self {
        Self {
            notification_id: resolution.notification_id,
            status: resolution.status.to_string(),
            chat_id: resolution.chat_id,
        }
    }
}
