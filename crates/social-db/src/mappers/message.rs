//! Message entity <-> model mapper

use social_core::entities::Message;
use social_core::value_objects::{ChatId, MessageId, UserId};

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: MessageId::new(model.message_id),
            chat_id: ChatId::new(model.chat_id),
            sender_id: UserId::new(model.sender_id),
            content: model.content,
            emoji: model.emoji,
            created_at: model.created_at,
        }
    }
}
