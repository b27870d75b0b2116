//! Chat entity <-> model mapper

use social_core::entities::{Chat, ChatSummary};
use social_core::value_objects::{ChatId, GroupId, UserId};

use crate::models::{ChatModel, ChatSummaryModel};

impl From<ChatModel> for Chat {
    fn from(model: ChatModel) -> Self {
        Chat {
            id: ChatId::new(model.chat_id),
            group_id: model.group_id.map(GroupId::new),
            created_at: model.created_at,
        }
    }
}

impl From<ChatSummaryModel> for ChatSummary {
    fn from(model: ChatSummaryModel) -> Self {
        ChatSummary {
            chat_id: ChatId::new(model.chat_id),
            display_name: model.display_name,
        }
    }
}

/// Key columns of a one-on-one chat: the pair in ascending order
pub fn direct_pair(user_a: UserId, user_b: UserId) -> (i64, i64) {
    let (a, b) = (user_a.into_inner(), user_b.into_inner());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
