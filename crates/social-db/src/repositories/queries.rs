//! Statements shared by pooled repositories and the relationship transaction
//!
//! Each function runs on a bare connection so the caller decides whether it
//! executes inside a transaction.

use social_core::error::DomainError;
use social_core::traits::RepoResult;
use social_core::value_objects::{ChatId, GroupId, UserId};
use sqlx::PgConnection;

use crate::mappers::direct_pair;

use super::error::map_db_error;

pub async fn find_direct_chat(conn: &mut PgConnection, user_a: UserId, user_b: UserId) -> RepoResult<Option<ChatId>> {
    let (low, high) = direct_pair(user_a, user_b);

    let chat_id = sqlx::query_scalar::<_, i64>(
        r"
        SELECT chat_id FROM chats
        WHERE group_id IS NULL AND direct_user_low = $1 AND direct_user_high = $2
        ",
    )
    .bind(low)
    .bind(high)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(chat_id.map(ChatId::new))
}

/// Create the pair's chat, or return the existing one when a concurrent
/// writer got there first
pub async fn create_direct_chat(conn: &mut PgConnection, user_a: UserId, user_b: UserId) -> RepoResult<ChatId> {
    let (low, high) = direct_pair(user_a, user_b);

    let inserted = sqlx::query_scalar::<_, i64>(
        r"
        INSERT INTO chats (direct_user_low, direct_user_high)
        VALUES ($1, $2)
        ON CONFLICT (direct_user_low, direct_user_high) DO NOTHING
        RETURNING chat_id
        ",
    )
    .bind(low)
    .bind(high)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    let chat_id = match inserted {
        Some(id) => ChatId::new(id),
        None => find_direct_chat(conn, user_a, user_b)
            .await?
            .ok_or_else(|| DomainError::InternalError("direct chat vanished during insert".to_string()))?,
    };

    sqlx::query(
        r"
        INSERT INTO chat_participants (chat_id, participant_id)
        VALUES ($1, $2), ($1, $3)
        ON CONFLICT (chat_id, participant_id) DO NOTHING
        ",
    )
    .bind(chat_id.into_inner())
    .bind(low)
    .bind(high)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(chat_id)
}

pub async fn group_chat_id(conn: &mut PgConnection, group_id: GroupId) -> RepoResult<Option<ChatId>> {
    let chat_id = sqlx::query_scalar::<_, i64>(
        r"
        SELECT chat_id FROM chats WHERE group_id = $1
        ",
    )
    .bind(group_id.into_inner())
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(chat_id.map(ChatId::new))
}

pub async fn add_participant(conn: &mut PgConnection, chat_id: ChatId, user_id: UserId) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO chat_participants (chat_id, participant_id)
        VALUES ($1, $2)
        ON CONFLICT (chat_id, participant_id) DO NOTHING
        ",
    )
    .bind(chat_id.into_inner())
    .bind(user_id.into_inner())
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

pub async fn set_member_status(
    conn: &mut PgConnection,
    group_id: GroupId,
    user_id: UserId,
    status: &str,
) -> RepoResult<u64> {
    let result = sqlx::query(
        r"
        UPDATE group_members SET status = $3, updated_at = NOW()
        WHERE group_id = $1 AND user_id = $2
        ",
    )
    .bind(group_id.into_inner())
    .bind(user_id.into_inner())
    .bind(status)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(result.rows_affected())
}

pub async fn upsert_follow(conn: &mut PgConnection, follower: UserId, following: UserId, status: &str) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO follows (follower_id, following_id, status)
        VALUES ($1, $2, $3)
        ON CONFLICT (follower_id, following_id)
        DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
        ",
    )
    .bind(follower.into_inner())
    .bind(following.into_inner())
    .bind(status)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}
