//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{instrument, warn};

use social_core::entities::{NewNotification, Notification};
use social_core::traits::{NotificationRepository, RepoResult};
use social_core::value_objects::UserId;

use crate::models::NotificationModel;

use super::error::{map_db_error, map_fk_violation, user_not_found};

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(user_id = %notification.user_id, kind = notification.kind.type_name()))]
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification> {
        let recipient = notification.user_id;
        let result = sqlx::query_as::<_, NotificationModel>(
            r"
            INSERT INTO notifications (user_id, type, message, reference_id, second_reference_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING notification_id, user_id, type, message, status,
                      reference_id, second_reference_id, created_at
            ",
        )
        .bind(recipient.into_inner())
        .bind(notification.kind.type_name())
        .bind(&notification.message)
        .bind(notification.kind.reference_id())
        .bind(notification.kind.second_reference_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_fk_violation(e, || user_not_found(recipient)))?;

        Notification::try_from(result)
    }

    #[instrument(skip(self))]
    async fn find_unread_since(
        &self,
        user_id: UserId,
        since: Option<DateTime<Utc>>,
    ) -> RepoResult<Vec<Notification>> {
        let results = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT notification_id, user_id, type, message, status,
                   reference_id, second_reference_id, created_at
            FROM notifications
            WHERE user_id = $1
              AND status = 'unread'
              AND ($2::timestamptz IS NULL OR created_at > $2)
            ORDER BY created_at ASC, notification_id ASC
            ",
        )
        .bind(user_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        // Rows that do not decode (unknown type, join request without a
        // requester) stay answerable by id but are left out of feeds
        Ok(results
            .into_iter()
            .filter_map(|model| {
                let id = model.notification_id;
                match Notification::try_from(model) {
                    Ok(notification) => Some(notification),
                    Err(e) => {
                        warn!(notification_id = id, error = %e, "Skipping undecodable notification");
                        None
                    }
                }
            })
            .collect())
    }
}
