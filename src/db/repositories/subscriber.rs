use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    SqlErr, Set,
};
use tracing::info;

use crate::entities::{prelude::*, subscribers};

pub struct SubscriberRepository {
    conn: DatabaseConnection,
}

impl SubscriberRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<subscribers::Model>> {
        let rows = Subscribers::find()
            .order_by_desc(subscribers::Column::SubscribedAt)
            .all(&self.conn)
            .await
            .context("Failed to list subscribers")?;

        Ok(rows)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<subscribers::Model>> {
        let subscriber = Subscribers::find()
            .filter(subscribers::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query subscriber by email")?;

        Ok(subscriber)
    }

    /// Insert a subscriber. The unique index on `email` is the authoritative
    /// duplicate guard, so a constraint violation under a concurrent
    /// subscribe race surfaces here as `Ok(None)` rather than an error.
    pub async fn create(&self, email: &str) -> Result<Option<subscribers::Model>> {
        let active = subscribers::ActiveModel {
            email: Set(email.to_string()),
            subscribed_at: Set(chrono::Utc::now().to_rfc3339()),
            active: Set(true),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => {
                info!("New newsletter subscriber '{}' (id {})", model.email, model.id);
                Ok(Some(model))
            }
            Err(e) => {
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    return Ok(None);
                }
                Err(e).context("Failed to insert subscriber")
            }
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<subscribers::Model>> {
        let subscriber = Subscribers::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query subscriber")?;

        Ok(subscriber)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Subscribers::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete subscriber")?;

        Ok(result.rows_affected > 0)
    }
}
