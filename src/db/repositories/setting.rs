use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{prelude::*, settings};

pub struct SettingRepository {
    conn: DatabaseConnection,
}

impl SettingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn all(&self) -> Result<Vec<settings::Model>> {
        let rows = Settings::find()
            .order_by_asc(settings::Column::Key)
            .all(&self.conn)
            .await
            .context("Failed to list settings")?;

        Ok(rows)
    }

    pub async fn get(&self, key: &str) -> Result<Option<settings::Model>> {
        let setting = Settings::find()
            .filter(settings::Column::Key.eq(key))
            .one(&self.conn)
            .await
            .context("Failed to query setting")?;

        Ok(setting)
    }

    /// Create-if-absent, else update value (and description when provided),
    /// touching `updated_at` on both paths.
    pub async fn upsert(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
    ) -> Result<settings::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let existing = Settings::find()
            .filter(settings::Column::Key.eq(key))
            .one(&self.conn)
            .await
            .context("Failed to query setting for upsert")?;

        let model = if let Some(setting) = existing {
            let mut active: settings::ActiveModel = setting.into();
            active.value = Set(value.to_string());
            if let Some(description) = description {
                active.description = Set(description.to_string());
            }
            active.updated_at = Set(now);

            active
                .update(&self.conn)
                .await
                .context("Failed to update setting")?
        } else {
            let active = settings::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                description: Set(description.unwrap_or_default().to_string()),
                updated_at: Set(now),
                ..Default::default()
            };

            active
                .insert(&self.conn)
                .await
                .context("Failed to insert setting")?
        };

        info!("Upserted setting '{}'", model.key);
        Ok(model)
    }
}
