use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{clients, prelude::*};

#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub logo: Option<String>,
    pub sort_order: i32,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub sort_order: Option<i32>,
    pub active: Option<bool>,
}

pub struct ClientRepository {
    conn: DatabaseConnection,
}

impl ClientRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<clients::Model>> {
        let rows = Clients::find()
            .order_by_asc(clients::Column::SortOrder)
            .order_by_desc(clients::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list clients")?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<clients::Model>> {
        let client = Clients::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query client")?;

        Ok(client)
    }

    pub async fn create(&self, new: NewClient) -> Result<clients::Model> {
        let active = clients::ActiveModel {
            name: Set(new.name),
            logo: Set(new.logo),
            sort_order: Set(new.sort_order),
            active: Set(true),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert client")?;

        info!("Created client '{}' (id {})", model.name, model.id);
        Ok(model)
    }

    pub async fn update(&self, id: i32, changes: ClientChanges) -> Result<Option<clients::Model>> {
        let Some(client) = Clients::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query client for update")?
        else {
            return Ok(None);
        };

        let mut active: clients::ActiveModel = client.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(logo) = changes.logo {
            active.logo = Set(Some(logo));
        }
        if let Some(sort_order) = changes.sort_order {
            active.sort_order = Set(sort_order);
        }
        if let Some(is_active) = changes.active {
            active.active = Set(is_active);
        }

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update client")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Clients::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete client")?;

        Ok(result.rows_affected > 0)
    }
}
