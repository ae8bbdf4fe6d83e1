use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{contacts, prelude::*};

pub const STATUS_NEW: &str = "new";
pub const STATUS_READ: &str = "read";

#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

pub struct ContactRepository {
    conn: DatabaseConnection,
}

impl ContactRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<contacts::Model>> {
        let rows = Contacts::find()
            .order_by_desc(contacts::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list contacts")?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<contacts::Model>> {
        let contact = Contacts::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query contact")?;

        Ok(contact)
    }

    pub async fn create(&self, new: NewContact) -> Result<contacts::Model> {
        let active = contacts::ActiveModel {
            name: Set(new.name),
            email: Set(new.email),
            subject: Set(new.subject),
            message: Set(new.message),
            status: Set(STATUS_NEW.to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert contact")?;

        info!("Stored contact submission from '{}' (id {})", model.email, model.id);
        Ok(model)
    }

    /// Transition `new` -> `read`. Idempotent: an already-read contact is
    /// returned unchanged. `None` when the id does not resolve.
    pub async fn mark_read(&self, id: i32) -> Result<Option<contacts::Model>> {
        let Some(contact) = Contacts::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query contact for mark-read")?
        else {
            return Ok(None);
        };

        if contact.status == STATUS_READ {
            return Ok(Some(contact));
        }

        let mut active: contacts::ActiveModel = contact.into();
        active.status = Set(STATUS_READ.to_string());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to mark contact as read")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Contacts::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete contact")?;

        Ok(result.rows_affected > 0)
    }
}
