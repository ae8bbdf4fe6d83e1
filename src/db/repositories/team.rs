use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{prelude::*, team_members};

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub name: String,
    pub position: String,
    pub image: String,
    pub tagline: Option<String>,
    pub accent_color: Option<String>,
    pub sort_order: i32,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct TeamMemberChanges {
    pub name: Option<String>,
    pub position: Option<String>,
    pub image: Option<String>,
    pub tagline: Option<String>,
    pub accent_color: Option<String>,
    pub sort_order: Option<i32>,
    pub active: Option<bool>,
}

pub struct TeamRepository {
    conn: DatabaseConnection,
}

impl TeamRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<team_members::Model>> {
        let rows = TeamMembers::find()
            .order_by_asc(team_members::Column::SortOrder)
            .order_by_desc(team_members::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list team members")?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<team_members::Model>> {
        let member = TeamMembers::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query team member")?;

        Ok(member)
    }

    pub async fn create(&self, new: NewTeamMember) -> Result<team_members::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = team_members::ActiveModel {
            name: Set(new.name),
            position: Set(new.position),
            image: Set(new.image),
            tagline: Set(new.tagline),
            accent_color: Set(new.accent_color),
            sort_order: Set(new.sort_order),
            active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert team member")?;

        info!("Created team member '{}' (id {})", model.name, model.id);
        Ok(model)
    }

    pub async fn update(
        &self,
        id: i32,
        changes: TeamMemberChanges,
    ) -> Result<Option<team_members::Model>> {
        let Some(member) = TeamMembers::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query team member for update")?
        else {
            return Ok(None);
        };

        let mut active: team_members::ActiveModel = member.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(position) = changes.position {
            active.position = Set(position);
        }
        if let Some(image) = changes.image {
            active.image = Set(image);
        }
        if let Some(tagline) = changes.tagline {
            active.tagline = Set(Some(tagline));
        }
        if let Some(accent_color) = changes.accent_color {
            active.accent_color = Set(Some(accent_color));
        }
        if let Some(sort_order) = changes.sort_order {
            active.sort_order = Set(sort_order);
        }
        if let Some(is_active) = changes.active {
            active.active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update team member")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = TeamMembers::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete team member")?;

        Ok(result.rows_affected > 0)
    }
}
