use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{films, prelude::*};

/// Fields required to create a film.
#[derive(Debug, Clone)]
pub struct NewFilm {
    pub title: String,
    pub category: String,
    pub tagline: String,
    pub thumbnail: String,
    pub video_url: String,
    pub sort_order: i32,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct FilmChanges {
    pub title: Option<String>,
    pub category: Option<String>,
    pub tagline: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub sort_order: Option<i32>,
}

pub struct FilmRepository {
    conn: DatabaseConnection,
}

impl FilmRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Showcase ordering: explicit sort order first, newest within ties.
    pub async fn list(&self) -> Result<Vec<films::Model>> {
        let rows = Films::find()
            .order_by_asc(films::Column::SortOrder)
            .order_by_desc(films::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list films")?;

        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<films::Model>> {
        let film = Films::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query film")?;

        Ok(film)
    }

    pub async fn create(&self, new: NewFilm) -> Result<films::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = films::ActiveModel {
            title: Set(new.title),
            category: Set(new.category),
            tagline: Set(new.tagline),
            thumbnail: Set(new.thumbnail),
            video_url: Set(new.video_url),
            sort_order: Set(new.sort_order),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert film")?;

        info!("Created film '{}' (id {})", model.title, model.id);
        Ok(model)
    }

    /// Apply only the provided fields and touch `updated_at`.
    /// Returns `None` when the id does not resolve.
    pub async fn update(&self, id: i32, changes: FilmChanges) -> Result<Option<films::Model>> {
        let Some(film) = Films::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query film for update")?
        else {
            return Ok(None);
        };

        let mut active: films::ActiveModel = film.into();

        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(category) = changes.category {
            active.category = Set(category);
        }
        if let Some(tagline) = changes.tagline {
            active.tagline = Set(tagline);
        }
        if let Some(thumbnail) = changes.thumbnail {
            active.thumbnail = Set(thumbnail);
        }
        if let Some(video_url) = changes.video_url {
            active.video_url = Set(video_url);
        }
        if let Some(sort_order) = changes.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update film")?;

        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Films::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete film")?;

        Ok(result.rows_affected > 0)
    }
}
