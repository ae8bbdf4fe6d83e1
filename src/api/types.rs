use serde::{Deserialize, Serialize};

use crate::db::Admin;
use crate::entities::{clients, contacts, films, settings, subscribers, team_members};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sanitized admin profile; the password hash never reaches this type.
#[derive(Debug, Serialize)]
pub struct AdminDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<Admin> for AdminDto {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            role: admin.role,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmDto {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub tagline: String,
    pub thumbnail: String,
    pub video_url: String,
    pub order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<films::Model> for FilmDto {
    fn from(model: films::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            category: model.category,
            tagline: model.tagline,
            thumbnail: model.thumbnail,
            video_url: model.video_url,
            order: model.sort_order,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDto {
    pub id: i32,
    pub name: String,
    pub position: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    pub order: i32,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<team_members::Model> for TeamMemberDto {
    fn from(model: team_members::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            position: model.position,
            image: model.image,
            tagline: model.tagline,
            accent_color: model.accent_color,
            order: model.sort_order,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub order: i32,
    pub active: bool,
    pub created_at: String,
}

impl From<clients::Model> for ClientDto {
    fn from(model: clients::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            logo: model.logo,
            order: model.sort_order,
            active: model.active,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

impl From<contacts::Model> for ContactDto {
    fn from(model: contacts::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            subject: model.subject,
            message: model.message,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberDto {
    pub id: i32,
    pub email: String,
    pub subscribed_at: String,
    pub active: bool,
}

impl From<subscribers::Model> for SubscriberDto {
    fn from(model: subscribers::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            subscribed_at: model.subscribed_at,
            active: model.active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDto {
    pub key: String,
    pub value: String,
    pub description: String,
    pub updated_at: String,
}

impl From<settings::Model> for SettingDto {
    fn from(model: settings::Model) -> Self {
        Self {
            key: model.key,
            value: model.value,
            description: model.description,
            updated_at: model.updated_at,
        }
    }
}
