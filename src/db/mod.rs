use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{clients, contacts, films, settings, subscribers, team_members};

pub mod migrator;
pub mod repositories;

pub use repositories::admin::Admin;
pub use repositories::client::{ClientChanges, NewClient};
pub use repositories::contact::NewContact;
pub use repositories::film::{FilmChanges, NewFilm};
pub use repositories::team::{NewTeamMember, TeamMemberChanges};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn admin_repo(&self) -> repositories::admin::AdminRepository {
        repositories::admin::AdminRepository::new(self.conn.clone())
    }

    fn film_repo(&self) -> repositories::film::FilmRepository {
        repositories::film::FilmRepository::new(self.conn.clone())
    }

    fn team_repo(&self) -> repositories::team::TeamRepository {
        repositories::team::TeamRepository::new(self.conn.clone())
    }

    fn client_repo(&self) -> repositories::client::ClientRepository {
        repositories::client::ClientRepository::new(self.conn.clone())
    }

    fn contact_repo(&self) -> repositories::contact::ContactRepository {
        repositories::contact::ContactRepository::new(self.conn.clone())
    }

    fn subscriber_repo(&self) -> repositories::subscriber::SubscriberRepository {
        repositories::subscriber::SubscriberRepository::new(self.conn.clone())
    }

    fn setting_repo(&self) -> repositories::setting::SettingRepository {
        repositories::setting::SettingRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Admins
    // ========================================================================

    pub async fn get_admin_by_id(&self, id: i32) -> Result<Option<Admin>> {
        self.admin_repo().get_by_id(id).await
    }

    pub async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        self.admin_repo().get_by_username(username).await
    }

    pub async fn authenticate_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Admin>> {
        self.admin_repo().authenticate(username, password).await
    }

    pub async fn admin_exists(&self, username: &str, email: &str) -> Result<bool> {
        self.admin_repo().exists(username, email).await
    }

    pub async fn create_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Admin> {
        self.admin_repo()
            .create(username, email, password, role)
            .await
    }

    // ========================================================================
    // Films
    // ========================================================================

    pub async fn list_films(&self) -> Result<Vec<films::Model>> {
        self.film_repo().list().await
    }

    pub async fn get_film(&self, id: i32) -> Result<Option<films::Model>> {
        self.film_repo().get(id).await
    }

    pub async fn create_film(&self, new: NewFilm) -> Result<films::Model> {
        self.film_repo().create(new).await
    }

    pub async fn update_film(&self, id: i32, changes: FilmChanges) -> Result<Option<films::Model>> {
        self.film_repo().update(id, changes).await
    }

    pub async fn delete_film(&self, id: i32) -> Result<bool> {
        self.film_repo().delete(id).await
    }

    // ========================================================================
    // Team members
    // ========================================================================

    pub async fn list_team_members(&self) -> Result<Vec<team_members::Model>> {
        self.team_repo().list().await
    }

    pub async fn get_team_member(&self, id: i32) -> Result<Option<team_members::Model>> {
        self.team_repo().get(id).await
    }

    pub async fn create_team_member(&self, new: NewTeamMember) -> Result<team_members::Model> {
        self.team_repo().create(new).await
    }

    pub async fn update_team_member(
        &self,
        id: i32,
        changes: TeamMemberChanges,
    ) -> Result<Option<team_members::Model>> {
        self.team_repo().update(id, changes).await
    }

    pub async fn delete_team_member(&self, id: i32) -> Result<bool> {
        self.team_repo().delete(id).await
    }

    // ========================================================================
    // Clients
    // ========================================================================

    pub async fn list_clients(&self) -> Result<Vec<clients::Model>> {
        self.client_repo().list().await
    }

    pub async fn get_client(&self, id: i32) -> Result<Option<clients::Model>> {
        self.client_repo().get(id).await
    }

    pub async fn create_client(&self, new: NewClient) -> Result<clients::Model> {
        self.client_repo().create(new).await
    }

    pub async fn update_client(
        &self,
        id: i32,
        changes: ClientChanges,
    ) -> Result<Option<clients::Model>> {
        self.client_repo().update(id, changes).await
    }

    pub async fn delete_client(&self, id: i32) -> Result<bool> {
        self.client_repo().delete(id).await
    }

    // ========================================================================
    // Contacts
    // ========================================================================

    pub async fn list_contacts(&self) -> Result<Vec<contacts::Model>> {
        self.contact_repo().list().await
    }

    pub async fn get_contact(&self, id: i32) -> Result<Option<contacts::Model>> {
        self.contact_repo().get(id).await
    }

    pub async fn create_contact(&self, new: NewContact) -> Result<contacts::Model> {
        self.contact_repo().create(new).await
    }

    pub async fn mark_contact_read(&self, id: i32) -> Result<Option<contacts::Model>> {
        self.contact_repo().mark_read(id).await
    }

    pub async fn delete_contact(&self, id: i32) -> Result<bool> {
        self.contact_repo().delete(id).await
    }

    // ========================================================================
    // Subscribers
    // ========================================================================

    pub async fn list_subscribers(&self) -> Result<Vec<subscribers::Model>> {
        self.subscriber_repo().list().await
    }

    pub async fn find_subscriber_by_email(
        &self,
        email: &str,
    ) -> Result<Option<subscribers::Model>> {
        self.subscriber_repo().find_by_email(email).await
    }

    pub async fn create_subscriber(&self, email: &str) -> Result<Option<subscribers::Model>> {
        self.subscriber_repo().create(email).await
    }

    pub async fn delete_subscriber(&self, id: i32) -> Result<bool> {
        self.subscriber_repo().delete(id).await
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub async fn all_settings(&self) -> Result<Vec<settings::Model>> {
        self.setting_repo().all().await
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<settings::Model>> {
        self.setting_repo().get(key).await
    }

    pub async fn upsert_setting(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
    ) -> Result<settings::Model> {
        self.setting_repo().upsert(key, value, description).await
    }
}
