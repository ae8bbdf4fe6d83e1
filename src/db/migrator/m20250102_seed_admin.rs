use crate::entities::{admins, prelude::*};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Bootstrap credentials, expected to be rotated after first login.
const SEED_USERNAME: &str = "admin";
const SEED_PASSWORD: &str = "admin123";
const SEED_EMAIL: &str = "admin@rainbowfilms.com";

/// Hash the seed password using Argon2id
fn hash_seed_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(SEED_PASSWORD.as_bytes(), &salt)
        .expect("Failed to hash seed password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = chrono::Utc::now().to_rfc3339();
        let password_hash = hash_seed_password();

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Admins)
            .columns([
                admins::Column::Username,
                admins::Column::PasswordHash,
                admins::Column::Email,
                admins::Column::Role,
                admins::Column::CreatedAt,
                admins::Column::UpdatedAt,
            ])
            .values_panic([
                SEED_USERNAME.into(),
                password_hash.into(),
                SEED_EMAIL.into(),
                "superadmin".into(),
                now.clone().into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = sea_orm_migration::sea_query::Query::delete()
            .from_table(Admins)
            .and_where(Expr::col(admins::Column::Username).eq(SEED_USERNAME))
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
