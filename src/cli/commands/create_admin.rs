use anyhow::Result;

use crate::config::Config;
use crate::db::Store;

/// Seed an admin account directly in the database. Refuses to overwrite an
/// existing username.
pub async fn run(
    config: &Config,
    username: &str,
    email: &str,
    password: &str,
    superadmin: bool,
) -> Result<()> {
    let store = Store::new(&config.general.database_url).await?;

    if store.get_admin_by_username(username).await?.is_some() {
        println!("Admin '{username}' already exists, nothing to do");
        return Ok(());
    }

    let role = if superadmin { "superadmin" } else { "admin" };
    let admin = store.create_admin(username, email, password, role).await?;

    println!("Created {} '{}' <{}>", admin.role, admin.username, admin.email);
    println!("Change the password after first login if it was shared.");

    Ok(())
}
