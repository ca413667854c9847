use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::shared::config::AdminConfig;
use crate::system::users::service;

/// Ensure the admin account from `[admin]` exists (created on first start)
pub async fn ensure_admin_user(conn: &DatabaseConnection, admin: &AdminConfig) -> Result<()> {
    let created = service::ensure_user(conn, &admin.email, &admin.password).await?;

    if created {
        tracing::warn!("═══════════════════════════════════════════════");
        tracing::warn!("  Admin account created: {}", admin.email);
        tracing::warn!("  Password is taken from config.toml [admin]");
        tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
        tracing::warn!("═══════════════════════════════════════════════");
    } else {
        tracing::info!("Admin account {} already present", admin.email);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;
    use crate::system::users::repository;

    #[tokio::test]
    async fn admin_is_seeded_once() {
        let dir = tempfile::tempdir().unwrap();
        let conn = initialize_database(&dir.path().join("init.db")).await.unwrap();
        let admin = AdminConfig::default();

        ensure_admin_user(&conn, &admin).await.unwrap();
        ensure_admin_user(&conn, &admin).await.unwrap();

        assert_eq!(repository::count_users(&conn).await.unwrap(), 1);
        assert!(repository::get_by_email(&conn, "admin1@beauty.com")
            .await
            .unwrap()
            .is_some());
    }
}
