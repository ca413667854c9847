use anyhow::Context;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

/// Tables created on startup when missing. Lists are stored as JSON text.
const SCHEMA: &[(&str, &str)] = &[
    (
        "a001_artist",
        r#"
        CREATE TABLE IF NOT EXISTS a001_artist (
            id TEXT PRIMARY KEY NOT NULL,
            owner_user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            specialty TEXT NOT NULL,
            location TEXT NOT NULL,
            price REAL NOT NULL,
            image TEXT NOT NULL,
            bio TEXT,
            services TEXT NOT NULL DEFAULT '[]',
            rating REAL NOT NULL DEFAULT 5.0,
            reviews INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a002_space",
        r#"
        CREATE TABLE IF NOT EXISTS a002_space (
            id TEXT PRIMARY KEY NOT NULL,
            owner_user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            location TEXT NOT NULL,
            price REAL NOT NULL,
            description TEXT NOT NULL,
            amenities TEXT NOT NULL DEFAULT '[]',
            images TEXT NOT NULL DEFAULT '[]',
            status TEXT NOT NULL DEFAULT 'available',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a003_user_profile",
        r#"
        CREATE TABLE IF NOT EXISTS a003_user_profile (
            uid TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL,
            full_name TEXT NOT NULL,
            phone TEXT NOT NULL,
            location TEXT NOT NULL DEFAULT '',
            governorate TEXT NOT NULL DEFAULT '',
            account_type TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "sys_users",
        r#"
        CREATE TABLE IF NOT EXISTS sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT
        );
        "#,
    ),
    (
        "sys_refresh_tokens",
        r#"
        CREATE TABLE IF NOT EXISTS sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            token_hash TEXT NOT NULL UNIQUE,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
        "#,
    ),
    (
        "sys_settings",
        r#"
        CREATE TABLE IF NOT EXISTS sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ),
];

fn build_sqlite_url(path: &Path) -> String {
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Open (creating if needed) the sqlite file and bootstrap the schema
pub async fn initialize_database(db_path: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create database directory {}", parent.display()))?;
    }
    let absolute_path = if db_path.is_absolute() {
        db_path.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_path)
    };

    let db_url = build_sqlite_url(&absolute_path);
    tracing::info!("Opening database: {}", absolute_path.display());
    let conn = Database::connect(&db_url)
        .await
        .with_context(|| format!("Cannot open database {}", absolute_path.display()))?;

    bootstrap_schema(&conn).await?;
    Ok(conn)
}

pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, sql) in SCHEMA {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, sql.to_string()))
            .await
            .with_context(|| format!("Failed to create table {}", table))?;
        tracing::debug!("Table {} ready", table);
    }
    Ok(())
}
