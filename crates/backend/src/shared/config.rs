use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "data/boutique.db".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built client assets served for every non-API path
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            static_dir: "dist".into(),
        }
    }
}

/// The single back-office account. Its email is the admin allowlist.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin1@beauty.com".into(),
            password: "Admin009".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub access_token_hours: i64,
    pub refresh_token_days: i64,
    pub max_failed_attempts: usize,
    pub lockout_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_hours: 24,
            refresh_token_days: 90,
            max_failed_attempts: 5,
            lockout_minutes: 15,
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "data/boutique.db"

[server]
host = "127.0.0.1"
port = 3000
static_dir = "dist"

[admin]
email = "admin1@beauty.com"
password = "Admin009"

[auth]
access_token_hours = 24
refresh_token_days = 90
max_failed_attempts = 5
lockout_minutes = 15
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory (for `cargo run`)
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(PathBuf::from("config.toml"));

    for config_path in &candidates {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            return load_from_file(config_path);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse(DEFAULT_CONFIG)
}

pub fn load_from_file(path: &Path) -> anyhow::Result<Config> {
    use anyhow::Context;

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&contents).with_context(|| format!("Invalid config file {}", path.display()))
}

fn parse(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config.admin.check()?;
    Ok(config)
}

impl AdminConfig {
    /// Must equal the stored (trimmed, lowercased) form: the allowlist compares exactly
    fn check(&self) -> anyhow::Result<()> {
        let normalized = self.email.trim().to_lowercase();
        if self.email != normalized {
            anyhow::bail!(
                "[admin] email \"{}\" must be lowercase without surrounding spaces (use \"{}\")",
                self.email,
                normalized
            );
        }
        Ok(())
    }
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    resolve_relative(&config.database.path)
}

pub fn get_static_dir(config: &Config) -> PathBuf {
    resolve_relative(&config.server.static_dir)
}

fn resolve_relative(value: &str) -> PathBuf {
    let path = Path::new(value);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(path);
        }
    }

    // Fallback: use relative to current directory
    PathBuf::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "data/boutique.db");
        assert_eq!(config.admin.email, "admin1@beauty.com");
        assert_eq!(config.auth.max_failed_attempts, 5);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn mixed_case_admin_email_is_rejected() {
        let err = parse("[database]\npath = \"x.db\"\n[admin]\nemail = \"Admin1@Beauty.com\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("admin1@beauty.com"));

        assert!(parse("[database]\npath = \"x.db\"\n[admin]\nemail = \" admin1@beauty.com\"\n").is_err());
        assert!(parse("[database]\npath = \"x.db\"\n[admin]\nemail = \"admin1@beauty.com\"\n").is_ok());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = parse("[database]\npath = \"/tmp/x.db\"\n").unwrap();
        assert_eq!(config.auth.access_token_hours, 24);
        assert_eq!(config.auth.lockout_minutes, 15);
        assert_eq!(config.admin.password, "Admin009");
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[database]\npath = \"db.sqlite\"\n[admin]\nemail = \"owner@beauty.com\"\npassword = \"x\"\n",
        )
        .unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.admin.email, "owner@beauty.com");
        assert!(load_from_file(&dir.path().join("missing.toml")).is_err());
    }
}
