use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::shared::config::AuthConfig;

const JWT_SECRET_KEY: &str = "jwt_secret";

/// Signing secret plus token lifetimes
#[derive(Clone)]
pub struct JwtKeys {
    secret: String,
    access_token_hours: i64,
    refresh_token_days: i64,
}

impl JwtKeys {
    pub fn new(secret: impl Into<String>, auth: &AuthConfig) -> Self {
        Self {
            secret: secret.into(),
            access_token_hours: auth.access_token_hours,
            refresh_token_days: auth.refresh_token_days,
        }
    }

    /// Secret from sys_settings, generated and saved on first start
    pub async fn load_or_create(conn: &DatabaseConnection, auth: &AuthConfig) -> Result<Self> {
        let secret = match get_jwt_secret_from_db(conn).await? {
            Some(secret) => secret,
            None => {
                tracing::info!("No JWT secret stored yet, generating a new one");
                let secret = generate_jwt_secret();
                save_jwt_secret_to_db(conn, &secret).await?;
                secret
            }
        };
        Ok(Self::new(secret, auth))
    }

    pub fn generate_access_token(&self, user_id: &str, email: &str) -> Result<String> {
        let now = Utc::now();
        let exp = (now + chrono::Duration::hours(self.access_token_hours)).timestamp() as usize;
        let iat = now.timestamp() as usize;

        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp,
            iat,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to encode JWT token")
    }

    /// Validate JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims> {
        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Failed to decode JWT token")?;

        Ok(token_data.claims)
    }

    /// Calculate refresh token expiration timestamp
    pub fn refresh_token_expiration(&self) -> String {
        let exp = Utc::now() + chrono::Duration::days(self.refresh_token_days);
        exp.to_rfc3339()
    }
}

/// Generate refresh token (UUID-based)
pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Refresh tokens are stored only as SHA-256 hex digests
pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

async fn get_jwt_secret_from_db(conn: &DatabaseConnection) -> Result<Option<String>> {
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            [JWT_SECRET_KEY.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let secret: String = row.try_get("", "value")?;
            Ok(Some(secret))
        }
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db(conn: &DatabaseConnection, secret: &str) -> Result<()> {
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR REPLACE INTO sys_settings (key, value, description, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            JWT_SECRET_KEY.into(),
            secret.to_string().into(),
            "Auto-generated JWT secret for authentication".into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await
    .context("Failed to save JWT secret")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;

    #[test]
    fn token_round_trip() {
        let keys = JwtKeys::new("test-secret", &AuthConfig::default());
        let token = keys.generate_access_token("u1", "fatima@example.com").unwrap();
        let claims = keys.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.email, "fatima@example.com");
        assert!(claims.exp > claims.iat);

        let other = JwtKeys::new("other-secret", &AuthConfig::default());
        assert!(other.validate_token(&token).is_err());
        assert!(keys.validate_token("garbage").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = AuthConfig {
            access_token_hours: -1,
            ..AuthConfig::default()
        };
        let keys = JwtKeys::new("test-secret", &auth);
        let token = keys.generate_access_token("u1", "a@b.c").unwrap();
        assert!(keys.validate_token(&token).is_err());
    }

    #[test]
    fn token_hash_is_stable_hex() {
        let h = hash_token("abc");
        assert_eq!(h.len(), 64);
        assert_eq!(h, hash_token("abc"));
        assert_ne!(h, hash_token("abd"));
    }

    #[tokio::test]
    async fn secret_is_persisted_once() {
        let dir = tempfile::tempdir().unwrap();
        let conn = initialize_database(&dir.path().join("jwt.db")).await.unwrap();

        let first = JwtKeys::load_or_create(&conn, &AuthConfig::default()).await.unwrap();
        let second = JwtKeys::load_or_create(&conn, &AuthConfig::default()).await.unwrap();
        assert_eq!(first.secret, second.secret);

        let token = first.generate_access_token("u1", "a@b.c").unwrap();
        assert!(second.validate_token(&token).is_ok());
    }
}
