use std::sync::Arc;

use contracts::domain::a001_artist::aggregate::Artist;
use contracts::domain::a002_space::aggregate::Space;
use contracts::system::access_gate::{AdminCapability, EmailAllowlist};
use sea_orm::DatabaseConnection;

use super::config::Config;
use super::repository::EntityRepository;
use crate::domain::a001_artist::repository::ArtistCollection;
use crate::domain::a002_space::repository::SpaceCollection;
use crate::system::auth::jwt::JwtKeys;
use crate::system::auth::throttle::LoginThrottle;

/// Shared handler state: connection, config, auth keys and the two entity caches
#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtKeys>,
    pub admin_policy: Arc<dyn AdminCapability + Send + Sync>,
    pub artists: Arc<EntityRepository<Artist>>,
    pub spaces: Arc<EntityRepository<Space>>,
    pub throttle: Arc<LoginThrottle>,
}

impl AppState {
    pub async fn new(conn: DatabaseConnection, config: Config) -> anyhow::Result<Self> {
        let jwt = JwtKeys::load_or_create(&conn, &config.auth).await?;
        let throttle = LoginThrottle::from_config(&config.auth);
        let admin_policy = EmailAllowlist::new(config.admin.email.clone());

        Ok(Self {
            artists: Arc::new(EntityRepository::new(Arc::new(ArtistCollection::new(
                conn.clone(),
            )))),
            spaces: Arc::new(EntityRepository::new(Arc::new(SpaceCollection::new(
                conn.clone(),
            )))),
            conn,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
            admin_policy: Arc::new(admin_policy),
            throttle: Arc::new(throttle),
        })
    }
}

/// Fresh database in a temp dir with the default config; keep the TempDir alive
#[cfg(test)]
pub async fn test_state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let conn = crate::shared::data::db::initialize_database(&dir.path().join("state.db"))
        .await
        .unwrap();
    let state = AppState::new(conn, Config::default()).await.unwrap();
    (dir, state)
}
