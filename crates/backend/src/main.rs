pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use shared::config;
use shared::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config().context("failed to load config.toml")?;

    let db_path = config::get_database_path(&config);
    let conn = shared::data::db::initialize_database(&db_path)
        .await
        .with_context(|| format!("db init failed: {}", db_path.display()))?;

    // Учётная запись администратора из [admin]
    system::initialization::ensure_admin_user(&conn, &config.admin).await?;

    let host = config.server.host.clone();
    let port = config.server.port;

    let state = AppState::new(conn, config).await?;
    let app = routes::configure_routes(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid server address {}:{}", host, port))?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
