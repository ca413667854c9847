use axum::{
    http::{header, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::shared::config::get_static_dir;
use crate::shared::state::AppState;
use crate::system::auth::middleware::{require_admin, require_auth};
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    // ========================================
    // PUBLIC
    // ========================================
    let public = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/locations", get(handlers::locations::list))
        .route("/api/artists", get(handlers::a001_artist::list))
        .route("/api/artists/:id", get(handlers::a001_artist::get_by_id))
        .route("/api/spaces", get(handlers::a002_space::list))
        .route("/api/spaces/:id", get(handlers::a002_space::get_by_id))
        .route("/api/auth/sign-in", post(system::handlers::auth::sign_in))
        .route(
            "/api/auth/admin/sign-in",
            post(system::handlers::auth::admin_sign_in),
        )
        .route("/api/auth/register", post(system::handlers::auth::register))
        .route("/api/auth/refresh", post(system::handlers::auth::refresh))
        .route("/api/auth/sign-out", post(system::handlers::auth::sign_out));

    // ========================================
    // SIGNED IN
    // ========================================
    let authenticated = Router::new()
        .route("/api/auth/me", get(system::handlers::auth::me))
        .route(
            "/api/profile",
            get(handlers::a003_user_profile::get_own).put(handlers::a003_user_profile::update_own),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // ========================================
    // ADMIN (access gate)
    // ========================================
    let admin = Router::new()
        .route("/api/admin/artists", post(handlers::a001_artist::create))
        .route(
            "/api/admin/artists/:id",
            put(handlers::a001_artist::update).delete(handlers::a001_artist::delete),
        )
        .route("/api/admin/spaces", post(handlers::a002_space::create))
        .route(
            "/api/admin/spaces/:id",
            put(handlers::a002_space::update).delete(handlers::a002_space::delete),
        )
        .route("/api/admin/stats", get(handlers::dashboard::stats))
        .route("/api/admin/resync", post(handlers::dashboard::resync))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let static_dir = get_static_dir(&state.config);

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::state::test_state;
    use crate::system::users::service as user_service;
    use serde_json::{json, Value};

    async fn serve(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, configure_routes(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn send(request: reqwest::RequestBuilder) -> (u16, Value) {
        let response = request.send().await.unwrap();
        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn admin_routes_are_gated() {
        let (_dir, state) = test_state().await;
        user_service::ensure_user(&state.conn, "admin1@beauty.com", "Admin009")
            .await
            .unwrap();
        user_service::sign_up(&state.conn, "client@example.com", "secret1")
            .await
            .unwrap();
        let base = serve(state).await;
        let client = reqwest::Client::new();

        let artist = json!({
            "name": "سلمى",
            "specialty": "ميكب",
            "location": "نزوى",
            "price": "30",
            "services": ["ميكب"],
        });
        let artists_url = format!("{base}/api/admin/artists");

        let (status, body) = send(client.post(&artists_url).json(&artist)).await;
        assert_eq!(status, 401);
        assert_eq!(body["title"], "يلزم تسجيل الدخول");

        let (_, session) = send(
            client
                .post(format!("{base}/api/auth/sign-in"))
                .json(&json!({"email": "client@example.com", "password": "secret1"})),
        )
        .await;
        let client_token = session["access_token"].as_str().unwrap().to_string();
        let (status, body) = send(
            client
                .post(&artists_url)
                .bearer_auth(&client_token)
                .json(&artist),
        )
        .await;
        assert_eq!(status, 403);
        assert_eq!(body["title"], "غير مصرح");

        let (status, session) = send(
            client
                .post(format!("{base}/api/auth/admin/sign-in"))
                .json(&json!({"email": "admin1@beauty.com", "password": "Admin009"})),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(session["user"]["is_admin"], true);
        let admin_token = session["access_token"].as_str().unwrap().to_string();

        let (status, created) = send(
            client
                .post(&artists_url)
                .bearer_auth(&admin_token)
                .json(&artist),
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(created["item"]["name"], "سلمى");

        let (status, all) = send(client.get(format!("{base}/api/artists"))).await;
        assert_eq!(status, 200);
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn expired_token_is_reported() {
        let (_dir, state) = test_state().await;
        let base = serve(state).await;
        let (status, body) = send(
            reqwest::Client::new()
                .get(format!("{base}/api/auth/me"))
                .bearer_auth("broken"),
        )
        .await;
        assert_eq!(status, 401);
        assert_eq!(body["title"], "انتهت الجلسة");
    }
}
