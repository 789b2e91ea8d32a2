//! Defines routes for users, pins, and comments.
//!
//! ## Structure
//! - **Users**
//!   - `POST   /users/register`, `POST /users/login`
//!   - `GET    /users`, `GET|PUT|DELETE /users/{id}`
//! - **Pins**
//!   - `POST   /pins/create`
//!   - `GET    /pins`, `GET|PUT|DELETE /pins/{id}`, `GET /pins/user/{user_id}`
//! - **Comments**
//!   - `POST   /comments/add`
//!   - `GET    /comments/pins/{pin_id}`, `DELETE /comments/{comment_id}`
//! - **Health**: `GET /healthz`, `GET /readyz`

use crate::{
    handlers::{
        comment_handlers::{add_comment, delete_comment, list_pin_comments},
        health_handlers::{healthz, readyz},
        pin_handlers::{create_pin, delete_pin, get_pin, list_pins, list_user_pins, update_pin},
        user_handlers::{delete_user, get_user, list_users, login, register, update_user},
    },
    state::AppState,
};
use anyhow::{Context, Result};
use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Build and return the router for all API routes.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", get(list_users))
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        // Pins
        .route("/pins", get(list_pins))
        .route("/pins/create", post(create_pin))
        .route("/pins/user/{user_id}", get(list_user_pins))
        .route("/pins/{id}", get(get_pin).put(update_pin).delete(delete_pin))
        // Comments
        .route("/comments/add", post(add_comment))
        .route("/comments/pins/{pin_id}", get(list_pin_comments))
        .route("/comments/{comment_id}", delete(delete_comment))
}

/// The full application: routes, state, request tracing, and CORS.
pub fn app(state: AppState, cors_origins: &[String]) -> Result<Router> {
    Ok(routes()
        .with_state(state)
        .layer(cors_layer(cors_origins)?)
        .layer(TraceLayer::new_for_http()))
}

/// CORS for the browser front-end. `*` allows any origin.
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin `{}`", o))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, unmigrated_test_pool};
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        app(AppState::new(test_pool().await), &["http://localhost:5173".to_string()]).unwrap()
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        // Extractor rejections answer in plain text.
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn register(app: &Router, username: &str) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/users/register",
            Some(json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "pw"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn health_endpoints() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&app, Method::GET, "/readyz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["schema"]["ok"], true);
    }

    #[tokio::test]
    async fn readyz_reports_unmigrated_schema() {
        let app = app(
            AppState::new(unmigrated_test_pool().await),
            &["http://localhost:5173".to_string()],
        )
        .unwrap();

        let (status, body) = send(&app, Method::GET, "/readyz", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "error");
        assert_eq!(body["checks"]["sqlite"]["ok"], true);
        assert_eq!(body["checks"]["schema"]["ok"], false);
        assert_eq!(
            body["checks"]["schema"]["error"],
            "schema not migrated; run with --migrate"
        );

        let (status, _) = send(&app, Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn register_and_login_flow() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/users/register",
            Some(json!({"username": "alice", "email": "alice@example.com", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice");
        assert_eq!(body["pins"], json!([]));
        assert!(body.get("password").is_none());

        let (status, _) = send(
            &app,
            Method::POST,
            "/users/register",
            Some(json!({"username": "alice", "email": "x@example.com", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, by_email) = send(
            &app,
            Method::POST,
            "/users/login",
            Some(json!({"usernameOrEmail": "alice@example.com", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_email["id"], body["id"]);

        let (wrong_status, wrong_body) = send(
            &app,
            Method::POST,
            "/users/login",
            Some(json!({"usernameOrEmail": "alice", "password": "nope"})),
        )
        .await;
        let (unknown_status, unknown_body) = send(
            &app,
            Method::POST,
            "/users/login",
            Some(json!({"usernameOrEmail": "mallory", "password": "nope"})),
        )
        .await;
        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body, unknown_body);
    }

    #[tokio::test]
    async fn user_crud() {
        let app = test_app().await;
        let alice = register(&app, "alice").await;
        register(&app, "bob").await;

        let (status, list) = send(&app, Method::GET, "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 2);

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/users/{alice}"),
            Some(json!({"username": "alicia", "email": "alicia@example.com", "password": "pw2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["username"], "alicia");
        assert!(updated["lastUpdatedAt"].is_string());

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/users/{alice}"),
            Some(json!({"username": "bob", "email": "alicia@example.com", "password": "pw2"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, Method::DELETE, &format!("/users/{alice}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, Method::GET, &format!("/users/{alice}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn pins_and_comments_flow() {
        let app = test_app().await;
        let alice = register(&app, "alice").await;

        let (status, pin) = send(
            &app,
            Method::POST,
            "/pins/create",
            Some(json!({
                "title": "Harbor",
                "description": "Boats",
                "latitude": 60.39,
                "longitude": 5.32,
                "imageUrl": "https://img.example.com/h.jpg",
                "userId": alice
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pin["username"], "alice");
        let pin_id = pin["id"].as_i64().unwrap();

        let (status, fetched) = send(&app, Method::GET, &format!("/pins/{pin_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, pin);

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/pins/{pin_id}"),
            Some(json!({"title": "Harbour", "description": "More boats"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "Harbour");
        assert_eq!(updated["imageUrl"], "https://img.example.com/h.jpg");

        let (status, owned) = send(&app, Method::GET, &format!("/pins/user/{alice}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(owned.as_array().unwrap().len(), 1);

        for text in ["one", "two"] {
            let (status, comment) = send(
                &app,
                Method::POST,
                "/comments/add",
                Some(json!({"text": text, "userId": alice, "pinId": pin_id})),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(comment["pinId"], pin_id);
            assert_eq!(comment["username"], "alice");
        }

        let (status, comments) =
            send(&app, Method::GET, &format!("/comments/pins/{pin_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(comments[0]["text"], "two");
        assert_eq!(comments[1]["text"], "one");

        let first = comments[1]["id"].as_i64().unwrap();
        let (status, _) = send(&app, Method::DELETE, &format!("/comments/{first}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &format!("/comments/{first}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, &format!("/pins/{pin_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) =
            send(&app, Method::GET, &format!("/comments/pins/{pin_id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_references_are_not_found() {
        let app = test_app().await;
        let alice = register(&app, "alice").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/pins/create",
            Some(json!({"title": "x", "description": "", "latitude": 0.0, "longitude": 0.0, "userId": alice + 10})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::POST,
            "/comments/add",
            Some(json!({"text": "hi", "userId": alice, "pinId": 99})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, pins) = send(&app, Method::GET, "/pins", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pins, json!([]));
    }

    #[tokio::test]
    async fn malformed_requests_are_rejected() {
        let app = test_app().await;
        let (status, _) = send(&app, Method::GET, "/users/not-a-number", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/users/register",
            Some(json!({"username": "alice"})),
        )
        .await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/pins")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
    }

    #[test]
    fn invalid_cors_origin_is_rejected() {
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    }
}
