use std::time::Duration;

use axum::{Router, http::StatusCode, routing::get};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::health;
use super::state::AppState;
use super::users;

/// Routes under /api/v1
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

/// Create the full router with application state
///
/// Each request runs under `request_timeout`; when it elapses the handler
/// future is dropped and the client gets a 408.
pub fn create_router_with_state(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", create_v1_router())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::api::types::{ListUsersResponse, UserResponse};
    use crate::infrastructure::user::InMemoryUserRepository;

    fn test_router() -> Router {
        let state = AppState::with_repository(Arc::new(InMemoryUserRepository::new()));
        create_router_with_state(state, Duration::from_secs(5))
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_alice(app: &Router) -> UserResponse {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                json!({"name": "Alice", "email": "Alice@Example.com", "username": "Alice"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(empty_request(Method::GET, "/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let app = test_router();
        let created = create_alice(&app).await;

        assert_eq!(created.email, "alice@example.com");
        assert_eq!(created.username, "alice");

        let response = app
            .oneshot(empty_request(
                Method::GET,
                &format!("/api/v1/users/{}", created.id),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let fetched: UserResponse = body_json(response).await;
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let app = test_router();
        create_alice(&app).await;

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                json!({"name": "Other", "email": "alice@example.com", "username": "other"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body: Value = body_json(response).await;
        assert_eq!(body["error"]["code"], "email_exists");
    }

    #[tokio::test]
    async fn test_invalid_email_is_bad_request() {
        let response = test_router()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                json!({"name": "Alice", "email": "not-an-email", "username": "alice"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = body_json(response).await;
        assert_eq!(body["error"]["param"], "email");
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request() {
        let response = test_router()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                json!({"name": "Alice"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_users() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(empty_request(Method::GET, "/api/v1/users"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: ListUsersResponse = body_json(response).await;
        assert!(body.users.is_empty());

        create_alice(&app).await;

        let response = app
            .oneshot(empty_request(Method::GET, "/api/v1/users"))
            .await
            .unwrap();
        let body: ListUsersResponse = body_json(response).await;
        assert_eq!(body.users.len(), 1);
    }

    #[tokio::test]
    async fn test_update_user() {
        let app = test_router();
        let created = create_alice(&app).await;

        let response = app
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/v1/users/{}", created.id),
                json!({"name": "Alicia", "email": "alice@example.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let updated: UserResponse = body_json(response).await;
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.username, "alice");
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let response = test_router()
            .oneshot(json_request(
                Method::PUT,
                "/api/v1/users/missing",
                json!({"name": "Nobody"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_user_twice() {
        let app = test_router();
        let created = create_alice(&app).await;
        let uri = format!("/api/v1/users/{}", created.id);

        let response = app
            .clone()
            .oneshot(empty_request(Method::DELETE, &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(empty_request(Method::DELETE, &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(empty_request(Method::GET, &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
