//! Routing definitions.
//!
//! Mounts the todo and contact handlers under `/api`, answers unmatched
//! routes (unknown paths and unsupported methods on known paths) with a JSON
//! 404, and turns handler panics into a JSON 500.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

use super::contacts::{create_contact, delete_contact, get_contact, list_contacts, update_contact};
use super::dto::HealthResponse;
use super::error::ApiErrorResponse;
use super::state::AppState;
use super::todos::{create_todo, delete_todo, get_todo, list_todos, update_todo};

// =============================================================================
// Router Creation
// =============================================================================

/// Creates the API router with all routes and middleware.
///
/// # Examples
///
/// ```ignore
/// let router = create_router(AppState::in_memory());
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/test", get(health_check))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route(
            "/api/contacts/{id}",
            get(get_contact).patch(update_contact).delete(delete_contact),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
}

/// Liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "API is working!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn route_not_found() -> ApiErrorResponse {
    ApiErrorResponse::route_not_found()
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    tracing::error!(panic = detail, "Handler panicked");

    ApiErrorResponse::internal_error().into_response()
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use rstest::rstest;
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_health_check_reports_working() {
        let app = create_router(AppState::in_memory());

        let response = app
            .oneshot(Request::builder().uri("/api/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "API is working!");
    }

    #[rstest]
    #[case(Method::GET, "/api/unknown")]
    #[case(Method::GET, "/")]
    #[case(Method::GET, "/api/todos/1/extra")]
    #[case(Method::PUT, "/api/todos/0190b8a2-7b7e-7cc0-8d9a-1f2e3d4c5b6a")]
    #[case(Method::DELETE, "/api/todos")]
    #[case(Method::PATCH, "/api/test")]
    #[case(Method::POST, "/api/contacts/0190b8a2-7b7e-7cc0-8d9a-1f2e3d4c5b6a")]
    #[tokio::test]
    async fn test_unmatched_routes_return_json_404(#[case] method: Method, #[case] uri: &str) {
        let app = create_router(AppState::in_memory());

        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["code"], "ROUTE_NOT_FOUND");
        assert_eq!(body["message"], "Route not found");
    }

    #[rstest]
    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = create_router(AppState::in_memory());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/todos")
                    .header("origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    async fn explode() -> &'static str {
        panic!("boom")
    }

    #[rstest]
    #[tokio::test]
    async fn test_panics_become_json_500() {
        let app = Router::new()
            .route("/boom", get(explode))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Something went wrong!");
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }
}
