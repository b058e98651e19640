//! Route definitions for the Paperless Archive HTTP surface.
//!
//! REST routes are organized by domain and mounted under `/api`; the
//! cookie-session form flow lives under `/servlet`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::error::attach_error_path;
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.server.max_upload_size_bytes as usize;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(document_routes())
        .merge(user_routes())
        .merge(annotation_routes())
        .merge(feedback_routes())
        .merge(async_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let timeout = middleware::timeout::build_timeout_layer(&state.config.server);

    Router::new()
        .nest("/api", api_routes)
        .nest("/servlet", legacy_routes())
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(timeout)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .layer(axum_middleware::from_fn(attach_error_path))
        .with_state(state)
}

/// Register, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Document listing, search, upload and metadata edits
fn document_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/documents",
            get(handlers::documents::list_documents).post(handlers::documents::upload_document),
        )
        .route("/documents/search", get(handlers::documents::search_documents))
        .route("/documents/stats/overview", get(handlers::documents::document_stats))
        .route(
            "/documents/{id}",
            get(handlers::documents::get_document)
                .put(handlers::documents::update_document)
                .delete(handlers::documents::delete_document),
        )
}

/// User administration
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::users::list_users))
        .route("/users/stats/overview", get(handlers::users::user_stats))
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route("/users/{id}/access", put(handlers::users::update_access))
        .route("/users/{id}/role", put(handlers::users::change_role))
}

/// Annotations on documents
fn annotation_routes() -> Router<AppState> {
    Router::new()
        .route("/annotations", post(handlers::annotations::create_annotation))
        .route("/annotations/mine", get(handlers::annotations::list_mine))
        .route(
            "/annotations/document/{document_id}",
            get(handlers::annotations::list_for_document),
        )
        .route(
            "/annotations/{id}",
            put(handlers::annotations::update_annotation)
                .delete(handlers::annotations::delete_annotation),
        )
}

/// Feedback submissions and triage
fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/feedback",
            get(handlers::feedback::list_feedback).post(handlers::feedback::create_feedback),
        )
        .route(
            "/feedback/document/{document_id}",
            get(handlers::feedback::list_for_document),
        )
        .route(
            "/feedback/{id}",
            get(handlers::feedback::get_feedback)
                .put(handlers::feedback::update_feedback)
                .delete(handlers::feedback::delete_feedback),
        )
}

/// Background task submission and inspection
fn async_routes() -> Router<AppState> {
    Router::new()
        .route("/async/send-email", get(handlers::async_tasks::send_email))
        .route("/async/process-document", post(handlers::async_tasks::process_document))
        .route("/async/batch-process", post(handlers::async_tasks::batch_process))
        .route("/async/notify", post(handlers::async_tasks::notify))
        .route("/async/stats", get(handlers::async_tasks::stats))
        .route("/async/executor-demo", get(handlers::async_tasks::executor_demo))
        .route("/async/clear-cache", post(handlers::async_tasks::clear_cache))
        .route(
            "/async/cache/{document_id}",
            get(handlers::async_tasks::cached_document),
        )
}

/// Health checks (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

/// Cookie-session HTML forms
fn legacy_routes() -> Router<AppState> {
    use handlers::legacy;

    Router::new()
        .route("/login", get(legacy::login_form).post(legacy::login_submit))
        .route("/register", get(legacy::register_form).post(legacy::register_submit))
        .route("/logout", get(legacy::logout_get).post(legacy::logout_post))
        .route("/dashboard", get(legacy::dashboard).post(legacy::dashboard))
}
