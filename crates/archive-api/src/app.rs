//! Application builder: wires repositories, services and pools into state,
//! and runs the server until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use archive_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator};
use archive_core::config::AppConfig;
use archive_core::error::AppError;
use archive_database::DatabasePool;
use archive_database::repositories::{
    AnnotationRepository, DocumentRepository, FeedbackRepository, UserRepository,
};
use archive_service::{
    AnnotationService, AuthService, DashboardService, DocumentAnalysisService, DocumentService,
    FeedbackService, UserService,
};
use archive_worker::AsyncTaskService;

use crate::handlers::legacy::session::SessionStore;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state for a connected, migrated database.
pub fn build_state(config: AppConfig, db: DatabasePool) -> AppState {
    // ── Repositories ─────────────────────────────────────────────
    let pool = db.pool().clone();
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let document_repo = Arc::new(DocumentRepository::new(pool.clone()));
    let annotation_repo = Arc::new(AnnotationRepository::new(pool.clone()));
    let feedback_repo = Arc::new(FeedbackRepository::new(pool));

    // ── Auth ─────────────────────────────────────────────────────
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let password_hasher = Arc::new(PasswordHasher::new());
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let sessions = Arc::new(SessionStore::new(&config.session));

    // ── Services ─────────────────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        password_hasher,
        password_validator,
        jwt_encoder,
    ));
    let user_service = Arc::new(UserService::new(Arc::clone(&user_repo)));
    let document_service = Arc::new(DocumentService::new(
        Arc::clone(&document_repo),
        Arc::clone(&user_repo),
        Arc::new(DocumentAnalysisService::new()),
        config.server.upload_path_prefix.clone(),
    ));
    let annotation_service = Arc::new(AnnotationService::new(
        Arc::clone(&annotation_repo),
        Arc::clone(&document_repo),
        Arc::clone(&user_repo),
    ));
    let feedback_service = Arc::new(FeedbackService::new(
        Arc::clone(&feedback_repo),
        Arc::clone(&document_repo),
    ));
    let dashboard_service = Arc::new(DashboardService::new(
        user_repo,
        document_repo,
        annotation_repo,
        feedback_repo,
    ));

    // ── Background pools ─────────────────────────────────────────
    let tasks = AsyncTaskService::from_config(config.worker.clone());

    AppState {
        config: Arc::new(config),
        db,
        jwt_decoder,
        sessions,
        auth_service,
        user_service,
        document_service,
        annotation_service,
        feedback_service,
        dashboard_service,
        tasks,
    }
}

/// Creates the configured initial administrator, if any.
pub async fn bootstrap(state: &AppState) -> Result<(), AppError> {
    if let Some(admin) = &state.config.auth.initial_admin {
        state.auth_service.ensure_initial_admin(admin).await?;
    }
    Ok(())
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the server until Ctrl-C or SIGTERM, then drains background pools.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting Paperless Archive server...");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = build_state(config, db.clone());
    bootstrap(&state).await?;
    let tasks = state.tasks.clone();
    let sessions = Arc::clone(&state.sessions);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let sweeper = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => break,
                _ = interval.tick() => {
                    let removed = sessions.purge_expired().await;
                    if removed > 0 {
                        tracing::debug!(removed, "Expired form sessions purged");
                    }
                }
            }
        }
    });

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Paperless Archive listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let served = server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")));

    let _ = sweeper.await;
    if !tokio::time::timeout(grace, tasks.shutdown())
        .await
        .unwrap_or(false)
    {
        tracing::warn!("Background tasks did not finish before shutdown");
    }
    db.close().await;
    tracing::info!("Server stopped");
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
