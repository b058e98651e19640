//! Form handlers: login, register, logout, dashboard.

use axum::extract::{Form, State};
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, Html, IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::TypedHeader;
use axum_extra::headers::Cookie;
use tracing::{error, info, warn};
use validator::ValidateEmail;

use archive_core::error::{AppError, ErrorKind};
use archive_service::auth::{AuthService, RegisterRequest};

use super::pages;
use super::session::FormSession;
use crate::dto::request::{LoginForm, RegisterForm};
use crate::dto::response::MessageResponse;
use crate::state::AppState;

const LOGIN_PATH: &str = "/servlet/login";
const DASHBOARD_PATH: &str = "/servlet/dashboard";

type SessionCookie = Option<TypedHeader<Cookie>>;

fn session_id<'a>(state: &AppState, cookie: &'a SessionCookie) -> Option<&'a str> {
    cookie
        .as_ref()
        .and_then(|TypedHeader(c)| c.get(state.sessions.cookie_name()))
}

async fn current_session(state: &AppState, cookie: &SessionCookie) -> Option<FormSession> {
    match session_id(state, cookie) {
        Some(id) => state.sessions.get(id).await,
        None => None,
    }
}

/// GET /servlet/login
pub async fn login_form(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    if current_session(&state, &cookie).await.is_some() {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }
    Html(pages::login_page(None, None)).into_response()
}

/// POST /servlet/login
pub async fn login_submit(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Html(pages::login_page(Some("Email and password are required"), None))
            .into_response();
    }

    let user = match state.auth_service.authenticate(&form.email, &form.password).await {
        Ok(user) => user,
        Err(err) if err.kind == ErrorKind::Authentication => {
            return Html(pages::login_page(Some(&err.message), None)).into_response();
        }
        Err(err) => {
            error!(error = %err, "Form login failed");
            let message = format!("Login failed: {}", err.message);
            return Html(pages::login_page(Some(&message), None)).into_response();
        }
    };

    match state.sessions.create(&user).await {
        Ok(id) => (
            AppendHeaders([(SET_COOKIE, state.sessions.session_cookie(&id))]),
            Redirect::to(DASHBOARD_PATH),
        )
            .into_response(),
        Err(err) => {
            error!(error = %err, "Could not open form session");
            Html(pages::error_page(&err.message)).into_response()
        }
    }
}

/// GET /servlet/register
pub async fn register_form() -> Html<String> {
    Html(pages::register_page(None))
}

/// POST /servlet/register
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Html<String> {
    let min_length = state.config.auth.password_min_length;

    if let Some(problem) = check_registration(&form, min_length) {
        return Html(pages::register_page(Some(&problem)));
    }

    let request = RegisterRequest {
        name: form.name.trim().to_string(),
        email: AuthService::normalize_email(&form.email),
        password: form.password,
        role: form.role,
    };

    match state.auth_service.create_account(request).await {
        Ok(user) => {
            info!(user_id = ?user.id, "Form registration succeeded");
            Html(pages::login_page(
                None,
                Some("Registration successful! Please login with your credentials."),
            ))
        }
        Err(err) => Html(pages::register_page(Some(&registration_failure(&err)))),
    }
}

fn check_registration(form: &RegisterForm, min_length: usize) -> Option<String> {
    if form.name.trim().is_empty() {
        return Some("Name is required".to_string());
    }
    if !AuthService::normalize_email(&form.email).validate_email() {
        return Some("Valid email is required".to_string());
    }
    if form.password.chars().count() < min_length {
        return Some(format!("Password must be at least {min_length} characters"));
    }
    None
}

fn registration_failure(err: &AppError) -> String {
    match err.kind {
        ErrorKind::Conflict => "Email already registered".to_string(),
        ErrorKind::Validation => err.message.clone(),
        _ => {
            warn!(error = %err, "Form registration failed");
            format!("Registration failed: {}", err.message)
        }
    }
}

/// GET /servlet/logout
pub async fn logout_get(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let ended = match session_id(&state, &cookie) {
        Some(id) => state.sessions.invalidate(id).await,
        None => None,
    };
    let clear = AppendHeaders([(SET_COOKIE, state.sessions.expired_cookie())]);

    match ended {
        Some(session) => (clear, Html(pages::logout_page(&session.email))).into_response(),
        None => (clear, Redirect::to(LOGIN_PATH)).into_response(),
    }
}

/// POST /servlet/logout
pub async fn logout_post(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    if let Some(id) = session_id(&state, &cookie) {
        state.sessions.invalidate(id).await;
    }
    (
        AppendHeaders([(SET_COOKIE, state.sessions.expired_cookie())]),
        Json(MessageResponse::ok("Logged out successfully")),
    )
        .into_response()
}

/// GET|POST /servlet/dashboard
pub async fn dashboard(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let Some(session) = current_session(&state, &cookie).await else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match state.dashboard_service.stats_for(session.user_id).await {
        Ok(stats) => Html(pages::dashboard_page(&session, &stats)).into_response(),
        Err(err) => {
            error!(error = %err, "Dashboard statistics failed");
            Html(pages::error_page("Unable to load dashboard statistics")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, password: &str) -> RegisterForm {
        RegisterForm {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: None,
        }
    }

    #[test]
    fn test_registration_checks_in_order() {
        assert_eq!(
            check_registration(&form(" ", "bad", "1"), 6).as_deref(),
            Some("Name is required")
        );
        assert_eq!(
            check_registration(&form("Ada", "bad", "1"), 6).as_deref(),
            Some("Valid email is required")
        );
        assert_eq!(
            check_registration(&form("Ada", " ADA@example.com ", "12345"), 6).as_deref(),
            Some("Password must be at least 6 characters")
        );
        assert!(check_registration(&form("Ada", "ada@example.com", "123456"), 6).is_none());
    }

    #[test]
    fn test_registration_failure_messages() {
        assert_eq!(
            registration_failure(&AppError::conflict("Email already exists")),
            "Email already registered"
        );
        assert_eq!(
            registration_failure(&AppError::internal("disk full")),
            "Registration failed: disk full"
        );
    }
}
