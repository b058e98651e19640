//! HTML pages rendered by the form flow.

use archive_service::dashboard::DashboardStats;

use super::session::FormSession;

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 40px; } \
    .error { color: #b00020; } .success { color: #2e7d32; } \
    a { color: #007bff; text-decoration: none; } \
    table { border-collapse: collapse; } td { padding: 4px 12px; }";

/// Escape text for inclusion in HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title} - Paperless Archive</title>
    <style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

fn notice(class: &str, message: Option<&str>) -> String {
    message
        .map(|m| format!(r#"<p class="{class}">{}</p>"#, escape(m)))
        .unwrap_or_default()
}

/// Login form with an optional error or success notice.
pub fn login_page(error: Option<&str>, success: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Login</h1>
{error}{success}
<form method="post" action="/servlet/login">
    <p><label>Email <input type="email" name="email"></label></p>
    <p><label>Password <input type="password" name="password"></label></p>
    <p><button type="submit">Login</button></p>
</form>
<p><a href="/servlet/register">Create an account</a></p>"#,
        error = notice("error", error),
        success = notice("success", success),
    );
    layout("Login", &body)
}

/// Registration form with an optional error notice.
pub fn register_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Register</h1>
{error}
<form method="post" action="/servlet/register">
    <p><label>Name <input type="text" name="name"></label></p>
    <p><label>Email <input type="email" name="email"></label></p>
    <p><label>Password <input type="password" name="password"></label></p>
    <p><label>Role
        <select name="role">
            <option value="public">Public</option>
            <option value="researcher">Researcher</option>
            <option value="archivist">Archivist</option>
        </select>
    </label></p>
    <p><button type="submit">Register</button></p>
</form>
<p><a href="/servlet/login">Back to login</a></p>"#,
        error = notice("error", error),
    );
    layout("Register", &body)
}

/// Confirmation shown after a form logout.
pub fn logout_page(email: &str) -> String {
    let body = format!(
        r#"<h1>Logged Out Successfully</h1>
<p>You have been logged out from account: {}</p>
<p><a href="/servlet/login">Login again</a></p>"#,
        escape(email)
    );
    layout("Logged Out", &body)
}

/// Dashboard with archive-wide and personal figures.
pub fn dashboard_page(session: &FormSession, stats: &DashboardStats) -> String {
    let body = format!(
        r#"<h1>Dashboard</h1>
<p>Welcome, {name} ({role})</p>
<table>
    <tr><td>Total users</td><td>{total_users}</td></tr>
    <tr><td>Total documents</td><td>{total_documents}</td></tr>
    <tr><td>Total annotations</td><td>{total_annotations}</td></tr>
    <tr><td>Total feedback</td><td>{total_feedback}</td></tr>
    <tr><td>Your documents</td><td>{user_documents}</td></tr>
    <tr><td>Your annotations</td><td>{user_annotations}</td></tr>
</table>
<p><a href="/servlet/logout">Logout</a></p>"#,
        name = escape(&session.name),
        role = session.role,
        total_users = stats.total_users,
        total_documents = stats.total_documents,
        total_annotations = stats.total_annotations,
        total_feedback = stats.total_feedback,
        user_documents = stats.user_documents,
        user_annotations = stats.user_annotations,
    );
    layout("Dashboard", &body)
}

/// Generic error page.
pub fn error_page(message: &str) -> String {
    let body = format!(
        r#"<h1>Something went wrong</h1>
<p class="error">{}</p>
<p><a href="/servlet/dashboard">Back to dashboard</a></p>"#,
        escape(message)
    );
    layout("Error", &body)
}
