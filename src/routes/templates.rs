//! HTML pages
//!
//! All interpolated text goes through `html_escape`.

use html_escape::encode_text;

use crate::routes::outcome::{LOGIN_PATH, LOGOUT_PATH, Page};
use crate::session::Flash;

pub fn render_page(page: &Page, flashes: &[Flash]) -> String {
    match page {
        Page::Login => render_login(flashes),
        Page::Dashboard { user } => render_dashboard(user, flashes),
    }
}

pub fn render_login(flashes: &[Flash]) -> String {
    let body = format!(
        r#"<main class="card">
  <h1>Sign in</h1>
{flashes}  <form method="post" action="{LOGIN_PATH}">
    <label for="username">Username</label>
    <input id="username" name="username" type="text" autocomplete="username" required autofocus>
    <label for="password">Password</label>
    <input id="password" name="password" type="password" autocomplete="current-password" required>
    <button type="submit">Log in</button>
  </form>
</main>"#,
        flashes = render_flashes(flashes),
    );
    layout("Login", &body)
}

pub fn render_dashboard(user: &str, flashes: &[Flash]) -> String {
    let body = format!(
        r#"<main class="card">
{flashes}  <h1>Welcome, {user}!</h1>
  <p>You are signed in.</p>
  <a class="button" href="{LOGOUT_PATH}">Log out</a>
</main>"#,
        flashes = render_flashes(flashes),
        user = encode_text(user),
    );
    layout("Dashboard", &body)
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|flash| {
            format!(
                "  <div class=\"alert alert-{}\" role=\"alert\">{}</div>\n",
                flash.level.as_str(),
                encode_text(&flash.message)
            )
        })
        .collect()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>
    body {{ font-family: system-ui, sans-serif; background: #f4f5f7; display: flex; justify-content: center; padding-top: 10vh; }}
    .card {{ background: #fff; padding: 2rem; border-radius: 8px; min-width: 320px; box-shadow: 0 2px 8px rgba(0,0,0,.1); }}
    form {{ display: flex; flex-direction: column; gap: .5rem; }}
    .alert {{ padding: .75rem; border-radius: 4px; margin-bottom: 1rem; }}
    .alert-danger {{ background: #f8d7da; color: #842029; }}
    .alert-warning {{ background: #fff3cd; color: #664d03; }}
    .alert-info {{ background: #cff4fc; color: #055160; }}
    .alert-success {{ background: #d1e7dd; color: #0f5132; }}
  </style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = encode_text(title),
    )
}
