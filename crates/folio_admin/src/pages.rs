// File: crates/folio_admin/src/pages.rs
//
// The admin HTML shell. Rendering lives in the frontend; these pages only
// give the Session Guard something to protect and a place to sign in.

use axum::{response::Html, Extension};
use folio_auth::Claims;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Sign in</title></head>
<body>
<h1>Sign in</h1>
<p>Sign in with your identity provider to manage bookings.</p>
<script>
async function signIn(idToken) {
  const res = await fetch('/api/auth/session', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify({idToken}),
  });
  if (res.ok) window.location.assign('/admin');
}
</script>
</body>
</html>
"#;

pub async fn login_page_handler() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub async fn dashboard_handler(Extension(claims): Extension<Claims>) -> Html<String> {
    let who = claims.email.as_deref().unwrap_or(&claims.sub);
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Folio admin</title></head>
<body>
<h1>Folio admin</h1>
<p>Signed in as {}</p>
<ul>
<li><a href="/api/admin/bookings">Bookings</a></li>
<li><a href="/api/admin/settings">Booking settings</a></li>
<li><a href="/api/admin/jobs">Job tracker</a></li>
</ul>
<form method="post" action="/api/auth/logout"><button>Sign out</button></form>
</body>
</html>
"#,
        escape(who)
    ))
}
