use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::config::{FORM_SESSION_COOKIE, FORM_SESSION_TTL_SECS};
use crate::models::AppState;

pub fn form_session_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(FORM_SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Resolve the caller's form session, minting a new cookie when needed.
pub fn ensure_form_session(state: &AppState, jar: CookieJar) -> (CookieJar, String) {
    let existing = form_session_from_jar(&jar);
    let (sid, created) = state.forms.ensure(existing.as_deref());
    if !created {
        return (jar, sid);
    }
    let mut cookie = Cookie::new(FORM_SESSION_COOKIE, sid.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_max_age(time::Duration::seconds(FORM_SESSION_TTL_SECS as i64));
    (jar.add(cookie), sid)
}

/// Plain-text response whose body starts with the status code, e.g.
/// `400: Couldn't parse JSON: ...`.
pub fn status_text(status: StatusCode, message: impl AsRef<str>) -> Response {
    (status, format!("{}: {}", status.as_u16(), message.as_ref())).into_response()
}

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
