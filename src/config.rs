use std::env;
use std::path::{Path, PathBuf};

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SEARCH_LIMIT: usize = 32;
pub const DEFAULT_LOGFILE_NAME: &str = "logfile";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "";
pub const FORM_SESSION_COOKIE: &str = "form_session";
/// Lifetime of the form cookie and of the server-side form behind it.
pub const FORM_SESSION_TTL_SECS: u64 = 12 * 60 * 60;

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Where the log journal lives: `LOGFILE` if set, otherwise `logfile`
/// next to the running executable.
pub fn get_logfile_path() -> PathBuf {
    if let Ok(raw) = env::var("LOGFILE") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_LOGFILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGFILE_NAME))
}

/// Base URL of the server answering `/api/search`. Falls back to the
/// server's own listen address.
pub fn get_search_api_url(host: &str, port: u16) -> String {
    match env::var("SEARCH_API_URL") {
        Ok(raw) if !raw.trim().is_empty() => sanitize_base_url(&raw),
        _ => {
            // A wildcard bind address is not something a client can dial
            let host = match host {
                "0.0.0.0" | "::" | "[::]" => DEFAULT_HOST,
                other => other,
            };
            sanitize_base_url(&format!("http://{}:{}", host, port))
        }
    }
}

/// Path prefix for links on rendered pages. Empty means site-relative.
pub fn get_public_base_url() -> String {
    env::var("PUBLIC_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string())
        .trim()
        .trim_end_matches('/')
        .to_string()
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        format!("http://{}:{}", DEFAULT_HOST, DEFAULT_PORT)
    } else {
        trimmed.to_string()
    }
}
