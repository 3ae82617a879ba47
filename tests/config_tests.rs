use logsift::config;
use std::env;
use std::path::PathBuf;

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(config::sanitize_base_url("http://logs.internal:8080/"), "http://logs.internal:8080");
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(config::sanitize_base_url("http://logs.internal///"), "http://logs.internal");
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(config::sanitize_base_url("  http://logs.internal/  "), "http://logs.internal");
}

#[test]
fn test_sanitize_base_url_empty_string() {
    assert_eq!(config::sanitize_base_url("   "), "http://127.0.0.1:8080");
}

// Environment variables are process-wide, so every env-dependent check
// lives in this one test to avoid racing with parallel tests.
#[test]
fn test_env_overrides() {
    env::set_var("SEARCH_API_URL", "http://search.internal:9000/");
    assert_eq!(config::get_search_api_url("0.0.0.0", 1), "http://search.internal:9000");
    env::remove_var("SEARCH_API_URL");
    assert_eq!(config::get_search_api_url("0.0.0.0", 8081), "http://127.0.0.1:8081");
    assert_eq!(config::get_search_api_url("10.0.0.5", 8081), "http://10.0.0.5:8081");

    env::set_var("LOGFILE", "/var/lib/logsift/journal");
    assert_eq!(config::get_logfile_path(), PathBuf::from("/var/lib/logsift/journal"));
    env::remove_var("LOGFILE");
    assert!(config::get_logfile_path().ends_with("logfile"));

    env::set_var("PUBLIC_BASE_URL", "/logs/");
    assert_eq!(config::get_public_base_url(), "/logs");
    env::remove_var("PUBLIC_BASE_URL");
    assert_eq!(config::get_public_base_url(), "");
}
