use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = ClientConfig::from_lookup(|_| None).unwrap();
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.timings.computer_move_delay, Duration::from_millis(500));
    assert_eq!(cfg.timings.toast_visible, Duration::from_millis(3500));
    assert_eq!(cfg.timings.toast_fade, Duration::from_millis(400));
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("CHESSMATE_BASE_URL", "https://chess.example.test/"),
        ("CHESSMATE_LOGIN_PATH", "/auth/login"),
        ("CHESSMATE_PREFS_PATH", "/tmp/prefs.json"),
        ("CHESSMATE_REQUEST_TIMEOUT_SECS", "5"),
        ("CHESSMATE_COMPUTER_MOVE_DELAY_MS", "20"),
        ("CHESSMATE_OVERLAY_FADE_MS", "1"),
    ]))
    .unwrap();

    assert_eq!(cfg.base_url, "https://chess.example.test");
    assert_eq!(cfg.login_path, "/auth/login");
    assert_eq!(cfg.prefs_path, PathBuf::from("/tmp/prefs.json"));
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 5, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS });
    assert_eq!(cfg.timings.computer_move_delay, Duration::from_millis(20));
    assert_eq!(cfg.timings.overlay_fade, Duration::from_millis(1));
    assert_eq!(cfg.timings.overlay_visible, Duration::from_millis(DEFAULT_OVERLAY_VISIBLE_MS));
}

#[test]
fn unparsable_numbers_fall_back_to_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("CHESSMATE_TOAST_VISIBLE_MS", "soon"),
        ("CHESSMATE_CONNECT_TIMEOUT_SECS", "-3"),
    ]))
    .unwrap();
    assert_eq!(cfg.timings.toast_visible, Duration::from_millis(DEFAULT_TOAST_VISIBLE_MS));
    assert_eq!(cfg.timeouts.connect_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
}

#[test]
fn non_http_base_url_errors() {
    let err = ClientConfig::from_lookup(lookup_from(&[("CHESSMATE_BASE_URL", "ftp://nope")])).unwrap_err();
    assert!(err.to_string().contains("invalid base URL"));
}

#[test]
fn with_base_url_trims_trailing_slash() {
    let cfg = ClientConfig::default().with_base_url("http://localhost:9000///").unwrap();
    assert_eq!(cfg.base_url, "http://localhost:9000");
    assert!(ClientConfig::default().with_base_url("localhost").is_err());
}
