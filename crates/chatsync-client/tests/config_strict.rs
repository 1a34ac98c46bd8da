#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chatsync_client::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  base_url: "ws://localhost:8000/ws"
canvas:
  widht: 640 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.base_url, "ws://localhost:8000/ws");
    assert_eq!((cfg.canvas.width, cfg.canvas.height), (800, 500));
    assert_eq!(cfg.canvas.line_width, 2.0);
    assert_eq!(cfg.canvas.default_color, "#000000");
}

#[test]
fn full_config() {
    let ok = r##"
version: 1
server:
  base_url: "ws://chat.internal:9000/rooms/main"
canvas:
  width: 1024
  height: 768
  line_width: 3.5
  default_color: "#0af"
"##;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(
        cfg.server.parsed_base_url().unwrap().as_str(),
        "ws://chat.internal:9000/rooms/main"
    );
    assert_eq!(cfg.canvas.width, 1024);
    assert_eq!(cfg.canvas.line_width, 3.5);
}

#[test]
fn rejects_bad_base_url() {
    for url in ["not a url", "http://localhost:8000/ws", "wss://localhost/ws", "mailto:ops@example.com"] {
        let yaml = format!("version: 1\nserver:\n  base_url: \"{url}\"\n");
        let err = config::load_from_str(&yaml).expect_err(url);
        assert_eq!(err.code().as_str(), "BAD_CONFIG", "{url}");
    }
}

#[test]
fn rejects_out_of_range_canvas() {
    for canvas in [
        "width: 0",
        "height: 9000",
        "line_width: 0",
        "line_width: 100",
        "default_color: \"red\"",
    ] {
        let yaml = format!("version: 1\ncanvas:\n  {canvas}\n");
        let err = config::load_from_str(&yaml).expect_err(canvas);
        assert_eq!(err.code().as_str(), "BAD_CONFIG", "{canvas}");
    }
}

#[test]
fn rejects_unknown_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn missing_file_yields_defaults() {
    let cfg = config::load_or_default("/nonexistent/chatsync-test.yaml").unwrap();
    assert_eq!(cfg.version, 1);
}

#[test]
fn env_override_replaces_base_url_and_revalidates() {
    let mut cfg = config::load_from_str("version: 1\n").unwrap();
    config::apply_env_overrides(&mut cfg, |k| {
        (k == config::ENV_WS_URL).then(|| " ws://relay:7000/ws ".to_string())
    })
    .unwrap();
    assert_eq!(cfg.server.base_url, "ws://relay:7000/ws");

    config::apply_env_overrides(&mut cfg, |_| Some("   ".into())).unwrap();
    assert_eq!(cfg.server.base_url, "ws://relay:7000/ws");

    let err = config::apply_env_overrides(&mut cfg, |_| Some("ftp://x".into())).unwrap_err();
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}
