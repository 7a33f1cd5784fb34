//! End-to-end runs of the `knack` binary.

use std::fs;

use crate::common::{Sandbox, stdout};

#[test]
fn bytes_formats_with_default_and_custom_precision() {
    let sandbox = Sandbox::new();
    assert_eq!(stdout(&sandbox.knack(&["bytes", "0"])), "0 Bytes");
    assert_eq!(stdout(&sandbox.knack(&["bytes", "1024"])), "1 KB");
    assert_eq!(
        stdout(&sandbox.knack(&["bytes", "1536", "--decimals", "1"])),
        "1.5 KB"
    );
}

#[test]
fn text_helpers() {
    let sandbox = Sandbox::new();
    assert_eq!(stdout(&sandbox.knack(&["slug", "Hello, World!"])), "hello-world");
    assert_eq!(stdout(&sandbox.knack(&["truncate", "abcdef", "3"])), "abc...");
    assert_eq!(stdout(&sandbox.knack(&["initials", "John Doe"])), "JD");
    assert_eq!(stdout(&sandbox.knack(&["capitalize", "knack"])), "Knack");
    assert_eq!(
        stdout(&sandbox.knack(&["date", "2024-01-05"])),
        "January 5, 2024"
    );
}

#[test]
fn email_exit_code_reflects_validity() {
    let sandbox = Sandbox::new();

    let ok = sandbox.knack(&["email", "user@example.com"]);
    assert!(ok.status.success());
    assert_eq!(stdout(&ok), "valid");

    let bad = sandbox.knack(&["email", "user@localhost"]);
    assert!(!bad.status.success());
    assert_eq!(stdout(&bad), "invalid");
}

#[test]
fn random_accepts_negative_bounds() {
    let sandbox = Sandbox::new();
    let out = sandbox.knack(&["random", "-5", "-1"]);
    assert!(out.status.success());
    let n: i64 = stdout(&out).parse().expect("integer");
    assert!((-5..=-1).contains(&n));
}

#[test]
fn id_prints_requested_count() {
    let sandbox = Sandbox::new();
    let out = stdout(&sandbox.knack(&["id", "--count", "3"]));
    let ids: Vec<&str> = out.lines().collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| id.len() == 9));
}

#[test]
fn json_falls_back_on_garbage() {
    let sandbox = Sandbox::new();
    assert_eq!(
        stdout(&sandbox.knack(&["json", "not json", "--fallback", "\"fallback\""])),
        "fallback"
    );
    assert_eq!(stdout(&sandbox.knack(&["json", r#"{"a":1}"#])), r#"{"a":1}"#);
}

#[test]
fn store_round_trip_through_file_backend() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("file");
    let config = config.to_str().expect("utf-8 path");

    let set = sandbox.knack(&["--config", config, "store", "set", "prefs", r#"{"dark":true}"#]);
    assert!(set.status.success());
    assert!(sandbox.store_path().exists());

    let get = sandbox.knack(&["--config", config, "store", "get", "prefs"]);
    assert_eq!(stdout(&get), r#"{"dark":true}"#);

    let rm = sandbox.knack(&["--config", config, "store", "rm", "prefs"]);
    assert!(rm.status.success());

    let gone = sandbox.knack(&["--config", config, "store", "get", "prefs", "--fallback", "0"]);
    assert_eq!(stdout(&gone), "0");
}

#[test]
fn store_without_backend_uses_fallback_and_reports_dropped_write() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("none");
    let config = config.to_str().expect("utf-8 path");

    let set = sandbox.knack(&["--config", config, "store", "set", "k", "v"]);
    assert!(!set.status.success());

    let get = sandbox.knack(&["--config", config, "store", "get", "k", "--fallback", "\"dflt\""]);
    assert!(get.status.success());
    assert_eq!(stdout(&get), "dflt");
}

#[test]
fn copy_fails_when_clipboard_disabled() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("memory");
    let out = sandbox.knack(&["--config", config.to_str().expect("utf-8 path"), "copy", "x"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("clipboard"));
}

#[test]
fn broken_explicit_config_is_an_error() {
    let sandbox = Sandbox::new();
    let path = sandbox.path().join("bad.toml");
    fs::write(&path, "[storage\n").expect("write");

    let out = sandbox.knack(&["--config", path.to_str().expect("utf-8 path"), "slug", "x"]);
    assert!(!out.status.success());
}
