#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rpcmetrics_collector::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
application: "order-service"
metrics:
  enabeld: true # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
application: "order-service"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.application, "order-service");
    assert!(cfg.metrics.enabled);
    assert!(!cfg.metrics.log_events);
    assert!(cfg.metrics.extra_tags.is_empty());
    assert_eq!(cfg.export.listen, "0.0.0.0:9464");
    assert_eq!(cfg.export.path, "/metrics");
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
application: "order-service"
metrics:
  enabled: false
  log_events: true
  extra_tags: { region: "eu-1", zone: "b" }
export:
  listen: "127.0.0.1:19464"
  path: "/prom"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert!(!cfg.metrics.enabled);
    assert!(cfg.metrics.log_events);
    assert_eq!(cfg.metrics.extra_tags["region"], "eu-1");
    assert_eq!(cfg.export.listen_addr().unwrap().port(), 19464);
    assert_eq!(cfg.export.path, "/prom");
}

#[test]
fn wrong_version_is_rejected() {
    let bad = r#"
version: 2
application: "order-service"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn empty_application_is_rejected() {
    let bad = r#"
version: 1
application: "  "
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}

#[test]
fn extra_tags_cannot_shadow_builtin_tags() {
    let bad = r#"
version: 1
application: "order-service"
metrics:
  extra_tags: { method: "x" }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("method"), "{err}");
}

#[test]
fn extra_tags_cannot_collide_with_exported_builtin_labels() {
    let bad = r#"
version: 1
application: "order-service"
metrics:
  extra_tags: { application_name: "x" }
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
    assert!(err.to_string().contains("application_name"), "{err}");
}

#[test]
fn extra_tag_keys_must_be_valid_label_names() {
    for key in ["a:b", "9zone", "zone-a", "__meta", "dc.name"] {
        let bad = format!(
            "version: 1\napplication: \"a\"\nmetrics:\n  extra_tags: {{ \"{key}\": \"y\" }}\n"
        );
        let err = config::load_from_str(&bad).expect_err("must fail");
        assert_eq!(err.kind().as_str(), "BAD_CONFIG", "key={key}");
    }
}

#[test]
fn export_section_is_validated() {
    for (listen, path) in [
        ("not-an-addr", "/metrics"),
        ("0.0.0.0:9464", "metrics"),
        ("0.0.0.0:9464", "/"),
        ("0.0.0.0:9464", "/healthz"),
    ] {
        let bad = format!(
            "version: 1\napplication: \"a\"\nexport:\n  listen: \"{listen}\"\n  path: \"{path}\"\n"
        );
        let err = config::load_from_str(&bad).expect_err("must fail");
        assert_eq!(err.kind().as_str(), "BAD_CONFIG", "listen={listen} path={path}");
    }
}

#[test]
fn missing_file_is_a_config_error() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "BAD_CONFIG");
}
