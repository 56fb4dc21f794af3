use sloview_testdata::core::{DependencyKind, RefreshPolicy, SloInterval, SloKind};
use sloview_testdata::fixtures::{LEGACY_DOCUMENT, SAMPLE_DOCUMENT};
use sloview_testdata::{parse_descriptor, DescriptorError};
use std::time::Duration;

fn with_dependency(dependency: &str) -> String {
    format!(
        r#"{{
            "version": "v1alpha1",
            "name": "registry",
            "endpoint": "https://registry.example.com/",
            "dependencies": [ {} ]
        }}"#,
        dependency
    )
}

fn assert_schema_error(doc: &str, expected_path: &str) -> String {
    match parse_descriptor(doc) {
        Err(DescriptorError::Schema { path, message }) => {
            assert_eq!(path.to_string(), expected_path);
            message
        }
        other => panic!("expected schema error at {}, got {:?}", expected_path, other),
    }
}

fn assert_syntax_error(doc: &str) {
    match parse_descriptor(doc) {
        Err(DescriptorError::Syntax { line, .. }) => assert!(line >= 1),
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_sample_document_model() {
    let descriptor = parse_descriptor(SAMPLE_DOCUMENT).unwrap();

    assert_eq!(descriptor.version, "v1alpha1");
    assert_eq!(descriptor.endpoint.as_str(), "https://nexus.example.com/");
    assert_eq!(
        descriptor.info_endpoint.as_ref().map(|u| u.as_str()),
        Some("https://cooldudes.example.com/serviceInfo/nexus")
    );

    let dns = &descriptor.dependencies[0];
    assert_eq!(dns.kind, DependencyKind::EventualMax);
    assert_eq!(dns.eventual_max, Some(300));
    assert_eq!(
        dns.refresh_policy(),
        RefreshPolicy::Within(Duration::from_secs(300))
    );
    let kinds: Vec<SloKind> = dns.slos.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SloKind::Availability, SloKind::Mttr, SloKind::Latency]);
    assert!(dns.slos.iter().all(|s| s.interval == SloInterval::Month));
    assert_eq!(dns.slos[0].target_value, 96.0);

    let mysql = &descriptor.dependencies[1];
    assert_eq!(mysql.kind, DependencyKind::Permanent);
    assert_eq!(mysql.endpoint.host_str(), Some("mysqldb.example.com"));
}

#[test]
fn test_round_trip_is_idempotent() {
    let documents = [
        SAMPLE_DOCUMENT.to_string(),
        r#"{
            "version": "v1alpha1",
            "name": "billing",
            "endpoint": "https://billing.example.com",
            "dependencies": [
                { "kind": "startup", "endpoint": "https://config.example.com/v1" },
                { "kind": "eventualStart", "endpoint": "https://cache.example.com/" },
                { "kind": "eventualMax", "eventualMax": 0, "endpoint": "https://ns.example.com/",
                  "slos": [ { "kind": "Latency", "interval": "week", "targetValue": 12.5 } ] }
            ],
            "consumers": [
                { "kind": "eventual", "endpoint": "https://ui.example.com/",
                  "infoEndpoint": "https://info.example.com/ui" }
            ]
        }"#
        .to_string(),
    ];

    for doc in documents {
        let first = parse_descriptor(&doc).unwrap();
        let serialized = serde_json::to_string(&first).unwrap();
        let second = parse_descriptor(&serialized).unwrap();
        assert_eq!(first, second);
        assert_eq!(serialized, serde_json::to_string(&second).unwrap());
    }
}

#[test]
fn test_optional_fields_are_omitted_on_output() {
    let doc = with_dependency(r#"{ "kind": "permanent", "endpoint": "https://db.example.com/" }"#);
    let descriptor = parse_descriptor(&doc).unwrap();
    let value = serde_json::to_value(&descriptor).unwrap();

    assert!(value.get("infoEndpoint").is_none());
    assert!(value["dependencies"][0].get("eventualMax").is_none());
    assert_eq!(value["consumers"], serde_json::json!([]));
    assert_eq!(value["dependencies"][0]["slos"], serde_json::json!([]));
}

#[test]
fn test_bogus_dependency_kind() {
    let doc = r#"{
        "version": "v1alpha1",
        "name": "registry",
        "endpoint": "https://registry.example.com/",
        "dependencies": [
            { "kind": "permanent", "endpoint": "https://db.example.com/" },
            { "kind": "bogus", "endpoint": "https://dns.example.com/" }
        ]
    }"#;
    let message = assert_schema_error(doc, "dependencies[1].kind");
    assert!(message.contains("bogus"));
    assert!(message.contains("eventualMax"));
}

#[test]
fn test_bogus_consumer_kind() {
    let doc = r#"{
        "version": "v1alpha1",
        "name": "registry",
        "endpoint": "https://registry.example.com/",
        "dependencies": [],
        "consumers": [ { "kind": "sometimes", "endpoint": "https://ui.example.com/" } ]
    }"#;
    assert_schema_error(doc, "consumers[0].kind");
}

#[test]
fn test_eventual_max_kind_requires_window() {
    let doc = with_dependency(r#"{ "kind": "eventualMax", "endpoint": "https://dns.example.com/" }"#);
    assert_schema_error(&doc, "dependencies[0].eventualMax");
}

#[test]
fn test_eventual_max_zero_behaves_like_permanent() {
    let zero = parse_descriptor(&with_dependency(
        r#"{ "kind": "eventualMax", "eventualMax": 0, "endpoint": "https://dns.example.com/" }"#,
    ))
    .unwrap();
    let permanent = parse_descriptor(&with_dependency(
        r#"{ "kind": "permanent", "endpoint": "https://dns.example.com/" }"#,
    ))
    .unwrap();

    assert_eq!(zero.dependencies[0].eventual_max, Some(0));
    assert_eq!(
        zero.dependencies[0].refresh_policy(),
        permanent.dependencies[0].refresh_policy()
    );
    assert_eq!(zero.dependencies[0].refresh_policy(), RefreshPolicy::Permanent);
}

#[test]
fn test_empty_dependencies() {
    let doc = r#"{
        "version": "v1alpha1",
        "name": "leaf",
        "endpoint": "https://leaf.example.com/",
        "dependencies": []
    }"#;
    let descriptor = parse_descriptor(doc).unwrap();
    assert!(descriptor.dependencies.is_empty());
    assert!(descriptor.consumers.is_empty());
}

#[test]
fn test_missing_dependencies() {
    let doc = r#"{ "version": "v1alpha1", "name": "leaf", "endpoint": "https://leaf.example.com/" }"#;
    assert_schema_error(doc, "dependencies");
}

#[test]
fn test_unknown_slo_kind_reports_full_path() {
    let doc = with_dependency(
        r#"{
            "kind": "permanent",
            "endpoint": "https://db.example.com/",
            "slos": [
                { "kind": "Availability", "interval": "month", "targetValue": 99.9 },
                { "kind": "MTTR", "interval": "month", "targetValue": 30 },
                { "kind": "Throughput", "interval": "month", "targetValue": 1000 }
            ]
        }"#,
    );
    assert_schema_error(&doc, "dependencies[0].slos[2].kind");
}

#[test]
fn test_relative_endpoint_is_rejected() {
    let doc = with_dependency(r#"{ "kind": "permanent", "endpoint": "/db" }"#);
    let message = assert_schema_error(&doc, "dependencies[0].endpoint");
    assert!(message.contains("/db"));
}

#[test]
fn test_malformed_top_level_endpoint() {
    let doc = r#"{
        "version": "v1alpha1",
        "name": "registry",
        "endpoint": "https://exa mple.com/",
        "dependencies": []
    }"#;
    assert_schema_error(doc, "endpoint");
}

#[test]
fn test_endpoint_must_be_string() {
    let doc = with_dependency(r#"{ "kind": "permanent", "endpoint": 8080 }"#);
    assert_schema_error(&doc, "dependencies[0].endpoint");
}

#[test]
fn test_unterminated_string() {
    assert_syntax_error(r#"{ "version": "v1alpha1, "name": "x" }"#);
    assert_syntax_error(r#"{ "version": "v1alpha1"#);
}

#[test]
fn test_unbalanced_braces() {
    assert_syntax_error(r#"{ "version": "v1alpha1", "dependencies": [ { } "#);
    assert_syntax_error(r#"{ "version": "v1alpha1" }}"#);
    assert_syntax_error("");
}

#[test]
fn test_comments_and_trailing_commas_rejected() {
    assert_syntax_error(
        r#"{
            "version": "v1alpha1", // inline
            "name": "x",
            "endpoint": "https://x.example.com/",
            "dependencies": []
        }"#,
    );
    assert_syntax_error(
        r#"{
            "version": "v1alpha1",
            "name": "x",
            "endpoint": "https://x.example.com/",
            "dependencies": [],
        }"#,
    );
}

#[test]
fn test_legacy_fixture_is_a_syntax_error() {
    match parse_descriptor(LEGACY_DOCUMENT) {
        Err(DescriptorError::Syntax { line, .. }) => {
            // The unescaped quote in "name" is the first fault, on the fourth line.
            assert_eq!(line, 4);
        }
        other => panic!("legacy fixture must not parse, got {:?}", other),
    }
}
