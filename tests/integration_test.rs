//! End-to-end scenarios across sanitization, validation, and telemetry.

use std::sync::Arc;
use textguard::{
    sanitize, validate, AttackCategory, MemorySink, PasswordPolicy, SanitizePolicy, StatementKind,
    TextRule, ValidationError, ValidationPolicy, Validator,
};

#[test]
fn sanitize_strips_event_handler_but_keeps_element() {
    let clean = sanitize("<img src=x onerror=alert(1)//>", &SanitizePolicy::default());
    assert_eq!(clean, r#"<img src="x">"#);
}

#[test]
fn sanitize_removes_script_entirely() {
    let clean = sanitize("<script>alert(1)</script>", &SanitizePolicy::default());
    assert_eq!(clean, "");
}

#[test]
fn sanitize_default_policy_is_safe_for_common_payloads() {
    let payloads = [
        r#"<script src="https://evil.example/x.js"></script>"#,
        r#"<a href="javascript:alert(1)">x</a>"#,
        r#"<div onmouseover="alert(1)">x</div>"#,
        r#"<iframe src="https://evil.example"></iframe>"#,
        r#"<img src=x onerror=alert(1)>"#,
    ];
    for payload in payloads {
        let clean = sanitize(payload, &SanitizePolicy::default());
        assert!(!clean.contains("<script"), "script survived: {clean}");
        assert!(!clean.contains("onerror="), "handler survived: {clean}");
        assert!(!clean.contains("onmouseover="), "handler survived: {clean}");
        assert!(!clean.contains("javascript:"), "scheme survived: {clean}");
    }
}

#[test]
fn sanitize_is_idempotent() {
    let policy = SanitizePolicy::default();
    let inputs = [
        "<p>plain</p>",
        "<img src=x onerror=alert(1)//>",
        "<div><script>x()</script><b>bold</b></div>",
        "broken <markup",
    ];
    for input in inputs {
        let once = sanitize(input, &policy);
        assert_eq!(sanitize(&once, &policy), once);
    }
}

#[test]
fn sql_detection_reports_statement_type() {
    let policy = ValidationPolicy::new().with_sql(true);
    match validate("SELECT * FROM users;", &policy) {
        Err(ValidationError::Sql { kind, .. }) => assert_eq!(kind, StatementKind::Select),
        other => panic!("expected SQL detection, got {other:?}"),
    }
}

#[test]
fn sql_detection_passes_plain_prose() {
    let policy = ValidationPolicy::new().with_sql(true);
    assert!(validate("hello world", &policy).is_ok());
}

#[test]
fn sql_detection_ignores_unterminated_fragments() {
    let policy = ValidationPolicy::new().with_sql(true);
    assert!(validate("SELECT * FROM users", &policy).is_ok());
    assert!(validate("DROP TABLE users", &policy).is_ok());
}

#[test]
fn sql_detection_ignores_identifier_embedded_keywords() {
    let policy = ValidationPolicy::new().with_sql(true);
    assert!(validate("sort by UPDATED_AT descending;", &policy).is_ok());
    assert!(validate("the user_select_pref flag is set;", &policy).is_ok());
}

#[test]
fn password_default_policy_scenarios() {
    let policy = ValidationPolicy::new().with_password(PasswordPolicy::secure_default());
    assert!(validate("abcd1234", &policy).is_err());
    assert!(validate("Ab1!cdef", &policy).is_ok());
}

#[test]
fn password_length_violation_reported_first() {
    let policy = ValidationPolicy::new().with_password(PasswordPolicy::secure_default());
    match validate("ab", &policy) {
        Err(ValidationError::Password { rule, message }) => {
            assert_eq!(rule, "length");
            assert!(message.contains("at least 8"));
        }
        other => panic!("expected password violation, got {other:?}"),
    }
}

#[test]
fn text_rule_email_through_facade() {
    let policy = ValidationPolicy::new().with_text(TextRule::Email);
    assert!(validate("user@example.com", &policy).is_ok());
    assert!(validate("not-an-email", &policy).is_err());
}

#[test]
fn combined_policy_fails_on_first_category() {
    let policy = ValidationPolicy::new()
        .with_text(TextRule::Length {
            min: Some(1),
            max: Some(64),
        })
        .with_sql(true);

    // Passes the text rule, fails sql.
    match validate("see SELECT * FROM t;", &policy) {
        Err(ValidationError::Sql { .. }) => {}
        other => panic!("expected SQL detection, got {other:?}"),
    }

    // With a password policy attached, the password violation (no
    // digits) is reported before sql is ever consulted.
    let policy = policy.with_password(PasswordPolicy::secure_default());
    match validate("weak DROP TABLE t;", &policy) {
        Err(ValidationError::Password { .. }) => {}
        other => panic!("expected password violation, got {other:?}"),
    }
}

#[tokio::test]
async fn detections_reach_the_sink_without_masking_the_failure() {
    let sink = MemorySink::new();
    let validator = Validator::with_sink(Arc::new(sink.clone()));

    let policy = ValidationPolicy::new().with_sql(true);
    let result = validator.validate("TRUNCATE TABLE audit;", &policy);
    assert!(matches!(result, Err(ValidationError::Sql { .. })));

    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    let events = sink.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].category, AttackCategory::Sql);
    assert!(events[0].details.contains_key("message"));
}

#[tokio::test]
async fn sanitize_then_validate_pipeline() {
    let sink = MemorySink::new();
    let validator = Validator::with_sink(Arc::new(sink.clone()));

    // The UI runs sanitize unconditionally, then the policy checks.
    let raw = r#"<img src=x onerror=alert(1)>user@example.com"#;
    let clean = validator.sanitize(raw, &SanitizePolicy::default());
    assert!(!clean.contains("onerror"));

    let policy = ValidationPolicy::new().with_sql(true);
    assert!(validator.validate(&clean, &policy).is_ok());

    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    let events = sink.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].category, AttackCategory::Markup);
}
