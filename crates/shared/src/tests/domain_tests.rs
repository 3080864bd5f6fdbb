use super::*;

#[test]
fn decodes_listing_row_and_keeps_unknown_fields() {
    let row: UserSummary = serde_json::from_value(serde_json::json!({
        "id": "a1b2",
        "username": "alice",
        "email": "alice@example.com",
        "create_date": 1_700_000_000_000_i64,
        "storage_current": 12
    }))
    .expect("decode");

    assert_eq!(row.username, "alice");
    assert_eq!(row.id, Some(UserId("a1b2".to_string())));
    assert_eq!(row.email.as_deref(), Some("alice@example.com"));
    assert_eq!(row.extra.get("storage_current"), Some(&Value::from(12)));
    assert_eq!(
        row.created_at().map(|ts| ts.timestamp()),
        Some(1_700_000_000)
    );
}

#[test]
fn username_is_the_only_required_field() {
    let row: UserSummary =
        serde_json::from_value(serde_json::json!({ "username": "bob" })).expect("decode");
    assert_eq!(row, UserSummary::new("bob"));

    let missing = serde_json::from_value::<UserSummary>(serde_json::json!({ "email": "x@y" }));
    assert!(missing.is_err());
}
