use super::*;

// =============================================================
// ProfileChanges serialization
// =============================================================

#[test]
fn rename_serializes_only_the_display_name() {
    let changes = ProfileChanges::rename("Alice");
    let json = serde_json::to_value(&changes).unwrap();

    assert_eq!(json, serde_json::json!({ "user_name": "Alice" }));
}

#[test]
fn unset_fields_are_omitted_from_the_body() {
    let changes = ProfileChanges {
        user_name: None,
        is_admin: Some(true),
    };
    let json = serde_json::to_value(&changes).unwrap();

    assert_eq!(json, serde_json::json!({ "is_admin": true }));
}

#[test]
fn changes_can_never_carry_an_email() {
    // Email immutability is structural: the payload type has no such
    // field, so a full update still omits it.
    let changes = ProfileChanges {
        user_name: Some("Alice".to_owned()),
        is_admin: Some(false),
    };
    let json = serde_json::to_value(&changes).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();

    assert_eq!(keys, vec!["is_admin", "user_name"]);
}

#[test]
fn apply_to_patches_only_set_fields() {
    let mut profile = Profile {
        id: uuid::Uuid::from_u128(1),
        email: "a@example.com".to_owned(),
        user_name: "Before".to_owned(),
        is_admin: false,
        created_at: "2026-01-01T00:00:00Z".to_owned(),
        updated_at: "2026-01-01T00:00:00Z".to_owned(),
    };

    ProfileChanges {
        user_name: None,
        is_admin: Some(true),
    }
    .apply_to(&mut profile);

    assert_eq!(profile.user_name, "Before");
    assert!(profile.is_admin);
}

#[test]
fn empty_changes_report_empty() {
    assert!(ProfileChanges::default().is_empty());
    assert!(!ProfileChanges::rename("x").is_empty());
}

// =============================================================
// Profile deserialization
// =============================================================

#[test]
fn profile_deserializes_a_service_row() {
    let row = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000001",
        "email": "a@example.com",
        "user_name": "Alice",
        "is_admin": true,
        "created_at": "2026-01-01T09:30:00+00:00",
        "updated_at": "2026-02-01T09:30:00+00:00"
    });

    let profile: Profile = serde_json::from_value(row).unwrap();
    assert_eq!(profile.user_name, "Alice");
    assert!(profile.is_admin);
}

#[test]
fn null_display_name_reads_as_empty() {
    let row = serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000001",
        "email": "a@example.com",
        "user_name": null,
        "is_admin": false,
        "created_at": "2026-01-01T09:30:00+00:00",
        "updated_at": "2026-01-01T09:30:00+00:00"
    });

    let profile: Profile = serde_json::from_value(row).unwrap();
    assert_eq!(profile.user_name, "");
}

// =============================================================
// Session expiry
// =============================================================

#[test]
fn session_expires_at_the_boundary_instant() {
    let session = Session {
        access_token: "token".to_owned(),
        user_id: uuid::Uuid::from_u128(1),
        email: "a@example.com".to_owned(),
        expires_at: 1_000,
    };

    assert!(!session.is_expired(999));
    assert!(session.is_expired(1_000));
    assert!(session.is_expired(1_001));
}
