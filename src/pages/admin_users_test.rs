use uuid::Uuid;

use super::*;

// =============================================================
// Self-delete policy (screen-layer caller contract)
// =============================================================

#[test]
fn cannot_delete_your_own_row() {
    let id = Uuid::from_u128(1);
    assert!(!can_delete_profile(id, Some(id)));
}

#[test]
fn can_delete_other_rows() {
    assert!(can_delete_profile(
        Uuid::from_u128(1),
        Some(Uuid::from_u128(2))
    ));
}

#[test]
fn no_session_identity_matches_no_row() {
    assert!(can_delete_profile(Uuid::from_u128(1), None));
}

// =============================================================
// Draft → update payload
// =============================================================

#[test]
fn draft_changes_set_both_fields() {
    let draft = EditDraft {
        id: Uuid::from_u128(1),
        user_name: "Alice".to_owned(),
        is_admin: true,
    };
    let changes = draft_changes(&draft);

    assert_eq!(changes.user_name.as_deref(), Some("Alice"));
    assert_eq!(changes.is_admin, Some(true));
}

#[test]
fn draft_changes_trim_the_display_name() {
    let draft = EditDraft {
        id: Uuid::from_u128(1),
        user_name: "  Alice  ".to_owned(),
        is_admin: false,
    };

    assert_eq!(draft_changes(&draft).user_name.as_deref(), Some("Alice"));
}
