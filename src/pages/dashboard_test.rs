use super::*;
use crate::net::fake;

#[test]
fn user_label_prefers_the_display_name() {
    let profile = fake::profile(1, false);
    assert_eq!(user_label(Some(&profile)), "User 1");
}

#[test]
fn user_label_falls_back_to_the_email() {
    let mut profile = fake::profile(1, false);
    profile.user_name.clear();
    assert_eq!(user_label(Some(&profile)), "user1@example.com");
}

#[test]
fn user_label_placeholder_without_a_profile() {
    assert_eq!(user_label(None), "—");
}
