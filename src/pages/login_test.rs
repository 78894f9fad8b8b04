use super::*;
use crate::net::backend::Backend;
use crate::net::fake;

#[test]
fn validate_credentials_trims_the_email() {
    assert_eq!(
        validate_credentials("  user@example.com  ", "secret-1"),
        Ok(("user@example.com".to_owned(), "secret-1".to_owned()))
    );
}

#[test]
fn validate_credentials_requires_an_email() {
    assert_eq!(
        validate_credentials("   ", "secret-1"),
        Err("Enter your email address.")
    );
}

#[test]
fn validate_credentials_enforces_minimum_password_length() {
    assert_eq!(
        validate_credentials("user@example.com", "short"),
        Err("Password must be at least 6 characters.")
    );
    // Exactly the minimum passes.
    assert!(validate_credentials("user@example.com", "sixsix").is_ok());
}

#[test]
fn validate_credentials_counts_characters_not_bytes() {
    assert!(validate_credentials("user@example.com", "señora").is_ok());
}

#[test]
fn validate_credentials_keeps_password_whitespace() {
    // Only the email is trimmed; passwords are taken verbatim.
    assert_eq!(
        validate_credentials("user@example.com", " p4ss "),
        Ok(("user@example.com".to_owned(), " p4ss ".to_owned()))
    );
}

#[test]
fn sign_up_without_a_session_takes_the_confirmation_path() {
    // The service held the session back pending email confirmation: show
    // the notice, do not navigate.
    let backend = fake::FakeBackend::new();
    let outcome =
        futures::executor::block_on(backend.sign_up("new@example.com", "secret-1")).unwrap();

    assert!(needs_confirmation(&outcome));
    assert!(CONFIRMATION_NOTICE.contains("confirm"));
}

#[test]
fn sign_up_with_an_immediate_session_signs_in() {
    let backend = fake::FakeBackend::new();
    *backend.session.borrow_mut() = Some(fake::session(1));
    let outcome =
        futures::executor::block_on(backend.sign_up("new@example.com", "secret-1")).unwrap();

    assert!(!needs_confirmation(&outcome));
    assert_eq!(outcome.session, Some(fake::session(1)));
}
