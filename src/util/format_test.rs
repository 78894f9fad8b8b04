use super::*;

#[test]
fn created_date_takes_the_date_portion() {
    assert_eq!(created_date("2026-03-01T09:30:00+00:00"), "2026-03-01");
}

#[test]
fn created_date_passes_bare_dates_through() {
    assert_eq!(created_date("2026-03-01"), "2026-03-01");
}

#[test]
fn avatar_initial_uppercases_the_first_character() {
    assert_eq!(avatar_initial("alice@example.com"), "A");
}

#[test]
fn avatar_initial_handles_empty_input() {
    assert_eq!(avatar_initial(""), "?");
}
