#![forbid(unsafe_code)]
use cantine::{
    BookingError, MealShift, Registry, RegistryConfig, ReservationStatus, StudentId, Token,
};
use chrono::NaiveDate;
use std::collections::HashSet;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 25).unwrap()
}

fn registry(capacity: u32) -> Registry {
    Registry::new(RegistryConfig::with_capacity(capacity)).unwrap()
}

fn sid(s: &str) -> StudentId {
    StudentId::new(s)
}

#[test]
fn zero_capacity_is_rejected() {
    let err = Registry::new(RegistryConfig::with_capacity(0)).unwrap_err();
    assert!(matches!(err, BookingError::Configuration(_)));
    insta::assert_snapshot!(err.to_string(), @"invalid configuration: capacity_per_shift must be > 0");
}

#[test]
fn admit_then_lookup_is_active() {
    let r = registry(10);
    let token = r.admit(&sid("s123"), day(), MealShift::Lunch).unwrap();
    let b = r.lookup(&token).unwrap();
    assert_eq!(b.token, token);
    assert_eq!(b.student, sid("s123"));
    assert_eq!(b.date, day());
    assert_eq!(b.shift, MealShift::Lunch);
    assert_eq!(b.status, ReservationStatus::Active);
}

#[test]
fn no_double_booking_same_shift() {
    let r = registry(5);
    r.admit(&sid("s1"), day(), MealShift::Lunch).unwrap();
    let err = r.admit(&sid("s1"), day(), MealShift::Lunch).unwrap_err();
    assert!(matches!(err, BookingError::DuplicateActiveReservation { .. }));
    assert!(err.is_rejection());
    insta::assert_snapshot!(err.to_string(), @"student s1 already has an active booking for slot 2025-09-25|LUNCH");

    // même jour, autre service : autorisé
    r.admit(&sid("s1"), day(), MealShift::Dinner).unwrap();
}

#[test]
fn capacity_per_slot_is_enforced() {
    let r = registry(2);
    r.admit(&sid("a"), day(), MealShift::Lunch).unwrap();
    r.admit(&sid("b"), day(), MealShift::Lunch).unwrap();
    let err = r.admit(&sid("c"), day(), MealShift::Lunch).unwrap_err();
    assert!(matches!(err, BookingError::CapacityExceeded { capacity: 2, .. }));
    insta::assert_snapshot!(err.to_string(), @"capacity reached for slot 2025-09-25|LUNCH (2 per shift)");

    r.admit(&sid("c"), day(), MealShift::Dinner).unwrap();
    let next_day = day().succ_opt().unwrap();
    r.admit(&sid("c"), next_day, MealShift::Lunch).unwrap();
    assert_eq!(r.active_count(day(), MealShift::Lunch), 2);
    assert_eq!(r.remaining(day(), MealShift::Lunch), 0);
    assert_eq!(r.remaining(day(), MealShift::Dinner), 1);
}

#[test]
fn check_in_is_exactly_once() {
    let r = registry(5);
    let token = r.admit(&sid("s1"), day(), MealShift::Lunch).unwrap();
    r.check_in(&token).unwrap();
    assert_eq!(r.lookup(&token).unwrap().status, ReservationStatus::Used);

    let err = r.check_in(&token).unwrap_err();
    assert_eq!(
        err,
        BookingError::InvalidTransition {
            token: token.clone(),
            from: ReservationStatus::Used,
            to: ReservationStatus::Used,
        }
    );
    assert!(!err.is_rejection());
    assert!(matches!(r.cancel(&token), Err(BookingError::InvalidTransition { .. })));
}

#[test]
fn canceled_cannot_be_used_or_canceled_again() {
    let r = registry(5);
    let token = r.admit(&sid("s1"), day(), MealShift::Lunch).unwrap();
    r.cancel(&token).unwrap();
    assert_eq!(r.lookup(&token).unwrap().status, ReservationStatus::Canceled);
    assert!(matches!(r.check_in(&token), Err(BookingError::InvalidTransition { .. })));
    assert!(matches!(r.cancel(&token), Err(BookingError::InvalidTransition { .. })));
    // toujours consultable
    assert_eq!(r.lookup(&token).unwrap().status, ReservationStatus::Canceled);
}

#[test]
fn cancel_frees_the_slot_for_the_same_student() {
    let r = registry(1);
    let t1 = r.admit(&sid("s1"), day(), MealShift::Lunch).unwrap();
    assert_eq!(r.active_count(day(), MealShift::Lunch), 1);
    r.cancel(&t1).unwrap();
    assert_eq!(r.active_count(day(), MealShift::Lunch), 0);

    let t2 = r.admit(&sid("s1"), day(), MealShift::Lunch).unwrap();
    assert_ne!(t1, t2);
    assert_eq!(r.lookup(&t1).unwrap().status, ReservationStatus::Canceled);
    assert_eq!(r.lookup(&t2).unwrap().status, ReservationStatus::Active);
}

#[test]
fn used_reservation_releases_capacity() {
    let r = registry(1);
    let t1 = r.admit(&sid("a"), day(), MealShift::Dinner).unwrap();
    assert!(r.admit(&sid("b"), day(), MealShift::Dinner).is_err());
    r.check_in(&t1).unwrap();
    r.admit(&sid("b"), day(), MealShift::Dinner).unwrap();
    r.admit(&sid("a"), day(), MealShift::Dinner).unwrap_err();
}

#[test]
fn unknown_token_everywhere() {
    let r = registry(5);
    let nope = Token::new("nope");
    for err in [
        r.lookup(&nope).unwrap_err(),
        r.cancel(&nope).unwrap_err(),
        r.check_in(&nope).unwrap_err(),
    ] {
        assert_eq!(err, BookingError::UnknownToken(nope.clone()));
    }
}

#[test]
fn blank_identity_is_refused() {
    let r = registry(5);
    assert_eq!(
        r.admit(&sid("  "), day(), MealShift::Lunch).unwrap_err(),
        BookingError::EmptyIdentity
    );
    assert!(r.reservations().is_empty());
}

#[test]
fn tokens_are_unique() {
    let r = registry(500);
    let tokens: HashSet<Token> = (0..200)
        .map(|i| r.admit(&sid(&format!("s{i}")), day(), MealShift::Lunch).unwrap())
        .collect();
    assert_eq!(tokens.len(), 200);
}

#[test]
fn reservations_are_listed_in_slot_order() {
    let r = registry(5);
    let later = day().succ_opt().unwrap();
    r.admit(&sid("z"), later, MealShift::Lunch).unwrap();
    r.admit(&sid("b"), day(), MealShift::Dinner).unwrap();
    r.admit(&sid("a"), day(), MealShift::Dinner).unwrap();
    r.admit(&sid("y"), day(), MealShift::Lunch).unwrap();

    let order: Vec<(String, MealShift)> = r
        .reservations()
        .into_iter()
        .map(|b| (b.student.as_str().to_string(), b.shift))
        .collect();
    assert_eq!(
        order,
        vec![
            ("y".to_string(), MealShift::Lunch),
            ("a".to_string(), MealShift::Dinner),
            ("b".to_string(), MealShift::Dinner),
            ("z".to_string(), MealShift::Lunch),
        ]
    );
}
