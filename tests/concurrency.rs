#![forbid(unsafe_code)]
use cantine::{BookingError, MealShift, Registry, RegistryConfig, StudentId};
use chrono::NaiveDate;
use std::sync::Arc;
use std::thread;

#[test]
fn concurrent_admissions_never_overshoot_capacity() {
    let registry = Arc::new(Registry::new(RegistryConfig::with_capacity(7)).unwrap());
    let day = NaiveDate::from_ymd_opt(2025, 9, 25).unwrap();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.admit(&StudentId::new(format!("s{i}")), day, MealShift::Lunch))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let admitted = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(admitted, 7);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, BookingError::CapacityExceeded { .. })));
    assert_eq!(registry.active_count(day, MealShift::Lunch), 7);
}

#[test]
fn concurrent_same_student_gets_one_booking() {
    let registry = Arc::new(Registry::new(RegistryConfig::with_capacity(100)).unwrap());
    let day = NaiveDate::from_ymd_opt(2025, 9, 25).unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.admit(&StudentId::new("s1"), day, MealShift::Dinner))
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|r| r.is_ok())
        .count();
    assert_eq!(admitted, 1);
    assert_eq!(registry.active_count(day, MealShift::Dinner), 1);
}
