use crate::model::{MealShift, Reservation, SlotKey, StudentId};
use chrono::NaiveDate;

/// Clé (étudiant, date, service) de l'index des réservations actives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct StudentSlotKey {
    pub student: StudentId,
    pub slot: SlotKey,
}

pub(super) fn slot_key(date: NaiveDate, shift: MealShift) -> SlotKey {
    SlotKey::new(date, shift)
}

pub(super) fn student_key(student: &StudentId, date: NaiveDate, shift: MealShift) -> StudentSlotKey {
    StudentSlotKey {
        student: student.clone(),
        slot: slot_key(date, shift),
    }
}

pub(super) fn keys_of(r: &Reservation) -> (StudentSlotKey, SlotKey) {
    (student_key(&r.student, r.date, r.shift), r.slot())
}
