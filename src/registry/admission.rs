use super::{keys, Book, BookingError};
use crate::model::{MealShift, Reservation, StudentId, Token};
use chrono::NaiveDate;

pub(super) fn admit(
    book: &mut Book,
    capacity: u32,
    student: &StudentId,
    date: NaiveDate,
    shift: MealShift,
) -> Result<Token, BookingError> {
    if student.is_blank() {
        return Err(BookingError::EmptyIdentity);
    }

    let student_key = keys::student_key(student, date, shift);
    let slot = student_key.slot;
    if book.active_by_student.contains_key(&student_key) {
        #[cfg(feature = "logging")]
        tracing::warn!(%student, %slot, "duplicate active reservation");
        return Err(BookingError::DuplicateActiveReservation {
            student: student.clone(),
            slot,
        });
    }

    if book.active_in(&slot) >= capacity as usize {
        #[cfg(feature = "logging")]
        tracing::warn!(%student, %slot, capacity, "slot full");
        return Err(BookingError::CapacityExceeded { slot, capacity });
    }

    let token = Token::random();
    let reservation = Reservation::new(token.clone(), student.clone(), date, shift);
    book.reservations.insert(token.clone(), reservation);
    book.index(student_key, slot, token.clone());

    #[cfg(feature = "logging")]
    tracing::debug!(%token, %student, %slot, "reservation admitted");
    Ok(token)
}

/// Réinsère une réservation sauvegardée en revérifiant les invariants.
pub(super) fn reload(
    book: &mut Book,
    capacity: u32,
    reservation: Reservation,
) -> Result<(), BookingError> {
    if book.reservations.contains_key(&reservation.token) {
        return Err(BookingError::DuplicateToken(reservation.token));
    }

    if reservation.is_active() {
        let (student_key, slot) = keys::keys_of(&reservation);
        if book.active_by_student.contains_key(&student_key) {
            return Err(BookingError::DuplicateActiveReservation {
                student: reservation.student,
                slot,
            });
        }
        if book.active_in(&slot) >= capacity as usize {
            return Err(BookingError::CapacityExceeded { slot, capacity });
        }
        book.index(student_key, slot, reservation.token.clone());
    }

    book.reservations.insert(reservation.token.clone(), reservation);
    Ok(())
}
