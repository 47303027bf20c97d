use super::{keys, Book, BookingError};
use crate::model::{ReservationStatus, Token};

/// ACTIVE → `to`, puis retire la réservation des deux index.
pub(super) fn transition(
    book: &mut Book,
    token: &Token,
    to: ReservationStatus,
) -> Result<(), BookingError> {
    let reservation = book
        .reservations
        .get_mut(token)
        .ok_or_else(|| BookingError::UnknownToken(token.clone()))?;

    let from = reservation.status;
    if !from.can_transition_to(to) {
        #[cfg(feature = "logging")]
        tracing::warn!(%token, %from, %to, "rejected transition");
        return Err(BookingError::InvalidTransition {
            token: token.clone(),
            from,
            to,
        });
    }

    reservation.status = to;
    let (student_key, slot) = keys::keys_of(reservation);
    book.unindex(&student_key, &slot, token);

    #[cfg(feature = "logging")]
    tracing::debug!(%token, %slot, %to, "reservation closed");
    Ok(())
}
