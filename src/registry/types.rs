use crate::model::{ReservationStatus, SlotKey, StudentId, Token};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options du registre
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegistryConfig {
    pub capacity_per_shift: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity_per_shift: 50,
        }
    }
}

impl RegistryConfig {
    pub fn with_capacity(capacity_per_shift: u32) -> Self {
        Self { capacity_per_shift }
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        if self.capacity_per_shift == 0 {
            return Err(BookingError::Configuration(
                "capacity_per_shift must be > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("invalid configuration: {0}")]
    Configuration(&'static str),
    #[error("student identity cannot be empty")]
    EmptyIdentity,
    #[error("student {student} already has an active booking for slot {slot}")]
    DuplicateActiveReservation { student: StudentId, slot: SlotKey },
    #[error("capacity reached for slot {slot} ({capacity} per shift)")]
    CapacityExceeded { slot: SlotKey, capacity: u32 },
    #[error("unknown token: {0}")]
    UnknownToken(Token),
    #[error("duplicate token: {0}")]
    DuplicateToken(Token),
    #[error("invalid transition for {token}: {from} -> {to}")]
    InvalidTransition {
        token: Token,
        from: ReservationStatus,
        to: ReservationStatus,
    },
}

impl BookingError {
    /// Refus ordinaire du contrôle d'admission (« réservation impossible »),
    /// par opposition à une erreur de l'appelant.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            BookingError::DuplicateActiveReservation { .. } | BookingError::CapacityExceeded { .. }
        )
    }
}
