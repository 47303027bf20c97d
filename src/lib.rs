#![forbid(unsafe_code)]
//! Cantine — registre de réservations de repas en mémoire.
//!
//! - Un créneau = (date, service) avec une capacité fixe.
//! - Au plus une réservation active par étudiant et par créneau.
//! - Cycle de vie ACTIVE → USED | CANCELED, jamais supprimé.
//! - Persistance JSON et export CSV côté appelant (feature `serde`).

pub mod model;
pub mod registry;

#[cfg(feature = "serde")]
pub mod io;
#[cfg(feature = "serde")]
pub mod storage;

pub use model::{Ledger, MealShift, Reservation, ReservationStatus, SlotKey, StudentId, Token};
pub use registry::{BookingError, Registry, RegistryConfig};
#[cfg(feature = "serde")]
pub use storage::{JsonStorage, Storage};
