use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour l'étudiant (identité qui réserve)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StudentId(String);

impl StudentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Jeton opaque remis au client à la réservation.
///
/// Toujours tiré au hasard (UUID v4) : aucun compteur séquentiel, pour ne pas
/// révéler l'ordre ni le volume des réservations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token(String);

impl Token {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Service de repas. Ensemble fermé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MealShift {
    Lunch,
    Dinner,
}

impl MealShift {
    pub const ALL: [MealShift; 2] = [MealShift::Lunch, MealShift::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealShift::Lunch => "LUNCH",
            MealShift::Dinner => "DINNER",
        }
    }
}

impl fmt::Display for MealShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseShiftError(pub String);

impl fmt::Display for ParseShiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown meal shift: {} (expected lunch or dinner)", self.0)
    }
}

impl std::error::Error for ParseShiftError {}

impl FromStr for MealShift {
    type Err = ParseShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lunch" | "dejeuner" | "déjeuner" => Ok(MealShift::Lunch),
            "dinner" | "diner" | "dîner" => Ok(MealShift::Dinner),
            _ => Err(ParseShiftError(s.to_string())),
        }
    }
}

/// Statut d'une réservation.
///
/// `Active` est l'état initial ; `Used` et `Canceled` sont terminaux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ReservationStatus {
    Active,
    Used,
    Canceled,
}

impl ReservationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Active => "ACTIVE",
            ReservationStatus::Used => "USED",
            ReservationStatus::Canceled => "CANCELED",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, ReservationStatus::Active)
    }

    /// Seules les transitions ACTIVE→USED et ACTIVE→CANCELED sont légales.
    pub fn can_transition_to(self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (ReservationStatus::Active, ReservationStatus::Used)
                | (ReservationStatus::Active, ReservationStatus::Canceled)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Créneau logique : un jour et un service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub shift: MealShift,
}

impl SlotKey {
    pub fn new(date: NaiveDate, shift: MealShift) -> Self {
        Self { date, shift }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.date.format("%Y-%m-%d"), self.shift)
    }
}

/// Réservation d'un repas
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reservation {
    pub token: Token,
    pub student: StudentId,
    pub date: NaiveDate,
    pub shift: MealShift,
    pub status: ReservationStatus,
}

impl Reservation {
    pub(crate) fn new(token: Token, student: StudentId, date: NaiveDate, shift: MealShift) -> Self {
        Self {
            token,
            student,
            date,
            shift,
            status: ReservationStatus::Active,
        }
    }

    pub fn slot(&self) -> SlotKey {
        SlotKey::new(self.date, self.shift)
    }

    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }
}

/// Image complète du registre, pour la persistance côté appelant.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ledger {
    pub capacity_per_shift: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reservations: Vec<Reservation>,
}
