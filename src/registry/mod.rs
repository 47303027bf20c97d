mod admission;
mod keys;
mod lifecycle;
mod types;

pub use types::{BookingError, RegistryConfig};

use crate::model::{Ledger, MealShift, Reservation, ReservationStatus, SlotKey, StudentId, Token};
use chrono::NaiveDate;
use keys::StudentSlotKey;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// État brut : magasin principal + deux index dérivés du statut.
///
/// Un jeton figure dans `active_by_student` et `active_by_slot` si et
/// seulement si sa réservation est `Active`.
#[derive(Debug, Default)]
struct Book {
    reservations: HashMap<Token, Reservation>,
    active_by_student: HashMap<StudentSlotKey, Token>,
    active_by_slot: HashMap<SlotKey, HashSet<Token>>,
}

impl Book {
    fn active_in(&self, slot: &SlotKey) -> usize {
        self.active_by_slot.get(slot).map_or(0, HashSet::len)
    }

    fn index(&mut self, student_key: StudentSlotKey, slot: SlotKey, token: Token) {
        self.active_by_student.insert(student_key, token.clone());
        self.active_by_slot.entry(slot).or_default().insert(token);
    }

    fn unindex(&mut self, student_key: &StudentSlotKey, slot: &SlotKey, token: &Token) {
        self.active_by_student.remove(student_key);
        if let Some(set) = self.active_by_slot.get_mut(slot) {
            set.remove(token);
            if set.is_empty() {
                self.active_by_slot.remove(slot);
            }
        }
    }
}

/// Registre des réservations : seule autorité du processus.
///
/// Tout l'état vit derrière un unique verrou ; chaque opération est une
/// section critique complète, donc aucun appelant ne voit un statut modifié
/// sans les index correspondants. Partager via `Arc<Registry>`.
#[derive(Debug)]
pub struct Registry {
    config: RegistryConfig,
    book: Mutex<Book>,
}

impl Registry {
    /// Échoue avec [`BookingError::Configuration`] si la capacité est nulle.
    pub fn new(config: RegistryConfig) -> Result<Self, BookingError> {
        config.validate()?;
        Ok(Self {
            config,
            book: Mutex::new(Book::default()),
        })
    }

    /// Reconstruit un registre (et ses index) depuis un ledger sauvegardé.
    ///
    /// Refuse un ledger incohérent : jeton en double, deux réservations
    /// actives pour un même étudiant et créneau, ou créneau au-delà de la
    /// capacité configurée.
    pub fn restore(config: RegistryConfig, ledger: Ledger) -> Result<Self, BookingError> {
        let registry = Self::new(config)?;
        {
            let mut book = registry.lock();
            for reservation in ledger.reservations {
                admission::reload(&mut book, config.capacity_per_shift, reservation)?;
            }
        }
        Ok(registry)
    }

    // Les opérations valident tout avant de muter : un verrou empoisonné ne
    // peut pas cacher un état partiel.
    fn lock(&self) -> MutexGuard<'_, Book> {
        self.book.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    pub fn capacity_per_shift(&self) -> u32 {
        self.config.capacity_per_shift
    }

    /// Réserve un repas ; retourne le jeton de la nouvelle réservation active.
    pub fn admit(
        &self,
        student: &StudentId,
        date: NaiveDate,
        shift: MealShift,
    ) -> Result<Token, BookingError> {
        let mut book = self.lock();
        admission::admit(&mut book, self.config.capacity_per_shift, student, date, shift)
    }

    /// Détails d'une réservation, quel que soit son statut.
    pub fn lookup(&self, token: &Token) -> Result<Reservation, BookingError> {
        self.lock()
            .reservations
            .get(token)
            .cloned()
            .ok_or_else(|| BookingError::UnknownToken(token.clone()))
    }

    pub fn cancel(&self, token: &Token) -> Result<(), BookingError> {
        let mut book = self.lock();
        lifecycle::transition(&mut book, token, ReservationStatus::Canceled)
    }

    pub fn check_in(&self, token: &Token) -> Result<(), BookingError> {
        let mut book = self.lock();
        lifecycle::transition(&mut book, token, ReservationStatus::Used)
    }

    pub fn active_count(&self, date: NaiveDate, shift: MealShift) -> usize {
        self.lock().active_in(&keys::slot_key(date, shift))
    }

    pub fn remaining(&self, date: NaiveDate, shift: MealShift) -> usize {
        (self.config.capacity_per_shift as usize).saturating_sub(self.active_count(date, shift))
    }

    /// Toutes les réservations, triées par (date, service, étudiant, jeton).
    pub fn reservations(&self) -> Vec<Reservation> {
        let mut out: Vec<Reservation> = self.lock().reservations.values().cloned().collect();
        out.sort_by(|a, b| {
            (a.date, a.shift, &a.student, &a.token).cmp(&(b.date, b.shift, &b.student, &b.token))
        });
        out
    }

    pub fn snapshot(&self) -> Ledger {
        Ledger {
            capacity_per_shift: self.config.capacity_per_shift,
            reservations: self.reservations(),
        }
    }
}
