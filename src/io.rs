use crate::model::{Ledger, MealShift, Reservation, StudentId, Token};
use crate::registry::{BookingError, Registry};
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Résultat d'une ligne d'import : les refus d'admission ne stoppent pas l'import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub line: usize,
    pub student: StudentId,
    pub date: NaiveDate,
    pub shift: MealShift,
    pub result: Result<Token, BookingError>,
}

/// Import de réservations depuis CSV: header `student,date,shift`
///
/// Chaque ligne passe par [`Registry::admit`]. Une ligne mal formée interrompt
/// l'import ; les lignes déjà réservées restent réservées.
pub fn import_bookings_csv<P: AsRef<Path>>(
    path: P,
    registry: &Registry,
) -> anyhow::Result<Vec<ImportOutcome>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let rec = rec?;
        // ligne 1 = header
        let line = idx + 2;
        let student = rec.get(0).context("missing student")?.trim();
        let date = rec.get(1).context("missing date")?.trim();
        let shift = rec.get(2).context("missing shift")?.trim();
        if student.is_empty() {
            bail!("empty student on line {line}");
        }
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("invalid date on line {line}: {date}"))?;
        let shift: MealShift = shift
            .parse()
            .with_context(|| format!("invalid shift on line {line}"))?;
        let student = StudentId::new(student);
        let result = registry.admit(&student, date, shift);
        out.push(ImportOutcome {
            line,
            student,
            date,
            shift,
            result,
        });
    }
    Ok(out)
}

/// Export JSON du ledger (jolie mise en forme)
pub fn export_ledger_json<P: AsRef<Path>>(path: P, ledger: &Ledger) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(ledger)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des réservations: header `token,student,date,shift,status`
pub fn export_reservations_csv<P: AsRef<Path>>(
    path: P,
    reservations: &[Reservation],
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["token", "student", "date", "shift", "status"])?;
    for r in reservations {
        let date = r.date.format("%Y-%m-%d").to_string();
        w.write_record([
            r.token.as_str(),
            r.student.as_str(),
            date.as_str(),
            r.shift.as_str(),
            r.status.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
