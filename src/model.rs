use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Poste calculé pour une personne et une date.
///
/// Valeur figée à la construction par [`crate::calendar::ShiftCalendar::resolve`] :
/// les instants de début/fin sont ancrés sur la date (fin reportée au lendemain
/// pour un poste de nuit) et les durées dérivées une seule fois.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRecord {
    pub date: NaiveDate,
    pub label: String,
    pub start: NaiveDateTime,
    pub finish: NaiveDateTime,
    /// Durée travaillée (`finish - start`).
    pub worked: Duration,
    /// Pauses non payées accumulées sur la durée travaillée.
    pub breaks: Duration,
    /// Durée payable (`worked - breaks`).
    pub payable: Duration,
}

impl ShiftRecord {
    /// Durée payable en minutes.
    pub fn payable_minutes(&self) -> i64 {
        self.payable.num_minutes()
    }
}

/// Entrée d'une personne dans un jour du roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffEntry {
    pub name: String,
    pub shift: ShiftRecord,
}

impl StaffEntry {
    pub fn new<N: Into<String>>(name: N, shift: ShiftRecord) -> Self {
        Self {
            name: name.into(),
            shift,
        }
    }

    /// Libellé du poste (raccourci vers `shift.label`).
    pub fn label(&self) -> &str {
        &self.shift.label
    }
}
