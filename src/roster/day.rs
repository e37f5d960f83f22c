use crate::calendar::ShiftCalendar;
use crate::error::RosterError;
use crate::model::StaffEntry;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Un jour du roster : la date et les entrées nominatives de ce jour.
///
/// Les clés du plan d'entrées sont les noms de personnes, uniques au sein du
/// jour. Les entrées ne bougent qu'au travers de `add_member`/`remove_member`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffDay {
    date: NaiveDate,
    entries: BTreeMap<String, StaffEntry>,
}

impl StaffDay {
    /// Construit le jour en résolvant chaque libellé via le calendrier.
    pub fn new<I, N, L>(date: NaiveDate, shifts: I, calendar: &ShiftCalendar) -> Self
    where
        I: IntoIterator<Item = (N, L)>,
        N: Into<String>,
        L: AsRef<str>,
    {
        let mut day = Self {
            date,
            entries: BTreeMap::new(),
        };
        for (name, label) in shifts {
            day.add_member(&name.into(), label.as_ref(), calendar);
        }
        day
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Vue nom → libellé des entrées courantes.
    pub fn working(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.clone(), entry.label().to_string()))
            .collect()
    }

    pub fn entry(&self, name: &str) -> Option<&StaffEntry> {
        self.entries.get(name)
    }

    /// Insère ou écrase l'entrée de `name` en recalculant son poste.
    pub fn add_member(&mut self, name: &str, label: &str, calendar: &ShiftCalendar) {
        let shift = calendar.resolve(self.date, label);
        self.entries
            .insert(name.to_string(), StaffEntry::new(name, shift));
    }

    /// Supprime l'entrée de `name`. Renvoie `false` si elle était absente
    /// (signalé, pas fatal).
    pub fn remove_member(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Entrée de `name`, ou [`RosterError::MemberNotFound`].
    pub fn show_member(&self, name: &str) -> Result<&StaffEntry, RosterError> {
        self.entries
            .get(name)
            .ok_or_else(|| RosterError::MemberNotFound(name.to_string()))
    }
}
