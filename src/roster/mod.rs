mod day;

pub use day::StaffDay;

use crate::calendar::ShiftCalendar;
use crate::dates;
use crate::error::RosterError;
use crate::model::ShiftRecord;
use std::collections::BTreeMap;

/// Libellé attribué par défaut quand on ajoute une personne sans préciser.
pub const DEFAULT_NEW_SHIFT: &str = "Off";

/// Table roster : l'agrégat des [`StaffDay`] indexés par clé de date.
///
/// Construite en une passe depuis une grille tabulaire (ligne 0 : en-têtes,
/// colonne 0 : jetons de date). Invariant : les entrées de chaque jour sont un
/// sous-ensemble des en-têtes.
#[derive(Debug, Clone)]
pub struct RosterTable {
    calendar: ShiftCalendar,
    headers: Vec<String>,
    days: BTreeMap<String, StaffDay>,
    skipped_rows: usize,
}

impl RosterTable {
    /// Construit la table depuis une grille rectangulaire de cellules.
    ///
    /// `grid[0]` est la ligne d'en-têtes (`grid[0][0]`, le libellé de la
    /// colonne date, est ignoré). Les lignes dont le jeton de date ne se
    /// normalise pas sont sautées (lignes vides ou pied de page des exports
    /// réels) ; deux lignes sur la même date : la dernière gagne. Une ligne
    /// de largeur différente des en-têtes fait échouer toute la construction.
    pub fn from_grid(grid: &[Vec<String>], calendar: ShiftCalendar) -> Result<Self, RosterError> {
        let Some((header, rows)) = grid.split_first() else {
            return Err(RosterError::MalformedSourceGrid(
                "missing header row".to_string(),
            ));
        };
        if header.len() < 2 {
            return Err(RosterError::MalformedSourceGrid(
                "header row needs a date column and at least one staff column".to_string(),
            ));
        }
        let headers: Vec<String> = header[1..].to_vec();

        let mut days = BTreeMap::new();
        let mut skipped_rows = 0usize;
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(RosterError::MalformedSourceGrid(format!(
                    "row {} has {} cells, expected {}",
                    idx + 1,
                    row.len(),
                    header.len()
                )));
            }
            let date = match dates::normalize(&row[0]) {
                Ok(date) => date,
                Err(_) => {
                    #[cfg(feature = "logging")]
                    tracing::debug!(row = idx + 1, token = %row[0], "skipping row, unparseable date");
                    skipped_rows += 1;
                    continue;
                }
            };
            let shifts = headers.iter().cloned().zip(row[1..].iter().cloned());
            days.insert(dates::date_key(date), StaffDay::new(date, shifts, &calendar));
        }

        Ok(Self {
            calendar,
            headers,
            days,
            skipped_rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn days(&self) -> impl Iterator<Item = &StaffDay> {
        self.days.values()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Lignes ignorées à la construction (jeton de date illisible).
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Plan nom → libellé du jour désigné par `token`.
    pub fn day(&self, token: &str) -> Result<BTreeMap<String, String>, RosterError> {
        Ok(self.day_ref(token)?.working())
    }

    /// Poste complet d'une personne pour un jour.
    pub fn shift(&self, token: &str, staff: &str) -> Result<&ShiftRecord, RosterError> {
        Ok(&self.day_ref(token)?.show_member(staff)?.shift)
    }

    /// Libellés d'une personne sur tous les jours de la table,
    /// clé de date → libellé.
    pub fn member(&self, staff: &str) -> Result<BTreeMap<String, String>, RosterError> {
        self.check_member(staff)?;
        Ok(self
            .days
            .iter()
            .filter_map(|(key, day)| {
                day.entry(staff)
                    .map(|entry| (key.clone(), entry.label().to_string()))
            })
            .collect())
    }

    /// Comme [`RosterTable::member`], restreint à la plage inclusive
    /// `[start, finish]`.
    ///
    /// Permissif sur les dates : celles absentes de la table sont omises sans
    /// erreur, le diff doit tolérer un historique court. Le nom, lui, est
    /// vérifié bruyamment.
    pub fn member_period(
        &self,
        staff: &str,
        start: &str,
        finish: &str,
    ) -> Result<BTreeMap<String, String>, RosterError> {
        self.check_member(staff)?;
        let mut out = BTreeMap::new();
        for date in dates::date_range(start, finish)? {
            let key = dates::date_key(date);
            if let Some(entry) = self.days.get(&key).and_then(|day| day.entry(staff)) {
                out.insert(key, entry.label().to_string());
            }
        }
        Ok(out)
    }

    /// Vue période de toute l'équipe : nom → (clé de date → libellé) pour
    /// chaque personne des en-têtes, avec la même permissivité sur les dates
    /// que [`RosterTable::member_period`].
    pub fn period(
        &self,
        start: &str,
        finish: &str,
    ) -> Result<BTreeMap<String, BTreeMap<String, String>>, RosterError> {
        let mut out = BTreeMap::new();
        for staff in &self.headers {
            out.insert(staff.clone(), self.member_period(staff, start, finish)?);
        }
        Ok(out)
    }

    /// Ajoute une personne à tous les jours de la table (et aux en-têtes),
    /// avec `default_label` ou [`DEFAULT_NEW_SHIFT`].
    pub fn add_member(&mut self, staff: &str, default_label: Option<&str>) {
        let label = default_label.unwrap_or(DEFAULT_NEW_SHIFT);
        if !self.headers.iter().any(|h| h == staff) {
            self.headers.push(staff.to_string());
        }
        let calendar = &self.calendar;
        for day in self.days.values_mut() {
            day.add_member(staff, label, calendar);
        }
    }

    /// Retire une personne de tous les jours et des en-têtes. Renvoie le
    /// nombre de jours où elle figurait.
    pub fn remove_member(&mut self, staff: &str) -> usize {
        self.headers.retain(|h| h != staff);
        let mut removed = 0usize;
        for day in self.days.values_mut() {
            if day.remove_member(staff) {
                removed += 1;
            }
        }
        removed
    }

    /// Remplace le poste d'une personne pour un jour (écrasement).
    pub fn update_shift(&mut self, staff: &str, label: &str, token: &str) -> Result<(), RosterError> {
        self.check_member(staff)?;
        let key = dates::date_key(dates::normalize(token)?);
        let calendar = &self.calendar;
        let day = self
            .days
            .get_mut(&key)
            .ok_or(RosterError::DayNotFound(key.clone()))?;
        day.add_member(staff, label, calendar);
        Ok(())
    }

    /// Remplace le poste d'une personne sur une plage inclusive ; les dates
    /// absentes de la table sont sautées. Renvoie le nombre de jours touchés.
    pub fn update_shift_batch(
        &mut self,
        staff: &str,
        label: &str,
        start: &str,
        finish: &str,
    ) -> Result<usize, RosterError> {
        self.check_member(staff)?;
        let mut touched = 0usize;
        let calendar = &self.calendar;
        for date in dates::date_range(start, finish)? {
            if let Some(day) = self.days.get_mut(&dates::date_key(date)) {
                day.add_member(staff, label, calendar);
                touched += 1;
            }
        }
        Ok(touched)
    }

    fn day_ref(&self, token: &str) -> Result<&StaffDay, RosterError> {
        let key = dates::date_key(dates::normalize(token)?);
        self.days
            .get(&key)
            .ok_or(RosterError::DayNotFound(key))
    }

    fn check_member(&self, staff: &str) -> Result<(), RosterError> {
        if self.headers.iter().any(|h| h == staff) {
            Ok(())
        } else {
            Err(RosterError::MemberNotFound(staff.to_string()))
        }
    }
}
