use crate::dates;
use crate::error::RosterError;
use crate::roster::RosterTable;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// Une ligne de comparaison : le libellé d'avant et celui de maintenant pour
/// une date. Un côté absent (historique plus court) reste `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRow {
    pub date: NaiveDate,
    /// Clé de date persistée (`DD/MM/YYYY`), celle des tables.
    pub date_key: String,
    pub previous: Option<String>,
    pub current: Option<String>,
}

impl ChangeRow {
    /// Vrai si le libellé a effectivement changé entre les deux snapshots.
    pub fn is_change(&self) -> bool {
        self.previous != self.current
    }
}

/// Résultat de la comparaison de deux snapshots pour une personne.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterDiff {
    Unchanged,
    /// Une ligne par date présente dans l'une ou l'autre période, ordre
    /// chronologique.
    Changed(Vec<ChangeRow>),
}

impl RosterDiff {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, RosterDiff::Unchanged)
    }

    pub fn rows(&self) -> &[ChangeRow] {
        match self {
            RosterDiff::Unchanged => &[],
            RosterDiff::Changed(rows) => rows,
        }
    }
}

/// Compare les vues période de deux tables pour une personne.
///
/// Les deux plans identiques (mêmes dates, mêmes libellés) donnent
/// [`RosterDiff::Unchanged`] ; sinon la table de changements couvre l'union
/// des dates des deux périodes.
pub fn diff_member_period(
    current: &RosterTable,
    previous: &RosterTable,
    staff: &str,
    start: &str,
    finish: &str,
) -> Result<RosterDiff, RosterError> {
    let cur = current.member_period(staff, start, finish)?;
    let prev = previous.member_period(staff, start, finish)?;
    if cur == prev {
        return Ok(RosterDiff::Unchanged);
    }

    let keys: BTreeSet<&String> = cur.keys().chain(prev.keys()).collect();
    let mut rows = Vec::with_capacity(keys.len());
    for key in keys {
        // Les clés persistées sont canoniques, elles re-normalisent toujours.
        let date = dates::normalize(key)?;
        rows.push(ChangeRow {
            date,
            date_key: key.clone(),
            previous: prev.get(key).cloned(),
            current: cur.get(key).cloned(),
        });
    }
    rows.sort_by_key(|row| row.date);
    Ok(RosterDiff::Changed(rows))
}
