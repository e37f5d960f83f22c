use crate::calendar::ShiftCalendar;
use crate::dates;
use crate::roster::RosterTable;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeMap;
use std::path::Path;

/// Lit un CSV en grille brute de cellules, sans interpréter d'en-têtes.
///
/// Lecture flexible : les largeurs de lignes ne sont pas vérifiées ici, c'est
/// la construction de table qui tranche.
pub fn read_grid_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut grid = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        grid.push(rec.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Charge un snapshot CSV en [`RosterTable`].
pub fn load_roster_csv<P: AsRef<Path>>(path: P, calendar: ShiftCalendar) -> Result<RosterTable> {
    let grid = read_grid_csv(&path)?;
    let table = RosterTable::from_grid(&grid, calendar)
        .with_context(|| format!("building roster from {}", path.as_ref().display()))?;
    Ok(table)
}

/// Réexporte la table en grille CSV : en-têtes puis une ligne par jour.
pub fn export_roster_csv<P: AsRef<Path>>(path: P, roster: &RosterTable) -> Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    let mut header = vec!["Date".to_string()];
    header.extend(roster.headers().iter().cloned());
    w.write_record(&header)?;
    for day in roster.days() {
        let mut record = vec![dates::date_key(day.date())];
        for staff in roster.headers() {
            record.push(
                day.entry(staff)
                    .map(|entry| entry.label().to_string())
                    .unwrap_or_default(),
            );
        }
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV d'une vue période (`date,shift`).
pub fn export_period_csv<P: AsRef<Path>>(
    path: P,
    period: &BTreeMap<String, String>,
) -> Result<()> {
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    w.write_record(["date", "shift"])?;
    for (date, label) in period {
        w.write_record([date.as_str(), label.as_str()])?;
    }
    w.flush()?;
    Ok(())
}
