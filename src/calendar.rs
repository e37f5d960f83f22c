use crate::model::ShiftRecord;
use chrono::{Duration, NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// Politique horaire des postes : table libellé → (début, fin) et règle de
/// pauses non payées.
///
/// Un libellé absent de la table retombe sur la politique "Off" (00:00/00:00,
/// durée nulle) plutôt que d'échouer.
#[derive(Debug, Clone)]
pub struct ShiftCalendar {
    table: BTreeMap<String, (NaiveTime, NaiveTime)>,
    /// Une pause est acquise par tranche complète de cette durée travaillée.
    break_interval: Duration,
    /// Durée d'une pause non payée.
    break_unit: Duration,
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).expect("literal time")
}

impl Default for ShiftCalendar {
    fn default() -> Self {
        let mut table = BTreeMap::new();
        let mut set = |label: &str, start: NaiveTime, finish: NaiveTime| {
            table.insert(label.to_string(), (start, finish));
        };
        set("D", hm(8, 30), hm(17, 0));
        set("Day8", hm(8, 30), hm(17, 0));
        set("Day", hm(7, 0), hm(19, 0));
        set("Night", hm(19, 0), hm(7, 0));
        set("Morning", hm(6, 0), hm(15, 30));
        set("Evening", hm(14, 0), hm(23, 20));
        set("Grave", hm(22, 0), hm(7, 30));
        set("Off", hm(0, 0), hm(0, 0));
        set("SS Off", hm(0, 0), hm(0, 0));
        set("Ann Lve", hm(0, 0), hm(0, 0));
        set("sick", hm(0, 0), hm(0, 0));
        Self {
            table,
            break_interval: Duration::hours(6),
            break_unit: Duration::minutes(30),
        }
    }
}

impl ShiftCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute ou remplace un libellé dans la table.
    pub fn with_shift<L: Into<String>>(mut self, label: L, start: NaiveTime, finish: NaiveTime) -> Self {
        self.table.insert(label.into(), (start, finish));
        self
    }

    /// Remplace la règle de pauses (tranche d'acquisition, durée d'une pause).
    pub fn with_break_policy(mut self, interval: Duration, unit: Duration) -> Self {
        self.break_interval = interval;
        self.break_unit = unit;
        self
    }

    /// Heures (début, fin) d'un libellé ; "Off" si inconnu.
    pub fn times_for(&self, label: &str) -> (NaiveTime, NaiveTime) {
        self.table
            .get(label)
            .copied()
            .unwrap_or((hm(0, 0), hm(0, 0)))
    }

    /// Calcule le [`ShiftRecord`] d'un libellé pour une date.
    ///
    /// Une fin strictement antérieure au début bascule la fin au lendemain
    /// (poste de nuit). Début et fin égaux restent sur la même date : poste
    /// "Off", durée nulle.
    pub fn resolve(&self, date: NaiveDate, label: &str) -> ShiftRecord {
        let (start_t, finish_t) = self.times_for(label);
        let start = date.and_time(start_t);
        let finish = if start_t > finish_t {
            (date + Duration::days(1)).and_time(finish_t)
        } else {
            date.and_time(finish_t)
        };

        let worked = finish - start;
        let accrued = if self.break_interval > Duration::zero() {
            worked.num_seconds() / self.break_interval.num_seconds()
        } else {
            0
        };
        let breaks = self.break_unit * accrued as i32;
        ShiftRecord {
            date,
            label: label.to_string(),
            start,
            finish,
            worked,
            breaks,
            payable: worked - breaks,
        }
    }
}
