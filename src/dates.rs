//! Normalisation des dates du roster.
//!
//! Trois encodages sont acceptés, essayés dans cet ordre (le premier qui
//! matche gagne, ce qui rend les jetons ambigus prévisibles) :
//! 1. jour d'abord `DD[/-]MM[/-]YYYY`
//! 2. année d'abord `YYYY[/-]MM[/-]DD`
//! 3. numéro de série tableur (entier dans [30000, 59999])

use crate::error::RosterError;
use chrono::{Duration, NaiveDate};

/// Années acceptées par les deux formats textuels.
const YEAR_MIN: i32 = 2000;
const YEAR_MAX: i32 = 2029;

/// Bornes du format "numéro de série" des tableurs.
const SERIAL_MIN: i64 = 30_000;
const SERIAL_MAX: i64 = 59_999;

/// Convertit un jeton de date en `NaiveDate`.
///
/// Échoue avec [`RosterError::UnrecognizedDateFormat`] si le jeton ne matche
/// aucun des trois encodages ; l'appelant (construction de table) saute alors
/// la ligne.
pub fn normalize(token: &str) -> Result<NaiveDate, RosterError> {
    let token = token.trim();
    parse_day_first(token)
        .or_else(|| parse_year_first(token))
        .or_else(|| parse_serial(token))
        .ok_or_else(|| RosterError::UnrecognizedDateFormat(token.to_string()))
}

/// Clé canonique d'un jour dans la table (`DD/MM/YYYY`).
pub fn date_key(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Énumère la plage inclusive entre deux jetons de date.
///
/// La plage est ancrée sur `start` : on avance de `|finish - start|` jours à
/// partir de `start`, bornes comprises. Si `finish` précède `start`, la plage
/// produite n'atteint donc jamais `finish` — comportement historique, conservé
/// tel quel.
pub fn date_range(start: &str, finish: &str) -> Result<Vec<NaiveDate>, RosterError> {
    let start = normalize(start)?;
    let finish = normalize(finish)?;
    let span = (finish - start).num_days().abs();
    Ok((0..=span).map(|n| start + Duration::days(n)).collect())
}

fn split_parts(token: &str) -> Option<[&str; 3]> {
    let mut parts = token.split(['/', '-']);
    let a = parts.next()?;
    let b = parts.next()?;
    let c = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some([a, b, c])
}

fn numeric(part: &str, width: usize) -> Option<u32> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn build(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    let year = year as i32;
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_day_first(token: &str) -> Option<NaiveDate> {
    let [d, m, y] = split_parts(token)?;
    build(numeric(y, 4)?, numeric(m, 2)?, numeric(d, 2)?)
}

fn parse_year_first(token: &str) -> Option<NaiveDate> {
    let [y, m, d] = split_parts(token)?;
    build(numeric(y, 4)?, numeric(m, 2)?, numeric(d, 2)?)
}

/// Numéro de série tableur : base 1900-01-01, moins deux jours (le tableur
/// compte les bornes incluses et un 29/02/1900 qui n'existe pas).
fn parse_serial(token: &str) -> Option<NaiveDate> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let serial: i64 = token.parse().ok()?;
    if !(SERIAL_MIN..=SERIAL_MAX).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    Some(base + Duration::days(serial - 2))
}
