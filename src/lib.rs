#![forbid(unsafe_code)]
//! Rosterwatch — suivi d'un roster d'équipe exporté en CSV (sans BD).
//!
//! - Normalisation de dates (trois encodages d'export, y compris numéro de
//!   série tableur).
//! - Heures travaillées / pauses non payées / heures payables par poste,
//!   postes de nuit compris.
//! - Comparaison de deux snapshots sur une période inclusive, notification
//!   HTML ou texte.
//! - Archive datée de snapshots, checksum de déduplication.

pub mod calendar;
pub mod checksum;
pub mod dates;
pub mod diff;
pub mod error;
pub mod io;
pub mod model;
pub mod notification;
pub mod roster;
pub mod storage;

pub use calendar::ShiftCalendar;
pub use diff::{diff_member_period, ChangeRow, RosterDiff};
pub use error::RosterError;
pub use model::{ShiftRecord, StaffEntry};
pub use notification::{prepare_notice, HtmlTable, Notice, NoticeRenderer, PlainText};
pub use roster::{RosterTable, StaffDay, DEFAULT_NEW_SHIFT};
pub use storage::{SnapshotStore, DEFAULT_LOOKBACK_DAYS};
