use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Fenêtre de recherche du snapshot précédent, en jours.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 28;

/// Archive datée de snapshots : `<base><YYYYMMDD>.<ext>` dans un répertoire.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    base_name: String,
    extension: String,
}

impl SnapshotStore {
    pub fn new<P: AsRef<Path>>(dir: P, base_name: &str, extension: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            base_name: base_name.to_string(),
            extension: extension.to_string(),
        }
    }

    /// Chemin du snapshot d'une date donnée.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!(
            "{}{}.{}",
            self.base_name,
            date.format("%Y%m%d"),
            self.extension
        ))
    }

    /// Écrit le snapshot du jour de manière atomique (tempfile + rename).
    pub fn write(&self, date: NaiveDate, contents: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating snapshot directory {}", self.dir.display()))?;
        let path = self.path_for(date);
        let mut tmp = NamedTempFile::new_in(&self.dir).with_context(|| "creating temp file")?;
        tmp.write_all(contents)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).with_context(|| "atomic rename")?;
        Ok(path)
    }

    /// Cherche le snapshot le plus récent strictement antérieur à `date`, en
    /// remontant jour par jour jusqu'à `lookback_days`.
    pub fn latest_before(&self, date: NaiveDate, lookback_days: u32) -> Option<PathBuf> {
        for back in 1..=i64::from(lookback_days) {
            let candidate = self.path_for(date - Duration::days(back));
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}
