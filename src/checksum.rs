//! Checksum de contenu pour détecter les re-téléchargements sans changement.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// SHA-256 hexadécimal du contenu d'un fichier.
pub fn file_checksum<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

/// Vrai si les deux fichiers ont le même contenu.
pub fn files_match<A: AsRef<Path>, B: AsRef<Path>>(a: A, b: B) -> Result<bool> {
    Ok(file_checksum(a)? == file_checksum(b)?)
}
