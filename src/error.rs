use thiserror::Error;

/// Erreurs du cœur roster (parsing, requêtes, construction).
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("unrecognized date format: {0}")]
    UnrecognizedDateFormat(String),
    #[error("no roster day matches date: {0}")]
    DayNotFound(String),
    #[error("staff member not found: {0}")]
    MemberNotFound(String),
    #[error("malformed source grid: {0}")]
    MalformedSourceGrid(String),
}
