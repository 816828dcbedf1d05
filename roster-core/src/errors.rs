use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("User not found: {0}")]
    UserNotFound(i32),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl RosterError {
    pub fn database(err: impl std::fmt::Display) -> Self {
        RosterError::DatabaseError(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RosterError::UserNotFound(_))
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
