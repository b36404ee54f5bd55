//! Error types for generated data-access functions

use thiserror::Error;
use tokio_postgres::error::SqlState;

/// Result type alias for generated functions.
pub type DataResult<T> = Result<T, DataError>;

/// Numeric outcome of a generated call, as reported by [`DataError::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ResultCode {
    /// The call succeeded, or failed for an unclassified reason.
    Success = 0,
    NotFound = 2,
    Conflict = 3,
    MissingTable = 4,
}

impl From<ResultCode> for i32 {
    fn from(code: ResultCode) -> Self {
        code as i32
    }
}

/// Failure of a generated data-access function.
#[derive(Debug, Error)]
pub enum DataError {
    /// The query returned no row.
    #[error("row not found")]
    NotFound,

    /// A write violated a unique constraint.
    #[error("unique constraint violation: {0}")]
    Conflict(#[source] tokio_postgres::Error),

    /// The table does not exist (run the setup function first).
    #[error("table does not exist: {0}")]
    MissingTable(#[source] tokio_postgres::Error),

    /// Any other database error.
    #[error("database error: {0}")]
    Unknown(#[from] tokio_postgres::Error),
}

impl DataError {
    /// Classify the error of a read: a missing table becomes [`DataError::MissingTable`].
    pub fn from_read(err: tokio_postgres::Error) -> Self {
        if is_missing_table(err.code()) {
            Self::MissingTable(err)
        } else {
            Self::Unknown(err)
        }
    }

    /// Classify the error of a write: a unique violation becomes [`DataError::Conflict`].
    pub fn from_write(err: tokio_postgres::Error) -> Self {
        if is_conflict(err.code()) {
            Self::Conflict(err)
        } else {
            Self::Unknown(err)
        }
    }

    pub fn result_code(&self) -> ResultCode {
        match self {
            Self::NotFound => ResultCode::NotFound,
            Self::Conflict(_) => ResultCode::Conflict,
            Self::MissingTable(_) => ResultCode::MissingTable,
            Self::Unknown(_) => ResultCode::Success,
        }
    }

    /// `2` not found, `3` conflict, `4` missing table, `0` otherwise.
    pub fn code(&self) -> i32 {
        self.result_code().into()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    pub fn is_missing_table(&self) -> bool {
        matches!(self, Self::MissingTable(_))
    }
}

/// SQLSTATE `42P01` (undefined_table).
pub fn is_missing_table(state: Option<&SqlState>) -> bool {
    state == Some(&SqlState::UNDEFINED_TABLE)
}

/// SQLSTATE `23505` (unique_violation).
pub fn is_conflict(state: Option<&SqlState>) -> bool {
    state == Some(&SqlState::UNIQUE_VIOLATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_codes() {
        assert_eq!(i32::from(ResultCode::Success), 0);
        assert_eq!(i32::from(ResultCode::NotFound), 2);
        assert_eq!(i32::from(ResultCode::Conflict), 3);
        assert_eq!(i32::from(ResultCode::MissingTable), 4);
    }

    #[test]
    fn not_found() {
        let err = DataError::NotFound;
        assert_eq!(err.code(), 2);
        assert_eq!(err.result_code(), ResultCode::NotFound);
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
        assert_eq!(err.to_string(), "row not found");
    }

    #[test]
    fn sqlstate_classification() {
        assert_eq!(SqlState::UNDEFINED_TABLE.code(), "42P01");
        assert_eq!(SqlState::UNIQUE_VIOLATION.code(), "23505");

        assert!(is_missing_table(Some(&SqlState::UNDEFINED_TABLE)));
        assert!(!is_missing_table(Some(&SqlState::UNIQUE_VIOLATION)));
        assert!(!is_missing_table(None));

        assert!(is_conflict(Some(&SqlState::from_code("23505"))));
        assert!(!is_conflict(Some(&SqlState::FOREIGN_KEY_VIOLATION)));
        assert!(!is_conflict(None));
    }
}
