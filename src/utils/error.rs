use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("No capacity: {0}")]
    Capacity(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(String),
}

// Convert sqlx::Error (database error) to AppError::DatabaseError
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

// Only the first failing field is reported, the console shows one line per error
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = first_message(&errors).unwrap_or_else(|| "Invalid input".to_string());
        AppError::ValidationError(message)
    }
}

// Fields in name order, descending into nested records such as `person`
fn first_message(errors: &ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    fields.into_iter().find_map(|(field, kind)| match kind {
        ValidationErrorsKind::Field(errs) => errs.first().map(|e| match &e.message {
            Some(msg) => msg.to_string(),
            None => format!("{} is invalid", field),
        }),
        ValidationErrorsKind::Struct(nested) => first_message(nested),
        ValidationErrorsKind::List(items) => items.values().find_map(|item| first_message(item)),
    })
}

impl AppError {
    /// Short label used by the console when reporting an error.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DatabaseError(_) => "database",
            AppError::ValidationError(_) => "validation",
            AppError::NotFound(_) => "not-found",
            AppError::Conflict(_) => "conflict",
            AppError::Capacity(_) => "capacity",
            AppError::ConfigError(_) => "config",
            AppError::Io(_) => "io",
        }
    }
}

// Define a type alias for the result type
pub type AppResult<T> = Result<T, AppError>;
