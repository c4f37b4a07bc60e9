//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`ConstraintViolation`] thrown when a uniqueness constraint is breached.
//! - [`NotFound`] thrown when a user or item is not found.
//!
//!  [`ConstraintViolation`]: EngineError::ConstraintViolation
//!  [`NotFound`]: EngineError::NotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" already present!")]
    ConstraintViolation(String),
    #[error("invalid username or password")]
    AuthFailure,
    #[error("purchase denied: \"{0}\"")]
    PurchaseDenied(String),
    #[error("sale denied: \"{0}\"")]
    SaleDenied(String),
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ConstraintViolation(a), Self::ConstraintViolation(b)) => a == b,
            (Self::AuthFailure, Self::AuthFailure) => true,
            (Self::PurchaseDenied(a), Self::PurchaseDenied(b)) => a == b,
            (Self::SaleDenied(a), Self::SaleDenied(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::PasswordHash(a), Self::PasswordHash(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
