//! Domain-specific error types and error handling.

use thiserror::Error;

/// Errors raised while talking to an SMS gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway rejected the request: {message}")]
    Rejected { message: String },

    #[error("Gateway transport failure: {message}")]
    Transport { message: String },

    #[error("Malformed gateway response: {message}")]
    Malformed { message: String },
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to gateway errors
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type DomainResult<T> = Result<T, DomainError>;
