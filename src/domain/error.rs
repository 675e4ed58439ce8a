//! Error types for the keja browsing engine.
//!
//! This module defines the centralized error type [`KejaError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for keja operations.
///
/// This enum consolidates all error conditions that can occur while browsing,
/// from catalog fetch failures to I/O problems and configuration issues. Variants
/// wrapping underlying errors from external crates use `#[from]` for automatic
/// conversion with the `?` operator.
///
/// # Examples
///
/// ```
/// use keja::domain::KejaError;
///
/// fn validate_config() -> Result<(), KejaError> {
///     Err(KejaError::Config("missing catalog URL".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum KejaError {
    /// Catalog backend reported a failure or returned an undecodable payload.
    ///
    /// Occurs when the envelope arrives with `success == false`, or when the
    /// response body cannot be decoded at all. The string carries the backend
    /// message or a description of the decode failure.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// HTTP transport failed.
    ///
    /// Wraps connection, timeout, and protocol errors from `reqwest`.
    /// Automatically converts using the `#[from]` attribute.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Recent-searches storage operation failed.
    ///
    /// Occurs when reading from or writing to the recents file fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for keja operations.
///
/// This is a type alias for `std::result::Result<T, KejaError>` that simplifies
/// function signatures throughout the codebase.
///
/// # Examples
///
/// ```
/// use keja::domain::Result;
///
/// fn commit_search() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, KejaError>;
