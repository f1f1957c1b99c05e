//! Error Types
//!
//! This module defines the error types used throughout the customizer core.
//!
//! # Overview
//!
//! The main error type [`HalfpipeError`] covers all failure modes including:
//! - Catalog validation errors
//! - Board geometry contract violations
//! - Texture loading and decoding errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, HalfpipeError>`.
//!
//! ```rust,ignore
//! use halfpipe::errors::{HalfpipeError, Result};
//!
//! fn load_board() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::catalog::Slot;
use crate::scene::PartId;

/// The main error type for the customizer core.
///
/// This enum covers all possible error conditions that can occur while
/// assembling and driving the customizer scene. Each variant provides
/// specific context about what went wrong.
#[derive(Error, Debug)]
pub enum HalfpipeError {
    // ========================================================================
    // Catalog Errors
    // ========================================================================
    /// A slot's option catalog contained no entries. Every catalog must be
    /// non-empty; its first entry is the slot's default selection.
    #[error("Catalog for slot `{0}` is empty")]
    EmptyCatalog(Slot),

    // ========================================================================
    // Geometry Errors
    // ========================================================================
    /// The board mesh asset did not expose one of the required named parts.
    /// This is fatal: the core cannot render a partial board.
    #[error("Board geometry is missing part `{0}`")]
    MissingPart(PartId),

    // ========================================================================
    // Texture & Image Errors
    // ========================================================================
    /// Image decoding error.
    #[error("Image decode error: {0}")]
    ImageDecodeError(String),

    /// File I/O error while reading a texture.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // HTTP Errors
    // ========================================================================
    /// HTTP transport error while fetching a texture.
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// HTTP response error with status code.
    #[cfg(feature = "http")]
    #[error("HTTP response error: status {status}")]
    HttpResponseError {
        /// HTTP status code
        status: u16,
    },

    // ========================================================================
    // Format & Parsing Errors
    // ========================================================================
    /// JSON parsing error while reading a catalog payload.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

impl From<image::ImageError> for HalfpipeError {
    fn from(err: image::ImageError) -> Self {
        HalfpipeError::ImageDecodeError(err.to_string())
    }
}

/// Alias for `Result<T, HalfpipeError>`.
pub type Result<T> = std::result::Result<T, HalfpipeError>;
