//! Error types for the profile form core.
//!
//! # Design
//! Transport problems and acceptor rejections get separate variants so the
//! controller can log them differently, even though both surface to the user
//! as the same failure notification. Shape violations raised while editing
//! (`InvalidField`) never reach the network.

use thiserror::Error;

/// Errors produced by the field store, request builder, transport and config.
#[derive(Debug, Error)]
pub enum FormError {
    /// A raw field update named an unknown field or carried an ill-shaped value.
    #[error("invalid value for field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    /// Submit-time constraints failed; holds one message per offending field.
    #[error("draft failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The submission payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response: unreachable host, reset, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The acceptor answered with a non-2xx status.
    #[error("acceptor rejected submission with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl FormError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

impl From<config::ConfigError> for FormError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
