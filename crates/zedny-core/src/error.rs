// SPDX-FileCopyrightText: 2026 Zedny Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Zedny client portal.

use thiserror::Error;

/// The primary error type used across all Zedny adapter traits and core operations.
#[derive(Debug, Error)]
pub enum ZednyError {
    /// Configuration errors (invalid TOML, bad endpoint, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request could not be sent or no response was received.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status or an unparsable body.
    #[error("protocol error: {message}")]
    Protocol {
        message: String,
        status: Option<u16>,
    },

    /// A backend-supplied value fell outside a fixed enumeration.
    #[error("invalid {field} value `{value}`")]
    Validation { field: String, value: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ZednyError {
    /// Builds a [`ZednyError::Transport`] wrapping the underlying cause.
    pub fn transport<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ZednyError::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Builds a [`ZednyError::Protocol`] without a status code (malformed body).
    pub fn malformed(message: impl Into<String>) -> Self {
        ZednyError::Protocol {
            message: message.into(),
            status: None,
        }
    }

    /// True for failures of a remote call: transport or protocol errors.
    ///
    /// Both classes share the same mapping at every call site.
    pub fn is_remote(&self) -> bool {
        matches!(self, ZednyError::Transport { .. } | ZednyError::Protocol { .. })
    }
}
