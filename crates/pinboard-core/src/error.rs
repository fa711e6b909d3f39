use thiserror::Error;

use crate::config::ConfigError;
use crate::confirm::GateError;
use crate::payload::PayloadError;
use crate::store::StoreError;
use crate::submission::SaveError;

pub type Result<T> = std::result::Result<T, PinboardError>;

#[derive(Debug, Error)]
pub enum PinboardError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no {expected} prompt is open")]
    PromptNotOpen { expected: &'static str },
}

impl PinboardError {
    #[must_use]
    pub fn prompt_not_open(expected: &'static str) -> Self {
        Self::PromptNotOpen { expected }
    }

    /// Whether the error is a protocol misuse by the host rather than a
    /// failure of an external collaborator.
    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Gate(_) | Self::PromptNotOpen { .. })
    }
}
