//! One-shot NFC badge writing: puts a beneficiary id on a physical tag as
//! a single NDEF record. There is no retry state machine; the outcome of
//! one discovery is reported and the operator may present the tag again.

use shared::domain::BeneficiaryId;
use thiserror::Error;
use tracing::{info, warn};

pub mod ndef;

#[derive(Debug, Error)]
pub enum TagError {
    #[error("tag connection failed: {0}")]
    Connect(String),
    #[error("tag write failed: {0}")]
    Write(String),
}

/// Hardware seam: a discovered tag that exposes NDEF.
pub trait NdefTag {
    fn connect(&mut self) -> Result<(), TagError>;
    fn write_message(&mut self, message: &[u8]) -> Result<(), TagError>;
    fn close(&mut self);
}

/// What the operator is told after a discovery; never a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The discovered chip does not expose NDEF at all; nothing was
    /// written.
    Incompatible,
    Failed(String),
}

impl WriteOutcome {
    pub fn notice(&self) -> String {
        match self {
            Self::Written => "NFC badge successfully written.".to_string(),
            Self::Incompatible => {
                "The NFC chip is not compatible with data writing.".to_string()
            }
            Self::Failed(reason) => format!("Error while writing NFC badge: {reason}"),
        }
    }
}

/// Writes the badge record to a discovered tag. `None` models a chip
/// without NDEF support.
pub fn write_badge(tag: Option<&mut dyn NdefTag>, beneficiary: BeneficiaryId) -> WriteOutcome {
    let Some(tag) = tag else {
        return WriteOutcome::Incompatible;
    };
    let message = ndef::badge_message(beneficiary);
    if let Err(err) = tag.connect() {
        warn!(beneficiary = beneficiary.0, "badge write aborted: {err}");
        return WriteOutcome::Failed(err.to_string());
    }
    let outcome = match tag.write_message(&message) {
        Ok(()) => {
            info!(beneficiary = beneficiary.0, "badge written");
            WriteOutcome::Written
        }
        Err(err) => {
            warn!(beneficiary = beneficiary.0, "badge write failed: {err}");
            WriteOutcome::Failed(err.to_string())
        }
    };
    tag.close();
    outcome
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
