//! Error taxonomy and the per-context last-error slot
//!
//! Registry operations never panic and never unwind into the caller. Each
//! failure is recorded in the owning context's error slot; callers poll it
//! with `AudioContext::take_error` after any call. The slot keeps the first
//! unpolled error and drops later ones until it is cleared.

use std::sync::Mutex;

use thiserror::Error;

/// Errors produced by object registry operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Handle does not name a live object of the expected kind
    #[error("handle {0} does not name a live object")]
    InvalidName(u32),

    /// Structural argument outside the accepted domain
    #[error("invalid argument: {0}")]
    InvalidValue(&'static str),

    /// Parameter identifier not recognized by the dispatch table
    #[error("unrecognized parameter 0x{0:04x}")]
    InvalidEnum(u32),

    /// Object allocation failed (capacity exhausted)
    #[error("object capacity exhausted")]
    OutOfMemory,
}

/// First-error-sticky slot, polled and cleared by the caller
#[derive(Debug, Default)]
pub(crate) struct ErrorSlot {
    current: Mutex<Option<RegistryError>>,
}

impl ErrorSlot {
    /// Record an error unless one is already pending
    pub fn record(&self, error: RegistryError) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if current.is_none() {
            tracing::debug!(%error, "registry error recorded");
            *current = Some(error);
        }
    }

    /// Return the pending error, if any, clearing the slot
    pub fn take(&self) -> Option<RegistryError> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}
