//! Immersive Audio object registry
//!
//! The opaque-handle object layer of the immersive audio engine: clients
//! receive small integer handles for auxiliary effect slots and signal
//! filters instead of pointers into engine memory. Handles stay unique
//! among live objects of a kind, go permanently stale on destruction, and
//! are safe to use from multiple threads sharing one [`AudioContext`].
//!
//! Batch operations are atomic with respect to validation: a destruction
//! batch happens entirely or not at all, and a creation batch that runs
//! out of capacity rolls back everything it had produced. Failures are
//! reported through a per-context last-error slot polled with
//! [`AudioContext::take_error`], matching the polled-error model of the
//! surrounding API; no operation panics or unwinds into the caller.

pub mod context;
pub mod error;
pub mod objects;
pub mod settings;
pub mod telemetry;

pub use context::{AudioContext, RenderSuspension};
pub use error::RegistryError;
pub use objects::{
    EffectSlot, EffectSlotHandle, Filter, FilterHandle, FilterType, ObjectRegistry, RawHandle,
};
pub use settings::{ContextSettings, SettingsError};
