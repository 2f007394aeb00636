//! Registry-managed audio objects
//!
//! One generic lifecycle, instantiated once per managed kind (auxiliary
//! effect slots and signal filters). Clients only ever hold opaque integer
//! handles; records live in per-kind arenas owned by the context.
//!
//! # Architecture
//!
//! - **Handles** (`handle.rs`): raw `u32` encoding (slot index +
//!   generation) and the typed per-kind newtypes
//! - **Arena** (`arena.rs`): bounded slot store; doubles as the handle
//!   indirection, so registry and resolution state cannot diverge
//! - **Trait** (`traits.rs`): the `AudioObject` seam a kind implements:
//!   defaults, null-handle rule, parameter dispatch
//! - **Registry** (`registry.rs`): batch create/destroy, existence check,
//!   parameter entry points, teardown sweep
//! - **Kinds** (`effect_slot.rs`, `filter.rs`): the two record types

mod arena;
mod effect_slot;
mod filter;
mod handle;
mod registry;
mod traits;

pub use arena::HandleArena;
pub use effect_slot::EffectSlot;
pub use filter::{Filter, FilterType};
pub use handle::{EffectSlotHandle, FilterHandle, ObjectHandle, RawHandle, MAX_OBJECTS};
pub use registry::ObjectRegistry;
pub use traits::AudioObject;
