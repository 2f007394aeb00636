//! Generic object registry: batch lifecycle over one object kind
//!
//! One registry instance exists per kind per context. The registry is plain
//! data; the owning context serializes access by holding the
//! render-suspension guard around every call, reads included.
//!
//! Batch semantics:
//! - creation appends default-initialized records and is rolled back in
//!   full if capacity runs out partway through a call
//! - destruction validates the whole batch before touching anything, then
//!   re-validates each handle at removal time so duplicate handles within
//!   one batch are destroyed once and skipped after

use tracing::{debug, warn};

use super::arena::HandleArena;
use super::handle::ObjectHandle;
use super::traits::AudioObject;
use crate::error::RegistryError;

/// Registry of live objects of one kind
#[derive(Debug)]
pub struct ObjectRegistry<T: AudioObject> {
    arena: HandleArena<T>,
}

impl<T: AudioObject> ObjectRegistry<T> {
    /// Create a registry bounded to `capacity` simultaneously live objects
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: HandleArena::with_capacity(capacity),
        }
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether no objects are live
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Whether `handle` names a live object of this kind
    pub fn exists(&self, handle: T::Handle) -> bool {
        (T::NULL_HANDLE_IS_VALID && handle.raw() == 0) || self.arena.contains(handle.raw())
    }

    /// Resolve a handle to its record
    ///
    /// The implicit null object of a kind has no record.
    pub fn get(&self, handle: T::Handle) -> Option<&T> {
        self.arena.get(handle.raw())
    }

    /// Iterate live objects with their handles
    pub fn iter(&self) -> impl Iterator<Item = (T::Handle, &T)> {
        self.arena
            .iter()
            .map(|(raw, record)| (T::Handle::from_raw(raw), record))
    }

    /// Batch-create `count` objects, writing their handles to `out` in
    /// creation order
    ///
    /// `count == 0` is a no-op. An output buffer shorter than `count` is
    /// rejected before anything is created. If capacity runs out at the
    /// i-th object, the i objects already created by this call are
    /// destroyed again and `out` contents are unspecified; objects from
    /// earlier calls are unaffected.
    pub fn create(&mut self, count: usize, out: &mut [T::Handle]) -> Result<(), RegistryError> {
        if count == 0 {
            return Ok(());
        }
        if out.len() < count {
            return Err(RegistryError::InvalidValue(
                "output buffer shorter than requested count",
            ));
        }
        for i in 0..count {
            match self.arena.insert(T::default()) {
                Ok(raw) => out[i] = T::Handle::from_raw(raw),
                Err(error) => {
                    let rollback = self.destroy(i, out);
                    debug_assert!(rollback.is_ok());
                    return Err(error);
                }
            }
        }
        debug!(kind = T::KIND, count, live = self.arena.len(), "created objects");
        Ok(())
    }

    /// Batch-destroy the first `count` objects named by `handles`
    ///
    /// A handle buffer shorter than `count` is rejected. Validation is
    /// all-or-nothing: one dead handle anywhere in the batch and nothing
    /// is destroyed. A validated batch may name the same handle more than
    /// once; the duplicates are skipped once the first occurrence is gone.
    pub fn destroy(&mut self, count: usize, handles: &[T::Handle]) -> Result<(), RegistryError> {
        if handles.len() < count {
            return Err(RegistryError::InvalidValue(
                "handle buffer shorter than declared count",
            ));
        }
        for handle in &handles[..count] {
            if !self.exists(*handle) {
                return Err(RegistryError::InvalidName(handle.raw()));
            }
        }
        for handle in &handles[..count] {
            // Re-resolve at removal time; duplicates and the implicit null
            // object fall out here as records that are already gone.
            self.arena.remove(handle.raw());
        }
        debug!(kind = T::KIND, count, live = self.arena.len(), "destroyed objects");
        Ok(())
    }

    /// Destroy every live object unconditionally
    ///
    /// Shutdown path only: validation is bypassed, ownership is absolute.
    /// A nonzero live count here means client code leaked objects; that is
    /// reported, not failed. Returns the leaked count.
    pub fn teardown(&mut self) -> usize {
        let leaked = self.arena.clear();
        if leaked > 0 {
            warn!(kind = T::KIND, leaked, "objects still live at teardown");
        }
        leaked
    }

    /// Write an integer parameter on `handle`
    pub fn set_int(&mut self, handle: T::Handle, param: u32, value: i32) -> Result<(), RegistryError> {
        if !self.exists(handle) {
            return Err(RegistryError::InvalidName(handle.raw()));
        }
        match self.arena.get_mut(handle.raw()) {
            Some(object) => object.set_int(param, value),
            // only the implicit null object reaches here; no record backs it
            None => T::default().set_int(param, value),
        }
    }

    /// Write an integer vector parameter on `handle`
    pub fn set_int_vector(
        &mut self,
        handle: T::Handle,
        param: u32,
        values: &[i32],
    ) -> Result<(), RegistryError> {
        if !self.exists(handle) {
            return Err(RegistryError::InvalidName(handle.raw()));
        }
        match self.arena.get_mut(handle.raw()) {
            Some(object) => object.set_int_vector(param, values),
            None => T::default().set_int_vector(param, values),
        }
    }

    /// Write a float parameter on `handle`
    pub fn set_float(&mut self, handle: T::Handle, param: u32, value: f32) -> Result<(), RegistryError> {
        if !self.exists(handle) {
            return Err(RegistryError::InvalidName(handle.raw()));
        }
        match self.arena.get_mut(handle.raw()) {
            Some(object) => object.set_float(param, value),
            None => T::default().set_float(param, value),
        }
    }

    /// Write a float vector parameter on `handle`
    pub fn set_float_vector(
        &mut self,
        handle: T::Handle,
        param: u32,
        values: &[f32],
    ) -> Result<(), RegistryError> {
        if !self.exists(handle) {
            return Err(RegistryError::InvalidName(handle.raw()));
        }
        match self.arena.get_mut(handle.raw()) {
            Some(object) => object.set_float_vector(param, values),
            None => T::default().set_float_vector(param, values),
        }
    }

    /// Read an integer parameter from `handle`
    pub fn get_int(&self, handle: T::Handle, param: u32) -> Result<i32, RegistryError> {
        if !self.exists(handle) {
            return Err(RegistryError::InvalidName(handle.raw()));
        }
        match self.arena.get(handle.raw()) {
            Some(object) => object.get_int(param),
            None => T::default().get_int(param),
        }
    }

    /// Read an integer vector parameter from `handle` into `out`
    pub fn get_int_vector(
        &self,
        handle: T::Handle,
        param: u32,
        out: &mut [i32],
    ) -> Result<(), RegistryError> {
        if !self.exists(handle) {
            return Err(RegistryError::InvalidName(handle.raw()));
        }
        match self.arena.get(handle.raw()) {
            Some(object) => object.get_int_vector(param, out),
            None => T::default().get_int_vector(param, out),
        }
    }

    /// Read a float parameter from `handle`
    pub fn get_float(&self, handle: T::Handle, param: u32) -> Result<f32, RegistryError> {
        if !self.exists(handle) {
            return Err(RegistryError::InvalidName(handle.raw()));
        }
        match self.arena.get(handle.raw()) {
            Some(object) => object.get_float(param),
            None => T::default().get_float(param),
        }
    }

    /// Read a float vector parameter from `handle` into `out`
    pub fn get_float_vector(
        &self,
        handle: T::Handle,
        param: u32,
        out: &mut [f32],
    ) -> Result<(), RegistryError> {
        if !self.exists(handle) {
            return Err(RegistryError::InvalidName(handle.raw()));
        }
        match self.arena.get(handle.raw()) {
            Some(object) => object.get_float_vector(param, out),
            None => T::default().get_float_vector(param, out),
        }
    }
}
