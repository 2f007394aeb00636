//! Audio context: object ownership, render suspension, error reporting
//!
//! One `AudioContext` owns the effect-slot and filter registries and the
//! last-error slot. Contexts are the unit of isolation: every registry is
//! per-context state (there are no process-wide tables), and the
//! render-suspension guard serializes client calls with the mixer on that
//! context only.
//!
//! The public surface follows the polled-error model of the wider API:
//! operations return nothing (or the requested value as an `Option`) and
//! record failures in the context's error slot, which callers drain with
//! [`AudioContext::take_error`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::{ErrorSlot, RegistryError};
use crate::objects::{
    EffectSlot, EffectSlotHandle, Filter, FilterHandle, ObjectRegistry,
};
use crate::settings::ContextSettings;

/// Object tables shared between the client API and the render path
#[derive(Debug)]
struct ObjectTables {
    effect_slots: ObjectRegistry<EffectSlot>,
    filters: ObjectRegistry<Filter>,
}

/// Scoped render suspension
///
/// While a `RenderSuspension` is alive the mixer for its context cannot
/// run and no other thread can enter a registry operation on the same
/// context. The guard is released on drop, on every exit path. It doubles
/// as the render path's view of the object tables: handles resolve to
/// records only through it, so a resolved record cannot be destroyed out
/// from under the holder.
pub struct RenderSuspension<'ctx> {
    tables: MutexGuard<'ctx, ObjectTables>,
}

impl RenderSuspension<'_> {
    /// Resolve an effect-slot handle to its record
    pub fn effect_slot(&self, handle: EffectSlotHandle) -> Option<&EffectSlot> {
        self.tables.effect_slots.get(handle)
    }

    /// Resolve a filter handle to its record
    ///
    /// The null filter is implicit and has no record.
    pub fn filter(&self, handle: FilterHandle) -> Option<&Filter> {
        self.tables.filters.get(handle)
    }

    /// Number of live effect slots
    pub fn live_effect_slots(&self) -> usize {
        self.tables.effect_slots.len()
    }

    /// Number of live filters
    pub fn live_filters(&self) -> usize {
        self.tables.filters.len()
    }
}

/// One audio context
pub struct AudioContext {
    tables: Mutex<ObjectTables>,
    last_error: ErrorSlot,
}

impl Default for AudioContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioContext {
    /// Create a context with default settings
    pub fn new() -> Self {
        Self::with_settings(&ContextSettings::default())
    }

    /// Create a context bounded by `settings`
    pub fn with_settings(settings: &ContextSettings) -> Self {
        debug!(
            max_effect_slots = settings.max_effect_slots,
            max_filters = settings.max_filters,
            "audio context created"
        );
        Self {
            tables: Mutex::new(ObjectTables {
                effect_slots: ObjectRegistry::with_capacity(settings.max_effect_slots),
                filters: ObjectRegistry::with_capacity(settings.max_filters),
            }),
            last_error: ErrorSlot::default(),
        }
    }

    /// Suspend rendering on this context for the lifetime of the guard
    ///
    /// Every registry operation below takes this internally. Callers that
    /// need an existence check and a subsequent use to be atomic hold the
    /// guard themselves and resolve through its accessors.
    pub fn suspend_render(&self) -> RenderSuspension<'_> {
        RenderSuspension {
            tables: self.tables.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Return and clear the oldest unreported error
    ///
    /// Operations record their first failure here; later failures are
    /// dropped until the slot is drained. `None` means every call since
    /// the last poll succeeded.
    pub fn take_error(&self) -> Option<RegistryError> {
        self.last_error.take()
    }

    /// Destroy every live object of both kinds
    ///
    /// Shutdown path, also run on drop. Outstanding live objects are
    /// reported as leaks by the registries. Idempotent.
    pub fn shutdown(&self) {
        let mut suspended = self.suspend_render();
        suspended.tables.effect_slots.teardown();
        suspended.tables.filters.teardown();
    }

    fn report(&self, result: Result<(), RegistryError>) {
        if let Err(error) = result {
            self.last_error.record(error);
        }
    }

    fn report_value<V>(&self, result: Result<V, RegistryError>) -> Option<V> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.last_error.record(error);
                None
            }
        }
    }

    // ----- auxiliary effect slots -----

    /// Create `count` effect slots, writing their handles to `out`
    pub fn create_effect_slots(&self, count: usize, out: &mut [EffectSlotHandle]) {
        let result = self.suspend_render().tables.effect_slots.create(count, out);
        self.report(result);
    }

    /// Destroy the first `count` effect slots named by `handles`
    pub fn destroy_effect_slots(&self, count: usize, handles: &[EffectSlotHandle]) {
        let result = self.suspend_render().tables.effect_slots.destroy(count, handles);
        self.report(result);
    }

    /// Whether `handle` names a live effect slot
    pub fn is_effect_slot(&self, handle: EffectSlotHandle) -> bool {
        self.suspend_render().tables.effect_slots.exists(handle)
    }

    /// Write an integer parameter on an effect slot
    pub fn set_effect_slot_int(&self, handle: EffectSlotHandle, param: u32, value: i32) {
        let result = self
            .suspend_render()
            .tables
            .effect_slots
            .set_int(handle, param, value);
        self.report(result);
    }

    /// Write an integer vector parameter on an effect slot
    pub fn set_effect_slot_int_vector(&self, handle: EffectSlotHandle, param: u32, values: &[i32]) {
        let result = self
            .suspend_render()
            .tables
            .effect_slots
            .set_int_vector(handle, param, values);
        self.report(result);
    }

    /// Write a float parameter on an effect slot
    pub fn set_effect_slot_float(&self, handle: EffectSlotHandle, param: u32, value: f32) {
        let result = self
            .suspend_render()
            .tables
            .effect_slots
            .set_float(handle, param, value);
        self.report(result);
    }

    /// Write a float vector parameter on an effect slot
    pub fn set_effect_slot_float_vector(&self, handle: EffectSlotHandle, param: u32, values: &[f32]) {
        let result = self
            .suspend_render()
            .tables
            .effect_slots
            .set_float_vector(handle, param, values);
        self.report(result);
    }

    /// Read an integer parameter from an effect slot
    pub fn get_effect_slot_int(&self, handle: EffectSlotHandle, param: u32) -> Option<i32> {
        let result = self.suspend_render().tables.effect_slots.get_int(handle, param);
        self.report_value(result)
    }

    /// Read an integer vector parameter from an effect slot into `out`
    pub fn get_effect_slot_int_vector(
        &self,
        handle: EffectSlotHandle,
        param: u32,
        out: &mut [i32],
    ) {
        let result = self
            .suspend_render()
            .tables
            .effect_slots
            .get_int_vector(handle, param, out);
        self.report(result);
    }

    /// Read a float parameter from an effect slot
    pub fn get_effect_slot_float(&self, handle: EffectSlotHandle, param: u32) -> Option<f32> {
        let result = self.suspend_render().tables.effect_slots.get_float(handle, param);
        self.report_value(result)
    }

    /// Read a float vector parameter from an effect slot into `out`
    pub fn get_effect_slot_float_vector(
        &self,
        handle: EffectSlotHandle,
        param: u32,
        out: &mut [f32],
    ) {
        let result = self
            .suspend_render()
            .tables
            .effect_slots
            .get_float_vector(handle, param, out);
        self.report(result);
    }

    // ----- signal filters -----

    /// Create `count` filters, writing their handles to `out`
    ///
    /// New filters carry the null (passthrough) type.
    pub fn create_filters(&self, count: usize, out: &mut [FilterHandle]) {
        let result = self.suspend_render().tables.filters.create(count, out);
        self.report(result);
    }

    /// Destroy the first `count` filters named by `handles`
    pub fn destroy_filters(&self, count: usize, handles: &[FilterHandle]) {
        let result = self.suspend_render().tables.filters.destroy(count, handles);
        self.report(result);
    }

    /// Whether `handle` names a live filter
    ///
    /// The null filter handle always does.
    pub fn is_filter(&self, handle: FilterHandle) -> bool {
        self.suspend_render().tables.filters.exists(handle)
    }

    /// Write an integer parameter on a filter
    pub fn set_filter_int(&self, handle: FilterHandle, param: u32, value: i32) {
        let result = self.suspend_render().tables.filters.set_int(handle, param, value);
        self.report(result);
    }

    /// Write an integer vector parameter on a filter
    pub fn set_filter_int_vector(&self, handle: FilterHandle, param: u32, values: &[i32]) {
        let result = self
            .suspend_render()
            .tables
            .filters
            .set_int_vector(handle, param, values);
        self.report(result);
    }

    /// Write a float parameter on a filter
    pub fn set_filter_float(&self, handle: FilterHandle, param: u32, value: f32) {
        let result = self.suspend_render().tables.filters.set_float(handle, param, value);
        self.report(result);
    }

    /// Write a float vector parameter on a filter
    pub fn set_filter_float_vector(&self, handle: FilterHandle, param: u32, values: &[f32]) {
        let result = self
            .suspend_render()
            .tables
            .filters
            .set_float_vector(handle, param, values);
        self.report(result);
    }

    /// Read an integer parameter from a filter
    pub fn get_filter_int(&self, handle: FilterHandle, param: u32) -> Option<i32> {
        let result = self.suspend_render().tables.filters.get_int(handle, param);
        self.report_value(result)
    }

    /// Read an integer vector parameter from a filter into `out`
    pub fn get_filter_int_vector(&self, handle: FilterHandle, param: u32, out: &mut [i32]) {
        let result = self
            .suspend_render()
            .tables
            .filters
            .get_int_vector(handle, param, out);
        self.report(result);
    }

    /// Read a float parameter from a filter
    pub fn get_filter_float(&self, handle: FilterHandle, param: u32) -> Option<f32> {
        let result = self.suspend_render().tables.filters.get_float(handle, param);
        self.report_value(result)
    }

    /// Read a float vector parameter from a filter into `out`
    pub fn get_filter_float_vector(&self, handle: FilterHandle, param: u32, out: &mut [f32]) {
        let result = self
            .suspend_render()
            .tables
            .filters
            .get_float_vector(handle, param, out);
        self.report(result);
    }
}

impl Drop for AudioContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn small_context(max_effect_slots: usize, max_filters: usize) -> AudioContext {
        AudioContext::with_settings(&ContextSettings {
            max_effect_slots,
            max_filters,
        })
    }

    #[test]
    fn test_create_then_exists_round_trip() {
        let context = AudioContext::new();
        let mut slots = [EffectSlotHandle(0); 4];
        context.create_effect_slots(4, &mut slots);
        assert_eq!(context.take_error(), None);
        for handle in slots {
            assert!(context.is_effect_slot(handle));
        }

        let mut filters = [FilterHandle(0); 4];
        context.create_filters(4, &mut filters);
        assert_eq!(context.take_error(), None);
        for handle in filters {
            assert!(context.is_filter(handle));
        }
    }

    #[test]
    fn test_handles_unique_across_batches() {
        let context = AudioContext::new();
        let mut a = [EffectSlotHandle(0); 8];
        let mut b = [EffectSlotHandle(0); 8];
        context.create_effect_slots(8, &mut a);
        context.create_effect_slots(8, &mut b);

        let mut raw: Vec<u32> = a.iter().chain(b.iter()).map(|h| h.0).collect();
        raw.sort_unstable();
        raw.dedup();
        assert_eq!(raw.len(), 16);
        assert_eq!(context.take_error(), None);
    }

    #[test]
    fn test_all_or_nothing_destroy_sets_invalid_name() {
        let context = AudioContext::new();
        let mut slots = [EffectSlotHandle(0); 3];
        context.create_effect_slots(3, &mut slots);

        let batch = [slots[0], EffectSlotHandle(0xBEEF), slots[1]];
        context.destroy_effect_slots(3, &batch);
        assert_eq!(
            context.take_error(),
            Some(RegistryError::InvalidName(0xBEEF))
        );
        for handle in slots {
            assert!(context.is_effect_slot(handle));
        }
    }

    #[test]
    fn test_duplicate_safe_destroy() {
        let context = AudioContext::new();
        let mut slots = [EffectSlotHandle(0); 1];
        context.create_effect_slots(1, &mut slots);

        context.destroy_effect_slots(2, &[slots[0], slots[0]]);
        assert_eq!(context.take_error(), None);
        assert!(!context.is_effect_slot(slots[0]));
    }

    #[test]
    fn test_rollback_on_exhaustion_sets_out_of_memory() {
        let context = small_context(2, 2);
        let mut kept = [EffectSlotHandle(0); 1];
        context.create_effect_slots(1, &mut kept);
        assert_eq!(context.take_error(), None);

        let mut out = [EffectSlotHandle(0); 3];
        context.create_effect_slots(3, &mut out);
        assert_eq!(context.take_error(), Some(RegistryError::OutOfMemory));

        // Only the earlier call's slot survives.
        assert!(context.is_effect_slot(kept[0]));
        assert_eq!(context.suspend_render().live_effect_slots(), 1);
    }

    #[test]
    fn test_short_output_buffer_is_a_hard_error() {
        let context = AudioContext::new();
        let mut out = [FilterHandle(0); 1];
        context.create_filters(2, &mut out);
        assert!(matches!(
            context.take_error(),
            Some(RegistryError::InvalidValue(_))
        ));
        assert_eq!(context.suspend_render().live_filters(), 0);
    }

    #[test]
    fn test_null_filter_invariant_and_slot_asymmetry() {
        let context = AudioContext::new();
        assert!(context.is_filter(FilterHandle::NULL));
        assert!(!context.is_effect_slot(EffectSlotHandle(0)));

        let mut filters = [FilterHandle(0); 2];
        context.create_filters(2, &mut filters);
        context.destroy_filters(2, &filters);
        assert!(context.is_filter(FilterHandle::NULL));
        assert_eq!(context.take_error(), None);
    }

    #[test]
    fn test_unknown_parameter_precedence() {
        let context = AudioContext::new();
        let mut filters = [FilterHandle(0); 1];
        context.create_filters(1, &mut filters);

        // Dead handle: invalid name wins over the unknown parameter.
        context.set_filter_float(FilterHandle(0xF00D), 0x42, 1.0);
        assert_eq!(
            context.take_error(),
            Some(RegistryError::InvalidName(0xF00D))
        );

        // Live handle: the unknown parameter is reported.
        context.set_filter_float(filters[0], 0x42, 1.0);
        assert_eq!(context.take_error(), Some(RegistryError::InvalidEnum(0x42)));

        // Scalar reads return nothing on error.
        assert_eq!(context.get_effect_slot_int(EffectSlotHandle(1), 0x42), None);
        assert_eq!(
            context.take_error(),
            Some(RegistryError::InvalidName(1))
        );
    }

    #[test]
    fn test_vector_reads_leave_output_untouched_on_error() {
        let context = AudioContext::new();
        let mut filters = [FilterHandle(0); 1];
        context.create_filters(1, &mut filters);

        let mut out = [3i32; 2];
        context.get_filter_int_vector(filters[0], 0x9, &mut out);
        assert_eq!(context.take_error(), Some(RegistryError::InvalidEnum(0x9)));
        assert_eq!(out, [3; 2]);
    }

    #[test]
    fn test_error_slot_keeps_first_error() {
        let context = AudioContext::new();
        context.destroy_effect_slots(1, &[EffectSlotHandle(1)]);
        context.set_filter_int(FilterHandle::NULL, 0x1, 0);
        assert_eq!(context.take_error(), Some(RegistryError::InvalidName(1)));
        assert_eq!(context.take_error(), None);
    }

    #[test]
    fn test_shutdown_sweeps_both_kinds_and_is_idempotent() {
        let context = AudioContext::new();
        let mut slots = [EffectSlotHandle(0); 2];
        let mut filters = [FilterHandle(0); 3];
        context.create_effect_slots(2, &mut slots);
        context.create_filters(3, &mut filters);

        context.shutdown();
        {
            let suspended = context.suspend_render();
            assert_eq!(suspended.live_effect_slots(), 0);
            assert_eq!(suspended.live_filters(), 0);
        }
        for handle in slots {
            assert!(!context.is_effect_slot(handle));
        }

        context.shutdown();
        assert_eq!(context.take_error(), None);
    }

    #[test]
    fn test_guard_resolves_records_for_render_path() {
        let context = AudioContext::new();
        let mut filters = [FilterHandle(0); 1];
        context.create_filters(1, &mut filters);

        let suspended = context.suspend_render();
        let record = suspended.filter(filters[0]).unwrap();
        assert_eq!(record.filter_type, crate::objects::FilterType::Null);
        assert!(suspended.filter(FilterHandle::NULL).is_none());
        assert!(suspended.effect_slot(EffectSlotHandle(0)).is_none());
    }

    #[test]
    fn test_concurrent_create_destroy_stays_consistent() {
        let context = Arc::new(small_context(256, 256));
        let mut workers = Vec::new();
        for _ in 0..4 {
            let context = Arc::clone(&context);
            workers.push(thread::spawn(move || {
                for _ in 0..50 {
                    let mut handles = [EffectSlotHandle(0); 4];
                    context.create_effect_slots(4, &mut handles);
                    for handle in handles {
                        assert!(context.is_effect_slot(handle));
                    }
                    context.destroy_effect_slots(4, &handles);
                }
            }));
        }
        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(context.take_error(), None);
        assert_eq!(context.suspend_render().live_effect_slots(), 0);
    }
}
