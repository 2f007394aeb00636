//! Auxiliary effect slot records
//!
//! An effect slot is a mixing destination that sources can route into. In
//! this surface a slot carries no state beyond its registry identity; the
//! parameter dispatch is in place but recognizes no identifier yet, so
//! every get/set reports an unrecognized parameter.

use super::handle::EffectSlotHandle;
use super::traits::AudioObject;
use crate::error::RegistryError;

/// One live auxiliary effect slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectSlot;

impl AudioObject for EffectSlot {
    type Handle = EffectSlotHandle;

    const KIND: &'static str = "effect slot";
    const NULL_HANDLE_IS_VALID: bool = false;

    fn set_int(&mut self, param: u32, _value: i32) -> Result<(), RegistryError> {
        match param {
            _ => Err(RegistryError::InvalidEnum(param)),
        }
    }

    fn set_int_vector(&mut self, param: u32, _values: &[i32]) -> Result<(), RegistryError> {
        match param {
            _ => Err(RegistryError::InvalidEnum(param)),
        }
    }

    fn set_float(&mut self, param: u32, _value: f32) -> Result<(), RegistryError> {
        match param {
            _ => Err(RegistryError::InvalidEnum(param)),
        }
    }

    fn set_float_vector(&mut self, param: u32, _values: &[f32]) -> Result<(), RegistryError> {
        match param {
            _ => Err(RegistryError::InvalidEnum(param)),
        }
    }

    fn get_int(&self, param: u32) -> Result<i32, RegistryError> {
        match param {
            _ => Err(RegistryError::InvalidEnum(param)),
        }
    }

    fn get_int_vector(&self, param: u32, _out: &mut [i32]) -> Result<(), RegistryError> {
        match param {
            _ => Err(RegistryError::InvalidEnum(param)),
        }
    }

    fn get_float(&self, param: u32) -> Result<f32, RegistryError> {
        match param {
            _ => Err(RegistryError::InvalidEnum(param)),
        }
    }

    fn get_float_vector(&self, param: u32, _out: &mut [f32]) -> Result<(), RegistryError> {
        match param {
            _ => Err(RegistryError::InvalidEnum(param)),
        }
    }
}
