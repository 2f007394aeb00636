//! Signal filter records
//!
//! Filters carry a type tag selecting their transfer shape. Every filter is
//! created as `FilterType::Null` (passthrough). Raw handle 0 names the
//! implicit null filter, which always exists and has no backing record.
//! The parameter dispatch is in place but recognizes no identifier yet;
//! type selection and coefficient parameters are dispatched here once the
//! processing surface lands.

use serde::{Deserialize, Serialize};

use super::handle::FilterHandle;
use super::traits::AudioObject;
use crate::error::RegistryError;

/// Filter transfer shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FilterType {
    /// Passthrough; the type every filter carries at creation
    #[default]
    Null,
    /// Attenuates above the transition band
    Lowpass,
    /// Attenuates below the transition band
    Highpass,
    /// Attenuates outside the pass band
    Bandpass,
}

impl FilterType {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterType::Null => "Null",
            FilterType::Lowpass => "Lowpass",
            FilterType::Highpass => "Highpass",
            FilterType::Bandpass => "Bandpass",
        }
    }
}

/// One live signal filter
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Filter {
    /// Current transfer shape
    pub filter_type: FilterType,
}

impl AudioObject for Filter {
    type Handle = FilterHandle;

    const KIND: &'static str = "filter";
    const NULL_HANDLE_IS_VALID: bool = true;

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
