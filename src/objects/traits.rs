//! Trait seam shared by registry-managed object kinds

use super::handle::ObjectHandle;
use crate::error::RegistryError;

/// A registry-managed object kind
///
/// One implementation per resource kind. `Default` supplies the
/// zero-initialized record written by batch creation. The parameter methods
/// are the per-kind dispatch tables: each is an explicit match over the raw
/// parameter code, and new parameters are added as match arms. No code is
/// recognized for any kind today, so every dispatch reports an
/// unrecognized parameter.
pub trait AudioObject: Default {
    /// Typed handle for this kind
    type Handle: ObjectHandle;

    /// Kind label used in diagnostics and leak reports
    const KIND: &'static str;

    /// Whether raw handle 0 passes the existence check for this kind
    ///
    /// True only for filters, where 0 names the implicit null filter.
    const NULL_HANDLE_IS_VALID: bool;

    /// Write an integer parameter
    fn set_int(&mut self, param: u32, value: i32) -> Result<(), RegistryError>;

    /// Write an integer vector parameter
    fn set_int_vector(&mut self, param: u32, values: &[i32]) -> Result<(), RegistryError>;

    /// Write a float parameter
    fn set_float(&mut self, param: u32, value: f32) -> Result<(), RegistryError>;

    /// Write a float vector parameter
    fn set_float_vector(&mut self, param: u32, values: &[f32]) -> Result<(), RegistryError>;

    /// Read an integer parameter
    fn get_int(&self, param: u32) -> Result<i32, RegistryError>;

    /// Read an integer vector parameter into `out`
    fn get_int_vector(&self, param: u32, out: &mut [i32]) -> Result<(), RegistryError>;

    /// Read a float parameter
    fn get_float(&self, param: u32) -> Result<f32, RegistryError>;

    /// Read a float vector parameter into `out`
    fn get_float_vector(&self, param: u32, out: &mut [f32]) -> Result<(), RegistryError>;
}
