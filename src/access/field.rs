//! Typed accessor for one bit-field.

use std::marker::PhantomData;

use crate::access::FieldValue;
use crate::access::node::RegifNode;
use crate::error::{AccessError, AccessResult};
use crate::regif::RegIfRef;
use crate::spec::FieldSpec;

/// Named accessor bound to a (spec, backend) pair that validates and
/// delegates on each read/write.
///
/// A generated register struct owns one `FieldAccess` per declared field,
/// parameterized by the field's value type (`u64` by default, `bool` or a
/// [`field_enum!`](crate::field_enum) type for encoded fields). Every access
/// checks the declared software direction first, before value coercion, the
/// binding check, or any backend call.
pub struct FieldAccess<T: FieldValue = u64> {
    spec: FieldSpec,
    reg_address: u64,
    regif: Option<RegIfRef>,
    _value: PhantomData<T>,
}

impl<T: FieldValue> FieldAccess<T> {
    /// Builds an accessor for a field of the register at `reg_address`.
    pub fn new(reg_address: u64, spec: FieldSpec) -> Self {
        Self {
            spec,
            reg_address,
            regif: None,
            _value: PhantomData,
        }
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn reg_address(&self) -> u64 {
        self.reg_address
    }

    pub fn is_bound(&self) -> bool {
        self.regif.is_some()
    }

    fn regif(&self) -> AccessResult<&RegIfRef> {
        self.regif.as_ref().ok_or_else(|| AccessError::NotBound {
            node: self.spec.name.clone(),
        })
    }

    fn check_writable(&self) -> AccessResult<()> {
        if !self.spec.sw_writable() {
            return Err(AccessError::NotSwWritable {
                field: self.spec.name.clone(),
            });
        }
        Ok(())
    }

    /// Reads the field and coerces it to the declared value type.
    pub fn read(&self) -> AccessResult<T> {
        if !self.spec.sw_readable() {
            return Err(AccessError::NotSwReadable {
                field: self.spec.name.clone(),
            });
        }
        let mut regif = self.regif()?.lock().unwrap_or_else(|err| err.into_inner());
        let raw = regif.get_field(self.reg_address, self.spec.bit_offset, self.spec.bit_width)?;
        T::from_raw(raw)
    }

    /// Writes a value of the declared type, preserving sibling fields.
    pub fn write(&self, value: T) -> AccessResult<()> {
        self.check_writable()?;
        let mut regif = self.regif()?.lock().unwrap_or_else(|err| err.into_inner());
        regif.set_field(
            self.reg_address,
            self.spec.bit_offset,
            self.spec.bit_width,
            value.to_raw(),
            false,
        )
    }

    /// Writes a raw integer, coercing it to the declared type first.
    ///
    /// Fails with `InvalidEncoding` if `raw` has no counterpart in the
    /// declared type; the writability check still comes before coercion.
    pub fn write_raw(&self, raw: u64) -> AccessResult<()> {
        self.check_writable()?;
        let value = T::from_raw(raw)?;
        let mut regif = self.regif()?.lock().unwrap_or_else(|err| err.into_inner());
        regif.set_field(
            self.reg_address,
            self.spec.bit_offset,
            self.spec.bit_width,
            value.to_raw(),
            false,
        )
    }
}

impl<T: FieldValue> RegifNode for FieldAccess<T> {
    fn bind(&mut self, regif: &RegIfRef) {
        self.regif = Some(regif.clone());
    }
}
