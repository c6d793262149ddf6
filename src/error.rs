//! Error taxonomy shared by the register interface and the typed accessor
//! layer.
//!
//! Every failure is synchronous and surfaced to the immediate caller. The
//! validation variants describe programming errors (bad configuration, bad
//! geometry, access against the declared direction) and are never retried
//! internally; [`AccessError::Backend`] carries a concrete backend's own
//! fault unmodified so the caller can apply its domain's retry policy.

use std::{error::Error, fmt};

pub type AccessResult<T> = Result<T, AccessError>;

#[derive(Debug)]
pub enum AccessError {
    /// Register interface construction parameters were malformed.
    InvalidConfig {
        reason: String,
    },
    /// Address falls outside the configured bounds.
    AddressOutOfRange {
        address: u64,
        start: u64,
        end: u64,
    },
    /// Value does not fit in the target register or field width.
    ValueOutOfRange {
        value: u64,
        width: u32,
    },
    /// Field offset/width inconsistent with the register data width.
    InvalidGeometry {
        bit_offset: u32,
        bit_width: u32,
        data_width: u32,
    },
    /// Read attempted on a field whose spec is not software readable.
    NotSwReadable {
        field: String,
    },
    /// Write attempted on a field whose spec is not software writable.
    NotSwWritable {
        field: String,
    },
    /// Raw integer has no counterpart in the field's declared value type.
    InvalidEncoding {
        raw: u64,
        type_name: &'static str,
    },
    /// Accessor used before a register interface was bound to its tree.
    NotBound {
        node: String,
    },
    /// Concrete backend failed to complete a physical read or write.
    Backend {
        source: Box<dyn Error + Send + Sync>,
    },
}

impl AccessError {
    /// Wraps a concrete backend's fault for passthrough to the caller.
    pub fn backend(source: impl Error + Send + Sync + 'static) -> Self {
        AccessError::Backend {
            source: Box::new(source),
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::InvalidConfig { reason } => {
                write!(f, "invalid register interface configuration: {reason}")
            }
            AccessError::AddressOutOfRange {
                address,
                start,
                end,
            } => write!(
                f,
                "address 0x{address:X} outside configured bounds 0x{start:X}..0x{end:X}"
            ),
            AccessError::ValueOutOfRange { value, width } => {
                write!(f, "value 0x{value:X} does not fit in {width} bits")
            }
            AccessError::InvalidGeometry {
                bit_offset,
                bit_width,
                data_width,
            } => write!(
                f,
                "field span [{bit_offset}+{bit_width}] exceeds {data_width}-bit register"
            ),
            AccessError::NotSwReadable { field } => {
                write!(f, "field '{field}' is not software readable")
            }
            AccessError::NotSwWritable { field } => {
                write!(f, "field '{field}' is not software writable")
            }
            AccessError::InvalidEncoding { raw, type_name } => {
                write!(f, "value 0x{raw:X} has no encoding in {type_name}")
            }
            AccessError::NotBound { node } => {
                write!(f, "'{node}' accessed before a register interface was bound")
            }
            AccessError::Backend { .. } => write!(f, "backend register access failed"),
        }
    }
}

impl Error for AccessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AccessError::Backend { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}
