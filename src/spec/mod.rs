//! Immutable register map metadata, the contract between a code generator
//! and the accessor runtime.

pub mod field;
pub mod node;

pub use field::{FieldFlags, FieldSpec};
pub use node::{AddrmapSpec, ArraySpec, RegSpec, RegfileSpec};
