//! Runtime access layer for memory-mapped hardware register maps.
//!
//! A register map generator emits one accessor tree per chip: structs of
//! [`FieldAccess`] members plus the [`spec`] metadata describing every
//! field, register, register file and address map. Binding the tree root to
//! a [`RegisterInterface`] backend (real bus or the in-memory
//! [`DummyRegIf`]) makes every named field readable and writable with
//! software-direction checks, bit-level merges that preserve sibling
//! fields, value coercion to declared types, and optional per-access
//! tracing through the `log` facade.

pub mod access;
pub mod error;
pub mod regif;
pub mod spec;

pub use access::{AddrmapAccess, FieldAccess, FieldValue, RegAccess, RegfileAccess, RegifNode};
pub use error::{AccessError, AccessResult};
pub use regif::{DummyRegIf, RegIfConfig, RegIfRef, RegisterInterface};
pub use spec::{AddrmapSpec, ArraySpec, FieldFlags, FieldSpec, RegSpec, RegfileSpec};
