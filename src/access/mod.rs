//! Typed accessor layer over a bound register interface.

pub mod field;
pub mod node;
pub mod value;

pub use field::FieldAccess;
pub use node::{AddrmapAccess, RegAccess, RegfileAccess, RegifNode};
pub use value::FieldValue;
