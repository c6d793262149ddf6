//! Backend contract for whole-register access plus the in-memory test
//! backend.

pub mod dummy;
pub mod interface;

pub use dummy::DummyRegIf;
pub use interface::{RegIfConfig, RegIfRef, RegisterInterface};
