//! Accessor tree nodes and backend binding.

use crate::error::{AccessError, AccessResult};
use crate::regif::RegIfRef;
use crate::spec::{AddrmapSpec, RegSpec, RegfileSpec};

/// Node of a generated accessor tree that can receive the shared backend
/// handle.
///
/// Binding is an explicit walk: a generated container binds its own node and
/// then every accessor-typed member, so one call on the tree root reaches
/// every descendant. Binding is idempotent and re-binding to another
/// interface re-propagates the new handle through the whole tree.
pub trait RegifNode {
    fn bind(&mut self, regif: &RegIfRef);
}

/// Whole-register accessor embedded in every generated register struct.
///
/// Software access direction is a per-field rule enforced by the field
/// accessors; raw register access here is deliberately unfiltered and only
/// subject to the interface's address and width validation.
pub struct RegAccess {
    spec: RegSpec,
    regif: Option<RegIfRef>,
}

impl RegAccess {
    pub fn new(spec: RegSpec) -> Self {
        Self { spec, regif: None }
    }

    pub fn spec(&self) -> &RegSpec {
        &self.spec
    }

    pub fn is_bound(&self) -> bool {
        self.regif.is_some()
    }

    fn regif(&self) -> AccessResult<&RegIfRef> {
        self.regif.as_ref().ok_or_else(|| AccessError::NotBound {
            node: self.spec.name.clone(),
        })
    }

    /// Reads the whole register at the spec's absolute address.
    pub fn read_raw(&self) -> AccessResult<u64> {
        let mut regif = self.regif()?.lock().unwrap_or_else(|err| err.into_inner());
        regif.get(self.spec.absolute_address)
    }

    /// Overwrites the whole register at the spec's absolute address.
    pub fn write_raw(&self, value: u64) -> AccessResult<()> {
        let mut regif = self.regif()?.lock().unwrap_or_else(|err| err.into_inner());
        regif.set(self.spec.absolute_address, value)
    }
}

impl RegifNode for RegAccess {
    fn bind(&mut self, regif: &RegIfRef) {
        self.regif = Some(regif.clone());
    }
}

/// Accessor node for a register file sub-tree.
pub struct RegfileAccess {
    spec: RegfileSpec,
    regif: Option<RegIfRef>,
}

impl RegfileAccess {
    pub fn new(spec: RegfileSpec) -> Self {
        Self { spec, regif: None }
    }

    pub fn spec(&self) -> &RegfileSpec {
        &self.spec
    }

    pub fn is_bound(&self) -> bool {
        self.regif.is_some()
    }
}

impl RegifNode for RegfileAccess {
    fn bind(&mut self, regif: &RegIfRef) {
        self.regif = Some(regif.clone());
    }
}

/// Accessor node for the address map root.
pub struct AddrmapAccess {
    spec: AddrmapSpec,
    regif: Option<RegIfRef>,
}

impl AddrmapAccess {
    pub fn new(spec: AddrmapSpec) -> Self {
        Self { spec, regif: None }
    }

    pub fn spec(&self) -> &AddrmapSpec {
        &self.spec
    }

    pub fn is_bound(&self) -> bool {
        self.regif.is_some()
    }
}

impl RegifNode for AddrmapAccess {
    fn bind(&mut self, regif: &RegIfRef) {
        self.regif = Some(regif.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regif::{DummyRegIf, RegIfConfig, RegisterInterface};

    fn dummy_ref() -> RegIfRef {
        let config = RegIfConfig::new(32, Some(0..0x1000)).expect("valid config");
        DummyRegIf::new(config, 0).expect("valid fill").into_ref()
    }

    #[test]
    fn unbound_register_access_fails_with_not_bound() {
        let reg = RegAccess::new(RegSpec::at("ctrl", 0x10, 4));
        assert!(matches!(
            reg.read_raw(),
            Err(AccessError::NotBound { .. })
        ));
        assert!(matches!(
            reg.write_raw(1),
            Err(AccessError::NotBound { .. })
        ));
    }

    #[test]
    fn bound_register_round_trips_raw_values() {
        let mut reg = RegAccess::new(RegSpec::at("ctrl", 0x10, 4));
        let regif = dummy_ref();
        reg.bind(&regif);
        reg.write_raw(0xDEAD_BEEF).expect("raw write");
        assert_eq!(reg.read_raw().expect("raw read"), 0xDEAD_BEEF);
    }

    #[test]
    fn raw_access_still_validates_through_the_interface() {
        let mut reg = RegAccess::new(RegSpec::at("beyond", 0x1000, 4));
        reg.bind(&dummy_ref());
        assert!(matches!(
            reg.read_raw(),
            Err(AccessError::AddressOutOfRange { .. })
        ));
    }

    #[test]
    fn container_nodes_track_their_binding() {
        let mut rfile = RegfileAccess::new(RegfileSpec::at("fifo", 0x100, 0x10));
        let mut map = AddrmapAccess::new(AddrmapSpec::at("chip", 0, 0x1000));
        assert!(!rfile.is_bound());
        assert!(!map.is_bound());

        let regif = dummy_ref();
        rfile.bind(&regif);
        map.bind(&regif);
        assert!(rfile.is_bound());
        assert!(map.is_bound());
    }
}
