//! In-memory register interface for tests and dry runs.

use ahash::AHashMap;

use crate::error::{AccessError, AccessResult};
use crate::regif::interface::{RegIfConfig, RegisterInterface, mask_bits};

/// Register interface backed by a sparse in-memory store.
///
/// Every address not yet written reads back as the configured fill value, so
/// an accessor tree can run against it without any hardware. Validation and
/// tracing come from the [`RegisterInterface`] provided methods.
#[derive(Debug)]
pub struct DummyRegIf {
    config: RegIfConfig,
    store: AHashMap<u64, u64>,
    fill: u64,
}

impl DummyRegIf {
    /// Builds a dummy backend over `config` with `fill` as the content of
    /// unwritten addresses.
    ///
    /// Fails with `InvalidConfig` if `fill` does not fit the configured data
    /// width, so reads can never produce an over-wide value.
    pub fn new(config: RegIfConfig, fill: u64) -> AccessResult<Self> {
        if fill & !mask_bits(config.data_width()) != 0 {
            return Err(AccessError::InvalidConfig {
                reason: format!(
                    "fill value 0x{fill:X} wider than {} bit data width",
                    config.data_width()
                ),
            });
        }
        Ok(DummyRegIf {
            config,
            store: AHashMap::new(),
            fill,
        })
    }

    /// Number of addresses that have been written at least once.
    pub fn written_len(&self) -> usize {
        self.store.len()
    }
}

impl RegisterInterface for DummyRegIf {
    fn config(&self) -> &RegIfConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut RegIfConfig {
        &mut self.config
    }

    fn read_register(&mut self, address: u64) -> AccessResult<u64> {
        Ok(self.store.get(&address).copied().unwrap_or(self.fill))
    }

    fn write_register(&mut self, address: u64, value: u64) -> AccessResult<()> {
        self.store.insert(address, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(width: u32, fill: u64) -> DummyRegIf {
        let config = RegIfConfig::new(width, Some(0..0x1000)).expect("valid config");
        DummyRegIf::new(config, fill).expect("valid fill")
    }

    #[test]
    fn unwritten_address_reads_back_fill() {
        let mut regif = dummy(32, 0xCAFE);
        assert_eq!(regif.get(0x40).expect("in bounds"), 0xCAFE);
        assert_eq!(regif.written_len(), 0, "reads must not populate the store");
    }

    #[test]
    fn written_value_shadows_fill() {
        let mut regif = dummy(32, 0xCAFE);
        regif.set(0x40, 0x1234).expect("write");
        assert_eq!(regif.get(0x40).expect("read"), 0x1234);
        assert_eq!(regif.get(0x44).expect("other address keeps fill"), 0xCAFE);
    }

    #[test]
    fn fill_wider_than_data_width_is_rejected() {
        let config = RegIfConfig::new(8, None).expect("valid config");
        let err = DummyRegIf::new(config, 0x100).unwrap_err();
        assert!(matches!(err, AccessError::InvalidConfig { .. }));
    }

    #[test]
    fn bounds_apply_to_dummy_access() {
        let mut regif = dummy(32, 0);
        assert!(matches!(
            regif.get(0x1000),
            Err(AccessError::AddressOutOfRange { .. })
        ));
        assert_eq!(regif.get(0).expect("lower bound is inclusive"), 0);
    }

    #[test]
    fn field_operations_work_against_the_store() {
        let mut regif = dummy(32, 0);
        regif.set_field(0x10, 2, 2, 0b10, false).expect("write field");
        assert_eq!(regif.get_field(0x10, 2, 2).expect("read field"), 0b10);
        assert_eq!(regif.get(0x10).expect("raw"), 0b1000);
    }
}
