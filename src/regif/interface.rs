//! Register interface abstraction.
//!
//! A backend implements [`RegisterInterface`] by supplying raw
//! `read_register`/`write_register` for whole registers and storing a
//! [`RegIfConfig`]; the provided methods layer address/width/geometry
//! validation and bit-field extraction/merge on top with a consistent
//! [`AccessResult`] error surface. Field-level operations optionally emit
//! one trace record each through the `log` facade.

use std::{
    ops::Range,
    sync::{Arc, Mutex},
};

use log::{info, trace};

use crate::error::{AccessError, AccessResult};

/// Shared handle to a register interface, cloned into every node of a bound
/// accessor tree.
pub type RegIfRef = Arc<Mutex<dyn RegisterInterface>>;

/// Mask covering the low `len` bits.
#[inline]
pub(crate) fn mask_bits(len: u32) -> u64 {
    if len >= 64 {
        u64::MAX
    } else {
        (1u64 << len) - 1
    }
}

/// Field operation direction, used for tracing.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Op {
    Get,
    Set,
}

impl Op {
    fn arrow(self) -> &'static str {
        match self {
            Op::Get => "->",
            Op::Set => "<-",
        }
    }
}

fn trace_field(op: Op, address: u64, bit_offset: u32, bit_width: u32, value: u64) {
    trace!(
        "regif: 0x{:X}[{:2}:{:2}] {} 0x{:X}",
        address,
        bit_offset + bit_width - 1,
        bit_offset,
        op.arrow(),
        value
    );
}

/// Validated construction parameters shared by every concrete backend.
///
/// Immutable after construction except the trace flag.
#[derive(Debug, Clone)]
pub struct RegIfConfig {
    data_width: u32,
    address_bounds: Option<Range<u64>>,
    trace: bool,
}

impl RegIfConfig {
    /// Validates and builds an interface configuration.
    ///
    /// `data_width_bits` must be 1..=64 and divisible by 8. `address_bounds`,
    /// when given, is the inclusive-exclusive range of valid register
    /// addresses; without it addresses are not range-checked.
    pub fn new(data_width_bits: u32, address_bounds: Option<Range<u64>>) -> AccessResult<Self> {
        match &address_bounds {
            Some(bounds) => info!(
                "initializing register interface for region 0x{:X}-0x{:X} with {} bit data width",
                bounds.start, bounds.end, data_width_bits
            ),
            None => info!(
                "initializing register interface with {} bit data width",
                data_width_bits
            ),
        }

        if data_width_bits == 0 || data_width_bits > 64 {
            return Err(AccessError::InvalidConfig {
                reason: format!("unsupported data width {data_width_bits}"),
            });
        }
        if data_width_bits % 8 != 0 {
            return Err(AccessError::InvalidConfig {
                reason: format!("data width {data_width_bits} is not divisible by 8"),
            });
        }
        if let Some(bounds) = &address_bounds {
            if bounds.start > bounds.end {
                return Err(AccessError::InvalidConfig {
                    reason: format!(
                        "address bounds start 0x{:X} exceeds end 0x{:X}",
                        bounds.start, bounds.end
                    ),
                });
            }
        }

        Ok(RegIfConfig {
            data_width: data_width_bits,
            address_bounds,
            trace: false,
        })
    }

    /// Enables or disables field operation tracing at construction.
    pub fn with_tracing(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn data_width(&self) -> u32 {
        self.data_width
    }

    pub fn address_bounds(&self) -> Option<&Range<u64>> {
        self.address_bounds.as_ref()
    }

    pub fn tracing_enabled(&self) -> bool {
        self.trace
    }

    pub fn set_tracing(&mut self, trace: bool) {
        self.trace = trace;
    }
}

/// Backend contract for whole-register access with bit-field helpers layered
/// on top.
///
/// Concrete backends implement the raw `read_register`/`write_register` pair
/// and expose their [`RegIfConfig`]; the provided methods perform all
/// validation, so raw implementations never see an out-of-bounds address or
/// an over-wide value.
pub trait RegisterInterface: Send + Sync {
    fn config(&self) -> &RegIfConfig;
    fn config_mut(&mut self) -> &mut RegIfConfig;

    /// Raw register read at a validated address.
    ///
    /// Reads take `&mut self` since a backend may have side effects on read
    /// (clear-on-read status registers).
    fn read_register(&mut self, address: u64) -> AccessResult<u64>;

    /// Raw register write of a validated value at a validated address.
    fn write_register(&mut self, address: u64, value: u64) -> AccessResult<()>;

    #[inline]
    fn data_width(&self) -> u32 {
        self.config().data_width()
    }

    fn address_bounds(&self) -> Option<&Range<u64>> {
        self.config().address_bounds()
    }

    fn tracing_enabled(&self) -> bool {
        self.config().tracing_enabled()
    }

    fn set_tracing(&mut self, trace: bool) {
        self.config_mut().set_tracing(trace);
    }

    /// Fails with `AddressOutOfRange` if bounds are configured and `address`
    /// falls outside them.
    fn check_address(&self, address: u64) -> AccessResult<()> {
        if let Some(bounds) = self.config().address_bounds() {
            if !bounds.contains(&address) {
                return Err(AccessError::AddressOutOfRange {
                    address,
                    start: bounds.start,
                    end: bounds.end,
                });
            }
        }
        Ok(())
    }

    /// Fails with `ValueOutOfRange` if `value` has a bit set at or above
    /// `width`.
    fn check_value(&self, value: u64, width: u32) -> AccessResult<()> {
        if value & !mask_bits(width) != 0 {
            return Err(AccessError::ValueOutOfRange { value, width });
        }
        Ok(())
    }

    /// Fails with `InvalidGeometry` unless `0 < bit_width` and
    /// `bit_offset + bit_width <= data_width`.
    fn check_geometry(&self, bit_offset: u32, bit_width: u32) -> AccessResult<()> {
        let data_width = self.data_width();
        if bit_width == 0 || bit_width > data_width || bit_offset > data_width - bit_width {
            return Err(AccessError::InvalidGeometry {
                bit_offset,
                bit_width,
                data_width,
            });
        }
        Ok(())
    }

    /// Validated whole-register read.
    fn get(&mut self, address: u64) -> AccessResult<u64> {
        self.check_address(address)?;
        self.read_register(address)
    }

    /// Validated whole-register write.
    fn set(&mut self, address: u64, value: u64) -> AccessResult<()> {
        self.check_address(address)?;
        let data_width = self.data_width();
        self.check_value(value, data_width)?;
        self.write_register(address, value)
    }

    /// Reads the field at `[bit_offset + bit_width - 1 : bit_offset]` of the
    /// register at `address`, right-aligned.
    ///
    /// No side effects beyond the underlying [`get`](Self::get).
    fn get_field(&mut self, address: u64, bit_offset: u32, bit_width: u32) -> AccessResult<u64> {
        self.check_address(address)?;
        self.check_geometry(bit_offset, bit_width)?;
        let value = (self.get(address)? >> bit_offset) & mask_bits(bit_width);
        if self.tracing_enabled() {
            trace_field(Op::Get, address, bit_offset, bit_width, value);
        }
        Ok(value)
    }

    /// Writes `value` into the field at `[bit_offset + bit_width - 1 :
    /// bit_offset]` of the register at `address`.
    ///
    /// With `ignore_other_fields` the register is overwritten with
    /// `value << bit_offset` and every sibling bit becomes zero. Otherwise
    /// the current register content is read back, the target span is masked
    /// out and `value` merged in, preserving all sibling fields.
    ///
    /// The merge is a read then a write, two separate backend calls under
    /// one trait call: concurrent callers on a shared [`RegIfRef`] are
    /// serialized by its lock for the whole call, but if the write fails
    /// after a successful read the register holds whatever state the backend
    /// reports.
    fn set_field(
        &mut self,
        address: u64,
        bit_offset: u32,
        bit_width: u32,
        value: u64,
        ignore_other_fields: bool,
    ) -> AccessResult<()> {
        self.check_address(address)?;
        self.check_geometry(bit_offset, bit_width)?;
        self.check_value(value, bit_width)?;

        let data_width = self.data_width();
        let keep_mask = mask_bits(data_width) ^ (mask_bits(bit_width) << bit_offset);
        let prev = if ignore_other_fields {
            0
        } else {
            self.get_field(address, 0, data_width)? & keep_mask
        };
        if self.tracing_enabled() {
            trace_field(Op::Set, address, bit_offset, bit_width, value);
        }
        self.set(address, prev | (value << bit_offset))
    }

    /// Wraps this interface in a shared handle for binding to an accessor
    /// tree.
    fn into_ref(self) -> RegIfRef
    where
        Self: Sized + 'static,
    {
        Arc::new(Mutex::new(self))
    }
}
