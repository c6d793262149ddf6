//! Register, register file and address map metadata.
//!
//! All addresses here are absolute: a generator resolves container-relative
//! offsets while emitting specs, so the runtime never re-resolves anything.
//! Arrayed nodes carry their replication geometry as data and are
//! instantiated once per element with different base addresses.

use smallvec::SmallVec;

use crate::spec::field::FieldFlags;

/// Replication geometry for an arrayed register or register file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArraySpec {
    pub dims: SmallVec<[u32; 2]>,
    pub stride: u64, // bytes between consecutive elements
}

impl ArraySpec {
    pub fn new(dims: impl IntoIterator<Item = u32>, stride: u64) -> Self {
        ArraySpec {
            dims: dims.into_iter().collect(),
            stride,
        }
    }

    /// Total elements across all dimensions.
    pub fn element_count(&self) -> u64 {
        self.dims.iter().map(|&dim| u64::from(dim)).product()
    }

    /// Byte offset of the element at `index` in flattened row-major order.
    #[inline]
    pub fn offset_of(&self, index: u64) -> u64 {
        index * self.stride
    }
}

/// One register instance with its resolved byte address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegSpec {
    pub name: String,
    pub absolute_address: u64,
    pub size: u32, // bytes
    /// OR of the children fields' flags.
    pub flags: FieldFlags,
    pub field_count: u32,
    pub array: Option<ArraySpec>,
}

impl RegSpec {
    pub fn at(name: impl Into<String>, absolute_address: u64, size: u32) -> Self {
        Self {
            name: name.into(),
            absolute_address,
            size,
            flags: FieldFlags::empty(),
            field_count: 0,
            array: None,
        }
    }

    pub fn flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn field_count(mut self, count: u32) -> Self {
        self.field_count = count;
        self
    }

    pub fn array(mut self, array: ArraySpec) -> Self {
        self.array = Some(array);
        self
    }

    #[inline]
    pub fn data_width(&self) -> u32 {
        self.size * 8
    }
}

/// A named group of registers sharing a relative layout, possibly
/// replicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegfileSpec {
    pub name: String,
    pub base_address: u64,
    pub span: u64, // total bytes covered by one element
    pub array: Option<ArraySpec>,
}

impl RegfileSpec {
    pub fn at(name: impl Into<String>, base_address: u64, span: u64) -> Self {
        Self {
            name: name.into(),
            base_address,
            span,
            array: None,
        }
    }

    pub fn array(mut self, array: ArraySpec) -> Self {
        self.array = Some(array);
        self
    }

    pub fn contains(&self, address: u64) -> bool {
        address >= self.base_address && address - self.base_address < self.span
    }
}

/// Root container resolving every nested node to absolute addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddrmapSpec {
    pub name: String,
    pub base_address: u64,
    pub span: u64,
}

impl AddrmapSpec {
    pub fn at(name: impl Into<String>, base_address: u64, span: u64) -> Self {
        Self {
            name: name.into(),
            base_address,
            span,
        }
    }

    pub fn contains(&self, address: u64) -> bool {
        address >= self.base_address && address - self.base_address < self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_offsets_step_by_stride() {
        let array = ArraySpec::new([8], 0x10);
        assert_eq!(array.element_count(), 8);
        assert_eq!(array.offset_of(0), 0);
        assert_eq!(array.offset_of(7), 0x70);
    }

    #[test]
    fn multi_dimension_arrays_flatten_row_major() {
        let array = ArraySpec::new([2, 4], 0x20);
        assert_eq!(array.element_count(), 8);
        assert_eq!(array.offset_of(5), 0xA0);
    }

    #[test]
    fn reg_spec_builder_carries_aggregates() {
        let reg = RegSpec::at("link_status", 0x30, 4)
            .flags(FieldFlags::SW_READ | FieldFlags::HW_WRITE)
            .field_count(2);
        assert_eq!(reg.data_width(), 32);
        assert_eq!(reg.field_count, 2);
        assert!(reg.flags.contains(FieldFlags::SW_READ));
        assert!(reg.array.is_none());
    }

    #[test]
    fn regfile_span_check_is_inclusive_exclusive() {
        let rfile = RegfileSpec::at("fifo", 0x100, 0x10);
        assert!(rfile.contains(0x100));
        assert!(rfile.contains(0x10F));
        assert!(!rfile.contains(0x110));
        assert!(!rfile.contains(0xFF));
    }

    #[test]
    fn addrmap_span_check_is_inclusive_exclusive() {
        let map = AddrmapSpec::at("chip", 0x4000, 0x1000);
        assert!(map.contains(0x4000));
        assert!(map.contains(0x4FFF));
        assert!(!map.contains(0x5000));
        assert!(!map.contains(0x3FFF));
    }
}
