//! Bit-field metadata as emitted by a register map generator.

use std::ops::Range;

use bitflags::bitflags;

use crate::regif::interface::mask_bits;

// Access-direction and behavior flags from the hardware description. The
// runtime only interprets SW_READ/SW_WRITE; the rest is carried through for
// generators and inspection tools.
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldFlags: u16 {
        const SW_READ      = 0b0000_0001;
        const SW_WRITE     = 0b0000_0010;
        const HW_READ      = 0b0000_0100;
        const HW_WRITE     = 0b0000_1000;
        const UP_COUNTER   = 0b0001_0000;
        const DOWN_COUNTER = 0b0010_0000;
        const VOLATILE     = 0b0100_0000;
    }
}

impl FieldFlags {
    /// Full software and hardware access, the default for a declared field.
    pub const RW: FieldFlags = FieldFlags::SW_READ
        .union(FieldFlags::SW_WRITE)
        .union(FieldFlags::HW_READ)
        .union(FieldFlags::HW_WRITE);
}

/// One bit-field within a register.
///
/// Immutable metadata built at code-generation time; the accessor layer
/// consults the software access flags on every read/write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub bit_offset: u32, // LSB position within the register
    pub bit_width: u32,
    pub flags: FieldFlags,
    pub reset: Option<u64>,
}

impl FieldSpec {
    pub fn from_lsb0_range(name: impl Into<String>, lsb0_range: Range<u32>) -> Self {
        debug_assert!(
            lsb0_range.end > lsb0_range.start,
            "field must span at least one bit"
        );
        Self {
            name: name.into(),
            bit_offset: lsb0_range.start,
            bit_width: lsb0_range.end - lsb0_range.start,
            flags: FieldFlags::RW,
            reset: None,
        }
    }

    /// Builds from the `msb`/`lsb` pair a hardware description declares.
    pub fn from_msb_lsb(name: impl Into<String>, msb: u32, lsb: u32) -> Self {
        Self::from_lsb0_range(name, lsb..msb + 1)
    }

    pub fn flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn reset(mut self, value: u64) -> Self {
        self.reset = Some(value);
        self
    }

    #[inline(always)]
    pub fn msb(&self) -> u32 {
        self.bit_offset + self.bit_width - 1
    }

    /// Right-aligned mask covering the field's bits.
    #[inline(always)]
    pub fn mask(&self) -> u64 {
        mask_bits(self.bit_width)
    }

    #[inline(always)]
    pub fn sw_readable(&self) -> bool {
        self.flags.contains(FieldFlags::SW_READ)
    }

    #[inline(always)]
    pub fn sw_writable(&self) -> bool {
        self.flags.contains(FieldFlags::SW_WRITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_lsb_pair_matches_lsb0_range() {
        let a = FieldSpec::from_msb_lsb("data1", 3, 2);
        let b = FieldSpec::from_lsb0_range("data1", 2..4);
        assert_eq!(a, b);
        assert_eq!(a.bit_offset, 2);
        assert_eq!(a.bit_width, 2);
        assert_eq!(a.msb(), 3);
        assert_eq!(a.mask(), 0b11);
    }

    #[test]
    fn declared_fields_default_to_full_access() {
        let field = FieldSpec::from_lsb0_range("ctrl", 0..8);
        assert!(field.sw_readable());
        assert!(field.sw_writable());
        assert!(field.flags.contains(FieldFlags::HW_READ | FieldFlags::HW_WRITE));
        assert_eq!(field.reset, None);
    }

    #[test]
    fn builder_chain_overrides_flags_and_reset() {
        let field = FieldSpec::from_msb_lsb("part_num", 31, 4)
            .flags(FieldFlags::SW_READ | FieldFlags::HW_WRITE)
            .reset(0x25);
        assert!(field.sw_readable());
        assert!(!field.sw_writable());
        assert_eq!(field.reset, Some(0x25));
    }

    #[test]
    fn full_width_field_mask_covers_64_bits() {
        let field = FieldSpec::from_lsb0_range("wide", 0..64);
        assert_eq!(field.mask(), u64::MAX);
        assert_eq!(field.msb(), 63);
    }
}
