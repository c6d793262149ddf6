//! Conversion between raw register bits and a field's declared value type.

use crate::error::{AccessError, AccessResult};

/// Value type a field accessor coerces to and from.
///
/// Implemented by the unsigned integers, `bool` and every enumerated
/// encoding declared through [`field_enum!`](crate::field_enum). `from_raw`
/// rejects any raw pattern the type cannot represent, so a successful field
/// read always yields a meaningful value.
pub trait FieldValue: Copy {
    fn to_raw(self) -> u64;
    fn from_raw(raw: u64) -> AccessResult<Self>;
}

macro_rules! impl_field_value {
    ($t:ty) => {
        impl FieldValue for $t {
            #[inline(always)]
            fn to_raw(self) -> u64 {
                self as u64
            }

            #[inline(always)]
            fn from_raw(raw: u64) -> AccessResult<Self> {
                <$t>::try_from(raw).map_err(|_| AccessError::InvalidEncoding {
                    raw,
                    type_name: stringify!($t),
                })
            }
        }
    };
}

impl_field_value!(u8);
impl_field_value!(u16);
impl_field_value!(u32);
impl_field_value!(u64);

impl FieldValue for bool {
    #[inline(always)]
    fn to_raw(self) -> u64 {
        self as u64
    }

    #[inline(always)]
    fn from_raw(raw: u64) -> AccessResult<Self> {
        match raw {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(AccessError::InvalidEncoding {
                raw,
                type_name: "bool",
            }),
        }
    }
}

/// Declares an enumerated field encoding with explicit discriminants and its
/// [`FieldValue`] impl, the shape a register map generator emits for encoded
/// fields.
///
/// Discriminants may be sparse:
///
/// ```
/// regmap::field_enum! {
///     pub enum LinkStatus {
///         Down = 0,
///         Negotiating = 1,
///         Up = 5,
///     }
/// }
/// ```
#[macro_export]
macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u64)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant = $value, )+
        }

        impl $crate::access::FieldValue for $name {
            #[inline(always)]
            fn to_raw(self) -> u64 {
                self as u64
            }

            fn from_raw(raw: u64) -> $crate::error::AccessResult<Self> {
                match raw {
                    $( v if v == $value => Ok($name::$variant), )+
                    _ => Err($crate::error::AccessError::InvalidEncoding {
                        raw,
                        type_name: stringify!($name),
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    field_enum! {
        enum LinkStatus {
            Down = 0,
            Negotiating = 1,
            Up = 5,
            Fault = 10,
        }
    }

    #[test]
    fn integers_narrow_with_encoding_check() {
        assert_eq!(u8::from_raw(0xFF).expect("fits"), 0xFF);
        assert!(matches!(
            u8::from_raw(0x100),
            Err(AccessError::InvalidEncoding { raw: 0x100, .. })
        ));
        assert_eq!(u64::from_raw(u64::MAX).expect("identity"), u64::MAX);
    }

    #[test]
    fn bool_accepts_only_zero_and_one() {
        assert!(!bool::from_raw(0).expect("zero is false"));
        assert!(bool::from_raw(1).expect("one is true"));
        assert!(matches!(
            bool::from_raw(2),
            Err(AccessError::InvalidEncoding { .. })
        ));
        assert_eq!(true.to_raw(), 1);
    }

    #[test]
    fn sparse_enum_round_trips_defined_values() {
        assert_eq!(LinkStatus::from_raw(5).expect("defined"), LinkStatus::Up);
        assert_eq!(LinkStatus::Fault.to_raw(), 10);
    }

    #[test]
    fn undefined_discriminant_reports_the_type_name() {
        let err = LinkStatus::from_raw(3).unwrap_err();
        match err {
            AccessError::InvalidEncoding { raw, type_name } => {
                assert_eq!(raw, 3);
                assert_eq!(type_name, "LinkStatus");
            }
            other => panic!("expected InvalidEncoding, got {other:?}"),
        }
    }
}
