//! Typed scan destinations.
//!
//! A [`Target`] borrows caller-owned storage mutably and records which type
//! the submitted value must be converted to.

use crate::ConversionError;
use std::fmt;

const BOOL_TRUE: &str = "on";
const BOOL_FALSE: &str = "off";

/// Type a [`Target`] converts values into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `usize`
    Usize,
    /// `bool`
    Bool,
    /// `String`
    String,
}

impl TargetKind {
    /// Returns true for the unsigned integer kinds.
    #[must_use]
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize
        )
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::Isize => "int",
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::Usize => "uint",
            Self::Bool => "bool",
            Self::String => "string",
        };
        write!(f, "{name}")
    }
}

/// Mutable destination for a scanned value.
///
/// Every supported variant borrows the caller's storage. `From` impls exist
/// for `&mut` references to each supported type, so a destination is usually
/// written as `&mut value`.
///
/// [`Target::Unsupported`] stands in for destinations whose type is only known
/// at runtime (e.g. bindings from a dynamic layer). Scanning into it always
/// fails with [`ScanErrorKind::IncompatibleType`](crate::ScanErrorKind).
///
/// # Example
///
/// ```rust
/// use formscan::{Target, TargetKind};
///
/// let mut age: u8 = 0;
/// let target = Target::from(&mut age);
/// assert_eq!(target.kind(), Some(TargetKind::U8));
///
/// let unknown = Target::Unsupported("chrono::NaiveDate");
/// assert_eq!(unknown.kind(), None);
/// ```
#[derive(Debug)]
pub enum Target<'a> {
    /// `i8` destination.
    I8(&'a mut i8),
    /// `i16` destination.
    I16(&'a mut i16),
    /// `i32` destination.
    I32(&'a mut i32),
    /// `i64` destination.
    I64(&'a mut i64),
    /// `isize` destination.
    Isize(&'a mut isize),
    /// `u8` destination.
    U8(&'a mut u8),
    /// `u16` destination.
    U16(&'a mut u16),
    /// `u32` destination.
    U32(&'a mut u32),
    /// `u64` destination.
    U64(&'a mut u64),
    /// `usize` destination.
    Usize(&'a mut usize),
    /// `bool` destination, accepting `on` and `off`.
    Bool(&'a mut bool),
    /// `String` destination, accepting any value verbatim.
    Str(&'a mut String),
    /// Destination of a type the scanner cannot handle, named for diagnostics.
    Unsupported(&'static str),
}

impl<'a> Target<'a> {
    /// Returns the destination type, or `None` for [`Target::Unsupported`].
    #[must_use]
    pub fn kind(&self) -> Option<TargetKind> {
        let kind = match self {
            Self::I8(_) => TargetKind::I8,
            Self::I16(_) => TargetKind::I16,
            Self::I32(_) => TargetKind::I32,
            Self::I64(_) => TargetKind::I64,
            Self::Isize(_) => TargetKind::Isize,
            Self::U8(_) => TargetKind::U8,
            Self::U16(_) => TargetKind::U16,
            Self::U32(_) => TargetKind::U32,
            Self::U64(_) => TargetKind::U64,
            Self::Usize(_) => TargetKind::Usize,
            Self::Bool(_) => TargetKind::Bool,
            Self::Str(_) => TargetKind::String,
            Self::Unsupported(_) => return None,
        };
        Some(kind)
    }

    /// Resolves the destination into writable storage, or `None` for
    /// [`Target::Unsupported`].
    pub(crate) fn into_slot(self) -> Option<Slot<'a>> {
        let slot = match self {
            Self::I8(v) => Slot::I8(v),
            Self::I16(v) => Slot::I16(v),
            Self::I32(v) => Slot::I32(v),
            Self::I64(v) => Slot::I64(v),
            Self::Isize(v) => Slot::Isize(v),
            Self::U8(v) => Slot::U8(v),
            Self::U16(v) => Slot::U16(v),
            Self::U32(v) => Slot::U32(v),
            Self::U64(v) => Slot::U64(v),
            Self::Usize(v) => Slot::Usize(v),
            Self::Bool(v) => Slot::Bool(v),
            Self::Str(v) => Slot::Str(v),
            Self::Unsupported(_) => return None,
        };
        Some(slot)
    }
}

/// Writable storage behind a supported [`Target`].
#[derive(Debug)]
pub(crate) enum Slot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    Bool(&'a mut bool),
    Str(&'a mut String),
}

impl Slot<'_> {
    pub(crate) fn kind(&self) -> TargetKind {
        match self {
            Self::I8(_) => TargetKind::I8,
            Self::I16(_) => TargetKind::I16,
            Self::I32(_) => TargetKind::I32,
            Self::I64(_) => TargetKind::I64,
            Self::Isize(_) => TargetKind::Isize,
            Self::U8(_) => TargetKind::U8,
            Self::U16(_) => TargetKind::U16,
            Self::U32(_) => TargetKind::U32,
            Self::U64(_) => TargetKind::U64,
            Self::Usize(_) => TargetKind::Usize,
            Self::Bool(_) => TargetKind::Bool,
            Self::Str(_) => TargetKind::String,
        }
    }

    /// Converts `value` and writes it into the slot.
    ///
    /// The slot is left untouched when conversion fails.
    pub(crate) fn store(self, value: &str) -> Result<(), ConversionError> {
        match self {
            Self::I8(slot) => *slot = parse_int(value, TargetKind::I8)?,
            Self::I16(slot) => *slot = parse_int(value, TargetKind::I16)?,
            Self::I32(slot) => *slot = parse_int(value, TargetKind::I32)?,
            Self::I64(slot) => *slot = parse_int(value, TargetKind::I64)?,
            Self::Isize(slot) => *slot = parse_int(value, TargetKind::Isize)?,
            Self::U8(slot) => *slot = parse_int(value, TargetKind::U8)?,
            Self::U16(slot) => *slot = parse_int(value, TargetKind::U16)?,
            Self::U32(slot) => *slot = parse_int(value, TargetKind::U32)?,
            Self::U64(slot) => *slot = parse_int(value, TargetKind::U64)?,
            Self::Usize(slot) => *slot = parse_int(value, TargetKind::Usize)?,
            Self::Bool(slot) => *slot = parse_bool(value)?,
            Self::Str(slot) => *slot = value.to_string(),
        }
        Ok(())
    }
}

fn parse_int<T>(value: &str, kind: TargetKind) -> Result<T, ConversionError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    // `FromStr` accepts a leading '+' for unsigned types too
    if kind.is_unsigned() && value.starts_with(['+', '-']) {
        return Err(ConversionError::UnexpectedSign {
            value: value.to_string(),
            kind,
        });
    }
    value.parse().map_err(|source| ConversionError::Integer {
        value: value.to_string(),
        kind,
        source,
    })
}

fn parse_bool(value: &str) -> Result<bool, ConversionError> {
    match value {
        BOOL_TRUE => Ok(true),
        BOOL_FALSE => Ok(false),
        _ => Err(ConversionError::Bool {
            value: value.to_string(),
        }),
    }
}

macro_rules! impl_target_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a mut $ty> for Target<'a> {
                fn from(slot: &'a mut $ty) -> Self {
                    Target::$variant(slot)
                }
            }
        )*
    };
}

impl_target_from!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    bool => Bool,
    String => Str,
);
