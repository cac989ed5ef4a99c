//! The form scanner.
//!
//! [`scan`] walks an ordered list of [`ScanField`] requests, looks each name
//! up in a [`FormValues`] mapping and writes the converted value into the
//! request's [`Target`]. It stops at the first failure.

use crate::{DecodeConfig, FormError, FormValues, LookupError, ScanError, Target};
use std::borrow::Cow;

/// A single scan request: a field name and the destination for its value.
///
/// # Example
///
/// ```rust
/// use formscan::ScanField;
///
/// let mut age: u8 = 0;
/// let field = ScanField::new("age", &mut age);
/// assert_eq!(field.name(), "age");
/// ```
#[derive(Debug)]
pub struct ScanField<'a> {
    name: Cow<'a, str>,
    target: Target<'a>,
}

impl<'a> ScanField<'a> {
    /// Creates a request for `name`, writing into `target`.
    pub fn new(name: impl Into<Cow<'a, str>>, target: impl Into<Target<'a>>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }

    /// Returns the requested field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Scans `source` for each requested field and stores its value.
///
/// Requests are processed in order. For each one:
///
/// 1. a [`Target::Unsupported`] destination fails with
///    [`IncompatibleType`](crate::ScanErrorKind::IncompatibleType), whether or
///    not the field exists;
/// 2. a name absent from `source` fails with
///    [`NoSuchField`](crate::ScanErrorKind::NoSuchField);
/// 3. a name with zero or several values fails with
///    [`MultipleValues`](crate::ScanErrorKind::MultipleValues);
/// 4. the single value is converted: integers are base-10 (sign allowed for
///    signed types only), booleans accept exactly `on` and `off`, strings are
///    copied verbatim. A failed conversion yields
///    [`IncompatibleValue`](crate::ScanErrorKind::IncompatibleValue).
///
/// Destinations of requests before the failing one keep their new values;
/// the failing destination and all later ones are left untouched.
///
/// # Example
///
/// ```rust
/// use formscan::{scan, FormValues, ScanErrorKind, ScanField};
///
/// let form: FormValues = [("age", "17"), ("active", "on"), ("name", "a"), ("name", "b")]
///     .into_iter()
///     .collect();
///
/// let mut age: i8 = 0;
/// let mut active = false;
/// let mut name = String::from("unchanged");
///
/// let err = scan(
///     &form,
///     [
///         ScanField::new("age", &mut age),
///         ScanField::new("active", &mut active),
///         ScanField::new("name", &mut name),
///     ],
/// )
/// .unwrap_err();
///
/// assert_eq!(err.kind(), ScanErrorKind::MultipleValues);
/// assert_eq!(err.position(), 2);
/// assert_eq!(age, 17);
/// assert!(active);
/// assert_eq!(name, "unchanged");
/// ```
pub fn scan<'a, I>(source: &FormValues, fields: I) -> Result<(), ScanError>
where
    I: IntoIterator<Item = ScanField<'a>>,
{
    for (position, field) in fields.into_iter().enumerate() {
        let ScanField { name, target } = field;

        let Some(slot) = target.into_slot() else {
            return Err(ScanError::incompatible_type(position, name));
        };
        let kind = slot.kind();

        let value = match source.single(&name) {
            Ok(value) => value,
            Err(LookupError::Missing) => return Err(ScanError::no_such_field(position, name)),
            Err(LookupError::NotExactlyOne(_)) => {
                return Err(ScanError::multiple_values(position, name))
            }
        };

        if let Err(conversion) = slot.store(value) {
            return Err(ScanError::incompatible_value(position, name, conversion));
        }

        tracing::trace!(field = %name, position, kind = %kind, "scanned form field");
    }

    Ok(())
}

/// Decodes a URL-encoded body and scans it.
///
/// Shorthand for [`FormValues::from_urlencoded`] followed by [`scan`].
///
/// # Example
///
/// ```rust
/// use formscan::{scan_urlencoded, DecodeConfig, ScanField};
///
/// let mut user = String::new();
/// let mut remember = false;
///
/// scan_urlencoded(
///     b"user=alice&remember=on",
///     &DecodeConfig::default(),
///     [
///         ScanField::new("user", &mut user),
///         ScanField::new("remember", &mut remember),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(user, "alice");
/// assert!(remember);
/// ```
pub fn scan_urlencoded<'a, I>(
    body: &[u8],
    config: &DecodeConfig,
    fields: I,
) -> Result<(), FormError>
where
    I: IntoIterator<Item = ScanField<'a>>,
{
    let source = FormValues::from_urlencoded(body, config)?;
    scan(&source, fields)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConversionError, DecodeError, ScanErrorKind, TargetKind};
    use http::StatusCode;

    fn form(pairs: &[(&str, &str)]) -> FormValues {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_scan_all_types() {
        let source = form(&[
            ("a", "-8"),
            ("b", "-16"),
            ("c", "-32"),
            ("d", "-64"),
            ("e", "-1"),
            ("f", "8"),
            ("g", "16"),
            ("h", "32"),
            ("i", "64"),
            ("j", "1"),
            ("k", "off"),
            ("l", "text"),
        ]);

        let (mut a, mut b, mut c, mut d, mut e) = (0i8, 0i16, 0i32, 0i64, 0isize);
        let (mut f, mut g, mut h, mut i, mut j) = (0u8, 0u16, 0u32, 0u64, 0usize);
        let mut k = true;
        let mut l = String::new();

        scan(
            &source,
            [
                ScanField::new("a", &mut a),
                ScanField::new("b", &mut b),
                ScanField::new("c", &mut c),
                ScanField::new("d", &mut d),
                ScanField::new("e", &mut e),
                ScanField::new("f", &mut f),
                ScanField::new("g", &mut g),
                ScanField::new("h", &mut h),
                ScanField::new("i", &mut i),
                ScanField::new("j", &mut j),
                ScanField::new("k", &mut k),
                ScanField::new("l", &mut l),
            ],
        )
        .unwrap();

        assert_eq!((a, b, c, d, e), (-8, -16, -32, -64, -1));
        assert_eq!((f, g, h, i, j), (8, 16, 32, 64, 1));
        assert!(!k);
        assert_eq!(l, "text");
    }

    #[test]
    fn test_empty_request_list() {
        let source = FormValues::new();
        assert!(scan(&source, Vec::<ScanField<'_>>::new()).is_ok());
    }

    #[test]
    fn test_no_such_field() {
        let source = form(&[("present", "1")]);
        let mut v: i32 = 9;

        let err = scan(&source, [ScanField::new("absent", &mut v)]).unwrap_err();

        assert_eq!(err.kind(), ScanErrorKind::NoSuchField);
        assert_eq!(err.position(), 0);
        assert_eq!(err.field(), "absent");
        assert_eq!(v, 9);
    }

    #[test]
    fn test_empty_source_reports_no_such_field() {
        let mut v = String::new();
        let err = scan(&FormValues::new(), [ScanField::new("x", &mut v)]).unwrap_err();
        assert_eq!(err.kind(), ScanErrorKind::NoSuchField);
    }

    #[test]
    fn test_zero_values_is_multiple_values() {
        let mut source = FormValues::new();
        source.set_all("tags", Vec::new());
        let mut v = String::from("keep");

        let err = scan(&source, [ScanField::new("tags", &mut v)]).unwrap_err();

        assert_eq!(err.kind(), ScanErrorKind::MultipleValues);
        assert_eq!(v, "keep");
    }

    #[test]
    fn test_incompatible_value_carries_conversion() {
        let source = form(&[("n", "1"), ("age", "300")]);
        let mut n: u8 = 0;
        let mut age: u8 = 0;

        let err = scan(
            &source,
            [ScanField::new("n", &mut n), ScanField::new("age", &mut age)],
        )
        .unwrap_err();

        assert_eq!(err.kind(), ScanErrorKind::IncompatibleValue);
        assert_eq!(err.position(), 1);
        assert_eq!(err.field(), "age");
        assert!(matches!(
            err.conversion(),
            Some(ConversionError::Integer { kind: TargetKind::U8, .. })
        ));
        assert_eq!(n, 1);
        assert_eq!(age, 0);
    }

    #[test]
    fn test_unsupported_type_checked_before_lookup() {
        let source = form(&[("when", "2024-01-01")]);

        let err = scan(&source, [ScanField::new("missing", Target::Unsupported("f64"))])
            .unwrap_err();
        assert_eq!(err.kind(), ScanErrorKind::IncompatibleType);
        assert_eq!(err.conversion(), None);

        let err = scan(&source, [ScanField::new("when", Target::Unsupported("NaiveDate"))])
            .unwrap_err();
        assert_eq!(err.kind(), ScanErrorKind::IncompatibleType);
        assert_eq!(err.field(), "when");
    }

    #[test]
    fn test_stops_at_first_failure() {
        let source = form(&[("a", "1"), ("c", "3")]);
        let (mut a, mut b, mut c) = (0i32, 0i32, 0i32);

        let err = scan(
            &source,
            [
                ScanField::new("a", &mut a),
                ScanField::new("b", &mut b),
                ScanField::new("c", &mut c),
            ],
        )
        .unwrap_err();

        assert_eq!(err.position(), 1);
        assert_eq!((a, b, c), (1, 0, 0));
    }

    #[test]
    fn test_repeated_names_scanned_independently() {
        let source = form(&[("id", "42")]);
        let mut first: u32 = 0;
        let mut second = String::new();

        scan(
            &source,
            [ScanField::new("id", &mut first), ScanField::new("id", &mut second)],
        )
        .unwrap();

        assert_eq!(first, 42);
        assert_eq!(second, "42");
    }

    #[test]
    fn test_owned_field_names() {
        let source = form(&[("row_1", "on")]);
        let mut v = false;

        scan(&source, [ScanField::new(format!("row_{}", 1), &mut v)]).unwrap();
        assert!(v);
    }

    #[test]
    fn test_scan_urlencoded_decode_error() {
        let mut v = String::new();
        let err = scan_urlencoded(
            b"name=toolong",
            &DecodeConfig::with_max_body_size(4),
            [ScanField::new("name", &mut v)],
        )
        .unwrap_err();

        assert!(matches!(err, FormError::Decode(DecodeError::PayloadTooLarge { .. })));
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(v.is_empty());
    }

    #[test]
    fn test_scan_urlencoded_scan_error() {
        let mut v = false;
        let err = scan_urlencoded(
            b"flag=true",
            &DecodeConfig::default(),
            [ScanField::new("flag", &mut v)],
        )
        .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        match err {
            FormError::Scan(e) => assert_eq!(e.kind(), ScanErrorKind::IncompatibleValue),
            FormError::Decode(e) => panic!("unexpected decode error: {e}"),
        }
    }
}
