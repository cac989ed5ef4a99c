//! Scan error types.
//!
//! [`ScanError`] identifies the failing request by position and field name.
//! Conversion failures carry a [`ConversionError`] describing why the single
//! submitted value could not be stored in its destination.

use crate::TargetKind;
use http::StatusCode;
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

/// Kind of scan failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    /// No field with the requested name exists in the form.
    NoSuchField,
    /// The field exists but does not hold exactly one value.
    MultipleValues,
    /// The value cannot be converted to the destination type.
    IncompatibleValue,
    /// The destination type is not supported by the scanner.
    IncompatibleType,
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchField => write!(f, "no such field"),
            Self::MultipleValues => write!(f, "multiple values"),
            Self::IncompatibleValue => write!(f, "incompatible value"),
            Self::IncompatibleType => write!(f, "incompatible type"),
        }
    }
}

/// Failure to convert a single form value into a typed destination.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The value is not a base-10 integer literal or overflows the target width.
    #[error("'{value}' is not a valid {kind} value: {source}")]
    Integer {
        /// The submitted value.
        value: String,
        /// Integer type the value was converted to.
        kind: TargetKind,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },

    /// A sign was supplied for an unsigned destination.
    #[error("'{value}' is not a valid {kind} value: sign not allowed")]
    UnexpectedSign {
        /// The submitted value.
        value: String,
        /// Unsigned type the value was converted to.
        kind: TargetKind,
    },

    /// The value is neither `on` nor `off`.
    #[error("'{value}' is not a valid bool value")]
    Bool {
        /// The submitted value.
        value: String,
    },
}

impl ConversionError {
    /// Returns the submitted value that failed to convert.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Integer { value, .. }
            | Self::UnexpectedSign { value, .. }
            | Self::Bool { value } => value.as_str(),
        }
    }
}

/// Error returned by [`scan`](crate::scan).
///
/// Carries the zero-based position of the failing request, its field name,
/// the kind of failure and, for [`ScanErrorKind::IncompatibleValue`], the
/// conversion failure that caused it.
///
/// # Example
///
/// ```rust
/// use formscan::{ScanError, ScanErrorKind};
/// use http::StatusCode;
///
/// let err = ScanError::no_such_field(2, "email");
/// assert_eq!(err.kind(), ScanErrorKind::NoSuchField);
/// assert_eq!(err.position(), 2);
/// assert_eq!(err.field(), "email");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(
///     err.to_string(),
///     "scan error in field #2 'email': no such field"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    kind: ScanErrorKind,
    position: usize,
    field: String,
    conversion: Option<ConversionError>,
}

impl ScanError {
    /// Creates an error for a field missing from the form.
    #[must_use]
    pub fn no_such_field(position: usize, field: impl Into<String>) -> Self {
        Self {
            kind: ScanErrorKind::NoSuchField,
            position,
            field: field.into(),
            conversion: None,
        }
    }

    /// Creates an error for a field with zero or several values.
    #[must_use]
    pub fn multiple_values(position: usize, field: impl Into<String>) -> Self {
        Self {
            kind: ScanErrorKind::MultipleValues,
            position,
            field: field.into(),
            conversion: None,
        }
    }

    /// Creates an error for a value that failed to convert.
    #[must_use]
    pub fn incompatible_value(
        position: usize,
        field: impl Into<String>,
        conversion: ConversionError,
    ) -> Self {
        Self {
            kind: ScanErrorKind::IncompatibleValue,
            position,
            field: field.into(),
            conversion: Some(conversion),
        }
    }

    /// Creates an error for a destination of unsupported type.
    #[must_use]
    pub fn incompatible_type(position: usize, field: impl Into<String>) -> Self {
        Self {
            kind: ScanErrorKind::IncompatibleType,
            position,
            field: field.into(),
            conversion: None,
        }
    }

    /// Returns the kind of failure.
    #[must_use]
    pub fn kind(&self) -> ScanErrorKind {
        self.kind
    }

    /// Returns the zero-based position of the failing request.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the field name of the failing request.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the conversion failure, if any.
    #[must_use]
    pub fn conversion(&self) -> Option<&ConversionError> {
        self.conversion.as_ref()
    }

    /// Returns the appropriate HTTP status code for this error.
    ///
    /// An unsupported destination is a programming error on the server side,
    /// everything else is a bad submission.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ScanErrorKind::NoSuchField
            | ScanErrorKind::MultipleValues
            | ScanErrorKind::IncompatibleValue => StatusCode::BAD_REQUEST,
            ScanErrorKind::IncompatibleType => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code suitable for error envelopes.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ScanErrorKind::NoSuchField => "NO_SUCH_FIELD",
            ScanErrorKind::MultipleValues => "MULTIPLE_VALUES",
            ScanErrorKind::IncompatibleValue => "INCOMPATIBLE_VALUE",
            ScanErrorKind::IncompatibleType => "INCOMPATIBLE_TYPE",
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scan error in field #{} '{}': {}",
            self.position, self.field, self.kind
        )?;
        if let Some(conversion) = &self.conversion {
            write!(f, ": {conversion}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.conversion
            .as_ref()
            .map(|c| c as &(dyn std::error::Error + 'static))
    }
}

/// Result of looking up a single form value.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// The field is absent.
    #[error("no field with such name")]
    Missing,

    /// The field holds zero or several values.
    #[error("expected exactly one value, found {0}")]
    NotExactlyOne(usize),
}

/// Failure to decode a URL-encoded payload into [`FormValues`](crate::FormValues).
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The payload exceeds the configured limit.
    #[error("payload too large: max {max} bytes, got {actual} bytes")]
    PayloadTooLarge {
        /// Configured limit.
        max: usize,
        /// Actual payload size.
        actual: usize,
    },

    /// The payload is not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// The payload is not valid `application/x-www-form-urlencoded` data.
    #[error("malformed form data: {0}")]
    Malformed(#[from] serde_urlencoded::de::Error),
}

impl DecodeError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidUtf8(_) | Self::Malformed(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Error returned by [`scan_urlencoded`](crate::scan_urlencoded).
#[derive(Error, Debug)]
pub enum FormError {
    /// The body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A field could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl FormError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Decode(e) => e.status_code(),
            Self::Scan(e) => e.status_code(),
        }
    }
}
