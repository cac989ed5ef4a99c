//! # formscan
//!
//! Typed extraction of single-valued form fields.
//!
//! Given decoded form data ([`FormValues`], a name → values mapping) and an
//! ordered list of [`ScanField`] requests, [`scan`] looks up each field,
//! requires exactly one submitted value, converts it to the destination's
//! type and writes it into caller-owned storage. The first failure stops the
//! scan and is reported as a [`ScanError`] naming the request's position and
//! field name.
//!
//! ## Supported destinations
//!
//! | Destination | Accepted values |
//! |-------------|-----------------|
//! | `i8` `i16` `i32` `i64` `isize` | base-10 integer, optional leading sign |
//! | `u8` `u16` `u32` `u64` `usize` | base-10 integer, no sign |
//! | `bool` | exactly `on` or `off` |
//! | `String` | anything, copied verbatim |
//!
//! ## Example
//!
//! ```rust
//! use formscan::{scan, FormValues, ScanField};
//!
//! let form = FormValues::from_urlencoded(
//!     b"age=17&active=on&name=alice",
//!     &Default::default(),
//! )?;
//!
//! let mut age: i8 = 0;
//! let mut active = false;
//! let mut name = String::new();
//!
//! scan(
//!     &form,
//!     [
//!         ScanField::new("age", &mut age),
//!         ScanField::new("active", &mut active),
//!         ScanField::new("name", &mut name),
//!     ],
//! )?;
//!
//! assert_eq!(age, 17);
//! assert!(active);
//! assert_eq!(name, "alice");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! [`ScanError`] carries the failure kind, position and field name, plus the
//! underlying [`ConversionError`] when a value could not be converted. It maps
//! onto an HTTP status code for error responses:
//!
//! ```rust
//! use formscan::{scan, FormValues, ScanErrorKind, ScanField};
//! use http::StatusCode;
//!
//! let form: FormValues = [("count", "many")].into_iter().collect();
//! let mut count: u32 = 0;
//!
//! let err = scan(&form, [ScanField::new("count", &mut count)]).unwrap_err();
//! assert_eq!(err.kind(), ScanErrorKind::IncompatibleValue);
//! assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
//! assert_eq!(
//!     err.to_string(),
//!     "scan error in field #0 'count': incompatible value: \
//!      'many' is not a valid uint32 value: invalid digit found in string"
//! );
//! ```

#![doc(html_root_url = "https://docs.rs/formscan/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod scanner;
mod target;
mod values;

pub use error::{ConversionError, DecodeError, FormError, LookupError, ScanError, ScanErrorKind};
pub use scanner::{scan, scan_urlencoded, ScanField};
pub use target::{Target, TargetKind};
pub use values::{DecodeConfig, FormValues};
