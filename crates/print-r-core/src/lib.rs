//! Parser for PHP `print_r()` array dumps.
//!
//! This crate turns the indentation-formatted text that PHP's `print_r()`
//! prints for arrays back into a structured value tree that can be rendered
//! as JSON.
//!
//! # Features
//!
//! - **Zero-copy scalars** - Keys and strings borrow from the input text
//! - **Lenient scanning** - Blank lines, indentation and stray dump noise are tolerated
//! - **Lists and maps** - Containers keyed `0..N-1` become sequences, anything else an ordered mapping
//! - **Detailed errors** - Line numbers and the offending line in every error
//!
//! # Quick Start
//!
//! ```rust
//! use print_r_core::{from_str, Value};
//!
//! let dump = "Array
//! (
//!     [name] => John
//!     [age] => 30
//!     [tags] => Array
//!         (
//!             [0] => admin
//!         )
//!
//! )";
//! let value = from_str(dump).unwrap();
//!
//! if let Value::Mapping(entries) = &value {
//!     for (key, val) in entries {
//!         println!("{} => {}", key, val);
//!     }
//! }
//! assert_eq!(value.get("age"), Some(&Value::Integer(30)));
//! ```
//!
//! # Scalar Types
//!
//! | Dump text | Rust Type |
//! |-----------|-----------|
//! | *(empty)* | `Value::EmptyString` |
//! | `42` | `Value::Integer(u64)` |
//! | `3.14`, `.5` | `Value::Float(f64)` |
//! | anything else | `Value::String(Cow<str>)` |
//!
//! There is no boolean type: `print_r()` prints `true` as `1` and `false`
//! as an empty value, and both read back as such.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]

pub mod error;
pub mod parser;
pub mod types;

#[cfg(feature = "serde")]
pub mod json;

pub use error::{ErrorKind, PrintRError, Result};
pub use parser::{
    coerce_scalar, from_bytes, from_bytes_with_config, from_str, from_str_with_config,
    split_lines, Parsed, Parser, ParserConfig, MAX_DEPTH,
};
pub use types::Value;

#[cfg(feature = "serde")]
pub use json::to_json;
