//! # yaml_dump
//!
//! A YAML emitter for dynamic value graphs.
//!
//! ## What it does
//!
//! `yaml_dump` turns an in-memory [`Value`] graph (nulls, booleans, numbers,
//! strings, sequences, ordered mappings and opaque native objects) into a
//! YAML document. For every string it picks the least noisy of the five
//! scalar styles that still reads back as the same string, folds long text
//! to a configurable width, and links nodes reachable from more than one
//! place with `&ref_N` anchors and `*ref_N` aliases.
//!
//! ## Key Features
//!
//! - **Style selection**: plain, single-quoted, double-quoted, literal (`|`)
//!   and folded (`>`) scalars, chosen per value
//! - **Shared and cyclic nodes**: expressed with a [`Document`] arena and
//!   written as anchors and aliases
//! - **Pluggable types**: register [`YamlType`] descriptors in a [`Schema`]
//!   to represent your own types, with or without an explicit `!<tag>`
//! - **Serde Compatible**: dump any `T: Serialize` with [`to_string`]
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Serialize;
//! use yaml_dump::to_string;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     tags: vec!["admin".to_string(), "yes".to_string()],
//! };
//!
//! let yaml = to_string(&user).unwrap();
//! assert_eq!(yaml, "id: 123\nname: Alice\ntags:\n  - admin\n  - 'yes'\n");
//! ```
//!
//! ### Dynamic Values with the yaml! Macro
//!
//! ```rust
//! use yaml_dump::{dump, yaml, DumpOptions};
//!
//! let data = yaml!({
//!     "a": 1,
//!     "b": [1, 2, 3]
//! });
//!
//! let out = dump(&data, &DumpOptions::new()).unwrap();
//! assert_eq!(out, "a: 1\nb:\n  - 1\n  - 2\n  - 3\n");
//! ```
//!
//! ### Shared Nodes
//!
//! ```rust
//! use yaml_dump::{dump_document, yaml, Document, DumpOptions, Mapping, Value};
//!
//! let mut doc = Document::default();
//! let defaults = doc.add(yaml!({ "retries": 3 }));
//! let mut root = Mapping::new();
//! root.insert("dev".into(), defaults.into());
//! root.insert("prod".into(), defaults.into());
//! doc.set_root(Value::Mapping(root));
//!
//! let out = dump_document(&doc, &DumpOptions::new()).unwrap();
//! assert_eq!(out, "dev: &ref_0\n  retries: 3\nprod: *ref_0\n");
//! ```
//!
//! ## Errors
//!
//! A dump either produces the whole document or fails with an [`Error`];
//! there is no partial output. See the [`error`] module.
//!
//! ## Logging
//!
//! Emission reports through [`tracing`](https://docs.rs/tracing): a `debug`
//! event per dump call and `trace` events for values dropped under
//! [`DumpOptions::skip_invalid`]. Errors are returned, never logged.

pub mod chars;
pub mod document;
mod dumper;
pub mod error;
pub mod escape;
pub mod fold;
pub mod macros;
pub mod mapping;
pub mod options;
mod refs;
pub mod scalar;
pub mod schema;
pub mod ser;
pub mod types;
pub mod value;

pub use document::{Document, NodeId};
pub use error::{Error, Result};
pub use mapping::Mapping;
pub use options::{DumpOptions, SortKeys};
pub use scalar::ScalarStyle;
pub use schema::{Schema, YamlType};
pub use ser::ValueSerializer;
pub use value::{Number, Tagged, Value};

use dumper::Session;
use serde::Serialize;
use std::io;

/// Dumps a value tree to a YAML document.
///
/// The output ends with exactly one line break, or is empty when the root
/// itself was dropped under [`DumpOptions::skip_invalid`]. A value holding
/// [`Value::Ref`] links must be dumped with [`dump_document`] instead.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::{dump, DumpOptions, Value};
///
/// assert_eq!(dump(&Value::from("true"), &DumpOptions::new()).unwrap(), "'true'\n");
/// assert_eq!(dump(&Value::Sequence(vec![]), &DumpOptions::new()).unwrap(), "[]\n");
/// ```
///
/// # Errors
///
/// Returns an error if a value cannot be represented, a style override is
/// not supported by its type, or the options are invalid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dump(value: &Value, options: &DumpOptions) -> Result<String> {
    Session::new(options, &[]).dump(value)
}

/// Dumps a [`Document`], resolving its [`Value::Ref`] links. Nodes reached
/// more than once are anchored unless [`DumpOptions::no_refs`] is set.
///
/// # Errors
///
/// As [`dump`], plus [`Error::DanglingReference`] for links outside the
/// arena and [`Error::CyclicReference`] for a cycle under `no_refs`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn dump_document(doc: &Document, options: &DumpOptions) -> Result<String> {
    Session::new(options, doc.nodes()).dump(doc.root())
}

/// Serialize any `T: Serialize` to a YAML string.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "x: 1\ny: 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &DumpOptions::default())
}

/// Serialize any `T: Serialize` to a YAML string with custom options.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::{to_string_with_options, DumpOptions};
///
/// let options = DumpOptions::new().with_flow_level(0);
/// assert_eq!(to_string_with_options(&vec![1, 2], &options).unwrap(), "[1, 2]\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &DumpOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    dump(&to_value(value)?, options)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use yaml_dump::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_mapping());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Serialize any `T: Serialize` to a writer as YAML.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec!["a", "b"]).unwrap();
/// assert_eq!(buffer, b"- a\n- b\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &DumpOptions::default())
}

/// Serialize any `T: Serialize` to a writer as YAML with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &DumpOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let yaml = to_string_with_options(value, options)?;
    writer
        .write_all(yaml.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
