//! Error types for YAML emission.
//!
//! Emission is all-or-nothing: every variant here aborts the whole dump call
//! and no partial document is returned. The single exception is
//! [`Error::UnresolvedType`] when [`DumpOptions::skip_invalid`] is set, in
//! which case the offending node is silently omitted instead.
//!
//! ## Error Categories
//!
//! - **Data errors**: a value no type descriptor can represent
//! - **Configuration errors**: bad style overrides, bad option values
//! - **Graph errors**: dangling or cyclic node references
//! - **I/O errors**: failures writing the finished document
//!
//! ## Examples
//!
//! ```rust
//! use yaml_dump::{dump, DumpOptions, Error, Tagged, Value};
//!
//! struct Opaque;
//!
//! let value = Value::Tagged(Tagged::new(Opaque));
//! let err = dump(&value, &DumpOptions::new()).unwrap_err();
//! assert!(matches!(err, Error::UnresolvedType(_)));
//! ```
//!
//! [`DumpOptions::skip_invalid`]: crate::DumpOptions::skip_invalid

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while dumping a value graph.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error while writing the rendered document
    #[error("IO error: {0}")]
    Io(String),

    /// No implicit or explicit type descriptor matched the value
    #[error("unacceptable kind of an object to dump: {0}")]
    UnresolvedType(String),

    /// A style override names a style the matched type cannot produce
    #[error("!<{tag}> tag resolver accepts not \"{style}\" style")]
    UnsupportedStyle { tag: String, style: String },

    /// The `sortKeys` configuration entry is neither a boolean nor a comparator
    #[error("sortKeys must be a boolean or a function, found {0}")]
    InvalidSortKeys(String),

    /// Any other option with an unusable value
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: String, reason: String },

    /// A `Ref` points outside the document arena
    #[error("reference to unknown node #{0}")]
    DanglingReference(usize),

    /// A node reached itself while references were disabled
    #[error("cyclic reference found while `noRefs` is set")]
    CyclicReference,

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unresolved-type error naming the kind of value that failed.
    pub fn unresolved_type(kind: &str) -> Self {
        Error::UnresolvedType(kind.to_string())
    }

    /// Creates an error for a style override a type descriptor cannot honour.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_dump::Error;
    ///
    /// let err = Error::unsupported_style("tag:yaml.org,2002:int", "roman");
    /// assert!(err.to_string().contains("\"roman\""));
    /// ```
    pub fn unsupported_style(tag: &str, style: &str) -> Self {
        Error::UnsupportedStyle {
            tag: tag.to_string(),
            style: style.to_string(),
        }
    }

    /// Creates an invalid option error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_dump::Error;
    ///
    /// let err = Error::invalid_option("lineWidth", "must be positive or -1");
    /// assert!(err.to_string().contains("lineWidth"));
    /// ```
    pub fn invalid_option(name: &str, reason: &str) -> Self {
        Error::InvalidOption {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_dump::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if `skip_invalid` may recover from this error by
    /// dropping the node that raised it.
    #[must_use]
    pub const fn is_skippable(&self) -> bool {
        matches!(self, Error::UnresolvedType(_))
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
