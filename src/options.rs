//! Configuration options for YAML emission.
//!
//! This module provides types to customize the dumped document:
//!
//! - [`DumpOptions`]: Main configuration struct
//! - [`SortKeys`]: Mapping key order (insertion, lexicographic or custom)
//!
//! Options can be built in code with the `with_*` builder methods, or loaded
//! from a [`Value`] mapping that uses the conventional camelCase option
//! names (`lineWidth`, `sortKeys`, ...).
//!
//! ## Examples
//!
//! ```rust
//! use yaml_dump::{dump, yaml, DumpOptions};
//!
//! let data = yaml!({ "b": 1, "a": [1, 2] });
//!
//! // Sorted keys, flow style from the second level down
//! let options = DumpOptions::new().with_sort_keys(true).with_flow_level(1);
//! assert_eq!(dump(&data, &options).unwrap(), "a: [1, 2]\nb: 1\n");
//!
//! // The same configuration, loaded from a mapping
//! let options = DumpOptions::try_from(&yaml!({ "sortKeys": true, "flowLevel": 1 })).unwrap();
//! assert_eq!(dump(&data, &options).unwrap(), "a: [1, 2]\nb: 1\n");
//! ```

use crate::{Error, Result, Schema, Value};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Comparator for custom key order.
pub type KeyComparator = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

/// Order in which mapping entries are written.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::{SortKeys, Value};
/// use std::cmp::Ordering;
///
/// let reversed = SortKeys::custom(|a: &Value, b: &Value| b.to_string().cmp(&a.to_string()));
/// assert!(matches!(reversed, SortKeys::Custom(_)));
/// assert!(matches!(SortKeys::from(true), SortKeys::Lexicographic));
/// ```
#[derive(Clone, Default)]
pub enum SortKeys {
    /// Insertion order.
    #[default]
    Unsorted,
    /// Ordered by the keys' display strings.
    Lexicographic,
    /// Ordered by a caller comparator.
    Custom(KeyComparator),
}

impl SortKeys {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        SortKeys::Custom(Arc::new(f))
    }
}

impl From<bool> for SortKeys {
    fn from(sort: bool) -> Self {
        if sort {
            SortKeys::Lexicographic
        } else {
            SortKeys::Unsorted
        }
    }
}

impl fmt::Debug for SortKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKeys::Unsorted => write!(f, "Unsorted"),
            SortKeys::Lexicographic => write!(f, "Lexicographic"),
            SortKeys::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Configuration options for YAML emission.
///
/// # Examples
///
/// ```rust
/// use yaml_dump::DumpOptions;
///
/// // Defaults: 2-space indent, 80 column folding, block style everywhere
/// let options = DumpOptions::new();
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.line_width, Some(80));
/// assert_eq!(options.flow_level, None);
///
/// let options = DumpOptions::new()
///     .with_indent(4)
///     .without_line_width()
///     .with_style("!!null", "canonical");
/// assert_eq!(options.line_width, None);
/// ```
#[derive(Clone, Debug)]
pub struct DumpOptions {
    /// Spaces per nesting level, at least 1.
    pub indent: usize,
    /// Folding width; `None` never folds.
    pub line_width: Option<usize>,
    /// Nesting level from which collections are written in flow style;
    /// `None` keeps block style at every level.
    pub flow_level: Option<usize>,
    /// Style overrides by tag, e.g. `"!!int" => "hex"`.
    pub styles: IndexMap<String, String>,
    pub schema: Arc<Schema>,
    pub sort_keys: SortKeys,
    /// Omit values no type can represent instead of failing.
    pub skip_invalid: bool,
    /// Write shared nodes out in full instead of anchoring them.
    pub no_refs: bool,
    /// Do not quote YAML 1.1 boolean spellings such as `yes` and `off`.
    pub no_compat_mode: bool,
    /// Drop the spaces after `,` and `:` in flow collections.
    pub condense_flow: bool,
    /// Do not indent block sequences nested in mappings.
    pub no_array_indent: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            indent: 2,
            line_width: Some(80),
            flow_level: None,
            styles: IndexMap::new(),
            schema: Arc::new(Schema::core()),
            sort_keys: SortKeys::Unsorted,
            skip_invalid: false,
            no_refs: false,
            no_compat_mode: false,
            condense_flow: false,
            no_array_indent: false,
        }
    }
}

impl DumpOptions {
    /// Creates default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation size. Values below 1 are raised to 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_dump::DumpOptions;
    ///
    /// assert_eq!(DumpOptions::new().with_indent(4).indent, 4);
    /// assert_eq!(DumpOptions::new().with_indent(0).indent, 1);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = Some(width);
        self
    }

    /// Disables folding: long strings stay on one line.
    #[must_use]
    pub fn without_line_width(mut self) -> Self {
        self.line_width = None;
        self
    }

    /// Switches to flow style for collections nested `level` or deeper.
    /// `0` writes the whole document in flow style.
    #[must_use]
    pub fn with_flow_level(mut self, level: usize) -> Self {
        self.flow_level = Some(level);
        self
    }

    /// Overrides the style of one tag. A `!!name` tag is shorthand for
    /// `tag:yaml.org,2002:name`.
    #[must_use]
    pub fn with_style(mut self, tag: impl Into<String>, style: impl Into<String>) -> Self {
        self.styles.insert(tag.into(), style.into());
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Arc::new(schema);
        self
    }

    /// `true` sorts keys lexicographically, `false` keeps insertion order.
    #[must_use]
    pub fn with_sort_keys(mut self, sort: bool) -> Self {
        self.sort_keys = SortKeys::from(sort);
        self
    }

    /// Sorts keys with a caller comparator.
    #[must_use]
    pub fn with_key_order<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Ordering + Send + Sync + 'static,
    {
        self.sort_keys = SortKeys::custom(f);
        self
    }

    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    #[must_use]
    pub fn with_no_refs(mut self, no_refs: bool) -> Self {
        self.no_refs = no_refs;
        self
    }

    #[must_use]
    pub fn with_no_compat_mode(mut self, no_compat_mode: bool) -> Self {
        self.no_compat_mode = no_compat_mode;
        self
    }

    #[must_use]
    pub fn with_condense_flow(mut self, condense: bool) -> Self {
        self.condense_flow = condense;
        self
    }

    #[must_use]
    pub fn with_no_array_indent(mut self, no_array_indent: bool) -> Self {
        self.no_array_indent = no_array_indent;
        self
    }

    /// Checks the options before a dump starts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOption`] for a zero line width.
    pub fn validate(&self) -> Result<()> {
        if self.line_width == Some(0) {
            return Err(Error::invalid_option(
                "lineWidth",
                "must be positive, or -1 for unbounded",
            ));
        }
        Ok(())
    }
}

fn expect_bool(name: &str, value: &Value) -> Result<bool> {
    value.as_bool().ok_or_else(|| {
        Error::invalid_option(
            name,
            &format!("expected a boolean, found {}", value.kind_name()),
        )
    })
}

fn expect_int(name: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Number(crate::Number::Integer(n)) => Ok(*n),
        other => Err(Error::invalid_option(
            name,
            &format!("expected an integer, found {}", other.kind_name()),
        )),
    }
}

/// Negative values mean "unbounded".
fn optional_usize(name: &str, value: &Value) -> Result<Option<usize>> {
    let n = expect_int(name, value)?;
    if n < 0 {
        return Ok(None);
    }
    usize::try_from(n)
        .map(Some)
        .map_err(|_| Error::invalid_option(name, "out of range"))
}

fn load_styles(value: &Value) -> Result<IndexMap<String, String>> {
    let map = value
        .as_mapping()
        .ok_or_else(|| Error::invalid_option("styles", "expected a mapping of tag to style"))?;
    map.iter()
        .map(|(tag, style)| {
            let tag = tag
                .as_str()
                .ok_or_else(|| Error::invalid_option("styles", "tags must be strings"))?;
            let style = match style {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(Error::invalid_option(
                        "styles",
                        &format!("style for {} must be a string, found {}", tag, other.kind_name()),
                    ))
                }
            };
            Ok((tag.to_string(), style))
        })
        .collect()
}

/// Loads options from a mapping of camelCase option names. Missing entries
/// keep their defaults; the schema cannot be configured this way.
impl TryFrom<&Value> for DumpOptions {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        let map = value
            .as_mapping()
            .ok_or_else(|| Error::invalid_option("options", "expected a mapping"))?;
        let mut options = DumpOptions::default();

        for (key, entry) in map {
            let name = key
                .as_str()
                .ok_or_else(|| Error::invalid_option("options", "option names must be strings"))?;
            match name {
                "indent" => {
                    let indent = optional_usize(name, entry)?.unwrap_or(1);
                    options.indent = indent.max(1);
                }
                "lineWidth" => options.line_width = optional_usize(name, entry)?,
                "flowLevel" => options.flow_level = optional_usize(name, entry)?,
                "styles" => options.styles = load_styles(entry)?,
                "sortKeys" => {
                    let sort = entry
                        .as_bool()
                        .ok_or_else(|| Error::InvalidSortKeys(entry.kind_name()))?;
                    options.sort_keys = SortKeys::from(sort);
                }
                "skipInvalid" => options.skip_invalid = expect_bool(name, entry)?,
                "noRefs" => options.no_refs = expect_bool(name, entry)?,
                "noCompatMode" => options.no_compat_mode = expect_bool(name, entry)?,
                "condenseFlow" => options.condense_flow = expect_bool(name, entry)?,
                "noArrayIndent" => options.no_array_indent = expect_bool(name, entry)?,
                other => return Err(Error::invalid_option(other, "unknown option")),
            }
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mapping;

    fn config(pairs: Vec<(&str, Value)>) -> Value {
        Value::Mapping(
            pairs
                .into_iter()
                .map(|(k, v)| (Value::from(k), v))
                .collect::<Mapping>(),
        )
    }

    #[test]
    fn test_defaults() {
        let options = DumpOptions::default();
        assert_eq!(options.indent, 2);
        assert_eq!(options.line_width, Some(80));
        assert_eq!(options.flow_level, None);
        assert!(matches!(options.sort_keys, SortKeys::Unsorted));
        assert!(!options.skip_invalid);
        assert!(!options.no_refs);
        assert!(!options.no_compat_mode);
        assert!(!options.condense_flow);
        assert!(!options.no_array_indent);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = DumpOptions::new().with_line_width(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref name, .. } if name == "lineWidth"));
    }

    #[test]
    fn test_load_from_mapping() {
        let value = config(vec![
            ("indent", Value::from(4)),
            ("lineWidth", Value::from(-1)),
            ("flowLevel", Value::from(2)),
            ("sortKeys", Value::from(true)),
            ("noRefs", Value::from(true)),
            ("condenseFlow", Value::from(true)),
            (
                "styles",
                config(vec![("!!int", Value::from(16)), ("!!null", Value::from("canonical"))]),
            ),
        ]);
        let options = DumpOptions::try_from(&value).unwrap();
        assert_eq!(options.indent, 4);
        assert_eq!(options.line_width, None);
        assert_eq!(options.flow_level, Some(2));
        assert!(matches!(options.sort_keys, SortKeys::Lexicographic));
        assert!(options.no_refs);
        assert!(options.condense_flow);
        assert_eq!(options.styles.get("!!int").map(String::as_str), Some("16"));
    }

    #[test]
    fn test_load_clamps_indent_and_maps_negative_flow_level() {
        let value = config(vec![("indent", Value::from(0)), ("flowLevel", Value::from(-1))]);
        let options = DumpOptions::try_from(&value).unwrap();
        assert_eq!(options.indent, 1);
        assert_eq!(options.flow_level, None);
    }

    #[test]
    fn test_load_rejects_bad_sort_keys() {
        let value = config(vec![("sortKeys", Value::from("yes"))]);
        let err = DumpOptions::try_from(&value).unwrap_err();
        assert!(matches!(err, Error::InvalidSortKeys(ref kind) if kind == "string"));
    }

    #[test]
    fn test_load_rejects_bad_entries() {
        let err = DumpOptions::try_from(&config(vec![("noRefs", Value::from(1))])).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref name, .. } if name == "noRefs"));

        let err = DumpOptions::try_from(&config(vec![("colour", Value::from(true))])).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref name, .. } if name == "colour"));

        assert!(DumpOptions::try_from(&Value::from(3)).is_err());
    }
}
