//! Type descriptors and the schema that resolves values against them.
//!
//! A [`YamlType`] says which values it claims (by payload type, by predicate
//! or both), how to turn a claimed value into something the emitter can
//! write, and which strings would read back as this type. A [`Schema`] holds
//! two ordered lists of descriptors:
//!
//! - **implicit** types are written without a tag; their lexical
//!   recognizers also decide which strings need quoting
//! - **explicit** types are written with a `!<tag>` prefix
//!
//! Resolution tries the implicit list first, then the explicit one. The first
//! matching descriptor wins, so registration order breaks ties.
//!
//! ## Examples
//!
//! ```rust
//! use yaml_dump::{dump, DumpOptions, Schema, Tagged, Value, YamlType};
//!
//! struct Point { x: i64, y: i64 }
//!
//! let point = YamlType::new("!point")
//!     .instance_of::<Point>()
//!     .represent(|value, _style| {
//!         let p = value
//!             .as_tagged()
//!             .and_then(|t| t.downcast_ref::<Point>())
//!             .ok_or_else(|| yaml_dump::Error::custom("not a point"))?;
//!         Ok(Value::Sequence(vec![p.x.into(), p.y.into()]))
//!     });
//!
//! let options = DumpOptions::new()
//!     .with_schema(Schema::core().with_explicit(point))
//!     .with_flow_level(0);
//! let out = dump(&Value::Tagged(Tagged::new(Point { x: 1, y: 2 })), &options).unwrap();
//! assert_eq!(out, "!<!point> [1, 2]\n");
//! ```

use crate::{Error, Result, Value};
use indexmap::IndexMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Turns a claimed value into a writable one. Receives the selected style.
pub type RepresentFn = Arc<dyn Fn(&Value, &str) -> Result<Value> + Send + Sync>;

/// Claims values by inspecting them.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Lexical recognizer: would this string read back as this type?
pub type ResolveFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// How a descriptor turns a value into its written form.
#[derive(Clone, Default)]
pub enum Represent {
    /// The value is written as is.
    #[default]
    None,
    /// One function for every style.
    Function(RepresentFn),
    /// One function per style name.
    Styles(IndexMap<String, RepresentFn>),
}

impl fmt::Debug for Represent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Represent::None => write!(f, "None"),
            Represent::Function(_) => write!(f, "Function"),
            Represent::Styles(styles) => f
                .debug_tuple("Styles")
                .field(&styles.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// A type descriptor.
#[derive(Clone)]
pub struct YamlType {
    tag: String,
    instance_of: Option<TypeId>,
    predicate: Option<PredicateFn>,
    resolve: Option<ResolveFn>,
    represent: Represent,
    default_style: Option<String>,
    style_aliases: IndexMap<String, String>,
}

impl YamlType {
    /// Creates a descriptor for `tag` that claims nothing yet.
    ///
    /// A `!!name` tag is shorthand for `tag:yaml.org,2002:name`.
    pub fn new(tag: impl Into<String>) -> Self {
        YamlType {
            tag: expand_tag(tag.into()),
            instance_of: None,
            predicate: None,
            resolve: None,
            represent: Represent::None,
            default_style: None,
            style_aliases: IndexMap::new(),
        }
    }

    /// Claims [`Tagged`](crate::Tagged) values whose payload is a `T`.
    #[must_use]
    pub fn instance_of<T: Any>(mut self) -> Self {
        self.instance_of = Some(TypeId::of::<T>());
        self
    }

    /// Claims values the predicate accepts. Combined with
    /// [`instance_of`](Self::instance_of), both must hold.
    #[must_use]
    pub fn predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(f));
        self
    }

    /// Sets the lexical recognizer used to detect ambiguous plain strings.
    #[must_use]
    pub fn resolve<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.resolve = Some(Arc::new(f));
        self
    }

    /// Uses one representation function for every style.
    #[must_use]
    pub fn represent<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &str) -> Result<Value> + Send + Sync + 'static,
    {
        self.represent = Represent::Function(Arc::new(f));
        self
    }

    /// Adds a representation function for one named style.
    #[must_use]
    pub fn represent_style<F>(mut self, style: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &str) -> Result<Value> + Send + Sync + 'static,
    {
        let f: RepresentFn = Arc::new(f);
        match &mut self.represent {
            Represent::Styles(styles) => {
                styles.insert(style.into(), f);
            }
            other => {
                let mut styles = IndexMap::new();
                styles.insert(style.into(), f);
                *other = Represent::Styles(styles);
            }
        }
        self
    }

    /// Style used when the caller's style map has no entry for this tag.
    #[must_use]
    pub fn default_style(mut self, style: impl Into<String>) -> Self {
        self.default_style = Some(style.into());
        self
    }

    /// Lets callers name `style` as `alias` in their style map.
    #[must_use]
    pub fn style_alias(mut self, alias: impl Into<String>, style: impl Into<String>) -> Self {
        self.style_aliases.insert(alias.into(), style.into());
        self
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Descriptors with neither a payload type nor a predicate never claim a
    /// value; they only take part in the ambiguity test.
    #[must_use]
    pub fn is_matchable(&self) -> bool {
        self.instance_of.is_some() || self.predicate.is_some()
    }

    /// Returns `true` if this descriptor claims `value`.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        if !self.is_matchable() {
            return false;
        }
        if let Some(type_id) = self.instance_of {
            match value {
                Value::Tagged(tagged) if tagged.payload_type_id() == type_id => {}
                _ => return false,
            }
        }
        self.predicate.as_ref().map_or(true, |p| p(value))
    }

    /// Returns `true` if `s` would read back as this type.
    #[must_use]
    pub fn recognizes(&self, s: &str) -> bool {
        self.resolve.as_ref().map_or(false, |r| r(s))
    }

    fn canonical_style(&self, style: &str) -> String {
        self.style_aliases
            .get(style)
            .cloned()
            .unwrap_or_else(|| style.to_string())
    }

    fn apply(&self, value: &Value, style: &str) -> Result<Option<Value>> {
        match &self.represent {
            Represent::None => Ok(None),
            Represent::Function(f) => f(value, style).map(Some),
            Represent::Styles(styles) => match styles.get(style) {
                Some(f) => f(value, style).map(Some),
                None => Err(Error::unsupported_style(&self.tag, style)),
            },
        }
    }
}

impl fmt::Debug for YamlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YamlType")
            .field("tag", &self.tag)
            .field("instance_of", &self.instance_of)
            .field("predicate", &self.predicate.is_some())
            .field("resolve", &self.resolve.is_some())
            .field("represent", &self.represent)
            .field("default_style", &self.default_style)
            .finish()
    }
}

/// The tag a resolved value is written with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedTag {
    /// Matched an implicit type: no tag is written.
    Implicit,
    /// Matched an explicit type: written as `!<tag>`.
    Explicit(String),
}

/// Outcome of a successful resolution.
#[derive(Clone, Debug)]
pub struct Resolution {
    pub tag: ResolvedTag,
    /// The representation result, or `None` if the value is written as is.
    pub represented: Option<Value>,
}

/// Ordered implicit and explicit type lists.
#[derive(Clone, Debug)]
pub struct Schema {
    implicit: Vec<YamlType>,
    explicit: Vec<YamlType>,
}

impl Default for Schema {
    fn default() -> Self {
        Schema::core()
    }
}

impl Schema {
    /// A schema with no types: only strings and collections can be dumped.
    #[must_use]
    pub fn new() -> Self {
        Schema {
            implicit: Vec::new(),
            explicit: Vec::new(),
        }
    }

    /// The default schema; see [`types`](crate::types) for its contents.
    #[must_use]
    pub fn core() -> Self {
        Schema {
            implicit: crate::types::implicit_types(),
            explicit: crate::types::explicit_types(),
        }
    }

    /// Appends an implicit type. It is tried after the existing ones.
    #[must_use]
    pub fn with_implicit(mut self, ty: YamlType) -> Self {
        self.implicit.push(ty);
        self
    }

    /// Appends an explicit type. It is tried after the existing ones.
    #[must_use]
    pub fn with_explicit(mut self, ty: YamlType) -> Self {
        self.explicit.push(ty);
        self
    }

    #[must_use]
    pub fn implicit(&self) -> &[YamlType] {
        &self.implicit
    }

    #[must_use]
    pub fn explicit(&self) -> &[YamlType] {
        &self.explicit
    }

    /// The descriptor a tag refers to; explicit types shadow implicit ones.
    fn find(&self, tag: &str) -> Option<&YamlType> {
        self.explicit
            .iter()
            .rev()
            .chain(self.implicit.iter().rev())
            .find(|ty| ty.tag == tag)
    }

    /// Normalizes a caller style map: `!!` shorthand is expanded and style
    /// aliases are replaced by the canonical style names.
    #[must_use]
    pub fn compile_styles(&self, styles: &IndexMap<String, String>) -> IndexMap<String, String> {
        styles
            .iter()
            .map(|(tag, style)| {
                let tag = expand_tag(tag.clone());
                let style = match self.find(&tag) {
                    Some(ty) => ty.canonical_style(style),
                    None => style.clone(),
                };
                (tag, style)
            })
            .collect()
    }

    /// Returns `true` if `s` written plain would read back as some implicit
    /// type instead of a string.
    #[must_use]
    pub fn is_ambiguous(&self, s: &str) -> bool {
        self.implicit.iter().any(|ty| ty.recognizes(s))
    }

    /// Looks for a descriptor in one of the two lists.
    ///
    /// A [`Tagged`](crate::Tagged) value that requests a tag is only matched
    /// by explicit descriptors carrying exactly that tag.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedStyle`] when the selected style has no
    /// representation function, and with whatever the representation
    /// function itself returns.
    pub fn resolve(
        &self,
        value: &Value,
        explicit: bool,
        styles: &IndexMap<String, String>,
    ) -> Result<Option<Resolution>> {
        let requested = value.as_tagged().and_then(|t| t.tag());
        if requested.is_some() && !explicit {
            return Ok(None);
        }

        let list = if explicit { &self.explicit } else { &self.implicit };
        let found = list
            .iter()
            .filter(|ty| requested.map_or(true, |tag| expand_tag(tag.to_string()) == ty.tag))
            .find(|ty| ty.matches(value));

        let ty = match found {
            Some(ty) => ty,
            None => return Ok(None),
        };

        let style = styles
            .get(&ty.tag)
            .or(ty.default_style.as_ref())
            .map_or("", String::as_str);
        let represented = ty.apply(value, style)?;
        let tag = if explicit {
            ResolvedTag::Explicit(ty.tag.clone())
        } else {
            ResolvedTag::Implicit
        };
        Ok(Some(Resolution { tag, represented }))
    }
}

fn expand_tag(tag: String) -> String {
    match tag.strip_prefix("!!") {
        Some(rest) => format!("{}{}", CORE_TAG_PREFIX, rest),
        None => tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tagged;

    struct Marker;

    fn styles(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_expand_tag() {
        assert_eq!(expand_tag("!!int".into()), "tag:yaml.org,2002:int");
        assert_eq!(expand_tag("!local".into()), "!local");
        assert_eq!(YamlType::new("!!str").tag(), "tag:yaml.org,2002:str");
    }

    #[test]
    fn test_unmatchable_type_never_matches() {
        let ty = YamlType::new("!merge").resolve(|s| s == "<<");
        assert!(!ty.is_matchable());
        assert!(!ty.matches(&Value::from("<<")));
        assert!(ty.recognizes("<<"));
    }

    #[test]
    fn test_instance_of_and_predicate_both_apply() {
        let ty = YamlType::new("!m")
            .instance_of::<Marker>()
            .predicate(|v| v.as_tagged().map_or(false, |t| t.tag().is_none()));
        assert!(ty.matches(&Value::Tagged(Tagged::new(Marker))));
        assert!(!ty.matches(&Value::Tagged(Tagged::new(Marker).with_tag("!m"))));
        assert!(!ty.matches(&Value::Tagged(Tagged::new(1u8))));
        assert!(!ty.matches(&Value::Null));
    }

    #[test]
    fn test_implicit_before_explicit_and_first_wins() {
        let schema = Schema::new()
            .with_implicit(YamlType::new("!a").predicate(Value::is_null))
            .with_implicit(YamlType::new("!b").predicate(Value::is_null))
            .with_explicit(YamlType::new("!c").predicate(Value::is_bool));

        let found = schema.resolve(&Value::Null, false, &IndexMap::new()).unwrap();
        assert_eq!(found.unwrap().tag, ResolvedTag::Implicit);

        let found = schema
            .resolve(&Value::Bool(true), true, &IndexMap::new())
            .unwrap()
            .unwrap();
        assert_eq!(found.tag, ResolvedTag::Explicit("!c".into()));
        assert!(found.represented.is_none());
    }

    #[test]
    fn test_requested_tag_limits_explicit_matches() {
        let schema = Schema::new()
            .with_explicit(YamlType::new("!one").instance_of::<Marker>())
            .with_explicit(YamlType::new("!two").instance_of::<Marker>());
        let value = Value::Tagged(Tagged::new(Marker).with_tag("!two"));

        assert!(schema.resolve(&value, false, &IndexMap::new()).unwrap().is_none());
        let found = schema.resolve(&value, true, &IndexMap::new()).unwrap().unwrap();
        assert_eq!(found.tag, ResolvedTag::Explicit("!two".into()));
    }

    #[test]
    fn test_style_selection() {
        let ty = YamlType::new("!!int")
            .predicate(Value::is_number)
            .represent_style("decimal", |_, _| Ok(Value::from("10")))
            .represent_style("hexadecimal", |_, _| Ok(Value::from("0xA")))
            .default_style("decimal")
            .style_alias("hex", "hexadecimal");
        let schema = Schema::new().with_implicit(ty);
        let value = Value::from(10);

        let plain = schema.resolve(&value, false, &IndexMap::new()).unwrap().unwrap();
        assert_eq!(plain.represented, Some(Value::from("10")));

        let compiled = schema.compile_styles(&styles(&[("!!int", "hex")]));
        assert_eq!(
            compiled.get("tag:yaml.org,2002:int").map(String::as_str),
            Some("hexadecimal")
        );
        let hex = schema.resolve(&value, false, &compiled).unwrap().unwrap();
        assert_eq!(hex.represented, Some(Value::from("0xA")));

        let bad = schema.compile_styles(&styles(&[("!!int", "roman")]));
        let err = schema.resolve(&value, false, &bad).unwrap_err();
        assert!(matches!(err, Error::UnsupportedStyle { ref style, .. } if style == "roman"));
    }

    #[test]
    fn test_function_receives_style() {
        let ty = YamlType::new("!s")
            .predicate(Value::is_bool)
            .represent(|_, style| Ok(Value::from(style)));
        let schema = Schema::new().with_explicit(ty);
        let found = schema
            .resolve(&Value::Bool(false), true, &styles(&[("!s", "loud")]))
            .unwrap()
            .unwrap();
        assert_eq!(found.represented, Some(Value::from("loud")));
    }

    #[test]
    fn test_ambiguity_uses_implicit_recognizers_only() {
        let schema = Schema::new()
            .with_implicit(YamlType::new("!yes").resolve(|s| s == "yes"))
            .with_explicit(YamlType::new("!no").resolve(|s| s == "no"));
        assert!(schema.is_ambiguous("yes"));
        assert!(!schema.is_ambiguous("no"));
    }
}
