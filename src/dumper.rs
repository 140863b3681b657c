//! The emitter: one [`Session`] per dump call walks the value graph and
//! builds the document text.
//!
//! Every writer returns the fragment it produced instead of appending to a
//! shared buffer; `None` means the node was skipped under `skip_invalid`.
//! Fragments of nested block collections start with a line break, which is
//! how their parent decides between `key: value` and `key:` followed by an
//! indented body.

use crate::document::resolve_in;
use crate::escape::escape;
use crate::options::{DumpOptions, SortKeys};
use crate::refs::{find_duplicates, identity};
use crate::scalar::{choose_style, render, ScalarStyle};
use crate::schema::{Resolution, ResolvedTag, Schema};
use crate::{Error, Mapping, Result, Value};
use indexmap::{IndexMap, IndexSet};

/// YAML 1.1 readers take these for booleans.
const DEPRECATED_BOOLEANS: [&str; 16] = [
    "y", "Y", "yes", "Yes", "YES", "on", "On", "ON", "n", "N", "no", "No", "NO", "off", "Off",
    "OFF",
];

/// Keys longer than this are written as explicit `? key` pairs.
const MAX_IMPLICIT_KEY_LEN: usize = 1024;

/// Where a node is being written.
#[derive(Clone, Copy, Debug)]
struct Slot {
    block: bool,
    compact: bool,
    key: bool,
    seq_item: bool,
}

impl Slot {
    const fn root() -> Self {
        Slot {
            block: true,
            compact: true,
            key: false,
            seq_item: false,
        }
    }

    const fn seq_item() -> Self {
        Slot {
            block: true,
            compact: true,
            key: false,
            seq_item: true,
        }
    }

    const fn key() -> Self {
        Slot {
            block: false,
            compact: false,
            key: true,
            seq_item: false,
        }
    }

    const fn value(compact: bool) -> Self {
        Slot {
            block: true,
            compact,
            key: false,
            seq_item: false,
        }
    }

    const fn flow() -> Self {
        Slot {
            block: false,
            compact: false,
            key: false,
            seq_item: false,
        }
    }
}

/// A rendered node.
#[derive(Debug)]
struct Fragment {
    text: String,
    /// Written with an explicit `!<tag>`.
    tagged: bool,
    /// Style chosen if the node went through the scalar writer.
    style: Option<ScalarStyle>,
}

impl Fragment {
    fn new(text: String) -> Self {
        Fragment {
            text,
            tagged: false,
            style: None,
        }
    }

    fn starts_with_newline(&self) -> bool {
        self.text.starts_with('\n')
    }
}

/// Block bodies start with their own line break; flow bodies need a space.
fn with_anchor(anchor: Option<String>, body: String, separator: &str) -> String {
    match anchor {
        Some(anchor) => format!("{}{}{}", anchor, separator, body),
        None => body,
    }
}

/// State of one dump call.
pub(crate) struct Session<'a> {
    options: &'a DumpOptions,
    schema: &'a Schema,
    styles: IndexMap<String, String>,
    nodes: &'a [Value],
    indent: usize,
    duplicates: IndexSet<usize>,
    used: Vec<bool>,
    /// Nesting depth of flow collections around the current node.
    flow_depth: usize,
    /// Composite nodes currently being written, checked when refs are off.
    ancestors: Vec<usize>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(options: &'a DumpOptions, nodes: &'a [Value]) -> Self {
        let schema: &Schema = &options.schema;
        Session {
            options,
            schema,
            styles: schema.compile_styles(&options.styles),
            nodes,
            indent: options.indent.max(1),
            duplicates: IndexSet::new(),
            used: Vec::new(),
            flow_depth: 0,
            ancestors: Vec::new(),
        }
    }

    /// Renders `root` as a whole document.
    pub(crate) fn dump(mut self, root: &Value) -> Result<String> {
        self.options.validate()?;
        if !self.options.no_refs {
            self.duplicates = find_duplicates(root, self.nodes)?;
            self.used = vec![false; self.duplicates.len()];
        }
        tracing::debug!(
            "dumping document with {} shared nodes (indent {}, width {:?})",
            self.duplicates.len(),
            self.indent,
            self.options.line_width
        );

        match self.write_node(0, root, Slot::root())? {
            Some(fragment) => Ok(fragment.text + "\n"),
            None => Ok(String::new()),
        }
    }

    fn next_line(&self, level: usize) -> String {
        format!("\n{}", " ".repeat(self.indent * level))
    }

    fn resolve_type(&self, value: &Value) -> Result<Option<Resolution>> {
        match self.schema.resolve(value, false, &self.styles)? {
            Some(found) => Ok(Some(found)),
            None => self.schema.resolve(value, true, &self.styles),
        }
    }

    fn write_node(&mut self, level: usize, value: &Value, slot: Slot) -> Result<Option<Fragment>> {
        let nodes = self.nodes;
        let node = resolve_in(nodes, value)?;

        let (tag, represented) = match self.resolve_type(node)? {
            Some(Resolution { tag, represented }) => (Some(tag), represented),
            None => (None, None),
        };
        let explicit_tag = match &tag {
            Some(ResolvedTag::Explicit(t)) => Some(t.clone()),
            _ => None,
        };
        let target = represented.as_ref().unwrap_or(node);

        let composite = matches!(target, Value::Sequence(_) | Value::Mapping(_));
        let duplicate = if composite {
            self.duplicates.get_index_of(&identity(node))
        } else {
            None
        };

        let block = slot.block && self.options.flow_level.map_or(true, |fl| fl > level);
        let compact = slot.compact
            && explicit_tag.is_none()
            && duplicate.is_none()
            && (self.indent == 2 || level == 0);

        if let Some(index) = duplicate {
            if self.used[index] {
                return Ok(Some(Fragment::new(format!("*ref_{}", index))));
            }
            self.used[index] = true;
        }
        let anchor = duplicate.map(|index| format!("&ref_{}", index));

        if composite && self.options.no_refs {
            let id = identity(node);
            if self.ancestors.contains(&id) {
                return Err(Error::CyclicReference);
            }
            self.ancestors.push(id);
        }

        let mut style = None;
        let body = match target {
            Value::Mapping(map) => {
                if block && !map.is_empty() {
                    with_anchor(anchor, self.write_block_mapping(level, map, compact)?, "")
                } else {
                    with_anchor(anchor, self.write_flow_mapping(level, map)?, " ")
                }
            }
            Value::Sequence(items) => {
                if block && !items.is_empty() {
                    let level = if self.options.no_array_indent && level > 0 && !slot.seq_item {
                        level - 1
                    } else {
                        level
                    };
                    with_anchor(anchor, self.write_block_sequence(level, items, compact)?, "")
                } else {
                    with_anchor(anchor, self.write_flow_sequence(level, items)?, " ")
                }
            }
            Value::String(s) if tag == Some(ResolvedTag::Implicit) => s.clone(),
            Value::String(s) => {
                let (text, chosen) = self.write_scalar(s, level, slot.key);
                style = chosen;
                text
            }
            other => {
                if self.options.skip_invalid {
                    tracing::trace!("skipping {} at level {}", other.kind_name(), level);
                    return Ok(None);
                }
                return Err(Error::unresolved_type(&other.kind_name()));
            }
        };

        if composite && self.options.no_refs {
            self.ancestors.pop();
        }

        let text = match &explicit_tag {
            Some(t) if body.starts_with('\n') => format!("!<{}>{}", t, body),
            Some(t) => format!("!<{}> {}", t, body),
            None => body,
        };
        Ok(Some(Fragment {
            text,
            tagged: explicit_tag.is_some(),
            style,
        }))
    }

    /// Returns the scalar text and, unless a fixed spelling was used, the
    /// chosen style.
    fn write_scalar(&self, s: &str, level: usize, is_key: bool) -> (String, Option<ScalarStyle>) {
        if s.is_empty() {
            return ("''".to_string(), Some(ScalarStyle::SingleQuoted));
        }
        if !self.options.no_compat_mode && DEPRECATED_BOOLEANS.contains(&s) {
            return (format!("'{}'", s), Some(ScalarStyle::SingleQuoted));
        }

        let indent = self.indent * level.max(1);
        let width = self
            .options
            .line_width
            .map(|w| w.min(40).max(w.saturating_sub(indent)));
        let single_line_only = is_key
            || self.flow_depth > 0
            || self.options.flow_level.map_or(false, |fl| level >= fl);

        let schema = self.schema;
        let style = choose_style(s, single_line_only, self.indent, width, |t| {
            schema.is_ambiguous(t)
        });
        (render(s, style, self.indent, indent, width), Some(style))
    }

    /// Anchor flags before a pair's key is written. A pair dropped by
    /// `skip_invalid` must not leave its key's anchors marked as written.
    fn marked_snapshot(&self) -> Option<Vec<bool>> {
        if self.options.skip_invalid && !self.used.is_empty() {
            Some(self.used.clone())
        } else {
            None
        }
    }

    fn restore_marked(&mut self, marked: Option<Vec<bool>>) {
        if let Some(used) = marked {
            self.used = used;
        }
    }

    fn ordered<'m>(&self, map: &'m Mapping) -> Vec<(&'m Value, &'m Value)> {
        let mut entries: Vec<_> = map.iter().collect();
        match &self.options.sort_keys {
            SortKeys::Unsorted => {}
            SortKeys::Lexicographic => entries.sort_by_cached_key(|(key, _)| key.to_string()),
            SortKeys::Custom(cmp) => entries.sort_by(|a, b| cmp(a.0, b.0)),
        }
        entries
    }

    fn write_flow_sequence(&mut self, level: usize, items: &[Value]) -> Result<String> {
        let separator = if self.options.condense_flow { "," } else { ", " };
        let mut result = String::new();
        let mut first = true;

        self.flow_depth += 1;
        for item in items {
            if let Some(fragment) = self.write_node(level, item, Slot::flow())? {
                if !first {
                    result.push_str(separator);
                }
                result.push_str(&fragment.text);
                first = false;
            }
        }
        self.flow_depth -= 1;

        Ok(format!("[{}]", result))
    }

    fn write_flow_mapping(&mut self, level: usize, map: &Mapping) -> Result<String> {
        let condense = self.options.condense_flow;
        let mut result = String::new();
        let mut first = true;

        self.flow_depth += 1;
        for (key, value) in self.ordered(map) {
            let marked = self.marked_snapshot();
            let key = match self.write_node(level, key, Slot::flow())? {
                Some(fragment) => fragment,
                None => continue,
            };
            let value = match self.write_node(level, value, Slot::flow())? {
                Some(fragment) => fragment,
                None => {
                    self.restore_marked(marked);
                    continue;
                }
            };

            if !first {
                result.push_str(", ");
            }
            first = false;
            if key.text.chars().count() > MAX_IMPLICIT_KEY_LEN {
                result.push_str("? ");
            }
            if condense {
                // The key must be quoted for `:` to work without a space.
                match key.style {
                    Some(ScalarStyle::SingleQuoted) | Some(ScalarStyle::DoubleQuoted) => {
                        result.push_str(&key.text)
                    }
                    _ => {
                        result.push('"');
                        result.push_str(&escape(&key.text));
                        result.push('"');
                    }
                }
                result.push(':');
            } else {
                result.push_str(&key.text);
                result.push_str(": ");
            }
            result.push_str(&value.text);
        }
        self.flow_depth -= 1;

        Ok(format!("{{{}}}", result))
    }

    fn write_block_sequence(
        &mut self,
        level: usize,
        items: &[Value],
        compact: bool,
    ) -> Result<String> {
        let mut result = String::new();

        for item in items {
            let fragment = match self.write_node(level + 1, item, Slot::seq_item())? {
                Some(fragment) => fragment,
                None => continue,
            };
            if !compact || !result.is_empty() {
                result.push_str(&self.next_line(level));
            }
            result.push_str(if fragment.starts_with_newline() { "-" } else { "- " });
            result.push_str(&fragment.text);
        }

        if result.is_empty() {
            result.push_str("[]");
        }
        Ok(result)
    }

    fn write_block_mapping(
        &mut self,
        level: usize,
        map: &Mapping,
        compact: bool,
    ) -> Result<String> {
        let mut result = String::new();

        for (key, value) in self.ordered(map) {
            let marked = self.marked_snapshot();
            let key = match self.write_node(level + 1, key, Slot::key())? {
                Some(fragment) => fragment,
                None => continue,
            };
            let explicit_pair = key.tagged || key.text.chars().count() > MAX_IMPLICIT_KEY_LEN;

            let value = match self.write_node(level + 1, value, Slot::value(explicit_pair))? {
                Some(fragment) => fragment,
                None => {
                    self.restore_marked(marked);
                    continue;
                }
            };

            let mut pair = String::new();
            if !compact || !result.is_empty() {
                pair.push_str(&self.next_line(level));
            }
            if explicit_pair {
                pair.push_str(if key.starts_with_newline() { "?" } else { "? " });
            }
            pair.push_str(&key.text);
            if explicit_pair {
                pair.push_str(&self.next_line(level));
            }
            pair.push_str(if value.starts_with_newline() { ":" } else { ": " });
            pair.push_str(&value.text);
            result.push_str(&pair);
        }

        if result.is_empty() {
            result.push_str("{}");
        }
        Ok(result)
    }
}
