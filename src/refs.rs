//! Finding nodes that are reachable more than once.
//!
//! A node's identity is its address inside the caller's graph, taken after
//! following [`Value::Ref`] links. Only sequences and mappings are tracked;
//! scalars are always written in place.

use crate::document::resolve_in;
use crate::{Result, Value};
use indexmap::IndexSet;

/// Identity of a node: its address after reference resolution.
pub(crate) fn identity(value: &Value) -> usize {
    value as *const Value as usize
}

/// Walks the graph from `root` and returns the identities of every
/// composite node seen more than once, in the order their second sighting
/// happened. Position `n` in the set becomes anchor `ref_n`.
pub(crate) fn find_duplicates(root: &Value, nodes: &[Value]) -> Result<IndexSet<usize>> {
    let mut walk = Walk {
        nodes,
        seen: IndexSet::new(),
        duplicates: IndexSet::new(),
    };
    walk.inspect(root)?;
    tracing::debug!(
        "inspected {} composite nodes, {} shared",
        walk.seen.len(),
        walk.duplicates.len()
    );
    Ok(walk.duplicates)
}

struct Walk<'a> {
    nodes: &'a [Value],
    seen: IndexSet<usize>,
    duplicates: IndexSet<usize>,
}

impl<'a> Walk<'a> {
    fn inspect(&mut self, value: &'a Value) -> Result<()> {
        let node = resolve_in(self.nodes, value)?;
        if !matches!(node, Value::Sequence(_) | Value::Mapping(_)) {
            return Ok(());
        }

        let id = identity(node);
        if !self.seen.insert(id) {
            self.duplicates.insert(id);
            return Ok(());
        }

        match node {
            Value::Sequence(items) => {
                for item in items {
                    self.inspect(item)?;
                }
            }
            Value::Mapping(map) => {
                for (key, value) in map {
                    self.inspect(key)?;
                    self.inspect(value)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
