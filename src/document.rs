//! Arena for value graphs with shared or cyclic nodes.
//!
//! A plain [`Value`] tree owns its children outright, so a node can appear in
//! only one place. To put the same mapping under two keys, or to let a
//! mapping contain itself, store it in a [`Document`] and point at it with
//! [`Value::Ref`]. References are plain indices: the arena owns every node
//! and no node owns another through a cycle.
//!
//! ```rust
//! use yaml_dump::{dump_document, yaml, Document, DumpOptions, Value};
//!
//! let mut doc = Document::default();
//! let shared = doc.add(yaml!({ "x": 1 }));
//! doc.set_root(Value::Sequence(vec![shared.into(), shared.into()]));
//!
//! let out = dump_document(&doc, &DumpOptions::new()).unwrap();
//! assert_eq!(out, "- &ref_0\n  x: 1\n- *ref_0\n");
//! ```

use crate::{Error, Result, Value};

/// Index of a node stored in a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A root value plus the arena its [`Value::Ref`] links point into.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    root: Value,
    nodes: Vec<Value>,
}

impl Document {
    /// Creates a document with the given root and an empty arena.
    #[must_use]
    pub fn new(root: Value) -> Self {
        Document {
            root,
            nodes: Vec::new(),
        }
    }

    /// Stores a node in the arena and returns its id.
    pub fn add(&mut self, value: Value) -> NodeId {
        self.nodes.push(value);
        NodeId(self.nodes.len() - 1)
    }

    /// Reserves a slot holding `Null`, to be filled later with
    /// [`replace`](Self::replace). This is how a node refers to itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_dump::{Document, Mapping, Value};
    ///
    /// let mut doc = Document::default();
    /// let id = doc.reserve();
    /// let mut map = Mapping::new();
    /// map.insert("self".into(), id.into());
    /// doc.replace(id, Value::Mapping(map)).unwrap();
    /// doc.set_root(id.into());
    /// ```
    pub fn reserve(&mut self) -> NodeId {
        self.add(Value::Null)
    }

    /// Replaces the node stored under `id`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingReference`] if `id` is not part of this arena.
    pub fn replace(&mut self, id: NodeId, value: Value) -> Result<Value> {
        let slot = self
            .nodes
            .get_mut(id.0)
            .ok_or(Error::DanglingReference(id.0))?;
        Ok(std::mem::replace(slot, value))
    }

    /// Returns the node stored under `id`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Value> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn set_root(&mut self, root: Value) {
        self.root = root;
    }

    /// All arena nodes, indexed by [`NodeId::index`].
    #[must_use]
    pub fn nodes(&self) -> &[Value] {
        &self.nodes
    }

    /// Follows `Ref` links until a real node is reached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingReference`] for an id outside the arena or a
    /// chain of references that never reaches a real node.
    pub fn resolve<'a>(&'a self, value: &'a Value) -> Result<&'a Value> {
        resolve_in(&self.nodes, value)
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Document::new(root)
    }
}

pub(crate) fn resolve_in<'a>(nodes: &'a [Value], value: &'a Value) -> Result<&'a Value> {
    let mut current = value;
    // A chain longer than the arena must revisit a slot.
    for _ in 0..=nodes.len() {
        match current {
            Value::Ref(id) => {
                current = nodes.get(id.0).ok_or(Error::DanglingReference(id.0))?;
            }
            other => return Ok(other),
        }
    }
    match current {
        Value::Ref(id) => Err(Error::DanglingReference(id.0)),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_resolve() {
        let mut doc = Document::default();
        let id = doc.add(Value::from("shared"));
        let link = Value::Ref(id);
        assert_eq!(doc.resolve(&link).unwrap(), &Value::from("shared"));
        assert_eq!(doc.resolve(&Value::from(1)).unwrap(), &Value::from(1));
    }

    #[test]
    fn test_chained_refs() {
        let mut doc = Document::default();
        let target = doc.add(Value::Bool(true));
        let hop = doc.add(Value::Ref(target));
        assert_eq!(doc.resolve(&Value::Ref(hop)).unwrap(), &Value::Bool(true));
    }

    #[test]
    fn test_dangling_and_looping_refs() {
        let mut doc = Document::default();
        assert!(matches!(
            doc.resolve(&Value::Ref(NodeId(3))),
            Err(Error::DanglingReference(3))
        ));

        let id = doc.reserve();
        doc.replace(id, Value::Ref(id)).unwrap();
        assert!(matches!(
            doc.resolve(&Value::Ref(id)),
            Err(Error::DanglingReference(0))
        ));
    }

    #[test]
    fn test_replace_unknown_slot() {
        let mut doc = Document::default();
        assert!(doc.replace(NodeId(0), Value::Null).is_err());
    }
}
