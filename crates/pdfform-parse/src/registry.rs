//! The flat field registry produced by walking the AcroForm tree.

use indexmap::IndexMap;
use lopdf::ObjectId;
use pdfform_core::FormField;

/// A registry entry: the logical field plus the objects that carry it.
#[derive(Debug, Clone)]
pub struct FieldNode {
    /// The field dictionary that carries `/T`.
    pub id: ObjectId,
    /// The classified, display-normalized field record.
    pub field: FormField,
    /// Widget annotations in `/Kids` order. Holds `id` itself for a merged
    /// field/widget dictionary.
    pub widgets: Vec<ObjectId>,
}

impl FieldNode {
    /// Widgets that are separate objects from the field dictionary.
    pub fn widget_kids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.widgets.iter().copied().filter(move |&w| w != self.id)
    }
}

/// Fields keyed by fully-qualified name, in tree order.
///
/// Push buttons are kept so the writer can see the whole tree, but every
/// caller-facing accessor skips them.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    entries: IndexMap<String, FieldNode>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under its qualified name. A later node with the same
    /// name replaces the earlier one; the replaced node is returned.
    pub fn insert(&mut self, node: FieldNode) -> Option<FieldNode> {
        self.entries.insert(node.field.name.clone(), node)
    }

    /// Look up a caller-visible field by qualified name.
    pub fn get(&self, name: &str) -> Option<&FieldNode> {
        self.entries
            .get(name)
            .filter(|node| node.field.kind.is_visible())
    }

    /// Look up any node, push buttons included.
    pub fn get_any(&self, name: &str) -> Option<&FieldNode> {
        self.entries.get(name)
    }

    /// Caller-visible nodes in tree order.
    pub fn nodes(&self) -> impl Iterator<Item = &FieldNode> {
        self.entries.values().filter(|node| node.field.kind.is_visible())
    }

    /// Caller-visible field records in tree order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.nodes().map(|node| &node.field)
    }

    /// Consume the registry, returning the caller-visible records.
    pub fn into_fields(self) -> Vec<FormField> {
        self.entries
            .into_values()
            .filter(|node| node.field.kind.is_visible())
            .map(|node| node.field)
            .collect()
    }

    /// Number of caller-visible fields.
    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes including push buttons.
    pub fn total_len(&self) -> usize {
        self.entries.len()
    }
}
