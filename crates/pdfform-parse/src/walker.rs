//! AcroForm field tree walker.
//!
//! Descends `Root/AcroForm/Fields` and every `/Kids` array, producing one
//! [`FieldNode`] per node that carries `/T`. Kids without `/T` are widget
//! annotations of their nearest named ancestor. Names are joined with `.`,
//! and `/FT`, `/Ff` and `/MaxLen` are inherited from ancestors.

use std::collections::{HashMap, HashSet};

use lopdf::{Dictionary, Object, ObjectId};
use pdfform_core::normalize::OFF;
use pdfform_core::{
    FieldFlags, FieldKind, FieldRect, FieldValue, FormField, FormOptions, display_checkbox,
};
use tracing::{debug, warn};

use crate::classify::{classify_kind, field_options};
use crate::document::{FormDocument, object_number, object_text};
use crate::error::BackendError;
use crate::registry::{FieldNode, FieldRegistry};

/// Walk the document's field tree into a registry.
///
/// Documents without an AcroForm yield an empty registry. A cyclic tree, or
/// one nested `options.max_depth` levels deep, fails with `Structure`. A node
/// referenced from more than one parent is registered under the first path
/// that reaches it.
pub fn walk(doc: &FormDocument, options: &FormOptions) -> Result<FieldRegistry, BackendError> {
    let Some(acroform) = doc.acroform() else {
        debug!("document has no AcroForm");
        return Ok(FieldRegistry::new());
    };
    let Some(roots) = doc.dict_array(acroform, b"Fields") else {
        debug!("AcroForm has no /Fields array");
        return Ok(FieldRegistry::new());
    };

    let mut walker = Walker {
        doc,
        options,
        pages: PageIndex::build(doc),
        registry: FieldRegistry::new(),
        path: Vec::new(),
        visited: HashSet::new(),
    };
    let root = Inherited::default();
    for entry in roots {
        match entry {
            Object::Reference(id) => walker.visit(*id, &root, 0)?,
            other => warn!(entry = ?other, "skipping non-reference /Fields entry"),
        }
    }
    debug!(fields = walker.registry.total_len(), "walked field tree");
    Ok(walker.registry)
}

/// Attributes a node takes from its ancestors.
#[derive(Debug, Default)]
struct Inherited<'n> {
    /// Qualified name of the nearest named ancestor.
    name: Option<&'n str>,
    /// `/TU` of the nearest named ancestor.
    label: Option<&'n str>,
    field_type: Option<String>,
    flags: Option<u32>,
    max_len: Option<i64>,
}

/// Kids of a node, split by role.
#[derive(Debug, Default)]
struct Kids {
    /// Named sub-fields and `/T`-less intermediate nodes, in `/Kids` order.
    descend: Vec<ObjectId>,
    /// Pure widget annotations, in `/Kids` order.
    widgets: Vec<ObjectId>,
}

impl Kids {
    fn is_empty(&self) -> bool {
        self.descend.is_empty() && self.widgets.is_empty()
    }
}

struct Walker<'a> {
    doc: &'a FormDocument,
    options: &'a FormOptions,
    pages: PageIndex,
    registry: FieldRegistry,
    /// Ancestors of the node being visited.
    path: Vec<ObjectId>,
    /// Every node entered so far. Shared subtrees are walked once.
    visited: HashSet<ObjectId>,
}

impl<'a> Walker<'a> {
    fn visit(&mut self, id: ObjectId, inherited: &Inherited<'_>, depth: usize) -> Result<(), BackendError> {
        if depth >= self.options.max_depth {
            return Err(BackendError::Structure(format!(
                "field tree exceeds maximum depth of {}",
                self.options.max_depth
            )));
        }
        if self.path.contains(&id) {
            return Err(BackendError::Structure(format!(
                "field tree cycle at object {} {} R",
                id.0, id.1
            )));
        }
        if !self.visited.insert(id) {
            warn!(object = ?id, "field node reached twice; skipped");
            return Ok(());
        }

        let doc = self.doc;
        let Some(dict) = doc.dictionary(id) else {
            warn!(object = ?id, "field entry is not a dictionary; skipped");
            return Ok(());
        };

        let field_type = doc
            .dict_name(dict, b"FT")
            .or_else(|| inherited.field_type.clone());
        let flags = doc.dict_int(dict, b"Ff").map(|n| n as u32).or(inherited.flags);
        let max_len = doc.dict_int(dict, b"MaxLen").or(inherited.max_len);
        let kids = self.split_kids(dict);

        self.path.push(id);
        let result = match doc.dict_text(dict, b"T") {
            Some(partial) => {
                let qualified = match inherited.name {
                    Some(parent) => format!("{parent}.{partial}"),
                    None => partial.clone(),
                };
                let own_label = doc.dict_text(dict, b"TU");
                let kind = classify_kind(
                    field_type.as_deref(),
                    FieldFlags::from_bits_retain(flags.unwrap_or(0)),
                );
                let node = self.build_node(
                    id,
                    dict,
                    &kids,
                    NodeFacts {
                        qualified: qualified.clone(),
                        partial,
                        kind,
                        flags: flags.unwrap_or(0),
                        max_len,
                        parent_label: inherited.label,
                        has_parent: inherited.name.is_some(),
                    },
                );
                debug!(name = %node.field.name, kind = %node.field.kind, "field");
                if let Some(previous) = self.registry.insert(node) {
                    warn!(
                        name = %qualified,
                        replaced = ?previous.id,
                        "duplicate qualified field name; later field wins"
                    );
                }

                let next = Inherited {
                    name: Some(&qualified),
                    label: own_label.as_deref(),
                    field_type,
                    flags,
                    max_len,
                };
                self.visit_all(&kids.descend, &next, depth)
            }
            None => {
                // A `/T`-less intermediate node adds no name segment.
                let next = Inherited {
                    name: inherited.name,
                    label: inherited.label,
                    field_type,
                    flags,
                    max_len,
                };
                self.visit_all(&kids.descend, &next, depth)
            }
        };
        self.path.pop();
        result
    }

    fn visit_all(
        &mut self,
        ids: &[ObjectId],
        inherited: &Inherited<'_>,
        depth: usize,
    ) -> Result<(), BackendError> {
        for &kid in ids {
            self.visit(kid, inherited, depth + 1)?;
        }
        Ok(())
    }

    fn split_kids(&self, dict: &Dictionary) -> Kids {
        let mut kids = Kids::default();
        let Some(entries) = self.doc.dict_array(dict, b"Kids") else {
            return kids;
        };
        for entry in entries {
            let Object::Reference(kid) = entry else {
                warn!(entry = ?entry, "skipping non-reference /Kids entry");
                continue;
            };
            let Some(kid_dict) = self.doc.dictionary(*kid) else {
                warn!(object = ?kid, "kid is not a dictionary; skipped");
                continue;
            };
            if kid_dict.has(b"T") || kid_dict.has(b"Kids") {
                kids.descend.push(*kid);
            } else {
                kids.widgets.push(*kid);
            }
        }
        kids
    }

    fn build_node(&self, id: ObjectId, dict: &Dictionary, kids: &Kids, facts: NodeFacts<'_>) -> FieldNode {
        let doc = self.doc;
        let widgets = if kids.is_empty() {
            vec![id]
        } else {
            kids.widgets.clone()
        };

        let mut raw = doc
            .dict_get(dict, b"V")
            .and_then(|v| read_value(doc, v))
            .filter(|v| !v.is_empty());
        if raw.is_none() && self.options.adopt_kid_value {
            raw = first_kid_value(doc, dict);
        }
        if raw.is_none() && facts.kind.is_button() {
            raw = selected_state(doc, &widgets);
        }
        let value = display_value(facts.kind, raw);

        let (options, option_source) = field_options(doc, facts.kind, dict, &widgets);
        let field_flags = FieldFlags::from_bits_retain(facts.flags);
        let max_length = match facts.kind {
            FieldKind::Text => facts
                .max_len
                .and_then(|n| usize::try_from(n).ok())
                .filter(|&n| n > 0),
            _ => None,
        };
        let label = doc
            .dict_text(dict, b"TU")
            .or_else(|| doc.dict_text(dict, b"TM"))
            .or_else(|| facts.parent_label.map(str::to_string));
        let page = self.pages.page_of(doc, id).or_else(|| {
            widgets
                .iter()
                .find_map(|&widget| self.pages.page_of(doc, widget))
        });
        let rect = read_rect(doc, dict).or_else(|| {
            widgets
                .iter()
                .filter_map(|&widget| doc.dictionary(widget))
                .find_map(|widget| read_rect(doc, widget))
        });

        FieldNode {
            id,
            field: FormField {
                name: facts.qualified,
                partial_name: facts.partial,
                kind: facts.kind,
                value,
                default_value: doc.dict_get(dict, b"DV").and_then(|v| read_value(doc, v)),
                label,
                options,
                option_source,
                flags: facts.flags,
                flag_meanings: field_flags.meanings(),
                max_length,
                page,
                rect,
                is_subfield: facts.has_parent,
                required: field_flags.contains(FieldFlags::REQUIRED),
                widget_count: widgets.len(),
            },
            widgets,
        }
    }
}

/// Per-node facts gathered while descending.
struct NodeFacts<'n> {
    qualified: String,
    partial: String,
    kind: FieldKind,
    flags: u32,
    max_len: Option<i64>,
    parent_label: Option<&'n str>,
    has_parent: bool,
}

/// Decode a `/V` or `/DV` object: strings and names become text, arrays a list.
fn read_value(doc: &FormDocument, obj: &Object) -> Option<FieldValue> {
    match obj {
        Object::Array(items) => Some(FieldValue::List(
            items
                .iter()
                .filter_map(|item| object_text(doc.resolve(item)))
                .collect(),
        )),
        other => object_text(other).map(FieldValue::Text),
    }
}

/// Value of the first kid with a non-empty `/V`.
fn first_kid_value(doc: &FormDocument, dict: &Dictionary) -> Option<FieldValue> {
    doc.dict_array(dict, b"Kids")?
        .iter()
        .filter_map(|kid| doc.resolve(kid).as_dict().ok())
        .filter_map(|kid| doc.dict_get(kid, b"V"))
        .filter_map(|v| read_value(doc, v))
        .find(|v| !v.is_empty())
}

/// First widget `/AS` other than `Off`, for buttons whose `/V` is missing.
fn selected_state(doc: &FormDocument, widgets: &[ObjectId]) -> Option<FieldValue> {
    widgets
        .iter()
        .filter_map(|&id| doc.dictionary(id))
        .filter_map(|widget| doc.dict_name(widget, b"AS"))
        .find(|state| state != OFF)
        .map(FieldValue::Text)
}

/// Map a stored value to what callers see for each field kind.
fn display_value(kind: FieldKind, raw: Option<FieldValue>) -> FieldValue {
    match kind {
        FieldKind::Checkbox => {
            FieldValue::Text(display_checkbox(raw.as_ref().and_then(|v| v.single())))
        }
        FieldKind::Radio => {
            let state = raw
                .as_ref()
                .and_then(|v| v.single())
                .filter(|s| !s.is_empty())
                .unwrap_or(OFF);
            FieldValue::Text(state.to_string())
        }
        _ => raw.unwrap_or_default(),
    }
}

fn read_rect(doc: &FormDocument, dict: &Dictionary) -> Option<FieldRect> {
    let items = doc.dict_array(dict, b"Rect")?;
    if items.len() != 4 {
        return None;
    }
    let n: Vec<f64> = items
        .iter()
        .map(|item| object_number(doc.resolve(item)))
        .collect::<Option<_>>()?;
    Some(FieldRect::from_corners(n[0], n[1], n[2], n[3]))
}

/// Page lookup for fields and widgets.
#[derive(Debug, Default)]
struct PageIndex {
    by_page: HashMap<ObjectId, usize>,
    by_annot: HashMap<ObjectId, usize>,
}

impl PageIndex {
    fn build(doc: &FormDocument) -> Self {
        let mut index = Self::default();
        for (i, page_id) in doc.page_ids().into_iter().enumerate() {
            index.by_page.insert(page_id, i);
            let Some(page) = doc.dictionary(page_id) else {
                continue;
            };
            let Some(annots) = doc.dict_array(page, b"Annots") else {
                continue;
            };
            for annot in annots {
                if let Object::Reference(annot_id) = annot {
                    index.by_annot.entry(*annot_id).or_insert(i);
                }
            }
        }
        index
    }

    /// Page of an object: its `/P` entry, else the page whose `/Annots` lists it.
    fn page_of(&self, doc: &FormDocument, id: ObjectId) -> Option<usize> {
        let from_p = doc
            .dictionary(id)
            .and_then(|dict| match dict.get(b"P").ok()? {
                Object::Reference(page) => self.by_page.get(page).copied(),
                _ => None,
            });
        from_p.or_else(|| self.by_annot.get(&id).copied())
    }
}
