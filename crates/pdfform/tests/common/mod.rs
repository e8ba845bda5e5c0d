//! Shared fixture builders for the integration tests.
//!
//! Forms are built in code with lopdf so every test documents the exact
//! field tree it exercises.

#![allow(dead_code)]

use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};

/// Builds a one-page PDF with an AcroForm, one field at a time.
pub struct FormBuilder {
    doc: lopdf::Document,
    page_id: ObjectId,
    fields: Vec<Object>,
    annots: Vec<Object>,
    next_y: i64,
}

impl Default for FormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FormBuilder {
    pub fn new() -> Self {
        let mut doc = lopdf::Document::with_version("1.7");
        let page_id = doc.new_object_id();
        Self {
            doc,
            page_id,
            fields: Vec::new(),
            annots: Vec::new(),
            next_y: 740,
        }
    }

    fn appearance(&mut self, states: &[&str]) -> Dictionary {
        let mut normal = Dictionary::new();
        for state in states {
            let stream = self.doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            normal.set(*state, Object::Reference(stream));
        }
        dictionary! { "N" => normal }
    }

    fn rect(&mut self) -> Vec<Object> {
        let y = self.next_y;
        self.next_y -= 30;
        vec![72.into(), y.into(), 272.into(), (y + 20).into()]
    }

    /// Add a widget annotation on the page.
    fn widget(&mut self, mut dict: Dictionary) -> ObjectId {
        dict.set("Type", "Annot");
        dict.set("Subtype", "Widget");
        dict.set("P", Object::Reference(self.page_id));
        if !dict.has(b"Rect") {
            dict.set("Rect", self.rect());
        }
        let id = self.doc.add_object(dict);
        self.annots.push(Object::Reference(id));
        id
    }

    /// Add a root field whose dictionary is also its widget.
    fn merged(&mut self, dict: Dictionary) -> ObjectId {
        let id = self.widget(dict);
        self.fields.push(Object::Reference(id));
        id
    }

    /// Add a root field whose widgets are `/T`-less kids.
    fn parent(&mut self, mut dict: Dictionary, kids: Vec<ObjectId>) -> ObjectId {
        dict.set(
            "Kids",
            kids.iter().map(|&k| Object::Reference(k)).collect::<Vec<_>>(),
        );
        let id = self.doc.add_object(dict);
        for kid in kids {
            if let Ok(Object::Dictionary(kid_dict)) = self.doc.get_object_mut(kid) {
                kid_dict.set("Parent", Object::Reference(id));
            }
        }
        self.fields.push(Object::Reference(id));
        id
    }

    pub fn text(mut self, name: &str) -> Self {
        self.merged(dictionary! {
            "T" => Object::string_literal(name),
            "FT" => "Tx",
        });
        self
    }

    pub fn text_with_max_len(mut self, name: &str, max_len: i64) -> Self {
        self.merged(dictionary! {
            "T" => Object::string_literal(name),
            "FT" => "Tx",
            "MaxLen" => Object::Integer(max_len),
        });
        self
    }

    pub fn checkbox(mut self, name: &str) -> Self {
        let ap = self.appearance(&["Yes", "Off"]);
        self.merged(dictionary! {
            "T" => Object::string_literal(name),
            "FT" => "Btn",
            "V" => "Off",
            "AS" => "Off",
            "AP" => ap,
        });
        self
    }

    /// A radio group with one kid widget per state.
    pub fn radio(mut self, name: &str, states: &[&str]) -> Self {
        let kids: Vec<ObjectId> = states
            .iter()
            .map(|state| {
                let ap = self.appearance(&[*state, "Off"]);
                self.widget(dictionary! { "AS" => "Off", "AP" => ap })
            })
            .collect();
        self.parent(
            dictionary! {
                "T" => Object::string_literal(name),
                "FT" => "Btn",
                "Ff" => Object::Integer(49152),
                "V" => "Off",
            },
            kids,
        );
        self
    }

    pub fn combo(mut self, name: &str, options: &[&str]) -> Self {
        self.merged(dictionary! {
            "T" => Object::string_literal(name),
            "FT" => "Ch",
            "Ff" => Object::Integer(131072),
            "Opt" => strings(options),
        });
        self
    }

    pub fn list_box(mut self, name: &str, options: &[&str], multi_select: bool) -> Self {
        let flags = if multi_select { 2097152 } else { 0 };
        self.merged(dictionary! {
            "T" => Object::string_literal(name),
            "FT" => "Ch",
            "Ff" => Object::Integer(flags),
            "Opt" => strings(options),
        });
        self
    }

    /// A text field shown by several `/T`-less widgets.
    pub fn text_with_widgets(mut self, name: &str, widgets: usize) -> Self {
        let kids: Vec<ObjectId> = (0..widgets).map(|_| self.widget(dictionary! {})).collect();
        self.parent(
            dictionary! {
                "T" => Object::string_literal(name),
                "FT" => "Tx",
            },
            kids,
        );
        self
    }

    /// A text field `parent` with a named text kid `kid`.
    pub fn text_with_named_kid(mut self, parent: &str, kid: &str) -> Self {
        let kid_id = self.widget(dictionary! {
            "T" => Object::string_literal(kid),
        });
        self.parent(
            dictionary! {
                "T" => Object::string_literal(parent),
                "FT" => "Tx",
            },
            vec![kid_id],
        );
        self
    }

    pub fn push_button(mut self, name: &str) -> Self {
        self.merged(dictionary! {
            "T" => Object::string_literal(name),
            "FT" => "Btn",
            "Ff" => Object::Integer(65536),
        });
        self
    }

    pub fn signature(mut self, name: &str) -> Self {
        self.merged(dictionary! {
            "T" => Object::string_literal(name),
            "FT" => "Sig",
        });
        self
    }

    /// A field whose kid lists the field itself as a kid.
    pub fn cycle(mut self, name: &str) -> Self {
        let parent_id = self.doc.new_object_id();
        let kid_id = self.doc.add_object(dictionary! {
            "T" => Object::string_literal("Loop"),
            "Kids" => vec![Object::Reference(parent_id)],
        });
        self.doc.objects.insert(
            parent_id,
            Object::Dictionary(dictionary! {
                "T" => Object::string_literal(name),
                "FT" => "Tx",
                "Kids" => vec![Object::Reference(kid_id)],
            }),
        );
        self.fields.push(Object::Reference(parent_id));
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        let pages_id = self.doc.new_object_id();
        self.doc.objects.insert(
            self.page_id,
            Object::Dictionary(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Annots" => self.annots.clone(),
            }),
        );
        self.doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(self.page_id)],
                "Count" => Object::Integer(1),
            }),
        );
        let acroform_id = self.doc.add_object(dictionary! {
            "Fields" => self.fields.clone(),
        });
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
            "AcroForm" => Object::Reference(acroform_id),
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .expect("failed to serialize fixture");
        bytes
    }
}

fn strings(items: &[&str]) -> Vec<Object> {
    items.iter().map(|s| Object::string_literal(*s)).collect()
}

pub const CITIES: &[&str] = &["New York", "London", "Berlin", "Paris", "Rome"];
pub const LANGUAGES: &[&str] = &["English", "German", "French", "Italian"];

/// FullName, Married, City and Language.
pub fn personal_form() -> Vec<u8> {
    FormBuilder::new()
        .text("FullName")
        .checkbox("Married")
        .combo("City", CITIES)
        .list_box("Language", LANGUAGES, false)
        .build()
}

/// One field of every kind plus nested names.
pub fn registration_form() -> Vec<u8> {
    FormBuilder::new()
        .text_with_max_len("FullName", 40)
        .checkbox("Married")
        .radio("Gender", &["Male", "Female", "Other"])
        .combo("City", CITIES)
        .list_box("Languages", LANGUAGES, true)
        .text_with_widgets("Address", 2)
        .text_with_named_kid("Contact", "Phone")
        .push_button("Submit")
        .signature("Signature")
        .build()
}

// ─── Output inspection ──────────────────────────────────────────────────────

pub fn load(bytes: &[u8]) -> lopdf::Document {
    lopdf::Document::load_mem(bytes).expect("output should parse")
}

/// The field dictionary whose `/T` equals `name`.
pub fn field_dict<'a>(doc: &'a lopdf::Document, name: &str) -> (ObjectId, &'a Dictionary) {
    doc.objects
        .iter()
        .find_map(|(id, obj)| {
            let dict = obj.as_dict().ok()?;
            match dict.get(b"T").ok()? {
                Object::String(t, _) if t.as_slice() == name.as_bytes() => Some((*id, dict)),
                _ => None,
            }
        })
        .unwrap_or_else(|| panic!("no field named {name}"))
}

/// Kid widget dictionaries of a field, in `/Kids` order.
pub fn kids<'a>(doc: &'a lopdf::Document, field: &Dictionary) -> Vec<&'a Dictionary> {
    match field.get(b"Kids") {
        Ok(Object::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_reference().ok())
            .filter_map(|id| doc.get_dictionary(id).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// A name entry as a string.
pub fn name_entry(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::Name(n) => Some(String::from_utf8_lossy(n).into_owned()),
        _ => None,
    }
}
