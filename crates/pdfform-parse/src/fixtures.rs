//! In-code PDF builders shared by the unit tests.

use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};

use crate::document::FormDocument;

/// Builds a one-page document with an AcroForm.
pub struct Fixture {
    pub doc: lopdf::Document,
    pub page_id: ObjectId,
    pub fields: Vec<Object>,
    pub annots: Vec<Object>,
}

impl Fixture {
    pub fn new() -> Self {
        let mut doc = lopdf::Document::with_version("1.7");
        let page_id = doc.new_object_id();
        Self {
            doc,
            page_id,
            fields: Vec::new(),
            annots: Vec::new(),
        }
    }

    pub fn add(&mut self, dict: Dictionary) -> ObjectId {
        self.doc.add_object(dict)
    }

    pub fn root(&mut self, dict: Dictionary) -> ObjectId {
        let id = self.add(dict);
        self.fields.push(Object::Reference(id));
        id
    }

    pub fn states(&mut self, names: &[&str]) -> Dictionary {
        let mut normal = Dictionary::new();
        for name in names {
            let stream = self.doc.add_object(Stream::new(dictionary! {}, Vec::new()));
            normal.set(*name, Object::Reference(stream));
        }
        dictionary! { "N" => normal }
    }

    pub fn finish(mut self) -> FormDocument {
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
        FormDocument::from_document(self.doc)
    }
}
