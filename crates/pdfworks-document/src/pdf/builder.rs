// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document builder: assembles a brand-new PDF by copying pages (and every
// object they transitively reference) out of one or more source documents.
//
// Split, merge, redact, lock and unlock all produce their output this way, so
// only objects reachable from the copied pages end up in the written file.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use pdfworks_core::error::{PdfWorksError, Result};
use tracing::{debug, warn};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed, cyclic /Parent chains.
const MAX_TREE_DEPTH: usize = 64;

/// Copies objects out of a single source document, remembering which source
/// objects were already copied so shared resources (fonts, images) are
/// written once and reference cycles terminate.
pub struct ObjectCopier<'a> {
    source: &'a Document,
    remap: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    pub fn new(source: &'a Document) -> Self {
        Self {
            source,
            remap: HashMap::new(),
        }
    }

    pub fn source(&self) -> &'a Document {
        self.source
    }

    /// Number of distinct source objects copied so far.
    pub fn copied_objects(&self) -> usize {
        self.remap.len()
    }

    /// Return the target id for `source_id`, allocating one if needed.
    fn reserve(&mut self, target: &mut Document, source_id: ObjectId) -> ObjectId {
        *self
            .remap
            .entry(source_id)
            .or_insert_with(|| target.new_object_id())
    }

    /// Copy the object behind `source_id` into `target`, returning its new id.
    ///
    /// Unresolvable references yield `None`; the caller substitutes `Null`.
    pub fn copy_reference(&mut self, target: &mut Document, source_id: ObjectId) -> Option<ObjectId> {
        if let Some(&mapped) = self.remap.get(&source_id) {
            return Some(mapped);
        }

        let source = self.source;
        let object = match source.get_object(source_id) {
            Ok(object) => object,
            Err(err) => {
                warn!(?source_id, %err, "Cannot resolve reference, using Null");
                return None;
            }
        };

        let new_id = self.reserve(target, source_id);
        let copied = self.copy_object(target, object);
        target.objects.insert(new_id, copied);
        Some(new_id)
    }

    /// Deep-copy a single object, following references. /Parent entries are
    /// dropped; the builder re-attaches pages to its own page tree.
    pub fn copy_object(&mut self, target: &mut Document, object: &Object) -> Object {
        match object {
            Object::Reference(id) => self
                .copy_reference(target, *id)
                .map_or(Object::Null, Object::Reference),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy_object(target, item))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(target, dict)),
            Object::Stream(stream) => {
                let dict = self.copy_dictionary(target, &stream.dict);
                Object::Stream(lopdf::Stream::new(dict, stream.content.clone()))
            }
            // Boolean, Integer, Real, String, Name, Null.
            other => other.clone(),
        }
    }

    fn copy_dictionary(&mut self, target: &mut Document, dict: &Dictionary) -> Dictionary {
        let mut copied = Dictionary::new();
        for (key, value) in dict.iter() {
            if key.as_slice() == b"Parent" {
                continue;
            }
            let value = self.copy_object(target, value);
            copied.set(key.clone(), value);
        }
        copied
    }
}

/// A fresh output document with its own page tree.
pub struct DocumentBuilder {
    document: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
}

impl DocumentBuilder {
    /// Start an empty document with the given header version (e.g. `"1.5"`).
    pub fn new(version: &str) -> Self {
        let mut document = Document::with_version(version);
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Pages appended so far.
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Append one source page as the last page of the output.
    pub fn copy_page(&mut self, copier: &mut ObjectCopier<'_>, page_id: ObjectId) -> Result<ObjectId> {
        let source = copier.source();
        let mut page = source
            .get_dictionary(page_id)
            .map_err(|err| {
                PdfWorksError::PdfError(format!("cannot read page object {:?}: {}", page_id, err))
            })?
            .clone();

        for key in INHERITABLE_ATTRIBUTES {
            if !page.has(key)
                && let Some(value) = inherited_attribute(source, &page, key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }

        // Reserve the id first so references back to this page resolve to it.
        let new_id = copier.reserve(&mut self.document, page_id);
        let mut copied = copier.copy_dictionary(&mut self.document, &page);
        copied.set("Parent", Object::Reference(self.pages_id));
        self.document
            .objects
            .insert(new_id, Object::Dictionary(copied));
        self.kids.push(new_id);

        Ok(new_id)
    }

    /// Append every page of `source` in document order. Returns the number
    /// of pages appended.
    pub fn copy_all_pages(&mut self, source: &Document) -> Result<usize> {
        let mut copier = ObjectCopier::new(source);
        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
        for page_id in &page_ids {
            self.copy_page(&mut copier, *page_id)?;
        }
        debug!(
            pages = page_ids.len(),
            objects = copier.copied_objects(),
            "Pages copied"
        );
        Ok(page_ids.len())
    }

    /// Copy the source's /Info dictionary, if it has one.
    pub fn copy_metadata(&mut self, source: &Document) -> bool {
        let mut copier = ObjectCopier::new(source);
        let info = match source.trailer.get(b"Info") {
            Ok(Object::Reference(id)) => copier.copy_reference(&mut self.document, *id),
            Ok(Object::Dictionary(dict)) => {
                let copied = copier.copy_dictionary(&mut self.document, dict);
                Some(self.document.add_object(copied))
            }
            _ => None,
        };

        match info {
            Some(info_id) => {
                self.document.trailer.set("Info", Object::Reference(info_id));
                true
            }
            None => false,
        }
    }

    /// Set the trailer /ID pair.
    pub fn set_file_id(&mut self, id: &[u8]) {
        let id = Object::String(id.to_vec(), StringFormat::Hexadecimal);
        self.document
            .trailer
            .set("ID", Object::Array(vec![id.clone(), id]));
    }

    /// Write the page tree and catalog and hand back the finished document.
    pub fn finish(mut self) -> Document {
        let kids: Vec<Object> = self.kids.iter().map(|id| Object::Reference(*id)).collect();
        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(self.kids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.document.add_object(catalog);
        self.document
            .trailer
            .set("Root", Object::Reference(catalog_id));

        self.document
    }

    /// Finish and serialise the document.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut document = self.finish();
        save_to_bytes(&mut document)
    }
}

/// Serialise a lopdf document into memory.
pub fn save_to_bytes(document: &mut Document) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    document
        .save_to(&mut output)
        .map_err(|err| PdfWorksError::PdfError(format!("failed to serialise PDF: {}", err)))?;
    Ok(output)
}

/// Walk the /Parent chain looking for an inherited page attribute.
fn inherited_attribute<'a>(source: &'a Document, page: &Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    for _ in 0..MAX_TREE_DEPTH {
        let node = source.get_dictionary(parent?).ok()?;
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}
