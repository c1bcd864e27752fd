// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fixtures for the pipeline integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, Stream};

/// Write a PDF with one page per entry in `texts` to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, texts: &[&str]) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    let font_id = doc.add_object(font);

    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    let mut kids = Vec::new();
    for text in texts {
        let content = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", text);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page = Dictionary::new();
        page.set("Type", Object::Name(b"Page".to_vec()));
        page.set("Parent", Object::Reference(pages_id));
        page.set("Contents", Object::Reference(content_id));
        page.set("Resources", Object::Dictionary(resources.clone()));
        page.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
        );
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(kids.len() as i64));
    pages.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let path = dir.join(name);
    doc.save(&path).unwrap();
    path
}

/// The literal shown on each page of `doc`, in page order.
pub fn page_texts(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .into_values()
        .map(|page_id| {
            let content = doc.get_page_content(page_id).unwrap();
            let text = String::from_utf8_lossy(&content);
            let start = text.find('(').map_or(0, |i| i + 1);
            let end = text.rfind(')').unwrap_or(text.len());
            text[start..end].to_string()
        })
        .collect()
}

/// Every entry of a ZIP file as `(name, bytes)`, in archive order.
pub fn zip_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let bytes = std::fs::read(path).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}
