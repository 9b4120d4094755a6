use crate::metrics::{TimesRoman, encode_win_ansi};
use crate::types::{BatchError, PageLayout, Result, TextRun};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// Resource name of the body font in every page's font dictionary
const FONT_KEY: &str = "F1";

/// Serializes laid-out pages into a document.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, title: &str, pages: &[PageLayout]) -> Result<Vec<u8>>;
}

/// Renders pages to PDF with the builtin Times-Roman font under
/// WinAnsiEncoding. Text strings are written as WinAnsi bytes, matching the
/// repertoire [`TimesRoman`] measures.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl DocumentRenderer for PdfRenderer {
    fn render(&self, title: &str, pages: &[PageLayout]) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(BatchError::Pdf("Document has no pages".to_string()));
        }

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let resources_id = add_font_resources(&mut doc);

        let mut kids = Vec::with_capacity(pages.len());
        for page in pages {
            let content = page_content(&page.runs)?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

            let page_dict = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Real(page.width),
                        Object::Real(page.height),
                    ]),
                ),
                ("Resources", Object::Reference(resources_id)),
                ("Contents", Object::Reference(content_id)),
            ]);
            kids.push(Object::Reference(doc.add_object(page_dict)));
        }

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(kids.len() as i64)),
            ("Kids", Object::Array(kids)),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        let info_id = doc.add_object(Dictionary::from_iter(vec![(
            "Title",
            Object::String(utf16_text_string(title), StringFormat::Hexadecimal),
        )]));
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| BatchError::Pdf(format!("Failed to serialize {:?}: {}", title, e)))?;
        Ok(bytes)
    }
}

/// Shared resource dictionary naming Times-Roman as `/F1`.
fn add_font_resources(doc: &mut Document) -> ObjectId {
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(TimesRoman::NAME.as_bytes().to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ]));

    let mut fonts = Dictionary::new();
    fonts.set(FONT_KEY, Object::Reference(font_id));

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));
    doc.add_object(resources)
}

/// One `BT .. ET` text object per run.
fn page_content(runs: &[TextRun]) -> Result<Vec<u8>> {
    let mut operations = Vec::with_capacity(runs.len() * 5);
    for run in runs {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![Object::Name(FONT_KEY.as_bytes().to_vec()), Object::Real(run.font_size)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Real(run.x), Object::Real(run.y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&run.text)?,
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    Content { operations }
        .encode()
        .map_err(|e| BatchError::Pdf(format!("Failed to encode page content: {}", e)))
}

/// Document-information strings take UTF-16BE with a byte-order mark, so the
/// title metadata keeps characters the page font cannot draw.
fn utf16_text_string(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}
