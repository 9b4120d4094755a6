#![allow(dead_code)]

use pdf_batch::*;
use std::sync::{Arc, Mutex};

/// Every character is `ratio * font_size` wide.
pub struct FixedWidth(pub f32);

impl TextMeasurer for FixedWidth {
    fn width_of(&self, text: &str, font_size: f32) -> Result<f32> {
        Ok(text.chars().count() as f32 * self.0 * font_size)
    }
}

/// Fails on any text containing `needle`.
pub struct FailingOn(pub &'static str);

impl TextMeasurer for FailingOn {
    fn width_of(&self, text: &str, font_size: f32) -> Result<f32> {
        if text.contains(self.0) {
            return Err(BatchError::Measure {
                ch: self.0.chars().next().unwrap(),
                font: "test",
            });
        }
        FixedWidth(0.5).width_of(text, font_size)
    }
}

#[derive(Debug, Default)]
pub struct PackLog {
    pub entries: Vec<String>,
    pub finished: bool,
}

/// Packer that records what it was given and returns a fixed blob.
pub struct RecordingPacker {
    pub log: Arc<Mutex<PackLog>>,
    pub fail_finish: bool,
}

impl RecordingPacker {
    pub fn new() -> (Self, Arc<Mutex<PackLog>>) {
        let log = Arc::new(Mutex::new(PackLog::default()));
        (
            Self {
                log: Arc::clone(&log),
                fail_finish: false,
            },
            log,
        )
    }
}

impl ArchivePacker for RecordingPacker {
    fn add_entry(&mut self, path: &str, _bytes: &[u8]) -> Result<()> {
        self.log.lock().unwrap().entries.push(path.to_string());
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        if self.fail_finish {
            return Err(BatchError::Pack("disk full".to_string()));
        }
        self.log.lock().unwrap().finished = true;
        Ok(b"archive".to_vec())
    }
}

/// Renderer that counts calls and emits a placeholder buffer.
#[derive(Default, Clone)]
pub struct CountingRenderer {
    pub calls: Arc<Mutex<usize>>,
}

impl DocumentRenderer for CountingRenderer {
    fn render(&self, _title: &str, pages: &[PageLayout]) -> Result<Vec<u8>> {
        *self.calls.lock().unwrap() += 1;
        Ok(vec![0; pages.len()])
    }
}

/// `count` numbered body lines joined with newlines.
pub fn numbered_lines(count: usize) -> String {
    (1..=count)
        .map(|n| format!("Line {}", n))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Body text of a laid-out document, excluding the title run.
pub fn body_texts(pages: &[PageLayout]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| page.runs.iter())
        .skip(1)
        .map(|run| run.text.clone())
        .collect()
}

/// Renderer that panics for one title and succeeds for the rest.
pub struct PanicsOn(pub &'static str);

impl DocumentRenderer for PanicsOn {
    fn render(&self, title: &str, pages: &[PageLayout]) -> Result<Vec<u8>> {
        if title == self.0 {
            panic!("renderer crashed on {}", title);
        }
        Ok(vec![0; pages.len()])
    }
}

/// A `Tj` text run read back from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub font: Vec<u8>,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    pub bytes: Vec<u8>,
}

/// Text runs of every page in document order, decoded with lopdf.
pub fn drawn_texts(pdf: &[u8]) -> Vec<Vec<DrawnText>> {
    let doc = lopdf::Document::load_mem(pdf).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let data = doc.get_page_content(page_id).unwrap();
            let content = lopdf::content::Content::decode(&data).unwrap();

            let mut runs = Vec::new();
            let (mut font, mut size, mut x, mut y) = (Vec::new(), 0.0, 0.0, 0.0);
            for op in &content.operations {
                match op.operator.as_str() {
                    "Tf" => {
                        font = op.operands[0].as_name().unwrap().to_vec();
                        size = op.operands[1].as_float().unwrap();
                    }
                    "Td" => {
                        x = op.operands[0].as_float().unwrap();
                        y = op.operands[1].as_float().unwrap();
                    }
                    "Tj" => runs.push(DrawnText {
                        font: font.clone(),
                        size,
                        x,
                        y,
                        bytes: op.operands[0].as_str().unwrap().to_vec(),
                    }),
                    _ => {}
                }
            }
            runs
        })
        .collect()
}
