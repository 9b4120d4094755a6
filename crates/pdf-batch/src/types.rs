use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Cannot measure {ch:?} with {font}")]
    Measure { ch: char, font: &'static str },
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("Failed to render item {} ({title:?}): {source}", .index + 1)]
    Render {
        index: usize,
        title: String,
        #[source]
        source: Box<BatchError>,
    },
    #[error("Archive error: {0}")]
    Pack(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<zip::result::ZipError> for BatchError {
    fn from(err: zip::result::ZipError) -> Self {
        BatchError::Pack(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;

/// One requested document: a title and an optional explicit file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub title: String,
    pub file_name: Option<String>,
}

impl BatchItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Shared body text plus the ordered list of titles to render it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub shared_content: String,
    pub items: Vec<BatchItem>,
}

impl GenerationRequest {
    pub fn new(shared_content: impl Into<String>, items: Vec<BatchItem>) -> Self {
        Self {
            shared_content: shared_content.into(),
            items,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.shared_content.is_empty() {
            return Err(BatchError::Validation("No content provided".to_string()));
        }
        if self.items.is_empty() {
            return Err(BatchError::Validation("No titles provided".to_string()));
        }
        Ok(())
    }
}

/// A single positioned run of text. Coordinates are PDF points with the
/// origin at the bottom-left corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub runs: Vec<TextRun>,
}

impl PageLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            runs: Vec::new(),
        }
    }
}

/// One rendered document of a batch.
#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    pub title: String,
    pub file_name: String,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

impl DocumentArtifact {
    /// Path of this document inside the batch archive.
    pub fn archive_path(&self, folder: &str) -> String {
        if folder.is_empty() {
            format!("{}.pdf", self.file_name)
        } else {
            format!("{}/{}.pdf", folder, self.file_name)
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub items: Vec<DocumentArtifact>,
    pub archive: Vec<u8>,
}

/// Progress notification emitted before each item is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the item being rendered
    pub current: usize,
    pub total: usize,
    pub title: String,
}

pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: &Progress);
}

impl<F> ProgressObserver for F
where
    F: Fn(&Progress) + Send + Sync,
{
    fn on_progress(&self, progress: &Progress) {
        self(progress)
    }
}

/// Observer that ignores all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _progress: &Progress) {}
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    /// Portrait dimensions in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (595.28, 841.89),
            PaperSize::A5 => (419.53, 595.28),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
        }
    }
}
