use std::path::PathBuf;

mod worker;

// Re-export types from library crates
pub use pdf_batch::{BatchStatistics, GenerationRequest, PageGeometry};
pub use worker::{ChannelProgress, worker_task};

/// Commands sent to the worker
#[derive(Debug)]
pub enum PdfCommand {
    BatchGenerate {
        request: GenerationRequest,
        geometry: PageGeometry,
        archive_path: PathBuf,
        /// Also write each document here when set
        documents_dir: Option<PathBuf>,
    },
    BatchStatistics {
        request: GenerationRequest,
        geometry: PageGeometry,
    },
}

/// Updates sent from the worker
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    BatchComplete {
        archive_path: PathBuf,
        documents: Vec<GeneratedDocument>,
    },
    StatsCalculated {
        stats: BatchStatistics,
    },
    Error {
        message: String,
    },
}

/// Summary of one generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub title: String,
    pub file_name: String,
    pub page_count: usize,
    pub byte_len: usize,
}
