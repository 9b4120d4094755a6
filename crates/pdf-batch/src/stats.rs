use crate::layout::count_body_lines;
use crate::metrics::TextMeasurer;
use crate::options::PageGeometry;
use crate::types::*;

/// Page counts for a batch, computed without rendering anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStatistics {
    pub documents: usize,
    /// Wrapped lines of the shared body (the same for every document)
    pub body_lines: usize,
    pub pages_per_document: usize,
    pub total_pages: usize,
}

/// Calculate statistics for a batch. The body is wrapped once since every
/// document shares it.
pub fn calculate_statistics(
    request: &GenerationRequest,
    geometry: &PageGeometry,
    measurer: &dyn TextMeasurer,
) -> Result<BatchStatistics> {
    request.validate()?;
    geometry.validate()?;

    let body_lines = count_body_lines(&request.shared_content, geometry, measurer)?;
    let pages_per_document = geometry.page_count(body_lines);
    let documents = request.items.len();

    Ok(BatchStatistics {
        documents,
        body_lines,
        pages_per_document,
        total_pages: documents * pages_per_document,
    })
}
