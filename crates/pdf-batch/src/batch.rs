//! Batch generation: one document per title over a shared body, packed into
//! a single archive.
//!
//! Items are processed strictly in input order. Each item runs layout and
//! rendering on the blocking pool and is awaited before the next one starts,
//! with a yield in between so progress observers get a chance to run.

use crate::archive::{ArchivePacker, ZipPacker};
use crate::layout::layout_document;
use crate::metrics::{TextMeasurer, TimesRoman};
use crate::naming::resolve_file_name;
use crate::options::PageGeometry;
use crate::pdf::{DocumentRenderer, PdfRenderer};
use crate::types::*;
use std::collections::HashSet;
use std::sync::Arc;

/// Folder inside the archive that holds the documents
pub const ARCHIVE_FOLDER: &str = "pdfs";

/// Suggested file name for the combined archive
pub const ARCHIVE_FILE_NAME: &str = "all_pdfs.zip";

#[derive(Clone)]
pub struct BatchGenerator {
    geometry: PageGeometry,
    measurer: Arc<dyn TextMeasurer>,
    renderer: Arc<dyn DocumentRenderer>,
    archive_folder: String,
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new(PageGeometry::default())
    }
}

impl BatchGenerator {
    /// Generator using Times-Roman metrics and the PDF renderer.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            measurer: Arc::new(TimesRoman),
            renderer: Arc::new(PdfRenderer),
            archive_folder: ARCHIVE_FOLDER.to_string(),
        }
    }

    pub fn with_measurer(mut self, measurer: impl TextMeasurer + 'static) -> Self {
        self.measurer = Arc::new(measurer);
        self
    }

    pub fn with_renderer(mut self, renderer: impl DocumentRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    pub fn with_archive_folder(mut self, folder: impl Into<String>) -> Self {
        self.archive_folder = folder.into();
        self
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    /// Generate every document of `request` into a ZIP archive.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        observer: &dyn ProgressObserver,
    ) -> Result<BatchResult> {
        self.generate_with(request, ZipPacker::new(), observer).await
    }

    /// Generate every document of `request` into the given packer.
    ///
    /// Fails fast on invalid input before any rendering. The first failing
    /// item aborts the batch with [`BatchError::Render`]; no archive is
    /// produced in that case.
    pub async fn generate_with<P: ArchivePacker>(
        &self,
        request: &GenerationRequest,
        mut packer: P,
        observer: &dyn ProgressObserver,
    ) -> Result<BatchResult> {
        request.validate()?;
        self.geometry.validate()?;

        let total = request.items.len();
        log::info!("Generating {} document(s)", total);

        let content: Arc<str> = Arc::from(request.shared_content.as_str());
        let mut used_names = HashSet::with_capacity(total);
        let mut items = Vec::with_capacity(total);

        for (index, item) in request.items.iter().enumerate() {
            observer.on_progress(&Progress {
                current: index + 1,
                total,
                title: item.title.clone(),
            });

            let file_name = unique_name(
                resolve_file_name(&item.title, item.file_name.as_deref(), index),
                index,
                &mut used_names,
            );

            let title = item.title.clone();
            let body = Arc::clone(&content);
            let geometry = self.geometry;
            let measurer = Arc::clone(&self.measurer);
            let renderer = Arc::clone(&self.renderer);

            let rendered = tokio::task::spawn_blocking(move || {
                render_document(&title, &body, &geometry, &*measurer, &*renderer)
            })
            .await
            .map_err(|e| {
                log::warn!("Item {} ({:?}) did not finish: {}", index + 1, item.title, e);
                BatchError::Render {
                    index,
                    title: item.title.clone(),
                    source: Box::new(BatchError::TaskJoin(e)),
                }
            })?;

            let (bytes, page_count) = rendered.map_err(|source| {
                log::warn!("Item {} ({:?}) failed: {}", index + 1, item.title, source);
                BatchError::Render {
                    index,
                    title: item.title.clone(),
                    source: Box::new(source),
                }
            })?;

            let artifact = DocumentArtifact {
                title: item.title.clone(),
                file_name,
                page_count,
                bytes,
            };
            packer.add_entry(&artifact.archive_path(&self.archive_folder), &artifact.bytes)?;
            log::debug!(
                "Rendered {:?} ({} page(s), {} bytes)",
                artifact.file_name,
                artifact.page_count,
                artifact.bytes.len()
            );
            items.push(artifact);

            tokio::task::yield_now().await;
        }

        let archive = packer.finish()?;
        log::info!(
            "Packed {} document(s) into {} byte archive",
            items.len(),
            archive.len()
        );

        Ok(BatchResult { items, archive })
    }
}

/// Lay out and serialize one document. Returns the bytes and the page count.
pub fn render_document(
    title: &str,
    body: &str,
    geometry: &PageGeometry,
    measurer: &dyn TextMeasurer,
    renderer: &dyn DocumentRenderer,
) -> Result<(Vec<u8>, usize)> {
    let pages = layout_document(title, body, geometry, measurer)?;
    let bytes = renderer.render(title, &pages)?;
    Ok((bytes, pages.len()))
}

/// Append `-<index+1>` (then further counters) until `name` is unused.
/// Names are compared case-insensitively so entries stay distinct when the
/// archive is extracted onto a case-insensitive filesystem.
fn unique_name(name: String, index: usize, used: &mut HashSet<String>) -> String {
    let mut candidate = name.clone();
    let mut suffix = index + 1;
    while used.contains(&candidate.to_lowercase()) {
        candidate = format!("{}-{}", name, suffix);
        suffix += 1;
    }
    if candidate != name {
        log::warn!(
            "File name {:?} is already used, item {} saved as {:?}",
            name,
            index + 1,
            candidate
        );
    }
    used.insert(candidate.to_lowercase());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_names_are_disambiguated_by_position() {
        let mut used = HashSet::new();
        assert_eq!(unique_name("a".into(), 0, &mut used), "a");
        assert_eq!(unique_name("a".into(), 1, &mut used), "a-2");
        assert_eq!(unique_name("b".into(), 2, &mut used), "b");
        assert_eq!(unique_name("a".into(), 3, &mut used), "a-4");
    }

    #[test]
    fn suffix_skips_names_already_taken() {
        let mut used = HashSet::new();
        assert_eq!(unique_name("a-2".into(), 0, &mut used), "a-2");
        assert_eq!(unique_name("a".into(), 1, &mut used), "a");
        assert_eq!(unique_name("a".into(), 1, &mut used), "a-3");
    }

    #[test]
    fn names_differing_only_in_case_collide() {
        let mut used = HashSet::new();
        assert_eq!(unique_name("Report".into(), 0, &mut used), "Report");
        assert_eq!(unique_name("report".into(), 1, &mut used), "report-2");
        assert_eq!(unique_name("REPORT-2".into(), 2, &mut used), "REPORT-2-3");
    }
}
