use crate::{GeneratedDocument, PdfCommand, PdfUpdate};
use pdf_batch::{
    BatchGenerator, GenerationRequest, PageGeometry, Progress, ProgressObserver,
    calculate_statistics, save_archive, save_documents,
};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Forwards batch progress as [`PdfUpdate::Progress`].
pub struct ChannelProgress {
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
}

impl ChannelProgress {
    pub fn new(update_tx: mpsc::UnboundedSender<PdfUpdate>) -> Self {
        Self { update_tx }
    }
}

impl ProgressObserver for ChannelProgress {
    fn on_progress(&self, progress: &Progress) {
        let _ = self.update_tx.send(PdfUpdate::Progress {
            operation: format!("Generating {:?}", progress.title),
            current: progress.current,
            total: progress.total,
        });
    }
}

/// Async worker task that processes batch commands in order and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(cmd: PdfCommand, update_tx: &mpsc::UnboundedSender<PdfUpdate>) {
    match cmd {
        PdfCommand::BatchGenerate {
            request,
            geometry,
            archive_path,
            documents_dir,
        } => {
            handle_generate(request, geometry, archive_path, documents_dir, update_tx).await;
        }
        PdfCommand::BatchStatistics { request, geometry } => {
            handle_statistics(request, geometry, update_tx);
        }
    }
}

async fn handle_generate(
    request: GenerationRequest,
    geometry: PageGeometry,
    archive_path: PathBuf,
    documents_dir: Option<PathBuf>,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let generator = BatchGenerator::new(geometry);
    let observer = ChannelProgress::new(update_tx.clone());

    let result = match generator.generate(&request, &observer).await {
        Ok(result) => result,
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to generate batch: {e}"),
            });
            return;
        }
    };

    if let Err(e) = save_archive(&result, &archive_path).await {
        let _ = update_tx.send(PdfUpdate::Error {
            message: format!("Failed to write {}: {e}", archive_path.display()),
        });
        return;
    }

    if let Some(dir) = documents_dir {
        if let Err(e) = save_documents(&result, &dir).await {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to write documents to {}: {e}", dir.display()),
            });
            return;
        }
    }

    let documents = result
        .items
        .iter()
        .map(|artifact| GeneratedDocument {
            title: artifact.title.clone(),
            file_name: artifact.file_name.clone(),
            page_count: artifact.page_count,
            byte_len: artifact.bytes.len(),
        })
        .collect();

    let _ = update_tx.send(PdfUpdate::BatchComplete {
        archive_path,
        documents,
    });
}

fn handle_statistics(
    request: GenerationRequest,
    geometry: PageGeometry,
    update_tx: &mpsc::UnboundedSender<PdfUpdate>,
) {
    let generator = BatchGenerator::new(geometry);
    match calculate_statistics(&request, generator.geometry(), generator.measurer()) {
        Ok(stats) => {
            let _ = update_tx.send(PdfUpdate::StatsCalculated { stats });
        }
        Err(e) => {
            let _ = update_tx.send(PdfUpdate::Error {
                message: format!("Failed to calculate statistics: {e}"),
            });
        }
    }
}
