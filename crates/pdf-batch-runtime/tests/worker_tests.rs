use pdf_batch::BatchItem;
use pdf_batch_runtime::*;
use tokio::sync::mpsc;

async fn run_commands(commands: Vec<PdfCommand>) -> Vec<PdfUpdate> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();

    for cmd in commands {
        command_tx.send(cmd).unwrap();
    }
    drop(command_tx);

    worker_task(command_rx, update_tx).await;

    let mut updates = Vec::new();
    while let Some(update) = update_rx.recv().await {
        updates.push(update);
    }
    updates
}

#[tokio::test]
async fn test_generate_reports_progress_and_completion() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("all_pdfs.zip");
    let documents_dir = dir.path().join("pdfs");

    let updates = run_commands(vec![PdfCommand::BatchGenerate {
        request: GenerationRequest::from_text_fields("Hello world", "A\nB", ""),
        geometry: PageGeometry::default(),
        archive_path: archive_path.clone(),
        documents_dir: Some(documents_dir.clone()),
    }])
    .await;

    assert_eq!(updates.len(), 3);
    match &updates[0] {
        PdfUpdate::Progress { current, total, .. } => assert_eq!((*current, *total), (1, 2)),
        other => panic!("Expected Progress, got {:?}", other),
    }
    match &updates[1] {
        PdfUpdate::Progress { current, total, .. } => assert_eq!((*current, *total), (2, 2)),
        other => panic!("Expected Progress, got {:?}", other),
    }
    match &updates[2] {
        PdfUpdate::BatchComplete {
            archive_path: path,
            documents,
        } => {
            assert_eq!(path, &archive_path);
            let names: Vec<_> = documents.iter().map(|d| d.file_name.as_str()).collect();
            assert_eq!(names, vec!["a", "b"]);
            assert!(documents.iter().all(|d| d.page_count == 1 && d.byte_len > 0));
        }
        other => panic!("Expected BatchComplete, got {:?}", other),
    }

    assert!(archive_path.exists());
    assert!(documents_dir.join("a.pdf").exists());
    assert!(documents_dir.join("b.pdf").exists());
}

#[tokio::test]
async fn test_validation_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let archive_path = dir.path().join("out.zip");

    let updates = run_commands(vec![PdfCommand::BatchGenerate {
        request: GenerationRequest::from_text_fields("Content", "", ""),
        geometry: PageGeometry::default(),
        archive_path: archive_path.clone(),
        documents_dir: None,
    }])
    .await;

    assert_eq!(updates.len(), 1);
    match &updates[0] {
        PdfUpdate::Error { message } => assert!(message.contains("No titles")),
        other => panic!("Expected Error, got {:?}", other),
    }
    assert!(!archive_path.exists());
}

#[tokio::test]
async fn test_statistics_command() {
    let request = GenerationRequest::new(
        "one\ntwo\nthree",
        vec![BatchItem::new("A"), BatchItem::new("B"), BatchItem::new("C")],
    );
    let updates = run_commands(vec![PdfCommand::BatchStatistics {
        request,
        geometry: PageGeometry::default(),
    }])
    .await;

    match updates.as_slice() {
        [PdfUpdate::StatsCalculated { stats }] => {
            assert_eq!(stats.documents, 3);
            assert_eq!(stats.body_lines, 3);
            assert_eq!(stats.pages_per_document, 1);
            assert_eq!(stats.total_pages, 3);
        }
        other => panic!("Expected StatsCalculated, got {:?}", other),
    }
}
