use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_batch::{GenerationRequest, PageGeometry, PaperSize};
use pdf_batch_runtime::{PdfCommand, PdfUpdate, worker_task};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(name = "pdfb", about = "Batch titled PDF generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one PDF per title from shared content and pack them into a ZIP
    Generate {
        /// Shared content file ("-" reads stdin)
        #[arg(short, long)]
        content: PathBuf,

        /// Titles file, one title per line
        #[arg(short, long, required_unless_present = "manifest", conflicts_with = "manifest")]
        titles: Option<PathBuf>,

        /// File names file, one per line (defaults to a slug of each title)
        #[arg(short, long, requires = "titles")]
        file_names: Option<PathBuf>,

        /// CSV manifest (columns: title, file_name)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Output ZIP archive
        #[arg(short, long, default_value = pdf_batch::ARCHIVE_FILE_NAME)]
        output: PathBuf,

        /// Also write each PDF into this directory
        #[arg(long)]
        pdf_dir: Option<PathBuf>,

        #[command(flatten)]
        geometry: GeometryArgs,

        /// Show statistics only, don't generate PDFs
        #[arg(long)]
        stats_only: bool,
    },

    /// Write a page geometry config file to edit and pass back with --config
    InitConfig {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Paper size
        #[arg(long, default_value = "letter", value_enum)]
        paper: PaperArg,
    },
}

#[derive(clap::Args)]
struct GeometryArgs {
    /// Page geometry JSON config (command-line values override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Page margin in points
    #[arg(long)]
    margin: Option<f32>,

    /// Title font size in points
    #[arg(long)]
    title_size: Option<f32>,

    /// Body font size in points
    #[arg(long)]
    body_size: Option<f32>,

    /// Distance between body baselines in points
    #[arg(long)]
    line_height: Option<f32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    Letter,
    Legal,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

impl GeometryArgs {
    async fn resolve(&self) -> Result<PageGeometry> {
        let mut geometry = match &self.config {
            Some(path) => PageGeometry::load(path)
                .await
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => PageGeometry::default(),
        };

        if let Some(paper) = self.paper {
            let (width, height) = PaperSize::from(paper).dimensions_pt();
            geometry.page_width = width;
            geometry.page_height = height;
        }
        if let Some(margin) = self.margin {
            geometry.margin = margin;
        }
        if let Some(size) = self.title_size {
            geometry.title_font_size = size;
        }
        if let Some(size) = self.body_size {
            geometry.body_font_size = size;
        }
        if let Some(height) = self.line_height {
            geometry.line_height = height;
        }

        geometry.validate()?;
        Ok(geometry)
    }
}

async fn read_content(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        tokio::io::stdin().read_to_string(&mut content).await?;
        return Ok(content);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

async fn read_optional(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => Ok(String::new()),
    }
}

/// Run one command on the worker and wait for its updates.
async fn run_command(command: PdfCommand) -> Result<()> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();

    let worker = tokio::spawn(worker_task(command_rx, update_tx));
    command_tx.send(command)?;
    drop(command_tx);

    let mut failure = None;
    while let Some(update) = update_rx.recv().await {
        match update {
            PdfUpdate::Progress {
                operation,
                current,
                total,
            } => {
                println!("[{}/{}] {}", current, total, operation);
            }
            PdfUpdate::BatchComplete {
                archive_path,
                documents,
            } => {
                for doc in &documents {
                    println!(
                        "  {}.pdf  {:?} ({} page(s), {} bytes)",
                        doc.file_name, doc.title, doc.page_count, doc.byte_len
                    );
                }
                println!(
                    "Generated {} PDF(s) → {}",
                    documents.len(),
                    archive_path.display()
                );
            }
            PdfUpdate::StatsCalculated { stats } => {
                println!("Batch Statistics:");
                println!("  Documents: {}", stats.documents);
                println!("  Body lines: {}", stats.body_lines);
                println!("  Pages per document: {}", stats.pages_per_document);
                println!("  Total pages: {}", stats.total_pages);
            }
            PdfUpdate::Error { message } => {
                failure = Some(message);
            }
        }
    }

    worker.await?;

    match failure {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            content,
            titles,
            file_names,
            manifest,
            output,
            pdf_dir,
            geometry,
            stats_only,
        } => {
            let geometry = geometry.resolve().await?;
            let content = read_content(&content).await?;

            let request = match &manifest {
                Some(path) => {
                    let items = pdf_batch::load_items_from_csv(path)
                        .await
                        .with_context(|| format!("Failed to load {}", path.display()))?;
                    GenerationRequest::new(content, items)
                }
                None => {
                    let titles = read_optional(titles.as_ref()).await?;
                    let file_names = read_optional(file_names.as_ref()).await?;
                    GenerationRequest::from_text_fields(&content, &titles, &file_names)
                }
            };

            if stats_only {
                return run_command(PdfCommand::BatchStatistics { request, geometry }).await;
            }

            run_command(PdfCommand::BatchGenerate {
                request,
                geometry,
                archive_path: output,
                documents_dir: pdf_dir,
            })
            .await?;
        }

        Commands::InitConfig { output, paper } => {
            let geometry = PageGeometry::with_paper(paper.into());
            geometry.save(&output).await?;
            println!("Wrote page geometry → {}", output.display());
        }
    }

    Ok(())
}
