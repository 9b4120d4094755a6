pub mod archive;
pub mod batch;
mod input;
pub mod layout;
pub mod metrics;
pub mod naming;
mod options;
mod output;
pub mod pdf;
mod stats;
mod types;
pub mod wrap;

pub use archive::{ArchivePacker, ZipPacker};
pub use batch::{ARCHIVE_FILE_NAME, ARCHIVE_FOLDER, BatchGenerator, render_document};
pub use input::{load_items_from_csv, parse_items_csv};
pub use layout::layout_document;
pub use metrics::{TextMeasurer, TimesRoman, encode_win_ansi, win_ansi_code};
pub use naming::{PLACEHOLDER_NAME, resolve_file_name, slugify};
pub use options::PageGeometry;
pub use output::{save_archive, save_documents};
pub use pdf::{DocumentRenderer, PdfRenderer};
pub use stats::{BatchStatistics, calculate_statistics};
pub use types::*;
pub use wrap::wrap_text;
