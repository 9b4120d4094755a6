use crate::types::{BatchError, BatchItem, GenerationRequest, Result};
use std::path::Path;

fn non_blank_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl GenerationRequest {
    /// Build a request from the raw form fields: shared content, one title
    /// per line, and optionally one file name per line.
    ///
    /// File names pair with titles by position after blank lines are
    /// dropped. Missing names fall back to the title slug and extra names are
    /// ignored; neither case is an error.
    pub fn from_text_fields(content: &str, titles: &str, file_names: &str) -> Self {
        let titles = non_blank_lines(titles);
        let mut file_names = non_blank_lines(file_names);

        if !file_names.is_empty() && file_names.len() != titles.len() {
            log::warn!(
                "Got {} file name(s) for {} title(s); unmatched entries use title slugs or are ignored",
                file_names.len(),
                titles.len()
            );
        }
        file_names.truncate(titles.len());

        let mut file_names = file_names.into_iter();
        let items = titles
            .into_iter()
            .map(|title| BatchItem {
                title,
                file_name: file_names.next(),
            })
            .collect();

        Self::new(content, items)
    }
}

/// Load batch items from a CSV manifest with a header row. The first column
/// is the title and the optional second column the file name.
pub async fn load_items_from_csv(path: impl AsRef<Path>) -> Result<Vec<BatchItem>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let items = tokio::task::spawn_blocking(move || parse_items_csv(&contents)).await??;

    Ok(items)
}

pub fn parse_items_csv(contents: &str) -> Result<Vec<BatchItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());
    let mut items = Vec::new();

    for result in reader.records() {
        let record = result?;
        let title = match record.get(0) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => continue,
        };
        let file_name = record
            .get(1)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        items.push(BatchItem { title, file_name });
    }

    if items.is_empty() {
        return Err(BatchError::Validation(
            "Manifest contains no titles".to_string(),
        ));
    }

    Ok(items)
}
