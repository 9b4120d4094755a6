use crate::types::{BatchError, Result};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Collects named entries and packs them into one blob.
pub trait ArchivePacker {
    fn add_entry(&mut self, path: &str, bytes: &[u8]) -> Result<()>;
    fn finish(self) -> Result<Vec<u8>>;
}

/// In-memory Deflate-compressed ZIP archive.
pub struct ZipPacker {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl ZipPacker {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
        }
    }
}

impl Default for ZipPacker {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchivePacker for ZipPacker {
    fn add_entry(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        self.writer.start_file(path, self.options)?;
        self.writer
            .write_all(bytes)
            .map_err(|e| BatchError::Pack(format!("Failed to write {}: {}", path, e)))?;
        Ok(())
    }

    fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}
