use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed page and typography settings for one batch run. All values are in
/// PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub title_font_size: f32,
    pub body_font_size: f32,
    pub line_height: f32,
    /// Distance between the top margin and the first baseline of every page
    pub title_top_offset: f32,
    /// Vertical space consumed by the title before the body starts
    pub title_gap: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 40.0,
            title_font_size: 24.0,
            body_font_size: 12.0,
            line_height: 18.0,
            title_top_offset: 10.0,
            title_gap: 30.0,
        }
    }
}

impl PageGeometry {
    pub fn with_paper(paper: PaperSize) -> Self {
        let (page_width, page_height) = paper.dimensions_pt();
        Self {
            page_width,
            page_height,
            ..Default::default()
        }
    }

    /// Load geometry from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let geometry: Self = serde_json::from_slice(&bytes)
            .map_err(|e| BatchError::Config(format!("Failed to parse config: {}", e)))?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Save geometry to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BatchError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("title_font_size", self.title_font_size),
            ("body_font_size", self.body_font_size),
            ("line_height", self.line_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(BatchError::Config(format!("{} must be positive", name)));
            }
        }

        let non_negative = [
            ("margin", self.margin),
            ("title_top_offset", self.title_top_offset),
            ("title_gap", self.title_gap),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(BatchError::Config(format!("{} must not be negative", name)));
            }
        }

        if self.margin * 2.0 >= self.page_width || self.margin * 2.0 >= self.page_height {
            return Err(BatchError::Config(
                "Margins leave no room on the page".to_string(),
            ));
        }

        if self.continuation_capacity() == 0 {
            return Err(BatchError::Config(
                "Page is too short to hold a single body line".to_string(),
            ));
        }

        Ok(())
    }

    /// Width available to body text
    pub fn text_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Baseline of the first run on every page
    pub fn top_baseline(&self) -> f32 {
        self.page_height - self.margin - self.title_top_offset
    }

    /// Lowest cursor position that still accepts another body line
    pub fn lowest_line_start(&self) -> f32 {
        self.margin + self.line_height
    }

    /// Body lines that fit on the first page below the title
    pub fn first_page_capacity(&self) -> usize {
        self.lines_from(self.top_baseline() - self.title_gap)
    }

    /// Body lines that fit on every page after the first
    pub fn continuation_capacity(&self) -> usize {
        self.lines_from(self.top_baseline())
    }

    /// Number of pages a body of `body_lines` wrapped lines occupies.
    pub fn page_count(&self, body_lines: usize) -> usize {
        let first = self.first_page_capacity();
        let overflow = body_lines.saturating_sub(first);
        match self.continuation_capacity() {
            0 => 1,
            full => 1 + overflow.div_ceil(full),
        }
    }

    fn lines_from(&self, start: f32) -> usize {
        let lowest = self.lowest_line_start();
        if start < lowest {
            return 0;
        }
        // a line is drawn at `start`, then one per `line_height` while the
        // cursor stays at or above `lowest`
        ((start - lowest) / self.line_height).floor() as usize + 1
    }
}
