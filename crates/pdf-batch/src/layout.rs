//! Page layout: a centered title followed by the wrapped body, flowing onto
//! as many pages as needed.

use crate::metrics::TextMeasurer;
use crate::options::PageGeometry;
use crate::types::{PageLayout, Result, TextRun};
use crate::wrap::wrap_text;

/// Mutable state of one document's layout. Pages are kept in creation order
/// and the last one is always the page being written.
#[derive(Debug)]
struct LayoutState {
    pages: Vec<PageLayout>,
    cursor_y: f32,
}

impl LayoutState {
    fn new(geometry: &PageGeometry) -> Self {
        let mut state = Self {
            pages: Vec::new(),
            cursor_y: 0.0,
        };
        state.start_page(geometry);
        state
    }

    fn start_page(&mut self, geometry: &PageGeometry) {
        self.pages
            .push(PageLayout::new(geometry.page_width, geometry.page_height));
        self.cursor_y = geometry.top_baseline();
    }

    fn current_page(&self) -> usize {
        self.pages.len() - 1
    }

    fn draw(&mut self, text: String, x: f32, font_size: f32) {
        let y = self.cursor_y;
        if let Some(page) = self.pages.last_mut() {
            page.runs.push(TextRun {
                text,
                x,
                y,
                font_size,
            });
        }
    }

    fn into_pages(self) -> Vec<PageLayout> {
        self.pages
    }
}

/// Lay out a titled document. The title is centered on the first page only;
/// continuation pages start their body at the same top baseline.
pub fn layout_document(
    title: &str,
    body: &str,
    geometry: &PageGeometry,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<PageLayout>> {
    let mut state = LayoutState::new(geometry);

    let title_width = measurer.width_of(title, geometry.title_font_size)?;
    let title_x = (geometry.page_width - title_width) / 2.0;
    state.draw(title.to_string(), title_x, geometry.title_font_size);
    state.cursor_y -= geometry.title_gap;

    let max_width = geometry.text_width();
    for paragraph in paragraphs(body) {
        for line in wrap_text(paragraph, max_width, geometry.body_font_size, measurer)? {
            if state.cursor_y < geometry.lowest_line_start() {
                state.start_page(geometry);
            }
            state.draw(line, geometry.margin, geometry.body_font_size);
            state.cursor_y -= geometry.line_height;
        }
    }

    log::debug!(
        "Laid out {:?} on {} page(s)",
        title,
        state.current_page() + 1
    );

    Ok(state.into_pages())
}

/// Split on `\n` or `\r\n`. An empty body is a single empty paragraph.
pub fn paragraphs(body: &str) -> impl Iterator<Item = &str> {
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Count the wrapped body lines without building pages.
pub fn count_body_lines(
    body: &str,
    geometry: &PageGeometry,
    measurer: &dyn TextMeasurer,
) -> Result<usize> {
    let mut count = 0;
    for paragraph in paragraphs(body) {
        count += wrap_text(
            paragraph,
            geometry.text_width(),
            geometry.body_font_size,
            measurer,
        )?
        .len();
    }
    Ok(count)
}
