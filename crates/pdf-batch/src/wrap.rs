use crate::metrics::TextMeasurer;
use crate::types::Result;

/// Greedily wrap one paragraph into lines no wider than `max_width`.
///
/// Words are separated by single spaces and are never split, so a word wider
/// than `max_width` ends up alone on an overflowing line. An empty paragraph
/// yields a single empty line.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    font_size: f32,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<String>> {
    if text.is_empty() {
        return Ok(vec![String::new()]);
    }

    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split(' ') {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", line, word)
        };

        if measurer.width_of(&candidate, font_size)? > max_width && !line.is_empty() {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    Ok(lines)
}
