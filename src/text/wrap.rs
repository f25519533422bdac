use crate::text::measure::TextMeasure;

/// Greedy word wrap.
///
/// Words (whitespace separated) are appended to the current line while the measured line still
/// fits in `max_width_px`. A word that does not fit starts a new line; a word that is wider than
/// `max_width_px` on its own still gets its own line, unbroken. Empty or whitespace-only input
/// produces no lines.
pub fn wrap_words<M>(text: &str, measure: &mut M, max_width_px: f32) -> Vec<String>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure.width(&candidate) <= max_width_px {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
