use std::path::PathBuf;

use crate::assets::theme::Theme;

/// Author used when a quote arrives without one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A quote and its attribution.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuoteRecord {
    /// Quote body.
    pub text: String,
    /// Attribution; defaults to `"Unknown"`.
    #[serde(default = "unknown_author")]
    pub author: String,
}

fn unknown_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

impl QuoteRecord {
    /// Build a record. A blank author becomes `"Unknown"`.
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        let author = author.into();
        let author = if author.trim().is_empty() {
            unknown_author()
        } else {
            author
        };
        Self {
            text: text.into(),
            author,
        }
    }
}

/// Everything needed to render one card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    /// Quote body; may be empty.
    pub quote_text: String,
    /// Author name, without prefix.
    pub author: String,
    /// Theme used to pick the background.
    pub theme: Theme,
    /// Where `render_to_path` writes the PNG. Parent directories are created.
    pub output: Option<PathBuf>,
    /// Whether to draw the watermark.
    pub add_watermark: bool,
}

impl RenderRequest {
    /// Request for `record` with the default theme and the watermark on.
    pub fn new(record: QuoteRecord) -> Self {
        Self {
            quote_text: record.text,
            author: record.author,
            theme: Theme::default(),
            output: None,
            add_watermark: true,
        }
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Toggle the watermark.
    pub fn with_watermark(mut self, add_watermark: bool) -> Self {
        self.add_watermark = add_watermark;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/request.rs"]
mod tests;
