//! Report packaging: embed a rendered chart plus a caption into the two
//! fixed document formats, entirely in memory.

pub mod docx;
pub mod pdf;

use serde::{Deserialize, Serialize};

pub use docx::render_docx;
pub use pdf::render_pdf;

/// Layout constants shared by the two report writers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Document title.
    pub title: String,
    /// Suggested filename for the PDF download.
    pub pdf_filename: String,
    /// Suggested filename for the DOCX download.
    pub docx_filename: String,
    /// Description wrap width, in characters.
    pub wrap_width: usize,
    /// Soft cap on description length, in characters.
    pub description_cap: usize,
    /// Print resolution for the embedded chart raster.
    pub image_dpi: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            title: "Drug Sales Data Visualization Report".to_string(),
            pdf_filename: "drug_sales_report.pdf".to_string(),
            docx_filename: "drug_sales_report.docx".to_string(),
            wrap_width: 80,
            description_cap: 400,
            image_dpi: 300.0,
        }
    }
}

/// Greedy whitespace wrap: a word joins the current line while the line
/// plus one separator stays within `width`. Words longer than `width`
/// get a line of their own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.len() + word.len() + 1 <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Enforce the soft cap by truncating on a char boundary.
pub(crate) fn cap_description(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_packs_words_greedily() {
        let lines = wrap_text("aaa bbb ccc ddd", 7);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap_text("", 80).is_empty());
        assert!(wrap_text("   \n\t ", 80).is_empty());
    }

    #[test]
    fn wrap_keeps_lines_within_width() {
        let text = "The data reveals seasonal patterns and overall market trends \
                    for various pharmaceutical categories across the analyzed period.";
        for line in wrap_text(text, 80) {
            assert!(line.len() <= 80, "line too long: {line}");
        }
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let lines = wrap_text("short pneumonoultramicroscopicsilicovolcanoconiosis end", 10);
        assert_eq!(
            lines,
            vec![
                "short",
                "pneumonoultramicroscopicsilicovolcanoconiosis",
                "end"
            ]
        );
    }

    #[test]
    fn cap_truncates_on_char_boundaries() {
        assert_eq!(cap_description("hello", 400), "hello");
        assert_eq!(cap_description("hello", 3), "hel");
        // Multi-byte chars count as one.
        assert_eq!(cap_description("äöü", 2), "äö");
    }
}
