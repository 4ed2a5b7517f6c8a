//! Download-link encoding: report buffers inlined as base64 `data:` URIs
//! so the hosting UI can offer them without any server-side storage.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// A self-contained download reference for one generated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    filename: String,
    href: String,
}

impl DownloadLink {
    /// Inline `bytes` as a base64 `data:` URI with a suggested filename.
    pub fn new(filename: impl Into<String>, bytes: &[u8]) -> Self {
        let href = format!(
            "data:application/octet-stream;base64,{}",
            STANDARD.encode(bytes)
        );
        DownloadLink {
            filename: filename.into(),
            href,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// Anchor element the hosting UI can render directly.
    pub fn to_anchor(&self, link_text: &str) -> String {
        format!(
            r#"<a href="{}" download="{}">{}</a>"#,
            self.href, self.filename, link_text
        )
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    use super::*;

    #[test]
    fn encodes_bytes_as_data_uri() {
        let link = DownloadLink::new("drug_sales_report.pdf", b"%PDF-1.4 fake");
        let href = link.href();
        let prefix = "data:application/octet-stream;base64,";
        assert!(href.starts_with(prefix));

        let decoded = STANDARD.decode(&href[prefix.len()..]).unwrap();
        assert_eq!(decoded, b"%PDF-1.4 fake");
    }

    #[test]
    fn anchor_carries_the_suggested_filename() {
        let link = DownloadLink::new("drug_sales_report.docx", b"PK");
        let anchor = link.to_anchor("Download Word Report");
        assert!(anchor.starts_with("<a href=\"data:"));
        assert!(anchor.contains(r#"download="drug_sales_report.docx""#));
        assert!(anchor.ends_with(">Download Word Report</a>"));
    }
}
