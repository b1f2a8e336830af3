use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use super::IngestError;

/// Supported résumé formats, by extension (case-insensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Pdf,
    PlainText,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "txt" => Some(SourceFormat::PlainText),
            _ => None,
        }
    }
}

/// Extracts the text of one résumé file.
pub fn extract_text(path: &Path, format: SourceFormat) -> Result<String, IngestError> {
    match format {
        SourceFormat::Pdf => extract_pdf_text(path),
        SourceFormat::PlainText => {
            let text = std::fs::read_to_string(path).map_err(|e| IngestError::Extraction {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            Ok(text.trim().to_string())
        }
    }
}

fn extract_pdf_text(path: &Path) -> Result<String, IngestError> {
    // pdf-extract panics on some malformed files instead of returning an error
    let result = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path)));

    match result {
        Ok(Ok(text)) => Ok(join_pages(&text)),
        Ok(Err(e)) => Err(IngestError::Extraction {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        Err(_) => Err(IngestError::Extraction {
            path: path.to_path_buf(),
            message: "PDF parser panicked".to_string(),
        }),
    }
}

/// Pages arrive separated by form feeds; each page is trimmed and joined with a single space.
fn join_pages(raw: &str) -> String {
    raw.split('\u{000C}')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SourceFormat::from_path(Path::new("Jane Doe.PDF")),
            Some(SourceFormat::Pdf)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("notes.txt")),
            Some(SourceFormat::PlainText)
        );
        assert_eq!(SourceFormat::from_path(Path::new("photo.png")), None);
        assert_eq!(SourceFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_join_pages() {
        assert_eq!(
            join_pages("\n Page one text \n\u{000C}\nPage two\n\u{000C}  \u{000C}"),
            "Page one text Page two"
        );
    }

    #[test]
    fn test_missing_pdf_is_extraction_error() {
        let err = extract_text(Path::new("/nonexistent/resume.pdf"), SourceFormat::Pdf).unwrap_err();
        assert!(matches!(err, IngestError::Extraction { .. }));
    }
}
