use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

/// Where the document lives. Nothing here checks that it exists or that it
/// really is a PDF; that is left to whatever viewer ends up opening it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(String),
    Path(PathBuf),
}

impl DocumentSource {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        if ["http://", "https://", "file://"]
            .iter()
            .any(|scheme| lower.starts_with(scheme))
        {
            DocumentSource::Url(trimmed.to_string())
        } else {
            DocumentSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Last path segment, used for window titles and the toolbar.
    pub fn display_name(&self) -> String {
        match self {
            DocumentSource::Url(url) => {
                let without_query = url.split(['?', '#']).next().unwrap_or(url);
                without_query
                    .trim_end_matches('/')
                    .rsplit('/')
                    .next()
                    .filter(|segment| !segment.is_empty() && !segment.contains(':'))
                    .unwrap_or(without_query)
                    .to_string()
            }
            DocumentSource::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.to_string_lossy().to_string()),
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Url(url) => f.write_str(url),
            DocumentSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Hands a document to something that can actually render it.
pub trait DocumentOpener {
    fn open(&self, source: &DocumentSource) -> Result<()>;
}

/// Opens documents with the platform's default handler.
pub struct SystemOpener;

impl DocumentOpener for SystemOpener {
    fn open(&self, source: &DocumentSource) -> Result<()> {
        match source {
            DocumentSource::Url(url) => open::that(url)?,
            DocumentSource::Path(path) => open::that(path)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_urls_case_insensitively() {
        assert_eq!(
            DocumentSource::parse("https://example.com/a.pdf"),
            DocumentSource::Url("https://example.com/a.pdf".to_string())
        );
        assert!(matches!(
            DocumentSource::parse("HTTP://example.com/a.pdf"),
            DocumentSource::Url(_)
        ));
        assert!(matches!(
            DocumentSource::parse("file:///tmp/a.pdf"),
            DocumentSource::Url(_)
        ));
    }

    #[test]
    fn everything_else_is_a_path() {
        assert_eq!(
            DocumentSource::parse("/public/sample.pdf"),
            DocumentSource::Path(PathBuf::from("/public/sample.pdf"))
        );
        assert_eq!(
            DocumentSource::parse("  docs/report.pdf "),
            DocumentSource::Path(PathBuf::from("docs/report.pdf"))
        );
    }

    #[test]
    fn display_name_is_last_segment() {
        assert_eq!(
            DocumentSource::parse("https://example.com/files/paper.pdf?dl=1").display_name(),
            "paper.pdf"
        );
        assert_eq!(
            DocumentSource::parse("/public/sample.pdf").display_name(),
            "sample.pdf"
        );
        assert_eq!(
            DocumentSource::parse("https://example.com").display_name(),
            "example.com"
        );
    }
}
