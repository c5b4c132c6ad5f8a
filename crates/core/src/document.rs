use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an uploaded file (one per upload).
pub type FileId = Uuid;

/// Identifier of a stored chunk row.
pub type ChunkId = Uuid;

/// How the bytes of an upload are turned into text.
///
/// Only the file extension is consulted; there is no content sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    pub fn from_filename(filename: &str) -> Self {
        if file_extension(filename).eq_ignore_ascii_case(".pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Text => "text",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension of the last path component including the leading dot
/// (`"report.PDF"` -> `".PDF"`), or an empty string when there is none.
///
/// Dotfiles without a further dot (`".env"`) have no extension.
pub fn file_extension(filename: &str) -> &str {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    match base.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &base[idx..],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_includes_dot() {
        assert_eq!(file_extension("notes.txt"), ".txt");
        assert_eq!(file_extension("archive.tar.gz"), ".gz");
        assert_eq!(file_extension("dir/sub/paper.pdf"), ".pdf");
    }

    #[test]
    fn extension_missing() {
        assert_eq!(file_extension("README"), "");
        assert_eq!(file_extension(".env"), "");
        assert_eq!(file_extension(""), "");
    }

    #[test]
    fn kind_from_extension_is_case_insensitive() {
        assert_eq!(DocumentKind::from_filename("a.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("A.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("a.md"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_filename("pdf"), DocumentKind::Text);
    }
}
