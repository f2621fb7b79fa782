use relative_path::{RelativePath, RelativePathBuf};

use crate::slug::normalize;

/// A markdown file in the notes directory and the page name it is served under
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownFile {
    relative_path: RelativePathBuf,
    display_name: String,
    node_name: String,
}

impl MarkdownFile {
    /// Create a new MarkdownFile from a relative path
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = Self::extract_display_name(&relative_path);
        let node_name = normalize(&display_name);

        Self {
            relative_path,
            display_name,
            node_name,
        }
    }

    /// Create from a relative path string
    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    /// Get the relative path
    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// Get the display name (file name without .md extension)
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Page name: the normalized file stem, independent of folder
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    fn extract_display_name(path: &RelativePath) -> String {
        path.file_name()
            .map(|name| name.strip_suffix(".md").unwrap_or(name))
            .unwrap_or("Untitled")
            .to_string()
    }
}

impl From<RelativePathBuf> for MarkdownFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for MarkdownFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("README.md", "README", "readme")]
    #[case("journal/2024-01-15.md", "2024-01-15", "2024-01-15")]
    #[case("projects/My Big Idea.md", "My Big Idea", "my-big-idea")]
    #[case("notes.markdown.md", "notes.markdown", "notes-markdown")]
    fn names_from_path(#[case] path: &str, #[case] display: &str, #[case] node: &str) {
        let file = MarkdownFile::from(path);
        assert_eq!(file.display_name(), display);
        assert_eq!(file.node_name(), node);
        assert_eq!(file.relative_path().as_str(), path);
    }
}
