use relative_path::{RelativePath, RelativePathBuf};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::graph::{GraphData, GraphError};
use crate::io::{self, IoError};
use crate::models::MarkdownFile;
use crate::slug::normalize;

/// A markdown document loaded from the garden
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub file: MarkdownFile,
    pub content: String,
}

impl Document {
    pub fn name(&self) -> &str {
        self.file.node_name()
    }
}

/// Index of the markdown files in a notes directory, keyed by page name.
///
/// The directory is scanned once when the garden is opened; document content
/// is read from disk on every lookup.
#[derive(Debug)]
pub struct Garden {
    root: PathBuf,
    files: Vec<MarkdownFile>,
    by_name: HashMap<String, usize>,
}

impl Garden {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, IoError> {
        Self::open_with_filter(root, |_| true)
    }

    /// Opens a garden keeping only the files `include` accepts.
    pub fn open_with_filter<F>(root: impl Into<PathBuf>, include: F) -> Result<Self, IoError>
    where
        F: Fn(&RelativePath) -> bool,
    {
        let root = root.into();
        io::validate_notes_dir(&root)?;

        let mut files: Vec<MarkdownFile> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for path in io::scan_markdown_files(&root)? {
            let Some(relative) = path
                .strip_prefix(&root)
                .ok()
                .and_then(|rel| RelativePathBuf::from_path(rel).ok())
            else {
                log::warn!("Skipping {}: not a relative path", path.display());
                continue;
            };

            if !include(&relative) {
                log::debug!("Excluded {relative}");
                continue;
            }

            let file = MarkdownFile::new(relative);
            if file.node_name().is_empty() {
                log::warn!("Skipping {}: file name has no usable characters", file.relative_path());
                continue;
            }
            if let Some(&existing) = by_name.get(file.node_name()) {
                let existing = &files[existing];
                log::warn!(
                    "Skipping {}: page name '{}' already used by {}",
                    file.relative_path(),
                    file.node_name(),
                    existing.relative_path()
                );
                continue;
            }

            by_name.insert(file.node_name().to_string(), files.len());
            files.push(file);
        }

        log::info!("Found {} markdown documents in {}", files.len(), root.display());

        Ok(Self {
            root,
            files,
            by_name,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Indexed files in path order
    pub fn files(&self) -> &[MarkdownFile] {
        &self.files
    }

    /// Page names in path order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(MarkdownFile::node_name)
    }

    /// Looks up a file by page name, falling back to the normalized form of
    /// `name` so `/My Page` finds `my-page`.
    pub fn file(&self, name: &str) -> Option<&MarkdownFile> {
        self.by_name
            .get(name)
            .or_else(|| self.by_name.get(&normalize(name)))
            .map(|&index| &self.files[index])
    }

    /// Reads the document for a page name.
    ///
    /// Returns `Ok(None)` for unknown names and for files removed since the
    /// garden was opened.
    pub fn find(&self, name: &str) -> Result<Option<Document>, IoError> {
        let Some(file) = self.file(name) else {
            return Ok(None);
        };

        match io::read_file(file.relative_path(), &self.root) {
            Ok(content) => Ok(Some(Document {
                file: file.clone(),
                content,
            })),
            Err(IoError::NotFound(path)) => {
                log::warn!("{} was removed since the garden was opened", path.display());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// The graph document for this garden: `.garden-graph.json` when present,
    /// otherwise one node per page with no links.
    pub fn graph(&self) -> Result<GraphData, GraphError> {
        let path = GraphData::path_in(&self.root);
        match GraphData::load(&path)? {
            Some(graph) => {
                log::info!(
                    "Loaded graph from {} with {} nodes and {} links",
                    path.display(),
                    graph.nodes.len(),
                    graph.links.len()
                );
                Ok(graph)
            }
            None => {
                log::info!("No graph file at {}, listing pages only", path.display());
                Ok(GraphData::from_pages(self.names()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{create_test_file, create_test_notes_dir};
    use pretty_assertions::assert_eq;

    #[test]
    fn indexes_files_by_page_name() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "README.md", "# Home");
        create_test_file(&notes_dir, "guides/Getting Started.md", "# Start");

        let garden = Garden::open(notes_dir.path()).unwrap();

        let names: Vec<&str> = garden.names().collect();
        assert_eq!(names, vec!["readme", "getting-started"]);
    }

    #[test]
    fn find_reads_current_content() {
        let notes_dir = create_test_notes_dir();
        let path = create_test_file(&notes_dir, "page.md", "first");
        let garden = Garden::open(notes_dir.path()).unwrap();

        std::fs::write(&path, "second").unwrap();

        let doc = garden.find("page").unwrap().unwrap();
        assert_eq!(doc.content, "second");
        assert_eq!(doc.name(), "page");
    }

    #[test]
    fn find_normalizes_requested_name() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "My Page.md", "content");
        let garden = Garden::open(notes_dir.path()).unwrap();

        assert!(garden.find("My Page").unwrap().is_some());
        assert!(garden.find("my-page").unwrap().is_some());
    }

    #[test]
    fn find_unknown_is_none() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "page.md", "content");
        let garden = Garden::open(notes_dir.path()).unwrap();

        assert!(garden.find("missing").unwrap().is_none());
    }

    #[test]
    fn find_removed_file_is_none() {
        let notes_dir = create_test_notes_dir();
        let path = create_test_file(&notes_dir, "gone.md", "content");
        let garden = Garden::open(notes_dir.path()).unwrap();

        std::fs::remove_file(path).unwrap();

        assert!(garden.find("gone").unwrap().is_none());
    }

    #[test]
    fn first_file_wins_name_collision() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "a/notes.md", "from a");
        create_test_file(&notes_dir, "b/Notes.md", "from b");
        let garden = Garden::open(notes_dir.path()).unwrap();

        assert_eq!(garden.files().len(), 1);
        assert_eq!(garden.find("notes").unwrap().unwrap().content, "from a");
    }

    #[test]
    fn filter_excludes_files() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "keep.md", "");
        create_test_file(&notes_dir, "drafts/skip.md", "");

        let garden =
            Garden::open_with_filter(notes_dir.path(), |rel| !rel.as_str().starts_with("drafts/"))
                .unwrap();

        let names: Vec<&str> = garden.names().collect();
        assert_eq!(names, vec!["keep"]);
    }

    #[test]
    fn open_rejects_missing_directory() {
        let result = Garden::open("/this/path/does/not/exist");
        assert!(matches!(result, Err(IoError::InvalidNotesDir(_))));
    }

    #[test]
    fn graph_falls_back_to_page_list() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "alpha.md", "");
        create_test_file(&notes_dir, "beta.md", "");
        let garden = Garden::open(notes_dir.path()).unwrap();

        let graph = garden.graph().unwrap();
        assert_eq!(graph.node_names(), vec!["alpha", "beta"]);
        assert!(graph.links.is_empty());
    }

    #[test]
    fn graph_prefers_graph_file() {
        let notes_dir = create_test_notes_dir();
        create_test_file(&notes_dir, "alpha.md", "");
        create_test_file(
            &notes_dir,
            ".garden-graph.json",
            r#"{"nodes":{"alpha":{"label":"Alpha"},"alpha#intro":{"label":"Intro"}},"links":[]}"#,
        );
        let garden = Garden::open(notes_dir.path()).unwrap();

        let graph = garden.graph().unwrap();
        assert_eq!(graph.node_names(), vec!["alpha", "alpha#intro"]);
    }
}
