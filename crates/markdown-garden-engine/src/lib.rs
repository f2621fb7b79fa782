pub mod garden;
pub mod graph;
pub mod io;
pub mod models;
pub mod parsing;
pub mod render;
pub mod search;
pub mod slug;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use garden::{Document, Garden};
pub use graph::{GRAPH_FILE_NAME, GraphData, GraphError, GraphLink, GraphNode};
pub use io::*;
pub use models::MarkdownFile;
pub use parsing::{WikiLink, parse_wiki_links, rewrite_wiki_links};
pub use render::{page_title, render_markdown};
pub use search::{DEFAULT_HOME, SearchOptions, base_identifier, filter_and_collapse, navigation_path};
pub use slug::normalize;
