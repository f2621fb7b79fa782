use markdown_garden_engine::{DEFAULT_HOME, Garden, GraphData, GraphError, SearchOptions};

/// Shared, read-only state behind every request.
#[derive(Debug)]
pub struct AppState {
    pub garden: Garden,
    pub graph: GraphData,
    /// Node identifiers searched by `/x/search`, in graph order.
    pub node_names: Vec<String>,
    /// Graph identifiers without a `#fragment`, listed by `/x/all`.
    pub page_names: Vec<String>,
    /// Page served at `/`.
    pub home: String,
    pub search: SearchOptions,
}

impl AppState {
    /// Builds state for a garden, loading its graph document once.
    pub fn new(garden: Garden, home: Option<String>) -> Result<Self, GraphError> {
        let graph = garden.graph()?;
        let node_names = graph.node_names();
        let page_names = graph.page_names();

        Ok(Self {
            garden,
            graph,
            node_names,
            page_names,
            home: home.unwrap_or_else(|| DEFAULT_HOME.to_string()),
            search: SearchOptions::default(),
        })
    }

    /// The search box is only offered when there is something to search.
    pub fn has_search(&self) -> bool {
        !self.node_names.is_empty()
    }
}
