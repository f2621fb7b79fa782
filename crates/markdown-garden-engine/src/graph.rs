//! The garden graph document.
//!
//! A JSON object with a `nodes` mapping keyed by node identifier and a
//! `links` list. Identifiers are page names, optionally with a `#fragment`
//! addressing a section. Node order in the file is kept, so listings and
//! search results follow the order the graph was written in.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the graph document inside a notes directory.
pub const GRAPH_FILE_NAME: &str = ".garden-graph.json";

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Failed to read graph file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse graph file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

/// Graph nodes in document order, indexed by identifier.
#[derive(Debug, Clone, Default)]
pub struct Nodes {
    entries: Vec<(String, GraphNode)>,
    index: HashMap<String, usize>,
}

impl Nodes {
    pub fn get(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a node. A repeated identifier keeps its first position and takes
    /// the new node.
    pub fn insert(&mut self, id: String, node: GraphNode) {
        match self.index.get(&id) {
            Some(&i) => self.entries[i].1 = node,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, node));
            }
        }
    }
}

impl PartialEq for Nodes {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Serialize for Nodes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, node) in &self.entries {
            map.serialize_entry(id, node)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Nodes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodesVisitor;

        impl<'de> Visitor<'de> for NodesVisitor {
            type Value = Nodes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of node identifiers to nodes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Nodes, A::Error> {
                let mut nodes = Nodes::default();
                while let Some((id, node)) = access.next_entry::<String, GraphNode>()? {
                    nodes.insert(id, node);
                }
                Ok(nodes)
            }
        }

        deserializer.deserialize_map(NodesVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Nodes,
    #[serde(default)]
    pub links: Vec<GraphLink>,
}

impl GraphData {
    /// Location of the graph document for a notes directory.
    pub fn path_in(notes_root: &Path) -> PathBuf {
        notes_root.join(GRAPH_FILE_NAME)
    }

    /// Loads a graph document, returning `None` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, GraphError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|source| GraphError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content)
            .map(Some)
            .map_err(|source| GraphError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// A graph of bare page nodes, labelled with their own names and unlinked.
    pub fn from_pages<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut nodes = Nodes::default();
        for name in names {
            let name = name.into();
            nodes.insert(
                name.clone(),
                GraphNode {
                    label: name,
                    meta: None,
                },
            );
        }
        Self {
            nodes,
            links: Vec::new(),
        }
    }

    /// Every node identifier, sections included.
    pub fn node_names(&self) -> Vec<String> {
        self.nodes.ids().map(str::to_string).collect()
    }

    /// Identifiers of whole pages (no `#fragment`).
    pub fn page_names(&self) -> Vec<String> {
        self.nodes
            .ids()
            .filter(|id| !id.contains('#'))
            .map(str::to_string)
            .collect()
    }
}
