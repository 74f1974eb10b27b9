//! Graph file loading.
//!
//! A graph file lists vertex identifiers and edges, in JSON or TOML:
//!
//! ```json
//! { "name": "sample", "vertices": [1, 2, 3], "edges": [[1, 2], [2, 3]] }
//! ```
//!
//! ```toml
//! name = "sample"
//! vertices = [1, 2, 3]
//! edges = [[1, 2], [2, 3]]
//! ```
//!
//! The format follows the file extension (`.toml`, otherwise JSON). A path
//! of `-` reads JSON from stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use between_core::{UndirectedGraph, VertexId};
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphFile {
    #[serde(default)]
    pub name: Option<String>,
    pub vertices: Vec<VertexId>,
    #[serde(default)]
    pub edges: Vec<(VertexId, VertexId)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl GraphFile {
    /// Parse `content` in the given format.
    fn parse(content: &str, format: Format) -> Result<Self> {
        match format {
            Format::Json => serde_json::from_str(content).context("invalid JSON graph file"),
            Format::Toml => toml::from_str(content).context("invalid TOML graph file"),
        }
    }

    /// Validate and build the graph.
    ///
    /// # Errors
    ///
    /// Any construction error from [`UndirectedGraph::new`].
    pub fn build(&self) -> Result<UndirectedGraph, between_core::GraphError> {
        UndirectedGraph::new(&self.vertices, &self.edges)
    }
}

/// Read and parse a graph file without building it.
#[instrument]
pub fn read_graph_file(path: &Path) -> Result<GraphFile> {
    let (content, format) = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read graph from stdin")?;
        (buf, Format::Json)
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        (content, Format::of(path))
    };

    let file = GraphFile::parse(&content, format)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(
        vertices = file.vertices.len(),
        edges = file.edges.len(),
        name = file.name.as_deref().unwrap_or(""),
        "graph file parsed"
    );
    Ok(file)
}

/// Read, parse and validate a graph file.
pub fn load_graph(path: &Path) -> Result<(GraphFile, UndirectedGraph)> {
    let file = read_graph_file(path)?;
    let graph = file
        .build()
        .with_context(|| format!("Invalid graph in {}", path.display()))?;
    Ok((file, graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use between_core::GraphError;

    #[test]
    fn parses_json() {
        let file = GraphFile::parse(
            r#"{"name": "tri", "vertices": [1, 2, 3], "edges": [[1, 2], [2, 3], [3, 1]]}"#,
            Format::Json,
        )
        .expect("valid json");
        assert_eq!(file.name.as_deref(), Some("tri"));
        assert_eq!(file.edges, vec![(1, 2), (2, 3), (3, 1)]);
        assert_eq!(file.build().expect("valid").edge_count(), 3);
    }

    #[test]
    fn parses_toml_without_edges() {
        let file = GraphFile::parse("vertices = [4, 5]\n", Format::Toml).expect("valid toml");
        assert_eq!(file.name, None);
        assert!(file.edges.is_empty());
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(GraphFile::parse(r#"{"vertices": [], "weights": []}"#, Format::Json).is_err());
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::of(Path::new("g.toml")), Format::Toml);
        assert_eq!(Format::of(Path::new("g.TOML")), Format::Toml);
        assert_eq!(Format::of(Path::new("g.json")), Format::Json);
        assert_eq!(Format::of(Path::new("graph")), Format::Json);
    }

    #[test]
    fn load_surfaces_validation_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"vertices": [1, 2], "edges": [[1, 3]]}"#).expect("write");

        let err = load_graph(&path).expect_err("unknown endpoint");
        let graph_err = err.downcast_ref::<GraphError>().expect("graph error in chain");
        assert!(graph_err.is_validation());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_graph_file(Path::new("/nonexistent/graph.json")).is_err());
    }
}
