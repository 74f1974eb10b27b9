use std::fmt;
use std::time::Duration;

use crate::graph::VertexId;

/// Result alias used throughout the crate.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors from graph construction and centrality queries.
///
/// Construction failures (`DuplicateVertex`, `UnknownEndpoint`, `SelfLoop`,
/// `DuplicateEdge`) are fatal: no partial graph is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The vertex list names the same identifier more than once.
    #[error("vertices contain duplicates: {duplicates:?}")]
    DuplicateVertex { duplicates: Vec<VertexId> },

    /// An edge endpoint is not a member of the vertex list.
    #[error("edge ({a}, {b}) has an endpoint that is not a vertex")]
    UnknownEndpoint { a: VertexId, b: VertexId },

    /// An edge connects a vertex to itself.
    #[error("edge ({vertex}, {vertex}) is a self-loop")]
    SelfLoop { vertex: VertexId },

    /// The same unordered pair appears more than once in the edge list.
    #[error("edges contain duplicates: {duplicates:?}")]
    DuplicateEdge { duplicates: Vec<(VertexId, VertexId)> },

    /// A query named a vertex that is not in the graph.
    #[error("vertex {0} is not in the graph")]
    UnknownVertex(VertexId),

    /// No path connects the two vertices.
    #[error("no path exists from {from} to {to}")]
    NoPath { from: VertexId, to: VertexId },

    /// A centrality query met a disconnected pair under the `fail` policy.
    #[error("vertices {a} and {b} are disconnected")]
    Disconnected { a: VertexId, b: VertexId },

    /// The query was cancelled through its [`crate::Cancellation`] handle.
    #[error("computation cancelled")]
    Cancelled,

    /// The query ran past its configured deadline.
    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateVertex { .. } => ErrorCode::DuplicateVertex,
            Self::UnknownEndpoint { .. } => ErrorCode::UnknownEndpoint,
            Self::SelfLoop { .. } => ErrorCode::SelfLoop,
            Self::DuplicateEdge { .. } => ErrorCode::DuplicateEdge,
            Self::UnknownVertex(_) => ErrorCode::UnknownVertex,
            Self::NoPath { .. } => ErrorCode::NoPath,
            Self::Disconnected { .. } => ErrorCode::Disconnected,
            Self::Cancelled => ErrorCode::Cancelled,
            Self::DeadlineExceeded(_) => ErrorCode::DeadlineExceeded,
            Self::ThreadPool(_) => ErrorCode::ThreadPool,
            Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
        }
    }

    /// Returns `true` for errors raised while validating construction input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateVertex { .. }
                | Self::UnknownEndpoint { .. }
                | Self::SelfLoop { .. }
                | Self::DuplicateEdge { .. }
        )
    }
}

/// Machine-readable error codes for scripting against the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DuplicateVertex,
    UnknownEndpoint,
    SelfLoop,
    DuplicateEdge,
    UnknownVertex,
    NoPath,
    Disconnected,
    Cancelled,
    DeadlineExceeded,
    ThreadPool,
    InvalidConfig,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateVertex => "E1001",
            Self::UnknownEndpoint => "E1002",
            Self::SelfLoop => "E1003",
            Self::DuplicateEdge => "E1004",
            Self::UnknownVertex => "E2001",
            Self::NoPath => "E2002",
            Self::Disconnected => "E2003",
            Self::Cancelled => "E3001",
            Self::DeadlineExceeded => "E3002",
            Self::ThreadPool => "E3003",
            Self::InvalidConfig => "E4001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DuplicateVertex => "Duplicate vertex",
            Self::UnknownEndpoint => "Edge endpoint not in vertex set",
            Self::SelfLoop => "Self-loop edge",
            Self::DuplicateEdge => "Duplicate edge",
            Self::UnknownVertex => "Unknown vertex",
            Self::NoPath => "No path between vertices",
            Self::Disconnected => "Disconnected vertex pair",
            Self::Cancelled => "Computation cancelled",
            Self::DeadlineExceeded => "Deadline exceeded",
            Self::ThreadPool => "Worker pool unavailable",
            Self::InvalidConfig => "Invalid configuration",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DuplicateVertex => Some("List each vertex identifier exactly once."),
            Self::UnknownEndpoint => Some("Add the missing endpoint to the vertex list."),
            Self::SelfLoop => Some("Remove edges whose endpoints are equal."),
            Self::DuplicateEdge => {
                Some("An edge and its reverse are the same edge; list each pair once.")
            }
            Self::UnknownVertex | Self::NoPath | Self::Cancelled => None,
            Self::Disconnected => {
                Some("Use `disconnected = \"skip\"` to score disconnected pairs as 0.")
            }
            Self::DeadlineExceeded => Some("Raise `deadline_ms` or use the brandes method."),
            Self::ThreadPool => Some("Lower `threads` or run with `parallel = false`."),
            Self::InvalidConfig => Some("Fix the value in between.toml and retry."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, GraphError};
    use std::collections::HashSet;

    const ALL: [ErrorCode; 11] = [
        ErrorCode::DuplicateVertex,
        ErrorCode::UnknownEndpoint,
        ErrorCode::SelfLoop,
        ErrorCode::DuplicateEdge,
        ErrorCode::UnknownVertex,
        ErrorCode::NoPath,
        ErrorCode::Disconnected,
        ErrorCode::Cancelled,
        ErrorCode::DeadlineExceeded,
        ErrorCode::ThreadPool,
        ErrorCode::InvalidConfig,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let s = code.code();
            assert_eq!(s.len(), 5);
            assert!(s.starts_with('E'));
            assert!(s.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn validation_errors_are_flagged() {
        assert!(GraphError::SelfLoop { vertex: 1 }.is_validation());
        assert!(GraphError::DuplicateVertex { duplicates: vec![1] }.is_validation());
        assert!(!GraphError::NoPath { from: 1, to: 2 }.is_validation());
        assert!(!GraphError::Cancelled.is_validation());
    }

    #[test]
    fn display_names_the_vertices() {
        let err = GraphError::NoPath { from: 3, to: 9 };
        assert_eq!(err.to_string(), "no path exists from 3 to 9");
        assert_eq!(err.code().code(), "E2002");
    }
}
