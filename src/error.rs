//! Errors raised by network mutations.

use thiserror::Error;

use crate::id::Id;

/// A specialized `Result` type for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// The ways a network mutation can violate the network's invariants.
///
/// Every error is raised at the point of violation and leaves the network unchanged.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum NetworkError {
    #[error("vertex limit of {limit} reached")]
    VertexLimitExceeded { limit: usize },

    #[error("edge limit of {limit} reached")]
    EdgeLimitExceeded { limit: usize },

    #[error("vertex {0} already exists")]
    ExistingVertex(Id),

    #[error("edge {0} already exists")]
    ExistingEdge(Id),

    #[error("vertex {0} does not exist")]
    InexistentVertex(Id),

    #[error("self-loop on vertex {0} is not permitted")]
    SelfLoop(Id),

    /// Only raised by networks configured as strict, others ignore duplicate edges.
    #[error("network is not a multigraph, an edge between {from} and {to} already exists")]
    NotMultigraph { from: Id, to: Id },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            NetworkError::InexistentVertex(Id::from(4)).to_string(),
            "vertex 4 does not exist"
        );
        assert_eq!(
            NetworkError::EdgeLimitExceeded { limit: 2 }.to_string(),
            "edge limit of 2 reached"
        );
        assert_eq!(
            NetworkError::NotMultigraph {
                from: Id::from("a"),
                to: Id::from("b")
            }
            .to_string(),
            "network is not a multigraph, an edge between \"a\" and \"b\" already exists"
        );
    }
}
