//! Network construction options.

use serde::{Deserialize, Serialize};

pub const DEFAULT_VERTEX_LIMIT: usize = 1500;
pub const DEFAULT_EDGE_LIMIT: usize = 2500;
pub const DEFAULT_ID_RETRIES: usize = 64;

/// The options a [`Network`](crate::network::Network) is built with. They are fixed for the
/// lifetime of the network.
///
/// Missing fields take their default when deserializing.
///
/// # Examples
///
/// ```
/// use netsci::config::NetworkConfig;
///
/// let config = NetworkConfig::directed().with_edge_limit(10);
///
/// assert!(config.is_directed);
/// assert_eq!(config.vertex_limit, 1500);
/// assert_eq!(config.edge_limit, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub is_directed: bool,
    /// Maximum number of vertices the network may hold.
    pub vertex_limit: usize,
    /// Maximum number of edges the network may hold.
    pub edge_limit: usize,
    /// Raise [`SelfLoop`](crate::error::NetworkError::SelfLoop) on edges whose endpoints are equal.
    pub reject_self_loops: bool,
    /// Raise [`NotMultigraph`](crate::error::NetworkError::NotMultigraph) on duplicate edges
    /// instead of ignoring them.
    pub strict: bool,
    /// Random attempts made when the sequential id counter collides with an existing id.
    pub id_retries: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            is_directed: false,
            vertex_limit: DEFAULT_VERTEX_LIMIT,
            edge_limit: DEFAULT_EDGE_LIMIT,
            reject_self_loops: false,
            strict: false,
            id_retries: DEFAULT_ID_RETRIES,
        }
    }
}

impl NetworkConfig {
    pub fn undirected() -> Self {
        Self::default()
    }

    pub fn directed() -> Self {
        Self {
            is_directed: true,
            ..Self::default()
        }
    }

    pub fn with_vertex_limit(mut self, limit: usize) -> Self {
        self.vertex_limit = limit;
        self
    }

    pub fn with_edge_limit(mut self, limit: usize) -> Self {
        self.edge_limit = limit;
        self
    }

    pub fn with_self_loops_rejected(mut self) -> Self {
        self.reject_self_loops = true;
        self
    }

    pub fn with_strict(mut self) -> Self {
        self.strict = true;
        self
    }
}
