//! Netsci is a small toolkit for network-science computations: a mutable network container,
//! structural measurements (degree statistics, clustering, assortativity, k-cores, ego and
//! complement networks) and the enumeration of short cycles.
//!
//! # Basic usage
//!
//! The library is centered around the [`Network`](network::Network) structure, which owns
//! [`Vertex`](vertex::Vertex) and [`Edge`](edge::Edge) values identified by an [`Id`](id::Id).
//! Once constructed, various measurements can be computed and derived networks extracted.
//!
//! ```rust
//! use netsci::config::NetworkConfig;
//! use netsci::edge::Edge;
//! use netsci::id::Id;
//! use netsci::network::Network;
//!
//! // Construct the network instance, undirected with the default limits.
//! let mut network = Network::new(NetworkConfig::default());
//!
//! // Insert some edges, the endpoints are created as needed. Ids can be integers or strings.
//! network.add_edge(Edge::new(1, 2)).unwrap();
//! network.add_edge(Edge::new(2, 3)).unwrap();
//! network.add_edge(Edge::new(3, 1)).unwrap();
//! network.add_edge(Edge::new(3, 4)).unwrap();
//!
//! // Compute some metrics on that state of the network.
//! assert_eq!(network.density(), 4.0 / 6.0);
//! assert_eq!(network.clustering(&Id::from(3)), 1.0 / 3.0);
//!
//! // Reduce it to its 2-core and look for cycles.
//! assert_eq!(network.core(2).vertex_count(), 3);
//! assert_eq!(network.triplets().len(), 1);
//! assert!(network.quadruplets().is_empty());
//! ```
//!
//! Mutations that would break an invariant of the network (capacity, id uniqueness, missing
//! endpoints) fail with a [`NetworkError`](error::NetworkError) and leave the network unchanged.

/// Builds a network from paths of vertices, each consecutive pair becoming an edge.
#[cfg(test)]
macro_rules! network {
    ($config:expr; $($path:expr),*) => {{
        let mut network = $crate::network::Network::new($config);

        $(
            let mut iter = $path.into_iter().peekable();
            while let (Some(a), Some(b)) = (iter.next(), iter.peek()) {
                network.add_edge($crate::edge::Edge::new(a, *b)).unwrap();
            }
        )*

        network
    }};
    ($($path:expr),*) => {
        network!($crate::config::NetworkConfig::default(); $($path),*)
    };
}

pub mod config;
pub mod cycle;
pub mod edge;
pub mod enumerate;
pub mod error;
pub mod id;
pub mod network;
pub mod structure;
pub mod vertex;
