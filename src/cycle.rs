//! A module for growing simple cycles edge by edge.

use crate::{
    config::NetworkConfig,
    edge::Edge,
    error::Result,
    id::Id,
    network::Network,
};

/// The lifecycle of a [`Cycle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleState {
    /// The path is open and may be extended or closed.
    Growing,
    /// The path has returned to its loop vertex, no further change is possible.
    Closed,
}

/// A simple cycle under construction.
///
/// The cycle starts as a single edge whose origin is the loop vertex and whose far end is the tip.
/// Each [`Cycle::add_edge`] extends the path from the tip to an unvisited vertex and
/// [`Cycle::close`] joins the tip back to the loop vertex. Invalid steps are refused and leave the
/// cycle untouched, so callers can backtrack on the returned `bool`.
///
/// # Examples
///
/// ```
/// use netsci::cycle::Cycle;
/// use netsci::edge::Edge;
///
/// let mut cycle = Cycle::new(&Edge::new(1, 2), false).unwrap();
///
/// assert!(cycle.add_edge(&Edge::new(3, 2)));
/// assert!(!cycle.add_edge(&Edge::new(3, 1)));
/// assert!(cycle.close(&Edge::new(3, 1)));
///
/// assert!(cycle.is_closed());
/// assert_eq!(cycle.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Cycle {
    network: Network,
    loop_vertex: Id,
    tip_vertex: Id,
    /// The visited vertices, from the loop vertex to the tip.
    path: Vec<Id>,
    state: CycleState,
}

impl Cycle {
    /// Starts a cycle from an edge, read as going from its first to its second vertex.
    pub fn new(edge: &Edge, is_directed: bool) -> Result<Self> {
        let config = NetworkConfig {
            is_directed,
            ..NetworkConfig::default()
        };

        let mut network = Network::new(config);
        network.add_edge(edge.clone())?;

        let (loop_vertex, tip_vertex) = (edge.from().clone(), edge.to().clone());
        let mut path = vec![loop_vertex.clone()];
        if tip_vertex != loop_vertex {
            path.push(tip_vertex.clone());
        }

        Ok(Self {
            network,
            loop_vertex,
            tip_vertex,
            path,
            state: CycleState::Growing,
        })
    }

    pub fn is_directed(&self) -> bool {
        self.network.is_directed()
    }

    pub fn loop_vertex(&self) -> &Id {
        &self.loop_vertex
    }

    pub fn tip_vertex(&self) -> &Id {
        &self.tip_vertex
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == CycleState::Closed
    }

    /// Returns the vertices in the order they were visited, starting at the loop vertex.
    pub fn path(&self) -> &[Id] {
        &self.path
    }

    /// Returns the number of edges in the cycle.
    pub fn len(&self) -> usize {
        self.network.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.network.edge_count() == 0
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.network.edges()
    }

    /// Returns a read-only view of the cycle as a network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Extends the path with an edge leaving the tip towards a vertex not yet visited.
    ///
    /// When undirected, the edge may list the tip as either endpoint. Returns whether the edge was
    /// accepted.
    pub fn add_edge(&mut self, edge: &Edge) -> bool {
        if self.is_closed() {
            return false;
        }

        let Some(next) = self.next_vertex(edge) else {
            return false;
        };

        if self.network.has_vertex(&next) {
            return false;
        }

        if !matches!(self.network.add_edge(edge.clone()), Ok(Some(_))) {
            return false;
        }

        self.path.push(next.clone());
        self.tip_vertex = next;

        true
    }

    /// Closes the cycle with an edge joining the tip back to the loop vertex.
    ///
    /// Returns whether the edge was accepted. An edge already part of the cycle can't close it.
    pub fn close(&mut self, edge: &Edge) -> bool {
        if self.is_closed() || self.tip_vertex == self.loop_vertex {
            return false;
        }

        if !edge.connects(&self.tip_vertex, &self.loop_vertex, self.is_directed()) {
            return false;
        }

        // A duplicate of an existing edge is silently ignored by the network.
        if !matches!(self.network.add_edge(edge.clone()), Ok(Some(_))) {
            return false;
        }

        self.tip_vertex = self.loop_vertex.clone();
        self.state = CycleState::Closed;

        true
    }

    /// Returns whether both cycles are made of the same edges, regardless of where they start or
    /// which way they were walked (when undirected).
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::cycle::Cycle;
    /// use netsci::edge::Edge;
    ///
    /// let mut a = Cycle::new(&Edge::new(1, 2), false).unwrap();
    /// a.add_edge(&Edge::new(2, 3));
    /// a.close(&Edge::new(3, 1));
    ///
    /// let mut b = Cycle::new(&Edge::new(3, 2), false).unwrap();
    /// b.add_edge(&Edge::new(2, 1));
    /// b.close(&Edge::new(1, 3));
    ///
    /// assert!(a.is_same_as(&b));
    /// ```
    pub fn is_same_as(&self, other: &Cycle) -> bool {
        let directed = self.is_directed();
        if directed != other.is_directed() || self.len() != other.len() {
            return false;
        }

        self.edges()
            .all(|edge| other.edges().any(|candidate| candidate.is_same(edge, directed)))
    }

    //
    // Private
    //

    /// Returns the endpoint the edge leads to from the tip, if it leaves the tip.
    fn next_vertex(&self, edge: &Edge) -> Option<Id> {
        if edge.from() == &self.tip_vertex {
            Some(edge.to().clone())
        } else if !self.is_directed() && edge.to() == &self.tip_vertex {
            Some(edge.from().clone())
        } else {
            None
        }
    }
}
