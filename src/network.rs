//! A module for working with networks.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use itertools::Itertools;
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::{
    config::NetworkConfig,
    edge::Edge,
    error::{NetworkError, Result},
    id::Id,
    vertex::Vertex,
};

/// A network made up of vertices and the edges between them.
///
/// The network owns its vertices and edges and guarantees that:
///
/// - every edge references vertices that are present,
/// - vertex and edge counts never exceed the configured limits,
/// - at most one edge joins any pair of vertices (ordered when directed, unordered otherwise).
///
/// Queries scan the edge set linearly, no adjacency index is maintained.
#[derive(Clone, Debug)]
pub struct Network {
    /// The vertices, in insertion order.
    vertices: IndexMap<Id, Vertex>,
    /// The edges, in insertion order. Their id space is independent from the vertices'.
    edges: IndexMap<Id, Edge>,
    config: NetworkConfig,
    /// Counters for generated ids, only ever incremented.
    next_vertex_id: i64,
    next_edge_id: i64,
    /// A mapping of vertices to their indices to be used when constructing the matrices
    /// representing the network, sorted by id.
    index: Option<BTreeMap<Id, usize>>,
    /// Cache the adjacency matrix when possible.
    adjacency_matrix: Option<DMatrix<f64>>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new(NetworkConfig::default())
    }
}

impl Network {
    /// Creates an empty network with the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::config::NetworkConfig;
    /// use netsci::network::Network;
    ///
    /// let network = Network::new(NetworkConfig::directed());
    /// assert!(network.is_directed());
    /// ```
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            config,
            next_vertex_id: 0,
            next_edge_id: 0,
            index: None,
            adjacency_matrix: None,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn is_directed(&self) -> bool {
        self.config.is_directed
    }

    /// Multigraphs are reserved but not supported, this is always `false`.
    pub fn is_multigraph(&self) -> bool {
        false
    }

    pub fn vertex_limit(&self) -> usize {
        self.config.vertex_limit
    }

    pub fn edge_limit(&self) -> usize {
        self.config.edge_limit
    }

    //
    // Mutation
    //

    /// Inserts a vertex into the network.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::error::NetworkError;
    /// use netsci::id::Id;
    /// use netsci::network::Network;
    /// use netsci::vertex::Vertex;
    ///
    /// let mut network = Network::default();
    /// network.add_vertex(Vertex::new("a")).unwrap();
    ///
    /// assert_eq!(
    ///     network.add_vertex(Vertex::new("a")),
    ///     Err(NetworkError::ExistingVertex(Id::from("a")))
    /// );
    /// ```
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<()> {
        if self.vertices.len() >= self.config.vertex_limit {
            return Err(NetworkError::VertexLimitExceeded {
                limit: self.config.vertex_limit,
            });
        }

        if self.vertices.contains_key(vertex.id()) {
            return Err(NetworkError::ExistingVertex(vertex.id().clone()));
        }

        self.vertices.insert(vertex.id().clone(), vertex);
        self.clear_cache();

        Ok(())
    }

    /// Inserts a vertex with a generated id and the default weight, returning the id.
    pub fn create_vertex(&mut self) -> Result<Id> {
        let limit = self.config.vertex_limit;
        if self.vertices.len() >= limit {
            return Err(NetworkError::VertexLimitExceeded { limit });
        }

        let id = generate_id(
            &self.vertices,
            &mut self.next_vertex_id,
            limit,
            self.config.id_retries,
        )
        .ok_or(NetworkError::VertexLimitExceeded { limit })?;

        self.add_vertex(Vertex::new(id.clone()))?;

        Ok(id)
    }

    /// Inserts each vertex in order, stopping at the first failure. Vertices inserted before the
    /// failure remain in the network.
    pub fn add_vertex_list(&mut self, vertices: impl IntoIterator<Item = Vertex>) -> Result<()> {
        for vertex in vertices {
            self.add_vertex(vertex)?;
        }

        Ok(())
    }

    /// Inserts an edge into the network, creating any missing endpoint.
    ///
    /// Returns the id of the inserted edge, which is generated if the edge doesn't carry one. An
    /// edge equivalent to an existing one is ignored and `None` is returned, unless the network is
    /// strict in which case [`NetworkError::NotMultigraph`] is raised. Duplicates are detected
    /// before the edge limit is checked, so re-inserting an edge into a full network is still a
    /// no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::id::Id;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    ///
    /// assert_eq!(network.add_edge(Edge::new("a", "b")), Ok(Some(Id::from(0))));
    /// // The network is undirected, so this is the same edge.
    /// assert_eq!(network.add_edge(Edge::new("b", "a")), Ok(None));
    ///
    /// assert_eq!(network.vertex_count(), 2);
    /// assert_eq!(network.edge_count(), 1);
    /// ```
    pub fn add_edge(&mut self, edge: Edge) -> Result<Option<Id>> {
        self.insert_edge(edge, true)
    }

    /// Inserts an edge into the network like [`Network::add_edge`], but raises
    /// [`NetworkError::InexistentVertex`] instead of creating missing endpoints.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::error::NetworkError;
    /// use netsci::id::Id;
    /// use netsci::network::Network;
    /// use netsci::vertex::Vertex;
    ///
    /// let mut network = Network::default();
    /// network.add_vertex(Vertex::new(1)).unwrap();
    ///
    /// assert_eq!(
    ///     network.add_edge_checked(Edge::new(1, 2)),
    ///     Err(NetworkError::InexistentVertex(Id::from(2)))
    /// );
    /// assert_eq!(network.edge_count(), 0);
    /// ```
    pub fn add_edge_checked(&mut self, edge: Edge) -> Result<Option<Id>> {
        self.insert_edge(edge, false)
    }

    /// Inserts each edge in order, creating missing endpoints and stopping at the first failure.
    /// Returns the number of edges actually inserted.
    pub fn add_edge_list(&mut self, edges: impl IntoIterator<Item = Edge>) -> Result<usize> {
        let mut inserted = 0;
        for edge in edges {
            if self.add_edge(edge)?.is_some() {
                inserted += 1;
            }
        }

        Ok(inserted)
    }

    /// Removes a vertex and every edge incident to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::id::Id;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network.add_edge_list([Edge::new(1, 2), Edge::new(2, 3)]).unwrap();
    ///
    /// network.remove_vertex(&Id::from(2)).unwrap();
    /// assert_eq!(network.vertex_count(), 2);
    /// assert_eq!(network.edge_count(), 0);
    /// ```
    pub fn remove_vertex(&mut self, id: &Id) -> Result<Vertex> {
        self.detach_vertex(id)
            .ok_or_else(|| NetworkError::InexistentVertex(id.clone()))
    }

    /// Removes the first edge joining `from` to `to` (in either order when undirected) and
    /// returns it, if there is one.
    pub fn remove_edge(&mut self, from: &Id, to: &Id) -> Option<Edge> {
        let directed = self.is_directed();
        let id = self
            .edges
            .iter()
            .find(|(_, edge)| edge.connects(from, to, directed))
            .map(|(id, _)| id.clone())?;

        self.remove_edge_by_id(&id)
    }

    /// Removes the edge with the given id and returns it, if there is one.
    pub fn remove_edge_by_id(&mut self, id: &Id) -> Option<Edge> {
        let edge = self.edges.shift_remove(id)?;
        self.clear_cache();

        Some(edge)
    }

    /// Updates the weight of a vertex.
    pub fn set_vertex_weight(&mut self, id: &Id, weight: f64) -> Result<()> {
        let vertex = self
            .vertices
            .get_mut(id)
            .ok_or_else(|| NetworkError::InexistentVertex(id.clone()))?;
        vertex.set_weight(weight);

        Ok(())
    }

    //
    // Queries
    //

    pub fn has_vertex(&self, id: &Id) -> bool {
        self.vertices.contains_key(id)
    }

    pub fn vertex(&self, id: &Id) -> Option<&Vertex> {
        self.vertices.get(id)
    }

    pub fn edge(&self, id: &Id) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Returns the vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Returns the vertex ids in insertion order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = &Id> {
        self.vertices.keys()
    }

    /// Returns the edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Returns a snapshot of the vertices.
    pub fn vertex_list(&self) -> Vec<Vertex> {
        self.vertices.values().cloned().collect()
    }

    /// Returns a snapshot of the edges.
    pub fn edge_list(&self) -> Vec<Edge> {
        self.edges.values().cloned().collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether an edge joins `from` to `to`, in either order when undirected.
    pub fn has_edge(&self, from: &Id, to: &Id) -> bool {
        self.edge_between(from, to).is_some()
    }

    /// Returns the first edge joining `from` to `to`, in either order when undirected.
    pub fn edge_between(&self, from: &Id, to: &Id) -> Option<&Edge> {
        let directed = self.is_directed();
        self.edges
            .values()
            .find(|edge| edge.connects(from, to, directed))
    }

    /// Returns every edge joining `from` to `to`, in either order when undirected.
    pub fn edges_between(&self, from: &Id, to: &Id) -> Vec<&Edge> {
        let directed = self.is_directed();
        self.edges
            .values()
            .filter(|edge| edge.connects(from, to, directed))
            .collect()
    }

    /// Returns the edges incident to a vertex.
    pub fn incident_edges(&self, id: &Id) -> Vec<&Edge> {
        self.edges.values().filter(|edge| edge.contains(id)).collect()
    }

    /// Returns the edges leaving a vertex: those starting at it when directed, every incident edge
    /// otherwise.
    pub fn out_edges(&self, id: &Id) -> Vec<&Edge> {
        if !self.is_directed() {
            return self.incident_edges(id);
        }

        self.edges.values().filter(|edge| edge.from() == id).collect()
    }

    /// Returns the vertices sharing an edge with `id`, each once, in edge order. Direction is
    /// ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::id::Id;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network.add_edge_list([Edge::new(1, 2), Edge::new(3, 1)]).unwrap();
    ///
    /// assert_eq!(network.neighbors(&Id::from(1)), vec![Id::from(2), Id::from(3)]);
    /// ```
    pub fn neighbors(&self, id: &Id) -> Vec<Id> {
        self.edges
            .values()
            .filter_map(|edge| edge.opposite(id))
            .unique()
            .cloned()
            .collect()
    }

    /// Returns the vertices with an edge towards `id`. Same as [`Network::neighbors`] when
    /// undirected.
    pub fn in_neighbors(&self, id: &Id) -> Vec<Id> {
        if !self.is_directed() {
            return self.neighbors(id);
        }

        self.edges
            .values()
            .filter(|edge| edge.to() == id)
            .map(|edge| edge.from())
            .unique()
            .cloned()
            .collect()
    }

    /// Returns the vertices `id` has an edge towards. Same as [`Network::neighbors`] when
    /// undirected.
    pub fn out_neighbors(&self, id: &Id) -> Vec<Id> {
        if !self.is_directed() {
            return self.neighbors(id);
        }

        self.edges
            .values()
            .filter(|edge| edge.from() == id)
            .map(|edge| edge.to())
            .unique()
            .cloned()
            .collect()
    }

    /// Returns the number of edges incident to a vertex (in and out edges combined when directed).
    pub fn degree(&self, id: &Id) -> usize {
        self.edges.values().filter(|edge| edge.contains(id)).count()
    }

    pub fn in_degree(&self, id: &Id) -> usize {
        if !self.is_directed() {
            return self.degree(id);
        }

        self.edges.values().filter(|edge| edge.to() == id).count()
    }

    pub fn out_degree(&self, id: &Id) -> usize {
        if !self.is_directed() {
            return self.degree(id);
        }

        self.edges.values().filter(|edge| edge.from() == id).count()
    }

    //
    // Derived metrics
    //

    /// Returns the sum of the edge weights.
    pub fn weight(&self) -> f64 {
        self.edges.values().map(Edge::weight).sum()
    }

    /// Returns `|E| - |V| + 1`.
    pub fn genus(&self) -> i64 {
        self.edges.len() as i64 - self.vertices.len() as i64 + 1
    }

    /// Returns the number of edges an undirected simple network with this many vertices can hold.
    pub fn max_edges(&self) -> usize {
        let n = self.vertices.len();
        n * n.saturating_sub(1) / 2
    }

    /// Computes the density of the network, the ratio of edges with respect to the maximum possible
    /// edges. Networks with fewer than two vertices have a density of zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    ///
    /// network.add_edge(Edge::new("a", "b")).unwrap();
    /// assert_eq!(network.density(), 1.0);
    ///
    /// network.add_edge(Edge::new("a", "c")).unwrap();
    /// assert_eq!(network.density(), 2.0 / 3.0);
    /// ```
    pub fn density(&self) -> f64 {
        let max_edges = self.max_edges();
        if max_edges == 0 {
            return 0.0;
        }

        self.edges.len() as f64 / max_edges as f64
    }

    /// Returns an independent copy of the network with the same configuration.
    pub fn copy(&self) -> Network {
        self.clone()
    }

    //
    // Matrix views
    //

    /// Returns the vertex ids in the order used for the matrix rows and columns.
    pub fn matrix_order(&mut self) -> Vec<Id> {
        self.index().keys().cloned().collect()
    }

    /// Constructs the weighted adjacency matrix for this network, symmetric when undirected.
    ///
    /// Rows and columns follow the sorted vertex ids, see [`Network::matrix_order`].
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use netsci::edge::Edge;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network.add_edge(Edge::new("a", "b")).unwrap();
    /// assert_eq!(
    ///     network.adjacency_matrix(),
    ///     dmatrix![0.0, 1.0;
    ///              1.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&mut self) -> DMatrix<f64> {
        // Check the cache.
        if let Some(matrix) = self.adjacency_matrix.clone() {
            return matrix;
        }

        let directed = self.is_directed();
        let index = self.index().clone();
        let n = index.len();
        let mut matrix = DMatrix::<f64>::zeros(n, n);

        for edge in self.edges.values() {
            // Every endpoint is a vertex, so it is present in the index.
            if let (Some(&i), Some(&j)) = (index.get(edge.from()), index.get(edge.to())) {
                matrix[(i, j)] = edge.weight();
                if !directed {
                    matrix[(j, i)] = edge.weight();
                }
            }
        }

        // Cache the matrix.
        self.adjacency_matrix = Some(matrix.clone());

        matrix
    }

    /// Constructs the degree matrix for this network, ordered like the adjacency matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use netsci::edge::Edge;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network.add_edge_list([Edge::new("a", "b"), Edge::new("a", "c")]).unwrap();
    /// assert_eq!(
    ///     network.degree_matrix(),
    ///     dmatrix![2.0, 0.0, 0.0;
    ///              0.0, 1.0, 0.0;
    ///              0.0, 0.0, 1.0]
    /// );
    /// ```
    pub fn degree_matrix(&mut self) -> DMatrix<f64> {
        let order = self.matrix_order();
        let degrees: Vec<f64> = order.iter().map(|id| self.degree(id) as f64).collect();

        DMatrix::from_diagonal(&DVector::from_vec(degrees))
    }

    /// Builds a network from an adjacency matrix, naming the vertices `0..n` after their row.
    ///
    /// Every non-zero entry becomes an edge weighted by the entry. When the configuration is
    /// undirected the entries `(i, j)` and `(j, i)` describe the same edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use netsci::config::NetworkConfig;
    /// use netsci::network::Network;
    ///
    /// let matrix = dmatrix![0.0, 2.0, 0.0;
    ///                       2.0, 0.0, 1.0;
    ///                       0.0, 1.0, 0.0];
    /// let network = Network::from_adjacency_matrix(&matrix, NetworkConfig::default()).unwrap();
    ///
    /// assert_eq!(network.vertex_count(), 3);
    /// assert_eq!(network.edge_count(), 2);
    /// assert_eq!(network.weight(), 3.0);
    /// ```
    pub fn from_adjacency_matrix(matrix: &DMatrix<f64>, config: NetworkConfig) -> Result<Self> {
        let directed = config.is_directed;
        let n = matrix.nrows().max(matrix.ncols());
        let entry = |i: usize, j: usize| matrix.get((i, j)).copied().unwrap_or(0.0);

        let mut network = Network::new(config);
        network.add_vertex_list((0..n).map(Vertex::new))?;

        for i in 0..n {
            let start = if directed { 0 } else { i };
            for j in start..n {
                let weight = match entry(i, j) {
                    w if w != 0.0 => w,
                    _ if !directed => entry(j, i),
                    _ => 0.0,
                };

                if weight != 0.0 {
                    network.add_edge_checked(Edge::new(i, j).with_weight(weight))?;
                }
            }
        }

        Ok(network)
    }

    //
    // Private
    //

    fn insert_edge(&mut self, mut edge: Edge, do_force: bool) -> Result<Option<Id>> {
        if let Some(id) = edge.id() {
            if self.edges.contains_key(id) {
                return Err(NetworkError::ExistingEdge(id.clone()));
            }
        }

        if self.config.reject_self_loops && edge.is_self_loop() {
            return Err(NetworkError::SelfLoop(edge.from().clone()));
        }

        // Re-inserting an existing edge is a no-op, even on a full network.
        let directed = self.is_directed();
        if self.edges.values().any(|other| other.is_same(&edge, directed)) {
            if self.config.strict {
                return Err(NetworkError::NotMultigraph {
                    from: edge.from().clone(),
                    to: edge.to().clone(),
                });
            }

            trace!(from = %edge.from(), to = %edge.to(), "ignoring duplicate edge");
            return Ok(None);
        }

        let edge_limit = self.config.edge_limit;
        if self.edges.len() >= edge_limit {
            return Err(NetworkError::EdgeLimitExceeded { limit: edge_limit });
        }

        // A self-loop only needs its single endpoint created once.
        let missing: Vec<Id> = [edge.from(), edge.to()]
            .into_iter()
            .dedup()
            .filter(|id| !self.vertices.contains_key(*id))
            .cloned()
            .collect();

        if let Some(id) = missing.first() {
            if !do_force {
                return Err(NetworkError::InexistentVertex(id.clone()));
            }

            // Check up front so a failed insertion creates no vertex at all.
            if self.vertices.len() + missing.len() > self.config.vertex_limit {
                return Err(NetworkError::VertexLimitExceeded {
                    limit: self.config.vertex_limit,
                });
            }
        }

        let id = match edge.id() {
            Some(id) => id.clone(),
            None => generate_id(
                &self.edges,
                &mut self.next_edge_id,
                edge_limit,
                self.config.id_retries,
            )
            .ok_or(NetworkError::EdgeLimitExceeded { limit: edge_limit })?,
        };

        for vertex in missing {
            self.vertices.insert(vertex.clone(), Vertex::new(vertex));
        }

        edge.set_id(id.clone());
        self.edges.insert(id.clone(), edge);
        self.clear_cache();

        Ok(Some(id))
    }

    /// Removes a vertex and its incident edges, returning the vertex if it was present.
    pub(crate) fn detach_vertex(&mut self, id: &Id) -> Option<Vertex> {
        let vertex = self.vertices.shift_remove(id)?;
        self.edges.retain(|_, edge| !edge.contains(id));
        self.clear_cache();

        Some(vertex)
    }

    /// Clears the computed state.
    ///
    /// This should be called every time the network is mutated since the cached state won't
    /// correspond to the new network.
    fn clear_cache(&mut self) {
        self.index = None;
        self.adjacency_matrix = None;
    }

    /// Returns the index of vertices, generating and storing it if needed.
    fn index(&mut self) -> &BTreeMap<Id, usize> {
        self.index.get_or_insert_with(|| {
            self.vertices
                .keys()
                .sorted()
                .enumerate()
                .map(|(i, id)| (id.clone(), i))
                .collect()
        })
    }
}

//
// Helpers
//

/// Generates an id absent from `taken`.
///
/// The sequential counter is tried first. On collision a bounded number of random ids below the
/// limit are tried, then the ids below the limit are swept in order. `None` means every integer id
/// below the limit is taken.
fn generate_id<V>(
    taken: &IndexMap<Id, V>,
    counter: &mut i64,
    limit: usize,
    retries: usize,
) -> Option<Id> {
    let candidate = Id::Int(*counter);
    *counter += 1;
    if !taken.contains_key(&candidate) {
        return Some(candidate);
    }

    if limit == 0 {
        return None;
    }

    debug!(%candidate, "id counter collision, falling back to random ids");

    let mut rng = rand::thread_rng();
    for _ in 0..retries {
        let candidate = Id::from(rng.gen_range(0..limit));
        if !taken.contains_key(&candidate) {
            return Some(candidate);
        }
    }

    let swept = (0..limit).map(Id::from).find(|id| !taken.contains_key(id));
    if swept.is_none() {
        warn!(limit, "no free id below the limit");
    }

    swept
}
