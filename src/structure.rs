//! Structural measurements and derived networks.
//!
//! Every algorithm reads the network through its public query surface and either returns a scalar
//! or builds a new, independent [`Network`].

use std::collections::{BTreeMap, HashMap, VecDeque};

use itertools::{Itertools, MinMaxResult};
use nalgebra::DVector;
use tracing::{debug, trace, warn};

use crate::{
    config::NetworkConfig,
    edge::Edge,
    error::{NetworkError, Result},
    id::Id,
    network::Network,
};

impl Network {
    /// Returns the ego network of a vertex: the vertex, its neighbors and every edge among them.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::id::Id;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network
    ///     .add_edge_list([Edge::new(1, 2), Edge::new(1, 3), Edge::new(2, 3), Edge::new(3, 4)])
    ///     .unwrap();
    ///
    /// let ego = network.ego(&Id::from(1)).unwrap();
    /// assert_eq!(ego.vertex_count(), 3);
    /// assert_eq!(ego.edge_count(), 3);
    /// ```
    pub fn ego(&self, id: &Id) -> Result<Network> {
        let center = self
            .vertex(id)
            .ok_or_else(|| NetworkError::InexistentVertex(id.clone()))?;

        let mut ego = Network::new(self.config().clone());
        ego.add_vertex(center.clone())?;

        // The edges touching the center bring its neighbors in...
        for edge in self.edges().filter(|edge| edge.contains(id)) {
            if let Some(neighbor) = edge.opposite(id).and_then(|other| self.vertex(other)) {
                if !ego.has_vertex(neighbor.id()) {
                    ego.add_vertex(neighbor.clone())?;
                }
            }

            ego.add_edge_checked(edge.clone())?;
        }

        // ...which then decide which of the remaining edges are visible.
        for edge in self.edges().filter(|edge| !edge.contains(id)) {
            if ego.has_vertex(edge.from()) && ego.has_vertex(edge.to()) {
                ego.add_edge_checked(edge.clone())?;
            }
        }

        Ok(ego)
    }

    /// Returns the complement of the network: the same vertices, joined exactly where the network
    /// has no edge. Each orientation is considered separately when directed.
    ///
    /// The edge limit of the complement is raised if needed to hold every possible non-edge.
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
    /// let complement = network.complement();
    /// assert_eq!(complement.edge_count(), 1);
    /// assert!(complement.has_edge(&Id::from(1), &Id::from(3)));
    /// ```
    pub fn complement(&self) -> Network {
        let directed = self.is_directed();
        let n = self.vertex_count();
        let possible = if directed {
            n * n.saturating_sub(1)
        } else {
            self.max_edges()
        };

        let config = NetworkConfig {
            edge_limit: self.edge_limit().max(possible),
            ..self.config().clone()
        };

        let mut complement = Network::new(config);
        for vertex in self.vertices() {
            if let Err(error) = complement.add_vertex(vertex.clone()) {
                warn!(%error, "dropping complement vertex");
            }
        }

        let ids: Vec<&Id> = self.vertex_ids().collect();
        let pairs: Vec<(&Id, &Id)> = if directed {
            ids.iter()
                .copied()
                .cartesian_product(ids.iter().copied())
                .filter(|(from, to)| from != to)
                .collect()
        } else {
            ids.iter().copied().tuple_combinations().collect()
        };

        for (from, to) in pairs {
            if self.has_edge(from, to) {
                continue;
            }

            if let Err(error) = complement.add_edge_checked(Edge::new(from, to)) {
                warn!(%error, "dropping complement edge");
            }
        }

        complement
    }

    /// Returns the `k`-core of the network, obtained by repeatedly removing the vertices whose
    /// degree is below `k`. A `k` of zero or less returns a copy of the network.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::id::Id;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network
    ///     .add_edge_list([Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1), Edge::new(3, 4)])
    ///     .unwrap();
    ///
    /// let core = network.core(2);
    /// assert_eq!(core.vertex_count(), 3);
    /// assert!(!core.has_vertex(&Id::from(4)));
    /// ```
    pub fn core(&self, k: i64) -> Network {
        let mut core = self.copy();
        let mut k = k;

        while k > 0 && core.vertex_count() > 0 {
            // A removal lowers the degree of the neighbors, so the scan starts over each time.
            loop {
                let found = core
                    .vertex_ids()
                    .find(|id| (core.degree(id) as i64) < k)
                    .cloned();
                let Some(id) = found else {
                    break;
                };

                trace!(vertex = %id, k, "peeling vertex");
                core.detach_vertex(&id);
            }

            k -= 1;
        }

        debug!(
            vertices = core.vertex_count(),
            edges = core.edge_count(),
            "computed core"
        );

        core
    }

    /// Computes the local clustering coefficient of a vertex: the share of its neighbor pairs that
    /// are linked, doubled when the network is directed. A pair counts as linked when an edge
    /// joins it in either orientation.
    ///
    /// Vertices with fewer than two neighbors, or absent from the network, have a coefficient of
    /// zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::id::Id;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network
    ///     .add_edge_list([Edge::new(1, 2), Edge::new(1, 3), Edge::new(1, 4), Edge::new(2, 3)])
    ///     .unwrap();
    ///
    /// assert_eq!(network.clustering(&Id::from(1)), 1.0 / 3.0);
    /// assert_eq!(network.clustering(&Id::from(4)), 0.0);
    /// ```
    pub fn clustering(&self, id: &Id) -> f64 {
        let Ok(mut ego) = self.ego(id) else {
            return 0.0;
        };

        if ego.vertex_count() <= 1 {
            return 0.0;
        }

        ego.detach_vertex(id);

        let max_edges = ego.max_edges();
        if max_edges == 0 {
            return 0.0;
        }

        let ids: Vec<&Id> = ego.vertex_ids().collect();
        let linked = ids
            .into_iter()
            .tuple_combinations()
            .filter(|(a, b)| ego.has_edge(a, b) || ego.has_edge(b, a))
            .count();

        let directed_const = if self.is_directed() { 2.0 } else { 1.0 };

        directed_const * linked as f64 / max_edges as f64
    }

    /// Returns the mean clustering coefficient over every vertex, zero for networks with at most
    /// one vertex.
    pub fn average_clustering(&self) -> f64 {
        let n = self.vertex_count();
        if n <= 1 {
            return 0.0;
        }

        let total: f64 = self.vertex_ids().map(|id| self.clustering(id)).sum();

        total / n as f64
    }

    /// Computes the degree assortativity of the network, the correlation between the degrees at
    /// both ends of the edges.
    ///
    /// Returns zero when there are no edges or when every edge joins vertices of the same degrees,
    /// for which the correlation is undefined.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::network::Network;
    ///
    /// // A star is perfectly disassortative.
    /// let mut network = Network::default();
    /// network
    ///     .add_edge_list([Edge::new(0, 1), Edge::new(0, 2), Edge::new(0, 3)])
    ///     .unwrap();
    ///
    /// assert_eq!(network.assortativity(), -1.0);
    /// ```
    pub fn assortativity(&self) -> f64 {
        if self.edge_count() == 0 {
            return 0.0;
        }

        let (from, to): (Vec<f64>, Vec<f64>) = self
            .edges()
            .map(|edge| {
                (
                    self.degree(edge.from()) as f64,
                    self.degree(edge.to()) as f64,
                )
            })
            .unzip();

        let (from, to) = (DVector::from_vec(from), DVector::from_vec(to));

        let product = from.component_mul(&to).mean();
        let sum = (&from + &to).mean();
        let squares = (from.component_mul(&from) + to.component_mul(&to)).mean();

        let numerator = 4.0 * product - sum * sum;
        let denominator = 2.0 * squares - sum * sum;

        if denominator.abs() < f64::EPSILON {
            return 0.0;
        }

        numerator / denominator
    }

    /// Returns a mapping of vertices to their degree centrality (number of incident edges).
    pub fn degree_centrality(&self) -> HashMap<Id, usize> {
        self.vertex_ids()
            .map(|id| (id.clone(), self.degree(id)))
            .collect()
    }

    /// Returns the difference between the highest and lowest degree in the network.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network.add_edge_list([Edge::new("a", "b"), Edge::new("a", "c")]).unwrap();
    ///
    /// assert_eq!(network.degree_centrality_delta(), 1);
    /// ```
    pub fn degree_centrality_delta(&self) -> usize {
        match self.vertex_ids().map(|id| self.degree(id)).minmax() {
            MinMaxResult::NoElements | MinMaxResult::OneElement(_) => 0,
            MinMaxResult::MinMax(min, max) => max - min,
        }
    }

    /// Returns the mean degree, zero for an empty network.
    pub fn average_degree(&self) -> f64 {
        let n = self.vertex_count();
        if n == 0 {
            return 0.0;
        }

        let total: usize = self.vertex_ids().map(|id| self.degree(id)).sum();

        total as f64 / n as f64
    }

    /// Returns how many vertices have each degree.
    pub fn degree_distribution(&self) -> BTreeMap<usize, usize> {
        let mut distribution = BTreeMap::new();
        for id in self.vertex_ids() {
            *distribution.entry(self.degree(id)).or_insert(0) += 1;
        }

        distribution
    }

    /// Computes the smallest summed edge weight from `source` to every vertex reachable from it,
    /// following edge direction when the network is directed.
    ///
    /// The search is driven by a work-list rather than recursion. Each vertex is relaxed at most
    /// `|V|` times, which bounds the search when negative cycles are present.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::id::Id;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network
    ///     .add_edge_list([
    ///         Edge::new(1, 2),
    ///         Edge::new(2, 3),
    ///         Edge::new(1, 3).with_weight(5.0),
    ///     ])
    ///     .unwrap();
    ///
    /// let weights = network.path_weights(&Id::from(1)).unwrap();
    /// assert_eq!(weights[&Id::from(3)], 2.0);
    /// ```
    pub fn path_weights(&self, source: &Id) -> Result<HashMap<Id, f64>> {
        if !self.has_vertex(source) {
            return Err(NetworkError::InexistentVertex(source.clone()));
        }

        let bound = self.vertex_count();
        let mut weights = HashMap::from([(source.clone(), 0.0)]);
        let mut relaxations: HashMap<Id, usize> = HashMap::new();
        let mut work = VecDeque::from([source.clone()]);

        while let Some(current) = work.pop_front() {
            let Some(&base) = weights.get(&current) else {
                continue;
            };

            for edge in self.out_edges(&current) {
                let Some(next) = edge.opposite(&current) else {
                    continue;
                };

                let candidate = base + edge.weight();
                if weights.get(next).is_some_and(|&known| known <= candidate) {
                    continue;
                }

                let count = relaxations.entry(next.clone()).or_insert(0);
                if *count >= bound {
                    continue;
                }
                *count += 1;

                weights.insert(next.clone(), candidate);
                if !work.contains(next) {
                    work.push_back(next.clone());
                }
            }
        }

        Ok(weights)
    }

    /// Sets the weight of every vertex reachable from `source` to its path weight (see
    /// [`Network::path_weights`]) and returns how many vertices were labeled.
    pub fn label_path_weights(&mut self, source: &Id) -> Result<usize> {
        let weights = self.path_weights(source)?;
        for (id, weight) in &weights {
            self.set_vertex_weight(id, *weight)?;
        }

        Ok(weights.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::Vertex;

    fn id(value: impl Into<Id>) -> Id {
        value.into()
    }

    fn complete(n: i64) -> Network {
        let mut network = Network::default();
        for (a, b) in (0..n).tuple_combinations() {
            network.add_edge(Edge::new(a, b)).unwrap();
        }

        network
    }

    #[test]
    fn ego() {
        let network = network!([1, 2, 3, 1], [3, 4, 5]);
        let ego = network.ego(&id(1)).unwrap();

        assert_eq!(ego.vertex_count(), 3);
        assert_eq!(ego.edge_count(), 3);
        assert!(ego.has_edge(&id(2), &id(3)));
        assert!(!ego.has_vertex(&id(4)));
        assert_eq!(ego.config(), network.config());
    }

    #[test]
    fn ego_keeps_weights_and_ids() {
        let mut network = Network::default();
        network.add_vertex(Vertex::weighted(1, 3.0)).unwrap();
        network.add_edge(Edge::new(1, 2).with_id("x").with_weight(0.5)).unwrap();

        let ego = network.ego(&id(1)).unwrap();

        assert_eq!(ego.vertex(&id(1)).unwrap().weight(), 3.0);
        assert_eq!(ego.edge(&id("x")).unwrap().weight(), 0.5);
    }

    #[test]
    fn ego_isolated_and_missing() {
        let mut network = network!([1, 2]);
        network.add_vertex(Vertex::new(3)).unwrap();

        let ego = network.ego(&id(3)).unwrap();
        assert_eq!(ego.vertex_count(), 1);
        assert_eq!(ego.edge_count(), 0);

        assert_eq!(
            network.ego(&id(9)).unwrap_err(),
            NetworkError::InexistentVertex(id(9))
        );
    }

    #[test]
    fn ego_directed() {
        let network = network!(NetworkConfig::directed(); [2, 1, 3], [3, 2]);
        let ego = network.ego(&id(1)).unwrap();

        // Both in and out neighbors are part of the ego network.
        assert_eq!(ego.vertex_count(), 3);
        assert!(ego.has_edge(&id(3), &id(2)));
        assert!(!ego.has_edge(&id(2), &id(3)));
    }

    #[test]
    fn complement() {
        let network = network!([1, 2, 3]);
        let complement = network.complement();

        assert_eq!(complement.vertex_count(), 3);
        assert_eq!(complement.edge_count(), 1);
        assert!(complement.has_edge(&id(1), &id(3)));
    }

    #[test]
    fn complement_directed() {
        let network = network!(NetworkConfig::directed(); [1, 2]);
        let complement = network.complement();

        assert_eq!(complement.edge_count(), 1);
        assert!(complement.has_edge(&id(2), &id(1)));
        assert!(!complement.has_edge(&id(1), &id(2)));
    }

    #[test]
    fn complement_closure() {
        let network = network!([1, 2, 3, 4], [2, 5], [5, 1]);
        let twice = network.complement().complement();

        assert_eq!(twice.vertex_count(), network.vertex_count());
        assert_eq!(twice.edge_count(), network.edge_count());
        for edge in network.edges() {
            assert!(twice.has_edge(edge.from(), edge.to()));
        }

        let directed = network!(NetworkConfig::directed(); [1, 2, 3, 1], [2, 1]);
        let twice = directed.complement().complement();

        assert_eq!(twice.edge_count(), directed.edge_count());
        for edge in directed.edges() {
            assert!(twice.has_edge(edge.from(), edge.to()));
        }
    }

    #[test]
    fn complement_raises_edge_limit() {
        let mut network = Network::new(NetworkConfig::default().with_edge_limit(1));
        network
            .add_vertex_list((0..5).map(Vertex::new))
            .unwrap();

        let complement = network.complement();

        assert_eq!(complement.edge_count(), 10);
        assert_eq!(complement.density(), 1.0);
    }

    #[test]
    fn core_zero_is_identity() {
        let network = network!([1, 2, 3], [3, 4]);

        for k in [0, -3] {
            let core = network.core(k);
            assert_eq!(core.vertex_list(), network.vertex_list());
            assert_eq!(core.edge_list(), network.edge_list());
        }
    }

    #[test]
    fn core() {
        // A triangle with a tail.
        let network = network!([1, 2, 3, 1], [3, 4, 5]);

        let core = network.core(2);
        assert_eq!(core.vertex_count(), 3);
        assert_eq!(core.edge_count(), 3);
        assert!(!core.has_vertex(&id(4)));
        assert!(!core.has_vertex(&id(5)));

        assert_eq!(network.core(3).vertex_count(), 0);
    }

    #[test]
    fn core_cascades() {
        // Peeling one end of a path lowers the next vertex below the threshold.
        let network = network!([1, 2, 3, 4, 5]);

        assert_eq!(network.core(2).vertex_count(), 0);
        assert_eq!(network.core(1).vertex_count(), 5);
    }

    #[test]
    fn core_is_non_increasing() {
        let mut network = complete(5);
        network.add_edge(Edge::new(4, 5)).unwrap();
        network.add_edge(Edge::new(5, 6)).unwrap();

        let counts: Vec<usize> = (0..7).map(|k| network.core(k).vertex_count()).collect();

        assert_eq!(counts, vec![7, 7, 5, 5, 5, 0, 0]);
        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn clustering() {
        let network = network!([1, 2, 3, 1], [1, 4]);

        assert_eq!(network.clustering(&id(1)), 1.0 / 3.0);
        assert_eq!(network.clustering(&id(2)), 1.0);
        assert_eq!(network.clustering(&id(4)), 0.0);
        assert_eq!(network.clustering(&id(9)), 0.0);
    }

    #[test]
    fn clustering_directed() {
        let network = network!(NetworkConfig::directed(); [1, 2, 3, 1]);
        assert_eq!(network.clustering(&id(1)), 2.0);

        // Reciprocal edges don't count twice.
        let network = network!(NetworkConfig::directed(); [1, 2, 3, 1], [3, 2]);
        assert_eq!(network.clustering(&id(1)), 2.0);
    }

    #[test]
    fn clustering_bounds() {
        let network = network!([1, 2, 3, 4, 1, 3], [4, 5], [2, 6, 5]);

        for vertex in network.vertex_ids() {
            let clustering = network.clustering(vertex);
            assert!((0.0..=1.0).contains(&clustering));

            if network.degree(vertex) <= 1 {
                assert_eq!(clustering, 0.0);
            }
        }
    }

    #[test]
    fn average_clustering() {
        assert_eq!(complete(3).average_clustering(), 1.0);
        assert_eq!(complete(5).average_clustering(), 1.0);
        assert_eq!(network!([1, 2, 3]).average_clustering(), 0.0);

        let mut single = Network::default();
        single.add_vertex(Vertex::new(1)).unwrap();
        assert_eq!(single.average_clustering(), 0.0);
    }

    #[test]
    fn assortativity() {
        assert_eq!(network!([1, 2, 3]).assortativity(), -1.0);
        assert_eq!(Network::default().assortativity(), 0.0);

        // Every endpoint has the same degree.
        assert_eq!(complete(4).assortativity(), 0.0);

        let assortativity = network!([1, 2, 3, 4, 1, 3], [4, 5]).assortativity();
        assert!((-1.0..=1.0).contains(&assortativity));
    }

    #[test]
    fn degree_centrality() {
        let network = network!([1, 2, 3], [2, 4]);
        let centrality = network.degree_centrality();

        assert_eq!(centrality.len(), 4);
        assert_eq!(centrality.get(&id(2)), Some(&3));
        assert_eq!(centrality.get(&id(4)), Some(&1));
    }

    #[test]
    fn degree_centrality_delta() {
        assert_eq!(Network::default().degree_centrality_delta(), 0);
        assert_eq!(network!([1, 2]).degree_centrality_delta(), 0);
        assert_eq!(network!([1, 2, 3], [2, 4]).degree_centrality_delta(), 2);
    }

    #[test]
    fn average_degree() {
        assert_eq!(Network::default().average_degree(), 0.0);
        assert_eq!(network!([1, 2, 3]).average_degree(), 4.0 / 3.0);
        assert_eq!(complete(4).average_degree(), 3.0);
    }

    #[test]
    fn degree_distribution() {
        let distribution = network!([1, 2, 3], [2, 4]).degree_distribution();

        assert_eq!(distribution, BTreeMap::from([(1, 3), (3, 1)]));
    }

    #[test]
    fn density_bounds() {
        for network in [Network::default(), network!([1, 2, 3]), complete(6)] {
            let density = network.density();
            assert!((0.0..=1.0).contains(&density));
        }

        assert_eq!(complete(6).density(), 1.0);
    }

    #[test]
    fn path_weights() {
        let mut network = Network::default();
        network
            .add_edge_list([
                Edge::new(1, 2).with_weight(1.0),
                Edge::new(2, 3).with_weight(1.5),
                Edge::new(1, 3).with_weight(5.0),
                Edge::new(3, 4).with_weight(1.0),
            ])
            .unwrap();
        network.add_vertex(Vertex::new(5)).unwrap();

        let weights = network.path_weights(&id(1)).unwrap();

        assert_eq!(weights.len(), 4);
        assert_eq!(weights[&id(1)], 0.0);
        assert_eq!(weights[&id(3)], 2.5);
        assert_eq!(weights[&id(4)], 3.5);
        assert!(!weights.contains_key(&id(5)));

        assert_eq!(
            network.path_weights(&id(9)).unwrap_err(),
            NetworkError::InexistentVertex(id(9))
        );
    }

    #[test]
    fn path_weights_directed() {
        let network = network!(NetworkConfig::directed(); [1, 2, 3], [4, 1]);
        let weights = network.path_weights(&id(1)).unwrap();

        assert_eq!(weights.len(), 3);
        assert_eq!(weights[&id(3)], 2.0);
        assert!(!weights.contains_key(&id(4)));
    }

    #[test]
    fn path_weights_negative_cycle() {
        let mut network = Network::new(NetworkConfig::directed());
        network
            .add_edge_list([
                Edge::new(1, 2),
                Edge::new(2, 3).with_weight(-3.0),
                Edge::new(3, 1),
            ])
            .unwrap();

        // Terminates despite the weights decreasing around the cycle.
        let weights = network.path_weights(&id(1)).unwrap();
        assert_eq!(weights.len(), 3);
    }

    #[test]
    fn path_weights_long_chain() {
        let path: Vec<i64> = (0..1000).collect();
        let network = network!(NetworkConfig::default().with_vertex_limit(1000); path);

        let weights = network.path_weights(&id(0)).unwrap();
        assert_eq!(weights[&id(999)], 999.0);
    }

    #[test]
    fn label_path_weights() {
        let mut network = network!([1, 2, 3]);
        network.add_vertex(Vertex::weighted(4, 7.0)).unwrap();

        assert_eq!(network.label_path_weights(&id(1)), Ok(3));
        assert_eq!(network.vertex(&id(1)).unwrap().weight(), 0.0);
        assert_eq!(network.vertex(&id(3)).unwrap().weight(), 2.0);
        assert_eq!(network.vertex(&id(4)).unwrap().weight(), 7.0);
    }
}
