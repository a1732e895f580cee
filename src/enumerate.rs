//! Enumeration of the shortest cycles of a network: triplets (length 3) and quadruplets (length 4).
//!
//! Both searches first reduce the network to its 2-core, since a vertex on a cycle needs at least
//! two edges along it.

use std::collections::HashSet;

use itertools::Itertools;
use tracing::debug;

use crate::{cycle::Cycle, edge::Edge, id::Id, network::Network};

/// The vertices of a length-3 cycle `[a, b, c]`, walked `a → b → c → a` when directed.
pub type Triplet = [Id; 3];

impl Network {
    /// Returns every length-3 cycle of the network, each once.
    ///
    /// Undirected triplets are told apart by their vertex set, directed ones by their vertex
    /// sequence up to rotation, so `a → b → c → a` and `a → c → b → a` are distinct.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::network::Network;
    ///
    /// let mut network = Network::default();
    /// network
    ///     .add_edge_list([Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)])
    ///     .unwrap();
    ///
    /// assert_eq!(network.triplets().len(), 1);
    /// ```
    pub fn triplets(&self) -> Vec<Triplet> {
        let core = self.core(2);
        let directed = core.is_directed();

        let mut seen = HashSet::new();
        let mut triplets = Vec::new();

        for edge in core.edges().filter(|edge| !edge.is_self_loop()) {
            let (from, to) = (edge.from(), edge.to());

            // The third vertex must lead into `from` and be reachable from `to`.
            let candidates = if directed {
                core.in_neighbors(from)
            } else {
                core.neighbors(from)
            };

            for id in candidates {
                if &id == from || &id == to || !core.has_edge(to, &id) {
                    continue;
                }

                let triplet = [id, from.clone(), to.clone()];
                if seen.insert(canonical(&triplet, directed)) {
                    triplets.push(triplet);
                }
            }
        }

        debug!(
            edges = core.edge_count(),
            triplets = triplets.len(),
            "enumerated triplets"
        );

        triplets
    }

    /// Returns every length-4 cycle of the network, each once, as closed [`Cycle`]s.
    ///
    /// Two cycles are the same when they are made of the same edges (see [`Cycle::is_same_as`]).
    /// Every candidate is compared against the cycles found so far, which dominates the cost on
    /// dense networks.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::network::Network;
    ///
    /// // The complete network on four vertices.
    /// let mut network = Network::default();
    /// network
    ///     .add_edge_list([
    ///         Edge::new(1, 2),
    ///         Edge::new(1, 3),
    ///         Edge::new(1, 4),
    ///         Edge::new(2, 3),
    ///         Edge::new(2, 4),
    ///         Edge::new(3, 4),
    ///     ])
    ///     .unwrap();
    ///
    /// assert_eq!(network.quadruplets().len(), 3);
    /// ```
    pub fn quadruplets(&self) -> Vec<Cycle> {
        let core = self.core(2);
        let directed = core.is_directed();

        let mut quadruplets: Vec<Cycle> = Vec::new();
        let mut duplicates = 0;

        for edge in core.edges().filter(|edge| !edge.is_self_loop()) {
            let (mut loop_vertex, mut pair_vertex) = (edge.from(), edge.to());

            // Anchor the cycle on the endpoint with more neighbors.
            if !directed && core.neighbors(pair_vertex).len() > core.neighbors(loop_vertex).len() {
                std::mem::swap(&mut loop_vertex, &mut pair_vertex);
            }

            let mut seed = Edge::new(loop_vertex, pair_vertex).with_weight(edge.weight());
            if let Some(id) = edge.id() {
                seed = seed.with_id(id);
            }

            for via in core.out_neighbors(pair_vertex) {
                if &via == loop_vertex {
                    continue;
                }

                let Some(step) = core.edge_between(pair_vertex, &via) else {
                    continue;
                };

                for candidate in core.out_edges(&via) {
                    let Ok(mut cycle) = Cycle::new(&seed, directed) else {
                        continue;
                    };

                    if !cycle.add_edge(step) || !cycle.add_edge(candidate) {
                        continue;
                    }

                    let Some(closing) = core.edge_between(cycle.tip_vertex(), loop_vertex) else {
                        continue;
                    };

                    if !cycle.close(closing) {
                        continue;
                    }

                    if quadruplets.iter().any(|found| found.is_same_as(&cycle)) {
                        duplicates += 1;
                        continue;
                    }

                    quadruplets.push(cycle);
                }
            }
        }

        debug!(
            edges = core.edge_count(),
            quadruplets = quadruplets.len(),
            duplicates,
            "enumerated quadruplets"
        );

        quadruplets
    }
}

//
// Helpers
//

/// Returns the key identifying a triplet: its sorted vertices when undirected, its rotation
/// starting at the smallest vertex when directed.
fn canonical(triplet: &Triplet, directed: bool) -> Triplet {
    let mut key = triplet.clone();

    if directed {
        let start = key.iter().position_min().unwrap_or(0);
        key.rotate_left(start);
    } else {
        key.sort();
    }

    key
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::config::NetworkConfig;

    fn id(value: impl Into<Id>) -> Id {
        value.into()
    }

    fn complete(n: i64, config: NetworkConfig) -> Network {
        let directed = config.is_directed;
        let mut network = Network::new(config);

        for (a, b) in (0..n).tuple_combinations() {
            network.add_edge(Edge::new(a, b)).unwrap();
            if directed {
                network.add_edge(Edge::new(b, a)).unwrap();
            }
        }

        network
    }

    fn vertex_set(cycle: &Cycle) -> BTreeSet<Id> {
        cycle.path().iter().cloned().collect()
    }

    #[test]
    fn canonical() {
        let triplet = [id(3), id(1), id(2)];

        assert_eq!(super::canonical(&triplet, false), [id(1), id(2), id(3)]);
        assert_eq!(super::canonical(&triplet, true), [id(1), id(2), id(3)]);
        assert_eq!(
            super::canonical(&[id(3), id(2), id(1)], true),
            [id(1), id(3), id(2)]
        );
    }

    #[test]
    fn triplets_single_triangle() {
        let network = network!([1, 2, 3, 1]);
        let triplets = network.triplets();

        assert_eq!(triplets.len(), 1);

        let vertices: BTreeSet<Id> = triplets[0].iter().cloned().collect();
        assert_eq!(vertices, BTreeSet::from([id(1), id(2), id(3)]));
    }

    #[test]
    fn triplets_complete() {
        let triplets = complete(4, NetworkConfig::default()).triplets();
        assert_eq!(triplets.len(), 4);

        let sets: HashSet<[Id; 3]> = triplets
            .iter()
            .map(|triplet| super::canonical(triplet, false))
            .collect();
        assert_eq!(sets.len(), 4);

        assert_eq!(complete(5, NetworkConfig::default()).triplets().len(), 10);
    }

    #[test]
    fn triplets_ignore_trees_and_squares() {
        assert!(network!([1, 2, 3, 4]).triplets().is_empty());
        assert!(network!([1, 2, 3, 4, 1]).triplets().is_empty());
        assert_eq!(network!([1, 2, 3, 1], [3, 4, 5], [2, 6]).triplets().len(), 1);
    }

    #[test]
    fn triplets_directed() {
        let cyclic = network!(NetworkConfig::directed(); [1, 2, 3, 1]);
        let triplets = cyclic.triplets();

        assert_eq!(triplets.len(), 1);
        let [a, b, c] = &triplets[0];
        assert!(cyclic.has_edge(a, b) && cyclic.has_edge(b, c) && cyclic.has_edge(c, a));

        // A transitive triangle is not a directed cycle.
        let transitive = network!(NetworkConfig::directed(); [1, 2, 3], [1, 3]);
        assert!(transitive.triplets().is_empty());

        // Both orientations of every triangle.
        assert_eq!(complete(4, NetworkConfig::directed()).triplets().len(), 8);
    }

    #[test]
    fn quadruplets_complete_four() {
        let quadruplets = complete(4, NetworkConfig::default()).quadruplets();

        assert_eq!(quadruplets.len(), 3);
        for (a, b) in quadruplets.iter().tuple_combinations() {
            assert!(!a.is_same_as(b));
        }
    }

    #[test]
    fn quadruplets_complete_counts() {
        for n in 4..=6 {
            let expected = (n * (n - 1) * (n - 2) * (n - 3) / 8) as usize;
            let quadruplets = complete(n, NetworkConfig::default()).quadruplets();

            assert_eq!(quadruplets.len(), expected);
            for (a, b) in quadruplets.iter().tuple_combinations() {
                assert!(!a.is_same_as(b));
            }
        }
    }

    #[test]
    fn quadruplets_are_closed_squares() {
        let network = complete(5, NetworkConfig::default());

        for cycle in network.quadruplets() {
            assert!(cycle.is_closed());
            assert_eq!(cycle.len(), 4);
            assert_eq!(vertex_set(&cycle).len(), 4);

            for edge in cycle.edges() {
                assert!(network.has_edge(edge.from(), edge.to()));
            }
        }
    }

    #[test]
    fn quadruplets_square() {
        // A square with a tail, and a triangle hanging off one of its corners.
        let network = network!([1, 2, 3, 4, 1], [4, 5], [2, 6, 7, 2]);
        let quadruplets = network.quadruplets();

        assert_eq!(quadruplets.len(), 1);
        assert_eq!(
            vertex_set(&quadruplets[0]),
            BTreeSet::from([id(1), id(2), id(3), id(4)])
        );

        assert!(network!([1, 2, 3, 1]).quadruplets().is_empty());
    }

    #[test]
    fn quadruplets_directed() {
        let square = network!(NetworkConfig::directed(); [1, 2, 3, 4, 1]);
        let quadruplets = square.quadruplets();

        assert_eq!(quadruplets.len(), 1);
        assert!(quadruplets[0].is_directed());

        let broken = network!(NetworkConfig::directed(); [1, 2, 3, 4], [1, 4]);
        assert!(broken.quadruplets().is_empty());

        // Every Hamiltonian cycle of the complete directed network on four vertices.
        assert_eq!(complete(4, NetworkConfig::directed()).quadruplets().len(), 6);
    }
}
