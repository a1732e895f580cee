//! A module for working with edges.

use serde::{Deserialize, Serialize};

use crate::id::Id;

/// The weight given to an edge when none is specified.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A pair of vertices representing a network edge.
///
/// Edges don't store a direction: the `from`-`to` pair is read as ordered or unordered depending on
/// whether the owning network is directed. The id is optional until the edge is inserted into a
/// network, which assigns one if it is absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    from: Id,
    to: Id,
    id: Option<Id>,
    weight: f64,
}

impl Edge {
    /// Creates a new edge from two vertices, with no id and the default weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert!(edge.is_same(&Edge::new("b", "a"), false));
    /// ```
    pub fn new(from: impl Into<Id>, to: impl Into<Id>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            id: None,
            weight: DEFAULT_WEIGHT,
        }
    }

    /// Sets the id of the edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::id::Id;
    ///
    /// let edge = Edge::new("a", "b").with_id("ab");
    /// assert_eq!(edge.id(), Some(&Id::from("ab")));
    /// ```
    pub fn with_id(mut self, id: impl Into<Id>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the weight of the edge.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Returns the first vertex forming the edge.
    pub fn from(&self) -> &Id {
        &self.from
    }

    /// Returns the second vertex forming the edge.
    pub fn to(&self) -> &Id {
        &self.to
    }

    pub fn id(&self) -> Option<&Id> {
        self.id.as_ref()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns whether the edge contains the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    /// use netsci::id::Id;
    ///
    /// let edge = Edge::new("a", "b");
    ///
    /// assert_eq!(edge.contains(&Id::from("a")), true);
    /// assert_eq!(edge.contains(&Id::from("b")), true);
    /// assert_eq!(edge.contains(&Id::from("c")), false);
    /// ```
    pub fn contains(&self, vertex: &Id) -> bool {
        &self.from == vertex || &self.to == vertex
    }

    /// Returns whether the edge links `from` to `to`. Undirected edges also match the swapped pair.
    pub fn connects(&self, from: &Id, to: &Id, directed: bool) -> bool {
        (&self.from == from && &self.to == to)
            || (!directed && &self.from == to && &self.to == from)
    }

    /// Returns whether both edges join the same endpoints, ignoring ids and weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::edge::Edge;
    ///
    /// let (ab, ba) = (Edge::new(1, 2), Edge::new(2, 1));
    ///
    /// assert!(ab.is_same(&ba, false));
    /// assert!(!ab.is_same(&ba, true));
    /// ```
    pub fn is_same(&self, other: &Edge, directed: bool) -> bool {
        self.connects(&other.from, &other.to, directed)
    }

    /// Returns the endpoint opposite to `vertex`, if `vertex` is part of the edge.
    pub fn opposite(&self, vertex: &Id) -> Option<&Id> {
        if &self.from == vertex {
            Some(&self.to)
        } else if &self.to == vertex {
            Some(&self.from)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub(crate) fn set_id(&mut self, id: Id) {
        self.id = Some(id);
    }
}
