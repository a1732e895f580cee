//! A module for working with vertices.

use serde::{Deserialize, Serialize};

use crate::id::Id;

/// The weight given to a vertex when none is specified.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A vertex, identified by an [`Id`] and carrying a weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    id: Id,
    weight: f64,
}

impl Vertex {
    /// Creates a new vertex with the default weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use netsci::vertex::Vertex;
    ///
    /// let vertex = Vertex::new("a");
    /// assert_eq!(vertex.weight(), 1.0);
    /// ```
    pub fn new(id: impl Into<Id>) -> Self {
        Self::weighted(id, DEFAULT_WEIGHT)
    }

    /// Creates a new vertex with the given weight.
    pub fn weighted(id: impl Into<Id>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Only the owning network relabels weights, the id stays immutable.
    pub(crate) fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }
}
