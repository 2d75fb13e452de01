//! Route graph - the immutable, indexed edge set trips are validated against

use std::collections::{BTreeSet, HashMap};

use crate::entities::{Edge, EdgeRow};
use crate::errors::{DomainError, RowIssue};
use crate::value_objects::{GeoLocation, NodeKey, Stop};

/// Directed, weighted graph of (country, city) nodes
///
/// Built once from the source rows and read-only afterwards, so a single
/// instance can be shared between any number of readers. Duplicate
/// `(from, to)` rows are kept; lookups resolve them first-seen-wins.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    edges: Vec<Edge>,
    outbound: HashMap<NodeKey, Vec<usize>>,
}

impl RouteGraph {
    /// Build a graph from raw source rows
    ///
    /// Every row is checked; all incomplete rows are reported together.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Data` listing each offending row (1-based).
    /// No partial graph is produced.
    pub fn from_rows<I>(rows: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = EdgeRow>,
    {
        let mut edges = Vec::new();
        let mut issues: Vec<RowIssue> = Vec::new();

        for (idx, row) in rows.into_iter().enumerate() {
            match row.into_edge(idx + 1) {
                Ok(edge) => edges.push(edge),
                Err(issue) => issues.push(issue),
            }
        }

        if !issues.is_empty() {
            return Err(DomainError::Data { issues });
        }
        Ok(Self::from_edges(edges))
    }

    /// Build a graph from edges that are already validated
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        let mut outbound: HashMap<NodeKey, Vec<usize>> = HashMap::new();
        for (idx, edge) in edges.iter().enumerate() {
            outbound.entry(edge.from.clone()).or_default().push(idx);
        }
        Self { edges, outbound }
    }

    /// All edges in source order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges at all
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of distinct departure cities
    pub fn origin_count(&self) -> usize {
        self.outbound.len()
    }

    /// Outbound edges of `key` in source order; empty for unknown nodes
    pub fn nodes_from(&self, key: &NodeKey) -> Vec<&Edge> {
        self.outbound
            .get(key)
            .map(|indices| indices.iter().map(|&i| &self.edges[i]).collect())
            .unwrap_or_default()
    }

    /// First edge from `from` to `to`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::RouteNotFound` if no such edge exists.
    pub fn find_edge(&self, from: &NodeKey, to: &NodeKey) -> Result<&Edge, DomainError> {
        self.outbound
            .get(from)
            .and_then(|indices| {
                indices
                    .iter()
                    .map(|&i| &self.edges[i])
                    .find(|edge| &edge.to == to)
            })
            .ok_or_else(|| DomainError::RouteNotFound {
                from: from.clone(),
                to: to.clone(),
            })
    }

    /// Whether `key` has at least one outbound edge
    pub fn has_origin(&self, key: &NodeKey) -> bool {
        self.outbound.contains_key(key)
    }

    /// The origin stop for `key`, located by its first outbound edge
    pub fn origin_stop(&self, key: &NodeKey) -> Option<Stop> {
        self.nodes_from(key).first().map(|edge| edge.departure())
    }

    /// Coordinates of `key` wherever it appears, departures first
    pub fn location_of(&self, key: &NodeKey) -> Option<GeoLocation> {
        self.origin_stop(key).map(|stop| stop.location).or_else(|| {
            self.edges
                .iter()
                .find(|edge| &edge.to == key)
                .map(|edge| edge.to_location)
        })
    }

    /// Countries with at least one departure, sorted and deduplicated
    pub fn origin_countries(&self) -> Vec<&str> {
        sorted_unique(self.outbound.keys().map(NodeKey::country))
    }

    /// Departure cities within `country`, sorted and deduplicated
    pub fn origin_cities(&self, country: &str) -> Vec<&str> {
        let country = country.trim();
        sorted_unique(
            self.outbound
                .keys()
                .filter(|key| key.country() == country)
                .map(NodeKey::city),
        )
    }

    /// Countries reachable in one leg from `from`
    pub fn destination_countries(&self, from: &NodeKey) -> Vec<&str> {
        sorted_unique(self.nodes_from(from).into_iter().map(|edge| edge.to.country()))
    }

    /// Cities in `country` reachable in one leg from `from`
    pub fn destination_cities(&self, from: &NodeKey, country: &str) -> Vec<&str> {
        let country = country.trim();
        sorted_unique(
            self.nodes_from(from)
                .into_iter()
                .filter(|edge| edge.to.country() == country)
                .map(|edge| edge.to.city()),
        )
    }
}

fn sorted_unique<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    items.collect::<BTreeSet<_>>().into_iter().collect()
}
