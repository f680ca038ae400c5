//! Vertical level assignment for arcs and spans
//!
//! Edges whose ranges conflict cannot share a level. Edges are placed
//! shortest first; each gets a floor one above every conflicting edge it
//! contains and then takes the lowest free level at or above that floor.
//! Containers therefore always end up further from the tokens than what
//! they contain, and edges that merely touch can share a level.

use crate::models::Edge;
use std::cmp::Ordering;

/// Levels assigned to a set of edges (1-based)
#[derive(Clone, Debug, Default)]
pub struct LevelAssignment<'a> {
    placed: Vec<(&'a Edge, usize)>,
}

impl<'a> LevelAssignment<'a> {
    /// Level of an edge, or `None` if it was not part of the assignment
    pub fn level(&self, edge: &Edge) -> Option<usize> {
        self.placed
            .iter()
            .find(|(e, _)| std::ptr::eq(*e, edge) || *e == edge)
            .map(|(_, level)| *level)
    }

    /// Highest level in use, 0 when empty
    pub fn max_level(&self) -> usize {
        self.placed.iter().map(|(_, level)| *level).max().unwrap_or(0)
    }

    /// Edges with their levels, in placement order
    pub fn iter(&self) -> impl Iterator<Item = (&'a Edge, usize)> + '_ {
        self.placed.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

/// Assign levels to edges
///
/// `conflicts` decides which pairs may not share a level and `order`
/// breaks ties between edges of equal length.
pub fn assign_levels<'a>(
    edges: &[&'a Edge],
    conflicts: impl Fn(&Edge, &Edge) -> bool,
    order: impl Fn(&Edge, &Edge) -> Ordering,
) -> LevelAssignment<'a> {
    let mut sorted: Vec<&'a Edge> = edges.to_vec();
    sorted.sort_by(|a, b| {
        a.length()
            .cmp(&b.length())
            .then_with(|| order(*a, *b))
            .then_with(|| a.min_index().cmp(&b.min_index()))
            .then_with(|| a.lexicographic_order(b))
    });

    let mut placed: Vec<(&'a Edge, usize)> = Vec::with_capacity(sorted.len());
    for edge in sorted {
        let blockers: Vec<(&Edge, usize)> = placed
            .iter()
            .copied()
            .filter(|(other, _)| conflicts(edge, *other))
            .collect();

        let floor = blockers
            .iter()
            .filter(|(other, _)| edge.contains(*other))
            .map(|(_, level)| level + 1)
            .max()
            .unwrap_or(1);

        let mut level = floor;
        while blockers.iter().any(|(_, used)| *used == level) {
            level += 1;
        }
        placed.push((edge, level));
    }

    LevelAssignment { placed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arcs(pairs: &[(usize, usize)]) -> Vec<Edge> {
        pairs
            .iter()
            .map(|&(a, b)| Edge::new(a, b, format!("{}-{}", a, b), "dep"))
            .collect()
    }

    fn pack(edges: &[Edge]) -> LevelAssignment<'_> {
        let refs: Vec<&Edge> = edges.iter().collect();
        assign_levels(&refs, Edge::overlaps, |_, _| Ordering::Equal)
    }

    #[test]
    fn test_shared_endpoint_shares_level() {
        let edges = arcs(&[(0, 1), (1, 4)]);
        let levels = pack(&edges);
        assert_eq!(levels.level(&edges[0]), Some(1));
        assert_eq!(levels.level(&edges[1]), Some(1));
        assert_eq!(levels.max_level(), 1);
    }

    #[test]
    fn test_container_sits_above_contained() {
        let edges = arcs(&[(0, 5), (1, 4), (4, 2), (4, 3)]);
        let levels = pack(&edges);
        let outer = levels.level(&edges[0]).unwrap();
        for inner in &edges[1..] {
            assert!(outer > levels.level(inner).unwrap(), "{} not below outer", inner);
        }
        assert_eq!(levels.level(&edges[3]), Some(1));
        assert_eq!(levels.level(&edges[2]), Some(2));
        assert_eq!(levels.level(&edges[1]), Some(3));
        assert_eq!(outer, 4);
    }

    #[test]
    fn test_crossing_arcs_get_separate_levels() {
        let edges = arcs(&[(0, 3), (2, 5)]);
        let levels = pack(&edges);
        assert_ne!(levels.level(&edges[0]), levels.level(&edges[1]));
        assert_eq!(levels.max_level(), 2);
    }

    #[test]
    fn test_lowest_free_level_is_reused() {
        // (0,2) and (3,5) sit at 1, (2,3) touches both; the wide arc only
        // needs to clear what it contains
        let edges = arcs(&[(0, 2), (3, 5), (2, 3), (0, 5)]);
        let levels = pack(&edges);
        assert_eq!(levels.level(&edges[2]), Some(1));
        assert_eq!(levels.level(&edges[3]), Some(2));
    }

    #[test]
    fn test_no_same_level_overlap_exhaustive() {
        // every arc over 5 tokens, packed together
        let mut pairs = Vec::new();
        for a in 0..5 {
            for b in (a + 1)..5 {
                pairs.push((a, b));
            }
        }
        let edges = arcs(&pairs);
        let levels = pack(&edges);
        assert_eq!(levels.len(), edges.len());

        for (a, level_a) in levels.iter() {
            for (b, level_b) in levels.iter() {
                if !std::ptr::eq(a, b) && level_a == level_b {
                    assert!(!a.overlaps(b), "{} and {} share level {}", a, b, level_a);
                }
                if a.contains(b) && a.overlaps(b) && !a.covers_exactly(b) {
                    assert!(level_a > level_b, "{} should sit above {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_intersecting_spans_stack() {
        let edges = arcs(&[(0, 1), (1, 2), (2, 2)]);
        let refs: Vec<&Edge> = edges.iter().collect();
        let levels = assign_levels(&refs, Edge::intersects, |_, _| Ordering::Equal);

        assert_eq!(levels.level(&edges[2]), Some(1));
        assert_eq!(levels.level(&edges[0]), Some(1));
        assert_eq!(levels.level(&edges[1]), Some(2));
    }
}
