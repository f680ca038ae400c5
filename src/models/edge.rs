//! Typed, labelled edges between tokens
//!
//! Edges reference their endpoints by token index; the owning
//! `NlpInstance` guarantees both indices exist. Identity (equality and
//! hashing) is `(start, end, label, edge_type, note)` - description,
//! render category and finality are presentation details and do not make
//! two edges different.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// How an edge is drawn
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderCategory {
    /// Curve above the token row
    #[default]
    #[serde(alias = "dependency")]
    Arc,
    /// Bracket below the token row
    Span,
}

/// A labelled and typed pair of tokens
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Edge {
    /// Index of the start token
    pub start: usize,

    /// Index of the end token
    pub end: usize,

    pub label: String,

    /// Edge type, optionally `prefix:postfix`
    #[serde(rename = "type")]
    pub edge_type: String,

    /// Decorative note shown next to the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default)]
    pub render_category: RenderCategory,

    #[serde(default = "default_description")]
    pub description: String,

    /// Non-final edges are tentative analysis steps
    #[serde(default = "default_final")]
    pub is_final: bool,
}

fn default_description() -> String {
    "No Description".to_string()
}

fn default_final() -> bool {
    true
}

impl Edge {
    /// Create a final arc edge without note or description
    pub fn new(
        start: usize,
        end: usize,
        label: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            label: label.into(),
            edge_type: edge_type.into(),
            note: None,
            render_category: RenderCategory::Arc,
            description: default_description(),
            is_final: true,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: RenderCategory) -> Self {
        self.render_category = category;
        self
    }

    pub fn with_final(mut self, is_final: bool) -> Self {
        self.is_final = is_final;
        self
    }

    /// Copy of this edge with a different type
    pub fn retyped(&self, edge_type: impl Into<String>) -> Self {
        Self {
            edge_type: edge_type.into(),
            ..self.clone()
        }
    }

    /// Type up to the first `:`, or the whole type
    pub fn type_prefix(&self) -> &str {
        match self.edge_type.find(':') {
            Some(i) => &self.edge_type[..i],
            None => &self.edge_type,
        }
    }

    /// Type after the first `:`, or the empty string
    pub fn type_postfix(&self) -> &str {
        match self.edge_type.find(':') {
            Some(i) => &self.edge_type[i + 1..],
            None => "",
        }
    }

    /// Label followed by the note in parentheses, if any
    pub fn label_with_note(&self) -> String {
        match &self.note {
            Some(note) => format!("{}({})", self.label, note),
            None => self.label.clone(),
        }
    }

    pub fn min_index(&self) -> usize {
        self.start.min(self.end)
    }

    pub fn max_index(&self) -> usize {
        self.start.max(self.end)
    }

    /// Distance between the two endpoints
    pub fn length(&self) -> usize {
        self.max_index() - self.min_index()
    }

    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }

    /// Both endpoints at or left of the token
    pub fn left_of(&self, token_index: usize) -> bool {
        self.start <= token_index && self.end <= token_index
    }

    /// Both endpoints at or right of the token
    pub fn right_of(&self, token_index: usize) -> bool {
        self.start >= token_index && self.end >= token_index
    }

    /// Strict containment: `self.min < other.min <= other.max < self.max`
    pub fn covers(&self, other: &Edge) -> bool {
        self.min_index() < other.min_index()
            && other.max_index() < self.max_index()
    }

    /// Same token range
    pub fn covers_exactly(&self, other: &Edge) -> bool {
        self.min_index() == other.min_index() && self.max_index() == other.max_index()
    }

    /// Containment aligned on exactly one side
    pub fn covers_semi(&self, other: &Edge) -> bool {
        let left_aligned = self.min_index() == other.min_index();
        let right_aligned = self.max_index() == other.max_index();
        (self.min_index() < other.min_index() && right_aligned)
            || (left_aligned && other.max_index() < self.max_index())
    }

    /// Containment with at least one non-aligned boundary
    pub fn strictly_covers(&self, other: &Edge) -> bool {
        (self.min_index() < other.min_index() && other.max_index() <= self.max_index())
            || (self.min_index() <= other.min_index() && other.max_index() < self.max_index())
    }

    /// Closed containment, including identical ranges
    pub fn contains(&self, other: &Edge) -> bool {
        self.min_index() <= other.min_index() && other.max_index() <= self.max_index()
    }

    /// Open-interval intersection; touching at an endpoint is not an overlap
    pub fn overlaps(&self, other: &Edge) -> bool {
        self.min_index() < other.max_index() && other.min_index() < self.max_index()
    }

    /// Closed-interval intersection; sharing a token counts
    pub fn intersects(&self, other: &Edge) -> bool {
        self.min_index() <= other.max_index() && other.min_index() <= self.max_index()
    }

    /// Genuine interleaving of the two ranges
    pub fn crosses(&self, other: &Edge) -> bool {
        let (a_min, a_max) = (self.min_index(), self.max_index());
        let (b_min, b_max) = (other.min_index(), other.max_index());
        (a_min < b_min && b_min < a_max && a_max < b_max)
            || (b_min < a_min && a_min < b_max && b_max < a_max)
    }

    /// Type ascending, then label and note descending
    pub fn lexicographic_order(&self, other: &Edge) -> Ordering {
        self.edge_type
            .cmp(&other.edge_type)
            .then_with(|| other.label.cmp(&self.label))
            .then_with(|| other.note.cmp(&self.note))
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.label == other.label
            && self.edge_type == other.edge_type
            && self.note == other.note
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        self.label.hash(state);
        self.edge_type.hash(state);
        self.note.hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}->{}({})", self.start, self.label, self.end, self.edge_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn range(a: usize, b: usize) -> Edge {
        Edge::new(a, b, "L", "dep")
    }

    fn all_ranges(n: usize) -> Vec<Edge> {
        let mut edges = Vec::new();
        for a in 0..n {
            for b in 0..n {
                edges.push(range(a, b));
            }
        }
        edges
    }

    #[test]
    fn test_equality_ignores_description_and_finality() {
        let a = Edge::new(0, 1, "ROOT", "dep").with_description("first");
        let b = Edge::new(0, 1, "ROOT", "dep")
            .with_description("second")
            .with_final(false);
        assert_eq!(a, b);

        let set: HashSet<Edge> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equality_respects_note() {
        let a = Edge::new(0, 1, "ROOT", "dep").with_note("x");
        let b = Edge::new(0, 1, "ROOT", "dep");
        assert_ne!(a, b);
        assert_ne!(a, Edge::new(1, 0, "ROOT", "dep").with_note("x"));
    }

    #[test]
    fn test_type_prefix_and_postfix() {
        let edge = Edge::new(0, 1, "A0", "role:FN");
        assert_eq!(edge.type_prefix(), "role");
        assert_eq!(edge.type_postfix(), "FN");

        let plain = Edge::new(0, 1, "A0", "role");
        assert_eq!(plain.type_prefix(), "role");
        assert_eq!(plain.type_postfix(), "");
    }

    #[test]
    fn test_label_with_note() {
        assert_eq!(Edge::new(0, 1, "SBJ", "dep").label_with_note(), "SBJ");
        assert_eq!(
            Edge::new(0, 1, "SBJ", "dep").with_note("?").label_with_note(),
            "SBJ(?)"
        );
    }

    #[test]
    fn test_covers_boundaries() {
        assert!(range(0, 5).covers(&range(1, 4)));
        assert!(range(5, 0).covers(&range(3, 2)));
        assert!(!range(0, 5).covers(&range(0, 4)));
        assert!(!range(0, 5).covers(&range(1, 5)));
        assert!(!range(0, 5).covers(&range(0, 5)));
    }

    #[test]
    fn test_covers_semi_and_exactly() {
        assert!(range(0, 5).covers_semi(&range(0, 3)));
        assert!(range(0, 5).covers_semi(&range(2, 5)));
        assert!(!range(0, 5).covers_semi(&range(0, 5)));
        assert!(!range(0, 5).covers_semi(&range(1, 4)));
        assert!(range(4, 1).covers_exactly(&range(1, 4)));
    }

    #[test]
    fn test_strictly_covers() {
        assert!(range(0, 5).strictly_covers(&range(0, 4)));
        assert!(range(0, 5).strictly_covers(&range(1, 4)));
        assert!(!range(0, 5).strictly_covers(&range(0, 5)));
    }

    #[test]
    fn test_overlaps_and_crosses() {
        // shared endpoint only
        assert!(!range(0, 1).overlaps(&range(1, 4)));
        assert!(range(0, 1).intersects(&range(1, 4)));

        assert!(range(0, 3).overlaps(&range(2, 5)));
        assert!(range(0, 3).crosses(&range(2, 5)));

        // containment overlaps but does not cross
        assert!(range(0, 5).overlaps(&range(1, 4)));
        assert!(!range(0, 5).crosses(&range(1, 4)));
        assert!(!range(0, 5).crosses(&range(0, 3)));
    }

    #[test]
    fn test_left_and_right_of() {
        let edge = range(2, 4);
        assert!(edge.left_of(4));
        assert!(!edge.left_of(3));
        assert!(edge.right_of(2));
        assert!(!edge.right_of(3));
        assert_eq!(edge.length(), 2);
    }

    #[test]
    fn test_covers_is_strict_partial_order() {
        let edges = all_ranges(6);
        for a in &edges {
            assert!(!a.covers(a));
            for b in &edges {
                if a.covers(b) {
                    assert!(!b.covers(a), "{} and {} cover each other", a, b);
                }
                for c in &edges {
                    if a.covers(b) && b.covers(c) {
                        assert!(a.covers(c), "{} covers {} covers {}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn test_crosses_symmetric_and_irreflexive() {
        let edges = all_ranges(6);
        for a in &edges {
            assert!(!a.crosses(a));
            for b in &edges {
                assert_eq!(a.crosses(b), b.crosses(a));
                assert_eq!(a.overlaps(b), b.overlaps(a));
                assert_eq!(a.intersects(b), b.intersects(a));
                if a.crosses(b) {
                    assert!(a.overlaps(b));
                }
            }
        }
    }

    #[test]
    fn test_lexicographic_order() {
        let a = Edge::new(0, 1, "A", "dep");
        let b = Edge::new(0, 1, "B", "dep");
        let c = Edge::new(0, 1, "A", "role");
        assert_eq!(a.lexicographic_order(&c), Ordering::Less);
        // labels compare in reverse
        assert_eq!(a.lexicographic_order(&b), Ordering::Greater);
        assert_eq!(a.lexicographic_order(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_deserialize_defaults() {
        let edge: Edge =
            serde_json::from_str(r#"{"start":0,"end":2,"label":"NP","type":"chunk","render_category":"span"}"#)
                .unwrap();
        assert_eq!(edge.render_category, RenderCategory::Span);
        assert!(edge.is_final);
        assert_eq!(edge.note, None);

        let legacy: Edge =
            serde_json::from_str(r#"{"start":0,"end":2,"label":"SBJ","type":"dep","render_category":"dependency"}"#)
                .unwrap();
        assert_eq!(legacy.render_category, RenderCategory::Arc);
    }
}
