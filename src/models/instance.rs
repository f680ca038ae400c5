//! Annotation graph: tokens, edges and split points of one instance
//!
//! Tokens live in a single index-addressed slot vector, so iteration is
//! always in index order and there is no second token map to keep in sync.
//! Edges reference tokens by index and are only accepted when both
//! endpoints exist.

use super::edge::{Edge, RenderCategory};
use super::token::{Token, TokenProperty};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// Token indices must stay below this bound
///
/// Indices address a slot vector, so a sparse index from a document would
/// otherwise allocate every slot below it.
pub const TOKEN_INDEX_LIMIT: usize = 1 << 16;

/// How an instance is drawn
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// One sentence with arcs above and spans below
    #[default]
    Single,
    /// Two token rows with links between them
    Alignment,
}

/// A sentence (or sentence pair) with its annotations
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(try_from = "InstanceDocument", into = "InstanceDocument")]
pub struct NlpInstance {
    /// `slots[i]` holds the token with index `i`, if any
    slots: Vec<Option<Token>>,
    edges: Vec<Edge>,
    render_mode: RenderMode,
    split_points: Vec<usize>,
}

/// Serialized form of an instance
///
/// Deserialization goes through [`NlpInstance::add_edge`], so a document
/// with dangling edge endpoints is rejected.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct InstanceDocument {
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub split_points: Vec<usize>,
    #[serde(default)]
    pub render_mode: RenderMode,
}

impl NlpInstance {
    /// Create an empty single-sentence instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty instance with the given render mode
    pub fn with_render_mode(render_mode: RenderMode) -> Self {
        Self {
            render_mode,
            ..Self::default()
        }
    }

    /// Copy of this instance with the same tokens, split points and render
    /// mode but no edges
    pub fn without_edges(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            edges: Vec::new(),
            render_mode: self.render_mode,
            split_points: self.split_points.clone(),
        }
    }

    /// Copy of this instance keeping only the edges accepted by `keep`
    pub fn retain_edges(&self, keep: impl Fn(&Edge) -> bool) -> Self {
        Self {
            edges: self.edges.iter().filter(|e| keep(*e)).cloned().collect(),
            ..self.without_edges()
        }
    }

    /// Copy of this instance reduced to the tokens in `keep`
    ///
    /// Kept tokens are renumbered `0..n` in index order. Edges with a
    /// dropped endpoint are dropped; split points move to the first kept
    /// token at or after them.
    pub fn collapse_to(&self, keep: &BTreeSet<usize>) -> Self {
        let mut collapsed = NlpInstance::with_render_mode(self.render_mode);
        let mut new_index = HashMap::new();
        for token in self.tokens().filter(|t| keep.contains(&t.index())) {
            new_index.insert(token.index(), collapsed.slots.len());
            let moved = collapsed.add_token_with_properties(token.properties.iter().cloned());
            moved.is_actual = token.is_actual;
        }

        collapsed.edges = self
            .edges
            .iter()
            .filter_map(|edge| {
                let start = *new_index.get(&edge.start)?;
                let end = *new_index.get(&edge.end)?;
                Some(Edge {
                    start,
                    end,
                    ..edge.clone()
                })
            })
            .collect();

        for split_point in &self.split_points {
            let moved = keep.range(..*split_point).count();
            if collapsed.split_points.last() != Some(&moved) {
                collapsed.split_points.push(moved);
            }
        }
        collapsed
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Create the token at `index`, or return the existing one
    ///
    /// Without an index the token is appended after the highest position.
    /// Tokens created out of order leave gaps until [`NlpInstance::consistify`]
    /// fills them. Indices at or above [`TOKEN_INDEX_LIMIT`] are rejected.
    pub fn add_token(&mut self, index: Option<usize>) -> Result<&mut Token, ModelError> {
        let index = index.unwrap_or(self.slots.len());
        self.reserve_slot(index)?;
        Ok(self.slots[index].get_or_insert_with(|| Token::new(index)))
    }

    /// Append a token carrying the given properties
    pub fn add_token_with_properties(
        &mut self,
        properties: impl IntoIterator<Item = TokenProperty>,
    ) -> &mut Token {
        let index = self.slots.len();
        self.slots.push(None);
        let token = self.slots[index].get_or_insert_with(|| Token::new(index));
        for property in properties {
            token.set_property(property.name, property.value);
        }
        token
    }

    /// Insert a fully built token, replacing any token at its index
    pub fn insert_token(&mut self, token: Token) -> Result<(), ModelError> {
        let index = token.index();
        self.reserve_slot(index)?;
        self.slots[index] = Some(token);
        Ok(())
    }

    /// Grow the slot vector so that `index` is addressable
    fn reserve_slot(&mut self, index: usize) -> Result<(), ModelError> {
        if index >= TOKEN_INDEX_LIMIT {
            return Err(ModelError::TokenIndexOutOfRange {
                index,
                limit: TOKEN_INDEX_LIMIT,
            });
        }
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        Ok(())
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Mutable access to a token's properties; its index stays fixed
    pub fn token_mut(&mut self, index: usize) -> Option<&mut Token> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    pub fn contains_token(&self, index: usize) -> bool {
        self.token(index).is_some()
    }

    /// Tokens in index order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.slots.iter().flatten()
    }

    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }

    /// True when token indices form the gap-free range `0..n`
    pub fn is_consistent(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Fill index gaps with placeholder tokens
    ///
    /// Call after building an instance out of order and before layout.
    pub fn consistify(&mut self) {
        let mut filled = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.is_none() {
                *slot = Some(Token::placeholder(index));
                filled += 1;
            }
        }
        if filled > 0 {
            log::debug!("consistify: filled {} token gaps with placeholders", filled);
        }
    }

    /// Add an edge whose endpoints must both be tokens of this instance
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), ModelError> {
        if !self.is_valid_edge(edge.start, edge.end) {
            return Err(ModelError::MissingEndpoint {
                start: edge.start,
                end: edge.end,
            });
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Add an arc-style edge
    pub fn add_dependency(
        &mut self,
        start: usize,
        end: usize,
        label: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.add_edge(Edge::new(start, end, label, edge_type))
    }

    /// Add a span-style edge
    pub fn add_span(
        &mut self,
        start: usize,
        end: usize,
        label: impl Into<String>,
        span_type: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.add_edge(Edge::new(start, end, label, span_type).with_category(RenderCategory::Span))
    }

    /// Whether an edge can connect the two positions
    pub fn is_valid_edge(&self, start: usize, end: usize) -> bool {
        self.contains_token(start) && self.contains_token(end)
    }

    /// All edges in insertion order, duplicates included
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Distinct edges of the given render category, or all distinct edges
    ///
    /// Order is first insertion; duplicates under edge identity collapse.
    pub fn get_edges(&self, category: Option<RenderCategory>) -> Vec<&Edge> {
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .filter(|e| category.map_or(true, |c| e.render_category == c))
            .filter(|e| seen.insert(*e))
            .collect()
    }

    pub fn add_split_point(&mut self, token_index: usize) {
        self.split_points.push(token_index);
    }

    pub fn split_points(&self) -> &[usize] {
        &self.split_points
    }

    /// Merge another instance of the same length into this one
    ///
    /// The n-th token of `other` contributes its properties to the n-th
    /// token of `self`, and every edge of `other` is re-added between the
    /// tokens at the same positions here. Instances of different lengths
    /// are rejected and nothing is changed.
    pub fn merge(&mut self, other: &NlpInstance) -> Result<(), ModelError> {
        let left = self.token_count();
        let right = other.token_count();
        if left != right {
            return Err(ModelError::LengthMismatch { left, right });
        }

        let own_indices: Vec<usize> = self.tokens().map(Token::index).collect();
        let position_of: HashMap<usize, usize> = other
            .tokens()
            .enumerate()
            .map(|(position, token)| (token.index(), position))
            .collect();

        let remapped: Vec<Edge> = other
            .edges
            .iter()
            .map(|edge| Edge {
                start: own_indices[position_of[&edge.start]],
                end: own_indices[position_of[&edge.end]],
                ..edge.clone()
            })
            .collect();

        for (own_index, other_token) in own_indices.iter().zip(other.tokens()) {
            if let Some(token) = self.token_mut(*own_index) {
                token.merge(other_token);
            }
        }
        self.edges.extend(remapped);
        Ok(())
    }
}

impl TryFrom<InstanceDocument> for NlpInstance {
    type Error = ModelError;

    fn try_from(document: InstanceDocument) -> Result<Self, Self::Error> {
        let mut instance = NlpInstance::with_render_mode(document.render_mode);
        for token in document.tokens {
            instance.insert_token(token)?;
        }
        for edge in document.edges {
            instance.add_edge(edge)?;
        }
        for split_point in document.split_points {
            instance.add_split_point(split_point);
        }
        Ok(instance)
    }
}

impl From<NlpInstance> for InstanceDocument {
    fn from(instance: NlpInstance) -> Self {
        InstanceDocument {
            tokens: instance.slots.into_iter().flatten().collect(),
            edges: instance.edges,
            split_points: instance.split_points,
            render_mode: instance.render_mode,
        }
    }
}

impl fmt::Display for NlpInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self
            .tokens()
            .map(|t| {
                let values: Vec<&str> = t.properties.iter().map(|p| p.value.as_str()).collect();
                format!("{}:{}", t.index(), values.join("/"))
            })
            .collect();
        let edges: Vec<String> = self.edges.iter().map(ToString::to_string).collect();
        write!(f, "{}\n{}", tokens.join(", "), edges.join(", "))
    }
}
