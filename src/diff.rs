//! Gold/guess comparison of annotation graphs
//!
//! The diff of two instances is a third instance holding the gold tokens
//! and every edge of either input, re-typed with a category suffix
//! (`:Match`, `:FN`, `:FP`). Colouring and filtering downstream rely on
//! that suffix alone.

use crate::error::ModelError;
use crate::models::{Edge, NlpInstance};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of comparing one edge between gold and guess
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiffCategory {
    /// Edge present in both instances
    Match,
    /// Gold-only edge
    FalseNegative,
    /// Guess-only edge
    FalsePositive,
}

impl DiffCategory {
    /// Type postfix written by [`diff`]
    pub fn postfix(self) -> &'static str {
        match self {
            DiffCategory::Match => "Match",
            DiffCategory::FalseNegative => "FN",
            DiffCategory::FalsePositive => "FP",
        }
    }

    /// Suffix appended to the edge type, including the colon
    pub fn suffix(self) -> &'static str {
        match self {
            DiffCategory::Match => ":Match",
            DiffCategory::FalseNegative => ":FN",
            DiffCategory::FalsePositive => ":FP",
        }
    }

    /// Parse a type postfix
    pub fn from_postfix(postfix: &str) -> Option<Self> {
        match postfix {
            "Match" => Some(DiffCategory::Match),
            "FN" => Some(DiffCategory::FalseNegative),
            "FP" => Some(DiffCategory::FalsePositive),
            _ => None,
        }
    }

    /// Category of an edge produced by [`diff`], read from its type suffix
    pub fn of(edge: &Edge) -> Option<Self> {
        edge.edge_type
            .rsplit_once(':')
            .and_then(|(_, postfix)| Self::from_postfix(postfix))
    }
}

/// Edge counts per category of a diff result
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub matches: usize,
    pub false_negatives: usize,
    pub false_positives: usize,
}

impl DiffSummary {
    /// Count the categorised edges of a diff instance
    pub fn of(diff: &NlpInstance) -> Self {
        let mut summary = DiffSummary::default();
        for edge in diff.edges() {
            match DiffCategory::of(edge) {
                Some(DiffCategory::Match) => summary.matches += 1,
                Some(DiffCategory::FalseNegative) => summary.false_negatives += 1,
                Some(DiffCategory::FalsePositive) => summary.false_positives += 1,
                None => {}
            }
        }
        summary
    }
}

/// Compare a gold and a guess instance edge by edge
///
/// The result copies the gold render mode, split points and tokens. Edges
/// are compared by identity (endpoints, label, type, note), never by
/// description or finality. A guess edge that does not fit on the gold
/// tokens fails the whole diff; the inputs are never modified.
pub fn diff(gold: &NlpInstance, guess: &NlpInstance) -> Result<NlpInstance, ModelError> {
    let gold_edges = gold.get_edges(None);
    let guess_edges = guess.get_edges(None);
    let gold_set: HashSet<&Edge> = gold_edges.iter().copied().collect();
    let guess_set: HashSet<&Edge> = guess_edges.iter().copied().collect();

    let false_negatives = gold_edges.iter().filter(|e| !guess_set.contains(*e));
    let false_positives = guess_edges.iter().filter(|e| !gold_set.contains(*e));
    let matches = gold_edges.iter().filter(|e| guess_set.contains(*e));

    let categorised = false_negatives
        .map(|e| (*e, DiffCategory::FalseNegative))
        .chain(false_positives.map(|e| (*e, DiffCategory::FalsePositive)))
        .chain(matches.map(|e| (*e, DiffCategory::Match)));

    let mut result = gold.without_edges();
    for (edge, category) in categorised {
        result.add_edge(edge.retyped(format!("{}{}", edge.edge_type, category.suffix())))?;
    }

    log::debug!(
        "diff: {} gold edges, {} guess edges -> {:?}",
        gold_edges.len(),
        guess_edges.len(),
        DiffSummary::of(&result)
    );
    Ok(result)
}
