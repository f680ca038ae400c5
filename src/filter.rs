//! Edge filters
//!
//! Layout only sees what the filters let through. A filter returns a new
//! instance; tokens, split points and render mode are left alone, except
//! by a collapsing [`EdgeTokenFilter`].

use crate::diff::DiffCategory;
use crate::models::{Edge, NlpInstance, Token};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// Something that narrows down the edges of an instance
pub trait InstanceFilter {
    fn filter(&self, instance: &NlpInstance) -> NlpInstance;
}

/// Keeps edges by type prefix and type postfix
///
/// An empty allow-list allows everything. `dep:FN` has prefix `dep` and
/// postfix `FN`; a type without a colon has an empty postfix, which only
/// passes when no postfixes are configured.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EdgeTypeFilter {
    pub allowed_prefixes: BTreeSet<String>,
    pub allowed_postfixes: BTreeSet<String>,
}

impl EdgeTypeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.allowed_prefixes.insert(prefix.into());
        self
    }

    pub fn allow_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.allowed_postfixes.insert(postfix.into());
        self
    }

    /// Only show edges of the given diff categories
    pub fn diff_categories(categories: impl IntoIterator<Item = DiffCategory>) -> Self {
        categories
            .into_iter()
            .fold(Self::new(), |filter, category| filter.allow_postfix(category.postfix()))
    }

    pub fn allows(&self, edge: &Edge) -> bool {
        let prefix_ok =
            self.allowed_prefixes.is_empty() || self.allowed_prefixes.contains(edge.type_prefix());
        let postfix_ok = self.allowed_postfixes.is_empty()
            || self.allowed_postfixes.contains(edge.type_postfix());
        prefix_ok && postfix_ok
    }
}

impl InstanceFilter for EdgeTypeFilter {
    fn filter(&self, instance: &NlpInstance) -> NlpInstance {
        instance.retain_edges(|e| self.allows(e))
    }
}

/// Keeps edges by label
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EdgeLabelFilter {
    pub allowed_labels: BTreeSet<String>,

    /// Match labels containing an allowed label instead of equal to it
    pub substring: bool,
}

impl EdgeLabelFilter {
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed_labels: labels.into_iter().map(Into::into).collect(),
            substring: false,
        }
    }

    pub fn with_substring(mut self, substring: bool) -> Self {
        self.substring = substring;
        self
    }

    pub fn allows(&self, edge: &Edge) -> bool {
        if self.allowed_labels.is_empty() {
            return true;
        }
        if self.substring {
            self.allowed_labels
                .iter()
                .any(|allowed| edge.label.contains(allowed.as_str()))
        } else {
            self.allowed_labels.contains(&edge.label)
        }
    }
}

impl InstanceFilter for EdgeLabelFilter {
    fn filter(&self, instance: &NlpInstance) -> NlpInstance {
        instance.retain_edges(|e| self.allows(e))
    }
}

/// Keeps edges around tokens with matching property values
///
/// A token matches when one of its property values equals an allowed
/// value (`whole_words`) or contains one. By default an edge survives when
/// either endpoint matches. With `use_path` only edges on the shortest
/// paths between matched tokens survive. With `collapse` every token that
/// is neither matched nor touched by a surviving edge is removed and the
/// rest are renumbered.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EdgeTokenFilter {
    pub allowed_properties: BTreeSet<String>,
    pub use_path: bool,
    pub collapse: bool,
    pub whole_words: bool,
}

impl EdgeTokenFilter {
    pub fn new(properties: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            allowed_properties: properties.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, use_path: bool) -> Self {
        self.use_path = use_path;
        self
    }

    pub fn with_collapse(mut self, collapse: bool) -> Self {
        self.collapse = collapse;
        self
    }

    pub fn with_whole_words(mut self, whole_words: bool) -> Self {
        self.whole_words = whole_words;
        self
    }

    pub fn matches(&self, token: &Token) -> bool {
        token.properties.iter().any(|property| {
            self.allowed_properties.iter().any(|allowed| {
                if self.whole_words {
                    property.value == *allowed
                } else {
                    property.value.contains(allowed.as_str())
                }
            })
        })
    }

    /// Token pairs `(min, max)` joined by a step of some shortest path
    /// between two matched tokens
    fn path_steps(instance: &NlpInstance, matched: &BTreeSet<usize>) -> HashSet<(usize, usize)> {
        let mut neighbours: BTreeMap<usize, BTreeSet<usize>> = BTreeMap::new();
        for edge in instance.edges().iter().filter(|e| !e.is_loop()) {
            neighbours.entry(edge.start).or_default().insert(edge.end);
            neighbours.entry(edge.end).or_default().insert(edge.start);
        }

        let mut steps = HashSet::new();
        for &source in matched {
            let mut parent: BTreeMap<usize, usize> = BTreeMap::new();
            let mut queue = VecDeque::from([source]);
            while let Some(current) = queue.pop_front() {
                for &next in neighbours.get(&current).into_iter().flatten() {
                    if next != source && !parent.contains_key(&next) {
                        parent.insert(next, current);
                        queue.push_back(next);
                    }
                }
            }

            for &target in matched.range(source + 1..) {
                let mut current = target;
                while let Some(&previous) = parent.get(&current) {
                    steps.insert((previous.min(current), previous.max(current)));
                    current = previous;
                }
            }
        }
        steps
    }
}

impl InstanceFilter for EdgeTokenFilter {
    fn filter(&self, instance: &NlpInstance) -> NlpInstance {
        if self.allowed_properties.is_empty() {
            return instance.clone();
        }

        let matched: BTreeSet<usize> = instance
            .tokens()
            .filter(|t| self.matches(t))
            .map(Token::index)
            .collect();

        let filtered = if self.use_path {
            let steps = Self::path_steps(instance, &matched);
            instance.retain_edges(|e| steps.contains(&(e.min_index(), e.max_index())))
        } else {
            instance.retain_edges(|e| matched.contains(&e.start) || matched.contains(&e.end))
        };

        if !self.collapse {
            return filtered;
        }
        let mut keep = matched;
        for edge in filtered.edges() {
            keep.insert(edge.start);
            keep.insert(edge.end);
        }
        log::debug!(
            "token filter: collapsing {} tokens to {}",
            filtered.token_count(),
            keep.len()
        );
        filtered.collapse_to(&keep)
    }
}

/// Applies filters one after the other
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn InstanceFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl InstanceFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl InstanceFilter for FilterChain {
    fn filter(&self, instance: &NlpInstance) -> NlpInstance {
        self.filters
            .iter()
            .fold(instance.clone(), |current, filter| filter.filter(&current))
    }
}
