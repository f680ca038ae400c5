//! Tokens of an annotation graph
//!
//! A token is a sentence position carrying an ordered set of named string
//! properties (word form, POS tag, lemma, ...). Display order follows the
//! order in which properties were first set.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A named property value attached to a token
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenProperty {
    pub name: String,
    pub value: String,
}

impl TokenProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A single token at a fixed sentence position
///
/// Equality and ordering consider only the index: two tokens at the same
/// position are the same token, whatever their properties.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Token {
    /// Position of the token in its sentence, fixed once created
    index: usize,

    /// Properties in display order
    #[serde(default)]
    pub properties: Vec<TokenProperty>,

    /// False for placeholder tokens that only fill index gaps
    #[serde(default = "default_actual")]
    pub is_actual: bool,
}

fn default_actual() -> bool {
    true
}

impl Token {
    /// Create an actual token without properties
    pub fn new(index: usize) -> Self {
        Self {
            index,
            properties: Vec::new(),
            is_actual: true,
        }
    }

    /// Create a placeholder token
    pub fn placeholder(index: usize) -> Self {
        Self {
            index,
            properties: Vec::new(),
            is_actual: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Set a property, replacing an existing value in place
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.properties.push(TokenProperty { name, value }),
        }
    }

    /// Builder-style variant of [`Token::set_property`]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Value of the named property, if present
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Property names in display order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    /// Copy every property of `other` into this token
    pub fn merge(&mut self, other: &Token) {
        for property in &other.properties {
            self.set_property(property.name.clone(), property.value.clone());
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Token {}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}
