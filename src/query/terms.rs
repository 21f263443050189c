//! Search terms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered, case-folded sequence of search terms.
///
/// Terms are combined with AND semantics by the rater. Empty terms are kept
/// as given: an empty term matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Terms {
    terms: Vec<String>,
}

impl Terms {
    /// Create terms from already split tokens, case-folding each of them.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Terms {
            terms: terms.into_iter().map(|t| t.as_ref().to_lowercase()).collect(),
        }
    }

    /// Split a raw query on whitespace into case-folded terms.
    pub fn parse(query: &str) -> Self {
        Terms::new(query.split_whitespace())
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check whether there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate over the terms in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Get the terms as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    /// Check whether these terms narrow `previous`.
    ///
    /// Every previous term must be a prefix of the term at the same position,
    /// and there may be additional trailing terms.
    pub fn extends(&self, previous: &Terms) -> bool {
        previous.len() <= self.len()
            && previous
                .iter()
                .zip(self.iter())
                .all(|(old, new)| new.starts_with(old))
    }
}

impl fmt::Display for Terms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.terms.join(" "))
    }
}

impl<S: AsRef<str>> FromIterator<S> for Terms {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Terms::new(iter)
    }
}

impl<'a> IntoIterator for &'a Terms {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}
