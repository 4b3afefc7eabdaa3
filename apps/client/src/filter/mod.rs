//! Filter pipeline: independent criteria combined into one stable, order-preserving filter.
//!
//! A [`Criterion`] pairs a value with one or more field selectors. Selectors within a
//! criterion are OR-ed (free-text search across title, organization and description);
//! criteria are AND-ed. A blank value makes the criterion a no-op. Nothing is memoised:
//! every call recomputes from the slice it is given.

pub mod options;
pub mod queries;

pub use options::FilterOptions;
pub use queries::{JobQuery, VolunteerQuery};

/// How a selector compares the criterion value against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive containment against a single optional text field.
    Substring,
    /// The field is a sequence; at least one element must substring-match.
    AnyElement,
}

pub enum Selector<T> {
    Text(fn(&T) -> Option<&str>),
    Each(fn(&T) -> Vec<&str>),
}

impl<T> Selector<T> {
    pub fn mode(&self) -> MatchMode {
        match self {
            Selector::Text(_) => MatchMode::Substring,
            Selector::Each(_) => MatchMode::AnyElement,
        }
    }

    /// `needle` is already lowercased. Absent fields never match a non-empty needle.
    fn matches(&self, record: &T, needle: &str) -> bool {
        match self {
            Selector::Text(select) => select(record).is_some_and(|v| contains_folded(v, needle)),
            Selector::Each(select) => select(record)
                .into_iter()
                .any(|v| contains_folded(v, needle)),
        }
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub struct Criterion<T> {
    name: &'static str,
    needle: String,
    selectors: Vec<Selector<T>>,
}

impl<T> Criterion<T> {
    /// The value is trimmed and lowercased before matching, so `" entry"` filters exactly
    /// like `"entry"` and a whitespace-only value leaves the criterion inactive.
    pub fn new(name: &'static str, value: &str) -> Self {
        Self {
            name,
            needle: value.trim().to_lowercase(),
            selectors: Vec::new(),
        }
    }

    pub fn on(mut self, selector: Selector<T>) -> Self {
        self.selectors.push(selector);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    pub fn matches(&self, record: &T) -> bool {
        if !self.is_active() {
            return true;
        }
        self.selectors
            .iter()
            .any(|selector| selector.matches(record, &self.needle))
    }
}

pub struct FilterPipeline<T> {
    criteria: Vec<Criterion<T>>,
}

impl<T> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }
}

impl<T> FilterPipeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, criterion: Criterion<T>) -> Self {
        self.criteria.push(criterion);
        self
    }

    pub fn active_criteria(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.criteria.iter().filter(|c| c.is_active()).map(|c| c.name())
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.iter().all(|c| !c.is_active())
    }

    pub fn matches(&self, record: &T) -> bool {
        self.criteria.iter().all(|c| c.matches(record))
    }

    pub fn apply<'a>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
