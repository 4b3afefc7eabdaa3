use std::collections::HashMap;

use serde::Serialize;

/// Counts keyed by value, remembering the order in which values were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: &str) {
        match self.index.get(value) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(value.to_string(), self.entries.len());
                self.entries.push((value.to_string(), 1));
            }
        }
    }

    pub fn count(&self, value: &str) -> usize {
        self.index
            .get(value)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for value in iter {
            table.record(value);
        }
        table
    }
}

/// The `n` most frequent entries, count descending, ties kept in first-seen order.
pub fn top_n(table: &FrequencyTable, n: usize) -> Vec<(String, usize)> {
    let mut ranked = table.entries().to_vec();
    // sort_by is stable, so equal counts keep insertion order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_count() {
        let table: FrequencyTable = ["SQL", "Python", "SQL"].into_iter().collect();
        assert_eq!(table.count("SQL"), 2);
        assert_eq!(table.count("Python"), 1);
        assert_eq!(table.count("Rust"), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_top_n_sorts_desc_with_stable_ties() {
        let table: FrequencyTable = ["b", "a", "c", "a", "d", "c"].into_iter().collect();
        let top = top_n(&table, 3);
        assert_eq!(
            top,
            vec![
                ("a".to_string(), 2),
                ("c".to_string(), 2),
                ("b".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_top_n_never_exceeds_n_or_invents_entries() {
        let table: FrequencyTable = ["x", "y"].into_iter().collect();
        assert_eq!(top_n(&table, 5).len(), 2);
        assert!(top_n(&table, 0).is_empty());
        assert!(top_n(&table, 1)
            .iter()
            .all(|(k, _)| table.count(k) > 0));
    }

    #[test]
    fn test_top_n_of_empty_table() {
        assert!(top_n(&FrequencyTable::new(), 5).is_empty());
    }
}
