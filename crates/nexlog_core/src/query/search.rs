//! People autocomplete.
//!
//! # Invariants
//! - A blank query yields no suggestions; it never means "match all".
//! - Matching is a case-insensitive substring test on the person name.
//! - Selecting a suggestion dismisses the list.

use crate::model::person::Person;

/// Filters `people` whose name contains `query`, ignoring case.
///
/// Returns an empty list for blank queries. Directory order is preserved.
/// Surrounding whitespace is part of the needle.
pub fn search_people(query: &str, people: &[Person]) -> Vec<Person> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    people
        .iter()
        .filter(|person| person.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Search box state for type-as-you-search person selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Autocomplete {
    query: String,
    suggestions: Vec<Person>,
    selected: Option<Person>,
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the query text and refreshes suggestions.
    pub fn update(&mut self, query: impl Into<String>, people: &[Person]) -> &[Person] {
        self.query = query.into();
        self.suggestions = search_people(&self.query, people);
        &self.suggestions
    }

    /// Picks one person, copying their name into the query and closing the list.
    pub fn select(&mut self, person: &Person) {
        self.query = person.name.clone();
        self.suggestions.clear();
        self.selected = Some(person.clone());
    }

    /// Drops the current selection and suggestions.
    pub fn clear(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.selected = None;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Person] {
        &self.suggestions
    }

    pub fn selected(&self) -> Option<&Person> {
        self.selected.as_ref()
    }

    pub fn is_open(&self) -> bool {
        !self.suggestions.is_empty()
    }
}
