//! In-memory search over a fully fetched collection.
//!
//! Search surfaces show nothing until the user has typed something: an empty
//! query matches no entity at all. Matching is a case-insensitive substring
//! test against [`Entity::display_name`].

use crate::types::Entity;

/// Returns the entities of `full_set` whose display name contains `query`,
/// ignoring case, in their original order.
///
/// # Example
///
/// ```
/// let hits = filter(&artists, "beat");
/// assert!(filter(&artists, "").is_empty());
/// ```
pub fn filter<E: Entity + Clone>(full_set: &[E], query: &str) -> Vec<E> {
    full_set
        .iter()
        .filter(|entity| name_contains(entity.display_name(), query))
        .cloned()
        .collect()
}

/// Case-insensitive substring test used by every search surface. An empty
/// query matches nothing.
pub fn name_contains(name: &str, query: &str) -> bool {
    !query.is_empty() && name.to_lowercase().contains(&query.to_lowercase())
}

/// Case-insensitive equality, Unicode aware ("ÑANDÚ" equals "Ñandú").
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// State of one open search surface.
///
/// The filtered view is always derived from `full_set` and `query`; it is
/// never stored.
#[derive(Debug, Clone)]
pub struct SearchSession<E> {
    query: String,
    full_set: Vec<E>,
    selected: Option<E>,
}

impl<E: Entity + Clone> SearchSession<E> {
    pub fn new(full_set: Vec<E>) -> Self {
        Self {
            query: String::new(),
            full_set,
            selected: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn full_set(&self) -> &[E] {
        &self.full_set
    }

    pub fn filtered(&self) -> Vec<E> {
        filter(&self.full_set, &self.query)
    }

    pub fn selected(&self) -> Option<&E> {
        self.selected.as_ref()
    }

    /// Replaces the query. A selection the new query no longer matches is dropped.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        if let Some(selected) = &self.selected {
            if !name_contains(selected.display_name(), &self.query) {
                self.selected = None;
            }
        }
    }

    /// Picks `entity`; the query becomes its display name in the same step.
    pub fn select(&mut self, entity: E) {
        self.query = entity.display_name().to_string();
        self.selected = Some(entity);
    }

    /// Picks the entity with `id` out of the current filtered view.
    ///
    /// Returns `None` and leaves the session untouched when no visible entity
    /// has that id.
    pub fn select_by_id(&mut self, id: i64) -> Option<&E> {
        let entity = self.filtered().into_iter().find(|e| e.id() == id)?;
        self.select(entity);
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
