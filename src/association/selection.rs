use crate::{search::SearchSession, types::Entity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedParent {
    pub id: i64,
    pub name: String,
}

/// Parents picked for a create-then-link, keyed by id in pick order.
///
/// Picking the same parent twice keeps a single entry, so no duplicate link
/// is ever attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentSelection {
    parents: Vec<SelectedParent>,
}

impl ParentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entity`; returns `false` when it was already selected.
    pub fn add<E: Entity>(&mut self, entity: &E) -> bool {
        if self.contains(entity.id()) {
            return false;
        }
        self.parents.push(SelectedParent {
            id: entity.id(),
            name: entity.display_name().to_string(),
        });
        true
    }

    /// Adds whatever `session` currently has selected.
    pub fn add_from<E: Entity + Clone>(&mut self, session: &SearchSession<E>) -> bool {
        match session.selected() {
            Some(entity) => self.add(entity),
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.parents.len();
        self.parents.retain(|p| p.id != id);
        before != self.parents.len()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.parents.iter().any(|p| p.id == id)
    }

    pub fn ids(&self) -> Vec<i64> {
        self.parents.iter().map(|p| p.id).collect()
    }

    pub fn parents(&self) -> &[SelectedParent] {
        &self.parents
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
