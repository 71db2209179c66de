//! Category tags and the flat category registry.
//!
//! Categories group character cards for targeting by field-card effects.
//! The registry is a flat, insertion-ordered list with linear-scan lookup;
//! id uniqueness is enforced at registration time only.

use crate::ids::CategoryId;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A named tag attached to character cards.
///
/// `color` and `icon` are opaque display keys resolved by the presentation
/// layer. `related` is a non-owning cross-reference list; gameplay logic
/// never traverses it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub related: Vec<CategoryId>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: String::new(),
            icon: String::new(),
            related: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_related(mut self, related: Vec<CategoryId>) -> Self {
        self.related = related;
        self
    }
}

/// Flat registry of categories, ordered by insertion.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a category. No-op if a category with the same id is present.
    ///
    /// A category arriving with an empty id is assigned a freshly generated
    /// random 8-character id before insertion.
    pub fn register(&mut self, mut category: Category) {
        if category.id.is_empty() {
            category.id = CategoryId::generate();
        }
        if self.find_by_id(&category.id).is_some() {
            return;
        }
        self.categories.push(category);
    }

    /// Remove the category with the given id, if present.
    pub fn unregister(&mut self, id: &CategoryId) {
        self.categories.retain(|c| &c.id != id);
    }

    /// Linear scan by id, first match.
    pub fn find_by_id(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Linear scan by display name, first match.
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All categories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }
}
