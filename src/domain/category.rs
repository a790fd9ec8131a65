//! Category records.
//!
//! A category owns the lifecycle of the products that reference it: deleting
//! a category deletes those products. The product list itself is never
//! stored on the category; it is always a live query by category id.

use super::error::DomainError;
use super::id::CategoryId;
use super::page::SortField;
use super::predicate::{Condition, Predicate};
use super::record::{validate_name, EntityKind, Record};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: Option<String>,
    pub version: i64,
}

impl Category {
    /// Merge a partial update. Omitted fields keep their persisted values.
    ///
    /// # Errors
    /// Returns [`DomainError::BlankName`] if a blank name is supplied.
    pub fn apply(&mut self, patch: CategoryPatch) -> Result<(), DomainError> {
        if let Some(name) = patch.name {
            self.name = validate_name(EntityKind::Category, name)?;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        Ok(())
    }
}

impl Record for Category {
    type Id = CategoryId;
    type Draft = NewCategory;
    type Condition = CategoryCondition;
    type SortField = CategorySortField;

    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> CategoryId {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

/// Validated payload for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    name: String,
    description: Option<String>,
}

impl NewCategory {
    /// Validate and build a creation payload.
    ///
    /// # Errors
    /// Returns [`DomainError::BlankName`] for a blank name.
    pub fn try_new(
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: validate_name(EntityKind::Category, name.into())?,
            description,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A single category filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryCondition {
    /// Case-insensitive substring match on the name.
    NameContains(String),
}

impl Condition<Category> for CategoryCondition {
    fn matches(&self, category: &Category) -> bool {
        match self {
            Self::NameContains(needle) => category
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// Optional category filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    pub name: Option<String>,
}

impl CategoryFilter {
    #[must_use]
    pub fn to_predicate(&self) -> Predicate<CategoryCondition> {
        Predicate::Always.and_maybe(self.name.clone().map(CategoryCondition::NameContains))
    }
}

/// Sortable category properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySortField {
    Id,
    Name,
    Version,
}

impl SortField for CategorySortField {
    const ENTITY: EntityKind = EntityKind::Category;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "version" => Some(Self::Version),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Version => "version",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> Category {
        Category {
            id: CategoryId::new(7),
            name: "Power Tools".to_string(),
            description: None,
            version: 2,
        }
    }

    #[test]
    fn apply_rejects_blank_name() {
        let mut category = tools();
        let err = category
            .apply(CategoryPatch {
                name: Some(String::new()),
                description: Some("ignored".to_string()),
            })
            .unwrap_err();

        assert!(matches!(err, DomainError::BlankName { .. }));
        assert_eq!(category, tools());
    }

    #[test]
    fn apply_sets_description_only() {
        let mut category = tools();
        category
            .apply(CategoryPatch {
                description: Some("Drills and saws".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(category.name, "Power Tools");
        assert_eq!(category.description.as_deref(), Some("Drills and saws"));
    }

    #[test]
    fn name_filter_matches_anywhere_in_name() {
        let filter = CategoryFilter {
            name: Some("TOOL".to_string()),
        };
        assert!(filter.to_predicate().matches(&tools()));
        assert!(CategoryFilter::default().to_predicate().is_unconstrained());
    }

    #[test]
    fn sort_field_names_roundtrip() {
        for field in [
            CategorySortField::Id,
            CategorySortField::Name,
            CategorySortField::Version,
        ] {
            assert_eq!(CategorySortField::from_name(field.name()), Some(field));
        }
        assert_eq!(CategorySortField::from_name("price"), None);
    }
}
