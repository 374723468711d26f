use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryName, TypeConstraintError};
use crate::forms::optional_description;

/// JSON body accepted when creating or replacing a category.
#[derive(Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub category: NewCategory,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category validation failed: {0}")]
    Validation(String),
    #[error("Category contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CategoryForm> for CategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category: NewCategory {
                name: CategoryName::new(value.name)?,
                description: optional_description(value.description),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_is_dropped() {
        let payload = CategoryFormPayload::try_from(CategoryForm {
            name: " Tools ".into(),
            description: Some("   ".into()),
        })
        .unwrap();

        assert_eq!(payload.category.name.as_str(), "Tools");
        assert!(payload.category.description.is_none());
    }

    #[test]
    fn empty_name_fails_validation() {
        let err = CategoryFormPayload::try_from(CategoryForm {
            name: String::new(),
            description: None,
        })
        .unwrap_err();

        assert!(matches!(err, CategoryFormError::Validation(_)));
    }

    #[test]
    fn whitespace_name_violates_constraint() {
        let err = CategoryFormPayload::try_from(CategoryForm {
            name: "   ".into(),
            description: None,
        })
        .unwrap_err();

        assert!(matches!(err, CategoryFormError::TypeConstraint(_)));
    }
}
