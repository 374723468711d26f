//! Conversions from form and domain errors into [`ServiceError`].
//!
//! Kept out of the `forms` and `domain` modules so those stay free of the
//! service layer.

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::CategoryFormError;
use crate::forms::history::HistoryQueryError;
use crate::forms::items::ItemFormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<CategoryFormError> for ServiceError {
    fn from(val: CategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ItemFormError> for ServiceError {
    fn from(val: ItemFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<HistoryQueryError> for ServiceError {
    fn from(val: HistoryQueryError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
