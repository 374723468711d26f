use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{TableName, TypeConstraintError};
use crate::repository::{DEFAULT_HISTORY_LIMIT, HistoryListQuery, MAX_HISTORY_LIMIT};

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Query string accepted by the history listing.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct HistoryQueryForm {
    pub user_id: Option<String>,
    pub table_modified: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    #[validate(range(min = 1, max = MAX_HISTORY_LIMIT))]
    pub limit: Option<i64>,
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

#[derive(Debug, Error)]
pub enum HistoryQueryError {
    #[error("History query validation failed: {0}")]
    Validation(String),
    #[error("date_from/date_to must be ISO format (YYYY-MM-DD or full ISO datetime)")]
    InvalidDate,
    #[error("History query contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for HistoryQueryError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for HistoryQueryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Which end of a date-only bound is meant.
#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

/// Parse an ISO date or datetime.
///
/// A bare date used as an upper bound covers the entire day. Datetimes with
/// an offset are converted to UTC, matching the stored timestamps.
fn parse_bound(value: &str, bound: Bound) -> Result<NaiveDateTime, HistoryQueryError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => NaiveTime::MIN,
            Bound::End => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)
                .ok_or(HistoryQueryError::InvalidDate)?,
        };
        return Ok(date.and_time(time));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or(HistoryQueryError::InvalidDate)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<HistoryQueryForm> for HistoryListQuery {
    type Error = HistoryQueryError;

    fn try_from(value: HistoryQueryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let from = non_blank(value.date_from)
            .map(|v| parse_bound(&v, Bound::Start))
            .transpose()?;
        let to = non_blank(value.date_to)
            .map(|v| parse_bound(&v, Bound::End))
            .transpose()?;

        let mut query = HistoryListQuery::default()
            .between(from, to)
            .paginate(
                value.limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
                value.offset.unwrap_or(0),
            );
        if let Some(user_id) = value.user_id {
            query = query.user(user_id);
        }
        if let Some(table) = value.table_modified {
            query = query.table(TableName::try_from(table.as_str())?);
        }
        Ok(query)
    }
}
