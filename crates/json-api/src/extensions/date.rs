//! Issue-date query parsing helpers.

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait IssueDateExt {
    /// Parse an optional `YYYY-MM-DD` query value. Absent means "today".
    fn into_issue_date(self) -> Result<Option<Date>, StatusError>;
}

impl IssueDateExt for QueryParam<String, false> {
    fn into_issue_date(self) -> Result<Option<Date>, StatusError> {
        self.into_inner()
            .map(|value| value.parse::<Date>())
            .transpose()
            .or_400("could not parse \"date\" query parameter")
    }
}
