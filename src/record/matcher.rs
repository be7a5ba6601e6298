//! Column matcher
//!
//! Resolves a `(column, text)` filter into a typed predicate once per query.
//! Numeric targets are parsed here, not per record.

use std::num::ParseIntError;
use std::str::FromStr;

use crate::error::{Result, SlotError};

use super::{Column, Record};

/// A compiled filter over one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMatcher<'a> {
    /// Exact id equality
    Id(u32),

    /// Substring of the name
    Name(&'a str),

    /// Exact balance equality
    Balance(i64),

    /// Substring of the address
    Address(&'a str),
}

impl<'a> ColumnMatcher<'a> {
    /// Build a matcher for `column` against `text`
    ///
    /// Fails with `InvalidFilter` if the column is numeric and `text` does not
    /// parse as that column's type.
    pub fn new(column: Column, text: &'a str) -> Result<Self> {
        Ok(match column {
            Column::Id => ColumnMatcher::Id(parse_numeric(column, text)?),
            Column::Name => ColumnMatcher::Name(text),
            Column::Balance => ColumnMatcher::Balance(parse_numeric(column, text)?),
            Column::Address => ColumnMatcher::Address(text),
        })
    }

    /// Build a matcher from a string selector (`column0`, `name`, ...)
    pub fn from_selector(selector: &str, text: &'a str) -> Result<Self> {
        Self::new(selector.parse()?, text)
    }

    /// The column this matcher targets
    pub fn column(&self) -> Column {
        match self {
            ColumnMatcher::Id(_) => Column::Id,
            ColumnMatcher::Name(_) => Column::Name,
            ColumnMatcher::Balance(_) => Column::Balance,
            ColumnMatcher::Address(_) => Column::Address,
        }
    }

    /// Test a record against the filter
    #[inline]
    pub fn check_matching(&self, record: &Record) -> bool {
        match *self {
            ColumnMatcher::Id(id) => record.id == id,
            ColumnMatcher::Name(text) => record.name.contains(text),
            ColumnMatcher::Balance(balance) => record.balance == balance,
            ColumnMatcher::Address(text) => record.address.contains(text),
        }
    }
}

/// Parse a numeric filter value, tolerating surrounding whitespace
pub(crate) fn parse_numeric<T>(column: Column, text: &str) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    text.trim().parse::<T>().map_err(|e| SlotError::InvalidFilter {
        column: column.name(),
        value: text.to_string(),
        reason: e.to_string(),
    })
}
