//! Record Module
//!
//! The fixed four-column row shape and the column selector.
//!
//! ## Layout
//! ```text
//! ┌──────────┬──────────────┬──────────────┬──────────────┐
//! │ id (u32) │ name (text)  │ balance (i64)│ address(text)│
//! │ column0  │ column1      │ column2      │ column3      │
//! └──────────┴──────────────┴──────────────┴──────────────┘
//! ```
//!
//! `id == 0` is the tombstone sentinel: a slot holding it is deleted.

mod matcher;

use std::fmt;
use std::str::FromStr;

use crate::error::SlotError;

pub use matcher::ColumnMatcher;
pub(crate) use matcher::parse_numeric;

/// Id value marking a deleted slot
pub const TOMBSTONE_ID: u32 = 0;

/// A single row of the table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    /// Unique id (0 = deleted)
    pub id: u32,

    /// Name of the user
    pub name: String,

    /// Balance of the user
    pub balance: i64,

    /// Address of the user
    pub address: String,
}

impl Record {
    /// Create a new record
    pub fn new(id: u32, name: impl Into<String>, balance: i64, address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            address: address.into(),
        }
    }

    /// The zero-valued record written over deleted slots
    pub fn tombstone() -> Self {
        Self::default()
    }

    /// True if this slot has been deleted
    #[inline]
    pub fn is_tombstone(&self) -> bool {
        self.id == TOMBSTONE_ID
    }
}

/// Column selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// `column0`: the record id, matched by equality
    Id,

    /// `column1`: the name, matched by substring
    Name,

    /// `column2`: the balance, matched by equality
    Balance,

    /// `column3`: the address, matched by substring
    Address,
}

impl Column {
    /// All columns in table order
    pub const ALL: [Column; 4] = [Column::Id, Column::Name, Column::Balance, Column::Address];

    /// Field name of the column
    pub fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::Balance => "balance",
            Column::Address => "address",
        }
    }

    /// Positional selector (`column0` .. `column3`)
    pub fn selector(self) -> &'static str {
        match self {
            Column::Id => "column0",
            Column::Name => "column1",
            Column::Balance => "column2",
            Column::Address => "column3",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = SlotError;

    /// Accepts both the positional selectors and the field names.
    /// Anything else is rejected rather than treated as `address`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "column0" | "id" => Ok(Column::Id),
            "column1" | "name" => Ok(Column::Name),
            "column2" | "balance" => Ok(Column::Balance),
            "column3" | "address" => Ok(Column::Address),
            other => Err(SlotError::UnknownColumn(other.to_string())),
        }
    }
}
