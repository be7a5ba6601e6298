//! Store Module
//!
//! Owns the record collection and its free-slot ledger.
//!
//! ## Responsibilities
//! - Full-scan lookup through a `ColumnMatcher` or the direct-dispatch loops
//! - Delete by id (tombstone or physical erase, chosen at construction)
//! - Insert with FIFO reuse of tombstoned slots
//! - Live / deleted accounting
//!
//! ## Slot Layout (tombstone policy)
//! ```text
//!  records:    [ r1 | r2 | ⊘ | r4 | ⊘ | r6 ]
//!                          ▲         ▲
//!  free slots: front → [ 2 ,  4 ] ← back
//! ```
//! `insert` pops from the front, so the oldest hole is filled first.
//!
//! ## Reference Validity
//! `scan` and `scan_direct` return `&Record`s borrowed from the store, so the
//! borrow checker rejects any mutation while they are alive. Callers that need
//! to hold on to results across mutations use `scan_handles`: each handle
//! carries the store generation it was taken at, and `get` refuses handles
//! from an older generation.
//!
//! ## Concurrency
//! None internally. `SharedRecordStore` wraps a store in a single-writer /
//! multi-reader lock for callers that need to share one.

mod shared;
mod table;

pub use shared::SharedRecordStore;
pub use table::RecordStore;

/// Logical pointer to a slot, valid for one store generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle {
    /// Position in the backing collection
    pub index: usize,

    /// Store generation the handle was issued at
    pub generation: u64,
}
