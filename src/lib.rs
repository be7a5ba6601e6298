//! # SlotDB
//!
//! A minimal in-memory record store with:
//! - A fixed four-column table (id, name, balance, address)
//! - Full-scan point and substring lookup
//! - Tombstone deletion with FIFO free-slot reuse, or physical erase
//! - Two interchangeable scan paths (column matcher / direct dispatch)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Caller / Bench Driver                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  scan / delete_by_id / insert
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     RecordStore                              │
//! │          (Vec<Record> + VecDeque<usize> free slots)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ColumnMatcher│          │   Direct    │
//!   │ (per query) │          │  dispatch   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod store;
pub mod bench;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SlotError, Result};
pub use config::{Config, DeletionPolicy};
pub use record::{Column, ColumnMatcher, Record};
pub use store::{RecordHandle, RecordStore, SharedRecordStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SlotDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
