//! RecordStore implementation
//!
//! Vec-backed table with a VecDeque free-slot ledger.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::config::{Config, DeletionPolicy};
use crate::error::{Result, SlotError};
use crate::record::{parse_numeric, Column, ColumnMatcher, Record, TOMBSTONE_ID};

use super::RecordHandle;

/// In-memory table of records
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Store configuration (deletion policy is fixed from here on)
    config: Config,

    /// All slots in insertion order, tombstones included
    records: Vec<Record>,

    /// Indices of tombstoned slots, oldest first
    free_slots: VecDeque<usize>,

    /// Bumped on every mutation that touches a slot
    generation: u64,
}

impl RecordStore {
    /// Create a store over `records` using the default config
    pub fn new(records: Vec<Record>) -> Self {
        Self::with_config(records, Config::default())
    }

    /// Create a store over `records` with an explicit config
    ///
    /// Seeded records carrying id 0 are already deleted: under the tombstone
    /// policy their slots go straight onto the free ledger, under the physical
    /// policy they are dropped.
    pub fn with_config(mut records: Vec<Record>, config: Config) -> Self {
        let mut free_slots = VecDeque::new();

        match config.deletion_policy {
            DeletionPolicy::Tombstone => {
                for (index, record) in records.iter_mut().enumerate() {
                    if record.is_tombstone() {
                        *record = Record::tombstone();
                        free_slots.push_back(index);
                    }
                }
            }
            DeletionPolicy::Physical => records.retain(|r| !r.is_tombstone()),
        }

        debug!(
            slots = records.len(),
            deleted = free_slots.len(),
            policy = ?config.deletion_policy,
            "record store created"
        );

        Self {
            config,
            records,
            free_slots,
            generation: 0,
        }
    }

    // =========================================================================
    // Scans
    // =========================================================================

    /// Find live records whose `column` matches `text`, in slot order
    ///
    /// Builds one `ColumnMatcher` and applies it to every live slot.
    pub fn scan(&self, column: Column, text: &str) -> Result<Vec<&Record>> {
        let matcher = ColumnMatcher::new(column, text)?;
        let mut output = self.output_buffer();

        output.extend(
            self.records
                .iter()
                .filter(|r| !r.is_tombstone() && matcher.check_matching(r)),
        );

        Ok(output)
    }

    /// Same result as `scan`, with the per-column comparison inlined
    pub fn scan_direct(&self, column: Column, text: &str) -> Result<Vec<&Record>> {
        let mut output = self.output_buffer();

        match column {
            Column::Id => {
                let id: u32 = parse_numeric(column, text)?;
                for record in &self.records {
                    if record.id == id && !record.is_tombstone() {
                        output.push(record);
                    }
                }
            }
            Column::Name => {
                for record in &self.records {
                    if !record.is_tombstone() && record.name.contains(text) {
                        output.push(record);
                    }
                }
            }
            Column::Balance => {
                let balance: i64 = parse_numeric(column, text)?;
                for record in &self.records {
                    if record.balance == balance && !record.is_tombstone() {
                        output.push(record);
                    }
                }
            }
            Column::Address => {
                for record in &self.records {
                    if !record.is_tombstone() && record.address.contains(text) {
                        output.push(record);
                    }
                }
            }
        }

        Ok(output)
    }

    /// `scan` with a string selector (`column0`..`column3` or a field name)
    pub fn scan_by_selector(&self, selector: &str, text: &str) -> Result<Vec<&Record>> {
        self.scan(selector.parse()?, text)
    }

    /// `scan_direct` with a string selector
    pub fn scan_direct_by_selector(&self, selector: &str, text: &str) -> Result<Vec<&Record>> {
        self.scan_direct(selector.parse()?, text)
    }

    /// Like `scan`, but returns handles that survive later mutations
    /// (and are then rejected by `get`)
    pub fn scan_handles(&self, column: Column, text: &str) -> Result<Vec<RecordHandle>> {
        let matcher = ColumnMatcher::new(column, text)?;

        Ok(self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.is_tombstone() && matcher.check_matching(r))
            .map(|(index, _)| RecordHandle {
                index,
                generation: self.generation,
            })
            .collect())
    }

    /// Resolve a handle, or `None` if the store has been mutated since
    /// it was issued
    pub fn get(&self, handle: RecordHandle) -> Option<&Record> {
        if handle.generation != self.generation {
            return None;
        }
        self.records.get(handle.index).filter(|r| !r.is_tombstone())
    }

    fn output_buffer(&self) -> Vec<&Record> {
        if self.config.presize_scan_output {
            Vec::with_capacity(self.records.len())
        } else {
            Vec::new()
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Delete the first live record with `id`
    ///
    /// Returns `false` (and changes nothing) if no such record exists.
    pub fn delete_by_id(&mut self, id: u32) -> bool {
        if id == TOMBSTONE_ID {
            return false;
        }

        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            debug!(id, "delete: no matching record");
            return false;
        };

        match self.config.deletion_policy {
            DeletionPolicy::Tombstone => {
                self.free_slots.push_back(index);
                self.records[index] = Record::tombstone();
                debug!(id, index, "delete: slot tombstoned");
            }
            DeletionPolicy::Physical => {
                self.records.remove(index);
                debug!(id, index, "delete: record erased");
            }
        }

        self.generation += 1;
        true
    }

    /// Insert a record, reusing the oldest free slot if there is one
    ///
    /// Returns the slot index the record landed in.
    pub fn insert(&mut self, record: Record) -> Result<usize> {
        if record.is_tombstone() {
            return Err(SlotError::ReservedId);
        }

        let id = record.id;
        let index = match self.free_slots.pop_front() {
            Some(index) if index < self.records.len() => {
                self.records[index] = record;
                debug!(id, index, "insert: reused free slot");
                index
            }
            Some(index) => {
                warn!(
                    index,
                    slots = self.records.len(),
                    "insert: free slot out of range, appending instead"
                );
                self.append(record)
            }
            None => self.append(record),
        };

        self.generation += 1;
        Ok(index)
    }

    fn append(&mut self, record: Record) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of deleted slots awaiting reuse
    pub fn count_deleted(&self) -> usize {
        self.free_slots.len()
    }

    /// Number of live records
    pub fn count_live(&self) -> usize {
        self.records.len() - self.free_slots.len()
    }

    /// Total slots, live and deleted
    pub fn slot_count(&self) -> usize {
        self.records.len()
    }

    /// Allocated capacity of the backing collection
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    /// True if there are no live records
    pub fn is_empty(&self) -> bool {
        self.count_live() == 0
    }

    /// All slots in order, tombstones included
    pub fn slots(&self) -> &[Record] {
        &self.records
    }

    /// Live records in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.is_tombstone())
    }

    /// Current mutation generation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The configured deletion policy
    pub fn policy(&self) -> DeletionPolicy {
        self.config.deletion_policy
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
