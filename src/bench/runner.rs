//! Performance runner
//!
//! Times store operations on generated data and sanity-checks the results.
//! A failed check aborts the run with `BenchmarkMismatch` instead of
//! reporting a timing for a wrong answer.

use std::time::Duration;

use tracing::info;

use crate::config::{BenchConfig, Config, DeletionPolicy};
use crate::error::{Result, SlotError};
use crate::record::Column;
use crate::store::RecordStore;

use super::{generate_test_data, make_record, naive_find_matching_records, TimeUnit, Timer};

/// Balance target used alongside the name target; never hit by generated data
const BALANCE_TARGET: &str = "24000";

/// One timed operation
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Operation label
    pub operation: String,

    /// Size of the data set it ran against
    pub records: u32,

    /// Wall-clock duration
    pub elapsed: Duration,
}

/// Drives the benchmark suites
pub struct PerformanceRunner {
    config: BenchConfig,
}

impl PerformanceRunner {
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    // =========================================================================
    // Suites
    // =========================================================================

    /// Fixed-size repetitions, then escalating sizes
    pub fn run_find_suite(&self) -> Result<Vec<Measurement>> {
        let mut measurements = Vec::new();

        info!("Find matching records with the same amount of records");
        for run in 1..=self.config.same_size_runs {
            info!(run, records = self.config.record_count, "starting find run");
            measurements.extend(self.measure_find_several(self.config.record_count)?);
        }

        info!("Find matching records with different amounts of records");
        for (run, records) in self.config.growth_sizes().into_iter().enumerate() {
            info!(run = run + 1, records, "starting find run");
            measurements.extend(self.measure_find_several(records)?);
        }

        Ok(measurements)
    }

    /// One unique-hit find per fixed-size run
    pub fn run_find_one_suite(&self) -> Result<Vec<Measurement>> {
        let mut measurements = Vec::new();
        for run in 1..=self.config.same_size_runs {
            info!(run, records = self.config.record_count, "starting find-one run");
            measurements.extend(self.measure_find_one(self.config.record_count)?);
        }
        Ok(measurements)
    }

    /// Delete escalating ids from a fixed-size store
    pub fn run_remove_suite(&self) -> Result<Vec<Measurement>> {
        let mut measurements = Vec::new();
        for (run, id) in self.config.delete_ids().into_iter().enumerate() {
            info!(run = run + 1, id, "starting remove run");
            measurements.push(self.measure_remove(self.config.record_count, id)?);
        }
        Ok(measurements)
    }

    /// Delete-then-insert on escalating ids
    pub fn run_add_suite(&self) -> Result<Vec<Measurement>> {
        let mut measurements = Vec::new();
        for (run, id) in self.config.delete_ids().into_iter().enumerate() {
            info!(run = run + 1, id, "starting add run");
            measurements.extend(self.measure_add(self.config.record_count, id)?);
        }
        Ok(measurements)
    }

    // =========================================================================
    // Single measurements
    // =========================================================================

    /// Find a single unique name among `records` records
    pub fn measure_find_one(&self, records: u32) -> Result<Vec<Measurement>> {
        let affix = &self.config.data_affix;
        let data = generate_test_data(affix, records);
        let target = format!("{}{}", affix, (records / 2).max(1));

        let mut timer = Timer::new();

        let (baseline, m_naive) = timed(&mut timer, "NaiveFindMatchingRecords", records, || {
            let names = naive_find_matching_records(&data, Column::Name.selector(), &target)?;
            let balances =
                naive_find_matching_records(&data, Column::Balance.selector(), BALANCE_TARGET)?;
            Ok(names.len() + balances.len())
        })?;

        let store = RecordStore::with_config(data, self.store_config());

        let (matched, m_scan) = timed(&mut timer, "ScanMatchingRecords", records, || {
            Ok(store.scan(Column::Name, &target)?.len()
                + store.scan(Column::Balance, BALANCE_TARGET)?.len())
        })?;

        let (direct, m_direct) = timed(&mut timer, "ScanDirectMatchingRecords", records, || {
            Ok(store.scan_direct(Column::Name, &target)?.len()
                + store.scan_direct(Column::Balance, BALANCE_TARGET)?.len())
        })?;

        for (label, count) in [("baseline", baseline), ("scan", matched), ("scan_direct", direct)] {
            if count != 1 {
                return Err(SlotError::BenchmarkMismatch(format!(
                    "{} found {} records for unique target {:?}",
                    label, count, target
                )));
            }
        }

        Ok(vec![m_naive, m_scan, m_direct])
    }

    /// Find a target every record matches
    pub fn measure_find_several(&self, records: u32) -> Result<Vec<Measurement>> {
        let affix = &self.config.data_affix;
        let data = generate_test_data(affix, records);

        let mut timer = Timer::new();

        let (baseline, m_naive) = timed(&mut timer, "NaiveFindMatchingRecords", records, || {
            let names = naive_find_matching_records(&data, Column::Name.selector(), affix)?;
            let balances =
                naive_find_matching_records(&data, Column::Balance.selector(), BALANCE_TARGET)?;
            Ok(names.len() + balances.len())
        })?;

        let store = RecordStore::with_config(data, self.store_config());

        let (matched, m_scan) = timed(&mut timer, "ScanMatchingRecords", records, || {
            Ok(store.scan(Column::Name, affix)?.len()
                + store.scan(Column::Balance, BALANCE_TARGET)?.len())
        })?;

        let (direct, m_direct) = timed(&mut timer, "ScanDirectMatchingRecords", records, || {
            Ok(store.scan_direct(Column::Name, affix)?.len()
                + store.scan_direct(Column::Balance, BALANCE_TARGET)?.len())
        })?;

        if baseline == 0 || matched != baseline || direct != baseline {
            return Err(SlotError::BenchmarkMismatch(format!(
                "result counts disagree: baseline={}, scan={}, scan_direct={}",
                baseline, matched, direct
            )));
        }

        Ok(vec![m_naive, m_scan, m_direct])
    }

    /// Delete record `id` from a store of `records` records
    pub fn measure_remove(&self, records: u32, id: u32) -> Result<Measurement> {
        let data = generate_test_data(&self.config.data_affix, records);
        let mut store = RecordStore::with_config(data, self.store_config());
        let mut timer = Timer::new();

        let (removed, measurement) = timed(&mut timer, "RemoveRecordById", records, || {
            Ok(store.delete_by_id(id))
        })?;

        if !removed || store.count_live() + 1 != records as usize {
            return Err(SlotError::BenchmarkMismatch(format!(
                "expected exactly one record removed for id {}, live={}",
                id,
                store.count_live()
            )));
        }

        Ok(measurement)
    }

    /// Delete `id`, insert into the freed slot, then insert once more
    pub fn measure_add(&self, records: u32, id: u32) -> Result<Vec<Measurement>> {
        let affix = &self.config.data_affix;
        let data = generate_test_data(affix, records);
        let mut store = RecordStore::with_config(data, self.store_config());
        let mut timer = Timer::new();

        if !store.delete_by_id(id) {
            return Err(SlotError::BenchmarkMismatch(format!(
                "id {} not present in {} records",
                id, records
            )));
        }
        let capacity = store.capacity();

        let reused = make_record(affix, records.saturating_add(1));
        let (_, m_reuse) = timed(&mut timer, "AddRecordIntoFreeSlot", records, || {
            store.insert(reused)
        })?;

        if store.policy() == DeletionPolicy::Tombstone
            && (store.count_deleted() != 0 || store.capacity() != capacity)
        {
            return Err(SlotError::BenchmarkMismatch(
                "insert did not reuse the freed slot".to_string(),
            ));
        }

        let appended = make_record(affix, records.saturating_add(2));
        let (_, m_append) = timed(&mut timer, "AddRecordAtEnd", records, || {
            store.insert(appended)
        })?;

        if store.count_live() != records as usize + 1 {
            return Err(SlotError::BenchmarkMismatch(format!(
                "expected {} live records, found {}",
                records as usize + 1,
                store.count_live()
            )));
        }

        Ok(vec![m_reuse, m_append])
    }

    fn store_config(&self) -> Config {
        Config::builder()
            .deletion_policy(self.config.deletion_policy)
            .build()
    }
}

/// Run `op` between a timer start/stop and report the result
fn timed<T>(
    timer: &mut Timer,
    operation: &str,
    records: u32,
    op: impl FnOnce() -> Result<T>,
) -> Result<(T, Measurement)> {
    timer.start();
    let result = op();
    timer.stop();

    info!("{}", timer.report(operation, TimeUnit::Milliseconds));
    info!("{}", timer.report(operation, TimeUnit::Seconds));

    let elapsed = timer.elapsed().unwrap_or_default();
    timer.reset();

    Ok((
        result?,
        Measurement {
            operation: operation.to_string(),
            records,
            elapsed,
        },
    ))
}
