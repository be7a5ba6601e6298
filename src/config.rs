//! Configuration for SlotDB
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, SlotError};

/// Main configuration for a RecordStore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Mutation Configuration
    // -------------------------------------------------------------------------
    /// How `delete_by_id` removes records. Fixed for the lifetime of a store.
    pub deletion_policy: DeletionPolicy,

    // -------------------------------------------------------------------------
    // Scan Configuration
    // -------------------------------------------------------------------------
    /// Reserve room for every slot in the scan output up front.
    /// Faster on wide matches, wasteful on selective ones.
    pub presize_scan_output: bool,
}

/// Deletion strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletionPolicy {
    /// Overwrite the slot with a tombstone and remember its index for reuse.
    /// Never shifts records.
    #[default]
    Tombstone,

    /// Remove the record and shift everything after it down one slot.
    /// Inserts always append.
    Physical,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deletion_policy: DeletionPolicy::Tombstone,
            presize_scan_output: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the deletion policy
    pub fn deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.config.deletion_policy = policy;
        self
    }

    /// Pre-size scan output to the slot count
    pub fn presize_scan_output(mut self, enabled: bool) -> Self {
        self.config.presize_scan_output = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

// =============================================================================
// Benchmark Configuration
// =============================================================================

/// Settings for the benchmark driver
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Record count for the fixed-size runs
    pub record_count: u32,

    /// How many times the fixed-size find benchmark repeats
    pub same_size_runs: u32,

    /// Base of the escalating record counts (base^2, base^3, ...)
    pub growth_base: u32,

    /// Number of escalating find runs
    pub growth_steps: u32,

    /// Base of the ids removed by the delete benchmark (base^1, base^2, ...)
    pub delete_base: u32,

    /// Number of delete runs
    pub delete_steps: u32,

    /// Prefix/suffix used by the data generator
    pub data_affix: String,

    /// Deletion policy of the stores under test
    pub deletion_policy: DeletionPolicy,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            record_count: 1_000_000,
            same_size_runs: 5,
            growth_base: 10,
            growth_steps: 6,
            delete_base: 10,
            delete_steps: 5,
            data_affix: "testdata".to_string(),
            deletion_policy: DeletionPolicy::Tombstone,
        }
    }
}

impl BenchConfig {
    /// Create a new bench config builder
    pub fn builder() -> BenchConfigBuilder {
        BenchConfigBuilder::default()
    }

    /// Reject settings that would make every run meaningless
    pub fn validate(&self) -> Result<()> {
        if self.record_count == 0 {
            return Err(SlotError::Config("record_count must be > 0".to_string()));
        }
        if self.growth_base < 2 {
            return Err(SlotError::Config("growth_base must be >= 2".to_string()));
        }
        if self.delete_base < 2 {
            return Err(SlotError::Config("delete_base must be >= 2".to_string()));
        }
        if self.data_affix.is_empty() {
            return Err(SlotError::Config("data_affix must not be empty".to_string()));
        }
        if let Some(&max_id) = self.delete_ids().last() {
            if max_id > self.record_count {
                return Err(SlotError::Config(format!(
                    "delete id {} exceeds record_count {}; lower delete_steps or raise record_count",
                    max_id, self.record_count
                )));
            }
        }
        Ok(())
    }

    /// Record counts for the escalating find runs: base^2 .. base^(steps+1)
    pub fn growth_sizes(&self) -> Vec<u32> {
        (0..self.growth_steps)
            .map_while(|i| self.growth_base.checked_pow(i + 2))
            .collect()
    }

    /// Ids removed by the delete runs: base^1 .. base^steps
    pub fn delete_ids(&self) -> Vec<u32> {
        (0..self.delete_steps)
            .map_while(|i| self.delete_base.checked_pow(i + 1))
            .collect()
    }
}

/// Builder for BenchConfig
#[derive(Default)]
pub struct BenchConfigBuilder {
    config: BenchConfig,
}

impl BenchConfigBuilder {
    /// Set the record count for fixed-size runs
    pub fn record_count(mut self, count: u32) -> Self {
        self.config.record_count = count;
        self
    }

    /// Set the number of fixed-size find runs
    pub fn same_size_runs(mut self, runs: u32) -> Self {
        self.config.same_size_runs = runs;
        self
    }

    /// Set the base of the escalating record counts
    pub fn growth_base(mut self, base: u32) -> Self {
        self.config.growth_base = base;
        self
    }

    /// Set the number of escalating find runs
    pub fn growth_steps(mut self, steps: u32) -> Self {
        self.config.growth_steps = steps;
        self
    }

    /// Set the base of the removed ids
    pub fn delete_base(mut self, base: u32) -> Self {
        self.config.delete_base = base;
        self
    }

    /// Set the number of delete runs
    pub fn delete_steps(mut self, steps: u32) -> Self {
        self.config.delete_steps = steps;
        self
    }

    /// Set the generator prefix/suffix
    pub fn data_affix(mut self, affix: impl Into<String>) -> Self {
        self.config.data_affix = affix.into();
        self
    }

    /// Set the deletion policy of the stores under test
    pub fn deletion_policy(mut self, policy: DeletionPolicy) -> Self {
        self.config.deletion_policy = policy;
        self
    }

    pub fn build(self) -> BenchConfig {
        self.config
    }
}
