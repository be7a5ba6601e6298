//! Test data generator

use crate::record::Record;

/// Record number `i` of a generated data set
///
/// `{ id: i, name: affix+i, balance: i % 100, address: i+affix }`
pub fn make_record(affix: &str, i: u32) -> Record {
    Record::new(
        i,
        format!("{}{}", affix, i),
        i64::from(i % 100),
        format!("{}{}", i, affix),
    )
}

/// Records `1..=count`, in id order
pub fn generate_test_data(affix: &str, count: u32) -> Vec<Record> {
    (1..=count).map(|i| make_record(affix, i)).collect()
}
