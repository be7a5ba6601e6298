//! Naive baseline
//!
//! Re-checks the selector and re-parses numeric targets for every record,
//! and copies each hit out. Kept only as the reference point the store's
//! scans are measured against.

use crate::error::Result;
use crate::record::{parse_numeric, Column, Record};

/// Copy out every record in `records` whose `selector` column matches `text`
///
/// Works on a raw slice: tombstones are not skipped. An unrecognized
/// selector matches nothing.
pub fn naive_find_matching_records(
    records: &[Record],
    selector: &str,
    text: &str,
) -> Result<Vec<Record>> {
    let mut result = Vec::new();

    for record in records {
        let hit = match selector {
            "column0" => parse_numeric::<u32>(Column::Id, text)? == record.id,
            "column1" => record.name.contains(text),
            "column2" => parse_numeric::<i64>(Column::Balance, text)? == record.balance,
            "column3" => record.address.contains(text),
            _ => false,
        };
        if hit {
            result.push(record.clone());
        }
    }

    Ok(result)
}
