//! RecordStore Tests
//!
//! Tests verify:
//! - Matcher and direct scans on every column
//! - Scan ordering and tombstone skipping
//! - Tombstone deletion and FIFO slot reuse
//! - Physical deletion
//! - Live / deleted accounting
//! - Handle invalidation across mutations

use slotdb::bench::{generate_test_data, make_record};
use slotdb::{Column, Config, DeletionPolicy, Record, RecordStore, SlotError};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_store(count: u32) -> RecordStore {
    RecordStore::new(generate_test_data("testdata", count))
}

fn setup_physical_store(count: u32) -> RecordStore {
    let config = Config::builder()
        .deletion_policy(DeletionPolicy::Physical)
        .build();
    RecordStore::with_config(generate_test_data("testdata", count), config)
}

fn ids(records: &[&Record]) -> Vec<u32> {
    records.iter().map(|r| r.id).collect()
}

fn assert_scans_agree(store: &RecordStore, column: Column, text: &str) {
    let via_matcher = store.scan(column, text).unwrap();
    let direct = store.scan_direct(column, text).unwrap();
    assert_eq!(ids(&via_matcher), ids(&direct), "column={column} text={text:?}");
    for (a, b) in via_matcher.iter().zip(&direct) {
        assert!(std::ptr::eq(*a, *b));
    }
}

// =============================================================================
// Construction Tests
// =============================================================================

#[test]
fn test_construction() {
    let store = setup_store(100);
    assert_eq!(store.count_live(), 100);
    assert_eq!(store.count_deleted(), 0);
    assert_eq!(store.slot_count(), 100);
    assert_eq!(store.policy(), DeletionPolicy::Tombstone);
}

#[test]
fn test_empty_store() {
    let store = RecordStore::default();
    assert!(store.is_empty());
    assert!(store.scan(Column::Name, "").unwrap().is_empty());
    assert!(store.scan_direct(Column::Id, "1").unwrap().is_empty());
}

#[test]
fn test_seeded_tombstones_go_to_free_ledger() {
    let records = vec![
        Record::new(1, "a", 1, "a"),
        Record::new(0, "ghost", 7, "ghost"),
        Record::new(3, "c", 3, "c"),
    ];
    let mut store = RecordStore::new(records);

    assert_eq!(store.count_live(), 2);
    assert_eq!(store.count_deleted(), 1);
    assert!(store.scan(Column::Name, "ghost").unwrap().is_empty());
    assert_eq!(store.slots()[1], Record::tombstone());

    let index = store.insert(Record::new(4, "d", 4, "d")).unwrap();
    assert_eq!(index, 1);
    assert_eq!(store.count_deleted(), 0);
}

#[test]
fn test_seeded_tombstones_dropped_under_physical_policy() {
    let config = Config::builder()
        .deletion_policy(DeletionPolicy::Physical)
        .build();
    let records = vec![Record::new(1, "a", 1, "a"), Record::new(0, "", 0, "")];
    let store = RecordStore::with_config(records, config);

    assert_eq!(store.slot_count(), 1);
    assert_eq!(store.count_deleted(), 0);
}

// =============================================================================
// Scan Tests
// =============================================================================

#[test]
fn test_scan_id_found() {
    let store = setup_store(100);
    let result = store.scan(Column::Id, "88").unwrap();
    assert_eq!(ids(&result), vec![88]);
}

#[test]
fn test_scan_id_not_found() {
    let store = setup_store(100);
    assert!(store.scan(Column::Id, "1988").unwrap().is_empty());
}

#[test]
fn test_scan_name_unique() {
    let store = setup_store(100);
    let result = store.scan(Column::Name, "testdata88").unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 88);
    assert_eq!(result[0].name, "testdata88");
}

#[test]
fn test_scan_name_not_found() {
    let store = setup_store(100);
    assert!(store.scan(Column::Name, "testdata1988").unwrap().is_empty());
}

#[test]
fn test_scan_balance_found() {
    let store = setup_store(100);
    let result = store.scan(Column::Balance, "88").unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].balance, 88);
}

#[test]
fn test_scan_balance_not_found() {
    let store = setup_store(100);
    assert!(store.scan(Column::Balance, "1988").unwrap().is_empty());
}

#[test]
fn test_scan_address_found() {
    let store = setup_store(100);
    let result = store.scan(Column::Address, "88testdata").unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].address, "88testdata");
}

#[test]
fn test_scan_name_matches_all_in_order() {
    let store = setup_store(100);
    let result = store.scan(Column::Name, "testdata").unwrap();
    assert_eq!(result.len(), 100);
    assert_eq!(result[0].name, "testdata1");
    assert_eq!(result[99].name, "testdata100");
}

#[test]
fn test_scan_address_matches_all_in_order() {
    let store = setup_store(100);
    let result = store.scan(Column::Address, "testdata").unwrap();
    assert_eq!(result.len(), 100);
    assert_eq!(result[0].address, "1testdata");
    assert_eq!(result[99].address, "100testdata");
}

#[test]
fn test_scan_large_store() {
    let store = setup_store(10_000);
    let result = store.scan(Column::Name, "testdata").unwrap();
    assert_eq!(result.len(), 10_000);
    assert_eq!(result[9_999].name, "testdata10000");
}

#[test]
fn test_scan_empty_text_matches_every_live_record() {
    let mut store = setup_store(50);
    store.delete_by_id(10);
    store.delete_by_id(20);

    assert_eq!(store.scan(Column::Name, "").unwrap().len(), 48);
    assert_eq!(store.scan(Column::Address, "").unwrap().len(), 48);
}

#[test]
fn test_scan_returns_borrowed_records() {
    let store = setup_store(10);
    let result = store.scan(Column::Id, "5").unwrap();
    assert!(std::ptr::eq(result[0], &store.slots()[4]));
}

#[test]
fn test_scan_presized_output() {
    let config = Config::builder().presize_scan_output(true).build();
    let store = RecordStore::with_config(generate_test_data("testdata", 100), config);
    let result = store.scan(Column::Name, "testdata8").unwrap();
    assert_eq!(ids(&result), vec![8, 80, 81, 82, 83, 84, 85, 86, 87, 88, 89]);
    assert!(result.capacity() >= 100);
}

#[test]
fn test_scan_invalid_numeric_filter_is_error() {
    let store = setup_store(10);
    assert!(matches!(
        store.scan(Column::Id, "eighty-eight"),
        Err(SlotError::InvalidFilter { .. })
    ));
    assert!(matches!(
        store.scan_direct(Column::Balance, "1.5"),
        Err(SlotError::InvalidFilter { .. })
    ));
}

#[test]
fn test_scan_by_selector() {
    let store = setup_store(100);
    let result = store.scan_by_selector("column1", "testdata88").unwrap();
    assert_eq!(ids(&result), vec![88]);

    let result = store.scan_direct_by_selector("column0", "42").unwrap();
    assert_eq!(ids(&result), vec![42]);

    assert!(matches!(
        store.scan_by_selector("column7", "x"),
        Err(SlotError::UnknownColumn(_))
    ));
}

// =============================================================================
// Scan Path Equivalence Tests
// =============================================================================

#[test]
fn test_scan_and_scan_direct_agree() {
    let mut store = setup_store(200);
    for id in [3, 50, 77, 150] {
        store.delete_by_id(id);
    }
    store.insert(make_record("other", 201)).unwrap();

    let cases = [
        (Column::Id, "77"),
        (Column::Id, "201"),
        (Column::Id, "0"),
        (Column::Name, "testdata1"),
        (Column::Name, "other"),
        (Column::Name, ""),
        (Column::Balance, "50"),
        (Column::Balance, "0"),
        (Column::Address, "5testdata"),
        (Column::Address, ""),
    ];
    for (column, text) in cases {
        assert_scans_agree(&store, column, text);
    }
}

#[test]
fn test_search_for_id_zero_never_returns_tombstones() {
    let mut store = setup_store(10);
    store.delete_by_id(4);
    assert!(store.scan(Column::Id, "0").unwrap().is_empty());
    assert!(store.scan_direct(Column::Balance, "0").unwrap().is_empty());
}

// =============================================================================
// Tombstone Delete Tests
// =============================================================================

#[test]
fn test_delete_existing_record() {
    let mut store = setup_store(100);

    assert!(store.delete_by_id(88));

    assert!(store.scan(Column::Name, "testdata88").unwrap().is_empty());
    assert!(store.scan(Column::Id, "88").unwrap().is_empty());
    assert_eq!(store.count_deleted(), 1);
    assert_eq!(store.count_live(), 99);
    assert_eq!(store.slot_count(), 100);
    assert_eq!(store.slots()[87], Record::tombstone());
}

#[test]
fn test_delete_does_not_shift_other_records() {
    let mut store = setup_store(10);
    store.delete_by_id(3);
    assert_eq!(store.slots()[3].id, 4);
    assert_eq!(store.slots()[9].id, 10);
}

#[test]
fn test_delete_missing_id_is_noop() {
    let mut store = setup_store(100);
    let before = store.slots().to_vec();

    assert!(!store.delete_by_id(1988));

    assert_eq!(store.slots(), before.as_slice());
    assert_eq!(store.count_deleted(), 0);
    assert_eq!(store.count_live(), 100);
}

#[test]
fn test_delete_twice_is_noop_second_time() {
    let mut store = setup_store(10);
    assert!(store.delete_by_id(5));
    assert!(!store.delete_by_id(5));
    assert_eq!(store.count_deleted(), 1);
}

#[test]
fn test_delete_id_zero_is_noop() {
    let mut store = setup_store(10);
    store.delete_by_id(5);
    assert!(!store.delete_by_id(0));
    assert_eq!(store.count_deleted(), 1);
}

#[test]
fn test_delete_removes_only_first_duplicate() {
    let records = vec![
        Record::new(7, "first", 1, "x"),
        Record::new(7, "second", 2, "y"),
    ];
    let mut store = RecordStore::new(records);

    store.delete_by_id(7);

    let remaining = store.scan(Column::Id, "7").unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "second");
}

// =============================================================================
// Insert Tests
// =============================================================================

#[test]
fn test_insert_appends_when_no_free_slots() {
    let mut store = setup_store(10);
    let index = store.insert(make_record("testdata", 11)).unwrap();
    assert_eq!(index, 10);
    assert_eq!(store.count_live(), 11);
    assert_eq!(store.slot_count(), 11);
}

#[test]
fn test_insert_reuses_freed_slot() {
    let mut store = setup_store(100);
    store.delete_by_id(88);
    let capacity = store.capacity();

    let index = store.insert(make_record("testdata", 101)).unwrap();

    assert_eq!(index, 87);
    assert_eq!(store.count_live(), 100);
    assert_eq!(store.count_deleted(), 0);
    assert_eq!(store.slot_count(), 100);
    assert_eq!(store.capacity(), capacity);

    let found = store.scan(Column::Name, "testdata101").unwrap();
    assert_eq!(ids(&found), vec![101]);
}

#[test]
fn test_insert_reuses_oldest_slot_first() {
    let mut store = setup_store(10);
    store.delete_by_id(8);
    store.delete_by_id(2);
    store.delete_by_id(5);

    assert_eq!(store.insert(make_record("n", 11)).unwrap(), 7);
    assert_eq!(store.insert(make_record("n", 12)).unwrap(), 1);
    assert_eq!(store.insert(make_record("n", 13)).unwrap(), 4);
    assert_eq!(store.insert(make_record("n", 14)).unwrap(), 10);
}

#[test]
fn test_insert_reserved_id_is_error() {
    let mut store = setup_store(10);
    store.delete_by_id(3);

    let result = store.insert(Record::new(0, "x", 0, "x"));

    assert!(matches!(result, Err(SlotError::ReservedId)));
    assert_eq!(store.count_deleted(), 1);
    assert_eq!(store.count_live(), 9);
}

#[test]
fn test_counts_stay_consistent() {
    let mut store = setup_store(20);
    let ops: [(bool, u32); 10] = [
        (false, 3),
        (false, 4),
        (true, 21),
        (false, 99),
        (false, 21),
        (true, 22),
        (true, 23),
        (false, 1),
        (false, 20),
        (true, 24),
    ];

    for (insert, id) in ops {
        if insert {
            store.insert(make_record("testdata", id)).unwrap();
        } else {
            store.delete_by_id(id);
        }
        assert_eq!(store.count_live() + store.count_deleted(), store.slot_count());
        for record in store.iter() {
            assert!(!record.is_tombstone());
        }
        assert_eq!(store.iter().count(), store.count_live());
    }
}

// =============================================================================
// Physical Delete Tests
// =============================================================================

#[test]
fn test_physical_delete_shifts_records() {
    let mut store = setup_physical_store(10);

    assert!(store.delete_by_id(3));

    assert_eq!(store.slot_count(), 9);
    assert_eq!(store.count_deleted(), 0);
    assert_eq!(store.count_live(), 9);
    assert_eq!(store.slots()[2].id, 4);
    assert!(store.scan(Column::Id, "3").unwrap().is_empty());
}

#[test]
fn test_physical_delete_missing_id_is_noop() {
    let mut store = setup_physical_store(10);
    assert!(!store.delete_by_id(42));
    assert_eq!(store.slot_count(), 10);
}

#[test]
fn test_physical_insert_always_appends() {
    let mut store = setup_physical_store(10);
    store.delete_by_id(1);

    let index = store.insert(make_record("testdata", 11)).unwrap();

    assert_eq!(index, 9);
    assert_eq!(store.count_live(), 10);
    assert_eq!(store.slots()[9].id, 11);
}

#[test]
fn test_physical_scans_agree() {
    let mut store = setup_physical_store(50);
    store.delete_by_id(10);
    store.delete_by_id(11);

    assert_scans_agree(&store, Column::Name, "testdata1");
    assert_scans_agree(&store, Column::Balance, "12");
}

// =============================================================================
// Handle Tests
// =============================================================================

#[test]
fn test_handles_resolve_until_mutation() {
    let mut store = setup_store(100);
    let handles = store.scan_handles(Column::Name, "testdata8").unwrap();
    assert_eq!(handles.len(), 11);

    let first = store.get(handles[0]).unwrap();
    assert_eq!(first.id, 8);

    store.delete_by_id(50);

    assert!(store.get(handles[0]).is_none());
}

#[test]
fn test_handles_unchanged_by_failed_delete() {
    let mut store = setup_store(10);
    let handles = store.scan_handles(Column::Id, "3").unwrap();

    store.delete_by_id(999);

    assert_eq!(store.get(handles[0]).map(|r| r.id), Some(3));
}

#[test]
fn test_handle_to_out_of_range_index() {
    let store = setup_store(3);
    let handle = slotdb::RecordHandle {
        index: 10,
        generation: store.generation(),
    };
    assert!(store.get(handle).is_none());
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_delete_then_insert_scenario() {
    let mut store = setup_store(100);

    assert_eq!(ids(&store.scan(Column::Name, "testdata88").unwrap()), vec![88]);

    store.delete_by_id(88);
    assert!(store.scan(Column::Name, "testdata88").unwrap().is_empty());
    assert_eq!(store.count_deleted(), 1);

    store.insert(make_record("testdata", 101)).unwrap();
    assert_eq!(store.count_live(), 100);
    assert_eq!(store.count_deleted(), 0);
    assert_eq!(ids(&store.scan(Column::Name, "testdata101").unwrap()), vec![101]);
}
