//! Tests for the process-wide dictionary slot: wholesale replacement, reader
//! snapshot isolation, and the empty default before any load. Serialized
//! because the slot is shared process state.

use serial_test::serial;

use tecsql::server::{current_dictionary, install_dictionary};
use tecsql::tecsql_translator::{translate, Dictionary, DictionaryRow, TranslateError};

fn dict(logical: &str, physical: &str) -> Dictionary {
    Dictionary::from_rows(&[DictionaryRow {
        logical_table: Some(logical.to_string()),
        physical_table: Some(physical.to_string()),
        logical_field: Some("id".to_string()),
        physical_field: Some("ID".to_string()),
    }])
}

#[tokio::test]
#[serial]
async fn install_replaces_the_dictionary_wholesale() {
    install_dictionary(dict("$cust", "CUSTOMERS")).await;
    let before = current_dictionary().await;
    assert!(before.contains_table("$cust"));

    install_dictionary(dict("$ord", "ORDERS")).await;
    let after = current_dictionary().await;
    assert!(after.contains_table("$ord"));
    assert!(!after.contains_table("$cust"));

    // A snapshot taken before the swap still sees the old mapping.
    assert!(before.contains_table("$cust"));
}

#[tokio::test]
#[serial]
async fn snapshots_translate_independently_of_later_swaps() {
    install_dictionary(dict("$cust", "CUSTOMERS")).await;
    let snapshot = current_dictionary().await;

    install_dictionary(dict("$ord", "ORDERS")).await;

    assert_eq!(
        translate(&snapshot, "SELECT $cust.id FROM $cust"),
        Ok("SELECT CUSTOMERS.ID FROM CUSTOMERS".to_string())
    );
    let current = current_dictionary().await;
    assert_eq!(
        translate(&current, "SELECT $cust.id FROM $cust"),
        Err(TranslateError::UnmappedTable {
            table: "$cust".to_string()
        })
    );
}

#[tokio::test]
#[serial]
async fn concurrent_installs_leave_a_complete_dictionary() {
    let tasks: Vec<_> = (0..8)
        .map(|n| {
            tokio::spawn(async move {
                let table = format!("$t{n}");
                install_dictionary(dict(&table, "TBL")).await;
            })
        })
        .collect();
    for task in tasks {
        task.await.expect("install task should not panic");
    }

    // Whichever install won, the visible dictionary is a complete one.
    let current = current_dictionary().await;
    assert_eq!(current.table_count(), 1);
    assert_eq!(current.field_count(), 1);
}
