//! Logical↔physical name dictionary.
//!
//! The dictionary is rebuilt wholesale from catalog rows: `from_rows` builds a
//! complete replacement structure, never an incremental merge. The server
//! layer installs the result with a single write-lock assignment so a
//! concurrent translation can never observe a half-populated dictionary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of the logical/physical catalog feed. Field values are optional;
/// rows without both table names are skipped outright.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DictionaryRow {
    pub logical_table: Option<String>,
    pub physical_table: Option<String>,
    pub logical_field: Option<String>,
    pub physical_field: Option<String>,
}

/// Normalized logical-table key: lower-cased, internal whitespace removed,
/// exactly one leading `$`. Empty input normalizes to the empty string.
pub fn normalize_table_key(raw: &str) -> String {
    let stripped = raw.trim().trim_start_matches('$');
    let key: String = stripped
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    if key.is_empty() {
        String::new()
    } else {
        format!("${key}")
    }
}

/// Normalized logical-field key: lower-cased, whitespace removed, no marker.
pub fn normalize_field_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

fn normalize_physical_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Bidirectional logical↔physical mapping, always replaced as a unit.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    /// `$cust` → `CUSTOMERS`
    tables: HashMap<String, String>,
    /// `$cust` → { `id` → `CUST_ID` }
    fields: HashMap<String, HashMap<String, String>>,
    /// `customers` → `$cust`, for bare physical identifiers in table position
    reverse: HashMap<String, String>,
}

impl Dictionary {
    /// Build a dictionary from catalog rows. Malformed rows are skipped and
    /// on duplicate keys the first occurrence wins; this never fails.
    pub fn from_rows(rows: &[DictionaryRow]) -> Self {
        let mut dict = Dictionary::default();
        for row in rows {
            let table_key = row
                .logical_table
                .as_deref()
                .map(normalize_table_key)
                .unwrap_or_default();
            let physical_table = row
                .physical_table
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if table_key.is_empty() || physical_table.is_empty() {
                continue;
            }

            dict.tables
                .entry(table_key.clone())
                .or_insert_with(|| physical_table.to_string());
            dict.reverse
                .entry(normalize_physical_key(physical_table))
                .or_insert_with(|| table_key.clone());

            let field_key = row
                .logical_field
                .as_deref()
                .map(normalize_field_key)
                .unwrap_or_default();
            let physical_field = row
                .physical_field
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if !field_key.is_empty() && !physical_field.is_empty() {
                dict.fields
                    .entry(table_key)
                    .or_default()
                    .entry(field_key)
                    .or_insert_with(|| physical_field.to_string());
            }
        }
        dict
    }

    /// An empty dictionary is untranslatable: `translate` refuses to run
    /// against it.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.values().map(HashMap::len).sum()
    }

    /// Physical table name for a logical reference, in any spelling the
    /// key normalization accepts (`$Cust`, `cust`, `$cust`).
    pub fn physical_table(&self, logical: &str) -> Option<&str> {
        self.tables
            .get(&normalize_table_key(logical))
            .map(String::as_str)
    }

    pub fn physical_field(&self, logical_table: &str, logical_field: &str) -> Option<&str> {
        self.fields
            .get(&normalize_table_key(logical_table))
            .and_then(|fields| fields.get(&normalize_field_key(logical_field)))
            .map(String::as_str)
    }

    pub fn contains_table(&self, logical: &str) -> bool {
        self.tables.contains_key(&normalize_table_key(logical))
    }

    /// Logical key for a bare physical identifier used in table position.
    pub fn logical_key_for_physical(&self, physical: &str) -> Option<&str> {
        self.reverse
            .get(&normalize_physical_key(physical))
            .map(String::as_str)
    }
}
