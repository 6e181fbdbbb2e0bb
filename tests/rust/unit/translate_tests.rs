//! End-to-end translation tests: raw TecSql text in, physical SQL text out,
//! through `normalize_query_text` + `translate` exactly as the HTTP handler
//! drives the pipeline.

use tecsql::tecsql_translator::{
    normalize_query_text, translate, Dictionary, DictionaryRow, TranslateError,
};

fn row(lt: &str, pt: &str, lf: &str, pf: &str) -> DictionaryRow {
    let opt = |s: &str| {
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    };
    DictionaryRow {
        logical_table: opt(lt),
        physical_table: opt(pt),
        logical_field: opt(lf),
        physical_field: opt(pf),
    }
}

fn dict() -> Dictionary {
    Dictionary::from_rows(&[
        row("$cust", "CUSTOMERS", "id", "CUST_ID"),
        row("$cust", "CUSTOMERS", "name", "CUST_NAME"),
        row("$ord", "ORDERS", "id", "ORD_ID"),
        row("$ord", "ORDERS", "cust_id", "ORD_CUST"),
        row("$ord", "ORDERS", "total", "ORD_TOTAL"),
    ])
}

fn ok(query: &str) -> String {
    translate(&dict(), &normalize_query_text(query)).expect("translation should succeed")
}

fn err(query: &str) -> TranslateError {
    translate(&dict(), &normalize_query_text(query)).expect_err("translation should fail")
}

#[test]
fn qualified_logical_reference() {
    assert_eq!(
        ok("SELECT $cust.id FROM $cust"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS"
    );
}

#[test]
fn bare_marker_resolves_against_base_table() {
    assert_eq!(
        ok("SELECT $id, $name FROM $cust"),
        "SELECT CUSTOMERS.CUST_ID, CUSTOMERS.CUST_NAME FROM CUSTOMERS"
    );
}

#[test]
fn logical_keys_are_case_insensitive() {
    assert_eq!(
        ok("SELECT $Cust.Id FROM $CUST"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS"
    );
}

#[test]
fn table_star_expands_to_physical_star() {
    assert_eq!(
        ok("SELECT $cust.* FROM $cust"),
        "SELECT CUSTOMERS.* FROM CUSTOMERS"
    );
}

#[test]
fn alias_stays_as_output_qualifier() {
    assert_eq!(
        ok("SELECT $cust.id FROM $cust a WHERE a.id = 1"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS a WHERE a.CUST_ID = 1"
    );
}

#[test]
fn as_alias_binds_like_a_bare_alias() {
    assert_eq!(
        ok("SELECT $cust.name FROM $cust AS c WHERE c.id = 3"),
        "SELECT CUSTOMERS.CUST_NAME FROM CUSTOMERS AS c WHERE c.CUST_ID = 3"
    );
}

#[test]
fn alias_star_keeps_the_alias() {
    assert_eq!(
        ok("SELECT c.* FROM $cust c"),
        "SELECT c.* FROM CUSTOMERS c"
    );
}

#[test]
fn outer_marker_applies_only_in_predicate_clauses() {
    assert_eq!(
        ok("SELECT $cust.id FROM $cust OUTER WHERE $cust.id = 1"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS WHERE CUSTOMERS.CUST_ID(+) = 1"
    );
}

#[test]
fn outer_marker_flows_through_an_alias() {
    assert_eq!(
        ok("SELECT $cust.id FROM $cust a OUTER WHERE a.id = 1"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS a WHERE a.CUST_ID(+) = 1"
    );
}

#[test]
fn outer_marker_applies_in_on_clause() {
    assert_eq!(
        ok("SELECT $ord.id FROM $ord JOIN $cust OUTER ON $cust.id = $ord.cust_id"),
        "SELECT ORDERS.ORD_ID FROM ORDERS JOIN CUSTOMERS ON CUSTOMERS.CUST_ID(+) = ORDERS.ORD_CUST"
    );
}

#[test]
fn outer_marker_absent_in_group_and_order_by() {
    assert_eq!(
        ok("SELECT $cust.id FROM $cust OUTER GROUP BY $cust.id ORDER BY $cust.id"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS GROUP BY CUSTOMERS.CUST_ID ORDER BY CUSTOMERS.CUST_ID"
    );
}

#[test]
fn standard_left_outer_join_is_preserved() {
    assert_eq!(
        ok("SELECT $cust.id FROM $cust LEFT OUTER JOIN $ord ON $ord.cust_id = $cust.id"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS LEFT OUTER JOIN ORDERS ON ORDERS.ORD_CUST = CUSTOMERS.CUST_ID"
    );
}

#[test]
fn direct_table_qualification_without_marker() {
    assert_eq!(
        ok("SELECT $cust.name FROM $cust WHERE cust.id = 7"),
        "SELECT CUSTOMERS.CUST_NAME FROM CUSTOMERS WHERE CUSTOMERS.CUST_ID = 7"
    );
}

#[test]
fn physical_table_name_in_from_sets_the_base() {
    assert_eq!(
        ok("SELECT $id FROM CUSTOMERS"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS"
    );
}

#[test]
fn unknown_physical_table_passes_through() {
    assert_eq!(
        ok("SELECT t.col FROM SOME_SCHEMA.SOME_TABLE t WHERE t.col = 1"),
        "SELECT t.col FROM SOME_SCHEMA.SOME_TABLE t WHERE t.col = 1"
    );
}

#[test]
fn multiple_from_tables_resolve_after_commas() {
    assert_eq!(
        ok("SELECT $cust.id FROM $cust, $ord WHERE $ord.cust_id = $cust.id"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS, ORDERS WHERE ORDERS.ORD_CUST = CUSTOMERS.CUST_ID"
    );
}

#[test]
fn parenthesized_subquery_restores_outer_clause() {
    assert_eq!(
        ok("SELECT $cust.id FROM $cust WHERE $cust.id IN (SELECT $ord.cust_id FROM $ord WHERE $ord.total > 10)"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS WHERE CUSTOMERS.CUST_ID IN (SELECT ORDERS.ORD_CUST FROM ORDERS WHERE ORDERS.ORD_TOTAL > 10)"
    );
}

#[test]
fn outer_marker_reaches_predicates_inside_subqueries() {
    assert_eq!(
        ok("SELECT $cust.id FROM $cust OUTER WHERE EXISTS (SELECT 1 FROM $ord WHERE $ord.cust_id = $cust.id)"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS WHERE EXISTS (SELECT 1 FROM ORDERS WHERE ORDERS.ORD_CUST = CUSTOMERS.CUST_ID(+))"
    );
}

#[test]
fn strings_parameters_and_legacy_operators_pass_through() {
    assert_eq!(
        ok("SELECT $cust.name FROM $cust WHERE $cust.name #LIKE 'O''Brien' AND $cust.id >= ?min"),
        "SELECT CUSTOMERS.CUST_NAME FROM CUSTOMERS WHERE CUSTOMERS.CUST_NAME #LIKE 'O''Brien' AND CUSTOMERS.CUST_ID >= ?min"
    );
}

#[test]
fn query_without_markers_is_identity_up_to_spacing() {
    assert_eq!(ok("SELECT a , b FROM t ;"), "SELECT a, b FROM t;");
    assert_eq!(
        ok("select 1 from DUAL where 1 = 1"),
        "select 1 from DUAL where 1 = 1"
    );
}

#[test]
fn normalization_flattens_multiline_input() {
    assert_eq!(
        ok("SELECT $cust.id\r\n  FROM\n\t$cust"),
        "SELECT CUSTOMERS.CUST_ID FROM CUSTOMERS"
    );
}

#[test]
fn as_is_copies_the_rest_verbatim() {
    assert_eq!(
        ok("SELECT 1 FROM $cust AS IS $ghost.field stays"),
        "SELECT 1 FROM CUSTOMERS AS IS $ghost.field stays"
    );
}

#[test]
fn translation_is_deterministic() {
    let query = "SELECT $cust.id FROM $cust a OUTER WHERE a.id = 1";
    assert_eq!(ok(query), ok(query));
}

#[test]
fn empty_query_is_rejected() {
    assert_eq!(err("   "), TranslateError::EmptyQuery);
}

#[test]
fn unloaded_dictionary_is_rejected() {
    let empty = Dictionary::default();
    assert_eq!(
        translate(&empty, "SELECT 1"),
        Err(TranslateError::DictionaryNotLoaded)
    );
}

#[test]
fn unmapped_table_is_reported_with_its_name() {
    assert_eq!(
        err("SELECT $ghost.id FROM $ghost"),
        TranslateError::UnmappedTable {
            table: "$ghost".to_string()
        }
    );
}

#[test]
fn unmapped_field_is_reported_with_the_full_reference() {
    assert_eq!(
        err("SELECT $cust.zipcode FROM $cust"),
        TranslateError::UnmappedField {
            reference: "$cust.zipcode".to_string()
        }
    );
}

#[test]
fn bare_marker_without_a_base_table_is_unmapped() {
    assert_eq!(
        err("SELECT $id"),
        TranslateError::UnmappedField {
            reference: "$id".to_string()
        }
    );
}

#[test]
fn known_table_marker_in_field_position_is_unexpected() {
    assert_eq!(
        err("SELECT $cust.id FROM $cust WHERE $ord = 1"),
        TranslateError::UnexpectedTableReference {
            table: "$ord".to_string()
        }
    );
}

#[test]
fn unmapped_alias_field_names_the_alias_reference() {
    assert_eq!(
        err("SELECT 1 FROM $cust a WHERE a.zipcode = 1"),
        TranslateError::UnmappedField {
            reference: "a.zipcode".to_string()
        }
    );
}
