//! SQL template generation
//!
//! Builds the four canonical statements from a column layout, using named
//! `:column` placeholders throughout.

use tessera_core::ColumnDef;

/// `col1 = :col1 AND col2 = :col2`
pub(crate) fn eq_conjunction(columns: &[&'static ColumnDef]) -> String {
    columns
        .iter()
        .map(|c| format!("{} = :{}", c.name, c.name))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// `SELECT c1, c2 FROM t` — no filter; the repository appends WHERE per call.
pub(crate) fn select_template(table: &str, columns: &[&'static ColumnDef]) -> String {
    let column_list = columns
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ");

    format!("SELECT {} FROM {}", column_list, table)
}

/// `INSERT INTO t (c1, c2) VALUES (:c1, :c2)` over non-generated columns.
pub(crate) fn insert_template(table: &str, insertable: &[&'static ColumnDef]) -> String {
    let column_list = insertable
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ");
    let parameter_list = insertable
        .iter()
        .map(|c| format!(":{}", c.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table, column_list, parameter_list
    )
}

/// `UPDATE t SET nk = :nk WHERE pk = :pk AND ...` — sets every non-key
/// column, filters by the full primary key.
pub(crate) fn update_template(
    table: &str,
    non_key: &[&'static ColumnDef],
    primary_key: &[&'static ColumnDef],
) -> String {
    let set_list = non_key
        .iter()
        .map(|c| format!("{} = :{}", c.name, c.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {}",
        table,
        set_list,
        eq_conjunction(primary_key)
    )
}

/// `DELETE FROM t WHERE pk = :pk AND ...`
pub(crate) fn delete_template(table: &str, primary_key: &[&'static ColumnDef]) -> String {
    format!("DELETE FROM {} WHERE {}", table, eq_conjunction(primary_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{ColumnDef, ColumnType};

    const ID: ColumnDef = ColumnDef::new("id", ColumnType::Integer)
        .primary_key()
        .generated();
    const NAME: ColumnDef = ColumnDef::new("name", ColumnType::Text);
    const STAMP: ColumnDef = ColumnDef::new("stamp", ColumnType::Timestamp).generated();

    #[test]
    fn test_select_lists_all_columns_without_filter() {
        let sql = select_template("things", &[&ID, &NAME, &STAMP]);
        assert_eq!(sql, "SELECT id, name, stamp FROM things");
    }

    #[test]
    fn test_insert_over_given_columns_only() {
        let sql = insert_template("things", &[&NAME]);
        assert_eq!(sql, "INSERT INTO things (name) VALUES (:name)");
    }

    #[test]
    fn test_update_sets_non_key_and_filters_by_key() {
        let sql = update_template("things", &[&NAME, &STAMP], &[&ID]);
        assert_eq!(
            sql,
            "UPDATE things SET name = :name, stamp = :stamp WHERE id = :id"
        );
    }

    #[test]
    fn test_delete_filters_by_full_key() {
        const A: ColumnDef = ColumnDef::new("a", ColumnType::Integer).primary_key();
        const B: ColumnDef = ColumnDef::new("b", ColumnType::Integer).primary_key();

        let sql = delete_template("pairs", &[&A, &B]);
        assert_eq!(sql, "DELETE FROM pairs WHERE a = :a AND b = :b");
    }
}
