//! Column projection for [`crate::types::Table`].

use crate::types::Table;

/// Narrow `table` in place to the columns in `names`, in the order requested.
///
/// This is the in-place counterpart of [`Table::project`]: names not present are skipped,
/// an empty request yields a zero-column table, and the row count never changes.
pub fn project(table: &mut Table, names: &[&str]) {
    *table = table.project(names);
}
