//! Table mutation errors.

/// Shape errors raised by `set_data` / `set_column_defs`.
///
/// These are caller-recoverable: the table's prior state is preserved, so the
/// caller can catch, correct the input and retry. Out-of-range lookups are
/// not errors; they resolve to `None`/empty collections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("data rows must be field arrays when no column definitions are set")]
    RowsNotArrays,

    #[error(
        "one or more data rows had a size below the column count of {column_count}; minimum data row size: {min_row_len}"
    )]
    RowTooShort {
        column_count: usize,
        min_row_len: usize,
    },

    #[error("not enough column definitions: have {column_count} columns, but only {def_count} definitions")]
    NotEnoughColumnDefs {
        column_count: usize,
        def_count: usize,
    },
}
