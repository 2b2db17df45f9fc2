//! Null-safe conditional access to possibly-absent table positions.

use crate::cell::Cell;
use crate::column::Column;
use crate::id::{CellSel, ColumnSel, RowSel, row_id};
use crate::row::Row;
use crate::table::QuickTable;

/// Runs a closure only when the addressed column/row/cell resolves, yielding
/// `Some` of the closure's result.
#[derive(Debug, Clone)]
pub struct When {
    table: QuickTable,
}

impl When {
    pub(crate) fn new(table: QuickTable) -> Self {
        Self { table }
    }

    pub fn column<R>(&self, column: impl Into<ColumnSel>, f: impl FnOnce(Column) -> R) -> Option<R> {
        self.table.column(column).map(f)
    }

    pub fn row<R>(&self, row: impl Into<RowSel>, is_head: bool, f: impl FnOnce(Row) -> R) -> Option<R> {
        self.table.row(row, is_head).map(f)
    }

    pub fn header_row<R>(&self, row: impl Into<RowSel>, f: impl FnOnce(Row) -> R) -> Option<R> {
        self.row(row_id(row, true), true, f)
    }

    pub fn cell<R>(
        &self,
        row: impl Into<CellSel>,
        column: impl Into<ColumnSel>,
        is_head: bool,
        f: impl FnOnce(Cell) -> R,
    ) -> Option<R> {
        self.table.cell(row, column, is_head).map(f)
    }

    pub fn header_cell<R>(
        &self,
        row: impl Into<CellSel>,
        column: impl Into<ColumnSel>,
        f: impl FnOnce(Cell) -> R,
    ) -> Option<R> {
        self.cell(row, column, true, f)
    }
}
