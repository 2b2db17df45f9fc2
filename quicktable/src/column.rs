//! Column facades.

use crate::cell::{Cell, Cells};
use crate::events::{self, EventArgs, EventEmitter};
use crate::filter::FilterOptions;
use crate::id::{self, CellId, ColumnId, RowSel};
use crate::iter::Iterable;
use crate::table::QuickTable;

/// A view of one column. Carries the column's event emitter, which survives
/// repeated lookups (handlers registered through any facade for this column
/// fire for all of them) and forwards `column.visible` to the owning table.
#[derive(Debug, Clone)]
pub struct Column {
    table: QuickTable,
    id: ColumnId,
    emitter: EventEmitter,
}

impl Column {
    pub(crate) fn new(table: QuickTable, id: ColumnId) -> Self {
        let emitter = table.column_emitter(id);
        Self { table, id, emitter }
    }

    pub fn quick_table(&self) -> &QuickTable {
        &self.table
    }

    pub fn column_id(&self) -> ColumnId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.id.index()
    }

    /// Register a handler on this column's emitter.
    pub fn on(&self, event: impl Into<String>, handler: impl Fn(&EventArgs) + Send + Sync + 'static) -> &Self {
        self.emitter.on(event, handler);
        self
    }

    /// True when any of this column's cells is visible.
    pub fn visible(&self) -> bool {
        self.table.element().column_visible(self.index())
    }

    /// Toggle every cell of the column, firing `column.visible` with the old
    /// and new values (forwarded to the owning table).
    pub fn set_visible(&self, visible: bool) {
        let old_value = self.visible();
        self.table.element().set_column_visible(self.index(), visible);
        self.emitter.trigger(
            events::COLUMN_VISIBLE,
            &EventArgs::ColumnVisible {
                column_id: self.id,
                old_value,
                new_value: visible,
            },
        );
    }

    pub fn cell(&self, row: impl Into<RowSel>, is_head: bool) -> Option<Cell> {
        self.table.row(row, is_head).and_then(|r| r.cell(self.id))
    }

    pub fn header_cell(&self, row: impl Into<RowSel>) -> Option<Cell> {
        self.cell(row, true)
    }

    pub fn cell_id(&self, row: impl Into<RowSel>, is_head: bool) -> CellId {
        id::cell_id(id::row_id(row, is_head), self.id, is_head)
    }

    pub fn header_cell_ids(&self) -> Vec<CellId> {
        (0..self.table.header_row_count())
            .map(|r| self.cell_id(r, true))
            .collect()
    }

    pub fn body_cell_ids(&self) -> Vec<CellId> {
        (0..self.table.row_count())
            .map(|r| self.cell_id(r, false))
            .collect()
    }

    pub fn cell_ids(&self) -> Vec<CellId> {
        let mut ids = self.header_cell_ids();
        ids.extend(self.body_cell_ids());
        ids
    }

    pub fn header_cells(&self) -> Cells {
        Cells::from_ids(self.table.clone(), self.header_cell_ids())
    }

    pub fn body_cells(&self) -> Cells {
        Cells::from_ids(self.table.clone(), self.body_cell_ids())
    }

    pub fn cells(&self) -> Cells {
        Cells::from_ids(self.table.clone(), self.cell_ids())
    }

    /// Compile a filter pattern into this column's slot (smart mode,
    /// case-insensitive). Returns true when a filter is now active.
    pub fn set_filter(&self, pattern: &str) -> bool {
        self.table.set_filter(self.id, pattern)
    }

    pub fn set_filter_with(&self, pattern: &str, options: FilterOptions) -> bool {
        self.table.set_filter_with(self.id, pattern, options)
    }

    pub fn clear_filter(&self) {
        self.table.clear_filter(self.id);
    }
}

/// A collection of column identities bound to one table.
#[derive(Debug, Clone)]
pub struct Columns {
    table: QuickTable,
    ids: Vec<ColumnId>,
}

impl Columns {
    pub(crate) fn from_ids(table: QuickTable, ids: Vec<ColumnId>) -> Self {
        Self { table, ids }
    }

    pub fn quick_table(&self) -> &QuickTable {
        &self.table
    }

    pub fn ids(&self) -> &[ColumnId] {
        &self.ids
    }

    /// Resolve into facades, dropping out-of-range columns.
    pub fn columns(&self) -> Vec<Column> {
        self.ids
            .iter()
            .filter_map(|id| self.table.column(*id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn header_cell_ids(&self) -> Vec<CellId> {
        self.columns().iter().flat_map(|c| c.header_cell_ids()).collect()
    }

    pub fn body_cell_ids(&self) -> Vec<CellId> {
        self.columns().iter().flat_map(|c| c.body_cell_ids()).collect()
    }

    pub fn cell_ids(&self) -> Vec<CellId> {
        self.columns().iter().flat_map(|c| c.cell_ids()).collect()
    }

    pub fn header_cells(&self) -> Cells {
        Cells::from_ids(self.table.clone(), self.header_cell_ids())
    }

    pub fn body_cells(&self) -> Cells {
        Cells::from_ids(self.table.clone(), self.body_cell_ids())
    }

    pub fn cells(&self) -> Cells {
        Cells::from_ids(self.table.clone(), self.cell_ids())
    }

    /// One cell per column of the given row.
    pub fn row_cells(&self, row: impl Into<RowSel>, is_head: bool) -> Cells {
        let row = id::row_id(row, is_head);
        let ids = self
            .columns()
            .iter()
            .map(|c| c.cell_id(row, is_head))
            .collect();
        Cells::from_ids(self.table.clone(), ids)
    }

    pub fn header_row_cells(&self, row: impl Into<RowSel>) -> Cells {
        self.row_cells(id::row_id(row, true), true)
    }

    pub fn set_visible(&self, visible: bool) {
        for column in self.columns() {
            column.set_visible(visible);
        }
    }
}

impl Iterable for Columns {
    type Item = Column;

    fn items(&self) -> Vec<Column> {
        self.columns()
    }

    fn remake(&self, items: Vec<Column>) -> Self {
        Self::from_ids(
            self.table.clone(),
            items.into_iter().map(|c| c.column_id()).collect(),
        )
    }
}
