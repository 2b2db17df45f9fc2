//! Row facades.

use crate::cell::{Cell, Cells};
use crate::events::{self, EventArgs};
use crate::id::{self, CellId, ColumnId, ColumnSel, RowId};
use crate::iter::Iterable;
use crate::table::QuickTable;
use crate::value::RowData;

/// A view of one row. Length and content are read live from the bound table,
/// never cached across structural changes.
#[derive(Debug, Clone)]
pub struct Row {
    table: QuickTable,
    id: RowId,
}

impl Row {
    pub(crate) fn new(table: QuickTable, id: RowId) -> Self {
        Self { table, id }
    }

    pub fn quick_table(&self) -> &QuickTable {
        &self.table
    }

    pub fn row_id(&self) -> RowId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.id.index()
    }

    pub fn is_head(&self) -> bool {
        self.id.is_head()
    }

    /// Number of cell elements actually present under this row right now.
    pub fn len(&self) -> usize {
        self.table.element().cell_count(self.id.section(), self.id.index())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell facade for a column of this row; `None` out of range.
    pub fn cell(&self, column: impl Into<ColumnSel>) -> Option<Cell> {
        let column = id::column_id(column);
        if column.index() >= self.len() {
            return None;
        }
        Some(Cell::new(self.table.clone(), self.cell_id(column)))
    }

    pub fn cell_id(&self, column: impl Into<ColumnSel>) -> CellId {
        id::cell_id(self.id, column, self.is_head())
    }

    pub fn cell_ids(&self) -> Vec<CellId> {
        (0..self.len()).map(|i| self.cell_id(i)).collect()
    }

    pub fn cells(&self) -> Cells {
        Cells::from_ids(self.table.clone(), self.cell_ids())
    }

    pub fn cell_text_data(&self) -> Vec<String> {
        self.cells().text_data()
    }

    pub fn cell_html_data(&self) -> Vec<String> {
        self.cells().html_data()
    }

    /// The raw data row at this index when one is stored, else the literal
    /// cell contents.
    pub fn data(&self) -> RowData {
        if !self.is_head() {
            let raw = self.table.raw_data();
            if let Some(row) = raw.get(self.index()) {
                return row.clone();
            }
        }
        RowData::Fields(self.cell_html_data())
    }

    pub fn visible(&self) -> bool {
        self.table.element().row_visible(self.id.section(), self.id.index())
    }

    /// Toggle row visibility, firing `row.visible` on the owning table with
    /// the old and new values.
    pub fn set_visible(&self, visible: bool) {
        let old_value = self.visible();
        self.table
            .element()
            .set_row_visible(self.id.section(), self.id.index(), visible);
        self.table.trigger(
            events::ROW_VISIBLE,
            &EventArgs::RowVisible {
                row_id: self.id,
                old_value,
                new_value: visible,
            },
        );
    }
}

/// A collection of row identities bound to one table.
#[derive(Debug, Clone)]
pub struct Rows {
    table: QuickTable,
    ids: Vec<RowId>,
}

impl Rows {
    pub(crate) fn from_ids(table: QuickTable, ids: Vec<RowId>) -> Self {
        Self { table, ids }
    }

    pub fn quick_table(&self) -> &QuickTable {
        &self.table
    }

    pub fn ids(&self) -> &[RowId] {
        &self.ids
    }

    /// Resolve into facades, dropping rows not present in the bound table.
    pub fn rows(&self) -> Vec<Row> {
        self.ids
            .iter()
            .filter_map(|id| self.table.row(*id, id.is_head()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// One cell identity per row, at the given column.
    pub fn column_cell_ids(&self, column: impl Into<ColumnSel>) -> Vec<CellId> {
        let column: ColumnId = id::column_id(column);
        self.rows().iter().map(|r| r.cell_id(column)).collect()
    }

    pub fn column_cells(&self, column: impl Into<ColumnSel>) -> Cells {
        Cells::from_ids(self.table.clone(), self.column_cell_ids(column))
    }

    pub fn cell_ids(&self) -> Vec<CellId> {
        self.rows().iter().flat_map(|r| r.cell_ids()).collect()
    }

    pub fn cells(&self) -> Cells {
        Cells::from_ids(self.table.clone(), self.cell_ids())
    }

    pub fn cell_text_data(&self) -> Vec<Vec<String>> {
        self.rows().iter().map(Row::cell_text_data).collect()
    }

    pub fn cell_html_data(&self) -> Vec<Vec<String>> {
        self.rows().iter().map(Row::cell_html_data).collect()
    }

    pub fn data(&self) -> Vec<RowData> {
        self.rows().iter().map(Row::data).collect()
    }

    pub fn set_visible(&self, visible: bool) {
        for row in self.rows() {
            row.set_visible(visible);
        }
    }
}

impl Iterable for Rows {
    type Item = Row;

    fn items(&self) -> Vec<Row> {
        self.rows()
    }

    fn remake(&self, items: Vec<Row>) -> Self {
        Self::from_ids(
            self.table.clone(),
            items.into_iter().map(|r| r.row_id()).collect(),
        )
    }
}
