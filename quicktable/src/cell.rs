//! Cell facades: single-cell and cell-collection views over a bound table.

use crate::html::strip_html;
use crate::id::{CellId, ColumnId, RowId};
use crate::iter::Iterable;
use crate::table::QuickTable;
use crate::value::Value;

/// A view of one cell position. Holds no state of its own; everything is
/// derived live from the bound table.
#[derive(Debug, Clone)]
pub struct Cell {
    table: QuickTable,
    id: CellId,
}

impl Cell {
    pub(crate) fn new(table: QuickTable, id: CellId) -> Self {
        Self { table, id }
    }

    pub fn quick_table(&self) -> &QuickTable {
        &self.table
    }

    pub fn cell_id(&self) -> CellId {
        self.id
    }

    pub fn row_id(&self) -> RowId {
        self.id.row_id()
    }

    pub fn column_id(&self) -> ColumnId {
        self.id.column_id()
    }

    pub fn row_index(&self) -> usize {
        self.id.row_index()
    }

    pub fn column_index(&self) -> usize {
        self.id.column_index()
    }

    pub fn is_head(&self) -> bool {
        self.id.is_head()
    }

    pub fn row(&self) -> Option<crate::row::Row> {
        self.table.row(self.row_id(), self.is_head())
    }

    pub fn column(&self) -> Option<crate::column::Column> {
        self.table.column(self.column_id())
    }

    /// Visible text of the cell. HTML content yields its markup-stripped
    /// text.
    pub fn text_data(&self) -> String {
        let section = self.row_id().section();
        self.table
            .element()
            .content(section, self.row_index(), self.column_index())
            .map(|content| {
                if content.is_html() {
                    strip_html(content.raw())
                } else {
                    content.raw().to_string()
                }
            })
            .unwrap_or_default()
    }

    /// Set plain-text content. Out-of-range positions are a silent no-op.
    pub fn set_text_data(&self, text: impl Into<String>) {
        let section = self.row_id().section();
        self.table
            .element()
            .set_text(section, self.row_index(), self.column_index(), text);
    }

    /// Raw content of the cell; for HTML cells this is the markup itself.
    pub fn html_data(&self) -> String {
        let section = self.row_id().section();
        self.table
            .element()
            .text(section, self.row_index(), self.column_index())
            .unwrap_or_default()
    }

    /// Set raw HTML content. Out-of-range positions are a silent no-op.
    pub fn set_html_data(&self, html: impl Into<String>) {
        let section = self.row_id().section();
        self.table
            .element()
            .set_html(section, self.row_index(), self.column_index(), html);
    }

    /// The untransformed structured value for this position, preferring the
    /// sorted data row over the literal cell content.
    pub fn raw_data(&self) -> Option<Value> {
        if !self.is_head()
            && let Some((value, _)) = self
                .table
                .structured_cell_value(self.row_index(), self.column_index())
            && let Some(value) = value
        {
            return Some(value);
        }
        let section = self.row_id().section();
        self.table
            .element()
            .text(section, self.row_index(), self.column_index())
            .map(Value::String)
    }

    /// The display value for this position: the structured value transformed
    /// through the column definition (its own render function, else the
    /// registry render for the declared type), falling back to the cell's
    /// visible text when nothing structured covers the position.
    pub fn data(&self) -> String {
        if !self.is_head()
            && let Some((value, row)) = self
                .table
                .structured_cell_value(self.row_index(), self.column_index())
        {
            let defs = self.table.column_defs();
            if let Some(def) = defs.get(self.column_index()) {
                if let Some(render) = &def.render {
                    return render(value.as_ref(), &row);
                }
                return self
                    .table
                    .registry()
                    .render(def.type_name.as_deref(), &value.unwrap_or(Value::Null));
            }
            if let Some(value) = value {
                return value.display();
            }
        }
        self.text_data()
    }
}

/// Anything a cell collection can be built from: a bare identity, a single
/// facade, or another collection (flattened in order).
#[derive(Debug, Clone)]
pub enum CellPick {
    Id(CellId),
    One(Cell),
    Many(Cells),
}

impl CellPick {
    fn flatten(self) -> Vec<CellId> {
        match self {
            CellPick::Id(id) => vec![id],
            CellPick::One(cell) => vec![cell.cell_id()],
            CellPick::Many(cells) => cells.ids().to_vec(),
        }
    }
}

impl From<CellId> for CellPick {
    fn from(id: CellId) -> Self {
        CellPick::Id(id)
    }
}

impl From<Cell> for CellPick {
    fn from(cell: Cell) -> Self {
        CellPick::One(cell)
    }
}

impl From<Cells> for CellPick {
    fn from(cells: Cells) -> Self {
        CellPick::Many(cells)
    }
}

/// A collection of cell identities bound to one table.
#[derive(Debug, Clone)]
pub struct Cells {
    table: QuickTable,
    ids: Vec<CellId>,
}

impl Cells {
    pub(crate) fn from_ids(table: QuickTable, ids: Vec<CellId>) -> Self {
        Self { table, ids }
    }

    /// Build from any mix of identities, single facades and collections.
    pub fn from_picks(table: QuickTable, picks: impl IntoIterator<Item = CellPick>) -> Self {
        let ids = picks.into_iter().flat_map(CellPick::flatten).collect();
        Self { table, ids }
    }

    pub fn quick_table(&self) -> &QuickTable {
        &self.table
    }

    pub fn ids(&self) -> &[CellId] {
        &self.ids
    }

    /// Resolve the identities into facades, dropping positions that do not
    /// exist in the bound table.
    pub fn cells(&self) -> Vec<Cell> {
        self.ids
            .iter()
            .filter_map(|id| self.table.cell_by_id(*id))
            .collect()
    }

    pub fn text_data(&self) -> Vec<String> {
        self.cells().iter().map(Cell::text_data).collect()
    }

    pub fn html_data(&self) -> Vec<String> {
        self.cells().iter().map(Cell::html_data).collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Iterable for Cells {
    type Item = Cell;

    fn items(&self) -> Vec<Cell> {
        self.cells()
    }

    fn remake(&self, items: Vec<Cell>) -> Self {
        Self::from_ids(
            self.table.clone(),
            items.into_iter().map(|c| c.cell_id()).collect(),
        )
    }
}
