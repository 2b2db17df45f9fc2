//! Identity keys for columns, rows and cells.
//!
//! Identities are plain value types: two ids built for the same position are
//! equal and hash identically, so they serve as stable lookup keys without a
//! process-wide interning table. The free constructors accept either raw
//! indices or already-resolved identities and never fail; validity against an
//! actual table is checked by the entity facades.

use std::fmt;

pub use tabledom::Section;

/// Identifies a column by zero-based index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(usize);

impl ColumnId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColumnId[{}]", self.0)
    }
}

/// Identifies a row by zero-based index plus the section it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId {
    index: usize,
    section: Section,
}

impl RowId {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn section(self) -> Section {
        self.section
    }

    pub fn is_head(self) -> bool {
        self.section.is_head()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowId[{}:{}]", self.section, self.index)
    }
}

/// Identifies a cell as the pair of a row identity and a column identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    row: RowId,
    column: ColumnId,
}

impl CellId {
    pub fn row_id(self) -> RowId {
        self.row
    }

    pub fn column_id(self) -> ColumnId {
        self.column
    }

    pub fn row_index(self) -> usize {
        self.row.index()
    }

    pub fn is_head(self) -> bool {
        self.row.is_head()
    }

    pub fn column_index(self) -> usize {
        self.column.index()
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CellId[{}:{}, {}]",
            self.row.section(),
            self.row.index(),
            self.column.index()
        )
    }
}

/// Column selector: a raw index or a resolved identity.
#[derive(Debug, Clone, Copy)]
pub enum ColumnSel {
    Index(usize),
    Id(ColumnId),
}

impl From<usize> for ColumnSel {
    fn from(index: usize) -> Self {
        ColumnSel::Index(index)
    }
}

impl From<ColumnId> for ColumnSel {
    fn from(id: ColumnId) -> Self {
        ColumnSel::Id(id)
    }
}

/// Row selector: a raw index or a resolved identity.
#[derive(Debug, Clone, Copy)]
pub enum RowSel {
    Index(usize),
    Id(RowId),
}

impl From<usize> for RowSel {
    fn from(index: usize) -> Self {
        RowSel::Index(index)
    }
}

impl From<RowId> for RowSel {
    fn from(id: RowId) -> Self {
        RowSel::Id(id)
    }
}

/// Cell row selector: a row index, a row identity, or a full cell identity
/// (which passes through `cell_id` untouched).
#[derive(Debug, Clone, Copy)]
pub enum CellSel {
    Row(RowSel),
    Cell(CellId),
}

impl From<usize> for CellSel {
    fn from(index: usize) -> Self {
        CellSel::Row(RowSel::Index(index))
    }
}

impl From<RowId> for CellSel {
    fn from(id: RowId) -> Self {
        CellSel::Row(RowSel::Id(id))
    }
}

impl From<CellId> for CellSel {
    fn from(id: CellId) -> Self {
        CellSel::Cell(id)
    }
}

/// Resolve a column identity. Idempotent for already-resolved ids.
pub fn column_id(column: impl Into<ColumnSel>) -> ColumnId {
    match column.into() {
        ColumnSel::Index(index) => ColumnId(index),
        ColumnSel::Id(id) => id,
    }
}

/// Resolve a row identity. An existing id passes through unless `is_head`
/// asks for the head section and the id names a body row, in which case the
/// identity is re-keyed to the head section at the same index.
pub fn row_id(row: impl Into<RowSel>, is_head: bool) -> RowId {
    let index = match row.into() {
        RowSel::Id(id) => {
            if !is_head || id.is_head() {
                return id;
            }
            id.index()
        }
        RowSel::Index(index) => index,
    };
    RowId {
        index,
        section: if is_head { Section::Head } else { Section::Body },
    }
}

/// Resolve a cell identity. An existing `CellId` passes through, ignoring the
/// other arguments.
pub fn cell_id(row: impl Into<CellSel>, column: impl Into<ColumnSel>, is_head: bool) -> CellId {
    match row.into() {
        CellSel::Cell(id) => id,
        CellSel::Row(row) => CellId {
            row: row_id(row, is_head),
            column: column_id(column),
        },
    }
}
