pub mod cell;
pub mod column;
pub mod error;
pub mod events;
pub mod filter;
pub mod html;
pub mod id;
pub mod iter;
pub mod row;
pub mod table;
pub mod types;
pub mod value;

pub use cell::{Cell, CellPick, Cells};
pub use column::{Column, Columns};
pub use error::TableError;
pub use events::{EventArgs, EventEmitter};
pub use filter::{FilterOptions, FilterPattern};
pub use html::strip_html;
pub use id::{CellId, ColumnId, RowId, Section, cell_id, column_id, row_id};
pub use iter::{Iterable, Partition};
pub use row::{Row, Rows};
pub use table::{Binder, ClickEvent, ColumnDef, QuickTable, QuickTables, SortDirection};
pub use types::{TypeDefinition, TypeRegistry};
pub use value::{Record, RowData, Value, rows_from_json};

pub mod prelude {
    pub use crate::cell::{Cell, CellPick, Cells};
    pub use crate::column::{Column, Columns};
    pub use crate::error::TableError;
    pub use crate::events::{self, EventArgs, EventEmitter};
    pub use crate::filter::{FilterOptions, FilterPattern};
    pub use crate::html::strip_html;
    pub use crate::id::{CellId, ColumnId, RowId, Section, cell_id, column_id, row_id};
    pub use crate::iter::{Iterable, Partition};
    pub use crate::row::{Row, Rows};
    pub use crate::table::{
        Binder, ClickEvent, ColumnDef, QuickTable, QuickTables, SortDirection, When,
    };
    pub use crate::types::{TypeDefinition, TypeRegistry, default_compare};
    pub use crate::value::{Record, RowData, Value, rows_from_json};

    pub use tabledom::{CellKind, TableElement};
}
