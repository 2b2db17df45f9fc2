//! Column definitions, sort directions and click payloads.

use std::fmt;
use std::sync::Arc;

use tabledom::CellKind;

use crate::id::CellId;
use crate::value::{RowData, Value};

/// Renders a cell: receives the extracted field value (if any) and the full
/// data row.
pub type CellRenderFn = Arc<dyn Fn(Option<&Value>, &RowData) -> String + Send + Sync>;

/// Handler invoked when a rendered data cell is clicked.
pub type ClickHandlerFn = Arc<dyn Fn(&ClickEvent) + Send + Sync>;

/// Payload passed to a table's click handler: the clicked cell, the resolved
/// field value, the full data row and its position in the sorted data.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub cell: CellId,
    pub value: Option<Value>,
    pub row: RowData,
    pub index: usize,
}

/// Per-column rendering configuration, supplied wholesale by the caller.
#[derive(Clone, Default)]
pub struct ColumnDef {
    /// Element kind for the rendered cell.
    pub cell_kind: CellKind,
    /// Record field key to extract.
    pub field: Option<String>,
    /// Logical type name, resolved through the type registry.
    pub type_name: Option<String>,
    /// Custom render function, applied over the extracted field value.
    pub render: Option<CellRenderFn>,
    /// Inject the rendered output as raw HTML instead of text.
    pub html: bool,
    /// CSS class added to the rendered cell.
    pub css_class: Option<String>,
}

impl ColumnDef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render as a header cell instead of a data cell.
    pub fn header_cell(mut self) -> Self {
        self.cell_kind = CellKind::Header;
        self
    }

    pub fn field(mut self, key: impl Into<String>) -> Self {
        self.field = Some(key.into());
        self
    }

    pub fn type_name(mut self, name: impl Into<String>) -> Self {
        self.type_name = Some(name.into());
        self
    }

    pub fn render(mut self, f: impl Fn(Option<&Value>, &RowData) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn html(mut self) -> Self {
        self.html = true;
        self
    }

    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("cell_kind", &self.cell_kind)
            .field("field", &self.field)
            .field("type_name", &self.type_name)
            .field("render", &self.render.is_some())
            .field("html", &self.html)
            .field("css_class", &self.css_class)
            .finish()
    }
}

/// Sort direction for one entry of the sort-order stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn is_descending(self) -> bool {
        matches!(self, SortDirection::Descending)
    }
}
