use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::node::{CellKind, CellNode, ClickFn, Content, RowNode, Section};

#[derive(Default)]
struct TableInner {
    head: Vec<RowNode>,
    body: Vec<RowNode>,
    attachments: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl TableInner {
    fn section(&self, section: Section) -> &Vec<RowNode> {
        match section {
            Section::Head => &self.head,
            Section::Body => &self.body,
        }
    }

    fn section_mut(&mut self, section: Section) -> &mut Vec<RowNode> {
        match section {
            Section::Head => &mut self.head,
            Section::Body => &mut self.body,
        }
    }

    fn cell(&self, section: Section, row: usize, col: usize) -> Option<&CellNode> {
        self.section(section).get(row).and_then(|r| r.cells.get(col))
    }

    fn cell_mut(&mut self, section: Section, row: usize, col: usize) -> Option<&mut CellNode> {
        self.section_mut(section)
            .get_mut(row)
            .and_then(|r| r.cells.get_mut(col))
    }
}

/// A table element tree: a head and a body section of rows of cells, plus an
/// attachment slot for arbitrary per-element associated values.
///
/// `TableElement` is a cheap-to-clone handle; all clones share the same
/// underlying tree.
#[derive(Clone, Default)]
pub struct TableElement {
    inner: Arc<RwLock<TableInner>>,
}

impl TableElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table with a single header row from the given column titles.
    pub fn with_columns<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        let table = Self::new();
        let row = RowNode::new().cells(
            columns
                .into_iter()
                .map(|c| CellNode::header().text(c.into())),
        );
        table.append_row(Section::Head, row);
        table
    }

    fn read<R>(&self, f: impl FnOnce(&TableInner) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut TableInner) -> R) -> R {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(mut poisoned) => f(poisoned.get_mut()),
        }
    }

    // -------------------------------------------------------------------------
    // Structure reads
    // -------------------------------------------------------------------------

    pub fn row_count(&self, section: Section) -> usize {
        self.read(|t| t.section(section).len())
    }

    pub fn cell_count(&self, section: Section, row: usize) -> usize {
        self.read(|t| t.section(section).get(row).map(|r| r.cells.len()).unwrap_or(0))
    }

    /// Cell count of the first row anywhere in the table (head first).
    pub fn first_row_cell_count(&self) -> usize {
        self.read(|t| {
            t.head
                .first()
                .or_else(|| t.body.first())
                .map(|r| r.cells.len())
                .unwrap_or(0)
        })
    }

    pub fn content(&self, section: Section, row: usize, col: usize) -> Option<Content> {
        self.read(|t| t.cell(section, row, col).map(|c| c.content.clone()))
    }

    /// Raw content string of a cell. For Html cells this is the markup.
    pub fn text(&self, section: Section, row: usize, col: usize) -> Option<String> {
        self.content(section, row, col).map(|c| c.raw().to_string())
    }

    pub fn cell_kind(&self, section: Section, row: usize, col: usize) -> Option<CellKind> {
        self.read(|t| t.cell(section, row, col).map(|c| c.kind))
    }

    pub fn cell_css_classes(&self, section: Section, row: usize, col: usize) -> Vec<String> {
        self.read(|t| {
            t.cell(section, row, col)
                .map(|c| c.css_classes.clone())
                .unwrap_or_default()
        })
    }

    // -------------------------------------------------------------------------
    // Content writes
    // -------------------------------------------------------------------------

    /// Set plain-text content. Returns false when the cell does not exist.
    pub fn set_text(&self, section: Section, row: usize, col: usize, text: impl Into<String>) -> bool {
        self.write(|t| match t.cell_mut(section, row, col) {
            Some(cell) => {
                cell.content = Content::Text(text.into());
                true
            }
            None => false,
        })
    }

    /// Set raw HTML content. Returns false when the cell does not exist.
    pub fn set_html(&self, section: Section, row: usize, col: usize, html: impl Into<String>) -> bool {
        self.write(|t| match t.cell_mut(section, row, col) {
            Some(cell) => {
                cell.content = Content::Html(html.into());
                true
            }
            None => false,
        })
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn row_visible(&self, section: Section, row: usize) -> bool {
        self.read(|t| t.section(section).get(row).map(|r| r.visible).unwrap_or(false))
    }

    pub fn set_row_visible(&self, section: Section, row: usize, visible: bool) -> bool {
        self.write(|t| match t.section_mut(section).get_mut(row) {
            Some(r) => {
                r.visible = visible;
                true
            }
            None => false,
        })
    }

    pub fn cell_visible(&self, section: Section, row: usize, col: usize) -> bool {
        self.read(|t| t.cell(section, row, col).map(|c| c.visible).unwrap_or(false))
    }

    pub fn set_cell_visible(&self, section: Section, row: usize, col: usize, visible: bool) -> bool {
        self.write(|t| match t.cell_mut(section, row, col) {
            Some(cell) => {
                cell.visible = visible;
                true
            }
            None => false,
        })
    }

    /// A column is visible when any of its cells (either section) is visible.
    pub fn column_visible(&self, col: usize) -> bool {
        self.read(|t| {
            t.head
                .iter()
                .chain(t.body.iter())
                .filter_map(|r| r.cells.get(col))
                .any(|c| c.visible)
        })
    }

    /// Toggle every cell at the given column index, both sections.
    pub fn set_column_visible(&self, col: usize, visible: bool) {
        self.write(|t| {
            for row in t.head.iter_mut().chain(t.body.iter_mut()) {
                if let Some(cell) = row.cells.get_mut(col) {
                    cell.visible = visible;
                }
            }
        });
    }

    // -------------------------------------------------------------------------
    // Structure writes
    // -------------------------------------------------------------------------

    pub fn append_row(&self, section: Section, row: RowNode) {
        log::trace!("[dom] append {} row with {} cells", section, row.cells.len());
        self.write(|t| t.section_mut(section).push(row));
    }

    pub fn empty_section(&self, section: Section) {
        log::trace!("[dom] empty {} section", section);
        self.write(|t| t.section_mut(section).clear());
    }

    // -------------------------------------------------------------------------
    // Click handling
    // -------------------------------------------------------------------------

    pub fn set_click(&self, section: Section, row: usize, col: usize, handler: Option<ClickFn>) -> bool {
        self.write(|t| match t.cell_mut(section, row, col) {
            Some(cell) => {
                cell.click = handler;
                true
            }
            None => false,
        })
    }

    /// Simulate a click on a cell, invoking its handler synchronously.
    ///
    /// Hidden rows and cells are not interactive: clicking them is a no-op.
    /// Returns true when a handler ran.
    pub fn click(&self, section: Section, row: usize, col: usize) -> bool {
        let handler = self.read(|t| {
            let row_visible = t.section(section).get(row).map(|r| r.visible).unwrap_or(false);
            if !row_visible {
                return None;
            }
            t.cell(section, row, col)
                .filter(|c| c.visible)
                .and_then(|c| c.click.clone())
        });
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Attachments
    // -------------------------------------------------------------------------

    /// Store an arbitrary associated value under a key.
    pub fn attach(&self, key: impl Into<String>, value: Arc<dyn Any + Send + Sync>) {
        self.write(|t| {
            t.attachments.insert(key.into(), value);
        });
    }

    /// Fetch an associated value by key, downcast to the expected type.
    pub fn attachment<T: Send + Sync + 'static>(&self, key: &str) -> Option<Arc<T>> {
        self.read(|t| {
            t.attachments
                .get(key)
                .cloned()
                .and_then(|a| a.downcast::<T>().ok())
        })
    }

    /// Snapshot of a section's rows, for rendering and tests.
    pub fn rows(&self, section: Section) -> Vec<RowNode> {
        self.read(|t| t.section(section).clone())
    }
}

impl std::fmt::Debug for TableElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.read(|t| {
            f.debug_struct("TableElement")
                .field("head_rows", &t.head.len())
                .field("body_rows", &t.body.len())
                .finish()
        })
    }
}
