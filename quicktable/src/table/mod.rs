//! The aggregate root: a table handle owning raw data, column definitions,
//! the sort-order stack, per-column filters and the draw pipeline.

mod binder;
mod def;
mod when;

pub use binder::{Binder, QuickTables};
pub use def::{CellRenderFn, ClickEvent, ClickHandlerFn, ColumnDef, SortDirection};
pub use when::When;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tabledom::{CellKind, CellNode, RowNode, Section, TableElement};

use crate::cell::Cell;
use crate::column::{Column, Columns};
use crate::error::TableError;
use crate::events::{self, EventArgs, EventEmitter};
use crate::filter::{FilterOptions, FilterPattern};
use crate::id::{self, CellId, CellSel, ColumnId, ColumnSel, RowId, RowSel};
use crate::iter::Iterable;
use crate::row::{Row, Rows};
use crate::types::TypeRegistry;
use crate::value::{RowData, Value};

struct TableState {
    element: TableElement,
    registry: TypeRegistry,
    emitter: EventEmitter,
    column_emitters: HashMap<ColumnId, EventEmitter>,
    column_defs: Vec<ColumnDef>,
    data: Vec<RowData>,
    /// Sorted copy of `data`; `None` when invalidated.
    sorted: Option<Vec<RowData>>,
    /// Most significant key first.
    sort_orders: Vec<(ColumnId, SortDirection)>,
    filters: HashMap<ColumnId, FilterPattern>,
    auto_draw: bool,
    clear_on_load: bool,
    loading: bool,
    loading_message: Option<String>,
    empty_message: Option<String>,
    id: Option<String>,
    click_handler: Option<ClickHandlerFn>,
    in_init: bool,
}

/// A table bound to one [`TableElement`]. Cheap to clone; clones share state.
///
/// Mutations are synchronous and atomic from the caller's perspective: shape
/// validation happens before any stored state changes, and no lock is held
/// while caller-supplied code (renderers, event handlers) runs.
#[derive(Clone)]
pub struct QuickTable {
    inner: Arc<RwLock<TableState>>,
}

impl QuickTable {
    pub(crate) fn create(element: TableElement, registry: TypeRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TableState {
                element,
                registry,
                emitter: EventEmitter::new(),
                column_emitters: HashMap::new(),
                column_defs: Vec::new(),
                data: Vec::new(),
                sorted: None,
                sort_orders: Vec::new(),
                filters: HashMap::new(),
                auto_draw: true,
                clear_on_load: false,
                loading: false,
                loading_message: None,
                empty_message: None,
                id: None,
                click_handler: None,
                in_init: false,
            })),
        }
    }

    pub(crate) fn run_init(&self, init: &dyn Fn(&QuickTable)) {
        self.write(|s| s.in_init = true);
        init(self);
        self.write(|s| s.in_init = false);
    }

    fn read<R>(&self, f: impl FnOnce(&TableState) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut TableState) -> R) -> R {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(mut poisoned) => f(poisoned.get_mut()),
        }
    }

    /// True when both handles point at the same table.
    pub fn same(&self, other: &QuickTable) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn element(&self) -> TableElement {
        self.read(|s| s.element.clone())
    }

    pub fn registry(&self) -> TypeRegistry {
        self.read(|s| s.registry.clone())
    }

    pub fn emitter(&self) -> EventEmitter {
        self.read(|s| s.emitter.clone())
    }

    /// Register a handler on the table's emitter.
    pub fn on(&self, event: impl Into<String>, handler: impl Fn(&EventArgs) + Send + Sync + 'static) -> &Self {
        self.emitter().on(event, handler);
        self
    }

    pub(crate) fn trigger(&self, event: &str, args: &EventArgs) {
        self.emitter().trigger(event, args);
    }

    /// The emitter for one column, created on first use with its
    /// `column.visible` event forwarded to the table emitter. Handlers
    /// registered through any facade of the column fire for all of them.
    pub(crate) fn column_emitter(&self, column: ColumnId) -> EventEmitter {
        if let Some(existing) = self.read(|s| s.column_emitters.get(&column).cloned()) {
            return existing;
        }
        let created = EventEmitter::new();
        created.forward(events::COLUMN_VISIBLE, &self.emitter());
        self.write(|s| s.column_emitters.entry(column).or_insert(created).clone())
    }

    /// Call a closure with this handle, then return the handle for chaining.
    pub fn chain(&self, f: impl FnOnce(&Self)) -> &Self {
        f(self);
        self
    }

    pub fn id(&self) -> Option<String> {
        self.read(|s| s.id.clone())
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.write(|s| s.id = Some(id.into()));
    }

    /// Null-safe conditional access to possibly-absent columns/rows/cells.
    pub fn when(&self) -> When {
        When::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Cell count of the first row anywhere in the bound table.
    pub fn column_count(&self) -> usize {
        self.element().first_row_cell_count()
    }

    pub fn get_row_count(&self, is_head: bool) -> usize {
        let section = if is_head { Section::Head } else { Section::Body };
        self.element().row_count(section)
    }

    pub fn row_count(&self) -> usize {
        self.get_row_count(false)
    }

    pub fn header_row_count(&self) -> usize {
        self.get_row_count(true)
    }

    pub fn column_ids(&self) -> Vec<ColumnId> {
        (0..self.column_count()).map(id::column_id).collect()
    }

    pub fn columns(&self) -> Columns {
        Columns::from_ids(self.clone(), self.column_ids())
    }

    /// Column facade; `None` out of range.
    pub fn column(&self, column: impl Into<ColumnSel>) -> Option<Column> {
        let column = id::column_id(column);
        if column.index() >= self.column_count() {
            return None;
        }
        Some(Column::new(self.clone(), column))
    }

    pub fn get_columns(&self, columns: impl IntoIterator<Item = impl Into<ColumnSel>>) -> Columns {
        Columns::from_ids(self.clone(), columns.into_iter().map(id::column_id).collect())
    }

    pub fn get_all_row_ids(&self, is_head: bool) -> Vec<RowId> {
        (0..self.get_row_count(is_head))
            .map(|i| id::row_id(i, is_head))
            .collect()
    }

    pub fn get_all_rows(&self, is_head: bool) -> Rows {
        Rows::from_ids(self.clone(), self.get_all_row_ids(is_head))
    }

    pub fn rows(&self) -> Rows {
        self.get_all_rows(false)
    }

    pub fn header_rows(&self) -> Rows {
        self.get_all_rows(true)
    }

    pub fn row_ids(&self) -> Vec<RowId> {
        self.get_all_row_ids(false)
    }

    pub fn header_row_ids(&self) -> Vec<RowId> {
        self.get_all_row_ids(true)
    }

    pub fn get_body_rows(&self, rows: impl IntoIterator<Item = impl Into<RowSel>>) -> Rows {
        Rows::from_ids(self.clone(), rows.into_iter().map(|r| id::row_id(r, false)).collect())
    }

    pub fn get_header_rows(&self, rows: impl IntoIterator<Item = impl Into<RowSel>>) -> Rows {
        Rows::from_ids(self.clone(), rows.into_iter().map(|r| id::row_id(r, true)).collect())
    }

    pub fn get_rows(&self, ids: impl IntoIterator<Item = RowId>) -> Rows {
        Rows::from_ids(self.clone(), ids.into_iter().collect())
    }

    /// Row facade; `None` out of range for the row's section.
    pub fn row(&self, row: impl Into<RowSel>, is_head: bool) -> Option<Row> {
        let row = id::row_id(row, is_head);
        if row.index() >= self.get_row_count(row.is_head()) {
            return None;
        }
        Some(Row::new(self.clone(), row))
    }

    pub fn header_row(&self, row: impl Into<RowSel>) -> Option<Row> {
        self.row(id::row_id(row, true), true)
    }

    pub fn cell(&self, row: impl Into<CellSel>, column: impl Into<ColumnSel>, is_head: bool) -> Option<Cell> {
        self.cell_by_id(id::cell_id(row, column, is_head))
    }

    pub fn header_cell(&self, row: impl Into<CellSel>, column: impl Into<ColumnSel>) -> Option<Cell> {
        self.cell(row, column, true)
    }

    pub(crate) fn cell_by_id(&self, cell: CellId) -> Option<Cell> {
        self.row(cell.row_id(), cell.is_head())
            .and_then(|r| r.cell(cell.column_id()))
    }

    pub fn cell_text_data(&self) -> Vec<Vec<String>> {
        self.rows().cell_text_data()
    }

    pub fn cell_html_data(&self) -> Vec<Vec<String>> {
        self.rows().cell_html_data()
    }

    // -------------------------------------------------------------------------
    // Data & column definitions
    // -------------------------------------------------------------------------

    /// The stored raw rows, unsorted.
    pub fn raw_data(&self) -> Vec<RowData> {
        self.read(|s| s.data.clone())
    }

    /// The stored rows when any, else the current cell text as rows.
    pub fn data(&self) -> Vec<RowData> {
        let raw = self.raw_data();
        if !raw.is_empty() {
            return raw;
        }
        self.cell_text_data().into_iter().map(RowData::Fields).collect()
    }

    /// Replace the raw data. Shape validation runs before any mutation, so a
    /// rejected assignment leaves the previous data untouched. An empty
    /// vector clears the table (the empty/loading message renders instead).
    pub fn set_data(&self, rows: Vec<RowData>) -> Result<(), TableError> {
        if rows.is_empty() {
            self.write(|s| {
                s.data.clear();
                s.sorted = None;
            });
            if self.auto_draw() {
                self.draw();
            }
            return Ok(());
        }

        let column_count = self.column_count();
        let def_count = self.read(|s| s.column_defs.len());
        if def_count == 0 {
            if rows.iter().any(|r| !r.is_fields()) {
                return Err(TableError::RowsNotArrays);
            }
            let min_row_len = rows.iter().map(RowData::len).min().unwrap_or(0);
            if min_row_len < column_count {
                return Err(TableError::RowTooShort {
                    column_count,
                    min_row_len,
                });
            }
        } else if def_count < column_count {
            return Err(TableError::NotEnoughColumnDefs {
                column_count,
                def_count,
            });
        }

        self.write(|s| {
            s.data = rows;
            s.sorted = None;
        });
        if self.auto_draw() {
            self.sort_data(false);
            self.draw();
        }
        Ok(())
    }

    pub fn clear_data(&self) {
        // Empty data never fails validation.
        let _ = self.set_data(Vec::new());
    }

    pub fn column_defs(&self) -> Vec<ColumnDef> {
        self.read(|s| s.column_defs.clone())
    }

    /// Replace the column definitions wholesale. Does not invalidate the
    /// sorted cache by itself; sorting reads the definitions current at sort
    /// time.
    pub fn set_column_defs(&self, defs: Vec<ColumnDef>) -> Result<(), TableError> {
        let column_count = self.column_count();
        if defs.len() < column_count {
            return Err(TableError::NotEnoughColumnDefs {
                column_count,
                def_count: defs.len(),
            });
        }
        self.write(|s| s.column_defs = defs);
        if self.auto_draw() && self.read(|s| !s.data.is_empty()) {
            self.draw();
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort_orders(&self) -> Vec<(ColumnId, SortDirection)> {
        self.read(|s| s.sort_orders.clone())
    }

    pub fn set_sort_orders(&self, orders: Vec<(ColumnId, SortDirection)>) {
        self.write(|s| {
            s.sort_orders = orders;
            s.sorted = None;
        });
        self.resort_and_redraw();
    }

    /// Move the column to the front of the sort stack with the given
    /// direction. A no-op when it is already the most significant key with
    /// that direction.
    pub fn add_sort(&self, column: impl Into<ColumnSel>, direction: SortDirection) {
        let column = id::column_id(column);
        let changed = self.write(|s| {
            if s.sort_orders
                .first()
                .is_some_and(|(c, d)| *c == column && *d == direction)
            {
                return false;
            }
            s.sort_orders.retain(|(c, _)| *c != column);
            s.sort_orders.insert(0, (column, direction));
            s.sorted = None;
            true
        });
        if changed {
            self.resort_and_redraw();
        }
    }

    /// Flip the column's direction when it is the most significant key, else
    /// promote it ascending.
    pub fn toggle_sort(&self, column: impl Into<ColumnSel>) {
        let column = id::column_id(column);
        let direction = self.read(|s| match s.sort_orders.first() {
            Some((c, d)) if *c == column => d.toggled(),
            _ => SortDirection::Ascending,
        });
        self.add_sort(column, direction);
    }

    fn resort_and_redraw(&self) {
        self.sort_data(false);
        if self.auto_draw() {
            self.draw();
        }
    }

    /// Recompute the sorted copy of the raw data. Idempotent unless forced
    /// or invalidated.
    ///
    /// `Vec::sort_by` is stable, which the pipeline relies on: the comparator
    /// returns `Equal` once the key stack is exhausted, keeping the original
    /// relative order for tied rows.
    pub fn sort_data(&self, force: bool) {
        let stale = self.read(|s| force || s.sorted.is_none());
        if !stale {
            return;
        }
        let (mut rows, defs, orders, registry) = self.read(|s| {
            (
                s.data.clone(),
                s.column_defs.clone(),
                s.sort_orders.clone(),
                s.registry.clone(),
            )
        });
        if !orders.is_empty() {
            log::debug!("[sort] sorting {} rows over {} keys", rows.len(), orders.len());
            rows.sort_by(|a, b| {
                for (column, direction) in &orders {
                    let va = extract_value(a, &defs, column.index()).unwrap_or(Value::Null);
                    let vb = extract_value(b, &defs, column.index()).unwrap_or(Value::Null);
                    let type_name = defs
                        .get(column.index())
                        .and_then(|d| d.type_name.as_deref());
                    let mut ord = registry.compare(type_name, &va, &vb);
                    if direction.is_descending() {
                        ord = ord.reverse();
                    }
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            });
        }
        self.write(|s| s.sorted = Some(rows));
    }

    /// The sorted data, computing it first when the cache is stale.
    pub fn sorted_data(&self) -> Vec<RowData> {
        self.sort_data(false);
        self.read(|s| s.sorted.clone().unwrap_or_default())
    }

    /// The structured value and data row backing a body cell position, when
    /// the sorted data covers it.
    pub(crate) fn structured_cell_value(
        &self,
        row_index: usize,
        column_index: usize,
    ) -> Option<(Option<Value>, RowData)> {
        let sorted = self.sorted_data();
        let row = sorted.get(row_index)?.clone();
        let defs = self.column_defs();
        let value = extract_value(&row, &defs, column_index);
        Some((value, row))
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Compile a pattern into the column's filter slot (smart mode,
    /// case-insensitive). Out-of-range columns are a silent no-op. Returns
    /// true when a filter is now active for the column.
    pub fn set_filter(&self, column: impl Into<ColumnSel>, pattern: &str) -> bool {
        self.set_filter_with(column, pattern, FilterOptions::default())
    }

    pub fn set_filter_with(&self, column: impl Into<ColumnSel>, pattern: &str, options: FilterOptions) -> bool {
        let column = id::column_id(column);
        if column.index() >= self.column_count() {
            return false;
        }
        let compiled = FilterPattern::compile(pattern, options);
        let active = compiled.is_some();
        self.write(|s| match compiled {
            Some(pattern) => {
                s.filters.insert(column, pattern);
            }
            None => {
                s.filters.remove(&column);
            }
        });
        active
    }

    pub fn clear_filter(&self, column: impl Into<ColumnSel>) {
        let column = id::column_id(column);
        self.write(|s| {
            s.filters.remove(&column);
        });
    }

    /// The active per-column filters, most significant column first.
    pub fn filters(&self) -> Vec<(ColumnId, FilterPattern)> {
        let mut filters: Vec<_> = self.read(|s| {
            s.filters
                .iter()
                .map(|(c, p)| (*c, p.clone()))
                .collect::<Vec<_>>()
        });
        filters.sort_by_key(|(c, _)| c.index());
        filters
    }

    /// Partition all body rows by the active filters and toggle visibility:
    /// a row failing any column's pattern is hidden, the rest are shown.
    pub fn apply_filters(&self) {
        let filters = self.filters();
        let defs = self.column_defs();
        let registry = self.registry();
        log::debug!("[filter] applying {} column filters", filters.len());

        let partition = self
            .rows()
            .partition(|_| true)
            .partition_out_over(&filters, |row, (column, pattern), _| {
                let type_name = defs
                    .get(column.index())
                    .and_then(|d| d.type_name.as_deref());
                let value = self.filter_value(row, column.index());
                !registry.matches(type_name, pattern, &value)
            });

        for row in partition.excluded.rows() {
            if row.visible() {
                row.set_visible(false);
            }
        }
        for row in partition.included.rows() {
            if !row.visible() {
                row.set_visible(true);
            }
        }
    }

    /// Clear every filter slot and reapply (all rows shown).
    pub fn reset_filters(&self) {
        self.write(|s| s.filters.clear());
        self.apply_filters();
    }

    pub fn clear_filters(&self) {
        self.reset_filters();
    }

    fn filter_value(&self, row: &Row, column: usize) -> Value {
        if let Some((value, _)) = self.structured_cell_value(row.index(), column)
            && let Some(value) = value
        {
            return value;
        }
        row.cell(column)
            .map(|c| Value::String(c.text_data()))
            .unwrap_or(Value::Null)
    }

    // -------------------------------------------------------------------------
    // Draw
    // -------------------------------------------------------------------------

    /// Render the sorted data into the body section. A no-op inside the
    /// initialization callback. With no data, renders the loading/empty
    /// message row (loading wins while `loading` is set) and fires
    /// `draw.empty`; otherwise renders one row per sorted record and fires
    /// `draw`.
    pub fn draw(&self) -> &Self {
        if self.read(|s| s.in_init) {
            return self;
        }
        let element = self.element();
        element.empty_section(Section::Body);

        if self.read(|s| s.data.is_empty()) {
            let message = self.read(|s| {
                if s.loading && s.loading_message.is_some() {
                    s.loading_message.clone()
                } else {
                    s.empty_message.clone()
                }
            });
            if let Some(message) = message {
                element.append_row(
                    Section::Body,
                    RowNode::new().cell(CellNode::data().text(message).css_class("qt-message")),
                );
            }
            log::debug!("[draw] no data, rendered message row");
            self.trigger(events::DRAW_EMPTY, &EventArgs::None);
            return self;
        }

        self.write(|s| s.loading = false);
        self.sort_data(false);
        let (sorted, defs, handler) = self.read(|s| {
            (
                s.sorted.clone().unwrap_or_default(),
                s.column_defs.clone(),
                s.click_handler.clone(),
            )
        });
        let registry = self.registry();
        let column_count = self.column_count();

        for (index, row_data) in sorted.iter().enumerate() {
            let mut row = RowNode::new();
            for col in 0..column_count {
                let def = defs.get(col);
                let mut cell = match def.map(|d| d.cell_kind).unwrap_or_default() {
                    CellKind::Header => CellNode::header(),
                    CellKind::Data => CellNode::data(),
                };
                let value = match def {
                    Some(def) => def.field.as_deref().and_then(|key| row_data.field_value(key)),
                    None => row_data.position(col),
                };
                let rendered = match def.and_then(|d| d.render.as_ref()) {
                    Some(render) => render(value.as_ref(), row_data),
                    None => match &value {
                        Some(v) => registry.render(def.and_then(|d| d.type_name.as_deref()), v),
                        None => String::new(),
                    },
                };
                if !rendered.is_empty() {
                    cell = if def.is_some_and(|d| d.html) {
                        cell.html(rendered)
                    } else {
                        cell.text(rendered)
                    };
                }
                if let Some(class) = def.and_then(|d| d.css_class.clone()) {
                    cell = cell.css_class(class);
                }
                if let Some(handler) = &handler {
                    let handler = handler.clone();
                    let event = ClickEvent {
                        cell: id::cell_id(index, col, false),
                        value: value.clone(),
                        row: row_data.clone(),
                        index,
                    };
                    cell = cell.on_click(move || handler(&event));
                }
                row = row.cell(cell);
            }
            element.append_row(Section::Body, row);
        }

        log::debug!("[draw] rendered {} rows", sorted.len());
        self.trigger(events::DRAW, &EventArgs::None);
        self
    }

    // -------------------------------------------------------------------------
    // State flags & messages
    // -------------------------------------------------------------------------

    pub fn auto_draw(&self) -> bool {
        self.read(|s| s.auto_draw)
    }

    pub fn set_auto_draw(&self, auto_draw: bool) {
        self.write(|s| s.auto_draw = auto_draw);
    }

    pub fn clear_on_load(&self) -> bool {
        self.read(|s| s.clear_on_load)
    }

    pub fn set_clear_on_load(&self, clear_on_load: bool) {
        self.write(|s| s.clear_on_load = clear_on_load);
    }

    pub fn loading(&self) -> bool {
        self.read(|s| s.loading)
    }

    /// Set the loading flag. Entering the loading state with `clear_on_load`
    /// set clears the data so a redraw surfaces the loading message.
    pub fn set_loading(&self, loading: bool) {
        let clear = self.read(|s| loading && s.clear_on_load);
        self.write(|s| s.loading = loading);
        if clear {
            self.write(|s| {
                s.data.clear();
                s.sorted = None;
            });
            if self.auto_draw() {
                self.draw();
            }
        }
    }

    pub fn loading_message(&self) -> Option<String> {
        self.read(|s| s.loading_message.clone())
    }

    pub fn set_loading_message(&self, message: impl Into<String>) {
        self.write(|s| s.loading_message = Some(message.into()));
    }

    pub fn empty_message(&self) -> Option<String> {
        self.read(|s| s.empty_message.clone())
    }

    pub fn set_empty_message(&self, message: impl Into<String>) {
        self.write(|s| s.empty_message = Some(message.into()));
    }

    pub fn click_handler(&self) -> Option<ClickHandlerFn> {
        self.read(|s| s.click_handler.clone())
    }

    /// Handler bound to every rendered data cell at the next draw, receiving
    /// the resolved field value, the full data row and its position.
    pub fn set_click_handler(&self, handler: impl Fn(&ClickEvent) + Send + Sync + 'static) {
        self.write(|s| s.click_handler = Some(Arc::new(handler)));
    }
}

impl std::fmt::Debug for QuickTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.read(|s| {
            f.debug_struct("QuickTable")
                .field("id", &s.id)
                .field("rows", &s.data.len())
                .field("column_defs", &s.column_defs.len())
                .field("sort_orders", &s.sort_orders)
                .finish()
        })
    }
}

/// Extract a row's value for a column: positional for field arrays when no
/// definitions are set, else through the definition's field key.
fn extract_value(row: &RowData, defs: &[ColumnDef], column: usize) -> Option<Value> {
    if defs.is_empty() {
        row.position(column)
    } else {
        defs.get(column)
            .and_then(|d| d.field.as_deref())
            .and_then(|key| row.field_value(key))
    }
}
