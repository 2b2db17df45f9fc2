//! End-to-end pipeline tests: binding, data validation, sorting, filtering,
//! drawing and events.

use std::sync::{Arc, Mutex};

use quicktable::events::{COLUMN_VISIBLE, DRAW, DRAW_EMPTY, ROW_VISIBLE};
use quicktable::prelude::*;
use tabledom::Section;

fn bound(columns: &[&str]) -> (TableElement, QuickTable) {
    let element = TableElement::with_columns(columns.iter().copied());
    let table = Binder::new().bind_one(&element);
    (element, table)
}

fn fields(rows: &[&[&str]]) -> Vec<RowData> {
    rows.iter().map(|r| RowData::fields(r.iter().copied())).collect()
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_binding_memoizes_wrapper() {
    let element = TableElement::with_columns(["A", "B"]);
    let binder = Binder::new();
    let first = binder.bind_one(&element);
    let second = binder.bind_one(&element);
    assert!(first.same(&second));
    // a different binder still finds the existing wrapper on the element
    let third = Binder::new().bind_one(&element);
    assert!(first.same(&third));
}

#[test]
fn test_bind_many_and_lookup_by_id() {
    let one = TableElement::with_columns(["A"]);
    let two = TableElement::with_columns(["B"]);
    let tables = Binder::new().bind(&[one, two]);
    assert_eq!(tables.len(), 2);
    tables.get(0).unwrap().set_id("first");
    tables.get(1).unwrap().set_id("second");
    assert!(tables.get_by_id("second").unwrap().same(&tables.get(1).unwrap()));
    assert!(tables.get_by_id("missing").is_none());
    assert_eq!(tables.get_all_by_id(["first", "second"]).len(), 2);
    assert!(tables.get(5).is_none());
}

#[test]
fn test_init_callback_suppresses_draw() {
    let element = TableElement::with_columns(["A", "B"]);
    let table = Binder::new().bind_one_with(&element, |t| {
        t.set_data(fields(&[&["1", "2"]])).unwrap();
    });
    // draw was a no-op inside init
    assert_eq!(element.row_count(Section::Body), 0);
    table.draw();
    assert_eq!(element.row_count(Section::Body), 1);
}

// ============================================================================
// Data validation
// ============================================================================

#[test]
fn test_draw_renders_rows_then_clears_to_message() {
    let (element, table) = bound(&["A", "B", "C"]);
    table.set_empty_message("no rows");
    table
        .set_data(fields(&[&["a", "b", "c"], &["d", "e", "f"]]))
        .unwrap();

    assert_eq!(element.row_count(Section::Body), 2);
    assert_eq!(element.cell_count(Section::Body, 0), 3);
    assert_eq!(element.cell_count(Section::Body, 1), 3);
    assert_eq!(table.cell_text_data(), vec![
        vec!["a".to_string(), "b".to_string(), "c".to_string()],
        vec!["d".to_string(), "e".to_string(), "f".to_string()],
    ]);

    table.set_data(Vec::new()).unwrap();
    assert_eq!(element.row_count(Section::Body), 1);
    assert_eq!(element.text(Section::Body, 0, 0), Some("no rows".to_string()));
}

#[test]
fn test_set_data_rejects_short_rows_without_mutation() {
    let (_, table) = bound(&["A", "B", "C"]);
    let good = fields(&[&["a", "b", "c"]]);
    table.set_data(good.clone()).unwrap();

    let err = table
        .set_data(fields(&[&["1", "2", "3"], &["x", "y"]]))
        .unwrap_err();
    assert_eq!(
        err,
        TableError::RowTooShort {
            column_count: 3,
            min_row_len: 2
        }
    );
    // prior data untouched
    assert_eq!(table.raw_data(), good);
}

#[test]
fn test_set_data_rejects_records_without_defs() {
    let (_, table) = bound(&["A"]);
    let rows = vec![RowData::record(Record::new().field("a", "1"))];
    assert_eq!(table.set_data(rows).unwrap_err(), TableError::RowsNotArrays);
    assert!(table.raw_data().is_empty());
}

#[test]
fn test_set_column_defs_requires_enough_defs() {
    let (_, table) = bound(&["A", "B", "C"]);
    let err = table
        .set_column_defs(vec![ColumnDef::new(), ColumnDef::new()])
        .unwrap_err();
    assert_eq!(
        err,
        TableError::NotEnoughColumnDefs {
            column_count: 3,
            def_count: 2
        }
    );
    assert!(table.column_defs().is_empty());
}

#[test]
fn test_data_falls_back_to_dom_text() {
    let element = TableElement::with_columns(["A", "B"]);
    element.append_row(
        Section::Body,
        tabledom::RowNode::new()
            .cell(tabledom::CellNode::data().text("x"))
            .cell(tabledom::CellNode::data().text("y")),
    );
    let table = Binder::new().bind_one(&element);
    assert!(table.raw_data().is_empty());
    assert_eq!(
        table.data(),
        vec![RowData::fields(["x", "y"])]
    );
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_multi_key() {
    let (_, table) = bound(&["N", "L"]);
    table
        .set_data(fields(&[&["2", "b"], &["1", "b"], &["1", "a"]]))
        .unwrap();
    table.set_sort_orders(vec![
        (column_id(1), SortDirection::Ascending),
        (column_id(0), SortDirection::Ascending),
    ]);
    assert_eq!(
        table.sorted_data(),
        fields(&[&["1", "a"], &["1", "b"], &["2", "b"]])
    );
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let (_, table) = bound(&["K", "V"]);
    table
        .set_data(fields(&[
            &["b", "1"],
            &["a", "2"],
            &["b", "0"],
            &["a", "1"],
        ]))
        .unwrap();
    table.add_sort(0, SortDirection::Ascending);
    assert_eq!(
        table.sorted_data(),
        fields(&[&["a", "2"], &["a", "1"], &["b", "1"], &["b", "0"]])
    );
}

#[test]
fn test_add_sort_is_idempotent() {
    let (_, table) = bound(&["A", "B"]);
    table.set_data(fields(&[&["1", "2"]])).unwrap();
    table.add_sort(0, SortDirection::Ascending);
    table.add_sort(0, SortDirection::Ascending);
    assert_eq!(
        table.sort_orders(),
        vec![(column_id(0), SortDirection::Ascending)]
    );
}

#[test]
fn test_add_sort_promotes_to_front() {
    let (_, table) = bound(&["A", "B"]);
    table.set_data(fields(&[&["1", "2"]])).unwrap();
    table.add_sort(0, SortDirection::Ascending);
    table.add_sort(1, SortDirection::Ascending);
    table.add_sort(0, SortDirection::Descending);
    assert_eq!(
        table.sort_orders(),
        vec![
            (column_id(0), SortDirection::Descending),
            (column_id(1), SortDirection::Ascending),
        ]
    );
}

#[test]
fn test_toggle_sort_flips_leading_direction() {
    let (_, table) = bound(&["A", "B"]);
    table.set_data(fields(&[&["1", "2"]])).unwrap();
    table.toggle_sort(0);
    assert_eq!(
        table.sort_orders(),
        vec![(column_id(0), SortDirection::Ascending)]
    );
    table.toggle_sort(0);
    assert_eq!(
        table.sort_orders(),
        vec![(column_id(0), SortDirection::Descending)]
    );
    // a different column starts ascending again
    table.toggle_sort(1);
    assert_eq!(
        table.sort_orders(),
        vec![
            (column_id(1), SortDirection::Ascending),
            (column_id(0), SortDirection::Descending),
        ]
    );
}

#[test]
fn test_descending_sort_renders_reversed() {
    let (_, table) = bound(&["A"]);
    table.set_data(fields(&[&["a"], &["c"], &["b"]])).unwrap();
    table.add_sort(0, SortDirection::Descending);
    assert_eq!(
        table.cell_text_data(),
        vec![vec!["c".to_string()], vec!["b".to_string()], vec!["a".to_string()]]
    );
}

#[test]
fn test_typed_sort_uses_registry() {
    let (_, table) = bound(&["Name", "Age"]);
    table
        .set_column_defs(vec![
            ColumnDef::new().field("name"),
            ColumnDef::new().field("age").type_name("number"),
        ])
        .unwrap();
    table
        .set_data(vec![
            RowData::record(Record::new().field("name", "ada").field("age", "100")),
            RowData::record(Record::new().field("name", "lin").field("age", "9")),
        ])
        .unwrap();
    table.add_sort(1, SortDirection::Ascending);
    // numeric, not lexical: 9 before 100
    assert_eq!(
        table.cell(0, 0, false).unwrap().text_data(),
        "lin".to_string()
    );
    assert_eq!(table.cell(1, 0, false).unwrap().text_data(), "ada".to_string());
}

// ============================================================================
// Rendering with column definitions
// ============================================================================

#[test]
fn test_column_defs_drive_rendering() {
    let (element, table) = bound(&["Name", "Age", "Notes"]);
    table
        .set_column_defs(vec![
            ColumnDef::new().header_cell().field("name"),
            ColumnDef::new()
                .field("age")
                .render(|value, _| format!("{} yrs", value.map(Value::display).unwrap_or_default())),
            ColumnDef::new().field("notes").html().css_class("notes"),
        ])
        .unwrap();
    table
        .set_data(vec![RowData::record(
            Record::new()
                .field("name", "ada")
                .field("age", 36)
                .field("notes", "<b>first</b>"),
        )])
        .unwrap();

    assert_eq!(element.cell_kind(Section::Body, 0, 0), Some(CellKind::Header));
    assert_eq!(element.text(Section::Body, 0, 1), Some("36 yrs".to_string()));
    assert!(element.content(Section::Body, 0, 2).unwrap().is_html());
    assert_eq!(
        element.cell_css_classes(Section::Body, 0, 2),
        vec!["notes".to_string()]
    );
    // the html cell's visible text is the stripped markup
    assert_eq!(table.cell(0, 2, false).unwrap().text_data(), "first");
}

#[test]
fn test_cell_data_getters_prefer_structured_values() {
    let (_, table) = bound(&["Age"]);
    table
        .set_column_defs(vec![
            ColumnDef::new()
                .field("age")
                .render(|value, _| format!("[{}]", value.map(Value::display).unwrap_or_default())),
        ])
        .unwrap();
    table
        .set_data(vec![RowData::record(Record::new().field("age", 36))])
        .unwrap();

    let cell = table.cell(0, 0, false).unwrap();
    assert_eq!(cell.data(), "[36]");
    assert_eq!(cell.raw_data(), Some(Value::Int(36)));
    assert_eq!(cell.text_data(), "[36]");
    // header cells fall back to their literal content
    let header = table.header_cell(0, 0).unwrap();
    assert_eq!(header.data(), "Age");
}

// ============================================================================
// Click handling
// ============================================================================

#[test]
fn test_click_handler_receives_value_row_and_index() {
    let (element, table) = bound(&["A", "B"]);
    let seen: Arc<Mutex<Vec<ClickEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    table.set_click_handler(move |event| log.lock().unwrap().push(event.clone()));
    table
        .set_data(fields(&[&["a", "b"], &["c", "d"]]))
        .unwrap();

    assert!(element.click(Section::Body, 1, 0));
    let events = seen.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].value, Some(Value::from("c")));
    assert_eq!(events[0].row, RowData::fields(["c", "d"]));
    assert_eq!(events[0].index, 1);
    assert_eq!(events[0].cell, cell_id(1, 0, false));
}

#[test]
fn test_filtered_out_rows_are_not_clickable() {
    let (element, table) = bound(&["A"]);
    let seen = Arc::new(Mutex::new(0usize));
    let log = Arc::clone(&seen);
    table.set_click_handler(move |_| *log.lock().unwrap() += 1);
    table.set_data(fields(&[&["apple"], &["banana"]])).unwrap();

    table.set_filter(0, "banana");
    table.apply_filters();
    assert!(!element.click(Section::Body, 0, 0));
    assert!(element.click(Section::Body, 1, 0));
    assert_eq!(*seen.lock().unwrap(), 1);
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_apply_filters_hides_failing_rows() {
    let (_, table) = bound(&["Fruit", "Color"]);
    table
        .set_data(fields(&[
            &["apple pie", "red"],
            &["banana", "yellow"],
            &["grape", "red"],
        ]))
        .unwrap();

    assert!(table.set_filter(1, "red"));
    table.apply_filters();
    let visible: Vec<bool> = table.rows().rows().iter().map(|r| r.visible()).collect();
    assert_eq!(visible, vec![true, false, true]);

    // a second column's filter ANDs with the first
    assert!(table.set_filter(0, "app pie"));
    table.apply_filters();
    let visible: Vec<bool> = table.rows().rows().iter().map(|r| r.visible()).collect();
    assert_eq!(visible, vec![true, false, false]);

    table.reset_filters();
    let visible: Vec<bool> = table.rows().rows().iter().map(|r| r.visible()).collect();
    assert_eq!(visible, vec![true, true, true]);
}

#[test]
fn test_set_filter_out_of_range_is_noop() {
    let (_, table) = bound(&["A"]);
    assert!(!table.set_filter(5, "x"));
    assert!(table.filters().is_empty());
}

#[test]
fn test_empty_pattern_clears_slot() {
    let (_, table) = bound(&["A"]);
    assert!(table.set_filter(0, "x"));
    assert_eq!(table.filters().len(), 1);
    assert!(!table.set_filter(0, ""));
    assert!(table.filters().is_empty());
}

#[test]
fn test_filter_respects_type_pre_filter() {
    let (_, table) = bound(&["Doc"]);
    table
        .set_column_defs(vec![ColumnDef::new().field("doc").type_name("html").html()])
        .unwrap();
    table
        .set_data(vec![
            RowData::record(Record::new().field("doc", "<b>alpha</b>")),
            RowData::record(Record::new().field("doc", "<i>beta</i>")),
        ])
        .unwrap();

    // "b" only occurs in markup for the first row; stripping removes it
    table.set_filter(0, "b");
    table.apply_filters();
    let visible: Vec<bool> = table.rows().rows().iter().map(|r| r.visible()).collect();
    assert_eq!(visible, vec![false, true]);
}

#[test]
fn test_column_facade_filter_setter() {
    let (_, table) = bound(&["A"]);
    table.set_data(fields(&[&["x"], &["y"]])).unwrap();
    let column = table.column(0).unwrap();
    assert!(column.set_filter("x"));
    table.apply_filters();
    let visible: Vec<bool> = table.rows().rows().iter().map(|r| r.visible()).collect();
    assert_eq!(visible, vec![true, false]);
    column.clear_filter();
    table.apply_filters();
    let visible: Vec<bool> = table.rows().rows().iter().map(|r| r.visible()).collect();
    assert_eq!(visible, vec![true, true]);
}

// ============================================================================
// Visibility events
// ============================================================================

#[test]
fn test_column_visibility_event_forwards_to_table() {
    let (element, table) = bound(&["A", "B"]);
    table.set_data(fields(&[&["1", "2"]])).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    table.on(COLUMN_VISIBLE, move |args| log.lock().unwrap().push(args.clone()));

    table.column(1).unwrap().set_visible(false);
    assert!(!element.column_visible(1));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![EventArgs::ColumnVisible {
            column_id: column_id(1),
            old_value: true,
            new_value: false,
        }]
    );
}

#[test]
fn test_column_emitter_survives_repeated_lookups() {
    let (_, table) = bound(&["A"]);
    table.set_data(fields(&[&["1"]])).unwrap();

    let seen = Arc::new(Mutex::new(0usize));
    let log = Arc::clone(&seen);
    table
        .column(0)
        .unwrap()
        .on(COLUMN_VISIBLE, move |_| *log.lock().unwrap() += 1);
    // a fresh facade for the same column shares the emitter
    table.column(0).unwrap().set_visible(false);
    assert_eq!(*seen.lock().unwrap(), 1);
}

#[test]
fn test_row_visibility_event() {
    let (_, table) = bound(&["A"]);
    table.set_data(fields(&[&["1"]])).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    table.on(ROW_VISIBLE, move |args| log.lock().unwrap().push(args.clone()));

    table.row(0, false).unwrap().set_visible(false);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![EventArgs::RowVisible {
            row_id: row_id(0, false),
            old_value: true,
            new_value: false,
        }]
    );
}

#[test]
fn test_draw_events() {
    let (_, table) = bound(&["A"]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    table.on(DRAW, move |_| log.lock().unwrap().push("draw"));
    let log = Arc::clone(&seen);
    table.on(DRAW_EMPTY, move |_| log.lock().unwrap().push("empty"));

    table.set_data(fields(&[&["1"]])).unwrap();
    table.set_data(Vec::new()).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["draw", "empty"]);
}

// ============================================================================
// Loading & messages
// ============================================================================

#[test]
fn test_loading_message_wins_while_loading() {
    let (element, table) = bound(&["A"]);
    table.set_empty_message("nothing here");
    table.set_loading_message("hold on");

    table.draw();
    assert_eq!(element.text(Section::Body, 0, 0), Some("nothing here".to_string()));

    table.set_loading(true);
    table.draw();
    assert_eq!(element.text(Section::Body, 0, 0), Some("hold on".to_string()));

    // drawing data clears the loading flag
    table.set_data(fields(&[&["1"]])).unwrap();
    assert!(!table.loading());
}

#[test]
fn test_clear_on_load_drops_data() {
    let (element, table) = bound(&["A"]);
    table.set_loading_message("loading");
    table.set_clear_on_load(true);
    table.set_data(fields(&[&["1"]])).unwrap();
    assert_eq!(element.row_count(Section::Body), 1);

    table.set_loading(true);
    assert!(table.raw_data().is_empty());
    assert_eq!(element.text(Section::Body, 0, 0), Some("loading".to_string()));
}

// ============================================================================
// Navigation & misc
// ============================================================================

#[test]
fn test_out_of_range_lookups_are_none() {
    let (_, table) = bound(&["A", "B"]);
    table.set_data(fields(&[&["1", "2"]])).unwrap();
    assert!(table.column(5).is_none());
    assert!(table.row(5, false).is_none());
    assert!(table.cell(0, 5, false).is_none());
    assert!(table.header_row(3).is_none());
}

#[test]
fn test_when_accessors() {
    let (_, table) = bound(&["A", "B"]);
    table.set_data(fields(&[&["1", "2"]])).unwrap();
    assert_eq!(table.when().column(0, |c| c.index()), Some(0));
    assert_eq!(table.when().column(9, |c| c.index()), None);
    assert_eq!(
        table.when().cell(0, 1, false, |c| c.text_data()),
        Some("2".to_string())
    );
    assert_eq!(table.when().cell(7, 1, false, |c| c.text_data()), None);
    assert_eq!(table.when().header_row(0, |r| r.len()), Some(2));
}

#[test]
fn test_auto_draw_off_defers_rendering() {
    let (element, table) = bound(&["A"]);
    table.set_auto_draw(false);
    table.set_data(fields(&[&["1"]])).unwrap();
    assert_eq!(element.row_count(Section::Body), 0);
    table.draw();
    assert_eq!(element.row_count(Section::Body), 1);
}

#[test]
fn test_chain_returns_handle() {
    let (_, table) = bound(&["A"]);
    table
        .chain(|t| t.set_empty_message("none"))
        .chain(|t| {
            t.set_data(fields(&[&["1"]])).unwrap();
        });
    assert_eq!(table.row_count(), 1);
}

#[test]
fn test_column_facade_cell_collections() {
    let (_, table) = bound(&["A", "B"]);
    table.set_data(fields(&[&["1", "2"], &["3", "4"]])).unwrap();
    let column = table.column(1).unwrap();
    assert_eq!(column.header_cell_ids().len(), 1);
    assert_eq!(column.body_cell_ids().len(), 2);
    assert_eq!(column.cells().len(), 3);
    assert_eq!(column.body_cells().text_data(), vec!["2".to_string(), "4".to_string()]);
    assert_eq!(
        column.header_cell(0).unwrap().text_data(),
        "B".to_string()
    );
}

#[test]
fn test_rows_collection_aggregates() {
    let (_, table) = bound(&["A", "B"]);
    table.set_data(fields(&[&["1", "2"], &["3", "4"]])).unwrap();
    let rows = table.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.column_cells(0).text_data(), vec!["1".to_string(), "3".to_string()]);
    assert_eq!(rows.cell_ids().len(), 4);
    assert_eq!(rows.data(), fields(&[&["1", "2"], &["3", "4"]]));
}

#[test]
fn test_cells_flattening_selector() {
    let (_, table) = bound(&["A", "B"]);
    table.set_data(fields(&[&["1", "2"]])).unwrap();
    let single = table.cell(0, 0, false).unwrap();
    let row_cells = table.row(0, false).unwrap().cells();
    let mixed = Cells::from_picks(
        table.clone(),
        vec![
            CellPick::from(single),
            CellPick::from(cell_id(0, 1, false)),
            CellPick::from(row_cells),
        ],
    );
    assert_eq!(mixed.len(), 4);
    assert_eq!(
        mixed.text_data(),
        vec!["1".to_string(), "2".to_string(), "1".to_string(), "2".to_string()]
    );
}

#[test]
fn test_quicktables_draw_all() {
    let one = TableElement::with_columns(["A"]);
    let two = TableElement::with_columns(["B"]);
    let binder = Binder::new();
    let tables = binder.bind(&[one.clone(), two.clone()]);
    for table in tables.tables() {
        table.set_auto_draw(false);
        table.set_data(fields(&[&["x"]])).unwrap();
    }
    tables.draw();
    assert_eq!(one.row_count(Section::Body), 1);
    assert_eq!(two.row_count(Section::Body), 1);
}
