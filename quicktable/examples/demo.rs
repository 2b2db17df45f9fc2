use std::fs::File;

use quicktable::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let element = TableElement::with_columns(["Name", "Score", "Comment"]);
    let binder = Binder::new();
    let table = binder.bind_one_with(&element, |t| {
        t.set_empty_message("no players yet");
        t.on(events::DRAW, |_| log::info!("table drawn"));
    });

    table
        .set_column_defs(vec![
            ColumnDef::new().field("name"),
            ColumnDef::new()
                .field("score")
                .type_name("number")
                .render(|value, _| format!("{} pts", value.map(Value::display).unwrap_or_default())),
            ColumnDef::new().field("comment").type_name("html").html(),
        ])
        .expect("column defs match the table");

    table
        .set_data(vec![
            RowData::record(
                Record::new()
                    .field("name", "ada")
                    .field("score", "100")
                    .field("comment", "<b>fast</b> start"),
            ),
            RowData::record(
                Record::new()
                    .field("name", "lin")
                    .field("score", "9")
                    .field("comment", "warming up"),
            ),
            RowData::record(
                Record::new()
                    .field("name", "mei")
                    .field("score", "42")
                    .field("comment", "steady"),
            ),
        ])
        .expect("rows match the column defs");

    println!("unsorted:\n{}", element.render_plain());

    // Numeric sort on the score column, most significant first
    table.add_sort(1, SortDirection::Descending);
    println!("by score:\n{}", element.render_plain());

    // Smart filter: both tokens must match, in any order
    table.set_filter(0, "a");
    table.apply_filters();
    println!("names containing 'a':\n{}", element.render_plain());

    table.reset_filters();
    table.set_data(Vec::new()).expect("clearing never fails");
    println!("cleared:\n{}", element.render_plain());
    Ok(())
}
