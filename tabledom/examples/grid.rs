use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use tabledom::{CellNode, RowNode, Section, TableElement};

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("grid.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let table = TableElement::with_columns(["City", "Country", "Population"]);
    for (city, country, population) in [
        ("Tokyo", "Japan", "37,400,000"),
        ("Delhi", "India", "31,200,000"),
        ("Shanghai", "China", "27,800,000"),
    ] {
        table.append_row(
            Section::Body,
            RowNode::new()
                .cell(CellNode::data().text(city))
                .cell(CellNode::data().text(country))
                .cell(CellNode::data().text(population)),
        );
    }

    // Hide one row and re-render
    println!("{}", table.render_plain());
    table.set_row_visible(Section::Body, 1, false);
    println!("without Delhi:\n{}", table.render_plain());
    Ok(())
}
