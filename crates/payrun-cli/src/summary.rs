use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use payrun_cli::types::{MappingListing, ProfileResult, RegionSummary};

pub fn print_summary(result: &ProfileResult) {
    println!("Profile: {}", result.root.display());
    println!("Company: {} (pay date {})", result.company, result.pay_date);
    println!("Employees: {}", result.employees);
    println!(
        "Mapping: {} ({} of {} columns mapped{})",
        result.mapping.path.display(),
        result.mapping.mapped,
        result.mapping.columns,
        if result.mapping.created {
            ", scaffold created"
        } else {
            ""
        }
    );
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: not written (dry run)"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Region"),
        header_cell("Origin"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Written"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for region in &result.regions {
        table.add_row(vec![
            Cell::new(region.region)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&region.origin),
            Cell::new(region.rows),
            Cell::new(region.columns),
            written_cell(region.written),
            status_cell(region),
        ]);
    }
    println!("{table}");

    if !result.unresolved.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Unresolved duplicates")]);
        apply_table_style(&mut table);
        for line in &result.unresolved {
            table.add_row(vec![Cell::new(line).fg(Color::Yellow)]);
        }
        println!("{table}");
    }
}

pub fn print_mapping(listing: &MappingListing) {
    println!("Mapping: {}", listing.summary.path.display());
    if listing.summary.created {
        println!("Scaffold created; fill in globalName for each column.");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Pos"),
        header_cell("Template column"),
        header_cell("Global name"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for entry in &listing.entries {
        table.add_row(vec![
            Cell::new(entry.col_pos),
            Cell::new(&entry.template_name),
            match &entry.global_name {
                Some(name) => Cell::new(name),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn written_cell(written: bool) -> Cell {
    if written {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn status_cell(region: &RegionSummary) -> Cell {
    match region.stub_reason {
        None => Cell::new("built").fg(Color::Green),
        Some(reason) => Cell::new(format!("stub: {reason}")).fg(Color::DarkGrey),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
