//! Terminal rendering of conversion results and schemas.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use sheet_model::{FieldValue, OutputRecord, Schema};

/// Converted records as pretty-printed JSON, one `[meta, values...]` array per record.
pub fn records_json(records: &[OutputRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

/// Meta keys in the order the schema declares them.
pub fn meta_keys(schema: &Schema) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for field in schema.fields() {
        for key in &field.meta {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
    }
    keys
}

/// One row per record: entry number, meta keys, then positional fields.
pub fn records_table(schema: &Schema, records: &[OutputRecord]) -> Table {
    let meta_keys = meta_keys(schema);
    let positional: Vec<&str> = schema
        .fields()
        .iter()
        .filter(|field| !field.is_meta())
        .map(|field| field.name.as_str())
        .collect();

    let mut header = vec![header_cell("Entry")];
    header.extend(meta_keys.iter().map(|key| header_cell(key).fg(Color::Cyan)));
    header.extend(positional.iter().map(|name| header_cell(name)));

    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for (idx, record) in records.iter().enumerate() {
        let mut row = vec![Cell::new(idx + 1)];
        row.extend(
            meta_keys
                .iter()
                .map(|key| value_cell(record.meta.get(*key).unwrap_or(&FieldValue::Missing))),
        );
        row.extend(record.values.iter().map(value_cell));
        table.add_row(row);
    }
    table
}

/// One row per schema field.
pub fn schema_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Required"),
        header_cell("Unique"),
        header_cell("Meta"),
        header_cell("Default"),
        header_cell("Pattern"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);

    for field in schema.fields() {
        table.add_row(vec![
            Cell::new(&field.name).add_attribute(Attribute::Bold),
            Cell::new(field.kind.label()),
            flag_cell(schema.is_required(&field.name)),
            flag_cell(field.unique),
            optional_cell((!field.meta.is_empty()).then(|| field.meta.join(", "))),
            optional_cell(field.default.clone()),
            optional_cell(field.pattern().map(str::to_string)),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Style for the short totals table printed after a conversion.
pub fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Totals for a finished conversion.
pub fn totals_table(records: usize, errors: usize, warnings: usize) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(records).add_attribute(Attribute::Bold),
        count_cell(errors, Color::Red),
        count_cell(warnings, Color::Yellow),
    ]);
    table
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn value_cell(value: &FieldValue) -> Cell {
    match value {
        FieldValue::Text(text) => Cell::new(text),
        FieldValue::Integer(number) => Cell::new(number).set_alignment(CellAlignment::Right),
        FieldValue::Boolean(flag) => Cell::new(flag),
        FieldValue::Path(path) => Cell::new(path.display()),
        FieldValue::Missing => dim_cell("-"),
    }
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn optional_cell(value: Option<String>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> Schema {
        Schema::from_value(json!({
            "properties": {
                "sample": {"meta": "id"},
                "fastq_1": {"format": "file-path"},
                "group": {"meta": ["group", "id"]},
                "replicate": {"type": "integer", "default": 1}
            },
            "required": ["sample"]
        }))
        .unwrap()
    }

    #[test]
    fn meta_keys_are_deduplicated_in_schema_order() {
        assert_eq!(meta_keys(&schema()), vec!["id", "group"]);
    }

    #[test]
    fn records_table_has_a_column_per_key_and_field() {
        let mut table = records_table(&schema(), &[OutputRecord::default()]);
        assert_eq!(table.column_count(), 5);
        assert_eq!(table.row_iter().count(), 1);
    }

    #[test]
    fn schema_table_lists_every_field() {
        let table = schema_table(&schema());
        assert_eq!(table.row_iter().count(), 4);
        let rendered = table.to_string();
        assert!(rendered.contains("file-path"));
        assert!(rendered.contains("group, id"));
    }
}
