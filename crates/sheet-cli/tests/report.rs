//! Rendering of real conversion results.

use std::fs;

use sheet_cli::report::{records_json, records_table, totals_table};
use sheet_model::Schema;
use sheet_validate::Converter;

const SCHEMA: &str = r#"{
    "properties": {
        "sample": {"type": "string", "meta": "id"},
        "single_end": {"type": "boolean", "meta": "single_end"},
        "replicate": {"type": "integer"},
        "condition": {"type": "string"}
    },
    "required": ["sample"]
}"#;

#[test]
fn json_output_is_meta_then_values() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.json");
    let document = dir.path().join("samplesheet.tsv");
    fs::write(&schema, SCHEMA).unwrap();
    fs::write(
        &document,
        "sample\tsingle_end\treplicate\tcondition\nS1\tfalse\t1\tctrl\nS2\ttrue\t\ttreated\n",
    )
    .unwrap();

    let records = Converter::default().convert(&document, &schema).unwrap();
    let json = records_json(&records).unwrap();
    insta::assert_snapshot!(json, @r###"
    [
      [
        {
          "id": "S1",
          "single_end": false
        },
        1,
        "ctrl"
      ],
      [
        {
          "id": "S2",
          "single_end": true
        },
        null,
        "treated"
      ]
    ]
    "###);

    let mut table = records_table(&Schema::from_json_str(SCHEMA).unwrap(), &records);
    assert_eq!(table.column_count(), 5);
    let rendered = table.to_string();
    assert!(rendered.contains("treated"));
    assert!(rendered.contains("single_end"));
}

#[test]
fn totals_show_counts() {
    let rendered = totals_table(12, 3, 0).to_string();
    for label in ["Records", "Errors", "Warnings", "12", "3"] {
        assert!(rendered.contains(label), "missing {label} in\n{rendered}");
    }
}
