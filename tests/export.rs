use data_sweeper::export::{export, ExportFormat};
use data_sweeper::ingestion::csv::decode_csv_bytes;
use data_sweeper::ingestion::excel::decode_workbook_bytes;
use data_sweeper::types::{DataType, Field, Schema, Table, Value};

fn people_table() -> Table {
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("name", DataType::Utf8),
        Field::new("score", DataType::Float64),
        Field::new("active", DataType::Bool),
    ]);
    let rows = vec![
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".to_string()),
            Value::Float64(98.5),
            Value::Bool(true),
        ],
        vec![
            Value::Int64(2),
            Value::Utf8("Grace".to_string()),
            Value::Float64(87.25),
            Value::Bool(false),
        ],
    ];
    Table::new(schema, rows)
}

#[test]
fn csv_export_round_trips_through_the_decoder() {
    let table = people_table();
    let out = export(&table, "people.xlsx", ExportFormat::Csv).unwrap();

    let decoded = decode_csv_bytes(&out.bytes).unwrap();
    assert_eq!(decoded, table);
}

#[test]
fn csv_export_with_missing_values_round_trips() {
    // Floats are written with a decimal point, so a re-decode infers Float64 even when
    // every value is integral.
    let schema = Schema::new(vec![
        Field::new("name", DataType::Utf8),
        Field::new("score", DataType::Float64),
    ]);
    let table = Table::new(
        schema,
        vec![
            vec![Value::Utf8("a".to_string()), Value::Float64(2.0)],
            vec![Value::Utf8("b".to_string()), Value::Null],
        ],
    );

    let out = export(&table, "t.csv", ExportFormat::Csv).unwrap();
    let decoded = decode_csv_bytes(&out.bytes).unwrap();
    assert_eq!(decoded, table);
}

#[test]
fn xlsx_export_round_trips_through_the_decoder() {
    let table = people_table();
    let out = export(&table, "people.csv", ExportFormat::Xlsx).unwrap();

    assert_eq!(out.file_name, "people.xlsx");
    let decoded = decode_workbook_bytes(&out.bytes).unwrap();
    assert_eq!(decoded, table);
}

#[test]
fn zero_row_table_exports_exactly_the_header_line() {
    let schema = Schema::new(vec![
        Field::new("a", DataType::Utf8),
        Field::new("b", DataType::Utf8),
    ]);
    let table = Table::new(schema, vec![]);

    let out = export(&table, "empty.csv", ExportFormat::Csv).unwrap();
    assert_eq!(out.bytes, b"a,b\n");
}

#[test]
fn export_metadata_names_the_download() {
    let table = people_table();

    let csv_out = export(&table, "people.xlsx", ExportFormat::Csv).unwrap();
    assert_eq!(csv_out.file_name, "people.csv");
    assert_eq!(csv_out.mime_type, "text/csv");

    let xlsx_out = export(&table, "people.csv", ExportFormat::Xlsx).unwrap();
    assert_eq!(xlsx_out.file_name, "people.xlsx");
    assert_eq!(
        xlsx_out.mime_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}

#[test]
fn export_never_mutates_the_source_table() {
    let table = people_table();
    let before = table.clone();

    let _ = export(&table, "people.csv", ExportFormat::Csv).unwrap();
    let _ = export(&table, "people.csv", ExportFormat::Xlsx).unwrap();
    assert_eq!(table, before);
}
